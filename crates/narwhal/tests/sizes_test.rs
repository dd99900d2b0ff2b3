use narwhal::sizes::{recall, store};
use narwhal::{LayoutGraph, Side};

#[test]
fn recall_restores_constant_sizes_only() {
    let mut g = LayoutGraph::new();
    let fixed = g.add_constant_size_node(100.0, 40.0);
    let border = g.add_border_node(fixed, 8.0, 6.0, Side::South).unwrap();
    let plain = g.add_node(30.0, 10.0);
    store(&mut g);

    for id in [fixed, border, plain] {
        g[id].width *= 2.0;
        g[id].height += 1.0;
    }
    recall(&mut g);

    assert_eq!((g[fixed].width, g[fixed].height), (100.0, 40.0));
    assert_eq!((g[border].width, g[border].height), (8.0, 6.0));
    assert_eq!((g[plain].width, g[plain].height), (60.0, 11.0));
}

#[test]
fn store_takes_the_current_size() {
    let mut g = LayoutGraph::new();
    let fixed = g.add_constant_size_node(100.0, 40.0);
    g[fixed].width = 120.0;
    store(&mut g);
    g[fixed].width = 10.0;
    recall(&mut g);
    assert_eq!(g[fixed].width, 120.0);
}
