use narwhal::base::order::{Links, crossings, reduce_crossings};
use narwhal::base::rank::{longest_path, mark_feedback_edges};
use narwhal::{BaseLayout, Error, LayeredLayout, LayoutGraph, Side};

#[test]
fn feedback_edges_close_cycles() {
    let mut g = LayoutGraph::new();
    let a = g.add_node(10.0, 10.0);
    let b = g.add_node(10.0, 10.0);
    let c = g.add_node(10.0, 10.0);
    let ab = g.add_edge(a, b).unwrap();
    let bc = g.add_edge(b, c).unwrap();
    let ca = g.add_edge(c, a).unwrap();

    let nodes = g.layout_nodes();
    assert_eq!(mark_feedback_edges(&mut g, &nodes), 1);
    assert!(!g[ab].feedback && !g[bc].feedback);
    assert!(g[ca].feedback);

    let ranks = longest_path(&g, &nodes);
    assert_eq!((ranks[&a], ranks[&b], ranks[&c]), (0, 1, 2));
}

#[test]
fn longest_path_puts_nodes_below_their_lowest_predecessor() {
    let mut g = LayoutGraph::new();
    let a = g.add_node(10.0, 10.0);
    let b = g.add_node(10.0, 10.0);
    let c = g.add_node(10.0, 10.0);
    let lone = g.add_node(10.0, 10.0);
    g.add_edge(a, b).unwrap();
    g.add_edge(b, c).unwrap();
    g.add_edge(a, c).unwrap();

    let ranks = longest_path(&g, &g.layout_nodes());
    assert_eq!(ranks[&c], 2);
    assert_eq!(ranks[&lone], 0);
}

#[test]
fn barycenter_sweeps_remove_a_simple_crossing() {
    let mut g = LayoutGraph::new();
    let a = g.add_node(10.0, 10.0);
    let b = g.add_node(10.0, 10.0);
    let c = g.add_node(10.0, 10.0);
    let d = g.add_node(10.0, 10.0);
    g.add_edge(a, d).unwrap();
    g.add_edge(b, c).unwrap();

    let links = Links::new(&g);
    let mut layers = vec![vec![a, b], vec![c, d]];
    assert_eq!(crossings(&layers, &links), 1);
    reduce_crossings(&mut layers, &links, 4);
    assert_eq!(crossings(&layers, &links), 0);
}

#[test]
fn layered_layout_stacks_ranks_by_padding() {
    let mut g = LayoutGraph::new();
    let a = g.add_node(40.0, 20.0);
    let b = g.add_node(40.0, 30.0);
    let c = g.add_node(40.0, 20.0);
    g.add_edge(a, b).unwrap();
    g.add_edge(b, c).unwrap();

    LayeredLayout::default().layout(&mut g).unwrap();
    assert_eq!(g.ranks().len(), 3);
    assert_eq!(g[a].y, 16.0);
    assert_eq!(g[b].y, 16.0 + 20.0 + 32.0);
    assert_eq!(g[c].y, g[b].y + 30.0 + 32.0);
    assert_eq!(g.layout_size().height, g[c].y + 20.0 + 16.0);
    // A straight chain lines up.
    assert_eq!(g[a].x, g[b].x);
    assert_eq!(g[b].x, g[c].x);
    assert_eq!(g[a].x, 16.0);
}

#[test]
fn layered_layout_separates_rank_mates() {
    let mut g = LayoutGraph::new();
    let a = g.add_node(40.0, 20.0);
    let b = g.add_node(20.0, 20.0);
    let c = g.add_node(20.0, 20.0);
    g.add_edge(a, b).unwrap();
    g.add_edge(a, c).unwrap();

    LayeredLayout::default().layout(&mut g).unwrap();
    let rank = g.rank_of(b).unwrap().to_vec();
    assert_eq!(rank.len(), 2);
    let (first, second) = (rank[0], rank[1]);
    assert!(g[second].x - g[first].x >= 20.0 + 32.0 - 1e-9);
    assert_eq!(g[first].right, Some(second));
    assert!(g.layout_size().width >= g[second].right_x() + 16.0 - 1e-9);
}

#[test]
fn long_edges_get_one_bend_node_per_crossed_rank() {
    let mut g = LayoutGraph::new();
    let a = g.add_node(10.0, 10.0);
    let b = g.add_node(10.0, 10.0);
    let c = g.add_node(10.0, 10.0);
    let d = g.add_node(10.0, 10.0);
    g.add_edge(a, b).unwrap();
    g.add_edge(b, c).unwrap();
    g.add_edge(c, d).unwrap();
    let long = g.add_edge(a, d).unwrap();
    let back = g.add_edge(d, b).unwrap();

    LayeredLayout::default().layout(&mut g).unwrap();
    assert_eq!(g[long].vnodes.len(), 2);
    let ranks: Vec<_> = g[long].vnodes.iter().map(|v| g[*v].rank).collect();
    assert_eq!(ranks, vec![Some(1), Some(2)]);

    // The reversed edge's bend nodes still run from its source to its target.
    assert!(g[back].feedback);
    let ranks: Vec<_> = g[back].vnodes.iter().map(|v| g[*v].rank).collect();
    assert_eq!(ranks, vec![Some(2)]);

    // A second run starts from scratch.
    let count = g.node_count();
    LayeredLayout::default().layout(&mut g).unwrap();
    assert_eq!(g.node_count(), count);
}

#[test]
fn edges_to_unresolved_border_nodes_are_reported() {
    let mut g = LayoutGraph::new();
    let p = g.add_constant_size_node(100.0, 40.0);
    let b = g.add_border_node(p, 10.0, 10.0, Side::South).unwrap();
    let c = g.add_node(10.0, 10.0);
    g.add_constrained_edge(b, c).unwrap();

    let err = LayeredLayout::default().layout(&mut g).unwrap_err();
    assert!(matches!(err, Error::BaseLayout { .. }));
}

#[test]
fn closures_are_base_layouts() {
    let mut g = LayoutGraph::new();
    let a = g.add_node(10.0, 10.0);
    let mut calls = 0;
    let mut base = |g: &mut LayoutGraph| {
        calls += 1;
        g.set_ranks(vec![vec![a]])
    };
    base.layout(&mut g).unwrap();
    assert_eq!(calls, 1);
    assert_eq!(g[a].rank, Some(0));
}
