use narwhal::coordinate_system::{denormalize, mirror, normalize, translate, transpose};
use narwhal::{Direction, EdgeId, Insets, LayoutGraph, LayoutOptions, NodeId, Point, Side, Size};

fn sample(direction: Direction) -> (LayoutGraph, NodeId, NodeId, EdgeId) {
    let mut g = LayoutGraph::with_options(LayoutOptions {
        direction,
        default_padding: Insets::new(1.0, 2.0, 3.0, 4.0),
        ..Default::default()
    });
    let a = g.add_constant_size_node(100.0, 40.0);
    g[a].x = 10.0;
    g[a].y = 20.0;
    let b = g.add_border_node(a, 8.0, 6.0, Side::North).unwrap();
    g[b].x = 30.0;
    g[b].y = 17.0;
    let c = g.add_node(30.0, 10.0);
    g[c].x = 50.0;
    g[c].y = 90.0;
    g[c].padding = Some(Insets::new(5.0, 6.0, 7.0, 8.0));
    let e = g.add_constrained_edge(b, c).unwrap();
    g[e].start = Some(Point::new(34.0, 17.0));
    g[e].end = Some(Point::new(65.0, 90.0));
    g[e].points = vec![Point::new(34.0, 17.0), Point::new(65.0, 90.0)];
    g.set_starting_routed_points(e, vec![Point::new(34.0, 17.0), Point::new(34.0, 12.0)])
        .unwrap();
    g.set_layout_size(Size::new(200.0, 120.0));
    (g, a, b, e)
}

fn assert_same(g: &LayoutGraph, h: &LayoutGraph) {
    for id in g.node_ids() {
        assert_eq!(g[id], h[id], "node {id}");
    }
    for id in g.edge_ids() {
        assert_eq!(g[id], h[id], "edge {id}");
    }
    assert_eq!(g.layout_size(), h.layout_size());
    assert_eq!(g.options(), h.options());
}

#[test]
fn transpose_swaps_axes() {
    let (mut g, a, b, e) = sample(Direction::Right);
    transpose(&mut g);

    assert_eq!((g[a].x, g[a].y, g[a].width, g[a].height), (20.0, 10.0, 40.0, 100.0));
    let fixed = g[a].constant_size().unwrap();
    assert_eq!((fixed.constant_width, fixed.constant_height), (40.0, 100.0));
    assert_eq!(g[b].border().unwrap().side, Side::West);
    assert_eq!(g[e].start, Some(Point::new(17.0, 34.0)));
    assert_eq!(g[e].starting_routed_points()[1], Point::new(12.0, 34.0));
    assert_eq!(g.layout_size(), Size::new(120.0, 200.0));
    assert_eq!(g.options().default_padding, Insets::new(2.0, 1.0, 4.0, 3.0));
}

#[test]
fn transpose_twice_is_the_identity() {
    let (original, ..) = sample(Direction::Down);
    let mut g = original.clone();
    transpose(&mut g);
    transpose(&mut g);
    assert_same(&original, &g);
}

#[test]
fn mirror_reflects_across_the_layout_height() {
    let (mut g, a, b, e) = sample(Direction::Up);
    mirror(&mut g);

    assert_eq!(g[a].y, 120.0 - 20.0 - 40.0);
    assert_eq!(g[b].border().unwrap().side, Side::South);
    assert_eq!(g[e].end, Some(Point::new(65.0, 30.0)));
    assert_eq!(g.options().default_padding, Insets::new(3.0, 2.0, 1.0, 4.0));

    mirror(&mut g);
    let (original, ..) = sample(Direction::Up);
    assert_same(&original, &g);
}

#[test]
fn denormalize_undoes_normalize_for_every_direction() {
    for direction in [Direction::Down, Direction::Up, Direction::Right, Direction::Left] {
        let (original, ..) = sample(direction);
        let mut g = original.clone();
        normalize(&mut g);
        denormalize(&mut g);
        assert_same(&original, &g);
    }
}

#[test]
fn translate_moves_everything() {
    let (mut g, a, b, e) = sample(Direction::Down);
    translate(&mut g, 5.0, -5.0);

    assert_eq!((g[a].x, g[a].y), (15.0, 15.0));
    assert_eq!((g[b].x, g[b].y), (35.0, 12.0));
    assert_eq!(g[e].points[1], Point::new(70.0, 85.0));
    assert_eq!(g[e].starting_routed_points()[0], Point::new(39.0, 12.0));
}
