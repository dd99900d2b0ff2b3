use narwhal::route::route_edges;
use narwhal::{LayoutGraph, NodeId, Point, RoutingStyle};

fn node_at(g: &mut LayoutGraph, x: f64, y: f64, w: f64, h: f64) -> NodeId {
    let n = g.add_node(w, h);
    g[n].x = x;
    g[n].y = y;
    n
}

#[test]
fn unobstructed_edge_is_a_straight_segment() {
    let mut g = LayoutGraph::new();
    let a = node_at(&mut g, 0.0, 0.0, 100.0, 40.0);
    let b = node_at(&mut g, 20.0, 100.0, 60.0, 30.0);
    let e = g.add_edge(a, b).unwrap();
    g.set_ranks(vec![vec![a], vec![b]]).unwrap();

    route_edges(&mut g);
    assert_eq!(g[e].start, Some(Point::new(50.0, 40.0)));
    assert_eq!(g[e].end, Some(Point::new(50.0, 100.0)));
    assert_eq!(g[e].points, vec![Point::new(50.0, 40.0), Point::new(50.0, 100.0)]);
}

#[test]
fn orthogonal_edge_jogs_between_ranks() {
    let mut g = LayoutGraph::new();
    let a = node_at(&mut g, 0.0, 0.0, 100.0, 40.0);
    let b = node_at(&mut g, 200.0, 100.0, 60.0, 30.0);
    let e = g.add_constrained_edge(a, b).unwrap();
    g.set_edge_style(e, RoutingStyle::Orthogonal).unwrap();
    g.set_ranks(vec![vec![a], vec![b]]).unwrap();

    route_edges(&mut g);
    assert_eq!(
        g[e].points,
        vec![
            Point::new(50.0, 40.0),
            Point::new(50.0, 70.0),
            Point::new(230.0, 70.0),
            Point::new(230.0, 100.0),
        ]
    );
}

#[test]
fn stubs_are_kept_verbatim() {
    let mut g = LayoutGraph::new();
    let a = node_at(&mut g, 0.0, 0.0, 100.0, 60.0);
    let b = node_at(&mut g, 0.0, 100.0, 20.0, 20.0);
    let e = g.add_constrained_edge(a, b).unwrap();
    g.set_ranks(vec![vec![a], vec![b]]).unwrap();
    g[e].start = Some(Point::new(0.0, 20.0));
    g.set_starting_routed_points(
        e,
        vec![Point::new(0.0, 20.0), Point::new(-8.0, 20.0), Point::new(-8.0, 60.0)],
    )
    .unwrap();

    route_edges(&mut g);
    assert_eq!(
        g[e].points,
        vec![
            Point::new(0.0, 20.0),
            Point::new(-8.0, 20.0),
            Point::new(-8.0, 60.0),
            Point::new(10.0, 100.0),
        ]
    );
}

#[test]
fn long_edge_stays_clear_of_rank_neighbours() {
    let mut g = LayoutGraph::new();
    let a = node_at(&mut g, 0.0, 0.0, 20.0, 20.0);
    let c = node_at(&mut g, -40.0, 100.0, 40.0, 30.0);
    let b = node_at(&mut g, 0.0, 200.0, 20.0, 20.0);
    let e = g.add_edge(a, b).unwrap();
    let vn = g.add_virtual_node(e, 1).unwrap();
    g[vn].x = 10.0;
    g[vn].y = 100.0;
    g.set_ranks(vec![vec![a], vec![c, vn], vec![b]]).unwrap();

    route_edges(&mut g);
    // `c` reaches x = 0, plus 16 node padding and 8 edge padding.
    assert_eq!(
        g[e].points,
        vec![
            Point::new(10.0, 20.0),
            Point::new(24.0, 100.0),
            Point::new(24.0, 130.0),
            Point::new(10.0, 200.0),
        ]
    );
}

#[test]
fn edges_leaving_towards_a_taller_neighbour_nest() {
    let mut g = LayoutGraph::new();
    let left = node_at(&mut g, 0.0, 0.0, 40.0, 80.0);
    let n = node_at(&mut g, 100.0, 0.0, 40.0, 20.0);
    let near = node_at(&mut g, 40.0, 100.0, 20.0, 20.0);
    let far = node_at(&mut g, 0.0, 100.0, 20.0, 20.0);
    let to_near = g.add_edge(n, near).unwrap();
    let to_far = g.add_edge(n, far).unwrap();
    g.set_ranks(vec![vec![left, n], vec![far, near]]).unwrap();

    route_edges(&mut g);
    // The farthest edge is routed first, hugging the neighbour; the next one steps out by its
    // edge padding.
    assert_eq!(
        g[to_far].points,
        vec![Point::new(120.0, 20.0), Point::new(64.0, 80.0), Point::new(10.0, 100.0)]
    );
    assert_eq!(
        g[to_near].points,
        vec![Point::new(120.0, 20.0), Point::new(72.0, 80.0), Point::new(50.0, 100.0)]
    );
}
