use narwhal::{Direction, Error, LayoutGraph, LayoutOptions, Point, RoutingStyle, Side};

#[test]
fn border_nodes_need_a_constant_size_parent() {
    let mut g = LayoutGraph::new();
    let plain = g.add_node(10.0, 10.0);
    let err = g.add_border_node(plain, 4.0, 4.0, Side::West).unwrap_err();
    assert!(matches!(err, Error::NotConstantSize(n) if n == plain));

    let parent = g.add_constant_size_node(100.0, 50.0);
    let b = g.add_border_node(parent, 4.0, 4.0, Side::West).unwrap();
    assert_eq!(g.border_nodes(parent), &[b]);
    assert_eq!(g[b].parent(), Some(parent));
    assert_eq!(g[b].border().unwrap().outside_ratio, 0.5);
}

#[test]
fn edges_between_siblings_are_rejected() {
    let mut g = LayoutGraph::new();
    let p = g.add_constant_size_node(100.0, 50.0);
    let x = g.add_border_node(p, 4.0, 4.0, Side::West).unwrap();
    let y = g.add_border_node(p, 4.0, 4.0, Side::East).unwrap();

    let err = g.add_constrained_edge(x, y).unwrap_err();
    assert!(matches!(err, Error::SiblingBorderNodes { parent, .. } if parent == p));
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn edges_between_a_border_node_and_its_parent_are_rejected() {
    let mut g = LayoutGraph::new();
    let p = g.add_constant_size_node(100.0, 50.0);
    let b = g.add_border_node(p, 4.0, 4.0, Side::South).unwrap();

    assert!(matches!(
        g.add_constrained_edge(b, p),
        Err(Error::BorderNodeToOwnParent { border, parent }) if border == b && parent == p
    ));
    assert!(matches!(
        g.add_constrained_edge(p, b),
        Err(Error::BorderNodeToOwnParent { border, parent }) if border == b && parent == p
    ));
}

#[test]
fn self_loops_and_plain_border_edges_are_rejected() {
    let mut g = LayoutGraph::new();
    let a = g.add_node(10.0, 10.0);
    assert!(matches!(g.add_edge(a, a), Err(Error::SelfLoop { node }) if node == a));

    let p = g.add_constant_size_node(100.0, 50.0);
    let b = g.add_border_node(p, 4.0, 4.0, Side::South).unwrap();
    assert!(matches!(g.add_edge(b, a), Err(Error::BorderEndpoint(n)) if n == b));
}

#[test]
fn constrained_edges_join_the_border_node_bundles() {
    let mut g = LayoutGraph::new();
    let p = g.add_constant_size_node(100.0, 50.0);
    let b = g.add_border_node(p, 4.0, 4.0, Side::South).unwrap();
    let c = g.add_node(10.0, 10.0);
    let out = g.add_constrained_edge(b, c).unwrap();
    let back = g.add_constrained_edge(c, b).unwrap();

    let border = g[b].border().unwrap();
    assert_eq!(border.outgoing.edges, vec![out]);
    assert_eq!(border.incoming.edges, vec![back]);
    assert_eq!(border.edge_count(), 2);
    assert_eq!(g[out].source, b);
    assert_eq!(g[out].source_constraint(), Some(b));
    assert_eq!(g[out].target_constraint(), None);
    assert_eq!(g[b].outgoing, vec![out]);
}

#[test]
fn style_and_stubs_only_apply_to_constrained_edges() {
    let mut g = LayoutGraph::new();
    let a = g.add_node(10.0, 10.0);
    let b = g.add_node(10.0, 10.0);
    let plain = g.add_edge(a, b).unwrap();
    let constrained = g.add_constrained_edge(a, b).unwrap();

    assert!(matches!(
        g.set_edge_style(plain, RoutingStyle::Orthogonal),
        Err(Error::NotConstrained(e)) if e == plain
    ));
    g.set_edge_style(constrained, RoutingStyle::Orthogonal).unwrap();
    assert!(g[constrained].is_orthogonal());

    let stub = vec![Point::new(0.0, 0.0), Point::new(0.0, 5.0)];
    g.set_starting_routed_points(constrained, stub.clone()).unwrap();
    assert_eq!(g[constrained].starting_routed_points(), stub.as_slice());
    assert!(g[plain].starting_routed_points().is_empty());
}

#[test]
fn outside_ratio_is_checked() {
    let mut g = LayoutGraph::new();
    let p = g.add_constant_size_node(100.0, 50.0);
    let b = g.add_border_node(p, 4.0, 4.0, Side::North).unwrap();

    g.set_outside_ratio(b, 1.0).unwrap();
    assert_eq!(g[b].border().unwrap().outside_ratio, 1.0);
    assert!(matches!(
        g.set_outside_ratio(b, 1.5),
        Err(Error::InvalidOutsideRatio { .. })
    ));
    assert!(matches!(g.set_outside_ratio(p, 0.5), Err(Error::NotBorderNode(n)) if n == p));
}

#[test]
fn min_padding_needs_a_node_with_spacing() {
    let mut g = LayoutGraph::new();
    let plain = g.add_node(10.0, 10.0);
    let fixed = g.add_constant_size_node(100.0, 50.0);

    assert!(matches!(
        g.set_min_outgoing_padding(plain, 5.0),
        Err(Error::NoEdgeSpacing(n)) if n == plain
    ));
    g.set_min_outgoing_padding(fixed, 5.0).unwrap();
    g.set_min_incoming_padding(fixed, -3.0).unwrap();
    assert_eq!(g[fixed].spacing().min_outgoing, 5.0);
    assert_eq!(g[fixed].spacing().min_incoming, 0.0);
}

#[test]
fn set_ranks_links_neighbours() {
    let mut g = LayoutGraph::new();
    let a = g.add_node(10.0, 10.0);
    let b = g.add_node(10.0, 10.0);
    let c = g.add_node(10.0, 10.0);
    let d = g.add_node(10.0, 10.0);
    g.set_ranks(vec![vec![a, b, c], vec![d]]).unwrap();

    assert_eq!(g[a].rank, Some(0));
    assert_eq!(g[d].rank, Some(1));
    assert_eq!((g[a].left, g[a].right), (None, Some(b)));
    assert_eq!((g[b].left, g[b].right), (Some(a), Some(c)));
    assert_eq!((g[c].left, g[c].right), (Some(b), None));
    assert_eq!(g.rank_of(b), Some(&[a, b, c][..]));
    assert_eq!(g.ranked_nodes(), vec![a, b, c, d]);
}

#[test]
fn clear_base_layout_drops_bend_nodes() {
    let mut g = LayoutGraph::new();
    let a = g.add_node(10.0, 10.0);
    let b = g.add_node(10.0, 10.0);
    let e = g.add_edge(a, b).unwrap();
    let vn = g.add_virtual_node(e, 1).unwrap();
    g.set_ranks(vec![vec![a], vec![vn], vec![b]]).unwrap();
    g[e].feedback = true;

    assert_eq!(g[e].vnodes, vec![vn]);
    assert!(g[vn].is_virtual());

    g.clear_base_layout();
    assert_eq!(g.node_count(), 2);
    assert!(g[e].vnodes.is_empty());
    assert!(!g[e].feedback);
    assert!(g.ranks().is_empty());
    assert_eq!(g[a].rank, None);
}

#[test]
fn validate_catches_direct_mutation() {
    let mut g = LayoutGraph::new();
    let p = g.add_constant_size_node(100.0, 50.0);
    let b = g.add_border_node(p, 4.0, 4.0, Side::South).unwrap();
    let c = g.add_node(10.0, 10.0);
    g.add_constrained_edge(b, c).unwrap();
    g.validate().unwrap();

    g[b].border_mut().unwrap().outside_ratio = 2.0;
    assert!(matches!(g.validate(), Err(Error::InvalidOutsideRatio { .. })));
}

#[test]
fn options_parse_from_json() {
    let opts = LayoutOptions::from_json(
        r#"{ "direction": "left", "edgePadding": 4, "origin": { "x": 10, "y": 20 } }"#,
    )
    .unwrap();
    assert_eq!(opts.direction, Direction::Left);
    assert_eq!(opts.edge_padding, 4.0);
    assert_eq!(opts.origin, Point::new(10.0, 20.0));
    assert_eq!(opts.default_padding, LayoutOptions::default().default_padding);

    assert!(matches!(
        LayoutOptions::from_json(r#"{ "direction": "sideways" }"#),
        Err(Error::InvalidOptions(_))
    ));
}

#[test]
fn paddings_fall_back_to_the_options() {
    let mut g = LayoutGraph::with_options(LayoutOptions {
        edge_padding: 3.0,
        ..Default::default()
    });
    let a = g.add_node(10.0, 10.0);
    let b = g.add_node(10.0, 10.0);
    let e = g.add_edge(a, b).unwrap();
    assert_eq!(g.edge_padding(e), 3.0);
    assert_eq!(g.padding(a), g.options().default_padding);

    g[e].padding = Some(6.0);
    assert_eq!(g.edge_padding(e), 6.0);
}
