//! Star network build, simulation and controller lifecycle

mod common;

use common::*;
use lineage_graph::config::{ForceConfig, NetworkConfig};
use lineage_graph::features::network::{
    NetworkBuild, NetworkBuilder, NodeRole, PointerEvent, PrimarySelection, Simulation,
    SimulationStatus,
};
use lineage_graph::{ChromeInsets, LineageConfig, LineageExplorer, Position, Viewport};
use proptest::prelude::*;

fn build(rows: Vec<lineage_graph::RawLineageRow>, subject_area: &str) -> NetworkBuild {
    let records = records(rows);
    NetworkBuilder::default().build(&records, subject_area, Viewport::default())
}

#[test]
fn test_single_fact_has_no_links() {
    let network = build(
        vec![row("Sales", "Orders", "Amount", "DW_NS_SALES_F", "AMOUNT")],
        "Sales",
    )
    .into_network()
    .unwrap();

    assert_eq!(network.nodes.len(), 1);
    assert!(network.links.is_empty());
    assert_eq!(network.primary().id, "DW_NS_SALES_F");
}

#[test]
fn test_star_topology() {
    init_tracing();
    let network = build(fixture_sales_star(6), "Sales Orders")
        .into_network()
        .unwrap();

    assert_eq!(network.primary().id, "DW_NS_SALES_ORDER_F");
    assert_eq!(network.primary().role, NodeRole::PrimaryFact);
    assert_eq!(network.count_of_role(NodeRole::SecondaryFact), 1);
    assert_eq!(network.count_of_role(NodeRole::Dimension), 6);
    assert_eq!(network.stats.excluded_tables, 1);
    assert_eq!(
        network.stats.primary_selection,
        PrimarySelection::NameMatch { score: 100 }
    );

    // One link per non-primary node, all from the primary
    assert_eq!(network.links.len(), network.nodes.len() - 1);
    assert!(network.links.iter().all(|l| l.source == 0 && l.target != 0));
}

#[test]
fn test_only_excluded_tables_is_empty_state() {
    let build = build(
        vec![row("Stage", "T", "C", "DW_NS_ORDERS_TMP", "ID")],
        "Stage",
    );
    assert!(build.is_empty());
}

#[test]
fn test_explorer_network_lifecycle() {
    let mut explorer =
        LineageExplorer::from_rows(fixture_sales_star(8), LineageConfig::default()).unwrap();
    let viewport = Viewport::new(1200.0, 800.0);
    let insets = ChromeInsets::new(300.0, 0.0, 48.0, 0.0);

    let unknown = explorer
        .start_network("No Such Area", viewport, insets)
        .unwrap();
    assert!(matches!(
        explorer.network().status(),
        SimulationStatus::Empty { .. }
    ));
    assert!(explorer.network_mut().on_frame(unknown).is_none());

    let ticket = explorer
        .start_network("Sales Orders", viewport, insets)
        .unwrap();
    for _ in 0..20 {
        let nodes = explorer.network_mut().on_frame(ticket).unwrap();
        assert_finite(nodes);
    }
    assert!(explorer.network_mut().on_frame(unknown).is_none());

    // Fitted view keeps the primary inside the uncovered area
    let active = explorer.network().active().unwrap();
    let primary = active.view.to_screen(active.simulation.nodes()[0].position());
    assert!(primary.x > 300.0 && primary.x < 1200.0);
    assert!(primary.y > 48.0 && primary.y < 800.0);
    assert!(active.view.scale <= 1.0);
}

#[test]
fn test_drag_through_controller_rejoins_simulation() {
    let mut explorer =
        LineageExplorer::from_rows(fixture_sales_star(4), LineageConfig::default()).unwrap();
    let ticket = explorer
        .start_network("Sales Orders", Viewport::default(), ChromeInsets::none())
        .unwrap();

    let (screen, hit) = {
        let active = explorer.network().active().unwrap();
        let screen = active.view.to_screen(active.simulation.nodes()[2].position());
        (screen, explorer.network().hit_test(screen))
    };
    assert_eq!(hit, Some(2));

    let network = explorer.network_mut();
    network.handle_event(PointerEvent::Down { pos: screen, hit });
    network.handle_event(PointerEvent::Move {
        pos: Position::new(screen.x + 40.0, screen.y),
    });
    network.on_frame(ticket);
    assert!(network.active().unwrap().simulation.nodes()[2].is_pinned());

    network.handle_event(PointerEvent::Up);
    let nodes = network.on_frame(ticket).unwrap();
    assert!(!nodes[2].is_pinned());
    assert!(nodes[0].is_pinned());
}

#[test]
fn test_layout_is_deterministic() {
    let run = || {
        let network = build(fixture_sales_star(10), "Sales Orders")
            .into_network()
            .unwrap();
        let mut sim =
            Simulation::new(network, ForceConfig::default().initial_iterations(100)).unwrap();
        sim.run_initial();
        sim.nodes()
            .iter()
            .map(|n| (n.x, n.y))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_dimensions_give_n_links(dimensions in 0usize..40) {
        let mut rows = vec![row("Sales", "Orders", "Amount", "DW_NS_SALES_F", "AMOUNT")];
        for i in 0..dimensions {
            rows.push(row("Sales", "Orders", &format!("C{}", i), &format!("DW_NS_DIM{}_D", i), "NAME"));
        }
        let network = build(rows, "Sales").into_network().unwrap();

        prop_assert_eq!(network.nodes.len(), dimensions + 1);
        prop_assert_eq!(network.links.len(), dimensions);
        // No dimension-to-dimension links
        prop_assert!(network.links.iter().all(|l| l.source == 0));
    }

    #[test]
    fn prop_simulation_stays_finite(
        dimensions in 0usize..30,
        iterations in 1usize..300,
        charge in -2000.0f64..-1.0,
        width in 200.0f64..3000.0,
        height in 200.0f64..3000.0,
    ) {
        let mut rows = vec![row("Sales", "Orders", "Amount", "DW_NS_SALES_F", "AMOUNT")];
        for i in 0..dimensions {
            rows.push(row("Sales", "Orders", &format!("C{}", i), &format!("DW_NS_DIM{}_D", i), "NAME"));
        }
        let records = records(rows);
        let network = NetworkBuilder::new(NetworkConfig::default(), ForceConfig::default())
            .unwrap()
            .build(&records, "Sales", Viewport::new(width, height))
            .into_network()
            .unwrap();

        let config = ForceConfig::default()
            .initial_iterations(iterations)
            .charge_strength(charge);
        let mut sim = Simulation::new(network, config).unwrap();
        let ran = sim.run_initial();

        prop_assert!(ran <= iterations);
        for node in sim.nodes() {
            prop_assert!(node.x.is_finite() && node.y.is_finite());
        }
    }
}
