#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use strand::error::{OperationError, StrandError, TopologyError};
use strand::math::{Point3, Vector3};
use strand::operations::straighten::{
    Diagnostic, IslandStatus, Severity, Straighten, StraightenOptions,
};
use strand::topology::{EdgeSelection, MeshPositions, TopologyStore, VertexData, VertexId};
use strand::Interrupt;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .with_test_writer()
        .try_init();
}

/// `A=(0,0,0) B=(1,1,0) C=(2,-1,0) D=(3,0,0)`.
fn zigzag(store: &mut TopologyStore) -> (Vec<VertexId>, EdgeSelection) {
    let (v, edges) = store.add_polyline(&[
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(2.0, -1.0, 0.0),
        Point3::new(3.0, 0.0, 0.0),
    ]);
    (v, store.selection_from_edges(&edges).unwrap())
}

fn add_loop(store: &mut TopologyStore, center: Point3, n: usize) -> Vec<VertexId> {
    (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let angle = std::f64::consts::TAU * i as f64 / n as f64;
            store.add_vertex(VertexData::new(
                center + Vector3::new(angle.cos(), angle.sin(), 0.0),
            ))
        })
        .collect()
}

fn loop_edges(v: &[VertexId]) -> Vec<(VertexId, VertexId)> {
    (0..v.len()).map(|i| (v[i], v[(i + 1) % v.len()])).collect()
}

fn positions(store: &TopologyStore, v: &[VertexId]) -> Vec<Point3> {
    v.iter().map(|&id| store.position(id).unwrap()).collect()
}

#[test]
fn zigzag_straightens_by_arc_length() {
    init_tracing();
    let mut store = TopologyStore::new();
    let (v, selection) = zigzag(&mut store);

    let report = Straighten::new(selection, StraightenOptions::default())
        .execute(&mut store, &Interrupt::none())
        .unwrap();
    assert_eq!(report.straightened, 1);

    let b = 2.0_f64.sqrt();
    let c = b + 5.0_f64.sqrt();
    let p = positions(&store, &v);
    assert_relative_eq!(p[0], Point3::new(0.0, 0.0, 0.0));
    assert_relative_eq!(p[1], Point3::new(b, 0.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(p[2], Point3::new(c, 0.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(p[3], Point3::new(3.0, 0.0, 0.0));
}

#[test]
fn zigzag_with_uniform_distribution_lands_on_thirds() {
    let mut store = TopologyStore::new();
    let (v, selection) = zigzag(&mut store);

    let options = StraightenOptions::default().with_uniform_distribution(true);
    Straighten::new(selection, options)
        .execute(&mut store, &Interrupt::none())
        .unwrap();

    let p = positions(&store, &v);
    assert_relative_eq!(p[1], Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(p[2], Point3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
}

#[test]
fn second_pass_is_a_fixed_point() {
    let mut store = TopologyStore::new();
    let (v, selection) = zigzag(&mut store);
    let op = Straighten::new(
        selection,
        StraightenOptions::default().with_uniform_distribution(true),
    );

    op.execute(&mut store, &Interrupt::none()).unwrap();
    let once = positions(&store, &v);
    op.execute(&mut store, &Interrupt::none()).unwrap();
    let twice = positions(&store, &v);
    for (a, b) in once.iter().zip(&twice) {
        assert_relative_eq!(*a, *b, epsilon = 1e-12);
    }
}

#[test]
fn morph_pulls_interior_back_and_keeps_endpoints() {
    let mut store = TopologyStore::new();
    let (v, selection) = zigzag(&mut store);
    let options = StraightenOptions::default()
        .with_uniform_distribution(true)
        .with_morph(25.0);
    Straighten::new(selection, options)
        .execute(&mut store, &Interrupt::none())
        .unwrap();

    let p = positions(&store, &v);
    assert_relative_eq!(p[0], Point3::new(0.0, 0.0, 0.0));
    assert_relative_eq!(p[1], Point3::new(1.0, 0.75, 0.0), epsilon = 1e-12);
    assert_relative_eq!(p[2], Point3::new(2.0, -0.75, 0.0), epsilon = 1e-12);
    assert_relative_eq!(p[3], Point3::new(3.0, 0.0, 0.0));
}

#[test]
fn out_of_range_power_fails_only_when_morph_is_on() {
    let mut store = TopologyStore::new();
    let (v, selection) = zigzag(&mut store);
    let before = positions(&store, &v);

    let on = StraightenOptions::default().with_morph(150.0);
    let err = Straighten::new(selection.clone(), on)
        .execute(&mut store, &Interrupt::none())
        .unwrap_err();
    assert!(matches!(
        err,
        StrandError::Operation(OperationError::InvalidParameter { name: "morph_power", .. })
    ));
    assert_eq!(positions(&store, &v), before);

    let off = StraightenOptions {
        morph_power: 150.0,
        ..StraightenOptions::default()
    };
    let report = Straighten::new(selection, off)
        .execute(&mut store, &Interrupt::none())
        .unwrap();
    assert_eq!(report.straightened, 1);
}

#[test]
fn closed_loop_is_reported_and_left_alone() {
    let mut store = TopologyStore::new();
    let v = add_loop(&mut store, Point3::origin(), 5);
    let before = positions(&store, &v);
    let selection: EdgeSelection = loop_edges(&v).into_iter().collect();

    let report = Straighten::new(selection, StraightenOptions::default())
        .execute(&mut store, &Interrupt::none())
        .unwrap();

    assert_eq!(report.islands, 1);
    assert_eq!(report.invalid, 1);
    assert_eq!(
        report.diagnostics,
        vec![Diagnostic::InvalidIsland {
            index: 0,
            status: IslandStatus::Closed,
            endpoints: 0,
        }]
    );
    assert_eq!(positions(&store, &v), before);
}

#[test]
fn star_is_reported_as_branching() {
    let mut store = TopologyStore::new();
    let hub = store.add_vertex(VertexData::new(Point3::origin()));
    let arms: Vec<VertexId> = [
        Point3::new(1.0, 0.2, 0.0),
        Point3::new(-1.0, 0.3, 0.0),
        Point3::new(0.0, -1.0, 0.4),
    ]
    .into_iter()
    .map(|p| store.add_vertex(VertexData::new(p)))
    .collect();
    let selection: EdgeSelection = arms.iter().map(|&a| (hub, a)).collect();

    let report = Straighten::new(selection, StraightenOptions::default().with_island_report(true))
        .execute(&mut store, &Interrupt::none())
        .unwrap();

    assert_eq!(report.straightened, 0);
    assert!(report.invalid >= 1);
    assert!(report.diagnostics.iter().all(|d| matches!(
        d,
        Diagnostic::InvalidIsland {
            status: IslandStatus::Branching,
            ..
        }
    )));
    assert_eq!(store.position(hub).unwrap(), Point3::origin());
}

#[test]
fn loop_on_a_branch_gives_one_diagnostic() {
    let mut store = TopologyStore::new();
    let (path, _) = store.add_polyline(&[
        Point3::new(-1.0, 0.0, 0.0),
        Point3::origin(),
        Point3::new(1.0, 0.0, 0.0),
    ]);
    let ring = add_loop(&mut store, Point3::new(0.0, 2.0, 0.0), 3);
    let before = positions(&store, &ring);

    let hub = path[1];
    let mut pairs = vec![(path[0], hub), (hub, path[2]), (hub, ring[0])];
    pairs.extend(loop_edges(&ring));
    pairs.push((ring[2], hub));
    let selection: EdgeSelection = pairs.into_iter().collect();

    let report = Straighten::new(selection, StraightenOptions::default())
        .execute(&mut store, &Interrupt::none())
        .unwrap();

    assert_eq!(report.islands, 1);
    assert_eq!(report.invalid, 1);
    assert_eq!(
        report.diagnostics,
        vec![Diagnostic::InvalidIsland {
            index: 0,
            status: IslandStatus::Branching,
            endpoints: 2,
        }]
    );
    assert_eq!(positions(&store, &ring), before);
}

#[test]
fn ignore_severity_skips_silently() {
    let mut store = TopologyStore::new();
    let v = add_loop(&mut store, Point3::origin(), 4);
    let selection: EdgeSelection = loop_edges(&v).into_iter().collect();
    let options = StraightenOptions::default().with_island_error_severity(Severity::Ignore);

    let report = Straighten::new(selection, options)
        .execute(&mut store, &Interrupt::none())
        .unwrap();
    assert_eq!(report.invalid, 1);
    assert!(!report.has_warnings());
}

#[test]
fn fail_severity_aborts_but_keeps_earlier_edits() {
    let mut store = TopologyStore::new();
    let (chain, chain_edges) = store.add_polyline(&[
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 2.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
    ]);
    let ring = add_loop(&mut store, Point3::new(10.0, 0.0, 0.0), 4);
    let ring_before = positions(&store, &ring);

    let mut pairs: Vec<(VertexId, VertexId)> = loop_edges(&ring);
    let chain_sel = store.selection_from_edges(&chain_edges).unwrap();
    pairs.extend(chain_sel.edges().iter().map(|e| e.vertices()));
    let selection: EdgeSelection = pairs.into_iter().collect();

    let options = StraightenOptions::default().with_island_error_severity(Severity::Fail);
    let err = Straighten::new(selection, options)
        .execute(&mut store, &Interrupt::none())
        .unwrap_err();

    assert!(matches!(
        err,
        StrandError::Operation(OperationError::InvalidIsland { endpoints: 0, .. })
    ));
    // the open chain is found first and was already straightened
    assert_relative_eq!(
        store.position(chain[1]).unwrap(),
        Point3::new(5.0_f64.sqrt(), 0.0, 0.0),
        epsilon = 1e-12
    );
    assert_eq!(positions(&store, &ring), ring_before);
}

#[test]
fn single_edge_islands_never_move() {
    let mut store = TopologyStore::new();
    let (v, edges) = store.add_polyline(&[Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)]);
    let selection = store.selection_from_edges(&edges).unwrap();
    let options = StraightenOptions::default()
        .with_uniform_distribution(true)
        .with_morph(40.0);

    let report = Straighten::new(selection, options)
        .execute(&mut store, &Interrupt::none())
        .unwrap();
    assert_eq!(report.single_edge, 1);
    assert_eq!(store.position(v[1]).unwrap(), Point3::new(1.0, 1.0, 1.0));
}

/// Mesh wrapper that raises an interrupt after a number of writes.
struct Tripwire {
    store: TopologyStore,
    interrupt: Interrupt,
    writes_left: usize,
}

impl MeshPositions for Tripwire {
    fn contains(&self, vertex: VertexId) -> bool {
        self.store.contains(vertex)
    }

    fn position(&self, vertex: VertexId) -> Result<Point3, TopologyError> {
        self.store.position(vertex)
    }

    fn set_position(&mut self, vertex: VertexId, point: Point3) -> Result<(), TopologyError> {
        self.store.set_position(vertex, point)?;
        self.writes_left = self.writes_left.saturating_sub(1);
        if self.writes_left == 0 {
            self.interrupt.interrupt();
        }
        Ok(())
    }
}

#[test]
fn cancellation_keeps_finished_islands_and_spares_the_rest() {
    let mut store = TopologyStore::new();
    let (a, a_edges) = store.add_polyline(&[
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
    ]);
    let (b, b_edges) = store.add_polyline(&[
        Point3::new(0.0, 5.0, 0.0),
        Point3::new(1.0, 6.0, 0.0),
        Point3::new(2.0, 5.0, 0.0),
    ]);
    let ids: Vec<_> = a_edges.into_iter().chain(b_edges).collect();
    let selection = store.selection_from_edges(&ids).unwrap();

    let interrupt = Interrupt::new();
    let mut mesh = Tripwire {
        store,
        interrupt: interrupt.clone(),
        writes_left: 1,
    };
    let err = Straighten::new(selection, StraightenOptions::default())
        .execute(&mut mesh, &interrupt)
        .unwrap_err();

    assert!(matches!(
        err,
        StrandError::Operation(OperationError::Cancelled)
    ));
    assert_relative_eq!(
        mesh.store.position(a[1]).unwrap(),
        Point3::new(2.0_f64.sqrt(), 0.0, 0.0),
        epsilon = 1e-12
    );
    assert_eq!(mesh.store.position(b[1]).unwrap(), Point3::new(1.0, 6.0, 0.0));
}

#[test]
fn pre_raised_interrupt_edits_nothing() {
    let mut store = TopologyStore::new();
    let (v, selection) = zigzag(&mut store);
    let before = positions(&store, &v);
    let interrupt = Interrupt::new();
    interrupt.interrupt();

    let err = Straighten::new(selection, StraightenOptions::default())
        .execute(&mut store, &interrupt)
        .unwrap_err();
    assert!(matches!(
        err,
        StrandError::Operation(OperationError::Cancelled)
    ));
    assert_eq!(positions(&store, &v), before);
}
