//! Force simulation
//!
//! Alpha (the "energy") closes a fixed fraction of its gap to
//! `alpha_target` every tick. Starting at `alpha_start` with target 0 it
//! decays geometrically; once below `alpha_min` the simulation is
//! converged and switches to the Sustained phase, where the target is
//! raised to `sustain_alpha_target` and the orbit force keeps nodes
//! circling the primary fact. It never halts on its own.

use super::domain::{Network, NetworkLink, NetworkNode, NetworkStats, NodeRole, RingRadii};
use super::forces;
use crate::config::{ConfigResult, ForceConfig, Validatable};
use crate::shared::models::Position;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SimulationPhase {
    /// Alpha decaying from `alpha_start`
    Warming,
    /// Converged; low constant energy, orbit active
    Sustained,
}

/// One running force simulation; exclusively owns its node buffer
#[derive(Debug)]
pub struct Simulation {
    subject_area: String,
    nodes: Vec<NetworkNode>,
    links: Vec<NetworkLink>,
    degrees: Vec<usize>,
    rings: RingRadii,
    stats: NetworkStats,
    /// Seeded position of the primary fact
    anchor: Position,

    config: ForceConfig,
    alpha: f64,
    alpha_target: f64,
    phase: SimulationPhase,
    dragging: Option<usize>,
    ticks: u64,
    rng: StdRng,
}

impl Simulation {
    /// Take ownership of a seeded network. Rejects an invalid `config`.
    pub fn new(network: Network, config: ForceConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::with_config(network, config))
    }

    /// Constructor for a config validated by the caller
    pub(super) fn with_config(network: Network, config: ForceConfig) -> Self {
        let mut degrees = vec![0usize; network.nodes.len()];
        for link in &network.links {
            if link.source < degrees.len() && link.target < degrees.len() {
                degrees[link.source] += 1;
                degrees[link.target] += 1;
            }
        }

        let anchor = network
            .nodes
            .first()
            .map(NetworkNode::position)
            .unwrap_or(Position::ORIGIN);

        // Jiggle stream only; seeding already used the network seed
        let rng = StdRng::seed_from_u64(network.nodes.len() as u64);

        Self {
            subject_area: network.subject_area,
            nodes: network.nodes,
            links: network.links,
            degrees,
            rings: network.rings,
            stats: network.stats,
            anchor,
            alpha: config.alpha_start,
            alpha_target: 0.0,
            phase: SimulationPhase::Warming,
            dragging: None,
            ticks: 0,
            rng,
            config,
        }
    }

    /// Advance one step
    pub fn tick(&mut self) {
        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;

        if self.phase == SimulationPhase::Warming && self.alpha < self.config.alpha_min {
            self.phase = SimulationPhase::Sustained;
            self.alpha_target = if self.dragging.is_some() {
                self.config.drag_alpha_target
            } else {
                self.idle_target()
            };
            debug!(
                subject_area = %self.subject_area,
                ticks = self.ticks,
                "force simulation converged, sustaining"
            );
        }

        let relax = if self.dragging.is_some() {
            self.config.drag_relax_factor
        } else {
            1.0
        };
        let alpha = self.alpha;
        let c = &self.config;
        let origin = self.origin();

        let link_distance = c.link_distance;
        let dimension_distance = c.link_distance * c.dimension_link_scale;
        forces::apply_links(
            &mut self.nodes,
            &self.links,
            &self.degrees,
            |target| match target.role {
                NodeRole::Dimension => dimension_distance,
                NodeRole::PrimaryFact | NodeRole::SecondaryFact => link_distance,
            },
            c.link_strength * relax,
            alpha,
            &mut self.rng,
        );
        forces::apply_many_body(
            &mut self.nodes,
            c.charge_strength * relax,
            c.charge_distance_min,
            c.charge_distance_max,
            alpha,
            &mut self.rng,
        );
        forces::apply_collision(
            &mut self.nodes,
            c.collision_padding,
            c.collision_strength,
            &mut self.rng,
        );
        forces::apply_center(&mut self.nodes, self.anchor, c.center_strength);
        forces::apply_radial(&mut self.nodes, origin, self.rings, c.radial_strength, alpha);
        if self.phase == SimulationPhase::Sustained {
            forces::apply_orbit(&mut self.nodes, origin, c.orbit_speed);
        }

        self.integrate();
        self.ticks += 1;
        trace!(tick = self.ticks, alpha = self.alpha, "tick");
    }

    /// Synchronous warm-up before the first render. Bounded by
    /// `initial_iterations`; stops early on convergence. Returns ticks run.
    pub fn run_initial(&mut self) -> usize {
        let mut ran = 0;
        while ran < self.config.initial_iterations && self.phase == SimulationPhase::Warming {
            self.tick();
            ran += 1;
        }
        debug!(
            subject_area = %self.subject_area,
            ticks = ran,
            alpha = self.alpha,
            converged = self.is_converged(),
            "initial layout finished"
        );
        ran
    }

    fn integrate(&mut self) {
        let keep = 1.0 - self.config.velocity_decay;
        let max_v = self.config.max_velocity;

        for node in &mut self.nodes {
            let (x0, y0) = (node.x, node.y);

            match node.fx {
                Some(fx) => {
                    node.x = fx;
                    node.vx = 0.0;
                }
                None => {
                    node.vx = (node.vx * keep).clamp(-max_v, max_v);
                    node.x += node.vx;
                }
            }
            match node.fy {
                Some(fy) => {
                    node.y = fy;
                    node.vy = 0.0;
                }
                None => {
                    node.vy = (node.vy * keep).clamp(-max_v, max_v);
                    node.y += node.vy;
                }
            }

            // NaN survives clamp; undo the step instead
            if !node.x.is_finite() {
                node.x = x0;
                node.vx = 0.0;
            }
            if !node.y.is_finite() {
                node.y = y0;
                node.vy = 0.0;
            }
        }
    }

    fn idle_target(&self) -> f64 {
        match self.phase {
            SimulationPhase::Warming => 0.0,
            SimulationPhase::Sustained => self.config.sustain_alpha_target,
        }
    }

    /// Current primary fact position (rings and orbit center)
    fn origin(&self) -> Position {
        self.nodes
            .first()
            .map(NetworkNode::position)
            .unwrap_or(self.anchor)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Drag
    // ═══════════════════════════════════════════════════════════════════

    /// Start dragging a node. The pinned primary fact cannot be dragged.
    pub fn begin_drag(&mut self, index: usize) -> bool {
        let Some(node) = self.nodes.get_mut(index) else {
            return false;
        };
        if node.role == NodeRole::PrimaryFact || node.is_pinned() {
            return false;
        }
        node.pin(node.x, node.y);
        self.dragging = Some(index);
        self.alpha_target = self.config.drag_alpha_target;
        true
    }

    /// Move the dragged node to a graph-space point
    pub fn drag_to(&mut self, pos: Position) {
        if let Some(node) = self.dragging.and_then(|i| self.nodes.get_mut(i)) {
            node.pin(pos.x, pos.y);
            node.x = pos.x;
            node.y = pos.y;
        }
    }

    /// Release: the node rejoins the simulation
    pub fn end_drag(&mut self) {
        if let Some(node) = self.dragging.take().and_then(|i| self.nodes.get_mut(i)) {
            node.unpin();
        }
        self.alpha_target = self.idle_target();
    }

    // ═══════════════════════════════════════════════════════════════════
    // Read access for the rendering layer
    // ═══════════════════════════════════════════════════════════════════

    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[NetworkLink] {
        &self.links
    }

    pub fn stats(&self) -> &NetworkStats {
        &self.stats
    }

    pub fn rings(&self) -> RingRadii {
        self.rings
    }

    pub fn subject_area(&self) -> &str {
        &self.subject_area
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn alpha_target(&self) -> f64 {
        self.alpha_target
    }

    pub fn phase(&self) -> SimulationPhase {
        self.phase
    }

    pub fn is_converged(&self) -> bool {
        self.phase == SimulationPhase::Sustained
    }

    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use crate::features::inference::InferenceRules;
    use crate::features::network::NetworkBuilder;
    use crate::shared::models::{EnrichedLineageRecord, LineageRecord, Viewport};
    use std::sync::Arc;

    fn network(dimensions: usize) -> Network {
        let rules = InferenceRules::builtin();
        let mut records = vec![Arc::new(EnrichedLineageRecord::new(
            LineageRecord::new("Sales", "Orders", "Amount", "DW_NS_SALES_F", "AMOUNT"),
            rules.inferred_source("DW_NS_SALES_F", "AMOUNT"),
        ))];
        for i in 0..dimensions {
            let table = format!("DW_NS_DIM{}_D", i);
            records.push(Arc::new(EnrichedLineageRecord::new(
                LineageRecord::new("Sales", "Orders", format!("C{}", i), table.clone(), "NAME"),
                rules.inferred_source(&table, "NAME"),
            )));
        }
        NetworkBuilder::new(NetworkConfig::default(), ForceConfig::default())
            .unwrap()
            .build(&records, "Sales", Viewport::default())
            .into_network()
            .unwrap()
    }

    #[test]
    fn test_initial_run_bounded_and_finite() {
        let config = ForceConfig::default().initial_iterations(50);
        let mut sim = Simulation::new(network(12), config).unwrap();
        let ran = sim.run_initial();
        assert!(ran <= 50);
        assert_eq!(sim.ticks(), ran as u64);
        assert!(sim.nodes().iter().all(|n| n.position().is_finite()));
    }

    #[test]
    fn test_converges_then_sustains() {
        let config = ForceConfig::default().initial_iterations(600);
        let mut sim = Simulation::new(network(5), config).unwrap();
        sim.run_initial();
        assert!(sim.is_converged());
        assert_eq!(sim.alpha_target(), ForceConfig::default().sustain_alpha_target);

        // Never halts: the orbit keeps free nodes moving
        let before = sim.nodes()[1].position();
        for _ in 0..30 {
            sim.tick();
        }
        assert!(sim.nodes()[1].position().distance(&before) > 1e-3);
        assert!(sim.alpha() > 0.0);
    }

    #[test]
    fn test_primary_stays_pinned() {
        let mut sim = Simulation::new(network(8), ForceConfig::default()).unwrap();
        let start = sim.nodes()[0].position();
        sim.run_initial();
        assert_eq!(sim.nodes()[0].position(), start);
    }

    #[test]
    fn test_drag_lifecycle() {
        let config = ForceConfig::default().initial_iterations(600);
        let mut sim = Simulation::new(network(3), config).unwrap();
        sim.run_initial();

        assert!(!sim.begin_drag(0));
        assert!(sim.begin_drag(2));
        assert_eq!(sim.alpha_target(), ForceConfig::default().drag_alpha_target);

        sim.drag_to(Position::new(10.0, 20.0));
        sim.tick();
        assert_eq!(sim.nodes()[2].position(), Position::new(10.0, 20.0));

        sim.end_drag();
        assert!(!sim.nodes()[2].is_pinned());
        assert_eq!(sim.dragging(), None);
        assert_eq!(sim.alpha_target(), ForceConfig::default().sustain_alpha_target);
    }

    #[test]
    fn test_single_node_network() {
        let mut sim = Simulation::new(network(0), ForceConfig::default()).unwrap();
        sim.run_initial();
        assert_eq!(sim.nodes().len(), 1);
        assert!(sim.links().is_empty());
        assert!(sim.nodes()[0].position().is_finite());
    }

    /// Velocity change of every free, non-dragged node over one tick
    fn velocity_deltas(sim: &mut Simulation, skip: usize) -> Vec<f64> {
        let before: Vec<(f64, f64)> = sim.nodes().iter().map(|n| (n.vx, n.vy)).collect();
        sim.tick();
        sim.nodes()
            .iter()
            .zip(before)
            .enumerate()
            .filter(|(i, (n, _))| *i != skip && !n.is_pinned())
            .map(|(_, (n, (vx, vy)))| ((n.vx - vx).powi(2) + (n.vy - vy).powi(2)).sqrt())
            .collect()
    }

    #[test]
    fn test_drag_relaxes_link_and_charge_forces() {
        // Only link and charge act, at the same alpha in both runs
        let relax = 0.25;
        let config = ForceConfig {
            drag_relax_factor: relax,
            drag_alpha_target: 0.0,
            collision_strength: 0.0,
            center_strength: 0.0,
            radial_strength: 0.0,
            velocity_decay: 0.0,
            max_velocity: 10_000.0,
            ..ForceConfig::default()
        };
        let mut free = Simulation::new(network(6), config.clone()).unwrap();
        let mut dragged = Simulation::new(network(6), config).unwrap();

        // Pin node 1 in place in both runs so only the relax factor differs
        let held = dragged.nodes()[1].position();
        assert!(dragged.begin_drag(1));
        dragged.drag_to(held);
        free.nodes[1].pin(held.x, held.y);

        let baseline = velocity_deltas(&mut free, 1);
        let relaxed = velocity_deltas(&mut dragged, 1);

        assert_eq!(free.alpha(), dragged.alpha());
        assert_eq!(baseline.len(), relaxed.len());
        assert!(baseline.iter().any(|b| *b > 1e-3));
        for (b, r) in baseline.iter().zip(&relaxed) {
            assert!((r - relax * b).abs() < 1e-9, "relaxed {} baseline {}", r, b);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ForceConfig {
            max_velocity: -1.0,
            ..ForceConfig::default()
        };
        assert!(Simulation::new(network(2), config).is_err());
    }
}
