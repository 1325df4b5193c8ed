//! Force-directed star network of one subject area
//!
//! Physical tables become nodes: the best-matching fact table in the
//! center, other facts on an inner ring, dimensions on an outer ring.
//! A d3-style force simulation relaxes the seeded layout, then keeps the
//! rings slowly orbiting while displayed.
//!
//! Pipeline: `NetworkBuilder::build` → `Simulation` (owned by
//! `SimulationController`) → `fit_to_viewport` → per-frame `on_frame`.

mod builder;
mod controller;
mod domain;
mod forces;
mod interaction;
mod scoring;
mod seeding;
mod simulation;
mod viewport;

pub use builder::NetworkBuilder;
pub use controller::{ActiveSimulation, SimulationController, SimulationStatus, SimulationTicket};
pub use domain::{
    Network, NetworkBuild, NetworkLink, NetworkNode, NetworkStats, NodeRole, PrimarySelection,
    RingRadii,
};
pub use interaction::{hit_test, InteractionState, PointerEvent};
pub use simulation::{Simulation, SimulationPhase};
pub use viewport::{content_bounds, fit_to_viewport, wheel_factor, Bounds, ViewTransform};
