//! Ownership of the one live simulation
//!
//! The host renders from frame callbacks that may outlive a subject-area
//! switch. Each `start` bumps a generation counter and hands out a
//! [`SimulationTicket`]; callbacks present their ticket and are ignored
//! once it no longer matches. The previous simulation is stopped and
//! dropped before the next one is built, so node buffers are never shared.

use super::builder::NetworkBuilder;
use super::domain::{NetworkBuild, NetworkNode, NetworkStats};
use super::interaction::{hit_test, InteractionState, PointerEvent};
use super::simulation::Simulation;
use super::viewport::{fit, ViewTransform};
use crate::config::{ConfigResult, Validatable, ZoomConfig};
use crate::shared::models::{ChromeInsets, Position, RecordRef, Viewport};
use serde::Serialize;
use tracing::{debug, info};

/// Proof that a frame callback belongs to the current simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SimulationTicket {
    generation: u64,
}

impl SimulationTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The running simulation with its view and pointer state
#[derive(Debug)]
pub struct ActiveSimulation {
    pub simulation: Simulation,
    pub view: ViewTransform,
    pub interaction: InteractionState,
    viewport: Viewport,
    insets: ChromeInsets,
    generation: u64,
    /// The view has been fitted to a converged layout
    settled_fit: bool,
    /// Pan or zoom by the user since the last fit
    view_moved: bool,
}

impl ActiveSimulation {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn refit(&mut self, zoom: &ZoomConfig) {
        self.view = fit(self.simulation.nodes(), self.viewport, self.insets, zoom);
        self.settled_fit |= self.simulation.is_converged();
        self.view_moved = false;
    }
}

/// What the rendering layer should show
#[derive(Debug)]
enum ControllerState {
    /// Nothing selected yet, or stopped
    NotComputed,
    /// Selection has no physical tables
    Empty { subject_area: String },
    Running(Box<ActiveSimulation>),
}

/// Serializable summary of [`ControllerState`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum SimulationStatus {
    NotComputed,
    Empty {
        subject_area: String,
    },
    #[serde(rename_all = "camelCase")]
    Running {
        subject_area: String,
        generation: u64,
        converged: bool,
        stats: NetworkStats,
    },
}

#[derive(Debug)]
pub struct SimulationController {
    builder: NetworkBuilder,
    zoom: ZoomConfig,
    state: ControllerState,
    generation: u64,
}

impl SimulationController {
    /// `zoom` is validated here; the builder validated its own sections
    pub fn new(builder: NetworkBuilder, zoom: ZoomConfig) -> ConfigResult<Self> {
        zoom.validate()?;
        Ok(Self {
            builder,
            zoom,
            state: ControllerState::NotComputed,
            generation: 0,
        })
    }

    /// Stop the current simulation and start one for `subject_area`.
    ///
    /// Runs the bounded warm-up synchronously and fits the view, so the
    /// first frame shows a settled layout. If the warm-up ends before
    /// convergence the view is fitted again on the converging frame. The
    /// returned ticket is also issued for an empty selection; it just
    /// never yields frames.
    pub fn start(
        &mut self,
        records: &[RecordRef],
        subject_area: &str,
        viewport: Viewport,
        insets: ChromeInsets,
    ) -> SimulationTicket {
        self.stop();
        self.generation += 1;
        let generation = self.generation;

        self.state = match self.builder.build(records, subject_area, viewport) {
            NetworkBuild::Empty { subject_area } => {
                info!(subject_area = %subject_area, generation, "no physical tables to simulate");
                ControllerState::Empty { subject_area }
            }
            NetworkBuild::Ready(network) => {
                let mut simulation =
                    Simulation::with_config(network, self.builder.force_config().clone());
                simulation.run_initial();
                let view = fit(simulation.nodes(), viewport, insets, &self.zoom);
                let settled_fit = simulation.is_converged();

                info!(
                    subject_area = %subject_area,
                    generation,
                    nodes = simulation.nodes().len(),
                    scale = view.scale,
                    converged = settled_fit,
                    "simulation started"
                );
                ControllerState::Running(Box::new(ActiveSimulation {
                    simulation,
                    view,
                    interaction: InteractionState::Idle,
                    viewport,
                    insets,
                    generation,
                    settled_fit,
                    view_moved: false,
                }))
            }
        };

        SimulationTicket { generation }
    }

    /// Drop the current simulation, if any. Outstanding tickets go stale.
    pub fn stop(&mut self) {
        if let ControllerState::Running(active) = &self.state {
            debug!(
                subject_area = %active.simulation.subject_area(),
                generation = active.generation,
                ticks = active.simulation.ticks(),
                "simulation stopped"
            );
        }
        self.state = ControllerState::NotComputed;
        self.generation += 1;
    }

    pub fn is_current(&self, ticket: SimulationTicket) -> bool {
        matches!(&self.state, ControllerState::Running(active) if active.generation == ticket.generation)
    }

    /// Advance one tick and return positions to draw. `None` when the
    /// ticket is stale or there is nothing running.
    pub fn on_frame(&mut self, ticket: SimulationTicket) -> Option<&[NetworkNode]> {
        let zoom = &self.zoom;
        match &mut self.state {
            ControllerState::Running(active) if active.generation == ticket.generation => {
                active.simulation.tick();
                if !active.settled_fit && active.simulation.is_converged() {
                    if active.view_moved {
                        active.settled_fit = true;
                    } else {
                        active.refit(zoom);
                        debug!(
                            generation = active.generation,
                            ticks = active.simulation.ticks(),
                            scale = active.view.scale,
                            "view refitted to converged layout"
                        );
                    }
                }
                Some(active.simulation.nodes())
            }
            _ => None,
        }
    }

    /// Refit the view to the current node positions
    pub fn reset_view(&mut self) -> Option<ViewTransform> {
        let zoom = &self.zoom;
        match &mut self.state {
            ControllerState::Running(active) => {
                active.refit(zoom);
                Some(active.view)
            }
            _ => None,
        }
    }

    /// New drawing surface size; the view is refitted
    pub fn resize(&mut self, viewport: Viewport, insets: ChromeInsets) -> Option<ViewTransform> {
        if let ControllerState::Running(active) = &mut self.state {
            active.viewport = viewport;
            active.insets = insets;
        }
        self.reset_view()
    }

    /// Route a pointer event through the interaction state machine.
    /// Returns false when nothing is running.
    pub fn handle_event(&mut self, event: PointerEvent) -> bool {
        let zoom = &self.zoom;
        match &mut self.state {
            ControllerState::Running(active) => {
                let ActiveSimulation {
                    simulation,
                    view,
                    interaction,
                    view_moved,
                    ..
                } = active.as_mut();
                let before = *view;
                interaction.handle(event, simulation, view, zoom);
                *view_moved |= *view != before;
                true
            }
            _ => false,
        }
    }

    /// Node under a screen point in the running simulation
    pub fn hit_test(&self, screen: Position) -> Option<usize> {
        self.active()
            .and_then(|active| hit_test(active.simulation.nodes(), &active.view, screen))
    }

    pub fn active(&self) -> Option<&ActiveSimulation> {
        match &self.state {
            ControllerState::Running(active) => Some(active),
            _ => None,
        }
    }

    pub fn status(&self) -> SimulationStatus {
        match &self.state {
            ControllerState::NotComputed => SimulationStatus::NotComputed,
            ControllerState::Empty { subject_area } => SimulationStatus::Empty {
                subject_area: subject_area.clone(),
            },
            ControllerState::Running(active) => SimulationStatus::Running {
                subject_area: active.simulation.subject_area().to_string(),
                generation: active.generation,
                converged: active.simulation.is_converged(),
                stats: active.simulation.stats().clone(),
            },
        }
    }

    pub fn zoom_config(&self) -> &ZoomConfig {
        &self.zoom
    }
}
