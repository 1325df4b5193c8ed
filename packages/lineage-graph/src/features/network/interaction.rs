//! Pointer interaction state machine
//!
//! ```text
//! Idle ──down(background)──▶ Panning ──up──▶ Idle
//! Idle ──down(free node)───▶ Dragging ─up──▶ Idle (node un-pinned)
//! wheel: zoom around cursor, any state
//! ```
//!
//! Pressing the pinned primary fact does nothing. Events that make no
//! sense in the current state (move while idle, a second down) are ignored.

use super::domain::NetworkNode;
use super::simulation::Simulation;
use super::viewport::{wheel_factor, ViewTransform};
use crate::config::ZoomConfig;
use crate::shared::models::Position;
use serde::Serialize;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum InteractionState {
    #[default]
    Idle,
    /// Background drag; `last` is the previous screen position
    Panning { last: Position },
    /// Node drag; index into the simulation's nodes
    Dragging { node: usize },
}

/// Screen-space pointer input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// `hit` is the node under the pointer, see [`hit_test`]
    Down { pos: Position, hit: Option<usize> },
    Move { pos: Position },
    Up,
    Wheel { pos: Position, delta_y: f64 },
}

/// Topmost node whose disc contains the screen point
pub fn hit_test(nodes: &[NetworkNode], view: &ViewTransform, screen: Position) -> Option<usize> {
    let p = view.to_graph(screen);
    nodes
        .iter()
        .enumerate()
        .rev()
        .find(|(_, n)| n.position().distance(&p) <= n.radius)
        .map(|(i, _)| i)
}

impl InteractionState {
    /// Apply one event, mutating the view and simulation as needed
    pub fn handle(
        &mut self,
        event: PointerEvent,
        simulation: &mut Simulation,
        view: &mut ViewTransform,
        zoom: &ZoomConfig,
    ) {
        let next = match (*self, event) {
            (_, PointerEvent::Wheel { pos, delta_y }) => {
                view.zoom_at(pos, wheel_factor(delta_y, zoom), zoom.min_scale, zoom.max_scale);
                *self
            }

            (InteractionState::Idle, PointerEvent::Down { pos, hit: Some(node) }) => {
                if simulation.begin_drag(node) {
                    simulation.drag_to(view.to_graph(pos));
                    InteractionState::Dragging { node }
                } else {
                    InteractionState::Idle
                }
            }
            (InteractionState::Idle, PointerEvent::Down { pos, hit: None }) => {
                InteractionState::Panning { last: pos }
            }

            (InteractionState::Panning { last }, PointerEvent::Move { pos }) => {
                view.pan_by(pos.x - last.x, pos.y - last.y);
                InteractionState::Panning { last: pos }
            }
            (InteractionState::Dragging { node }, PointerEvent::Move { pos }) => {
                simulation.drag_to(view.to_graph(pos));
                InteractionState::Dragging { node }
            }

            (InteractionState::Dragging { .. }, PointerEvent::Up) => {
                simulation.end_drag();
                InteractionState::Idle
            }
            (_, PointerEvent::Up) => InteractionState::Idle,

            (state, _) => state,
        };

        if next != *self {
            trace!(from = ?*self, to = ?next, "interaction transition");
        }
        *self = next;
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }
}
