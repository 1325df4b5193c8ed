//! Initial node placement
//!
//! Primary fact pinned at the viewport center, secondary facts on an inner
//! ring, dimensions on an outer ring (half-step staggered). Rings grow with
//! node count so seeds never overlap, and scale with the viewport. A small
//! seeded jitter breaks the symmetry that would otherwise stall the
//! simulation.

use super::domain::{NetworkNode, NodeRole, RingRadii};
use crate::config::{ForceConfig, NetworkConfig};
use crate::shared::models::Viewport;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Reference half-span at which configured ring distances apply unscaled
const REFERENCE_HALF_SPAN: f64 = 400.0;

/// Ring radii for the given role counts
pub(crate) fn ring_radii(
    secondary_count: usize,
    dimension_count: usize,
    viewport: Viewport,
    network: &NetworkConfig,
    force: &ForceConfig,
) -> RingRadii {
    let scale = (viewport.half_span() / REFERENCE_HALF_SPAN).clamp(0.6, 1.6);
    let pad = force.collision_padding;

    // Circumference must fit every node of the ring side by side
    let fits = |count: usize, radius: f64| count as f64 * (2.0 * radius + pad) / TAU;

    let secondary = (force.radial_secondary_distance * scale)
        .max(fits(secondary_count, network.secondary_radius))
        .max(network.primary_radius + network.secondary_radius + pad);

    let dimension = (force.radial_dimension_distance * scale)
        .max(fits(dimension_count, network.dimension_radius))
        .max(secondary + network.secondary_radius + network.dimension_radius + pad);

    RingRadii {
        secondary,
        dimension,
    }
}

/// Place nodes on their rings; returns the ring radii used
pub(crate) fn seed_positions(
    nodes: &mut [NetworkNode],
    viewport: Viewport,
    network: &NetworkConfig,
    force: &ForceConfig,
) -> RingRadii {
    let secondary_count = nodes.iter().filter(|n| n.role == NodeRole::SecondaryFact).count();
    let dimension_count = nodes.iter().filter(|n| n.role == NodeRole::Dimension).count();
    let rings = ring_radii(secondary_count, dimension_count, viewport, network, force);

    let center = viewport.center();
    let mut rng = StdRng::seed_from_u64(network.seed);
    let jitter = |rng: &mut StdRng| {
        if network.seed_jitter > 0.0 {
            rng.gen_range(-network.seed_jitter..=network.seed_jitter)
        } else {
            0.0
        }
    };

    let mut secondary_slot = 0usize;
    let mut dimension_slot = 0usize;

    for node in nodes.iter_mut() {
        let (radius, angle) = match node.role {
            NodeRole::PrimaryFact => {
                node.x = center.x;
                node.y = center.y;
                node.pin(center.x, center.y);
                continue;
            }
            NodeRole::SecondaryFact => {
                let step = TAU / secondary_count as f64;
                let angle = secondary_slot as f64 * step - FRAC_PI_2;
                secondary_slot += 1;
                (rings.secondary, angle)
            }
            NodeRole::Dimension => {
                let step = TAU / dimension_count as f64;
                let angle = (dimension_slot as f64 + 0.5) * step - FRAC_PI_2;
                dimension_slot += 1;
                (rings.dimension, angle)
            }
        };

        node.x = center.x + radius * angle.cos() + jitter(&mut rng);
        node.y = center.y + radius * angle.sin() + jitter(&mut rng);
        node.vx = 0.0;
        node.vy = 0.0;
    }

    rings
}
