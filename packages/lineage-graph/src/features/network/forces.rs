//! Force kernels
//!
//! Each kernel adds to node velocities (collision aside, which uses the
//! predicted positions `x + vx`). Kernels never move nodes; the integrator
//! in `simulation.rs` does. Pairwise kernels are O(n²): star networks of
//! one subject area stay in the low hundreds of nodes.

use super::domain::{NetworkLink, NetworkNode, NodeRole, RingRadii};
use crate::shared::models::Position;
use rand::rngs::StdRng;
use rand::Rng;

/// Tiny random offset for coincident nodes
fn jiggle(rng: &mut StdRng) -> f64 {
    (rng.gen::<f64>() - 0.5) * 1e-6
}

/// Spring pulling each link toward its rest length.
///
/// `bias` moves the lighter endpoint more: a node with many links barely
/// moves for any single one of them.
pub(crate) fn apply_links(
    nodes: &mut [NetworkNode],
    links: &[NetworkLink],
    degrees: &[usize],
    distance_of: impl Fn(&NetworkNode) -> f64,
    strength: f64,
    alpha: f64,
    rng: &mut StdRng,
) {
    for link in links {
        let (s, t) = (link.source, link.target);
        if s == t || s >= nodes.len() || t >= nodes.len() {
            continue;
        }

        let mut dx = nodes[t].x + nodes[t].vx - nodes[s].x - nodes[s].vx;
        let mut dy = nodes[t].y + nodes[t].vy - nodes[s].y - nodes[s].vy;
        if dx == 0.0 {
            dx = jiggle(rng);
        }
        if dy == 0.0 {
            dy = jiggle(rng);
        }

        let length = (dx * dx + dy * dy).sqrt();
        let rest = distance_of(&nodes[t]);
        let k = (length - rest) / length * alpha * strength;
        dx *= k;
        dy *= k;

        let bias = degrees[s] as f64 / (degrees[s] + degrees[t]).max(1) as f64;
        nodes[t].vx -= dx * bias;
        nodes[t].vy -= dy * bias;
        nodes[s].vx += dx * (1.0 - bias);
        nodes[s].vy += dy * (1.0 - bias);
    }
}

/// Pairwise charge; negative strength repels. Pairs beyond `distance_max`
/// ignore each other, pairs closer than `distance_min` are softened.
pub(crate) fn apply_many_body(
    nodes: &mut [NetworkNode],
    strength: f64,
    distance_min: f64,
    distance_max: f64,
    alpha: f64,
    rng: &mut StdRng,
) {
    let min2 = distance_min * distance_min;
    let max2 = distance_max * distance_max;
    let n = nodes.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let mut dx = nodes[j].x - nodes[i].x;
            let mut dy = nodes[j].y - nodes[i].y;
            let mut l2 = dx * dx + dy * dy;
            if l2 >= max2 {
                continue;
            }
            if dx == 0.0 {
                dx = jiggle(rng);
                l2 += dx * dx;
            }
            if dy == 0.0 {
                dy = jiggle(rng);
                l2 += dy * dy;
            }
            if l2 < min2 {
                l2 = (min2 * l2).sqrt();
            }

            let w = strength * alpha / l2;
            nodes[i].vx += dx * w;
            nodes[i].vy += dy * w;
            nodes[j].vx -= dx * w;
            nodes[j].vy -= dy * w;
        }
    }
}

/// Separate overlapping circles of radius `r + padding/2`; the smaller
/// node yields more. Not scaled by alpha.
pub(crate) fn apply_collision(
    nodes: &mut [NetworkNode],
    padding: f64,
    strength: f64,
    rng: &mut StdRng,
) {
    let n = nodes.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let ri = nodes[i].radius + padding / 2.0;
            let rj = nodes[j].radius + padding / 2.0;
            let r = ri + rj;

            let mut dx = nodes[i].x + nodes[i].vx - nodes[j].x - nodes[j].vx;
            let mut dy = nodes[i].y + nodes[i].vy - nodes[j].y - nodes[j].vy;
            let mut l2 = dx * dx + dy * dy;
            if l2 >= r * r {
                continue;
            }
            if dx == 0.0 {
                dx = jiggle(rng);
                l2 += dx * dx;
            }
            if dy == 0.0 {
                dy = jiggle(rng);
                l2 += dy * dy;
            }

            let l = l2.sqrt();
            let k = (r - l) / l * strength;
            dx *= k;
            dy *= k;

            let (ri2, rj2) = (ri * ri, rj * rj);
            let share_i = rj2 / (ri2 + rj2);
            nodes[i].vx += dx * share_i;
            nodes[i].vy += dy * share_i;
            nodes[j].vx -= dx * (1.0 - share_i);
            nodes[j].vy -= dy * (1.0 - share_i);
        }
    }
}

/// Nudge the free nodes so the mean position drifts toward `center`
pub(crate) fn apply_center(nodes: &mut [NetworkNode], center: Position, strength: f64) {
    if nodes.is_empty() || strength == 0.0 {
        return;
    }
    let n = nodes.len() as f64;
    let (sx, sy) = nodes
        .iter()
        .fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
    let shift_x = (sx / n - center.x) * strength;
    let shift_y = (sy / n - center.y) * strength;

    for node in nodes.iter_mut().filter(|node| !node.is_pinned()) {
        node.x -= shift_x;
        node.y -= shift_y;
    }
}

/// Pull secondary facts and dimensions toward their ring around `origin`
pub(crate) fn apply_radial(
    nodes: &mut [NetworkNode],
    origin: Position,
    rings: RingRadii,
    strength: f64,
    alpha: f64,
) {
    for node in nodes.iter_mut() {
        let target = match node.role {
            NodeRole::PrimaryFact => continue,
            NodeRole::SecondaryFact => rings.secondary,
            NodeRole::Dimension => rings.dimension,
        };
        let dx = node.x - origin.x;
        let dy = node.y - origin.y;
        let r = (dx * dx + dy * dy).sqrt();
        if r < 1e-9 {
            continue;
        }
        let k = (target - r) * strength * alpha / r;
        node.vx += dx * k;
        node.vy += dy * k;
    }
}

/// Tangential push around `origin`, proportional to orbit radius: every
/// free node drifts at the same angular speed. Not scaled by alpha.
pub(crate) fn apply_orbit(nodes: &mut [NetworkNode], origin: Position, speed: f64) {
    if speed == 0.0 {
        return;
    }
    for node in nodes.iter_mut().filter(|node| !node.is_pinned()) {
        let dx = node.x - origin.x;
        let dy = node.y - origin.y;
        // Rotate (dx, dy) by 90°: tangent scaled by radius
        node.vx += -dy * speed;
        node.vy += dx * speed;
    }
}
