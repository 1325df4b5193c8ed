//! Graph ↔ screen transform and fit-to-viewport

use super::domain::{NetworkNode, NodeRole};
use crate::config::{ConfigResult, Validatable, ZoomConfig};
use crate::shared::models::{ChromeInsets, Position, Viewport};
use serde::Serialize;

/// Uniform scale plus translation: `screen = graph * scale + (tx, ty)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewTransform {
    pub scale: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn to_screen(&self, p: Position) -> Position {
        Position::new(p.x * self.scale + self.tx, p.y * self.scale + self.ty)
    }

    pub fn to_graph(&self, p: Position) -> Position {
        Position::new((p.x - self.tx) / self.scale, (p.y - self.ty) / self.scale)
    }

    /// Translate by a screen-space delta
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.tx += dx;
        self.ty += dy;
    }

    /// Multiply the scale by `factor`, clamped to `[min, max]`, keeping the
    /// graph point under `cursor` fixed on screen
    pub fn zoom_at(&mut self, cursor: Position, factor: f64, min: f64, max: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let anchor = self.to_graph(cursor);
        // `clamp` panics on an inverted range
        self.scale = (self.scale * factor).max(min).min(max);
        self.tx = cursor.x - anchor.x * self.scale;
        self.ty = cursor.y - anchor.y * self.scale;
    }
}

/// Scale factor for one wheel event
pub fn wheel_factor(delta_y: f64, config: &ZoomConfig) -> f64 {
    2f64.powf(-delta_y * config.wheel_sensitivity)
}

/// Axis-aligned box in graph space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Position {
        Position::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    fn include(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) {
        self.min_x = self.min_x.min(min_x);
        self.min_y = self.min_y.min(min_y);
        self.max_x = self.max_x.max(max_x);
        self.max_y = self.max_y.max(max_y);
    }
}

/// Extent of every node disc. Dimension labels render below the disc and
/// can be wider than it, so they widen and deepen the box.
pub fn content_bounds(nodes: &[NetworkNode], config: &ZoomConfig) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;

    for node in nodes.iter().filter(|n| n.position().is_finite()) {
        let r = node.radius;
        let (mut half_w, mut below) = (r, r);
        if node.role == NodeRole::Dimension {
            let label_half = node.id.chars().count() as f64 * config.label_char_width / 2.0;
            half_w = half_w.max(label_half);
            below = r + config.label_gap + config.label_line_height;
        }

        let (x0, y0, x1, y1) = (node.x - half_w, node.y - r, node.x + half_w, node.y + below);
        match bounds.as_mut() {
            Some(b) => b.include(x0, y0, x1, y1),
            None => {
                bounds = Some(Bounds {
                    min_x: x0,
                    min_y: y0,
                    max_x: x1,
                    max_y: y1,
                })
            }
        }
    }

    bounds
}

/// Transform that centers all nodes inside the viewport area not covered
/// by `insets`. Never zooms in past `max_fit_scale`.
pub fn fit_to_viewport(
    nodes: &[NetworkNode],
    viewport: Viewport,
    insets: ChromeInsets,
    config: &ZoomConfig,
) -> ConfigResult<ViewTransform> {
    config.validate()?;
    Ok(fit(nodes, viewport, insets, config))
}

/// [`fit_to_viewport`] for a config validated by the caller
pub(super) fn fit(
    nodes: &[NetworkNode],
    viewport: Viewport,
    insets: ChromeInsets,
    config: &ZoomConfig,
) -> ViewTransform {
    let Some(bounds) = content_bounds(nodes, config) else {
        return ViewTransform::identity();
    };
    if !viewport.is_valid() {
        return ViewTransform::identity();
    }

    let avail_w = (viewport.width - insets.left - insets.right - 2.0 * config.fit_padding).max(1.0);
    let avail_h = (viewport.height - insets.top - insets.bottom - 2.0 * config.fit_padding).max(1.0);

    let fit = |avail: f64, extent: f64| {
        if extent > 0.0 {
            avail / extent
        } else {
            f64::INFINITY
        }
    };
    let scale = fit(avail_w, bounds.width())
        .min(fit(avail_h, bounds.height()))
        .clamp(config.min_scale, config.max_fit_scale);

    let area_center = Position::new(
        insets.left + (viewport.width - insets.left - insets.right) / 2.0,
        insets.top + (viewport.height - insets.top - insets.bottom) / 2.0,
    );
    let c = bounds.center();

    ViewTransform {
        scale,
        tx: area_center.x - c.x * scale,
        ty: area_center.y - c.y * scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::TableCategory;

    fn node(id: &str, role: NodeRole, x: f64, y: f64, radius: f64) -> NetworkNode {
        NetworkNode {
            id: id.to_string(),
            role,
            category: TableCategory::Unknown,
            radius,
            record_count: 1,
            column_count: 1,
            presentation_table_count: 1,
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            fx: None,
            fy: None,
        }
    }

    #[test]
    fn test_screen_graph_inverse() {
        let t = ViewTransform {
            scale: 0.5,
            tx: 100.0,
            ty: -20.0,
        };
        let p = Position::new(33.0, 77.0);
        let back = t.to_graph(t.to_screen(p));
        assert!(back.distance(&p) < 1e-9);
    }

    #[test]
    fn test_zoom_keeps_cursor_fixed() {
        let mut t = ViewTransform {
            scale: 1.0,
            tx: 10.0,
            ty: 10.0,
        };
        let cursor = Position::new(300.0, 200.0);
        let under = t.to_graph(cursor);
        t.zoom_at(cursor, 2.0, 0.1, 4.0);
        assert_eq!(t.scale, 2.0);
        assert!(t.to_screen(under).distance(&cursor) < 1e-9);

        t.zoom_at(cursor, 100.0, 0.1, 4.0);
        assert_eq!(t.scale, 4.0);
        assert!(t.to_screen(under).distance(&cursor) < 1e-9);
    }

    #[test]
    fn test_wheel_direction() {
        let config = ZoomConfig::default();
        assert!(wheel_factor(-100.0, &config) > 1.0);
        assert!(wheel_factor(100.0, &config) < 1.0);
        assert_eq!(wheel_factor(0.0, &config), 1.0);
    }

    #[test]
    fn test_fit_never_zooms_past_full_size() {
        let nodes = vec![node("F", NodeRole::PrimaryFact, 0.0, 0.0, 10.0)];
        let t = fit_to_viewport(
            &nodes,
            Viewport::new(800.0, 600.0),
            ChromeInsets::none(),
            &ZoomConfig::default(),
        )
        .unwrap();
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.to_screen(Position::ORIGIN), Position::new(400.0, 300.0));
    }

    #[test]
    fn test_fit_shrinks_and_contains_everything() {
        let config = ZoomConfig::default();
        let viewport = Viewport::new(800.0, 600.0);
        let nodes = vec![
            node("F", NodeRole::PrimaryFact, 0.0, 0.0, 40.0),
            node("DW_NS_CUSTOMER_D", NodeRole::Dimension, 1500.0, 900.0, 16.0),
            node("DW_NS_ITEM_D", NodeRole::Dimension, -1500.0, -900.0, 16.0),
        ];
        let t = fit_to_viewport(&nodes, viewport, ChromeInsets::none(), &config).unwrap();
        assert!(t.scale < 1.0);

        let b = content_bounds(&nodes, &config).unwrap();
        for corner in [
            Position::new(b.min_x, b.min_y),
            Position::new(b.max_x, b.max_y),
        ] {
            let s = t.to_screen(corner);
            assert!(s.x >= -1e-6 && s.x <= viewport.width + 1e-6);
            assert!(s.y >= -1e-6 && s.y <= viewport.height + 1e-6);
        }
    }

    #[test]
    fn test_fit_respects_insets() {
        let nodes = vec![node("F", NodeRole::PrimaryFact, 0.0, 0.0, 10.0)];
        let t = fit_to_viewport(
            &nodes,
            Viewport::new(1000.0, 600.0),
            ChromeInsets::new(400.0, 0.0, 0.0, 0.0),
            &ZoomConfig::default(),
        )
        .unwrap();
        // Centered in [400, 1000]
        assert_eq!(t.to_screen(Position::ORIGIN).x, 700.0);
    }

    #[test]
    fn test_dimension_label_widens_bounds() {
        let config = ZoomConfig::default();
        let dim = node("DW_NS_VERY_LONG_DIMENSION_NAME_D", NodeRole::Dimension, 0.0, 0.0, 16.0);
        let b = content_bounds(&[dim], &config).unwrap();
        assert!(b.width() > 32.0);
        assert!(b.max_y > 16.0);
        assert_eq!(b.min_y, -16.0);
    }

    #[test]
    fn test_fit_empty_is_identity() {
        let t = fit_to_viewport(
            &[],
            Viewport::default(),
            ChromeInsets::none(),
            &ZoomConfig::default(),
        )
        .unwrap();
        assert_eq!(t, ViewTransform::identity());
    }

    #[test]
    fn test_fit_rejects_inverted_scale_range() {
        let config = ZoomConfig {
            min_scale: 0.9,
            max_fit_scale: 0.2,
            ..ZoomConfig::default()
        };
        let nodes = vec![node("F", NodeRole::PrimaryFact, 0.0, 0.0, 10.0)];
        let result = fit_to_viewport(&nodes, Viewport::default(), ChromeInsets::none(), &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_zoom_with_inverted_bounds_does_not_panic() {
        let mut t = ViewTransform::identity();
        t.zoom_at(Position::new(5.0, 5.0), 2.0, 3.0, 1.0);
        assert!(t.scale.is_finite());
    }
}
