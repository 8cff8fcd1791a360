//! Playable field bounds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The rectangular field `[0, width] × [0, height]` with a boundary wall of
/// `thickness` along every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    /// Field width.
    pub width: f32,
    /// Field height.
    pub height: f32,
    /// Boundary inflation applied by the ship's wall check.
    pub thickness: f32,
}

impl Bounds {
    /// Creates bounds from field dimensions and wall thickness.
    #[must_use]
    pub const fn new(width: f32, height: f32, thickness: f32) -> Self {
        Self {
            width,
            height,
            thickness,
        }
    }

    /// Returns `true` if `point` lies on the field (edges included).
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(800.0, 600.0, 4.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_includes_edges() {
        let bounds = Bounds::new(100.0, 50.0, 0.0);
        assert!(bounds.contains(Vec2::new(0.0, 0.0)));
        assert!(bounds.contains(Vec2::new(100.0, 50.0)));
        assert!(!bounds.contains(Vec2::new(100.1, 10.0)));
        assert!(!bounds.contains(Vec2::new(10.0, -0.1)));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let bounds: Bounds = serde_json::from_str(r#"{"width": 320.0}"#).unwrap();
        assert_eq!(bounds.width, 320.0);
        assert_eq!(bounds.height, Bounds::default().height);
    }
}
