//! Display specification types
//!
//! Defines the coordinate space that widgets are laid out against.

/// Specification of a layout surface
///
/// The geometry resolver converts percentage positions into pixels of this
/// surface.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySpec {
    /// Display name (e.g., "reMarkable canvas")
    pub name: &'static str,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

impl DisplaySpec {
    /// Horizontal pixel offset of `percent` of the width
    ///
    /// `percent` is on a 0–100 scale; values outside it are not clamped.
    pub fn percent_x(&self, percent: f64) -> f64 {
        percent / 100.0 * f64::from(self.width)
    }

    /// Vertical pixel offset of `percent` of the height
    pub fn percent_y(&self, percent: f64) -> f64 {
        percent / 100.0 * f64::from(self.height)
    }
}
