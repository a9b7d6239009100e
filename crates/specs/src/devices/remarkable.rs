//! reMarkable layout surfaces

use crate::DisplaySpec;

/// Logical layout canvas of the `simple` renderer (1380×1820)
///
/// Slightly smaller than the physical 1404×1872 panel of both tablet
/// generations; percentage positions are resolved against this surface.
pub const REMARKABLE_CANVAS: DisplaySpec = DisplaySpec {
    name: "reMarkable canvas",
    width: 1380,
    height: 1820,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size() {
        assert_eq!((REMARKABLE_CANVAS.width, REMARKABLE_CANVAS.height), (1380, 1820));
    }

    #[test]
    fn test_canvas_centre() {
        assert_eq!(REMARKABLE_CANVAS.percent_x(50.0), 690.0);
        assert_eq!(REMARKABLE_CANVAS.percent_y(50.0), 910.0);
    }
}
