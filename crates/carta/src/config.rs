//! Protocol constants and defaults
//!
//! Central values shared by the resolver, the compiler and the process
//! renderer. Reference these rather than hardcoding values.

use serde::{Deserialize, Serialize};

use crate::widget::Justification;

/// Renderer binary installed by the reMarkable `simple` package
pub const DEFAULT_RENDERER: &str = "/opt/bin/simple";

/// Binary that clears the physical display
pub const CLEAR_BINARY: &str = "/opt/bin/eclear";

/// Frame-buffer compatibility shim required on reMarkable 2
pub const FRAMEBUFFER_SHIM: &str = "rm2fb-client";

/// User the remote shell logs in as
pub const REMOTE_USER: &str = "root";

/// Session font size when none is configured
pub const DEFAULT_FONT_SIZE: u32 = 32;

/// Line height as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f64 = 1.3125;

/// Font size divided by this gives the average glyph width
pub const GLYPH_WIDTH_DIVISOR: f64 = 1.7;

/// Horizontal pixels per slider step
pub const SLIDER_STEP_WIDTH: f64 = 20.0;

/// Canvas buffer written by the renderer when none is given
pub const DEFAULT_CANVAS_RAW: &str = "out.raw";

/// Canvas image written by the renderer when none is given
pub const DEFAULT_CANVAS_PNG: &str = "out.png";

// ─────────────────────────────────────────────────────────────────────────────
// Session defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Render-time defaults owned by a session
///
/// Widgets without their own font size or justification inherit these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionDefaults {
    /// Font size in points
    #[serde(alias = "fontsize")]
    pub font_size: u32,
    /// Text justification
    pub justify: Justification,
    /// Seconds before the renderer gives up waiting for input; `0` means none
    pub timeout: Option<u32>,
}

impl SessionDefaults {
    /// 32pt, centred, no timeout
    pub const DEFAULT: Self = Self {
        font_size: DEFAULT_FONT_SIZE,
        justify: Justification::Centre,
        timeout: None,
    };
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self::DEFAULT
    }
}
