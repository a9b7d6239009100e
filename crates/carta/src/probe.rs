//! Image size probing
//!
//! The resolver never decodes images itself; it asks an [`ImageProbe`] for
//! native pixel dimensions when an image widget has no explicit size.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ProbeError;

/// Capability: report the pixel dimensions of an image file
pub trait ImageProbe {
    /// Return `(width, height)` of the image at `path`
    fn probe(&self, path: &Path) -> Result<(u32, u32), ProbeError>;
}

impl<P: ImageProbe + ?Sized> ImageProbe for &P {
    fn probe(&self, path: &Path) -> Result<(u32, u32), ProbeError> {
        (**self).probe(path)
    }
}

impl<P: ImageProbe + ?Sized> ImageProbe for Box<P> {
    fn probe(&self, path: &Path) -> Result<(u32, u32), ProbeError> {
        (**self).probe(path)
    }
}

/// Probe that is never able to answer
///
/// Suitable when every image widget carries an explicit size.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProbe;

impl ImageProbe for NoProbe {
    fn probe(&self, path: &Path) -> Result<(u32, u32), ProbeError> {
        Err(ProbeError::Unavailable {
            path: path.to_path_buf(),
        })
    }
}

/// Fixed table of image sizes
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    sizes: HashMap<PathBuf, (u32, u32)>,
}

impl StaticProbe {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the size of `path`
    pub fn with(mut self, path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        self.sizes.insert(path.into(), (width, height));
        self
    }
}

impl ImageProbe for StaticProbe {
    fn probe(&self, path: &Path) -> Result<(u32, u32), ProbeError> {
        self.sizes
            .get(path)
            .copied()
            .ok_or_else(|| ProbeError::Unavailable {
                path: path.to_path_buf(),
            })
    }
}

/// Probe backed by the platform's file inspection tool
///
/// Runs `file <path>` on Unix and `identify -ping -format "%w %h" <path>`
/// (ImageMagick) on Windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandProbe;

impl ImageProbe for CommandProbe {
    fn probe(&self, path: &Path) -> Result<(u32, u32), ProbeError> {
        let (program, mut command) = if cfg!(windows) {
            let mut command = Command::new("identify.exe");
            command.args(["-ping", "-format", "%w %h"]);
            ("identify.exe", command)
        } else {
            ("file", Command::new("file"))
        };

        let output = command
            .arg(path)
            .output()
            .map_err(|source| ProbeError::Command {
                program: program.to_string(),
                source,
            })?;
        let text = String::from_utf8_lossy(&output.stdout);
        tracing::debug!(program, path = %path.display(), output = %text.trim(), "probed image");

        parse_dimensions(&text).ok_or_else(|| ProbeError::Unrecognized {
            path: path.to_path_buf(),
            output: text.trim().to_string(),
        })
    }
}

/// Extract `(width, height)` from probe output
///
/// Accepts `identify`'s bare `"W H"`, `file`'s `"W x H"` (PNG, GIF) and
/// `"WxH"` (JPEG). When several pairs appear the last one wins, since `file`
/// reports JPEG density before the pixel size.
pub fn parse_dimensions(output: &str) -> Option<(u32, u32)> {
    let cleaned = output.replace(',', " ");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    if let [w, h] = tokens.as_slice() {
        if let (Ok(w), Ok(h)) = (w.parse(), h.parse()) {
            return Some((w, h));
        }
    }

    let mut found = None;
    for (i, token) in tokens.iter().enumerate() {
        if *token == "x" {
            let before = i
                .checked_sub(1)
                .and_then(|j| tokens.get(j))
                .and_then(|t| t.parse().ok());
            let after = tokens.get(i + 1).and_then(|t| t.parse().ok());
            if let (Some(w), Some(h)) = (before, after) {
                found = Some((w, h));
            }
        } else if let Some((w, h)) = token.split_once('x') {
            if let (Ok(w), Ok(h)) = (w.parse(), h.parse()) {
                found = Some((w, h));
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identify_output() {
        assert_eq!(parse_dimensions("640 480"), Some((640, 480)));
    }

    #[test]
    fn test_parse_png_file_output() {
        let out = "logo.png: PNG image data, 200 x 100, 8-bit/color RGBA, non-interlaced";
        assert_eq!(parse_dimensions(out), Some((200, 100)));
    }

    #[test]
    fn test_parse_jpeg_file_output_prefers_pixel_size() {
        let out = "photo.jpg: JPEG image data, JFIF standard 1.01, resolution (DPI), \
                   density 72x72, segment length 16, baseline, precision 8, 1920x1080, components 3";
        assert_eq!(parse_dimensions(out), Some((1920, 1080)));
    }

    #[test]
    fn test_parse_unrecognized() {
        assert_eq!(parse_dimensions("notes.txt: ASCII text"), None);
        assert_eq!(parse_dimensions(""), None);
    }

    #[test]
    fn test_no_probe_fails() {
        assert!(matches!(
            NoProbe.probe(Path::new("a.png")),
            Err(ProbeError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_static_probe() {
        let probe = StaticProbe::new().with("a.png", 10, 20);
        assert_eq!(probe.probe(Path::new("a.png")).unwrap(), (10, 20));
        assert!(probe.probe(Path::new("b.png")).is_err());
    }
}
