//! Widget model
//!
//! A [`WidgetSpec`] is the unvalidated, declarative description of one screen
//! element: it is what callers build with the fluent methods and what screen
//! files deserialize into. [`WidgetSpec::build`] validates and normalizes it
//! into an immutable [`Widget`].
//!
//! # Example
//!
//! ```
//! use carta::widget::{Position, Widget};
//!
//! let volume = Widget::slider("volume", 0, 11, 7)
//!     .at(Position::Percent(50.0), Position::Pixels(400))
//!     .build()
//!     .unwrap();
//! assert_eq!(volume.kind().wire_name(), "range");
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config;
use crate::error::ValidationError;

// ─────────────────────────────────────────────────────────────────────────────
// Justification
// ─────────────────────────────────────────────────────────────────────────────

/// Horizontal text alignment inside a widget's box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justification {
    /// Flush left
    Left,
    /// Centred (the renderer's spelling)
    #[default]
    #[serde(alias = "center")]
    Centre,
    /// Flush right
    Right,
}

impl Justification {
    /// Token sent after `@justify`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Centre => "centre",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Justification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "centre" | "center" => Ok(Self::Centre),
            "right" => Ok(Self::Right),
            other => Err(format!("unknown justification `{other}`")),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Position
// ─────────────────────────────────────────────────────────────────────────────

/// One coordinate of a widget's placement
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(try_from = "PositionRepr")]
pub enum Position {
    /// Absolute pixel offset of the top-left corner
    Pixels(i32),
    /// Percentage of the canvas marking the widget's centre
    Percent(f64),
    /// Let the renderer place the widget after the previous one
    #[default]
    Step,
}

impl Position {
    fn is_valid(self) -> bool {
        match self {
            Self::Percent(p) => p.is_finite(),
            Self::Pixels(_) | Self::Step => true,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels(pixels) => write!(f, "{pixels}"),
            Self::Percent(percent) => write!(f, "{percent}%"),
            Self::Step => f.write_str("step"),
        }
    }
}

impl From<i32> for Position {
    fn from(pixels: i32) -> Self {
        Self::Pixels(pixels)
    }
}

impl FromStr for Position {
    type Err = ValidationError;

    /// Parse `"step"`, `"50%"` or `"120"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ValidationError::InvalidPosition(s.to_string());

        if trimmed.eq_ignore_ascii_case("step") {
            return Ok(Self::Step);
        }
        if let Some(percent) = trimmed.strip_suffix('%') {
            let value: f64 = percent.trim().parse().map_err(|_| invalid())?;
            return if value.is_finite() {
                Ok(Self::Percent(value))
            } else {
                Err(invalid())
            };
        }
        trimmed.parse().map(Self::Pixels).map_err(|_| invalid())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PositionRepr {
    Pixels(i32),
    Text(String),
}

impl TryFrom<PositionRepr> for Position {
    type Error = ValidationError;

    fn try_from(repr: PositionRepr) -> Result<Self, Self::Error> {
        match repr {
            PositionRepr::Pixels(pixels) => Ok(Self::Pixels(pixels)),
            PositionRepr::Text(text) => text.parse(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Kinds
// ─────────────────────────────────────────────────────────────────────────────

/// Name of a widget kind, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindTag {
    /// Pressable button
    Button,
    /// Single line of text
    Label,
    /// Multi-line text block
    Paragraph,
    /// Integer range picker
    #[serde(alias = "range")]
    Slider,
    /// Image file
    Image,
    /// Drawable area saved to disk
    Canvas,
}

/// Widget kind with its kind-specific payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetKind {
    /// Pressable button
    Button,
    /// Single line of text
    Label,
    /// Multi-line text block
    Paragraph,
    /// Integer range picker
    Slider {
        /// Lowest selectable value
        low: i64,
        /// Highest selectable value
        high: i64,
    },
    /// Image file; the widget value is its path
    Image,
    /// Drawable area
    Canvas {
        /// Raw frame-buffer dump written by the renderer
        raw_path: PathBuf,
        /// PNG written by the renderer
        png_path: PathBuf,
    },
}

impl WidgetKind {
    /// Kind token of the layout protocol
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Label => "label",
            Self::Paragraph => "paragraph",
            Self::Slider { .. } => "range",
            Self::Image => "image",
            Self::Canvas { .. } => "canvas",
        }
    }

    /// Payload-free name of this kind
    pub fn tag(&self) -> KindTag {
        match self {
            Self::Button => KindTag::Button,
            Self::Label => KindTag::Label,
            Self::Paragraph => KindTag::Paragraph,
            Self::Slider { .. } => KindTag::Slider,
            Self::Image => KindTag::Image,
            Self::Canvas { .. } => KindTag::Canvas,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// WidgetSpec
// ─────────────────────────────────────────────────────────────────────────────

/// Unvalidated widget description
///
/// Every field is public so screen files and callers can fill it freely;
/// nothing is checked until [`WidgetSpec::build`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetSpec {
    /// Identifier reported back by the renderer
    pub id: String,
    /// Widget kind
    #[serde(alias = "type")]
    pub kind: KindTag,
    /// Text, image path, or slider default; numbers are coerced to text
    #[serde(default, deserialize_with = "value_to_string")]
    pub value: String,
    /// Horizontal placement
    #[serde(default)]
    pub x: Position,
    /// Vertical placement
    #[serde(default)]
    pub y: Position,
    /// Width in pixels
    #[serde(default)]
    pub width: Option<f64>,
    /// Height in pixels
    #[serde(default)]
    pub height: Option<f64>,
    /// Font size override
    #[serde(default, alias = "fontsize")]
    pub font_size: Option<u32>,
    /// Justification override
    #[serde(default)]
    pub justify: Option<Justification>,
    /// Slider lower bound
    #[serde(default)]
    pub low: Option<i64>,
    /// Slider upper bound
    #[serde(default)]
    pub high: Option<i64>,
    /// Canvas raw output path
    #[serde(default, alias = "rawfile")]
    pub raw_path: Option<PathBuf>,
    /// Canvas PNG output path
    #[serde(default, alias = "pngfile")]
    pub png_path: Option<PathBuf>,
}

impl WidgetSpec {
    /// Start describing a widget
    pub fn new(id: impl Into<String>, kind: KindTag) -> Self {
        Self {
            id: id.into(),
            kind,
            value: String::new(),
            x: Position::Step,
            y: Position::Step,
            width: None,
            height: None,
            font_size: None,
            justify: None,
            low: None,
            high: None,
            raw_path: None,
            png_path: None,
        }
    }

    /// Set the value, converting it to text
    pub fn value(mut self, value: impl fmt::Display) -> Self {
        self.value = value.to_string();
        self
    }

    /// Set both coordinates
    pub fn at(mut self, x: impl Into<Position>, y: impl Into<Position>) -> Self {
        self.x = x.into();
        self.y = y.into();
        self
    }

    /// Set both dimensions
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set only the width
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Set only the height
    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Override the session font size
    pub fn font_size(mut self, font_size: u32) -> Self {
        self.font_size = Some(font_size);
        self
    }

    /// Override the session justification
    pub fn justify(mut self, justify: Justification) -> Self {
        self.justify = Some(justify);
        self
    }

    /// Set slider bounds
    pub fn bounds(mut self, low: i64, high: i64) -> Self {
        self.low = Some(low);
        self.high = Some(high);
        self
    }

    /// Set canvas output files
    pub fn canvas_files(mut self, raw: impl Into<PathBuf>, png: impl Into<PathBuf>) -> Self {
        self.raw_path = Some(raw.into());
        self.png_path = Some(png.into());
        self
    }

    /// Validate into a [`Widget`]
    pub fn build(self) -> Result<Widget, ValidationError> {
        Widget::try_from(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ValueRepr {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

fn value_to_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ValueRepr::deserialize(deserializer)? {
        ValueRepr::Text(text) => text,
        ValueRepr::Integer(n) => n.to_string(),
        ValueRepr::Float(n) => n.to_string(),
        ValueRepr::Bool(b) => b.to_string(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Widget
// ─────────────────────────────────────────────────────────────────────────────

/// Validated, immutable screen element
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    id: String,
    kind: WidgetKind,
    value: String,
    x: Position,
    y: Position,
    width: Option<f64>,
    height: Option<f64>,
    font_size: Option<u32>,
    justify: Option<Justification>,
}

impl Widget {
    /// Describe a widget of any kind
    pub fn builder(id: impl Into<String>, kind: KindTag) -> WidgetSpec {
        WidgetSpec::new(id, kind)
    }

    /// Describe a button
    pub fn button(id: impl Into<String>, label: impl fmt::Display) -> WidgetSpec {
        WidgetSpec::new(id, KindTag::Button).value(label)
    }

    /// Describe text: a label, or a paragraph when it spans several lines
    pub fn text(id: impl Into<String>, text: impl fmt::Display) -> WidgetSpec {
        let text = text.to_string();
        let kind = if text.contains('\n') {
            KindTag::Paragraph
        } else {
            KindTag::Label
        };
        WidgetSpec::new(id, kind).value(text)
    }

    /// Describe a slider over `[low, high]` starting at `value`
    pub fn slider(id: impl Into<String>, low: i64, high: i64, value: i64) -> WidgetSpec {
        WidgetSpec::new(id, KindTag::Slider)
            .bounds(low, high)
            .value(value)
    }

    /// Describe an image
    pub fn image(id: impl Into<String>, path: impl AsRef<Path>) -> WidgetSpec {
        WidgetSpec::new(id, KindTag::Image).value(path.as_ref().display())
    }

    /// Describe a canvas with the default output files
    pub fn canvas(id: impl Into<String>) -> WidgetSpec {
        WidgetSpec::new(id, KindTag::Canvas)
    }

    /// Normalized identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Kind and kind-specific payload
    pub fn kind(&self) -> &WidgetKind {
        &self.kind
    }

    /// Textual value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Horizontal placement
    pub fn x(&self) -> Position {
        self.x
    }

    /// Vertical placement
    pub fn y(&self) -> Position {
        self.y
    }

    /// Explicit width, if any
    pub fn width(&self) -> Option<f64> {
        self.width
    }

    /// Explicit height, if any
    pub fn height(&self) -> Option<f64> {
        self.height
    }

    /// Font size override, if any
    pub fn font_size(&self) -> Option<u32> {
        self.font_size
    }

    /// Justification override, if any
    pub fn justify(&self) -> Option<Justification> {
        self.justify
    }

    /// Whether the value spans several lines
    pub fn is_multiline(&self) -> bool {
        self.value.contains('\n')
    }
}

impl TryFrom<WidgetSpec> for Widget {
    type Error = ValidationError;

    fn try_from(spec: WidgetSpec) -> Result<Self, Self::Error> {
        let id = normalize_id(&spec.id)?;

        for value in [spec.width, spec.height].into_iter().flatten() {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidSize { id, value });
            }
        }
        for position in [spec.x, spec.y] {
            if !position.is_valid() {
                return Err(ValidationError::InvalidPosition(position.to_string()));
            }
        }

        let kind = match spec.kind {
            KindTag::Button => WidgetKind::Button,
            KindTag::Label => WidgetKind::Label,
            KindTag::Paragraph => WidgetKind::Paragraph,
            KindTag::Slider => {
                let (Some(low), Some(high)) = (spec.low, spec.high) else {
                    return Err(ValidationError::MissingSliderBounds { id });
                };
                if low >= high {
                    return Err(ValidationError::InvertedSliderBounds { id, low, high });
                }
                let in_range = spec
                    .value
                    .trim()
                    .parse::<i64>()
                    .is_ok_and(|n| (low..=high).contains(&n));
                if !in_range {
                    return Err(ValidationError::SliderValue {
                        id,
                        value: spec.value,
                        low,
                        high,
                    });
                }
                WidgetKind::Slider { low, high }
            }
            KindTag::Image => {
                let path = PathBuf::from(&spec.value);
                if !path.exists() {
                    return Err(ValidationError::MissingImage { path });
                }
                WidgetKind::Image
            }
            KindTag::Canvas => WidgetKind::Canvas {
                raw_path: spec
                    .raw_path
                    .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CANVAS_RAW)),
                png_path: spec
                    .png_path
                    .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CANVAS_PNG)),
            },
        };

        Ok(Self {
            id,
            kind,
            value: spec.value,
            x: spec.x,
            y: spec.y,
            width: spec.width,
            height: spec.height,
            font_size: spec.font_size,
            justify: spec.justify,
        })
    }
}

/// Collapse whitespace runs in `id` to single underscores
///
/// ```
/// assert_eq!(carta::widget::normalize_id(" my  big\tbutton ").unwrap(), "my_big_button");
/// ```
pub fn normalize_id(id: &str) -> Result<String, ValidationError> {
    let normalized = id.split_whitespace().collect::<Vec<_>>().join("_");
    if normalized.is_empty() {
        Err(ValidationError::EmptyId)
    } else {
        Ok(normalized)
    }
}
