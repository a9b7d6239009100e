//! Layout compiler
//!
//! Serializes resolved widgets into the renderer's script format:
//!
//! ```text
//! @timeout 30
//! @fontsize 32
//! @justify centre
//! label:title 612 120 156 42 Hello!
//! range:volume 590 400 200 42 0 10 4
//! [paragraph:notes step step 150.58823529411765 84 first line
//! second line]
//! ```
//!
//! `@fontsize` and `@justify` persist in the renderer until changed, so a
//! directive is only written when a widget's effective value differs from
//! what the renderer already holds.

use crate::config::SessionDefaults;
use crate::geometry::Geometry;
use crate::protocol::Directive;
use crate::widget::{Justification, Widget, WidgetKind};

/// Font size and justification the renderer currently holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ambient {
    /// Last `@fontsize` written, if any
    pub font_size: Option<u32>,
    /// Last `@justify` written, if any
    pub justify: Option<Justification>,
}

/// Compile one widget
///
/// Returns the fragment (directive lines followed by the widget line or
/// block) and the renderer state after it. Pure: no I/O, no side effects.
pub fn compile_widget(
    widget: &Widget,
    geometry: &Geometry,
    defaults: &SessionDefaults,
    ambient: Ambient,
) -> (String, Ambient) {
    let font_size = widget.font_size().unwrap_or(defaults.font_size);
    let justify = widget.justify().unwrap_or(defaults.justify);

    let mut lines = Vec::with_capacity(3);
    if ambient.font_size != Some(font_size) {
        lines.push(Directive::FontSize(font_size).to_string());
    }
    if ambient.justify != Some(justify) {
        lines.push(Directive::Justify(justify).to_string());
    }
    lines.push(widget_line(widget, geometry));

    let ambient = Ambient {
        font_size: Some(font_size),
        justify: Some(justify),
    };
    (lines.join("\n"), ambient)
}

/// The widget's own line, bracketed when its value spans several lines
///
/// Field order: kind:id, x, y, width, height, kind-specific fields, value.
pub fn widget_line(widget: &Widget, geometry: &Geometry) -> String {
    let mut line = format!(
        "{}:{} {} {} {} {} ",
        widget.kind().wire_name(),
        widget.id(),
        geometry.x,
        geometry.y,
        geometry.width,
        geometry.height,
    );

    match widget.kind() {
        WidgetKind::Slider { low, high } => line.push_str(&format!("{low} {high} ")),
        WidgetKind::Canvas { raw_path, png_path } => {
            line.push_str(&format!("{} {} ", raw_path.display(), png_path.display()));
        }
        WidgetKind::Button
        | WidgetKind::Label
        | WidgetKind::Paragraph
        | WidgetKind::Image => {}
    }
    line.push_str(widget.value());

    if widget.is_multiline() {
        format!("[{line}]")
    } else {
        line
    }
}

/// Accumulates a whole screen into one script
#[derive(Debug)]
pub struct ScriptBuilder<'a> {
    defaults: &'a SessionDefaults,
    ambient: Ambient,
    lines: Vec<String>,
    widgets: usize,
}

impl<'a> ScriptBuilder<'a> {
    /// Start a script, writing `@timeout` first when one is configured
    ///
    /// A zero timeout means no timeout and writes nothing.
    pub fn new(defaults: &'a SessionDefaults) -> Self {
        let lines = defaults
            .timeout
            .filter(|&seconds| seconds > 0)
            .map(|seconds| Directive::Timeout(seconds).to_string())
            .into_iter()
            .collect();
        Self {
            defaults,
            ambient: Ambient::default(),
            lines,
            widgets: 0,
        }
    }

    /// Append a resolved widget
    pub fn push(&mut self, widget: &Widget, geometry: &Geometry) -> &mut Self {
        let (fragment, ambient) = compile_widget(widget, geometry, self.defaults, self.ambient);
        self.ambient = ambient;
        self.lines.push(fragment);
        self.widgets += 1;
        self
    }

    /// Number of widgets pushed so far
    pub fn widget_count(&self) -> usize {
        self.widgets
    }

    /// Join everything into the final script
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}
