//! carta Testing Utilities
//!
//! Headless harness for screens built with `carta`: a scripted renderer that
//! records every script it is sent, and a parser that turns those scripts
//! back into queryable widget lines.
//!
//! # Quick start
//!
//! ```
//! use carta::{Session, Widget};
//! use carta_testing::{MockRenderer, StaticProbe};
//!
//! let mut session = Session::new(MockRenderer::new().reply("INFO: ok"), StaticProbe::new());
//! session.add([Widget::button("ok", "OK").at(10, 10).build().unwrap()]).unwrap();
//!
//! let event = session.display().unwrap();
//! assert_eq!(event.id(), Some("ok"));
//!
//! let script = session.renderer().last_script().unwrap();
//! script.assert_has_widget("ok").unwrap();
//! assert_eq!(script.query_by_id("ok").unwrap().kind, "button");
//! ```

#![warn(clippy::all)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::indexing_slicing))]

use std::collections::VecDeque;

use carta::{Directive, Justification, RenderError, Renderer};

pub use carta::StaticProbe;

// ─────────────────────────────────────────────────────────────────────────────
// MockRenderer
// ─────────────────────────────────────────────────────────────────────────────

/// Renderer double with queued replies
///
/// Each [`Renderer::render`] call records the script and pops the next
/// queued reply; once the queue is empty it answers with empty stdout (the
/// renderer timed out with nothing pressed).
#[derive(Debug, Default)]
pub struct MockRenderer {
    replies: VecDeque<Result<String, RenderError>>,
    scripts: Vec<String>,
    clears: usize,
    clear_error: Option<RenderError>,
}

impl MockRenderer {
    /// Renderer with no queued replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue raw stdout for the next render.
    pub fn reply(mut self, stdout: impl Into<String>) -> Self {
        self.push_reply(stdout);
        self
    }

    /// Queue a failure for the next render.
    pub fn fail_with(mut self, error: RenderError) -> Self {
        self.push_failure(error);
        self
    }

    /// Make the next [`Renderer::clear`] fail.
    pub fn fail_clear(mut self, error: RenderError) -> Self {
        self.clear_error = Some(error);
        self
    }

    /// Queue raw stdout on an existing renderer.
    pub fn push_reply(&mut self, stdout: impl Into<String>) {
        self.replies.push_back(Ok(stdout.into()));
    }

    /// Queue a failure on an existing renderer.
    pub fn push_failure(&mut self, error: RenderError) {
        self.replies.push_back(Err(error));
    }

    /// Number of render round-trips so far.
    pub fn launch_count(&self) -> usize {
        self.scripts.len()
    }

    /// Number of clear requests so far.
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Every script received, oldest first.
    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    /// The most recent script, parsed.
    pub fn last_script(&self) -> Option<Script> {
        self.scripts.last().map(|raw| Script::parse(raw))
    }
}

impl Renderer for MockRenderer {
    fn render(&mut self, script: &str) -> Result<String, RenderError> {
        self.scripts.push(script.to_string());
        self.replies.pop_front().unwrap_or_else(|| Ok(String::new()))
    }

    fn clear(&mut self) -> Result<(), RenderError> {
        self.clears += 1;
        self.clear_error.take().map_or(Ok(()), Err)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Script
// ─────────────────────────────────────────────────────────────────────────────

/// One widget line of a layout script
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetLine {
    /// Wire kind, e.g. `"button"` or `"range"`
    pub kind: String,
    /// Widget id
    pub id: String,
    /// X coordinate as written (`"step"` or a number)
    pub x: String,
    /// Y coordinate as written
    pub y: String,
    /// Width as written
    pub width: String,
    /// Height as written
    pub height: String,
    /// Kind-specific fields between the size and the value
    pub extra: Vec<String>,
    /// The value, newlines included
    pub value: String,
    /// Whether the line was wrapped in `[ ]`
    pub bracketed: bool,
    /// Font size in effect when the line was read
    pub font_size: Option<u32>,
    /// Justification in effect when the line was read
    pub justify: Option<Justification>,
}

impl WidgetLine {
    /// X as pixels, `None` for `step`
    pub fn x_pixels(&self) -> Option<f64> {
        self.x.parse().ok()
    }

    /// Y as pixels, `None` for `step`
    pub fn y_pixels(&self) -> Option<f64> {
        self.y.parse().ok()
    }

    /// `(width, height)` as numbers
    pub fn size(&self) -> Option<(f64, f64)> {
        Some((self.width.parse().ok()?, self.height.parse().ok()?))
    }
}

/// A line of a layout script
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptLine {
    /// `@fontsize`, `@justify` or `@timeout`
    Directive(Directive),
    /// A widget line or bracketed block
    Widget(WidgetLine),
    /// Anything the parser did not recognise
    Unknown(String),
}

/// Parsed layout script
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    lines: Vec<ScriptLine>,
}

impl Script {
    /// Parse a script as produced by `carta`.
    ///
    /// Tracks the ambient font size and justification so each widget line
    /// records what the renderer would apply to it.
    pub fn parse(script: &str) -> Self {
        let mut lines = Vec::new();
        let mut font_size = None;
        let mut justify = None;
        let raw: Vec<&str> = script.split('\n').collect();
        let mut index = 0;

        while let Some(&line) = raw.get(index) {
            let start = index;
            index += 1;
            if line.is_empty() {
                continue;
            }
            if let Some(directive) = parse_directive(line) {
                match directive {
                    Directive::FontSize(size) => font_size = Some(size),
                    Directive::Justify(mode) => justify = Some(mode),
                    Directive::Timeout(_) => {}
                }
                lines.push(ScriptLine::Directive(directive));
                continue;
            }

            let (body, bracketed) = if line.starts_with('[') {
                let end = block_end(&raw, start);
                index = end + 1;
                let block = raw
                    .get(start..=end)
                    .map(|block| block.join("\n"))
                    .unwrap_or_default();
                let inner = block.strip_prefix('[').unwrap_or(&block);
                let inner = inner.strip_suffix(']').unwrap_or(inner);
                (inner.to_string(), true)
            } else {
                (line.to_string(), false)
            };

            lines.push(match parse_widget(&body, bracketed, font_size, justify) {
                Some(widget) => ScriptLine::Widget(widget),
                None => ScriptLine::Unknown(line.to_string()),
            });
        }

        Self { lines }
    }

    /// Every parsed line, in order.
    pub fn lines(&self) -> &[ScriptLine] {
        &self.lines
    }

    /// Widget lines, in paint order.
    pub fn widgets(&self) -> impl Iterator<Item = &WidgetLine> {
        self.lines.iter().filter_map(|line| match line {
            ScriptLine::Widget(widget) => Some(widget),
            _ => None,
        })
    }

    /// Directives, in order.
    pub fn directives(&self) -> impl Iterator<Item = &Directive> {
        self.lines.iter().filter_map(|line| match line {
            ScriptLine::Directive(directive) => Some(directive),
            _ => None,
        })
    }

    /// Total number of widget lines.
    pub fn widget_count(&self) -> usize {
        self.widgets().count()
    }

    /// Find a widget line by id.
    pub fn query_by_id(&self, id: &str) -> Option<&WidgetLine> {
        self.widgets().find(|widget| widget.id == id)
    }

    /// Assert that a widget with `id` was sent.
    pub fn assert_has_widget(&self, id: &str) -> Result<(), String> {
        self.query_by_id(id)
            .ok_or_else(|| format!("Widget '{id}' not found in script"))
            .map(|_| ())
    }

    /// Assert that `directive` appears somewhere in the script.
    pub fn assert_directive(&self, directive: Directive) -> Result<(), String> {
        if self.directives().any(|d| *d == directive) {
            Ok(())
        } else {
            Err(format!("Directive '{directive}' not found in script"))
        }
    }

    /// Assert that nothing in the script failed to parse.
    pub fn assert_well_formed(&self) -> Result<(), String> {
        match self.lines.iter().find_map(|line| match line {
            ScriptLine::Unknown(raw) => Some(raw),
            _ => None,
        }) {
            Some(raw) => Err(format!("Unrecognised script line '{raw}'")),
            None => Ok(()),
        }
    }
}

/// Index of the last line of the bracketed block opened at `start`.
///
/// A value line may itself end in `]`, so the block runs to the last
/// `]`-terminated line before the next directive or widget line.
fn block_end(raw: &[&str], start: usize) -> usize {
    let mut closing = None;
    let mut last = start;
    for (index, line) in raw.iter().enumerate().skip(start) {
        if index > start && starts_item(line) {
            break;
        }
        last = index;
        if line.ends_with(']') {
            closing = Some(index);
        }
    }
    closing.unwrap_or(last)
}

fn starts_item(line: &str) -> bool {
    line.starts_with('[')
        || parse_directive(line).is_some()
        || parse_widget(line, false, None, None).is_some()
}

fn parse_directive(line: &str) -> Option<Directive> {
    let (name, argument) = line.strip_prefix('@')?.split_once(' ')?;
    match name {
        "fontsize" => argument.parse().ok().map(Directive::FontSize),
        "justify" => argument.parse().ok().map(Directive::Justify),
        "timeout" => argument.parse().ok().map(Directive::Timeout),
        _ => None,
    }
}

fn parse_widget(
    body: &str,
    bracketed: bool,
    font_size: Option<u32>,
    justify: Option<Justification>,
) -> Option<WidgetLine> {
    let (kind, rest) = body.split_once(':')?;
    let extra_fields = match kind {
        "range" | "canvas" => 2,
        "button" | "label" | "paragraph" | "image" => 0,
        _ => return None,
    };

    // id, x, y, width, height, then the kind-specific fields; the value is
    // whatever remains and may itself contain spaces.
    let mut fields = rest.splitn(6 + extra_fields, ' ');
    let id = fields.next()?.to_string();
    let x = fields.next()?.to_string();
    let y = fields.next()?.to_string();
    let width = fields.next()?.to_string();
    let height = fields.next()?.to_string();
    let extra = fields
        .by_ref()
        .take(extra_fields)
        .map(str::to_string)
        .collect::<Vec<_>>();
    if extra.len() != extra_fields {
        return None;
    }
    let value = fields.next().unwrap_or_default().to_string();

    Some(WidgetLine {
        kind: kind.to_string(),
        id,
        x,
        y,
        width,
        height,
        extra,
        value,
        bracketed,
        font_size,
        justify,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
