//! Renderer wire protocol
//!
//! Requests are line-oriented UTF-8 scripts: `@`-directives that change the
//! renderer's state, followed by one line (or one `[ ... ]` block) per
//! widget. The reply is at most one line, `<prefix>: <id>[: <value>]`.

use std::fmt;

use serde::Serialize;

use crate::error::RenderError;
use crate::widget::Justification;

/// Separator between reply segments
pub const REPLY_SEPARATOR: &str = ": ";

/// State-changing script line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `@fontsize <n>`
    FontSize(u32),
    /// `@justify <mode>`
    Justify(Justification),
    /// `@timeout <seconds>`
    Timeout(u32),
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontSize(size) => write!(f, "@fontsize {size}"),
            Self::Justify(mode) => write!(f, "@justify {mode}"),
            Self::Timeout(seconds) => write!(f, "@timeout {seconds}"),
        }
    }
}

/// Outcome of one display cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum RenderEvent {
    /// Nothing was shown, or the renderer reported nothing
    Empty,
    /// A widget was activated without a value (a button press)
    Pressed {
        /// Widget id
        id: String,
    },
    /// A widget reported a value
    Value {
        /// Widget id
        id: String,
        /// Reported value
        value: String,
    },
}

impl RenderEvent {
    /// Id of the triggering widget
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Pressed { id } | Self::Value { id, .. } => Some(id),
        }
    }

    /// Reported value, if any
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Value { value, .. } => Some(value),
            Self::Empty | Self::Pressed { .. } => None,
        }
    }

    /// Whether no widget was triggered
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Decode raw renderer stdout
pub fn decode_output(stdout: Vec<u8>) -> Result<RenderEvent, RenderError> {
    let text = String::from_utf8(stdout)?;
    decode_response(&text)
}

/// Decode the renderer's reply
///
/// Only the last non-empty line is considered. Its first segment is an opaque
/// prefix; of the rest, the first is the id and the last the value. Segments
/// in between carry no meaning and are dropped.
///
/// ```
/// use carta::protocol::{decode_response, RenderEvent};
///
/// assert_eq!(
///     decode_response("INFO: slider1: 7").unwrap(),
///     RenderEvent::Value { id: "slider1".into(), value: "7".into() }
/// );
/// assert_eq!(
///     decode_response("INFO: button1\n").unwrap(),
///     RenderEvent::Pressed { id: "button1".into() }
/// );
/// assert_eq!(decode_response("").unwrap(), RenderEvent::Empty);
/// ```
pub fn decode_response(stdout: &str) -> Result<RenderEvent, RenderError> {
    let Some(line) = stdout.lines().rev().map(str::trim).find(|l| !l.is_empty()) else {
        return Ok(RenderEvent::Empty);
    };

    let mut segments = line.split(REPLY_SEPARATOR).skip(1);
    let id = segments
        .next()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| RenderError::MalformedResponse(line.to_string()))?;

    Ok(match segments.last() {
        None => RenderEvent::Pressed { id: id.to_string() },
        Some(value) => RenderEvent::Value {
            id: id.to_string(),
            value: value.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_lines() {
        assert_eq!(Directive::FontSize(32).to_string(), "@fontsize 32");
        assert_eq!(
            Directive::Justify(Justification::Left).to_string(),
            "@justify left"
        );
        assert_eq!(Directive::Timeout(5).to_string(), "@timeout 5");
    }

    #[test]
    fn test_decode_button() {
        assert_eq!(
            decode_response("INFO: button1").unwrap(),
            RenderEvent::Pressed {
                id: "button1".into()
            }
        );
    }

    #[test]
    fn test_decode_value() {
        let event = decode_response("INFO: slider1: 7").unwrap();
        assert_eq!(event.id(), Some("slider1"));
        assert_eq!(event.value(), Some("7"));
    }

    #[test]
    fn test_decode_ignores_middle_segments() {
        assert_eq!(
            decode_response("SELECTED: field: extra: final").unwrap(),
            RenderEvent::Value {
                id: "field".into(),
                value: "final".into()
            }
        );
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_response("").unwrap(), RenderEvent::Empty);
        assert_eq!(decode_response(" \n\n").unwrap(), RenderEvent::Empty);
        assert!(RenderEvent::Empty.is_empty());
    }

    #[test]
    fn test_decode_uses_last_line() {
        let event = decode_response("loading fonts\nINFO: ok\n").unwrap();
        assert_eq!(event, RenderEvent::Pressed { id: "ok".into() });
    }

    #[test]
    fn test_decode_malformed() {
        assert!(matches!(
            decode_response("garbage"),
            Err(RenderError::MalformedResponse(_))
        ));
        assert!(matches!(
            decode_response("INFO: "),
            Err(RenderError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        assert!(matches!(
            decode_output(vec![0xff, 0xfe]),
            Err(RenderError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_event_serializes_tagged() {
        let json = serde_json::to_value(RenderEvent::Value {
            id: "s".into(),
            value: "3".into(),
        })
        .unwrap();
        assert_eq!(json["event"], "value");
        assert_eq!(json["id"], "s");
        assert_eq!(json["value"], "3");
    }
}
