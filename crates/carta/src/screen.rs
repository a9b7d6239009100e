//! Screen descriptions
//!
//! A whole screen as data: session defaults plus an ordered widget list.
//!
//! ```json
//! {
//!   "fontsize": 40,
//!   "justify": "left",
//!   "timeout": 60,
//!   "widgets": [
//!     { "id": "title", "type": "label", "value": "Settings", "x": "50%", "y": 100 },
//!     { "id": "volume", "type": "range", "low": 0, "high": 10, "value": 4 },
//!     { "id": "done", "type": "button", "value": "Done" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::SessionDefaults;
use crate::error::{Error, Result, ValidationError};
use crate::widget::{Widget, WidgetSpec};

/// Declarative screen
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScreenSpec {
    /// Font size, justification and timeout
    #[serde(flatten)]
    pub defaults: SessionDefaults,
    /// Widgets in paint order
    #[serde(default)]
    pub widgets: Vec<WidgetSpec>,
}

impl ScreenSpec {
    /// Parse a JSON screen description
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON screen description
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Validate every widget, stopping at the first failure
    pub fn build_widgets(&self) -> Result<Vec<Widget>, ValidationError> {
        self.widgets.iter().cloned().map(WidgetSpec::build).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{Justification, KindTag, Position};

    #[test]
    fn test_parse_full_screen() {
        let screen = ScreenSpec::from_json_str(
            r#"{
                "fontsize": 40,
                "justify": "left",
                "timeout": 60,
                "widgets": [
                    {"id": "title", "type": "label", "value": "Settings", "x": "50%", "y": 100},
                    {"id": "volume", "type": "range", "low": 0, "high": 10, "value": 4}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(screen.defaults.font_size, 40);
        assert_eq!(screen.defaults.justify, Justification::Left);
        assert_eq!(screen.defaults.timeout, Some(60));
        assert_eq!(screen.widgets.len(), 2);
        assert_eq!(screen.widgets[0].x, Position::Percent(50.0));
        assert_eq!(screen.widgets[1].kind, KindTag::Slider);
    }

    #[test]
    fn test_defaults_when_omitted() {
        let screen = ScreenSpec::from_json_str(r#"{"widgets": []}"#).unwrap();
        assert_eq!(screen.defaults, SessionDefaults::DEFAULT);
        assert!(screen.widgets.is_empty());

        let screen = ScreenSpec::from_json_str("{}").unwrap();
        assert_eq!(screen, ScreenSpec::default());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ScreenSpec::from_json_str("{ not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_unknown_widget_field_rejected() {
        let result =
            ScreenSpec::from_json_str(r#"{"widgets": [{"id": "a", "type": "label", "colour": 1}]}"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screen.json");
        fs::write(&path, r#"{"widgets": [{"id": "ok", "type": "button", "value": "OK"}]}"#)
            .unwrap();

        let screen = ScreenSpec::from_path(&path).unwrap();
        let widgets = screen.build_widgets().unwrap();
        assert_eq!(widgets[0].id(), "ok");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ScreenSpec::from_path(dir.path().join("nope.json")),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn test_build_widgets_reports_first_failure() {
        let screen = ScreenSpec::from_json_str(
            r#"{"widgets": [
                {"id": "ok", "type": "button", "value": "OK"},
                {"id": "  ", "type": "label", "value": "x"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(screen.build_widgets(), Err(ValidationError::EmptyId));
    }
}
