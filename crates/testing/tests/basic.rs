#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use carta::{Directive, RenderEvent, Session, Widget};
use carta_testing::{MockRenderer, Script, StaticProbe};

#[test]
fn test_mock_starts_empty() {
    let mock = MockRenderer::new();
    assert_eq!(mock.launch_count(), 0);
    assert!(mock.last_script().is_none());
}

#[test]
fn test_empty_script() {
    let script = Script::parse("");
    assert_eq!(script.widget_count(), 0);
    assert!(script.query_by_id("anything").is_none());
}

#[test]
fn test_session_round_trip() {
    let mut session = Session::new(
        MockRenderer::new().reply("INFO: volume: 7"),
        StaticProbe::new(),
    );
    session
        .add([
            Widget::text("title", "Volume").build().unwrap(),
            Widget::slider("volume", 0, 10, 3).build().unwrap(),
        ])
        .unwrap();

    let event = session.display().unwrap();
    assert_eq!(
        event,
        RenderEvent::Value {
            id: "volume".into(),
            value: "7".into()
        }
    );

    let script = session.renderer().last_script().unwrap();
    script.assert_well_formed().unwrap();
    script.assert_directive(Directive::FontSize(32)).unwrap();
    assert_eq!(script.query_by_id("volume").unwrap().kind, "range");
    assert_eq!(session.renderer().launch_count(), 1);
}

#[test]
fn test_value_line_ending_in_bracket() {
    let mut session = Session::new(MockRenderer::new(), StaticProbe::new());
    session
        .add([
            Widget::text("p", "done]\nnext line").build().unwrap(),
            Widget::button("ok", "OK").build().unwrap(),
        ])
        .unwrap();
    session.display().unwrap();

    let script = session.renderer().last_script().unwrap();
    script.assert_well_formed().unwrap();
    let p = script.query_by_id("p").unwrap();
    assert!(p.bracketed);
    assert_eq!(p.value, "done]\nnext line");
    assert_eq!(script.widget_count(), 2);
}
