//! End-to-end screen tests against the scripted renderer

// Integration test file: panics on failure are intentional.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]

use carta::{
    DuplicateIdError, Justification, Position, RenderError, RenderEvent, ScreenSpec, Session,
    Widget,
};
use carta_testing::{MockRenderer, Script, StaticProbe};

fn session(mock: MockRenderer) -> Session<MockRenderer, StaticProbe> {
    Session::new(mock, StaticProbe::new())
}

#[test]
fn empty_screen_never_launches_renderer() {
    let mut s = session(MockRenderer::new().reply("INFO: should_not_be_read"));
    assert_eq!(s.display().unwrap(), RenderEvent::Empty);
    assert_eq!(s.renderer().launch_count(), 0);
}

#[test]
fn duplicate_id_leaves_screen_unchanged() {
    let mut s = session(MockRenderer::new());
    s.add([Widget::button("a", "first").build().unwrap()]).unwrap();

    let err = s
        .add([Widget::text("a", "second").build().unwrap()])
        .unwrap_err();
    assert_eq!(err, DuplicateIdError("a".into()));
    assert_eq!(s.len(), 1);
    assert_eq!(s.lookup("a").unwrap().value(), "first");
}

#[test]
fn slider_bounds_precede_value() {
    let mut s = session(MockRenderer::new());
    s.add([Widget::slider("level", 1, 10, 6).build().unwrap()])
        .unwrap();
    let script = s.compile().unwrap().unwrap();
    assert!(script.ends_with(" 1 10 6"));

    let parsed = Script::parse(&script);
    let level = parsed.query_by_id("level").unwrap();
    assert_eq!(level.extra, ["1", "10"]);
    assert_eq!(level.value, "6");
}

#[test]
fn half_percent_centres_on_canvas() {
    let mut s = session(MockRenderer::new());
    s.add([Widget::button("ok", "OK")
        .size(200.0, 50.0)
        .at(Position::Percent(50.0), Position::Percent(50.0))
        .build()
        .unwrap()])
        .unwrap();
    s.display().unwrap();

    let script = s.renderer().last_script().unwrap();
    let ok = script.query_by_id("ok").unwrap();
    assert_eq!(ok.x_pixels(), Some(590.0));
    assert_eq!(ok.y_pixels(), Some(885.0));
    assert_eq!(ok.size(), Some((200.0, 50.0)));
}

#[test]
fn multiline_values_get_one_bracket_pair() {
    let value = (0..12).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
    let mut s = session(MockRenderer::new());
    s.add([
        Widget::text("notes", &value).build().unwrap(),
        Widget::button("next", "Next").build().unwrap(),
    ])
    .unwrap();

    let script = s.compile().unwrap().unwrap();
    assert_eq!(script.matches('[').count(), 1);
    assert_eq!(script.matches(']').count(), 1);

    let parsed = Script::parse(&script);
    parsed.assert_well_formed().unwrap();
    let notes = parsed.query_by_id("notes").unwrap();
    assert!(notes.bracketed);
    assert_eq!(notes.value, value);
    assert!(!parsed.query_by_id("next").unwrap().bracketed);
}

#[test]
fn overrides_apply_per_widget() {
    let mut s = session(MockRenderer::new());
    s.set_justify(Justification::Left);
    s.add([
        Widget::text("a", "default").build().unwrap(),
        Widget::text("b", "big").font_size(64).build().unwrap(),
        Widget::text("c", "right").justify(Justification::Right).build().unwrap(),
    ])
    .unwrap();

    let script = Script::parse(&s.compile().unwrap().unwrap());
    let a = script.query_by_id("a").unwrap();
    let b = script.query_by_id("b").unwrap();
    let c = script.query_by_id("c").unwrap();
    assert_eq!((a.font_size, a.justify), (Some(32), Some(Justification::Left)));
    assert_eq!((b.font_size, b.justify), (Some(64), Some(Justification::Left)));
    assert_eq!((c.font_size, c.justify), (Some(32), Some(Justification::Right)));
    assert_eq!(script.directives().count(), 5);
}

#[test]
fn repeated_display_is_stable() {
    let mut s = session(MockRenderer::new().reply("INFO: a").reply("INFO: a"));
    s.add([Widget::text("a", "hello")
        .at(Position::Percent(25.0), Position::Step)
        .build()
        .unwrap()])
        .unwrap();

    s.display().unwrap();
    s.display().unwrap();
    let scripts = s.renderer().scripts();
    assert_eq!(scripts.len(), 2);
    assert_eq!(scripts[0], scripts[1]);
    assert_eq!(s.lookup("a").unwrap().x(), Position::Percent(25.0));
}

#[test]
fn probed_image_is_centred() {
    let image = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    let probe = StaticProbe::new().with(image.path(), 300, 100);
    let mut s = Session::new(MockRenderer::new(), probe);
    s.add([Widget::image("logo", image.path())
        .at(Position::Percent(50.0), Position::Pixels(0))
        .build()
        .unwrap()])
        .unwrap();

    let script = Script::parse(&s.compile().unwrap().unwrap());
    let logo = script.query_by_id("logo").unwrap();
    assert_eq!(logo.x_pixels(), Some(540.0));
    assert_eq!(logo.size(), Some((300.0, 100.0)));
    assert_eq!(logo.value, image.path().display().to_string());
}

#[test]
fn renderer_failure_surfaces() {
    let mut s = session(MockRenderer::new().fail_with(RenderError::MalformedResponse(
        "renderer crashed".into(),
    )));
    s.add([Widget::button("a", "A").build().unwrap()]).unwrap();
    assert!(s.display().is_err());
    assert_eq!(s.renderer().launch_count(), 1);
}

#[test]
fn malformed_reply_is_an_error() {
    let mut s = session(MockRenderer::new().reply("no separator here"));
    s.add([Widget::button("a", "A").build().unwrap()]).unwrap();
    assert!(matches!(
        s.display(),
        Err(RenderError::MalformedResponse(_))
    ));
}

#[test]
fn eclear_is_best_effort() {
    let mut s = session(
        MockRenderer::new().fail_clear(RenderError::MalformedResponse("no eclear".into())),
    );
    assert!(!s.eclear());
    assert!(s.eclear());
    assert_eq!(s.renderer().clear_count(), 2);
}

#[test]
fn json_screen_matches_builder_screen() {
    let screen = ScreenSpec::from_json_str(
        r#"{
            "fontsize": 28,
            "timeout": 15,
            "widgets": [
                {"id": "heading", "type": "label", "value": "Pick one", "x": "50%", "y": 80},
                {"id": "level", "type": "slider", "low": 0, "high": 5, "value": 2, "x": "50%"},
                {"id": "go", "type": "button", "value": "Go", "justify": "right"}
            ]
        }"#,
    )
    .unwrap();
    let mut from_json = session(MockRenderer::new());
    from_json.apply(screen).unwrap();

    let mut from_builder = session(MockRenderer::new());
    from_builder.set_font_size(28);
    from_builder.set_timeout(Some(15));
    from_builder
        .add([
            Widget::text("heading", "Pick one")
                .at(Position::Percent(50.0), 80)
                .build()
                .unwrap(),
            Widget::slider("level", 0, 5, 2)
                .at(Position::Percent(50.0), Position::Step)
                .build()
                .unwrap(),
            Widget::button("go", "Go")
                .justify(Justification::Right)
                .build()
                .unwrap(),
        ])
        .unwrap();

    assert_eq!(from_json.compile().unwrap(), from_builder.compile().unwrap());
}
