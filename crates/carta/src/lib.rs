//! Widget layouts for the reMarkable `simple` renderer
//!
//! Builds declarative screens (buttons, labels, paragraphs, sliders, images
//! and canvases), compiles them into the renderer's line-oriented layout
//! script, and decodes the renderer's one-line reply into a [`RenderEvent`].
//!
//! # Pipeline
//!
//! 1. [`WidgetSpec`] → [`Widget`]: validation and id normalization
//! 2. [`Resolver`]: percentages and size estimates become pixels
//! 3. [`ScriptBuilder`]: directives and widget lines
//! 4. [`Renderer`]: one blocking round-trip to the renderer process
//! 5. [`decode_response`]: `INFO: slider1: 7` → `RenderEvent::Value`
//!
//! # Example
//!
//! ```no_run
//! use carta::{CommandProbe, Position, ProcessRenderer, RendererCommand, Session, Widget};
//!
//! # fn main() -> Result<(), carta::Error> {
//! let renderer = ProcessRenderer::new(RendererCommand::default())?;
//! let mut session = Session::new(renderer, CommandProbe);
//!
//! session.add([
//!     Widget::text("title", "Volume")
//!         .at(Position::Percent(50.0), Position::Pixels(200))
//!         .build()?,
//!     Widget::slider("volume", 0, 10, 4)
//!         .at(Position::Percent(50.0), Position::Step)
//!         .build()?,
//!     Widget::button("done", "Done").build()?,
//! ])?;
//!
//! let event = session.display()?;
//! if let Some(value) = event.value() {
//!     println!("volume set to {value}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Without a device, [`Session::compile`] returns the script that would be
//! sent.

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]

pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod probe;
pub mod protocol;
pub mod renderer;
pub mod screen;
pub mod session;
pub mod widget;

pub use carta_specs::{devices, DisplaySpec, Model};
pub use config::SessionDefaults;
pub use error::{DuplicateIdError, Error, ProbeError, RenderError, Result, ValidationError};
pub use geometry::{Coordinate, Geometry, Resolver};
pub use layout::{compile_widget, Ambient, ScriptBuilder};
pub use probe::{CommandProbe, ImageProbe, NoProbe, StaticProbe};
pub use protocol::{decode_output, decode_response, Directive, RenderEvent};
pub use renderer::{ProcessRenderer, Renderer, RendererCommand};
pub use screen::ScreenSpec;
pub use session::Session;
pub use widget::{Justification, KindTag, Position, Widget, WidgetKind, WidgetSpec};
