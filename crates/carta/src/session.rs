//! Screen session
//!
//! A [`Session`] owns the widgets on screen, in paint order, together with
//! the defaults they inherit. [`Session::display`] runs one full cycle:
//! resolve every widget's geometry, compile the script, hand it to the
//! renderer and decode which widget the user triggered.

use std::collections::HashSet;

use carta_specs::devices::REMARKABLE_CANVAS;
use carta_specs::DisplaySpec;

use crate::config::SessionDefaults;
use crate::error::{DuplicateIdError, Error, RenderError};
use crate::geometry::Resolver;
use crate::layout::ScriptBuilder;
use crate::probe::ImageProbe;
use crate::protocol::{decode_response, RenderEvent};
use crate::renderer::Renderer;
use crate::screen::ScreenSpec;
use crate::widget::{Justification, Widget};

/// Ordered widgets plus rendering defaults, bound to one renderer
#[derive(Debug)]
pub struct Session<R, P> {
    renderer: R,
    probe: P,
    canvas: &'static DisplaySpec,
    defaults: SessionDefaults,
    widgets: Vec<Widget>,
}

impl<R: Renderer, P: ImageProbe> Session<R, P> {
    /// Empty session on the reMarkable canvas
    pub fn new(renderer: R, probe: P) -> Self {
        Self {
            renderer,
            probe,
            canvas: &REMARKABLE_CANVAS,
            defaults: SessionDefaults::DEFAULT,
            widgets: Vec::new(),
        }
    }

    /// Resolve percentages against `canvas` instead
    pub fn with_canvas(mut self, canvas: &'static DisplaySpec) -> Self {
        self.canvas = canvas;
        self
    }

    /// Start from `defaults` instead of the built-in ones
    pub fn with_defaults(mut self, defaults: SessionDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    // ── Widgets ──────────────────────────────────────────────────────────────

    /// Append widgets in order
    ///
    /// Fails without changing the screen if any id is already present or
    /// appears twice in `widgets`.
    pub fn add(&mut self, widgets: impl IntoIterator<Item = Widget>) -> Result<(), DuplicateIdError> {
        let batch: Vec<Widget> = widgets.into_iter().collect();
        check_unique(&self.widgets, &batch)?;
        tracing::debug!(count = batch.len(), "adding widgets");
        self.widgets.extend(batch);
        Ok(())
    }

    /// Remove every widget with `id`, returning how many were removed
    pub fn remove(&mut self, id: &str) -> usize {
        let before = self.widgets.len();
        self.widgets.retain(|widget| widget.id() != id);
        before - self.widgets.len()
    }

    /// Remove the first widget equal to `widget`
    pub fn remove_widget(&mut self, widget: &Widget) -> bool {
        match self.widgets.iter().position(|w| w == widget) {
            Some(index) => {
                self.widgets.remove(index);
                true
            }
            None => false,
        }
    }

    /// Widget with `id`, if present
    pub fn lookup(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|widget| widget.id() == id)
    }

    /// Widgets in paint order
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Number of widgets on screen
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the screen is empty
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Drop every widget and restore the built-in defaults
    pub fn reset(&mut self) {
        self.widgets.clear();
        self.defaults = SessionDefaults::DEFAULT;
    }

    /// Replace defaults and widgets with a screen description
    ///
    /// Nothing changes unless every widget validates and ids are unique.
    pub fn apply(&mut self, screen: ScreenSpec) -> Result<(), Error> {
        let widgets = screen.build_widgets()?;
        check_unique(&[], &widgets)?;
        self.defaults = screen.defaults;
        self.widgets = widgets;
        Ok(())
    }

    // ── Defaults ─────────────────────────────────────────────────────────────

    /// Current defaults
    pub fn defaults(&self) -> &SessionDefaults {
        &self.defaults
    }

    /// Set the default font size
    pub fn set_font_size(&mut self, font_size: u32) {
        self.defaults.font_size = font_size;
    }

    /// Set the default justification
    pub fn set_justify(&mut self, justify: Justification) {
        self.defaults.justify = justify;
    }

    /// Set or clear the input timeout in seconds (`Some(0)` also clears it)
    pub fn set_timeout(&mut self, timeout: Option<u32>) {
        self.defaults.timeout = timeout;
    }

    /// Canvas percentages resolve against
    pub fn canvas(&self) -> &'static DisplaySpec {
        self.canvas
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    /// The script [`display`](Self::display) would send, or `None` when the
    /// screen is empty
    pub fn compile(&self) -> Result<Option<String>, RenderError> {
        if self.widgets.is_empty() {
            return Ok(None);
        }

        let resolver = Resolver::new(self.canvas, &self.probe);
        let mut builder = ScriptBuilder::new(&self.defaults);
        for widget in &self.widgets {
            let geometry = resolver.resolve(widget, self.defaults.font_size)?;
            builder.push(widget, &geometry);
        }
        let script = builder.finish();
        tracing::debug!(widgets = self.widgets.len(), %script, "compiled screen");
        Ok(Some(script))
    }

    /// Show the screen and wait for the user
    ///
    /// An empty screen returns [`RenderEvent::Empty`] without launching the
    /// renderer.
    pub fn display(&mut self) -> Result<RenderEvent, RenderError> {
        let Some(script) = self.compile()? else {
            tracing::debug!("nothing to display");
            return Ok(RenderEvent::Empty);
        };

        let stdout = self.renderer.render(&script)?;
        let event = decode_response(&stdout)?;
        tracing::info!(id = event.id(), value = event.value(), "display finished");
        Ok(event)
    }

    /// Blank the display, returning whether it worked
    pub fn eclear(&mut self) -> bool {
        match self.renderer.clear() {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "failed to clear display");
                false
            }
        }
    }

    // ── Parts ────────────────────────────────────────────────────────────────

    /// The renderer
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The image probe
    pub fn probe(&self) -> &P {
        &self.probe
    }
}

fn check_unique(existing: &[Widget], batch: &[Widget]) -> Result<(), DuplicateIdError> {
    let mut seen: HashSet<&str> = existing.iter().map(Widget::id).collect();
    for widget in batch {
        if !seen.insert(widget.id()) {
            return Err(DuplicateIdError(widget.id().to_string()));
        }
    }
    Ok(())
}
