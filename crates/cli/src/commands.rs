use std::path::Path;

use anyhow::{Context, Result};
use carta::{
    CommandProbe, Model, ProcessRenderer, RenderError, RenderEvent, Renderer, RendererCommand,
    ScreenSpec, Session,
};
use colored::Colorize;

use crate::Target;

/// Stands in for the renderer when only the script is wanted
struct DryRun;

impl Renderer for DryRun {
    fn render(&mut self, _script: &str) -> Result<String, RenderError> {
        Ok(String::new())
    }

    fn clear(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

pub fn display(target: &Target, screen: &Path, json: bool) -> Result<()> {
    let spec = load(screen)?;
    let renderer = ProcessRenderer::new(renderer_command(target, Model::detect))
        .context("Failed to set up renderer")?;

    let mut session = Session::new(renderer, CommandProbe);
    session.apply(spec).context("Invalid screen")?;
    let event = session.display().context("Display failed")?;

    if json {
        println!("{}", serde_json::to_string(&event)?);
    } else if let Some(line) = format_event(&event) {
        println!("{line}");
    } else {
        eprintln!("{}", "nothing selected".yellow());
    }
    Ok(())
}

pub fn compile(screen: &Path) -> Result<()> {
    let spec = load(screen)?;
    let mut session = Session::new(DryRun, CommandProbe);
    session.apply(spec).context("Invalid screen")?;

    match session.compile().context("Failed to compile screen")? {
        Some(script) => println!("{script}"),
        None => eprintln!("{}", "screen has no widgets".yellow()),
    }
    Ok(())
}

pub fn clear(target: &Target) -> Result<()> {
    let renderer = ProcessRenderer::new(renderer_command(target, Model::detect))
        .context("Failed to set up renderer")?;
    let mut session = Session::new(renderer, CommandProbe);

    if session.eclear() {
        eprintln!("{}", "✓ Display cleared".green());
        Ok(())
    } else {
        anyhow::bail!("Failed to clear display")
    }
}

fn load(screen: &Path) -> Result<ScreenSpec> {
    ScreenSpec::from_path(screen)
        .with_context(|| format!("Failed to load screen {}", screen.display()))
}

/// Build the launch command, detecting the shim only for local runs
fn renderer_command(target: &Target, detect: impl FnOnce() -> Model) -> RendererCommand {
    let mut command = match &target.simple {
        Some(path) => RendererCommand::new(path),
        None => RendererCommand::default(),
    };

    let shim = if target.rm2fb {
        true
    } else if target.no_rm2fb || target.remote.is_some() {
        false
    } else {
        let model = detect();
        tracing::debug!(%model, "detected device");
        model.needs_framebuffer_shim()
    };
    command = command.framebuffer_shim(shim);

    if let Some(directory) = &target.directory {
        command = command.directory(directory);
    }
    if let Some(host) = &target.remote {
        command = command.remote(host);
    }
    command
}

/// `id` for a press, `id = value` for a value, nothing when empty
fn format_event(event: &RenderEvent) -> Option<String> {
    match event {
        RenderEvent::Empty => None,
        RenderEvent::Pressed { id } => Some(id.clone()),
        RenderEvent::Value { id, value } => Some(format!("{id} = {value}")),
    }
}
