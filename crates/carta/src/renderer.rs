//! Renderer process transport
//!
//! The session only needs "write this script to the renderer, give me its
//! stdout". [`Renderer`] is that capability; [`ProcessRenderer`] implements
//! it by launching the `simple` binary, locally or over `ssh`.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::{CLEAR_BINARY, DEFAULT_RENDERER, FRAMEBUFFER_SHIM, REMOTE_USER};
use crate::error::RenderError;

/// Capability: run one render round-trip
pub trait Renderer {
    /// Send `script` to the renderer and return everything it wrote to stdout
    fn render(&mut self, script: &str) -> Result<String, RenderError>;

    /// Blank the physical display
    fn clear(&mut self) -> Result<(), RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, script: &str) -> Result<String, RenderError> {
        (**self).render(script)
    }

    fn clear(&mut self) -> Result<(), RenderError> {
        (**self).clear()
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, script: &str) -> Result<String, RenderError> {
        (**self).render(script)
    }

    fn clear(&mut self) -> Result<(), RenderError> {
        (**self).clear()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RendererCommand
// ─────────────────────────────────────────────────────────────────────────────

/// How to launch the renderer
///
/// ```
/// use carta::renderer::RendererCommand;
///
/// let command = RendererCommand::default()
///     .remote("10.11.99.1")
///     .directory("/home/root")
///     .framebuffer_shim(true);
/// assert_eq!(
///     command.argv(),
///     ["ssh", "root@10.11.99.1", "cd /home/root && rm2fb-client /opt/bin/simple"]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererCommand {
    binary: PathBuf,
    clear_binary: PathBuf,
    framebuffer_shim: bool,
    directory: Option<PathBuf>,
    remote: Option<String>,
}

impl Default for RendererCommand {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_RENDERER),
            clear_binary: PathBuf::from(CLEAR_BINARY),
            framebuffer_shim: false,
            directory: None,
            remote: None,
        }
    }
}

impl RendererCommand {
    /// Launch the renderer at `binary`
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            ..Self::default()
        }
    }

    /// Replace the binary used by [`Renderer::clear`]
    pub fn clear_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.clear_binary = binary.into();
        self
    }

    /// Prefix the binary with the `rm2fb-client` shim
    pub fn framebuffer_shim(mut self, enabled: bool) -> Self {
        self.framebuffer_shim = enabled;
        self
    }

    /// Run from `directory` (relative canvas paths land there)
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Run on `host` over `ssh` as root
    pub fn remote(mut self, host: impl Into<String>) -> Self {
        self.remote = Some(host.into());
        self
    }

    /// Renderer binary
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Whether the command runs on another machine
    pub fn is_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Argument vector of the render command
    pub fn argv(&self) -> Vec<String> {
        self.argv_for(&self.binary)
    }

    /// Argument vector of the clear command
    pub fn clear_argv(&self) -> Vec<String> {
        self.argv_for(&self.clear_binary)
    }

    fn argv_for(&self, binary: &Path) -> Vec<String> {
        let mut program = Vec::with_capacity(2);
        if self.framebuffer_shim {
            program.push(FRAMEBUFFER_SHIM.to_string());
        }
        program.push(binary.display().to_string());

        match &self.remote {
            Some(host) => {
                let mut remote_command = program.join(" ");
                if let Some(directory) = &self.directory {
                    remote_command = format!("cd {} && {remote_command}", directory.display());
                }
                vec![
                    "ssh".to_string(),
                    format!("{REMOTE_USER}@{host}"),
                    remote_command,
                ]
            }
            None => program,
        }
    }

    /// Program name and ready-to-spawn command for `binary`
    fn command(&self, binary: &Path) -> (String, Command) {
        let argv = self.argv_for(binary);
        tracing::debug!(argv = %argv.join(" "), "launching renderer");

        let mut parts = argv.into_iter();
        let program = parts.next().unwrap_or_default();
        let mut command = Command::new(&program);
        command.args(parts);
        if !self.is_remote() {
            if let Some(directory) = &self.directory {
                command.current_dir(directory);
            }
        }
        (program, command)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ProcessRenderer
// ─────────────────────────────────────────────────────────────────────────────

/// Renderer backed by a child process per round-trip
#[derive(Debug, Clone)]
pub struct ProcessRenderer {
    command: RendererCommand,
}

impl ProcessRenderer {
    /// Wrap `command`, checking that a local binary exists
    pub fn new(command: RendererCommand) -> Result<Self, RenderError> {
        if !command.is_remote() && !command.binary().exists() {
            return Err(RenderError::BinaryNotFound(command.binary().to_path_buf()));
        }
        Ok(Self { command })
    }

    /// Launch configuration
    pub fn command(&self) -> &RendererCommand {
        &self.command
    }
}

impl Renderer for ProcessRenderer {
    fn render(&mut self, script: &str) -> Result<String, RenderError> {
        let (program, mut command) = self.command.command(&self.command.binary);
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RenderError::Spawn {
                program: program.clone(),
                source,
            })?;

        // The script is written from its own thread while this one drains
        // stdout, so neither side blocks on a full pipe. Dropping stdin closes
        // the pipe and the renderer sees EOF. A renderer that exits early is
        // reported through its exit status instead.
        let stdin = child.stdin.take();
        let (output, written) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => match stdin.write_all(script.as_bytes()) {
                    Err(err) if err.kind() != ErrorKind::BrokenPipe => Err(err),
                    _ => Ok(()),
                },
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            (output, written)
        });
        let output = output?;
        written?;

        if !output.status.success() {
            return Err(RenderError::ExitStatus {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout)?;
        tracing::debug!(%program, stdout = %stdout.trim(), "renderer finished");
        Ok(stdout)
    }

    fn clear(&mut self) -> Result<(), RenderError> {
        let (program, mut command) = self.command.command(&self.command.clear_binary);
        let output = command
            .stdin(Stdio::null())
            .output()
            .map_err(|source| RenderError::Spawn { program, source })?;
        if output.status.success() {
            Ok(())
        } else {
            Err(RenderError::ExitStatus {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_argv() {
        assert_eq!(RendererCommand::default().argv(), ["/opt/bin/simple"]);
        assert_eq!(RendererCommand::default().clear_argv(), ["/opt/bin/eclear"]);
    }

    #[test]
    fn test_shim_prefix() {
        let command = RendererCommand::new("/usr/bin/simple").framebuffer_shim(true);
        assert_eq!(command.argv(), ["rm2fb-client", "/usr/bin/simple"]);
        assert_eq!(command.clear_argv(), ["rm2fb-client", "/opt/bin/eclear"]);
    }

    #[test]
    fn test_local_directory_is_not_in_argv() {
        let command = RendererCommand::default().directory("/tmp");
        assert_eq!(command.argv(), ["/opt/bin/simple"]);
    }

    #[test]
    fn test_remote_argv() {
        let command = RendererCommand::default().remote("remarkable");
        assert_eq!(command.argv(), ["ssh", "root@remarkable", "/opt/bin/simple"]);
        assert!(command.is_remote());
    }

    #[test]
    fn test_remote_clear_with_directory() {
        let command = RendererCommand::default()
            .remote("10.11.99.1")
            .directory("/home/root");
        assert_eq!(
            command.clear_argv(),
            ["ssh", "root@10.11.99.1", "cd /home/root && /opt/bin/eclear"]
        );
    }

    #[test]
    fn test_missing_local_binary() {
        let result = ProcessRenderer::new(RendererCommand::new("/definitely/not/simple"));
        assert!(matches!(result, Err(RenderError::BinaryNotFound(_))));
    }

    #[test]
    fn test_remote_skips_binary_check() {
        let command = RendererCommand::new("/definitely/not/simple").remote("host");
        assert!(ProcessRenderer::new(command).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_round_trip_through_cat() {
        let mut renderer = ProcessRenderer::new(RendererCommand::new("/bin/cat")).unwrap();
        let reply = renderer.render("INFO: ok").unwrap();
        assert_eq!(reply, "INFO: ok");
    }

    #[cfg(unix)]
    #[test]
    fn test_large_script_through_cat() {
        // Larger than any pipe buffer in both directions.
        let script = "label:x step step 10 10 value\n".repeat(40_000);
        let mut renderer = ProcessRenderer::new(RendererCommand::new("/bin/cat")).unwrap();
        let reply = renderer.render(&script).unwrap();
        assert_eq!(reply.len(), script.len());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit() {
        let mut renderer = ProcessRenderer::new(RendererCommand::new("/bin/false")).unwrap();
        assert!(matches!(
            renderer.render(""),
            Err(RenderError::ExitStatus { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_clear_failure_reported() {
        let command = RendererCommand::new("/bin/cat").clear_binary("/bin/false");
        let mut renderer = ProcessRenderer::new(command).unwrap();
        assert!(renderer.clear().is_err());
    }
}
