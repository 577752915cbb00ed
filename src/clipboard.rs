/*!
 * Clipboard support for projectmd
 *
 * Copies the document to the system clipboard by piping it into whichever
 * clipboard command the platform provides.
 */

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, trace};

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the command
    #[error("{command} failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// No suitable clipboard mechanism was found
    #[error("No clipboard command found (tried tmux, wl-copy, xsel, xclip, pbcopy, clip.exe, termux-clipboard-set)")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Clipboard commands we know how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardProvider {
    Tmux,
    Wayland,
    Xsel,
    Xclip,
    MacOS,
    Wsl,
    Termux,
}

impl ClipboardProvider {
    /// Program and arguments that read the clipboard text from stdin
    pub fn command(&self) -> (&'static str, &'static [&'static str]) {
        const NO_ARGS: &[&str] = &[];
        const TMUX_ARGS: &[&str] = &["load-buffer", "-w", "-"];
        const XSEL_ARGS: &[&str] = &["-b", "-i"];
        const XCLIP_ARGS: &[&str] = &["-selection", "clipboard", "-in"];

        match self {
            Self::Tmux => ("tmux", TMUX_ARGS),
            Self::Wayland => ("wl-copy", NO_ARGS),
            Self::Xsel => ("xsel", XSEL_ARGS),
            Self::Xclip => ("xclip", XCLIP_ARGS),
            Self::MacOS => ("pbcopy", NO_ARGS),
            Self::Wsl => ("clip.exe", NO_ARGS),
            Self::Termux => ("termux-clipboard-set", NO_ARGS),
        }
    }

    /// Pipe `text` into this provider's command
    pub fn copy(&self, text: &str) -> Result<()> {
        let (program, args) = self.command();
        trace!("Copying {} bytes with {}", text.len(), program);
        pipe_to_command(program, args, text)
    }

    /// Providers usable on this system, most preferred first
    pub fn detect() -> Vec<ClipboardProvider> {
        let candidates: &[ClipboardProvider] = if cfg!(target_os = "macos") {
            &[Self::MacOS]
        } else if cfg!(target_os = "windows") || env::var_os("WSL_DISTRO_NAME").is_some() {
            &[Self::Wsl]
        } else if cfg!(target_os = "android") {
            &[Self::Termux]
        } else {
            &[Self::Wayland, Self::Xsel, Self::Xclip]
        };

        let mut providers = Vec::with_capacity(candidates.len() + 1);
        if env::var_os("TMUX").is_some() && command_exists("tmux") {
            providers.push(Self::Tmux);
        }
        providers.extend(
            candidates
                .iter()
                .copied()
                .filter(|p| command_exists(p.command().0)),
        );
        providers
    }
}

/// Copy text to the clipboard with the first provider that succeeds
pub fn copy_to_clipboard(text: &str) -> Result<ClipboardProvider> {
    let providers = ClipboardProvider::detect();
    debug!("Clipboard providers available: {:?}", providers);

    let mut last_error = None;
    for provider in providers {
        match provider.copy(text) {
            Ok(()) => return Ok(provider),
            Err(e) => {
                debug!("{:?} clipboard failed: {}", provider, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or(ClipboardError::NoClipboardFound))
}

/// Check whether an executable with this name is on the PATH
pub fn command_exists(command: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| {
            env::split_paths(&paths).any(|dir| is_executable(&dir.join(command)))
        })
        .unwrap_or(false)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

fn pipe_to_command(program: &str, args: &[&str], text: &str) -> Result<()> {
    let failed = |reason: String| ClipboardError::CommandFailed {
        command: program.to_string(),
        reason,
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| failed(format!("spawn: {}", e)))?;

    {
        let stdin = child
            .stdin
            .as_mut()
            .ok_or_else(|| failed("stdin unavailable".to_string()))?;
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| failed(format!("write: {}", e)))?;
    }
    // close stdin so the command sees EOF
    drop(child.stdin.take());

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(failed(format!("exited with {}", status)))
    }
}
