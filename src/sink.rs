/*!
 * Delivery of the assembled document
 */

use std::fs;
use std::io::{self, Write};

use tracing::{info, warn};

use crate::clipboard::{copy_to_clipboard, ClipboardError, ClipboardProvider};
use crate::config::OutputTarget;
use crate::error::Result;

/// Where the document actually ended up
#[derive(Debug)]
pub enum Delivery {
    /// Copied with the given clipboard command
    Clipboard(ClipboardProvider),
    /// Written to standard output
    Stdout,
    /// Written to a file
    File(std::path::PathBuf),
    /// The clipboard failed, so the document went to standard output instead
    StdoutFallback(ClipboardError),
}

impl Delivery {
    /// Human-readable destination for the summary line
    pub fn describe(&self) -> String {
        match self {
            Delivery::Clipboard(_) => "copied to your clipboard".to_string(),
            Delivery::Stdout | Delivery::StdoutFallback(_) => "written to standard output".to_string(),
            Delivery::File(path) => format!("written to {}", path.display()),
        }
    }

    /// Whether the document went to stdout, which then cannot carry the summary
    pub fn used_stdout(&self) -> bool {
        matches!(self, Delivery::Stdout | Delivery::StdoutFallback(_))
    }
}

/// Send the document to its target
///
/// A clipboard failure is not fatal here: the document is printed to stdout
/// so it is not lost, and the caller decides how to report it.
pub fn deliver(document: &str, target: &OutputTarget) -> Result<Delivery> {
    match target {
        OutputTarget::Clipboard => match copy_to_clipboard(document) {
            Ok(provider) => {
                info!("Copied {} bytes to clipboard via {:?}", document.len(), provider);
                Ok(Delivery::Clipboard(provider))
            }
            Err(e) => {
                warn!("Clipboard unavailable ({}); writing document to stdout", e);
                write_stdout(document)?;
                Ok(Delivery::StdoutFallback(e))
            }
        },
        OutputTarget::Stdout => {
            write_stdout(document)?;
            Ok(Delivery::Stdout)
        }
        OutputTarget::File(path) => {
            fs::write(path, document)?;
            info!("Wrote {} bytes to {}", document.len(), path.display());
            Ok(Delivery::File(path.clone()))
        }
    }
}

fn write_stdout(document: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(document.as_bytes())?;
    stdout.flush()
}
