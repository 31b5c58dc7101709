//! Live emulated controller state
//!
//! [`ControllerState`] tracks which buttons are currently set and emits one
//! input event per press/release transition. The byte-level input report
//! encoding belongs to the transport and is not modeled here.

use crate::controller::ControllerKind;
use crate::error::{ControllerError, ControllerResult};
use async_trait::async_trait;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// How long a button is held between its press and release events
pub const PRESS_HOLD: Duration = Duration::from_millis(100);

/// Handle to a live emulated controller
///
/// The executor only needs this one operation; tests substitute a recording
/// implementation.
#[async_trait]
pub trait ControllerHandle {
    /// Push a logical button: a full press+release cycle with the device's
    /// own hold timing.
    async fn push_button(&mut self, key: &str) -> ControllerResult<()>;
}

#[async_trait]
impl<T: ControllerHandle + Send> ControllerHandle for &mut T {
    async fn push_button(&mut self, key: &str) -> ControllerResult<()> {
        (**self).push_button(key).await
    }
}

/// Live emulated controller
pub struct ControllerState {
    kind: ControllerKind,
    pressed: HashSet<&'static str>,
    capture: Option<EventCapture>,
}

impl ControllerState {
    /// Create a controller of the given kind with all buttons released
    pub fn new(kind: ControllerKind) -> Self {
        Self {
            kind,
            pressed: HashSet::new(),
            capture: None,
        }
    }

    /// The kind this state emulates
    pub fn kind(&self) -> ControllerKind {
        self.kind
    }

    /// Whether a button is currently set
    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.contains(key)
    }

    /// Append every input event to the given file from now on
    pub fn start_capture(&mut self, path: impl AsRef<Path>) -> ControllerResult<()> {
        self.capture = Some(EventCapture::create(path.as_ref())?);
        Ok(())
    }

    /// Flush and drop the capture sink, if one was started
    pub fn finish_capture(&mut self) -> ControllerResult<()> {
        match self.capture.take() {
            Some(capture) => capture.finish(),
            None => Ok(()),
        }
    }

    fn set_button(&mut self, key: &str, pressed: bool) -> ControllerResult<()> {
        let name = self
            .kind
            .button(key)
            .ok_or_else(|| ControllerError::UnknownButton {
                key: key.to_string(),
                kind: self.kind,
            })?;

        if pressed {
            self.pressed.insert(name);
        } else {
            self.pressed.remove(name);
        }
        debug!(button = name, pressed, "input event");

        if let Some(capture) = &mut self.capture {
            capture.record(name, pressed)?;
        }
        Ok(())
    }
}

#[async_trait]
impl ControllerHandle for ControllerState {
    async fn push_button(&mut self, key: &str) -> ControllerResult<()> {
        self.set_button(key, true)?;
        tokio::time::sleep(PRESS_HOLD).await;
        self.set_button(key, false)
    }
}

/// Input-event capture sink, one line per press/release transition
struct EventCapture {
    path: PathBuf,
    writer: BufWriter<File>,
    started: std::time::Instant,
}

impl EventCapture {
    fn create(path: &Path) -> ControllerResult<Self> {
        let file = File::create(path).map_err(|source| ControllerError::Capture {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            started: std::time::Instant::now(),
        })
    }

    fn record(&mut self, button: &str, pressed: bool) -> ControllerResult<()> {
        let state = if pressed { "press" } else { "release" };
        writeln!(
            self.writer,
            "{:.3} {state} {button}",
            self.started.elapsed().as_secs_f64()
        )
        .map_err(|source| ControllerError::Capture {
            path: self.path.clone(),
            source,
        })
    }

    fn finish(mut self) -> ControllerResult<()> {
        self.writer.flush().map_err(|source| ControllerError::Capture {
            path: self.path.clone(),
            source,
        })
    }
}
