//! Session lifecycle around a controller state
//!
//! A [`Session`] owns the emulated [`ControllerState`] for the duration of a
//! run. Opening a session is where a Bluetooth/HID transport would pair and
//! reconnect; that layer is out of scope, so open only prepares the state
//! and close only tears down the capture sink.

use crate::controller::ControllerKind;
use crate::error::ControllerResult;
use crate::memory::FlashMemory;
use crate::state::ControllerState;
use std::path::PathBuf;
use tracing::info;

/// Parameters for opening a session
#[derive(Debug, Default)]
pub struct SessionConfig {
    /// Console address to reconnect to as an already paired controller
    pub reconnect_addr: String,

    /// Adapter identifier (hci digit or adapter MAC address)
    pub device_id: Option<String>,

    /// Controller kind to emulate
    pub controller: ControllerKind,

    /// SPI flash dump of a real controller, required for joystick emulation
    pub spi_flash: Option<FlashMemory>,

    /// Where to write input events, if anywhere
    pub capture_path: Option<PathBuf>,
}

/// A live session owning the controller state
pub struct Session {
    reconnect_addr: String,
    state: ControllerState,
}

impl Session {
    /// Open a session for the given configuration
    pub fn open(config: SessionConfig) -> ControllerResult<Self> {
        match &config.device_id {
            Some(id) => info!(
                "opening {} session with {} on adapter {id}",
                config.controller, config.reconnect_addr
            ),
            None => info!(
                "opening {} session with {}",
                config.controller, config.reconnect_addr
            ),
        }

        if let Some(flash) = &config.spi_flash {
            let [br, bg, bb] = flash.body_color();
            let [ur, ug, ub] = flash.button_color();
            info!("flash dump colors: body #{br:02x}{bg:02x}{bb:02x}, buttons #{ur:02x}{ug:02x}{ub:02x}");
        }

        let mut state = ControllerState::new(config.controller);
        if let Some(path) = &config.capture_path {
            state.start_capture(path)?;
        }

        Ok(Self {
            reconnect_addr: config.reconnect_addr,
            state,
        })
    }

    /// The controller state, for exclusive use by one executor at a time
    pub fn controller_mut(&mut self) -> &mut ControllerState {
        &mut self.state
    }

    /// Close the session, flushing the capture sink
    pub fn close(mut self) -> ControllerResult<()> {
        info!("closing session with {}", self.reconnect_addr);
        self.state.finish_capture()
    }
}
