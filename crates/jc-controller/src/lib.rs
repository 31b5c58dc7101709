//! Emulated game-controller session
//!
//! This crate provides the controller side of the script runner: the set of
//! buttons each controller kind carries, a live [`ControllerState`] that
//! tracks presses and emits input events, SPI flash dump parsing, and the
//! session open/close lifecycle.
//!
//! The Bluetooth/HID transport is deliberately absent; [`Session`] is the
//! seam where one would attach.
//!
//! # Key Types
//!
//! - [`ControllerHandle`] - Async trait for pushing buttons
//! - [`ControllerState`] - Live emulated controller
//! - [`Session`] - Session lifecycle around a controller state
//! - [`FlashMemory`] - SPI flash dump of a real controller

mod controller;
mod error;
mod memory;
mod session;
mod state;

pub use controller::ControllerKind;
pub use error::{ControllerError, ControllerResult};
pub use memory::{FlashMemory, SPI_FLASH_SIZE};
pub use session::{Session, SessionConfig};
pub use state::{ControllerHandle, ControllerState, PRESS_HOLD};
