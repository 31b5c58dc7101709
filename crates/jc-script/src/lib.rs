//! Script Engine
//!
//! This crate provides the action-script execution engine. Scripts are
//! YAML documents describing an ordered sequence of timed button presses,
//! explicit pauses, and nested repetitions, executed against an emulated
//! controller session.
//!
//! # Node Types
//!
//! - Button presses (with a configurable inter-press interval)
//! - Sleeps
//! - Repeats (bounded by count, by wall-clock duration, or unbounded)
//!
//! Nodes with unrecognized tags are skipped, not rejected.
//!
//! # Key Types
//!
//! - [`Node`] - A single node in a script sequence
//! - [`ScriptDocument`] - A complete loaded script
//! - [`ScriptExecutor`] - Executes sequences against a controller handle

pub mod action;
pub mod executor;
pub mod script;

pub use action::{Node, PressNode, RepeatLimit, RepeatNode};
pub use executor::{ExecutorError, ExecutorResult, ScriptExecutor};
pub use script::{ScriptDocument, ScriptError, ScriptOptions, ScriptResult};
