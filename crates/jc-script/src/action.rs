//! Script node types
//!
//! Nodes are the building blocks of a script sequence. Each YAML node is a
//! mapping carrying one of the recognized tags; a node with none of them is
//! kept as [`Node::Unknown`] and skipped at execution time, so scripts from
//! newer tools still run.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

/// A single node in a script sequence
///
/// A mapping may in principle carry several recognized tags; the first match
/// in the order `press`, `repeat`, `sleep` decides the node's type, so the
/// effective type is deterministic.
#[derive(Debug, Clone)]
pub enum Node {
    /// Push one button, then wait the configured interval
    Press(PressNode),

    /// Re-execute an inner sequence under a termination policy
    Repeat(RepeatNode),

    /// Suspend for the given number of seconds
    Sleep(f64),

    /// Unrecognized tag, executes as a no-op
    Unknown,
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let Some(mapping) = value.as_mapping() else {
            return Ok(Node::Unknown);
        };

        if let Some(press) = mapping.get("press") {
            let press = serde_yaml::from_value(press.clone()).map_err(D::Error::custom)?;
            return Ok(Node::Press(press));
        }
        if let Some(repeat) = mapping.get("repeat") {
            let repeat = serde_yaml::from_value(repeat.clone()).map_err(D::Error::custom)?;
            return Ok(Node::Repeat(repeat));
        }
        if let Some(seconds) = mapping.get("sleep") {
            let seconds = serde_yaml::from_value(seconds.clone()).map_err(D::Error::custom)?;
            return Ok(Node::Sleep(seconds));
        }
        Ok(Node::Unknown)
    }
}

/// Press node payload
#[derive(Debug, Clone, Deserialize)]
pub struct PressNode {
    /// Logical button name; a press without one is a no-op
    pub key: Option<String>,
}

/// Repeat node payload
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RepeatFields")]
pub struct RepeatNode {
    /// Inner sequence; a repeat without one is a no-op
    pub sequence: Option<Vec<Node>>,

    /// Termination policy
    pub limit: RepeatLimit,
}

/// How a repeat decides to stop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RepeatLimit {
    /// Execute the inner sequence exactly this many times
    Count(u64),

    /// Re-execute until at least this many seconds have elapsed
    Duration(f64),

    /// Re-execute until cancelled or a nested operation fails
    Forever,
}

#[derive(Deserialize)]
struct RepeatFields {
    sequence: Option<Vec<Node>>,
    count: Option<u64>,
    duration: Option<f64>,
}

impl From<RepeatFields> for RepeatNode {
    fn from(fields: RepeatFields) -> Self {
        // count wins when both bounds are present
        let limit = match (fields.count, fields.duration) {
            (Some(count), _) => RepeatLimit::Count(count),
            (None, Some(duration)) => RepeatLimit::Duration(duration),
            (None, None) => RepeatLimit::Forever,
        };
        RepeatNode {
            sequence: fields.sequence,
            limit,
        }
    }
}
