//! Script executor
//!
//! Recursively interprets a node sequence against a controller handle.
//! Execution is strictly sequential: a node does not begin until the
//! previous node's full effect, including the trailing press interval, has
//! completed. The executor performs no local recovery; collaborator
//! failures propagate to the caller, which owns session teardown.

use crate::action::{Node, PressNode, RepeatLimit, RepeatNode};
use crate::script::ScriptOptions;
use jc_controller::{ControllerError, ControllerHandle};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Script execution errors
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// Seconds value the suspension primitive cannot represent
    #[error("invalid duration {seconds}: must be finite and non-negative")]
    InvalidDuration { seconds: f64 },

    /// Fatal collaborator failure, not retried
    #[error(transparent)]
    Controller(#[from] ControllerError),
}

/// Result type for script execution
pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Executes node sequences against a controller handle
///
/// The handle is injected at construction and owned exclusively for the
/// duration of a run.
pub struct ScriptExecutor<C> {
    controller: C,
    options: ScriptOptions,
}

impl<C: ControllerHandle + Send> ScriptExecutor<C> {
    /// Create an executor over a controller handle
    pub fn new(controller: C, options: ScriptOptions) -> Self {
        Self {
            controller,
            options,
        }
    }

    /// Execute every node of a sequence in order
    ///
    /// Boxed so repeat nodes can re-enter it recursively.
    pub fn execute_sequence<'a>(
        &'a mut self,
        sequence: &'a [Node],
    ) -> Pin<Box<dyn Future<Output = ExecutorResult<()>> + Send + 'a>> {
        Box::pin(async move {
            debug!("executing {} nodes", sequence.len());

            for node in sequence {
                match node {
                    Node::Press(press) => self.execute_press(press).await?,
                    Node::Repeat(repeat) => self.execute_repeat(repeat).await?,
                    Node::Sleep(seconds) => self.execute_sleep(*seconds).await?,
                    Node::Unknown => {}
                }
            }
            Ok(())
        })
    }

    async fn execute_press(&mut self, press: &PressNode) -> ExecutorResult<()> {
        let Some(key) = &press.key else {
            return Ok(());
        };
        info!("pressing {key}");
        self.controller.push_button(key).await?;
        tokio::time::sleep(to_duration(self.options.interval)?).await;
        Ok(())
    }

    async fn execute_sleep(&mut self, seconds: f64) -> ExecutorResult<()> {
        info!("sleeping for {seconds} seconds");
        tokio::time::sleep(to_duration(seconds)?).await;
        Ok(())
    }

    async fn execute_repeat(&mut self, repeat: &RepeatNode) -> ExecutorResult<()> {
        let Some(sequence) = &repeat.sequence else {
            return Ok(());
        };
        info!("repeating");

        match repeat.limit {
            RepeatLimit::Count(count) => {
                for _ in 0..count {
                    self.execute_sequence(sequence).await?;
                }
            }
            RepeatLimit::Duration(seconds) => {
                let limit = to_duration(seconds)?;
                let begin = tokio::time::Instant::now();
                // checked before each iteration, so the last one may overshoot
                while begin.elapsed() < limit {
                    self.execute_sequence(sequence).await?;
                }
            }
            RepeatLimit::Forever => loop {
                self.execute_sequence(sequence).await?;
            },
        }
        Ok(())
    }
}

fn to_duration(seconds: f64) -> ExecutorResult<Duration> {
    Duration::try_from_secs_f64(seconds).map_err(|_| ExecutorError::InvalidDuration { seconds })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use jc_controller::ControllerKind;
    use tokio::time::Instant;

    #[derive(Default)]
    struct RecordingHandle {
        pushes: Vec<(String, Duration)>,
        started: Option<Instant>,
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl ControllerHandle for RecordingHandle {
        async fn push_button(&mut self, key: &str) -> Result<(), ControllerError> {
            if self.fail_on == Some(key) {
                return Err(ControllerError::UnknownButton {
                    key: key.to_string(),
                    kind: ControllerKind::ProController,
                });
            }
            let started = *self.started.get_or_insert_with(Instant::now);
            self.pushes.push((key.to_string(), started.elapsed()));
            Ok(())
        }
    }

    fn press(key: &str) -> Node {
        Node::Press(PressNode {
            key: Some(key.to_string()),
        })
    }

    fn options(interval: f64) -> ScriptOptions {
        ScriptOptions { interval }
    }

    #[tokio::test(start_paused = true)]
    async fn test_press_waits_the_interval() {
        let mut handle = RecordingHandle::default();
        let mut executor = ScriptExecutor::new(&mut handle, options(0.5));

        let start = Instant::now();
        executor.execute_sequence(&[press("a")]).await.unwrap();
        let elapsed = start.elapsed();
        drop(executor);

        assert_eq!(handle.pushes.len(), 1);
        assert_eq!(handle.pushes[0].0, "a");
        assert_eq!(elapsed, Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_press_without_key_is_a_no_op() {
        let mut handle = RecordingHandle::default();
        let mut executor = ScriptExecutor::new(&mut handle, options(0.5));

        let start = Instant::now();
        executor
            .execute_sequence(&[Node::Press(PressNode { key: None })])
            .await
            .unwrap();
        let elapsed = start.elapsed();
        drop(executor);

        assert!(handle.pushes.is_empty());
        assert_eq!(elapsed, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_nodes_are_skipped() {
        let mut handle = RecordingHandle::default();
        let mut executor = ScriptExecutor::new(&mut handle, options(0.0));

        executor
            .execute_sequence(&[Node::Unknown, press("a"), Node::Unknown, press("b")])
            .await
            .unwrap();
        drop(executor);

        let keys: Vec<&str> = handle.pushes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeat_count_runs_exactly_n_times() {
        let mut handle = RecordingHandle::default();
        let mut executor = ScriptExecutor::new(&mut handle, options(0.5));

        let repeat = Node::Repeat(RepeatNode {
            sequence: Some(vec![press("b")]),
            limit: RepeatLimit::Count(3),
        });
        executor.execute_sequence(&[repeat]).await.unwrap();
        drop(executor);

        let times: Vec<Duration> = handle.pushes.iter().map(|(_, t)| *t).collect();
        assert_eq!(
            times,
            [
                Duration::ZERO,
                Duration::from_millis(500),
                Duration::from_millis(1000)
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeat_count_zero_runs_nothing() {
        let mut handle = RecordingHandle::default();
        let mut executor = ScriptExecutor::new(&mut handle, options(0.5));

        let repeat = Node::Repeat(RepeatNode {
            sequence: Some(vec![press("b")]),
            limit: RepeatLimit::Count(0),
        });
        let start = Instant::now();
        executor.execute_sequence(&[repeat]).await.unwrap();
        let elapsed = start.elapsed();
        drop(executor);

        assert!(handle.pushes.is_empty());
        assert_eq!(elapsed, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeat_duration_reaches_at_least_the_bound() {
        let mut handle = RecordingHandle::default();
        let mut executor = ScriptExecutor::new(&mut handle, options(0.0));

        // each iteration takes 0.3s; bound is checked before iterations,
        // so the run overshoots to 1.2s over four iterations
        let repeat = Node::Repeat(RepeatNode {
            sequence: Some(vec![press("b"), Node::Sleep(0.3)]),
            limit: RepeatLimit::Duration(1.0),
        });
        let start = Instant::now();
        executor.execute_sequence(&[repeat]).await.unwrap();
        let elapsed = start.elapsed();
        drop(executor);

        assert_eq!(handle.pushes.len(), 4);
        assert!(elapsed >= Duration::from_secs(1));
        assert_eq!(elapsed, Duration::from_millis(1200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeat_forever_runs_until_cancelled() {
        let mut handle = RecordingHandle::default();
        let mut executor = ScriptExecutor::new(&mut handle, options(0.5));

        let repeat = Node::Repeat(RepeatNode {
            sequence: Some(vec![press("a")]),
            limit: RepeatLimit::Forever,
        });
        let result = tokio::time::timeout(
            Duration::from_millis(9750),
            executor.execute_sequence(std::slice::from_ref(&repeat)),
        )
        .await;
        assert!(result.is_err(), "unbounded repeat must not finish");
        drop(executor);

        // pushes at 0.0s, 0.5s, ... 9.5s
        assert_eq!(handle.pushes.len(), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeat_without_sequence_is_a_no_op() {
        let mut handle = RecordingHandle::default();
        let mut executor = ScriptExecutor::new(&mut handle, options(0.5));

        let repeat = Node::Repeat(RepeatNode {
            sequence: None,
            limit: RepeatLimit::Forever,
        });
        let start = Instant::now();
        executor.execute_sequence(&[repeat]).await.unwrap();
        let elapsed = start.elapsed();
        drop(executor);

        assert!(handle.pushes.is_empty());
        assert_eq!(elapsed, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_controller_failure_stops_the_run() {
        let mut handle = RecordingHandle {
            fail_on: Some("bad"),
            ..Default::default()
        };
        let mut executor = ScriptExecutor::new(&mut handle, options(0.0));

        let result = executor
            .execute_sequence(&[press("a"), press("bad"), press("b")])
            .await;
        assert!(matches!(result, Err(ExecutorError::Controller(_))));
        drop(executor);

        let keys: Vec<&str> = handle.pushes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["a"], "nodes after the failure must not run");
    }

    #[tokio::test]
    async fn test_negative_sleep_is_rejected() {
        let mut handle = RecordingHandle::default();
        let mut executor = ScriptExecutor::new(&mut handle, options(0.5));

        let result = executor.execute_sequence(&[Node::Sleep(-1.0)]).await;
        assert!(matches!(
            result,
            Err(ExecutorError::InvalidDuration { seconds }) if seconds == -1.0
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_sleep_passes_through() {
        let mut handle = RecordingHandle::default();
        let mut executor = ScriptExecutor::new(&mut handle, options(0.0));

        executor
            .execute_sequence(&[Node::Sleep(0.0), press("a")])
            .await
            .unwrap();
        drop(executor);

        assert_eq!(handle.pushes.len(), 1);
    }
}
