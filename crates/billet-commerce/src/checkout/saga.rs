//! Sequential multi-step operations with per-step failure policy.
//!
//! A [`Saga`] runs its steps in order. A failing [`StepKind::Fatal`] step
//! stops the run; a failing [`StepKind::Advisory`] step is recorded and the
//! run continues. Nothing is compensated.

use async_trait::async_trait;

use crate::CommerceError;

/// What a step's failure means for the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Failure halts the saga.
    Fatal,
    /// Failure is recorded; later steps still run.
    Advisory,
}

/// One unit of a saga, run against a shared context.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait SagaStep<C: Sync>: Send + Sync {
    /// Stable name used in reports and logs.
    fn name(&self) -> &'static str;

    fn kind(&self) -> StepKind;

    async fn execute(&self, ctx: &C) -> Result<(), CommerceError>;
}

/// A step that failed.
#[derive(Debug)]
pub struct StepFailure {
    pub step: &'static str,
    pub error: CommerceError,
}

/// Outcome of a saga run.
#[derive(Debug, Default)]
pub struct SagaReport {
    /// Steps that succeeded, in order.
    pub completed: Vec<&'static str>,
    /// Advisory steps that failed.
    pub advisory_failures: Vec<StepFailure>,
    /// The fatal step that stopped the run.
    pub halted: Option<StepFailure>,
}

impl SagaReport {
    /// True unless a fatal step failed.
    pub fn is_success(&self) -> bool {
        self.halted.is_none()
    }

    pub fn completed(&self, step: &str) -> bool {
        self.completed.iter().any(|s| *s == step)
    }

    pub fn failed(&self, step: &str) -> bool {
        self.advisory_failures.iter().any(|f| f.step == step)
            || self.halted.as_ref().is_some_and(|f| f.step == step)
    }
}

/// An ordered list of steps.
pub struct Saga<'a, C: Sync> {
    steps: Vec<Box<dyn SagaStep<C> + 'a>>,
}

impl<'a, C: Sync> Default for Saga<'a, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, C: Sync> Saga<'a, C> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step.
    pub fn step(mut self, step: impl SagaStep<C> + 'a) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order until a fatal failure.
    pub async fn run(&self, ctx: &C) -> SagaReport {
        let mut report = SagaReport::default();

        for step in &self.steps {
            let name = step.name();
            tracing::debug!(step = name, "running saga step");

            match step.execute(ctx).await {
                Ok(()) => {
                    tracing::info!(step = name, "saga step completed");
                    report.completed.push(name);
                }
                Err(error) => match step.kind() {
                    StepKind::Fatal => {
                        tracing::error!(step = name, error = %error, "saga halted");
                        report.halted = Some(StepFailure { step: name, error });
                        break;
                    }
                    StepKind::Advisory => {
                        tracing::warn!(step = name, error = %error, "advisory saga step failed");
                        report.advisory_failures.push(StepFailure { step: name, error });
                    }
                },
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Trace {
        ran: Mutex<Vec<&'static str>>,
    }

    impl Trace {
        fn ran(&self) -> Vec<&'static str> {
            self.ran.lock().unwrap().clone()
        }
    }

    struct Step {
        name: &'static str,
        kind: StepKind,
        fails: bool,
    }

    #[async_trait]
    impl SagaStep<Trace> for Step {
        fn name(&self) -> &'static str {
            self.name
        }

        fn kind(&self) -> StepKind {
            self.kind
        }

        async fn execute(&self, ctx: &Trace) -> Result<(), CommerceError> {
            ctx.ran.lock().unwrap().push(self.name);
            if self.fails {
                Err(CommerceError::remote(self.name, "boom"))
            } else {
                Ok(())
            }
        }
    }

    fn step(name: &'static str, kind: StepKind, fails: bool) -> Step {
        Step { name, kind, fails }
    }

    #[tokio::test]
    async fn test_all_steps_succeed() {
        let saga = Saga::new()
            .step(step("a", StepKind::Fatal, false))
            .step(step("b", StepKind::Advisory, false));
        let trace = Trace::default();

        let report = saga.run(&trace).await;
        assert!(report.is_success());
        assert_eq!(report.completed, vec!["a", "b"]);
        assert_eq!(trace.ran(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_fatal_failure_halts() {
        let saga = Saga::new()
            .step(step("a", StepKind::Fatal, true))
            .step(step("b", StepKind::Advisory, false));
        let trace = Trace::default();

        let report = saga.run(&trace).await;
        assert!(!report.is_success());
        assert!(report.failed("a"));
        assert!(report.completed.is_empty());
        assert_eq!(trace.ran(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_advisory_failure_continues() {
        let saga = Saga::new()
            .step(step("a", StepKind::Fatal, false))
            .step(step("b", StepKind::Advisory, true))
            .step(step("c", StepKind::Advisory, false));
        let trace = Trace::default();

        let report = saga.run(&trace).await;
        assert!(report.is_success());
        assert!(report.failed("b"));
        assert!(report.completed("c"));
        assert_eq!(trace.ran(), vec!["a", "b", "c"]);
    }
}
