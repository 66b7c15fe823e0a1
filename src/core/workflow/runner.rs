//! Ordered workflow execution.

use std::time::Instant;

use crate::context::Context;
use crate::error::Result;

use super::steps::WorkflowStep;

/// A fixed ordered sequence of steps bound to one execution context.
///
/// The sequence is set at construction and never changes during a run.
/// Execution is strictly sequential on the calling thread: the first step
/// that fails halts iteration, nothing already done is compensated, and the
/// failing step's error is returned to the caller unchanged after the
/// failure summary has been logged.
pub struct Workflow<'a> {
    context: &'a Context,
    steps: Vec<Box<dyn WorkflowStep>>,
}

impl<'a> Workflow<'a> {
    pub(crate) fn new(context: &'a Context, steps: Vec<Box<dyn WorkflowStep>>) -> Self {
        Self { context, steps }
    }

    /// Step names in execution order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    pub fn execute(&self) -> Result<()> {
        let start = Instant::now();
        let logger = self.context.logger();

        logger.info(format!("dry-run set to {}", self.context.dry_run()));

        let mut failure = None;
        for step in &self.steps {
            if let Err(err) = step.invoke(self.context) {
                failure = Some(err);
                break;
            }
        }

        let duration = start.elapsed().as_secs_f64();
        match failure {
            None => {
                logger.info(format!("shipmate succeeded after {:.3}s", duration));
                Ok(())
            }
            Some(err) => {
                logger.error(format!("shipmate failed after {:.3}s", duration));
                Err(err)
            }
        }
    }
}
