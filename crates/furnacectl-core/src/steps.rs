//! Idempotent step runner
//!
//! Each setup step in a lifecycle command is a "create X" call that a prior
//! run may already have completed. The runner recognises the provider's
//! AlreadyExists classification and turns it into a logged skip; every other
//! error propagates to the command entry point, because later steps assume
//! earlier ones succeeded and partial continuation is unsafe.

use crate::error::Result;
use tracing::info;

/// Result of one idempotent create step
#[derive(Debug)]
pub struct StepOutcome<T> {
    /// The created value; `None` when the resource already existed
    pub value: Option<T>,
    /// True when the provider reported the resource as pre-existing
    pub already_existed: bool,
}

impl<T> StepOutcome<T> {
    fn created(value: T) -> Self {
        Self {
            value: Some(value),
            already_existed: false,
        }
    }

    fn skipped() -> Self {
        Self {
            value: None,
            already_existed: true,
        }
    }
}

/// Run a create operation, treating "already exists" as success-with-skip
///
/// `label` names the resource for the log output, so an operator can tell a
/// fresh creation apart from a skip.
pub async fn ensure_created<T, Fut>(label: &str, operation: Fut) -> Result<StepOutcome<T>>
where
    Fut: Future<Output = Result<T>>,
{
    match operation.await {
        Ok(value) => {
            info!("created {label}");
            Ok(StepOutcome::created(value))
        }
        Err(err) if err.is_already_exists() => {
            info!("{label} already exists, nothing to do");
            Ok(StepOutcome::skipped())
        }
        Err(err) => Err(err),
    }
}
