//! # furnacectl-core
//!
//! Engine layer for the `furnacectl` CLI: everything that is not terminal
//! I/O or an AWS SDK call lives here.
//!
//! - [`config`] - process-wide settings, loaded once and passed by reference
//! - [`error`] - the [`CoreError`] taxonomy every operation reports in
//! - [`provider`] - the trait seam the AWS clients implement
//! - [`progress`] - blocking status poller with operator-visible progress
//! - [`steps`] - create-or-skip idempotent step runner
//! - [`resolve`] - derives identifiers from current remote state
//! - [`workflows`] - the fixed step chains behind `create`, `push`, `delete`
//!
//! The provider is abstract on purpose: the workflows are exercised in tests
//! against in-memory fakes, and the binary crate plugs in CloudFormation,
//! CodeDeploy and IAM clients.

pub mod config;
pub mod error;
pub mod progress;
pub mod provider;
pub mod resolve;
pub mod steps;
pub mod workflows;

pub use config::{Config, ConfigError};
pub use error::{CoreError, Result};
pub use progress::{ProgressCallback, ProgressEvent, wait_for_status};
pub use provider::{
    DeployService, DeploymentGroupSpec, DeploymentSpec, RoleService, StackResource, StackService,
};
pub use steps::{StepOutcome, ensure_created};
pub use workflows::{PushOutcome, PushParams};
