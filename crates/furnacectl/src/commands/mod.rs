//! Command handlers
//!
//! Each handler resolves its inputs from the CLI arguments and the loaded
//! config, hands the sequencing to a core workflow, and renders the result.
//! The spinner is driven by the workflow's progress events so the operator
//! sees liveness during waits that can run for minutes.

pub mod create;
pub mod delete;
pub mod push;
pub mod status;

use crate::cli::WaitArgs;
use furnacectl_core::config::Config;
use furnacectl_core::progress::{ProgressCallback, ProgressEvent};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Stack name from the positional argument, else the configured default
pub(crate) fn resolved_stack_name(config: &Config, arg: Option<String>) -> String {
    arg.unwrap_or_else(|| config.stack_name.clone())
}

/// Poll interval and deadline for a wait, with CLI flags overriding config
pub(crate) fn wait_settings(config: &Config, wait: &WaitArgs) -> (Duration, Duration) {
    let interval = Duration::from_secs(wait.wait_interval.unwrap_or(config.wait_frequency_secs));
    let timeout = Duration::from_secs(wait.timeout.unwrap_or(config.timeout_secs));
    (interval, timeout)
}

/// Spinner wired to workflow progress events
pub(crate) fn progress_spinner(message: String) -> (ProgressBar, ProgressCallback) {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(message.clone());

    let pb_clone = pb.clone();
    let callback = Box::new(move |event: ProgressEvent| match event {
        ProgressEvent::Started { target } => {
            pb_clone.set_message(format!("{message} (waiting for {target})"));
        }
        ProgressEvent::Polling { status, .. } => {
            pb_clone.set_message(format!("{message}: {status}"));
        }
        ProgressEvent::Completed { status } => {
            pb_clone.finish_with_message(format!("{message}: {status}"));
        }
        ProgressEvent::Failed { status } => {
            pb_clone.finish_with_message(format!("{message} failed: {status}"));
        }
    }) as ProgressCallback;

    (pb, callback)
}
