//! `furnacectl delete` - tear down a stack

use crate::aws::AwsClients;
use crate::cli::WaitArgs;
use crate::error::Result;
use colored::Colorize;
use furnacectl_core::config::Config;
use furnacectl_core::workflows;

pub async fn handle_delete(
    config: &Config,
    clients: &AwsClients,
    stack: Option<String>,
    wait: &WaitArgs,
) -> Result<()> {
    let stack_name = super::resolved_stack_name(config, stack);
    let (poll_interval, timeout) = super::wait_settings(config, wait);

    println!("Deleting stack {}", stack_name.cyan());

    let (pb, callback) = super::progress_spinner(format!("Deleting {stack_name}"));
    let result = workflows::delete_stack_and_wait(
        &clients.stacks,
        &stack_name,
        poll_interval,
        timeout,
        Some(callback),
    )
    .await;
    if result.is_err() {
        pb.abandon();
    }
    result?;

    println!("Stack {} deleted", stack_name.cyan());
    Ok(())
}
