//! `furnacectl status` - show a stack's current status

use crate::aws::AwsClients;
use crate::error::Result;
use colored::Colorize;
use furnacectl_core::config::Config;
use furnacectl_core::provider::StackService;

pub async fn handle_status(
    config: &Config,
    clients: &AwsClients,
    stack: Option<String>,
) -> Result<()> {
    let stack_name = super::resolved_stack_name(config, stack);
    let status = clients.stacks.describe_stack_status(&stack_name).await?;

    let rendered = if status.ends_with("_COMPLETE") {
        status.green()
    } else if status.ends_with("_FAILED") {
        status.red()
    } else {
        status.yellow()
    };
    println!("Stack {}: {}", stack_name.cyan(), rendered);
    Ok(())
}
