//! `furnacectl create` - provision a stack from a template

use crate::aws::AwsClients;
use crate::cli::WaitArgs;
use crate::error::Result;
use colored::Colorize;
use furnacectl_core::config::Config;
use furnacectl_core::workflows;

pub async fn handle_create(
    config: &Config,
    clients: &AwsClients,
    stack: Option<String>,
    template: Option<String>,
    wait: &WaitArgs,
) -> Result<()> {
    let stack_name = super::resolved_stack_name(config, stack);
    let template_body = config.read_template(template.as_deref())?;
    let (poll_interval, timeout) = super::wait_settings(config, wait);

    println!("Creating stack {}", stack_name.cyan());

    let (pb, callback) = super::progress_spinner(format!("Creating {stack_name}"));
    let result = workflows::create_stack_and_wait(
        &clients.stacks,
        &stack_name,
        &template_body,
        poll_interval,
        timeout,
        Some(callback),
    )
    .await;
    if result.is_err() {
        pb.abandon();
    }
    result?;

    println!("Stack {} created", stack_name.cyan());
    Ok(())
}
