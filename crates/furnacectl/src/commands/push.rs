//! `furnacectl push` - deploy a revision to a stack's instances

use crate::aws::AwsClients;
use crate::cli::WaitArgs;
use crate::error::Result;
use colored::Colorize;
use furnacectl_core::config::Config;
use furnacectl_core::workflows::{self, PushParams};

pub async fn handle_push(
    config: &Config,
    clients: &AwsClients,
    stack: Option<String>,
    app: Option<String>,
    wait: &WaitArgs,
) -> Result<()> {
    let stack_name = super::resolved_stack_name(config, stack);
    let app_name =
        app.unwrap_or_else(|| config.app_name_or_default(&stack_name).to_string());
    let (poll_interval, timeout) = super::wait_settings(config, wait);

    println!(
        "Pushing revision {} to stack {}",
        config.git_revision.cyan(),
        stack_name.cyan()
    );

    let params = PushParams {
        stack_name,
        app_name,
        role_name: config.code_deploy_role.clone(),
        commit_id: config.git_revision.clone(),
        repository: config.git_account.clone(),
        elb_name: config.elb_name.clone(),
        stage_tag_key: config.stage_tag_key.clone(),
        update_outdated_instances_only: config.update_outdated_instances_only,
        poll_interval,
        timeout,
    };

    let (pb, callback) = super::progress_spinner("Deployment".to_string());
    let result = workflows::push_and_wait(
        &clients.stacks,
        &clients.deploys,
        &clients.roles,
        &params,
        Some(callback),
    )
    .await;
    if result.is_err() {
        pb.abandon();
    }
    let outcome = result?;

    println!(
        "Deployment {} finished with status {}",
        outcome.deployment_id.cyan(),
        outcome.status.green()
    );
    Ok(())
}
