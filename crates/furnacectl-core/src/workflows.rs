//! Lifecycle workflows
//!
//! Fixed sequences of dependent steps behind each CLI command. These are not
//! a generic workflow engine: push, create and delete each run a small,
//! hard-wired chain of resolver calls, idempotent create steps, one terminal
//! provider action, and a status poll. Every identifier is re-derived from
//! remote state at the start of a run, so re-running a partially failed
//! command is always safe.

use crate::error::{CoreError, Result};
use crate::progress::{ProgressCallback, wait_for_status};
use crate::provider::{DeployService, DeploymentGroupSpec, DeploymentSpec, RoleService, StackService};
use crate::resolve;
use crate::steps::ensure_created;
use std::time::Duration;
use tracing::{info, warn};

/// Deployment status labels CodeDeploy treats as permanent failure
const DEPLOYMENT_FAILURE_STATES: &[&str] = &["Failed", "Stopped"];

/// Stack status labels that end a create wait unsuccessfully
const STACK_CREATE_FAILURE_STATES: &[&str] =
    &["CREATE_FAILED", "ROLLBACK_COMPLETE", "ROLLBACK_FAILED"];

/// Stack status label that ends a delete wait unsuccessfully
const STACK_DELETE_FAILURE_STATES: &[&str] = &["DELETE_FAILED"];

/// Inputs for the push workflow, resolved from CLI args and config
#[derive(Debug, Clone)]
pub struct PushParams {
    pub stack_name: String,
    pub app_name: String,
    /// Name of the role CodeDeploy assumes, resolved to an ARN at run time
    pub role_name: String,
    /// Commit to deploy
    pub commit_id: String,
    /// GitHub repository in `owner/repo` form
    pub repository: String,
    pub elb_name: String,
    pub stage_tag_key: String,
    pub update_outdated_instances_only: bool,
    pub poll_interval: Duration,
    pub timeout: Duration,
}

/// Final report of a completed push
#[derive(Debug, Clone)]
pub struct PushOutcome {
    pub deployment_id: String,
    /// Status re-fetched after the poll completed, for the audit line
    pub status: String,
}

impl PushParams {
    fn validate(&self) -> Result<()> {
        if self.commit_id.is_empty() {
            return Err(CoreError::Validation(
                "no git revision configured; set git_revision in the config file".to_string(),
            ));
        }
        if self.repository.is_empty() {
            return Err(CoreError::Validation(
                "no git repository configured; set git_account in the config file".to_string(),
            ));
        }
        Ok(())
    }
}

/// Push a revision to a stack and wait for the deployment to succeed
///
/// Step chain: resolve the stack's auto-scaling group and the deploying role
/// ARN, idempotently ensure the application and its deployment group exist,
/// create the deployment, poll until `Succeeded`, then re-fetch the status
/// for the final report. Any resolver or step error aborts the whole chain.
pub async fn push_and_wait<S, D, R>(
    stacks: &S,
    deploys: &D,
    roles: &R,
    params: &PushParams,
    on_progress: Option<ProgressCallback>,
) -> Result<PushOutcome>
where
    S: StackService,
    D: DeployService,
    R: RoleService,
{
    params.validate()?;
    info!(
        stack = %params.stack_name,
        app = %params.app_name,
        "pushing revision {} to stack",
        params.commit_id
    );

    let asg = resolve::auto_scaling_group(stacks, &params.stack_name).await?;
    if asg.is_none() {
        // Deployment still targets instances via the stage tag filter, but a
        // stack without an auto-scaling group is usually a misconfiguration.
        warn!(
            "stack {} has no auto-scaling group resource",
            params.stack_name
        );
    }
    let role_arn = resolve::role_arn(roles, &params.role_name).await?;

    ensure_created(
        &format!("application '{}'", params.app_name),
        deploys.create_application(&params.app_name),
    )
    .await?;

    let group_name = DeploymentGroupSpec::group_name_for(&params.app_name);
    let group = DeploymentGroupSpec {
        app_name: params.app_name.clone(),
        group_name: group_name.clone(),
        service_role_arn: role_arn,
        auto_scaling_group: asg.clone(),
        load_balancer: params.elb_name.clone(),
    };
    ensure_created(
        &format!("deployment group '{group_name}'"),
        deploys.create_deployment_group(&group),
    )
    .await?;

    let deployment = DeploymentSpec {
        app_name: params.app_name.clone(),
        group_name,
        commit_id: params.commit_id.clone(),
        repository: params.repository.clone(),
        stage_tag_key: params.stage_tag_key.clone(),
        stage: params.stack_name.clone(),
        auto_scaling_group: asg,
        ignore_stop_failures: true,
        update_outdated_instances_only: params.update_outdated_instances_only,
    };
    let deployment_id = deploys.create_deployment(&deployment).await?;
    info!("created deployment {deployment_id}");

    wait_for_status(
        "Succeeded",
        DEPLOYMENT_FAILURE_STATES,
        params.poll_interval,
        params.timeout,
        || deploys.deployment_status(&deployment_id),
        on_progress,
    )
    .await?;

    // The poll already guarantees success; the re-fetch produces an audit
    // line from the provider's own status field.
    let status = deploys.deployment_status(&deployment_id).await?;
    info!("deployment status: {status}");

    Ok(PushOutcome {
        deployment_id,
        status,
    })
}

/// Create a stack from a template and wait until it is fully provisioned
pub async fn create_stack_and_wait<S: StackService>(
    stacks: &S,
    stack_name: &str,
    template_body: &str,
    poll_interval: Duration,
    timeout: Duration,
    on_progress: Option<ProgressCallback>,
) -> Result<()> {
    info!("creating stack {stack_name}");
    stacks.create_stack(stack_name, template_body).await?;

    wait_for_status(
        "CREATE_COMPLETE",
        STACK_CREATE_FAILURE_STATES,
        poll_interval,
        timeout,
        || stacks.describe_stack_status(stack_name),
        on_progress,
    )
    .await?;

    info!("stack {stack_name} created");
    Ok(())
}

/// Delete a stack and wait until the deletion completes
///
/// The delete request itself has no idempotent "already deleted" handling;
/// any error from it is fatal. Once deletion is in flight, the stack
/// disappearing from describe calls counts as completion.
pub async fn delete_stack_and_wait<S: StackService>(
    stacks: &S,
    stack_name: &str,
    poll_interval: Duration,
    timeout: Duration,
    on_progress: Option<ProgressCallback>,
) -> Result<()> {
    info!("deleting stack {stack_name}");
    stacks.delete_stack(stack_name).await?;

    wait_for_status(
        "DELETE_COMPLETE",
        STACK_DELETE_FAILURE_STATES,
        poll_interval,
        timeout,
        || async {
            match stacks.describe_stack_status(stack_name).await {
                Ok(status) => Ok(status),
                Err(err) if err.is_not_found() => Ok("DELETE_COMPLETE".to_string()),
                Err(err) => Err(err),
            }
        },
        on_progress,
    )
    .await?;

    info!("stack {stack_name} deleted");
    Ok(())
}
