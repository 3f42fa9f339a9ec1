//! Provider trait seam
//!
//! The orchestrator never talks to AWS directly; it goes through these three
//! narrow traits so the workflows can be exercised against in-memory fakes.
//! The binary crate supplies implementations backed by the CloudFormation,
//! CodeDeploy and IAM SDK clients, which also own error classification into
//! [`CoreError`](crate::error::CoreError).

use crate::error::Result;

/// One resource belonging to a stack, as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackResource {
    /// Provider resource type, e.g. `AWS::AutoScaling::AutoScalingGroup`
    pub resource_type: String,
    /// Physical identifier assigned by the provider
    pub physical_id: String,
}

/// Parameters for creating a deployment group
///
/// The group name is derived, not chosen: `<app>DeploymentGroup`. At most one
/// group with that name exists per application, which is what makes the
/// create step idempotent rather than accumulative.
#[derive(Debug, Clone)]
pub struct DeploymentGroupSpec {
    pub app_name: String,
    pub group_name: String,
    pub service_role_arn: String,
    /// Auto-scaling group the deployment targets; absent if the stack has none
    pub auto_scaling_group: Option<String>,
    /// Name of the classic load balancer referenced by the group
    pub load_balancer: String,
}

/// Parameters for creating a deployment
#[derive(Debug, Clone)]
pub struct DeploymentSpec {
    pub app_name: String,
    pub group_name: String,
    /// Source-control commit to deploy
    pub commit_id: String,
    /// GitHub repository in `owner/repo` form
    pub repository: String,
    /// Tag key used to select target instances
    pub stage_tag_key: String,
    /// Tag value: the stack name the instances belong to
    pub stage: String,
    pub auto_scaling_group: Option<String>,
    /// Keep going when the ApplicationStop hook fails on an instance
    pub ignore_stop_failures: bool,
    /// When false, deploy to every matching instance, not just outdated ones
    pub update_outdated_instances_only: bool,
}

impl DeploymentGroupSpec {
    /// Derived deployment group name for an application
    pub fn group_name_for(app_name: &str) -> String {
        format!("{app_name}DeploymentGroup")
    }
}

/// Stack provisioning operations (CloudFormation)
pub trait StackService {
    fn create_stack(
        &self,
        name: &str,
        template_body: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    fn delete_stack(&self, name: &str) -> impl Future<Output = Result<()>> + Send;

    /// Current status label of the stack, e.g. `CREATE_COMPLETE`
    fn describe_stack_status(&self, name: &str) -> impl Future<Output = Result<String>> + Send;

    fn list_stack_resources(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<StackResource>>> + Send;
}

/// Application deployment operations (CodeDeploy)
pub trait DeployService {
    fn create_application(&self, name: &str) -> impl Future<Output = Result<()>> + Send;

    fn create_deployment_group(
        &self,
        spec: &DeploymentGroupSpec,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Returns the opaque deployment id assigned by the provider
    fn create_deployment(
        &self,
        spec: &DeploymentSpec,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Current status label of a deployment, e.g. `Succeeded`
    fn deployment_status(&self, id: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Identity lookups (IAM), read-only
pub trait RoleService {
    fn role_arn(&self, name: &str) -> impl Future<Output = Result<String>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_group_name() {
        assert_eq!(
            DeploymentGroupSpec::group_name_for("Demo"),
            "DemoDeploymentGroup"
        );
    }
}
