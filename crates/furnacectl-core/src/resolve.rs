//! Dependency resolver
//!
//! Later lifecycle steps need identifiers that only exist in the provider's
//! current state: the physical id of the stack's auto-scaling group and the
//! ARN of the deploying role. Nothing is cached between invocations; every
//! run re-derives these from the remote source of truth.

use crate::error::Result;
use crate::provider::{RoleService, StackService};
use tracing::debug;

/// Resource type that marks a stack's auto-scaling group
pub const AUTO_SCALING_GROUP_TYPE: &str = "AWS::AutoScaling::AutoScalingGroup";

/// Find the auto-scaling group belonging to a stack
///
/// Scans the stack's resources in provider-returned order and returns the
/// physical id of the first auto-scaling group. `Ok(None)` when the stack has
/// none; the caller decides whether a missing group is fatal.
pub async fn auto_scaling_group<S: StackService>(
    stacks: &S,
    stack_name: &str,
) -> Result<Option<String>> {
    let resources = stacks.list_stack_resources(stack_name).await?;
    let asg = resources
        .into_iter()
        .find(|r| r.resource_type == AUTO_SCALING_GROUP_TYPE)
        .map(|r| r.physical_id);
    debug!("resolved auto-scaling group for {stack_name}: {asg:?}");
    Ok(asg)
}

/// Resolve a role name to its ARN
///
/// A failed lookup (role missing, permission denied) propagates immediately;
/// this is a pure read with no skip semantics.
pub async fn role_arn<R: RoleService>(roles: &R, role_name: &str) -> Result<String> {
    let arn = roles.role_arn(role_name).await?;
    debug!("resolved role {role_name} to {arn}");
    Ok(arn)
}
