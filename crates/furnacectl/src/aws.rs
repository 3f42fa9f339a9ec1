//! AWS-backed implementations of the core provider traits
//!
//! Thin wrappers over the CloudFormation, CodeDeploy and IAM SDK clients.
//! Besides the calls themselves, this module owns error classification: SDK
//! errors become `CoreError` variants so the workflows can recognise
//! "already exists" skips and "not found" terminals without knowing anything
//! about AWS error shapes.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_cloudformation::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_cloudformation::types::Capability;
use aws_sdk_codedeploy::types::{
    Ec2TagFilter, Ec2TagFilterType, ElbInfo, GitHubLocation, LoadBalancerInfo, RevisionLocation,
    RevisionLocationType, TargetInstances,
};
use furnacectl_core::error::{CoreError, Result};
use furnacectl_core::provider::{
    DeployService, DeploymentGroupSpec, DeploymentSpec, RoleService, StackResource, StackService,
};
use tracing::debug;

/// The three provider sub-clients a command invocation needs
pub struct AwsClients {
    pub stacks: AwsStacks,
    pub deploys: AwsDeploys,
    pub roles: AwsRoles,
}

/// Build the SDK clients for a region, using the default credential chain
pub async fn connect(region: &str) -> AwsClients {
    debug!("connecting AWS clients for region {region}");
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await;
    AwsClients {
        stacks: AwsStacks {
            client: aws_sdk_cloudformation::Client::new(&config),
        },
        deploys: AwsDeploys {
            client: aws_sdk_codedeploy::Client::new(&config),
        },
        roles: AwsRoles {
            client: aws_sdk_iam::Client::new(&config),
        },
    }
}

/// Classify an SDK error into the core taxonomy
///
/// Every AWS "already exists" code ends in `AlreadyExistsException`
/// (application, deployment group, stack), so one suffix check covers the
/// idempotent create steps. Not-found shows up as dedicated codes on
/// CodeDeploy and IAM, but CloudFormation reports a missing stack as a
/// `ValidationError` whose message says "does not exist".
fn classify<E, R>(err: SdkError<E, R>) -> CoreError
where
    E: ProvideErrorMetadata,
{
    match &err {
        SdkError::ServiceError(context) => {
            let meta = context.err().meta();
            let code = meta.code().unwrap_or("Unknown").to_string();
            let message = meta
                .message()
                .unwrap_or("no message from provider")
                .to_string();

            if code.ends_with("AlreadyExistsException") {
                CoreError::AlreadyExists { resource: message }
            } else if code.ends_with("DoesNotExistException")
                || code == "NoSuchEntity"
                || (code == "ValidationError" && message.contains("does not exist"))
            {
                CoreError::NotFound { message }
            } else {
                CoreError::Api { code, message }
            }
        }
        _ => CoreError::Connection(err.to_string()),
    }
}

/// Pull a member out of a provider response, or fail with NotFound
///
/// The SDK models most response members as optional even when the service
/// always sends them; the workflows cannot proceed without these.
fn required_field<T>(value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| CoreError::NotFound {
        message: format!("provider response missing {what}"),
    })
}

/// CloudFormation-backed stack operations
pub struct AwsStacks {
    client: aws_sdk_cloudformation::Client,
}

impl StackService for AwsStacks {
    async fn create_stack(&self, name: &str, template_body: &str) -> Result<()> {
        self.client
            .create_stack()
            .stack_name(name)
            .template_body(template_body)
            .capabilities(Capability::CapabilityIam)
            .send()
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn delete_stack(&self, name: &str) -> Result<()> {
        self.client
            .delete_stack()
            .stack_name(name)
            .send()
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn describe_stack_status(&self, name: &str) -> Result<String> {
        let resp = self
            .client
            .describe_stacks()
            .stack_name(name)
            .send()
            .await
            .map_err(classify)?;
        let stack = resp.stacks().first().ok_or_else(|| CoreError::NotFound {
            message: format!("stack {name} does not exist"),
        })?;
        let status = required_field(stack.stack_status(), &format!("status of stack {name}"))?;
        Ok(status.as_str().to_string())
    }

    async fn list_stack_resources(&self, name: &str) -> Result<Vec<StackResource>> {
        let resp = self
            .client
            .list_stack_resources()
            .stack_name(name)
            .send()
            .await
            .map_err(classify)?;
        Ok(resp
            .stack_resource_summaries()
            .iter()
            .map(|summary| StackResource {
                resource_type: summary.resource_type().unwrap_or_default().to_string(),
                physical_id: summary.physical_resource_id().unwrap_or_default().to_string(),
            })
            .collect())
    }
}

/// CodeDeploy-backed deployment operations
pub struct AwsDeploys {
    client: aws_sdk_codedeploy::Client,
}

impl DeployService for AwsDeploys {
    async fn create_application(&self, name: &str) -> Result<()> {
        self.client
            .create_application()
            .application_name(name)
            .send()
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn create_deployment_group(&self, spec: &DeploymentGroupSpec) -> Result<()> {
        let mut request = self
            .client
            .create_deployment_group()
            .application_name(&spec.app_name)
            .deployment_group_name(&spec.group_name)
            .service_role_arn(&spec.service_role_arn)
            .load_balancer_info(
                LoadBalancerInfo::builder()
                    .elb_info_list(ElbInfo::builder().name(&spec.load_balancer).build())
                    .build(),
            );
        if let Some(asg) = &spec.auto_scaling_group {
            request = request.auto_scaling_groups(asg);
        }
        request.send().await.map_err(classify)?;
        Ok(())
    }

    async fn create_deployment(&self, spec: &DeploymentSpec) -> Result<String> {
        let mut target_instances = TargetInstances::builder().tag_filters(
            Ec2TagFilter::builder()
                .key(&spec.stage_tag_key)
                .r#type(Ec2TagFilterType::KeyAndValue)
                .value(&spec.stage)
                .build(),
        );
        if let Some(asg) = &spec.auto_scaling_group {
            target_instances = target_instances.auto_scaling_groups(asg);
        }

        let revision = RevisionLocation::builder()
            .revision_type(RevisionLocationType::GitHub)
            .git_hub_location(
                GitHubLocation::builder()
                    .commit_id(&spec.commit_id)
                    .repository(&spec.repository)
                    .build(),
            )
            .build();

        let resp = self
            .client
            .create_deployment()
            .application_name(&spec.app_name)
            .deployment_group_name(&spec.group_name)
            .revision(revision)
            .target_instances(target_instances.build())
            .ignore_application_stop_failures(spec.ignore_stop_failures)
            .update_outdated_instances_only(spec.update_outdated_instances_only)
            .send()
            .await
            .map_err(classify)?;

        resp.deployment_id()
            .map(ToString::to_string)
            .ok_or_else(|| CoreError::TaskFailed("no deployment id returned".to_string()))
    }

    async fn deployment_status(&self, id: &str) -> Result<String> {
        let resp = self
            .client
            .get_deployment()
            .deployment_id(id)
            .send()
            .await
            .map_err(classify)?;
        resp.deployment_info()
            .and_then(|info| info.status())
            .map(|status| status.as_str().to_string())
            .ok_or_else(|| CoreError::TaskFailed(format!("no status for deployment {id}")))
    }
}

/// IAM-backed role lookups
pub struct AwsRoles {
    client: aws_sdk_iam::Client,
}

impl RoleService for AwsRoles {
    async fn role_arn(&self, name: &str) -> Result<String> {
        let resp = self
            .client
            .get_role()
            .role_name(name)
            .send()
            .await
            .map_err(classify)?;
        let role = required_field(resp.role(), &format!("role {name} in GetRole response"))?;
        Ok(role.arn().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_response_member_passes_through() {
        let status = required_field(Some("CREATE_COMPLETE"), "status of stack Demo").unwrap();
        assert_eq!(status, "CREATE_COMPLETE");
    }

    #[test]
    fn test_missing_response_member_is_not_found() {
        let err = required_field::<&str>(None, "role CD in GetRole response").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("role CD"));
    }
}
