//! CLI structure and command definitions

use clap::{Args, Parser, Subcommand};

/// Stack lifecycle CLI for AWS CloudFormation and CodeDeploy
#[derive(Parser, Debug)]
#[command(name = "furnacectl")]
#[command(
    version,
    about = "Stack lifecycle CLI: provision, deploy to, and tear down CloudFormation stacks"
)]
#[command(long_about = "
Stack lifecycle CLI: provision, deploy to, and tear down CloudFormation stacks

Every command is safe to re-run: setup steps recognise already-existing
resources and skip them, and all derived identifiers are re-resolved from
the provider on each invocation.

EXAMPLES:
    # Provision a stack from the configured template
    furnacectl create MyStack

    # Deploy the configured git revision to a stack
    furnacectl push MyStack

    # Tear a stack down and wait for deletion to finish
    furnacectl delete MyStack

    # Positional names fall back to the configured defaults
    furnacectl push

Configuration lives in config.toml under the platform config directory;
see --config-file to point elsewhere.
")]
pub struct Cli {
    /// Path to alternate configuration file
    #[arg(long, global = true, env = "FURNACE_CONFIG_FILE")]
    pub config_file: Option<String>,

    /// Override the configured AWS region
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Knobs for commands that block on a remote status transition
#[derive(Args, Debug, Clone)]
pub struct WaitArgs {
    /// Seconds between status polls (overrides wait_frequency_secs)
    #[arg(long)]
    pub wait_interval: Option<u64>,

    /// Overall deadline in seconds (overrides timeout_secs)
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision a stack from a CloudFormation template
    #[command(after_help = "EXAMPLES:
    furnacectl create
    furnacectl create MyStack
    furnacectl create MyStack --template ./stack.yaml
")]
    Create {
        /// Stack name (defaults to the configured stack_name)
        stack: Option<String>,

        /// Template file (defaults to the configured template path)
        #[arg(long)]
        template: Option<String>,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Push the configured revision to a stack's instances
    #[command(after_help = "EXAMPLES:
    furnacectl push
    furnacectl push MyStack
    furnacectl push MyStack MyApp
")]
    Push {
        /// Stack name (defaults to the configured stack_name)
        stack: Option<String>,

        /// Application name (defaults to the stack name)
        app: Option<String>,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Delete a stack and wait until it is gone
    #[command(after_help = "EXAMPLES:
    furnacectl delete
    furnacectl delete MyStack
")]
    Delete {
        /// Stack name (defaults to the configured stack_name)
        stack: Option<String>,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Show the current status of a stack
    Status {
        /// Stack name (defaults to the configured stack_name)
        stack: Option<String>,
    },
}
