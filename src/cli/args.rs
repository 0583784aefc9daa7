//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Stack - build and deploy a project's components to Kubernetes.
#[derive(Debug, Parser)]
#[command(name = "stack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    /// Directory holding the stack descriptor
    #[arg(
        short = 'r',
        long,
        global = true,
        env = "STACK_DIRECTORY",
        default_value = "."
    )]
    pub stack_directory: PathBuf,

    /// Descriptor file name (defaults to .stack-local, then .stack)
    #[arg(long, global = true, env = "STACK_CONFIG_FILE")]
    pub stack_config_file: Option<String>,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true, env = "STACK_ASSUME_YES")]
    pub yes: bool,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build container images for a component
    Build(BuildArgs),

    /// Render and apply component manifests
    Up(UpArgs),

    /// Delete deployed component manifests
    Down(DownArgs),

    /// Port-forward a deployment to the local machine
    Expose(ExposeArgs),

    /// Show logs for a deployment
    Logs(LogsArgs),

    /// Open a shell in the pod labelled with an app name
    Enter(EnterArgs),

    /// Show, list or switch the active environment
    #[command(visible_alias = "env")]
    Environment(EnvironmentArgs),

    /// Show, list or switch the kubectl context
    Context(ContextArgs),

    /// Show the parsed stack descriptor
    Config(ConfigArgs),

    /// Inspect cluster secrets labelled with the stack name
    Secrets(SecretsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `build` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct BuildArgs {
    /// Component to build (all components when omitted)
    pub component: Option<String>,

    /// Build only the container with this image name
    pub image: Option<String>,

    /// Full `name:tag` reference for the built image
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Tag appended to the configured image name (defaults to latest)
    #[arg(short = 'i', long)]
    pub image_tag: Option<String>,

    /// Build images without cache
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the `up` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UpArgs {
    /// Components to bring up (all components when omitted)
    pub components: Vec<String>,
}

/// Arguments for the `down` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DownArgs {
    /// Components to tear down (all components when omitted)
    pub components: Vec<String>,
}

/// Arguments for the `expose` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ExposeArgs {
    /// Component whose deployment is forwarded
    pub component: String,

    /// Local port to listen on
    pub local_port: u16,

    /// Port of the deployment to forward to
    pub remote_port: u16,
}

/// Arguments for the `logs` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LogsArgs {
    /// Component whose deployment logs are shown
    pub component: String,

    /// Stream new log lines
    #[arg(short, long)]
    pub follow: bool,
}

/// Arguments for the `enter` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EnterArgs {
    /// Value of the pod's `app` label
    pub app: String,

    /// Container to enter, required for pods with several containers
    pub container: Option<String>,

    /// Shell to run (first entry of the pod's /etc/shells when omitted)
    #[arg(short, long)]
    pub shell: Option<String>,

    /// Namespace of the pod
    #[arg(short, long)]
    pub namespace: Option<String>,
}

/// Arguments for the `environment` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EnvironmentArgs {
    /// Environment to switch to
    pub target: Option<String>,

    /// List every configured environment
    #[arg(short, long, conflicts_with = "target")]
    pub list: bool,
}

/// Arguments for the `context` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ContextArgs {
    /// Context to switch to
    pub target: Option<String>,

    /// List the contexts known to kubectl
    #[arg(short, long, conflicts_with = "target")]
    pub list: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the descriptor at its declared schema version
    #[arg(long)]
    pub no_upgrade: bool,
}

/// Arguments for the `secrets` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SecretsArgs {
    #[command(subcommand)]
    pub action: Option<SecretsAction>,
}

/// Subcommands of `secrets`. Without one, the stack's secrets are listed.
#[derive(Debug, Clone, Subcommand)]
pub enum SecretsAction {
    /// Print required variables and their secret identifiers as JSON
    Ids {
        /// Components to include (all components when omitted)
        components: Vec<String>,
    },

    /// Delete the stack's secrets, or one stock secret
    Delete {
        /// Stock secret type (e.g. registry)
        secret_type: Option<String>,
    },
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_build_arguments() {
        let cli = Cli::try_parse_from([
            "stack", "build", "app", "app-image", "-i", "v1", "--no-cache",
        ])
        .unwrap();

        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.component.as_deref(), Some("app"));
                assert_eq!(args.image.as_deref(), Some("app-image"));
                assert_eq!(args.image_tag.as_deref(), Some("v1"));
                assert!(args.no_cache);
                assert!(args.tag.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["stack", "up", "app", "db", "-r", "/srv/stack", "--yes"])
            .unwrap();

        assert_eq!(cli.stack_directory, PathBuf::from("/srv/stack"));
        assert!(cli.yes);
        match cli.command {
            Commands::Up(args) => assert_eq!(args.components, vec!["app", "db"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn env_is_an_alias_for_environment() {
        let cli = Cli::try_parse_from(["stack", "env", "staging"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Environment(EnvironmentArgs { target: Some(ref t), .. }) if t == "staging"
        ));
    }

    #[test]
    fn expose_requires_numeric_ports() {
        assert!(Cli::try_parse_from(["stack", "expose", "app", "8080", "80"]).is_ok());
        assert!(Cli::try_parse_from(["stack", "expose", "app", "http", "80"]).is_err());
        assert!(Cli::try_parse_from(["stack", "expose", "app", "8080"]).is_err());
    }

    #[test]
    fn parses_enter_arguments() {
        let cli = Cli::try_parse_from([
            "stack", "enter", "app", "sidecar", "-s", "/bin/bash", "-n", "platform",
        ])
        .unwrap();

        match cli.command {
            Commands::Enter(args) => {
                assert_eq!(args.app, "app");
                assert_eq!(args.container.as_deref(), Some("sidecar"));
                assert_eq!(args.shell.as_deref(), Some("/bin/bash"));
                assert_eq!(args.namespace.as_deref(), Some("platform"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(Cli::try_parse_from(["stack", "enter"]).is_err());
    }

    #[test]
    fn list_conflicts_with_target() {
        assert!(Cli::try_parse_from(["stack", "context", "--list", "minikube"]).is_err());
    }

    #[test]
    fn parses_secrets_actions() {
        let cli = Cli::try_parse_from(["stack", "secrets", "ids", "app"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Secrets(SecretsArgs { action: Some(SecretsAction::Ids { ref components }) })
                if components == &["app"]
        ));

        let cli = Cli::try_parse_from(["stack", "secrets"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Secrets(SecretsArgs { action: None })
        ));
    }
}
