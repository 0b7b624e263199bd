//! hbi: Command-line front end for the HBI construction dashboards
//!
//! Loads fixture data, resolves the caller's role scope and prints each
//! dashboard view as JSON. Change requests can be created and walked through
//! the review workflow within a single invocation.

mod commands;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use commands::Commands;
use hbi_data::{
    AuthUser, DashboardConfig, DashboardService, FixtureRepository, StaticAuthProvider,
    ValidationMode,
};

#[derive(Parser)]
#[command(name = "hbi")]
#[command(about = "HBI construction dashboards")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "hbi.toml")]
    config: String,

    /// Fixture directory (overrides config file)
    #[arg(short, long, env = "HBI_FIXTURES_DIR")]
    fixtures: Option<String>,

    /// Role key of the signed-in user (e.g. project-manager, executive)
    #[arg(short, long, env = "HBI_ROLE")]
    role: Option<String>,

    /// Display name of the signed-in user
    #[arg(short, long, env = "HBI_USER", default_value = "Dashboard User")]
    user: String,

    /// Reject fixture files containing invalid records
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hbi=info".parse()?)
                .add_directive("hbi_data=info".parse()?)
                .add_directive("hbi_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = DashboardConfig::load_or_default(Path::new(&cli.config)).await?;

    // Apply CLI overrides
    if let Some(dir) = &cli.fixtures {
        config.data.fixtures_dir = PathBuf::from(dir);
    }
    if cli.strict {
        config.data.validation = ValidationMode::Strict;
    }

    info!(
        fixtures = %config.data.fixtures_dir.display(),
        validation = ?config.data.validation,
        "Starting hbi"
    );

    let repository = FixtureRepository::from_config(&config.data);
    let auth = match &cli.role {
        Some(role) => StaticAuthProvider::signed_in(user_from_args(role, &cli.user)),
        None => StaticAuthProvider::anonymous(),
    };

    let service = DashboardService::new(Arc::new(repository), Arc::new(auth)).with_config(config);
    service.initialize().await?;

    match commands::execute(&service, cli.command).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Build a user from `--role` and a "First Last" display name.
fn user_from_args(role: &str, name: &str) -> AuthUser {
    let (first, last) = name.trim().split_once(' ').unwrap_or((name.trim(), ""));
    let email = format!(
        "{}@hbi.local",
        name.trim().to_lowercase().replace(char::is_whitespace, ".")
    );
    AuthUser {
        role: role.to_string(),
        email,
        first_name: first.to_string(),
        last_name: last.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_user_from_args() {
        let user = user_from_args("project-executive", "Maria Lopez");
        assert_eq!(user.first_name, "Maria");
        assert_eq!(user.last_name, "Lopez");
        assert_eq!(user.email, "maria.lopez@hbi.local");
        assert_eq!(user.full_name(), "Maria Lopez");

        let single = user_from_args("executive", "Admin");
        assert_eq!(single.first_name, "Admin");
        assert_eq!(single.last_name, "");
    }

    #[test]
    fn test_parse_list_command() {
        let cli = Cli::try_parse_from([
            "hbi", "--role", "estimator", "bids", "-f", "status=awarded", "--sort", "bidAmount",
            "--desc",
        ])
        .unwrap();
        assert_eq!(cli.role.as_deref(), Some("estimator"));
        assert!(matches!(cli.command, Commands::Bids(_)));
    }
}
