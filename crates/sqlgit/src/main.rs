//! sqlgit CLI
//!
//! Saves a MySQL schema to a snapshot file and merges it back later.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use sqlgit::config::{DEFAULT_HOST, DEFAULT_PORT};
use sqlgit::prelude::*;
use sqlgit::store::DEFAULT_SCHEMA_FILE;

/// SQL schema version control.
#[derive(Parser, Debug)]
#[command(name = "sqlgit")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("command").required(true).args(["save", "merge"])))]
struct Cli {
    /// Database user.
    #[arg(short, long)]
    user: String,

    /// Database password.
    #[arg(short, long, env = "SQLGIT_PASSWORD", hide_env_values = true)]
    password: String,

    /// Database (schema) name.
    #[arg(short, long)]
    database: String,

    /// Save the current schema.
    #[arg(short, long)]
    save: bool,

    /// Merge the saved schema into the database.
    #[arg(short, long)]
    merge: bool,

    /// Database host.
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Database port.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Snapshot file.
    #[arg(long, default_value = DEFAULT_SCHEMA_FILE)]
    schema_file: PathBuf,

    /// Print the merge statements without executing them.
    #[arg(long, conflicts_with = "save")]
    dry_run: bool,

    /// Keep a timestamped copy of the previous snapshot when saving.
    #[arg(long, conflicts_with = "merge")]
    keep_history: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

/// What to do with the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Store the live schema.
    Save,
    /// Bring the live schema back to the stored one.
    Merge,
}

impl Cli {
    fn command(&self) -> Command {
        if self.save {
            Command::Save
        } else {
            Command::Merge
        }
    }

    fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig::new(&self.user, &self.password, &self.database)
            .host(&self.host)
            .port(self.port)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout is reserved for SQL
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.connection_config();
    let pool = config.connect().await?;

    let introspector = MySqlIntrospector::new(pool.clone(), &config.database);
    let store = JsonSnapshotStore::new(&cli.schema_file, &config.database)
        .keep_history(cli.keep_history);

    match cli.command() {
        Command::Save => {
            info!(path = %store.path().display(), "Saving current schema...");
            save(&introspector, &store).await?;
        }

        Command::Merge => {
            info!(path = %store.path().display(), "Merging saved schema...");
            let Some(statements) = plan_merge(&introspector, &store).await? else {
                return Ok(());
            };

            let executor = MigrationExecutor::new(pool).dry_run(cli.dry_run);
            executor.apply(&statements).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("sqlgit").chain(args.iter().copied()))
    }

    #[test]
    fn test_save_command() {
        let cli = parse(&["-u", "root", "-p", "secret", "-d", "shop", "-s"]).unwrap();
        assert_eq!(cli.command(), Command::Save);
        assert_eq!(cli.schema_file, PathBuf::from("schema"));

        let config = cli.connection_config();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 3306);
        assert_eq!(config.database, "shop");
    }

    #[test]
    fn test_merge_command_with_options() {
        let cli = parse(&[
            "-u", "root", "-p", "secret", "-d", "shop", "-m", "--dry-run", "--host", "db",
            "--port", "3307", "--schema-file", "snapshots/shop.json",
        ])
        .unwrap();
        assert_eq!(cli.command(), Command::Merge);
        assert!(cli.dry_run);
        assert_eq!(cli.connection_config().host, "db");
        assert_eq!(cli.connection_config().port, 3307);
    }

    #[test]
    fn test_missing_command_is_usage_error() {
        let err = parse(&["-u", "root", "-p", "secret", "-d", "shop"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_both_commands_is_usage_error() {
        let err = parse(&["-u", "root", "-p", "secret", "-d", "shop", "-s", "-m"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_missing_user_is_usage_error() {
        let err = parse(&["-p", "secret", "-d", "shop", "-s"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_dry_run_rejected_with_save() {
        let err = parse(&["-u", "root", "-p", "secret", "-d", "shop", "-s", "--dry-run"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_keep_history_rejected_with_merge() {
        let err = parse(&[
            "-u",
            "root",
            "-p",
            "secret",
            "-d",
            "shop",
            "-m",
            "--keep-history",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_keep_history_with_save() {
        let cli = parse(&["-u", "root", "-p", "secret", "-d", "shop", "-s", "--keep-history"])
            .unwrap();
        assert_eq!(cli.command(), Command::Save);
        assert!(cli.keep_history);
        assert!(!cli.dry_run);
    }
}
