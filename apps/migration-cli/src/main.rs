use clap::{Parser, ValueEnum};
use fleet_backend::config::db::{DbKind, RuntimeEnv};
use fleet_backend::infra::db::connect_db;
use migration::{migrate, MigrationCommand};
use tracing::{error, info};

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

/// In-memory SQLite is deliberately absent: the schema would vanish on exit.
#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Fleet database migration tool")]
struct Args {
    /// up | down | fresh | reset | refresh | status
    #[arg(value_parser = parse_command)]
    command: MigrationCommand,

    /// Runtime environment; `test` requires a `_test` database
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,
}

fn parse_command(raw: &str) -> Result<MigrationCommand, String> {
    raw.parse()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,migration_cli=info,fleet_backend=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let runtime_env = match args.env {
        Env::Prod => RuntimeEnv::Prod,
        Env::Test => RuntimeEnv::Test,
    };
    let db_kind = match args.db {
        Db::Postgres => DbKind::Postgres,
        Db::SqliteFile => DbKind::SqliteFile,
    };

    let conn = match connect_db(db_kind, runtime_env).await {
        Ok(conn) => conn,
        Err(e) => {
            error!(error = %e, "could not connect to database");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&conn, args.command).await {
        error!(error = %e, "migration failed");
        std::process::exit(1);
    }
    info!(command = ?args.command, "done");
}
