use aim_cli::{commands, SchemaKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "aim", version, about = "Migrate and check AIM character documents")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Migrate legacy (aim-v1) documents to layered (aim-v2) documents
    Migrate {
        /// JSON array (or single object) of legacy documents
        #[arg(long)]
        input: PathBuf,
        /// Where to write the migrated documents
        #[arg(long)]
        output: PathBuf,
        /// TOML file with migration options
        #[arg(long)]
        config: Option<PathBuf>,
        /// Keep the legacy ids instead of prefixing them
        #[arg(long)]
        preserve_ids: bool,
        /// Migrate documents in parallel
        #[arg(long)]
        parallel: bool,
    },
    /// Verify that persona traits never shadow canonical traits
    Check {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print the JSON Schema of a document generation
    Schema {
        #[arg(value_enum, default_value = "layered")]
        kind: SchemaKind,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    aim_cli::logging::init(cli.log_json);

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Migrate {
            input,
            output,
            config,
            preserve_ids,
            parallel,
        } => {
            let summary = commands::migrate(&commands::MigrateRequest {
                input,
                output,
                config,
                preserve_ids,
                parallel,
            })?;

            println!("Migrated: {}", summary.success);
            println!("Failed:   {}", summary.failed);

            Ok(if summary.all_succeeded() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Check { input } => {
            let report = commands::check(&input)?;

            println!("Checked:    {}", report.checked);
            println!("Violations: {}", report.violations.len());
            for (id, keys) in &report.violations {
                println!("  {}: {}", id, keys.join(", "));
            }

            Ok(if report.passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Schema { kind } => {
            println!("{}", commands::schema(kind)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
