//! CLI binary entry point for tpcds-util

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tpcds_util::cli::commands::OutputFormat;
use tpcds_util::cli::commands::config::{ConfigInitArgs, handle_config_init, handle_config_show};
use tpcds_util::cli::commands::db::{handle_db_info, handle_db_test, handle_status};
use tpcds_util::cli::commands::generate::{GenerateDataArgs, handle_generate_data};
use tpcds_util::cli::commands::load::{
    LoadDataArgs, LoadTruncateArgs, handle_load_data, handle_load_truncate,
};
use tpcds_util::cli::commands::schema::{
    SchemaCopyArgs, SchemaCreateArgs, SchemaTargetArgs, handle_schema_copy, handle_schema_create,
    handle_schema_drop, handle_schema_info, handle_schema_restrict,
};

#[derive(Parser)]
#[command(name = "tpcds-util")]
#[command(about = "Synthetic TPC-DS data generation and schema-aware bulk loading")]
#[command(version)]
struct Cli {
    /// Directory holding .tpcds.toml
    #[arg(long, global = true, default_value = ".")]
    config_dir: PathBuf,

    /// Output format (table, json)
    #[arg(long, global = true, default_value = "table")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, drop, copy and inspect TPC-DS tables
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },
    /// Load flat files into the database
    Load {
        #[command(subcommand)]
        command: LoadCommands,
    },
    /// Generate synthetic data files
    Generate {
        #[command(subcommand)]
        command: GenerateCommands,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Check the database connection
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Show configuration, connection and schema status
    Status,
}

#[derive(Subcommand)]
enum SchemaCommands {
    /// Create the tables, ensuring the target schema exists
    Create {
        /// DDL script to run instead of the built-in definitions
        #[arg(long)]
        script: Option<PathBuf>,
        /// Target schema (overrides configuration)
        #[arg(short, long)]
        schema: Option<String>,
        /// Fail if any statement fails
        #[arg(long)]
        strict: bool,
    },
    /// Drop the known tables (the schema itself is kept)
    Drop {
        #[arg(short, long)]
        schema: Option<String>,
    },
    /// Copy tables from one schema to another
    Copy {
        /// Schema holding the tables
        source: String,
        /// Schema receiving them
        target: String,
        /// Tables to copy (default: all)
        #[arg(short, long, value_delimiter = ',')]
        tables: Vec<String>,
        /// Copy table structure only
        #[arg(long)]
        structure_only: bool,
    },
    /// Show row counts of the existing tables
    Info {
        #[arg(short, long)]
        schema: Option<String>,
    },
    /// Revoke object creation from the schema principal
    Restrict {
        #[arg(short, long)]
        schema: Option<String>,
    },
}

#[derive(Subcommand)]
enum DbCommands {
    /// Connect and run a trivial query
    Test,
    /// Show row counts of the existing tables
    Info {
        #[arg(short, long)]
        schema: Option<String>,
    },
}

#[derive(Subcommand)]
enum LoadCommands {
    /// Load .dat files into the target schema
    Data {
        /// Directory with the data files (default: generate output_dir)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        /// Tables loaded concurrently
        #[arg(short, long)]
        parallel: Option<usize>,
        /// Load only this table
        #[arg(short, long)]
        table: Option<String>,
        /// Target schema (overrides configuration)
        #[arg(short, long)]
        schema: Option<String>,
        /// Rows per insert batch
        #[arg(long)]
        batch_size: Option<usize>,
    },
    /// Truncate every known table
    Truncate {
        #[arg(short, long)]
        schema: Option<String>,
    },
}

#[derive(Subcommand)]
enum GenerateCommands {
    /// Generate one .dat file per table
    Data {
        /// Scale factor, 0 for a small test data set
        #[arg(long)]
        scale: Option<u32>,
        /// Output directory (default: generate output_dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Seed for a reproducible data set
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a sample .tpcds.toml
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_dir = cli.config_dir;
    let format: OutputFormat = match cli.format.parse() {
        Ok(format) => format,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let result = match cli.command {
        Commands::Schema { command } => match command {
            SchemaCommands::Create {
                script,
                schema,
                strict,
            } => handle_schema_create(&SchemaCreateArgs {
                config_dir,
                script,
                schema,
                strict,
            }),
            SchemaCommands::Drop { schema } => handle_schema_drop(&SchemaTargetArgs {
                config_dir,
                schema,
                format,
            }),
            SchemaCommands::Copy {
                source,
                target,
                tables,
                structure_only,
            } => handle_schema_copy(&SchemaCopyArgs {
                config_dir,
                source,
                target,
                tables,
                structure_only,
                format,
            }),
            SchemaCommands::Info { schema } => handle_schema_info(&SchemaTargetArgs {
                config_dir,
                schema,
                format,
            }),
            SchemaCommands::Restrict { schema } => handle_schema_restrict(&SchemaTargetArgs {
                config_dir,
                schema,
                format,
            }),
        },
        Commands::Load { command } => match command {
            LoadCommands::Data {
                data_dir,
                parallel,
                table,
                schema,
                batch_size,
            } => handle_load_data(&LoadDataArgs {
                config_dir,
                data_dir,
                parallel,
                table,
                schema,
                batch_size,
                format,
            }),
            LoadCommands::Truncate { schema } => {
                handle_load_truncate(&LoadTruncateArgs { config_dir, schema })
            }
        },
        Commands::Generate { command } => match command {
            GenerateCommands::Data {
                scale,
                output_dir,
                seed,
            } => handle_generate_data(&GenerateDataArgs {
                config_dir,
                scale,
                output_dir,
                seed,
                format,
            }),
        },
        Commands::Config { command } => match command {
            ConfigCommands::Init { force } => handle_config_init(&ConfigInitArgs {
                dir: config_dir,
                force,
            }),
            ConfigCommands::Show => handle_config_show(&config_dir),
        },
        Commands::Db { command } => match command {
            DbCommands::Test => handle_db_test(&config_dir),
            DbCommands::Info { schema } => handle_db_info(&SchemaTargetArgs {
                config_dir,
                schema,
                format,
            }),
        },
        Commands::Status => handle_status(&config_dir, format),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
