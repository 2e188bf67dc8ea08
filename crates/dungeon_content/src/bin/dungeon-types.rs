//! dungeon-types - Inspect the types the game exposes to the DSL
//!
//! ## Usage
//!
//! ```bash
//! # Print every mirrored type with its members
//! dungeon-types show
//!
//! # Print one type
//! dungeon-types show velocity_component
//!
//! # List type names
//! dungeon-types list
//!
//! # Resolve a member path
//! dungeon-types resolve quest.questions
//! ```
//!
//! Set `RUST_LOG=debug` to watch types being registered.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dungeon_content::game_environment_with_config;
use dungeon_semantic::{BuilderConfig, DslEnvironment};

/// Inspect the types the game exposes to the DSL
#[derive(Parser)]
#[command(name = "dungeon-types")]
#[command(version)]
struct Cli {
    /// Reject duplicate adapters instead of replacing them
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print mirrored types with their members
    Show {
        /// DSL name of a single type to print
        name: Option<String>,
    },

    /// List the names of all mirrored types
    List,

    /// Resolve a dotted member path such as `quest.reward`
    Resolve {
        /// The path to resolve
        path: String,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let config = if cli.strict {
        BuilderConfig::strict()
    } else {
        BuilderConfig::default()
    };

    let env = match game_environment_with_config(config) {
        Ok(env) => env,
        Err(err) => {
            eprintln!("error: {err}");
            if let Some(context) = &err.context {
                eprintln!("{context}");
            }
            return ExitCode::FAILURE;
        }
    };

    match cli.command.unwrap_or(Commands::Show { name: None }) {
        Commands::Show { name: None } => {
            print!("{}", env.render_all());
            ExitCode::SUCCESS
        }
        Commands::Show { name: Some(name) } => match env.render(&name) {
            Some(text) => {
                print!("{text}");
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("error: unknown type `{name}`");
                ExitCode::FAILURE
            }
        },
        Commands::List => {
            for name in env.type_names() {
                println!("{name}");
            }
            ExitCode::SUCCESS
        }
        Commands::Resolve { path } => resolve(&env, &path),
    }
}

fn resolve(env: &DslEnvironment, path: &str) -> ExitCode {
    let id = env.resolve_path(path);
    if id.is_null() {
        eprintln!("error: `{path}` does not resolve");
        return ExitCode::FAILURE;
    }
    let symbol = env.table().symbol(id);
    println!(
        "{path}: {} ({:?})",
        env.table().type_name(symbol.data_type()),
        symbol.kind()
    );
    ExitCode::SUCCESS
}
