/*!
 * PromptBucket CLI
 */

use clap::{Parser, Subcommand};
use promptbucket::{commands, config::Config, logging};
use std::process;

#[derive(Parser)]
#[command(name = "pbt")]
#[command(version, about = "Build, render, and share prompt packages", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a .promptbucket package from the local manifest
    Build,

    /// Render the prompt with inheritance, persona, and variables resolved
    Render {
        /// Manifest path or URL (defaults to ./promptbucket.yaml)
        #[arg(short, long, value_name = "PATH_OR_URL")]
        manifest: Option<String>,

        /// Variable substitution (key=value, repeatable)
        #[arg(long = "var", value_name = "KEY=VALUE")]
        vars: Vec<String>,
    },

    /// Validate a manifest against the schema
    Validate {
        /// Manifest file or package directory (defaults to ./promptbucket.yaml)
        target: Option<String>,
    },

    /// Create a starter manifest in the current directory
    Init,

    /// Show a summary of a manifest
    Info {
        /// Manifest path (defaults to ./promptbucket.yaml)
        path: Option<String>,
    },

    /// Publish the local package to the registry
    Push,

    /// Download a package manifest from the registry
    Pull {
        /// Package spec: org/name:version
        package: String,

        /// Directory to write the manifest into
        #[arg(short, long, value_name = "DIR")]
        output: Option<String>,
    },

    /// Search the registry for packages
    Search {
        /// Search query (omit to list popular packages)
        query: Option<String>,

        /// List trending instead of popular packages
        #[arg(long)]
        trending: bool,

        /// Maximum number of results
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },

    /// Star a package on the registry
    Star {
        /// Package spec: org/name
        package: String,
    },

    /// Remove a star from a package
    Unstar {
        /// Package spec: org/name
        package: String,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Store a registry access token
    Login {
        /// Access token (prompted without echo when omitted)
        #[arg(long, value_name = "TOKEN")]
        token: Option<String>,
    },

    /// Clear the stored registry token
    Logout,

    /// Show the authenticated identity
    Whoami,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(2);
    }

    let config = Config::new();

    let result = match &cli.command {
        Command::Build => commands::build::run(),
        Command::Render { manifest, vars } => commands::render::run(manifest.as_deref(), vars),
        Command::Validate { target } => commands::validate::run(target.as_deref()),
        Command::Init => commands::init::run(),
        Command::Info { path } => commands::info::run(path.as_deref()),
        Command::Push => commands::push::run(&config),
        Command::Pull { package, output } => {
            commands::pull::run(&config, package, output.as_deref())
        }
        Command::Search {
            query,
            trending,
            limit,
        } => commands::search::run(&config, query.as_deref(), *trending, *limit),
        Command::Star { package } => commands::star::run(&config, package, true),
        Command::Unstar { package } => commands::star::run(&config, package, false),
        Command::Completions { shell } => {
            use clap::CommandFactory;
            use clap_complete::generate;
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "pbt", &mut std::io::stdout());
            Ok(())
        }
        Command::Login { token } => commands::login::run(&config, token.as_deref()),
        Command::Logout => commands::logout::run(&config),
        Command::Whoami => commands::whoami::run(&config),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
