//! CLI definitions and entry point

use clap::{Args, Parser, Subcommand};

use crate::commands;
use checkmeta::adapters::git::Selection;
use checkmeta::output::OutputMode;

/// checkmeta - Enforce declared file meta attributes at commit time
#[derive(Parser, Debug)]
#[command(
    name = "checkmeta",
    version,
    about = "Enforce declared file meta attributes at commit time",
    long_about = "Reject commits whose files violate their declared meta attributes.\n\n\
                  Pattern files (.hgmeta) assign attributes such as encoding(utf-8),\n\
                  mimetype(text/plain), bom(false) and bmp() to paths. The pre-commit\n\
                  hook validates every staged file against them."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install the pre-commit hook in the current repository
    Init {
        /// Rewrite an existing checkmeta hook section
        #[arg(short, long)]
        force: bool,

        /// Remove the checkmeta hook section instead
        #[arg(long, conflicts_with = "force")]
        uninstall: bool,
    },

    /// Validate changed files against the meta rules (used by pre-commit hook)
    Check {
        /// Check every tracked file instead of the staged ones
        #[arg(long, conflicts_with = "range")]
        all: bool,

        /// Check the files changed in a revision range, e.g. main..topic
        #[arg(long, value_name = "A..B")]
        range: Option<String>,

        /// Run in CI mode (report failure as an error instead of exiting)
        #[arg(long)]
        ci: bool,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Show the effective attributes of paths
    Attrs {
        /// Paths, relative to the current directory
        #[arg(required = true)]
        paths: Vec<String>,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Parse the pattern files and list their rules
    Rules {
        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Show version
    Version,
}

/// Overrides for `.checkmeta.toml`
#[derive(Args, Debug, Default, Clone)]
pub struct RuleArgs {
    /// Pattern file to read, repeatable (replaces the configured list)
    #[arg(long = "pattern-file", value_name = "PATH")]
    pub pattern_files: Vec<String>,

    /// Mandatory attribute kinds, e.g. "encoding,mimetype" (replaces the configured list)
    #[arg(long, value_name = "KINDS")]
    pub mandatory: Option<String>,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::Init { force, uninstall }) => commands::init(force, uninstall, output_mode),
        Some(Command::Check {
            all,
            range,
            ci,
            rules,
        }) => {
            let selection = match (all, range) {
                (_, Some(range)) => Selection::Range(range),
                (true, None) => Selection::Tracked,
                (false, None) => Selection::Staged,
            };
            commands::check(selection, ci, &rules, output_mode)
        },
        Some(Command::Attrs { paths, rules }) => commands::attrs(&paths, &rules, output_mode),
        Some(Command::Rules { rules }) => commands::rules(&rules, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": checkmeta::VERSION
                    })
                );
            } else {
                println!("checkmeta v{}", checkmeta::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": checkmeta::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("checkmeta v{}", checkmeta::VERSION);
                println!("\nRun 'checkmeta --help' for usage");
                println!("Run 'checkmeta init' to install the pre-commit hook");
            }
            Ok(())
        },
    }
}
