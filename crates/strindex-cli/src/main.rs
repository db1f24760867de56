//! strindex CLI
//!
//! Reports where a caret sits inside the string value of a Java string or
//! text-block literal, the way an editor status bar would show it.

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use strindex_core::{CaretSpec, init_tracing};
use tracing::error;

#[derive(Parser)]
#[command(name = "strindex")]
#[command(about = "Line, column and index of a caret inside Java string values")]
#[command(version = strindex_core::VERSION)]
#[command(
    long_about = "strindex maps a caret inside a Java string or text-block literal to its \
position in the decoded string value.\n\
Escapes, text-block indentation and constant operands concatenated in front of the literal \
are taken into account.\n\
\n\
Examples:\n  \
strindex at Main.java --caret 12:30      # Caret at line 12, column 30\n  \
strindex at Main.java --caret 418        # Caret at byte offset 418\n  \
strindex literals Main.java              # Decoded value of every literal\n  \
strindex config init                     # Write a default .strindexrc.toml"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        help = "Path to configuration file (.strindexrc.toml/.strindexrc.json)"
    )]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the string position of the caret
    At {
        /// Java source file, `-` for standard input
        file: PathBuf,

        /// Caret as a byte offset or LINE:COL
        #[arg(
            short = 'C',
            long = "caret",
            required = true,
            value_name = "CARET",
            help = "Caret as a byte offset or 1-based LINE:COL; repeat for several carets"
        )]
        carets: Vec<CaretSpec>,

        /// Output format
        #[arg(short, long, default_value = "text", help = "Output format")]
        format: OutputFormat,

        /// Only show the index for positions on the first line
        #[arg(long, help = "Only show the index for positions on the first line")]
        compact: bool,

        /// Answer as if background indexing were running
        #[arg(long, help = "Answer as if background indexing were running")]
        indexing: bool,
    },

    /// List the string literals of a file with their decoded values
    Literals {
        /// Java source file, `-` for standard input
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text", help = "Output format")]
        format: OutputFormat,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information
    Version {
        /// Show detailed version information
        #[arg(long)]
        detailed: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Create a configuration file with the default settings
    Init {
        /// Configuration format
        #[arg(short, long, default_value = "toml")]
        format: ConfigFormat,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Show the configuration in effect
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON document
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML configuration format
    Toml,
    /// JSON configuration format
    Json,
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return;
    }

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "strindex=error",
        1 => "strindex=warn",
        2 => "strindex=info",
        3 => "strindex=debug",
        _ => "strindex=trace",
    };
    init_tracing(log_level);

    if let Err(e) = run_command(cli) {
        error!("strindex failed: {:#}", e);
        std::process::exit(1);
    }
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::At {
            file,
            carets,
            format,
            compact,
            indexing,
        }) => commands::at_command(&file, &carets, format, compact, indexing, cli.config),

        Some(Commands::Literals { file, format }) => commands::literals_command(&file, format),

        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { format, force } => commands::config_init_command(format, force),
            ConfigAction::Show => commands::config_show_command(cli.config),
        },

        Some(Commands::Version { detailed }) => {
            if detailed {
                println!("{} {}", strindex_core::NAME, strindex_core::VERSION);
                println!("Build information:");
                println!("  Target: {}", std::env::consts::ARCH);
                println!("  OS: {}", std::env::consts::OS);
            } else {
                println!("{}", strindex_core::VERSION);
            }
            Ok(())
        }

        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
