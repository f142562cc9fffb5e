use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "precheck")]
#[command(author, version)]
#[command(about = "Beginner-friendly checks for Java programs")]
#[command(
    long_about = "Precheck looks for the mistakes beginners make most often in small Java \
    programs: a missing class or main method, unbalanced braces, misspelled keywords, unclosed \
    strings, loops that never end, and more. It runs before the compiler and explains each \
    problem in plain language."
)]
#[command(after_help = "\
EXAMPLES:

    # Check a file
    precheck check Main.java

    # Check every .java file below a directory
    precheck check src/

    # Check from stdin
    cat Main.java | precheck check

    # Fail the build if anything is reported
    precheck check --check src/

    # Fail only if the submission gate would block
    precheck check --gate src/

    # List the rules in pipeline order
    precheck rules

CONFIGURATION:

Precheck looks for configuration files in this order:
  1. Explicit --config path
  2. precheck.toml or .precheck.toml in current/parent directories
  3. ~/.config/precheck/config.toml (XDG)
  4. Built-in defaults

Example .precheck.toml:

    disabled_rules = [\"class-naming\"]
    gate = \"errors-only\"
    max_input_bytes = 65536
    exclude = [\"**/generated/**\"]")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    #[arg(help = "Path to configuration file")]
    #[arg(
        long_help = "Path to a custom configuration file. If not specified, precheck will \
        search for .precheck.toml or precheck.toml in the current directory and its parents, \
        then fall back to ~/.config/precheck/config.toml."
    )]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check Java source files for common mistakes
    #[command(
        long_about = "Run every rule over each input and print the diagnostics. Directories \
        are searched for .java files, honouring .gitignore and the exclude patterns from the \
        configuration. With no paths, the program is read from stdin."
    )]
    #[command(after_help = "\
EXAMPLES:

    # Check a single file
    precheck check Main.java

    # Machine-readable output
    precheck check --format json src/

EXIT CODES:

  0  No issues found, or issues found without --check/--gate
  1  --check and at least one diagnostic, --gate and the gate blocks, or an
     invalid configuration file")]
    Check {
        /// Files or directories (stdin if not provided)
        #[arg(help = "Input files or directories")]
        paths: Vec<PathBuf>,

        /// Exit with code 1 if any diagnostic is reported
        #[arg(long)]
        #[arg(help = "Exit with code 1 if any issue is found")]
        check: bool,

        /// Exit with code 1 if the submission gate blocks
        #[arg(long, conflicts_with = "check")]
        #[arg(help = "Exit with code 1 if the configured gate blocks any input")]
        #[arg(
            long_help = "Apply the configured submission gate to each input. With the default \
            errors-only policy only errors block; with any-diagnostic, warnings block too."
        )]
        gate: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List every rule in pipeline order
    #[command(
        long_about = "Print the id, pass number and description of every built-in rule, in the \
        order the pipeline runs them. Rules disabled in the configuration are marked."
    )]
    Rules,
    /// Start the Language Server Protocol server
    #[command(
        long_about = "Start the precheck Language Server Protocol (LSP) server for editor \
        integration. Diagnostics are published whenever a Java document is opened or changed."
    )]
    #[command(after_help = "\
The LSP server communicates via stdin/stdout and is typically launched automatically by your \
editor's LSP client. You generally don't need to run this command manually.")]
    Lsp,
}
