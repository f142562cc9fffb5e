use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use globset::GlobSet;
use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Serialize;

use precheck::{Config, Diagnostic, GateDecision, Location, Report, Severity};

mod cli;
use cli::{Cli, Commands, OutputFormat};

const STDIN_NAME: &str = "<stdin>";

/// One checked input, named the way it was given on the command line.
#[derive(Serialize)]
struct FileReport {
    file: String,
    #[serde(skip)]
    report: Report,
    diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    fn new(file: String, report: Report) -> Self {
        let diagnostics = report.distinct().into_iter().cloned().collect();
        Self {
            file,
            report,
            diagnostics,
        }
    }
}

fn start_dir_for(paths: &[PathBuf]) -> io::Result<PathBuf> {
    match paths.first() {
        Some(p) if p.is_dir() => Ok(p.clone()),
        Some(p) => Ok(p.parent().unwrap_or(Path::new(".")).to_path_buf()),
        None => std::env::current_dir(),
    }
}

fn is_java_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "java")
}

/// Expand directories into the `.java` files below them. Explicit file
/// paths are kept as given.
fn collect_inputs(paths: &[PathBuf], exclude: &GlobSet) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in WalkBuilder::new(path).build() {
            match entry {
                Ok(entry) => {
                    let p = entry.path();
                    if p.is_file() && is_java_file(p) && !exclude.is_match(p) {
                        found.push(p.to_path_buf());
                    }
                }
                Err(e) => log::warn!("Error walking {}: {e}", path.display()),
            }
        }
        found.sort();
        log::debug!("Found {} Java file(s) in {}", found.len(), path.display());
        files.extend(found);
    }

    files
}

// Unchecked input is an error so that no gate policy lets it through.
fn oversize_report(len: usize, limit: usize) -> Report {
    Report::from(vec![Diagnostic::error(
        Location::start(),
        "input-too-large",
        format!("Input is {len} bytes, above the {limit}-byte limit; it was not checked."),
    )])
}

fn check_source(source: &str, cfg: &Config) -> Report {
    precheck::check_with_config(source, cfg)
        .unwrap_or_else(|| oversize_report(source.len(), cfg.max_input_bytes))
}

fn check_files(files: &[PathBuf], cfg: &Config) -> Vec<FileReport> {
    files
        .par_iter()
        .filter_map(|path| match fs::read_to_string(path) {
            Ok(source) => Some(FileReport::new(
                path.display().to_string(),
                check_source(&source, cfg),
            )),
            Err(e) => {
                log::warn!("Skipping {}: {e}", path.display());
                None
            }
        })
        .collect()
}

fn print_diagnostics(results: &[FileReport]) {
    let total: usize = results.iter().map(|r| r.diagnostics.len()).sum();
    if total == 0 {
        println!("No issues found");
        return;
    }

    for result in results {
        for diag in &result.diagnostics {
            let severity_str = match diag.severity {
                Severity::Error => "\x1b[31merror\x1b[0m",     // red
                Severity::Warning => "\x1b[33mwarning\x1b[0m", // yellow
            };

            println!(
                "{severity_str}[{}]: {} at {}:{}:{}",
                diag.code, diag.message, result.file, diag.location.line, diag.location.column
            );
        }
    }

    println!("\nFound {} issue(s)", total);
}

fn print_json(results: &[FileReport]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(results)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    println!("{json}");
    Ok(())
}

fn print_rules(cfg: &Config) {
    let enabled = cfg.registry();

    for rule in precheck::RuleRegistry::builtin().rules() {
        let marker = if enabled.get(rule.id()).is_some() {
            ""
        } else {
            " (disabled)"
        };
        println!(
            "{} {:<26} {}{marker}",
            rule.pass().number(),
            rule.id(),
            rule.description()
        );
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            paths,
            check,
            gate,
            format,
        } => {
            let start_dir = start_dir_for(&paths)?;
            let (cfg, cfg_path) = precheck::config::load(cli.config.as_deref(), &start_dir)?;

            if let Some(path) = &cfg_path {
                log::debug!("Using config from: {}", path.display());
            } else {
                log::debug!("Using default config");
            }

            let results = if paths.is_empty() {
                let mut source = String::new();
                io::stdin().read_to_string(&mut source)?;
                vec![FileReport::new(
                    STDIN_NAME.to_string(),
                    check_source(&source, &cfg),
                )]
            } else {
                let files = collect_inputs(&paths, &cfg.exclude_set()?);
                check_files(&files, &cfg)
            };

            match format {
                OutputFormat::Text => print_diagnostics(&results),
                OutputFormat::Json => print_json(&results)?,
            }

            if check && results.iter().any(|r| !r.diagnostics.is_empty()) {
                std::process::exit(1);
            }

            if gate {
                let gate = cfg.gate();
                let mut blocked = false;
                for result in &results {
                    if let GateDecision::Block { first_feedback, .. } =
                        gate.decide(&result.report)
                    {
                        eprintln!("Blocked {}: {}", result.file, first_feedback);
                        blocked = true;
                    }
                }
                if blocked {
                    std::process::exit(1);
                }
            }

            Ok(())
        }
        Commands::Rules => {
            let start_dir = std::env::current_dir()?;
            let (cfg, _) = precheck::config::load(cli.config.as_deref(), &start_dir)?;
            print_rules(&cfg);
            Ok(())
        }
        #[cfg(feature = "lsp")]
        Commands::Lsp => {
            // LSP needs tokio runtime
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(async { precheck::lsp::run().await })?;
            Ok(())
        }
        #[cfg(not(feature = "lsp"))]
        Commands::Lsp => Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "precheck was built without the `lsp` feature",
        )),
    }
}
