//! CLI integration tests for precheck.
//!
//! These tests execute the compiled binary and verify CLI behavior including:
//! - Subcommand behavior (check, rules, lsp)
//! - Stdin/stdout handling
//! - Exit codes
//! - Configuration discovery

mod check;
mod common;
mod rules;

#[cfg(feature = "lsp")]
mod lsp;
