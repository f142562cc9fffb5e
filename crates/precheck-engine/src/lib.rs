//! Heuristic diagnostics for short Java programs written by beginners.
//!
//! The engine never parses Java. Each rule is a small, stateless check over
//! the whole text, and rules run in nine fixed passes so that the most basic
//! problems are reported first.

pub mod diagnostics;
pub mod pipeline;
pub mod position;
pub mod rules;
pub mod source;

pub use diagnostics::{Diagnostic, Location, Severity};
pub use pipeline::{Pipeline, Report};
pub use position::offset_to_line_col;
pub use rules::{Pass, Rule, RuleRegistry};
pub use source::SourceText;

/// Analyse `source` with every built-in rule.
///
/// Returns the distinct diagnostic messages in the order they were first
/// produced, or `None` when nothing was found.
///
/// # Examples
///
/// ```rust
/// let messages = precheck_engine::analyze("").unwrap();
/// assert_eq!(messages.len(), 1);
///
/// let clean = "public class Main {\n    public static void main(String[] args) {\n        System.out.println(\"Hi\");\n    }\n}";
/// assert_eq!(precheck_engine::analyze(clean), None);
/// ```
pub fn analyze(source: &str) -> Option<Vec<String>> {
    check(source).into_messages()
}

/// Like [`analyze`], but keeps line, column, severity and rule code.
pub fn check(source: &str) -> Report {
    Pipeline::default().run(source)
}
