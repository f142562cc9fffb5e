pub mod config;
pub mod gate;
#[cfg(feature = "lsp")]
pub mod lsp;

pub use config::Config;
pub use config::ConfigBuilder;
pub use gate::{Gate, GateDecision, GatePolicy};
pub use precheck_engine::{
    Diagnostic, Location, Pass, Pipeline, Report, Rule, RuleRegistry, Severity, analyze, check,
};

/// Checks a program with the rules and limits in `config`.
///
/// Returns `None` when the source is larger than `config.max_input_bytes`;
/// the caller decides how to report that.
///
/// # Examples
///
/// ```rust
/// let cfg = precheck::ConfigBuilder::default()
///     .disable_rule("class-naming")
///     .build();
///
/// let report = precheck::check_with_config("class lower {}", &cfg).unwrap();
/// assert!(report.diagnostics().iter().all(|d| d.code != "class-naming"));
/// ```
pub fn check_with_config(source: &str, config: &Config) -> Option<Report> {
    if config.exceeds_input_limit(source) {
        log::warn!(
            "Input is {} bytes, above the {}-byte limit; skipping analysis",
            source.len(),
            config.max_input_bytes
        );
        return None;
    }
    Some(config.pipeline().run(source))
}
