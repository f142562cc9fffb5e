use std::collections::HashSet;

use crate::diagnostics::{Diagnostic, Location};
use crate::rules::RuleRegistry;
use crate::source::SourceText;

pub const EMPTY_SOURCE_CODE: &str = "empty-source";
pub const EMPTY_SOURCE_MESSAGE: &str = "Your code is empty. Write some Java code before running it.";

/// Runs every registered rule, pass by pass, over one source text.
pub struct Pipeline {
    registry: RuleRegistry,
}

impl Pipeline {
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn run(&self, source: &str) -> Report {
        let source = SourceText::new(source);

        if source.is_empty() {
            log::debug!("Empty source, skipping all rules");
            return Report {
                diagnostics: vec![Diagnostic::error(
                    Location::start(),
                    EMPTY_SOURCE_CODE,
                    EMPTY_SOURCE_MESSAGE,
                )],
            };
        }

        let mut diagnostics = Vec::new();
        for rule in self.registry.rules() {
            log::debug!("Running rule: {} (pass {})", rule.id(), rule.pass().number());
            let found = rule.check(&source);
            log::debug!("Rule {} found {} diagnostic(s)", rule.id(), found.len());
            diagnostics.extend(found);
        }

        Report { diagnostics }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(RuleRegistry::builtin())
    }
}

/// Everything one pipeline run found, in pass order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The first diagnostic for each distinct message, in pass order.
    pub fn distinct(&self) -> Vec<&Diagnostic> {
        let mut seen = HashSet::new();
        self.diagnostics
            .iter()
            .filter(|d| seen.insert(d.message.as_str()))
            .collect()
    }

    /// Distinct messages in the order they were first produced.
    pub fn messages(&self) -> Vec<String> {
        let messages: Vec<String> = self
            .distinct()
            .into_iter()
            .map(|d| d.message.clone())
            .collect();

        log::trace!(
            "Aggregated {} diagnostic(s) into {} message(s)",
            self.diagnostics.len(),
            messages.len()
        );
        messages
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The aggregated messages, or `None` when nothing was found.
    pub fn into_messages(self) -> Option<Vec<String>> {
        if self.is_clean() {
            None
        } else {
            Some(self.messages())
        }
    }
}

impl From<Vec<Diagnostic>> for Report {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}
