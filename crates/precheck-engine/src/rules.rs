use std::fmt::Display;

use crate::diagnostics::{Diagnostic, Location};
use crate::source::SourceText;

pub mod balance;
pub mod entry_point;
pub mod incomplete;
pub mod naming;
pub mod output;
pub mod resources;
pub mod semantics;
pub mod structure;
pub mod typos;

/// The ordered passes of the pipeline.
///
/// The discriminant is the pass number. Rules in a lower pass always run
/// before rules in a higher pass, so their messages win when the same
/// message is produced twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pass {
    Structure = 1,
    EntryPoint = 2,
    Output = 3,
    KeywordTypos = 4,
    Resources = 5,
    Naming = 6,
    Balance = 7,
    Semantics = 8,
    Incompleteness = 9,
}

impl Pass {
    pub const ALL: [Pass; 9] = [
        Pass::Structure,
        Pass::EntryPoint,
        Pass::Output,
        Pass::KeywordTypos,
        Pass::Resources,
        Pass::Naming,
        Pass::Balance,
        Pass::Semantics,
        Pass::Incompleteness,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Pass::Structure => "structure",
            Pass::EntryPoint => "entry-point",
            Pass::Output => "output",
            Pass::KeywordTypos => "keyword-typos",
            Pass::Resources => "resources",
            Pass::Naming => "naming",
            Pass::Balance => "balance",
            Pass::Semantics => "semantics",
            Pass::Incompleteness => "incompleteness",
        }
    }
}

/// A single stateless check against the whole source text.
///
/// Implementations must be deterministic and must never panic: a rule that
/// cannot find a sensible anchor reports at offset 0 instead.
pub trait Rule: Send + Sync {
    fn id(&self) -> &'static str;
    fn pass(&self) -> Pass;
    fn description(&self) -> &'static str;
    fn check(&self, source: &SourceText) -> Vec<Diagnostic>;

    /// Diagnostic codes this rule reports under, when they differ from its id.
    fn codes(&self) -> &'static [&'static str] {
        &[]
    }

    /// True if `name` is this rule's id or one of its codes.
    fn answers_to(&self, name: &str) -> bool {
        self.id() == name || self.codes().contains(&name)
    }
}

pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Registry holding every built-in rule, in pipeline order.
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register(Box::new(structure::MissingClassRule));
        registry.register(Box::new(structure::MisspelledKeywordRule));
        registry.register(Box::new(structure::UnbalancedBracesRule));

        registry.register(Box::new(entry_point::MainMethodRule));

        registry.register(Box::new(output::PrintCaseRule));
        registry.register(Box::new(output::PrintMisspellingRule));
        registry.register(Box::new(output::PrintMissingSemicolonRule));
        registry.register(Box::new(output::SingleQuotedStringRule));

        registry.register(Box::new(typos::TypeTypoRule));

        registry.register(Box::new(resources::MissingImportRule));
        registry.register(Box::new(resources::ResourceNotClosedRule));

        registry.register(Box::new(naming::ClassNamingRule));

        registry.register(Box::new(balance::UnclosedStringRule));
        registry.register(Box::new(balance::UnclosedCharRule));
        registry.register(Box::new(balance::UnbalancedParensRule));

        registry.register(Box::new(semantics::AssignmentInConditionRule));
        registry.register(Box::new(semantics::InfiniteLoopRule));
        registry.register(Box::new(semantics::OffByOneLoopRule));
        registry.register(Box::new(semantics::StringReferenceEqualityRule));
        registry.register(Box::new(semantics::DivisionByZeroRule));
        registry.register(Box::new(semantics::LiteralCaseRule));
        registry.register(Box::new(semantics::ConstructorReturnTypeRule));
        registry.register(Box::new(semantics::ThisInStaticMainRule));

        registry.register(Box::new(incomplete::IncompleteDeclarationRule));
        registry.register(Box::new(incomplete::IncompleteMethodRule));
        registry.register(Box::new(incomplete::IncompleteClassRule));
        registry.register(Box::new(incomplete::IncompleteControlRule));

        registry
    }

    /// Add a rule. It runs after every rule of a lower pass and after rules
    /// of the same pass that were registered earlier.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        let at = self.rules.partition_point(|r| r.pass() <= rule.pass());
        self.rules.insert(at, rule);
    }

    /// Drop every rule whose id or code is listed. Returns how many were removed.
    pub fn disable<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let before = self.rules.len();
        self.rules
            .retain(|rule| !ids.iter().any(|id| rule.answers_to(id.as_ref())));
        before - self.rules.len()
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&dyn Rule> {
        self.rules.iter().find(|r| r.answers_to(id)).map(|r| &**r)
    }
}

/// Words that can precede `name(` without being a return type.
pub(crate) const NOT_A_RETURN_TYPE: &[&str] = &["return", "new", "else", "throw", "case"];

/// Error anchored at `offset`, with the line number leading the message.
pub(crate) fn error_at(
    source: &SourceText,
    offset: usize,
    code: &str,
    message: impl Display,
) -> Diagnostic {
    let location = Location::at(source.text(), offset);
    let message = format!("Line {}: {message}", location.line);
    Diagnostic::error(location, code, message)
}

/// Warning anchored at `offset`, with the line number leading the message.
pub(crate) fn warning_at(
    source: &SourceText,
    offset: usize,
    code: &str,
    message: impl Display,
) -> Diagnostic {
    let location = Location::at(source.text(), offset);
    let message = format!("Line {}: {message}", location.line);
    Diagnostic::warning(location, code, message)
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
