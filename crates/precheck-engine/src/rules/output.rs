use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::Diagnostic;
use crate::rules::{Pass, Rule, error_at, warning_at};
use crate::source::SourceText;

static PRINT_ANY_CASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bsystem\s*\.\s*out\s*\.\s*(print(?:ln|f)?)\b").unwrap()
});

static PRINT_MISSPELLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?i:system)\s*\.\s*(?i:out)\s*\.\s*((?i:printline|prinln|printn|pritnln|prntln|pirntln|prinltn))\s*\(",
    )
    .unwrap()
});

static PRINT_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bsystem\s*\.\s*out\s*\.\s*print").unwrap());

static CHAR_LITERAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'( +)'").unwrap());

pub struct PrintCaseRule;

impl Rule for PrintCaseRule {
    fn id(&self) -> &'static str {
        "print-case"
    }

    fn pass(&self) -> Pass {
        Pass::Output
    }

    fn description(&self) -> &'static str {
        "Wrong letter case in `System.out.println`"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        let mut seen = HashSet::new();
        let mut diagnostics = Vec::new();

        for caps in PRINT_ANY_CASE.captures_iter(source.masked()) {
            let (Some(whole), Some(method)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let written: String = whole.as_str().split_whitespace().collect();
            let expected = format!("System.out.{}", method.as_str().to_lowercase());

            if written != expected && seen.insert(written.clone()) {
                diagnostics.push(error_at(
                    source,
                    whole.start(),
                    self.id(),
                    format!("`{written}` has the wrong capitalisation; Java is case-sensitive, write `{expected}`."),
                ));
            }
        }

        diagnostics
    }
}

pub struct PrintMisspellingRule;

impl Rule for PrintMisspellingRule {
    fn id(&self) -> &'static str {
        "print-misspelling"
    }

    fn pass(&self) -> Pass {
        Pass::Output
    }

    fn description(&self) -> &'static str {
        "Misspelled print method such as `System.out.printline`"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        let mut seen = HashSet::new();
        let mut diagnostics = Vec::new();

        for caps in PRINT_MISSPELLED.captures_iter(source.masked()) {
            let (Some(whole), Some(method)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if seen.insert(method.as_str()) {
                diagnostics.push(error_at(
                    source,
                    whole.start(),
                    self.id(),
                    format!(
                        "Unknown method `System.out.{}`; did you mean `System.out.println`?",
                        method.as_str()
                    ),
                ));
            }
        }

        diagnostics
    }
}

pub struct PrintMissingSemicolonRule;

impl Rule for PrintMissingSemicolonRule {
    fn id(&self) -> &'static str {
        "print-missing-semicolon"
    }

    fn pass(&self) -> Pass {
        Pass::Output
    }

    fn description(&self) -> &'static str {
        "A print statement line does not end with `;`"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        source
            .masked_lines()
            .filter_map(|(start, line)| {
                let call = PRINT_CALL.find(line)?.start();
                // Closing braces may share the line with the statement.
                let statement = line[call..]
                    .trim_end_matches(|c: char| c == '}' || c.is_whitespace());
                statement.ends_with(')').then(|| {
                    error_at(
                        source,
                        start + call + statement.len(),
                        self.id(),
                        "Missing semicolon `;` at the end of the print statement.",
                    )
                })
            })
            .collect()
    }
}

pub struct SingleQuotedStringRule;

impl Rule for SingleQuotedStringRule {
    fn id(&self) -> &'static str {
        "single-quoted-string"
    }

    fn pass(&self) -> Pass {
        Pass::Output
    }

    fn description(&self) -> &'static str {
        "Text longer than one character inside single quotes"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        let text = source.text();
        let mut diagnostics = Vec::new();

        for caps in CHAR_LITERAL.captures_iter(source.masked()) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let content = &text[inner.range()];
            if content.starts_with('\\') || content.chars().count() < 2 {
                continue;
            }

            diagnostics.push(warning_at(
                source,
                whole.start(),
                self.id(),
                format!("`'{content}'` uses single quotes; text needs double quotes: `\"{content}\"`."),
            ));
        }

        diagnostics
    }
}
