use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::Diagnostic;
use crate::rules::{Pass, Rule, error_at};
use crate::source::SourceText;

/// Misspelled built-in type and utility names. Capture group 1 is the
/// misspelled word, the second field is the correct spelling.
static TYPE_TYPOS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\b(string)\s+[A-Za-z_]\w*\s*[=;,)]", "String"),
        (r"\b(string)\s*\[\s*\]", "String"),
        (r"\b(Strng|Stirng|Sting|Strign|Srting|Stiring)\b", "String"),
        (r"\b(Int)\s+[A-Za-z_]\w*\s*[=;,)]", "int"),
        (r"\b(boolen|bolean|booleen|boolaen)\b", "boolean"),
        (r"\b(doble|duble|dobule|doubel)\b", "double"),
        (r"\b(scanner)\s+[A-Za-z_]\w*\s*=", "Scanner"),
        (r"\bnew\s+(scanner)\s*\(", "Scanner"),
        (r"\b(Scaner|Sacnner|Scnner|Scanenr|Scannner)\b", "Scanner"),
        (r"\b(Sytem|Systen|Sysem|Sustem|Syste)\s*\.", "System"),
        (r"\b(system)\s*\.\s*(?:in|exit|err|currentTimeMillis|nanoTime)\b", "System"),
        (r"\b(math)\s*\.\s*(?:sqrt|pow|abs|max|min|random|round|floor|ceil)\b", "Math"),
        (r"\b(Arraylist|arraylist|ArrayLsit|Arraylst|ArrayLst)\b", "ArrayList"),
        (r"\b(Interger|Integar|intger)\b", "Integer"),
    ]
    .into_iter()
    .map(|(pattern, correct)| (Regex::new(pattern).unwrap(), correct))
    .collect()
});

pub struct TypeTypoRule;

impl Rule for TypeTypoRule {
    fn id(&self) -> &'static str {
        "type-typo"
    }

    fn pass(&self) -> Pass {
        Pass::KeywordTypos
    }

    fn description(&self) -> &'static str {
        "Misspelled built-in type or utility names such as `Strng` or `scanner`"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        // Several patterns can match the same word; keep its earliest match.
        let mut earliest: HashMap<&str, (usize, &str)> = HashMap::new();
        for (pattern, correct) in TYPE_TYPOS.iter() {
            let Some(word) = pattern.captures(source.masked()).and_then(|c| c.get(1)) else {
                continue;
            };
            let entry = earliest
                .entry(word.as_str())
                .or_insert((word.start(), *correct));
            if word.start() < entry.0 {
                *entry = (word.start(), *correct);
            }
        }

        let mut diagnostics: Vec<Diagnostic> = earliest
            .into_iter()
            .map(|(word, (offset, correct))| {
                error_at(
                    source,
                    offset,
                    self.id(),
                    format!(
                        "Unknown name `{word}`; did you mean `{correct}`? Java names are case-sensitive."
                    ),
                )
            })
            .collect();

        diagnostics.sort_by_key(|d| d.location.offset);
        diagnostics
    }
}
