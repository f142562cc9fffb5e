use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::{Diagnostic, Location};
use crate::rules::{Pass, Rule, error_at};
use crate::source::SourceText;

static TYPE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:class|interface|enum|record)\s+[A-Za-z_$][\w$]*").unwrap()
});

/// Misspelled structural keywords. The first word of each match is reported.
static KEYWORD_TYPOS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\b(?:pubilc|pulic|pubic|publc|pubilic)\b", "public"),
        (r"\bPublic\s+(?:static|class|void|final)\b", "public"),
        (r"\b(?:clas|calss|clss|classs)\s+[A-Za-z_]", "class"),
        (r"\bClass\s+[A-Za-z_]\w*\s*\{", "class"),
        (r"\b(?:statc|sttic|staic|stati)\b", "static"),
        (r"\bStatic\s+(?:void|int|final)\b", "static"),
        (r"\b(?:viod|vodi|voi|vod)\s+[A-Za-z_]", "void"),
        (r"\bVoid\s+main\b", "void"),
    ]
    .into_iter()
    .map(|(pattern, keyword)| (Regex::new(pattern).unwrap(), keyword))
    .collect()
});

pub struct MissingClassRule;

impl Rule for MissingClassRule {
    fn id(&self) -> &'static str {
        "missing-class"
    }

    fn pass(&self) -> Pass {
        Pass::Structure
    }

    fn description(&self) -> &'static str {
        "The program declares no class"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        if TYPE_DECLARATION.is_match(source.masked()) {
            return Vec::new();
        }

        vec![Diagnostic::error(
            Location::start(),
            self.id(),
            "Missing class declaration: every Java program needs a class, e.g. `public class Main { ... }`.",
        )]
    }
}

pub struct MisspelledKeywordRule;

impl Rule for MisspelledKeywordRule {
    fn id(&self) -> &'static str {
        "misspelled-keyword"
    }

    fn pass(&self) -> Pass {
        Pass::Structure
    }

    fn description(&self) -> &'static str {
        "Misspelled structural keywords such as `pubilc` or `viod`"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for (pattern, keyword) in KEYWORD_TYPOS.iter() {
            if let Some(m) = pattern.find(source.masked()) {
                let found = m.as_str().split_whitespace().next().unwrap_or(m.as_str());
                diagnostics.push(error_at(
                    source,
                    m.start(),
                    self.id(),
                    format!("Misspelled keyword `{found}`; did you mean `{keyword}`?"),
                ));
            }
        }

        diagnostics.sort_by_key(|d| d.location.offset);
        diagnostics
    }
}

pub struct UnbalancedBracesRule;

impl Rule for UnbalancedBracesRule {
    fn id(&self) -> &'static str {
        "unbalanced-braces"
    }

    fn pass(&self) -> Pass {
        Pass::Structure
    }

    fn description(&self) -> &'static str {
        "The number of `{` and `}` differs"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        let text = source.text();
        let open = text.matches('{').count();
        let close = text.matches('}').count();

        let diagnostic = if open > close {
            let anchor = text.rfind('{').unwrap_or(0);
            error_at(
                source,
                anchor,
                self.id(),
                format!(
                    "Missing closing brace `}}`: found {open} `{{` but only {close} `}}`."
                ),
            )
        } else if close > open {
            let anchor = text.rfind('}').unwrap_or(0);
            error_at(
                source,
                anchor,
                self.id(),
                format!("Unexpected closing brace `}}`: found {close} `}}` but only {open} `{{`."),
            )
        } else {
            return Vec::new();
        };

        vec![diagnostic]
    }
}
