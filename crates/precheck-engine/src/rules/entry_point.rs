//! Checks for the `public static void main(String[] args)` entry point.
//!
//! A malformed entry point produces exactly one diagnostic. Missing modifiers
//! are reported first, then a wrong parameter list, and only then the generic
//! "signature is incorrect" message.

use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::{Diagnostic, Location};
use crate::rules::{NOT_A_RETURN_TYPE, Pass, Rule, error_at};
use crate::source::SourceText;

/// `main(` preceded by a return type. Calls such as `Other.main(args)` do not match.
static MAIN_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z_][\w\[\]<>]*)\s+(main)\s*\(([^)]*)\)?").unwrap()
});

static VALID_MAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(?:public\s+static|static\s+public)\s+(?:final\s+)?void\s+main\s*\(\s*",
        r"(?:final\s+)?String\s*(?:\[\s*\]\s*[A-Za-z_]\w*|[A-Za-z_]\w*\s*\[\s*\]|\.\.\.\s*[A-Za-z_]\w*)",
        r"\s*\)",
    ))
    .unwrap()
});

static STRING_ARRAY_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:final\s+)?String\s*(?:\[\s*\]\s*[A-Za-z_]\w*|[A-Za-z_]\w*\s*\[\s*\]|\.\.\.\s*[A-Za-z_]\w*)\s*$",
    )
    .unwrap()
});

static PUBLIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bpublic\b").unwrap());
static STATIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bstatic\b").unwrap());

const EXPECTED: &str = "public static void main(String[] args)";

pub struct MainMethodRule;

impl Rule for MainMethodRule {
    fn id(&self) -> &'static str {
        "main-method"
    }

    fn pass(&self) -> Pass {
        Pass::EntryPoint
    }

    fn description(&self) -> &'static str {
        "The `main` method is missing or its signature is wrong"
    }

    fn codes(&self) -> &'static [&'static str] {
        &["missing-main", "main-signature"]
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        let masked = source.masked();

        if VALID_MAIN.is_match(masked) {
            return Vec::new();
        }

        let declaration = MAIN_HEADER.captures_iter(masked).find(|caps| {
            caps.get(1)
                .is_some_and(|word| !NOT_A_RETURN_TYPE.contains(&word.as_str()))
        });
        let Some(caps) = declaration else {
            return vec![Diagnostic::error(
                Location::start(),
                "missing-main",
                format!("Missing main method: add `{EXPECTED}` inside your class."),
            )];
        };

        let Some(name) = caps.get(2) else {
            return Vec::new();
        };
        let anchor = name.start();
        let header = &masked[source.line_start(anchor)..anchor];
        let params = caps.get(3).map_or("", |m| m.as_str());

        let missing: Vec<&str> = [("public", &*PUBLIC), ("static", &*STATIC)]
            .into_iter()
            .filter(|(_, re)| !re.is_match(header))
            .map(|(keyword, _)| keyword)
            .collect();

        let message = if !missing.is_empty() {
            let listed = missing
                .iter()
                .map(|k| format!("`{k}`"))
                .collect::<Vec<_>>()
                .join(" and ");
            format!("The main method is missing {listed}; it must be declared `{EXPECTED}`.")
        } else if !STRING_ARRAY_PARAM.is_match(params) {
            "The main method must take a single `String[] args` parameter.".to_string()
        } else {
            format!("The main method signature is incorrect; expected `{EXPECTED}`.")
        };

        vec![error_at(source, anchor, "main-signature", message)]
    }
}
