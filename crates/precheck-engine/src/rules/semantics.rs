//! Constructs that usually compile but rarely do what a beginner meant,
//! plus a few keyword misuses around constructors and `main`.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::Diagnostic;
use crate::rules::{Pass, Rule, error_at, warning_at};
use crate::source::SourceText;

static ASSIGNMENT_IN_CONDITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(if|while)\s*\(\s*[A-Za-z_][\w.]*(?:\s*\[[^\]]*\])?\s*(=)[^=]").unwrap()
});

static UNCONDITIONAL_LOOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bwhile\s*\(\s*true\s*\)|\bfor\s*\(\s*;\s*;\s*\)").unwrap()
});

static LOOP_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:break|return|throw)\b|\bSystem\s*\.\s*exit\s*\(").unwrap()
});

static INCLUSIVE_LENGTH_BOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\bfor\s*\([^;]*;\s*([A-Za-z_]\w*)\s*<=\s*([A-Za-z_][\w.]*\s*\.\s*(?:length\b|size\s*\(\s*\)))",
    )
    .unwrap()
});

static STRING_LITERAL_COMPARISON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(==|!=)\s*"|"\s*(==|!=)"#).unwrap());

static LITERAL_DIVISION_BY_ZERO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w.])(\d+)\s*/\s*0+(?:[^\w.]|$)").unwrap());

static MISCASED_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^.\w])(True|TRUE|False|FALSE|Null|NULL|NUll)\b").unwrap()
});

static CLASS_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bclass\s+([A-Za-z_$][\w$]*)").unwrap());

static STATIC_MAIN_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bstatic\s+(?:[\w\[\]<>]+\s+)*main\s*\([^)]*\)").unwrap()
});

static THIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bthis\b").unwrap());

pub struct AssignmentInConditionRule;

impl Rule for AssignmentInConditionRule {
    fn id(&self) -> &'static str {
        "assignment-in-condition"
    }

    fn pass(&self) -> Pass {
        Pass::Semantics
    }

    fn description(&self) -> &'static str {
        "`=` used where `==` was meant in an `if` or `while` condition"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        ASSIGNMENT_IN_CONDITION
            .captures_iter(source.masked())
            .filter_map(|caps| {
                let keyword = caps.get(1)?;
                let operator = caps.get(2)?;
                Some(error_at(
                    source,
                    operator.start(),
                    self.id(),
                    format!(
                        "Assignment `=` inside an `{}` condition; use `==` to compare values.",
                        keyword.as_str()
                    ),
                ))
            })
            .collect()
    }
}

pub struct InfiniteLoopRule;

impl InfiniteLoopRule {
    /// Body of the loop whose header spans `header`. A header followed by
    /// `;` is the tail of a `do { ... } while (true);` loop.
    fn loop_body(source: &SourceText, header: Range<usize>) -> Range<usize> {
        let masked = source.masked();
        if masked[header.end..].trim_start().starts_with(';') {
            let before = masked[..header.start].trim_end();
            if before.ends_with('}')
                && let Some(open) = source.matching_open_brace(before.len() - 1)
            {
                return open..before.len();
            }
        }
        source.body_after(header.end)
    }
}

impl Rule for InfiniteLoopRule {
    fn id(&self) -> &'static str {
        "infinite-loop"
    }

    fn pass(&self) -> Pass {
        Pass::Semantics
    }

    fn description(&self) -> &'static str {
        "`while (true)` or `for (;;)` with no way out of the loop"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        let masked = source.masked();

        UNCONDITIONAL_LOOP
            .find_iter(masked)
            .filter(|m| !LOOP_ESCAPE.is_match(&masked[Self::loop_body(source, m.range())]))
            .map(|m| {
                let header = if m.as_str().starts_with("while") {
                    "while (true)"
                } else {
                    "for (;;)"
                };
                warning_at(
                    source,
                    m.start(),
                    self.id(),
                    format!(
                        "Infinite loop: `{header}` has no `break`, `return` or `throw`, so it never stops."
                    ),
                )
            })
            .collect()
    }
}

pub struct OffByOneLoopRule;

impl Rule for OffByOneLoopRule {
    fn id(&self) -> &'static str {
        "off-by-one-loop"
    }

    fn pass(&self) -> Pass {
        Pass::Semantics
    }

    fn description(&self) -> &'static str {
        "Loop bound `i <= arr.length` steps one past the last element"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        INCLUSIVE_LENGTH_BOUND
            .captures_iter(source.masked())
            .filter_map(|caps| {
                let var = caps.get(1)?;
                let bound: String = caps.get(2)?.as_str().split_whitespace().collect();
                Some(warning_at(
                    source,
                    var.start(),
                    self.id(),
                    format!(
                        "Loop condition `{} <= {bound}` goes one past the end; use `<` instead of `<=`.",
                        var.as_str()
                    ),
                ))
            })
            .collect()
    }
}

pub struct StringReferenceEqualityRule;

impl Rule for StringReferenceEqualityRule {
    fn id(&self) -> &'static str {
        "string-reference-equality"
    }

    fn pass(&self) -> Pass {
        Pass::Semantics
    }

    fn description(&self) -> &'static str {
        "A string literal compared with `==` or `!=`"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        STRING_LITERAL_COMPARISON
            .captures_iter(source.masked())
            .filter_map(|caps| {
                let operator = caps.get(1).or_else(|| caps.get(2))?;
                Some(warning_at(
                    source,
                    operator.start(),
                    self.id(),
                    format!(
                        "Strings compared with `{}` check identity, not content; use `.equals(...)` instead.",
                        operator.as_str()
                    ),
                ))
            })
            .collect()
    }
}

pub struct DivisionByZeroRule;

impl Rule for DivisionByZeroRule {
    fn id(&self) -> &'static str {
        "division-by-zero"
    }

    fn pass(&self) -> Pass {
        Pass::Semantics
    }

    fn description(&self) -> &'static str {
        "An integer literal divided by the literal `0`"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        LITERAL_DIVISION_BY_ZERO
            .captures_iter(source.masked())
            .filter_map(|caps| {
                let numerator = caps.get(1)?;
                Some(error_at(
                    source,
                    numerator.start(),
                    self.id(),
                    format!(
                        "Division by zero: `{} / 0` throws an ArithmeticException when it runs.",
                        numerator.as_str()
                    ),
                ))
            })
            .collect()
    }
}

pub struct LiteralCaseRule;

impl Rule for LiteralCaseRule {
    fn id(&self) -> &'static str {
        "literal-case"
    }

    fn pass(&self) -> Pass {
        Pass::Semantics
    }

    fn description(&self) -> &'static str {
        "`True`, `False` or `Null` written with capital letters"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        let mut seen = HashSet::new();

        MISCASED_LITERAL
            .captures_iter(source.masked())
            .filter_map(|caps| caps.get(1))
            .filter(|word| seen.insert(word.as_str()))
            .map(|word| {
                error_at(
                    source,
                    word.start(),
                    self.id(),
                    format!(
                        "`{}` is not a Java literal; write `{}` in lowercase.",
                        word.as_str(),
                        word.as_str().to_lowercase()
                    ),
                )
            })
            .collect()
    }
}

pub struct ConstructorReturnTypeRule;

impl Rule for ConstructorReturnTypeRule {
    fn id(&self) -> &'static str {
        "constructor-return-type"
    }

    fn pass(&self) -> Pass {
        Pass::Semantics
    }

    fn description(&self) -> &'static str {
        "A method named like its class declares a return type"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        let masked = source.masked();
        let mut diagnostics = Vec::new();
        let mut seen = HashSet::new();

        for name in CLASS_NAME.captures_iter(masked).filter_map(|c| c.get(1)) {
            let name = name.as_str();
            if !seen.insert(name) {
                continue;
            }

            let pattern = format!(
                r"\b(void|int|long|double|float|boolean|char|String|{name})\s+{name}\s*\(",
                name = regex::escape(name)
            );
            let constructor = match Regex::new(&pattern) {
                Ok(re) => re,
                Err(e) => {
                    log::debug!("Skipping constructor check for {name}: {e}");
                    continue;
                }
            };

            if let Some(return_type) = constructor.captures(masked).and_then(|c| c.get(1)) {
                diagnostics.push(warning_at(
                    source,
                    return_type.start(),
                    self.id(),
                    format!(
                        "`{ty} {name}(...)` looks like a constructor but declares a return type; constructors have none, so remove `{ty}`.",
                        ty = return_type.as_str()
                    ),
                ));
            }
        }

        diagnostics
    }
}

pub struct ThisInStaticMainRule;

impl Rule for ThisInStaticMainRule {
    fn id(&self) -> &'static str {
        "this-in-static-main"
    }

    fn pass(&self) -> Pass {
        Pass::Semantics
    }

    fn description(&self) -> &'static str {
        "`this` used inside the static `main` method"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        let masked = source.masked();
        let Some(header) = STATIC_MAIN_HEADER.find(masked) else {
            return Vec::new();
        };

        let body = source.body_after(header.end());
        let Some(this) = THIS.find(&masked[body.clone()]) else {
            return Vec::new();
        };

        vec![error_at(
            source,
            body.start + this.start(),
            self.id(),
            "`this` cannot be used inside the static `main` method; create an object first and call methods on it.",
        )]
    }
}
