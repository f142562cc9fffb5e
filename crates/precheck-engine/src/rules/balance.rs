use crate::diagnostics::Diagnostic;
use crate::rules::{Pass, Rule, error_at};
use crate::source::{LiteralKind, SourceText};

pub struct UnclosedStringRule;

impl Rule for UnclosedStringRule {
    fn id(&self) -> &'static str {
        "unclosed-string"
    }

    fn pass(&self) -> Pass {
        Pass::Balance
    }

    fn description(&self) -> &'static str {
        "A double-quoted string is not closed on its line"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        first_unclosed(source, LiteralKind::String)
            .map(|offset| {
                error_at(
                    source,
                    offset,
                    self.id(),
                    "Unclosed string: add a closing `\"` before the end of the line.",
                )
            })
            .into_iter()
            .collect()
    }
}

pub struct UnclosedCharRule;

impl Rule for UnclosedCharRule {
    fn id(&self) -> &'static str {
        "unclosed-char"
    }

    fn pass(&self) -> Pass {
        Pass::Balance
    }

    fn description(&self) -> &'static str {
        "A single-quoted character literal is not closed on its line"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        first_unclosed(source, LiteralKind::Char)
            .map(|offset| {
                error_at(
                    source,
                    offset,
                    self.id(),
                    "Unclosed character literal: add a closing `'`.",
                )
            })
            .into_iter()
            .collect()
    }
}

fn first_unclosed(source: &SourceText, kind: LiteralKind) -> Option<usize> {
    source
        .unclosed_literals()
        .iter()
        .find(|literal| literal.kind == kind)
        .map(|literal| literal.offset)
}

pub struct UnbalancedParensRule;

impl Rule for UnbalancedParensRule {
    fn id(&self) -> &'static str {
        "unbalanced-parens"
    }

    fn pass(&self) -> Pass {
        Pass::Balance
    }

    fn description(&self) -> &'static str {
        "A `(` is never closed or a `)` has no opening partner"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        let mut open = Vec::new();

        for (i, b) in source.masked().bytes().enumerate() {
            match b {
                b'(' => open.push(i),
                b')' if open.pop().is_none() => {
                    return vec![error_at(
                        source,
                        i,
                        self.id(),
                        "Unexpected `)` without a matching `(`.",
                    )];
                }
                _ => {}
            }
        }

        match open.first() {
            Some(&at) => vec![error_at(
                source,
                at,
                self.id(),
                "Missing closing parenthesis `)` for this `(`.",
            )],
            None => Vec::new(),
        }
    }
}
