//! Statements that were started but never finished.
//!
//! Every rule here matches a whole masked line and then looks at the next
//! non-blank line, so a header with its `{` on the following line or a
//! control statement with a single-statement body is left alone.

use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::Diagnostic;
use crate::rules::{NOT_A_RETURN_TYPE, Pass, Rule, error_at};
use crate::source::SourceText;

static BARE_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(int|double|float|long|short|byte|char|boolean|String)[ \t]*(;?)[ \t\r]*$",
    )
    .unwrap()
});

static METHOD_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:(?:public|private|protected|static|final|abstract|synchronized)[ \t]+)*([\w\[\]<>]+)[ \t]+([A-Za-z_]\w*)[ \t]*\([ \t]*\)[ \t\r]*$",
    )
    .unwrap()
});

static TYPE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:(?:public|private|protected|static|final|abstract)[ \t]+)*(class|interface|enum)[ \t]+([A-Za-z_$][\w$]*)(?:[ \t]+extends[ \t]+[\w.<>, \t]+?)?(?:[ \t]+implements[ \t]+[\w.<>, \t]+?)?[ \t\r]*$",
    )
    .unwrap()
});

static CONTROL_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:\}?[ \t]*else[ \t]+)?(if|for|while|switch)[ \t]*\(.*\)[ \t\r]*$")
        .unwrap()
});

/// Words that can precede `name()` on a line without it being a method
/// declaration.
fn starts_identifier(line: &str) -> bool {
    line.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_' || c == '$')
}

pub struct IncompleteDeclarationRule;

impl Rule for IncompleteDeclarationRule {
    fn id(&self) -> &'static str {
        "incomplete-declaration"
    }

    fn pass(&self) -> Pass {
        Pass::Incompleteness
    }

    fn description(&self) -> &'static str {
        "A type keyword with no variable name after it"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        BARE_TYPE
            .captures_iter(source.masked())
            .filter_map(|caps| {
                let ty = caps.get(1)?;
                let terminated = caps.get(2).is_some_and(|semi| !semi.is_empty());
                // `String\n    name = ...;` is a declaration split over two lines.
                if !terminated
                    && source
                        .next_code_line(caps.get(0)?.end())
                        .is_some_and(starts_identifier)
                {
                    return None;
                }
                Some(error_at(
                    source,
                    ty.start(),
                    self.id(),
                    format!(
                        "Incomplete declaration: `{ty}` needs a variable name, e.g. `{ty} x = {example};`.",
                        ty = ty.as_str(),
                        example = example_value(ty.as_str()),
                    ),
                ))
            })
            .collect()
    }
}

fn example_value(ty: &str) -> &'static str {
    match ty {
        "double" | "float" => "0.0",
        "char" => "'a'",
        "boolean" => "false",
        "String" => "\"\"",
        _ => "0",
    }
}

pub struct IncompleteMethodRule;

impl Rule for IncompleteMethodRule {
    fn id(&self) -> &'static str {
        "incomplete-method"
    }

    fn pass(&self) -> Pass {
        Pass::Incompleteness
    }

    fn description(&self) -> &'static str {
        "A method header with no body"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        METHOD_HEADER
            .captures_iter(source.masked())
            .filter_map(|caps| {
                let return_type = caps.get(1)?;
                let name = caps.get(2)?;
                if NOT_A_RETURN_TYPE.contains(&return_type.as_str()) {
                    return None;
                }
                let next = source.next_code_line(caps.get(0)?.end());
                if next.is_some_and(|line| line.starts_with('{')) {
                    return None;
                }
                Some(error_at(
                    source,
                    name.start(),
                    self.id(),
                    format!(
                        "Method `{}()` has no body; add `{{ ... }}` after the header.",
                        name.as_str()
                    ),
                ))
            })
            .collect()
    }
}

pub struct IncompleteClassRule;

impl Rule for IncompleteClassRule {
    fn id(&self) -> &'static str {
        "incomplete-class"
    }

    fn pass(&self) -> Pass {
        Pass::Incompleteness
    }

    fn description(&self) -> &'static str {
        "A class, interface or enum header with no body"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        TYPE_HEADER
            .captures_iter(source.masked())
            .filter_map(|caps| {
                let kind = caps.get(1)?;
                let name = caps.get(2)?;
                let next = source.next_code_line(caps.get(0)?.end());
                if next.is_some_and(|line| line.starts_with('{')) {
                    return None;
                }
                Some(error_at(
                    source,
                    kind.start(),
                    self.id(),
                    format!(
                        "`{} {}` has no body; add `{{ ... }}` after the declaration.",
                        kind.as_str(),
                        name.as_str()
                    ),
                ))
            })
            .collect()
    }
}

pub struct IncompleteControlRule;

impl Rule for IncompleteControlRule {
    fn id(&self) -> &'static str {
        "incomplete-control"
    }

    fn pass(&self) -> Pass {
        Pass::Incompleteness
    }

    fn description(&self) -> &'static str {
        "An `if`, `for`, `while` or `switch` header with nothing after it"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        CONTROL_HEADER
            .captures_iter(source.masked())
            .filter_map(|caps| {
                let keyword = caps.get(1)?;
                let next = source.next_code_line(caps.get(0)?.end());
                if next.is_some_and(|line| !line.starts_with('}')) {
                    return None;
                }
                Some(error_at(
                    source,
                    keyword.start(),
                    self.id(),
                    format!(
                        "`{} (...)` has no body; add a statement or `{{ ... }}` after it.",
                        keyword.as_str()
                    ),
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(rule: &dyn Rule, input: &str) -> Vec<Diagnostic> {
        rule.check(&SourceText::new(input))
    }

    #[test]
    fn test_bare_type_keyword() {
        let input = "class A {\n    void f() {\n        int;\n        double\n    }\n}";
        let diagnostics = run(&IncompleteDeclarationRule, input);
        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Line 3: Incomplete declaration: `int` needs a variable name, e.g. `int x = 0;`.",
                "Line 4: Incomplete declaration: `double` needs a variable name, e.g. `double x = 0.0;`.",
            ]
        );
        assert_eq!(diagnostics[0].location.column, 9);
    }

    #[test]
    fn test_split_declaration_is_fine() {
        let input = "String\n    name = \"Ada\";\nint x = 1;";
        assert!(run(&IncompleteDeclarationRule, input).is_empty());
    }

    #[test]
    fn test_type_keyword_inside_comment_is_ignored() {
        assert!(run(&IncompleteDeclarationRule, "/*\nint\n*/\nint x;").is_empty());
    }

    #[test]
    fn test_method_without_body() {
        let input = "class A {\n    public void run()\n    int x = 1;\n}";
        let diagnostics = run(&IncompleteMethodRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "Line 2: Method `run()` has no body; add `{ ... }` after the header."
        );
    }

    #[test]
    fn test_allman_method_is_fine() {
        let input = "class A {\n    public void run()\n    {\n    }\n}";
        assert!(run(&IncompleteMethodRule, input).is_empty());
    }

    #[test]
    fn test_return_of_call_is_not_a_method() {
        let input = "int f() {\n    return compute()\n}";
        assert!(run(&IncompleteMethodRule, input).is_empty());
    }

    #[test]
    fn test_class_without_body() {
        let diagnostics = run(&IncompleteClassRule, "public class Main\nint x;");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "Line 1: `class Main` has no body; add `{ ... }` after the declaration."
        );
        assert_eq!(diagnostics[0].location.column, 8);
    }

    #[test]
    fn test_class_with_body_on_next_line() {
        let input = "public class Dog extends Animal implements Pet\n{\n}";
        assert!(run(&IncompleteClassRule, input).is_empty());
        assert!(run(&IncompleteClassRule, "public class Main {\n}").is_empty());
    }

    #[test]
    fn test_control_header_followed_by_closing_brace() {
        let input = "void f() {\n    if (x > 0)\n}";
        let diagnostics = run(&IncompleteControlRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "Line 2: `if (...)` has no body; add a statement or `{ ... }` after it."
        );
    }

    #[test]
    fn test_control_header_at_end_of_input() {
        let diagnostics = run(&IncompleteControlRule, "for (int i = 0; i < 3; i++)");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.starts_with("Line 1: `for (...)`"));
    }

    #[test]
    fn test_single_statement_body_is_fine() {
        let input = "if (x > 0)\n    System.out.println(x);\nwhile (busy())\n{\n}";
        assert!(run(&IncompleteControlRule, input).is_empty());
    }

    #[test]
    fn test_else_if_header() {
        let input = "if (a) {\n} else if (b)\n}";
        let diagnostics = run(&IncompleteControlRule, input);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.line, 2);
    }
}
