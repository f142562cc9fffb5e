use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::Diagnostic;
use crate::rules::{Pass, Rule, warning_at};
use crate::source::SourceText;

static TYPE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:class|interface|enum|record)\s+([A-Za-z_$][\w$]*)").unwrap()
});

pub struct ClassNamingRule;

impl Rule for ClassNamingRule {
    fn id(&self) -> &'static str {
        "class-naming"
    }

    fn pass(&self) -> Pass {
        Pass::Naming
    }

    fn description(&self) -> &'static str {
        "The class name is not written in PascalCase"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        let Some(name) = TYPE_NAME.captures(source.masked()).and_then(|c| c.get(1)) else {
            return Vec::new();
        };

        if is_pascal_case(name.as_str()) {
            return Vec::new();
        }

        vec![warning_at(
            source,
            name.start(),
            self.id(),
            format!(
                "Class name `{}` does not follow Java naming conventions; use PascalCase such as `{}`.",
                name.as_str(),
                to_pascal_case(name.as_str())
            ),
        )]
    }
}

fn is_pascal_case(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_uppercase()) && !name.contains('_')
}

fn to_pascal_case(name: &str) -> String {
    name.split(['_', '$'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
