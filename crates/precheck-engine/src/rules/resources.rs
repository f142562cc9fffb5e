//! Resource-usage checks for `Scanner` and the `java.io` readers/writers.
//!
//! The close check is deliberately shallow: any `<identifier>.close()` call
//! anywhere in the text counts as closing every resource, and the variable a
//! resource was bound to is not tracked. It can miss unclosed resources and
//! it can warn about resources that are closed through try-with-resources.

use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::Diagnostic;
use crate::rules::{Pass, Rule, error_at, warning_at};
use crate::source::SourceText;

struct Resource {
    class: &'static str,
    package: &'static str,
    closable: bool,
    constructor: Regex,
    import: Regex,
}

impl Resource {
    fn new(class: &'static str, package: &'static str, closable: bool) -> Self {
        let constructor = Regex::new(&format!(r"\bnew\s+({class})\s*(?:<[^>]*>)?\s*\(")).unwrap();
        let import = Regex::new(&format!(
            r"\bimport\s+{}\s*\.\s*(?:{class}|\*)\s*;",
            regex::escape(package).replace(r"\.", r"\s*\.\s*")
        ))
        .unwrap();

        Self {
            class,
            package,
            closable,
            constructor,
            import,
        }
    }

    /// Offset of the class name in the first `new Class(` expression.
    fn first_construction(&self, source: &SourceText) -> Option<usize> {
        self.constructor
            .captures(source.masked())
            .and_then(|c| c.get(1))
            .map(|m| m.start())
    }
}

static RESOURCES: LazyLock<Vec<Resource>> = LazyLock::new(|| {
    vec![
        Resource::new("Scanner", "java.util", true),
        Resource::new("BufferedReader", "java.io", true),
        Resource::new("InputStreamReader", "java.io", true),
        Resource::new("FileReader", "java.io", true),
        Resource::new("FileWriter", "java.io", true),
        Resource::new("PrintWriter", "java.io", true),
        Resource::new("File", "java.io", false),
    ]
});

static CLOSE_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z_]\w*\s*\.\s*close\s*\(\s*\)").unwrap());

pub struct MissingImportRule;

impl Rule for MissingImportRule {
    fn id(&self) -> &'static str {
        "missing-import"
    }

    fn pass(&self) -> Pass {
        Pass::Resources
    }

    fn description(&self) -> &'static str {
        "A `Scanner` or `java.io` class is constructed without being imported"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        RESOURCES
            .iter()
            .filter_map(|resource| {
                let at = resource.first_construction(source)?;
                if resource.import.is_match(source.masked()) {
                    return None;
                }
                Some(error_at(
                    source,
                    at,
                    self.id(),
                    format!(
                        "`{class}` is used without an import; add `import {package}.{class};` at the top of the file.",
                        class = resource.class,
                        package = resource.package,
                    ),
                ))
            })
            .collect()
    }
}

pub struct ResourceNotClosedRule;

impl Rule for ResourceNotClosedRule {
    fn id(&self) -> &'static str {
        "resource-not-closed"
    }

    fn pass(&self) -> Pass {
        Pass::Resources
    }

    fn description(&self) -> &'static str {
        "A closable resource is opened but no `.close()` call appears"
    }

    fn check(&self, source: &SourceText) -> Vec<Diagnostic> {
        if CLOSE_CALL.is_match(source.masked()) {
            return Vec::new();
        }

        RESOURCES
            .iter()
            .filter(|resource| resource.closable)
            .filter_map(|resource| {
                let at = resource.first_construction(source)?;
                Some(warning_at(
                    source,
                    at,
                    self.id(),
                    format!(
                        "`{}` is opened but never closed; call `.close()` on it when you are done.",
                        resource.class
                    ),
                ))
            })
            .collect()
    }
}
