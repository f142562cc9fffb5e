use tower_lsp_server::ls_types::*;

use precheck_engine::Severity as PrecheckSeverity;

/// Convert byte offset to LSP Position (line/character in UTF-16)
pub(crate) fn offset_to_position(text: &str, offset: usize) -> Position {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }

    let before = &text[..offset];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |nl| nl + 1);
    let character: usize = before[line_start..].chars().map(char::len_utf16).sum();

    Position {
        line: line as u32,
        character: character as u32,
    }
}

/// Offsets reported by the engine are relative to the trimmed text; this is
/// how far into the document that text starts.
pub(crate) fn leading_trim(text: &str) -> usize {
    text.len() - text.trim_start().len()
}

/// Convert precheck Diagnostic to LSP Diagnostic
pub(crate) fn convert_diagnostic(diag: &precheck_engine::Diagnostic, text: &str) -> Diagnostic {
    let start_offset = leading_trim(text) + diag.location.offset;
    let end_offset = text
        .get(start_offset..)
        .and_then(|rest| rest.find(['\n', '\r']))
        .map_or(text.len(), |i| start_offset + i);

    let severity = match diag.severity {
        PrecheckSeverity::Error => DiagnosticSeverity::ERROR,
        PrecheckSeverity::Warning => DiagnosticSeverity::WARNING,
    };

    Diagnostic {
        range: Range {
            start: offset_to_position(text, start_offset),
            end: offset_to_position(text, end_offset),
        },
        severity: Some(severity),
        code: Some(NumberOrString::String(diag.code.clone())),
        source: Some("precheck".to_string()),
        message: diag.message.clone(),
        ..Default::default()
    }
}

/// Published instead of analysing a document above the size limit.
pub(crate) fn input_too_large(len: usize, limit: usize) -> Diagnostic {
    Diagnostic {
        range: Range::default(),
        severity: Some(DiagnosticSeverity::ERROR),
        code: Some(NumberOrString::String("input-too-large".to_string())),
        source: Some("precheck".to_string()),
        message: format!(
            "Document is {len} bytes, above the {limit}-byte limit; it was not checked."
        ),
        ..Default::default()
    }
}
