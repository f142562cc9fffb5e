//! Offset to line/column translation.

/// Convert a byte offset into a 1-based `(line, column)` pair.
///
/// The function is total: negative offsets clamp to the start of the buffer,
/// offsets past the end clamp to its end, and an offset that falls inside a
/// multi-byte character is moved back to the start of that character.
/// Columns count characters since the last newline.
pub fn offset_to_line_col(input: &str, offset: isize) -> (usize, usize) {
    let mut offset = usize::try_from(offset).unwrap_or(0).min(input.len());
    while !input.is_char_boundary(offset) {
        offset -= 1;
    }

    let before = &input[..offset];
    let line = 1 + before.bytes().filter(|&b| b == b'\n').count();
    let line_start = before.rfind('\n').map_or(0, |nl| nl + 1);
    let column = 1 + before[line_start..].chars().count();

    (line, column)
}
