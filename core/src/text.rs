// Column helpers. Token offsets and positions count UTF-16 code units, string slicing needs bytes.

// Convert a UTF-16 column to a byte offset into `line`, clamped to the end of the line.
pub(crate) fn utf16_to_byte(line: &str, column: usize) -> usize {
    if line.is_ascii() {
        return column.min(line.len());
    }

    let mut seen_utf16 = 0usize;
    for (idx, ch) in line.char_indices() {
        if seen_utf16 >= column {
            return idx;
        }
        seen_utf16 += ch.len_utf16();
    }
    line.len()
}

// Slice `line` between two UTF-16 columns. Inverted or out-of-range columns yield a clamped slice.
pub(crate) fn slice_utf16(line: &str, start: usize, end: usize) -> &str {
    let start = utf16_to_byte(line, start);
    let end = utf16_to_byte(line, end).max(start);
    &line[start..end]
}

pub(crate) fn utf16_len(line: &str) -> usize {
    if line.is_ascii() {
        line.len()
    } else {
        line.encode_utf16().count()
    }
}
