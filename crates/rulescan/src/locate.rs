//! Offset to line/column translation for diagnostics.
//!
//! Offsets are byte offsets into the source text. Columns are counted in
//! `char`s from the start of the line so that a caret printed under the
//! source line lines up with what a terminal shows.

/// Position of an offset within the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// 1-based line number.
    pub line: usize,
    /// 0-based column, in characters.
    pub column: usize,
    /// Byte offset of the first character of the line.
    pub line_start: usize,
    /// The line content, without its terminator.
    pub text: String,
}

impl Location {
    /// Returns `true` if the located line spans the entire input.
    #[must_use]
    pub fn is_whole_input(&self, input: &str) -> bool {
        self.line_start == 0 && self.text.len() == input.len()
    }
}

/// Locates `offset` within `input`.
///
/// Lines end at `\r\n`, `\n` or `\r`. An offset pointing into a terminator
/// belongs to the line the terminator ends; offsets past the end of the input
/// are clamped to its length.
#[must_use]
pub fn locate(input: &str, offset: usize) -> Location {
    let offset = offset.min(input.len());
    let bytes = input.as_bytes();

    let mut line = 1;
    let mut start = 0;
    loop {
        let content_end = bytes[start..]
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
            .map_or(bytes.len(), |i| start + i);
        let next_start = match bytes.get(content_end) {
            Some(b'\r') if bytes.get(content_end + 1) == Some(&b'\n') => content_end + 2,
            Some(_) => content_end + 1,
            None => content_end,
        };

        if offset < next_start || content_end == bytes.len() {
            let clipped = offset.min(content_end);
            return Location {
                line,
                column: input[start..floor_char_boundary(input, clipped)]
                    .chars()
                    .count(),
                line_start: start,
                text: input[start..content_end].to_string(),
            };
        }

        line += 1;
        start = next_start;
    }
}

fn floor_char_boundary(input: &str, mut index: usize) -> usize {
    while !input.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Renders a diagnostic: `description`, then ` (line: N)` unless the line is
/// the whole input, then the source line and a caret under the column.
#[must_use]
pub fn render_snippet(description: &str, input: &str, location: &Location) -> String {
    let mut out = String::with_capacity(description.len() + 2 * location.text.len() + 16);
    out.push_str(description);
    if !location.is_whole_input(input) {
        out.push_str(&format!(" (line: {})", location.line));
    }
    out.push('\n');
    out.push_str(&location.text);
    out.push('\n');
    out.extend(core::iter::repeat_n(' ', location.column));
    out.push('^');
    out
}
