//! Line table over a blob.
//!
//! The format is line-oriented, so decoding works on [`Line`]s rather than
//! on the raw string. Each line remembers its byte offset in the original
//! blob, which keeps diagnostic spans exact after indentation has been
//! stripped during recursion.

use interrupt_core::format::INDENT;

use crate::span::Span;

/// One line of the source, without its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'src> {
    text: &'src str,
    offset: usize,
}

impl<'src> Line<'src> {
    /// Returns the line content.
    pub(crate) fn text(&self) -> &'src str {
        self.text
    }

    /// Returns the span of the line content in the original blob.
    pub(crate) fn span(&self) -> Span {
        Span::new(self.offset..self.offset + self.text.len())
    }

    /// Returns `true` if the line holds only whitespace.
    pub(crate) fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Returns `true` if the line is exactly `marker`, ignoring trailing whitespace.
    pub(crate) fn is_marker(&self, marker: &str) -> bool {
        self.text.trim_end() == marker
    }

    /// Strip one level of indentation.
    ///
    /// Lines indented by less than a full level lose whatever leading
    /// spaces they have.
    fn dedent(self) -> Self {
        let strip = self
            .text
            .bytes()
            .take(INDENT.len())
            .take_while(|b| *b == b' ')
            .count();
        Self {
            text: &self.text[strip..],
            offset: self.offset + strip,
        }
    }
}

/// Split a blob into lines, accepting both `\n` and `\r\n` terminators.
pub(crate) fn split(source: &str) -> Vec<Line<'_>> {
    let mut offset = 0;
    source
        .split('\n')
        .map(|raw| {
            let line = Line {
                text: raw.strip_suffix('\r').unwrap_or(raw),
                offset,
            };
            offset += raw.len() + 1;
            line
        })
        .collect()
}

/// Strip one level of indentation from every line.
pub(crate) fn dedent<'src>(lines: &[Line<'src>]) -> Vec<Line<'src>> {
    lines.iter().map(|line| line.dedent()).collect()
}

/// Drop leading and trailing blank lines.
pub(crate) fn trim_blank<'a, 'src>(lines: &'a [Line<'src>]) -> &'a [Line<'src>] {
    let start = lines
        .iter()
        .position(|line| !line.is_blank())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|line| !line.is_blank())
        .map_or(start, |index| index + 1);
    &lines[start..end.max(start)]
}

/// Join lines back into text.
pub(crate) fn join(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(|line| line.text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Span covering a run of lines.
pub(crate) fn span(lines: &[Line<'_>]) -> Span {
    match (lines.first(), lines.last()) {
        (Some(first), Some(last)) => first.span().union(last.span()),
        _ => Span::default(),
    }
}

/// Map a 1-based line and column within [`join`]ed text back to the blob.
pub(crate) fn locate(lines: &[Line<'_>], line: usize, column: usize) -> Span {
    let Some(target) = lines.get(line.saturating_sub(1)).or(lines.last()) else {
        return Span::default();
    };
    let mut column = column.saturating_sub(1).min(target.text.len());
    while !target.text.is_char_boundary(column) {
        column -= 1;
    }
    let start = target.offset + column;
    let end = target.text[column..]
        .chars()
        .next()
        .map_or(start, |c| start + c.len_utf8());
    Span::new(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tracks_offsets() {
        let lines = split("ab\r\ncd\n\nef");
        let texts: Vec<_> = lines.iter().map(Line::text).collect();
        assert_eq!(texts, ["ab", "cd", "", "ef"]);
        assert_eq!(lines[1].span(), Span::new(4..6));
        assert_eq!(lines[3].span(), Span::new(8..10));
    }

    #[test]
    fn test_dedent_strips_one_level() {
        let source = "        nested\n    level\n  short\n\nflush";
        let lines = dedent(&split(source));
        let texts: Vec<_> = lines.iter().map(Line::text).collect();
        assert_eq!(texts, ["    nested", "level", "short", "", "flush"]);
        assert_eq!(&source[lines[1].span().start()..lines[1].span().end()], "level");
    }

    #[test]
    fn test_trim_blank() {
        let lines = split("\n  \nbody\n\nmore\n\n");
        let trimmed = trim_blank(&lines);
        assert_eq!(join(trimmed), "body\n\nmore");
        assert!(trim_blank(&split("\n\n")).is_empty());
    }

    #[test]
    fn test_locate_maps_back() {
        let source = "head\n    {\n        \"a\" 1\n    }";
        let lines = dedent(&split(source)[1..]);
        // `1` sits at line 2, column 9 of the dedented text
        let span = locate(&lines, 2, 9);
        assert_eq!(&source[span.start()..span.end()], "1");
    }

    #[test]
    fn test_is_marker() {
        let lines = split("cause:  \n    cause:");
        assert!(lines[0].is_marker("cause:"));
        assert!(!lines[1].is_marker("cause:"));
    }
}
