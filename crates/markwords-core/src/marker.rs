//! Answer-marker grammar.
//!
//! Authors mark answers as `*word*`. A doubled marker `**` is an escaped
//! literal `*` and never delimits an answer. A word is an answer when its
//! first and last elements are unescaped markers with at least one visible
//! character between them. Any other unescaped marker is stripped.

/// The answer delimiter.
pub const MARKER: char = '*';

/// Result of applying the marker grammar to one word body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marked {
    /// Text with markers removed and escapes collapsed.
    pub text: String,
    pub is_answer: bool,
    /// Unescaped markers that did not delimit an answer.
    pub stray_markers: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    Marker,
    Char(char),
}

fn scan(body: &str) -> Vec<Piece> {
    let mut pieces = Vec::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != MARKER {
            pieces.push(Piece::Char(c));
        } else if chars.peek() == Some(&MARKER) {
            chars.next();
            pieces.push(Piece::Char(MARKER));
        } else {
            pieces.push(Piece::Marker);
        }
    }
    pieces
}

/// Apply the marker grammar to a word body (punctuation already segmented).
pub fn parse(body: &str) -> Marked {
    let pieces = scan(body);

    let delimited = pieces.len() > 2
        && pieces.first() == Some(&Piece::Marker)
        && pieces.last() == Some(&Piece::Marker);
    let inner = if delimited {
        &pieces[1..pieces.len() - 1]
    } else {
        &pieces[..]
    };
    let is_answer = delimited
        && inner
            .iter()
            .any(|p| matches!(p, Piece::Char(c) if !c.is_whitespace()));

    let text: String = inner
        .iter()
        .filter_map(|p| match p {
            Piece::Char(c) => Some(*c),
            Piece::Marker => None,
        })
        .collect();
    let total_markers = pieces.iter().filter(|p| **p == Piece::Marker).count();
    let stray_markers = if is_answer {
        total_markers - 2
    } else {
        total_markers
    };

    Marked {
        text,
        is_answer,
        stray_markers,
    }
}

/// Remove markers from free text, collapsing escapes.
pub fn strip(text: &str) -> String {
    scan(text)
        .into_iter()
        .filter_map(|p| match p {
            Piece::Char(c) => Some(c),
            Piece::Marker => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimited_word_is_an_answer() {
        let m = parse("*nice*");
        assert!(m.is_answer);
        assert_eq!(m.text, "nice");
        assert_eq!(m.stray_markers, 0);
    }

    #[test]
    fn escaped_marker_collapses_to_literal() {
        let m = parse("a**b");
        assert!(!m.is_answer);
        assert_eq!(m.text, "a*b");
    }

    #[test]
    fn escaped_markers_never_delimit() {
        let m = parse("**not**");
        assert!(!m.is_answer);
        assert_eq!(m.text, "*not*");
        assert_eq!(m.stray_markers, 0);
    }

    #[test]
    fn escape_inside_answer_is_kept() {
        let m = parse("*a**b*");
        assert!(m.is_answer);
        assert_eq!(m.text, "a*b");
    }

    #[test]
    fn too_short_is_not_an_answer() {
        let m = parse("**");
        assert!(!m.is_answer);
        assert_eq!(m.text, "*");

        let m = parse("* *");
        assert!(!m.is_answer);
    }

    #[test]
    fn unmatched_marker_is_stripped() {
        let m = parse("*open");
        assert!(!m.is_answer);
        assert_eq!(m.text, "open");
        assert_eq!(m.stray_markers, 1);

        let m = parse("mid*dle");
        assert_eq!(m.text, "middle");
        assert_eq!(m.stray_markers, 1);
    }

    #[test]
    fn multi_word_answer() {
        let m = parse("*two words*");
        assert!(m.is_answer);
        assert_eq!(m.text, "two words");
    }

    #[test]
    fn strip_free_text() {
        assert_eq!(strip("a *b* c**d"), "a b c*d");
    }
}
