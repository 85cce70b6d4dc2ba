//! Passage tokenizer.
//!
//! Walks the parsed passage tree and splits every text node into runs. Each
//! run becomes either a candidate word (a clickable unit, punctuation
//! segmented off both ends) or verbatim text. Elements and line breaks pass
//! through as structural tokens in source order.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::{escape_attribute, escape_text, Attribute, Document, Node};
use crate::marker;

/// A run is either a whitespace-bounded marker group (which may contain
/// spaces) or any maximal run of non-whitespace.
static RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:^|\s)[\[\(\{⟨¿¡“‘"«„]*\*[^*]+\*[",….:;?!\]\)\}⟩»”’\-–—]*(?:\s|$)|\S+"#,
    )
    .expect("Invalid run regex")
});

static PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[\[\(\{⟨¿¡“‘"«„]+"#).expect("Invalid prefix regex"));

static SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[",….:;?!\]\)\}⟩»”’\-–—]+$"#).expect("Invalid suffix regex"));

/// A candidate word with its surrounding punctuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Opening punctuation shown before the clickable span.
    pub prefix: String,
    /// Raw word text, answer markers still present.
    pub body: String,
    /// Closing punctuation shown after the clickable span.
    pub suffix: String,
}

/// One unit of the tokenized passage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Non-selectable text (whitespace, stand-alone punctuation).
    Text(String),
    LineBreak,
    /// Element start tag. Void elements have no matching `Close`.
    Open {
        name: String,
        attributes: Vec<Attribute>,
        void: bool,
    },
    Close(String),
    Word(Candidate),
}

/// Punctuation split off a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    pub prefix: &'a str,
    pub body: &'a str,
    pub suffix: &'a str,
}

/// Split leading and trailing punctuation off a run.
pub fn segment(run: &str) -> Segments<'_> {
    let prefix_len = PREFIX.find(run).map_or(0, |m| m.end());
    let (prefix, rest) = run.split_at(prefix_len);
    let suffix_start = SUFFIX.find(rest).map_or(rest.len(), |m| m.start());
    let (body, suffix) = rest.split_at(suffix_start);
    Segments {
        prefix,
        body,
        suffix,
    }
}

/// Tokenize passage markup.
pub fn tokenize(passage: &str) -> Vec<Token> {
    tokenize_document(&Document::parse(passage))
}

/// Tokenize an already parsed passage.
pub fn tokenize_document(document: &Document) -> Vec<Token> {
    let mut tokens = Vec::new();
    tokenize_nodes(document.nodes(), &mut tokens);
    tracing::debug!(
        tokens = tokens.len(),
        words = candidates(&tokens).count(),
        "tokenized passage"
    );
    tokens
}

fn tokenize_nodes(nodes: &[Node], tokens: &mut Vec<Token>) {
    for node in nodes {
        match node {
            Node::Text(text) => tokenize_text(text, tokens),
            Node::LineBreak => tokens.push(Token::LineBreak),
            Node::Element(element) => {
                let void = element.is_void();
                tokens.push(Token::Open {
                    name: element.name.clone(),
                    attributes: element.attributes.clone(),
                    void,
                });
                tokenize_nodes(&element.children, tokens);
                if !void {
                    tokens.push(Token::Close(element.name.clone()));
                }
            }
        }
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("\r\n", " ")
        .replace(['\u{a0}', '\n', '\r'], " ")
}

fn tokenize_text(text: &str, tokens: &mut Vec<Token>) {
    let text = normalize_whitespace(text);
    let mut cursor = 0;

    // Resume right after each trimmed run so a whitespace consumed by a
    // marker group can open the next one.
    while let Some(m) = RUN.find_at(&text, cursor) {
        let raw = m.as_str();
        let start = m.start() + (raw.len() - raw.trim_start().len());
        let run = raw.trim();
        if run.is_empty() {
            cursor = m.end();
            continue;
        }
        if start > cursor {
            push_text(tokens, " ");
        }
        push_run(run, tokens);
        cursor = start + run.len();
    }

    if cursor < text.len() {
        push_text(tokens, " ");
    }
}

fn push_run(run: &str, tokens: &mut Vec<Token>) {
    let Segments {
        prefix,
        body,
        suffix,
    } = segment(run);

    if !body.chars().any(char::is_alphanumeric) {
        push_text(tokens, &marker::strip(run));
        return;
    }

    tokens.push(Token::Word(Candidate {
        prefix: prefix.to_string(),
        body: body.to_string(),
        suffix: suffix.to_string(),
    }));
}

fn push_text(tokens: &mut Vec<Token>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Token::Text(last)) = tokens.last_mut() {
        // A run that stripped to nothing leaves its two separators adjacent.
        let text = if last.ends_with(' ') {
            text.strip_prefix(' ').unwrap_or(text)
        } else {
            text
        };
        last.push_str(text);
    } else {
        tokens.push(Token::Text(text.to_string()));
    }
}

/// Candidate words in reading order.
pub fn candidates(tokens: &[Token]) -> impl Iterator<Item = &Candidate> {
    tokens.iter().filter_map(|token| match token {
        Token::Word(candidate) => Some(candidate),
        _ => None,
    })
}

/// Serialize tokens back to HTML. `word` renders the clickable span of the
/// n-th candidate; prefix and suffix punctuation are placed around it.
pub fn render_with<F>(tokens: &[Token], mut word: F) -> String
where
    F: FnMut(usize, &Candidate) -> String,
{
    let mut html = String::new();
    let mut index = 0;
    for token in tokens {
        match token {
            Token::Text(text) => html.push_str(&escape_text(text)),
            Token::LineBreak => html.push_str("<br/>"),
            Token::Open {
                name, attributes, ..
            } => {
                html.push('<');
                html.push_str(name);
                for attr in attributes {
                    html.push_str(&format!(" {}=\"{}\"", attr.name, escape_attribute(&attr.value)));
                }
                html.push('>');
            }
            Token::Close(name) => html.push_str(&format!("</{name}>")),
            Token::Word(candidate) => {
                html.push_str(&escape_text(&candidate.prefix));
                html.push_str(&word(index, candidate));
                html.push_str(&escape_text(&candidate.suffix));
                index += 1;
            }
        }
    }
    html
}

/// Serialize tokens with every candidate wrapped in a plain option span.
pub fn render(tokens: &[Token]) -> String {
    render_with(tokens, |_, candidate| {
        format!(
            "<span role=\"option\">{}</span>",
            escape_text(&marker::parse(&candidate.body).text)
        )
    })
}

/// Visible text of the token stream, markers removed.
pub fn visible_text(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::LineBreak => out.push('\n'),
            Token::Word(candidate) => {
                out.push_str(&candidate.prefix);
                out.push_str(&marker::parse(&candidate.body).text);
                out.push_str(&candidate.suffix);
            }
            Token::Open { .. } | Token::Close(_) => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bodies(tokens: &[Token]) -> Vec<&str> {
        candidates(tokens).map(|c| c.body.as_str()).collect()
    }

    #[test]
    fn splits_sentence_into_words() {
        let tokens = tokenize("The *quick* brown fox.");
        assert_eq!(bodies(&tokens), vec!["The", "*quick*", "brown", "fox"]);
        let fox = candidates(&tokens).last().unwrap();
        assert_eq!(fox.suffix, ".");
    }

    #[test]
    fn segments_prefix_and_suffix() {
        let s = segment("(“hello”),");
        assert_eq!(s.prefix, "(“");
        assert_eq!(s.body, "hello");
        assert_eq!(s.suffix, "”),");
    }

    #[test]
    fn segment_of_pure_punctuation_is_not_duplicated() {
        let s = segment("\"");
        assert_eq!(s.prefix, "\"");
        assert_eq!(s.body, "");
        assert_eq!(s.suffix, "");
    }

    #[test]
    fn answer_keeps_trailing_comma_outside() {
        let tokens = tokenize("This is a *nice*, *flexible* content type.");
        let nice = candidates(&tokens).nth(3).unwrap();
        assert_eq!(nice.body, "*nice*");
        assert_eq!(nice.suffix, ",");
    }

    #[test]
    fn punctuation_only_run_is_not_a_candidate() {
        let tokens = tokenize("wait ... what?!");
        assert_eq!(bodies(&tokens), vec!["wait", "what"]);
        assert_eq!(visible_text(&tokens), "wait ... what?!");
    }

    #[test]
    fn nbsp_and_newlines_split_words() {
        let tokens = tokenize("one&nbsp;two\nthree");
        assert_eq!(bodies(&tokens), vec!["one", "two", "three"]);
    }

    #[test]
    fn dashes_and_single_quotes_are_punctuation() {
        let tokens = tokenize("*a*- *b*— ‘*c*’ end–");
        assert_eq!(bodies(&tokens), vec!["*a*", "*b*", "*c*", "end"]);
        let suffixes: Vec<&str> = candidates(&tokens).map(|c| c.suffix.as_str()).collect();
        assert_eq!(suffixes, vec!["-", "—", "’", "–"]);
        assert_eq!(candidates(&tokens).nth(2).unwrap().prefix, "‘");
    }

    #[test]
    fn stray_marker_run_leaves_single_space() {
        let tokens = tokenize("a * b");
        assert_eq!(
            tokens,
            vec![
                Token::Word(Candidate {
                    prefix: String::new(),
                    body: "a".into(),
                    suffix: String::new(),
                }),
                Token::Text(" ".into()),
                Token::Word(Candidate {
                    prefix: String::new(),
                    body: "b".into(),
                    suffix: String::new(),
                }),
            ]
        );
    }

    #[test]
    fn tokenizes_constructed_node_sequence() {
        let document = Document::from_nodes(vec![
            Node::Text("Find *it*".into()),
            Node::LineBreak,
            Node::Element(crate::document::Element {
                name: "em".into(),
                attributes: vec![Attribute {
                    name: "lang".into(),
                    value: "en".into(),
                }],
                children: vec![Node::Text("now.".into())],
            }),
        ]);
        let tokens = tokenize_document(&document);
        assert_eq!(bodies(&tokens), vec!["Find", "*it*", "now"]);
        assert_eq!(tokens[3], Token::LineBreak);
        assert_eq!(
            render(&tokens),
            r#"<span role="option">Find</span> <span role="option">it</span><br/><em lang="en"><span role="option">now</span>.</em>"#
        );
    }

    #[test]
    fn marker_group_with_spaces_is_one_run() {
        let tokens = tokenize("pick *two words* here");
        assert_eq!(bodies(&tokens), vec!["pick", "*two words*", "here"]);
    }

    #[test]
    fn adjacent_marker_groups() {
        let tokens = tokenize("*a b* *c d*");
        assert_eq!(bodies(&tokens), vec!["*a b*", "*c d*"]);
    }

    #[test]
    fn structure_is_preserved() {
        let tokens = tokenize(r#"<p class="a">Hello <strong>*big*</strong> world</p><p>Next<br>line</p>"#);
        let html = render(&tokens);
        assert_eq!(
            html,
            concat!(
                r#"<p class="a"><span role="option">Hello</span> "#,
                r#"<strong><span role="option">big</span></strong> "#,
                r#"<span role="option">world</span></p>"#,
                r#"<p><span role="option">Next</span><br/><span role="option">line</span></p>"#
            )
        );
    }

    #[test]
    fn visible_text_drops_markers_only() {
        let tokens = tokenize("The *quick* brown fox, a**b.");
        assert_eq!(visible_text(&tokens), "The quick brown fox, a*b.");
    }

    #[test]
    fn empty_passage_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert_eq!(candidates(&tokenize("   ")).count(), 0);
    }

    #[test]
    fn void_elements_have_no_close_token() {
        let tokens = tokenize(r#"see <img src="a.png"> here"#);
        assert!(tokens
            .iter()
            .any(|t| matches!(t, Token::Open { name, void: true, .. } if name == "img")));
        assert!(!tokens.iter().any(|t| matches!(t, Token::Close(n) if n == "img")));
    }
}
