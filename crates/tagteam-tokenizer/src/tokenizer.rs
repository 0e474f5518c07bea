//! Offset-preserving tokenization
//!
//! Word tokens cover `[A-Za-z0-9_-]` runs; clitic contractions (`'s`, `n't`,
//! `'ll`, ...) come off as their own tokens; any other single character is a
//! punctuation token. Whitespace is skipped. Tokenization is total and
//! idempotent: it never fails and re-tokenizing the joined output changes
//! nothing.

use serde::{Deserialize, Serialize};

/// A token with character offsets into the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    #[must_use]
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Clitic tokens attach to the previous word with no leading space.
    #[must_use]
    pub fn is_clitic(&self) -> bool {
        matches!(
            self.text.to_lowercase().as_str(),
            "'s" | "n't" | "'ll" | "'re" | "'ve" | "'d" | "'m"
        )
    }
}

/// A sentence span produced by [`Tokenizer::sentence_split`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceSpan {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

const CONTRACTION_SUFFIXES: &[&str] = &["'ll", "'re", "'ve", "'s", "'d", "'m"];

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Rule-based tokenizer; stateless and cheap to construct.
#[derive(Debug, Default, Clone)]
pub struct Tokenizer;

impl Tokenizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Tokenize `text` into word, contraction, and punctuation tokens.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut tokens = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            let (pos, c) = chars[i];
            if c.is_whitespace() {
                i += 1;
                continue;
            }
            if is_word_char(c) {
                let mut j = i;
                while j < chars.len() && is_word_char(chars[j].1) {
                    j += 1;
                }
                let word_start = pos;
                let word_end = end_offset(text, &chars, j);
                let word = &text[word_start..word_end];

                // "n't": the n belongs to the clitic, not the stem.
                if j < chars.len()
                    && chars[j].1 == '\''
                    && word.len() > 1
                    && word.ends_with(['n', 'N'])
                    && matches_at(&chars, j + 1, "t")
                {
                    let n_start = end_offset(text, &chars, j - 1);
                    tokens.push(Token::new(&text[word_start..n_start], word_start, n_start));
                    let clitic_end = end_offset(text, &chars, j + 2);
                    tokens.push(Token::new(&text[n_start..clitic_end], n_start, clitic_end));
                    i = j + 2;
                    continue;
                }

                tokens.push(Token::new(word, word_start, word_end));

                if j < chars.len() && chars[j].1 == '\'' {
                    if let Some(suffix) = CONTRACTION_SUFFIXES
                        .iter()
                        .find(|s| matches_at(&chars, j + 1, &s[1..]))
                    {
                        let clitic_end = end_offset(text, &chars, j + suffix.len());
                        tokens.push(Token::new(&text[word_end..clitic_end], word_end, clitic_end));
                        i = j + suffix.len();
                        continue;
                    }
                }
                i = j;
                continue;
            }
            // Single-character punctuation.
            let end = end_offset(text, &chars, i + 1);
            tokens.push(Token::new(&text[pos..end], pos, end));
            i += 1;
        }
        tokens
    }

    /// Split on `.`/`!`/`?` followed by whitespace or end of input. No
    /// abbreviation disambiguation is attempted.
    #[must_use]
    pub fn sentence_split(&self, text: &str) -> Vec<SentenceSpan> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut spans = Vec::new();
        let mut sent_start = 0;
        let mut i = 0;
        while i < chars.len() {
            let (pos, c) = chars[i];
            if matches!(c, '.' | '!' | '?') {
                let next_is_boundary =
                    i + 1 >= chars.len() || chars[i + 1].1.is_whitespace();
                if next_is_boundary {
                    let end = end_offset(text, &chars, i + 1);
                    let slice = text[sent_start..end].trim();
                    if !slice.is_empty() {
                        let lead = text[sent_start..end].len() - text[sent_start..end].trim_start().len();
                        spans.push(SentenceSpan {
                            text: slice.to_string(),
                            start: sent_start + lead,
                            end,
                        });
                    }
                    sent_start = end;
                    i += 1;
                    continue;
                }
            }
            let _ = pos;
            i += 1;
        }
        let tail = text[sent_start..].trim();
        if !tail.is_empty() {
            let lead = text[sent_start..].len() - text[sent_start..].trim_start().len();
            spans.push(SentenceSpan {
                text: tail.to_string(),
                start: sent_start + lead,
                end: text.len(),
            });
        }
        spans
    }
}

/// Byte offset of the character at index `idx`, or end of text.
fn end_offset(text: &str, chars: &[(usize, char)], idx: usize) -> usize {
    chars.get(idx).map_or(text.len(), |&(p, _)| p)
}

fn matches_at(chars: &[(usize, char)], from: usize, expected: &str) -> bool {
    let mut idx = from;
    for e in expected.chars() {
        match chars.get(idx) {
            Some(&(_, c)) if c.eq_ignore_ascii_case(&e) => idx += 1,
            _ => return false,
        }
    }
    // The clitic must not run into further word characters.
    chars.get(idx).map_or(true, |&(_, c)| !is_word_char(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        Tokenizer::new()
            .tokenize(text)
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn splits_words_and_punctuation() {
        assert_eq!(words("The doctor arrived."), vec!["The", "doctor", "arrived", "."]);
    }

    #[test]
    fn keeps_hyphens_and_digits_inside_words() {
        assert_eq!(words("a 2-day follow-up"), vec!["a", "2-day", "follow-up"]);
    }

    #[test]
    fn separates_contractions() {
        assert_eq!(words("The patient's chart"), vec!["The", "patient", "'s", "chart"]);
        assert_eq!(words("doesn't"), vec!["does", "n't"]);
        assert_eq!(words("they'll I'm we've he'd you're"),
            vec!["they", "'ll", "I", "'m", "we", "'ve", "he", "'d", "you", "'re"]);
    }

    #[test]
    fn offsets_cover_source_spans() {
        let text = "The patient's chart";
        for token in Tokenizer::new().tokenize(text) {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn clitic_flag() {
        let tokens = Tokenizer::new().tokenize("isn't hers");
        assert!(tokens[1].is_clitic());
        assert!(!tokens[0].is_clitic());
    }

    #[test]
    fn sentence_split_on_terminators() {
        let spans = Tokenizer::new().sentence_split("First here. Second there! Third?");
        let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["First here.", "Second there!", "Third?"]);
    }

    #[test]
    fn sentence_split_no_boundary_inside_numbers() {
        // "." not followed by whitespace does not split
        let spans = Tokenizer::new().sentence_split("Version 2.5 shipped");
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn tokenize_never_fails_on_odd_input() {
        assert!(words("").is_empty());
        assert_eq!(words("''"), vec!["'", "'"]);
        assert_eq!(words("…—é"), vec!["…", "—", "é"]);
    }

    mod properties {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn offsets_always_slice_to_token_text(text in ".{0,200}") {
                for token in Tokenizer::new().tokenize(&text) {
                    prop_assert_eq!(&text[token.start..token.end], token.text.as_str());
                }
            }

            #[test]
            fn tokens_are_ordered_and_disjoint(text in ".{0,200}") {
                let tokens = Tokenizer::new().tokenize(&text);
                for pair in tokens.windows(2) {
                    prop_assert!(pair[0].end <= pair[1].start);
                }
            }

            #[test]
            fn sentence_spans_cover_their_text(text in "[a-zA-Z .!?]{0,120}") {
                for span in Tokenizer::new().sentence_split(&text) {
                    prop_assert_eq!(text[span.start..span.end].trim(), span.text.as_str());
                }
            }
        }
    }
}
