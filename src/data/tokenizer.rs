// ============================================================
// Layer 4 — Word Tokenizer
// ============================================================
// Splits a text unit into word and punctuation tokens, keeping
// the byte span of every token so mentions can later be
// rewritten in place.
//
// Rules (Treebank-like, enough for name matching):
//   - a word is a run of alphanumeric characters, optionally
//     joined by single internal hyphens  ("Mary-Jane", "x2")
//   - an apostrophe between letters stays inside the word
//                                        ("O'Neil", "D'Andre")
//   - the English contraction endings 's 'll 're 've 'm 'd and
//     n't split off when they end a word ("Bob's" → "Bob", "'s";
//                                         "don't" → "do", "n't")
//   - any other non-whitespace character is a one-char token
//   - whitespace separates tokens and is never emitted
//
// Example:
//   "Bob met Mary-Jane's dog." →
//     ["Bob", "met", "Mary-Jane", "'s", "dog", "."]

use std::ops::Range;

/// Endings that split off as their own token after an apostrophe
const CLITICS: [&str; 6] = ["s", "ll", "re", "ve", "m", "d"];

/// A token borrowed from the input, with its byte offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text:  &'a str,
    pub start: usize,
    pub end:   usize,
}

impl<'a> Token<'a> {
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// True when the token contains at least one letter or digit
    pub fn is_word(&self) -> bool {
        self.text.chars().any(char::is_alphanumeric)
    }
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// The letters after the apostrophe at `at`: (end index, lowercased
/// letters, whether the word stops there)
fn apostrophe_tail(chars: &[(usize, char)], at: usize) -> (usize, String, bool) {
    let mut end = at + 1;
    while end < chars.len() && chars[end].1.is_alphabetic() {
        end += 1;
    }
    let tail: String = chars[at + 1..end]
        .iter()
        .flat_map(|(_, c)| c.to_lowercase())
        .collect();
    let ends_word = chars.get(end).map_or(true, |(_, n)| !n.is_alphanumeric());
    (end, tail, ends_word)
}

/// Tokenize `text` into word and punctuation tokens in order.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |i: usize| chars.get(i).map(|(b, _)| *b).unwrap_or(text.len());
    let letter_at = |i: usize| chars.get(i).map_or(false, |(_, n)| n.is_alphabetic());

    let mut tokens = Vec::new();
    let mut i      = 0usize;

    while i < chars.len() {
        let c = chars[i].1;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let start = i;

        if c.is_alphanumeric() {
            i += 1;
            while i < chars.len() {
                let ch = chars[i].1;
                if ch.is_alphanumeric() {
                    i += 1;
                } else if ch == '-'
                    && chars.get(i + 1).map_or(false, |(_, n)| n.is_alphanumeric())
                {
                    i += 2;
                } else if is_apostrophe(ch) && letter_at(i + 1) {
                    let (tail_end, tail, ends_word) = apostrophe_tail(&chars, i);

                    if ends_word && CLITICS.contains(&tail.as_str()) {
                        break;
                    }
                    if ends_word && tail == "t" && matches!(chars[i - 1].1, 'n' | 'N') {
                        if i - 1 > start {
                            // "don't": the word stops before the n
                            i -= 1;
                        } else {
                            // this token is the "n't" itself
                            i = tail_end;
                        }
                        break;
                    }
                    i += 1;
                } else {
                    break;
                }
            }
        } else if is_apostrophe(c) && letter_at(i + 1) {
            let (tail_end, tail, ends_word) = apostrophe_tail(&chars, i);
            // 's after a split; a quote before a word is plain punctuation
            i = if ends_word && CLITICS.contains(&tail.as_str()) { tail_end } else { i + 1 };
        } else {
            i += 1;
        }

        let (s, e) = (byte_at(start), byte_at(i));
        tokens.push(Token { text: &text[s..e], start: s, end: e });
    }

    tokens
}
