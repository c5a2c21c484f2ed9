// ============================================================
// Layer 4 — Name Extractor
// ============================================================
// Turns a text unit into the ordered list of name mentions:
//
//   text ──tokenize──▶ tokens ──policy──▶ candidates ──lexicon──▶ mentions
//
// Order and duplicates are preserved: "Bob met Bob" yields two
// mentions. Extraction never mutates the input, so calling it
// twice on the same text gives the same result.

use crate::data::tokenizer::tokenize;
use crate::domain::lexicon::Lexicon;
use crate::domain::mention::NameMention;
use crate::domain::traits::NameCandidatePolicy;

pub struct NameExtractor<'a, P> {
    lexicon: &'a Lexicon,
    policy:  P,
}

impl<'a, P: NameCandidatePolicy> NameExtractor<'a, P> {
    pub fn new(lexicon: &'a Lexicon, policy: P) -> Self {
        Self { lexicon, policy }
    }

    /// Every name mention in `text`, in reading order, with spans.
    pub fn extract(&self, text: &str) -> Vec<NameMention> {
        tokenize(text)
            .into_iter()
            .filter(|tok| tok.is_word() && self.policy.is_candidate(tok.text))
            .filter_map(|tok| {
                self.lexicon
                    .gender_of(tok.text)
                    .map(|gender| NameMention::new(tok.text, gender, tok.span()))
            })
            .collect()
    }

    /// Just the surface forms of the mentions
    pub fn names(&self, text: &str) -> Vec<String> {
        self.extract(text).into_iter().map(|m| m.surface).collect()
    }
}
