//! Text normalization and tokenization

use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Tokens shorter than this are dropped unless they are known acronyms.
const MIN_TOKEN_CHARS: usize = 2;

/// Technical terms whose punctuation must survive normalization intact.
const TECH_TERM_ALLOWLIST: [&str; 14] = [
    "c++", "c#", "f#", ".net", "node.js", "react.js", "vue.js", "next.js", "asp.net", "ci/cd",
    "objective-c", "d3.js", "three.js", "express.js",
];

/// Short tokens that are meaningful despite falling under the length floor.
const SHORT_ACRONYMS: [&str; 12] = [
    "r", "c", "ai", "ui", "ux", "qa", "ml", "ci", "cd", "db", "bi", "go",
];

/// Punctuation stripped from token edges before the allow-list check.
/// '+' and '#' are deliberately absent so "c++" and "c#" keep their tails.
const EDGE_PUNCTUATION: &[char] = &[
    '.', ',', ':', ';', '!', '?', '(', ')', '[', ']', '{', '}', '"', '\'', '`', '*', '<', '>',
];

/// Deterministic, locale-independent tokenizer. Lower-cases, folds
/// diacritics and typographic punctuation to ASCII, splits on whitespace,
/// commas, semicolons and bullet characters, and strips punctuation outside
/// letters/digits/hyphen/plus, except for allow-listed technical terms.
pub struct Normalizer {
    allowlist: HashSet<&'static str>,
    acronyms: HashSet<&'static str>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            allowlist: TECH_TERM_ALLOWLIST.iter().copied().collect(),
            acronyms: SHORT_ACRONYMS.iter().copied().collect(),
        }
    }

    /// Normalize text into a sequence of tokens.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let folded = fold_to_ascii(text);

        folded
            .split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '•' | '·' | '‣' | '▪'))
            .filter_map(|raw| self.clean_token(raw))
            .collect()
    }

    /// Contiguous n-gram phrases over a token sequence, joined with spaces.
    pub fn ngrams(&self, tokens: &[String], n: usize) -> Vec<String> {
        if n == 0 || tokens.len() < n {
            return Vec::new();
        }
        tokens.windows(n).map(|w| w.join(" ")).collect()
    }

    fn clean_token(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim_matches(|c: char| EDGE_PUNCTUATION.contains(&c));
        if trimmed.is_empty() {
            return None;
        }
        if self.allowlist.contains(trimmed) {
            return Some(trimmed.to_string());
        }

        let filtered: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '+')
            .collect();
        let token = filtered.trim_matches('-');
        if token.is_empty() {
            return None;
        }
        if token.chars().count() < MIN_TOKEN_CHARS && !self.acronyms.contains(token) {
            return None;
        }
        Some(token.to_string())
    }
}

/// Lower-cases and folds typographic punctuation and common Latin
/// diacritics to their ASCII base characters.
fn fold_to_ascii(text: &str) -> String {
    text.chars()
        .flat_map(|c| c.to_lowercase())
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2026}' => '.',
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
            'è' | 'é' | 'ê' | 'ë' => 'e',
            'ì' | 'í' | 'î' | 'ï' => 'i',
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
            'ù' | 'ú' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            'ý' | 'ÿ' => 'y',
            _ => c,
        })
        .collect()
}

/// Suffix-stripped lexical variants of a single word, so a conjugated form
/// still matches its base ("managing" and "managed" both yield "manage").
pub fn lexical_variants(word: &str) -> Vec<String> {
    let mut variants = Vec::new();

    if let Some(stem) = word.strip_suffix("ing") {
        if stem.graphemes(true).count() >= 3 {
            variants.push(stem.to_string());
            variants.push(format!("{stem}e"));
        }
    } else if let Some(stem) = word.strip_suffix("ed") {
        if stem.graphemes(true).count() >= 3 {
            variants.push(stem.to_string());
            variants.push(format!("{stem}e"));
        }
    } else if let Some(stem) = word.strip_suffix('s') {
        if stem.graphemes(true).count() >= 3 && !word.ends_with("ss") {
            variants.push(stem.to_string());
        }
    }

    variants
}
