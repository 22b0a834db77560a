//! Keyword extraction from job postings

use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use super::lexicon::Lexicon;
use super::normalizer::{lexical_variants, Normalizer};

/// Extracted keyword sets are capped to keep matcher cost bounded and the
/// missing-keyword report actionable.
pub const MAX_KEYWORDS: usize = 40;

pub const TITLE_MULTIPLIER: f64 = 3.0;
pub const REQUIREMENTS_MULTIPLIER: f64 = 2.0;
pub const BODY_MULTIPLIER: f64 = 1.0;

/// Where a term was observed in the posting. Terms seen in several spans
/// keep the highest multiplier while frequency accumulates across spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceSpan {
    Title,
    Requirements,
    Body,
}

impl SourceSpan {
    pub fn multiplier(self) -> f64 {
        match self {
            SourceSpan::Title => TITLE_MULTIPLIER,
            SourceSpan::Requirements => REQUIREMENTS_MULTIPLIER,
            SourceSpan::Body => BODY_MULTIPLIER,
        }
    }
}

/// A weighted term extracted from a job posting. Ephemeral: built fresh per
/// scoring call and discarded afterwards.
#[derive(Debug, Clone)]
pub struct Keyword {
    pub term: String,
    pub weight: f64,
    pub source: SourceSpan,
    pub variants: Vec<String>,
}

struct Accum {
    freq: u32,
    multiplier: f64,
    source: SourceSpan,
    first_seen: usize,
}

pub struct KeywordExtractor<'a> {
    normalizer: &'a Normalizer,
    lexicon: &'a Lexicon,
    max_keywords: usize,
    requirements_marker: Regex,
}

impl<'a> KeywordExtractor<'a> {
    pub fn new(normalizer: &'a Normalizer, lexicon: &'a Lexicon) -> Self {
        Self::with_cap(normalizer, lexicon, MAX_KEYWORDS)
    }

    pub fn with_cap(normalizer: &'a Normalizer, lexicon: &'a Lexicon, max_keywords: usize) -> Self {
        let requirements_marker =
            Regex::new(r"(?i)\b(required|must[ -]have|qualifications|requirements)\b")
                .expect("requirements marker regex");
        Self {
            normalizer,
            lexicon,
            max_keywords,
            requirements_marker,
        }
    }

    /// Extract a ranked keyword set from the posting title and description.
    pub fn extract(&self, title: &str, description: &str) -> Vec<Keyword> {
        let mut table: HashMap<String, Accum> = HashMap::new();
        let mut order = 0usize;

        self.collect_span(title, SourceSpan::Title, &mut table, &mut order);
        for line in description.lines() {
            let span = self.classify_line(line);
            self.collect_span(line, span, &mut table, &mut order);
        }

        let mut ranked: Vec<(Keyword, usize)> = table
            .into_iter()
            .map(|(term, acc)| {
                let variants = if term.contains(' ') {
                    Vec::new()
                } else {
                    lexical_variants(&term)
                };
                let keyword = Keyword {
                    weight: acc.freq as f64 * acc.multiplier,
                    source: acc.source,
                    variants,
                    term,
                };
                (keyword, acc.first_seen)
            })
            .collect();

        // Weight descending; ties resolve to first-seen order, which puts
        // title terms ahead of body terms.
        ranked.sort_by(|(a, a_seen), (b, b_seen)| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(Ordering::Equal)
                .then(a_seen.cmp(b_seen))
        });
        ranked.truncate(self.max_keywords);

        ranked.into_iter().map(|(keyword, _)| keyword).collect()
    }

    /// A description line counts as a requirements line if it starts with a
    /// bullet marker or carries a requirements phrase.
    fn classify_line(&self, line: &str) -> SourceSpan {
        if is_bullet_line(line.trim_start()) || self.requirements_marker.is_match(line) {
            SourceSpan::Requirements
        } else {
            SourceSpan::Body
        }
    }

    fn collect_span(
        &self,
        text: &str,
        span: SourceSpan,
        table: &mut HashMap<String, Accum>,
        order: &mut usize,
    ) {
        let tokens = self.normalizer.normalize(text);
        if tokens.is_empty() {
            return;
        }

        let line = tokens.join(" ");
        let mut starts = Vec::with_capacity(tokens.len());
        let mut pos = 0usize;
        for token in &tokens {
            starts.push(pos);
            pos += token.len() + 1;
        }

        // Dictionary phrases are counted as units; their component tokens
        // are excluded from the unigram pass so "machine learning" does not
        // also surface "machine" and "learning".
        let mut covered = vec![false; tokens.len()];
        for hit in self.lexicon.find_skill_phrases(&line) {
            let first = starts.iter().position(|&s| s == hit.start);
            let last = starts
                .iter()
                .zip(&tokens)
                .position(|(&s, t)| s + t.len() == hit.end);
            if let (Some(first), Some(last)) = (first, last) {
                for flag in &mut covered[first..=last] {
                    *flag = true;
                }
                record(table, order, hit.term.to_string(), span);
            }
        }

        for (i, token) in tokens.iter().enumerate() {
            if covered[i] || self.lexicon.is_stopword(token) {
                continue;
            }
            record(table, order, token.clone(), span);
        }
    }
}

fn record(table: &mut HashMap<String, Accum>, order: &mut usize, term: String, span: SourceSpan) {
    let multiplier = span.multiplier();
    let entry = table.entry(term).or_insert(Accum {
        freq: 0,
        multiplier,
        source: span,
        first_seen: *order,
    });
    entry.freq += 1;
    if multiplier > entry.multiplier {
        entry.multiplier = multiplier;
        entry.source = span;
    }
    *order += 1;
}

fn is_bullet_line(line: &str) -> bool {
    let mut chars = line.chars();
    match chars.next() {
        Some('-') | Some('*') | Some('•') => true,
        Some(c) if c.is_ascii_digit() => {
            let rest = chars.find(|c| !c.is_ascii_digit());
            matches!(rest, Some('.') | Some(')'))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor_parts() -> (Normalizer, Lexicon) {
        (Normalizer::new(), Lexicon::new())
    }

    fn find<'k>(keywords: &'k [Keyword], term: &str) -> Option<&'k Keyword> {
        keywords.iter().find(|k| k.term == term)
    }

    #[test]
    fn test_title_terms_carry_highest_multiplier() {
        let (normalizer, lexicon) = extractor_parts();
        let extractor = KeywordExtractor::new(&normalizer, &lexicon);

        let keywords = extractor.extract("Rust Engineer", "We also value rust experience.");
        let rust = find(&keywords, "rust").unwrap();
        assert_eq!(rust.source, SourceSpan::Title);
        // frequency 2 (title + body), title multiplier 3.0
        assert!((rust.weight - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_requirements_lines_detected_by_bullet_and_phrase() {
        let (normalizer, lexicon) = extractor_parts();
        let extractor = KeywordExtractor::new(&normalizer, &lexicon);

        let description = "About the team.\n- Kubernetes\nRequired: PostgreSQL";
        let keywords = extractor.extract("", description);

        let kubernetes = find(&keywords, "kubernetes").unwrap();
        let postgresql = find(&keywords, "postgresql").unwrap();
        assert_eq!(kubernetes.source, SourceSpan::Requirements);
        assert_eq!(postgresql.source, SourceSpan::Requirements);
        assert!((kubernetes.weight - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stopwords_removed_but_dictionary_phrases_kept() {
        let (normalizer, lexicon) = extractor_parts();
        let extractor = KeywordExtractor::new(&normalizer, &lexicon);

        let keywords = extractor.extract("", "We are looking for machine learning experience");
        assert!(find(&keywords, "machine learning").is_some());
        assert!(find(&keywords, "machine").is_none());
        assert!(find(&keywords, "learning").is_none());
        assert!(find(&keywords, "are").is_none());
        assert!(find(&keywords, "for").is_none());
    }

    #[test]
    fn test_frequency_accumulates_across_spans() {
        let (normalizer, lexicon) = extractor_parts();
        let extractor = KeywordExtractor::new(&normalizer, &lexicon);

        let keywords = extractor.extract("Python Developer", "- Python required\nPython daily.");
        let python = find(&keywords, "python").unwrap();
        // three occurrences, max multiplier from the title span
        assert!((python.weight - 9.0).abs() < f64::EPSILON);
        assert_eq!(python.source, SourceSpan::Title);
    }

    #[test]
    fn test_variants_attached_to_single_word_terms() {
        let (normalizer, lexicon) = extractor_parts();
        let extractor = KeywordExtractor::new(&normalizer, &lexicon);

        let keywords = extractor.extract("", "managing distributed teams");
        let managing = find(&keywords, "managing").unwrap();
        assert!(managing.variants.contains(&"manage".to_string()));
    }

    #[test]
    fn test_extracted_set_capped_and_ranked_by_weight() {
        let (normalizer, lexicon) = extractor_parts();
        let extractor = KeywordExtractor::new(&normalizer, &lexicon);

        let mut description = String::from("rust rust rust\n");
        for i in 0..50 {
            description.push_str(&format!("filler{i} "));
        }
        let keywords = extractor.extract("", &description);

        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(keywords[0].term, "rust");
    }

    #[test]
    fn test_numbered_bullets_count_as_requirements() {
        assert!(is_bullet_line("1. Python"));
        assert!(is_bullet_line("12) Kubernetes"));
        assert!(!is_bullet_line("5 years of experience"));
        assert!(!is_bullet_line("plain prose"));
    }
}
