//! Keyword-to-resume field matching

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

use super::extractor::Keyword;
use super::lexicon::Lexicon;
use super::normalizer::{lexical_variants, Normalizer};

/// How a keyword was found in a resume field. Exact beats stem beats
/// synonym when a keyword matches in more than one way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Stem,
    Synonym,
}

/// Match outcome for a single keyword. An unmatched keyword has an empty
/// `located_in` set.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub term: String,
    pub matched: bool,
    pub kind: Option<MatchKind>,
    pub located_in: BTreeSet<super::resume::ResumeField>,
}

/// Normalized token/n-gram view of one resume field. Matching operates on
/// n-gram boundaries only, never character substrings, so "java" cannot
/// hit inside "javascript".
struct FieldIndex {
    field: super::resume::ResumeField,
    grams: HashSet<String>,
    canonicals: HashSet<String>,
    stems: HashSet<String>,
}

impl FieldIndex {
    fn build(
        field: super::resume::ResumeField,
        texts: &[&str],
        normalizer: &Normalizer,
        lexicon: &Lexicon,
    ) -> Self {
        let mut grams = HashSet::new();
        for text in texts {
            let tokens = normalizer.normalize(text);
            for n in 1..=3 {
                grams.extend(normalizer.ngrams(&tokens, n));
            }
            // Whole multi-word entries (e.g. a four-word skill) match as one
            // unit even beyond the n-gram window.
            if tokens.len() > 3 {
                grams.insert(tokens.join(" "));
            }
        }

        let canonicals = grams
            .iter()
            .map(|g| lexicon.canonical(g).to_string())
            .collect();
        let stems = grams
            .iter()
            .filter(|g| !g.contains(' '))
            .flat_map(|g| lexical_variants(g))
            .collect();

        Self {
            field,
            grams,
            canonicals,
            stems,
        }
    }

    /// Strongest way this field contains the keyword, if any.
    fn lookup(&self, keyword: &Keyword, lexicon: &Lexicon) -> Option<MatchKind> {
        if self.grams.contains(&keyword.term) {
            return Some(MatchKind::Exact);
        }
        if keyword.variants.iter().any(|v| self.grams.contains(v))
            || self.stems.contains(&keyword.term)
            || keyword.variants.iter().any(|v| self.stems.contains(v))
        {
            return Some(MatchKind::Stem);
        }
        if self
            .canonicals
            .contains(lexicon.canonical(&keyword.term))
        {
            return Some(MatchKind::Synonym);
        }
        None
    }
}

pub struct FieldMatcher<'a> {
    normalizer: &'a Normalizer,
    lexicon: &'a Lexicon,
}

impl<'a> FieldMatcher<'a> {
    pub fn new(normalizer: &'a Normalizer, lexicon: &'a Lexicon) -> Self {
        Self {
            normalizer,
            lexicon,
        }
    }

    /// Match every keyword against the resume's fields, searched in fixed
    /// priority order: skills, experience bullets, summary, education.
    pub fn match_keywords(
        &self,
        keywords: &[Keyword],
        resume: &super::resume::ResumeContent,
    ) -> Vec<MatchResult> {
        let indexes = self.build_indexes(resume);

        keywords
            .iter()
            .map(|keyword| {
                let mut located_in = BTreeSet::new();
                let mut kind: Option<MatchKind> = None;

                for index in &indexes {
                    if let Some(found) = index.lookup(keyword, self.lexicon) {
                        located_in.insert(index.field);
                        kind = Some(match kind {
                            Some(best) if best <= found => best,
                            _ => found,
                        });
                    }
                }

                MatchResult {
                    term: keyword.term.clone(),
                    matched: kind.is_some(),
                    kind,
                    located_in,
                }
            })
            .collect()
    }

    fn build_indexes(&self, resume: &super::resume::ResumeContent) -> Vec<FieldIndex> {
        use super::resume::ResumeField;

        let skills: Vec<&str> = resume.skills.iter().map(String::as_str).collect();
        let bullets: Vec<&str> = resume
            .experience
            .iter()
            .flat_map(|e| e.bullets.iter().map(String::as_str))
            .collect();
        let summary: Vec<&str> = resume.summary.as_deref().into_iter().collect();
        let education: Vec<String> = resume
            .education
            .iter()
            .map(|e| match e.field.as_deref() {
                Some(field) => format!("{} {}", e.degree, field),
                None => e.degree.clone(),
            })
            .collect();
        let education: Vec<&str> = education.iter().map(String::as_str).collect();

        ResumeField::PRIORITY
            .iter()
            .map(|&field| {
                let texts: &[&str] = match field {
                    ResumeField::Skills => &skills,
                    ResumeField::Experience => &bullets,
                    ResumeField::Summary => &summary,
                    ResumeField::Education => &education,
                };
                FieldIndex::build(field, texts, self.normalizer, self.lexicon)
            })
            .collect()
    }
}
