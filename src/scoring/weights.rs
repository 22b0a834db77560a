//! Aggregation weights for combining sub-scores into the overall score

use super::scorer::Subscores;

/// Default aggregation weights. Keyword presence dominates real ATS
/// filtering behavior; title and skills alignment matter next; structural
/// completeness is a smaller but non-zero factor.
pub const AGGREGATION_WEIGHTS: Weights = Weights {
    keyword: 0.45,
    title: 0.20,
    skills: 0.20,
    format: 0.15,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub keyword: f64,
    pub title: f64,
    pub skills: f64,
    pub format: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.keyword + self.title + self.skills + self.format
    }

    /// Weighted overall score, rounded and clamped to [0, 100].
    pub fn overall(&self, subscores: &Subscores) -> u8 {
        let raw = self.keyword * f64::from(subscores.keyword_match)
            + self.title * f64::from(subscores.title_match)
            + self.skills * f64::from(subscores.skills_match)
            + self.format * f64::from(subscores.format_compliance);
        raw.round().clamp(0.0, 100.0) as u8
    }
}

impl Default for Weights {
    fn default() -> Self {
        AGGREGATION_WEIGHTS
    }
}
