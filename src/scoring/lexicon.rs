//! Static matching lexicon: stopwords, skill dictionary, synonyms

use aho_corasick::AhoCorasick;
use std::collections::{HashMap, HashSet};

/// Common English stopwords: articles, pronouns, prepositions, generic verbs.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "been", "but", "by", "can", "could", "did", "do",
    "does", "for", "from", "had", "has", "have", "he", "her", "him", "his", "how", "if", "in",
    "into", "is", "it", "its", "may", "me", "might", "more", "most", "must", "my", "no", "not",
    "of", "on", "or", "our", "out", "over", "own", "she", "should", "so", "some", "than", "that",
    "the", "their", "them", "then", "these", "they", "this", "those", "to", "too", "under", "up",
    "us", "was", "we", "well", "were", "what", "when", "where", "which", "while", "who", "why",
    "will", "with", "would", "you", "your", "about", "across", "after", "also", "any", "because",
    "before", "between", "each", "make", "new", "other", "such", "very", "work",
];

/// Curated technical-skill dictionary: programming languages, frameworks,
/// infrastructure, databases, data tooling, and common business tools.
/// Entries are stored in normalized token form; multi-word entries are what
/// make n-gram detection worthwhile.
const SKILL_DICTIONARY: &[&str] = &[
    // Programming languages
    "rust", "python", "javascript", "typescript", "java", "c++", "c#", "go", "golang", "ruby",
    "php", "swift", "kotlin", "scala", "haskell", "clojure", "r", "matlab", "sql", "bash",
    "objective-c", "perl", "elixir",
    // Web technologies
    "react", "vue", "angular", "svelte", "html", "css", "sass", "tailwind", "bootstrap",
    "webpack", "vite", "node.js", "express", "nextjs", "django", "flask", "rails", "spring",
    "spring boot", "laravel", "graphql", "rest", "rest api", "grpc", "websockets",
    // Infrastructure and operations
    "docker", "kubernetes", "aws", "azure", "gcp", "google cloud", "terraform", "ansible",
    "jenkins", "gitlab", "github", "git", "ci/cd", "cicd", "devops", "microservices", "linux",
    "unix", "nginx", "redis", "elasticsearch", "rabbitmq", "kafka", "serverless", "helm",
    "prometheus", "grafana", "observability", "distributed systems",
    // Databases
    "postgresql", "mysql", "mongodb", "cassandra", "dynamodb", "sqlite", "oracle", "sql server",
    "neo4j", "snowflake",
    // Data science and machine learning
    "machine learning", "deep learning", "data analysis", "data engineering", "tensorflow",
    "pytorch", "scikit-learn", "pandas", "numpy", "jupyter", "spark", "hadoop", "airflow",
    "nlp", "computer vision", "etl",
    // Testing and process
    "jest", "pytest", "junit", "selenium", "cypress", "tdd", "unit testing",
    "integration testing", "agile", "scrum", "kanban", "jira", "confluence",
    // Soft skills and business tools
    "leadership", "communication", "teamwork", "problem solving", "critical thinking",
    "mentoring", "project management", "stakeholder management", "product management", "excel",
    "tableau", "power bi", "salesforce",
];

/// Variant spellings mapped to the canonical dictionary concept.
const SYNONYMS: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("k8s", "kubernetes"),
    ("postgres", "postgresql"),
    ("react.js", "react"),
    ("reactjs", "react"),
    ("vue.js", "vue"),
    ("next.js", "nextjs"),
    ("nodejs", "node.js"),
    ("node", "node.js"),
    ("golang", "go"),
    ("py", "python"),
    ("ml", "machine learning"),
    ("ai", "artificial intelligence"),
    ("tf", "terraform"),
    ("gcp", "google cloud"),
    ("es", "elasticsearch"),
    ("mongo", "mongodb"),
    ("ci/cd", "cicd"),
    ("restful", "rest"),
    ("sklearn", "scikit-learn"),
    ("springboot", "spring boot"),
];

/// A skill-dictionary phrase found in a normalized line, with its token
/// span boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillHit {
    pub term: &'static str,
    pub start: usize,
    pub end: usize,
}

/// Immutable matching lexicon, built once and shared by reference.
pub struct Lexicon {
    stopwords: HashSet<&'static str>,
    skills: Vec<&'static str>,
    skill_set: HashSet<&'static str>,
    skill_automaton: AhoCorasick,
    synonyms: HashMap<&'static str, &'static str>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    pub fn new() -> Self {
        let mut skills: Vec<&'static str> = SKILL_DICTIONARY.to_vec();
        // Longest first so the automaton prefers "machine learning" over
        // any shorter pattern starting at the same position.
        skills.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

        let skill_automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(&skills)
            .expect("skill dictionary automaton");

        Self {
            stopwords: STOPWORDS.iter().copied().collect(),
            skill_set: SKILL_DICTIONARY.iter().copied().collect(),
            skills,
            skill_automaton,
            synonyms: SYNONYMS.iter().copied().collect(),
        }
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Whether a term's canonical concept belongs to the skill dictionary.
    pub fn is_skill_term(&self, term: &str) -> bool {
        self.skill_set.contains(term) || self.skill_set.contains(self.canonical(term))
    }

    /// Canonical form of a term: the synonym target if one exists, the term
    /// itself otherwise.
    pub fn canonical<'a>(&self, term: &'a str) -> &'a str {
        self.synonyms.get(term).copied().unwrap_or(term)
    }

    /// Scan a normalized, space-joined line for skill-dictionary phrases.
    /// Matches are accepted only on token boundaries, never inside a token,
    /// so "java" does not hit within "javascript".
    pub fn find_skill_phrases(&self, line: &str) -> Vec<SkillHit> {
        let bytes = line.as_bytes();
        self.skill_automaton
            .find_iter(line)
            .filter(|m| {
                let starts_on_boundary = m.start() == 0 || bytes[m.start() - 1] == b' ';
                let ends_on_boundary = m.end() == bytes.len() || bytes[m.end()] == b' ';
                starts_on_boundary && ends_on_boundary
            })
            .map(|m| SkillHit {
                term: self.skills[m.pattern().as_usize()],
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwords_cover_articles_and_pronouns() {
        let lexicon = Lexicon::new();
        assert!(lexicon.is_stopword("the"));
        assert!(lexicon.is_stopword("their"));
        assert!(!lexicon.is_stopword("kubernetes"));
    }

    #[test]
    fn test_multi_word_skills_detected_as_units() {
        let lexicon = Lexicon::new();
        let hits = lexicon.find_skill_phrases("strong machine learning background");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].term, "machine learning");
    }

    #[test]
    fn test_no_substring_hits_inside_tokens() {
        let lexicon = Lexicon::new();
        let hits = lexicon.find_skill_phrases("javascript developer");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].term, "javascript");
    }

    #[test]
    fn test_synonyms_share_a_canonical_concept() {
        let lexicon = Lexicon::new();
        assert_eq!(lexicon.canonical("js"), "javascript");
        assert_eq!(lexicon.canonical("k8s"), "kubernetes");
        assert_eq!(lexicon.canonical("rust"), "rust");
    }

    #[test]
    fn test_skill_tagging_follows_canonical_form() {
        let lexicon = Lexicon::new();
        assert!(lexicon.is_skill_term("postgres"));
        assert!(lexicon.is_skill_term("postgresql"));
        assert!(!lexicon.is_skill_term("synergy"));
    }
}
