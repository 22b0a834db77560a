//! Resume/job-description scoring engine
//!
//! Pure, synchronous pipeline: normalize → extract keywords → match against
//! resume fields → sub-scores → aggregate report. No I/O, no shared mutable
//! state; safe to call concurrently.

pub mod analyzer;
pub mod extractor;
pub mod lexicon;
pub mod matcher;
pub mod normalizer;
pub mod resume;
pub mod scorer;
pub mod weights;

pub use analyzer::{score, AtsScore, ScoringEngine};
pub use resume::{EducationEntry, ExperienceEntry, JobPosting, ResumeContent};
