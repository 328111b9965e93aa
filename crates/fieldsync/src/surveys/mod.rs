//! Survey submission dedupe.
//!
//! Templates mark some questions as dedupe keys. Answers to those questions
//! are concatenated in template order, hashed, and checked against a registry
//! of accepted submissions inside a configurable scope window (same day,
//! rolling week or month, or ever) and across a configurable dimension
//! (subject, agent, or tenant). Submissions without any answered dedupe
//! question skip dedupe entirely.

pub mod domain;
pub mod engine;
pub(crate) mod key;
pub mod router;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    DedupeAcross, DedupeCheck, DedupeQuestion, DedupeRecordId, DedupeScope, NewSurveyDedupeRecord,
    QuestionId, SurveyAnswer, SurveyDedupeRecord, SurveySubmission, SurveyTemplateId,
    DUPLICATE_SURVEY_SUBMISSION,
};
pub use engine::{SurveyDedupeEngine, SurveySubmissionOutcome};
pub use router::survey_router;
pub use store::{
    AcrossFilter, DedupeProbe, DedupeQuestionSource, ScopeWindow, SurveyDedupeStore,
    SurveyStoreError,
};
