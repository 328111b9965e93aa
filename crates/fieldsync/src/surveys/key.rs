use sha2::{Digest, Sha256};

use super::domain::{DedupeQuestion, SurveyAnswer};

/// Builds the dedupe key over the answered dedupe questions, in configured
/// question order regardless of answer order. Returns `None` when no dedupe
/// question was answered, which disables dedupe for the submission.
pub(crate) fn build_dedupe_key(
    questions: &[DedupeQuestion],
    answers: &[SurveyAnswer],
) -> Option<String> {
    let mut parts = Vec::new();
    for question in questions {
        let answer = answers
            .iter()
            .find(|answer| answer.question_id == question.question_id);
        if let Some(answer) = answer {
            parts.push(format!("{}:{}", question.question_id.0, answer.value));
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("|"))
    }
}

/// Lowercase hex SHA-256 digest of the key's UTF-8 bytes. Only the digest is
/// stored; raw answer values never reach the registry.
pub(crate) fn hash_dedupe_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}
