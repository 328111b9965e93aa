use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;
use tracing::info;

use super::domain::{
    DedupeAcross, DedupeCheck, DedupeScope, NewSurveyDedupeRecord, SurveyDedupeRecord,
    SurveySubmission,
};
use super::key::{build_dedupe_key, hash_dedupe_key};
use super::store::{
    AcrossFilter, DedupeProbe, DedupeQuestionSource, ScopeWindow, SurveyDedupeStore,
    SurveyStoreError,
};

/// Rolling window lengths for the week and month scopes, counted back from
/// the submission's tenant-local date.
const WEEK_WINDOW_DAYS: i64 = 7;
const MONTH_WINDOW_DAYS: i64 = 30;

/// Resolved dedupe identity of one submission: the governing policy plus the
/// key digest. Absent whenever dedupe is disabled for the submission.
struct DedupeIdentity {
    scope: DedupeScope,
    across: DedupeAcross,
    key_hash: String,
}

/// Detects repeat survey submissions against the dedupe registry.
///
/// The check is advisory and the registration write is unconditional, so two
/// racing submissions with the same key can both pass the check and both
/// land in the registry. Callers that need a hard guarantee serialize the
/// check and the write themselves.
pub struct SurveyDedupeEngine<Q, S> {
    questions: Arc<Q>,
    registry: Arc<S>,
}

impl<Q, S> SurveyDedupeEngine<Q, S>
where
    Q: DedupeQuestionSource,
    S: SurveyDedupeStore,
{
    pub fn new(questions: Arc<Q>, registry: Arc<S>) -> Self {
        Self { questions, registry }
    }

    /// Looks for an accepted submission with the same dedupe identity inside
    /// the configured scope window. Returns a clean check whenever dedupe is
    /// disabled: no dedupe questions, none of them answered, or scope none.
    pub fn check_duplicate(
        &self,
        submission: &SurveySubmission,
    ) -> Result<DedupeCheck, SurveyStoreError> {
        let identity = match self.resolve_identity(submission)? {
            Some(identity) => identity,
            None => return Ok(DedupeCheck::clean()),
        };

        let (window, window_phrase) = match identity.scope {
            DedupeScope::None => return Ok(DedupeCheck::clean()),
            DedupeScope::Ever => (ScopeWindow::Any, "before"),
            DedupeScope::Day => (ScopeWindow::OnDate(submission.submission_date()), "today"),
            DedupeScope::Week => (
                ScopeWindow::OnOrAfter(
                    submission.submission_date() - Duration::days(WEEK_WINDOW_DAYS),
                ),
                "this week",
            ),
            DedupeScope::Month => (
                ScopeWindow::OnOrAfter(
                    submission.submission_date() - Duration::days(MONTH_WINDOW_DAYS),
                ),
                "this month",
            ),
        };

        let across = match identity.across {
            DedupeAcross::Subject => AcrossFilter::Subject {
                subject_type: submission.subject_type,
                subject_id: submission.subject_id.clone(),
            },
            DedupeAcross::Agent => match &submission.agent_id {
                Some(agent_id) => AcrossFilter::Agent(agent_id.clone()),
                // Registry rows never match a null agent, so there is
                // nothing to probe for.
                None => return Ok(DedupeCheck::clean()),
            },
            DedupeAcross::Tenant => AcrossFilter::Tenant,
        };

        let probe = DedupeProbe {
            tenant_id: submission.tenant_id.clone(),
            survey_template_id: submission.survey_template_id.clone(),
            dedupe_key_hash: identity.key_hash,
            window,
            across,
        };

        match self.registry.find_match(&probe)? {
            Some(matched) => {
                info!(
                    tenant_id = %submission.tenant_id.0,
                    survey_template_id = %submission.survey_template_id.0,
                    scope = identity.scope.label(),
                    across = identity.across.label(),
                    matched_record_id = %matched.record_id.0,
                    "duplicate survey submission detected"
                );
                Ok(DedupeCheck::duplicate(window_phrase, matched))
            }
            None => Ok(DedupeCheck::clean()),
        }
    }

    /// Records the submission's dedupe identity after acceptance. The write
    /// never re-checks the registry. Returns `None` when dedupe is disabled
    /// for the submission, in which case nothing is recorded.
    pub fn register_submission(
        &self,
        submission: &SurveySubmission,
    ) -> Result<Option<SurveyDedupeRecord>, SurveyStoreError> {
        let identity = match self.resolve_identity(submission)? {
            Some(identity) => identity,
            None => return Ok(None),
        };
        if identity.scope == DedupeScope::None {
            return Ok(None);
        }

        let recorded = self.registry.record(NewSurveyDedupeRecord {
            tenant_id: submission.tenant_id.clone(),
            survey_template_id: submission.survey_template_id.clone(),
            subject_type: submission.subject_type,
            subject_id: submission.subject_id.clone(),
            agent_id: submission.agent_id.clone(),
            dedupe_key_hash: identity.key_hash,
            submission_date: submission.submission_date(),
            submission_timestamp: submission.instant(),
        })?;
        info!(
            tenant_id = %submission.tenant_id.0,
            survey_template_id = %submission.survey_template_id.0,
            record_id = %recorded.record_id.0,
            "survey dedupe identity registered"
        );
        Ok(Some(recorded))
    }

    /// Check-then-register sequence for the submission route. Duplicates are
    /// reported without touching the registry; clean submissions register
    /// their identity before returning.
    pub fn submit(
        &self,
        submission: &SurveySubmission,
    ) -> Result<SurveySubmissionOutcome, SurveyStoreError> {
        let check = self.check_duplicate(submission)?;
        if check.is_duplicate {
            return Ok(SurveySubmissionOutcome {
                check,
                recorded: None,
            });
        }
        let recorded = self.register_submission(submission)?;
        Ok(SurveySubmissionOutcome { check, recorded })
    }

    fn resolve_identity(
        &self,
        submission: &SurveySubmission,
    ) -> Result<Option<DedupeIdentity>, SurveyStoreError> {
        let questions = self
            .questions
            .dedupe_questions(&submission.survey_template_id)?;
        // The first configured dedupe question governs scope and across for
        // the whole template.
        let (scope, across) = match questions.first() {
            Some(policy) => (policy.scope, policy.across),
            None => return Ok(None),
        };
        let key = match build_dedupe_key(&questions, &submission.answers) {
            Some(key) => key,
            None => return Ok(None),
        };
        Ok(Some(DedupeIdentity {
            scope,
            across,
            key_hash: hash_dedupe_key(&key),
        }))
    }
}

/// Result of a submission-route call: the advisory check plus the registry
/// record written when the submission was clean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveySubmissionOutcome {
    pub check: DedupeCheck,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded: Option<SurveyDedupeRecord>,
}

impl SurveySubmissionOutcome {
    pub fn is_duplicate(&self) -> bool {
        self.check.is_duplicate
    }
}
