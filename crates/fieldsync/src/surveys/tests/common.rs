use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, FixedOffset, TimeZone};
use serde_json::Value;

use crate::surveys::domain::{
    DedupeAcross, DedupeQuestion, DedupeRecordId, DedupeScope, NewSurveyDedupeRecord, QuestionId,
    SurveyAnswer, SurveyDedupeRecord, SurveySubmission, SurveyTemplateId,
};
use crate::surveys::engine::SurveyDedupeEngine;
use crate::surveys::store::{
    DedupeProbe, DedupeQuestionSource, SurveyDedupeStore, SurveyStoreError,
};
use crate::visits::domain::{AgentId, SubjectId, SubjectType, TenantId};

pub(super) fn tenant() -> TenantId {
    TenantId("tenant-acacia".to_string())
}

pub(super) fn template() -> SurveyTemplateId {
    SurveyTemplateId("template-brand-pulse".to_string())
}

pub(super) fn question(code: &str) -> QuestionId {
    QuestionId(format!("q-{code}"))
}

pub(super) fn dedupe_question(code: &str, scope: DedupeScope, across: DedupeAcross) -> DedupeQuestion {
    DedupeQuestion {
        question_id: question(code),
        scope,
        across,
    }
}

pub(super) fn answer(code: &str, value: &str) -> SurveyAnswer {
    SurveyAnswer {
        question_id: question(code),
        value: value.to_string(),
    }
}

/// Timestamp on the shared test date (2026-03-05) in a +03:00 tenant zone.
pub(super) fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
    on_day(5, hour, minute)
}

pub(super) fn on_day(day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(3 * 3600)
        .expect("valid offset")
        .with_ymd_and_hms(2026, 3, day, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn submission(
    subject_code: &str,
    agent_code: &str,
    answers: Vec<SurveyAnswer>,
    recorded_at: DateTime<FixedOffset>,
) -> SurveySubmission {
    SurveySubmission {
        tenant_id: tenant(),
        survey_template_id: template(),
        subject_type: SubjectType::Customer,
        subject_id: SubjectId(format!("subject-{subject_code}")),
        agent_id: Some(AgentId(format!("agent-{agent_code}"))),
        answers,
        recorded_at,
    }
}

pub(super) fn build_engine(
    questions: Vec<DedupeQuestion>,
) -> (
    Arc<SurveyDedupeEngine<StaticQuestions, MemoryDedupeRegistry>>,
    Arc<MemoryDedupeRegistry>,
) {
    let registry = Arc::new(MemoryDedupeRegistry::default());
    let engine = Arc::new(SurveyDedupeEngine::new(
        Arc::new(StaticQuestions::new(questions)),
        registry.clone(),
    ));
    (engine, registry)
}

/// Question source returning the same configuration for every template.
pub(super) struct StaticQuestions {
    questions: Vec<DedupeQuestion>,
}

impl StaticQuestions {
    pub(super) fn new(questions: Vec<DedupeQuestion>) -> Self {
        Self { questions }
    }
}

impl DedupeQuestionSource for StaticQuestions {
    fn dedupe_questions(
        &self,
        _template_id: &SurveyTemplateId,
    ) -> Result<Vec<DedupeQuestion>, SurveyStoreError> {
        Ok(self.questions.clone())
    }
}

/// In-memory dedupe registry; appends are unconditional, as in the real one.
#[derive(Default)]
pub(super) struct MemoryDedupeRegistry {
    records: Mutex<Vec<SurveyDedupeRecord>>,
    sequence: AtomicU64,
}

impl MemoryDedupeRegistry {
    pub(super) fn records(&self) -> Vec<SurveyDedupeRecord> {
        self.records
            .lock()
            .expect("dedupe registry mutex poisoned")
            .clone()
    }
}

impl SurveyDedupeStore for MemoryDedupeRegistry {
    fn find_match(
        &self,
        probe: &DedupeProbe,
    ) -> Result<Option<SurveyDedupeRecord>, SurveyStoreError> {
        let guard = self.records.lock().expect("dedupe registry mutex poisoned");
        Ok(guard.iter().find(|record| probe.matches(record)).cloned())
    }

    fn record(&self, record: NewSurveyDedupeRecord) -> Result<SurveyDedupeRecord, SurveyStoreError> {
        let mut guard = self.records.lock().expect("dedupe registry mutex poisoned");
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let stored = SurveyDedupeRecord {
            record_id: DedupeRecordId(format!("survey-dedupe-{id:06}")),
            tenant_id: record.tenant_id,
            survey_template_id: record.survey_template_id,
            subject_type: record.subject_type,
            subject_id: record.subject_id,
            agent_id: record.agent_id,
            dedupe_key_hash: record.dedupe_key_hash,
            submission_date: record.submission_date,
            submission_timestamp: record.submission_timestamp,
        };
        guard.push(stored.clone());
        Ok(stored)
    }
}

pub(super) struct UnavailableRegistry;

impl SurveyDedupeStore for UnavailableRegistry {
    fn find_match(
        &self,
        _probe: &DedupeProbe,
    ) -> Result<Option<SurveyDedupeRecord>, SurveyStoreError> {
        Err(SurveyStoreError::Unavailable("database offline".to_string()))
    }

    fn record(
        &self,
        _record: NewSurveyDedupeRecord,
    ) -> Result<SurveyDedupeRecord, SurveyStoreError> {
        Err(SurveyStoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
