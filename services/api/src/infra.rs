use chrono::{DateTime, NaiveDate, Utc};
use fieldsync::surveys::{
    DedupeAcross, DedupeProbe, DedupeQuestion, DedupeQuestionSource, DedupeRecordId, DedupeScope,
    NewSurveyDedupeRecord, QuestionId, SurveyDedupeRecord, SurveyDedupeStore, SurveyStoreError,
    SurveyTemplateId,
};
use fieldsync::visits::{
    AgentId, NewVisitEvent, ProximityStore, SubjectId, SubjectType, TenantId, VisitEvent,
    VisitEventId, VisitStoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Single-node visit log. The per-day uniqueness key is enforced inside
/// `insert_visit` while the lock is held, so concurrent duplicates cannot
/// both commit.
#[derive(Default, Clone)]
pub(crate) struct InMemoryVisitStore {
    events: Arc<Mutex<Vec<VisitEvent>>>,
    sequence: Arc<AtomicU64>,
}

impl InMemoryVisitStore {
    pub(crate) fn events(&self) -> Vec<VisitEvent> {
        self.events.lock().expect("visit log mutex poisoned").clone()
    }
}

impl ProximityStore for InMemoryVisitStore {
    fn find_visit(
        &self,
        tenant_id: &TenantId,
        agent_id: &AgentId,
        subject_type: SubjectType,
        subject_id: &SubjectId,
        on: NaiveDate,
    ) -> Result<Option<VisitEvent>, VisitStoreError> {
        let guard = self.events.lock().expect("visit log mutex poisoned");
        Ok(guard
            .iter()
            .find(|event| {
                event.tenant_id == *tenant_id
                    && event.agent_id == *agent_id
                    && event.subject_type == subject_type
                    && event.subject_id == *subject_id
                    && event.visit_date == on
            })
            .cloned())
    }

    fn visits_since(
        &self,
        tenant_id: &TenantId,
        subject_type: SubjectType,
        since: DateTime<Utc>,
        require_coords: bool,
    ) -> Result<Vec<VisitEvent>, VisitStoreError> {
        let guard = self.events.lock().expect("visit log mutex poisoned");
        Ok(guard
            .iter()
            .filter(|event| {
                event.tenant_id == *tenant_id
                    && event.subject_type == subject_type
                    && event.visit_timestamp >= since
                    && (!require_coords || event.location.is_some())
            })
            .cloned()
            .collect())
    }

    fn count_agent_visits_since(
        &self,
        tenant_id: &TenantId,
        agent_id: &AgentId,
        subject_type: SubjectType,
        since: DateTime<Utc>,
    ) -> Result<usize, VisitStoreError> {
        let guard = self.events.lock().expect("visit log mutex poisoned");
        Ok(guard
            .iter()
            .filter(|event| {
                event.tenant_id == *tenant_id
                    && event.agent_id == *agent_id
                    && event.subject_type == subject_type
                    && event.visit_timestamp >= since
            })
            .count())
    }

    fn insert_visit(&self, event: NewVisitEvent) -> Result<VisitEvent, VisitStoreError> {
        let mut guard = self.events.lock().expect("visit log mutex poisoned");
        let collides = guard.iter().any(|existing| {
            existing.tenant_id == event.tenant_id
                && existing.agent_id == event.agent_id
                && existing.subject_type == event.subject_type
                && existing.subject_id == event.subject_id
                && existing.visit_date == event.visit_date
        });
        if collides {
            return Err(VisitStoreError::DuplicateVisit);
        }

        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let stored = VisitEvent {
            event_id: VisitEventId(format!("visit-{id:06}")),
            tenant_id: event.tenant_id,
            agent_id: event.agent_id,
            subject_type: event.subject_type,
            subject_id: event.subject_id,
            visit_date: event.visit_date,
            visit_timestamp: event.visit_timestamp,
            location: event.location,
            gps_accuracy_meters: event.gps_accuracy_meters,
        };
        guard.push(stored.clone());
        Ok(stored)
    }
}

/// Single-node registry of dedupe identities for accepted survey submissions.
#[derive(Default, Clone)]
pub(crate) struct InMemorySurveyRegistry {
    records: Arc<Mutex<Vec<SurveyDedupeRecord>>>,
    sequence: Arc<AtomicU64>,
}

impl InMemorySurveyRegistry {
    pub(crate) fn records(&self) -> Vec<SurveyDedupeRecord> {
        self.records
            .lock()
            .expect("survey registry mutex poisoned")
            .clone()
    }
}

impl SurveyDedupeStore for InMemorySurveyRegistry {
    fn find_match(
        &self,
        probe: &DedupeProbe,
    ) -> Result<Option<SurveyDedupeRecord>, SurveyStoreError> {
        let guard = self.records.lock().expect("survey registry mutex poisoned");
        Ok(guard.iter().find(|record| probe.matches(record)).cloned())
    }

    fn record(&self, record: NewSurveyDedupeRecord) -> Result<SurveyDedupeRecord, SurveyStoreError> {
        let mut guard = self.records.lock().expect("survey registry mutex poisoned");
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

/// Survey template configuration held in memory. Templates with no entry
/// simply have no dedupe questions, which disables dedupe for them.
#[derive(Default, Clone)]
pub(crate) struct InMemoryQuestionCatalog {
    templates: Arc<Mutex<HashMap<SurveyTemplateId, Vec<DedupeQuestion>>>>,
}

impl InMemoryQuestionCatalog {
    pub(crate) fn define(&self, template_id: SurveyTemplateId, questions: Vec<DedupeQuestion>) {
        let mut guard = self.templates.lock().expect("catalog mutex poisoned");
        guard.insert(template_id, questions);
    }
}

impl DedupeQuestionSource for InMemoryQuestionCatalog {
    fn dedupe_questions(
        &self,
        template_id: &SurveyTemplateId,
    ) -> Result<Vec<DedupeQuestion>, SurveyStoreError> {
        let guard = self.templates.lock().expect("catalog mutex poisoned");
        Ok(guard.get(template_id).cloned().unwrap_or_default())
    }
}

pub(crate) fn default_dedupe_catalog() -> InMemoryQuestionCatalog {
    let catalog = InMemoryQuestionCatalog::default();
    catalog.define(
        SurveyTemplateId("template-brand-pulse".to_string()),
        vec![DedupeQuestion {
            question_id: QuestionId("q-purchase-intent".to_string()),
            scope: DedupeScope::Day,
            across: DedupeAcross::Subject,
        }],
    );
    catalog
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
