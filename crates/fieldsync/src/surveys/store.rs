use chrono::NaiveDate;

use super::domain::{
    DedupeQuestion, NewSurveyDedupeRecord, SurveyDedupeRecord, SurveyTemplateId,
};
use crate::visits::domain::{AgentId, SubjectId, SubjectType, TenantId};

/// Time filter a registry probe applies to prior submissions. `OnDate` pins
/// the tenant-local calendar date; `OnOrAfter` opens a rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeWindow {
    Any,
    OnDate(NaiveDate),
    OnOrAfter(NaiveDate),
}

/// Dimension the probe constrains in addition to tenant and template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcrossFilter {
    Subject {
        subject_type: SubjectType,
        subject_id: SubjectId,
    },
    Agent(AgentId),
    Tenant,
}

/// Structured lookup predicate for the registry. Implementations bind each
/// field separately; none of them is ever concatenated into query text.
#[derive(Debug, Clone, PartialEq)]
pub struct DedupeProbe {
    pub tenant_id: TenantId,
    pub survey_template_id: SurveyTemplateId,
    pub dedupe_key_hash: String,
    pub window: ScopeWindow,
    pub across: AcrossFilter,
}

impl DedupeProbe {
    /// Whether a registry record satisfies every clause of the probe.
    pub fn matches(&self, record: &SurveyDedupeRecord) -> bool {
        if record.tenant_id != self.tenant_id
            || record.survey_template_id != self.survey_template_id
            || record.dedupe_key_hash != self.dedupe_key_hash
        {
            return false;
        }
        let in_window = match self.window {
            ScopeWindow::Any => true,
            ScopeWindow::OnDate(date) => record.submission_date == date,
            ScopeWindow::OnOrAfter(date) => record.submission_date >= date,
        };
        if !in_window {
            return false;
        }
        match &self.across {
            AcrossFilter::Subject {
                subject_type,
                subject_id,
            } => record.subject_type == *subject_type && record.subject_id == *subject_id,
            AcrossFilter::Agent(agent_id) => record.agent_id.as_ref() == Some(agent_id),
            AcrossFilter::Tenant => true,
        }
    }
}

/// Read side of survey template configuration: the questions marked as
/// dedupe keys, in template order.
pub trait DedupeQuestionSource: Send + Sync {
    fn dedupe_questions(
        &self,
        template_id: &SurveyTemplateId,
    ) -> Result<Vec<DedupeQuestion>, SurveyStoreError>;
}

/// Registry of dedupe identities for accepted submissions.
pub trait SurveyDedupeStore: Send + Sync {
    /// Any prior record satisfying the probe; which one is unspecified.
    fn find_match(&self, probe: &DedupeProbe) -> Result<Option<SurveyDedupeRecord>, SurveyStoreError>;

    /// Appends a record unconditionally and returns it with its issued id.
    fn record(&self, record: NewSurveyDedupeRecord) -> Result<SurveyDedupeRecord, SurveyStoreError>;
}

/// Failures surfaced by survey configuration and registry backends.
#[derive(Debug, thiserror::Error)]
pub enum SurveyStoreError {
    #[error("survey store unavailable: {0}")]
    Unavailable(String),
}
