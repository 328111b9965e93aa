use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::visits::domain::{AgentId, SubjectId, SubjectType, TenantId};

/// Identifier wrapper for survey templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurveyTemplateId(pub String);

/// Identifier wrapper for survey questions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub String);

/// Identifier wrapper for registry rows, issued by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DedupeRecordId(pub String);

/// One answered question as the route layer hands it over; the value is
/// already normalized upstream and compared by exact string match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyAnswer {
    pub question_id: QuestionId,
    pub value: String,
}

/// Time window over which a dedupe key collides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupeScope {
    Ever,
    Day,
    Week,
    Month,
    None,
}

impl DedupeScope {
    pub const fn label(self) -> &'static str {
        match self {
            DedupeScope::Ever => "ever",
            DedupeScope::Day => "day",
            DedupeScope::Week => "week",
            DedupeScope::Month => "month",
            DedupeScope::None => "none",
        }
    }
}

/// Raised when survey configuration names an unknown scope.
#[derive(Debug, thiserror::Error)]
#[error("invalid dedupe scope: {value}")]
pub struct InvalidDedupeScope {
    pub value: String,
}

impl FromStr for DedupeScope {
    type Err = InvalidDedupeScope;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ever" => Ok(DedupeScope::Ever),
            "day" => Ok(DedupeScope::Day),
            "week" => Ok(DedupeScope::Week),
            "month" => Ok(DedupeScope::Month),
            "none" => Ok(DedupeScope::None),
            other => Err(InvalidDedupeScope {
                value: other.to_string(),
            }),
        }
    }
}

/// Dimension within which a dedupe key must be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupeAcross {
    Subject,
    Agent,
    Tenant,
}

impl DedupeAcross {
    pub const fn label(self) -> &'static str {
        match self {
            DedupeAcross::Subject => "subject",
            DedupeAcross::Agent => "agent",
            DedupeAcross::Tenant => "tenant",
        }
    }
}

/// Raised when survey configuration names an unknown across dimension.
#[derive(Debug, thiserror::Error)]
#[error("invalid dedupe across dimension: {value}")]
pub struct InvalidDedupeAcross {
    pub value: String,
}

impl FromStr for DedupeAcross {
    type Err = InvalidDedupeAcross;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "subject" => Ok(DedupeAcross::Subject),
            "agent" => Ok(DedupeAcross::Agent),
            "tenant" => Ok(DedupeAcross::Tenant),
            other => Err(InvalidDedupeAcross {
                value: other.to_string(),
            }),
        }
    }
}

/// A question marked as a dedupe key in template configuration, in template
/// order. When several questions carry the mark, the first one's scope and
/// across govern the whole template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupeQuestion {
    pub question_id: QuestionId,
    pub scope: DedupeScope,
    pub across: DedupeAcross,
}

/// Inbound survey submission as handed over by the route layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveySubmission {
    pub tenant_id: TenantId,
    pub survey_template_id: SurveyTemplateId,
    pub subject_type: SubjectType,
    pub subject_id: SubjectId,
    pub agent_id: Option<AgentId>,
    pub answers: Vec<SurveyAnswer>,
    pub recorded_at: DateTime<FixedOffset>,
}

impl SurveySubmission {
    /// Tenant-local calendar date of the submission.
    pub fn submission_date(&self) -> NaiveDate {
        self.recorded_at.date_naive()
    }

    /// The submission instant normalized to UTC.
    pub fn instant(&self) -> DateTime<Utc> {
        self.recorded_at.with_timezone(&Utc)
    }
}

/// Append-only registry fact for an accepted submission's dedupe identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyDedupeRecord {
    pub record_id: DedupeRecordId,
    pub tenant_id: TenantId,
    pub survey_template_id: SurveyTemplateId,
    pub subject_type: SubjectType,
    pub subject_id: SubjectId,
    pub agent_id: Option<AgentId>,
    pub dedupe_key_hash: String,
    pub submission_date: NaiveDate,
    pub submission_timestamp: DateTime<Utc>,
}

/// Insert payload for the registry; the store issues the record id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSurveyDedupeRecord {
    pub tenant_id: TenantId,
    pub survey_template_id: SurveyTemplateId,
    pub subject_type: SubjectType,
    pub subject_id: SubjectId,
    pub agent_id: Option<AgentId>,
    pub dedupe_key_hash: String,
    pub submission_date: NaiveDate,
    pub submission_timestamp: DateTime<Utc>,
}

/// Stable machine reason reported on duplicate submissions.
pub const DUPLICATE_SURVEY_SUBMISSION: &str = "DUPLICATE_SURVEY_SUBMISSION";

/// Outcome of a duplicate check, shaped for the response payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DedupeCheck {
    pub is_duplicate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<SurveyDedupeRecord>,
}

impl DedupeCheck {
    pub fn clean() -> Self {
        Self {
            is_duplicate: false,
            reason: None,
            message: None,
            matched: None,
        }
    }

    pub fn duplicate(window_phrase: &str, matched: SurveyDedupeRecord) -> Self {
        Self {
            is_duplicate: true,
            reason: Some(DUPLICATE_SURVEY_SUBMISSION),
            message: Some(format!(
                "A matching survey was already submitted {window_phrase}"
            )),
            matched: Some(matched),
        }
    }
}
