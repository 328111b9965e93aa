use std::sync::Arc;

use super::domain::{NewVisitEvent, VisitEvent, VisitSubmission};
use super::store::{ProximityStore, VisitStoreError};

/// Commits accepted visit claims into the history log.
pub struct VisitRegistrar<S> {
    store: Arc<S>,
}

impl<S> VisitRegistrar<S>
where
    S: ProximityStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Append the visit fact, deriving the tenant-local calendar date from
    /// the submission timestamp.
    ///
    /// The store's uniqueness key is the authoritative duplicate guard; a
    /// `DuplicateVisit` failure here means a concurrent commit won and the
    /// caller must treat the claim as blocked, not as a system fault.
    pub fn commit(&self, submission: &VisitSubmission) -> Result<VisitEvent, VisitStoreError> {
        self.store
            .insert_visit(NewVisitEvent::from_submission(submission))
    }
}
