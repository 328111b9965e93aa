use std::sync::Arc;

use chrono::NaiveDate;

use super::common::*;
use crate::geo::GeoPoint;
use crate::visits::domain::SubjectType;
use crate::visits::registrar::VisitRegistrar;
use crate::visits::store::VisitStoreError;

#[test]
fn commit_appends_event_with_derived_date() {
    let store = Arc::new(MemoryVisitLog::default());
    let registrar = VisitRegistrar::new(store.clone());

    let claim = submission(
        "juma",
        SubjectType::Customer,
        "duka-14",
        Some(GeoPoint::new(-1.2921, 36.8219)),
        at(9, 30),
    );
    let event = registrar.commit(&claim).expect("commit succeeds");

    assert_eq!(event.event_id.0, "visit-000001");
    assert_eq!(
        event.visit_date,
        NaiveDate::from_ymd_opt(2026, 3, 5).expect("valid date")
    );
    assert_eq!(event.visit_timestamp, claim.instant());
    assert_eq!(store.events().len(), 1);
}

#[test]
fn commit_derives_the_tenant_local_date_across_midnight() {
    let store = Arc::new(MemoryVisitLog::default());
    let registrar = VisitRegistrar::new(store);

    // 00:30 local on March 6th is still March 5th in UTC.
    let claim = submission(
        "juma",
        SubjectType::Individual,
        "amina",
        None,
        on_day(6, 0, 30),
    );
    let event = registrar.commit(&claim).expect("commit succeeds");

    assert_eq!(
        event.visit_date,
        NaiveDate::from_ymd_opt(2026, 3, 6).expect("valid date")
    );
    assert_eq!(
        event.visit_timestamp.date_naive(),
        NaiveDate::from_ymd_opt(2026, 3, 5).expect("valid date")
    );
}

#[test]
fn second_commit_for_the_same_day_collides() {
    let store = Arc::new(MemoryVisitLog::default());
    let registrar = VisitRegistrar::new(store.clone());

    let claim = submission("juma", SubjectType::Customer, "duka-14", None, at(9, 0));
    registrar.commit(&claim).expect("first commit succeeds");

    let retry = submission("juma", SubjectType::Customer, "duka-14", None, at(17, 45));
    match registrar.commit(&retry) {
        Err(VisitStoreError::DuplicateVisit) => {}
        other => panic!("expected duplicate visit, got {other:?}"),
    }
    assert_eq!(store.events().len(), 1);
}

#[test]
fn same_subject_commits_again_the_next_day() {
    let store = Arc::new(MemoryVisitLog::default());
    let registrar = VisitRegistrar::new(store);

    let claim = submission("juma", SubjectType::Customer, "duka-14", None, at(9, 0));
    registrar.commit(&claim).expect("first commit succeeds");

    let next_day = submission(
        "juma",
        SubjectType::Customer,
        "duka-14",
        None,
        on_day(6, 9, 0),
    );
    registrar.commit(&next_day).expect("next-day commit succeeds");
}

#[test]
fn distinct_agents_may_share_a_subject_and_day() {
    let store = Arc::new(MemoryVisitLog::default());
    let registrar = VisitRegistrar::new(store.clone());

    let first = submission("juma", SubjectType::Customer, "duka-14", None, at(9, 0));
    let second = submission("baraka", SubjectType::Customer, "duka-14", None, at(10, 0));

    registrar.commit(&first).expect("first commit succeeds");
    registrar.commit(&second).expect("second commit succeeds");
    assert_eq!(store.events().len(), 2);
}
