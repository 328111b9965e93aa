use crate::infra::{default_dedupe_catalog, InMemorySurveyRegistry, InMemoryVisitStore};
use chrono::{DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, TimeZone};
use clap::Args;
use fieldsync::commissions::{
    review_placement, settle_visit, ActivityClaim, ActivityKind, BoardId, BoardProfile, BonusRule,
    CoverageReward, ImageAnalysisConfig, ImageMetadata, PlacementSubmission, RateCard,
};
use fieldsync::error::AppError;
use fieldsync::geo::GeoPoint;
use fieldsync::surveys::{
    QuestionId, SurveyAnswer, SurveyDedupeEngine, SurveySubmission, SurveyTemplateId,
};
use fieldsync::visits::{
    AgentId, FraudConfig, GeofencePolicy, SubjectId, SubjectType, TenantId, VisitIntegrityService,
    VisitOutcome, VisitResolution, VisitSubmission,
};
use std::sync::Arc;

const DEMO_TENANT: &str = "tenant-kilimani";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Field day to simulate (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Skip the survey dedupe portion of the demo.
    #[arg(long)]
    pub(crate) skip_surveys: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { date, skip_surveys } = args;
    let date = date.unwrap_or_else(|| Local::now().date_naive());

    println!("Field visit integrity demo");
    println!("Simulated field day: {date} (tenant {DEMO_TENANT})");

    let store = Arc::new(InMemoryVisitStore::default());
    let service = VisitIntegrityService::new(
        store.clone(),
        GeofencePolicy::default(),
        FraudConfig::default(),
    );

    // A duka on Argwings Kodhek Road and the agent's live fixes around it.
    let duka = GeoPoint::new(-1.2921, 36.8219);
    let at_the_door = GeoPoint::new(-1.29215, 36.8219);
    let across_the_road = GeoPoint::new(-1.2930, 36.8219);

    println!("\nGeofence checks against the registered duka location");
    match service.validate_location(Some(duka), at_the_door) {
        Ok(check) => println!("- at the door ({:.1} m): {}", check.distance_meters, check.message),
        Err(err) => println!("- at the door: {err}"),
    }
    match service.validate_location(Some(duka), across_the_road) {
        Ok(check) => println!(
            "- across the road ({:.1} m): {}",
            check.distance_meters, check.message
        ),
        Err(err) => println!("- across the road: {err}"),
    }
    match service.validate_location(None, at_the_door) {
        Ok(check) => println!("- unmapped subject unexpectedly passed: {}", check.message),
        Err(err) => println!("- unmapped subject: {err}"),
    }

    println!("\nVisit claims across the day");
    run_visit(
        &service,
        "wanjiku visits the duka at 09:15",
        &visit(
            "agent-wanjiku",
            SubjectType::Customer,
            "customer-duka-001",
            at_the_door,
            at(date, 9, 15),
        ),
    );

    let market_stall = GeoPoint::new(-1.2950, 36.8100);
    run_visit(
        &service,
        "wanjiku signs up a shopper at the market at 10:00",
        &visit(
            "agent-wanjiku",
            SubjectType::Individual,
            "individual-042",
            market_stall,
            at(date, 10, 0),
        ),
    );
    run_visit(
        &service,
        "wanjiku logs another shopper two minutes later",
        &visit(
            "agent-wanjiku",
            SubjectType::Individual,
            "individual-043",
            GeoPoint::new(-1.3100, 36.8300),
            at(date, 10, 2),
        ),
    );
    run_visit(
        &service,
        "odhiambo claims a shopper from the same stall at 10:25",
        &visit(
            "agent-odhiambo",
            SubjectType::Individual,
            "individual-077",
            GeoPoint::new(-1.2951, 36.8100),
            at(date, 10, 25),
        ),
    );
    run_visit(
        &service,
        "wanjiku returns to the duka at 16:40",
        &visit(
            "agent-wanjiku",
            SubjectType::Customer,
            "customer-duka-001",
            at_the_door,
            at(date, 16, 40),
        ),
    );
    println!("Visit log now holds {} committed events", store.events().len());

    if !skip_surveys {
        println!("\nSurvey dedupe walkthrough (template-brand-pulse, same-day scope)");
        let registry = Arc::new(InMemorySurveyRegistry::default());
        let engine = SurveyDedupeEngine::new(Arc::new(default_dedupe_catalog()), registry.clone());

        let first = survey("customer-duka-001", at(date, 9, 20));
        match engine.check_duplicate(&first) {
            Ok(check) if check.is_duplicate => println!("- pre-check unexpectedly found a match"),
            Ok(_) => println!("- pre-check: no matching submission on record"),
            Err(err) => {
                println!("- survey registry unavailable: {err}");
                return Ok(());
            }
        }
        match engine.submit(&first) {
            Ok(outcome) => match outcome.recorded {
                Some(record) => println!("- submission accepted, registered as {}", record.record_id.0),
                None => println!("- submission accepted without dedupe tracking"),
            },
            Err(err) => {
                println!("- survey registry unavailable: {err}");
                return Ok(());
            }
        }

        let repeat = survey("customer-duka-001", at(date, 11, 45));
        match engine.submit(&repeat) {
            Ok(outcome) if outcome.is_duplicate() => {
                println!("- repeat at 11:45 refused");
                if let Some(message) = &outcome.check.message {
                    println!("  {message}");
                }
            }
            Ok(_) => println!("- repeat at 11:45 unexpectedly accepted"),
            Err(err) => {
                println!("- survey registry unavailable: {err}");
                return Ok(());
            }
        }

        let tomorrow = survey("customer-duka-001", at(date + Duration::days(1), 8, 30));
        match engine.check_duplicate(&tomorrow) {
            Ok(check) if check.is_duplicate => println!("- next-day check unexpectedly matched"),
            Ok(_) => println!("- next morning the same answers are accepted again"),
            Err(err) => {
                println!("- survey registry unavailable: {err}");
                return Ok(());
            }
        }
        println!("Dedupe registry holds {} records", registry.records().len());
    }

    println!("\nBoard placement review");
    let board = BoardProfile {
        board_id: BoardId("board-naivasha-road-001".to_string()),
        commission_rate: 10.0,
        bonus_rules: vec![
            BonusRule::Coverage {
                min_coverage: 50.0,
                reward: CoverageReward::Amount(5.0),
            },
            BonusRule::Coverage {
                min_coverage: 75.0,
                reward: CoverageReward::Multiplier(1.0),
            },
            BonusRule::Quality { amount: 3.0 },
        ],
    };
    let config = ImageAnalysisConfig::default();

    let sharp = PlacementSubmission {
        board_image: image(1920, 1080),
        storefront_image: image(1920, 1080),
    };
    match review_placement(&board, &sharp, &config) {
        Ok(review) => {
            println!(
                "- sharp close-up: coverage {:.1}% | quality {:.1} | confidence {:.2}",
                review.analysis.coverage_percentage,
                review.analysis.quality_score,
                review.analysis.confidence
            );
            println!(
                "  commission base {:.2} + bonuses {:.2} = {:.2}",
                review.commission.base_amount,
                review.commission.bonus_amount,
                review.commission.total_amount
            );
            for bonus in &review.commission.factors.applied_bonuses {
                println!("    {:?} contributed {:.2}", bonus.rule, bonus.amount);
            }
        }
        Err(err) => println!("- sharp close-up rejected: {err}"),
    }

    let distant = PlacementSubmission {
        board_image: image(800, 600),
        storefront_image: image(1920, 1080),
    };
    match review_placement(&board, &distant, &config) {
        Ok(review) => println!(
            "- distant shot unexpectedly passed at confidence {:.2}",
            review.analysis.confidence
        ),
        Err(err) => println!("- distant shot rejected: {err}"),
    }

    println!("\nVisit settlement at the standard rate card");
    let settlement = settle_visit(
        &RateCard::default(),
        &[
            ActivityClaim {
                kind: ActivityKind::Survey,
                completed: true,
                quantity: None,
            },
            ActivityClaim {
                kind: ActivityKind::BoardPlacement,
                completed: true,
                quantity: None,
            },
            ActivityClaim {
                kind: ActivityKind::ProductDistribution,
                completed: true,
                quantity: Some(24),
            },
            ActivityClaim {
                kind: ActivityKind::PhotoCapture,
                completed: false,
                quantity: None,
            },
        ],
    );
    for line in &settlement.line_items {
        match line.quantity {
            Some(quantity) => println!("- {} x{}: {:.2}", line.kind.label(), quantity, line.amount),
            None => println!("- {}: {:.2}", line.kind.label(), line.amount),
        }
    }
    println!(
        "Total payout: {:.2} (incomplete photo capture earns nothing)",
        settlement.total_amount
    );

    Ok(())
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(3 * 3600).expect("valid utc offset");
    offset
        .with_ymd_and_hms(date.year(), date.month(), date.day(), hour, minute, 0)
        .single()
        .expect("valid demo timestamp")
}

fn visit(
    agent: &str,
    subject_type: SubjectType,
    subject: &str,
    location: GeoPoint,
    recorded_at: DateTime<FixedOffset>,
) -> VisitSubmission {
    VisitSubmission {
        tenant_id: TenantId(DEMO_TENANT.to_string()),
        agent_id: AgentId(agent.to_string()),
        subject_type,
        subject_id: SubjectId(subject.to_string()),
        location: Some(location),
        gps_accuracy_meters: Some(8.0),
        recorded_at,
    }
}

fn survey(subject: &str, recorded_at: DateTime<FixedOffset>) -> SurveySubmission {
    SurveySubmission {
        tenant_id: TenantId(DEMO_TENANT.to_string()),
        survey_template_id: SurveyTemplateId("template-brand-pulse".to_string()),
        subject_type: SubjectType::Customer,
        subject_id: SubjectId(subject.to_string()),
        agent_id: Some(AgentId("agent-wanjiku".to_string())),
        answers: vec![
            SurveyAnswer {
                question_id: QuestionId("q-purchase-intent".to_string()),
                value: "within-a-week".to_string(),
            },
            SurveyAnswer {
                question_id: QuestionId("q-favorite-brand".to_string()),
                value: "acme-tea".to_string(),
            },
        ],
        recorded_at,
    }
}

fn image(width_pixels: u32, height_pixels: u32) -> ImageMetadata {
    ImageMetadata {
        width_pixels,
        height_pixels,
        format: Some("jpeg".to_string()),
        file_size_bytes: Some(2 * 1024 * 1024),
        pixel_density: Some(300),
    }
}

fn run_visit(service: &VisitIntegrityService<InMemoryVisitStore>, label: &str, claim: &VisitSubmission) {
    match service.submit(claim) {
        Ok(outcome) => print_outcome(label, &outcome),
        Err(err) => println!("- {label}: visit log unavailable ({err})"),
    }
}

fn print_outcome(label: &str, outcome: &VisitOutcome) {
    match &outcome.resolution {
        VisitResolution::Registered {
            event,
            flagged_for_review,
        } => {
            if *flagged_for_review {
                println!(
                    "- {label}: registered as {} and flagged for review",
                    event.event_id.0
                );
            } else {
                println!("- {label}: registered as {}", event.event_id.0);
            }
        }
        VisitResolution::Rejected { reason } => {
            println!("- {label}: rejected ({})", reason.code());
        }
    }
    println!(
        "  fraud score {:.2} -> {}",
        outcome.assessment.fraud_score,
        outcome.assessment.decision.summary()
    );
    for indicator in &outcome.assessment.indicators {
        println!(
            "    signal {} (weight {:.1})",
            indicator.code(),
            indicator.weight()
        );
    }
}
