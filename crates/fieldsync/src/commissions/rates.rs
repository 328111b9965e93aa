use serde::{Deserialize, Serialize};

use super::calculator::flat_commission;
use super::domain::round_cents;

/// Activity kinds a field visit can claim commission for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Survey,
    BoardPlacement,
    ProductDistribution,
    PhotoCapture,
}

impl ActivityKind {
    pub const fn label(self) -> &'static str {
        match self {
            ActivityKind::Survey => "survey",
            ActivityKind::BoardPlacement => "board_placement",
            ActivityKind::ProductDistribution => "product_distribution",
            ActivityKind::PhotoCapture => "photo_capture",
        }
    }
}

/// Flat per-activity rates. Defaults carry the standard card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCard {
    pub survey: f64,
    pub board_placement: f64,
    pub product_distribution_per_unit: f64,
    pub photo_capture: f64,
}

impl Default for RateCard {
    fn default() -> Self {
        Self {
            survey: 5.0,
            board_placement: 10.0,
            product_distribution_per_unit: 0.5,
            photo_capture: 2.0,
        }
    }
}

/// One activity claimed on a visit. Quantity only matters for product
/// distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityClaim {
    pub kind: ActivityKind,
    pub completed: bool,
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Payout summary for a visit's claimed activities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitSettlement {
    pub line_items: Vec<SettlementLine>,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementLine {
    pub kind: ActivityKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    pub amount: f64,
}

/// Prices the completed activities of a visit against the rate card.
/// Incomplete activities earn nothing and produce no line item.
pub fn settle_visit(rates: &RateCard, activities: &[ActivityClaim]) -> VisitSettlement {
    let mut line_items = Vec::new();
    let mut total_amount = 0.0;

    for activity in activities {
        if !activity.completed {
            continue;
        }
        let amount = match activity.kind {
            ActivityKind::Survey => round_cents(rates.survey),
            ActivityKind::BoardPlacement => round_cents(rates.board_placement),
            ActivityKind::ProductDistribution => flat_commission(
                rates.product_distribution_per_unit,
                activity.quantity.unwrap_or(0),
            ),
            ActivityKind::PhotoCapture => round_cents(rates.photo_capture),
        };
        total_amount += amount;
        line_items.push(SettlementLine {
            kind: activity.kind,
            quantity: activity.quantity,
            amount,
        });
    }

    VisitSettlement {
        line_items,
        total_amount: round_cents(total_amount),
    }
}
