//! Deterministic suspicion signals derived from raw listing data.
//!
//! Extraction is pure and total: any record, including one with every
//! optional field empty, produces a fully populated bundle. The bundle is
//! owned by the orchestrator for one app's analysis and is reconstructible
//! from the record at any time, so nothing here is persisted.

pub mod description;
pub mod developer;
pub mod permissions;
pub mod reviews;

pub use description::DescriptionIndicators;
pub use developer::DeveloperIndicators;
pub use permissions::PermissionIndicators;
pub use reviews::ReviewIndicators;

use crate::core::{AppRecord, DetectionConfig};
use serde::Serialize;

/// Every suspicion signal computed for one app, fed verbatim into the
/// classification prompt.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorBundle {
    pub permissions: PermissionIndicators,
    pub developer: DeveloperIndicators,
    pub reviews: ReviewIndicators,
    pub description: DescriptionIndicators,
    /// Paid apps in the Finance category warrant extra scrutiny.
    pub paid_finance_app: bool,
}

impl IndicatorBundle {
    pub fn extract(app: &AppRecord, config: &DetectionConfig) -> Self {
        Self {
            permissions: permissions::analyze(&app.permissions, config),
            developer: developer::analyze(&app.developer, config),
            reviews: reviews::analyze(&app.reviews, config),
            description: description::analyze(app, config),
            paid_finance_app: app.price > 0.0 && app.category.eq_ignore_ascii_case("finance"),
        }
    }
}
