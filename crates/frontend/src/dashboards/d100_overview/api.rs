use contracts::dashboards::d100_overview::dto::SystemStats;
use contracts::domain::harvest::{HarvestRecord, TopCriterion};
use contracts::shared::error::ApiError;

use crate::domain::harvest::api::get_top_harvests;
use crate::shared::api_utils::get_json;

pub const TOP_FARMS_LIMIT: u32 = 5;

/// Aggregate counters for the overview cards
pub async fn get_stats() -> Result<SystemStats, ApiError> {
    get_json("/api/estadisticas").await
}

/// Everything the overview page shows, fetched in one go
pub struct OverviewData {
    pub stats: SystemStats,
    pub top_harvests: Vec<HarvestRecord>,
}

pub async fn load_overview() -> Result<OverviewData, ApiError> {
    let stats = get_stats().await?;
    let top_harvests = get_top_harvests(TopCriterion::Toneladas, TOP_FARMS_LIMIT).await?;
    Ok(OverviewData { stats, top_harvests })
}
