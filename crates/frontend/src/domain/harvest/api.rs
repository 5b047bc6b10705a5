use contracts::domain::harvest::{HarvestQuery, HarvestRecord, TopCriterion, TopHarvestQuery};
use contracts::shared::error::ApiError;
use contracts::shared::filters::FilterSelection;

use crate::shared::api_utils::get_json_with_query;

/// Rows shown when no filter is applied
pub const UNFILTERED_TOP_LIMIT: u32 = 100;

pub async fn get_harvest(query: &HarvestQuery) -> Result<Vec<HarvestRecord>, ApiError> {
    get_json_with_query("/api/cosecha", query).await
}

pub async fn get_top_harvests(
    criterion: TopCriterion,
    limit: u32,
) -> Result<Vec<HarvestRecord>, ApiError> {
    let query = TopHarvestQuery {
        criterio: criterion,
        limit,
    };
    get_json_with_query("/api/cosecha/top", &query).await
}

/// Harvest rows for a filter selection. An empty selection falls back to the
/// top harvests by tonnage.
pub async fn get_filtered_harvest(
    selection: &FilterSelection,
) -> Result<Vec<HarvestRecord>, ApiError> {
    if selection.is_empty() {
        log::info!("no filters applied, loading top harvests by tonnage");
        get_top_harvests(TopCriterion::Toneladas, UNFILTERED_TOP_LIMIT).await
    } else {
        get_harvest(&HarvestQuery::from_selection(selection, None)).await
    }
}
