use contracts::shared::error::ApiError;
use contracts::shared::filters::{FilterOptionSet, FilterSelection, RawFilterOptions};

use crate::domain::dimensions::api as dimensions;
use crate::shared::api_utils::get_json_with_query;

/// Intersection query: candidate values per key for a partial selection.
pub async fn get_filter_options(selection: &FilterSelection) -> Result<FilterOptionSet, ApiError> {
    let raw: RawFilterOptions = get_json_with_query("/api/filtros/opciones", selection).await?;
    Ok(FilterOptionSet::from(raw))
}

/// Every known dimension value with zero counts, from the plain dimension
/// endpoints. Used when the intersection query fails or comes back empty.
pub async fn get_basic_options() -> Result<FilterOptionSet, ApiError> {
    log::info!("loading basic filter options");
    let farms = dimensions::get_farms().await?;
    let varieties = dimensions::get_varieties().await?;
    let zones = dimensions::get_zones().await?;
    let periods = dimensions::get_time_periods().await?;
    Ok(FilterOptionSet::basic(&farms, &varieties, &zones, &periods))
}
