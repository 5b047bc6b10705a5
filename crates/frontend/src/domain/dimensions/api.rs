use contracts::domain::dimensions::{Farm, TimePeriod, Variety, Zone};
use contracts::shared::error::ApiError;

use crate::shared::api_utils::get_json;

pub async fn get_farms() -> Result<Vec<Farm>, ApiError> {
    get_json("/api/fincas").await
}

pub async fn get_varieties() -> Result<Vec<Variety>, ApiError> {
    get_json("/api/variedades").await
}

pub async fn get_zones() -> Result<Vec<Zone>, ApiError> {
    get_json("/api/zonas").await
}

pub async fn get_time_periods() -> Result<Vec<TimePeriod>, ApiError> {
    get_json("/api/tiempo").await
}
