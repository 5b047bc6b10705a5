use contracts::shared::error::ApiError;
use contracts::shared::olap::{
    AggregationsPayload, DimensionInfo, DimensionsPayload, MeasureInfo, MeasuresPayload,
    OlapDimension, OlapMetadata, OlapQuery, OlapResult,
};
use serde_json::Value;

use crate::shared::api_utils::{get_json, post_json};

pub async fn get_dimensions() -> Result<Vec<DimensionInfo>, ApiError> {
    let payload: DimensionsPayload = get_json("/api/olap/dimensions").await?;
    Ok(payload.dimensions)
}

pub async fn get_measures() -> Result<Vec<MeasureInfo>, ApiError> {
    let payload: MeasuresPayload = get_json("/api/olap/measures").await?;
    Ok(payload.measures)
}

pub async fn get_aggregations() -> Result<Vec<String>, ApiError> {
    let payload: AggregationsPayload = get_json("/api/olap/aggregations").await?;
    Ok(payload.aggregations)
}

/// Catalogue of dimensions, measures and functions offered by the backend
pub async fn load_metadata() -> Result<OlapMetadata, ApiError> {
    Ok(OlapMetadata {
        dimensions: get_dimensions().await?,
        measures: get_measures().await?,
        aggregations: get_aggregations().await?,
    })
}

pub async fn execute_query(query: &OlapQuery) -> Result<OlapResult, ApiError> {
    log::info!(
        "olap query: {} measures x {} dimensions",
        query.measures.len(),
        query.dimensions.len()
    );
    post_json("/api/olap/query", query).await
}

/// Distinct members of a dimension level, e.g. every year or every zone
pub async fn get_dimension_values(
    dimension: OlapDimension,
    level: &str,
) -> Result<Vec<Value>, ApiError> {
    let path = dimension_values_path(dimension, level);
    get_json(&path).await
}

fn dimension_values_path(dimension: OlapDimension, level: &str) -> String {
    format!(
        "/api/olap/dimension-values/{}/{}",
        dimension.as_str(),
        urlencoding::encode(level)
    )
}
