use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::schema::{AggregationFunction, Measure, OlapDimension, OlapOperation};

pub const DEFAULT_OLAP_LIMIT: u32 = 1000;

/// Body of `POST /api/olap/query`, sent verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OlapQuery {
    pub operation: OlapOperation,
    pub measures: Vec<Measure>,
    pub dimensions: Vec<OlapDimension>,
    /// Level per dimension, e.g. `tiempo -> "mes"`
    pub dimension_levels: BTreeMap<OlapDimension, String>,
    #[serde(default)]
    pub filters: BTreeMap<String, Value>,
    pub aggregation_functions: Vec<AggregationFunction>,
    pub limit: u32,
}

/// `data` of the OLAP query response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OlapResult {
    #[serde(default)]
    pub records: Vec<Map<String, Value>>,
    #[serde(default)]
    pub record_count: Option<u64>,
    /// Seconds spent by the backend
    #[serde(default)]
    pub execution_time: Option<f64>,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub sql_query: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl OlapResult {
    pub fn row_count(&self) -> u64 {
        self.record_count.unwrap_or(self.records.len() as u64)
    }

    /// Column names in first-seen order across all rows.
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for record in &self.records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        columns
    }
}

/// `/api/olap/dimensions` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionInfo {
    pub name: String,
    #[serde(default)]
    pub levels: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// `/api/olap/measures` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureInfo {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionsPayload {
    #[serde(default)]
    pub dimensions: Vec<DimensionInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasuresPayload {
    #[serde(default)]
    pub measures: Vec<MeasureInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationsPayload {
    #[serde(default)]
    pub aggregations: Vec<String>,
}

/// Everything the wizard can offer, as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OlapMetadata {
    pub dimensions: Vec<DimensionInfo>,
    pub measures: Vec<MeasureInfo>,
    pub aggregations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_wire_shape() {
        let query = OlapQuery {
            operation: OlapOperation::Aggregate,
            measures: vec![Measure::Toneladas, Measure::Brix],
            dimensions: vec![OlapDimension::Tiempo],
            dimension_levels: BTreeMap::from([(OlapDimension::Tiempo, "mes".to_string())]),
            filters: BTreeMap::new(),
            aggregation_functions: vec![AggregationFunction::Avg],
            limit: DEFAULT_OLAP_LIMIT,
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "operation": "aggregate",
                "measures": ["toneladas", "brix"],
                "dimensions": ["tiempo"],
                "dimension_levels": {"tiempo": "mes"},
                "filters": {},
                "aggregation_functions": ["avg"],
                "limit": 1000
            })
        );
    }

    #[test]
    fn test_result_columns_and_count() {
        let result: OlapResult = serde_json::from_value(serde_json::json!({
            "records": [
                {"año": 2023, "toneladas_sum": 10.0},
                {"año": 2024, "toneladas_sum": 12.5, "extra": 1}
            ],
            "execution_time": 0.12,
            "operation": "aggregate"
        }))
        .unwrap();
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.columns(), vec!["año", "toneladas_sum", "extra"]);
    }

    #[test]
    fn test_measure_info_type_field() {
        let info: MeasureInfo = serde_json::from_value(serde_json::json!({
            "name": "toneladas", "type": "numeric", "description": "Toneladas molidas"
        }))
        .unwrap();
        assert_eq!(info.kind.as_deref(), Some("numeric"));
    }
}
