//! Harvest fact rows (`/api/cosecha`, `/api/cosecha/top`).

use serde::{Deserialize, Serialize};

use crate::shared::filters::FilterSelection;

/// One row per farm / variety / zone / month, read-only for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestRecord {
    #[serde(rename = "id_hecho", default)]
    pub id: Option<i64>,
    #[serde(rename = "nombre_finca", default)]
    pub farm: String,
    #[serde(rename = "nombre_variedad", default)]
    pub variety: String,
    #[serde(rename = "nombre_zona", default)]
    pub zone: String,
    #[serde(rename = "año", default)]
    pub year: Option<i32>,
    #[serde(rename = "mes", default)]
    pub month: Option<u32>,
    #[serde(rename = "nombre_mes", default)]
    pub month_name: Option<String>,
    #[serde(rename = "toneladas_cana_molida", default)]
    pub tonnage: f64,
    /// Tons of cane per hectare.
    #[serde(default)]
    pub tch: f64,
    #[serde(rename = "area_cosechada", default)]
    pub harvested_area: f64,
    #[serde(default)]
    pub brix: f64,
    #[serde(rename = "sacarosa", default)]
    pub sucrose: f64,
    #[serde(rename = "rendimiento_teorico", default)]
    pub theoretical_yield: f64,
}

/// Query string of `/api/cosecha`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HarvestQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finca_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variedad_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zona_id: Option<String>,
    #[serde(rename = "año", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(rename = "mes", skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl HarvestQuery {
    /// Harvest query for a filter selection. The top-farms cut is applied
    /// client-side over the returned rows, so it is not forwarded.
    pub fn from_selection(selection: &FilterSelection, limit: Option<u32>) -> Self {
        Self {
            finca_id: None,
            variedad_id: selection.variety,
            zona_id: selection.zone.clone(),
            year: selection.year,
            month: selection.month,
            limit,
            offset: None,
        }
    }
}

/// Ranking criterion of `/api/cosecha/top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopCriterion {
    Toneladas,
    Tch,
    Brix,
    Sacarosa,
}

impl TopCriterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopCriterion::Toneladas => "toneladas",
            TopCriterion::Tch => "tch",
            TopCriterion::Brix => "brix",
            TopCriterion::Sacarosa => "sacarosa",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopHarvestQuery {
    pub criterio: TopCriterion,
    pub limit: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_with_missing_measures() {
        let json = serde_json::json!({
            "id_hecho": 1,
            "nombre_finca": "La Esperanza",
            "nombre_variedad": "CC 85-92",
            "nombre_zona": "Norte",
            "año": 2024,
            "mes": 3,
            "toneladas_cana_molida": 1520.5,
            "tch": 118.2
        });
        let record: HarvestRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.farm, "La Esperanza");
        assert_eq!(record.tonnage, 1520.5);
        assert_eq!(record.brix, 0.0);
        assert_eq!(record.month_name, None);
    }

    #[test]
    fn test_query_from_selection_skips_unset_keys() {
        let selection = FilterSelection {
            year: Some(2024),
            month: Some(3),
            zone: Some("Z1".into()),
            variety: None,
            top_farms: Some(10),
        };
        let query = HarvestQuery::from_selection(&selection, Some(100));
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"zona_id": "Z1", "año": 2024, "mes": 3, "limit": 100})
        );
    }
}
