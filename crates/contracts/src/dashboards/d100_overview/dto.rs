use serde::{Deserialize, Serialize};

/// Response of `/api/estadisticas`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    /// Farms in the farm dimension
    #[serde(rename = "total_dimfinca", default)]
    pub total_farms: u64,
    #[serde(rename = "total_dimvariedad", default)]
    pub total_varieties: u64,
    #[serde(rename = "total_dimzona", default)]
    pub total_zones: u64,
    #[serde(rename = "total_dimtiempo", default)]
    pub total_periods: u64,
    /// Rows of the harvest fact table
    #[serde(rename = "total_hechos_cosecha", default)]
    pub total_fact_rows: u64,
    #[serde(rename = "total_cosechas", default)]
    pub total_harvests: u64,
    #[serde(rename = "total_toneladas", default)]
    pub total_tonnage: f64,
    #[serde(rename = "promedio_tch", default)]
    pub avg_tch: f64,
    #[serde(rename = "promedio_brix", default)]
    pub avg_brix: f64,
    #[serde(rename = "promedio_sacarosa", default)]
    pub avg_sucrose: f64,
    #[serde(rename = "año_inicio", default)]
    pub first_year: Option<i32>,
    #[serde(rename = "año_fin", default)]
    pub last_year: Option<i32>,
}

impl SystemStats {
    /// Harvest count, preferring the explicit counter over the fact row count
    pub fn harvest_count(&self) -> u64 {
        if self.total_harvests > 0 {
            self.total_harvests
        } else {
            self.total_fact_rows
        }
    }

    /// "2019 - 2024" or `None` while the range is unknown
    pub fn year_range(&self) -> Option<String> {
        match (self.first_year, self.last_year) {
            (Some(a), Some(b)) if a == b => Some(a.to_string()),
            (Some(a), Some(b)) => Some(format!("{} - {}", a, b)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_backend_stats() {
        let stats: SystemStats = serde_json::from_value(serde_json::json!({
            "total_dimfinca": 42,
            "total_dimvariedad": 8,
            "total_dimzona": 5,
            "total_hechos_cosecha": 1200,
            "total_toneladas": 98234.5,
            "promedio_tch": 112.4,
            "promedio_brix": 18.2,
            "año_inicio": 2019,
            "año_fin": 2024
        }))
        .unwrap();
        assert_eq!(stats.total_farms, 42);
        assert_eq!(stats.harvest_count(), 1200);
        assert_eq!(stats.avg_sucrose, 0.0);
        assert_eq!(stats.year_range().as_deref(), Some("2019 - 2024"));
    }

    #[test]
    fn test_year_range_unknown() {
        assert_eq!(SystemStats::default().year_range(), None);
    }
}
