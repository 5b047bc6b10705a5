//! Dimension tables of the harvest star schema (`/api/fincas`, `/api/variedades`,
//! `/api/zonas`, `/api/tiempo`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farm {
    pub finca_id: i64,
    #[serde(default)]
    pub codigo_finca: Option<String>,
    pub nombre_finca: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variety {
    pub variedad_id: i64,
    pub nombre_variedad: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub codigo_zona: String,
    pub nombre_zona: String,
}

/// One row of the time dimension (one per month).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePeriod {
    #[serde(default)]
    pub tiempo_id: Option<i64>,
    #[serde(rename = "año")]
    pub year: i32,
    #[serde(rename = "mes")]
    pub month: u32,
    #[serde(rename = "nombre_mes", default)]
    pub month_name: Option<String>,
    #[serde(rename = "trimestre", default)]
    pub quarter: Option<u32>,
    #[serde(rename = "fecha", default)]
    pub date: Option<String>,
}

pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Spanish month name for `1..=12`.
pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_NAMES.get(idx as usize))
        .copied()
}

/// Distinct years of the time dimension, newest first.
pub fn distinct_years(periods: &[TimePeriod]) -> Vec<i32> {
    let mut years: Vec<i32> = periods.iter().map(|p| p.year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), Some("Enero"));
        assert_eq!(month_name(12), Some("Diciembre"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_time_period_wire_names() {
        let json = serde_json::json!({
            "tiempo_id": 7,
            "año": 2024,
            "mes": 3,
            "nombre_mes": "Marzo",
            "trimestre": 1,
            "fecha": "2024-03-01"
        });
        let period: TimePeriod = serde_json::from_value(json).unwrap();
        assert_eq!(period.year, 2024);
        assert_eq!(period.month, 3);
        assert_eq!(period.quarter, Some(1));
    }

    #[test]
    fn test_distinct_years_newest_first() {
        let period = |year, month| TimePeriod {
            tiempo_id: None,
            year,
            month,
            month_name: None,
            quarter: None,
            date: None,
        };
        let periods = vec![period(2023, 1), period(2025, 2), period(2023, 5), period(2024, 1)];
        assert_eq!(distinct_years(&periods), vec![2025, 2024, 2023]);
    }
}
