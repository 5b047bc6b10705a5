//! Client-side aggregation of harvest rows for the analytics charts.

use std::collections::{BTreeMap, HashMap};

use contracts::domain::dimensions::month_name;
use contracts::domain::harvest::HarvestRecord;

use crate::shared::components::chart::ChartSeries;
use crate::shared::list_utils::compare_f64;

/// Farms shown in the tonnage-per-farm chart
pub const FARM_CHART_LIMIT: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QuickStats {
    pub count: usize,
    pub total_tonnage: f64,
    pub avg_tch: f64,
    pub avg_brix: f64,
}

impl QuickStats {
    pub fn from_records(records: &[HarvestRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let n = records.len() as f64;
        Self {
            count: records.len(),
            total_tonnage: records.iter().map(|r| r.tonnage).sum(),
            avg_tch: records.iter().map(|r| r.tch).sum::<f64>() / n,
            avg_brix: records.iter().map(|r| r.brix).sum::<f64>() / n,
        }
    }
}

fn label_or_unknown(label: &str) -> String {
    if label.trim().is_empty() {
        "Sin dato".to_string()
    } else {
        label.to_string()
    }
}

/// Total tonnage per farm, largest first
fn farm_totals(records: &[HarvestRecord]) -> Vec<(String, f64)> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for r in records {
        *totals.entry(label_or_unknown(&r.farm)).or_default() += r.tonnage;
    }
    let mut totals: Vec<(String, f64)> = totals.into_iter().collect();
    totals.sort_by(|a, b| compare_f64(b.1, a.1).then_with(|| a.0.cmp(&b.0)));
    totals
}

pub fn tonnage_by_farm(records: &[HarvestRecord], limit: usize) -> ChartSeries {
    let mut totals = farm_totals(records);
    totals.truncate(limit);
    ChartSeries::new(totals)
}

/// Mean of `value` per `group`, groups sorted by name
fn mean_by(
    records: &[HarvestRecord],
    group: impl Fn(&HarvestRecord) -> &str,
    value: impl Fn(&HarvestRecord) -> f64,
) -> ChartSeries {
    let mut acc: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for r in records {
        let entry = acc.entry(label_or_unknown(group(r))).or_default();
        entry.0 += value(r);
        entry.1 += 1;
    }
    ChartSeries::new(
        acc.into_iter()
            .map(|(label, (total, count))| (label, total / count as f64))
            .collect(),
    )
}

pub fn mean_tch_by_variety(records: &[HarvestRecord]) -> ChartSeries {
    mean_by(records, |r| r.variety.as_str(), |r| r.tch)
}

pub fn mean_brix_by_zone(records: &[HarvestRecord]) -> ChartSeries {
    mean_by(records, |r| r.zone.as_str(), |r| r.brix)
}

fn month_label(record: &HarvestRecord) -> String {
    let name = record
        .month_name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .or_else(|| record.month.and_then(month_name).map(str::to_string))
        .unwrap_or_else(|| "Sin mes".to_string());
    match record.year {
        Some(year) => format!("{} {}", name, year),
        None => name,
    }
}

/// Tonnage per (year, month) in calendar order; rows without a month go last
pub fn monthly_trend(records: &[HarvestRecord]) -> ChartSeries {
    let mut acc: BTreeMap<(i32, u32), (String, f64)> = BTreeMap::new();
    for r in records {
        let key = (r.year.unwrap_or(i32::MAX), r.month.unwrap_or(u32::MAX));
        let entry = acc.entry(key).or_insert_with(|| (month_label(r), 0.0));
        entry.1 += r.tonnage;
    }
    ChartSeries::new(acc.into_values().collect())
}

/// Rows of the `n` farms with the most total tonnage
pub fn apply_top_farms(records: Vec<HarvestRecord>, n: u32) -> Vec<HarvestRecord> {
    let keep: Vec<String> = farm_totals(&records)
        .into_iter()
        .take(n as usize)
        .map(|(farm, _)| farm)
        .collect();
    records
        .into_iter()
        .filter(|r| keep.contains(&label_or_unknown(&r.farm)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(farm: &str, variety: &str, zone: &str, month: u32, tonnage: f64, tch: f64, brix: f64) -> HarvestRecord {
        serde_json::from_value(serde_json::json!({
            "nombre_finca": farm,
            "nombre_variedad": variety,
            "nombre_zona": zone,
            "año": 2024,
            "mes": month,
            "toneladas_cana_molida": tonnage,
            "tch": tch,
            "brix": brix
        }))
        .unwrap()
    }

    fn sample() -> Vec<HarvestRecord> {
        vec![
            record("El Paraíso", "CC 85-92", "Norte", 3, 100.0, 120.0, 18.0),
            record("La Esperanza", "CC 01-1940", "Sur", 1, 300.0, 100.0, 17.0),
            record("El Paraíso", "CC 85-92", "Norte", 1, 250.0, 110.0, 19.0),
            record("San José", "CC 01-1940", "Sur", 2, 50.0, 90.0, 16.0),
        ]
    }

    #[test]
    fn test_quick_stats() {
        let stats = QuickStats::from_records(&sample());
        assert_eq!(stats.count, 4);
        assert_eq!(stats.total_tonnage, 700.0);
        assert_eq!(stats.avg_tch, 105.0);
        assert_eq!(stats.avg_brix, 17.5);
        assert_eq!(QuickStats::from_records(&[]), QuickStats::default());
    }

    #[test]
    fn test_tonnage_by_farm_sorted_and_limited() {
        let series = tonnage_by_farm(&sample(), 2);
        assert_eq!(series.labels, vec!["El Paraíso", "La Esperanza"]);
        assert_eq!(series.values, vec![350.0, 300.0]);
    }

    #[test]
    fn test_mean_by_group() {
        let tch = mean_tch_by_variety(&sample());
        assert_eq!(tch.labels, vec!["CC 01-1940", "CC 85-92"]);
        assert_eq!(tch.values, vec![95.0, 115.0]);
        let brix = mean_brix_by_zone(&sample());
        assert_eq!(brix.labels, vec!["Norte", "Sur"]);
        assert_eq!(brix.values, vec![18.5, 16.5]);
    }

    #[test]
    fn test_monthly_trend_calendar_order() {
        let trend = monthly_trend(&sample());
        assert_eq!(trend.labels, vec!["Enero 2024", "Febrero 2024", "Marzo 2024"]);
        assert_eq!(trend.values, vec![550.0, 50.0, 100.0]);
    }

    #[test]
    fn test_apply_top_farms() {
        let rows = apply_top_farms(sample(), 1);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.farm == "El Paraíso"));
        assert_eq!(apply_top_farms(sample(), 10).len(), 4);
    }

    #[test]
    fn test_missing_labels_grouped() {
        let rows = vec![record("", "", "", 5, 10.0, 1.0, 1.0)];
        assert_eq!(tonnage_by_farm(&rows, 10).labels, vec!["Sin dato"]);
    }
}
