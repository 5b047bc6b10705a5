use contracts::shared::olap::{
    result_column, AggregationFunction, Measure, OlapDimension, OlapResult,
};
use serde_json::{Map, Value};

use crate::shared::components::chart::ChartSeries;

/// One member of a dimension with the sum of every selected
/// `{measure}_{function}` column over the rows that carry it
#[derive(Clone, Debug, PartialEq)]
pub struct MemberTotal {
    pub label: String,
    pub value: f64,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DimensionSummary {
    pub dimension: OlapDimension,
    pub members: Vec<MemberTotal>,
}

impl DimensionSummary {
    pub fn series(&self) -> ChartSeries {
        ChartSeries::new(
            self.members
                .iter()
                .map(|m| (m.label.clone(), m.value))
                .collect(),
        )
    }
}

/// Column of a result row that holds the members of `dimension`.
///
/// A level name ("año", "zona") wins, then any column naming the dimension
/// itself. Aggregated columns contain '_' and are skipped on the first pass.
pub fn dimension_column<'a>(
    record: &'a Map<String, Value>,
    dimension: OlapDimension,
) -> Option<&'a str> {
    let matches = |key: &str| {
        dimension.levels().contains(&key) || key.contains(dimension.as_str())
    };
    record
        .keys()
        .find(|k| !k.contains('_') && matches(k))
        .or_else(|| record.keys().find(|k| matches(k)))
        .map(String::as_str)
}

fn member_label(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Per-dimension totals in first-seen member order
pub fn summarize(
    result: &OlapResult,
    dimensions: &[OlapDimension],
    measures: &[Measure],
    functions: &[AggregationFunction],
) -> Vec<DimensionSummary> {
    let columns: Vec<String> = measures
        .iter()
        .flat_map(|m| functions.iter().map(move |f| result_column(*m, *f)))
        .collect();

    dimensions
        .iter()
        .map(|&dimension| {
            let mut members: Vec<MemberTotal> = Vec::new();
            for record in &result.records {
                let Some(key) = dimension_column(record, dimension) else {
                    continue;
                };
                let Some(label) = record.get(key).and_then(member_label) else {
                    continue;
                };
                let value: f64 = columns
                    .iter()
                    .filter_map(|c| record.get(c).and_then(Value::as_f64))
                    .sum();
                match members.iter_mut().find(|m| m.label == label) {
                    Some(member) => {
                        member.value += value;
                        member.count += 1;
                    }
                    None => members.push(MemberTotal {
                        label,
                        value,
                        count: 1,
                    }),
                }
            }
            DimensionSummary { dimension, members }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(records: Value) -> OlapResult {
        serde_json::from_value(json!({ "records": records })).unwrap()
    }

    #[test]
    fn test_dimension_column_prefers_level_name() {
        let record = json!({"toneladas_sum": 1.0, "año": 2024, "zona": "Z1"});
        let record = record.as_object().unwrap();
        assert_eq!(dimension_column(record, OlapDimension::Tiempo), Some("año"));
        assert_eq!(dimension_column(record, OlapDimension::Geografia), Some("zona"));
        assert_eq!(dimension_column(record, OlapDimension::Producto), None);
    }

    #[test]
    fn test_summarize_sums_selected_columns_per_member() {
        let result = result(json!([
            {"año": 2023, "toneladas_sum": 100.0, "toneladas_avg": 10.0, "brix_sum": 5.0},
            {"año": 2024, "toneladas_sum": 50.0, "toneladas_avg": 5.0},
            {"año": 2023, "toneladas_sum": 20.0, "toneladas_avg": 2.0},
            {"año": null, "toneladas_sum": 999.0}
        ]));
        let summary = summarize(
            &result,
            &[OlapDimension::Tiempo],
            &[Measure::Toneladas],
            &[AggregationFunction::Sum, AggregationFunction::Avg],
        );
        assert_eq!(summary.len(), 1);
        let members = &summary[0].members;
        assert_eq!(
            members,
            &vec![
                MemberTotal {
                    label: "2023".into(),
                    value: 132.0,
                    count: 2
                },
                MemberTotal {
                    label: "2024".into(),
                    value: 55.0,
                    count: 1
                },
            ]
        );
        assert_eq!(summary[0].series().labels, vec!["2023", "2024"]);
    }

    #[test]
    fn test_summarize_missing_dimension_gives_empty_members() {
        let result = result(json!([{"zona": "Norte", "tch_max": 120.0}]));
        let summary = summarize(
            &result,
            &[OlapDimension::Geografia, OlapDimension::Producto],
            &[Measure::Tch],
            &[AggregationFunction::Max],
        );
        assert_eq!(summary[0].members[0].label, "Norte");
        assert_eq!(summary[0].members[0].value, 120.0);
        assert!(summary[1].members.is_empty());
    }
}
