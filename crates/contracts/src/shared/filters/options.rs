use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::key::{FilterKey, FilterValue};
use crate::domain::dimensions::{self, Farm, TimePeriod, Variety, Zone};

/// Fixed choices of the "top N farms" filter.
pub const TOP_FARM_CHOICES: [u32; 5] = [5, 10, 20, 50, 100];

/// One candidate value for a filter key and the number of harvest rows behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub count: u64,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, count: u64) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            count,
        }
    }
}

/// Candidate values per filter key for the current selection.
///
/// Regenerated on every response; never patched in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptionSet {
    pub years: Vec<FilterOption>,
    pub months: Vec<FilterOption>,
    pub zones: Vec<FilterOption>,
    pub varieties: Vec<FilterOption>,
    /// Farms matching the selection. Not a selectable key; shown as context.
    pub farms: Vec<FilterOption>,
    top_farms: Vec<FilterOption>,
}

impl Default for FilterOptionSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl FilterOptionSet {
    pub fn empty() -> Self {
        Self {
            years: vec![],
            months: vec![],
            zones: vec![],
            varieties: vec![],
            farms: vec![],
            top_farms: TOP_FARM_CHOICES
                .iter()
                .map(|n| FilterOption::new(n.to_string(), format!("Top {}", n), 0))
                .collect(),
        }
    }

    pub fn options(&self, key: FilterKey) -> &[FilterOption] {
        match key {
            FilterKey::Year => &self.years,
            FilterKey::Month => &self.months,
            FilterKey::Zone => &self.zones,
            FilterKey::Variety => &self.varieties,
            FilterKey::TopFarms => &self.top_farms,
        }
    }

    /// True when the backend reported nothing for any dimension.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
            && self.months.is_empty()
            && self.zones.is_empty()
            && self.varieties.is_empty()
            && self.farms.is_empty()
    }

    pub fn contains(&self, value: &FilterValue) -> bool {
        let wanted = value.option_value();
        self.options(value.key()).iter().any(|o| o.value == wanted)
    }

    /// Display label of a selected value, falling back to the raw value.
    pub fn label_of(&self, value: &FilterValue) -> String {
        let wanted = value.option_value();
        self.options(value.key())
            .iter()
            .find(|o| o.value == wanted)
            .map(|o| o.label.clone())
            .unwrap_or(wanted)
    }

    /// Fallback set built from the plain dimension endpoints: every known
    /// value, zero counts, years newest first and all twelve months.
    pub fn basic(farms: &[Farm], varieties: &[Variety], zones: &[Zone], periods: &[TimePeriod]) -> Self {
        Self {
            years: dimensions::distinct_years(periods)
                .into_iter()
                .map(|y| FilterOption::new(y.to_string(), y.to_string(), 0))
                .collect(),
            months: dimensions::MONTH_NAMES
                .iter()
                .enumerate()
                .map(|(idx, name)| FilterOption::new((idx + 1).to_string(), *name, 0))
                .collect(),
            zones: zones
                .iter()
                .map(|z| FilterOption::new(z.codigo_zona.clone(), z.nombre_zona.clone(), 0))
                .collect(),
            varieties: varieties
                .iter()
                .map(|v| FilterOption::new(v.variedad_id.to_string(), v.nombre_variedad.clone(), 0))
                .collect(),
            farms: farms
                .iter()
                .map(|f| FilterOption::new(f.finca_id.to_string(), f.nombre_finca.clone(), 0))
                .collect(),
            ..Self::empty()
        }
    }
}

/// Option entry as the backend sends it. Different dimensions carry
/// different columns, so everything is optional and normalised once.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFilterOption {
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(rename = "año", default)]
    pub year: Option<i32>,
    #[serde(rename = "mes", default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub nombre_mes: Option<String>,
    #[serde(default)]
    pub codigo_zona: Option<String>,
    #[serde(default)]
    pub nombre_zona: Option<String>,
    #[serde(default)]
    pub variedad_id: Option<i64>,
    #[serde(default)]
    pub nombre_variedad: Option<String>,
    #[serde(default)]
    pub finca_id: Option<i64>,
    #[serde(default)]
    pub nombre_finca: Option<String>,
}

/// `data` of `/api/filtros/opciones`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFilterOptions {
    #[serde(rename = "años", default)]
    pub years: Vec<RawFilterOption>,
    #[serde(rename = "meses", default)]
    pub months: Vec<RawFilterOption>,
    #[serde(rename = "zonas", default)]
    pub zones: Vec<RawFilterOption>,
    #[serde(rename = "variedades", default)]
    pub varieties: Vec<RawFilterOption>,
    #[serde(rename = "fincas", default)]
    pub farms: Vec<RawFilterOption>,
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl RawFilterOption {
    fn generic_value(&self) -> Option<String> {
        self.value
            .as_ref()
            .and_then(scalar_to_string)
            .or_else(|| self.id.as_ref().and_then(scalar_to_string))
    }

    fn generic_label(&self) -> Option<String> {
        self.label.clone().or_else(|| self.name.clone())
    }

    fn normalise(&self, dimension: &str) -> Option<FilterOption> {
        let (value, label) = match dimension {
            "años" => {
                let value = self.year.map(|y| y.to_string()).or_else(|| self.generic_value())?;
                (value.clone(), self.generic_label().unwrap_or(value))
            }
            "meses" => {
                let value = self.month.map(|m| m.to_string()).or_else(|| self.generic_value())?;
                let label = self
                    .nombre_mes
                    .clone()
                    .or_else(|| self.month.and_then(dimensions::month_name).map(str::to_string))
                    .or_else(|| self.generic_label())
                    .unwrap_or_else(|| value.clone());
                (value, label)
            }
            "zonas" => {
                let value = self.codigo_zona.clone().or_else(|| self.generic_value())?;
                let label = self
                    .nombre_zona
                    .clone()
                    .or_else(|| self.generic_label())
                    .unwrap_or_else(|| value.clone());
                (value, label)
            }
            "variedades" => {
                let value = self
                    .variedad_id
                    .map(|v| v.to_string())
                    .or_else(|| self.generic_value())?;
                let label = self
                    .nombre_variedad
                    .clone()
                    .or_else(|| self.generic_label())
                    .unwrap_or_else(|| value.clone());
                (value, label)
            }
            _ => {
                let value = self
                    .finca_id
                    .map(|v| v.to_string())
                    .or_else(|| self.generic_value())?;
                let label = self
                    .nombre_finca
                    .clone()
                    .or_else(|| self.generic_label())
                    .unwrap_or_else(|| value.clone());
                (value, label)
            }
        };
        Some(FilterOption::new(value, label, self.count.unwrap_or(0)))
    }
}

fn normalise_all(items: &[RawFilterOption], dimension: &str) -> Vec<FilterOption> {
    items.iter().filter_map(|item| item.normalise(dimension)).collect()
}

impl From<RawFilterOptions> for FilterOptionSet {
    fn from(raw: RawFilterOptions) -> Self {
        Self {
            years: normalise_all(&raw.years, "años"),
            months: normalise_all(&raw.months, "meses"),
            zones: normalise_all(&raw.zones, "zonas"),
            varieties: normalise_all(&raw.varieties, "variedades"),
            farms: normalise_all(&raw.farms, "fincas"),
            ..Self::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_backend_columns() {
        let raw: RawFilterOptions = serde_json::from_value(serde_json::json!({
            "años": [{"año": 2024, "count": 120}, {"año": 2023, "count": 98}],
            "meses": [{"mes": 3, "nombre_mes": "Marzo", "count": 10}, {"mes": 4, "count": 2}],
            "zonas": [{"codigo_zona": "Z1", "nombre_zona": "Norte", "count": 4}],
            "variedades": [{"variedad_id": 7, "nombre_variedad": "CC 85-92", "count": 1}],
            "fincas": [{"finca_id": 11, "nombre_finca": "La Esperanza"}]
        }))
        .unwrap();
        let set = FilterOptionSet::from(raw);

        assert_eq!(set.years[0], FilterOption::new("2024", "2024", 120));
        assert_eq!(set.months[0], FilterOption::new("3", "Marzo", 10));
        assert_eq!(set.months[1].label, "Abril");
        assert_eq!(set.zones[0], FilterOption::new("Z1", "Norte", 4));
        assert_eq!(set.varieties[0].value, "7");
        assert_eq!(set.farms[0].count, 0);
    }

    #[test]
    fn test_generic_value_label_shape() {
        let raw: RawFilterOptions = serde_json::from_value(serde_json::json!({
            "zonas": [{"value": "Z2", "label": "Sur", "count": 3}, {"label": "sin valor"}]
        }))
        .unwrap();
        let set = FilterOptionSet::from(raw);
        assert_eq!(set.zones, vec![FilterOption::new("Z2", "Sur", 3)]);
        assert!(set.years.is_empty());
    }

    #[test]
    fn test_top_farms_always_offered() {
        let set = FilterOptionSet::empty();
        assert!(set.is_empty());
        let values: Vec<&str> = set
            .options(FilterKey::TopFarms)
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(values, vec!["5", "10", "20", "50", "100"]);
        assert!(set.contains(&FilterValue::TopFarms(20)));
        assert!(!set.contains(&FilterValue::TopFarms(15)));
    }

    #[test]
    fn test_basic_fallback() {
        let periods = vec![
            TimePeriod {
                tiempo_id: Some(1),
                year: 2023,
                month: 1,
                month_name: None,
                quarter: None,
                date: None,
            },
            TimePeriod {
                tiempo_id: Some(2),
                year: 2024,
                month: 1,
                month_name: None,
                quarter: None,
                date: None,
            },
        ];
        let zones = vec![Zone {
            codigo_zona: "Z1".into(),
            nombre_zona: "Norte".into(),
        }];
        let set = FilterOptionSet::basic(&[], &[], &zones, &periods);

        assert_eq!(set.years.iter().map(|o| o.value.as_str()).collect::<Vec<_>>(), vec!["2024", "2023"]);
        assert_eq!(set.months.len(), 12);
        assert_eq!(set.months[11], FilterOption::new("12", "Diciembre", 0));
        assert!(set.contains(&FilterValue::Zone("Z1".into())));
        assert_eq!(set.label_of(&FilterValue::Zone("Z1".into())), "Norte");
        assert_eq!(set.label_of(&FilterValue::Zone("Z9".into())), "Z9");
    }
}
