use serde::{Deserialize, Serialize};

use super::key::{FilterKey, FilterValue};

/// Sparse filter selection. A `None` key is unconstrained.
///
/// Serialises to the query string understood by `/api/cosecha` and
/// `/api/filtros/opciones`. Mutators here do not cascade; that is the job
/// of the filter state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(rename = "año", default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(rename = "mes", default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(rename = "zona_id", default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(rename = "variedad_id", default, skip_serializing_if = "Option::is_none")]
    pub variety: Option<i64>,
    #[serde(rename = "top_fincas", default, skip_serializing_if = "Option::is_none")]
    pub top_farms: Option<u32>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        FilterKey::ALL.iter().filter(|k| self.has(**k)).count()
    }

    pub fn has(&self, key: FilterKey) -> bool {
        match key {
            FilterKey::Year => self.year.is_some(),
            FilterKey::Month => self.month.is_some(),
            FilterKey::Zone => self.zone.is_some(),
            FilterKey::Variety => self.variety.is_some(),
            FilterKey::TopFarms => self.top_farms.is_some(),
        }
    }

    pub fn get(&self, key: FilterKey) -> Option<FilterValue> {
        match key {
            FilterKey::Year => self.year.map(FilterValue::Year),
            FilterKey::Month => self.month.map(FilterValue::Month),
            FilterKey::Zone => self.zone.clone().map(FilterValue::Zone),
            FilterKey::Variety => self.variety.map(FilterValue::Variety),
            FilterKey::TopFarms => self.top_farms.map(FilterValue::TopFarms),
        }
    }

    pub fn set(&mut self, value: FilterValue) {
        match value {
            FilterValue::Year(v) => self.year = Some(v),
            FilterValue::Month(v) => self.month = Some(v),
            FilterValue::Zone(v) => self.zone = Some(v),
            FilterValue::Variety(v) => self.variety = Some(v),
            FilterValue::TopFarms(v) => self.top_farms = Some(v),
        }
    }

    pub fn remove(&mut self, key: FilterKey) {
        match key {
            FilterKey::Year => self.year = None,
            FilterKey::Month => self.month = None,
            FilterKey::Zone => self.zone = None,
            FilterKey::Variety => self.variety = None,
            FilterKey::TopFarms => self.top_farms = None,
        }
    }

    /// Selected values in cascade order.
    pub fn values(&self) -> Vec<FilterValue> {
        FilterKey::ALL.iter().filter_map(|k| self.get(*k)).collect()
    }

    /// True when every prerequisite of `key` holds a value.
    pub fn prerequisites_met(&self, key: FilterKey) -> bool {
        key.prerequisites().iter().all(|p| self.has(*p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut selection = FilterSelection::new();
        assert!(selection.is_empty());

        selection.set(FilterValue::Year(2024));
        selection.set(FilterValue::Zone("Z1".into()));
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.get(FilterKey::Zone), Some(FilterValue::Zone("Z1".into())));

        selection.remove(FilterKey::Zone);
        assert!(!selection.has(FilterKey::Zone));
        assert_eq!(selection.values(), vec![FilterValue::Year(2024)]);
    }

    #[test]
    fn test_prerequisites_met() {
        let mut selection = FilterSelection::new();
        assert!(selection.prerequisites_met(FilterKey::Year));
        assert!(!selection.prerequisites_met(FilterKey::Month));

        selection.set(FilterValue::Year(2024));
        selection.set(FilterValue::Month(3));
        assert!(selection.prerequisites_met(FilterKey::Zone));
        assert!(!selection.prerequisites_met(FilterKey::Variety));
    }

    #[test]
    fn test_json_uses_wire_names() {
        let selection = FilterSelection {
            year: Some(2024),
            month: Some(3),
            ..Default::default()
        };
        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json, serde_json::json!({"año": 2024, "mes": 3}));

        let back: FilterSelection = serde_json::from_value(json).unwrap();
        assert_eq!(back, selection);
    }
}
