use serde::{Deserialize, Serialize};

/// Filter dimension, in cascade order: year -> month -> zone -> {variety, top farms}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterKey {
    #[serde(rename = "año")]
    Year,
    #[serde(rename = "mes")]
    Month,
    #[serde(rename = "zona_id")]
    Zone,
    #[serde(rename = "variedad_id")]
    Variety,
    #[serde(rename = "top_fincas")]
    TopFarms,
}

impl FilterKey {
    pub const ALL: [FilterKey; 5] = [
        FilterKey::Year,
        FilterKey::Month,
        FilterKey::Zone,
        FilterKey::Variety,
        FilterKey::TopFarms,
    ];

    /// Query-string / JSON name.
    pub fn wire_name(&self) -> &'static str {
        match self {
            FilterKey::Year => "año",
            FilterKey::Month => "mes",
            FilterKey::Zone => "zona_id",
            FilterKey::Variety => "variedad_id",
            FilterKey::TopFarms => "top_fincas",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterKey::Year => "Año",
            FilterKey::Month => "Mes",
            FilterKey::Zone => "Zona",
            FilterKey::Variety => "Variedad",
            FilterKey::TopFarms => "Top Fincas",
        }
    }

    /// Keys that must hold a value before this one can be chosen.
    pub fn prerequisites(&self) -> &'static [FilterKey] {
        match self {
            FilterKey::Year => &[],
            FilterKey::Month => &[FilterKey::Year],
            FilterKey::Zone => &[FilterKey::Year, FilterKey::Month],
            FilterKey::Variety | FilterKey::TopFarms => {
                &[FilterKey::Year, FilterKey::Month, FilterKey::Zone]
            }
        }
    }

    /// Keys cleared whenever this one changes.
    pub fn dependents(&self) -> &'static [FilterKey] {
        match self {
            FilterKey::Year => &[
                FilterKey::Month,
                FilterKey::Zone,
                FilterKey::Variety,
                FilterKey::TopFarms,
            ],
            FilterKey::Month => &[FilterKey::Zone, FilterKey::Variety, FilterKey::TopFarms],
            FilterKey::Zone => &[FilterKey::Variety, FilterKey::TopFarms],
            FilterKey::Variety | FilterKey::TopFarms => &[],
        }
    }

    pub fn from_wire_name(name: &str) -> Option<FilterKey> {
        FilterKey::ALL.into_iter().find(|k| k.wire_name() == name)
    }
}

/// A scalar held by one filter key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterValue {
    Year(i32),
    Month(u32),
    Zone(String),
    Variety(i64),
    TopFarms(u32),
}

impl FilterValue {
    pub fn key(&self) -> FilterKey {
        match self {
            FilterValue::Year(_) => FilterKey::Year,
            FilterValue::Month(_) => FilterKey::Month,
            FilterValue::Zone(_) => FilterKey::Zone,
            FilterValue::Variety(_) => FilterKey::Variety,
            FilterValue::TopFarms(_) => FilterKey::TopFarms,
        }
    }

    /// Parses the raw value of a `<select>`. Empty input means "clear".
    pub fn parse(key: FilterKey, raw: &str) -> Option<FilterValue> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match key {
            FilterKey::Year => raw.parse().ok().map(FilterValue::Year),
            FilterKey::Month => raw
                .parse::<u32>()
                .ok()
                .filter(|m| (1..=12).contains(m))
                .map(FilterValue::Month),
            FilterKey::Zone => Some(FilterValue::Zone(raw.to_string())),
            FilterKey::Variety => raw.parse().ok().map(FilterValue::Variety),
            FilterKey::TopFarms => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .map(FilterValue::TopFarms),
        }
    }

    /// Value as it appears in [`FilterOption::value`](super::FilterOption).
    pub fn option_value(&self) -> String {
        match self {
            FilterValue::Year(v) => v.to_string(),
            FilterValue::Month(v) => v.to_string(),
            FilterValue::Zone(v) => v.clone(),
            FilterValue::Variety(v) => v.to_string(),
            FilterValue::TopFarms(v) => v.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cascade_tables_agree() {
        for key in FilterKey::ALL {
            for dependent in key.dependents() {
                assert!(
                    dependent.prerequisites().contains(&key),
                    "{:?} lists {:?} as dependent but not the reverse",
                    key,
                    dependent
                );
            }
        }
        assert!(FilterKey::Year.prerequisites().is_empty());
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            FilterValue::parse(FilterKey::Year, "2024"),
            Some(FilterValue::Year(2024))
        );
        assert_eq!(FilterValue::parse(FilterKey::Year, ""), None);
        assert_eq!(FilterValue::parse(FilterKey::Month, "13"), None);
        assert_eq!(
            FilterValue::parse(FilterKey::Zone, " Z1 "),
            Some(FilterValue::Zone("Z1".into()))
        );
        assert_eq!(FilterValue::parse(FilterKey::Variety, "abc"), None);
        assert_eq!(FilterValue::parse(FilterKey::TopFarms, "0"), None);
    }

    #[test]
    fn test_wire_names_round_trip() {
        for key in FilterKey::ALL {
            assert_eq!(FilterKey::from_wire_name(key.wire_name()), Some(key));
        }
        assert_eq!(FilterKey::from_wire_name("finca_id"), None);
    }
}
