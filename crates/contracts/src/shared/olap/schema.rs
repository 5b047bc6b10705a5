use serde::{Deserialize, Serialize};

/// Numeric measure of the harvest cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    /// Milled cane tonnage
    Toneladas,
    /// Tons of cane per hectare
    Tch,
    /// Sugar content in degrees Brix
    Brix,
    /// Sucrose content
    Sacarosa,
    /// Harvested area
    Area,
}

impl Measure {
    pub const ALL: [Measure; 5] = [
        Measure::Toneladas,
        Measure::Tch,
        Measure::Brix,
        Measure::Sacarosa,
        Measure::Area,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Measure::Toneladas => "toneladas",
            Measure::Tch => "tch",
            Measure::Brix => "brix",
            Measure::Sacarosa => "sacarosa",
            Measure::Area => "area",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Measure::Toneladas => "Toneladas",
            Measure::Tch => "TCH",
            Measure::Brix => "Brix",
            Measure::Sacarosa => "Sacarosa",
            Measure::Area => "Área",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Measure::Toneladas => "Producción en toneladas",
            Measure::Tch => "Toneladas de caña por hectárea",
            Measure::Brix => "Contenido de azúcar",
            Measure::Sacarosa => "Contenido de sacarosa",
            Measure::Area => "Área cultivada",
        }
    }
}

/// Aggregation applied to each measure server-side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationFunction {
    Sum,
    Avg,
    Max,
    Min,
    Count,
    /// Standard deviation
    Std,
    Variance,
    Median,
}

impl AggregationFunction {
    pub const ALL: [AggregationFunction; 8] = [
        AggregationFunction::Sum,
        AggregationFunction::Avg,
        AggregationFunction::Max,
        AggregationFunction::Min,
        AggregationFunction::Count,
        AggregationFunction::Std,
        AggregationFunction::Variance,
        AggregationFunction::Median,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationFunction::Sum => "sum",
            AggregationFunction::Avg => "avg",
            AggregationFunction::Max => "max",
            AggregationFunction::Min => "min",
            AggregationFunction::Count => "count",
            AggregationFunction::Std => "std",
            AggregationFunction::Variance => "variance",
            AggregationFunction::Median => "median",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AggregationFunction::Sum => "Suma",
            AggregationFunction::Avg => "Promedio",
            AggregationFunction::Max => "Máximo",
            AggregationFunction::Min => "Mínimo",
            AggregationFunction::Count => "Conteo",
            AggregationFunction::Std => "Desviación",
            AggregationFunction::Variance => "Varianza",
            AggregationFunction::Median => "Mediana",
        }
    }

    /// SQL shape shown next to the function in the wizard
    pub fn formula(&self) -> &'static str {
        match self {
            AggregationFunction::Sum => "SUM(medida)",
            AggregationFunction::Avg => "AVG(medida)",
            AggregationFunction::Max => "MAX(medida)",
            AggregationFunction::Min => "MIN(medida)",
            AggregationFunction::Count => "COUNT(medida)",
            AggregationFunction::Std => "STDDEV(medida)",
            AggregationFunction::Variance => "VARIANCE(medida)",
            AggregationFunction::Median => "PERCENTILE_CONT(0.5)",
        }
    }
}

/// Axis of the harvest cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OlapDimension {
    Tiempo,
    Geografia,
    Producto,
}

impl OlapDimension {
    pub const ALL: [OlapDimension; 3] = [
        OlapDimension::Tiempo,
        OlapDimension::Geografia,
        OlapDimension::Producto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OlapDimension::Tiempo => "tiempo",
            OlapDimension::Geografia => "geografia",
            OlapDimension::Producto => "producto",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OlapDimension::Tiempo => "Tiempo",
            OlapDimension::Geografia => "Geografía",
            OlapDimension::Producto => "Producto",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OlapDimension::Tiempo => "Análisis temporal",
            OlapDimension::Geografia => "Análisis geográfico",
            OlapDimension::Producto => "Análisis de variedades",
        }
    }

    /// Hierarchy levels, coarsest first. The first one is the default.
    pub fn levels(&self) -> &'static [&'static str] {
        match self {
            OlapDimension::Tiempo => &["año", "mes", "trimestre"],
            OlapDimension::Geografia => &["zona", "finca"],
            OlapDimension::Producto => &["variedad"],
        }
    }

    pub fn default_level(&self) -> &'static str {
        self.levels()[0]
    }
}

/// OLAP operation requested from the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OlapOperation {
    #[default]
    Aggregate,
    DrillDown,
    RollUp,
    Slice,
    Dice,
    Pivot,
}

impl OlapOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            OlapOperation::Aggregate => "aggregate",
            OlapOperation::DrillDown => "drill_down",
            OlapOperation::RollUp => "roll_up",
            OlapOperation::Slice => "slice",
            OlapOperation::Dice => "dice",
            OlapOperation::Pivot => "pivot",
        }
    }
}

/// Column key of an aggregated measure in an OLAP result row.
pub fn result_column(measure: Measure, function: AggregationFunction) -> String {
    format!("{}_{}", measure.as_str(), function.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_column() {
        assert_eq!(
            result_column(Measure::Toneladas, AggregationFunction::Sum),
            "toneladas_sum"
        );
        assert_eq!(
            result_column(Measure::Sacarosa, AggregationFunction::Median),
            "sacarosa_median"
        );
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for m in Measure::ALL {
            assert_eq!(serde_json::to_value(m).unwrap(), serde_json::json!(m.as_str()));
        }
        for f in AggregationFunction::ALL {
            assert_eq!(serde_json::to_value(f).unwrap(), serde_json::json!(f.as_str()));
        }
        for d in OlapDimension::ALL {
            assert_eq!(serde_json::to_value(d).unwrap(), serde_json::json!(d.as_str()));
        }
        assert_eq!(
            serde_json::to_value(OlapOperation::DrillDown).unwrap(),
            serde_json::json!("drill_down")
        );
    }

    #[test]
    fn test_default_levels() {
        assert_eq!(OlapDimension::Tiempo.default_level(), "año");
        assert_eq!(OlapDimension::Geografia.levels(), &["zona", "finca"]);
    }
}
