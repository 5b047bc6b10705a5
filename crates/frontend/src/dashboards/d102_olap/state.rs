use std::collections::BTreeMap;

use contracts::shared::olap::{
    AggregationFunction, Measure, OlapDimension, OlapMetadata, OlapOperation, OlapQuery,
    DEFAULT_OLAP_LIMIT,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    #[default]
    Measures,
    Dimensions,
    Functions,
    Execute,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Measures,
        WizardStep::Dimensions,
        WizardStep::Functions,
        WizardStep::Execute,
    ];

    pub fn number(self) -> usize {
        match self {
            WizardStep::Measures => 1,
            WizardStep::Dimensions => 2,
            WizardStep::Functions => 3,
            WizardStep::Execute => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Measures => "Métricas",
            WizardStep::Dimensions => "Dimensiones",
            WizardStep::Functions => "Funciones",
            WizardStep::Execute => "Ejecutar",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            WizardStep::Measures => "Selecciona qué medir",
            WizardStep::Dimensions => "Selecciona cómo agrupar",
            WizardStep::Functions => "Selecciona cómo agregar",
            WizardStep::Execute => "Revisa y ejecuta la consulta",
        }
    }
}

/// Selections of the four-step OLAP wizard.
///
/// Lists keep insertion order; that order is the order sent to the backend.
/// Choosing the first item of a step moves the wizard to the next one, but
/// only when the wizard is on that step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OlapWizard {
    pub step: WizardStep,
    pub measures: Vec<Measure>,
    pub dimensions: Vec<OlapDimension>,
    pub functions: Vec<AggregationFunction>,
    /// Level overrides; dimensions without one use their default level
    pub levels: BTreeMap<OlapDimension, String>,
}

fn toggle<T: PartialEq + Copy>(list: &mut Vec<T>, item: T) {
    if let Some(pos) = list.iter().position(|x| *x == item) {
        list.remove(pos);
    } else {
        list.push(item);
    }
}

impl OlapWizard {
    pub fn new() -> Self {
        Self::default()
    }

    fn advance_from(&mut self, from: WizardStep, to: WizardStep, has_items: bool) {
        if has_items && self.step == from {
            self.step = to;
        }
    }

    pub fn toggle_measure(&mut self, measure: Measure) {
        toggle(&mut self.measures, measure);
        let has = !self.measures.is_empty();
        self.advance_from(WizardStep::Measures, WizardStep::Dimensions, has);
    }

    pub fn toggle_dimension(&mut self, dimension: OlapDimension) {
        toggle(&mut self.dimensions, dimension);
        if !self.dimensions.contains(&dimension) {
            self.levels.remove(&dimension);
        }
        let has = !self.dimensions.is_empty();
        self.advance_from(WizardStep::Dimensions, WizardStep::Functions, has);
    }

    pub fn toggle_function(&mut self, function: AggregationFunction) {
        toggle(&mut self.functions, function);
        let has = !self.functions.is_empty();
        self.advance_from(WizardStep::Functions, WizardStep::Execute, has);
    }

    /// Unknown levels are ignored
    pub fn set_level(&mut self, dimension: OlapDimension, level: &str) {
        if dimension.levels().contains(&level) {
            self.levels.insert(dimension, level.to_string());
        }
    }

    pub fn level_of(&self, dimension: OlapDimension) -> &str {
        self.levels
            .get(&dimension)
            .map(String::as_str)
            .unwrap_or_else(|| dimension.default_level())
    }

    pub fn go_to(&mut self, step: WizardStep) {
        self.step = step;
    }

    pub fn is_step_complete(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Measures => !self.measures.is_empty(),
            WizardStep::Dimensions => !self.dimensions.is_empty(),
            WizardStep::Functions => !self.functions.is_empty(),
            WizardStep::Execute => self.can_execute(),
        }
    }

    pub fn can_execute(&self) -> bool {
        !self.measures.is_empty() && !self.dimensions.is_empty() && !self.functions.is_empty()
    }

    /// Aggregate query for the current selection, `None` until executable
    pub fn build_query(&self) -> Option<OlapQuery> {
        if !self.can_execute() {
            return None;
        }
        let dimension_levels = self
            .dimensions
            .iter()
            .map(|d| (*d, self.level_of(*d).to_string()))
            .collect();
        Some(OlapQuery {
            operation: OlapOperation::Aggregate,
            measures: self.measures.clone(),
            dimensions: self.dimensions.clone(),
            dimension_levels,
            filters: BTreeMap::new(),
            aggregation_functions: self.functions.clone(),
            limit: DEFAULT_OLAP_LIMIT,
        })
    }

    /// "Nuevo análisis"
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Measures the backend reports, all known ones when it reports none we know
pub fn offered_measures(meta: &OlapMetadata) -> Vec<Measure> {
    let offered: Vec<Measure> = Measure::ALL
        .into_iter()
        .filter(|m| meta.measures.iter().any(|info| info.name == m.as_str()))
        .collect();
    if offered.is_empty() {
        Measure::ALL.to_vec()
    } else {
        offered
    }
}

pub fn offered_dimensions(meta: &OlapMetadata) -> Vec<OlapDimension> {
    let offered: Vec<OlapDimension> = OlapDimension::ALL
        .into_iter()
        .filter(|d| meta.dimensions.iter().any(|info| info.name == d.as_str()))
        .collect();
    if offered.is_empty() {
        OlapDimension::ALL.to_vec()
    } else {
        offered
    }
}

pub fn offered_functions(meta: &OlapMetadata) -> Vec<AggregationFunction> {
    let offered: Vec<AggregationFunction> = AggregationFunction::ALL
        .into_iter()
        .filter(|f| meta.aggregations.iter().any(|name| name == f.as_str()))
        .collect();
    if offered.is_empty() {
        AggregationFunction::ALL.to_vec()
    } else {
        offered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::olap::MeasureInfo;

    #[test]
    fn test_auto_advance_only_from_current_step() {
        let mut wizard = OlapWizard::new();
        wizard.toggle_measure(Measure::Toneladas);
        assert_eq!(wizard.step, WizardStep::Dimensions);

        // adding a second measure from a later step does not move the wizard
        wizard.go_to(WizardStep::Functions);
        wizard.toggle_measure(Measure::Brix);
        assert_eq!(wizard.step, WizardStep::Functions);
    }

    #[test]
    fn test_deselecting_last_item_does_not_advance() {
        let mut wizard = OlapWizard::new();
        wizard.toggle_measure(Measure::Tch);
        wizard.go_to(WizardStep::Measures);
        wizard.toggle_measure(Measure::Tch);
        assert!(wizard.measures.is_empty());
        assert_eq!(wizard.step, WizardStep::Measures);
    }

    #[test]
    fn test_full_flow_builds_query() {
        let mut wizard = OlapWizard::new();
        assert!(wizard.build_query().is_none());

        wizard.toggle_measure(Measure::Toneladas);
        wizard.toggle_dimension(OlapDimension::Tiempo);
        wizard.toggle_dimension(OlapDimension::Geografia);
        wizard.set_level(OlapDimension::Tiempo, "mes");
        wizard.toggle_function(AggregationFunction::Sum);
        assert_eq!(wizard.step, WizardStep::Execute);
        assert!(wizard.can_execute());

        let query = wizard.build_query().unwrap();
        assert_eq!(query.operation, OlapOperation::Aggregate);
        assert_eq!(query.limit, DEFAULT_OLAP_LIMIT);
        assert_eq!(query.dimension_levels[&OlapDimension::Tiempo], "mes");
        assert_eq!(query.dimension_levels[&OlapDimension::Geografia], "zona");
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_can_execute_needs_every_list() {
        let mut wizard = OlapWizard::new();
        wizard.toggle_measure(Measure::Brix);
        wizard.toggle_dimension(OlapDimension::Producto);
        assert!(!wizard.can_execute());
        wizard.toggle_function(AggregationFunction::Avg);
        assert!(wizard.can_execute());
        wizard.toggle_dimension(OlapDimension::Producto);
        assert!(!wizard.can_execute());
    }

    #[test]
    fn test_unknown_level_ignored_and_removed_with_dimension() {
        let mut wizard = OlapWizard::new();
        wizard.toggle_dimension(OlapDimension::Geografia);
        wizard.set_level(OlapDimension::Geografia, "pais");
        assert_eq!(wizard.level_of(OlapDimension::Geografia), "zona");
        wizard.set_level(OlapDimension::Geografia, "finca");
        assert_eq!(wizard.level_of(OlapDimension::Geografia), "finca");
        wizard.toggle_dimension(OlapDimension::Geografia);
        assert!(wizard.levels.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut wizard = OlapWizard::new();
        wizard.toggle_measure(Measure::Area);
        wizard.toggle_dimension(OlapDimension::Tiempo);
        wizard.reset();
        assert_eq!(wizard, OlapWizard::default());
        assert_eq!(wizard.step, WizardStep::Measures);
    }

    #[test]
    fn test_offered_measures_filters_by_backend() {
        assert_eq!(offered_measures(&OlapMetadata::default()).len(), Measure::ALL.len());
        let meta = OlapMetadata {
            measures: vec![
                MeasureInfo {
                    name: "brix".into(),
                    kind: None,
                    description: None,
                },
                MeasureInfo {
                    name: "humedad".into(),
                    kind: None,
                    description: None,
                },
            ],
            ..Default::default()
        };
        assert_eq!(offered_measures(&meta), vec![Measure::Brix]);
    }

    #[test]
    fn test_offered_functions() {
        let meta = OlapMetadata {
            aggregations: vec!["avg".into(), "sum".into()],
            ..Default::default()
        };
        assert_eq!(
            offered_functions(&meta),
            vec![AggregationFunction::Sum, AggregationFunction::Avg]
        );
    }
}
