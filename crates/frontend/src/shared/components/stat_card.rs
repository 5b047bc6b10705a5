use crate::shared::components::table::{format_compact, format_number_int, format_number_with_decimals};
use crate::shared::icons::icon;
use leptos::prelude::*;

/// How a card renders its number
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValueFormat {
    Integer,
    Decimal { decimals: u8 },
    /// Compact tonnes ("2,5 M t")
    Tonnes,
    Percent { decimals: u8 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CardTone {
    #[default]
    Neutral,
    Primary,
    Success,
    Warning,
}

impl CardTone {
    fn class(self) -> &'static str {
        match self {
            CardTone::Neutral => "stat-card",
            CardTone::Primary => "stat-card stat-card--primary",
            CardTone::Success => "stat-card stat-card--success",
            CardTone::Warning => "stat-card stat-card--warning",
        }
    }
}

pub fn format_value(val: f64, fmt: ValueFormat) -> String {
    match fmt {
        ValueFormat::Integer => format_number_int(val),
        ValueFormat::Decimal { decimals } => format_number_with_decimals(val, decimals),
        ValueFormat::Tonnes => format!("{} t", format_compact(val)),
        ValueFormat::Percent { decimals } => {
            format!("{}%", format_number_with_decimals(val, decimals))
        }
    }
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    #[prop(into)]
    icon_name: String,
    /// None renders a dash (not loaded yet)
    #[prop(into)]
    value: Signal<Option<f64>>,
    format: ValueFormat,
    #[prop(optional)] tone: CardTone,
    #[prop(into, optional)] subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let formatted = move || match value.get() {
        Some(v) => format_value(v, format),
        None => "—".to_string(),
    };

    view! {
        <div class=tone.class()>
            <div class="stat-card__icon">
                {icon(&icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1520.0, ValueFormat::Integer), "1.520");
        assert_eq!(format_value(118.456, ValueFormat::Decimal { decimals: 1 }), "118,5");
        assert_eq!(format_value(2_460_000.0, ValueFormat::Tonnes), "2,5 M t");
        assert_eq!(format_value(13.2, ValueFormat::Percent { decimals: 1 }), "13,2%");
    }
}
