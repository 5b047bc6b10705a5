//! Number formatting for tables and cards (es-CO: "1.234.567,89")

/// Formats with a thousands separator (`.`) and a decimal comma
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let formatted = format!("{:.prec$}", value, prec = decimals.min(4) as usize);

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    // "-0" after rounding reads badly in a table
    let sign = if digits.chars().all(|c| c == '0') && decimal_part.map_or(true, |d| d.chars().all(|c| c == '0')) {
        ""
    } else {
        sign
    };

    match decimal_part {
        Some(d) => format!("{}{},{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Integer with thousands separator
pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

/// Tonnes with one decimal and unit, e.g. "12.345,6 t"
pub fn format_tonnes(value: f64) -> String {
    format!("{} t", format_number_with_decimals(value, 1))
}

/// Short form for card values: 1,2 mil / 3,4 M
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{} M", format_number_with_decimals(value / 1_000_000.0, 1))
    } else if abs >= 10_000.0 {
        format!("{} mil", format_number_with_decimals(value / 1_000.0, 1))
    } else {
        format_number_with_decimals(value, if abs.fract() == 0.0 { 0 } else { 1 })
    }
}
