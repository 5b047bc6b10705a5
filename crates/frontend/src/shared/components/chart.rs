//! SVG charts (bar, line, doughnut) drawn directly from Leptos views.
//!
//! Geometry lives in plain functions so it can be tested without a DOM.

use leptos::prelude::*;

use super::table::format_number_with_decimals;

const VIEW_WIDTH: f64 = 640.0;
const VIEW_HEIGHT: f64 = 300.0;
const PAD_LEFT: f64 = 56.0;
const PAD_RIGHT: f64 = 16.0;
const PAD_TOP: f64 = 16.0;
const PAD_BOTTOM: f64 = 56.0;
const GRID_LINES: usize = 4;

pub const PALETTE: [&str; 8] = [
    "#16a34a", "#0ea5e9", "#f59e0b", "#8b5cf6", "#ef4444", "#14b8a6", "#ec4899", "#64748b",
];

pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Labels and values of one series
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn new(points: Vec<(String, f64)>) -> Self {
        let (labels, values) = points.into_iter().unzip();
        Self { labels, values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Upper bound of the y axis: the max value, or 1 for all-zero data
pub fn axis_max(values: &[f64]) -> f64 {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    if max <= 0.0 {
        1.0
    } else {
        max
    }
}

fn plot_width() -> f64 {
    VIEW_WIDTH - PAD_LEFT - PAD_RIGHT
}

fn plot_height() -> f64 {
    VIEW_HEIGHT - PAD_TOP - PAD_BOTTOM
}

fn y_for(value: f64, max: f64) -> f64 {
    let clamped = if value.is_finite() { value.max(0.0) } else { 0.0 };
    PAD_TOP + plot_height() * (1.0 - clamped / max)
}

/// One vertical bar per value, each slot with 20% gap on either side
pub fn bar_layout(values: &[f64]) -> Vec<Rect> {
    if values.is_empty() {
        return Vec::new();
    }
    let max = axis_max(values);
    let slot = plot_width() / values.len() as f64;
    let width = slot * 0.6;
    let baseline = PAD_TOP + plot_height();
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let y = y_for(v, max);
            Rect {
                x: PAD_LEFT + slot * i as f64 + (slot - width) / 2.0,
                y,
                width,
                height: baseline - y,
            }
        })
        .collect()
}

/// Polyline points ("x,y x,y") evenly spread over the plot width
pub fn line_points(values: &[f64]) -> Vec<(f64, f64)> {
    let max = axis_max(values);
    let step = if values.len() > 1 {
        plot_width() / (values.len() - 1) as f64
    } else {
        0.0
    };
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = if values.len() == 1 {
                PAD_LEFT + plot_width() / 2.0
            } else {
                PAD_LEFT + step * i as f64
            };
            (x, y_for(v, max))
        })
        .collect()
}

fn points_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Share of each value in the total, in [0, 1]; all zeros when the total is 0
pub fn fractions(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().copied().filter(|v| v.is_finite() && *v > 0.0).sum();
    values
        .iter()
        .map(|&v| {
            if total <= 0.0 || !v.is_finite() || v <= 0.0 {
                0.0
            } else {
                v / total
            }
        })
        .collect()
}

/// SVG path of a doughnut segment between two angles (radians, 0 = 12 o'clock)
pub fn arc_path(cx: f64, cy: f64, outer: f64, inner: f64, start: f64, end: f64) -> String {
    // a full circle cannot be drawn as a single arc
    let end = if end - start >= std::f64::consts::TAU {
        start + std::f64::consts::TAU - 0.0001
    } else {
        end
    };
    let point = |r: f64, a: f64| (cx + r * a.sin(), cy - r * a.cos());
    let (x0, y0) = point(outer, start);
    let (x1, y1) = point(outer, end);
    let (x2, y2) = point(inner, end);
    let (x3, y3) = point(inner, start);
    let large = if end - start > std::f64::consts::PI { 1 } else { 0 };
    format!(
        "M {:.2} {:.2} A {:.2} {:.2} 0 {} 1 {:.2} {:.2} L {:.2} {:.2} A {:.2} {:.2} 0 {} 0 {:.2} {:.2} Z",
        x0, y0, outer, outer, large, x1, y1, x2, y2, inner, inner, large, x3, y3
    )
}

fn short_label(label: &str) -> String {
    if label.chars().count() > 12 {
        format!("{}…", label.chars().take(11).collect::<String>())
    } else {
        label.to_string()
    }
}

fn axis_view(max: f64) -> impl IntoView {
    (0..=GRID_LINES)
        .map(|i| {
            let value = max * i as f64 / GRID_LINES as f64;
            let y = y_for(value, max);
            view! {
                <line class="chart__grid" x1=PAD_LEFT y1=y x2=VIEW_WIDTH - PAD_RIGHT y2=y />
                <text class="chart__axis-label" x=PAD_LEFT - 6.0 y=y + 4.0 text-anchor="end">
                    {format_number_with_decimals(value, if max < 10.0 { 1 } else { 0 })}
                </text>
            }
        })
        .collect_view()
}

fn x_labels_view(labels: Vec<String>, xs: Vec<f64>) -> impl IntoView {
    let y = VIEW_HEIGHT - PAD_BOTTOM + 16.0;
    labels
        .into_iter()
        .zip(xs)
        .map(|(label, x)| {
            let transform = format!("rotate(-30 {:.1} {:.1})", x, y);
            view! {
                <text class="chart__axis-label" x=x y=y text-anchor="end" transform=transform>
                    <title>{label.clone()}</title>
                    {short_label(&label)}
                </text>
            }
        })
        .collect_view()
}

fn empty_view() -> AnyView {
    view! { <div class="chart__empty">"Sin datos para mostrar"</div> }.into_any()
}

#[component]
pub fn BarChart(
    #[prop(into)] title: String,
    #[prop(into)] series: Signal<ChartSeries>,
    #[prop(optional)] color_index: usize,
) -> impl IntoView {
    let body = move || {
        let data = series.get();
        if data.is_empty() {
            return empty_view();
        }
        let max = axis_max(&data.values);
        let bars = bar_layout(&data.values);
        let centers = bars.iter().map(|b| b.x + b.width / 2.0).collect::<Vec<_>>();
        let color = palette_color(color_index);
        view! {
            <svg class="chart__svg" viewBox=format!("0 0 {} {}", VIEW_WIDTH, VIEW_HEIGHT)>
                {axis_view(max)}
                {bars
                    .into_iter()
                    .zip(data.values.clone())
                    .zip(data.labels.clone())
                    .map(|((rect, value), label)| view! {
                        <rect class="chart__bar" x=rect.x y=rect.y width=rect.width height=rect.height fill=color rx="2">
                            <title>{format!("{}: {}", label, format_number_with_decimals(value, 2))}</title>
                        </rect>
                    })
                    .collect_view()}
                {x_labels_view(data.labels, centers)}
            </svg>
        }
        .into_any()
    };

    view! {
        <div class="chart">
            <div class="chart__title">{title}</div>
            {body}
        </div>
    }
}

#[component]
pub fn LineChart(
    #[prop(into)] title: String,
    #[prop(into)] series: Signal<ChartSeries>,
    #[prop(optional)] color_index: usize,
) -> impl IntoView {
    let body = move || {
        let data = series.get();
        if data.is_empty() {
            return empty_view();
        }
        let max = axis_max(&data.values);
        let points = line_points(&data.values);
        let xs = points.iter().map(|(x, _)| *x).collect::<Vec<_>>();
        let color = palette_color(color_index);
        view! {
            <svg class="chart__svg" viewBox=format!("0 0 {} {}", VIEW_WIDTH, VIEW_HEIGHT)>
                {axis_view(max)}
                <polyline class="chart__line" points=points_attr(&points) fill="none" stroke=color stroke-width="2.5" />
                {points
                    .into_iter()
                    .zip(data.values.clone())
                    .map(|((x, y), value)| view! {
                        <circle class="chart__point" cx=x cy=y r="3.5" fill=color>
                            <title>{format_number_with_decimals(value, 2)}</title>
                        </circle>
                    })
                    .collect_view()}
                {x_labels_view(data.labels, xs)}
            </svg>
        }
        .into_any()
    };

    view! {
        <div class="chart">
            <div class="chart__title">{title}</div>
            {body}
        </div>
    }
}

#[component]
pub fn DoughnutChart(#[prop(into)] title: String, #[prop(into)] series: Signal<ChartSeries>) -> impl IntoView {
    let body = move || {
        let data = series.get();
        let shares = fractions(&data.values);
        if shares.iter().all(|f| *f == 0.0) {
            return empty_view();
        }
        let (cx, cy, outer, inner) = (110.0, 110.0, 100.0, 60.0);
        let mut angle = 0.0;
        let segments = shares
            .iter()
            .enumerate()
            .filter(|(_, f)| **f > 0.0)
            .map(|(i, f)| {
                let start = angle;
                angle += f * std::f64::consts::TAU;
                (i, arc_path(cx, cy, outer, inner, start, angle))
            })
            .collect::<Vec<_>>();
        view! {
            <div class="chart__doughnut">
                <svg class="chart__svg chart__svg--square" viewBox="0 0 220 220">
                    {segments
                        .into_iter()
                        .map(|(i, d)| view! { <path d=d fill=palette_color(i) /> })
                        .collect_view()}
                </svg>
                <ul class="chart__legend">
                    {data
                        .labels
                        .into_iter()
                        .zip(data.values)
                        .enumerate()
                        .map(|(i, (label, value))| view! {
                            <li>
                                <span class="chart__swatch" style=format!("background:{}", palette_color(i))></span>
                                {format!("{}: {}", label, format_number_with_decimals(value, 2))}
                            </li>
                        })
                        .collect_view()}
                </ul>
            </div>
        }
        .into_any()
    };

    view! {
        <div class="chart">
            <div class="chart__title">{title}</div>
            {body}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_max_all_zero() {
        assert_eq!(axis_max(&[0.0, 0.0]), 1.0);
        assert_eq!(axis_max(&[]), 1.0);
        assert_eq!(axis_max(&[3.0, f64::NAN, 7.5]), 7.5);
    }

    #[test]
    fn test_bar_layout_tallest_bar_fills_plot() {
        let bars = bar_layout(&[50.0, 100.0]);
        assert_eq!(bars.len(), 2);
        assert!((bars[1].height - plot_height()).abs() < 1e-9);
        assert!((bars[0].height - plot_height() / 2.0).abs() < 1e-9);
        assert!(bars[0].x < bars[1].x);
        assert!(bars[1].x + bars[1].width <= VIEW_WIDTH - PAD_RIGHT);
    }

    #[test]
    fn test_bar_layout_negative_values_flat() {
        let bars = bar_layout(&[-5.0, 10.0]);
        assert_eq!(bars[0].height, 0.0);
    }

    #[test]
    fn test_line_points_span_plot() {
        let points = line_points(&[1.0, 2.0, 3.0]);
        assert_eq!(points[0].0, PAD_LEFT);
        assert!((points[2].0 - (VIEW_WIDTH - PAD_RIGHT)).abs() < 1e-9);
        assert!(points[2].1 < points[0].1);
        let single = line_points(&[4.0]);
        assert!((single[0].0 - (PAD_LEFT + plot_width() / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_fractions() {
        assert_eq!(fractions(&[1.0, 3.0]), vec![0.25, 0.75]);
        assert_eq!(fractions(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert_eq!(fractions(&[-1.0, 2.0]), vec![0.0, 1.0]);
    }

    #[test]
    fn test_arc_path_full_circle_is_drawable() {
        let path = arc_path(110.0, 110.0, 100.0, 60.0, 0.0, std::f64::consts::TAU);
        assert!(path.starts_with("M 110.00 10.00"));
        assert!(path.contains(" 0 1 1 "));
    }

    #[test]
    fn test_chart_series_new() {
        let s = ChartSeries::new(vec![("A".into(), 1.0), ("B".into(), 2.0)]);
        assert_eq!(s.labels, vec!["A", "B"]);
        assert_eq!(s.values, vec![1.0, 2.0]);
        assert_eq!(short_label("Hacienda La Esperanza"), "Hacienda La…");
    }
}
