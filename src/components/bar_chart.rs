//! Bar Chart Component
//!
//! Horizontal CSS bars scaled to the series maximum.

use leptos::prelude::*;

use crate::indicators::{bar_percent, series_max, Datum};

fn value_text(value: f64, unit: &str) -> String {
    if value.fract() == 0.0 {
        format!("{}{}", value as i64, unit)
    } else {
        format!("{:.1}{}", value, unit)
    }
}

#[component]
pub fn BarChart(
    #[prop(into)] title: String,
    #[prop(into)] series: Signal<Vec<Datum>>,
    /// Appended to each value label
    #[prop(optional, into)]
    unit: String,
) -> impl IntoView {
    let unit = StoredValue::new(unit);

    view! {
        <div class="chart">
            <h3 class="chart-title">{title}</h3>
            <ul class="bar-list">
                {move || {
                    let data = series.get();
                    let max = series_max(&data);
                    data.into_iter().map(|d| {
                        let style = match &d.fill {
                            Some(fill) => format!("width: {:.1}%; background: {}", bar_percent(d.value, max), fill),
                            None => format!("width: {:.1}%", bar_percent(d.value, max)),
                        };
                        view! {
                            <li class="bar-row">
                                <span class="bar-label">{d.name.clone()}</span>
                                <div class="bar-track">
                                    <div class="bar-fill" style=style></div>
                                </div>
                                <span class="bar-value">{unit.with_value(|u| value_text(d.value, u))}</span>
                            </li>
                        }
                    }).collect_view()
                }}
            </ul>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(40.0, ""), "40");
        assert_eq!(value_text(94.74, "%"), "94.7%");
    }
}
