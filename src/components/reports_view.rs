//! Reports View

use leptos::prelude::*;

use crate::components::{BarChart, Breadcrumbs};
use crate::context::use_app_context;
use crate::indicators::{generate_report, Report, ReportParams, DATE_RANGES, REPORT_AREAS, REPORT_TYPES};
use crate::notifications::ToastKind;
use crate::store::{use_app_store, AppStateStoreFields};

fn option_label(options: &[(&str, &'static str)], value: &str) -> &'static str {
    options.iter().find(|(v, _)| *v == value).map_or("-", |(_, label)| *label)
}

#[component]
fn ParamSelect(
    #[prop(into)] id: String,
    label: &'static str,
    options: &'static [(&'static str, &'static str)],
    #[prop(optional)] placeholder: Option<&'static str>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="form-field">
            <label class="form-label" for=id.clone()>{label}</label>
            <select
                id=id
                class="form-input"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {placeholder.map(|text| view! { <option value="">{text}</option> })}
                {options.iter().map(|(v, l)| view! { <option value=*v>{*l}</option> }).collect_view()}
            </select>
        </div>
    }
}

#[component]
pub fn ReportsView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let params = RwSignal::new(ReportParams::default());
    let report = RwSignal::new(None::<Report>);

    let on_generate = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let result = params.with_untracked(|p| generate_report(p, &store.chart().read_untracked()));
        match result {
            Ok(generated) => report.set(Some(generated)),
            Err(e) => {
                log::debug!("[REPORTS] {}", e);
                ctx.notify(ToastKind::Warning, "Reporte", "Por favor, seleccione un tipo de reporte.");
            }
        }
    };

    view! {
        <div class="page reports-page">
            <Breadcrumbs />
            <section class="card">
                <h2 class="card-title">"Generador de Reportes"</h2>
                <p class="card-subtitle">"Seleccione los parámetros para generar un nuevo reporte consolidado."</p>
                <form class="report-form" on:submit=on_generate>
                    <ParamSelect
                        id="reportType"
                        label="Tipo de Reporte:"
                        options=REPORT_TYPES
                        placeholder="Seleccione..."
                        value=Signal::derive(move || params.with(|p| p.report_type.clone()))
                        on_change=move |v: String| params.update(|p| p.report_type = v)
                    />
                    <ParamSelect
                        id="dateRange"
                        label="Rango de Fechas:"
                        options=DATE_RANGES
                        value=Signal::derive(move || params.with(|p| p.date_range.clone()))
                        on_change=move |v: String| params.update(|p| p.date_range = v)
                    />
                    <ParamSelect
                        id="area"
                        label="Área:"
                        options=REPORT_AREAS
                        value=Signal::derive(move || params.with(|p| p.area.clone()))
                        on_change=move |v: String| params.update(|p| p.area = v)
                    />
                    <button type="submit" class="btn btn-primary">"Generar"</button>
                </form>

                {move || report.get().map(|r| {
                    let chart = Signal::derive({
                        let rows = r.chart.clone();
                        move || rows.clone()
                    });
                    view! {
                        <div class="report-output">
                            <h2>{r.title.clone()}</h2>
                            <p class="report-params">
                                {option_label(DATE_RANGES, &r.params.date_range)}" · "{option_label(REPORT_AREAS, &r.params.area)}
                            </p>
                            <div class="report-grid">
                                <div>
                                    <h3>"Resumen de Datos"</h3>
                                    <dl class="report-summary">
                                        {r.summary.iter().map(|(label, value)| view! {
                                            <div class="report-row">
                                                <dt>{label.clone()}":"</dt>
                                                <dd>{value.clone()}</dd>
                                            </div>
                                        }).collect_view()}
                                    </dl>
                                </div>
                                <BarChart title="Gráfico de Defectos" series=chart />
                            </div>
                        </div>
                    }
                })}
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_label() {
        assert_eq!(option_label(DATE_RANGES, "last7"), "Últimos 7 días");
        assert_eq!(option_label(REPORT_AREAS, "unknown"), "-");
    }
}
