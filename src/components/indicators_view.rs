//! Indicators View
//!
//! Seed KPI series plus a live summary of this session's inspections.

use leptos::prelude::*;

use crate::components::{BarChart, Breadcrumbs};
use crate::indicators::{self, Datum};
use crate::store::{use_app_store, AppStateStoreFields};

const RANGES: &[&str] = &["Hoy", "Últimos 7 días", "Último Mes", "Año Actual"];

#[component]
pub fn IndicatorsView() -> impl IntoView {
    let store = use_app_store();
    let range = RwSignal::new(RANGES[0]);

    let defects = Signal::derive(move || store.chart().read().defects.clone());
    let times = Signal::derive(move || store.chart().read().inspection_times.clone());
    let approval = Signal::derive(move || store.chart().read().approval.clone());
    let trend = Signal::derive(move || store.chart().read().quality_trend.clone());

    let summary = Memo::new(move |_| indicators::summarize(store.submissions().read().iter()));
    let by_area = Signal::derive(move || {
        summary.with(|s| s.by_area.iter().map(|(area, n)| Datum { name: area.clone(), value: *n as f64, fill: None }).collect())
    });

    view! {
        <div class="page indicators-page">
            <Breadcrumbs />
            <div class="card range-bar">
                <span class="range-label">"Rango de Fechas:"</span>
                {RANGES.iter().map(|r| {
                    let r = *r;
                    view! {
                        <button
                            class=move || if range.get() == r { "pill active" } else { "pill" }
                            on:click=move |_| range.set(r)
                        >
                            {r}
                        </button>
                    }
                }).collect_view()}
            </div>

            <div class="chart-grid">
                <section class="card"><BarChart title="Defectos por Área" series=defects /></section>
                <section class="card"><BarChart title="Tiempos de Inspección (min)" series=times unit=" min" /></section>
                <section class="card"><BarChart title="Aprobados vs. Rechazados" series=approval /></section>
                <section class="card"><BarChart title="Tendencia de Calidad (%)" series=trend unit="%" /></section>
            </div>

            <section class="card session-summary">
                <h3 class="card-title">"Inspecciones de la sesión"</h3>
                <Show
                    when=move || summary.with(|s| s.total > 0)
                    fallback=|| view! { <p class="empty-state">"Aún no se han enviado formularios."</p> }
                >
                    <div class="kpi-row">
                        <div class="kpi-mini"><span>"Total"</span><strong>{move || summary.with(|s| s.total)}</strong></div>
                        <div class="kpi-mini"><span>"Aprobados"</span><strong>{move || summary.with(|s| s.count_for("Aprobado"))}</strong></div>
                        <div class="kpi-mini"><span>"Rechazados"</span><strong>{move || summary.with(|s| s.count_for("Rechazado"))}</strong></div>
                        <div class="kpi-mini"><span>"Pendientes"</span><strong>{move || summary.with(|s| s.count_for("Pendiente"))}</strong></div>
                        <div class="kpi-mini">
                            <span>"Principal defecto"</span>
                            <strong>{move || summary.with(|s| s.top_defect.clone().unwrap_or_else(|| "-".to_string()))}</strong>
                        </div>
                    </div>
                    <BarChart title="Inspecciones por Área" series=by_area />
                </Show>
            </section>
        </div>
    }
}
