//! Dashboard View
//!
//! Welcome header, shortcuts to the main pages, KPI cards and the tail of the
//! session log.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::indicators;
use crate::models::Bucket;
use crate::nav;
use crate::store::{use_app_store, AppStateStoreFields};

const ACTIVITY_LINES: usize = 8;

const QUICK_ACTIONS: &[(&str, &str, &str)] = &[
    ("fas fa-file-signature", "Nuevo Formulario", nav::FORMS_PATH),
    ("fas fa-upload", "Subir Documento", nav::LIBRARY_PATH),
    ("fas fa-chart-bar", "Ver Indicadores", nav::INDICATORS_PATH),
    ("fas fa-tasks", "Tablero de Proyectos", nav::PROJECTS_PATH),
    ("fas fa-print", "Generar Reporte", nav::REPORTS_PATH),
];

/// Last `n` log lines, newest first, reduced to level and message
fn activity_lines(lines: Vec<String>, n: usize) -> Vec<(String, String)> {
    lines
        .into_iter()
        .rev()
        .take(n)
        .map(|line| {
            // `<timestamp> <LEVEL> <target>: <message>`
            let mut parts = line.splitn(3, ' ');
            let _timestamp = parts.next();
            let level = parts.next().unwrap_or_default().trim().to_string();
            let rest = parts.next().unwrap_or_default().trim_start();
            let message = rest.split_once(": ").map_or(rest, |(_, m)| m).to_string();
            (level, message)
        })
        .collect()
}

fn level_icon(level: &str) -> &'static str {
    match level {
        "ERROR" => "fas fa-times-circle",
        "WARN" => "fas fa-exclamation-triangle",
        _ => "fas fa-check-circle",
    }
}

#[component]
fn KpiCard(icon: &'static str, title: &'static str, #[prop(into)] value: Signal<String>, color: &'static str) -> impl IntoView {
    view! {
        <div class="kpi-card">
            <div class=format!("kpi-icon {}", color)><i class=icon></i></div>
            <div>
                <p class="kpi-title">{title}</p>
                <p class="kpi-value">{move || value.get()}</p>
            </div>
        </div>
    }
}

#[component]
pub fn DashboardView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let username = move || ctx.user.with(|u| u.as_ref().map(|u| u.username.clone()).unwrap_or_default());
    let summary = Memo::new(move |_| indicators::summarize(store.submissions().read().iter()));
    let quality_index = Signal::derive(move || {
        store
            .chart()
            .read()
            .quality_trend
            .last()
            .map_or_else(|| "-".to_string(), |d| format!("{:.1}%", d.value))
    });
    let open_tasks = Signal::derive(move || {
        let board = store.board().read();
        let done = board.tasks(Bucket::Done).len();
        (board.len() - done).to_string()
    });

    let read_activity = || activity_lines(rolling_logger::logger().map(|l| l.recent()).unwrap_or_default(), ACTIVITY_LINES);
    let activity = RwSignal::new(read_activity());

    view! {
        <div class="page dashboard-page">
            <div class="card welcome">
                <h1>"¡Bienvenido de nuevo, "{username}"!"</h1>
                <p>"Aquí tienes un resumen de la actividad reciente y el estado del sistema."</p>
            </div>

            <div class="dashboard-grid">
                <div class="dashboard-main">
                    <section class="card">
                        <h2 class="card-title">"Acciones Rápidas"</h2>
                        <div class="quick-actions">
                            {QUICK_ACTIONS.iter().map(|(icon, label, path)| {
                                let path = *path;
                                view! {
                                    <button class="quick-action" on:click=move |_| ctx.navigate(path)>
                                        <i class=*icon></i>
                                        <span>{*label}</span>
                                    </button>
                                }
                            }).collect_view()}
                        </div>
                    </section>

                    <div class="kpi-grid">
                        <KpiCard
                            icon="fas fa-clipboard-check"
                            title="Inspecciones de la sesión"
                            value=Signal::derive(move || summary.with(|s| s.total.to_string()))
                            color="kpi-green"
                        />
                        <KpiCard
                            icon="fas fa-times-circle"
                            title="Rechazadas"
                            value=Signal::derive(move || summary.with(|s| s.count_for("Rechazado").to_string()))
                            color="kpi-red"
                        />
                        <KpiCard icon="fas fa-chart-pie" title="Índice Calidad" value=quality_index color="kpi-yellow" />
                        <KpiCard icon="fas fa-tasks" title="Tareas abiertas" value=open_tasks color="kpi-purple" />
                    </div>
                </div>

                <section class="card activity">
                    <div class="card-header">
                        <h2 class="card-title">"Actividad Reciente"</h2>
                        <button class="icon-btn" title="Actualizar" on:click=move |_| activity.set(read_activity())>
                            <i class="fas fa-sync-alt"></i>
                        </button>
                    </div>
                    <Show
                        when=move || activity.with(|a| !a.is_empty())
                        fallback=|| view! { <p class="empty-state">"Sin actividad registrada."</p> }
                    >
                        <ul class="activity-list">
                            {move || activity.get().into_iter().map(|(level, message)| view! {
                                <li class="activity-item">
                                    <i class=level_icon(&level)></i>
                                    <p>{message}</p>
                                </li>
                            }).collect_view()}
                        </ul>
                    </Show>
                </section>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_lines() {
        let lines = vec![
            "2024-07-01T10:00:00.000Z INFO  quality_console_ui::auth: [AUTH] a@alco.com logged in".to_string(),
            "2024-07-01T10:01:00.000Z WARN  quality_console_ui::store: [PROJECTS] stale drag".to_string(),
        ];
        let activity = activity_lines(lines, 5);
        assert_eq!(activity.len(), 2);
        assert_eq!(activity[0], ("WARN".to_string(), "[PROJECTS] stale drag".to_string()));
        assert_eq!(activity[1].1, "[AUTH] a@alco.com logged in");
        assert_eq!(activity_lines(vec!["x".to_string(); 10], 3).len(), 3);
    }
}
