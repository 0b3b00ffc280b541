//! Indicators and Reports
//!
//! Chart-ready series for the KPI page, a live summary of session
//! submissions, and the report generator.

use serde::Serialize;

use crate::error::ValidationError;
use crate::models::InspectionRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Datum {
    pub name: String,
    pub value: f64,
    /// Explicit series colour, when the chart needs one per slice
    pub fill: Option<String>,
}

impl Datum {
    fn new(name: &str, value: f64) -> Self {
        Self { name: name.to_string(), value, fill: None }
    }

    fn filled(name: &str, value: f64, fill: &str) -> Self {
        Self { name: name.to_string(), value, fill: Some(fill.to_string()) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub defects: Vec<Datum>,
    pub inspection_times: Vec<Datum>,
    pub approval: Vec<Datum>,
    pub quality_trend: Vec<Datum>,
}

pub fn seed_chart_data() -> ChartData {
    ChartData {
        defects: vec![
            Datum::new("Perfilería", 40.0),
            Datum::new("Pintura", 30.0),
            Datum::new("Troquelados", 20.0),
            Datum::new("Felpa", 27.0),
            Datum::new("Vidrio", 18.0),
            Datum::new("Despachos", 23.0),
        ],
        inspection_times: vec![
            Datum::new("Ene", 12.0),
            Datum::new("Feb", 15.0),
            Datum::new("Mar", 13.0),
            Datum::new("Abr", 17.0),
            Datum::new("May", 18.0),
            Datum::new("Jun", 16.0),
        ],
        approval: vec![
            Datum::filled("Aprobado", 400.0, "#22c55e"),
            Datum::filled("Rechazado", 58.0, "#ef4444"),
        ],
        quality_trend: vec![
            Datum::new("Sem 1", 92.1),
            Datum::new("Sem 2", 93.5),
            Datum::new("Sem 3", 91.8),
            Datum::new("Sem 4", 94.2),
            Datum::new("Sem 5", 95.0),
            Datum::new("Sem 6", 94.7),
        ],
    }
}

/// Largest value in a series, for scaling bars
pub fn series_max(series: &[Datum]) -> f64 {
    series.iter().map(|d| d.value).fold(0.0, f64::max)
}

/// Bar width in percent of the series maximum
pub fn bar_percent(value: f64, max: f64) -> f64 {
    if max <= 0.0 { 0.0 } else { (value / max * 100.0).clamp(0.0, 100.0) }
}

/// Aggregates over the submissions of this session
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmissionSummary {
    pub total: usize,
    /// (estado, count) in first-seen order
    pub by_estado: Vec<(String, usize)>,
    /// (area, count) in first-seen order
    pub by_area: Vec<(String, usize)>,
    /// Most frequent defect other than "Ninguno"
    pub top_defect: Option<String>,
}

impl SubmissionSummary {
    pub fn count_for(&self, estado: &str) -> usize {
        self.by_estado.iter().find(|(e, _)| e == estado).map_or(0, |(_, n)| *n)
    }
}

fn bump(counts: &mut Vec<(String, usize)>, key: &str) {
    match counts.iter_mut().find(|(k, _)| k == key) {
        Some((_, n)) => *n += 1,
        None => counts.push((key.to_string(), 1)),
    }
}

pub fn summarize<'a, I>(submissions: I) -> SubmissionSummary
where
    I: IntoIterator<Item = &'a InspectionRecord>,
{
    let mut summary = SubmissionSummary::default();
    let mut defects: Vec<(String, usize)> = Vec::new();
    for record in submissions {
        summary.total += 1;
        bump(&mut summary.by_estado, &record.fields.estado);
        bump(&mut summary.by_area, &record.fields.area_proceso);
        if !record.fields.defecto.is_empty() && record.fields.defecto != "Ninguno" {
            bump(&mut defects, &record.fields.defecto);
        }
    }
    // Ties go to the defect seen first
    summary.top_defect = defects
        .into_iter()
        .fold(None::<(String, usize)>, |best, (name, n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((name, n)),
        })
        .map(|(name, _)| name);
    summary
}

pub const REPORT_TYPES: &[(&str, &str)] = &[
    ("defects", "Resumen de Defectos"),
    ("costs", "Análisis de Costos"),
    ("efficiency", "Eficiencia de Inspección"),
];

pub const DATE_RANGES: &[(&str, &str)] = &[
    ("last7", "Últimos 7 días"),
    ("last30", "Últimos 30 días"),
    ("current_month", "Mes Actual"),
    ("last_quarter", "Último Trimestre"),
];

pub const REPORT_AREAS: &[(&str, &str)] = &[
    ("all", "Todas las Áreas"),
    ("perfileria", "Perfilería"),
    ("pintura", "Pintura"),
    ("troquelados", "Troquelados"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ReportParams {
    /// Empty until the user picks one
    pub report_type: String,
    pub date_range: String,
    pub area: String,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self { report_type: String::new(), date_range: "last30".to_string(), area: "all".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub params: ReportParams,
    pub summary: Vec<(String, String)>,
    pub chart: Vec<Datum>,
}

pub fn generate_report(params: &ReportParams, chart: &ChartData) -> Result<Report, ValidationError> {
    if params.report_type.trim().is_empty() {
        return Err(ValidationError::Required("reportType"));
    }
    let title = match params.report_type.as_str() {
        "defects" => "Reporte de Defectos",
        "efficiency" => "Reporte de Eficiencia",
        _ => "Reporte de Costos",
    };
    let approved = chart.approval.iter().find(|d| d.name == "Aprobado").map_or(0.0, |d| d.value);
    let rejected = chart.approval.iter().find(|d| d.name == "Rechazado").map_or(0.0, |d| d.value);
    let total = approved + rejected;
    let pct = |v: f64| if total > 0.0 { v / total * 100.0 } else { 0.0 };
    let top = chart
        .defects
        .iter()
        .fold(None::<&Datum>, |best, d| match best {
            Some(b) if b.value >= d.value => best,
            _ => Some(d),
        })
        .map_or_else(|| "-".to_string(), |d| d.name.clone());

    log::info!("[REPORTS] Generated {} ({}, {})", params.report_type, params.date_range, params.area);
    Ok(Report {
        title: title.to_string(),
        params: params.clone(),
        summary: vec![
            ("Inspecciones Totales".to_string(), format!("{}", total)),
            ("Unidades Aprobadas".to_string(), format!("{} ({:.1}%)", approved, pct(approved))),
            ("Unidades Rechazadas".to_string(), format!("{} ({:.1}%)", rejected, pct(rejected))),
            ("Principal Defecto".to_string(), top),
        ],
        chart: chart.defects.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InspectionFields;

    fn record(id: u64, area: &str, estado: &str, defecto: &str) -> InspectionRecord {
        InspectionRecord {
            id,
            fields: InspectionFields {
                area_proceso: area.to_string(),
                estado: estado.to_string(),
                defecto: defecto.to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_summarize() {
        let records = vec![
            record(1, "Pintura", "Aprobado", "Ninguno"),
            record(2, "Pintura", "Rechazado", "Rayón"),
            record(3, "Vidrio", "Rechazado", "Rebaba"),
            record(4, "Vidrio", "Aprobado", "Rebaba"),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.count_for("Rechazado"), 2);
        assert_eq!(summary.count_for("Pendiente"), 0);
        assert_eq!(summary.by_area, vec![("Pintura".to_string(), 2), ("Vidrio".to_string(), 2)]);
        assert_eq!(summary.top_defect.as_deref(), Some("Rebaba"));
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&Vec::<InspectionRecord>::new());
        assert_eq!(summary, SubmissionSummary::default());
    }

    #[test]
    fn test_report_requires_type() {
        let chart = seed_chart_data();
        assert_eq!(
            generate_report(&ReportParams::default(), &chart),
            Err(ValidationError::Required("reportType"))
        );
    }

    #[test]
    fn test_defect_report() {
        let chart = seed_chart_data();
        let params = ReportParams { report_type: "defects".to_string(), ..Default::default() };
        let report = generate_report(&params, &chart).unwrap();
        assert_eq!(report.title, "Reporte de Defectos");
        assert_eq!(report.summary[0].1, "458");
        assert_eq!(report.summary[3].1, "Perfilería");
        assert_eq!(report.chart.len(), 6);
        assert_eq!(report.params.date_range, "last30");
    }

    #[test]
    fn test_bar_scaling() {
        let chart = seed_chart_data();
        let max = series_max(&chart.defects);
        assert_eq!(max, 40.0);
        assert_eq!(bar_percent(20.0, max), 50.0);
        assert_eq!(bar_percent(5.0, 0.0), 0.0);
    }
}
