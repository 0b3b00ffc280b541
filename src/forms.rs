//! Inspection Form
//!
//! Command handlers for the inspection form. Every edit is written to the
//! draft store straight away; a successful submit or a clear removes it.

use crate::collection::Collection;
use crate::draft::{DraftBackend, DraftStore, RestoreOutcome};
use crate::error::ValidationError;
use crate::models::{InspectionFields, InspectionRecord};

/// Draft key for the current form schema
pub const DRAFT_KEY: &str = "inspectionFormDraft_v6";

pub const AREAS_PROCESO: &[&str] = &["Perfilería", "Pintura", "Troquelados", "Felpa", "Vidrio", "Despachos"];

pub const ESTADO_OPTIONS: &[&str] = &["Aprobado", "Rechazado", "Pendiente"];

pub const DEFECTO_TYPES: &[&str] = &[
    "Ninguno",
    "Rayón",
    "Abolladura",
    "Medida fuera de tolerancia",
    "Color no conforme",
    "Rebaba",
    "Empaque dañado",
];

pub const REGISTRO_USERS: &[&str] = &["Inspector", "Supervisor", "Gerente"];

/// Text fields of the form, addressed by their input `name`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectionField {
    Fecha,
    AreaProceso,
    Op,
    DisenoReferencia,
    Estado,
    Defecto,
    Registro,
    Responsable,
    Observacion,
}

impl InspectionField {
    pub const ALL: [InspectionField; 9] = [
        InspectionField::Fecha,
        InspectionField::AreaProceso,
        InspectionField::Op,
        InspectionField::DisenoReferencia,
        InspectionField::Estado,
        InspectionField::Defecto,
        InspectionField::Registro,
        InspectionField::Responsable,
        InspectionField::Observacion,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InspectionField::Fecha => "fecha",
            InspectionField::AreaProceso => "areaProceso",
            InspectionField::Op => "op",
            InspectionField::DisenoReferencia => "disenoReferencia",
            InspectionField::Estado => "estado",
            InspectionField::Defecto => "defecto",
            InspectionField::Registro => "registro",
            InspectionField::Responsable => "responsable",
            InspectionField::Observacion => "observacion",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InspectionField::Fecha => "Fecha",
            InspectionField::AreaProceso => "Área/Proceso",
            InspectionField::Op => "Op",
            InspectionField::DisenoReferencia => "Diseño/Referencia",
            InspectionField::Estado => "Estado",
            InspectionField::Defecto => "Defecto",
            InspectionField::Registro => "Registro",
            InspectionField::Responsable => "Responsable",
            InspectionField::Observacion => "Observación",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, InspectionField::Defecto | InspectionField::Observacion)
    }

    /// Fixed choices for select inputs, None for free text
    pub fn options(&self) -> Option<&'static [&'static str]> {
        match self {
            InspectionField::AreaProceso => Some(AREAS_PROCESO),
            InspectionField::Estado => Some(ESTADO_OPTIONS),
            InspectionField::Defecto => Some(DEFECTO_TYPES),
            InspectionField::Registro => Some(REGISTRO_USERS),
            _ => None,
        }
    }
}

impl InspectionFields {
    pub fn get(&self, field: InspectionField) -> &str {
        match field {
            InspectionField::Fecha => &self.fecha,
            InspectionField::AreaProceso => &self.area_proceso,
            InspectionField::Op => &self.op,
            InspectionField::DisenoReferencia => &self.diseno_referencia,
            InspectionField::Estado => &self.estado,
            InspectionField::Defecto => &self.defecto,
            InspectionField::Registro => &self.registro,
            InspectionField::Responsable => &self.responsable,
            InspectionField::Observacion => &self.observacion,
        }
    }

    pub fn set(&mut self, field: InspectionField, value: String) {
        let slot = match field {
            InspectionField::Fecha => &mut self.fecha,
            InspectionField::AreaProceso => &mut self.area_proceso,
            InspectionField::Op => &mut self.op,
            InspectionField::DisenoReferencia => &mut self.diseno_referencia,
            InspectionField::Estado => &mut self.estado,
            InspectionField::Defecto => &mut self.defecto,
            InspectionField::Registro => &mut self.registro,
            InspectionField::Responsable => &mut self.responsable,
            InspectionField::Observacion => &mut self.observacion,
        };
        *slot = value;
    }

    /// Every required field that is blank
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let missing: Vec<ValidationError> = InspectionField::ALL
            .into_iter()
            .filter(|f| f.is_required() && self.get(*f).trim().is_empty())
            .map(|f| ValidationError::Required(f.name()))
            .collect();
        if missing.is_empty() { Ok(()) } else { Err(missing) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    Edit(InspectionField, String),
    SetPhoto(String),
    ClearPhoto,
    /// Cancel: reset fields and drop the draft
    Clear,
    Submit { id: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Updated,
    Cleared,
    Submitted(InspectionRecord),
    Invalid(Vec<ValidationError>),
}

/// Live form state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub fields: InspectionFields,
    pub errors: Vec<ValidationError>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_for(&self, field: InspectionField) -> Option<&ValidationError> {
        self.errors.iter().find(|e| matches!(e, ValidationError::Required(name) if *name == field.name()))
    }
}

/// Apply one form action, persisting or clearing the draft under `key`
pub fn handle<B: DraftBackend>(
    state: &mut FormState,
    action: FormAction,
    drafts: &DraftStore<B>,
    key: &str,
) -> FormOutcome {
    match action {
        FormAction::Edit(field, value) => {
            state.fields.set(field, value);
            state.errors.retain(|e| !matches!(e, ValidationError::Required(name) if *name == field.name()));
            drafts.save(key, &state.fields);
            FormOutcome::Updated
        }
        FormAction::SetPhoto(uri) => {
            state.fields.photo = Some(uri);
            drafts.save(key, &state.fields);
            FormOutcome::Updated
        }
        FormAction::ClearPhoto => {
            state.fields.photo = None;
            drafts.save(key, &state.fields);
            FormOutcome::Updated
        }
        FormAction::Clear => {
            *state = FormState::new();
            drafts.clear(key);
            FormOutcome::Cleared
        }
        FormAction::Submit { id } => {
            if let Err(errors) = state.fields.validate() {
                state.errors = errors.clone();
                return FormOutcome::Invalid(errors);
            }
            let record = InspectionRecord { id, fields: std::mem::take(&mut state.fields) };
            *state = FormState::new();
            drafts.clear(key);
            log::info!("[FORMS] Submitted inspection {}", record.id);
            FormOutcome::Submitted(record)
        }
    }
}

/// Explicit "load draft" button. `confirm` is only asked when a draft exists.
pub fn restore_draft<B, F>(state: &mut FormState, drafts: &DraftStore<B>, key: &str, confirm: F) -> RestoreOutcome<()>
where
    B: DraftBackend,
    F: FnOnce() -> bool,
{
    match drafts.restore_with::<InspectionFields, _>(key, confirm) {
        RestoreOutcome::Restored(fields) => {
            state.fields = fields;
            state.errors.clear();
            RestoreOutcome::Restored(())
        }
        RestoreOutcome::Declined => RestoreOutcome::Declined,
        RestoreOutcome::NotFound => RestoreOutcome::NotFound,
    }
}

/// Submit and, when valid, put the record at the head of `submissions`
pub fn submit_into<B: DraftBackend>(
    state: &mut FormState,
    submissions: &mut Collection<InspectionRecord>,
    id: u64,
    drafts: &DraftStore<B>,
    key: &str,
) -> FormOutcome {
    let outcome = handle(state, FormAction::Submit { id }, drafts, key);
    if let FormOutcome::Submitted(record) = &outcome {
        if let Err(e) = submissions.insert_front(record.clone()) {
            log::error!("[FORMS] {}", e);
        }
    }
    outcome
}

/// Save an edited submission. Missing ids are ignored.
pub fn update_submission(submissions: &mut Collection<InspectionRecord>, record: InspectionRecord) -> bool {
    let replaced = submissions.replace(record);
    if !replaced {
        log::debug!("[FORMS] Edit for a missing submission ignored");
    }
    replaced
}

pub fn delete_submission(submissions: &mut Collection<InspectionRecord>, id: u64) -> Option<InspectionRecord> {
    submissions.remove(id)
}

/// CSS class of the state badge in the submissions table
pub fn estado_badge(estado: &str) -> &'static str {
    match estado {
        "Aprobado" => "badge badge-approved",
        "Rechazado" => "badge badge-rejected",
        _ => "badge badge-pending",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::MemoryBackend;

    fn drafts() -> DraftStore<MemoryBackend> {
        DraftStore::new(MemoryBackend::default())
    }

    fn edit(state: &mut FormState, drafts: &DraftStore<MemoryBackend>, field: InspectionField, value: &str) {
        handle(state, FormAction::Edit(field, value.to_string()), drafts, DRAFT_KEY);
    }

    fn fill_required(state: &mut FormState, drafts: &DraftStore<MemoryBackend>) {
        edit(state, drafts, InspectionField::Fecha, "2024-07-01");
        edit(state, drafts, InspectionField::AreaProceso, "Pintura");
        edit(state, drafts, InspectionField::Op, "OP-1182");
        edit(state, drafts, InspectionField::DisenoReferencia, "A45");
        edit(state, drafts, InspectionField::Estado, "Aprobado");
        edit(state, drafts, InspectionField::Registro, "Inspector");
        edit(state, drafts, InspectionField::Responsable, "Laura");
    }

    #[test]
    fn test_each_edit_saves_draft() {
        let drafts = drafts();
        let mut state = FormState::new();
        edit(&mut state, &drafts, InspectionField::Op, "O");
        edit(&mut state, &drafts, InspectionField::Op, "OP");
        handle(&mut state, FormAction::SetPhoto("data:image/jpeg;base64,AA==".to_string()), &drafts, DRAFT_KEY);

        let saved: InspectionFields = drafts.load(DRAFT_KEY).unwrap();
        assert_eq!(saved, state.fields);
        assert_eq!(saved.op, "OP");
        assert_eq!(saved.photo.as_deref(), Some("data:image/jpeg;base64,AA=="));

        handle(&mut state, FormAction::ClearPhoto, &drafts, DRAFT_KEY);
        assert_eq!(drafts.load::<InspectionFields>(DRAFT_KEY).unwrap().photo, None);
    }

    #[test]
    fn test_submit_end_to_end() {
        let drafts = drafts();
        let mut submissions = Collection::from_vec(vec![InspectionRecord { id: 1, fields: InspectionFields::default() }]);
        let mut state = FormState::new();
        fill_required(&mut state, &drafts);
        assert!(drafts.load::<InspectionFields>(DRAFT_KEY).is_some());

        let outcome = submit_into(&mut state, &mut submissions, 1_720_000_000_000, &drafts, DRAFT_KEY);
        assert!(matches!(outcome, FormOutcome::Submitted(_)));

        let head = &submissions.as_slice()[0];
        assert_eq!(head.id, 1_720_000_000_000);
        assert_eq!(head.fields.fecha, "2024-07-01");
        assert_eq!(head.fields.area_proceso, "Pintura");
        assert_eq!(head.fields.estado, "Aprobado");
        assert_eq!(head.fields.defecto, "Ninguno");
        assert_eq!(submissions.len(), 2);

        assert!(drafts.load::<InspectionFields>(DRAFT_KEY).is_none());
        assert_eq!(state, FormState::new());
    }

    #[test]
    fn test_invalid_submit_keeps_input() {
        let drafts = drafts();
        let mut submissions = Collection::new();
        let mut state = FormState::new();
        edit(&mut state, &drafts, InspectionField::Fecha, "2024-07-01");
        edit(&mut state, &drafts, InspectionField::Observacion, "sin novedad");

        let outcome = submit_into(&mut state, &mut submissions, 5, &drafts, DRAFT_KEY);
        let FormOutcome::Invalid(errors) = outcome else { panic!("expected invalid") };
        assert!(errors.contains(&ValidationError::Required("op")));
        assert!(!errors.contains(&ValidationError::Required("fecha")));
        assert!(!errors.contains(&ValidationError::Required("observacion")));

        assert!(submissions.is_empty());
        assert_eq!(state.fields.fecha, "2024-07-01");
        assert_eq!(state.fields.observacion, "sin novedad");
        assert!(state.error_for(InspectionField::Op).is_some());
        assert!(drafts.load::<InspectionFields>(DRAFT_KEY).is_some());

        // Fixing the field clears its message only
        edit(&mut state, &drafts, InspectionField::Op, "OP-7");
        assert!(state.error_for(InspectionField::Op).is_none());
        assert!(state.error_for(InspectionField::Estado).is_some());
    }

    #[test]
    fn test_clear_drops_draft() {
        let drafts = drafts();
        let mut state = FormState::new();
        edit(&mut state, &drafts, InspectionField::Op, "OP-1");
        assert_eq!(handle(&mut state, FormAction::Clear, &drafts, DRAFT_KEY), FormOutcome::Cleared);
        assert!(drafts.load::<InspectionFields>(DRAFT_KEY).is_none());
        assert_eq!(state.fields, InspectionFields::default());
    }

    #[test]
    fn test_restore_draft() {
        let drafts = drafts();
        let mut state = FormState::new();
        assert_eq!(restore_draft(&mut state, &drafts, DRAFT_KEY, || true), RestoreOutcome::NotFound);

        edit(&mut state, &drafts, InspectionField::Op, "OP-22");
        let mut reloaded = FormState::new();
        assert_eq!(restore_draft(&mut reloaded, &drafts, DRAFT_KEY, || false), RestoreOutcome::Declined);
        assert_eq!(reloaded.fields.op, "");

        assert_eq!(restore_draft(&mut reloaded, &drafts, DRAFT_KEY, || true), RestoreOutcome::Restored(()));
        assert_eq!(reloaded.fields.op, "OP-22");
    }

    #[test]
    fn test_edit_and_delete_submission() {
        let mut submissions = Collection::from_vec(vec![
            InspectionRecord { id: 1, fields: InspectionFields::default() },
            InspectionRecord { id: 2, fields: InspectionFields::default() },
        ]);
        let mut edited = submissions.get(2).cloned().unwrap();
        edited.fields.estado = "Rechazado".to_string();
        assert!(update_submission(&mut submissions, edited));
        assert_eq!(submissions.get(2).unwrap().fields.estado, "Rechazado");

        let ghost = InspectionRecord { id: 9, fields: InspectionFields::default() };
        assert!(!update_submission(&mut submissions, ghost));
        assert_eq!(submissions.len(), 2);

        assert!(delete_submission(&mut submissions, 1).is_some());
        assert!(delete_submission(&mut submissions, 1).is_none());
        assert_eq!(submissions.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in InspectionField::ALL {
            assert_eq!(InspectionField::from_name(field.name()), Some(field));
        }
        assert_eq!(InspectionField::from_name("photo"), None);
    }
}
