//! Forms View
//!
//! Inspection form with draft autosave, evidence photo (file or camera), and
//! the table of submissions made in this session.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::attachment::{encode_data_uri, SelectedFile};
use crate::browser::{self, clear_input, files_from_input, read_file_bytes};
use crate::components::{Breadcrumbs, CameraModal, DeleteConfirmButton};
use crate::context::use_app_context;
use crate::draft::RestoreOutcome;
use crate::forms::{self, estado_badge, FormAction, FormOutcome, FormState, InspectionField};
use crate::models::{InspectionFields, InspectionRecord};
use crate::notifications::ToastKind;
use crate::store::{store_next_id, use_app_store, AppStateStoreFields};

/// One labelled input; selects for fields with fixed options
#[component]
fn FieldInput(
    field: InspectionField,
    /// Prefix for element ids, so two forms can coexist
    #[prop(into)] id_prefix: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] on_edit: Callback<String>,
) -> impl IntoView {
    let id = format!("{}{}", id_prefix, field.name());
    let input = match (field, field.options()) {
        (_, Some(options)) => view! {
            <select
                id=id.clone()
                name=field.name()
                class="form-input"
                required=field.is_required()
                prop:value=move || value.get()
                on:change=move |ev| on_edit.run(event_target_value(&ev))
            >
                {(field != InspectionField::Defecto).then(|| view! { <option value="">"Seleccione"</option> })}
                {options.iter().map(|opt| view! { <option value=*opt>{*opt}</option> }).collect_view()}
            </select>
        }
        .into_any(),
        (InspectionField::Observacion, None) => view! {
            <textarea
                id=id.clone()
                name=field.name()
                class="form-input"
                rows="3"
                prop:value=move || value.get()
                on:input=move |ev| on_edit.run(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        (_, None) => view! {
            <input
                id=id.clone()
                name=field.name()
                class="form-input"
                type=if field == InspectionField::Fecha { "date" } else { "text" }
                required=field.is_required()
                prop:value=move || value.get()
                on:input=move |ev| on_edit.run(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <div class=if field == InspectionField::Observacion { "form-field span-2" } else { "form-field" }>
            <label class="form-label" for=id>{field.label()}":"</label>
            {input}
            {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
        </div>
    }
}

#[component]
pub fn FormsView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let config = ctx.config();

    let form = RwSignal::new(FormState::new());
    let drafts = StoredValue::new_local(ctx.drafts());
    let draft_key = StoredValue::new(config.draft_key.clone());
    let max_photo_bytes = config.max_attachment_bytes;
    let (camera_open, set_camera_open) = signal(false);
    let editing = RwSignal::new(None::<InspectionRecord>);

    let dispatch = move |action: FormAction| -> Option<FormOutcome> {
        form.try_update(|state| {
            drafts.with_value(|d| draft_key.with_value(|key| forms::handle(state, action, d, key)))
        })
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let id = store_next_id(&store);
        let outcome = form.try_update(|state| {
            drafts.with_value(|d| {
                draft_key.with_value(|key| forms::submit_into(state, &mut store.submissions().write(), id, d, key))
            })
        });
        match outcome {
            Some(FormOutcome::Submitted(_)) => {
                ctx.notify(ToastKind::Success, "Formulario enviado", "La inspección fue registrada.")
            }
            Some(FormOutcome::Invalid(errors)) => ctx.notify(
                ToastKind::Warning,
                "Campos requeridos",
                &format!("Complete {} campo(s) obligatorio(s).", errors.len()),
            ),
            _ => {}
        }
    };

    let on_restore = move |_: web_sys::MouseEvent| {
        let outcome = form.try_update(|state| {
            drafts.with_value(|d| {
                draft_key.with_value(|key| {
                    forms::restore_draft(state, d, key, || browser::confirm("¿Desea cargar el borrador guardado?"))
                })
            })
        });
        match outcome {
            Some(RestoreOutcome::Restored(())) => {
                ctx.notify(ToastKind::Success, "Borrador cargado", "Se restauraron los datos guardados.")
            }
            Some(RestoreOutcome::NotFound) => {
                ctx.notify(ToastKind::Info, "Sin borrador", "No hay un borrador guardado.")
            }
            _ => {}
        }
    };

    let on_clear = move |_: web_sys::MouseEvent| {
        dispatch(FormAction::Clear);
        ctx.notify(ToastKind::Info, "Formulario limpio", "Se descartó el borrador.");
    };

    let on_photo_file = move |ev: web_sys::Event| {
        let Some(file) = files_from_input(&ev).into_iter().next() else { return };
        clear_input(&ev);
        if file.size() > max_photo_bytes {
            ctx.notify(ToastKind::Warning, "Archivo muy grande", &format!("{} supera el límite.", file.name()));
            return;
        }
        spawn_local(async move {
            match read_file_bytes(&file).await {
                Ok(bytes) => {
                    dispatch(FormAction::SetPhoto(encode_data_uri(&file.type_(), &bytes)));
                }
                Err(e) => {
                    log::warn!("[FORMS] {}", e);
                    ctx.notify(ToastKind::Error, "Foto", "No se pudo leer el archivo.");
                }
            }
        });
    };

    view! {
        <div class="page forms-page">
            <Breadcrumbs />
            <section class="card">
                <h2 class="card-title">"Formulario de Inspección"</h2>
                <form class="form-grid" on:submit=on_submit>
                    {InspectionField::ALL.into_iter().map(|field| view! {
                        <FieldInput
                            field=field
                            id_prefix=""
                            value=Signal::derive(move || form.with(|s| s.fields.get(field).to_string()))
                            error=Signal::derive(move || form.with(|s| s.error_for(field).map(|_| "Campo obligatorio".to_string())))
                            on_edit=move |value: String| { dispatch(FormAction::Edit(field, value)); }
                        />
                    }).collect_view()}

                    <div class="form-field span-2">
                        <span class="form-label">"Foto de evidencia:"</span>
                        <div class="photo-actions">
                            <label class="btn btn-secondary">
                                <i class="fas fa-upload"></i>" Subir foto"
                                <input type="file" accept="image/*" class="hidden" on:change=on_photo_file />
                            </label>
                            <button type="button" class="btn btn-secondary" on:click=move |_| set_camera_open.set(true)>
                                <i class="fas fa-camera"></i>" Tomar foto"
                            </button>
                        </div>
                        {move || form.with(|s| s.fields.photo.clone()).map(|uri| view! {
                            <div class="photo-preview">
                                <img src=uri alt="Evidencia" />
                                <button type="button" class="icon-btn danger" on:click=move |_| { dispatch(FormAction::ClearPhoto); }>
                                    <i class="fas fa-times"></i>
                                </button>
                            </div>
                        })}
                    </div>

                    <div class="form-actions span-2">
                        <button type="button" class="btn btn-secondary" on:click=on_restore>"Cargar Borrador"</button>
                        <button type="button" class="btn btn-secondary" on:click=on_clear>"Cancelar"</button>
                        <button type="submit" class="btn btn-primary">"Guardar Inspección"</button>
                    </div>
                </form>
            </section>

            <SubmissionsTable editing=editing />

            <Show when=move || camera_open.get()>
                <CameraModal
                    on_capture=move |uri: String| { dispatch(FormAction::SetPhoto(uri)); }
                    on_close=move |_| set_camera_open.set(false)
                />
            </Show>

            {move || editing.get().map(|record| view! {
                <EditSubmissionModal record=record on_close=move |_| editing.set(None) />
            })}
        </div>
    }
}

#[component]
fn SubmissionsTable(editing: RwSignal<Option<InspectionRecord>>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let rows = move || store.submissions().read().as_slice().to_vec();

    view! {
        <section class="card">
            <h2 class="card-title">"Inspecciones Registradas"</h2>
            <Show
                when=move || !store.submissions().read().is_empty()
                fallback=|| view! { <p class="empty-state">"Aún no hay inspecciones registradas."</p> }
            >
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Fecha"</th>
                            <th>"Área"</th>
                            <th>"Op"</th>
                            <th>"Referencia"</th>
                            <th>"Estado"</th>
                            <th>"Defecto"</th>
                            <th>"Responsable"</th>
                            <th>"Foto"</th>
                            <th>"Acciones"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=rows
                            key=|r: &InspectionRecord| (r.id, r.fields.clone())
                            children=move |record: InspectionRecord| {
                                let id = record.id;
                                let for_edit = record.clone();
                                let f = record.fields;
                                let row_name = format!("OP {}", f.op);
                                view! {
                                    <tr>
                                        <td>{f.fecha}</td>
                                        <td>{f.area_proceso}</td>
                                        <td>{f.op}</td>
                                        <td>{f.diseno_referencia}</td>
                                        <td><span class=estado_badge(&f.estado)>{f.estado.clone()}</span></td>
                                        <td>{f.defecto}</td>
                                        <td>{f.responsable}</td>
                                        <td>{f.photo.map(|uri| view! { <img class="thumb" src=uri alt="Evidencia" /> })}</td>
                                        <td class="row-actions">
                                            <button class="icon-btn" title="Editar" on:click=move |_| editing.set(Some(for_edit.clone()))>
                                                <i class="fas fa-edit"></i>
                                            </button>
                                            <DeleteConfirmButton
                                                button_class="icon-btn danger"
                                                item_name=row_name
                                                on_confirm=move |_| {
                                                    if forms::delete_submission(&mut store.submissions().write(), id).is_some() {
                                                        ctx.notify(ToastKind::Info, "Inspección eliminada", "El registro fue eliminado.");
                                                    }
                                                }
                                            />
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>
        </section>
    }
}

/// Full-replace edit of one submission
#[component]
fn EditSubmissionModal(record: InspectionRecord, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let id = record.id;
    let fields = RwSignal::new(record.fields);

    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let updated: InspectionFields = fields.get_untracked();
        if let Err(errors) = updated.validate() {
            ctx.notify(ToastKind::Warning, "Campos requeridos", &format!("Faltan {} campo(s).", errors.len()));
            return;
        }
        if forms::update_submission(&mut store.submissions().write(), InspectionRecord { id, fields: updated }) {
            ctx.notify(ToastKind::Success, "Inspección actualizada", "Los cambios fueron guardados.");
        }
        on_close.run(());
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2>"Editar Inspección"</h2>
                    <button class="icon-btn" on:click=move |_| on_close.run(())>
                        <i class="fas fa-times"></i>
                    </button>
                </div>
                <form class="form-grid" on:submit=on_save>
                    {InspectionField::ALL.into_iter().map(|field| view! {
                        <FieldInput
                            field=field
                            id_prefix="edit_"
                            value=Signal::derive(move || fields.with(|f| f.get(field).to_string()))
                            error=Signal::derive(|| None::<String>)
                            on_edit=move |value: String| fields.update(|f| f.set(field, value))
                        />
                    }).collect_view()}
                    <div class="form-actions span-2">
                        <button type="button" class="btn btn-secondary" on:click=move |_| on_close.run(())>"Cancelar"</button>
                        <button type="submit" class="btn btn-primary">"Guardar Cambios"</button>
                    </div>
                </form>
            </div>
        </div>
    }
}
