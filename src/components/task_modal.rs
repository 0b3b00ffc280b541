//! Task Modal Component
//!
//! Task details: text fields are edited locally and saved together; chips and
//! attachments apply to the board immediately.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::attachment::{screen_batch, SelectedFile};
use crate::browser::{self, clear_input, files_from_input, read_file_bytes};
use crate::components::{CameraModal, ChipPicker, DeleteConfirmButton};
use crate::context::use_app_context;
use crate::kanban::{available_chips, toggle_chip};
use crate::models::{Attachment, BoardChip, Preview, Priority, Task};
use crate::notifications::ToastKind;
use crate::store::{store_next_id, use_app_store, AppStateStoreFields};

fn size_text(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{} KB", (bytes + 512) / 1024)
    }
}

#[component]
pub fn TaskModal(task_id: u64, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let max_bytes = ctx.config().max_attachment_bytes;

    let current = move || store.board().read().find(task_id).map(|(t, _)| t.clone());
    let Some(initial) = current() else {
        return view! { <div></div> }.into_any();
    };
    let bucket_title = store.board().read().bucket_of(task_id).map(|b| b.title()).unwrap_or_default();

    let title = RwSignal::new(initial.title.clone());
    let description = RwSignal::new(initial.description.clone());
    let priority = RwSignal::new(initial.priority);
    let due_date = RwSignal::new(initial.due_date);
    let (camera_open, set_camera_open) = signal(false);

    // Chip edits go straight to the board
    let on_chip = move |chip: BoardChip| {
        let board = store.board();
        board.write().edit_task(task_id, |task: &mut Task| toggle_chip(task, chip));
    };

    let on_save = move |_: web_sys::MouseEvent| {
        let Some(mut task) = current() else { return };
        let new_title = title.get_untracked();
        if new_title.trim().is_empty() {
            ctx.notify(ToastKind::Warning, "Tarea", "El título de la tarea es obligatorio.");
            return;
        }
        task.title = new_title.trim().to_string();
        task.description = description.get_untracked();
        task.priority = priority.get_untracked();
        task.due_date = due_date.get_untracked();
        store.board().write().update_task(task);
        on_close.run(());
    };

    let on_delete = move |_: ()| {
        if let Some(task) = store.board().write().delete_task(task_id) {
            ctx.notify(ToastKind::Info, "Tarea eliminada", &task.title);
        }
        on_close.run(());
    };

    let on_files = move |ev: web_sys::Event| {
        let files = files_from_input(&ev);
        clear_input(&ev);
        let screened = screen_batch(files, max_bytes);
        for rejected in &screened.rejected {
            log::warn!("[PROJECTS] {}", rejected);
            ctx.notify(ToastKind::Warning, "Archivo muy grande", &rejected.to_string());
        }
        for file in screened.accepted {
            let id = store_next_id(&store);
            spawn_local(async move {
                match read_file_bytes(&file).await {
                    Ok(bytes) => {
                        let attachment = Attachment::from_bytes(id, &file.name(), &file.media_type(), &bytes);
                        // The task may have been deleted while reading
                        if !store.board().write().add_attachment(task_id, attachment) {
                            log::debug!("[PROJECTS] Task {} gone, dropping {}", task_id, file.name());
                        }
                    }
                    Err(e) => {
                        log::warn!("[PROJECTS] {}", e);
                        ctx.notify(ToastKind::Error, "Adjunto", &e.to_string());
                    }
                }
            });
        }
    };

    let on_capture = move |uri: String| {
        let id = store_next_id(&store);
        let attachment = Attachment::from_capture(id, uri, browser::now());
        store.board().write().add_attachment(task_id, attachment);
    };

    let chips = Signal::derive(move || current().map(|t| available_chips(&t)).unwrap_or_default());

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="modal task-modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <input
                        class="form-input task-title-input"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                    <button class="icon-btn" on:click=move |_| on_close.run(())>
                        <i class="fas fa-times"></i>
                    </button>
                </div>
                <p class="task-bucket">"En "{bucket_title}</p>

                <div class="task-grid">
                    <div class="form-field">
                        <label class="form-label">"Prioridad"</label>
                        <select
                            class="form-input"
                            prop:value=move || priority.get().as_str()
                            on:change=move |ev| {
                                if let Some(p) = Priority::parse(&event_target_value(&ev)) {
                                    priority.set(p);
                                }
                            }
                        >
                            {Priority::ALL.iter().map(|p| view! { <option value=p.as_str()>{p.as_str()}</option> }).collect_view()}
                        </select>
                    </div>
                    <div class="form-field">
                        <label class="form-label">"Fecha límite"</label>
                        <input
                            type="date"
                            class="form-input"
                            prop:value=move || due_date.get().format("%Y-%m-%d").to_string()
                            on:change=move |ev| {
                                if let Ok(date) = chrono::NaiveDate::parse_from_str(&event_target_value(&ev), "%Y-%m-%d") {
                                    due_date.set(date);
                                }
                            }
                        />
                    </div>
                    <div class="form-field span-2">
                        <label class="form-label">"Descripción"</label>
                        <textarea
                            class="form-input"
                            rows="4"
                            prop:value=move || description.get()
                            on:input=move |ev| description.set(event_target_value(&ev))
                        ></textarea>
                    </div>
                </div>

                <div class="task-section">
                    <h4>"Etiquetas y miembros"</h4>
                    <div class="chip-row">
                        {move || current().map(|task| {
                            let labels = task.labels.into_iter().map(BoardChip::Label);
                            let users = task.assigned_users.into_iter().map(BoardChip::User);
                            labels.chain(users).map(|chip| {
                                let class = match &chip {
                                    BoardChip::Label(l) => format!("chip {}", l.color.css_class()),
                                    BoardChip::User(_) => "chip chip-user".to_string(),
                                };
                                let text = chip.text().to_string();
                                view! {
                                    <span class=class>
                                        {text}
                                        <button class="chip-remove" on:click=move |_| on_chip(chip.clone())>"×"</button>
                                    </span>
                                }
                            }).collect_view()
                        })}
                    </div>
                    <ChipPicker available=chips on_select=move |chip: BoardChip| on_chip(chip) />
                </div>

                <div class="task-section">
                    <h4>"Adjuntos"</h4>
                    <div class="attachment-actions">
                        <label class="btn btn-secondary btn-sm">
                            <i class="fas fa-paperclip"></i>" Adjuntar archivos"
                            <input type="file" multiple class="hidden" on:change=on_files />
                        </label>
                        <button class="btn btn-secondary btn-sm" on:click=move |_| set_camera_open.set(true)>
                            <i class="fas fa-camera"></i>" Tomar foto"
                        </button>
                    </div>
                    <ul class="attachment-list">
                        {move || current().map(|task| task.attachments.into_iter().map(|att| {
                            let att_id = att.id;
                            let thumb = match att.preview() {
                                Preview::Image(src) => view! { <img class="thumb" src=src alt=att.file_name.clone() /> }.into_any(),
                                Preview::Pdf(_) => view! { <i class="fas fa-file-pdf attachment-icon"></i> }.into_any(),
                                Preview::Unavailable => view! { <i class="fas fa-file attachment-icon"></i> }.into_any(),
                            };
                            view! {
                                <li class="attachment-item">
                                    {thumb}
                                    <a class="attachment-name" href=att.data_uri.clone() download=att.file_name.clone()>
                                        {att.file_name.clone()}
                                    </a>
                                    <span class="attachment-size">{size_text(att.size)}</span>
                                    <DeleteConfirmButton
                                        button_class="icon-btn danger"
                                        item_name=att.file_name.clone()
                                        on_confirm=move |_| {
                                            store.board().write().remove_attachment(task_id, att_id);
                                        }
                                    />
                                </li>
                            }
                        }).collect_view())}
                    </ul>
                </div>

                <div class="modal-footer">
                    <DeleteConfirmButton button_class="btn btn-danger" item_name=initial.title.clone() on_confirm=on_delete />
                    <button class="btn btn-secondary" on:click=move |_| on_close.run(())>"Cancelar"</button>
                    <button class="btn btn-primary" on:click=on_save>"Guardar"</button>
                </div>

                <Show when=move || camera_open.get()>
                    <CameraModal
                        on_capture=on_capture
                        on_close=move |_| set_camera_open.set(false)
                    />
                </Show>
            </div>
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_text() {
        assert_eq!(size_text(2048), "2 KB");
        assert_eq!(size_text(3 * 1024 * 1024 + 512 * 1024), "3.5 MB");
    }
}
