//! Library View
//!
//! Document list with search, category filter and sort; uploads become
//! object-URL backed documents for the rest of the session.

use leptos::prelude::*;

use crate::attachment::SelectedFile;
use crate::browser::{self, clear_input, create_object_url, files_from_input};
use crate::components::{Breadcrumbs, DeleteConfirmButton};
use crate::context::use_app_context;
use crate::library::{self, DocumentQuery, DocumentSort, DownloadAction, ViewAction};
use crate::models::{Document, DocumentCategory, Preview};
use crate::notifications::ToastKind;
use crate::store::{store_add_document, store_delete_document, store_next_id, use_app_store, AppStateStoreFields};

fn category_icon(doc: &Document) -> &'static str {
    let name = doc.name.to_lowercase();
    if name.ends_with(".pdf") {
        "fas fa-file-pdf"
    } else if name.ends_with(".docx") || name.ends_with(".doc") {
        "fas fa-file-word"
    } else if name.ends_with(".xlsx") || name.ends_with(".xls") {
        "fas fa-file-excel"
    } else {
        "fas fa-file"
    }
}

#[component]
pub fn LibraryView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let query = RwSignal::new(DocumentQuery::default());
    let details = RwSignal::new(None::<Document>);

    let visible = move || query.with(|q| library::list_documents(&store.documents().read(), q));

    let on_upload = move |ev: web_sys::Event| {
        let files = files_from_input(&ev);
        clear_input(&ev);
        let today = browser::today();
        let count = files.len();
        for file in files {
            let id = store_next_id(&store);
            let url = create_object_url(&file);
            let doc = library::new_upload(id, &file.name(), SelectedFile::size(&file), today, url);
            log::info!("[LIBRARY] Uploaded {} ({})", doc.name, doc.size);
            store_add_document(&store, doc);
        }
        if count > 0 {
            ctx.notify(ToastKind::Success, "Documentos subidos", &format!("{} archivo(s) agregado(s).", count));
        }
    };

    let on_view = move |doc: Document| match library::view_action(&doc) {
        ViewAction::OpenInTab(href) => browser::open_in_tab(&href),
        ViewAction::ShowDetails => details.set(Some(doc)),
    };

    let on_download = move |doc: Document| {
        let result = match library::download_action(&doc) {
            DownloadAction::Original { href, file_name } => browser::trigger_download(&href, &file_name),
            DownloadAction::Summary { file_name, contents } => browser::download_text(&file_name, &contents),
        };
        if let Err(e) = result {
            log::warn!("[LIBRARY] Download failed: {}", e);
            ctx.notify(ToastKind::Error, "Descarga", "No se pudo descargar el documento.");
        }
    };

    view! {
        <div class="page library-page">
            <Breadcrumbs />
            <section class="card">
                <div class="library-toolbar">
                    <div class="search-box">
                        <i class="fas fa-search"></i>
                        <input
                            type="text"
                            class="form-input"
                            placeholder="Buscar documentos..."
                            prop:value=move || query.with(|q| q.search.clone())
                            on:input=move |ev| query.update(|q| q.search = event_target_value(&ev))
                        />
                    </div>
                    <select
                        class="form-input"
                        on:change=move |ev| query.update(|q| q.category = DocumentCategory::parse(&event_target_value(&ev)))
                    >
                        <option value="">"Todas las categorías"</option>
                        {DocumentCategory::ALL.iter().map(|c| view! { <option value=c.as_str()>{c.as_str()}</option> }).collect_view()}
                    </select>
                    <select
                        class="form-input"
                        on:change=move |ev| query.update(|q| q.sort = DocumentSort::parse(&event_target_value(&ev)))
                    >
                        {DocumentSort::ALL.iter().map(|s| view! { <option value=s.as_str()>{s.label()}</option> }).collect_view()}
                    </select>
                    <label class="btn btn-primary">
                        <i class="fas fa-upload"></i>" Subir Documento"
                        <input type="file" multiple class="hidden" on:change=on_upload />
                    </label>
                </div>

                <Show
                    when=move || !visible().is_empty()
                    fallback=|| view! { <p class="empty-state">"No se encontraron documentos."</p> }
                >
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Nombre"</th>
                                <th>"Categoría"</th>
                                <th>"Fecha"</th>
                                <th>"Tamaño"</th>
                                <th>"Acciones"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=visible
                                key=|doc: &Document| doc.id
                                children=move |doc: Document| {
                                    let id = doc.id;
                                    let for_view = doc.clone();
                                    let for_download = doc.clone();
                                    view! {
                                        <tr>
                                            <td class="doc-name"><i class=category_icon(&doc)></i>" "{doc.name.clone()}</td>
                                            <td>{doc.category.as_str()}</td>
                                            <td>{doc.date.format("%Y-%m-%d").to_string()}</td>
                                            <td>{doc.size.clone()}</td>
                                            <td class="row-actions">
                                                <button class="icon-btn" title="Ver" on:click=move |_| on_view(for_view.clone())>
                                                    <i class="fas fa-eye"></i>
                                                </button>
                                                <button class="icon-btn" title="Descargar" on:click=move |_| on_download(for_download.clone())>
                                                    <i class="fas fa-download"></i>
                                                </button>
                                                <DeleteConfirmButton
                                                    button_class="icon-btn danger"
                                                    item_name=doc.name.clone()
                                                    on_confirm=move |_| {
                                                        if let Some(doc) = store_delete_document(&store, id) {
                                                            ctx.notify(ToastKind::Info, "Documento eliminado", &doc.name);
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

            {move || details.get().map(|doc| view! {
                <DocumentDetails doc=doc on_close=move |_| details.set(None) />
            })}
        </div>
    }
}

#[component]
fn DocumentDetails(doc: Document, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let preview = match doc.preview() {
        Preview::Image(src) => view! { <img class="doc-preview" src=src alt=doc.name.clone() /> }.into_any(),
        Preview::Pdf(src) => view! { <iframe class="doc-preview" src=src></iframe> }.into_any(),
        Preview::Unavailable => view! { <p class="empty-state">"Vista previa no disponible"</p> }.into_any(),
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h2>{doc.name.clone()}</h2>
                    <button class="icon-btn" on:click=move |_| on_close.run(())>
                        <i class="fas fa-times"></i>
                    </button>
                </div>
                <dl class="details-list">
                    <dt>"Tipo"</dt><dd>{doc.category.as_str()}</dd>
                    <dt>"Fecha de Subida"</dt><dd>{doc.date.format("%Y-%m-%d").to_string()}</dd>
                    <dt>"Tamaño"</dt><dd>{doc.size.clone()}</dd>
                </dl>
                {preview}
            </div>
        </div>
    }
}
