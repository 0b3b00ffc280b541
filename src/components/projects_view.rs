//! Projects View
//!
//! Kanban board. Cards are dragged between columns with the mouse; a click
//! (no drag) opens the task modal.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_mousedown, make_on_mouseleave, make_on_zone_mouseenter};

use crate::browser;
use crate::components::{Breadcrumbs, TaskModal};
use crate::context::{use_app_context, BoardDnd};
use crate::models::{Bucket, Priority};
use crate::notifications::ToastKind;
use crate::store::{store_next_id, use_app_store, AppStateStoreFields};

#[component]
pub fn ProjectsView() -> impl IntoView {
    // App binds the document listeners for these signals once
    let dnd = use_app_context().board_dnd;
    let selected = RwSignal::new(None::<u64>);

    // Leaving mid-drag must not leave a card or target behind for the next visit
    on_cleanup(move || {
        dnd.pending.try_set(None);
        dnd.dragging.try_set(None);
        dnd.drop_target.try_set(None);
    });

    view! {
        <div class="page projects-page">
            <Breadcrumbs />
            <div class="kanban-board">
                {Bucket::ALL.into_iter().map(|bucket| view! {
                    <BoardColumn bucket=bucket dnd=dnd selected=selected />
                }).collect_view()}
            </div>
            {move || selected.get().map(|task_id| view! {
                <TaskModal task_id=task_id on_close=move |_| selected.set(None) />
            })}
        </div>
    }
}

#[component]
fn BoardColumn(bucket: Bucket, dnd: BoardDnd, selected: RwSignal<Option<u64>>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (adding, set_adding) = signal(false);
    let (new_title, set_new_title) = signal(String::new());
    let (new_priority, set_new_priority) = signal(Priority::Media);

    let task_ids = move || store.board().read().tasks(bucket).iter().map(|t| t.id).collect::<Vec<_>>();
    let count = move || store.board().read().tasks(bucket).len();
    let is_target = move || dnd.drop_target.with(|t| *t == Some(bucket));

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let id = store_next_id(&store);
        let title = new_title.get();
        let result = store
            .board()
            .write()
            .add_task(bucket, id, &title, new_priority.get(), browser::today())
            .map(|task| task.id);
        match result {
            Ok(_) => {
                set_new_title.set(String::new());
                set_new_priority.set(Priority::Media);
                set_adding.set(false);
            }
            Err(_) => ctx.notify(ToastKind::Warning, "Tarea", "El título de la tarea es obligatorio."),
        }
    };

    view! {
        <div
            class=move || if is_target() { "kanban-column drop-target" } else { "kanban-column" }
            on:mouseenter=make_on_zone_mouseenter(dnd, bucket)
            on:mouseleave=make_on_mouseleave(dnd)
        >
            <div class="kanban-column-header">
                <h3>{bucket.title()}</h3>
                <span class="kanban-count">{count}</span>
            </div>
            <div class="kanban-cards">
                <For
                    each=task_ids
                    key=|id| *id
                    children=move |id| view! { <TaskCard task_id=id bucket=bucket dnd=dnd selected=selected /> }
                />
            </div>
            <Show
                when=move || adding.get()
                fallback=move || view! {
                    <button class="kanban-add-btn" on:click=move |_| set_adding.set(true)>
                        <i class="fas fa-plus"></i>" Añadir tarea"
                    </button>
                }
            >
                <form class="kanban-add-form" on:submit=on_add>
                    <input
                        type="text"
                        class="form-input"
                        placeholder="Título de la tarea"
                        prop:value=move || new_title.get()
                        on:input=move |ev| set_new_title.set(event_target_value(&ev))
                    />
                    <select
                        class="form-input"
                        aria-label="Prioridad"
                        prop:value=move || new_priority.get().as_str()
                        on:change=move |ev| {
                            if let Some(p) = Priority::parse(&event_target_value(&ev)) {
                                set_new_priority.set(p);
                            }
                        }
                    >
                        {Priority::ALL.iter().map(|p| view! { <option value=p.as_str()>{p.as_str()}</option> }).collect_view()}
                    </select>
                    <div class="kanban-add-actions">
                        <button type="submit" class="btn btn-primary btn-sm">"Añadir"</button>
                        <button type="button" class="btn btn-secondary btn-sm" on:click=move |_| set_adding.set(false)>"×"</button>
                    </div>
                </form>
            </Show>
        </div>
    }
}

#[component]
fn TaskCard(task_id: u64, bucket: Bucket, dnd: BoardDnd, selected: RwSignal<Option<u64>>) -> impl IntoView {
    let store = use_app_store();
    let task = move || store.board().read().find(task_id).map(|(t, _)| t.clone());
    let is_dragging = move || dnd.dragging.with(|d| d.as_ref().is_some_and(|p| p.key == task_id));

    view! {
        <div
            class=move || if is_dragging() { "kanban-card dragging" } else { "kanban-card" }
            on:mousedown=make_on_mousedown(dnd, task_id, bucket)
            on:click=move |_| {
                if !dnd.drag_just_ended.get_untracked() {
                    selected.set(Some(task_id));
                }
            }
        >
            {move || task().map(|task| view! {
                <div class="kanban-card-top">
                    <span class=format!("priority-badge {}", task.priority.css_class())>{task.priority.as_str()}</span>
                    <span class="kanban-due"><i class="fas fa-calendar-alt"></i>" "{task.due_date.format("%d/%m").to_string()}</span>
                </div>
                <p class="kanban-card-title">{task.title.clone()}</p>
                <div class="kanban-card-labels">
                    {task.labels.iter().map(|l| view! {
                        <span class=format!("chip {}", l.color.css_class())>{l.name.clone()}</span>
                    }).collect_view()}
                </div>
                <div class="kanban-card-footer">
                    <div class="avatars">
                        {task.assigned_users.iter().map(|u| view! { <span class="avatar">{u.initials.clone()}</span> }).collect_view()}
                    </div>
                    {(!task.attachments.is_empty()).then(|| view! {
                        <span class="kanban-attachments"><i class="fas fa-paperclip"></i>" "{task.attachments.len()}</span>
                    })}
                </div>
            })}
        </div>
    }
}
