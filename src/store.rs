//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Everything here is
//! session-scoped: a reload starts again from the seed data.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::auth;
use crate::browser::ObjectUrlReleaser;
use crate::collection::{Collection, IdGenerator};
use crate::indicators::{seed_chart_data, ChartData};
use crate::kanban::{seed_board, Board};
use crate::library::{self, seed_documents};
use crate::models::{Bucket, Document, InspectionRecord, User};
use crate::notifications::{Notifications, ToastKind};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Store)]
pub struct AppState {
    /// Registered accounts, seeded with the plant users
    pub users: Vec<User>,
    /// Inspection submissions, newest first
    pub submissions: Collection<InspectionRecord>,
    pub documents: Collection<Document>,
    pub board: Board,
    pub toasts: Notifications,
    /// Read-only KPI series
    pub chart: ChartData,
    pub ids: IdGenerator,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            users: auth::seed_users(),
            submissions: Collection::new(),
            documents: Collection::from_vec(seed_documents()),
            board: seed_board(),
            toasts: Notifications::new(),
            chart: seed_chart_data(),
            ids: IdGenerator::default(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Fresh id, unique across every collection in the session
pub fn store_next_id(store: &AppStore) -> u64 {
    store.ids().write().next()
}

/// Show a toast and schedule its removal
pub fn store_notify(store: &AppStore, toast_ms: u32, kind: ToastKind, title: &str, message: &str) {
    let id = store_next_id(store);
    store.toasts().write().push(id, kind, title, message);
    let store = *store;
    spawn_local(async move {
        TimeoutFuture::new(toast_ms).await;
        store_dismiss_toast(&store, id);
    });
}

pub fn store_dismiss_toast(store: &AppStore, id: u64) {
    store.toasts().write().dismiss(id);
}

/// Remove a document and revoke the object URL it owned
pub fn store_delete_document(store: &AppStore, id: u64) -> Option<Document> {
    library::delete_document(&mut store.documents().write(), id, &ObjectUrlReleaser)
}

pub fn store_add_document(store: &AppStore, doc: Document) {
    if let Err(e) = store.documents().write().insert_front(doc) {
        log::error!("[STORE] {}", e);
    }
}

/// Move a card between buckets; stale drags are logged and ignored
pub fn store_transfer_task(store: &AppStore, task_id: u64, from: Bucket, to: Bucket) {
    match store.board().write().transfer(task_id, from, to) {
        Ok(()) => log::debug!("[PROJECTS] Task {} {:?} -> {:?}", task_id, from, to),
        Err(e) => log::warn!("[PROJECTS] {}", e),
    }
}
