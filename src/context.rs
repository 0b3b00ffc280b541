//! Application Context
//!
//! Session signals shared via Leptos Context API.

use leptos::prelude::*;
use leptos_dragdrop::{create_dnd_signals, DndSignals};

use crate::browser::LocalStorageBackend;
use crate::config::AppConfig;
use crate::draft::DraftStore;
use crate::models::{Bucket, User};
use crate::nav;
use crate::notifications::ToastKind;
use crate::store::{store_notify, AppStore};

/// Kanban drag state: task ids dragged onto buckets
pub type BoardDnd = DndSignals<u64, Bucket>;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Logged-in user; None shows the login page
    pub user: RwSignal<Option<User>>,
    /// Current route path
    pub current_path: RwSignal<String>,
    /// Sidebar collapsed on desktop / open on mobile
    pub sidebar_open: RwSignal<bool>,
    /// Owned by the app so the document listeners are bound once per page load
    pub board_dnd: BoardDnd,
    config: StoredValue<AppConfig>,
    store: AppStore,
}

impl AppContext {
    pub fn new(config: AppConfig, store: AppStore) -> Self {
        Self {
            user: RwSignal::new(None),
            current_path: RwSignal::new(nav::DASHBOARD_PATH.to_string()),
            sidebar_open: RwSignal::new(true),
            board_dnd: create_dnd_signals(),
            config: StoredValue::new(config),
            store,
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// Drafts live in local storage under the configured key
    pub fn drafts(&self) -> DraftStore<LocalStorageBackend> {
        DraftStore::new(LocalStorageBackend::new())
    }

    pub fn navigate(&self, path: &str) {
        let resolved = nav::resolve(path);
        log::debug!("[NAV] {} -> {}", path, resolved);
        self.current_path.set(resolved.to_string());
    }

    pub fn login(&self, user: User) {
        log::info!("[AUTH] {} logged in", user.email);
        self.user.set(Some(user));
        self.navigate(nav::DASHBOARD_PATH);
    }

    pub fn logout(&self) {
        self.user.set(None);
        self.current_path.set(nav::DASHBOARD_PATH.to_string());
    }

    /// Toast with the configured lifetime
    pub fn notify(&self, kind: ToastKind, title: &str, message: &str) {
        let toast_ms = self.config.with_value(|c| c.toast_ms);
        store_notify(&self.store, toast_ms, kind, title, message);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reactive_stores::Store;

    use crate::store::AppState;

    #[test]
    fn test_board_dnd_survives_page_scope() {
        let root = Owner::new();
        root.set();
        let ctx = AppContext::new(AppConfig::default(), Store::new(AppState::new()));

        // A page mounts, uses the drag signals, then unmounts
        let page = root.child();
        page.with(|| ctx.board_dnd.drop_target.set(Some(Bucket::Review)));
        page.cleanup();

        assert_eq!(ctx.board_dnd.drop_target.try_get_untracked(), Some(Some(Bucket::Review)));
        assert_eq!(ctx.board_dnd.dragging.try_get_untracked(), Some(None));
    }
}
