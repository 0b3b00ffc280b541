//! Quality Console Frontend App
//!
//! Login gate, then the sidebar / header / page layout.

use leptos::prelude::*;
use leptos_dragdrop::bind_global_mouseup;
use reactive_stores::Store;

use crate::components::{
    DashboardView, FormsView, IndicatorsView, LibraryView, LoginPage, ProjectsView, ReportsView, Sidebar,
    ToastContainer,
};
use crate::config::AppConfig;
use crate::context::{use_app_context, AppContext};
use crate::nav;
use crate::store::{store_transfer_task, AppState, AppStore};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let store: AppStore = Store::new(AppState::new());
    provide_context(store);

    let ctx = AppContext::new(config, store);
    provide_context(ctx);

    bind_global_mouseup(ctx.board_dnd, move |payload, zone| {
        store_transfer_task(&store, payload.key, payload.source, zone);
    });

    view! {
        <Show
            when=move || ctx.user.with(|u| u.is_some())
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
        <ToastContainer />
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class=move || if ctx.sidebar_open.get() { "app-layout" } else { "app-layout sidebar-collapsed" }>
            <Sidebar />
            <div class="main-column">
                <Header />
                <main class="main-content">
                    {move || match ctx.current_path.get().as_str() {
                        nav::FORMS_PATH => view! { <FormsView /> }.into_any(),
                        nav::LIBRARY_PATH => view! { <LibraryView /> }.into_any(),
                        nav::INDICATORS_PATH => view! { <IndicatorsView /> }.into_any(),
                        nav::PROJECTS_PATH => view! { <ProjectsView /> }.into_any(),
                        nav::REPORTS_PATH => view! { <ReportsView /> }.into_any(),
                        _ => view! { <DashboardView /> }.into_any(),
                    }}
                </main>
            </div>
        </div>
    }
}

#[component]
fn Header() -> impl IntoView {
    let ctx = use_app_context();
    let (menu_open, set_menu_open) = signal(false);
    let title = move || nav::page_title(&ctx.current_path.get());
    let username = move || ctx.user.with(|u| u.as_ref().map(|u| u.username.clone()).unwrap_or_default());
    let role = move || ctx.user.with(|u| u.as_ref().map(|u| u.role.clone()).unwrap_or_default());

    view! {
        <header class="app-header">
            <div class="header-left">
                <button class="sidebar-toggle" on:click=move |_| ctx.sidebar_open.update(|open| *open = !*open)>
                    <i class="fas fa-bars"></i>
                </button>
                <h1 class="page-title">{title}</h1>
            </div>
            <div class="user-menu">
                <button class="user-menu-btn" on:click=move |_| set_menu_open.update(|open| *open = !*open)>
                    <i class="fas fa-user-circle"></i>
                    <span>{username}</span>
                    <i class=move || if menu_open.get() { "fas fa-chevron-down rotated" } else { "fas fa-chevron-down" }></i>
                </button>
                <Show when=move || menu_open.get()>
                    <div class="user-menu-dropdown">
                        <div class="user-menu-info">
                            <p class="user-menu-name">{username}</p>
                            <p class="user-menu-role">{role}</p>
                        </div>
                        <button class="user-menu-item" on:click=move |_| ctx.logout()>
                            "Cerrar Sesión"
                        </button>
                    </div>
                </Show>
            </div>
        </header>
    }
}
