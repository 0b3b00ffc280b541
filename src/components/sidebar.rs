//! Sidebar Component
//!
//! Navigation tree with collapsible groups.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::nav::{NavItem, NAV_ITEMS};

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <aside class="sidebar">
            <div class="sidebar-brand">
                <i class="fas fa-industry"></i>
                <span class="sidebar-label">"ALCO Calidad"</span>
            </div>
            <nav class="sidebar-nav">
                {NAV_ITEMS.iter().map(|item| view! { <SidebarEntry item=*item /> }).collect_view()}
            </nav>
            <button class="sidebar-logout" on:click=move |_| ctx.logout()>
                <i class="fas fa-sign-out-alt"></i>
                <span class="sidebar-label">"Cerrar Sesión"</span>
            </button>
        </aside>
    }
}

#[component]
fn SidebarLink(item: NavItem) -> impl IntoView {
    let ctx = use_app_context();
    let path = item.path;
    let is_active = move || ctx.current_path.with(|p| p == path);

    view! {
        <button
            class=move || if is_active() { "sidebar-link active" } else { "sidebar-link" }
            on:click=move |_| ctx.navigate(path)
        >
            <i class=item.icon></i>
            <span class="sidebar-label">{item.label}</span>
        </button>
    }
}

#[component]
fn SidebarEntry(item: NavItem) -> impl IntoView {
    let ctx = use_app_context();
    let path = item.path;

    if item.children.is_empty() {
        return view! { <SidebarLink item=item /> }.into_any();
    }

    // Groups start open when one of their pages is current
    let (expanded, set_expanded) = signal(ctx.current_path.with_untracked(|p| p.starts_with(path)));

    view! {
        <div class="sidebar-group">
            <button class="sidebar-link" on:click=move |_| set_expanded.update(|e| *e = !*e)>
                <i class=item.icon></i>
                <span class="sidebar-label">{item.label}</span>
                <i class=move || if expanded.get() { "fas fa-chevron-down rotated" } else { "fas fa-chevron-down" }></i>
            </button>
            <Show when=move || expanded.get()>
                <div class="sidebar-children">
                    {item.children.iter().map(|child| view! { <SidebarLink item=*child /> }).collect_view()}
                </div>
            </Show>
        </div>
    }
    .into_any()
}
