//! Breadcrumbs Component

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::nav;

/// Trail for the current path; parent entries are links
#[component]
pub fn Breadcrumbs() -> impl IntoView {
    let ctx = use_app_context();
    let crumbs = move || nav::breadcrumbs(&ctx.current_path.get());

    view! {
        <nav class="breadcrumbs" aria-label="breadcrumb">
            <ol>
                {move || crumbs().into_iter().enumerate().map(|(i, crumb)| {
                    let link = crumb.path.map(|path| view! {
                        <a class="crumb-link" href="#" on:click=move |ev| {
                            ev.prevent_default();
                            ctx.navigate(path);
                        }>{crumb.label}</a>
                    });
                    view! {
                        <li class="crumb">
                            {(i > 0).then(|| view! { <span class="crumb-sep">"/"</span> })}
                            {match link {
                                Some(link) => link.into_any(),
                                None => view! { <span class="crumb-current">{crumb.label}</span> }.into_any(),
                            }}
                        </li>
                    }
                }).collect_view()}
            </ol>
        </nav>
    }
}
