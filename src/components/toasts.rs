//! Toast Container Component
//!
//! Renders the notification queue; each toast can be closed by hand.

use leptos::prelude::*;

use crate::notifications::Toast;
use crate::store::{store_dismiss_toast, use_app_store, AppStateStoreFields};

#[component]
pub fn ToastContainer() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-container">
            <For
                each=move || store.toasts().read().toasts().to_vec()
                key=|toast: &Toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.css_class() role="alert">
                            <i class=toast.kind.icon()></i>
                            <div class="toast-body">
                                <p class="toast-title">{toast.title}</p>
                                <p class="toast-message">{toast.message}</p>
                            </div>
                            <button
                                class="toast-close"
                                aria-label="Cerrar notificación"
                                on:click=move |_| store_dismiss_toast(&store, id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
