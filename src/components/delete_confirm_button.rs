//! Delete Confirm Button Component
//!
//! Trash button that turns into an inline "¿Eliminar …?" prompt naming the
//! record about to go.

use leptos::prelude::*;

const MAX_NAME_CHARS: usize = 28;

/// Prompt text; long names are cut on a char boundary
fn prompt_text(item_name: Option<&str>) -> String {
    match item_name.map(str::trim).filter(|n| !n.is_empty()) {
        None => "¿Eliminar?".to_string(),
        Some(name) if name.chars().count() > MAX_NAME_CHARS => {
            let cut: String = name.chars().take(MAX_NAME_CHARS - 1).collect();
            format!("¿Eliminar «{}…»?", cut.trim_end())
        }
        Some(name) => format!("¿Eliminar «{}»?", name),
    }
}

/// # Arguments
/// * `button_class` - CSS class for the trash button (e.g. "icon-btn danger")
/// * `item_name` - Shown in the prompt and the button tooltip
/// * `on_confirm` - Runs when the user confirms
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(optional, into)] item_name: Option<String>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let confirming = RwSignal::new(false);
    let prompt = prompt_text(item_name.as_deref());
    let tooltip = item_name.map_or_else(|| "Eliminar".to_string(), |n| format!("Eliminar {}", n));

    // Clicks stay inside the row or card that hosts the button
    let answer = move |ev: web_sys::MouseEvent, confirmed: bool| {
        ev.stop_propagation();
        confirming.set(false);
        if confirmed {
            on_confirm.run(());
        }
    };

    view! {
        <Show
            when=move || confirming.get()
            fallback=move || view! {
                <button
                    class=button_class.clone()
                    title=tooltip.clone()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        confirming.set(true);
                    }
                >
                    <i class="fas fa-trash"></i>
                </button>
            }
        >
            <span class="delete-confirm" role="group">
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button class="confirm-btn" title="Sí" on:click=move |ev| answer(ev, true)>
                    <i class="fas fa-check"></i>
                </button>
                <button class="cancel-btn" title="No" on:click=move |ev| answer(ev, false)>
                    <i class="fas fa-times"></i>
                </button>
            </span>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_text() {
        assert_eq!(prompt_text(None), "¿Eliminar?");
        assert_eq!(prompt_text(Some("  ")), "¿Eliminar?");
        assert_eq!(prompt_text(Some("Plano-Ventana.pdf")), "¿Eliminar «Plano-Ventana.pdf»?");

        let long = "Procedimiento de inspección de perfilería.docx";
        let text = prompt_text(Some(long));
        assert!(text.starts_with("¿Eliminar «Procedimiento de inspección"));
        assert!(text.ends_with("…»?"));
        assert_eq!(text.chars().count(), "¿Eliminar «".chars().count() + MAX_NAME_CHARS + 2);
    }
}
