//! Login Page Component
//!
//! Login and registration against the session user list.

use leptos::prelude::*;

use crate::auth;
use crate::context::use_app_context;
use crate::store::{store_next_id, use_app_store, AppStateStoreFields};

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (registering, set_registering) = signal(false);
    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        let (email, password) = (email.get(), password.get());

        if registering.get() {
            let id = store_next_id(&store).to_string();
            let result = auth::register(&mut store.users().write(), &username.get(), &email, &password, id);
            match result {
                Ok(user) => ctx.login(user),
                Err(e) => set_error.set(Some(format!("No se pudo registrar: {}", e))),
            }
        } else {
            let result = auth::authenticate(&store.users().read(), &email, &password);
            match result {
                Ok(user) => ctx.login(user),
                Err(_) => set_error.set(Some("Correo o contraseña incorrectos".to_string())),
            }
        }
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=on_submit>
                <h1 class="login-title">"Sistema de Gestión de Calidad"</h1>
                <p class="login-subtitle">
                    {move || if registering.get() { "Crear una cuenta" } else { "Iniciar sesión" }}
                </p>

                <Show when=move || registering.get()>
                    <label class="form-label" for="username">"Usuario"</label>
                    <input
                        id="username"
                        class="form-input"
                        type="text"
                        required
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                </Show>

                <label class="form-label" for="email">"Correo"</label>
                <input
                    id="email"
                    class="form-input"
                    type="email"
                    required
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />

                <label class="form-label" for="password">"Contraseña"</label>
                <input
                    id="password"
                    class="form-input"
                    type="password"
                    required
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />

                {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}

                <button type="submit" class="btn btn-primary btn-block">
                    {move || if registering.get() { "Registrarse" } else { "Ingresar" }}
                </button>
                <button
                    type="button"
                    class="btn-link"
                    on:click=move |_| {
                        set_error.set(None);
                        set_registering.update(|r| *r = !*r);
                    }
                >
                    {move || if registering.get() { "¿Ya tienes cuenta? Inicia sesión" } else { "¿No tienes cuenta? Regístrate" }}
                </button>
            </form>
        </div>
    }
}
