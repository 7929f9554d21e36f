//! Login page: email + password form, error banner and signed-in view.
//!
//! All decisions live in [`LoginForm`]; this component only binds DOM
//! events to it and renders its state.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::net::api::AuthClient;
#[cfg(feature = "csr")]
use crate::state::login_form::exchange;
use crate::state::login_form::{Field, LoginForm, Screen};

#[cfg(feature = "csr")]
type PageClient = AuthClient<crate::session::store::LocalStorage, crate::net::transport::GlooTransport>;
#[cfg(not(feature = "csr"))]
type PageClient = AuthClient<crate::session::store::MemoryStore, crate::net::transport::OfflineTransport>;

#[cfg(feature = "csr")]
fn page_client(config: &ClientConfig) -> PageClient {
    AuthClient::browser(config)
}

#[cfg(not(feature = "csr"))]
fn page_client(config: &ClientConfig) -> PageClient {
    AuthClient::new(
        config.api_base_url.clone(),
        crate::session::store::MemoryStore::new(),
        crate::net::transport::OfflineTransport,
    )
}

/// No executor outside the browser: a submit settles as an offline failure
/// so the form returns to `Idle`.
#[cfg(not(feature = "csr"))]
fn offline_login_result() -> Result<crate::net::types::AuthResponse, crate::error::AuthError> {
    Err(crate::error::AuthError::Transport {
        detail: "not available outside the browser".to_owned(),
        fallback: crate::net::api::LOGIN_FALLBACK.to_owned(),
    })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let config = use_context::<ClientConfig>().unwrap_or_default();
    let form = RwSignal::new(LoginForm::new());

    view! {
        <div class="login-page">
            <h1 class="login-page__title">"BUDGET - ESP"</h1>
            <div class="login-card">
                {move || match form.with(LoginForm::screen) {
                    Screen::Form => view! { <LoginFormView form=form config=config.clone()/> }.into_any(),
                    Screen::Authenticated => view! { <SignedInView form=form config=config.clone()/> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn LoginFormView(form: RwSignal<LoginForm>, config: ClientConfig) -> impl IntoView {
    let submitting = move || form.with(LoginForm::is_submitting);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(Ok(credentials)) = form.try_update(LoginForm::begin_submit) else {
            return;
        };

        #[cfg(feature = "csr")]
        {
            let config = config.clone();
            leptos::task::spawn_local(async move {
                let client = page_client(&config);
                let result = exchange(&client, &credentials).await;
                let outcome = form.try_update(|f| f.finish_submit(result, &config.redirect_url));
                if let Some(crate::state::login_form::SubmitOutcome::Redirect(url)) = outcome {
                    crate::util::redirect::navigate(&url);
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = credentials;
            form.update(|f| {
                f.finish_submit(offline_login_result(), &config.redirect_url);
            });
        }
    };

    view! {
        <h2 class="login-card__heading">"Authentification"</h2>
        <Show when=move || form.with(|f| f.banner().is_some())>
            <p class="login-banner" role="alert">
                {move || form.with(|f| f.banner().unwrap_or_default().to_owned())}
            </p>
        </Show>
        <form class="login-form" novalidate=true on:submit=on_submit>
            <FieldInput form=form field=Field::Email label="Email" input_type="email"/>
            <FieldInput form=form field=Field::Password label="Mot de passe" input_type="password"/>
            <button class="login-button" type="submit" disabled=submitting>
                {move || if submitting() { "Connexion..." } else { "Se connecter" }}
            </button>
        </form>
        <button
            class="login-link"
            type="button"
            on:click=move |_| form.update(LoginForm::on_forgot_password)
        >
            "Mot de passe oublié ?"
        </button>
        <Show when=move || form.with(|f| f.notice.is_some())>
            <p class="login-message">{move || form.with(|f| f.notice.clone().unwrap_or_default())}</p>
        </Show>
    }
}

#[component]
fn FieldInput(
    form: RwSignal<LoginForm>,
    field: Field,
    label: &'static str,
    input_type: &'static str,
) -> impl IntoView {
    let error = move || form.with(|f| f.field_error(field).map(str::to_owned));
    let class = move || if error().is_some() { "login-field login-field--error" } else { "login-field" };

    view! {
        <label class=class>
            <span class="login-field__label">{label}</span>
            <input
                class="login-input"
                id=field.name()
                name=field.name()
                type=input_type
                prop:value=move || form.with(|f| f.fields.get(field).to_owned())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| f.on_field_change(field, value));
                }
            />
            <Show when=move || error().is_some()>
                <span class="login-field__helper">{move || error().unwrap_or_default()}</span>
            </Show>
        </label>
    }
}

#[component]
fn SignedInView(form: RwSignal<LoginForm>, config: ClientConfig) -> impl IntoView {
    let user = move || {
        form.with(|f| {
            f.auth
                .user
                .as_ref()
                .map(|u| serde_json::to_string_pretty(u).unwrap_or_else(|_| u.to_string()))
                .unwrap_or_default()
        })
    };

    let on_logout = move |_| {
        let client = page_client(&config);
        form.update(|f| f.on_logout(&client));
    };

    view! {
        <h2 class="login-card__heading">"Connecté"</h2>
        <pre class="login-user">{user}</pre>
        <button class="login-button" type="button" on:click=on_logout>
            "Se déconnecter"
        </button>
    }
}
