use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::{LoginSubmit, SessionNotice, UseSessionHandle};
use crate::routes::Route;

#[derive(Properties, PartialEq)]
pub struct LoginScreenProps {
    pub navigate: Callback<Route>,
}

#[function_component(LoginScreen)]
pub fn login_screen(props: &LoginScreenProps) -> Html {
    let handle = use_context::<UseSessionHandle>().expect("session context missing");
    let email_ref = use_node_ref();
    let password_ref = use_node_ref();
    let remember_ref = use_node_ref();

    let loading = handle.session.loading;

    let on_submit = {
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        let remember_ref = remember_ref.clone();
        let on_login = handle.login.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if let (Some(email_input), Some(password_input)) = (
                email_ref.cast::<HtmlInputElement>(),
                password_ref.cast::<HtmlInputElement>(),
            ) {
                let email = email_input.value();
                let password = password_input.value();
                let remember_me = remember_ref
                    .cast::<HtmlInputElement>()
                    .map(|input| input.checked())
                    .unwrap_or(false);

                if email.trim().is_empty() || password.is_empty() {
                    return;
                }

                on_login.emit(LoginSubmit { email, password, remember_me });
            }
        })
    };

    let banner = match &handle.notice {
        Some(SessionNotice::Error(message)) => html! {
            <div class="banner banner-error" onclick={handle.dismiss_notice.reform(|_| ())}>
                {message.clone()}
            </div>
        },
        Some(SessionNotice::Info(message)) => html! {
            <div class="banner banner-info" onclick={handle.dismiss_notice.reform(|_| ())}>
                {message.clone()}
            </div>
        },
        None => html! {},
    };

    html! {
        <div class="login-screen">
            <div class="login-container">
                <div class="login-header">
                    <div class="login-logo">
                        <div class="logo-icon">{"🧳"}</div>
                    </div>
                    <h1>{"Travora"}</h1>
                    <p>{"Sign in to manage your trips"}</p>
                </div>

                { banner }

                <form class="login-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="email">{"Email"}</label>
                        <input
                            type="email"
                            id="email"
                            name="email"
                            placeholder="you@example.com"
                            ref={email_ref}
                            required=true
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">{"Password"}</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            placeholder="Your password"
                            ref={password_ref}
                            required=true
                        />
                    </div>

                    <div class="form-group form-group-inline">
                        <input
                            type="checkbox"
                            id="remember-me"
                            name="remember-me"
                            ref={remember_ref}
                        />
                        <label for="remember-me">{"Remember me"}</label>
                    </div>

                    // Re-entrant submits are not deduplicated downstream, so
                    // the button stays disabled while a call is in flight.
                    <button type="submit" class="btn-login" disabled={loading}>
                        <span class="btn-text">
                            { if loading { "Signing in..." } else { "Sign in" } }
                        </span>
                    </button>

                    <div class="login-footer">
                        <p class="register-text">{"New to Travora?"}</p>
                        <button
                            type="button"
                            class="btn-register-link"
                            onclick={props.navigate.reform(|_| Route::Register)}
                        >
                            {"Create an account"}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
