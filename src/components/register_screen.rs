use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::hooks::{SessionNotice, UseSessionHandle};
use crate::models::{Role, SignupProfile};
use crate::routes::Route;

#[derive(Properties, PartialEq)]
pub struct RegisterScreenProps {
    pub navigate: Callback<Route>,
}

#[function_component(RegisterScreen)]
pub fn register_screen(props: &RegisterScreenProps) -> Html {
    let handle = use_context::<UseSessionHandle>().expect("session context missing");
    let name_ref = use_node_ref();
    let email_ref = use_node_ref();
    let password_ref = use_node_ref();
    let role_ref = use_node_ref();
    let contact_ref = use_node_ref();

    let loading = handle.session.loading;

    let on_submit = {
        let name_ref = name_ref.clone();
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        let role_ref = role_ref.clone();
        let contact_ref = contact_ref.clone();
        let on_signup = handle.signup.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let (Some(name_input), Some(email_input), Some(password_input)) = (
                name_ref.cast::<HtmlInputElement>(),
                email_ref.cast::<HtmlInputElement>(),
                password_ref.cast::<HtmlInputElement>(),
            ) else {
                return;
            };

            let name = name_input.value();
            let email = email_input.value();
            let password = password_input.value();
            if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
                return;
            }

            let role = role_ref
                .cast::<HtmlSelectElement>()
                .map(|select| Role::parse(&select.value()))
                .unwrap_or(Role::Traveler);
            let contact_number = contact_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();

            on_signup.emit(SignupProfile { name, email, password, role, contact_number });
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
        <div class="register-screen">
            <div class="register-container">
                <div class="register-header">
                    <div class="logo-icon">{"🧳"}</div>
                    <h1>{"Join Travora"}</h1>
                    <p>{"Create your account"}</p>
                </div>

                { banner }

                <form class="register-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="name">{"Full name"}</label>
                        <input
                            type="text"
                            id="name"
                            name="name"
                            placeholder="Your full name"
                            ref={name_ref}
                            required=true
                        />
                    </div>

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
                            placeholder="Choose a password"
                            ref={password_ref}
                            required=true
                        />
                    </div>

                    <div class="form-group">
                        <label for="role">{"I am a"}</label>
                        <select id="role" name="role" ref={role_ref}>
                            <option value="traveler" selected=true>{"Traveler"}</option>
                            <option value="hotel_manager">{"Hotel manager"}</option>
                            <option value="travel_agent">{"Travel agent"}</option>
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="contact">{"Contact number"}</label>
                        <input
                            type="tel"
                            id="contact"
                            name="contact"
                            placeholder="+33 ..."
                            ref={contact_ref}
                        />
                    </div>

                    <button type="submit" class="btn-register" disabled={loading}>
                        <span class="btn-text">
                            { if loading { "Creating account..." } else { "Create account" } }
                        </span>
                    </button>

                    <div class="register-footer">
                        <p>{"Already have an account?"}</p>
                        <button
                            type="button"
                            class="btn-login-link"
                            onclick={props.navigate.reform(|_| Route::Login)}
                        >
                            {"Sign in"}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
