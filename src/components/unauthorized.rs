use yew::prelude::*;

use crate::hooks::UseSessionHandle;
use crate::routes::{landing_for, Route};

#[derive(Properties, PartialEq)]
pub struct UnauthorizedScreenProps {
    pub navigate: Callback<Route>,
}

#[function_component(UnauthorizedScreen)]
pub fn unauthorized_screen(props: &UnauthorizedScreenProps) -> Html {
    let handle = use_context::<UseSessionHandle>().expect("session context missing");
    let home = landing_for(&handle.session);

    html! {
        <div class="unauthorized-screen">
            <div class="unauthorized-card">
                <div class="logo-icon">{"🚫"}</div>
                <h1>{"No access"}</h1>
                <p>{"Your account is not allowed to view this page."}</p>
                <button
                    class="btn-primary"
                    onclick={props.navigate.reform(move |_| home)}
                >
                    {"Back to my dashboard"}
                </button>
            </div>
        </div>
    }
}
