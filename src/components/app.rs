use yew::prelude::*;

use crate::components::dashboards::{
    AdminDashboard, HotelManagerDashboard, TravelAgentDashboard, TravelerDashboard,
};
use crate::components::login_screen::LoginScreen;
use crate::components::register_screen::RegisterScreen;
use crate::components::unauthorized::UnauthorizedScreen;
use crate::hooks::{SessionContextProvider, UseSessionHandle};
use crate::routes::{check_access, landing_for, Access, Route};

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <SessionContextProvider>
            <PortalShell />
        </SessionContextProvider>
    }
}

/// Initial route from the browser location, falling back to the landing
/// page for unknown paths.
fn initial_route() -> Route {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .and_then(|path| Route::from_path(&path))
        .unwrap_or(Route::Landing)
}

#[function_component(PortalShell)]
fn portal_shell() -> Html {
    let handle = use_context::<UseSessionHandle>().expect("session context missing");
    let route = use_state(initial_route);

    // Once the session is authenticated (login or restore), leave the public
    // pages for the role dashboard.
    {
        let route = route.clone();
        use_effect_with(handle.session.clone(), move |session| {
            if session.authenticated && matches!(*route, Route::Landing | Route::Login) {
                route.set(landing_for(session));
            }
            || ()
        });
    }

    let navigate = {
        let route = route.clone();
        Callback::from(move |target: Route| route.set(target))
    };

    // The guard never decides while the session is restoring; nothing is
    // rendered either, so no pre-redirect flash of the public pages.
    if handle.session.loading {
        return html! { <LoadingScreen /> };
    }

    match check_access(&handle.session, *route) {
        Access::Pending => html! { <LoadingScreen /> },
        Access::Denied { redirect } => render_route(redirect, &handle, &navigate),
        Access::Granted => render_route(*route, &handle, &navigate),
    }
}

fn render_route(route: Route, handle: &UseSessionHandle, navigate: &Callback<Route>) -> Html {
    match route {
        Route::Landing => html! { <LandingScreen navigate={navigate.clone()} /> },
        Route::Login => html! { <LoginScreen navigate={navigate.clone()} /> },
        Route::Register => html! { <RegisterScreen navigate={navigate.clone()} /> },
        Route::Unauthorized => html! { <UnauthorizedScreen navigate={navigate.clone()} /> },
        Route::Traveler => html! { <TravelerDashboard /> },
        Route::Admin => html! { <AdminDashboard /> },
        Route::HotelManager => html! { <HotelManagerDashboard /> },
        Route::TravelAgent => html! { <TravelAgentDashboard /> },
    }
}

#[function_component(LoadingScreen)]
fn loading_screen() -> Html {
    html! {
        <div class="loading-screen">
            <div class="spinner"></div>
            <p>{"Loading your session..."}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct LandingScreenProps {
    navigate: Callback<Route>,
}

#[function_component(LandingScreen)]
fn landing_screen(props: &LandingScreenProps) -> Html {
    html! {
        <div class="landing-screen">
            <div class="landing-hero">
                <div class="logo-icon">{"🧳"}</div>
                <h1>{"Travora"}</h1>
                <p>{"Hotels, flights and packages in one place"}</p>
            </div>
            <div class="landing-actions">
                <button
                    class="btn-primary"
                    onclick={props.navigate.reform(|_| Route::Login)}
                >
                    {"Sign in"}
                </button>
                <button
                    class="btn-secondary"
                    onclick={props.navigate.reform(|_| Route::Register)}
                >
                    {"Create an account"}
                </button>
            </div>
        </div>
    }
}
