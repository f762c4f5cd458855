// Role dashboards. Thin placeholders: each page is plain data display over
// its own REST endpoints and takes no part in the auth core.

use yew::prelude::*;

use crate::hooks::UseSessionHandle;

#[derive(Properties, PartialEq)]
struct DashboardFrameProps {
    title: AttrValue,
    subtitle: AttrValue,
    children: Children,
}

#[function_component(DashboardFrame)]
fn dashboard_frame(props: &DashboardFrameProps) -> Html {
    let handle = use_context::<UseSessionHandle>().expect("session context missing");
    let identity = handle.session.identity.clone();

    let greeting = identity
        .as_ref()
        .map(|identity| {
            if identity.username.is_empty() {
                identity.email.clone()
            } else {
                identity.username.clone()
            }
        })
        .unwrap_or_default();

    html! {
        <div class="dashboard">
            <header class="dashboard-header">
                <div class="dashboard-title">
                    <h1>{ props.title.clone() }</h1>
                    <p>{ props.subtitle.clone() }</p>
                </div>
                <div class="dashboard-user">
                    <span class="user-name">{ greeting }</span>
                    <button class="btn-logout" onclick={handle.logout.reform(|_| ())}>
                        {"Sign out"}
                    </button>
                </div>
            </header>
            <main class="dashboard-content">
                { props.children.clone() }
            </main>
        </div>
    }
}

#[function_component(TravelerDashboard)]
pub fn traveler_dashboard() -> Html {
    html! {
        <DashboardFrame title="My trips" subtitle="Bookings, packages and reviews">
            <section class="dashboard-section">{"Your upcoming bookings will appear here."}</section>
        </DashboardFrame>
    }
}

#[function_component(AdminDashboard)]
pub fn admin_dashboard() -> Html {
    html! {
        <DashboardFrame title="Administration" subtitle="Users, listings and support tickets">
            <section class="dashboard-section">{"Platform overview will appear here."}</section>
        </DashboardFrame>
    }
}

#[function_component(HotelManagerDashboard)]
pub fn hotel_manager_dashboard() -> Html {
    html! {
        <DashboardFrame title="Hotel manager" subtitle="Your properties and reservations">
            <section class="dashboard-section">{"Your hotels will appear here."}</section>
        </DashboardFrame>
    }
}

#[function_component(TravelAgentDashboard)]
pub fn travel_agent_dashboard() -> Html {
    html! {
        <DashboardFrame title="Travel agent" subtitle="Packages and customer itineraries">
            <section class="dashboard-section">{"Your packages will appear here."}</section>
        </DashboardFrame>
    }
}
