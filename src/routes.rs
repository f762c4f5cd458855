// ============================================================================
// ROUTES & ROUTE GUARD - Role-scoped access to the portal views
// ============================================================================

use crate::models::Role;
use crate::stores::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Register,
    Unauthorized,
    Traveler,
    Admin,
    HotelManager,
    TravelAgent,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Unauthorized => "/unauthorized",
            Route::Traveler => "/traveler",
            Route::Admin => "/admin",
            Route::HotelManager => "/hotel-manager",
            Route::TravelAgent => "/travel-agent",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        match path.trim_end_matches('/') {
            "" => Some(Route::Landing),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            "/unauthorized" => Some(Route::Unauthorized),
            "/traveler" => Some(Route::Traveler),
            "/admin" => Some(Route::Admin),
            "/hotel-manager" => Some(Route::HotelManager),
            "/travel-agent" => Some(Route::TravelAgent),
            _ => None,
        }
    }

    /// Roles allowed on this route; `None` means public.
    pub fn allowed_roles(self) -> Option<&'static [Role]> {
        match self {
            Route::Traveler => Some(&[Role::Traveler]),
            Route::Admin => Some(&[Role::Admin]),
            Route::HotelManager => Some(&[Role::HotelManager]),
            Route::TravelAgent => Some(&[Role::TravelAgent]),
            _ => None,
        }
    }
}

/// Outcome of a guard check. `Pending` is returned while the session is
/// still loading: role is not known yet, so nothing may be decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied { redirect: Route },
    Pending,
}

/// True only when the session is authenticated with one of the allowed
/// roles.
pub fn can_access(session: &Session, allowed: &[Role]) -> bool {
    if !session.authenticated {
        return false;
    }
    session
        .role()
        .map(|role| allowed.contains(&role))
        .unwrap_or(false)
}

/// Full guard decision for a route: public routes are always granted;
/// protected routes deny to the login page when unauthenticated and to the
/// unauthorized page when the role does not match.
pub fn check_access(session: &Session, route: Route) -> Access {
    let Some(allowed) = route.allowed_roles() else {
        return Access::Granted;
    };
    if session.loading {
        return Access::Pending;
    }
    if !session.authenticated {
        return Access::Denied { redirect: Route::Login };
    }
    if can_access(session, allowed) {
        Access::Granted
    } else {
        Access::Denied { redirect: Route::Unauthorized }
    }
}

/// Default landing route for the current session: the role dashboard when
/// authenticated, the public landing page otherwise.
pub fn landing_for(session: &Session) -> Route {
    if !session.authenticated {
        return Route::Landing;
    }
    match session.role() {
        Some(Role::Admin) => Route::Admin,
        Some(Role::HotelManager) => Route::HotelManager,
        Some(Role::TravelAgent) => Route::TravelAgent,
        _ => Route::Traveler,
    }
}
