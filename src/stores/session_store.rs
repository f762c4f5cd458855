// ============================================================================
// SESSION STORE - The single process-wide authentication state
// ============================================================================
// Constructed once at app start with the auth gateway and the two storage
// backends, then shared by reference with every consumer. All reads and
// writes of the session go through the operations below.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{Identity, LoginRequest, Role, SignupProfile, StoredUserData};
use crate::services::auth_service::{AuthError, AuthGateway};
use crate::utils::constants::{TOKEN_STORAGE_KEY, USER_DATA_STORAGE_KEY};
use crate::utils::jwt::decode_identity;
use crate::utils::storage::{load_json, save_json, KeyValueStore};

/// Process-wide authentication state. `authenticated` holds exactly when
/// both the raw token and the decoded identity are present; there is no
/// half-authenticated state.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub identity: Option<Identity>,
    pub authenticated: bool,
    /// True during the initial restore and while a login/signup/logout call
    /// is in flight. Route decisions must wait while this is set.
    pub loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            token: None,
            identity: None,
            authenticated: false,
            loading: true,
        }
    }
}

impl Session {
    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|identity| identity.role)
    }
}

/// Overlay the persisted user-data record on top of the decoded token.
/// Stored fields win where present; the token fills every gap, so role and
/// email always fall back to the token's claims.
fn merge_identity(decoded: Identity, stored: Option<StoredUserData>) -> Identity {
    let Some(stored) = stored else {
        return decoded;
    };
    Identity {
        id: stored.id.filter(|v| !v.is_empty()).unwrap_or(decoded.id),
        username: stored
            .username
            .filter(|v| !v.is_empty())
            .unwrap_or(decoded.username),
        email: stored
            .email
            .filter(|v| !v.is_empty())
            .unwrap_or(decoded.email),
        role: stored.role.unwrap_or(decoded.role),
        contact_number: stored.contact_number.or(decoded.contact_number),
    }
}

pub struct SessionStore<G: AuthGateway> {
    gateway: G,
    /// Restore precedence order: durable backend first, session-scoped
    /// second. The durable backend wins unconditionally when both hold data.
    backends: [Rc<dyn KeyValueStore>; 2],
    session: RefCell<Session>,
}

impl<G: AuthGateway> SessionStore<G> {
    pub fn new(
        gateway: G,
        durable: Rc<dyn KeyValueStore>,
        session_scoped: Rc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            gateway,
            backends: [durable, session_scoped],
            session: RefCell::new(Session::default()),
        }
    }

    /// Snapshot of the current session for subscribers.
    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    fn durable(&self) -> &Rc<dyn KeyValueStore> {
        &self.backends[0]
    }

    fn session_scoped(&self) -> &Rc<dyn KeyValueStore> {
        &self.backends[1]
    }

    fn clear_storage(&self) {
        for backend in &self.backends {
            backend.remove(TOKEN_STORAGE_KEY);
            backend.remove(USER_DATA_STORAGE_KEY);
        }
    }

    fn set_unauthenticated(&self) {
        *self.session.borrow_mut() = Session {
            token: None,
            identity: None,
            authenticated: false,
            loading: false,
        };
    }

    fn set_authenticated(&self, token: String, identity: Identity) {
        *self.session.borrow_mut() = Session {
            token: Some(token),
            identity: Some(identity),
            authenticated: true,
            loading: false,
        };
    }

    /// Rebuild the session from whichever backend holds a token. Invoked
    /// once at startup; clears `loading` on every path. A token that no
    /// longer decodes wipes both backends so the app never starts
    /// half-authenticated.
    pub fn restore(&self) {
        let found = self
            .backends
            .iter()
            .find_map(|backend| backend.get(TOKEN_STORAGE_KEY).map(|t| (backend.clone(), t)));

        let Some((backend, token)) = found else {
            self.set_unauthenticated();
            return;
        };

        match decode_identity(&token) {
            Ok(decoded) => {
                let stored: Option<StoredUserData> =
                    load_json(backend.as_ref(), USER_DATA_STORAGE_KEY);
                let identity = merge_identity(decoded, stored);
                log::info!("✅ Session restored for {}", identity.email);
                self.set_authenticated(token, identity);
            }
            Err(e) => {
                log::warn!("🧹 Persisted token is invalid ({e}); clearing session");
                self.clear_storage();
                self.set_unauthenticated();
            }
        }
    }

    /// Authenticate against the gateway and persist the session to the
    /// backend selected by `remember_me` (durable when true). The other
    /// backend loses any stale copy so exactly one holds the pair.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<Identity, AuthError> {
        self.session.borrow_mut().loading = true;
        let result = self.login_inner(email, password, remember_me).await;
        self.session.borrow_mut().loading = false;
        result
    }

    async fn login_inner(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<Identity, AuthError> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let payload = self.gateway.login(&request).await?;

        let mut identity = decode_identity(&payload.token)?;
        // The response body is authoritative for email and role.
        if !payload.email.is_empty() {
            identity.email = payload.email.clone();
        }
        if !payload.role.is_empty() {
            identity.role = Role::parse(&payload.role);
        }

        let (target, other) = if remember_me {
            (self.durable(), self.session_scoped())
        } else {
            (self.session_scoped(), self.durable())
        };
        if let Err(e) = target.set(TOKEN_STORAGE_KEY, &payload.token) {
            log::warn!("⚠️ Could not persist token: {e}");
        }
        if let Err(e) = save_json(target.as_ref(), USER_DATA_STORAGE_KEY, &identity) {
            log::warn!("⚠️ Could not persist user data: {e}");
        }
        other.remove(TOKEN_STORAGE_KEY);
        other.remove(USER_DATA_STORAGE_KEY);

        self.set_authenticated(payload.token, identity.clone());
        log::info!("➡️ Landing at {}", self.current_dashboard_route());
        Ok(identity)
    }

    /// Register a new account. Success does not log the user in; the session
    /// is never touched here.
    pub async fn signup(&self, profile: &SignupProfile) -> Result<String, AuthError> {
        self.session.borrow_mut().loading = true;
        let request = profile.normalized();
        let result = self.gateway.signup(&request).await;
        self.session.borrow_mut().loading = false;
        result
    }

    /// Best-effort server notification, then an unconditional local clear.
    /// A backend outage never blocks logging out.
    pub async fn logout(&self) {
        self.session.borrow_mut().loading = true;
        let token = self
            .backends
            .iter()
            .find_map(|backend| backend.get(TOKEN_STORAGE_KEY));
        if let Err(e) = self.gateway.logout(token.as_deref()).await {
            log::warn!("⚠️ Logout call failed ({e}); clearing the local session anyway");
        }
        self.clear_storage();
        self.set_unauthenticated();
    }

    /// Fixed landing path per role; the generic landing page when not
    /// authenticated.
    pub fn current_dashboard_route(&self) -> &'static str {
        let session = self.session.borrow();
        match session.role() {
            Some(role) if session.authenticated => role.dashboard_path(),
            _ => "/",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LoginPayload, RegisterRequest};
    use crate::utils::jwt::encode_unsigned_token;
    use crate::utils::storage::MemoryStore;
    use futures::executor::block_on;
    use serde_json::json;

    struct MockGateway {
        login_result: RefCell<Option<Result<LoginPayload, AuthError>>>,
        signup_result: RefCell<Option<Result<String, AuthError>>>,
        logout_result: RefCell<Result<(), AuthError>>,
        signup_requests: RefCell<Vec<RegisterRequest>>,
        logout_tokens: RefCell<Vec<Option<String>>>,
    }

    impl Default for MockGateway {
        fn default() -> Self {
            Self {
                login_result: RefCell::new(None),
                signup_result: RefCell::new(None),
                logout_result: RefCell::new(Ok(())),
                signup_requests: RefCell::new(Vec::new()),
                logout_tokens: RefCell::new(Vec::new()),
            }
        }
    }

    impl AuthGateway for MockGateway {
        async fn login(&self, _request: &LoginRequest) -> Result<LoginPayload, AuthError> {
            self.login_result
                .borrow_mut()
                .take()
                .expect("unexpected login call")
        }

        async fn signup(&self, request: &RegisterRequest) -> Result<String, AuthError> {
            self.signup_requests.borrow_mut().push(request.clone());
            self.signup_result
                .borrow_mut()
                .take()
                .expect("unexpected signup call")
        }

        async fn logout(&self, token: Option<&str>) -> Result<(), AuthError> {
            self.logout_tokens
                .borrow_mut()
                .push(token.map(str::to_string));
            self.logout_result.borrow().clone()
        }
    }

    struct Fixture {
        store: SessionStore<MockGateway>,
        durable: Rc<MemoryStore>,
        scoped: Rc<MemoryStore>,
    }

    fn fixture() -> Fixture {
        let durable = Rc::new(MemoryStore::default());
        let scoped = Rc::new(MemoryStore::default());
        let durable_dyn: Rc<dyn KeyValueStore> = durable.clone();
        let scoped_dyn: Rc<dyn KeyValueStore> = scoped.clone();
        let store = SessionStore::new(MockGateway::default(), durable_dyn, scoped_dyn);
        Fixture { store, durable, scoped }
    }

    fn traveler_token() -> String {
        encode_unsigned_token(&json!({
            "sub": "x@y.com",
            "role": "TRAVELER",
            "id": "u-1",
            "username": "xavier",
        }))
    }

    fn gateway(store: &SessionStore<MockGateway>) -> &MockGateway {
        &store.gateway
    }

    #[test]
    fn restore_without_token_ends_unauthenticated() {
        let f = fixture();
        assert!(f.store.session().loading);

        f.store.restore();

        let session = f.store.session();
        assert!(!session.authenticated);
        assert!(!session.loading);
        assert_eq!(session.token, None);
        assert_eq!(session.identity, None);
    }

    #[test]
    fn restore_merges_stored_user_data_over_token_claims() {
        let f = fixture();
        let token = encode_unsigned_token(&json!({
            "sub": "token@y.com",
            "role": "ADMIN",
            "id": "u-9",
            "username": "from-token",
        }));
        f.durable.set(TOKEN_STORAGE_KEY, &token).unwrap();
        f.durable
            .set(
                USER_DATA_STORAGE_KEY,
                r#"{"username":"from-storage","contactNumber":"+111"}"#,
            )
            .unwrap();

        f.store.restore();

        let session = f.store.session();
        assert!(session.authenticated);
        let identity = session.identity.unwrap();
        // Stored fields win; role and email fall back to the token.
        assert_eq!(identity.username, "from-storage");
        assert_eq!(identity.contact_number.as_deref(), Some("+111"));
        assert_eq!(identity.email, "token@y.com");
        assert_eq!(identity.role, Role::Admin);
        assert_eq!(identity.id, "u-9");
    }

    #[test]
    fn restore_prefers_the_durable_backend() {
        let f = fixture();
        let durable_token = encode_unsigned_token(&json!({ "sub": "d@y.com", "role": "ADMIN" }));
        let scoped_token = encode_unsigned_token(&json!({ "sub": "s@y.com", "role": "TRAVELER" }));
        f.durable.set(TOKEN_STORAGE_KEY, &durable_token).unwrap();
        f.scoped.set(TOKEN_STORAGE_KEY, &scoped_token).unwrap();

        f.store.restore();

        let identity = f.store.session().identity.unwrap();
        assert_eq!(identity.email, "d@y.com");
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn restore_with_corrupt_token_wipes_both_backends() {
        let f = fixture();
        f.durable.set(TOKEN_STORAGE_KEY, "not-a-token").unwrap();
        f.durable.set(USER_DATA_STORAGE_KEY, "{}").unwrap();
        f.scoped.set(TOKEN_STORAGE_KEY, "stale").unwrap();
        f.scoped.set(USER_DATA_STORAGE_KEY, "{}").unwrap();

        f.store.restore();

        let session = f.store.session();
        assert!(!session.authenticated);
        assert!(!session.loading);
        for backend in [&f.durable, &f.scoped] {
            assert_eq!(backend.get(TOKEN_STORAGE_KEY), None);
            assert_eq!(backend.get(USER_DATA_STORAGE_KEY), None);
        }
    }

    #[test]
    fn login_with_remember_me_persists_to_the_durable_backend_only() {
        let f = fixture();
        // Stale copy in the other backend must disappear.
        f.scoped.set(TOKEN_STORAGE_KEY, "stale").unwrap();
        f.scoped.set(USER_DATA_STORAGE_KEY, "{}").unwrap();
        *gateway(&f.store).login_result.borrow_mut() = Some(Ok(LoginPayload {
            token: traveler_token(),
            email: "x@y.com".into(),
            role: "TRAVELER".into(),
        }));

        let identity = block_on(f.store.login("x@y.com", "pw", true)).unwrap();

        assert_eq!(identity.role, Role::Traveler);
        assert_eq!(identity.email, "x@y.com");
        assert!(f.durable.get(TOKEN_STORAGE_KEY).is_some());
        assert!(f.durable.get(USER_DATA_STORAGE_KEY).is_some());
        assert_eq!(f.scoped.get(TOKEN_STORAGE_KEY), None);
        assert_eq!(f.scoped.get(USER_DATA_STORAGE_KEY), None);

        let session = f.store.session();
        assert!(session.authenticated);
        assert!(!session.loading);
        assert_eq!(session.token.as_deref(), Some(traveler_token().as_str()));
    }

    #[test]
    fn login_without_remember_me_persists_to_the_session_scoped_backend_only() {
        let f = fixture();
        f.durable.set(TOKEN_STORAGE_KEY, "stale").unwrap();
        *gateway(&f.store).login_result.borrow_mut() = Some(Ok(LoginPayload {
            token: traveler_token(),
            email: "x@y.com".into(),
            role: "TRAVELER".into(),
        }));

        block_on(f.store.login("x@y.com", "pw", false)).unwrap();

        assert!(f.scoped.get(TOKEN_STORAGE_KEY).is_some());
        assert!(f.scoped.get(USER_DATA_STORAGE_KEY).is_some());
        assert_eq!(f.durable.get(TOKEN_STORAGE_KEY), None);
        assert_eq!(f.durable.get(USER_DATA_STORAGE_KEY), None);
    }

    #[test]
    fn login_failure_leaves_the_session_unauthenticated() {
        let f = fixture();
        *gateway(&f.store).login_result.borrow_mut() =
            Some(Err(AuthError::Credential("Invalid credentials".into())));

        let result = block_on(f.store.login("x@y.com", "bad", true));

        assert_eq!(
            result,
            Err(AuthError::Credential("Invalid credentials".into()))
        );
        let session = f.store.session();
        assert!(!session.authenticated);
        assert!(!session.loading);
        assert_eq!(f.durable.get(TOKEN_STORAGE_KEY), None);
    }

    #[test]
    fn login_with_undecodable_token_fails_without_authenticating() {
        let f = fixture();
        *gateway(&f.store).login_result.borrow_mut() = Some(Ok(LoginPayload {
            token: "not.a".into(),
            email: "x@y.com".into(),
            role: "ADMIN".into(),
        }));

        let result = block_on(f.store.login("x@y.com", "pw", true));

        assert!(matches!(result, Err(AuthError::Decode(_))));
        assert!(!f.store.session().authenticated);
        assert!(!f.store.session().loading);
    }

    #[test]
    fn response_email_and_role_override_token_claims() {
        let f = fixture();
        let token = encode_unsigned_token(&json!({ "sub": "old@y.com", "role": "TRAVELER" }));
        *gateway(&f.store).login_result.borrow_mut() = Some(Ok(LoginPayload {
            token,
            email: "new@y.com".into(),
            role: "HOTEL_MANAGER".into(),
        }));

        let identity = block_on(f.store.login("new@y.com", "pw", true)).unwrap();

        assert_eq!(identity.email, "new@y.com");
        assert_eq!(identity.role, Role::HotelManager);
    }

    #[test]
    fn signup_normalizes_and_never_touches_the_session() {
        let f = fixture();
        *gateway(&f.store).signup_result.borrow_mut() =
            Some(Ok("Account created".to_string()));

        let profile = SignupProfile {
            name: "  Ana  ".into(),
            email: " ana@travora.io ".into(),
            password: "pw".into(),
            role: Role::TravelAgent,
            contact_number: " +34600 ".into(),
        };
        let message = block_on(f.store.signup(&profile)).unwrap();

        assert_eq!(message, "Account created");
        let sent = gateway(&f.store).signup_requests.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].name, "Ana");
        assert_eq!(sent[0].email, "ana@travora.io");
        assert_eq!(sent[0].role, "TRAVEL_AGENT");
        assert_eq!(sent[0].contact_number, "+34600");

        let session = f.store.session();
        assert!(!session.authenticated);
        assert!(!session.loading);
    }

    #[test]
    fn logout_clears_everything_even_when_the_call_fails() {
        let f = fixture();
        *gateway(&f.store).login_result.borrow_mut() = Some(Ok(LoginPayload {
            token: traveler_token(),
            email: "x@y.com".into(),
            role: "TRAVELER".into(),
        }));
        block_on(f.store.login("x@y.com", "pw", true)).unwrap();
        *gateway(&f.store).logout_result.borrow_mut() =
            Err(AuthError::Network("gateway down".into()));

        block_on(f.store.logout());

        let session = f.store.session();
        assert!(!session.authenticated);
        assert!(!session.loading);
        for backend in [&f.durable, &f.scoped] {
            assert_eq!(backend.get(TOKEN_STORAGE_KEY), None);
            assert_eq!(backend.get(USER_DATA_STORAGE_KEY), None);
        }
    }

    #[test]
    fn logout_attaches_whichever_token_is_persisted() {
        let f = fixture();
        f.scoped.set(TOKEN_STORAGE_KEY, "scoped-token").unwrap();

        block_on(f.store.logout());

        let tokens = gateway(&f.store).logout_tokens.borrow();
        assert_eq!(*tokens, vec![Some("scoped-token".to_string())]);
    }

    #[test]
    fn dashboard_route_follows_the_authenticated_role() {
        for (claim, path) in [
            ("ADMIN", "/admin"),
            ("HOTEL_MANAGER", "/hotel-manager"),
            ("TRAVEL_AGENT", "/travel-agent"),
            ("TRAVELER", "/traveler"),
            ("SOMETHING_ELSE", "/traveler"),
        ] {
            let f = fixture();
            let token = encode_unsigned_token(&json!({ "sub": "x@y.com", "role": claim }));
            f.durable.set(TOKEN_STORAGE_KEY, &token).unwrap();
            f.store.restore();
            assert_eq!(f.store.current_dashboard_route(), path, "role {claim}");
        }
    }

    #[test]
    fn dashboard_route_is_the_landing_page_when_unauthenticated() {
        let f = fixture();
        f.store.restore();
        assert_eq!(f.store.current_dashboard_route(), "/");
    }
}
