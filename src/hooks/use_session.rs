// ============================================================================
// USE SESSION HOOK - Session store wired into Yew state
// ============================================================================
// Owns the single SessionStore instance and mirrors its Session into hook
// state after every operation, so components re-render on auth changes.
// ============================================================================

use std::rc::Rc;

use yew::prelude::*;

use crate::services::HttpAuthGateway;
use crate::stores::{Session, SessionStore};
use crate::models::SignupProfile;
use crate::utils::storage::{BrowserStorage, KeyValueStore};

pub type PortalSessionStore = SessionStore<HttpAuthGateway>;

/// Login form submission.
#[derive(Clone, PartialEq, Debug)]
pub struct LoginSubmit {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

/// One-shot message for the UI banner.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionNotice {
    Error(String),
    Info(String),
}

#[derive(Clone)]
pub struct UseSessionHandle {
    pub session: Session,
    pub notice: Option<SessionNotice>,
    pub login: Callback<LoginSubmit>,
    pub signup: Callback<SignupProfile>,
    pub logout: Callback<()>,
    pub dismiss_notice: Callback<()>,
}

impl PartialEq for UseSessionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.session == other.session && self.notice == other.notice
    }
}

#[hook]
pub fn use_session() -> UseSessionHandle {
    let store: Rc<PortalSessionStore> = use_memo((), |_| {
        let durable: Rc<dyn KeyValueStore> = Rc::new(BrowserStorage::durable());
        let session_scoped: Rc<dyn KeyValueStore> = Rc::new(BrowserStorage::session_scoped());
        SessionStore::new(HttpAuthGateway, durable, session_scoped)
    });

    let session = use_state(|| store.session());
    let notice = use_state(|| None::<SessionNotice>);

    // Restore the persisted session once on mount.
    {
        let store = store.clone();
        let session = session.clone();
        use_effect_with((), move |_| {
            store.restore();
            session.set(store.session());
            || ()
        });
    }

    let login = {
        let store = store.clone();
        let session = session.clone();
        let notice = notice.clone();
        Callback::from(move |submit: LoginSubmit| {
            let store = store.clone();
            let session = session.clone();
            let notice = notice.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let mut pending = store.session();
                pending.loading = true;
                session.set(pending);

                match store
                    .login(&submit.email, &submit.password, submit.remember_me)
                    .await
                {
                    Ok(identity) => {
                        log::info!("✅ Logged in as {} ({})", identity.email, identity.role.as_str());
                        notice.set(None);
                    }
                    Err(e) => {
                        log::error!("❌ Login failed: {e}");
                        notice.set(Some(SessionNotice::Error(e.to_string())));
                    }
                }
                session.set(store.session());
            });
        })
    };

    let signup = {
        let store = store.clone();
        let session = session.clone();
        let notice = notice.clone();
        Callback::from(move |profile: SignupProfile| {
            let store = store.clone();
            let session = session.clone();
            let notice = notice.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let mut pending = store.session();
                pending.loading = true;
                session.set(pending);

                match store.signup(&profile).await {
                    Ok(message) => {
                        log::info!("✅ Account registered: {message}");
                        notice.set(Some(SessionNotice::Info(message)));
                    }
                    Err(e) => {
                        log::error!("❌ Registration failed: {e}");
                        notice.set(Some(SessionNotice::Error(e.to_string())));
                    }
                }
                session.set(store.session());
            });
        })
    };

    let logout = {
        let store = store.clone();
        let session = session.clone();
        let notice = notice.clone();
        Callback::from(move |_| {
            let store = store.clone();
            let session = session.clone();
            let notice = notice.clone();
            wasm_bindgen_futures::spawn_local(async move {
                store.logout().await;
                log::info!("👋 Session closed");
                notice.set(None);
                session.set(store.session());
            });
        })
    };

    let dismiss_notice = {
        let notice = notice.clone();
        Callback::from(move |_| notice.set(None))
    };

    UseSessionHandle {
        session: (*session).clone(),
        notice: (*notice).clone(),
        login,
        signup,
        logout,
        dismiss_notice,
    }
}
