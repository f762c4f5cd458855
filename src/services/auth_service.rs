use gloo_net::http::{Request, Response};
use thiserror::Error;

use crate::models::{ApiErrorBody, LoginPayload, LoginRequest, RegisterRequest, RegisterResponse};
use crate::models::LoginResponse;
use crate::utils::jwt::DecodeError;
use crate::utils::BACKEND_URL;

pub const LOGIN_FALLBACK_MESSAGE: &str = "Login failed. Please try again.";
pub const SIGNUP_FALLBACK_MESSAGE: &str = "Registration failed. Please try again.";

/// Everything that can go wrong talking to the identity service or trusting
/// its token. `Decode` is fatal to the current session; the rest is surfaced
/// to the UI unchanged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthError {
    #[error("{0}")]
    Decode(#[from] DecodeError),
    #[error("network error: {0}")]
    Network(String),
    #[error("{0}")]
    Credential(String),
}

/// The three identity-service operations. Stateless, no retries: failures go
/// straight back to the session store. A trait so tests can swap in a mock.
#[allow(async_fn_in_trait)]
pub trait AuthGateway {
    async fn login(&self, request: &LoginRequest) -> Result<LoginPayload, AuthError>;
    async fn signup(&self, request: &RegisterRequest) -> Result<String, AuthError>;
    async fn logout(&self, token: Option<&str>) -> Result<(), AuthError>;
}

/// Production gateway over the Travora REST endpoints.
pub struct HttpAuthGateway;

impl HttpAuthGateway {
    fn endpoint(path: &str) -> String {
        format!("{}{}", BACKEND_URL, path)
    }

    /// Turn a non-2xx response into a credential error carrying the server
    /// message when one is present.
    async fn rejection(response: Response, fallback: &str) -> AuthError {
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        AuthError::Credential(message)
    }
}

impl AuthGateway for HttpAuthGateway {
    async fn login(&self, request: &LoginRequest) -> Result<LoginPayload, AuthError> {
        let response = Request::post(&Self::endpoint("/api/auth/login"))
            .json(request)
            .map_err(|e| AuthError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if response.status() != 200 {
            return Err(Self::rejection(response, LOGIN_FALLBACK_MESSAGE).await);
        }

        let body = response
            .json::<LoginResponse>()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        Ok(body.data)
    }

    async fn signup(&self, request: &RegisterRequest) -> Result<String, AuthError> {
        let response = Request::post(&Self::endpoint("/api/auth/register"))
            .json(request)
            .map_err(|e| AuthError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if response.status() != 201 {
            return Err(Self::rejection(response, SIGNUP_FALLBACK_MESSAGE).await);
        }

        let body = response
            .json::<RegisterResponse>()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        Ok(body.data.message)
    }

    async fn logout(&self, token: Option<&str>) -> Result<(), AuthError> {
        let mut request = Request::post(&Self::endpoint("/api/auth/logout"));
        if let Some(token) = token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }
        // Response body ignored; reaching the server is all that matters.
        request
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        Ok(())
    }
}
