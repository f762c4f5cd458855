use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Roles known to the portal. Anything the identity service reports outside
/// this set is treated as a plain traveler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Traveler,
    Admin,
    HotelManager,
    TravelAgent,
}

impl Role {
    /// Parse a role string from a token claim or API response. Matching is
    /// case-insensitive; unknown values collapse to [`Role::Traveler`].
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "admin" => Role::Admin,
            "hotel_manager" => Role::HotelManager,
            "travel_agent" => Role::TravelAgent,
            _ => Role::Traveler,
        }
    }

    /// Canonical lower-case form used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Traveler => "traveler",
            Role::Admin => "admin",
            Role::HotelManager => "hotel_manager",
            Role::TravelAgent => "travel_agent",
        }
    }

    /// Upper-case wire form the registration endpoint expects.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Role::Traveler => "TRAVELER",
            Role::Admin => "ADMIN",
            Role::HotelManager => "HOTEL_MANAGER",
            Role::TravelAgent => "TRAVEL_AGENT",
        }
    }

    /// Home dashboard path for this role.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Traveler => "/traveler",
            Role::Admin => "/admin",
            Role::HotelManager => "/hotel-manager",
            Role::TravelAgent => "/travel-agent",
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Role::parse(&value))
    }
}

/// Decoded user attributes. Built once per login or restore; a new login
/// builds a new value, never mutates the old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(
        default,
        rename = "contactNumber",
        skip_serializing_if = "Option::is_none"
    )]
    pub contact_number: Option<String>,
}

/// Tolerant view of the persisted user-data object. Every field optional so
/// a partial or older record still restores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredUserData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default, rename = "contactNumber")]
    pub contact_number: Option<String>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub data: LoginPayload,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginPayload {
    pub token: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    #[serde(rename = "contactNumber")]
    pub contact_number: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    pub data: RegisterPayload,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterPayload {
    pub message: String,
}

/// Error body the gateway sends on non-2xx responses. Best-effort parse.
#[derive(Clone, Default, Deserialize, Debug)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Signup form data exactly as entered. Normalized once, right before the
/// register call.
#[derive(Clone, PartialEq, Debug)]
pub struct SignupProfile {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub contact_number: String,
}

impl SignupProfile {
    /// Trim the free-text fields and upper-case the role for the wire.
    pub fn normalized(&self) -> RegisterRequest {
        RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role.as_api_str().to_string(),
            contact_number: self.contact_number.trim().to_string(),
        }
    }
}
