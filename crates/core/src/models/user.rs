use serde::{Deserialize, Serialize};

use super::lenient::{bool_or_false, null_as_default, opt_f64_lenient, string_or_empty};

/// Account role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
    Owner,
}

impl Role {
    /// Admins and the owner may use the admin panel.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::Owner)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "USER"),
            Role::Admin => write!(f, "ADMIN"),
            Role::Owner => write!(f, "OWNER"),
        }
    }
}

/// A user profile, as returned by `GET /profile` and `GET /admin/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub username: String,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub email: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub role: Role,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub monthly_income: Option<f64>,

    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub savings: Option<f64>,

    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub target_expenses: Option<f64>,

    #[serde(default, deserialize_with = "bool_or_false")]
    pub banned: bool,

    #[serde(default, deserialize_with = "bool_or_false")]
    pub admin_approved: bool,
}

impl User {
    /// "First Last" when either name is known, otherwise the username.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            self.username.clone()
        } else {
            parts.join(" ")
        }
    }
}

/// Partial profile update for `PUT /profile`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_expenses: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,

    /// Requesting `ADMIN` files an admin request that an owner must approve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}
