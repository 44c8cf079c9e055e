use serde::{Deserialize, Serialize};

use super::LookupId;

pub const ADMIN_ROLE: &str = "Admin";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: LookupId,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname).trim().to_string()
    }
}

/// `GET /user/me` body. Older backends put the user under `user`, newer ones under `data`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeResponse {
    pub data: Option<User>,
    pub user: Option<User>,
}

impl MeResponse {
    pub fn into_user(self) -> Option<User> {
        self.data.or(self.user)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignupRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}
