// ============================================================================
// ENDPOINTS - REST surface of the course tracker API
// ============================================================================

use super::http::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
}

impl Endpoint {
    pub const fn get(path: &'static str) -> Self {
        Self { method: Method::Get, path }
    }

    pub const fn post(path: &'static str) -> Self {
        Self { method: Method::Post, path }
    }
}

/// Session check (cookie based)
pub const USER_ME: Endpoint = Endpoint::get("/user/me");
pub const USER_LOGIN: Endpoint = Endpoint::post("/user/login");
pub const USER_SIGNUP: Endpoint = Endpoint::post("/user/signup");

pub const UNIVERSITIES: Endpoint = Endpoint::get("/universities");
/// Paginated course search: universityId, fieldId, specializationId, level, duration, page, limit
pub const COURSE_SEARCH: Endpoint = Endpoint::get("/universities/search");
pub const COURSE_ADD: Endpoint = Endpoint::post("/universities/add");
/// Multipart, part name `file`
pub const COURSE_UPLOAD: Endpoint = Endpoint::post("/universities/upload");

pub const FIELDS: Endpoint = Endpoint::get("/fields");
/// `?fieldId=`
pub const SPECIALIZATIONS: Endpoint = Endpoint::get("/specializations");

pub const SUBSCRIPTION: Endpoint = Endpoint::post("/subscription");
/// `?email=`
pub const NOTIFICATIONS: Endpoint = Endpoint::get("/notifications");
/// `?id=`
pub const NOTIFICATION_READ: Endpoint = Endpoint::get("/notifications/read");
