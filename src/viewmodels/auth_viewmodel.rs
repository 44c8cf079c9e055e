// ============================================================================
// AUTH VIEWMODEL - Login, signup and logout
// ============================================================================
// Login and signup write the session directly on success (cookie sentinel +
// returned user). Only the session bootstrap writes it from `/user/me`.
// ============================================================================

use super::SubmitError;
use crate::hooks::{use_fetch, FetchOutcome, UseFetchHandle};
use crate::models::{LoginRequest, MeResponse, Navigation, Route, SignupRequest, User};
use crate::state::{AppContext, SESSION_TOKEN_SENTINEL};
use crate::services::endpoints;
use crate::utils::validation::is_valid_email;
use crate::utils::{FieldErrors, MIN_PASSWORD_LENGTH};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        if errors.require("email", &self.email, "Email is required") && !is_valid_email(&self.email) {
            errors.add("email", "Invalid email");
        }
        errors.require("password", &self.password, "Password is required");
        errors.into_result()?;

        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<SignupRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("firstname", &self.firstname, "First name required");
        errors.require("lastname", &self.lastname, "Last name required");
        if errors.require("email", &self.email, "Email required") && !is_valid_email(&self.email) {
            errors.add("email", "Invalid");
        }
        if errors.require("password", &self.password, "Password required")
            && self.password.chars().count() < MIN_PASSWORD_LENGTH
        {
            errors.add("password", "Password must be at least 4 characters");
        }
        if self.confirm_password != self.password || self.confirm_password.is_empty() {
            errors.add("confirmPassword", "Doesn't match");
        }
        errors.into_result()?;

        Ok(SignupRequest {
            firstname: self.firstname.trim().to_string(),
            lastname: self.lastname.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Clone)]
pub struct AuthViewModel {
    ctx: AppContext,
    login: UseFetchHandle<MeResponse>,
    signup: UseFetchHandle<MeResponse>,
}

impl AuthViewModel {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            ctx: ctx.clone(),
            login: use_fetch(ctx, endpoints::USER_LOGIN, false),
            signup: use_fetch(ctx, endpoints::USER_SIGNUP, false),
        }
    }

    pub async fn login(&self, form: &LoginForm) -> Result<Option<User>, SubmitError> {
        let request = form.validate().map_err(SubmitError::Invalid)?;
        log::info!("🔐 [AUTH] Logging in {}", request.email);
        let outcome = self.login.fetch_json(&request, None).await;
        self.finish(outcome)
    }

    pub async fn signup(&self, form: &SignupForm) -> Result<Option<User>, SubmitError> {
        let request = form.validate().map_err(SubmitError::Invalid)?;
        log::info!("📝 [AUTH] Signing up {}", request.email);
        let outcome = self.signup.fetch_json(&request, None).await;
        self.finish(outcome)
    }

    /// Drops the session and goes back to the search page
    pub fn logout(&self) -> Route {
        log::info!("👋 [AUTH] Logout");
        self.ctx.auth.clear_auth();
        self.ctx
            .router
            .navigate(Navigation::to(Route::Search), &self.ctx.auth.get())
    }

    pub fn submitting(&self) -> bool {
        self.login.loading() || self.signup.loading()
    }

    fn finish(&self, outcome: FetchOutcome<MeResponse>) -> Result<Option<User>, SubmitError> {
        match outcome {
            FetchOutcome::Data(body) => {
                let user = body.into_user();
                self.ctx.auth.set_auth(SESSION_TOKEN_SENTINEL, user.clone());
                match &user {
                    Some(user) => log::info!("✅ [AUTH] Session started for {}", user.display_name()),
                    None => log::info!("✅ [AUTH] Session started"),
                }
                self.ctx
                    .router
                    .navigate(Navigation::to(Route::Search), &self.ctx.auth.get());
                Ok(user)
            }
            FetchOutcome::Error(message) => {
                self.ctx.notices.error(&message);
                Err(SubmitError::Failed(message))
            }
            FetchOutcome::Superseded => Ok(None),
        }
    }
}
