// ============================================================================
// VIEWMODELS - Page controllers
// ============================================================================
// Each page owns its fetch handles and reads/writes the shared stores through
// the `AppContext` it was built with.
// ============================================================================

pub mod auth_viewmodel;
pub mod lookups_viewmodel;
pub mod manage_viewmodel;
pub mod notifications_viewmodel;
pub mod results_viewmodel;
pub mod search_viewmodel;

pub use auth_viewmodel::{AuthViewModel, LoginForm, SignupForm};
pub use lookups_viewmodel::LookupsViewModel;
pub use manage_viewmodel::{CourseField, CourseForm, ManageTab, ManageViewModel};
pub use notifications_viewmodel::NotificationsViewModel;
pub use results_viewmodel::{ResultsState, ResultsViewModel};
pub use search_viewmodel::SearchViewModel;

use thiserror::Error;

use crate::utils::FieldErrors;

/// Why a form submission did not go through
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// Client-side validation failed; shown inline
    #[error("{} invalid field(s)", .0.len())]
    Invalid(FieldErrors),
    /// Rejected by the server or not allowed; already pushed as a notice
    #[error("{0}")]
    Failed(String),
}
