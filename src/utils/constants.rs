// ============================================================================
// CONSTANTS - Selectable catalogs and fixed keys
// ============================================================================

/// Course levels offered in the search and add-course forms
pub const LEVELS: [&str; 3] = ["Bachelors", "Masters", "PG Diploma"];

pub const DURATIONS: [&str; 6] = [
    "1 Year",
    "16 Months",
    "20 Months",
    "2 Years",
    "3 Years",
    "4 Years",
];

/// A course link must start with one of these
pub const ACCEPTED_LINK_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Spreadsheet formats accepted by `/universities/upload` (lowercase, no dot)
pub const UPLOAD_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

/// localStorage key of the last applied search filters
pub const STORAGE_KEY_FILTERS: &str = "courseTracker_filters";

/// DOM event fired on `window` after any store change
pub const STATE_CHANGED_EVENT: &str = "courseTracker:stateChanged";

pub const MIN_PASSWORD_LENGTH: usize = 4;
