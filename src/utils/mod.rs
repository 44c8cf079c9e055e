// Shared helpers

pub mod constants;
#[cfg(target_arch = "wasm32")]
pub mod storage;
pub mod validation;

pub use constants::*;
pub use validation::FieldErrors;
