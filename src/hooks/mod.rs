pub mod use_auth_check;
pub mod use_fetch;

pub use use_auth_check::{use_auth_check, SessionBootstrap};
pub use use_fetch::{use_fetch, FetchOutcome, UseFetchHandle};
