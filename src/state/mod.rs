// ============================================================================
// STATE MODULE - Reducer stores over Rc<RefCell> + change notifications
// ============================================================================

pub mod reactivity;
pub mod store;
pub mod resource_state;
pub mod auth_state;
pub mod lookup_state;
pub mod filter_state;
pub mod notice_state;
pub mod router_state;
pub mod app_state;

pub use reactivity::ReactiveState;
pub use store::{Reducer, Store};
pub use resource_state::ResourceState;
pub use auth_state::{AuthAction, AuthState, AuthStore, SESSION_TOKEN_SENTINEL};
pub use lookup_state::{LookupAction, LookupState, LookupStore};
pub use filter_state::{FilterAction, FilterStore};
pub use notice_state::{Notice, NoticeKind, NoticeState, NoticeStore};
pub use router_state::{guard, RouterAction, RouterState, RouterStore};
pub use app_state::AppContext;
