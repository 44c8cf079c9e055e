pub mod api;
pub mod course;
pub mod filter;
pub mod lookup;
pub mod navigation;
pub mod notification;
pub mod user;

pub use api::{Ack, ApiEnvelope, ListBody, PagedEnvelope, SubscriptionRequest};
pub use course::{Course, NewCourse, UploadFile};
pub use filter::{FilterPatch, FilterSet};
pub use lookup::{LookupId, LookupItem};
pub use navigation::{Navigation, NavigationState, Route};
pub use notification::Notification;
pub use user::{LoginRequest, MeResponse, SignupRequest, User};
