pub mod api;
pub mod error;
pub mod model;
pub mod services;
pub mod session;
pub mod view;

pub use api::{absolute_base_url, ApiClient, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult};
pub use session::{MemorySessionStore, SessionStore, SESSION_TOKEN_KEY};
pub use view::{FetchGate, FetchTicket, ViewState};
