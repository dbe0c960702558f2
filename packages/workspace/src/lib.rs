pub mod access;
pub mod error;
pub mod server;
pub mod state;

pub use access::{context_from_headers, Caller, ROLE_HEADER, SUBSCRIPTION_HEADER};
pub use error::AppError;
pub use server::{router, serve, AppState, ServerOptions, VersionResponse, ViewResponse};
pub use state::{StateError, ViewId, WorkspaceState};
