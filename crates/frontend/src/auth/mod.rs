//! Browser session: token storage and route guarding

mod guard;
mod storage;

pub use guard::{RequireRole, RequireRoleProps};
pub use storage::WebTokenStore;
