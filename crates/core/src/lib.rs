//! Voucherify core: session persistence, token identity and access policy

pub mod access;
pub mod config;
pub mod error;
pub mod identity;
pub mod notify;
pub mod session;

#[cfg(any(test, feature = "tests"))]
pub mod tests;

pub use access::{Access, Denial, LOGIN_PATH, authorize, dashboard_for};
pub use config::{ClientConfig, SessionConfig};
pub use error::{CoreError, CoreResult, StorageError};
pub use identity::{DecodeError, Identity, Role};
pub use notify::{LogNotifier, Notification, NotificationKind, Notifier};
pub use session::{MemoryTokenStore, SessionStore, TokenStore};

#[cfg(not(target_arch = "wasm32"))]
pub use session::FileTokenStore;
