pub mod callback;
pub mod cookies;
pub mod gate;
pub mod jwt;
pub mod role;
pub mod store;

pub use gate::GateDecision;
pub use role::{check_manager, RoleWatcher};
pub use store::{FileTokenStore, MemoryTokenStore, SessionStore, TokenStore};
