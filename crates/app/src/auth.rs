use client::api::ApiClient;
use client::auth::SessionStore;
use dioxus::prelude::*;

/// Whether the current token marks the user as a course manager.
/// Kept current by the role watcher started in `Shell`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UserRoleState {
    pub is_manager: Signal<bool>,
}

/// Hook to read the role flag reactively.
pub fn use_is_manager() -> bool {
    let role = use_context::<UserRoleState>();
    let is_manager = (role.is_manager)();
    is_manager
}

pub fn use_session() -> SessionStore {
    use_context::<SessionStore>()
}

pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

/// Re-derive the role flag right away after the token changed under us,
/// instead of waiting for the next watcher tick.
pub fn sync_role(mut role: UserRoleState, session: &SessionStore) {
    let flag = client::auth::check_manager(session);
    if *role.is_manager.peek() != flag {
        role.is_manager.set(flag);
    }
}
