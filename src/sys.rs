//! System utilities for privilege handling.

/// Name of the user this process runs as, if resolvable.
#[cfg(unix)]
pub fn current_user() -> Option<String> {
    let uid = nix::unistd::Uid::effective();
    nix::unistd::User::from_uid(uid).ok().flatten().map(|u| u.name)
}

#[cfg(not(unix))]
pub fn current_user() -> Option<String> {
    std::env::var("USERNAME").ok()
}

/// True if running with root privileges.
#[cfg(unix)]
pub fn is_root() -> bool {
    nix::unistd::Uid::effective().is_root()
}

#[cfg(not(unix))]
pub fn is_root() -> bool {
    false
}

/// Whether an external tool must be re-invoked via `sudo -u <user>`:
/// only when a target user is requested and we are not already it.
pub fn needs_sudo_as(target: &str) -> bool {
    match current_user() {
        Some(me) => me != target,
        None => true,
    }
}
