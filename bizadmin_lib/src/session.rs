//! The signed-in user and their permissions, scoped to one client.

use std::collections::HashSet;
use std::fmt;
use std::sync::RwLock;

use crate::error::AdminError;

/// What a caller wants to do with a resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
}

impl Action {
    /// Permission name for this action on `resource`, e.g. `contract.update`.
    pub fn permission(self, resource: &str) -> String {
        format!("{}.{}", resource, self)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub token: String,
    pub permissions: HashSet<String>,
}

impl Session {
    pub fn new(
        username: impl Into<String>,
        token: impl Into<String>,
        permissions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    /// `*` grants everything; `<resource>.*` grants every action on it.
    pub fn has_permission(&self, resource: &str, action: Action) -> bool {
        self.permissions.contains("*")
            || self.permissions.contains(&format!("{}.*", resource))
            || self.permissions.contains(&action.permission(resource))
    }
}

/// Holds at most one session. With nobody signed in, permission checks are
/// left to the server.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `session`, replacing any previous one.
    pub fn sign_in(&self, session: Session) {
        tracing::info!("signed in as {}", session.username);
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(session);
    }

    /// Drops the current session and returns it.
    pub fn sign_out(&self) -> Option<Session> {
        let previous = self
            .current
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(session) = &previous {
            tracing::info!("signed out {}", session.username);
        }
        previous
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// False when nobody is signed in.
    pub fn has_permission(&self, resource: &str, action: Action) -> bool {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(|s| s.has_permission(resource, action))
    }

    /// Fails with `Unauthorized` when a session is installed and lacks the
    /// permission. Passes when nobody is signed in.
    pub fn authorize(&self, resource: &str, action: Action) -> Result<(), AdminError> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(session) if !session.has_permission(resource, action) => {
                let permission = action.permission(resource);
                tracing::warn!("{} lacks {}", session.username, permission);
                Err(AdminError::Unauthorized(permission))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clerk() -> Session {
        Session::new("clerk", "t0k", ["contract.view", "contract.create", "receipt.*"])
    }

    #[test]
    fn permission_names() {
        assert_eq!(Action::Update.permission("contract"), "contract.update");
        assert_eq!(Action::View.to_string(), "view");
    }

    #[test]
    fn exact_and_wildcard_grants() {
        let s = clerk();
        assert!(s.has_permission("contract", Action::View));
        assert!(!s.has_permission("contract", Action::Delete));
        assert!(s.has_permission("receipt", Action::Delete));
        assert!(!s.has_permission("product", Action::View));

        let admin = Session::new("admin", "t", ["*"]);
        assert!(admin.has_permission("anything", Action::Delete));
    }

    #[test]
    fn anonymous_store_defers_to_server() {
        let store = SessionStore::new();
        assert!(!store.is_signed_in());
        assert!(!store.has_permission("contract", Action::View));
        assert!(store.authorize("contract", Action::Delete).is_ok());
    }

    #[test]
    fn authorize_rejects_missing_permission() {
        let store = SessionStore::new();
        store.sign_in(clerk());
        assert!(store.authorize("contract", Action::Create).is_ok());
        match store.authorize("contract", Action::Delete) {
            Err(AdminError::Unauthorized(p)) => assert_eq!(p, "contract.delete"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn sign_out_returns_previous_session() {
        let store = SessionStore::new();
        store.sign_in(clerk());
        assert_eq!(store.current().map(|s| s.username), Some("clerk".to_string()));

        let previous = store.sign_out();
        assert_eq!(previous.map(|s| s.token), Some("t0k".to_string()));
        assert!(store.current().is_none());
        assert!(store.sign_out().is_none());
    }
}
