//! Session Context
//!
//! Auth token, signed-in user and the selected team, persisted through a
//! [`KeyValueStore`] port. The browser build backs the token with a cookie
//! and the rest with local storage; tests use [`MemoryStore`].
//!
//! The UI is single-threaded, so the session is shared as `Rc<Session>`
//! with interior mutability.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ClientConfig;
use crate::menu::MenuId;

/// Persistence failures. Callers log these; none are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("failed to write '{key}': {reason}")]
    Write { key: String, reason: String },
    #[error("failed to encode value: {0}")]
    Serialize(String),
}

/// get/set/remove over string values
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .extend(entries.into_iter().map(|(k, v)| (k.to_string(), v.to_string())));
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Signed-in user profile
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    pub dept_id: i64,
    pub dept_name: String,
    pub user_name: String,
    pub full_name: String,
    pub phone_number: String,
    pub sex: i64,
    pub admin: i64,
    pub admin_name: String,
    pub access_token: String,
    pub approver: bool,
    pub login_time: String,
    pub last_access_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.admin == 1
    }

    /// First character of the full name, for the avatar fallback
    pub fn initial(&self) -> String {
        self.full_name.chars().next().map(String::from).unwrap_or_default()
    }
}

/// Storage keys used by the session
#[derive(Debug, Clone, PartialEq, Eq)]
struct SessionKeys {
    token: String,
    user: String,
    active_team: String,
}

/// Client session: token, user and selected team
pub struct Session {
    cookies: Rc<dyn KeyValueStore>,
    local: Rc<dyn KeyValueStore>,
    keys: SessionKeys,
    token: RefCell<String>,
    user: RefCell<Option<User>>,
    active_team: Cell<MenuId>,
}

impl Session {
    /// Load the persisted state. Unreadable entries hydrate as empty.
    pub fn hydrate(cookies: Rc<dyn KeyValueStore>, local: Rc<dyn KeyValueStore>, config: &ClientConfig) -> Self {
        let keys = SessionKeys {
            token: config.token_key.clone(),
            user: config.user_key.clone(),
            active_team: config.active_team_key.clone(),
        };

        let token = read(cookies.as_ref(), &keys.token)
            .map(|raw| serde_json::from_str::<String>(&raw).unwrap_or(raw))
            .unwrap_or_default();

        let user = read(local.as_ref(), &keys.user).and_then(|raw| match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("[SESSION] Stored user is unreadable: {}", e);
                None
            }
        });

        let active_team = read(local.as_ref(), &keys.active_team)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0);

        Self {
            cookies,
            local,
            keys,
            token: RefCell::new(token),
            user: RefCell::new(user),
            active_team: Cell::new(active_team),
        }
    }

    pub fn access_token(&self) -> String {
        self.token.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.borrow().is_empty()
    }

    pub fn set_access_token(&self, token: &str) {
        *self.token.borrow_mut() = token.to_string();
        let encoded = serde_json::to_string(token).unwrap_or_else(|_| token.to_string());
        persist(self.cookies.set(&self.keys.token, &encoded));
    }

    pub fn reset_access_token(&self) {
        self.token.borrow_mut().clear();
        persist(self.cookies.remove(&self.keys.token));
    }

    pub fn user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.borrow().as_ref().map(|u| u.user_id)
    }

    /// Store or clear the user; `None` removes the persisted copy
    pub fn set_user(&self, user: Option<User>) {
        match &user {
            Some(u) => match serde_json::to_string(u) {
                Ok(json) => persist(self.local.set(&self.keys.user, &json)),
                Err(e) => persist(Err(StorageError::Serialize(e.to_string()))),
            },
            None => persist(self.local.remove(&self.keys.user)),
        }
        *self.user.borrow_mut() = user;
    }

    pub fn active_team_id(&self) -> MenuId {
        self.active_team.get()
    }

    /// Select a team. Zero means "none" and is not persisted.
    pub fn set_active_team_id(&self, id: MenuId) {
        self.active_team.set(id);
        if id != 0 {
            persist(self.local.set(&self.keys.active_team, &id.to_string()));
        }
    }

    /// Sign out: token, user and team selection are all cleared
    pub fn reset(&self) {
        self.reset_access_token();
        self.set_user(None);
        self.active_team.set(0);
        persist(self.local.remove(&self.keys.active_team));
    }
}

fn read(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(e) => {
            log::error!("[SESSION] Failed to read '{}': {}", key, e);
            None
        }
    }
}

fn persist(result: Result<(), StorageError>) {
    if let Err(e) = result {
        log::error!("[SESSION] {}", e);
    }
}

/// What happened when the backend reported an expired session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryOutcome {
    /// Show the re-login dialog
    ShowDialog,
    /// Dialog already up, nothing to do
    AlreadyOpen,
    /// On a sign-in page: the token was dropped quietly
    TokenCleared,
}

/// Guards the re-login dialog so concurrent 401s open it once
pub struct SessionExpiry {
    auth_paths: Vec<String>,
    sign_in_path: String,
    open: Cell<bool>,
}

impl SessionExpiry {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            auth_paths: config.auth_paths.clone(),
            sign_in_path: config.sign_in_path.clone(),
            open: Cell::new(false),
        }
    }

    pub fn trigger(&self, current_path: &str, session: &Session) -> ExpiryOutcome {
        if self.open.get() {
            return ExpiryOutcome::AlreadyOpen;
        }
        let path = current_path.split('?').next().unwrap_or_default();
        if self.auth_paths.iter().any(|prefix| path.starts_with(prefix.as_str())) {
            session.reset_access_token();
            return ExpiryOutcome::TokenCleared;
        }
        self.open.set(true);
        ExpiryOutcome::ShowDialog
    }

    /// User acknowledged the dialog. Returns the page to navigate to.
    pub fn confirm(&self, session: &Session) -> &str {
        session.reset_access_token();
        self.open.set(false);
        &self.sign_in_path
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(cookies: MemoryStore, local: MemoryStore) -> (Session, Rc<MemoryStore>, Rc<MemoryStore>) {
        let cookies = Rc::new(cookies);
        let local = Rc::new(local);
        let session = Session::hydrate(cookies.clone(), local.clone(), &ClientConfig::default());
        (session, cookies, local)
    }

    #[test]
    fn test_hydrate_from_storage() {
        let (session, _, _) = session_with(
            MemoryStore::with_entries([("token", "\"abc\"")]),
            MemoryStore::with_entries([
                ("userInfo", r#"{"userId": 7, "fullName": "Li Lei", "admin": 1}"#),
                ("active_dept_id", "12"),
            ]),
        );
        assert_eq!(session.access_token(), "abc");
        let user = session.user().unwrap();
        assert_eq!(user.user_id, 7);
        assert!(user.is_admin());
        assert_eq!(user.initial(), "L");
        assert_eq!(session.active_team_id(), 12);
    }

    #[test]
    fn test_hydrate_tolerates_garbage() {
        let (session, _, _) = session_with(
            MemoryStore::with_entries([("token", "raw-token")]),
            MemoryStore::with_entries([("userInfo", "{not json"), ("active_dept_id", "x")]),
        );
        assert_eq!(session.access_token(), "raw-token");
        assert!(session.user().is_none());
        assert_eq!(session.active_team_id(), 0);
    }

    #[test]
    fn test_token_is_persisted_as_json() {
        let (session, cookies, _) = session_with(MemoryStore::new(), MemoryStore::new());
        session.set_access_token("t-1");
        assert_eq!(cookies.get("token").unwrap().as_deref(), Some("\"t-1\""));
        session.reset_access_token();
        assert!(cookies.get("token").unwrap().is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_zero_team_is_not_persisted() {
        let (session, _, local) = session_with(MemoryStore::new(), MemoryStore::new());
        session.set_active_team_id(0);
        assert!(local.get("active_dept_id").unwrap().is_none());
        session.set_active_team_id(4);
        assert_eq!(local.get("active_dept_id").unwrap().as_deref(), Some("4"));
    }

    #[test]
    fn test_reset_clears_everything() {
        let (session, cookies, local) = session_with(MemoryStore::new(), MemoryStore::new());
        session.set_access_token("t");
        session.set_user(Some(User { user_id: 1, ..Default::default() }));
        session.set_active_team_id(3);

        session.reset();
        assert!(session.user().is_none());
        assert_eq!(session.active_team_id(), 0);
        assert!(cookies.get("token").unwrap().is_none());
        assert!(local.get("userInfo").unwrap().is_none());
        assert!(local.get("active_dept_id").unwrap().is_none());
    }

    #[test]
    fn test_expiry_dialog_opens_once() {
        let (session, _, _) = session_with(MemoryStore::new(), MemoryStore::new());
        session.set_access_token("t");
        let expiry = SessionExpiry::new(&ClientConfig::default());

        assert_eq!(expiry.trigger("/dashboard", &session), ExpiryOutcome::ShowDialog);
        assert_eq!(expiry.trigger("/dashboard", &session), ExpiryOutcome::AlreadyOpen);
        assert_eq!(expiry.confirm(&session), "/sign-in");
        assert!(!expiry.is_open());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_expiry_on_sign_in_page_only_drops_token() {
        let (session, _, _) = session_with(MemoryStore::new(), MemoryStore::new());
        session.set_access_token("t");
        let expiry = SessionExpiry::new(&ClientConfig::default());

        assert_eq!(expiry.trigger("/sign-in?redirect=/", &session), ExpiryOutcome::TokenCleared);
        assert!(!expiry.is_open());
        assert!(!session.is_authenticated());
    }
}
