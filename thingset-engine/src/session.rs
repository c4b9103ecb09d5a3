//! Authentication state (§3 "Session state", §4.6 Authenticate).
//!
//! The `Password` newtype mirrors `opcua_server::authenticator::Password`:
//! it never prints its contents through `Debug`, so a logged request can
//! never leak a password by accident.

use std::cell::Cell;
use std::fmt;

use thingset_core::{EngineError, EngineLimits};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AuthLevel {
    None,
    User,
    Maker,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(value: impl Into<String>) -> Self {
        Password(value.into())
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "****")
    }
}

/// Process-wide authentication state. A single `Session` backs the whole
/// engine (spec.md §5: single-threaded, one caller at a time), so the
/// current level lives in a `Cell` rather than behind a lock.
pub struct Session {
    level: Cell<AuthLevel>,
    user_password: Option<Password>,
    maker_password: Option<Password>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            level: Cell::new(AuthLevel::None),
            user_password: None,
            maker_password: None,
        }
    }

    pub fn level(&self) -> AuthLevel {
        self.level.get()
    }

    pub fn set_user_password(&mut self, password: impl Into<String>) {
        self.user_password = Some(Password::new(password));
    }

    pub fn set_maker_password(&mut self, password: impl Into<String>) {
        self.maker_password = Some(Password::new(password));
    }

    /// An empty password resets the session to `none`; a password matching
    /// the maker or user secret elevates to that level; anything else drops
    /// back to `none` and reports a conflict.
    pub fn authenticate(&self, password: &str, limits: &EngineLimits) -> Result<(), EngineError> {
        if password.is_empty() {
            self.level.set(AuthLevel::None);
            return Ok(());
        }
        if password.len() > limits.max_password_len {
            self.level.set(AuthLevel::None);
            return Err(EngineError::Conflict);
        }
        if self.maker_password.as_ref().is_some_and(|p| p.matches(password)) {
            self.level.set(AuthLevel::Maker);
            log::debug!("session elevated to maker level");
            return Ok(());
        }
        if self.user_password.as_ref().is_some_and(|p| p.matches(password)) {
            self.level.set(AuthLevel::User);
            log::debug!("session elevated to user level");
            return Ok(());
        }
        self.level.set(AuthLevel::None);
        log::warn!("authentication attempt failed, session reset to none");
        Err(EngineError::Conflict)
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> EngineLimits {
        EngineLimits::default()
    }

    #[test]
    fn empty_password_resets_to_none() {
        let session = Session::new();
        session.authenticate("anything", &limits()).ok();
        session.authenticate("", &limits()).unwrap();
        assert_eq!(session.level(), AuthLevel::None);
    }

    #[test]
    fn matching_user_password_elevates() {
        let mut session = Session::new();
        session.set_user_password("user123");
        session.authenticate("user123", &limits()).unwrap();
        assert_eq!(session.level(), AuthLevel::User);
    }

    #[test]
    fn matching_maker_password_elevates_above_user() {
        let mut session = Session::new();
        session.set_user_password("user123");
        session.set_maker_password("maker456");
        session.authenticate("maker456", &limits()).unwrap();
        assert_eq!(session.level(), AuthLevel::Maker);
    }

    #[test]
    fn wrong_password_conflicts_and_resets() {
        let mut session = Session::new();
        session.set_user_password("user123");
        session.authenticate("user123", &limits()).unwrap();
        assert!(session.authenticate("wrong", &limits()).is_err());
        assert_eq!(session.level(), AuthLevel::None);
    }

    #[test]
    fn overlong_password_conflicts() {
        let session = Session::new();
        let long = "x".repeat(limits().max_password_len + 1);
        assert!(session.authenticate(&long, &limits()).is_err());
    }

    #[test]
    fn maker_satisfies_a_user_level_requirement() {
        assert!(AuthLevel::Maker >= AuthLevel::User);
        assert!(AuthLevel::User >= AuthLevel::User);
        assert!(!(AuthLevel::None >= AuthLevel::User));
    }
}
