//! Session — where the current user's identity comes from.
//!
//! Identity is always handed to the stores explicitly; nothing in this crate
//! reads a global "current user".

/// A source of the signed-in user's id.
pub trait Session {
  /// The current user's id, or `None` when nobody is signed in. Empty ids are
  /// treated the same as `None`.
  fn current_user_id(&self) -> Option<&str>;
}

/// A session fixed at construction time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSession {
  user_id: Option<String>,
}

impl StaticSession {
  pub fn signed_in(user_id: impl Into<String>) -> Self {
    Self { user_id: Some(user_id.into()) }
  }

  pub fn anonymous() -> Self { Self::default() }
}

impl From<Option<String>> for StaticSession {
  fn from(user_id: Option<String>) -> Self { Self { user_id } }
}

impl Session for StaticSession {
  fn current_user_id(&self) -> Option<&str> {
    self.user_id.as_deref().filter(|id| !id.is_empty())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_id_counts_as_anonymous() {
    assert_eq!(StaticSession::signed_in("").current_user_id(), None);
    assert_eq!(StaticSession::anonymous().current_user_id(), None);
    assert_eq!(StaticSession::signed_in("u1").current_user_id(), Some("u1"));
  }
}
