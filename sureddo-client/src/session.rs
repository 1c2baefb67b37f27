use crate::api::User;

/// The identity the current browser session runs under, or anonymous.
/// Anonymous sessions can browse everything but are never offered the
/// compose affordances.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Session {
        Session { user: None }
    }

    pub fn logged_in(user: User) -> Session {
        Session { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn can_comment(&self) -> bool {
        self.user.is_some()
    }
}
