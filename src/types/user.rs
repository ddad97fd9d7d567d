use std::fmt;

/// The sender of a message, as far as rule evaluation is concerned.
///
/// Only the admin flag matters for matching. Everything else about the user is
/// passed through untouched to computed responders.
pub trait User {
    fn is_admin(&self) -> bool;
}

impl<T: User + ?Sized> User for &T {
    fn is_admin(&self) -> bool {
        (**self).is_admin()
    }
}

/// A minimal [`User`]: a display name and an admin flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sender {
    name: String,
    admin: bool,
}

impl Sender {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            admin: false,
        }
    }

    pub fn admin(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            admin: true,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl User for Sender {
    fn is_admin(&self) -> bool {
        self.admin
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.admin {
            write!(f, "{} (admin)", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}
