use std::fmt;

/// An OpenShift user created for the test run.
#[derive(Clone, PartialEq, Eq)]
pub struct TestUser {
    pub name: String,
    pub password: String,
}

impl TestUser {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self { name: name.into(), password: password.into() }
    }
}

// Passwords stay out of `{:?}` so users can be traced freely.
impl fmt::Debug for TestUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestUser").field("name", &self.name).field("password", &"******").finish()
    }
}
