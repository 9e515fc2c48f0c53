/// Per-browser login state. Only these two fields are ever read or written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub logged_in: bool,
    pub username: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Username of the logged-in account, if any
    pub fn current_user(&self) -> Option<&str> {
        if self.logged_in {
            self.username.as_deref()
        } else {
            None
        }
    }
}
