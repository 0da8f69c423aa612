use crate::engine::filter::{AccessScope, Principal};

pub struct PrincipalFactory {
    user_name: String,
    user_groups: Vec<String>,
    scope: AccessScope,
}

impl PrincipalFactory {
    /// `alice`, member of `unicef`, with unrestricted scope.
    pub fn new() -> Self {
        Self {
            user_name: "alice".to_string(),
            user_groups: vec!["unicef".to_string()],
            scope: AccessScope::All,
        }
    }

    pub fn with_user(mut self, user_name: &str) -> Self {
        self.user_name = user_name.to_string();
        self
    }

    pub fn with_groups(mut self, groups: &[&str]) -> Self {
        self.user_groups = groups.iter().map(|g| g.to_string()).collect();
        self
    }

    pub fn with_scope(mut self, scope: AccessScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn create(self) -> Principal {
        Principal {
            user_name: self.user_name,
            user_groups: self.user_groups,
            scope: self.scope,
        }
    }
}
