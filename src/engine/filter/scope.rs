use serde::{Deserialize, Serialize};

use crate::engine::filter::predicate::{Predicate, ScopePredicate};
use crate::engine::types::{CellValue, ColumnRef};

/// How much of the record set a principal may report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessScope {
    All,
    Group,
    User,
    None,
}

/// The acting user, as far as access scoping is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub user_name: String,
    #[serde(default)]
    pub user_groups: Vec<String>,
    pub scope: AccessScope,
}

impl Principal {
    pub fn new(user_name: &str, scope: AccessScope) -> Self {
        Self {
            user_name: user_name.to_string(),
            user_groups: Vec::new(),
            scope,
        }
    }

    pub fn with_groups(mut self, groups: &[&str]) -> Self {
        self.user_groups = groups.iter().map(|g| g.to_string()).collect();
        self
    }
}

/// Source of the access-scope fragment for a principal.
pub trait ScopeProvider: Send + Sync {
    fn scope_fragment(&self, principal: &Principal, table_alias: &str) -> Option<Predicate>;
}

/// Scopes by record ownership: `owned_by` for user scope and
/// `associated_user_groups` for group scope.
#[derive(Debug, Clone)]
pub struct RecordOwnershipScope {
    owner_column: String,
    groups_column: String,
}

impl Default for RecordOwnershipScope {
    fn default() -> Self {
        Self {
            owner_column: "owned_by".to_string(),
            groups_column: "associated_user_groups".to_string(),
        }
    }
}

impl RecordOwnershipScope {
    pub fn new(owner_column: &str, groups_column: &str) -> Self {
        Self {
            owner_column: owner_column.to_string(),
            groups_column: groups_column.to_string(),
        }
    }
}

impl ScopeProvider for RecordOwnershipScope {
    fn scope_fragment(&self, principal: &Principal, table_alias: &str) -> Option<Predicate> {
        let scope = match principal.scope {
            AccessScope::All => return None,
            AccessScope::Group if principal.user_groups.is_empty() => ScopePredicate::DenyAll,
            AccessScope::Group => ScopePredicate::Overlap {
                column: ColumnRef::new(table_alias, &self.groups_column),
                values: principal
                    .user_groups
                    .iter()
                    .map(|g| CellValue::text(g.as_str()))
                    .collect(),
            },
            AccessScope::User => ScopePredicate::Membership {
                column: ColumnRef::new(table_alias, &self.owner_column),
                values: vec![CellValue::text(principal.user_name.as_str())],
            },
            AccessScope::None => ScopePredicate::DenyAll,
        };
        Some(Predicate::Scope(scope))
    }
}
