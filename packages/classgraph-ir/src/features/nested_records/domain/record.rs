use serde::{Deserialize, Serialize};

use crate::shared::models::AccessFlags;
use crate::shared::utils::intern::InternedString;

/// How a nested type was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestedKind {
    Member,
    Anonymous,
    Local,
}

impl NestedKind {
    /// Member if an outer class is named, else anonymous without a simple
    /// name, else local
    pub fn classify(has_outer: bool, has_simple_name: bool) -> Self {
        if has_outer {
            NestedKind::Member
        } else if has_simple_name {
            NestedKind::Local
        } else {
            NestedKind::Anonymous
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NestedKind::Member => "member",
            NestedKind::Anonymous => "anonymous",
            NestedKind::Local => "local",
        }
    }
}

/// One normalized InnerClasses entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedTypeRecord {
    pub inner_name: InternedString,
    /// Display name after renaming; absent for anonymous classes
    pub simple_name: Option<InternedString>,
    pub declared_kind: NestedKind,
    pub access: AccessFlags,
    pub enclosing_name: InternedString,
}

impl NestedTypeRecord {
    /// Records for the same inner name agree when everything but the
    /// enclosing attribution matches
    pub fn agrees_with(&self, other: &NestedTypeRecord) -> bool {
        self.simple_name == other.simple_name
            && self.declared_kind == other.declared_kind
            && self.access == other.access
    }

    pub fn is_self_reference(&self) -> bool {
        self.inner_name == self.enclosing_name
    }
}
