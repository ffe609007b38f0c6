use serde::Serialize;
use std::fmt;

use crate::features::lambda::domain::LambdaInfo;
use crate::features::nested_records::NestedKind;
use crate::shared::models::{AccessFlags, EnclosingMethod, LoadedClass};
use crate::shared::utils::intern::{intern, InternedString};

/// Index of a node in the forest arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural role of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Root,
    Member,
    Anonymous,
    Local,
    Lambda,
}

impl ClassKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassKind::Root => "root",
            ClassKind::Member => "member",
            ClassKind::Anonymous => "anonymous",
            ClassKind::Local => "local",
            ClassKind::Lambda => "lambda",
        }
    }
}

impl From<NestedKind> for ClassKind {
    fn from(kind: NestedKind) -> Self {
        match kind {
            NestedKind::Member => ClassKind::Member,
            NestedKind::Anonymous => ClassKind::Anonymous,
            NestedKind::Local => ClassKind::Local,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassNode {
    pub kind: ClassKind,
    /// Backing class; the declaring class for LAMBDA nodes
    pub qualified_name: InternedString,
    pub access: AccessFlags,
    pub simple_name: Option<InternedString>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Every class that declared this one as nested
    pub enclosing_classes: Vec<InternedString>,
    /// Implemented or extended type of an ANONYMOUS or LAMBDA node
    pub interface_type: Option<InternedString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lambda: Option<LambdaInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enclosing_method: Option<EnclosingMethod>,
}

impl ClassNode {
    /// Top-level node for a loaded class
    pub fn root(class: &LoadedClass) -> Self {
        Self {
            kind: ClassKind::Root,
            qualified_name: class.name.clone(),
            access: class.access,
            simple_name: Some(intern(class.simple_name())),
            parent: None,
            children: Vec::new(),
            enclosing_classes: Vec::new(),
            interface_type: None,
            lambda: None,
            enclosing_method: None,
        }
    }

    /// LAMBDA node backed by its declaring class
    pub fn lambda(info: LambdaInfo) -> Self {
        Self {
            kind: ClassKind::Lambda,
            qualified_name: info.declaring_class.clone(),
            access: AccessFlags::empty(),
            simple_name: None,
            parent: None,
            children: Vec::new(),
            enclosing_classes: Vec::new(),
            interface_type: Some(info.interface_name.clone()),
            lambda: Some(info),
            enclosing_method: None,
        }
    }

    pub fn is_lambda(&self) -> bool {
        self.kind == ClassKind::Lambda
    }

    /// Name used when printing the tree
    pub fn display_name(&self) -> &str {
        match (&self.lambda, &self.simple_name) {
            (Some(info), _) => &info.content_method,
            (None, Some(name)) => name,
            (None, None) => "<anonymous>",
        }
    }
}
