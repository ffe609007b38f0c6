use serde::{Deserialize, Serialize};

use crate::shared::models::{method_key, ClassgraphError, Result};
use crate::shared::utils::intern::InternedString;

/// Method-handle reference kind (JVMS 4.4.8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationKind {
    GetField = 1,
    GetStatic = 2,
    PutField = 3,
    PutStatic = 4,
    InvokeVirtual = 5,
    InvokeStatic = 6,
    InvokeSpecial = 7,
    NewInvokeSpecial = 8,
    InvokeInterface = 9,
}

impl InvocationKind {
    pub fn from_code(code: u8) -> Result<Self> {
        let kind = match code {
            1 => InvocationKind::GetField,
            2 => InvocationKind::GetStatic,
            3 => InvocationKind::PutField,
            4 => InvocationKind::PutStatic,
            5 => InvocationKind::InvokeVirtual,
            6 => InvocationKind::InvokeStatic,
            7 => InvocationKind::InvokeSpecial,
            8 => InvocationKind::NewInvokeSpecial,
            9 => InvocationKind::InvokeInterface,
            other => {
                return Err(ClassgraphError::invalid_call_site(format!(
                    "invalid method handle reference kind {}",
                    other
                )))
            }
        };
        Ok(kind)
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }
}

/// One bootstrap call site producing a functional-interface instance
///
/// `invocation_kind` stays a raw code here; it is validated when the
/// lambda node is synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSiteDescriptor {
    pub declaring_class: InternedString,
    pub content_class: InternedString,
    pub content_method: InternedString,
    pub content_descriptor: InternedString,
    pub invocation_kind: u8,
    pub interface_name: InternedString,
    pub interface_method: InternedString,
    pub interface_descriptor: InternedString,
}

/// Lambda metadata carried by a LAMBDA node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LambdaInfo {
    pub declaring_class: InternedString,
    pub interface_name: InternedString,
    pub interface_method: InternedString,
    pub interface_descriptor: InternedString,
    pub content_class: InternedString,
    pub content_method: InternedString,
    pub content_descriptor: InternedString,
    pub invocation_kind: InvocationKind,
    pub content_method_key: String,
    pub is_method_reference: bool,
    pub is_static_content: bool,
}

impl LambdaInfo {
    /// Metadata for a validated call site; `is_method_reference` is decided
    /// by the caller, which can see the declaring class
    pub fn new(
        site: &CallSiteDescriptor,
        invocation_kind: InvocationKind,
        is_method_reference: bool,
    ) -> Self {
        Self {
            declaring_class: site.declaring_class.clone(),
            interface_name: site.interface_name.clone(),
            interface_method: site.interface_method.clone(),
            interface_descriptor: site.interface_descriptor.clone(),
            content_class: site.content_class.clone(),
            content_method: site.content_method.clone(),
            content_descriptor: site.content_descriptor.clone(),
            invocation_kind,
            content_method_key: method_key(&site.content_method, &site.content_descriptor),
            is_method_reference,
            is_static_content: invocation_kind == InvocationKind::InvokeStatic,
        }
    }
}
