//! Loaded class descriptors
//!
//! Structured records handed over by the (external) class-file parser. Only
//! the parts the structural core reads are modelled: names, flags, the
//! InnerClasses and EnclosingMethod attributes, and per-method synthetic
//! flags plus raw exception-table entries. Attribute tuples keep their
//! constant-pool indices; resolving them is where malformed input is caught.

use serde::{Deserialize, Serialize};

use super::access_flags::AccessFlags;
use super::error::{ClassgraphError, Result};
use crate::shared::utils::intern::{intern, InternedString};

// ============================================================
// Constant Pool
// ============================================================

/// Constant-pool entry kinds the structural core needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolEntry {
    /// CONSTANT_Class, already resolved to its internal name
    Class(InternedString),
    /// CONSTANT_Utf8
    Utf8(InternedString),
    /// Any entry kind not modelled here (or the second slot of a long/double)
    Empty,
}

/// 1-based constant pool, index 0 is never valid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstantPool {
    entries: Vec<PoolEntry>,
}

impl ConstantPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry and return its 1-based index
    ///
    /// Fails without appending once every u16 index is taken.
    pub fn push(&mut self, entry: PoolEntry) -> Result<u16> {
        let index = Self::index_at(self.entries.len())?;
        self.entries.push(entry);
        Ok(index)
    }

    /// Index of a CONSTANT_Class entry for `name`, appending one if needed
    pub fn class_index(&mut self, name: &str) -> Result<u16> {
        self.find_or_push(PoolEntry::Class(intern(name)))
    }

    /// Index of a CONSTANT_Utf8 entry for `text`, appending one if needed
    pub fn utf8_index(&mut self, text: &str) -> Result<u16> {
        self.find_or_push(PoolEntry::Utf8(intern(text)))
    }

    fn find_or_push(&mut self, entry: PoolEntry) -> Result<u16> {
        match self.entries.iter().position(|e| *e == entry) {
            Some(pos) => Self::index_at(pos),
            None => self.push(entry),
        }
    }

    /// 1-based index of the slot at `position`
    fn index_at(position: usize) -> Result<u16> {
        u16::try_from(position + 1).map_err(|_| {
            ClassgraphError::malformed(format!(
                "constant pool exceeds {} entries",
                u16::MAX
            ))
        })
    }

    fn entry(&self, index: u16) -> Result<&PoolEntry> {
        if index == 0 {
            return Err(ClassgraphError::malformed("constant pool index 0"));
        }
        self.entries.get(index as usize - 1).ok_or_else(|| {
            ClassgraphError::malformed(format!(
                "constant pool index {} out of range (pool size {})",
                index,
                self.entries.len()
            ))
        })
    }

    /// Resolve a CONSTANT_Class index to an internal class name
    pub fn class_name(&self, index: u16) -> Result<&InternedString> {
        match self.entry(index)? {
            PoolEntry::Class(name) => Ok(name),
            other => Err(ClassgraphError::malformed(format!(
                "constant pool index {} is not a class entry: {:?}",
                index, other
            ))),
        }
    }

    /// Resolve a CONSTANT_Utf8 index
    pub fn utf8(&self, index: u16) -> Result<&InternedString> {
        match self.entry(index)? {
            PoolEntry::Utf8(text) => Ok(text),
            other => Err(ClassgraphError::malformed(format!(
                "constant pool index {} is not a utf8 entry: {:?}",
                index, other
            ))),
        }
    }
}

// ============================================================
// Raw Attribute Tuples
// ============================================================

/// One `classes[]` entry of an InnerClasses attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInnerClassEntry {
    pub inner_class_index: u16,
    /// 0 when the type is not a member of another class
    pub outer_class_index: u16,
    /// 0 for anonymous classes
    pub inner_name_index: u16,
    pub access_flags: AccessFlags,
}

/// One `exception_table[]` entry of a Code attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawExceptionEntry {
    pub start_pc: u32,
    pub end_pc: u32,
    pub handler_pc: u32,
    /// 0 for catch-all (finally / synchronized) handlers
    pub catch_type_index: u16,
}

/// EnclosingMethod attribute of a local or anonymous class
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnclosingMethod {
    pub class_name: InternedString,
    pub method_name: Option<InternedString>,
    pub method_descriptor: Option<InternedString>,
}

// ============================================================
// Methods and Classes
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: InternedString,
    pub descriptor: InternedString,
    #[serde(default)]
    pub access: AccessFlags,
    /// Set when the method carries a `Synthetic` attribute
    #[serde(default)]
    pub synthetic_attribute: bool,
    #[serde(default)]
    pub exception_entries: Vec<RawExceptionEntry>,
}

impl MethodDescriptor {
    pub fn new(name: &str, descriptor: &str) -> Self {
        Self {
            name: intern(name),
            descriptor: intern(descriptor),
            access: AccessFlags::empty(),
            synthetic_attribute: false,
            exception_entries: Vec::new(),
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.synthetic_attribute || self.access.contains(AccessFlags::SYNTHETIC)
    }

    /// `"name descriptor"`, the key used for per-method lookups
    pub fn key(&self) -> String {
        method_key(&self.name, &self.descriptor)
    }
}

/// Unique key for a method within its class
pub fn method_key(name: &str, descriptor: &str) -> String {
    format!("{} {}", name, descriptor)
}

/// Parsed metadata of one compiled type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedClass {
    pub name: InternedString,
    #[serde(default)]
    pub access: AccessFlags,
    #[serde(default)]
    pub super_class: Option<InternedString>,
    #[serde(default)]
    pub interfaces: Vec<InternedString>,
    /// Part of the unit under decompilation (not a library reference)
    #[serde(default)]
    pub own: bool,
    #[serde(default)]
    pub constant_pool: ConstantPool,
    #[serde(default)]
    pub inner_classes: Vec<RawInnerClassEntry>,
    #[serde(default)]
    pub enclosing_method: Option<EnclosingMethod>,
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

impl LoadedClass {
    pub fn builder(name: &str) -> LoadedClassBuilder {
        LoadedClassBuilder::new(name)
    }

    /// Segment after the last `/` of the internal name
    pub fn simple_name(&self) -> &str {
        match self.name.rfind('/') {
            Some(pos) => &self.name[pos + 1..],
            None => &self.name,
        }
    }

    pub fn method(&self, name: &str, descriptor: &str) -> Option<&MethodDescriptor> {
        self.methods
            .iter()
            .find(|m| &*m.name == name && &*m.descriptor == descriptor)
    }
}

// ============================================================
// Builders
// ============================================================

/// Builder for [`LoadedClass`] that allocates constant-pool entries on the fly
///
/// A pool overflow is kept until [`try_build`](Self::try_build) reports it.
#[derive(Debug)]
pub struct LoadedClassBuilder {
    class: LoadedClass,
    pool_error: Option<ClassgraphError>,
}

impl LoadedClassBuilder {
    pub fn new(name: &str) -> Self {
        let mut constant_pool = ConstantPool::new();
        let pool_error = constant_pool.class_index(name).err();
        Self {
            pool_error,
            class: LoadedClass {
                name: intern(name),
                access: AccessFlags::PUBLIC,
                super_class: Some(intern("java/lang/Object")),
                interfaces: Vec::new(),
                own: true,
                constant_pool,
                inner_classes: Vec::new(),
                enclosing_method: None,
                methods: Vec::new(),
            },
        }
    }

    /// Pool index for `entry`, or 0 after recording the first overflow
    fn pool_index(&mut self, index: Result<u16>) -> u16 {
        match index {
            Ok(index) => index,
            Err(e) => {
                self.pool_error.get_or_insert(e);
                0
            }
        }
    }

    pub fn own(mut self, own: bool) -> Self {
        self.class.own = own;
        self
    }

    pub fn access(mut self, access: AccessFlags) -> Self {
        self.class.access = access;
        self
    }

    pub fn super_class(mut self, name: Option<&str>) -> Self {
        self.class.super_class = name.map(intern);
        self
    }

    pub fn interface(mut self, name: &str) -> Self {
        self.class.interfaces.push(intern(name));
        self
    }

    /// Declare an InnerClasses entry, resolving names into pool indices
    pub fn inner_class(
        mut self,
        inner: &str,
        outer: Option<&str>,
        simple_name: Option<&str>,
        access: AccessFlags,
    ) -> Self {
        let inner_index = self.class.constant_pool.class_index(inner);
        let inner_class_index = self.pool_index(inner_index);
        let outer_class_index = match outer {
            Some(outer) => {
                let index = self.class.constant_pool.class_index(outer);
                self.pool_index(index)
            }
            None => 0,
        };
        let inner_name_index = match simple_name {
            Some(name) => {
                let index = self.class.constant_pool.utf8_index(name);
                self.pool_index(index)
            }
            None => 0,
        };
        let entry = RawInnerClassEntry {
            inner_class_index,
            outer_class_index,
            inner_name_index,
            access_flags: access,
        };
        self.class.inner_classes.push(entry);
        self
    }

    /// Declare an InnerClasses entry with explicit indices
    pub fn raw_inner_class(mut self, entry: RawInnerClassEntry) -> Self {
        self.class.inner_classes.push(entry);
        self
    }

    pub fn enclosing_method(mut self, class_name: &str, method: Option<(&str, &str)>) -> Self {
        self.class.enclosing_method = Some(EnclosingMethod {
            class_name: intern(class_name),
            method_name: method.map(|(name, _)| intern(name)),
            method_descriptor: method.map(|(_, desc)| intern(desc)),
        });
        self
    }

    /// Add a method, configured through a [`MethodBuilder`] closure
    pub fn method<F>(mut self, name: &str, descriptor: &str, configure: F) -> Self
    where
        F: FnOnce(MethodBuilder) -> MethodBuilder,
    {
        let built = configure(MethodBuilder::new(name, descriptor));
        let mut method = built.method;
        for (start, end, handler, catch_type) in built.handlers {
            let catch_type_index = match catch_type {
                Some(name) => {
                    let index = self.class.constant_pool.class_index(&name);
                    self.pool_index(index)
                }
                None => 0,
            };
            method.exception_entries.push(RawExceptionEntry {
                start_pc: start,
                end_pc: end,
                handler_pc: handler,
                catch_type_index,
            });
        }
        self.class.methods.push(method);
        self
    }

    pub fn try_build(self) -> Result<LoadedClass> {
        match self.pool_error {
            Some(e) => Err(e.with_unit(self.class.name.to_string())),
            None => Ok(self.class),
        }
    }

    /// Finish a fixture class
    ///
    /// # Panics
    ///
    /// When more than 65535 distinct names were declared; use
    /// [`try_build`](Self::try_build) for generated input.
    pub fn build(self) -> LoadedClass {
        match self.try_build() {
            Ok(class) => class,
            Err(e) => panic!("{}", e),
        }
    }
}

/// Method configuration used by [`LoadedClassBuilder::method`]
#[derive(Debug)]
pub struct MethodBuilder {
    method: MethodDescriptor,
    handlers: Vec<(u32, u32, u32, Option<String>)>,
}

impl MethodBuilder {
    fn new(name: &str, descriptor: &str) -> Self {
        Self {
            method: MethodDescriptor::new(name, descriptor),
            handlers: Vec::new(),
        }
    }

    pub fn access(mut self, access: AccessFlags) -> Self {
        self.method.access = access;
        self
    }

    pub fn synthetic(mut self) -> Self {
        self.method.access.insert(AccessFlags::SYNTHETIC);
        self
    }

    /// Add an exception-table entry; `catch_type = None` is a catch-all
    pub fn handler(mut self, start: u32, end: u32, handler: u32, catch_type: Option<&str>) -> Self {
        self.handlers
            .push((start, end, handler, catch_type.map(str::to_string)));
        self
    }
}
