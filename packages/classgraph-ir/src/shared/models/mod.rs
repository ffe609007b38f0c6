//! Shared models

pub mod access_flags;
pub mod class_context;
pub mod class_file;
mod error;

pub use access_flags::AccessFlags;
pub use class_context::{ClassContext, ClassUnit};
pub use class_file::{
    method_key, ConstantPool, EnclosingMethod, LoadedClass, LoadedClassBuilder, MethodBuilder,
    MethodDescriptor, PoolEntry, RawExceptionEntry, RawInnerClassEntry,
};
pub use error::{ClassgraphError, ErrorKind, Result, UnitFailure};
