/// Kind of element a renaming query is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Class,
    Field,
    Method,
}

/// Identifier renaming capability
///
/// Implementations must be callable from several batch workers at once.
/// They must not call back into the [`RenameCache`](super::RenameCache)
/// that is querying them.
pub trait RenamingPolicy: Send + Sync {
    /// Whether `name` should be replaced
    fn should_rename(&self, kind: ElementKind, name: &str, context: Option<&str>) -> bool;

    /// Replacement simple name for the class identified by `original_key`
    fn next_class_name(&self, original_key: &str, name: &str) -> String;
}
