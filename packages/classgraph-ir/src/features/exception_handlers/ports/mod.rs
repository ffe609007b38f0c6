/// Subtype queries over class names
///
/// Shared by every exception lookup of a batch, possibly from several
/// threads at once.
pub trait SubtypeOracle: Send + Sync {
    /// Whether `sub` is `sup` or one of its subtypes
    fn is_subtype(&self, sub: &str, sup: &str) -> bool;
}
