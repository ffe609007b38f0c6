pub mod convention_renamer;
pub mod rename_cache;

pub use convention_renamer::{ConventionRenamer, NoRenaming};
pub use rename_cache::{RenameCache, RenameCacheStats};
