mod hierarchy_oracle;

pub use hierarchy_oracle::{ClassHierarchyOracle, JAVA_LANG_OBJECT};
