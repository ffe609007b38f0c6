mod method_index;
mod table;

pub use method_index::MethodExceptionIndex;
pub use table::{ExceptionHandler, ExceptionTable};
