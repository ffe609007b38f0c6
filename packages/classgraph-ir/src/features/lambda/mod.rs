// Lambda - LAMBDA nodes for invokedynamic call sites
//
// Call-site descriptors → lambda metadata (real lambda vs. method
// reference, static content) attached under the declaring class's node.

pub mod domain;
pub mod infrastructure;

pub use domain::{CallSiteDescriptor, InvocationKind, LambdaInfo};
pub use infrastructure::LambdaSynthesizer;
