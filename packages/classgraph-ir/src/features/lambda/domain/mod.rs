mod call_site;

pub use call_site::{CallSiteDescriptor, InvocationKind, LambdaInfo};
