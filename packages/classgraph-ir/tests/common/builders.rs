//! Test data builders
//!
//! Sessions wired to a collecting sink, and call-site descriptors.

use classgraph_ir::shared::intern;
use classgraph_ir::{
    BatchOutcome, CallSiteDescriptor, ClassContext, ClassForest, ClassTreeDriver, CollectingSink,
    DecompileConfig, DecompileSession,
};
use std::sync::Arc;

/// Session with default config whose diagnostics are recorded
pub fn collecting_session() -> (DecompileSession, Arc<CollectingSink>) {
    collecting_session_with(DecompileConfig::default())
}

pub fn collecting_session_with(config: DecompileConfig) -> (DecompileSession, Arc<CollectingSink>) {
    let sink = Arc::new(CollectingSink::new());
    let session = DecompileSession::new(config).with_sink(sink.clone());
    (session, sink)
}

/// Run the full driver; setup must not fail in tests
pub fn run(session: &DecompileSession, context: &ClassContext) -> BatchOutcome {
    run_with_sites(session, context, &[])
}

pub fn run_with_sites(
    session: &DecompileSession,
    context: &ClassContext,
    call_sites: &[CallSiteDescriptor],
) -> BatchOutcome {
    ClassTreeDriver::new(session)
        .run(context, call_sites)
        .expect("driver setup failed")
}

pub fn build_forest(session: &DecompileSession, context: &ClassContext) -> ClassForest {
    run(session, context).forest
}

/// Builder for [`CallSiteDescriptor`]
#[derive(Debug, Clone)]
pub struct CallSiteBuilder {
    site: CallSiteDescriptor,
}

impl CallSiteBuilder {
    /// Static lambda body `content_method ()V` in `declaring`, implementing
    /// `java/lang/Runnable.run`
    pub fn new(declaring: &str, content_method: &str) -> Self {
        Self {
            site: CallSiteDescriptor {
                declaring_class: intern(declaring),
                content_class: intern(declaring),
                content_method: intern(content_method),
                content_descriptor: intern("()V"),
                invocation_kind: 6,
                interface_name: intern("java/lang/Runnable"),
                interface_method: intern("run"),
                interface_descriptor: intern("()V"),
            },
        }
    }

    pub fn holder(mut self, class_name: &str) -> Self {
        self.site.content_class = intern(class_name);
        self
    }

    pub fn kind(mut self, code: u8) -> Self {
        self.site.invocation_kind = code;
        self
    }

    pub fn interface(mut self, name: &str, method: &str, descriptor: &str) -> Self {
        self.site.interface_name = intern(name);
        self.site.interface_method = intern(method);
        self.site.interface_descriptor = intern(descriptor);
        self
    }

    pub fn build(self) -> CallSiteDescriptor {
        self.site
    }
}
