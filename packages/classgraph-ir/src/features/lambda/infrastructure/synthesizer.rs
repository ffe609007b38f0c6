//! Lambda node synthesis
//!
//! Every call site becomes a LAMBDA child of its declaring class's node.
//! A call site is a real lambda only when its content method is a
//! synthetic method of the declaring class itself; anything else is a
//! method reference.

use crate::features::class_tree::{ClassForest, ClassNode, NodeId};
use crate::features::lambda::domain::{CallSiteDescriptor, InvocationKind, LambdaInfo};
use crate::session::DecompileSession;
use crate::shared::models::{ClassContext, Result};

pub struct LambdaSynthesizer<'s> {
    session: &'s DecompileSession,
}

impl<'s> LambdaSynthesizer<'s> {
    pub fn new(session: &'s DecompileSession) -> Self {
        Self { session }
    }

    /// Validate a call site and compute its lambda metadata
    pub fn describe(&self, context: &ClassContext, site: &CallSiteDescriptor) -> Result<LambdaInfo> {
        let kind = InvocationKind::from_code(site.invocation_kind)
            .map_err(|e| e.with_unit(site.declaring_class.to_string()))?;

        let is_method_reference = if site.content_class != site.declaring_class {
            true
        } else {
            let content = context
                .get(&site.declaring_class)
                .and_then(|class| class.method(&site.content_method, &site.content_descriptor));
            match content {
                Some(method) => !method.is_synthetic(),
                None => {
                    self.session.warn(&format!(
                        "Lambda content method {} {} not found in {}, treating as method reference",
                        site.content_method, site.content_descriptor, site.declaring_class
                    ));
                    true
                }
            }
        };

        Ok(LambdaInfo::new(site, kind, is_method_reference))
    }

    /// Attach one LAMBDA node; `None` when the declaring class has no node
    pub fn attach(
        &self,
        forest: &mut ClassForest,
        context: &ClassContext,
        site: &CallSiteDescriptor,
    ) -> Result<Option<NodeId>> {
        let info = self.describe(context, site)?;
        self.attach_described(forest, info)
    }

    fn attach_described(&self, forest: &mut ClassForest, info: LambdaInfo) -> Result<Option<NodeId>> {
        let Some(parent) = forest.node_of(&info.declaring_class) else {
            self.session.warn(&format!(
                "No class node for {}, lambda {} skipped",
                info.declaring_class, info.content_method_key
            ));
            return Ok(None);
        };
        forest.attach(parent, ClassNode::lambda(info)).map(Some)
    }

    /// Attach the call sites of one unit, all or nothing
    ///
    /// Every site is validated before the forest is touched, so an invalid
    /// invocation kind leaves no partial lambdas behind.
    pub fn attach_all(
        &self,
        forest: &mut ClassForest,
        context: &ClassContext,
        sites: &[CallSiteDescriptor],
    ) -> Result<Vec<NodeId>> {
        let described = sites
            .iter()
            .map(|site| self.describe(context, site))
            .collect::<Result<Vec<_>>>()?;

        let mut attached = Vec::with_capacity(described.len());
        for info in described {
            if let Some(id) = self.attach_described(forest, info)? {
                attached.push(id);
            }
        }
        Ok(attached)
    }
}
