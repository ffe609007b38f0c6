//! Decompile session
//!
//! Explicit context for one batch: configuration, diagnostic sink, renaming
//! policy and the shared rename cache. Every component receives it by
//! reference; nothing is looked up from global state.

use std::sync::Arc;

use crate::config::DecompileConfig;
use crate::features::renaming::{ConventionRenamer, RenameCache, RenamingPolicy};
use crate::shared::ports::{DiagnosticSink, Severity, TracingSink};
use crate::shared::utils::intern::InternedString;

pub struct DecompileSession {
    config: DecompileConfig,
    sink: Arc<dyn DiagnosticSink>,
    renamer: Arc<dyn RenamingPolicy>,
    rename_cache: Arc<RenameCache>,
}

impl DecompileSession {
    /// Session logging through `tracing` with the convention renamer
    pub fn new(config: DecompileConfig) -> Self {
        Self {
            config,
            sink: Arc::new(TracingSink),
            renamer: Arc::new(ConventionRenamer::new()),
            rename_cache: Arc::new(RenameCache::new()),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_renamer(mut self, renamer: Arc<dyn RenamingPolicy>) -> Self {
        self.renamer = renamer;
        self
    }

    /// Share a rename cache with other sessions of the same run
    pub fn with_rename_cache(mut self, cache: Arc<RenameCache>) -> Self {
        self.rename_cache = cache;
        self
    }

    pub fn config(&self) -> &DecompileConfig {
        &self.config
    }

    pub fn sink(&self) -> &dyn DiagnosticSink {
        self.sink.as_ref()
    }

    pub fn rename_cache(&self) -> &Arc<RenameCache> {
        &self.rename_cache
    }

    pub fn warn(&self, message: &str) {
        self.sink.write_message(message, Severity::Warn);
    }

    pub fn error(&self, message: &str) {
        self.sink.write_message(message, Severity::Error);
    }

    /// Display name for a nested type, honouring `rename_entities`
    pub fn resolve_simple_name(&self, key: &InternedString, name: &InternedString) -> InternedString {
        self.rename_cache.resolve(
            self.renamer.as_ref(),
            key,
            name,
            self.config.rename_entities,
        )
    }
}

impl Default for DecompileSession {
    fn default() -> Self {
        Self::new(DecompileConfig::default())
    }
}

impl std::fmt::Debug for DecompileSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecompileSession")
            .field("config", &self.config)
            .field("rename_cache", &self.rename_cache.stats())
            .finish()
    }
}
