// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Compile cache
//!
//! Explicit, explicitly-invalidated cache of compiled statements, keyed
//! by document URI and version. The cache is owned by the backend and
//! passed by handle into the code that needs it; nothing here is process
//! global. A version mismatch is a miss, and edits and closes invalidate
//! eagerly, so a stale compile can never be served for newer text.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tower_lsp::lsp_types::Url;

use crate::pipeline::{CompiledStatement, compile_document};

/// Cache of the last compiled statement per open document.
#[derive(Debug, Default)]
pub struct CompileCache {
    entries: RwLock<HashMap<Url, (i32, Arc<CompiledStatement>)>>,
}

impl CompileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached compile for `uri`, if it matches `version`.
    pub async fn get(&self, uri: &Url, version: i32) -> Option<Arc<CompiledStatement>> {
        let entries = self.entries.read().await;
        entries
            .get(uri)
            .filter(|(cached_version, _)| *cached_version == version)
            .map(|(_, compiled)| Arc::clone(compiled))
    }

    /// Compile `text` for `uri`/`version`, reusing the cached result when
    /// the version still matches.
    pub async fn get_or_compile(
        &self,
        uri: &Url,
        version: i32,
        text: &str,
    ) -> Arc<CompiledStatement> {
        if let Some(compiled) = self.get(uri, version).await {
            return compiled;
        }
        let compiled = Arc::new(compile_document(text));
        self.entries
            .write()
            .await
            .insert(uri.clone(), (version, Arc::clone(&compiled)));
        compiled
    }

    /// Drop the entry for `uri`.
    pub async fn invalidate(&self, uri: &Url) {
        self.entries.write().await.remove(uri);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri() -> Url {
        Url::parse("file:///model.sqlx").expect("valid test url")
    }

    #[tokio::test]
    async fn same_version_hits_the_cache() {
        let cache = CompileCache::new();
        let first = cache.get_or_compile(&uri(), 1, "SELECT 1\n").await;
        let second = cache.get_or_compile(&uri(), 1, "SELECT 1\n").await;
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn version_bump_recompiles() {
        let cache = CompileCache::new();
        let first = cache.get_or_compile(&uri(), 1, "SELECT 1\n").await;
        let second = cache.get_or_compile(&uri(), 2, "SELECT 2\n").await;
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn invalidation_forces_a_recompile() {
        let cache = CompileCache::new();
        let first = cache.get_or_compile(&uri(), 1, "SELECT 1\n").await;
        cache.invalidate(&uri()).await;
        assert!(cache.get(&uri(), 1).await.is_none());
        let second = cache.get_or_compile(&uri(), 1, "SELECT 1\n").await;
        assert!(!Arc::ptr_eq(&first, &second));
    }
}
