// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # LSP backend
//!
//! The tower-lsp server for sqlform documents.
//!
//! ## Overview
//!
//! The backend owns the document store, the engine configuration, and
//! the compile cache, and drives a validation round on open and on save:
//!
//! ```text
//! Client ──LSP──→ Backend ──→ DocumentStore
//!                    │
//!                    ├──→ CompileCache ──→ pipeline (scan/assemble/remap)
//!                    │                          │
//!                    │                    DryRunValidator
//!                    └──←── publish_diagnostics ←┘
//! ```
//!
//! Diagnostics are published as a complete set per round; each publish
//! replaces the previous set for that document. Rounds for the same
//! document are last-write-wins at the publish boundary, so the client
//! should not issue overlapping saves for one document.

use std::sync::Arc;

use sqlform_diagnostics::DryRunValidator;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{error, info, warn};

use crate::cache::CompileCache;
use crate::config::{ConfigError, EngineConfig};
use crate::document::{DocumentError, DocumentStore};
use crate::pipeline::validate_compiled;
use crate::validator::CommandValidator;

/// LSP backend for sqlform documents.
pub struct LspBackend {
    /// LSP client for sending notifications and requests
    client: Client,

    /// Document store for managing open documents
    documents: Arc<DocumentStore>,

    /// Engine configuration
    config: Arc<RwLock<EngineConfig>>,

    /// Compile cache, invalidated on edit and close
    cache: Arc<CompileCache>,

    /// Validator injected by tests; production rounds build a
    /// [`CommandValidator`] from the current configuration instead
    validator_override: Option<Arc<dyn DryRunValidator>>,
}

impl LspBackend {
    /// Create a backend with the runtime-fallback configuration.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(DocumentStore::new()),
            config: Arc::new(RwLock::new(EngineConfig::default_runtime_fallback())),
            cache: Arc::new(CompileCache::new()),
            validator_override: None,
        }
    }

    /// Create a backend with a fixed validator (test entry point).
    pub fn with_validator(client: Client, validator: Arc<dyn DryRunValidator>) -> Self {
        Self {
            validator_override: Some(validator),
            ..Self::new(client)
        }
    }

    /// Get the document store.
    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    /// Snapshot of the engine configuration.
    pub async fn get_config(&self) -> EngineConfig {
        self.config.read().await.clone()
    }

    /// Run one validation round for a document and publish the result.
    ///
    /// Validator transport failures are logged and leave the previous
    /// diagnostic set untouched; they never take the server down.
    async fn run_validation(&self, uri: Url) {
        let config = self.get_config().await;

        let Some(document) = self.documents.get_document(&uri).await else {
            warn!("validation requested for unopened document: {uri}");
            return;
        };

        let compiled = self
            .cache
            .get_or_compile(&uri, document.version(), &document.text())
            .await;

        let validator: Arc<dyn DryRunValidator> = match &self.validator_override {
            Some(validator) => Arc::clone(validator),
            None => {
                if let Err(e) = config.validate() {
                    warn!("skipping validation: {e}");
                    self.client
                        .log_message(MessageType::WARNING, format!("sqlform: {e}"))
                        .await;
                    return;
                }
                Arc::new(CommandValidator::from_config(&config))
            }
        };

        match validate_compiled(validator.as_ref(), config.execution_mode, &compiled).await {
            Ok(diagnostics) => {
                info!(
                    "publishing {} diagnostic(s) for {uri}",
                    diagnostics.len()
                );
                // Full replacement of the previous set for this document.
                self.client.publish_diagnostics(uri, diagnostics, None).await;
            }
            Err(e) => {
                warn!("validation round failed for {uri}: {e}");
                self.client
                    .log_message(MessageType::WARNING, format!("sqlform validation failed: {e}"))
                    .await;
            }
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LspBackend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("initializing sqlform language server");
        info!("client info: {:?}", params.client_info);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::INCREMENTAL),
                        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                            include_text: Some(false),
                        })),
                        ..Default::default()
                    },
                )),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: crate::SERVER_NAME.to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        info!("sqlform language server initialized");
    }

    async fn shutdown(&self) -> Result<()> {
        info!("shutting down sqlform language server");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        info!(
            "document opened: uri={}, language={}, version={}",
            doc.uri, doc.language_id, doc.version
        );

        self.documents
            .open_document(doc.uri.clone(), doc.text, doc.version, doc.language_id)
            .await;
        self.run_validation(doc.uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let identifier = params.text_document;
        let uri = identifier.uri.clone();

        // The compiled statement no longer matches the text; diagnostics
        // are refreshed on the next save.
        self.cache.invalidate(&uri).await;

        match self
            .documents
            .update_document(&identifier, &params.content_changes)
            .await
        {
            Ok(()) => {}
            Err(DocumentError::DocumentNotFound(uri)) => {
                warn!("change for unopened document: {uri}");
            }
            Err(e) => {
                error!("failed to apply document change: {e}");
                self.client
                    .show_message(MessageType::ERROR, format!("sqlform: {e}"))
                    .await;
            }
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri;
        info!("document saved: uri={uri}");

        if !self.get_config().await.validate_on_save {
            return;
        }
        self.run_validation(uri).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        info!("document closed: uri={uri}");

        self.cache.invalidate(&uri).await;
        if self.documents.close_document(&uri).await {
            // Clear any diagnostics still shown for the closed document.
            self.client.publish_diagnostics(uri, Vec::new(), None).await;
        } else {
            warn!("close for unopened document: {uri}");
        }
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        match EngineConfig::from_lsp_settings(&params.settings) {
            Some(config) => {
                info!(
                    "engine configuration updated: mode={:?}, validator={}",
                    config.execution_mode, config.validator_command
                );
                *self.config.write().await = config;
            }
            None => {
                warn!("configuration payload had no usable sqlform section");
            }
        }
    }
}

/// LSP backend errors
#[derive(Debug, thiserror::Error)]
pub enum LspError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Document error
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Validator transport error
    #[error("validator error: {0}")]
    Validator(#[from] sqlform_diagnostics::ValidatorError),
}
