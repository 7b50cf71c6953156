// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Document management
//!
//! Open-document bookkeeping for the server. Content lives in a
//! `ropey::Rope` so incremental LSP edits stay cheap; the scanner always
//! sees a full snapshot, rescanning from scratch on every validation
//! round.

use ropey::Rope;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::lsp_types::{TextDocumentContentChangeEvent, Url, VersionedTextDocumentIdentifier};

/// A document managed by the server.
#[derive(Debug, Clone)]
pub struct Document {
    uri: Url,
    language_id: String,
    version: i32,
    content: Rope,
}

impl Document {
    /// Create a new document from its initial content.
    pub fn new(uri: Url, content: String, version: i32, language_id: String) -> Self {
        Self {
            uri,
            language_id,
            version,
            content: Rope::from_str(&content),
        }
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn line_count(&self) -> usize {
        self.content.len_lines()
    }

    /// Full document text.
    pub fn text(&self) -> String {
        self.content.to_string()
    }

    /// Apply LSP content changes.
    ///
    /// Handles both incremental (ranged) and full-document changes, in
    /// the order the client sent them.
    pub fn apply_changes(
        &mut self,
        changes: &[TextDocumentContentChangeEvent],
        new_version: i32,
    ) -> Result<(), DocumentError> {
        for change in changes {
            match &change.range {
                Some(range) => {
                    let start_line = range.start.line as usize;
                    let end_line = range.end.line as usize;

                    if start_line >= self.line_count() || end_line >= self.line_count() {
                        return Err(DocumentError::InvalidRange {
                            start: (start_line, range.start.character as usize),
                            end: (end_line, range.end.character as usize),
                        });
                    }

                    let start_char =
                        self.content.line_to_char(start_line) + range.start.character as usize;
                    let end_char =
                        self.content.line_to_char(end_line) + range.end.character as usize;

                    if start_char > end_char || end_char > self.content.len_chars() {
                        return Err(DocumentError::InvalidRange {
                            start: (start_line, range.start.character as usize),
                            end: (end_line, range.end.character as usize),
                        });
                    }

                    self.content.remove(start_char..end_char);
                    self.content.insert(start_char, &change.text);
                }
                None => {
                    self.content = Rope::from_str(&change.text);
                }
            }
        }

        self.version = new_version;
        Ok(())
    }
}

/// Thread-safe store for all open documents.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: Arc<RwLock<HashMap<Url, Document>>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or re-open) a document.
    pub async fn open_document(
        &self,
        uri: Url,
        content: String,
        version: i32,
        language_id: String,
    ) {
        let document = Document::new(uri.clone(), content, version, language_id);
        self.documents.write().await.insert(uri, document);
    }

    /// Close a document. Returns whether it existed.
    pub async fn close_document(&self, uri: &Url) -> bool {
        self.documents.write().await.remove(uri).is_some()
    }

    /// Apply changes to an open document.
    pub async fn update_document(
        &self,
        identifier: &VersionedTextDocumentIdentifier,
        changes: &[TextDocumentContentChangeEvent],
    ) -> Result<(), DocumentError> {
        let mut documents = self.documents.write().await;
        let document = documents
            .get_mut(&identifier.uri)
            .ok_or_else(|| DocumentError::DocumentNotFound(identifier.uri.clone()))?;
        document.apply_changes(changes, identifier.version)
    }

    /// Snapshot of a document by URI.
    pub async fn get_document(&self, uri: &Url) -> Option<Document> {
        self.documents.read().await.get(uri).cloned()
    }

    /// Number of open documents.
    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }
}

/// Document management errors
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The document is not open
    #[error("document not found: {0}")]
    DocumentNotFound(Url),

    /// A change range falls outside the document
    #[error("invalid range: {start:?}..{end:?}")]
    InvalidRange {
        start: (usize, usize),
        end: (usize, usize),
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::{Position, Range};

    fn url(path: &str) -> Url {
        Url::parse(&format!("file:///{path}")).expect("valid test url")
    }

    fn full_change(text: &str) -> TextDocumentContentChangeEvent {
        TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn open_get_close_roundtrip() {
        let store = DocumentStore::new();
        let uri = url("model.sqlx");
        store
            .open_document(uri.clone(), "SELECT 1\n".to_string(), 1, "sqlform".to_string())
            .await;

        let document = store.get_document(&uri).await.expect("document is open");
        assert_eq!(document.text(), "SELECT 1\n");
        assert_eq!(document.version(), 1);
        assert_eq!(document.language_id(), "sqlform");

        assert!(store.close_document(&uri).await);
        assert!(!store.close_document(&uri).await);
        assert_eq!(store.document_count().await, 0);
    }

    #[tokio::test]
    async fn incremental_change_replaces_the_range() {
        let store = DocumentStore::new();
        let uri = url("model.sqlx");
        store
            .open_document(uri.clone(), "SELECT 1\nFROM t\n".to_string(), 1, "sqlform".to_string())
            .await;

        let change = TextDocumentContentChangeEvent {
            range: Some(Range {
                start: Position::new(0, 7),
                end: Position::new(0, 8),
            }),
            range_length: None,
            text: "2".to_string(),
        };
        let identifier = VersionedTextDocumentIdentifier {
            uri: uri.clone(),
            version: 2,
        };
        store
            .update_document(&identifier, &[change])
            .await
            .expect("in-range change applies");

        let document = store.get_document(&uri).await.expect("document is open");
        assert_eq!(document.text(), "SELECT 2\nFROM t\n");
        assert_eq!(document.version(), 2);
    }

    #[tokio::test]
    async fn full_change_replaces_everything() {
        let store = DocumentStore::new();
        let uri = url("model.sqlx");
        store
            .open_document(uri.clone(), "SELECT 1\n".to_string(), 1, "sqlform".to_string())
            .await;

        let identifier = VersionedTextDocumentIdentifier {
            uri: uri.clone(),
            version: 3,
        };
        store
            .update_document(&identifier, &[full_change("SELECT 99\n")])
            .await
            .expect("full change applies");

        let document = store.get_document(&uri).await.expect("document is open");
        assert_eq!(document.text(), "SELECT 99\n");
    }

    #[tokio::test]
    async fn updating_an_unopened_document_fails() {
        let store = DocumentStore::new();
        let identifier = VersionedTextDocumentIdentifier {
            uri: url("ghost.sqlx"),
            version: 1,
        };
        let error = store
            .update_document(&identifier, &[full_change("x")])
            .await
            .expect_err("document was never opened");
        assert!(matches!(error, DocumentError::DocumentNotFound(_)));
    }

    #[tokio::test]
    async fn out_of_range_change_is_rejected() {
        let store = DocumentStore::new();
        let uri = url("model.sqlx");
        store
            .open_document(uri.clone(), "SELECT 1\n".to_string(), 1, "sqlform".to_string())
            .await;

        let change = TextDocumentContentChangeEvent {
            range: Some(Range {
                start: Position::new(10, 0),
                end: Position::new(10, 1),
            }),
            range_length: None,
            text: "x".to_string(),
        };
        let identifier = VersionedTextDocumentIdentifier { uri, version: 2 };
        let error = store
            .update_document(&identifier, &[change])
            .await
            .expect_err("range is outside the document");
        assert!(matches!(error, DocumentError::InvalidRange { .. }));
    }
}
