//! Test helpers for LSP integration testing

use std::sync::Arc;
use tower_lsp_server::ls_types::*;
use tower_lsp_server::{LanguageServer, LspService};

use precheck::lsp::PrecheckLsp;

/// Wraps a `PrecheckLsp` created via `LspService::new`, the same way the
/// server is built in production.
pub struct TestLspServer {
    lsp: Arc<PrecheckLsp>,
}

impl TestLspServer {
    pub fn new() -> Self {
        let lsp_arc: Arc<std::sync::Mutex<Option<Arc<PrecheckLsp>>>> =
            Arc::new(std::sync::Mutex::new(None));
        let lsp_arc_clone = Arc::clone(&lsp_arc);

        let (_service, _socket) = LspService::new(move |client| {
            let lsp = Arc::new(PrecheckLsp::new(client));
            *lsp_arc_clone.lock().unwrap() = Some(Arc::clone(&lsp));
            LspWrapper { inner: lsp }
        });

        let lsp = lsp_arc
            .lock()
            .unwrap()
            .take()
            .expect("PrecheckLsp should have been initialized");

        Self { lsp }
    }

    pub async fn initialize(&self) -> InitializeResult {
        self.lsp
            .initialize(InitializeParams::default())
            .await
            .unwrap()
    }

    /// Simulates the `textDocument/didOpen` notification.
    pub async fn open_document(&self, uri: &str, content: &str) {
        let params = DidOpenTextDocumentParams {
            text_document: TextDocumentItem {
                uri: uri.parse().unwrap(),
                language_id: "java".to_string(),
                version: 0,
                text: content.to_string(),
            },
        };

        self.lsp.did_open(params).await;
    }

    /// Simulates the `textDocument/didChange` notification with FULL sync.
    pub async fn replace_document(&self, uri: &str, content: &str) {
        let params = DidChangeTextDocumentParams {
            text_document: VersionedTextDocumentIdentifier {
                uri: uri.parse().unwrap(),
                version: 1,
            },
            content_changes: vec![TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: content.to_string(),
            }],
        };

        self.lsp.did_change(params).await;
    }

    /// Simulates the `textDocument/didClose` notification.
    pub async fn close_document(&self, uri: &str) {
        let params = DidCloseTextDocumentParams {
            text_document: TextDocumentIdentifier {
                uri: uri.parse().unwrap(),
            },
        };

        self.lsp.did_close(params).await;
    }

    pub async fn get_document_content(&self, uri: &str) -> Option<String> {
        let doc_map = self.lsp.document_map();
        let docs = doc_map.lock().await;
        docs.get(uri).cloned()
    }
}

/// Delegates to the inner `Arc<PrecheckLsp>`, since `LspService` takes
/// ownership of its server.
struct LspWrapper {
    inner: Arc<PrecheckLsp>,
}

impl LanguageServer for LspWrapper {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> tower_lsp_server::jsonrpc::Result<InitializeResult> {
        self.inner.initialize(params).await
    }

    async fn initialized(&self, params: InitializedParams) {
        self.inner.initialized(params).await
    }

    async fn shutdown(&self) -> tower_lsp_server::jsonrpc::Result<()> {
        self.inner.shutdown().await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.inner.did_open(params).await
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        self.inner.did_change(params).await
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.inner.did_close(params).await
    }
}
