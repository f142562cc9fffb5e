//! Tests for the initialize handshake.

use super::helpers::*;
use tower_lsp_server::ls_types::*;

#[tokio::test]
async fn test_full_document_sync() {
    let server = TestLspServer::new();
    let result = server.initialize().await;

    let Some(TextDocumentSyncCapability::Options(options)) =
        result.capabilities.text_document_sync
    else {
        panic!("expected text document sync options");
    };
    assert_eq!(options.open_close, Some(true));
    assert_eq!(options.change, Some(TextDocumentSyncKind::FULL));
}

#[tokio::test]
async fn test_server_info() {
    let server = TestLspServer::new();
    let result = server.initialize().await;

    let info = result.server_info.expect("server info is reported");
    assert_eq!(info.name, "precheck-lsp");
    assert_eq!(info.version.as_deref(), Some(env!("CARGO_PKG_VERSION")));
}
