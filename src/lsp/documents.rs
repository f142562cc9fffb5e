use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp_server::Client;
use tower_lsp_server::ls_types::*;

use super::config::load_config;
use super::conversions::{convert_diagnostic, input_too_large};

/// Handle textDocument/didOpen notification
pub(crate) async fn did_open(
    client: &Client,
    document_map: Arc<Mutex<HashMap<String, String>>>,
    workspace_root: Arc<Mutex<Option<PathBuf>>>,
    params: DidOpenTextDocumentParams,
) {
    let uri = params.text_document.uri.to_string();
    let text = params.text_document.text;

    document_map.lock().await.insert(uri.clone(), text.clone());

    client
        .log_message(MessageType::INFO, format!("Opened document: {}", uri))
        .await;

    analyze_and_publish(client, &workspace_root, params.text_document.uri, text).await;
}

/// Handle textDocument/didChange notification
pub(crate) async fn did_change(
    client: &Client,
    document_map: Arc<Mutex<HashMap<String, String>>>,
    workspace_root: Arc<Mutex<Option<PathBuf>>>,
    params: DidChangeTextDocumentParams,
) {
    let uri = params.text_document.uri.to_string();

    // Full sync: the last change carries the whole document
    let Some(change) = params.content_changes.into_iter().last() else {
        return;
    };

    {
        let mut document_map = document_map.lock().await;
        match document_map.get_mut(&uri) {
            Some(text) => *text = change.text.clone(),
            None => return,
        }
    }

    analyze_and_publish(client, &workspace_root, params.text_document.uri, change.text).await;
}

/// Handle textDocument/didClose notification
pub(crate) async fn did_close(
    client: &Client,
    document_map: Arc<Mutex<HashMap<String, String>>>,
    params: DidCloseTextDocumentParams,
) {
    let uri = params.text_document.uri.to_string();
    document_map.lock().await.remove(&uri);

    // Clear diagnostics
    client
        .publish_diagnostics(params.text_document.uri, vec![], None)
        .await;
}

/// Re-run the whole pipeline on `text` and publish the result.
async fn analyze_and_publish(
    client: &Client,
    workspace_root: &Arc<Mutex<Option<PathBuf>>>,
    uri: Uri,
    text: String,
) {
    let root = workspace_root.lock().await.clone();
    let config = load_config(client, &root, &uri).await;

    if config.exceeds_input_limit(&text) {
        let diagnostic = input_too_large(text.len(), config.max_input_bytes);
        client.publish_diagnostics(uri, vec![diagnostic], None).await;
        return;
    }

    let text_clone = text.clone();
    let report = tokio::task::spawn_blocking(move || config.pipeline().run(&text_clone)).await;

    match report {
        Ok(report) => {
            let lsp_diagnostics: Vec<Diagnostic> = report
                .diagnostics()
                .iter()
                .map(|d| convert_diagnostic(d, &text))
                .collect();

            client.publish_diagnostics(uri, lsp_diagnostics, None).await;
        }
        Err(e) => {
            client
                .log_message(MessageType::ERROR, format!("Analysis task failed: {}", e))
                .await;
        }
    }
}
