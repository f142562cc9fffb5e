use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp_server::{Client, LspService, Server};

mod config;
mod conversions;
mod documents;
mod server;

pub struct PrecheckLsp {
    client: Client,
    // Use String keys since Uri doesn't implement Send
    document_map: Arc<Mutex<HashMap<String, String>>>,
    workspace_root: Arc<Mutex<Option<PathBuf>>>,
}

impl PrecheckLsp {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            document_map: Arc::new(Mutex::new(HashMap::new())),
            workspace_root: Arc::new(Mutex::new(None)),
        }
    }

    /// Open documents keyed by URI, for inspecting server state in tests.
    pub fn document_map(&self) -> Arc<Mutex<HashMap<String, String>>> {
        Arc::clone(&self.document_map)
    }
}

pub async fn run() -> std::io::Result<()> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(PrecheckLsp::new);
    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}
