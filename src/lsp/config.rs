use std::path::PathBuf;

use tower_lsp_server::Client;
use tower_lsp_server::ls_types::{MessageType, Uri};

/// Load config for a document, searching from its directory first and then
/// from the workspace root.
pub(crate) async fn load_config(
    client: &Client,
    workspace_root: &Option<PathBuf>,
    document_uri: &Uri,
) -> crate::Config {
    let document_dir = document_uri
        .to_file_path()
        .and_then(|p| p.parent().map(|dir| dir.to_path_buf()));

    let Some(start_dir) = document_dir.or_else(|| workspace_root.clone()) else {
        return crate::Config::default();
    };

    match crate::config::load(None, &start_dir) {
        Ok((config, path)) => {
            if let Some(p) = path {
                client
                    .log_message(
                        MessageType::INFO,
                        format!("Loaded config from {}", p.display()),
                    )
                    .await;
            }
            config
        }
        Err(e) => {
            client
                .log_message(
                    MessageType::WARNING,
                    format!("Failed to load config: {}", e),
                )
                .await;
            crate::Config::default()
        }
    }
}
