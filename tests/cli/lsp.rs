//! LSP subcommand tests
//!
//! Note: These are basic smoke tests. Protocol behaviour is covered by the
//! in-memory tests in tests/lsp/.

use assert_cmd::cargo::cargo_bin_cmd;
use std::time::Duration;

#[test]
fn test_lsp_starts() {
    // We send EOF immediately to trigger shutdown
    let cmd = cargo_bin_cmd!("precheck")
        .arg("lsp")
        .write_stdin("")
        .timeout(Duration::from_secs(5))
        .assert();

    // LSP server may exit with 0 (clean shutdown) or 1 (EOF/broken pipe)
    let output = cmd.get_output();
    let exit_code = output.status.code().unwrap_or(1);
    assert!(
        exit_code == 0 || exit_code == 1,
        "LSP server failed to start"
    );
}

#[test]
fn test_lsp_initialization() {
    let body = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"capabilities":{},"processId":null,"rootUri":null,"workspaceFolders":null}}"#;
    let init_request = format!("Content-Length: {}\r\n\r\n{}", body.len(), body);

    let cmd = cargo_bin_cmd!("precheck")
        .arg("lsp")
        .write_stdin(init_request)
        .timeout(Duration::from_secs(5))
        .assert();

    let output = cmd.get_output();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        stdout.contains("Content-Length") || output.status.code().unwrap_or(1) <= 1,
        "LSP server did not respond to initialization"
    );
}
