//! Tests for basic document lifecycle (open, edit, close).

use super::helpers::*;

const URI: &str = "file:///Main.java";

#[tokio::test]
async fn test_open_document() {
    let server = TestLspServer::new();

    server
        .open_document(URI, "public class Main {\n}")
        .await;

    let content = server.get_document_content(URI).await;
    assert_eq!(content, Some("public class Main {\n}".to_string()));
}

#[tokio::test]
async fn test_close_document() {
    let server = TestLspServer::new();

    server.open_document(URI, "class A {}").await;
    server.close_document(URI).await;

    let content = server.get_document_content(URI).await;
    assert_eq!(content, None);
}

#[tokio::test]
async fn test_full_replace() {
    let server = TestLspServer::new();

    server.open_document(URI, "class A {").await;
    server
        .replace_document(URI, "class A {\n    int x;\n}")
        .await;

    let content = server.get_document_content(URI).await;
    assert_eq!(content, Some("class A {\n    int x;\n}".to_string()));
}

#[tokio::test]
async fn test_change_to_unknown_document_is_ignored() {
    let server = TestLspServer::new();

    server.replace_document(URI, "class A {}").await;

    assert_eq!(server.get_document_content(URI).await, None);
}

#[tokio::test]
async fn test_empty_document_is_kept() {
    let server = TestLspServer::new();

    server.open_document(URI, "").await;

    assert_eq!(server.get_document_content(URI).await, Some(String::new()));
}
