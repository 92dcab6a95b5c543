//! Attachment endpoint tests against a mock HTTP server.
//!
//! Run with: `cargo test -p pairspan-api-client --test attachments_test`

use std::io::Write;

use mockito::Matcher;
use pairspan_api_client::{ApiClient, ApiError};
use pairspan_core::{
    AttachmentService, ClientConfig, DateFormat, FetchError, PairAggregate, TransferError,
};

fn client_for(server: &mockito::Server) -> ApiClient {
    ApiClient::new(ClientConfig::default().with_base_url(server.url())).unwrap()
}

fn work_log(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "1, P1, 2020-01-01, 2020-03-01").unwrap();
    writeln!(file, "2, P1, 2020-02-01, NULL").unwrap();
    path
}

#[tokio::test]
async fn test_upload_sends_pattern_and_file_field() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/attachments/upload")
        .match_query(Matcher::UrlEncoded(
            "pattern".into(),
            "dd/MM/yyyy".into(),
        ))
        .match_header("accept", "application/json")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="file"; filename="log.csv""#.into()),
            Matcher::Regex("2020-02-01".into()),
        ]))
        .with_status(200)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = work_log(&dir, "log.csv");
    let client = client_for(&server);

    let uploaded = client
        .upload_attachment(&path, DateFormat::DayMonthYearSlash)
        .await
        .unwrap();

    assert_eq!(uploaded.identifier, "log.csv");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_rejection_is_validation_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/attachments/upload")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body("Text '01/02/2020' could not be parsed")
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = work_log(&dir, "log.csv");
    let client = client_for(&server);

    let err = client.upload(&path, DateFormat::IsoDash).await.unwrap_err();
    assert_eq!(
        err,
        TransferError::Validation("Text '01/02/2020' could not be parsed".to_string())
    );
}

#[tokio::test]
async fn test_upload_server_error_keeps_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/attachments/upload")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = work_log(&dir, "log.csv");
    let client = client_for(&server);

    let err = client.upload(&path, DateFormat::IsoDash).await.unwrap_err();
    assert!(matches!(err, TransferError::Server { status: 500, .. }));
}

#[tokio::test]
async fn test_upload_missing_file_never_reaches_server() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/attachments/upload")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server);

    let err = client
        .upload_attachment(&dir.path().join("missing.csv"), DateFormat::IsoDash)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Io { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_rejects_parent_dir_path() {
    let server = mockito::Server::new_async().await;
    let client = client_for(&server);

    let err = client
        .upload(std::path::Path::new("../log.csv"), DateFormat::IsoDash)
        .await
        .unwrap_err();
    assert!(matches!(err, TransferError::Validation(_)));
}

#[tokio::test]
async fn test_unreachable_service_is_network_failure() {
    let client =
        ApiClient::new(ClientConfig::default().with_base_url("http://127.0.0.1:1")).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = work_log(&dir, "log.csv");

    let err = client.upload(&path, DateFormat::IsoDash).await.unwrap_err();
    assert!(matches!(err, TransferError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn test_fetch_pairs_is_json_get_without_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/attachments/log.csv")
        .match_header("accept", "application/json")
        .match_body("")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"employeeIdFirst":"1","employeeIdSecond":"2","projectId":"P1","daysWorked":5},
                {"employeeIdFirst":"1","employeeIdSecond":"3","projectId":"P1","daysWorked":9}
            ]"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let pairs = client.get_attachment_pairs("log.csv").await.unwrap();

    assert_eq!(
        pairs,
        vec![
            PairAggregate::new("1", "2", "P1", 5),
            PairAggregate::new("1", "3", "P1", 9),
        ]
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_pairs_encodes_identifier() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/attachments/work%20log.csv")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = client_for(&server);
    let pairs = client.get_attachment_pairs("work log.csv").await.unwrap();

    assert!(pairs.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_failure_is_not_cancellation() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/attachments/log.csv")
        .with_status(404)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.fetch_pairs("log.csv").await.unwrap_err();

    assert!(matches!(err, FetchError::Other(_)));
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_fetch_malformed_json_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/attachments/log.csv")
        .with_status(200)
        .with_body(r#"{"not":"a list"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.get_attachment_pairs("log.csv").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
