use futures::{StreamExt, TryStreamExt};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};
use wistia_cli::api::{Asset, DOWNLOAD_CHUNK_SIZE, ProgressCallback, RequestError, WistiaClient};

const TOKEN: &str = "test-token";

fn client_for(server: &MockServer) -> WistiaClient {
    WistiaClient::with_endpoint(format!("{}/v1", server.uri()), TOKEN).unwrap()
}

fn medias(ids: &[&str]) -> serde_json::Value {
    json!(ids.iter().map(|id| json!({"hashed_id": id})).collect::<Vec<_>>())
}

async fn mount_page(server: &MockServer, page: u32, ids: &[&str], expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/v1/medias.json"))
        .and(query_param("project_id", "proj"))
        .and(query_param("page", page.to_string()))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(medias(ids)))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_list_media_page_sends_sorted_query_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/medias.json"))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param("project_id", "proj"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "2"))
        .and(query_param("sort_by", "created"))
        .and(query_param("sort_direction", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(medias(&["newest", "older"])))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).list_media_page("proj", 1, 2).await.unwrap();

    let ids: Vec<_> = page.iter().map(|m| m.hashed_id.as_str()).collect();
    assert_eq!(ids, ["newest", "older"]);
}

#[tokio::test]
async fn test_second_page_of_three_items_has_one_item() {
    let server = MockServer::start().await;
    mount_page(&server, 1, &["c", "b"], 1).await;
    mount_page(&server, 2, &["a"], 1).await;

    let client = client_for(&server);
    assert_eq!(client.list_media_page("proj", 1, 2).await.unwrap().len(), 2);
    assert_eq!(client.list_media_page("proj", 2, 2).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_all_media_stops_after_short_page() {
    let server = MockServer::start().await;
    mount_page(&server, 1, &["c", "b"], 1).await;
    mount_page(&server, 2, &["a"], 1).await;
    mount_page(&server, 3, &[], 0).await;

    let all: Vec<_> = client_for(&server)
        .list_all_media("proj", 2)
        .try_collect()
        .await
        .unwrap();

    let ids: Vec<_> = all.iter().map(|m| m.hashed_id.as_str()).collect();
    assert_eq!(ids, ["c", "b", "a"]);
}

#[tokio::test]
async fn test_list_all_media_exact_multiple_requests_one_empty_page() {
    let server = MockServer::start().await;
    mount_page(&server, 1, &["d", "c"], 1).await;
    mount_page(&server, 2, &["b", "a"], 1).await;
    mount_page(&server, 3, &[], 1).await;
    mount_page(&server, 4, &[], 0).await;

    let all: Vec<_> = client_for(&server)
        .list_all_media("proj", 2)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn test_list_all_media_is_restartable() {
    let server = MockServer::start().await;
    mount_page(&server, 1, &["b", "a"], 2).await;
    mount_page(&server, 2, &[], 2).await;

    let client = client_for(&server);
    let first: Vec<_> = client.list_all_media("proj", 2).try_collect().await.unwrap();
    let second: Vec<_> = client.list_all_media("proj", 2).try_collect().await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
}

#[tokio::test]
async fn test_list_all_media_error_ends_stream() {
    let server = MockServer::start().await;
    mount_page(&server, 1, &["b", "a"], 1).await;
    Mock::given(method("GET"))
        .and(path("/v1/medias.json"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut stream = Box::pin(client.list_all_media("proj", 2));

    assert_eq!(stream.next().await.unwrap().unwrap().hashed_id, "b");
    assert_eq!(stream.next().await.unwrap().unwrap().hashed_id, "a");
    match stream.next().await {
        Some(Err(RequestError::Api { status, .. })) => assert_eq!(status, 500),
        other => panic!("expected API error, got {:?}", other),
    }
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_empty_page_body_is_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/medias.json"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let page = client_for(&server).list_media_page("proj", 1, 100).await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_delete_media() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/medias/abc123.json"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"hashed_id": "abc123", "name": "Intro"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let deleted = client_for(&server).delete_media("abc123").await.unwrap();
    assert_eq!(deleted.and_then(|m| m.name).as_deref(), Some("Intro"));
}

#[tokio::test]
async fn test_non_success_status_is_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/medias/missing.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .mount(&server)
        .await;

    let err = client_for(&server).delete_media("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/medias/abc123/captions.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_captions("abc123").await.unwrap_err();
    assert!(matches!(err, RequestError::Decode { .. }));
}

#[tokio::test]
async fn test_list_captions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/medias/abc123/captions.json"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"language": "eng", "english_name": "English"},
            {"language": "fr", "english_name": "French"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let captions = client_for(&server).list_captions("abc123").await.unwrap();
    let languages: Vec<_> = captions.iter().map(|c| c.language.as_str()).collect();
    assert_eq!(languages, ["eng", "fr"]);
}

#[tokio::test]
async fn test_upload_caption_sends_multipart_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/medias/abc123/captions.json"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_string_contains("name=\"language\""))
        .and(body_string_contains("name=\"caption_file\""))
        .and(body_string_contains("00:00:00,000 --> 00:00:01,000"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .upload_caption("abc123", "fr", "1\n00:00:00,000 --> 00:00:01,000\nBonjour\n")
        .await
        .unwrap();
    assert!(response.is_none());
}

#[tokio::test]
async fn test_delete_caption_with_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/medias/abc123/captions/fr.json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).delete_caption("abc123", "fr").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_show_media_returns_assets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/medias/abc123.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hashed_id": "abc123",
            "assets": [{"url": "https://cdn.example/x.bin", "fileSize": 10, "type": "OriginalFile"}]
        })))
        .mount(&server)
        .await;

    let media = client_for(&server).show_media("abc123").await.unwrap().unwrap();
    assert_eq!(media.find_asset("OriginalFile").and_then(|a| a.file_size), Some(10));
}

fn asset_for(server: &MockServer, file_size: u64) -> Asset {
    serde_json::from_value(json!({
        "url": format!("{}/deliveries/original.bin", server.uri()),
        "fileSize": file_size,
        "type": "OriginalFile"
    }))
    .unwrap()
}

#[tokio::test]
async fn test_download_writes_all_bytes_in_chunks_with_progress() {
    let server = MockServer::start().await;
    let body: Vec<u8> = (0..(DOWNLOAD_CHUNK_SIZE * 2 + DOWNLOAD_CHUNK_SIZE / 2))
        .map(|i| (i % 251) as u8)
        .collect();
    Mock::given(method("GET"))
        .and(path("/deliveries/original.bin"))
        .and(|req: &Request| !req.headers.contains_key("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let asset = asset_for(&server, body.len() as u64);
    let mut sink: Vec<u8> = Vec::new();
    let mut fractions: Vec<f64> = Vec::new();
    let mut record = |fraction: f64| fractions.push(fraction);

    client_for(&server)
        .download_asset(&asset, &mut sink, Some(&mut record as ProgressCallback<'_>))
        .await
        .unwrap();

    assert_eq!(sink, body);
    assert_eq!(fractions.len(), 3);
    assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
    assert!((fractions[0] - 0.4).abs() < 1e-9);
    assert_eq!(*fractions.last().unwrap(), 1.0);
}

#[tokio::test]
async fn test_download_progress_reflects_wrong_declared_size() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/deliveries/original.bin"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![7u8; 300]))
        .mount(&server)
        .await;

    let asset = asset_for(&server, 100);
    let mut sink: Vec<u8> = Vec::new();
    let mut last = 0.0;
    let mut record = |fraction: f64| last = fraction;

    client_for(&server)
        .download_asset(&asset, &mut sink, Some(&mut record as ProgressCallback<'_>))
        .await
        .unwrap();

    assert_eq!(sink.len(), 300);
    assert_eq!(last, 3.0);
}

#[tokio::test]
async fn test_download_without_callback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/deliveries/original.bin"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"tiny".to_vec()))
        .mount(&server)
        .await;

    let asset = asset_for(&server, 4);
    let mut sink: Vec<u8> = Vec::new();
    client_for(&server)
        .download_asset(&asset, &mut sink, None)
        .await
        .unwrap();

    assert_eq!(sink, b"tiny");
}

#[tokio::test]
async fn test_download_error_status_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/deliveries/original.bin"))
        .respond_with(ResponseTemplate::new(403).set_body_string("expired"))
        .mount(&server)
        .await;

    let asset = asset_for(&server, 4);
    let mut sink: Vec<u8> = Vec::new();
    let mut calls = 0;
    let mut record = |_: f64| calls += 1;

    let err = client_for(&server)
        .download_asset(&asset, &mut sink, Some(&mut record as ProgressCallback<'_>))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert!(sink.is_empty());
    assert_eq!(calls, 0);
}

#[tokio::test]
async fn test_connection_failure_is_request_error() {
    // 何も待ち受けていないポート
    let client = WistiaClient::with_endpoint("http://127.0.0.1:9/v1", TOKEN).unwrap();
    let err = client.list_captions("abc123").await.unwrap_err();
    assert!(matches!(
        err,
        RequestError::Network { .. } | RequestError::Timeout { .. }
    ));
}

#[tokio::test]
async fn test_show_account_verifies_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/account.json"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Acme"})))
        .expect(1)
        .mount(&server)
        .await;

    let account = client_for(&server).show_account().await.unwrap().unwrap();
    assert_eq!(account["name"], "Acme");
}

#[tokio::test]
async fn test_unauthorized_is_config_severity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/account.json"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server).show_account().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(
        err.severity(),
        wistia_cli::error_severity::ErrorSeverity::ConfigError
    );
}

#[tokio::test]
async fn test_list_media_page_keeps_incomplete_assets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/medias.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"hashed_id": "a", "assets": [{"url": "u", "type": "OriginalFile"}]}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client.list_media_page("proj", 1, 100).await.unwrap();

    assert_eq!(page.len(), 1);
    let asset = page[0].find_asset("OriginalFile").unwrap();
    assert_eq!(asset.url.as_deref(), Some("u"));
    assert!(asset.file_size.is_none());

    let mut sink: Vec<u8> = Vec::new();
    let err = client.download_asset(asset, &mut sink, None).await.unwrap_err();
    assert!(matches!(err, RequestError::InvalidArgument { .. }));
}

/// 宣言した Content-Length より短い本文を送って接続を閉じるサーバー
async fn truncating_server(declared: usize, sent: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // リクエストヘッダーを読み切ってから応答する
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\n\r\n",
            declared
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(&sent).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{}/deliveries/original.bin", addr)
}

#[tokio::test]
async fn test_interrupted_download_keeps_received_bytes() {
    let declared = DOWNLOAD_CHUNK_SIZE * 3;
    let sent: Vec<u8> = (0..(DOWNLOAD_CHUNK_SIZE + DOWNLOAD_CHUNK_SIZE / 2))
        .map(|i| (i % 253) as u8)
        .collect();
    let url = truncating_server(declared, sent.clone()).await;

    let asset: Asset = serde_json::from_value(json!({
        "url": url,
        "fileSize": declared,
        "type": "OriginalFile"
    }))
    .unwrap();
    let client = WistiaClient::with_endpoint("http://127.0.0.1:9/v1", TOKEN).unwrap();
    let mut sink: Vec<u8> = Vec::new();
    let mut fractions: Vec<f64> = Vec::new();
    let mut record = |fraction: f64| fractions.push(fraction);

    let err = client
        .download_asset(&asset, &mut sink, Some(&mut record as ProgressCallback<'_>))
        .await
        .unwrap_err();

    assert!(matches!(err, RequestError::Network { .. }));
    assert_eq!(sink, sent);
    assert_eq!(fractions.len(), 2);
    assert!((fractions[1] - 0.5).abs() < 1e-9);
}
