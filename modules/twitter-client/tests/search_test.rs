//! `search_tweets` against a local one-shot HTTP server.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use twitter_client::{Credentials, SearchParams, TwitterClient, TwitterError};

fn credentials() -> Credentials {
    Credentials {
        consumer_key: "test-consumer-key".into(),
        consumer_secret: "test-consumer-secret".into(),
        access_token: "test-access-token".into(),
        access_token_secret: "test-access-token-secret".into(),
    }
}

fn params(max_id: Option<u64>) -> SearchParams {
    SearchParams {
        query: "#DAX".into(),
        count: 100,
        since_id: 1,
        max_id,
    }
}

/// Serve a single response, then hand back the raw request head.
async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut head = Vec::new();
        let mut buf = [0u8; 4096];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&head).into_owned()
    });

    (base_url, handle)
}

fn request_line(head: &str) -> &str {
    head.lines().next().unwrap_or_default()
}

#[tokio::test]
async fn first_page_request() {
    let body = r##"{
        "statuses": [{
            "id": 18446744073709551615,
            "created_at": "Thu Mar 14 09:45:00 +0000 2019",
            "full_text": "#DAX at a record",
            "user": { "screen_name": "boersenticker" },
            "entities": { "hashtags": [{ "text": "DAX" }] }
        }]
    }"##;
    let (base_url, server) = serve_once("200 OK", body.to_string()).await;
    let client = TwitterClient::new(credentials()).with_base_url(base_url);

    let statuses = client.search_tweets(&params(None)).await.unwrap();
    let head = server.await.unwrap();

    assert_eq!(
        request_line(&head),
        "GET /search/tweets.json?q=%23DAX&count=100&since_id=1&result_type=recent&tweet_mode=extended&include_entities=true HTTP/1.1"
    );
    let lower = head.to_lowercase();
    assert!(lower.contains("authorization: oauth "), "no oauth header: {head}");
    assert!(lower.contains("oauth_signature="));
    assert!(lower.contains(r#"oauth_consumer_key="test-consumer-key""#));

    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].id, u64::MAX);
    assert_eq!(statuses[0].hashtags(), vec!["DAX"]);
}

#[tokio::test]
async fn bounded_page_sends_max_id() {
    let (base_url, server) = serve_once("200 OK", r#"{"statuses": []}"#.to_string()).await;
    let client = TwitterClient::new(credentials()).with_base_url(base_url);

    let statuses = client.search_tweets(&params(Some(99))).await.unwrap();
    let head = server.await.unwrap();

    let line = request_line(&head);
    assert!(line.starts_with("GET /search/tweets.json?q=%23DAX&"), "{line}");
    assert!(line.contains("&max_id=99 "), "{line}");
    assert!(statuses.is_empty());
}

#[tokio::test]
async fn unauthorized_maps_to_api_error() {
    let body = r#"{"errors":[{"code":32,"message":"Could not authenticate you."}]}"#;
    let (base_url, server) = serve_once("401 Unauthorized", body.to_string()).await;
    let client = TwitterClient::new(credentials()).with_base_url(base_url);

    let result = client.search_tweets(&params(None)).await;
    server.await.unwrap();

    match result {
        Err(TwitterError::Api {
            status,
            code,
            message,
        }) => {
            assert_eq!(status, 401);
            assert_eq!(code, Some(32));
            assert!(message.contains("Could not authenticate you."));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let (base_url, server) = serve_once("200 OK", "<html>maintenance</html>".to_string()).await;
    let client = TwitterClient::new(credentials()).with_base_url(base_url);

    let result = client.search_tweets(&params(None)).await;
    server.await.unwrap();

    assert!(matches!(result, Err(TwitterError::Parse(_))));
}
