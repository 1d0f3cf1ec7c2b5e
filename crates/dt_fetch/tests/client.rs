use std::time::Duration;
use dt_core::{ArticleSource, Error, FetchError};
use dt_fetch::{DevToClient, FetchConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

fn http_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    )
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    String::from_utf8_lossy(&buf).to_string()
}

/// Serves one canned response per incoming connection and hands back the raw
/// requests it saw.
async fn serve(responses: Vec<String>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for response in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            requests.push(read_request(&mut socket).await);
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        }
        requests
    });
    (format!("http://{}/api", addr), handle)
}

fn client(base_url: String, per_page: u32, timeout: Duration) -> DevToClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    let config = FetchConfig {
        base_url,
        timeout,
        per_page,
        ..Default::default()
    };
    DevToClient::with_client(http, "secret-key", config).unwrap()
}

const TWO_ARTICLES: &str = r#"[
    {"id": 1, "title": "First", "url": "https://dev.to/me/first", "published_at": "2024-05-01T08:00:00Z",
     "page_views_count": 120, "public_reactions_count": 9, "comments_count": 2, "reading_time_minutes": 4,
     "tag_list": ["rust", "beginners"]},
    {"id": 2, "title": "Second", "url": "https://dev.to/me/second", "published_at": "2024-06-11T18:30:00Z",
     "page_views_count": null, "public_reactions_count": 1, "comments_count": null, "reading_time_minutes": 12,
     "tag_list": []}
]"#;

#[tokio::test]
async fn fetches_and_normalizes_articles() {
    let (base_url, server) = serve(vec![http_response("200 OK", TWO_ARTICLES)]).await;
    let articles = client(base_url, 1000, Duration::from_secs(5))
        .fetch_articles()
        .await
        .unwrap();

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "First");
    assert_eq!(articles[0].tags, vec!["rust", "beginners"]);
    assert_eq!(articles[1].page_views, 0);
    assert_eq!(articles[1].comments, 0);

    let requests = server.await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = requests[0].to_lowercase();
    assert!(request.starts_with("get /api/articles/me/published?page=1&per_page=1000 "));
    assert!(request.contains("api-key: secret-key"));
}

#[tokio::test]
async fn follows_pagination_until_short_page() {
    let page_one = r#"[
        {"id": 1, "title": "A", "published_at": "2024-01-01T00:00:00Z"},
        {"id": 2, "title": "B", "published_at": "2024-01-02T00:00:00Z"}
    ]"#;
    let page_two = r#"[{"id": 3, "title": "C", "published_at": "2024-01-03T00:00:00Z"}]"#;
    let (base_url, server) = serve(vec![
        http_response("200 OK", page_one),
        http_response("200 OK", page_two),
    ])
    .await;

    let articles = client(base_url, 2, Duration::from_secs(5))
        .fetch_articles()
        .await
        .unwrap();
    let ids: Vec<u64> = articles.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let requests = server.await.unwrap();
    assert!(requests[1].contains("page=2&per_page=2"));
}

#[tokio::test]
async fn rejected_key_is_unauthorized() {
    let (base_url, _server) = serve(vec![http_response(
        "401 Unauthorized",
        r#"{"error":"unauthorized","status":401}"#,
    )])
    .await;
    let err = client(base_url, 1000, Duration::from_secs(5))
        .fetch_articles()
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fetch(FetchError::Unauthorized(401))));
}

#[tokio::test]
async fn server_error_keeps_status_and_body() {
    let (base_url, _server) = serve(vec![http_response("503 Service Unavailable", "maintenance")]).await;
    let err = client(base_url, 1000, Duration::from_secs(5))
        .fetch_articles()
        .await
        .unwrap_err();
    match err {
        Error::Fetch(FetchError::Status { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn non_array_body_is_malformed() {
    let (base_url, _server) = serve(vec![http_response("200 OK", r#"{"articles": []}"#)]).await;
    let err = client(base_url, 1000, Duration::from_secs(5))
        .fetch_articles()
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fetch(FetchError::Malformed(_))));
}

#[tokio::test]
async fn non_object_element_is_kept_with_defaults() {
    let body = r#"[{"id": 5, "title": "Fine", "published_at": "2024-02-02T00:00:00Z", "page_views_count": 40}, null]"#;
    let (base_url, _server) = serve(vec![http_response("200 OK", body)]).await;
    let articles = client(base_url, 1000, Duration::from_secs(5))
        .fetch_articles()
        .await
        .unwrap();

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].id, 5);
    assert_eq!(articles[0].page_views, 40);
    assert_eq!(articles[1].id, 0);
    assert_eq!(articles[1].title, "(untitled)");
    assert_eq!(articles[1].page_views, 0);
}

#[tokio::test]
async fn failure_on_later_page_returns_no_articles() {
    let page_one = r#"[{"id": 1, "title": "A", "published_at": "2024-01-01T00:00:00Z"}]"#;
    let (base_url, _server) = serve(vec![
        http_response("200 OK", page_one),
        http_response("500 Internal Server Error", "oops"),
    ])
    .await;
    let result = client(base_url, 1, Duration::from_secs(5)).fetch_articles().await;
    assert!(matches!(result, Err(Error::Fetch(FetchError::Status { status: 500, .. }))));
}

#[tokio::test]
async fn silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let _server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
        drop(socket);
    });

    let err = client(format!("http://{}/api", addr), 1000, Duration::from_millis(200))
        .fetch_articles()
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fetch(FetchError::Timeout(_))), "got {:?}", err);
}

#[tokio::test]
async fn refused_connection_is_reported() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(format!("http://{}/api", addr), 1000, Duration::from_secs(5))
        .fetch_articles()
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fetch(FetchError::Connection(_))), "got {:?}", err);
}
