use std::{
    io::{self, Write},
    sync::{Arc, Mutex},
};

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use product_api::{build_router, ProductStore};
use tower::ServiceExt;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// 把日志写进内存，供断言使用
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// 找到以 `[时间戳] METHOD path` 结尾的请求日志行，返回其下标
fn find_request_line(lines: &[String], method: &str, path: &str) -> Option<usize> {
    let suffix = format!("] {} {}", method, path);

    lines.iter().position(|line| {
        let Some(start) = line.rfind('[') else {
            return false;
        };
        let Some(end) = line[start..].find(']').map(|i| start + i) else {
            return false;
        };

        line.ends_with(&suffix)
            && chrono::DateTime::parse_from_rfc3339(&line[start + 1..end]).is_ok()
    })
}

async fn run_logged(requests: Vec<Request<Body>>) -> (Vec<StatusCode>, Vec<String>) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = build_router(Arc::new(ProductStore::new()), "12345");
    let mut statuses = vec![];
    for req in requests {
        statuses.push(app.clone().oneshot(req).await.unwrap().status());
    }

    (statuses, logs.lines())
}

#[tokio::test]
async fn test_every_request_is_logged_with_timestamp() {
    let (statuses, lines) = run_logged(vec![
        Request::builder()
            .method(Method::GET)
            .uri("/api/products")
            .header("x-api-key", "12345")
            .body(Body::empty())
            .unwrap(),
        Request::builder()
            .method(Method::GET)
            .uri("/")
            .body(Body::empty())
            .unwrap(),
    ])
    .await;

    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::OK]);
    let list = find_request_line(&lines, "GET", "/api/products").expect("list request logged");
    let root = find_request_line(&lines, "GET", "/").expect("root request logged");
    assert!(list < root);
}

#[tokio::test]
async fn test_rejected_request_is_logged_before_auth() {
    let (statuses, lines) = run_logged(vec![Request::builder()
        .method(Method::DELETE)
        .uri("/api/products/abc?force=1")
        .body(Body::empty())
        .unwrap()])
    .await;

    assert_eq!(statuses, vec![StatusCode::UNAUTHORIZED]);

    let logged = find_request_line(&lines, "DELETE", "/api/products/abc?force=1")
        .expect("unauthorized request logged");
    let rejected = lines
        .iter()
        .position(|line| line.contains("拒绝未认证的请求"))
        .expect("auth rejection logged");
    assert!(logged < rejected);
}
