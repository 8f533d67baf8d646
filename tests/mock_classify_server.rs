//! Warp mock of the classification endpoint for client tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;
use warp::http::header::HeaderValue;
use warp::http::StatusCode;
use warp::Filter;

/// A running mock endpoint
///
/// Shuts down when dropped. `hits` counts requests served.
pub struct MockServer {
    pub url: String,
    pub hits: Arc<AtomicUsize>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Serve POST /api/classify with a fixed response
pub async fn spawn_classify(
    status: u16,
    content_type: &'static str,
    body: &'static str,
) -> MockServer {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    let route = warp::post()
        .and(warp::path("api"))
        .and(warp::path("classify"))
        .and(warp::path::end())
        .map(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            respond(status, content_type, body)
        });

    serve(route, hits).await
}

/// Serve POST /api/classify/camera with a fixed response
pub async fn spawn_camera(
    status: u16,
    content_type: &'static str,
    body: &'static str,
) -> MockServer {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    let route = warp::post()
        .and(warp::path("api"))
        .and(warp::path("classify"))
        .and(warp::path("camera"))
        .and(warp::path::end())
        .map(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            respond(status, content_type, body)
        });

    serve(route, hits).await
}

fn respond(status: u16, content_type: &'static str, body: &'static str) -> warp::reply::Response {
    let mut resp = warp::reply::Response::new(body.into());
    *resp.status_mut() = StatusCode::from_u16(status).unwrap();
    resp.headers_mut()
        .insert("content-type", HeaderValue::from_static(content_type));
    resp
}

async fn serve<F>(route: F, hits: Arc<AtomicUsize>) -> MockServer
where
    F: Filter<Error = warp::Rejection> + Clone + Send + Sync + 'static,
    F::Extract: warp::Reply,
{
    let (tx, rx) = oneshot::channel();
    let (addr, server) =
        warp::serve(route).bind_with_graceful_shutdown(([127, 0, 0, 1], 0), async {
            let _ = rx.await;
        });
    tokio::spawn(server);

    MockServer {
        url: format!("http://{}", addr),
        hits,
        shutdown: Some(tx),
    }
}
