//! Preview server.
//!
//! Serves the current preview document over HTTP while the actor system
//! watches the workspace and relays the preview console.

mod lifecycle;
mod response;

use crate::{
    compose::compose,
    config::{PenConfig, cfg},
    log,
    workspace::read_project,
};
use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use crossbeam::channel;
use std::net::SocketAddr;
use std::sync::Arc;
use tiny_http::{Method, Request, Server};
use url::Url;

/// Request worker threads
const REQUEST_THREADS: usize = 4;

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
    document: Arc<ArcSwap<String>>,
    shutdown_rx: channel::Receiver<()>,
}

/// Bind the HTTP server without starting the request loop
///
/// Requests that arrive before the first render get an empty document.
pub fn bind_server() -> Result<BoundServer> {
    let config = cfg();
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    lifecycle::register_server_for_shutdown(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);

    Ok(BoundServer {
        server,
        addr,
        document: Arc::new(ArcSwap::from_pointee(String::new())),
        shutdown_rx,
    })
}

impl BoundServer {
    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the actors and the request loop (blocking).
    pub fn run(self, shared_link: Option<String>) -> Result<()> {
        let config = cfg();
        let share_base = Url::parse(&format!("http://{}/", self.addr))
            .with_context(|| format!("Invalid server address {}", self.addr))?;

        let actor_handle = lifecycle::spawn_actors(
            Arc::clone(&config),
            Arc::clone(&self.document),
            share_base,
            shared_link,
            self.shutdown_rx,
        );
        log!("serve"; "type `help` for commands");

        run_request_loop(&self.server, &self.document)?;
        lifecycle::wait_for_shutdown(actor_handle);
        Ok(())
    }
}

fn run_request_loop(server: &Server, document: &Arc<ArcSwap<String>>) -> Result<()> {
    let config = cfg();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(REQUEST_THREADS)
        .build()
        .context("Failed to create request thread pool")?;

    for request in server.incoming_requests() {
        let config = Arc::clone(&config);
        let document = Arc::clone(document);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &config, &document) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// What a request path serves.
#[derive(Debug, PartialEq, Eq)]
enum Route {
    /// Current preview document
    Preview,
    /// Standalone download form of the workspace
    Download,
    NotFound,
}

fn route(url: &str) -> Route {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    match path {
        "/" | "/index.html" => Route::Preview,
        "/project.html" => Route::Download,
        _ => Route::NotFound,
    }
}

/// Handle a single HTTP request
fn handle_request(
    request: Request,
    config: &PenConfig,
    document: &ArcSwap<String>,
) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }
    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_not_allowed(request);
    }

    match route(request.url()) {
        Route::Preview => {
            let body = document.load_full();
            response::respond_html(request, body.as_bytes().to_vec())
        }
        Route::Download => match read_project(config.workspace(), &config.editor.file_names()) {
            Ok(state) => {
                let body = compose(&state.markup, &state.style, &state.script);
                response::respond_html(request, body.into_bytes())
            }
            Err(e) => {
                log!("serve"; "download: {:#}", e);
                response::respond_not_found(request)
            }
        },
        Route::NotFound => response::respond_not_found(request),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route() {
        assert_eq!(route("/"), Route::Preview);
        assert_eq!(route("/index.html?t=1"), Route::Preview);
        assert_eq!(route("/#p=abc"), Route::Preview);
        assert_eq!(route("/project.html"), Route::Download);
        assert_eq!(route("/style.css"), Route::NotFound);
        assert_eq!(route("/favicon.ico"), Route::NotFound);
    }
}
