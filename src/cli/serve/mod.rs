//! Redirect server with config hot reload.
//!
//! Every GET or HEAD request is resolved against the current table.
//! Redirected paths answer with the configured status and a `Location`
//! header; paths that stay are served from `serve.root` when set.

mod lifecycle;
mod path;
mod response;
mod watch;

use crate::{
    config::{RedirectConfig, TableHandle},
    debug, log,
    redirect::{Resolution, Resolver, follow},
};
use anyhow::{Context, Result};
use crossbeam::channel;
use response::HttpRedirect;
use std::{path::PathBuf, sync::Arc};
use tiny_http::{Request, Server};

/// Request handler state shared by worker threads
#[derive(Debug)]
pub struct ServeContext {
    pub tables: Arc<TableHandle>,
    pub status: u16,
    pub root: Option<PathBuf>,
}

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    shutdown_rx: channel::Receiver<()>,
}

/// Bind the HTTP server without starting the request loop
pub fn bind_server(config: &RedirectConfig) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    lifecycle::register_server_for_shutdown(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);

    Ok(BoundServer {
        server,
        shutdown_rx,
    })
}

/// Bind and serve until Ctrl+C.
pub fn serve(config: &RedirectConfig, tables: Arc<TableHandle>) -> Result<()> {
    let context = ServeContext {
        tables,
        status: config.serve.status,
        root: config.serve.root.clone(),
    };
    let bound = bind_server(config)?;
    bound.run(context, config.serve.watch)
}

impl BoundServer {
    /// Start the request loop (blocking).
    pub fn run(self, context: ServeContext, watch: bool) -> Result<()> {
        let watcher =
            lifecycle::spawn_watcher(Arc::clone(&context.tables), watch, self.shutdown_rx)?;
        run_request_loop(&self.server, Arc::new(context))?;
        lifecycle::wait_for_shutdown(watcher);
        Ok(())
    }
}

fn run_request_loop(server: &Server, context: Arc<ServeContext>) -> Result<()> {
    // Use thread pool to handle requests concurrently
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .context("failed to create thread pool")?;

    for request in server.incoming_requests() {
        let context = Arc::clone(&context);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &context) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, context: &ServeContext) -> Result<()> {
    // Early exit if shutdown requested
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    if !response::is_get_or_head(&request) {
        return response::respond_method_not_allowed(request);
    }

    let url = request.url().to_string();
    let table = context.tables.load();
    let resolver = Resolver::new(&table);

    let mut navigator = HttpRedirect::new(request, context.status);
    let resolution = follow(&resolver, &url, &mut navigator)?;

    let Some(request) = navigator.into_request() else {
        if let Resolution::Redirect(destination) = &resolution {
            debug!("redirect"; "{} -> {} ({})", url, destination.url, destination.rule);
        }
        return Ok(());
    };

    if let Resolution::Stay { reason } = &resolution {
        debug!("serve"; "{} stays ({})", url, reason);
    }

    if let Some(root) = &context.root
        && let Some(path) = path::resolve_path(&url, root)
    {
        return response::respond_file(request, &path);
    }

    response::respond_not_found(request)
}
