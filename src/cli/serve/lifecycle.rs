//! Server lifecycle management.

use crate::{config::TableHandle, core::register_server, log};
use anyhow::Result;
use crossbeam::channel::{Receiver, Sender};
use std::{
    net::SocketAddr,
    sync::Arc,
    thread::{self, JoinHandle},
};
use tiny_http::Server;

use super::watch::ConfigWatcher;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Bind to the specified interface and port, with automatic port retry.
pub fn bind_with_retry(
    interface: std::net::IpAddr,
    base_port: u16,
) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                // Port 0 asks the OS for a free port
                let addr = server.server_addr().to_ip().unwrap_or(addr);
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }
    Err(anyhow::anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        MAX_PORT_RETRIES,
        base_port,
        base_port.saturating_add(MAX_PORT_RETRIES - 1),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

/// Register server for graceful shutdown.
///
/// When Ctrl+C is pressed, the handler set up in main() unblocks the server
/// and notifies the config watcher.
pub fn register_server_for_shutdown(server: Arc<Server>, shutdown_tx: Sender<()>) {
    register_server(server, shutdown_tx);
}

/// Spawn the config watcher thread.
pub fn spawn_watcher(
    tables: Arc<TableHandle>,
    watch_enabled: bool,
    shutdown_rx: Receiver<()>,
) -> Result<Option<JoinHandle<()>>> {
    if !watch_enabled {
        return Ok(None);
    }

    let watcher = ConfigWatcher::new(tables)?;
    Ok(Some(thread::spawn(move || watcher.run(shutdown_rx))))
}

/// Wait for the watcher to shutdown gracefully (max 2 seconds).
pub fn wait_for_shutdown(handle: Option<JoinHandle<()>>) {
    let Some(handle) = handle else { return };

    for _ in 0..40 {
        if handle.is_finished() {
            let _ = handle.join();
            return;
        }
        thread::sleep(std::time::Duration::from_millis(50));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_bind_skips_taken_port() {
        let localhost = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let (first, addr) = bind_with_retry(localhost, 0).unwrap();
        let (second, next) = bind_with_retry(localhost, addr.port()).unwrap();
        assert_ne!(addr.port(), next.port());
        drop((first, second));
    }

    #[test]
    fn test_watch_disabled() {
        let handle = spawn_watcher_disabled();
        assert!(handle.is_none());
        wait_for_shutdown(handle);
    }

    fn spawn_watcher_disabled() -> Option<JoinHandle<()>> {
        let table = crate::redirect::Preset::Rescript.table().unwrap();
        let config = crate::config::RedirectConfig::default();
        let tables = Arc::new(TableHandle::new(&config, table));
        let (_tx, rx) = crossbeam::channel::unbounded();
        spawn_watcher(tables, false, rx).unwrap()
    }
}
