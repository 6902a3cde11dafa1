//! `[serve]` section configuration.
//!
//! Contains redirect server settings.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"     # Network interface (127.0.0.1 = localhost only)
//! port = 5280                 # HTTP port number
//! status = 301                # Redirect status: 301, 302, 307 or 308
//! root = "legacy-site"        # Serve paths that stay from this directory
//! watch = false               # Reload redirect tables when this file changes
//! ```
//!
//! Use `interface = "0.0.0.0"` to make the server accessible from LAN.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Redirect status codes the server may answer with.
pub const REDIRECT_STATUSES: [u16; 4] = [301, 302, 307, 308];

/// Redirect server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,

    /// HTTP status used for redirects.
    pub status: u16,

    /// Directory holding the legacy site. Paths that are not redirected
    /// are served from here; without it they get 404.
    pub root: Option<PathBuf>,

    /// Reload the redirect tables when the config file changes.
    pub watch: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 5280,
            status: 301,
            root: None,
            watch: false,
        }
    }
}

impl ServeConfig {
    pub const STATUS: FieldPath = FieldPath::new("serve.status");
    pub const ROOT: FieldPath = FieldPath::new("serve.root");

    /// Validate server settings. `root` must already be normalized.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !REDIRECT_STATUSES.contains(&self.status) {
            diag.error_with_hint(
                Self::STATUS,
                format!("{} is not a redirect status", self.status),
                "use 301 or 308 for permanent moves, 302 or 307 while testing",
            );
        }

        if let Some(root) = &self.root
            && !root.is_dir()
        {
            diag.error(
                Self::ROOT,
                format!("directory `{}` does not exist", root.display()),
            );
        }
    }
}
