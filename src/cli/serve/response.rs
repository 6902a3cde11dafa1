//! HTTP response handlers.

use crate::embed::build::{REDIRECT_HTML, RedirectVars};
use crate::redirect::{Destination, Navigator};
use crate::utils::mime::types::{HTML, PLAIN};
use anyhow::{Context, Result};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Navigator answering one request with a redirect.
///
/// The request is consumed on navigation; if it is still present afterwards
/// the path was not redirected.
pub struct HttpRedirect {
    request: Option<Request>,
    status: u16,
}

impl HttpRedirect {
    pub fn new(request: Request, status: u16) -> Self {
        Self {
            request: Some(request),
            status,
        }
    }

    /// The request, if no redirect was sent.
    pub fn into_request(self) -> Option<Request> {
        self.request
    }
}

impl Navigator for HttpRedirect {
    fn navigate(&mut self, destination: &Destination) -> Result<()> {
        let request = self
            .request
            .take()
            .context("request already answered")?;
        respond_redirect(request, self.status, &destination.url)
    }
}

/// Respond with a redirect: `Location` header plus a small HTML body.
pub fn respond_redirect(request: Request, status: u16, location: &str) -> Result<()> {
    let location_header = Header::from_bytes("Location", location.as_bytes())
        .map_err(|_| anyhow::anyhow!("invalid Location header value: {location}"))?;

    if is_head_request(&request) {
        let response = Response::empty(StatusCode(status))
            .with_header(location_header)
            .with_header(make_header("Content-Type", HTML));
        request.respond(response)?;
        return Ok(());
    }

    let body = REDIRECT_HTML.render(&RedirectVars {
        canonical_url: location,
    });
    let response = Response::from_string(body)
        .with_status_code(StatusCode(status))
        .with_header(location_header)
        .with_header(make_header("Content-Type", HTML));
    request.respond(response)?;
    Ok(())
}

/// Respond with a static file from the legacy site.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = crate::utils::mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body)
}

/// Respond with 404.
pub fn respond_not_found(request: Request) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, 404, PLAIN);
    }
    send_body(request, 404, PLAIN, b"404 Not Found".to_vec())
}

/// Respond with 405 for anything but GET and HEAD.
pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    let response = Response::from_data(b"405 Method Not Allowed".to_vec())
        .with_status_code(StatusCode(405))
        .with_header(make_header("Content-Type", PLAIN))
        .with_header(make_header("Allow", "GET, HEAD"));
    request.respond(response)?;
    Ok(())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

pub fn is_get_or_head(request: &Request) -> bool {
    matches!(request.method(), Method::Get | Method::Head)
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

/// Build a header from static ASCII name and value.
fn make_header(name: &'static str, value: &'static str) -> Header {
    // Static ASCII names and values are always valid
    Header::from_bytes(name, value).unwrap()
}
