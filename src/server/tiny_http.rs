//! tiny_http server adapter
//!
//! Handles routing, body parsing, and response conversion for tiny_http.
//! The loop is single-threaded: queued session and snapshot notifications
//! are applied between requests. Each browser is a separate visitor with
//! its own site, found through the session cookie.

use std::io::{Cursor, Read as _};
use std::time::Duration;

use anyhow::Context as _;
use serde::{Serialize, de::DeserializeOwned};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use folio::api::{self, ApiError, ApiResponse, DeleteRequest};
use folio::core::models::{ContentKind, Credentials};
use folio::core::services::{ContactMessage, Outcome};
use folio::site::{Section, Site};
use folio::visitors::{Visit, Visitors};

use super::pages;

/// How long to wait for a request before pumping notifications
const PUMP_INTERVAL: Duration = Duration::from_millis(200);

/// Cookie carrying the visitor token
const SESSION_COOKIE: &str = "folio_session";

/// A response before conversion to tiny_http
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// HTTP status
    pub status: u16,
    /// `Content-Type`
    pub content_type: &'static str,
    /// `Location`, for redirects
    pub location: Option<String>,
    /// `Set-Cookie`, when a visitor token was issued
    pub cookie: Option<String>,
    /// Body
    pub body: String,
}

impl Reply {
    fn html(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "text/html; charset=utf-8",
            location: None,
            cookie: None,
            body,
        }
    }

    fn redirect(location: String) -> Self {
        Self {
            status: 303,
            content_type: "text/plain; charset=utf-8",
            body: format!("See {location}"),
            location: Some(location),
            cookie: None,
        }
    }

    fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let mut response = Response::from_data(self.body.into_bytes())
            .with_status_code(StatusCode(self.status));
        if let Ok(header) = Header::from_bytes("Content-Type", self.content_type) {
            response.add_header(header);
        }
        if let Some(location) = self.location
            && let Ok(header) = Header::from_bytes("Location", location.as_bytes())
        {
            response.add_header(header);
        }
        if let Some(cookie) = self.cookie
            && let Ok(header) = Header::from_bytes("Set-Cookie", cookie.as_bytes())
        {
            response.add_header(header);
        }
        response
    }
}

// =============================================================================
// SERVER LOOP
// =============================================================================

/// Serve `visitors` on `addr` until the process is stopped
pub fn serve(mut visitors: Visitors, addr: &str) -> anyhow::Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("could not listen on {addr}"))?;
    log::info!("serving on http://{addr}");

    loop {
        visitors.pump();
        match server.recv_timeout(PUMP_INTERVAL) {
            Ok(Some(mut request)) => {
                let reply = handle_request(&mut visitors, &mut request);
                log::debug!("{} {} -> {}", request.method(), request.url(), reply.status);
                if let Err(e) = request.respond(reply.into_response()) {
                    log::warn!("failed to send response: {e}");
                }
            },
            Ok(None) => {},
            Err(e) => return Err(e).context("server stopped"),
        }
    }
}

fn handle_request(visitors: &mut Visitors, request: &mut Request) -> Reply {
    let mut body = String::new();
    if let Err(e) = request.as_reader().read_to_string(&mut body) {
        return error_response(&ApiError::bad_request(format!("Failed to read request body: {e}")));
    }
    let method = request.method().clone();
    let url = request.url().to_string();
    let cookie = request
        .headers()
        .iter()
        .find(|header| header.field.equiv("Cookie"))
        .map(|header| header.value.as_str().to_string());
    dispatch(visitors, &method, &url, cookie.as_deref(), &body)
}

// =============================================================================
// VISITORS
// =============================================================================

/// Find the caller's visitor from its `Cookie` header and route the request
///
/// A caller without a known token gets a new visitor and a cookie for it.
/// A successful sign-in moves the visitor to a fresh token.
pub fn dispatch(
    visitors: &mut Visitors,
    method: &Method,
    url: &str,
    cookie: Option<&str>,
    body: &str,
) -> Reply {
    let presented = cookie.and_then(|cookie| parse_cookie(cookie, SESSION_COOKIE));
    let Visit {
        token,
        issued,
        site,
    } = visitors.enter(presented);
    let mut reply = route(site, method, url, body);
    let mut issue = issued.then(|| token.clone());

    if *method == Method::Post && is_login(url) && reply.status == 200 {
        issue = visitors.rotate(&token).or(issue);
    }
    reply.cookie = issue.map(|token| session_cookie(&token));
    reply
}

/// Value of cookie `name` in a `Cookie` header
fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict")
}

fn is_login(url: &str) -> bool {
    let path = url.split_once('?').map_or(url, |(p, _)| p);
    matches!(path, "/api/login" | "/api/v1/login")
}

// =============================================================================
// ROUTING
// =============================================================================

/// Route one request
pub fn route(site: &mut Site, method: &Method, url: &str, body: &str) -> Reply {
    site.pump();
    if url == "/api" || url.starts_with("/api/") {
        return handle_api_request(site, method, url, body);
    }
    if *method != Method::Get {
        return Reply::html(405, pages::not_found(url));
    }
    handle_page_request(site, url)
}

fn handle_page_request(site: &mut Site, url: &str) -> Reply {
    match site.navigate(url) {
        None => Reply::html(404, pages::not_found(url)),
        Some(Outcome::Checking) => Reply::html(200, pages::checking()),
        Some(Outcome::Redirect { to, from }) => Reply::redirect(format!("{to}?from={from}")),
        Some(Outcome::Render { route }) => Reply::html(200, pages::render(site, &route)),
    }
}

/// Handle an API request
///
/// Supports both `/api/v1/...` and `/api/...`.
fn handle_api_request(site: &mut Site, method: &Method, url: &str, body: &str) -> Reply {
    let path = url.split_once('?').map_or(url, |(p, _)| p);
    let api_path = path.strip_prefix("/api/v1").or_else(|| path.strip_prefix("/api")).unwrap_or(path);

    match (method, api_path) {
        (&Method::Get, "/session") => success_response(api::get_session(site)),
        (&Method::Post, "/login") => match read_json_body::<Credentials>(body) {
            Ok(credentials) => handle_result(api::login(site, &credentials)),
            Err(e) => error_response(&e),
        },
        (&Method::Post, "/logout") => success_response(api::logout(site)),

        (&Method::Get, "/projects") => success_response(api::list_section(&site.projects)),
        (&Method::Get, "/skills") => success_response(api::list_section(&site.skills)),
        (&Method::Get, "/education") => success_response(api::list_section(&site.education)),

        (&Method::Post, "/contact") => match read_json_body::<ContactMessage>(body) {
            Ok(message) => handle_result(api::send_contact(site, &message)),
            Err(e) => error_response(&e),
        },

        _ if api_path.starts_with("/admin/") => {
            if let Err(e) = api::require_admin(site) {
                return error_response(&e);
            }
            let rest: Vec<&str> = api_path.trim_start_matches("/admin/").split('/').collect();
            match rest.as_slice() {
                ["dashboard"] if *method == Method::Get => {
                    success_response(api::get_dashboard(site))
                },
                ["projects", rest @ ..] => admin_section(&mut site.projects, method, rest, body),
                ["skills", rest @ ..] => admin_section(&mut site.skills, method, rest, body),
                ["education", rest @ ..] => admin_section(&mut site.education, method, rest, body),
                _ => not_found_response(&format!("API endpoint not found: {method} {api_path}")),
            }
        },

        _ => not_found_response(&format!("API endpoint not found: {method} {api_path}")),
    }
}

/// Admin routes below `/admin/{kind}`
fn admin_section<K: ContentKind>(
    section: &mut Section<K>,
    method: &Method,
    rest: &[&str],
    body: &str,
) -> Reply {
    match (method, rest) {
        (&Method::Get, ["form"]) => success_response(api::get_form(section)),
        (&Method::Patch, ["form"]) => match read_json_body::<K::Form>(body) {
            Ok(draft) => handle_result(api::set_draft(section, draft)),
            Err(e) => error_response(&e),
        },
        (&Method::Post, ["form", "new"]) => handle_result(api::begin_new(section)),
        (&Method::Post, ["form", "edit", id]) => handle_result(api::begin_edit(section, id)),
        (&Method::Post, ["form", "submit"]) => handle_result(api::submit_form(section)),
        (&Method::Post, ["form", "cancel"]) => handle_result(api::cancel_form(section)),
        (&Method::Delete, [id]) if !id.is_empty() => {
            let req = if body.trim().is_empty() {
                Ok(DeleteRequest::default())
            } else {
                read_json_body::<DeleteRequest>(body)
            };
            match req {
                Ok(req) => handle_result(api::delete_entry(section, id, req)),
                Err(e) => error_response(&e),
            }
        },
        _ => not_found_response(&format!(
            "API endpoint not found: {method} /admin/{}/{}",
            K::COLLECTION,
            rest.join("/")
        )),
    }
}

// =============================================================================
// BODY PARSING
// =============================================================================

/// Parse a JSON request body
fn read_json_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Convert a handler result to a reply
fn handle_result<T: Serialize>(result: Result<T, ApiError>) -> Reply {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_response(&e),
    }
}

/// Create a successful JSON reply
fn success_response<T: Serialize>(data: T) -> Reply {
    let response = ApiResponse::success(data);
    json_response(&response, 200)
}

/// Create an error JSON reply with appropriate status code
fn error_response(error: &ApiError) -> Reply {
    let response = ApiResponse::<()>::error(error.code.as_str(), &error.message);
    json_response(&response, error.status_code())
}

/// Create a 404 not found reply
fn not_found_response(message: &str) -> Reply {
    let response = ApiResponse::<()>::error("NOT_FOUND", message);
    json_response(&response, 404)
}

/// Serialize data to a JSON reply with status code
fn json_response<T: Serialize>(data: &T, status: u16) -> Reply {
    let json = serde_json::to_string(data).unwrap_or_else(|_| r#"{"success":false}"#.to_string());
    Reply {
        status,
        content_type: "application/json",
        location: None,
        cookie: None,
        body: json,
    }
}
