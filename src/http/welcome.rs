use super::state::HttpServerState;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::response::Html;
use std::net::SocketAddr;
use tracing::debug;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Introduction page, served for every path without a dedicated route.
pub async fn welcome(State(state): State<HttpServerState>, request: Request) -> Html<String> {
    let path = request.uri().path().to_string();
    debug!("Begin to handle path: {}", path);

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());
    let client = client_address(request.headers(), peer);
    let original = original_client(request.headers());

    Html(render_page(&state, &path, &client, &original))
}

/// Client address as seen through proxies: the first `X-Forwarded-For`
/// hop, then `X-Real-IP`, then the socket peer.
pub fn client_address(headers: &HeaderMap, peer: Option<String>) -> String {
    let forwarded = headers
        .get(X_FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());
    if let Some(client) = forwarded {
        return client.to_string();
    }

    let real_ip = headers
        .get(X_REAL_IP)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());
    if let Some(client) = real_ip {
        return client.to_string();
    }

    peer.unwrap_or_else(|| "unknown".to_string())
}

/// Full proxy chain as forwarded: the raw `X-Forwarded-For` value,
/// then `X-Real-IP`, otherwise "none".
pub fn original_client(headers: &HeaderMap) -> String {
    [X_FORWARDED_FOR, X_REAL_IP]
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or("none")
        .to_string()
}

fn render_page(state: &HttpServerState, path: &str, client: &str, original: &str) -> String {
    format!(
        r#"<html><head><title>Welcome</title>
<link rel="icon" type="image/jpg" href="/favicon.ico">
</head><body><center>
<h1>Introduction</h1>
<hr width="50%">
This is a web server to serve Application latency and request-per-second.<br/> path: {path}
<hr width="50%">hostName: {host}
<br/>
hostIP: {ip} : {port}
<br/>
ClientIP: {client}
<br/>
OriginalClient: {original}
</center></body></html>
"#,
        path = escape(path),
        host = escape(&state.host_name),
        ip = state.address.ip(),
        port = state.address.port(),
        client = escape(client),
        original = escape(original),
    )
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
