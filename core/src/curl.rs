//! Curl-equivalent rendering of requests, for reproducing a call from a log
//! line.

use crate::http::HttpRequest;

/// Render `request` as a single-line `curl` command.
pub fn to_curl(request: &HttpRequest) -> String {
    let mut parts = vec![
        "curl".to_string(),
        "-X".to_string(),
        request.method.as_str().to_string(),
        shell_quote(&request.url),
    ];
    for (name, value) in &request.headers {
        parts.push("-H".to_string());
        parts.push(shell_quote(&format!("{name}: {value}")));
    }
    if let Some(body) = &request.body {
        parts.push("-d".to_string());
        parts.push(shell_quote(body));
    }
    parts.join(" ")
}

/// POSIX single-quoting. An embedded `'` closes the quote, emits an escaped
/// quote, and reopens.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
