use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::handlers;
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub fn html_response(body: String) -> Response<Cursor<Vec<u8>>> {
    let bytes = body.into_bytes();
    let len = bytes.len();
    Response::new(
        StatusCode(200),
        vec![Header::from_bytes(b"Content-Type", b"text/html; charset=utf-8").unwrap()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn json_response(body: &str, status: u16) -> Response<Cursor<Vec<u8>>> {
    let bytes = body.as_bytes().to_vec();
    let len = bytes.len();
    Response::new(
        StatusCode(status),
        vec![Header::from_bytes(b"Content-Type", b"application/json").unwrap()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn png_response(png: Vec<u8>, download: bool) -> Response<Cursor<Vec<u8>>> {
    let len = png.len();
    let mut headers = vec![
        Header::from_bytes(b"Content-Type", b"image/png").unwrap(),
        Header::from_bytes(b"Cache-Control", b"no-store").unwrap(),
    ];
    if download {
        headers.push(
            Header::from_bytes(
                b"Content-Disposition",
                b"attachment; filename=\"generated_art.png\"",
            )
            .unwrap(),
        );
    }
    Response::new(StatusCode(200), headers, Cursor::new(png), Some(len), None)
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    let body = b"404 Not Found".to_vec();
    let len = body.len();
    Response::new(
        StatusCode(404),
        vec![Header::from_bytes(b"Content-Type", b"text/plain").unwrap()],
        Cursor::new(body),
        Some(len),
        None,
    )
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler.
///
/// The SSE handler takes ownership of the request to perform long-lived
/// streaming; everything else builds a response and lets the dispatcher
/// send it.
pub fn dispatch(request: Request, state: SharedState) {
    let method = request.method().clone();
    let url = request.url().to_owned();

    let (path, query) = if let Some(pos) = url.find('?') {
        (url[..pos].to_owned(), url[pos + 1..].to_owned())
    } else {
        (url.clone(), String::new())
    };

    // Long-lived SSE stream; the handler takes ownership of the request.
    if method == Method::Get && path == "/train/events" {
        handlers::train_sse::handle(request, state);
        return;
    }

    let response = match (method, path.as_str()) {
        (Method::Get, "/") => {
            let config = state.lock().unwrap().config.clone();
            html_response(crate::render::index_page(&config))
        }

        (Method::Post, "/train/start") => handlers::train::handle_start(state),

        (Method::Post, "/generate") => handlers::frame::handle_generate(state),
        (Method::Get, "/frame") => handlers::frame::handle_frame(&query, state, false),
        (Method::Get, "/save") => handlers::frame::handle_frame(&query, state, true),

        _ => not_found(),
    };

    let _ = request.respond(response);
}
