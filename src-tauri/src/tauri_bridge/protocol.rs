//! Custom protocol handlers for efficient data transfer
//!
//! This module implements the `frame://` custom protocol for direct binary
//! transfer of render frames, bypassing Tauri's IPC JSON serialization.

use bevy::log::{debug, error};
use tauri::http::{Response as HttpResponse, StatusCode};

use crate::config::{compression::JPEG_QUALITY, RENDER_HEIGHT, RENDER_WIDTH};
use super::frame_codec::encode_jpeg;
use super::shared_state::{SharedFrameBuffer, SharedPerfStats};

type Response = HttpResponse<Vec<u8>>;

/// Handle requests to the custom `frame://` protocol
///
/// Supported endpoints:
/// - `frame` or `frame.jpg`: JPEG-compressed frame
/// - `frame.raw`: Raw RGBA frame
/// - `stats`: Performance statistics as JSON
pub fn handle_frame_protocol(
    uri_path: &str,
    buffer: &SharedFrameBuffer,
    perf_stats: &SharedPerfStats,
) -> Response {
    let resource = uri_path.trim_start_matches('/');
    debug!("[Protocol] Resolved resource: {}", resource);

    match resource {
        "frame" | "frame.jpg" => handle_jpeg_frame(buffer),
        "frame.raw" => handle_raw_frame(buffer),
        "stats" => handle_stats(perf_stats),
        _ => plain(404, "Not Found"),
    }
}

fn plain(status: u16, message: &str) -> Response {
    let mut response = HttpResponse::new(message.as_bytes().to_vec());
    *response.status_mut() =
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    response
        .headers_mut()
        .insert("Content-Type", tauri::http::HeaderValue::from_static("text/plain"));
    response
}

fn frame_response(content_type: &'static str, body: Vec<u8>) -> Response {
    HttpResponse::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("X-Frame-Width", RENDER_WIDTH.to_string())
        .header("X-Frame-Height", RENDER_HEIGHT.to_string())
        .header("Access-Control-Allow-Origin", "*")
        .header(
            "Access-Control-Expose-Headers",
            "X-Frame-Width, X-Frame-Height",
        )
        .body(body)
        .unwrap_or_else(|err| {
            error!("[Protocol] Failed to build response: {err}");
            plain(500, "Internal Server Error")
        })
}

/// Latest frame, or `None` while the scene is still pre-rolling
fn latest_frame(buffer: &SharedFrameBuffer) -> Result<Option<Vec<u8>>, Response> {
    let guard = buffer
        .0
        .lock()
        .map_err(|_| plain(500, "Frame buffer poisoned"))?;
    Ok(guard.clone())
}

fn handle_jpeg_frame(buffer: &SharedFrameBuffer) -> Response {
    let rgba_data = match latest_frame(buffer) {
        Ok(Some(data)) => data,
        Ok(None) => return plain(503, "Frame not ready"),
        Err(response) => return response,
    };

    match encode_jpeg(&rgba_data, RENDER_WIDTH, RENDER_HEIGHT, JPEG_QUALITY) {
        Ok(jpeg_data) => frame_response("image/jpeg", jpeg_data),
        Err(err) => {
            error!("[Protocol] {err}");
            plain(500, "Frame encoding failed")
        }
    }
}

fn handle_raw_frame(buffer: &SharedFrameBuffer) -> Response {
    match latest_frame(buffer) {
        Ok(Some(data)) => frame_response("application/octet-stream", data),
        Ok(None) => plain(503, "Frame not ready"),
        Err(response) => response,
    }
}

fn handle_stats(perf_stats: &SharedPerfStats) -> Response {
    let json = match perf_stats.0.lock() {
        Ok(guard) => serde_json::to_vec(&*guard).unwrap_or_default(),
        Err(_) => return plain(500, "Stats poisoned"),
    };

    HttpResponse::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(json)
        .unwrap_or_else(|_| plain(500, "Internal Server Error"))
}
