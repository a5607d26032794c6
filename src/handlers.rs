use crate::state::AppState;
use crate::types::ErrorResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::{CONTENT_TYPE, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Forwards `POST /api/metamorphosis` to the configured engine and relays
/// its answer unchanged.
pub async fn metamorphosis(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    let request_id = Uuid::new_v4().to_string();
    let destination = &state.config.backend_url;

    log::debug!(
        "[{}] {request_id} POST /api/metamorphosis -> {destination} ({} bytes)",
        Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        body.len()
    );

    let mut upstream = state
        .client
        .post(destination)
        .header(REQUEST_ID_HEADER, &request_id)
        .body(body);
    if let Some(content_type) = req.headers().get(CONTENT_TYPE) {
        upstream = upstream.header(reqwest::header::CONTENT_TYPE, content_type.as_bytes());
    }

    let response = match upstream.send().await {
        Ok(response) => response,
        Err(e) => {
            log::error!("{request_id} failed to reach engine at {destination}: {e}");
            return bad_gateway(&request_id, format!("Engine unreachable: {e}"));
        }
    };

    let status =
        StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| HeaderValue::from_bytes(v.as_bytes()).ok());

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("{request_id} failed to read engine response: {e}");
            return bad_gateway(&request_id, format!("Engine response unreadable: {e}"));
        }
    };

    if status.is_success() {
        log::info!("{request_id} engine answered {status} ({} bytes)", bytes.len());
    } else {
        log::warn!("{request_id} engine answered {status}");
    }

    let mut builder = HttpResponse::build(status);
    builder
        .insert_header((REQUEST_ID_HEADER, request_id))
        .insert_header(("Cache-Control", "no-cache"));
    if let Some(content_type) = content_type {
        builder.insert_header((CONTENT_TYPE, content_type));
    }
    builder.body(bytes)
}

fn bad_gateway(request_id: &str, error: String) -> HttpResponse {
    HttpResponse::BadGateway()
        .insert_header((REQUEST_ID_HEADER, request_id.to_string()))
        .json(ErrorResponse { error })
}

pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "backendUrl": state.config.backend_url
    }))
}

pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

/// Registers the page, health and proxy routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)))
        .service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/api/metamorphosis").route(web::post().to(metamorphosis)));
}
