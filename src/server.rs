//! HTTP entry point: a single `POST /dither` route in front of the core
//! pipeline. Validation and dispatch only; the core stays synchronous and
//! runs on the blocking pool.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::fetch::fetch_image;
use crate::pipeline::{render_pixel_art, RenderOptions};
use crate::DitherError;

/// Request body for `POST /dither`.
#[derive(Debug, Clone, Deserialize)]
pub struct DitherRequest {
    pub image_url: String,
    /// Palette size, 0-128 (0 = auto, 1 = black/white). Default 16.
    pub colors: Option<u16>,
    /// Rendered pixel size in CSS pixels, 1-32. Default 8.
    pub pixel_size: Option<usize>,
    /// Output byte budget, 1024-204800. Default 204800.
    pub max_size: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl DitherRequest {
    fn options(&self) -> RenderOptions {
        let defaults = RenderOptions::default();
        RenderOptions {
            colors: self.colors.unwrap_or(defaults.colors),
            pixel_scale: self.pixel_size.unwrap_or(defaults.pixel_scale),
            max_size: self.max_size.unwrap_or(defaults.max_size),
            timeout: defaults.timeout,
        }
    }
}

/// Build the route set: `POST /dither` with a JSON body.
///
/// `warp::body::json` enforces the `application/json` content type and a
/// parseable body before the handler runs; [`recover`](handle_rejection)
/// turns those rejections into JSON error responses.
pub fn routes() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path("dither")
        .and(warp::post())
        .and(warp::body::content_length_limit(16 * 1024))
        .and(warp::body::json())
        .and_then(handle_dither)
        .recover(handle_rejection)
}

/// Run the server until the process is stopped.
pub async fn serve(addr: SocketAddr) {
    tracing::info!(%addr, "ditherbot listening");
    warp::serve(routes()).run(addr).await;
}

async fn handle_dither(req: DitherRequest) -> Result<warp::reply::Response, Rejection> {
    tracing::info!(url = %req.image_url, "dither request");
    let opts = req.options();

    // Range validation happens before any fetch work.
    if let Err(err) = opts.validate() {
        return Ok(error_response(&err));
    }

    // Fetch + search are blocking (reqwest blocking client, CPU-bound
    // trials); keep them off the async workers.
    let result = tokio::task::spawn_blocking(move || {
        let source = fetch_image(&req.image_url)?;
        render_pixel_art(&source, &opts)
    })
    .await;

    let reply = match result {
        Ok(Ok(html)) => warp::reply::with_header(html, "content-type", "text/html; charset=utf-8")
            .into_response(),
        Ok(Err(err)) => error_response(&err),
        Err(join_err) => {
            tracing::error!(error = %join_err, "render task panicked");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    };
    Ok(reply)
}

fn error_response(err: &DitherError) -> warp::reply::Response {
    let status = match err {
        DitherError::ParameterOutOfRange { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DitherError::Fetch(_) => StatusCode::BAD_GATEWAY,
        DitherError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DitherError::BudgetExhausted { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::warn!(%status, error = %err, "dither request failed");
    json_error(status, &err.to_string())
}

fn json_error(status: StatusCode, message: &str) -> warp::reply::Response {
    warp::reply::with_status(
        warp::reply::json(&ErrorBody {
            error: message.to_string(),
        }),
        status,
    )
    .into_response()
}

async fn handle_rejection(rejection: Rejection) -> Result<warp::reply::Response, Rejection> {
    if rejection
        .find::<warp::reject::UnsupportedMediaType>()
        .is_some()
    {
        return Ok(json_error(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "unsupported content type: expected application/json",
        ));
    }
    if let Some(err) = rejection.find::<warp::body::BodyDeserializeError>() {
        return Ok(json_error(StatusCode::BAD_REQUEST, &err.to_string()));
    }
    if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        return Ok(json_error(StatusCode::PAYLOAD_TOO_LARGE, "body too large"));
    }
    Err(rejection)
}
