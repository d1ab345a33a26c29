//! Conversion API routes.
//!
//! `GET /convert` runs a general conversion and `GET /gif` renders an
//! animated GIF. Both read the input path, media kind and output name from
//! the query string alongside the transformation parameters, which are
//! handed to [`mediaforge_av::from_params`] unchanged.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use mediaforge_av::{from_params, MediaKind, ParamSource};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use super::AppContext;

/// Create conversion routes.
pub fn media_routes() -> Router<AppContext> {
    Router::new()
        .route("/convert", get(convert))
        .route("/gif", get(gif))
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ConversionResponse {
    pub message: String,
    pub output_file: String,
    pub warnings: Vec<String>,
}

/// Returned instead of running ffmpeg when `dry_run` is set.
#[derive(Debug, Serialize)]
pub struct DryRunResponse {
    pub args: Vec<String>,
    pub output_file: String,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Convert,
    Gif,
}

// ============================================================================
// Handlers
// ============================================================================

async fn convert(
    State(ctx): State<AppContext>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    run_conversion(ctx, params, Target::Convert).await
}

async fn gif(
    State(ctx): State<AppContext>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    run_conversion(ctx, params, Target::Gif).await
}

async fn run_conversion(
    ctx: AppContext,
    params: HashMap<String, String>,
    target: Target,
) -> Response {
    let Some(input) = params.get_str("input").map(str::to_string) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing input parameter");
    };

    let kind = match params.get_str("kind") {
        Some(kind) => match kind.parse::<MediaKind>() {
            Ok(kind) => kind,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
        },
        None => ctx.config.media.default_kind,
    };

    if !Path::new(&input).exists() {
        return error_response(StatusCode::BAD_REQUEST, "Input file does not exist");
    }

    let name = output_name(&params, &input);
    let dry_run = matches!(params.get_str("dry_run"), Some("true" | "1"));

    let (converter, warnings) = from_params(&params, kind, &input);
    for warning in &warnings {
        tracing::debug!("{}: {}", input, warning);
    }

    if let Err(e) = converter.validate() {
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }

    let output_dir = ctx.config.media.output_dir.clone();

    if dry_run {
        let output = match target {
            Target::Convert => converter.output_path(&output_dir, &name),
            Target::Gif => converter.gif_output_path(&output_dir, &name),
        };
        let args = match target {
            Target::Convert => converter.convert_args(&output),
            Target::Gif => converter.gif_args(&output),
        };
        return Json(DryRunResponse {
            args,
            output_file: output.to_string_lossy().to_string(),
            warnings,
        })
        .into_response();
    }

    if let Err(e) = tokio::fs::create_dir_all(&output_dir).await {
        tracing::error!("Failed to create output directory {:?}: {}", output_dir, e);
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to create output directory: {e}"),
        );
    }

    let runner = ctx.runner.clone();
    let result = tokio::task::spawn_blocking(move || match target {
        Target::Convert => converter.convert_with(runner.as_ref(), &output_dir, &name),
        Target::Gif => converter.to_gif_with(runner.as_ref(), &output_dir, &name),
    })
    .await;

    match result {
        Ok(Ok(output)) => {
            tracing::info!("Converted {} to {:?}", input, output);
            Json(ConversionResponse {
                message: "Conversion successful".to_string(),
                output_file: output.to_string_lossy().to_string(),
                warnings,
            })
            .into_response()
        }
        Ok(Err(e)) => {
            tracing::warn!("Conversion of {} failed: {}", input, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        Err(e) => {
            tracing::error!("Conversion task failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Conversion task failed")
        }
    }
}

/// Output file stem: the `name` parameter, else the input's own stem.
fn output_name(params: &HashMap<String, String>, input: &str) -> String {
    params
        .get_str("name")
        .map(str::to_string)
        .or_else(|| {
            Path::new(input)
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
        })
        .unwrap_or_else(|| "output".to_string())
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": message.into() })),
    )
        .into_response()
}
