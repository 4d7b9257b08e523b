use crate::core::FormatKind;
use crate::server::html::render_table_preview;
use crate::server::AppState;
use crate::utils::error::{AppError, Result};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{self, HeaderValue};
use hyper::{Method, Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;

pub type HttpResponse = Response<Full<Bytes>>;

const JSON_CONTENT_TYPE: &str = "application/json";
const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

const CORS_METHODS: &str = "GET, POST, PUT, DELETE";
const CORS_HEADERS: &str = "Content-Type";

/// POST 內容上限 (1 MiB)
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const KNOWN_PATHS: [&str; 6] = [
    "/",
    "/api/dataset-info",
    "/api/dataset-format",
    "/api/table-preview",
    "/api/compare",
    "/download",
];

#[derive(Serialize)]
struct Health {
    message: &'static str,
    status: &'static str,
}

#[derive(Serialize)]
struct DatasetInfo<'a> {
    filename: &'a str,
    rows: usize,
    columns: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DatasetFormatResponse<'a> {
    format: FormatKind,
    data_text: &'a str,
    tokens: usize,
    estimated_input_cost: f64,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CompareRequest {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    selected_format: Option<String>,
}

fn respond(status: StatusCode, content_type: &'static str, body: impl Into<Bytes>) -> HttpResponse {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Result<HttpResponse> {
    Ok(respond(status, JSON_CONTENT_TYPE, serde_json::to_vec(body)?))
}

fn error_body(status: StatusCode, message: &str) -> HttpResponse {
    let body = serde_json::json!({ "error": message }).to_string();
    respond(status, JSON_CONTENT_TYPE, body)
}

fn error_response(err: &AppError) -> HttpResponse {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        tracing::error!("❌ Request failed: {} ({:?})", err, err.category());
    }
    error_body(status, &err.user_friendly_message())
}

/// 所有請求的進入點，任何錯誤都轉成 JSON 錯誤回應
pub async fn route<B>(state: Arc<AppState>, req: Request<B>) -> std::result::Result<HttpResponse, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let is_api = path.starts_with("/api/");

    // 只有已知路徑才回應 preflight，其餘交給 dispatch 回 404
    let mut response = if is_api && method == Method::OPTIONS && KNOWN_PATHS.contains(&path.as_str()) {
        respond(StatusCode::NO_CONTENT, JSON_CONTENT_TYPE, Bytes::new())
    } else {
        match dispatch(&state, req).await {
            Ok(response) => response,
            Err(e) => error_response(&e),
        }
    };

    if is_api {
        apply_cors(&state, origin.as_deref(), &method, &mut response);
    }

    tracing::debug!("{} {} → {}", method, path, response.status());
    Ok(response)
}

async fn dispatch<B>(state: &AppState, req: Request<B>) -> Result<HttpResponse>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let path = req.uri().path().to_string();

    match (req.method().clone(), path.as_str()) {
        (Method::GET, "/") => json_response(
            StatusCode::OK,
            &Health {
                message: "API is running",
                status: "ok",
            },
        ),
        (Method::GET, "/api/dataset-info") => dataset_info(state),
        (Method::GET, "/api/dataset-format") => dataset_format(state, req.uri().query()),
        (Method::GET, "/api/table-preview") => Ok(respond(
            StatusCode::OK,
            HTML_CONTENT_TYPE,
            render_table_preview(&state.dataset),
        )),
        (Method::GET, "/download") => download(state).await,
        (Method::POST, "/api/compare") => compare(state, req).await,
        (_, p) if KNOWN_PATHS.contains(&p) => {
            Ok(error_body(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"))
        }
        _ => Ok(error_body(StatusCode::NOT_FOUND, "Not found")),
    }
}

fn dataset_info(state: &AppState) -> Result<HttpResponse> {
    json_response(
        StatusCode::OK,
        &DatasetInfo {
            filename: &state.dataset.filename,
            rows: state.dataset.len(),
            columns: &state.dataset.columns,
        },
    )
}

fn dataset_format(state: &AppState, query: Option<&str>) -> Result<HttpResponse> {
    let param = query.and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(key, _)| key == "format")
            .map(|(_, value)| value.into_owned())
    });
    let format = FormatKind::from_param(param.as_deref());

    let data_text = state.encoded.text(format);
    let tokens = state.engine.tokenizer().count_tokens(data_text);
    let cost = state.engine.pricing().estimate_cost(tokens, 0);

    json_response(
        StatusCode::OK,
        &DatasetFormatResponse {
            format,
            data_text,
            tokens,
            estimated_input_cost: cost.input_cost,
        },
    )
}

async fn download(state: &AppState) -> Result<HttpResponse> {
    let bytes = tokio::fs::read(&state.dataset.path).await?;
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        state.dataset.filename.replace('"', "")
    ))?;

    let mut response = respond(StatusCode::OK, CSV_CONTENT_TYPE, bytes);
    response
        .headers_mut()
        .insert(header::CONTENT_DISPOSITION, disposition);
    Ok(response)
}

async fn compare<B>(state: &AppState, req: Request<B>) -> Result<HttpResponse>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let body = Limited::new(req.into_body(), MAX_BODY_BYTES)
        .collect()
        .await
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                AppError::validation("Request body too large")
            } else {
                AppError::validation(format!("Invalid request body: {}", e))
            }
        })?
        .to_bytes();

    let request: CompareRequest = if body.is_empty() {
        CompareRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|_| AppError::validation("Invalid JSON body"))?
    };

    let query = request.query.unwrap_or_default();
    let input_format = FormatKind::from_param(request.selected_format.as_deref());
    let report = state
        .engine
        .compare(state.encoded.text(input_format), &query, input_format)
        .await?;

    json_response(StatusCode::OK, &report)
}

fn apply_cors(state: &AppState, origin: Option<&str>, method: &Method, response: &mut HttpResponse) {
    let Some(origin) = origin else {
        return;
    };
    if !state.cors.allowed_origins.iter().any(|allowed| allowed == origin) {
        return;
    }
    let Ok(origin_value) = HeaderValue::from_str(origin) else {
        return;
    };

    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin_value);
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));

    if *method == Method::OPTIONS {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_HEADERS),
        );
    }
}
