use axum::{
    body::Body,
    extract::Query,
    http::{Response, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use log::{error, info};
use serde_derive::Deserialize;
use tokio::sync::mpsc::Sender;

use crate::document::{export_string, import_str};
use crate::errors::{Error, Result};
use crate::json_api::handle_request;
use crate::{check_curve_samples, TessellationConfig};

const USAGE: &str = "svgtess-server

POST /api/tessellate
    JSON body: {\"version\": 1, \"d\": \"<path data>\", \"config\": {...}}
    Returns vertex, index and segment buffers for the path.

POST /api/normalize
    Body: SVG document. Returns an SVG document with each importable
    <path> re-emitted in canonical form.
";

#[derive(Debug, Default, Deserialize)]
struct NormalizeQuery {
    #[serde(default)]
    strict: bool,
    #[serde(default)]
    samples: Option<usize>,
}

impl TryFrom<&NormalizeQuery> for TessellationConfig {
    type Error = Error;

    fn try_from(query: &NormalizeQuery) -> Result<Self> {
        let mut config = TessellationConfig::default();
        if let Some(samples) = query.samples {
            config.curve_samples = check_curve_samples(samples)?;
        }
        Ok(config)
    }
}

fn respond(status: StatusCode, content_type: &str, body: String) -> Response<Body> {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    if let Ok(value) = content_type.parse() {
        response.headers_mut().insert("Content-Type", value);
    }
    response
}

async fn index() -> impl IntoResponse {
    respond(StatusCode::OK, "text/plain", USAGE.to_string())
}

async fn tessellate(input: String) -> impl IntoResponse {
    let response = handle_request(&input);
    let status = if response.is_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };
    match serde_json::to_string(&response) {
        Ok(body) => respond(status, "application/json", body),
        Err(e) => {
            error!("failed to serialize response: {e}");
            respond(
                StatusCode::INTERNAL_SERVER_ERROR,
                "text/plain",
                format!("Error: {e}"),
            )
        }
    }
}

fn normalize_document(input: &str, query: &NormalizeQuery) -> Result<String> {
    let config = TessellationConfig::try_from(query)?;
    let report = import_str(input, &config)?;
    let scene = if query.strict {
        report.into_result()?
    } else {
        report.scene
    };
    if scene.is_empty() {
        return Err(Error::Document("no paths could be imported".into()));
    }
    export_string(&scene)
}

async fn normalize(query: Query<NormalizeQuery>, input: String) -> impl IntoResponse {
    let Query(query) = query;
    match normalize_document(&input, &query) {
        Ok(svg) => respond(StatusCode::OK, "image/svg+xml", svg),
        Err(e) => respond(StatusCode::BAD_REQUEST, "text/plain", format!("Error: {e}")),
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/tessellate", post(tessellate))
        .route("/api/normalize", post(normalize))
}

pub async fn start_server(listen_addr: Option<&str>, ready: Option<Sender<()>>) -> Result<()> {
    let addr = listen_addr.unwrap_or("127.0.0.1:3004");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on: http://{addr}");
    println!("Listening on: http://{addr}");
    if let Some(ready) = ready {
        ready.send(()).await.map_err(Error::from_err)?;
    }
    axum::serve(listener, router()).await?;
    Ok(())
}
