//! JSON request and response types, shared by the server and the `json`
//! output format of the command line tool.

use serde_derive::{Deserialize, Serialize};

use crate::document::ImportReport;
use crate::errors::{Error, Result};
use crate::path::{Path, Segment};
use crate::TessellationConfig;

pub const JSON_API_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
pub struct TessellateRequest {
    pub version: u32,
    /// Path data text
    pub d: String,
    #[serde(default)]
    pub config: TessellationConfig,
}

#[derive(Debug, Default, Serialize)]
pub struct TessellateResponse {
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tessellation: Option<TessellationOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TessellationOutput {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub segments: Vec<Segment>,
}

impl TessellationOutput {
    fn from_path(path: &Path) -> Result<Self> {
        let tess = path.tessellation()?;
        Ok(Self {
            vertices: tess.vertices.clone(),
            indices: tess.indices.clone(),
            segments: tess.segments.clone(),
        })
    }
}

impl TessellateResponse {
    pub fn success(path: &Path) -> Result<Self> {
        Ok(Self {
            version: JSON_API_VERSION,
            text: Some(path.to_text()),
            tessellation: Some(TessellationOutput::from_path(path)?),
            error: None,
        })
    }

    pub fn error(message: String) -> Self {
        Self {
            version: JSON_API_VERSION,
            error: Some(message),
            ..Default::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Handle a JSON-encoded `TessellateRequest`, always producing a response;
/// failures are reported in its `error` field.
pub fn handle_request(input: &str) -> TessellateResponse {
    let request = match serde_json::from_str::<TessellateRequest>(input) {
        Ok(request) => request,
        Err(e) => return TessellateResponse::error(format!("Invalid JSON request: {e}")),
    };
    if request.version != JSON_API_VERSION {
        return TessellateResponse::error(format!(
            "Unsupported API version: {} (expected {})",
            request.version, JSON_API_VERSION
        ));
    }
    Path::parse(&request.d)
        .map(|p| p.with_config(request.config))
        .and_then(|p| TessellateResponse::success(&p))
        .unwrap_or_else(|e| TessellateResponse::error(e.to_string()))
}

#[derive(Debug, Serialize)]
pub struct ShapeOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub d: String,
    #[serde(flatten)]
    pub tessellation: TessellationOutput,
}

#[derive(Debug, Serialize)]
pub struct FailureOutput {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub error: String,
}

/// Whole-document output of the command line tool.
#[derive(Debug, Serialize)]
pub struct SceneOutput {
    pub version: u32,
    pub compatible: bool,
    pub shapes: Vec<ShapeOutput>,
    pub failures: Vec<FailureOutput>,
}

impl SceneOutput {
    pub fn from_report(report: &ImportReport) -> Result<Self> {
        let shapes = report
            .scene
            .iter()
            .map(|shape| {
                Ok(ShapeOutput {
                    id: shape.id.clone(),
                    d: shape.path.to_text(),
                    tessellation: TessellationOutput::from_path(&shape.path)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let failures = report
            .failures
            .iter()
            .map(|f| FailureOutput {
                index: f.index,
                id: f.id.clone(),
                error: f.error.to_string(),
            })
            .collect();
        Ok(Self {
            version: JSON_API_VERSION,
            compatible: report.is_compatible(),
            shapes,
            failures,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::from_err)
    }
}
