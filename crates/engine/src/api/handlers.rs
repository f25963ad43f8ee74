use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, info_span, Instrument};
use relay_shared::types::{GenerateRequest, GenerateResponse, HealthResponse};

use crate::generation::GenerationService;

pub async fn handle_generate(
    State(service): State<Arc<GenerationService>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, (StatusCode, Json<Value>)> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = info_span!("generate", %request_id, model = service.model());

    async move {
        info!(
            prompt_chars = req.prompt.len(),
            max_length = req.max_length,
            temperature = req.temperature,
            "Generation requested"
        );

        let response = match service.generate(&req.prompt, req.max_length, req.temperature).await {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "Generation failed");
                return Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": e.to_string() })),
                ));
            }
        };

        let tool_call = service.parse_tool_call(&response);
        info!(tool_call = tool_call.is_some(), "Generation complete");

        Ok(Json(GenerateResponse { response, tool_call }))
    }
    .instrument(span)
    .await
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
