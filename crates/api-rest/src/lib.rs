//! # API REST
//!
//! REST API for the Pagewright authoring assistant.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, status codes)
//!
//! The server owns one authoring session per process. The session sits behind a
//! `tokio::sync::Mutex`; handlers that call the model build the prompt under the lock,
//! release it while awaiting the generator, then take it again to record the result.

#![warn(rust_2018_idioms)]

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use pagewright_core::{
    generate_component_prompt, generate_structured_prompt, AuthoringSession, ComponentId,
    ComponentOptions, GenerationAction, GenerationRequest, InsertOutcome, TemplateStructure,
};
use pagewright_gemini::{GeneratedFragment, GenerationError, GenerationLog, TextGenerator};
use pagewright_ids::ComponentIdGenerator;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Parse the REST listen address, falling back to [`DEFAULT_REST_ADDR`].
pub fn rest_addr_from_env_value(
    value: Option<String>,
) -> Result<SocketAddr, std::net::AddrParseError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_REST_ADDR.to_string())
        .parse()
}

/// Mutable per-process session data.
#[derive(Default)]
struct Session {
    authoring: AuthoringSession,
    log: GenerationLog,
}

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<Session>>,
    generator: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::default())),
            generator,
        }
    }
}

// ============================================================================
// Request / response bodies
// ============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertComponentReq {
    /// Caller-chosen id; a `component-<uuid>` id is allocated when absent.
    pub id: Option<String>,
    #[schema(value_type = Object)]
    pub options: ComponentOptions,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertComponentRes {
    pub id: String,
    #[schema(value_type = Object)]
    pub outcome: InsertOutcome,
    #[schema(value_type = Object)]
    pub structure: TemplateStructure,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptReq {
    #[schema(value_type = Object)]
    pub options: ComponentOptions,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptRes {
    pub component_prompt: String,
    pub structured_prompt: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReq {
    pub description: Option<String>,
    pub existing_template: Option<String>,
    /// `create`, `update` or `modify`. Defaults to `create`.
    #[schema(value_type = Option<String>)]
    pub action: Option<GenerationAction>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRes {
    pub generated_code: String,
    pub block_id: String,
    pub block_label: String,
    pub success: bool,
}

impl From<GeneratedFragment> for GenerateRes {
    fn from(fragment: GeneratedFragment) -> Self {
        Self {
            generated_code: fragment.markup,
            block_id: fragment.block_id,
            block_label: fragment.block_label,
            success: true,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReq {
    #[schema(value_type = Object)]
    pub options: ComponentOptions,
    /// Markup of the selected fragment; when non-blank the fragment is updated.
    pub existing_template: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRes {
    pub id: String,
    pub prompt: String,
    #[schema(value_type = Object)]
    pub outcome: InsertOutcome,
    pub generated_code: String,
    pub block_id: String,
    pub block_label: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorRes>);

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorRes {
            error: message.to_string(),
            details: None,
        }),
    )
}

fn generation_failed(err: &GenerationError) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorRes {
            error: "Internal server error".into(),
            details: Some(err.to_string()),
        }),
    )
}

// ============================================================================
// Router
// ============================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        get_structure,
        reset_structure,
        structure_outline,
        insert_component,
        build_prompts,
        generate,
        submit,
    ),
    components(schemas(
        HealthRes,
        InsertComponentReq,
        InsertComponentRes,
        PromptReq,
        PromptRes,
        GenerateReq,
        GenerateRes,
        SubmitReq,
        SubmitRes,
        ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST application with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/structure", get(get_structure).delete(reset_structure))
        .route("/structure/outline", get(structure_outline))
        .route("/structure/components", post(insert_component))
        .route("/prompts", post(build_prompts))
        .route("/generate", post(generate))
        .route("/submit", post(submit))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Pagewright REST API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/structure",
    responses(
        (status = 200, description = "Current template structure")
    )
)]
/// Current template structure: `components` and `rootComponents`.
#[axum::debug_handler]
async fn get_structure(State(state): State<AppState>) -> Json<TemplateStructure> {
    let session = state.session.lock().await;
    Json(session.authoring.structure().clone())
}

#[utoipa::path(
    delete,
    path = "/structure",
    responses(
        (status = 204, description = "Structure cleared")
    )
)]
/// Discard every component. Confirmation is the caller's concern.
#[axum::debug_handler]
async fn reset_structure(State(state): State<AppState>) -> StatusCode {
    let mut session = state.session.lock().await;
    session.authoring.reset();
    tracing::info!("template structure reset");
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/structure/outline",
    responses(
        (
            status = 200,
            description = "Indented outline of the document",
            body = String,
            content_type = "text/plain"
        )
    )
)]
#[axum::debug_handler]
async fn structure_outline(State(state): State<AppState>) -> String {
    let session = state.session.lock().await;
    session.authoring.structure().outline()
}

#[utoipa::path(
    post,
    path = "/structure/components",
    request_body = InsertComponentReq,
    responses(
        (status = 200, description = "Component registered", body = InsertComponentRes),
        (status = 400, description = "Invalid component id", body = ErrorRes),
        (status = 409, description = "Component id already registered", body = ErrorRes)
    )
)]
/// Register a component and place it according to its `placement`.
///
/// # Errors
/// Returns `400 Bad Request` if the id is blank or contains whitespace, and
/// `409 Conflict` if the id is already registered.
#[axum::debug_handler]
async fn insert_component(
    State(state): State<AppState>,
    Json(req): Json<InsertComponentReq>,
) -> Result<Json<InsertComponentRes>, ApiError> {
    let id = match req.id {
        Some(raw) => ComponentId::new(&raw).map_err(|e| {
            tracing::error!("Invalid component id: {:?}", e);
            bad_request("Invalid component id")
        })?,
        None => ComponentIdGenerator::new().next_id(),
    };

    let mut session = state.session.lock().await;
    let outcome = session.authoring.insert(id.clone(), req.options);
    if outcome == InsertOutcome::DuplicateId {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorRes {
                error: "Component id already registered".into(),
                details: Some(id.to_string()),
            }),
        ));
    }

    Ok(Json(InsertComponentRes {
        id: id.to_string(),
        outcome,
        structure: session.authoring.structure().clone(),
    }))
}

#[utoipa::path(
    post,
    path = "/prompts",
    request_body = PromptReq,
    responses(
        (status = 200, description = "Prompts for the given options", body = PromptRes)
    )
)]
/// Preview the component prompt and the structured prompt without inserting anything.
#[axum::debug_handler]
async fn build_prompts(
    State(state): State<AppState>,
    Json(req): Json<PromptReq>,
) -> Json<PromptRes> {
    let session = state.session.lock().await;
    Json(PromptRes {
        component_prompt: generate_component_prompt(&req.options),
        structured_prompt: generate_structured_prompt(session.authoring.structure(), &req.options),
    })
}

#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerateReq,
    responses(
        (status = 200, description = "Generated markup", body = GenerateRes),
        (status = 400, description = "Description required", body = ErrorRes),
        (status = 500, description = "Generation failed", body = ErrorRes)
    )
)]
/// Generate (or rewrite) an HTML fragment from a description.
///
/// # Errors
/// Returns `400 Bad Request` if the description is missing or an update has no existing
/// markup, and `500 Internal Server Error` with `details` if the model call or the output
/// cleaning fails.
#[axum::debug_handler]
async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateReq>,
) -> Result<Json<GenerateRes>, ApiError> {
    let description = req.description.unwrap_or_default();
    if description.trim().is_empty() {
        return Err(bad_request("Description required"));
    }
    let request = GenerationRequest {
        description,
        existing_template: req.existing_template,
        action: req.action.unwrap_or_default(),
    };

    let fragment = run_generation(&state, request).await?;
    Ok(Json(fragment.into()))
}

#[utoipa::path(
    post,
    path = "/submit",
    request_body = SubmitReq,
    responses(
        (status = 200, description = "Component inserted and generated", body = SubmitRes),
        (status = 400, description = "Invalid generation request", body = ErrorRes),
        (status = 500, description = "Generation failed", body = ErrorRes)
    )
)]
/// Insert a component under a fresh id, then generate its markup from the structured prompt.
///
/// The fragment is updated when `existingTemplate` holds non-blank markup and created
/// otherwise. The component stays in the structure even if generation fails.
///
/// # Errors
/// Returns `400 Bad Request` if the generation request is rejected, and
/// `500 Internal Server Error` with `details` if generation fails.
#[axum::debug_handler]
async fn submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitReq>,
) -> Result<Json<SubmitRes>, ApiError> {
    let submission = {
        let mut session = state.session.lock().await;
        session.authoring.submit(req.options)
    };

    let mut request = GenerationRequest {
        description: submission.prompt.clone(),
        existing_template: req.existing_template,
        action: GenerationAction::Create,
    };
    if request.existing_markup().is_some() {
        request.action = GenerationAction::Update;
    }

    let fragment = run_generation(&state, request).await?;
    Ok(Json(SubmitRes {
        id: submission.id.to_string(),
        prompt: submission.prompt,
        outcome: submission.outcome,
        generated_code: fragment.markup,
        block_id: fragment.block_id,
        block_label: fragment.block_label,
    }))
}

/// Prompt under the lock, await the model without it, record under the lock again.
async fn run_generation(
    state: &AppState,
    request: GenerationRequest,
) -> Result<GeneratedFragment, ApiError> {
    let prompt = {
        let session = state.session.lock().await;
        session.log.prompt_for(&request)
    };
    let prompt = prompt.map_err(|e| {
        tracing::error!("Invalid generation request: {:?}", e);
        bad_request("Invalid generation request")
    })?;

    let raw = state.generator.generate(&prompt).await.map_err(|e| {
        tracing::error!("Generation error: {:?}", e);
        generation_failed(&e)
    })?;

    let mut session = state.session.lock().await;
    let fragment = session.log.record(&request, &raw).map_err(|e| {
        tracing::error!("Generated output rejected: {:?}", e);
        generation_failed(&e)
    })?;
    tracing::info!("generated {} for '{}'", fragment.block_id, fragment.block_label);
    Ok(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use pagewright_gemini::GenerationResult;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct FixedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> GenerationResult<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> GenerationResult<String> {
            Err(GenerationError::Http {
                status: 503,
                body: "overloaded".into(),
            })
        }
    }

    fn app_with(generator: impl TextGenerator + 'static) -> (AppState, Router) {
        let state = AppState::new(Arc::new(generator));
        (state.clone(), router(state))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (_, app) = app_with(FixedGenerator("<div></div>"));
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_insert_builds_the_structure() {
        let (_, app) = app_with(FixedGenerator("<div></div>"));

        let (status, _) = send(
            &app,
            "POST",
            "/structure/components",
            Some(json!({ "id": "A", "options": { "type": "section", "title": "Hero" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            "POST",
            "/structure/components",
            Some(json!({
                "id": "B",
                "options": { "type": "card", "placement": { "targetId": "A", "type": "inside" } }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"]["status"], "placed");
        assert_eq!(body["structure"]["components"]["A"]["children"], json!(["B"]));

        let (_, outline) = send(&app, "GET", "/structure/outline", None).await;
        assert_eq!(outline, Value::String("- Section: Hero [A]\n  - Card [B]\n".into()));
    }

    #[tokio::test]
    async fn test_insert_rejects_bad_and_duplicate_ids() {
        let (_, app) = app_with(FixedGenerator("<div></div>"));
        let options = json!({ "type": "section" });

        let (status, _) = send(
            &app,
            "POST",
            "/structure/components",
            Some(json!({ "id": "has space", "options": options.clone() })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        send(
            &app,
            "POST",
            "/structure/components",
            Some(json!({ "id": "A", "options": options.clone() })),
        )
        .await;
        let (status, _) = send(
            &app,
            "POST",
            "/structure/components",
            Some(json!({ "id": "A", "options": options.clone() })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_reset_clears_structure() {
        let (state, app) = app_with(FixedGenerator("<div></div>"));
        send(
            &app,
            "POST",
            "/structure/components",
            Some(json!({ "options": { "type": "section" } })),
        )
        .await;

        let (status, _) = send(&app, "DELETE", "/structure", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.session.lock().await.authoring.structure().is_empty());
    }

    #[tokio::test]
    async fn test_prompts_preview() {
        let (_, app) = app_with(FixedGenerator("<div></div>"));
        let (status, body) = send(
            &app,
            "POST",
            "/prompts",
            Some(json!({ "options": { "type": "grid", "columnCount": 4 } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let component = body["componentPrompt"].as_str().unwrap();
        assert!(component.starts_with("Generate a layout component of type Grid"));
        assert!(body["structuredPrompt"].as_str().unwrap().starts_with(component));
    }

    #[tokio::test]
    async fn test_generate_returns_cleaned_code_and_block() {
        let (_, app) = app_with(FixedGenerator("```html\n<div style='x'>Hi</div>\n```"));
        let (status, body) = send(
            &app,
            "POST",
            "/generate",
            Some(json!({ "description": "A greeting banner", "action": "create" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["generatedCode"], "<div style=\"x\">Hi</div>");
        assert_eq!(body["blockId"], "ai-block-1");
        assert_eq!(body["blockLabel"], "AI: A greeting banner...");
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_generate_requires_description() {
        let (_, app) = app_with(FixedGenerator("<div></div>"));
        let (status, body) = send(&app, "POST", "/generate", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Description required");
    }

    #[tokio::test]
    async fn test_generate_failure_is_500_with_details() {
        let (state, app) = app_with(FailingGenerator);
        let (status, body) = send(
            &app,
            "POST",
            "/generate",
            Some(json!({ "description": "Hero" })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert!(body["details"].as_str().unwrap().contains("503"));
        assert!(state.session.lock().await.log.history().is_empty());
    }

    #[tokio::test]
    async fn test_submit_inserts_then_generates() {
        let (state, app) = app_with(FixedGenerator("<section>ok</section>"));
        let (status, body) = send(
            &app,
            "POST",
            "/submit",
            Some(json!({ "options": { "type": "section" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["id"].as_str().unwrap().starts_with("component-"));
        assert_eq!(body["generatedCode"], "<section>ok</section>");

        let session = state.session.lock().await;
        assert_eq!(session.authoring.structure().len(), 1);
        assert_eq!(session.log.history().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_with_blank_existing_template_creates() {
        let (state, app) = app_with(FixedGenerator("<section>new</section>"));
        let (status, body) = send(
            &app,
            "POST",
            "/submit",
            Some(json!({ "options": { "type": "card" }, "existingTemplate": "  " })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["generatedCode"], "<section>new</section>");
        assert_eq!(state.session.lock().await.authoring.structure().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_keeps_component_when_generation_fails() {
        let (state, app) = app_with(FailingGenerator);
        let (status, body) = send(
            &app,
            "POST",
            "/submit",
            Some(json!({ "options": { "type": "section" } })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");

        let session = state.session.lock().await;
        assert_eq!(session.authoring.structure().len(), 1);
        assert!(session.log.history().is_empty());
    }

    #[test]
    fn test_rest_addr_parsing() {
        assert_eq!(
            rest_addr_from_env_value(None).unwrap(),
            "0.0.0.0:3000".parse::<SocketAddr>().unwrap()
        );
        assert!(rest_addr_from_env_value(Some("nope".into())).is_err());
    }
}
