//! HTTP Transport
//!
//! REST API over the same application services the MCP tools use, built on
//! Rocket. Every route returns the uniform `{success, data, error, metadata}`
//! envelope produced by [`crate::formatter::ResponseFormatter`] so HTTP and
//! MCP callers see identical response shapes.
//!
//! | Method + Path | Tool |
//! |---|---|
//! | `POST /search` | search_knowledge_base |
//! | `POST /runbooks/search` | search_runbooks |
//! | `GET /runbooks/<id>` | get_document, scoped to runbooks |
//! | `GET /procedures/<id>` | get_procedure (composite `runbook_id:step_name` id) |
//! | `POST /escalation` | get_escalation_path |
//! | `POST /decision-tree` | get_decision_tree |
//! | `GET /sources?include_health=bool` | list_sources |
//! | `POST /feedback` | record_resolution_feedback |
//! | `GET /health` | liveness + per-adapter health summary |
//! | `GET /metrics` | counters, latency percentiles, cache stats |
//! | `GET /performance` | recent throughput, tier distribution, hit rate |

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;

use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, RawContent};
use rocket::config::{Config as RocketConfig, LogLevel};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Build, Rocket, State, get, post, routes};
use serde_json::{json, Value};

use crate::formatter::ResponseFormatter;
use crate::McpServer;

/// HTTP transport configuration
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl HttpTransportConfig {
    /// Create config for localhost with specified port
    pub fn localhost(port: u16) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port,
        }
    }

    fn rocket_config(&self) -> RocketConfig {
        let address: IpAddr = self
            .host
            .parse()
            .unwrap_or_else(|_| "127.0.0.1".parse().expect("valid IP"));
        RocketConfig {
            address,
            port: self.port,
            log_level: LogLevel::Normal,
            ..RocketConfig::default()
        }
    }
}

/// HTTP transport server
pub struct HttpTransport {
    config: HttpTransportConfig,
    server: Arc<McpServer>,
}

impl HttpTransport {
    /// Create a new HTTP transport over the given server
    pub fn new(config: HttpTransportConfig, server: Arc<McpServer>) -> Self {
        Self { config, server }
    }

    fn rocket(&self) -> Rocket<Build> {
        rocket::build()
            .configure(self.config.rocket_config())
            .manage(Arc::clone(&self.server))
            .mount(
                "/",
                routes![
                    search_knowledge_base,
                    search_runbooks,
                    get_runbook,
                    get_procedure,
                    get_escalation_path,
                    get_decision_tree,
                    list_sources,
                    record_resolution_feedback,
                    health,
                    metrics,
                    performance,
                ],
            )
    }

    /// Start the HTTP transport server
    pub async fn start(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.rocket()
            .launch()
            .await
            .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                format!("rocket launch failed: {e}").into()
            })?;
        Ok(())
    }
}

/// Pull the envelope JSON out of an MCP tool result's text content
fn envelope_of(result: &CallToolResult) -> Value {
    result
        .content
        .first()
        .and_then(|c| match &c.raw {
            RawContent::Text(text) => serde_json::from_str(&text.text).ok(),
            _ => None,
        })
        .unwrap_or_else(|| json!({"success": false, "error": {"code": "UNKNOWN", "message": "empty tool result"}}))
}

/// Render an `invalid_params`-style MCP error (raised before a service call,
/// so it never goes through [`ResponseFormatter`]) as the same envelope shape
fn validation_envelope(error: McpError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": "VALIDATION",
            "message": error.message,
            "severity": "low",
            "retry_after_ms": 0,
        },
        "metadata": {
            "duration_ms": 0,
            "performance_tier": "fast",
            "cache_strategy": "standard",
            "cached": false,
        },
    })
}

/// Map the envelope's error code to the HTTP status the external contract requires
fn status_for(envelope: &Value) -> Status {
    if envelope["success"].as_bool().unwrap_or(false) {
        return Status::Ok;
    }
    match envelope["error"]["code"].as_str().unwrap_or("UNKNOWN") {
        "VALIDATION" => Status::BadRequest,
        "AUTH" => Status::Unauthorized,
        "NOT_FOUND" => Status::NotFound,
        "RATE_LIMIT" => Status::TooManyRequests,
        "TIMEOUT" => Status::GatewayTimeout,
        _ => Status::InternalServerError,
    }
}

/// Responder carrying the envelope plus a `Retry-After` header when rate limited
struct Envelope(Status, Value);

impl<'r> rocket::response::Responder<'r, 'static> for Envelope {
    fn respond_to(self, request: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
        let Envelope(status, value) = self;
        let mut response = Json(value.clone()).respond_to(request)?;
        response.set_status(status);
        if status == Status::TooManyRequests {
            if let Some(ms) = value["error"]["retry_after_ms"].as_u64() {
                let secs = ms.div_ceil(1000).max(1);
                response.set_raw_header("Retry-After", secs.to_string());
            }
        }
        Ok(response)
    }
}

fn respond(result: Result<CallToolResult, McpError>) -> Envelope {
    let envelope = match result {
        Ok(call_result) => envelope_of(&call_result),
        Err(e) => validation_envelope(e),
    };
    let status = status_for(&envelope);
    Envelope(status, envelope)
}

#[post("/search", data = "<body>")]
async fn search_knowledge_base(
    server: &State<Arc<McpServer>>,
    body: Json<crate::args::SearchKnowledgeBaseArgs>,
) -> Envelope {
    let handler = server.search_knowledge_base_handler();
    respond(handler.handle(Parameters(body.into_inner())).await)
}

#[post("/runbooks/search", data = "<body>")]
async fn search_runbooks(
    server: &State<Arc<McpServer>>,
    body: Json<crate::args::SearchRunbooksArgs>,
) -> Envelope {
    let handler = server.search_runbooks_handler();
    respond(handler.handle(Parameters(body.into_inner())).await)
}

#[post("/decision-tree", data = "<body>")]
async fn get_decision_tree(
    server: &State<Arc<McpServer>>,
    body: Json<crate::args::GetDecisionTreeArgs>,
) -> Envelope {
    let handler = server.get_decision_tree_handler();
    respond(handler.handle(Parameters(body.into_inner())).await)
}

#[post("/escalation", data = "<body>")]
async fn get_escalation_path(
    server: &State<Arc<McpServer>>,
    body: Json<crate::args::GetEscalationPathArgs>,
) -> Envelope {
    let handler = server.get_escalation_path_handler();
    respond(handler.handle(Parameters(body.into_inner())).await)
}

#[post("/feedback", data = "<body>")]
async fn record_resolution_feedback(
    server: &State<Arc<McpServer>>,
    body: Json<crate::args::RecordResolutionFeedbackArgs>,
) -> Envelope {
    let handler = server.record_resolution_feedback_handler();
    respond(handler.handle(Parameters(body.into_inner())).await)
}

#[get("/procedures/<id>")]
async fn get_procedure(server: &State<Arc<McpServer>>, id: &str) -> Envelope {
    let (runbook_id, step_name) = match id.split_once(':') {
        Some((r, s)) => (r.to_string(), s.to_string()),
        None => {
            return respond(Err(McpError::invalid_params(
                "procedure id must be of the form 'runbook_id:step_name'",
                None,
            )));
        }
    };
    let handler = server.get_procedure_handler();
    let args = crate::args::GetProcedureArgs {
        runbook_id,
        step_name,
        current_context: None,
    };
    respond(handler.handle(Parameters(args)).await)
}

#[get("/sources?<include_health>")]
async fn list_sources(server: &State<Arc<McpServer>>, include_health: Option<bool>) -> Envelope {
    let handler = server.list_sources_handler();
    let args = crate::args::ListSourcesArgs { include_health };
    respond(handler.handle(Parameters(args)).await)
}

#[get("/runbooks/<id>")]
async fn get_runbook(server: &State<Arc<McpServer>>, id: &str) -> Envelope {
    let timer = Instant::now();
    let result = server.runbook_service().get_document(id).await;
    let formatted = match result {
        Ok(document) => ResponseFormatter::success(document, timer.elapsed(), false, None, None),
        Err(e) => ResponseFormatter::failure(&e, timer.elapsed()),
    };
    respond(formatted)
}

#[get("/health")]
async fn health(server: &State<Arc<McpServer>>) -> Envelope {
    let timer = Instant::now();
    let result = server.sources_service().list_sources().await;
    let formatted = match result {
        Ok(sources) => ResponseFormatter::success(
            json!({ "status": "ok", "sources": sources }),
            timer.elapsed(),
            false,
            None,
            None,
        ),
        Err(e) => ResponseFormatter::failure(&e, timer.elapsed()),
    };
    respond(formatted)
}

#[get("/metrics")]
async fn metrics(server: &State<Arc<McpServer>>) -> Envelope {
    let timer = Instant::now();
    let snapshot = server.metrics().snapshot().await;
    respond(ResponseFormatter::success(
        snapshot,
        timer.elapsed(),
        false,
        None,
        None,
    ))
}

#[get("/performance")]
async fn performance(server: &State<Arc<McpServer>>) -> Envelope {
    let timer = Instant::now();
    let snapshot = server.metrics().snapshot().await;
    respond(ResponseFormatter::success(
        snapshot,
        timer.elapsed(),
        false,
        None,
        None,
    ))
}
