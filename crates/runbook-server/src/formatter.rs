//! Response Transform Layer
//!
//! Wraps every tool result in the uniform `{success, data, error, metadata}`
//! envelope, derives `performance_tier`/`cache_strategy`, and applies the
//! tool-specific enrichments (URLs, parsed escalation contacts) called for
//! by the external interface contract. This is the one place response shape
//! is decided; handlers call a service, then hand the result here.

use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, Content};
use runbook_domain::error::Error;
use runbook_domain::value_objects::{
    EscalationContact, EscalationPath, Procedure, ProcedureWithSuccessors, SearchResult,
};
use serde::Serialize;
use std::time::Duration;

use crate::args::SeverityArg;

/// Tiering applied to observed request latency
fn performance_tier(duration: Duration) -> &'static str {
    let ms = duration.as_millis();
    if ms < 200 {
        "fast"
    } else if ms < 1000 {
        "medium"
    } else {
        "slow"
    }
}

/// Caching/priority hint surfaced alongside the result
///
/// `performance_cache` wins whenever the result actually came from cache,
/// since that is the strongest signal about how this response was served.
/// Otherwise critical/high severity requests are flagged `high_priority`
/// so callers know not to rely on caching for them, and a high combined
/// relevance score is flagged `high_confidence`.
fn cache_strategy(cached: bool, severity: Option<SeverityArg>, top_score: Option<f64>) -> &'static str {
    if cached {
        return "performance_cache";
    }
    if matches!(severity, Some(SeverityArg::Critical) | Some(SeverityArg::High)) {
        return "high_priority";
    }
    if top_score.is_some_and(|s| s >= runbook_domain::constants::RUNBOOK_MATCH_THRESHOLD) {
        return "high_confidence";
    }
    "standard"
}

/// Metadata attached to every successful response
#[derive(Debug, Serialize)]
pub struct ResponseMetadata {
    /// Wall-clock time the tool call took, in milliseconds
    pub duration_ms: u64,
    /// Coarse latency tier, see [`performance_tier`]
    pub performance_tier: &'static str,
    /// Caching/priority hint, see [`cache_strategy`]
    pub cache_strategy: &'static str,
    /// Whether this response was served from cache
    pub cached: bool,
}

/// Error shape carried by a failed response, mirroring the closed [`Error`] taxonomy
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Machine-readable error code, see [`Error::code`]
    pub code: &'static str,
    /// Human-readable message
    pub message: String,
    /// Severity, see [`Error::severity`]
    pub severity: runbook_domain::error::Severity,
    /// Milliseconds the caller should wait before retrying, if retryable
    pub retry_after_ms: Option<u64>,
}

/// The uniform `{success, data, error, metadata}` envelope every tool returns
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    /// Whether the call succeeded
    pub success: bool,
    /// Result payload, present only when `success` is true
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error detail, present only when `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
    /// Response metadata, present on both success and failure
    pub metadata: ResponseMetadata,
}

/// Builds [`Envelope`]s and serializes them into an MCP [`CallToolResult`]
pub struct ResponseFormatter;

impl ResponseFormatter {
    /// Wrap a successful result in the envelope and serialize it as the
    /// tool call's text content
    pub fn success<T: Serialize>(
        data: T,
        duration: Duration,
        cached: bool,
        severity: Option<SeverityArg>,
        top_score: Option<f64>,
    ) -> Result<CallToolResult, McpError> {
        let envelope = Envelope {
            success: true,
            data: Some(data),
            error: None,
            metadata: ResponseMetadata {
                duration_ms: duration.as_millis() as u64,
                performance_tier: performance_tier(duration),
                cache_strategy: cache_strategy(cached, severity, top_score),
                cached,
            },
        };
        Self::serialize(&envelope)
    }

    /// Wrap a domain error in the envelope
    ///
    /// Never returns `Err` itself: a failed tool call is still a successful
    /// MCP call that carries `success: false` in its body, so HTTP and MCP
    /// callers see the same shape.
    pub fn failure(error: &Error, duration: Duration) -> Result<CallToolResult, McpError> {
        let envelope = Envelope::<()> {
            success: false,
            data: None,
            error: Some(ErrorEnvelope {
                code: error.code(),
                message: error.to_string(),
                severity: error.severity(),
                retry_after_ms: error.retry_after_ms(),
            }),
            metadata: ResponseMetadata {
                duration_ms: duration.as_millis() as u64,
                performance_tier: performance_tier(duration),
                cache_strategy: "standard",
                cached: false,
            },
        };
        Self::serialize(&envelope)
    }

    fn serialize<T: Serialize>(envelope: &Envelope<T>) -> Result<CallToolResult, McpError> {
        let body = serde_json::to_string(envelope).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(body)]))
    }
}

/// A search result enriched with the navigable URLs the external contract expects
#[derive(Debug, Serialize)]
pub struct EnrichedSearchResult {
    #[serde(flatten)]
    pub result: SearchResult,
    /// Direct link to the matched document
    pub url: String,
    /// Links to each procedure extracted from the matched document, if any
    pub procedures_url: Vec<String>,
}

/// Enrich a `search_runbooks` result with `url`/`procedures_url`
pub fn enrich_search_result(result: SearchResult, procedure_ids: &[String]) -> EnrichedSearchResult {
    let url = format!("/runbooks/{}", result.document_id);
    let procedures_url = procedure_ids.iter().map(|id| format!("/procedures/{id}")).collect();
    EnrichedSearchResult {
        result,
        url,
        procedures_url,
    }
}

/// A procedure enriched with navigable URLs back to its runbook and steps
#[derive(Debug, Serialize)]
pub struct EnrichedProcedure {
    #[serde(flatten)]
    pub procedure: Procedure,
    /// Link to invoke/execute this procedure
    pub execution_url: String,
    /// Link back to the owning runbook
    pub runbook_url: String,
    /// Procedures that immediately follow this one in the runbook's sequence
    pub related_steps: Vec<Procedure>,
}

/// Enrich a `get_procedure` result with `execution_url`/`runbook_url`/`related_steps`
pub fn enrich_procedure(procedure: ProcedureWithSuccessors) -> EnrichedProcedure {
    let execution_url = format!("/procedures/{}", procedure.procedure.id);
    let runbook_url = format!("/runbooks/{}", procedure.procedure.runbook_id);
    EnrichedProcedure {
        procedure: procedure.procedure,
        execution_url,
        runbook_url,
        related_steps: procedure.successors,
    }
}

/// Contact methods parsed out of a contact's free-text channel field
#[derive(Debug, Default, Serialize)]
pub struct ContactMethods {
    /// Email address, if one was found
    pub email: Option<String>,
    /// Phone number, if one was found
    pub phone: Option<String>,
    /// Chat channel (e.g. `#ops-alerts`), if one was found
    pub chat: Option<String>,
}

/// Parse a contact's `channel` field into discrete, typed contact methods
///
/// Channels are comma-separated free text (e.g.
/// `"oncall@ops.example.com, +1-555-0100, #ops-alerts"`); each segment is
/// classified by shape, not by a declared type, since upstream runbooks do
/// not structure this field.
fn parse_contact_methods(channel: &str) -> ContactMethods {
    let mut methods = ContactMethods::default();
    for segment in channel.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        if segment.starts_with('#') {
            methods.chat.get_or_insert_with(|| segment.to_string());
        } else if segment.contains('@') {
            methods.email.get_or_insert_with(|| segment.to_string());
        } else if segment.chars().any(|c| c.is_ascii_digit()) {
            methods.phone.get_or_insert_with(|| segment.to_string());
        }
    }
    methods
}

/// A single escalation contact with its channel parsed into discrete methods
#[derive(Debug, Serialize)]
pub struct EnrichedEscalationContact {
    /// 1-based position in the escalation chain
    pub escalation_order: u32,
    /// Role or team name
    pub role: String,
    /// Parsed contact methods
    pub contact_methods: ContactMethods,
    /// Minutes to wait before escalating past this contact
    pub estimated_response_minutes: u32,
}

/// Enriched escalation path with parsed contact methods and 1-based ordering
#[derive(Debug, Serialize)]
pub struct EnrichedEscalationPath {
    /// Id of the runbook this path belongs to
    pub runbook_id: String,
    /// Ordered, enriched contact chain
    pub contacts: Vec<EnrichedEscalationContact>,
}

fn enrich_contact(contact: &EscalationContact) -> EnrichedEscalationContact {
    EnrichedEscalationContact {
        escalation_order: contact.order + 1,
        role: contact.role.clone(),
        contact_methods: parse_contact_methods(&contact.channel),
        estimated_response_minutes: contact.response_timeout_minutes,
    }
}

/// Enrich a `get_escalation_path` result with parsed contact methods and
/// 1-based `escalation_order`
pub fn enrich_escalation_path(path: &EscalationPath) -> EnrichedEscalationPath {
    EnrichedEscalationPath {
        runbook_id: path.runbook_id.clone(),
        contacts: path.contacts.iter().map(enrich_contact).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_contact_channel() {
        let methods = parse_contact_methods("oncall@ops.example.com, +1-555-0100, #ops-alerts");
        assert_eq!(methods.email.as_deref(), Some("oncall@ops.example.com"));
        assert_eq!(methods.phone.as_deref(), Some("+1-555-0100"));
        assert_eq!(methods.chat.as_deref(), Some("#ops-alerts"));
    }

    #[test]
    fn first_contact_is_escalation_order_one() {
        let contact = EscalationContact {
            order: 0,
            role: "on-call SRE".to_string(),
            channel: "oncall@ops.example.com".to_string(),
            response_timeout_minutes: 15,
        };
        assert_eq!(enrich_contact(&contact).escalation_order, 1);
    }

    #[test]
    fn tiers_match_thresholds() {
        assert_eq!(performance_tier(Duration::from_millis(50)), "fast");
        assert_eq!(performance_tier(Duration::from_millis(500)), "medium");
        assert_eq!(performance_tier(Duration::from_millis(1500)), "slow");
    }
}
