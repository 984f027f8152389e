//! Runbook Service Use Case
//!
//! Resolves the structural parts of a runbook document. Adapters hand back
//! flat `Document` content; this use case parses the embedded decision
//! tree, procedure, and escalation-path structures out of it.
//!
//! Documents encode their structure as a fenced `json` block per section,
//! tagged with an HTML comment marker (`<!-- decision-tree -->`,
//! `<!-- procedure:ID -->`, `<!-- escalation -->`) so a single runbook
//! document can carry all three alongside its free-text narrative.

use crate::ports::registry::AdapterRegistry;
use crate::ports::services::RunbookServiceInterface;
use async_trait::async_trait;
use runbook_domain::error::{Error, Result};
use runbook_domain::value_objects::{
    DecisionTree, Document, EscalationPath, Procedure, ProcedureWithSuccessors,
};
use std::sync::Arc;

/// A single `<!-- procedure[:ID] -->` block located within a document
struct ProcedureMarker<'a> {
    /// Name following the `:` in a named marker; `None` for the bare
    /// `<!-- procedure -->` fallback marker
    id: Option<String>,
    /// Raw JSON body of the fenced block following this marker
    block: &'a str,
}

/// Runbook service implementation
pub struct RunbookServiceImpl {
    registry: Arc<dyn AdapterRegistry>,
}

impl RunbookServiceImpl {
    /// Construct a new runbook service over an adapter registry
    pub fn new(registry: Arc<dyn AdapterRegistry>) -> Self {
        Self { registry }
    }

    async fn fetch(&self, document_id: &str) -> Result<Document> {
        self.registry
            .get_document(document_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("document:{document_id}")))
    }

    fn extract_block<'a>(content: &'a str, marker: &str) -> Option<&'a str> {
        let marker_pos = content.find(marker)?;
        let after_marker = &content[marker_pos..];
        let fence_start = after_marker.find("```json")? + "```json".len();
        let body = &after_marker[fence_start..];
        let fence_end = body.find("```")?;
        Some(body[..fence_end].trim())
    }

    /// Every `<!-- procedure[:ID] -->` block in a document, in the order
    /// they appear, needed to resolve a named step's immediate successor
    fn procedure_markers(content: &str) -> Vec<ProcedureMarker<'_>> {
        let mut markers = Vec::new();
        let mut search_from = 0;
        while let Some(rel_pos) = content[search_from..].find("<!-- procedure") {
            let marker_start = search_from + rel_pos;
            let after = &content[marker_start..];
            let Some(tag_end) = after.find("-->") else {
                break;
            };
            let tag = &after[..tag_end + "-->".len()];
            let id = tag
                .strip_prefix("<!-- procedure:")
                .map(|rest| rest.trim_end_matches("-->").trim().to_string());

            if let Some(block) = Self::extract_block(after, "<!-- procedure") {
                markers.push(ProcedureMarker { id, block });
            }
            search_from = marker_start + tag_end + "-->".len();
        }
        markers
    }
}

#[async_trait]
impl RunbookServiceInterface for RunbookServiceImpl {
    async fn get_decision_tree(&self, runbook_id: &str) -> Result<DecisionTree> {
        let document = self.fetch(runbook_id).await?;
        let block = Self::extract_block(&document.content, "<!-- decision-tree -->")
            .ok_or_else(|| Error::not_found(format!("decision_tree:{runbook_id}")))?;
        serde_json::from_str(block)
            .map_err(|err| Error::source_adapter(&document.source_id, err.to_string()))
    }

    async fn get_procedure(
        &self,
        runbook_id: &str,
        step_name: &str,
    ) -> Result<ProcedureWithSuccessors> {
        let document = self.fetch(runbook_id).await?;
        let markers = Self::procedure_markers(&document.content);
        let idx = markers
            .iter()
            .position(|m| m.id.as_deref() == Some(step_name))
            .or_else(|| markers.iter().position(|m| m.id.is_none()))
            .ok_or_else(|| Error::not_found(format!("procedure:{runbook_id}/{step_name}")))?;

        let procedure: Procedure = serde_json::from_str(markers[idx].block)
            .map_err(|err| Error::source_adapter(&document.source_id, err.to_string()))?;

        let successors = match markers.get(idx + 1) {
            Some(next) => {
                let successor: Procedure = serde_json::from_str(next.block)
                    .map_err(|err| Error::source_adapter(&document.source_id, err.to_string()))?;
                vec![successor]
            }
            None => Vec::new(),
        };

        Ok(ProcedureWithSuccessors { procedure, successors })
    }

    async fn get_escalation_path(&self, runbook_id: &str) -> Result<EscalationPath> {
        let document = self.fetch(runbook_id).await?;
        let block = Self::extract_block(&document.content, "<!-- escalation -->")
            .ok_or_else(|| Error::not_found(format!("escalation_path:{runbook_id}")))?;
        serde_json::from_str(block)
            .map_err(|err| Error::source_adapter(&document.source_id, err.to_string()))
    }

    async fn get_document(&self, document_id: &str) -> Result<Document> {
        self.fetch(document_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_fenced_json_block() {
        let content = r#"
Some narrative text.

<!-- decision-tree -->
```json
{"root_node_id":"n1","nodes":[]}
```

More text after.
"#;
        let block = RunbookServiceImpl::extract_block(content, "<!-- decision-tree -->").unwrap();
        assert!(block.contains("root_node_id"));
        let tree: DecisionTree = serde_json::from_str(block).unwrap();
        assert_eq!(tree.root_node_id, "n1");
    }

    #[test]
    fn missing_marker_returns_none() {
        let content = "no structured blocks here";
        assert!(RunbookServiceImpl::extract_block(content, "<!-- escalation -->").is_none());
    }

    #[test]
    fn procedure_markers_are_found_in_document_order() {
        let content = r#"
<!-- procedure:check_usage -->
```json
{"id":"p1","runbook_id":"r1","title":"Check usage","steps":[]}
```

<!-- procedure:clean_temp -->
```json
{"id":"p2","runbook_id":"r1","title":"Clean temp","steps":[]}
```
"#;
        let markers = RunbookServiceImpl::procedure_markers(content);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].id.as_deref(), Some("check_usage"));
        assert_eq!(markers[1].id.as_deref(), Some("clean_temp"));
    }
}
