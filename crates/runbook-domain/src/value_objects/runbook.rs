//! Runbook Structural Value Objects
//!
//! Runbooks are documents with additional structure: a decision tree for
//! diagnosis, one or more step-by-step procedures, and an escalation path
//! for when automated guidance runs out.

use serde::{Deserialize, Serialize};

/// A single node in a runbook's diagnostic decision tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionNode {
    /// Unique id of this node within the tree
    pub id: String,
    /// Question or check presented at this node
    pub prompt: String,
    /// Outgoing edges keyed by the answer/condition that selects them
    pub branches: Vec<DecisionBranch>,
    /// If set, this node is a leaf pointing at a procedure to run
    pub procedure_id: Option<String>,
}

/// An edge out of a [`DecisionNode`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionBranch {
    /// Condition label (e.g. "yes", "no", "latency > 500ms")
    pub condition: String,
    /// Id of the node this branch leads to
    pub next_node_id: String,
}

/// A runbook's decision tree: an entry node plus the full set of reachable nodes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionTree {
    /// Id of the entry node
    pub root_node_id: String,
    /// All nodes in the tree, keyed by id for O(1) traversal
    pub nodes: Vec<DecisionNode>,
}

impl DecisionTree {
    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&DecisionNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The entry node, if the tree is well-formed
    pub fn root(&self) -> Option<&DecisionNode> {
        self.node(&self.root_node_id)
    }
}

/// A single step in a [`Procedure`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcedureStep {
    /// 1-based position within the procedure
    pub order: u32,
    /// Instruction text for this step
    pub instruction: String,
    /// Optional command or snippet associated with this step
    pub command: Option<String>,
    /// Whether this step requires explicit human confirmation before proceeding
    pub requires_confirmation: bool,
}

/// Ordered, executable remediation steps extracted from a runbook
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Procedure {
    /// Stable identifier
    pub id: String,
    /// Id of the runbook (document) this procedure belongs to
    pub runbook_id: String,
    /// Human-readable name
    pub title: String,
    /// Ordered steps
    pub steps: Vec<ProcedureStep>,
}

/// A requested procedure step plus its immediate successor(s) in the
/// runbook's procedure chain
///
/// A runbook document embeds its procedures as an ordered sequence of
/// `<!-- procedure:ID -->` blocks; `successors` is whichever of those
/// blocks immediately follow the requested one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcedureWithSuccessors {
    /// The requested procedure
    pub procedure: Procedure,
    /// Procedures that immediately follow it in the runbook's sequence
    pub successors: Vec<Procedure>,
}

/// A single contact or channel in an escalation chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EscalationContact {
    /// Order in which this contact should be engaged (0 = first)
    pub order: u32,
    /// Role or team name (e.g. "on-call SRE", "database team lead")
    pub role: String,
    /// Contact channel (e.g. "#incidents", "pager:db-oncall", "email:...")
    pub channel: String,
    /// Minutes to wait for a response before escalating to the next contact
    pub response_timeout_minutes: u32,
}

/// Parsed escalation path for a runbook
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EscalationPath {
    /// Id of the runbook (document) this escalation path belongs to
    pub runbook_id: String,
    /// Ordered chain of contacts
    pub contacts: Vec<EscalationContact>,
    /// Advisory-only severity label; never used to skip or reorder the chain
    pub severity: Option<String>,
}
