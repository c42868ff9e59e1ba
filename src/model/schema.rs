//! Node type table and document JSON loading
//!
//! The schema only decides the structural role of each node type. Documents use
//! the `{ "type", "attrs", "content", "text" }` JSON shape of the editor core.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use super::{Attrs, DocumentError, Node, NodeRole};

static NEXT_HEADING_ID: AtomicU64 = AtomicU64::new(1);

/// Node types of the rich-text editor and their roles
const DEFAULT_ROLES: &[(&str, NodeRole)] = &[
    ("doc", NodeRole::Block),
    ("blockquote", NodeRole::Block),
    ("bullet_list", NodeRole::Block),
    ("ordered_list", NodeRole::Block),
    ("list_item", NodeRole::Block),
    ("table", NodeRole::Block),
    ("table_row", NodeRole::Block),
    ("table_cell", NodeRole::Block),
    ("table_header", NodeRole::Block),
    ("paragraph", NodeRole::Textblock),
    ("heading", NodeRole::Textblock),
    ("code_block", NodeRole::Textblock),
    ("horizontal_rule", NodeRole::BlockLeaf),
    ("image", NodeRole::InlineLeaf),
    ("hard_break", NodeRole::InlineLeaf),
    ("text", NodeRole::Text),
];

#[derive(Debug, Serialize, Deserialize)]
struct NodeJson {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    attrs: Attrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    content: Vec<NodeJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

/// Maps node type names to roles and builds nodes from them
#[derive(Debug, Clone)]
pub struct Schema {
    roles: HashMap<String, NodeRole>,
    /// Node types that receive a generated `id` attribute when created without one
    id_types: HashSet<String>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            roles: DEFAULT_ROLES
                .iter()
                .map(|(name, role)| (name.to_string(), *role))
                .collect(),
            id_types: HashSet::from(["heading".to_string()]),
        }
    }
}

impl Schema {
    /// Register (or override) the role of a node type (builder pattern)
    pub fn with_node_type(mut self, name: &str, role: NodeRole) -> Self {
        self.roles.insert(name.to_string(), role);
        self
    }

    pub fn role_of(&self, kind: &str) -> Option<NodeRole> {
        self.roles.get(kind).copied()
    }

    /// Create a node of a registered type for insertion into `doc`
    ///
    /// Types that carry ids get a fresh `id` attribute if none is set. The
    /// generated id is unique among the ids already present in `doc`.
    pub fn node_in(
        &self,
        doc: &Node,
        kind: &str,
        mut attrs: Attrs,
        content: Vec<Node>,
    ) -> Result<Node, DocumentError> {
        let role = self
            .role_of(kind)
            .ok_or_else(|| DocumentError::UnknownNodeType(kind.to_string()))?;
        if role == NodeRole::Text {
            return Err(DocumentError::MissingText);
        }
        if self.id_types.contains(kind) && !has_id(&attrs) {
            let mut taken = HashSet::new();
            collect_node_ids(doc, &mut taken);
            for child in &content {
                collect_node_ids(child, &mut taken);
            }
            attrs.insert("id".to_string(), Value::from(generate_id(&taken)));
        }
        Ok(match role {
            NodeRole::Textblock => Node::textblock(kind, attrs, content),
            _ => Node::new(kind, role, attrs, content),
        })
    }

    /// Parse a document from JSON text
    pub fn from_json(&self, json: &str) -> Result<Node, DocumentError> {
        let raw: NodeJson = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        collect_ids(&raw, &mut seen);
        self.build(raw, &mut seen)
    }

    fn build(&self, raw: NodeJson, seen: &mut HashSet<String>) -> Result<Node, DocumentError> {
        let role = self
            .role_of(&raw.kind)
            .ok_or_else(|| DocumentError::UnknownNodeType(raw.kind.clone()))?;
        if role == NodeRole::Text {
            return raw.text.map(Node::text).ok_or(DocumentError::MissingText);
        }

        let mut attrs = raw.attrs;
        if self.id_types.contains(&raw.kind) && !has_id(&attrs) {
            let id = generate_id(seen);
            seen.insert(id.clone());
            attrs.insert("id".to_string(), Value::from(id));
        }
        let content = raw
            .content
            .into_iter()
            .map(|child| self.build(child, seen))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match role {
            NodeRole::Textblock => Node::textblock(raw.kind, attrs, content),
            _ => Node::new(raw.kind, role, attrs, content),
        })
    }

    /// Serialize a node to the document JSON shape
    pub fn to_json(node: &Node) -> Value {
        serde_json::to_value(to_raw(node)).unwrap_or(Value::Null)
    }
}

fn to_raw(node: &Node) -> NodeJson {
    NodeJson {
        kind: node.kind().to_string(),
        attrs: node.attrs().clone(),
        content: node.content().iter().map(to_raw).collect(),
        text: node.is_text().then(|| node.text_str().to_string()),
    }
}

fn has_id(attrs: &Attrs) -> bool {
    matches!(attrs.get("id"), Some(Value::String(s)) if !s.is_empty())
}

fn collect_ids(raw: &NodeJson, seen: &mut HashSet<String>) {
    if let Some(Value::String(id)) = raw.attrs.get("id") {
        seen.insert(id.clone());
    }
    for child in &raw.content {
        collect_ids(child, seen);
    }
}

fn collect_node_ids(node: &Node, seen: &mut HashSet<String>) {
    if let Some(Value::String(id)) = node.attr("id") {
        seen.insert(id.clone());
    }
    for child in node.content() {
        collect_node_ids(child, seen);
    }
}

fn generate_id(taken: &HashSet<String>) -> String {
    loop {
        let n = NEXT_HEADING_ID.fetch_add(1, Ordering::Relaxed);
        let id = format!("heading-{n}");
        if !taken.contains(&id) {
            return id;
        }
    }
}
