//! Parser for `.hier` scene snapshot files.
//!
//! The format is JSON Lines: one `header` line, any number of `group` and
//! `node` lines, and an optional `footer` with totals. Sibling order is file
//! order. A snapshot loaded from disk is immutable, which makes it a
//! convenient fixture source: resyncing against it repeatedly must converge.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use brotli::Decompressor;
use serde::Deserialize;

use crate::name_pool::NamePool;
use crate::traits::{
    DynSceneSource, NodeId, SceneGroup, SceneMetadata, SceneNode, SceneReader, SceneSource,
};

/// Default row height for nodes that do not specify one.
pub const DEFAULT_ROW_HEIGHT: f32 = 20.0;
/// Default label width for nodes that do not specify one.
pub const DEFAULT_ROW_WIDTH: f32 = 80.0;

#[derive(Debug, Clone)]
pub struct SceneFileHeader {
    pub version: String,
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct SceneFileFooter {
    pub total_groups: Option<usize>,
    pub total_nodes: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct SceneFileMetadata {
    pub header: SceneFileHeader,
    pub footer: Option<SceneFileFooter>,
}

/// One parsed object row.
#[derive(Debug, Clone)]
pub struct SceneFileNode {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    /// Index into the group table; only meaningful for nodes without parent.
    pub group: usize,
    pub name: Arc<str>,
    pub active: bool,
    pub ignore: bool,
    pub width: f32,
    pub height: f32,
    // Arena indices of children, in file order.
    child_indices: Vec<usize>,
}

/// A parsed, immutable scene snapshot.
#[derive(Debug)]
pub struct SceneFileData {
    pub metadata: SceneFileMetadata,
    // (label, root arena indices in file order)
    groups: Vec<(String, Vec<usize>)>,
    nodes_by_id: HashMap<NodeId, usize>,
    nodes: Vec<SceneFileNode>,
}

pub struct SceneFileReader;

impl SceneFileReader {
    pub fn new() -> Self {
        SceneFileReader
    }
}

impl Default for SceneFileReader {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum SceneLine {
    #[serde(rename = "header")]
    Header {
        version: String,
        metadata: serde_json::Value,
    },
    #[serde(rename = "group")]
    Group { label: String },
    #[serde(rename = "node")]
    Node {
        id: NodeId,
        #[serde(default)]
        parent_id: Option<NodeId>,
        #[serde(default)]
        group: usize,
        name: String,
        #[serde(default = "default_active")]
        active: bool,
        #[serde(default)]
        ignore: bool,
        #[serde(default = "default_width")]
        width: f32,
        #[serde(default = "default_height")]
        height: f32,
    },
    #[serde(rename = "footer")]
    Footer {
        total_groups: Option<usize>,
        total_nodes: Option<usize>,
    },
}

fn default_active() -> bool {
    true
}

fn default_width() -> f32 {
    DEFAULT_ROW_WIDTH
}

fn default_height() -> f32 {
    DEFAULT_ROW_HEIGHT
}

/// Parses a `.hier` scene snapshot from disk.
///
/// Automatically decompresses Brotli-compressed snapshots based on the `.br`
/// file extension.
///
/// # Supported Formats
///
/// - `.hier` — Uncompressed JSON Lines
/// - `.jsonl` — Uncompressed JSON Lines
/// - `.hier.br` / `.jsonl.br` — Brotli-compressed
///
/// # Examples
///
/// ```no_run
/// # use rhier::parse_scene;
/// # fn main() -> anyhow::Result<()> {
/// let scene = parse_scene("level.hier")?;
/// let compressed = parse_scene("level.hier.br")?;
/// # Ok(())
/// # }
/// ```
pub fn parse_scene(file_path: &str) -> Result<SceneFileData> {
    let file =
        File::open(file_path).with_context(|| format!("Failed to open file: {}", file_path))?;

    let reader: Box<dyn BufRead> = if file_path.ends_with(".br") {
        let decompressor = Decompressor::new(file, 4096);
        Box::new(BufReader::new(decompressor))
    } else {
        Box::new(BufReader::new(file))
    };

    let mut names = NamePool::with_capacity(1024);

    let mut header: Option<SceneFileHeader> = None;
    let mut footer: Option<SceneFileFooter> = None;
    let mut labels: Vec<String> = Vec::new();
    let mut nodes: Vec<SceneFileNode> = Vec::new();
    let mut nodes_by_id: HashMap<NodeId, usize> = HashMap::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line =
            line_result.with_context(|| format!("Failed to read line {}", line_num + 1))?;
        if line.trim().is_empty() {
            continue;
        }

        let scene_line: SceneLine = serde_json::from_str(&line)
            .with_context(|| format!("Failed to parse JSON at line {}", line_num + 1))?;

        match scene_line {
            SceneLine::Header { version, metadata } => {
                if line_num != 0 {
                    return Err(anyhow!(
                        "Header must be first line (found at line {})",
                        line_num + 1
                    ));
                }
                header = Some(SceneFileHeader { version, metadata });
            }

            SceneLine::Group { label } => {
                labels.push(label);
            }

            SceneLine::Node {
                id,
                parent_id,
                group,
                name,
                active,
                ignore,
                width,
                height,
            } => {
                if nodes_by_id.contains_key(&id) {
                    return Err(anyhow!(
                        "Duplicate node ID '{}' at line {}",
                        id,
                        line_num + 1
                    ));
                }
                if parent_id.is_none() && group >= labels.len() {
                    return Err(anyhow!(
                        "Node '{}' references group {} before its group line (line {})",
                        id,
                        group,
                        line_num + 1
                    ));
                }
                let index = nodes.len();
                nodes.push(SceneFileNode {
                    id,
                    parent_id,
                    group,
                    name: names.intern(&name),
                    active,
                    ignore,
                    width,
                    height,
                    child_indices: Vec::new(),
                });
                nodes_by_id.insert(id, index);
            }

            SceneLine::Footer {
                total_groups,
                total_nodes,
            } => {
                footer = Some(SceneFileFooter {
                    total_groups,
                    total_nodes,
                });
            }
        }
    }

    let header = header.ok_or_else(|| anyhow!("Missing header line"))?;

    // Resolve parent links into child index lists, preserving file order.
    let mut groups: Vec<(String, Vec<usize>)> =
        labels.into_iter().map(|label| (label, Vec::new())).collect();
    for index in 0..nodes.len() {
        match nodes[index].parent_id {
            Some(parent_id) => {
                let &parent_index = nodes_by_id.get(&parent_id).ok_or_else(|| {
                    anyhow!(
                        "Node '{}' references unknown parent '{}'",
                        nodes[index].id,
                        parent_id
                    )
                })?;
                if parent_index == index {
                    return Err(anyhow!("Node '{}' is its own parent", nodes[index].id));
                }
                nodes[parent_index].child_indices.push(index);
            }
            None => {
                let group = nodes[index].group;
                groups[group].1.push(index);
            }
        }
    }

    Ok(SceneFileData {
        metadata: SceneFileMetadata { header, footer },
        groups,
        nodes_by_id,
        nodes,
    })
}

// Wrapper types for GAT references

#[derive(Clone, Copy)]
pub struct SceneFileMetadataRef<'a>(&'a SceneFileMetadata);

impl<'a> SceneMetadata for SceneFileMetadataRef<'a> {
    fn version(&self) -> String {
        self.0.header.version.clone()
    }

    fn header_data(&self) -> &serde_json::Value {
        &self.0.header.metadata
    }

    fn total_groups(&self) -> Option<usize> {
        self.0.footer.as_ref().and_then(|f| f.total_groups)
    }

    fn total_nodes(&self) -> Option<usize> {
        self.0.footer.as_ref().and_then(|f| f.total_nodes)
    }
}

/// Borrowed handle to one node; resolves children through the arena, so all
/// handles from one snapshot share its lifetime.
#[derive(Clone, Copy)]
pub struct SceneFileNodeRef<'a> {
    data: &'a SceneFileData,
    index: usize,
}

impl<'a> SceneFileNodeRef<'a> {
    fn node(&self) -> &'a SceneFileNode {
        &self.data.nodes[self.index]
    }

    /// Iterates over children (for adapter-side consumers).
    pub fn children(self) -> impl Iterator<Item = SceneFileNodeRef<'a>> + 'a {
        (0..self.num_children()).filter_map(move |i| self.child_at(i))
    }
}

impl<'a> SceneNode<'a> for SceneFileNodeRef<'a> {
    fn id(&self) -> NodeId {
        self.node().id
    }

    fn display_name(&self) -> String {
        self.node().name.to_string()
    }

    fn is_active(&self) -> bool {
        self.node().active
    }

    fn has_ignore_marker(&self) -> bool {
        self.node().ignore
    }

    fn num_children(&self) -> usize {
        self.node().child_indices.len()
    }

    fn child_at(&self, index: usize) -> Option<Self> {
        let &child_index = self.node().child_indices.get(index)?;
        Some(SceneFileNodeRef {
            data: self.data,
            index: child_index,
        })
    }

    fn preferred_width(&self) -> f32 {
        self.node().width
    }

    fn preferred_height(&self) -> f32 {
        self.node().height
    }
}

// Trait implementations

impl SceneReader for SceneFileReader {
    fn read(&self, file_path: &str) -> Result<DynSceneSource> {
        let data = parse_scene(file_path)?;
        Ok(DynSceneSource::File(data))
    }
}

impl SceneSource for SceneFileData {
    type Metadata<'a> = SceneFileMetadataRef<'a> where Self: 'a;
    type Node<'a> = SceneFileNodeRef<'a> where Self: 'a;

    fn metadata(&self) -> Self::Metadata<'_> {
        SceneFileMetadataRef(&self.metadata)
    }

    fn groups(&self) -> Vec<SceneGroup> {
        self.groups
            .iter()
            .map(|(label, roots)| SceneGroup {
                label: label.clone(),
                root_ids: roots.iter().map(|&i| self.nodes[i].id).collect(),
            })
            .collect()
    }

    fn get_node(&self, id: NodeId) -> Option<Self::Node<'_>> {
        self.nodes_by_id
            .get(&id)
            .map(|&index| SceneFileNodeRef { data: self, index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_lines(name: &str, lines: &[&str]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "rhier_parse_{}_{}.hier",
            name,
            std::process::id()
        ));
        let mut file = File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    #[test]
    fn test_parse_minimal_scene() {
        let path = write_lines("minimal", &[
            r#"{"type":"header","version":"1.0","metadata":{"generator":"test"}}"#,
            r#"{"type":"group","label":"Scene1"}"#,
            r#"{"type":"node","id":1,"name":"A"}"#,
            r#"{"type":"node","id":2,"name":"B"}"#,
            r#"{"type":"node","id":3,"parent_id":2,"name":"C","active":false}"#,
            r#"{"type":"footer","total_groups":1,"total_nodes":3}"#,
        ]);
        let data = parse_scene(path.to_str().unwrap()).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(data.metadata().version(), "1.0");
        assert_eq!(data.metadata().total_nodes(), Some(3));

        let groups = data.groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "Scene1");
        assert_eq!(groups[0].root_ids, vec![1, 2]);

        let b = data.get_node(2).unwrap();
        assert_eq!(b.num_children(), 1);
        let c = b.child_at(0).unwrap();
        assert_eq!(c.id(), 3);
        assert!(!c.is_active());
        assert_eq!(c.preferred_height(), DEFAULT_ROW_HEIGHT);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let path = write_lines("duplicate", &[
            r#"{"type":"header","version":"1.0","metadata":{}}"#,
            r#"{"type":"group","label":"Scene1"}"#,
            r#"{"type":"node","id":1,"name":"A"}"#,
            r#"{"type":"node","id":1,"name":"A again"}"#,
        ]);
        let result = parse_scene(path.to_str().unwrap());
        let _ = std::fs::remove_file(&path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Duplicate"));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let path = write_lines("orphan", &[
            r#"{"type":"header","version":"1.0","metadata":{}}"#,
            r#"{"type":"group","label":"Scene1"}"#,
            r#"{"type":"node","id":1,"parent_id":42,"name":"orphan"}"#,
        ]);
        let result = parse_scene(path.to_str().unwrap());
        let _ = std::fs::remove_file(&path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("unknown parent"));
    }

    #[test]
    fn test_missing_header_rejected() {
        let path = write_lines("no_header", &[r#"{"type":"group","label":"Scene1"}"#]);
        let result = parse_scene(path.to_str().unwrap());
        let _ = std::fs::remove_file(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_forward_parent_reference_allowed() {
        // Children may appear before their parent line; links resolve after
        // the full pass.
        let path = write_lines("forward", &[
            r#"{"type":"header","version":"1.0","metadata":{}}"#,
            r#"{"type":"group","label":"Scene1"}"#,
            r#"{"type":"node","id":3,"parent_id":2,"name":"C"}"#,
            r#"{"type":"node","id":2,"name":"B"}"#,
        ]);
        let data = parse_scene(path.to_str().unwrap()).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(data.get_node(2).unwrap().num_children(), 1);
    }
}
