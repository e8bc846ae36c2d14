use anyhow::{Context, Result};
use brotli::enc::BrotliEncoderParams;
use brotli::CompressorWriter;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::traits::NodeId;

/// Streaming writer for `.hier` scene snapshot files.
pub struct SceneWriter {
    writer: Box<dyn Write>,
    group_count: usize,
    node_count: usize,
}

impl SceneWriter {
    /// Creates a new SceneWriter for the specified file path.
    ///
    /// Automatically enables Brotli compression if the file path ends with
    /// `.br` (e.g. `level.hier.br`).
    ///
    /// # Compression
    ///
    /// Brotli compression uses quality level 6 (balanced speed/ratio); scene
    /// snapshots are highly repetitive JSON and compress well.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use rhier::SceneWriter;
    /// # fn main() -> anyhow::Result<()> {
    /// let mut writer = SceneWriter::new("level.hier")?;
    /// let mut compressed = SceneWriter::new("level.hier.br")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(file_path: &str) -> Result<Self> {
        let file = File::create(file_path)
            .with_context(|| format!("Failed to create file: {}", file_path))?;

        let writer: Box<dyn Write> = if file_path.ends_with(".br") {
            let buf_writer = BufWriter::new(file);
            let params = BrotliEncoderParams {
                quality: 6,
                lgwin: 22,
                ..Default::default()
            };
            Box::new(CompressorWriter::with_params(buf_writer, 4096, &params))
        } else {
            Box::new(BufWriter::new(file))
        };

        Ok(SceneWriter {
            writer,
            group_count: 0,
            node_count: 0,
        })
    }

    pub fn write_header(&mut self, version: &str, metadata: serde_json::Value) -> Result<()> {
        let header = serde_json::json!({
            "type": "header",
            "version": version,
            "metadata": metadata
        });
        self.write_line(&header)
    }

    /// Writes a group line and returns the group's index for node lines.
    pub fn write_group(&mut self, label: &str) -> Result<usize> {
        let group = serde_json::json!({
            "type": "group",
            "label": label
        });
        self.write_line(&group)?;
        let index = self.group_count;
        self.group_count += 1;
        Ok(index)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn write_node(
        &mut self,
        id: NodeId,
        parent_id: Option<NodeId>,
        group: usize,
        name: &str,
        active: bool,
        width: f32,
        height: f32,
        ignore: bool,
    ) -> Result<()> {
        let mut map = serde_json::Map::new();
        map.insert("type".to_string(), serde_json::Value::String("node".to_string()));
        map.insert("id".to_string(), serde_json::Value::Number(id.into()));
        map.insert(
            "parent_id".to_string(),
            parent_id
                .map(|p| serde_json::Value::Number(p.into()))
                .unwrap_or(serde_json::Value::Null),
        );
        if parent_id.is_none() {
            map.insert("group".to_string(), serde_json::Value::Number(group.into()));
        }
        map.insert("name".to_string(), serde_json::Value::String(name.to_string()));
        map.insert("active".to_string(), serde_json::Value::Bool(active));
        map.insert("width".to_string(), serde_json::json!(width));
        map.insert("height".to_string(), serde_json::json!(height));
        if ignore {
            map.insert("ignore".to_string(), serde_json::Value::Bool(true));
        }

        self.write_line(&serde_json::Value::Object(map))?;
        self.node_count += 1;
        Ok(())
    }

    pub fn write_footer(&mut self) -> Result<()> {
        let footer = serde_json::json!({
            "type": "footer",
            "total_groups": self.group_count,
            "total_nodes": self.node_count
        });
        self.write_line(&footer)
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let json = serde_json::to_string(value).context("Failed to serialize to JSON")?;
        writeln!(self.writer, "{}", json).context("Failed to write line")?;
        self.writer.flush().context("Failed to flush writer")?;
        Ok(())
    }
}

impl Drop for SceneWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
