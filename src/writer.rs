use crate::item::TreeItem;
use anyhow::{Context, Result};
use brotli::enc::BrotliEncoderParams;
use brotli::CompressorWriter;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};

/// Format version written into every forest file header.
pub const FOREST_FORMAT_VERSION: &str = "1.0";

/// Writes forests as JSON lines: a header, one `node` line per item in
/// pre-order (parents before children), and a footer.
pub struct ForestWriter {
    writer: Box<dyn Write>,
    node_count: usize,
}

impl ForestWriter {
    /// Creates a writer for `file_path`.
    ///
    /// Brotli compression is enabled when the path ends with `.br`
    /// (e.g. `forest.jsonl.br`).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use rvtree::ForestWriter;
    /// # fn main() -> anyhow::Result<()> {
    /// let mut plain = ForestWriter::new("forest.jsonl")?;
    /// let mut compressed = ForestWriter::new("forest.jsonl.br")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(file_path: &str) -> Result<Self> {
        let file = File::create(file_path).with_context(|| format!("Failed to create file: {}", file_path))?;

        let writer: Box<dyn Write> = if file_path.ends_with(".br") {
            let params = BrotliEncoderParams {
                quality: 6,
                lgwin: 22,
                ..Default::default()
            };
            Box::new(CompressorWriter::with_params(BufWriter::new(file), 4096, &params))
        } else {
            Box::new(BufWriter::new(file))
        };

        Ok(ForestWriter { writer, node_count: 0 })
    }

    pub fn write_header(&mut self, metadata: serde_json::Value) -> Result<()> {
        let header = serde_json::json!({
            "type": "header",
            "version": FOREST_FORMAT_VERSION,
            "metadata": metadata
        });
        self.write_line(&header)
    }

    /// Writes one item. `leaf` marks an item without a children list.
    pub fn write_node<Id, T>(&mut self, id: &Id, parent_id: Option<&Id>, leaf: bool, opened: bool, data: &T) -> Result<()>
    where
        Id: Serialize,
        T: Serialize,
    {
        let mut map = serde_json::Map::new();
        map.insert("type".to_string(), serde_json::Value::String("node".to_string()));
        map.insert("id".to_string(), serde_json::to_value(id).context("Failed to serialize node id")?);
        map.insert(
            "parent_id".to_string(),
            serde_json::to_value(parent_id).context("Failed to serialize parent id")?,
        );
        if leaf {
            map.insert("leaf".to_string(), serde_json::Value::Bool(true));
        }
        if opened {
            map.insert("opened".to_string(), serde_json::Value::Bool(true));
        }
        map.insert("data".to_string(), serde_json::to_value(data).context("Failed to serialize node data")?);

        self.write_line(&serde_json::Value::Object(map))?;
        self.node_count += 1;
        Ok(())
    }

    /// Writes every item of `roots` in pre-order.
    pub fn write_items<Id, T>(&mut self, roots: &[TreeItem<Id, T>]) -> Result<()>
    where
        Id: Serialize,
        T: Serialize,
    {
        let mut stack: Vec<(&TreeItem<Id, T>, Option<&Id>)> = roots.iter().rev().map(|item| (item, None)).collect();

        while let Some((item, parent_id)) = stack.pop() {
            self.write_node(&item.id, parent_id, item.children.is_none(), item.opened, &item.data)?;
            for child in item.children().iter().rev() {
                stack.push((child, Some(&item.id)));
            }
        }
        Ok(())
    }

    pub fn write_footer(&mut self) -> Result<()> {
        let footer = serde_json::json!({
            "type": "footer",
            "total_nodes": self.node_count
        });
        self.write_line(&footer)
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let json = serde_json::to_string(value).context("Failed to serialize to JSON")?;
        writeln!(self.writer, "{}", json).context("Failed to write line")?;
        Ok(())
    }

    /// Flushes buffered output; call before reading the file back.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }
}

impl Drop for ForestWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Writes a complete forest file (header, nodes, footer).
///
/// # Returns
/// The number of nodes written.
pub fn write_forest<Id, T>(file_path: &str, roots: &[TreeItem<Id, T>], metadata: serde_json::Value) -> Result<usize>
where
    Id: Serialize,
    T: Serialize,
{
    let mut writer = ForestWriter::new(file_path)?;
    writer.write_header(metadata)?;
    writer.write_items(roots)?;
    writer.write_footer()?;
    let count = writer.node_count();
    writer.finish()?;
    tracing::debug!(path = file_path, nodes = count, "forest written");
    Ok(count)
}
