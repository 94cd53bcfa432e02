use crate::item::{ItemId, TreeItem};
use anyhow::{anyhow, Context, Result};
use brotli::Decompressor;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// A forest read back from disk.
#[derive(Debug, Clone)]
pub struct ForestFile<Id, T> {
    pub version: String,
    pub metadata: serde_json::Value,
    pub roots: Vec<TreeItem<Id, T>>,
    pub total_nodes: usize,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ForestLine<Id, T> {
    #[serde(rename = "header")]
    Header {
        version: String,
        #[serde(default)]
        metadata: serde_json::Value,
    },
    #[serde(rename = "node")]
    Node {
        id: Id,
        #[serde(default = "Option::default")]
        parent_id: Option<Id>,
        #[serde(default)]
        leaf: bool,
        #[serde(default)]
        opened: bool,
        data: T,
    },
    #[serde(rename = "footer")]
    Footer {
        #[serde(default)]
        total_nodes: Option<usize>,
    },
}

/// Reads a forest file written by [`ForestWriter`](crate::ForestWriter).
///
/// Files ending in `.br` are Brotli-decompressed. Blank lines are skipped.
/// Every node must name a parent that appeared on an earlier line.
pub fn read_forest<Id, T>(file_path: &str) -> Result<ForestFile<Id, T>>
where
    Id: ItemId + DeserializeOwned,
    T: DeserializeOwned,
{
    let file = File::open(file_path).with_context(|| format!("Failed to open file: {}", file_path))?;

    let reader: Box<dyn BufRead> = if file_path.ends_with(".br") {
        Box::new(BufReader::new(Decompressor::new(file, 4096)))
    } else {
        Box::new(BufReader::new(file))
    };

    let mut header: Option<(String, serde_json::Value)> = None;
    let mut footer_total: Option<usize> = None;
    let mut slots: Vec<Option<TreeItem<Id, T>>> = Vec::new();
    let mut parents: Vec<Option<usize>> = Vec::new();
    let mut index_by_id: HashMap<Id, usize> = HashMap::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result.with_context(|| format!("Failed to read line {}", line_num + 1))?;
        if line.trim().is_empty() {
            continue;
        }

        let parsed: ForestLine<Id, T> =
            serde_json::from_str(&line).with_context(|| format!("Failed to parse JSON at line {}", line_num + 1))?;

        match parsed {
            ForestLine::Header { version, metadata } => {
                if header.is_some() || !slots.is_empty() {
                    return Err(anyhow!("Header must be the first line (found at line {})", line_num + 1));
                }
                header = Some((version, metadata));
            }
            ForestLine::Node {
                id,
                parent_id,
                leaf,
                opened,
                data,
            } => {
                if index_by_id.contains_key(&id) {
                    return Err(anyhow!("Duplicate node ID '{:?}' at line {}", id, line_num + 1));
                }

                let parent = match parent_id {
                    Some(parent_id) => {
                        let parent_index = *index_by_id.get(&parent_id).ok_or_else(|| {
                            anyhow!("Node references unknown parent '{:?}' at line {}", parent_id, line_num + 1)
                        })?;
                        let is_leaf = slots[parent_index].as_ref().map_or(true, |p| p.children.is_none());
                        if is_leaf {
                            return Err(anyhow!("Parent '{:?}' is a leaf at line {}", parent_id, line_num + 1));
                        }
                        Some(parent_index)
                    }
                    None => None,
                };

                let mut item = if leaf {
                    TreeItem::leaf(id.clone(), data)
                } else {
                    TreeItem::branch(id.clone(), data, Vec::new())
                };
                item.opened = opened;

                index_by_id.insert(id, slots.len());
                slots.push(Some(item));
                parents.push(parent);
            }
            ForestLine::Footer { total_nodes } => {
                footer_total = total_nodes;
            }
        }
    }

    let (version, metadata) = header.ok_or_else(|| anyhow!("Missing header in {}", file_path))?;
    let total_nodes = slots.len();

    if let Some(expected) = footer_total {
        if expected != total_nodes {
            tracing::warn!(expected, actual = total_nodes, "footer node count mismatch");
        }
    }

    Ok(ForestFile {
        version,
        metadata,
        roots: assemble(slots, &parents),
        total_nodes,
    })
}

/// Attaches every node to its parent. Children always follow their parent, so
/// walking backwards completes each child list before its owner is moved.
fn assemble<Id, T>(mut slots: Vec<Option<TreeItem<Id, T>>>, parents: &[Option<usize>]) -> Vec<TreeItem<Id, T>> {
    let mut roots = Vec::new();

    for index in (0..slots.len()).rev() {
        let Some(mut item) = slots[index].take() else {
            continue;
        };
        // Children were pushed last-to-first
        if let Some(children) = item.children.as_mut() {
            children.reverse();
        }

        match parents[index] {
            Some(parent_index) => {
                if let Some(parent) = slots[parent_index].as_mut() {
                    parent.children.get_or_insert_with(Vec::new).push(item);
                }
            }
            None => roots.push(item),
        }
    }

    roots.reverse();
    roots
}
