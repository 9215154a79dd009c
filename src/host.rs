use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::route::LocationKind;

/// Embedded demo graph used when no graph file is given
const SAMPLE_GRAPH: &str = include_str!("sample_graph.toml");

pub const EMPTY_BLOCK_PLACEHOLDER: &str = "(empty block)";

/// What the host found for a visited identifier: the kind of unit it turned
/// out to be, and its raw (possibly marked-up) title text.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContent {
    pub kind: LocationKind,
    pub title: String,
}

/// Resolves a location identifier to displayable content. Returning `None`
/// means the identifier no longer exists; callers drop the visit silently.
pub trait ContentResolver {
    fn resolve(&self, id: &str) -> Option<ResolvedContent>;
}

/// Fire-and-forget request to switch the host's current view.
pub trait Navigator {
    fn open(&mut self, id: &str, kind: LocationKind);
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Graph {
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(default)]
    pub content: String,
}

impl Graph {
    /// Load a graph from a TOML file, or the embedded sample when no path is
    /// given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("could not read graph file '{}'", path.display()))?,
            None => SAMPLE_GRAPH.to_string(),
        };

        toml::from_str(&content).context("could not parse graph file")
    }

    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.pages
            .iter()
            .flat_map(|p| p.blocks.iter())
            .find(|b| b.id == id)
    }

    /// The page a block belongs to.
    pub fn page_of_block(&self, block_id: &str) -> Option<&Page> {
        self.pages
            .iter()
            .find(|p| p.blocks.iter().any(|b| b.id == block_id))
    }
}

impl ContentResolver for Graph {
    /// Page lookup first; failing that, block lookup with a placeholder for
    /// blocks whose content is empty.
    fn resolve(&self, id: &str) -> Option<ResolvedContent> {
        if let Some(page) = self.page(id) {
            return Some(ResolvedContent {
                kind: LocationKind::Page,
                title: page.title.clone(),
            });
        }

        if let Some(block) = self.block(id) {
            let title = if block.content.trim().is_empty() {
                EMPTY_BLOCK_PLACEHOLDER.to_string()
            } else {
                block.content.clone()
            };
            return Some(ResolvedContent {
                kind: LocationKind::Block,
                title,
            });
        }

        None
    }
}
