//! Bundler output, detached from Rolldown's types.

use indexmap::IndexMap;
use serde::Serialize;

/// One generated chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkArtifact {
    pub file_name: String,
    pub code: String,
    /// Rendered bytes per module id, in chunk order
    pub modules: IndexMap<String, u64>,
}

/// One output of a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutputArtifact {
    Chunk(ChunkArtifact),
    Asset { file_name: String },
}

impl OutputArtifact {
    pub fn file_name(&self) -> &str {
        match self {
            OutputArtifact::Chunk(chunk) => &chunk.file_name,
            OutputArtifact::Asset { file_name } => file_name,
        }
    }

    pub fn as_chunk(&self) -> Option<&ChunkArtifact> {
        match self {
            OutputArtifact::Chunk(chunk) => Some(chunk),
            OutputArtifact::Asset { .. } => None,
        }
    }
}

/// Iterate the chunks of a build, skipping assets.
pub fn chunks(artifacts: &[OutputArtifact]) -> impl Iterator<Item = &ChunkArtifact> {
    artifacts.iter().filter_map(OutputArtifact::as_chunk)
}

/// All chunk code joined by newlines.
pub fn concatenated_code(artifacts: &[OutputArtifact]) -> String {
    chunks(artifacts)
        .map(|chunk| chunk.code.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sum of the UTF-8 byte lengths of all chunk code.
pub fn tree_shaken_size(artifacts: &[OutputArtifact]) -> u64 {
    chunks(artifacts).map(|chunk| chunk.code.len() as u64).sum()
}

/// Rendered bytes per module across every chunk.
pub fn module_sizes(artifacts: &[OutputArtifact]) -> impl Iterator<Item = (&str, u64)> {
    chunks(artifacts).flat_map(|chunk| {
        chunk
            .modules
            .iter()
            .map(|(id, size)| (id.as_str(), *size))
    })
}
