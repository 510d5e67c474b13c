//! Context assembly and citation normalization.

use crate::types::{RetrievalResult, DEFAULT_SOURCE};
use std::path::Path;

const LOCAL_FILE_SCHEME: &str = "file://";
const LOCAL_FILE_LABEL: &str = "Local File: ";
const BLOCK_SEPARATOR: &str = "\n---\n";

/// A document source after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedSource {
    /// Absolute http(s) URL
    Url(String),
    /// Base name of a local file
    LocalFile(String),
    /// No usable source; displayed as-is, never cited
    Unattributed(String),
}

impl NormalizedSource {
    /// Text shown after `Source:` in the context block.
    pub fn display(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::LocalFile(name) => format!("{}{}", LOCAL_FILE_LABEL, name),
            Self::Unattributed(text) => text.clone(),
        }
    }
}

/// Normalize a raw document source.
///
/// `file://` paths become their base name, bare hosts get `https://`. Blank
/// sources, the `Unknown` placeholder and local paths with no file name are
/// kept as [`NormalizedSource::Unattributed`] rather than turned into a URL,
/// so they are shown in the context but never cited.
///
/// `normalize_source(&normalize_source(s).display()) == normalize_source(s)`.
pub fn normalize_source(raw: &str) -> NormalizedSource {
    let source = raw.trim();

    if source.is_empty() || source.eq_ignore_ascii_case(DEFAULT_SOURCE) {
        return unattributed();
    }

    let local_name = if let Some(path) = source.strip_prefix(LOCAL_FILE_SCHEME) {
        Some(
            Path::new(path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        )
    } else {
        source
            .strip_prefix(LOCAL_FILE_LABEL.trim_end())
            .map(|name| name.trim().to_string())
    };

    if let Some(name) = local_name {
        return if name.is_empty() {
            unattributed()
        } else {
            NormalizedSource::LocalFile(name)
        };
    }

    if source.starts_with("http://") || source.starts_with("https://") {
        NormalizedSource::Url(source.to_string())
    } else {
        NormalizedSource::Url(format!("https://{}", source))
    }
}

fn unattributed() -> NormalizedSource {
    NormalizedSource::Unattributed(DEFAULT_SOURCE.to_string())
}

/// Deduplicated sources in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CitationSet {
    entries: Vec<NormalizedSource>,
}

impl CitationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source; returns `false` for duplicates and unattributed sources.
    pub fn insert(&mut self, source: NormalizedSource) -> bool {
        if matches!(source, NormalizedSource::Unattributed(_)) || self.entries.contains(&source) {
            return false;
        }
        self.entries.push(source);
        true
    }

    /// Remote URLs; this is the citation list returned to callers.
    pub fn urls(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|s| match s {
                NormalizedSource::Url(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    /// Every attributed source, URLs and local files.
    pub fn entries(&self) -> &[NormalizedSource] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Context text plus the sources it cites.
#[derive(Debug, Clone, Default)]
pub struct AssembledContext {
    pub text: String,
    pub citations: CitationSet,
    pub document_count: usize,
}

impl AssembledContext {
    pub fn is_empty(&self) -> bool {
        self.document_count == 0
    }
}

/// Build the labeled context block and the citation set.
pub fn assemble_context(results: &[RetrievalResult]) -> AssembledContext {
    let mut citations = CitationSet::new();
    let mut blocks = Vec::with_capacity(results.len());

    for result in results {
        let doc = &result.document;
        let source = normalize_source(&doc.source);

        blocks.push(format!(
            "### Document Title: {}\nContent: {}\nSource: {}",
            doc.title,
            doc.content,
            source.display()
        ));
        citations.insert(source);
    }

    tracing::debug!(
        documents = results.len(),
        citations = citations.len(),
        "Assembled context"
    );

    AssembledContext {
        text: blocks.join(BLOCK_SEPARATOR),
        citations,
        document_count: results.len(),
    }
}
