//! Corpus loader: splits knowledge-base text files into document records.
//!
//! File format:
//!
//! ```text
//! Title: Lightcast Open Skills
//! Source: https://kb.lightcast.io/skills
//! Content: Open Skills is a library of ...
//! ---
//! Title: Another document
//! ...
//! ```

use crate::types::{DocumentRecord, DEFAULT_SOURCE, DEFAULT_TITLE};
use ragnarok_core::{AppError, AppResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const DELIMITER: &str = "---";
const CONTENT_LABEL: &str = "Content:";

/// Load every document under `path`.
///
/// A directory is scanned (non-recursively) for files whose extension is in
/// `extensions`; a file path is loaded directly. Files are visited in name
/// order so ids are the same on every load. Symlinks are followed. Any
/// unreadable file or directory entry aborts the whole load.
pub fn load_documents(path: &Path, extensions: &[String]) -> AppResult<Vec<DocumentRecord>> {
    if !path.exists() {
        return Err(AppError::Load(format!(
            "Corpus path does not exist: {}",
            path.display()
        )));
    }

    let files = if path.is_dir() {
        collect_files(path, extensions)?
    } else {
        vec![path.to_path_buf()]
    };

    tracing::debug!("Loading {} corpus file(s) from {:?}", files.len(), path);

    let mut documents = Vec::new();
    for (file_index, file) in files.iter().enumerate() {
        let text = std::fs::read_to_string(file).map_err(|e| {
            AppError::Load(format!("Failed to read {}: {}", file.display(), e))
        })?;

        let parsed = parse_corpus_text(&text, file_index);
        tracing::debug!("Parsed {} document(s) from {:?}", parsed.len(), file);
        documents.extend(parsed);
    }

    Ok(documents)
}

fn collect_files(dir: &Path, extensions: &[String]) -> AppResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            AppError::Load(format!("Failed to scan {}: {}", dir.display(), e))
        })?;

        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Split one file's text into records.
///
/// Segment indices count every delimiter-separated segment, including the
/// empty ones that are dropped.
pub fn parse_corpus_text(text: &str, file_index: usize) -> Vec<DocumentRecord> {
    split_segments(text)
        .iter()
        .enumerate()
        .filter_map(|(segment_index, segment)| {
            parse_segment(segment).map(|(title, source, content)| DocumentRecord {
                id: format!("doc_{}_{}", file_index, segment_index),
                title,
                source,
                content,
            })
        })
        .collect()
}

fn split_segments(text: &str) -> Vec<String> {
    let mut segments = vec![String::new()];

    for line in text.lines() {
        if line.trim() == DELIMITER {
            segments.push(String::new());
            continue;
        }

        if let Some(current) = segments.last_mut() {
            current.push_str(line);
            current.push('\n');
        }
    }

    segments
}

/// Returns `(title, source, content)`, or `None` when the content is empty.
fn parse_segment(segment: &str) -> Option<(String, String, String)> {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lines: Vec<&str> = trimmed.lines().collect();
    let mut title = DEFAULT_TITLE.to_string();
    let mut source = DEFAULT_SOURCE.to_string();
    let mut body_start = 0;

    if let Some(value) = header_value(lines[0], "title:") {
        title = value;
        body_start = 1;

        if let Some(value) = lines.get(1).and_then(|line| header_value(line, "source:")) {
            source = value;
            body_start = 2;
        }
    }

    let body = lines[body_start..].join("\n");
    let body = body.trim();
    let content = body.strip_prefix(CONTENT_LABEL).unwrap_or(body).trim();

    if content.is_empty() {
        return None;
    }

    Some((title, source, content.to_string()))
}

/// Case-insensitive `key:` match; returns the trimmed value.
fn header_value(line: &str, key: &str) -> Option<String> {
    let line = line.trim_start();
    let head = line.get(..key.len())?;
    if head.eq_ignore_ascii_case(key) {
        Some(line[key.len()..].trim().to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn txt() -> Vec<String> {
        vec!["txt".to_string()]
    }

    #[test]
    fn test_parse_full_headers() {
        let text = "Title: LOT\nSource: https://kb.lightcast.io/lot\nContent: Lightcast Occupation Taxonomy.\nMore detail.";
        let docs = parse_corpus_text(text, 0);

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "doc_0_0");
        assert_eq!(docs[0].title, "LOT");
        assert_eq!(docs[0].source, "https://kb.lightcast.io/lot");
        assert_eq!(docs[0].content, "Lightcast Occupation Taxonomy.\nMore detail.");
    }

    #[test]
    fn test_parse_defaults_without_headers() {
        let docs = parse_corpus_text("Just some text about skills.", 3);
        assert_eq!(docs[0].id, "doc_3_0");
        assert_eq!(docs[0].title, DEFAULT_TITLE);
        assert_eq!(docs[0].source, DEFAULT_SOURCE);
        assert_eq!(docs[0].content, "Just some text about skills.");
    }

    #[test]
    fn test_source_only_recognized_after_title() {
        let docs = parse_corpus_text("Source: https://x.io\nBody text", 0);
        assert_eq!(docs[0].source, DEFAULT_SOURCE);
        assert_eq!(docs[0].content, "Source: https://x.io\nBody text");

        let docs = parse_corpus_text("TITLE: Upper\nbody", 0);
        assert_eq!(docs[0].title, "Upper");
        assert_eq!(docs[0].source, DEFAULT_SOURCE);
        assert_eq!(docs[0].content, "body");
    }

    #[test]
    fn test_content_label_stripped_once() {
        let docs = parse_corpus_text("Title: T\nContent: Content: nested", 0);
        assert_eq!(docs[0].content, "Content: nested");
    }

    #[test]
    fn test_empty_segments_dropped_but_counted() {
        let text = "Title: A\nalpha\n---\n\n---\nTitle: Empty\nSource: x.io\nContent:\n---\nTitle: B\nbeta\n";
        let docs = parse_corpus_text(text, 1);

        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["doc_1_0", "doc_1_3"]);
        assert!(docs.iter().all(|d| !d.content.is_empty()));
    }

    #[test]
    fn test_inline_dashes_do_not_split() {
        let docs = parse_corpus_text("Title: T\nranges 1---5 are fine\n  ---  \nsecond", 0);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].content, "ranges 1---5 are fine");
        assert_eq!(docs[1].content, "second");
    }

    #[test]
    fn test_load_directory_filters_and_orders() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "Title: B\nbeta").unwrap();
        fs::write(dir.path().join("a.txt"), "Title: A\nalpha").unwrap();
        fs::write(dir.path().join("notes.md"), "Title: M\nmarkdown").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.txt"), "Title: C\ngamma").unwrap();

        let docs = load_documents(dir.path(), &txt()).unwrap();
        let titles: Vec<&str> = docs.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(docs[0].id, "doc_0_0");
        assert_eq!(docs[1].id, "doc_1_0");
    }

    #[test]
    fn test_load_is_idempotent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("kb.txt"), "Title: A\na\n---\nTitle: B\nb").unwrap();
        fs::write(dir.path().join("more.txt"), "c").unwrap();

        let first = load_documents(dir.path(), &txt()).unwrap();
        let second = load_documents(dir.path(), &txt()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_single_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("kb.md");
        fs::write(&file, "Title: Only\nbody").unwrap();

        let docs = load_documents(&file, &txt()).unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_loaded() {
        let target_dir = TempDir::new().unwrap();
        let target = target_dir.path().join("lot-record");
        fs::write(&target, "Title: LOT\nSource: kb.lightcast.io/lot\nOccupation taxonomy.").unwrap();

        let corpus = TempDir::new().unwrap();
        std::os::unix::fs::symlink(&target, corpus.path().join("lot.txt")).unwrap();

        let docs = load_documents(corpus.path(), &txt()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "LOT");
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_load_error() {
        let corpus = TempDir::new().unwrap();
        fs::write(corpus.path().join("a.txt"), "Title: A\nalpha").unwrap();
        std::os::unix::fs::symlink(corpus.path().join("gone"), corpus.path().join("b.txt")).unwrap();

        let result = load_documents(corpus.path(), &txt());
        assert!(matches!(result, Err(AppError::Load(_))));
    }

    #[test]
    fn test_unreadable_file_aborts_load() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "Title: A\nalpha").unwrap();
        fs::write(dir.path().join("b.txt"), [0x66u8, 0x6f, 0xff, 0xfe, 0x0a]).unwrap();

        match load_documents(dir.path(), &txt()) {
            Err(AppError::Load(message)) => assert!(message.contains("b.txt")),
            other => panic!("expected load error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_path_is_load_error() {
        let dir = TempDir::new().unwrap();
        let result = load_documents(&dir.path().join("missing"), &txt());
        assert!(matches!(result, Err(AppError::Load(_))));
    }
}
