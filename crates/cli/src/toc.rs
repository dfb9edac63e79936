// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable table-of-contents rendering for a materialized source.

use crate::model::Manifest;

/// Selects the TOC's on-disk shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TocFormat {
    /// One line per file, nested under its directory heading.
    #[default]
    Tree,
    /// One line per file, full path, no nesting.
    Compressed,
}

/// Render a manifest as Markdown in the requested format.
pub fn render(id: &str, manifest: &Manifest, format: TocFormat) -> String {
    match format {
        TocFormat::Tree => render_tree(id, manifest),
        TocFormat::Compressed => render_compressed(id, manifest),
    }
}

fn render_compressed(id: &str, manifest: &Manifest) -> String {
    let mut out = format!("# {id}\n\n");
    for entry in manifest.entries() {
        out.push_str(&format!("- {}\n", entry.path));
    }
    out
}

fn render_tree(id: &str, manifest: &Manifest) -> String {
    let mut out = format!("# {id}\n\n");
    let mut current_dir: Option<String> = None;
    for entry in manifest.entries() {
        let (dir, name) = match entry.path.rsplit_once('/') {
            Some((dir, name)) => (dir.to_string(), name.to_string()),
            None => (String::new(), entry.path.clone()),
        };
        if current_dir.as_deref() != Some(dir.as_str()) {
            if !dir.is_empty() {
                out.push_str(&format!("\n## {dir}/\n\n"));
            } else if current_dir.is_some() {
                out.push('\n');
            }
            current_dir = Some(dir);
        }
        out.push_str(&format!("- {name}\n"));
    }
    out
}

#[cfg(test)]
#[path = "toc_tests.rs"]
mod tests;
