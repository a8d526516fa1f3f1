use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand command-line inputs into the list of files to check.
///
/// Patterns containing glob characters (*, ?, [) are expanded with `glob`.
/// Directories are walked recursively and only files whose extension is in
/// `extensions` are kept. Any other argument is taken as a literal file path
/// and checked regardless of its extension.
pub fn expand_inputs(patterns: &[String], extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let paths = glob::glob(pattern)
                .with_context(|| format!("Invalid glob pattern: {}", pattern))?;

            let mut match_count = 0;
            for path in paths {
                let path =
                    path.with_context(|| format!("Failed to read glob match for: {}", pattern))?;
                if path.is_dir() {
                    files.extend(walk_dir(&path, extensions)?);
                } else {
                    files.push(path);
                }
                match_count += 1;
            }

            if match_count == 0 {
                tracing::warn!("No files matched pattern: {}", pattern);
            }
        } else {
            let path = PathBuf::from(pattern);
            if path.is_dir() {
                files.extend(walk_dir(&path, extensions)?);
            } else if path.exists() {
                files.push(path);
            } else {
                anyhow::bail!("File not found: {}", pattern);
            }
        }
    }

    Ok(files)
}

fn walk_dir(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}
