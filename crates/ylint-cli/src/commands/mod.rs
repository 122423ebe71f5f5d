// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! CLI command implementations.

pub mod fmt;
pub mod init;
pub mod lint;
pub mod rules;

use std::collections::HashSet;

use camino::{Utf8Path, Utf8PathBuf};
use miette::{IntoDiagnostic, Result};
use ylint_core::config::Config;

/// Expands path arguments into the list of grammar files to process.
///
/// Explicit files are taken as given; directories are walked recursively
/// and filtered through the config's include/exclude globs, matched
/// against each file's path relative to the directory argument.
/// Duplicates are dropped, first occurrence wins.
pub fn collect_grammar_files(paths: &[String], config: &Config) -> Result<Vec<Utf8PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for path in paths {
        let path = Utf8PathBuf::from(path);
        if path.is_file() {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        } else if path.is_dir() {
            let mut found = Vec::new();
            collect_from_dir(&path, &path, config, &mut found)?;
            found.sort();
            for file in found {
                if seen.insert(file.clone()) {
                    files.push(file);
                }
            }
        } else {
            miette::bail!("Path '{path}' does not exist");
        }
    }

    if files.is_empty() {
        miette::bail!("No grammar files found");
    }
    Ok(files)
}

fn collect_from_dir(
    root: &Utf8Path,
    dir: &Utf8Path,
    config: &Config,
    out: &mut Vec<Utf8PathBuf>,
) -> Result<()> {
    for entry in std::fs::read_dir(dir.as_std_path()).into_diagnostic()? {
        let entry = entry.into_diagnostic()?;
        let path = Utf8PathBuf::from_path_buf(entry.path())
            .map_err(|p| miette::miette!("non-UTF-8 path: {}", p.display()))?;
        if path.is_dir() {
            collect_from_dir(root, &path, config, out)?;
        } else if let Ok(rel) = path.strip_prefix(root) {
            if config.includes(rel.as_str()) {
                out.push(path.clone());
            }
        }
    }
    Ok(())
}
