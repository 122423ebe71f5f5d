// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `ylint init` — write a starter configuration file.

use camino::Utf8Path;
use miette::{IntoDiagnostic, Result};
use ylint_core::config::{Config, CONFIG_FILE_NAME};

/// Write the default `ylint.toml` to the working directory. Refuses to
/// overwrite an existing file unless `force` is set.
pub fn run_init(force: bool) -> Result<()> {
    write_config(Utf8Path::new(CONFIG_FILE_NAME), force)
}

fn write_config(path: &Utf8Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        miette::bail!("'{path}' already exists (pass --force to overwrite)");
    }
    std::fs::write(path.as_std_path(), Config::default_toml())
        .into_diagnostic()
        .map_err(|e| miette::miette!("Failed to write '{}': {e}", path))?;
    println!("created {path}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn temp_config_path() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("ylint.toml")).expect("utf8 path");
        (dir, path)
    }

    #[test]
    fn writes_a_parseable_default_config() {
        let (_dir, path) = temp_config_path();
        write_config(&path, false).expect("init");
        let config = Config::load(Some(path.as_std_path())).expect("default config parses");
        assert!(config.rule_enabled("LongRule"));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let (_dir, path) = temp_config_path();
        std::fs::write(path.as_std_path(), "# custom\n").expect("seed");
        let err = write_config(&path, false).unwrap_err();
        assert!(format!("{err}").contains("already exists"));
        let text = std::fs::read_to_string(path.as_std_path()).expect("read");
        assert_eq!(text, "# custom\n");
    }

    #[test]
    fn force_overwrites() {
        let (_dir, path) = temp_config_path();
        std::fs::write(path.as_std_path(), "# custom\n").expect("seed");
        write_config(&path, true).expect("init --force");
        let text = std::fs::read_to_string(path.as_std_path()).expect("read");
        assert!(text.contains("[rules.LongRule]"));
    }
}
