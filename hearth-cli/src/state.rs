use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub fn hearth_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".hearth"))
}

pub fn ensure_hearth_home() -> Result<PathBuf> {
    let dir = hearth_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
