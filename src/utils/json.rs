use std::fs;
use std::path::Path;

use anyhow::Context as _;
use serde::Serialize;

/// Writes `data` pretty-printed as JSON to `path`, replacing any existing
/// file.
pub fn save_json<T, P>(data: &T, path: P) -> anyhow::Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let serialized = serde_json::to_string_pretty(data)?;
    fs::write(&path, serialized)
        .with_context(|| format!("failed to write {}", path.as_ref().display()))?;
    Ok(())
}
