use anyhow::Context;
use std::path::Path;

/// Writes the page next to a temporary sibling first so readers never see a
/// half-written file.
pub async fn write_page(out: &Path, page: &str) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let tmp = out.with_extension("html.tmp");
    tokio::fs::write(&tmp, page)
        .await
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    tokio::fs::rename(&tmp, out)
        .await
        .with_context(|| format!("failed to move {} into place", out.display()))?;
    Ok(())
}
