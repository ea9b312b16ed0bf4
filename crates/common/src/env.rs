//! Environment/runtime helpers
//!
//! Sanity checks on the directories the server expects at startup.

use tracing::warn;

/// Warn when the static assets directory is missing. The data directory is
/// created by the store itself.
pub async fn ensure_env(frontend_dir: &str) -> anyhow::Result<()> {
    match tokio::fs::metadata(frontend_dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(anyhow::anyhow!("{frontend_dir} exists but is not a directory")),
        Err(_) => {
            warn!(%frontend_dir, "frontend assets directory not found; static assets may 404");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn missing_frontend_only_warns() -> anyhow::Result<()> {
        let missing = std::env::temp_dir().join(format!("ensure_env_{}", Uuid::new_v4()));
        ensure_env(&missing.to_string_lossy()).await?;
        assert!(!missing.exists());
        Ok(())
    }

    #[tokio::test]
    async fn file_in_place_of_frontend_is_error() -> anyhow::Result<()> {
        let file = std::env::temp_dir().join(format!("ensure_env_{}", Uuid::new_v4()));
        tokio::fs::write(&file, b"x").await?;
        assert!(ensure_env(&file.to_string_lossy()).await.is_err());
        let _ = tokio::fs::remove_file(&file).await;
        Ok(())
    }
}
