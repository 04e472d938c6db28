use crate::Result;
use std::path::{Path, PathBuf};

const DEFAULT_FILENAME: &str = "default.pdf";

/// Stored names get a 37 byte `<uuid>_` prefix and must stay under the 255 byte limit
/// of common filesystems
const MAX_FILENAME_BYTES: usize = 200;

/// Longest extension kept intact when a name is shortened
const MAX_EXTENSION_BYTES: usize = 16;

/// Reduces a client supplied filename to its final path component,
/// shortened to at most [`MAX_FILENAME_BYTES`]
pub fn sanitize_filename(name: Option<&str>) -> String {
    let candidate = name
        .unwrap_or_default()
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    match candidate {
        "" | "." | ".." => DEFAULT_FILENAME.to_string(),
        name => truncate_filename(name),
    }
}

/// Cuts the stem on a char boundary so the name fits, keeping a short extension
fn truncate_filename(name: &str) -> String {
    if name.len() <= MAX_FILENAME_BYTES {
        return name.to_string();
    }

    let (stem, extension) = match name.rfind('.') {
        Some(dot) if dot > 0 && name.len() - dot <= MAX_EXTENSION_BYTES => name.split_at(dot),
        _ => (name, ""),
    };

    let mut end = MAX_FILENAME_BYTES - extension.len();
    while !stem.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{}", &stem[..end], extension)
}

/// Writes an upload into the assets directory as `<upload_id>_<filename>`
pub async fn store_upload(
    assets_path: &Path,
    upload_id: &str,
    filename: &str,
    bytes: &[u8],
) -> Result<PathBuf> {
    tokio::fs::create_dir_all(assets_path).await?;

    let location = assets_path.join(format!("{}_{}", upload_id, filename));
    tokio::fs::write(&location, bytes).await?;

    tracing::debug!("Stored {} bytes at {}", bytes.len(), location.display());
    Ok(location)
}

/// Removes a stored upload that produced no data. Failures are only logged.
pub async fn discard_upload(location: &Path) {
    match tokio::fs::remove_file(location).await {
        Ok(()) => tracing::debug!("Removed {}", location.display()),
        Err(err) => tracing::warn!("Failed to remove {}: {}", location.display(), err),
    }
}
