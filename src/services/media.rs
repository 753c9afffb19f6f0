use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "image" | "imagem" => Some(MediaKind::Image),
            "video" | "vídeo" => Some(MediaKind::Video),
            "audio" | "áudio" => Some(MediaKind::Audio),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }

    fn dir_name(&self) -> &'static str {
        match self {
            MediaKind::Image => "mssp_images",
            MediaKind::Video => "mssp_videos",
            MediaKind::Audio => "mssp_audios",
        }
    }

    fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            MediaKind::Image => &["png", "jpg", "jpeg", "gif", "webp"],
            MediaKind::Video => &["mp4", "mov", "webm"],
            MediaKind::Audio => &["mp3", "wav", "ogg", "m4a"],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Arquivo vazio.")]
    Empty,

    #[error("Formato não suportado para {kind}: {name}")]
    UnsupportedFormat { kind: &'static str, name: String },

    #[error("failed to store upload at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredMedia {
    pub kind: MediaKind,
    pub path: String,
    pub size: usize,
}

/// Writes an upload to `<media_root>/mssp_<kind>s/` under a timestamp-derived name,
/// keeping the original extension.
pub fn store_upload(
    media_root: &Path,
    kind: MediaKind,
    original_name: &str,
    bytes: &[u8],
) -> Result<StoredMedia, MediaError> {
    if bytes.is_empty() {
        return Err(MediaError::Empty);
    }

    let extension = Path::new(original_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .filter(|e| kind.allowed_extensions().contains(&e.as_str()))
        .ok_or_else(|| MediaError::UnsupportedFormat {
            kind: kind.as_str(),
            name: original_name.to_string(),
        })?;

    let dir = media_root.join(kind.dir_name());
    let file_name = format!("{}.{extension}", Utc::now().format("%Y%m%d_%H%M%S_%6f"));
    let path = dir.join(file_name);

    let io_err = |source| MediaError::Io {
        path: path.clone(),
        source,
    };
    fs::create_dir_all(&dir).map_err(io_err)?;
    fs::write(&path, bytes).map_err(io_err)?;

    tracing::info!(kind = kind.as_str(), path = %path.display(), size = bytes.len(), "media stored");

    Ok(StoredMedia {
        kind,
        path: path.to_string_lossy().to_string(),
        size: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_image_under_kind_dir() {
        let dir = tempfile::tempdir().unwrap();
        let stored = store_upload(dir.path(), MediaKind::Image, "Foto.PNG", b"\x89PNG").unwrap();

        let path = Path::new(&stored.path);
        assert!(path.starts_with(dir.path().join("mssp_images")));
        assert_eq!(path.extension().unwrap(), "png");
        assert_eq!(fs::read(path).unwrap(), b"\x89PNG");
        assert_eq!(stored.size, 4);
    }

    #[test]
    fn test_rejects_empty_upload() {
        let dir = tempfile::tempdir().unwrap();
        let err = store_upload(dir.path(), MediaKind::Audio, "a.mp3", b"").unwrap_err();
        assert!(matches!(err, MediaError::Empty));
    }

    #[test]
    fn test_rejects_wrong_extension_for_kind() {
        let dir = tempfile::tempdir().unwrap();
        let err = store_upload(dir.path(), MediaKind::Video, "clip.mp3", b"data").unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedFormat { .. }));
        let err = store_upload(dir.path(), MediaKind::Image, "semextensao", b"data").unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedFormat { .. }));
        assert!(!dir.path().join("mssp_videos").exists());
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(MediaKind::parse("IMAGE"), Some(MediaKind::Image));
        assert_eq!(MediaKind::parse("áudio"), Some(MediaKind::Audio));
        assert_eq!(MediaKind::parse("pdf"), None);
    }
}
