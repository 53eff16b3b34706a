// Image files inserted into free-text posts
// A picked file reaches the editor as a URL: the one returned by the upload
// collaborator, or an inline `data:` URL when there is no upload path.

use base64::{Engine, engine::general_purpose::STANDARD};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EditorError, UploadError};

/// Host collaborator that stores an image and returns its public URL
pub trait ImageUploader {
    fn upload(&self, file_name: &str, mime_type: &str, bytes: &[u8])
    -> Result<String, UploadError>;
}

/// An image file read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub path: PathBuf,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn to_data_url(&self) -> String {
        data_url(self.mime_type, &self.bytes)
    }
}

/// Detect an image MIME type by file extension.
pub fn detect_image_type(path: &Path) -> Option<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        _ => return None,
    };
    Some(mime)
}

pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Read an image file, rejecting files that are not images.
pub fn read_image(path: &Path) -> Result<ImageFile, EditorError> {
    let mime_type = detect_image_type(path).ok_or_else(|| EditorError::NotAnImage {
        path: path.to_path_buf(),
    })?;
    let bytes = fs::read(path).map_err(|source| EditorError::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ImageFile {
        path: path.to_path_buf(),
        mime_type,
        bytes,
    })
}

/// The `src` to embed for `file`: the uploaded URL when an uploader is
/// available and succeeds, the inline data URL otherwise.
pub fn image_source(file: &ImageFile, uploader: Option<&dyn ImageUploader>) -> String {
    let Some(uploader) = uploader else {
        return file.to_data_url();
    };

    match uploader.upload(&file.file_name(), file.mime_type, &file.bytes) {
        Ok(url) => url,
        Err(err) => {
            log::warn!("{err}; embedding {} inline", file.path.display());
            file.to_data_url()
        }
    }
}
