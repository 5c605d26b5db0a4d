use std::{fs, path::Path};

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::entities::{ImageUpload, MediaType, check_size},
};

/// Reads and validates an image file.
///
/// The size is checked from metadata before the file is read, so oversized
/// files are never loaded.
pub fn load_image(path: impl AsRef<Path>) -> Result<ImageUpload, CoreError> {
    let path = path.as_ref();
    let read_error = |e: std::io::Error| CoreError::ImageRead(format!("{}: {e}", path.display()));

    let metadata = fs::metadata(path).map_err(read_error)?;
    if !metadata.is_file() {
        return Err(CoreError::ImageRead(format!("{} is not a file", path.display())));
    }
    check_size(metadata.len())?;

    let bytes = fs::read(path).map_err(read_error)?;
    let extension = path.extension().and_then(|ext| ext.to_str());

    let media_type = match extension.and_then(MediaType::from_extension) {
        Some(media_type) => media_type,
        None => MediaType::sniff(&bytes).ok_or_else(|| {
            CoreError::UnsupportedMediaType(
                extension
                    .map(|ext| format!(".{ext}"))
                    .unwrap_or_else(|| "unknown".to_string()),
            )
        })?,
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    tracing::debug!(file_name = %file_name, media_type = %media_type, size = bytes.len(), "image loaded");
    ImageUpload::new(file_name, media_type, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::food_analysis::value_objects::MAX_IMAGE_SIZE;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn media_type_follows_extension() -> Result<(), Box<dyn std::error::Error>> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("dinner.JPG");
        fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0, 1])?;

        let image = load_image(&path)?;
        assert_eq!(image.media_type(), MediaType::Jpeg);
        assert_eq!(image.file_name(), "dinner.JPG");
        assert_eq!(image.size(), 6);
        Ok(())
    }

    #[test]
    fn unknown_extension_falls_back_to_magic_bytes() -> Result<(), Box<dyn std::error::Error>> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("photo.bin");
        fs::write(&path, PNG_MAGIC)?;

        assert_eq!(load_image(&path)?.media_type(), MediaType::Png);
        Ok(())
    }

    #[test]
    fn unsupported_files_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("anim.gif");
        fs::write(&path, b"GIF89a....")?;

        assert!(matches!(
            load_image(&path),
            Err(CoreError::UnsupportedMediaType(ext)) if ext == ".gif"
        ));
        Ok(())
    }

    #[test]
    fn oversized_and_empty_files_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let temp = tempfile::tempdir()?;

        let big = temp.path().join("big.png");
        let file = fs::File::create(&big)?;
        file.set_len(MAX_IMAGE_SIZE + 1)?;
        assert!(matches!(load_image(&big), Err(CoreError::FileTooLarge { .. })));

        let empty = temp.path().join("empty.png");
        fs::write(&empty, b"")?;
        assert_eq!(load_image(&empty), Err(CoreError::EmptyImage));
        Ok(())
    }

    #[test]
    fn missing_file_is_read_error() {
        assert!(matches!(
            load_image("/definitely/not/here.jpg"),
            Err(CoreError::ImageRead(_))
        ));
    }
}
