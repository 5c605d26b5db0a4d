use std::fmt;

use base64::{Engine as _, engine::general_purpose};

use crate::domain::{
    common::entities::app_errors::CoreError, food_analysis::value_objects::MAX_IMAGE_SIZE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Jpeg,
    Png,
    Webp,
    Heic,
}

impl MediaType {
    pub const ALL: [MediaType; 4] = [
        MediaType::Jpeg,
        MediaType::Png,
        MediaType::Webp,
        MediaType::Heic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
            MediaType::Webp => "image/webp",
            MediaType::Heic => "image/heic",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(MediaType::Jpeg),
            "png" => Some(MediaType::Png),
            "webp" => Some(MediaType::Webp),
            "heic" => Some(MediaType::Heic),
            _ => None,
        }
    }

    /// Recognizes the allowed formats from their leading bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(MediaType::Jpeg);
        }
        if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(MediaType::Png);
        }
        if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            return Some(MediaType::Webp);
        }
        if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
            let brand = &bytes[8..12];
            if [b"heic", b"heix", b"heim", b"heis", b"hevc", b"mif1"]
                .iter()
                .any(|known| brand == *known)
            {
                return Some(MediaType::Heic);
            }
        }
        None
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image that passed the upload constraints. Holding one is proof it may be
/// sent to the remote model.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    media_type: MediaType,
    bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        media_type: MediaType,
        bytes: Vec<u8>,
    ) -> Result<Self, CoreError> {
        check_size(bytes.len() as u64)?;

        Ok(Self {
            file_name: file_name.into(),
            media_type,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Transport form: bare base64 without a data-URL prefix.
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.bytes)
    }

    /// Durable, self-contained form stored in history.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.to_base64())
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Size rule shared by in-memory and on-disk validation.
pub fn check_size(size: u64) -> Result<(), CoreError> {
    if size == 0 {
        return Err(CoreError::EmptyImage);
    }
    if size > MAX_IMAGE_SIZE {
        return Err(CoreError::FileTooLarge {
            size,
            max: MAX_IMAGE_SIZE,
        });
    }
    Ok(())
}
