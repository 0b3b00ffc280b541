//! Attachment Manager
//!
//! Turns selected files and camera captures into self-contained attachments.
//! Oversized files are rejected one by one; the rest of the batch goes on.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDateTime;

use crate::error::AttachmentError;
use crate::models::Attachment;

/// 10 MiB
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Metadata available before a file's bytes are read
pub trait SelectedFile {
    fn name(&self) -> String;
    fn size(&self) -> u64;
    fn media_type(&self) -> String;
}

/// Plain metadata record, used for tests and non-DOM callers
#[derive(Debug, Clone, PartialEq)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
    pub media_type: String,
}

impl SelectedFile for FileMeta {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn media_type(&self) -> String {
        self.media_type.clone()
    }
}

/// A batch split into files to read and per-file rejections
#[derive(Debug)]
pub struct Screened<F> {
    pub accepted: Vec<F>,
    pub rejected: Vec<AttachmentError>,
}

pub fn screen_batch<F: SelectedFile>(files: Vec<F>, max_bytes: u64) -> Screened<F> {
    let mut screened = Screened { accepted: Vec::new(), rejected: Vec::new() };
    for file in files {
        let size = file.size();
        if size > max_bytes {
            screened.rejected.push(AttachmentError::TooLarge {
                name: file.name(),
                size,
                max: max_bytes,
            });
        } else {
            screened.accepted.push(file);
        }
    }
    screened
}

pub fn encode_data_uri(media_type: &str, bytes: &[u8]) -> String {
    let media_type = if media_type.is_empty() { "application/octet-stream" } else { media_type };
    format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
}

/// Media type from a `data:<type>;base64,` header
pub fn data_uri_media_type(uri: &str) -> Option<&str> {
    let header = uri.strip_prefix("data:")?.split(',').next()?;
    let media_type = header.split(';').next()?;
    (!media_type.is_empty()).then_some(media_type)
}

/// Decoded size of a base64 data URI payload, without decoding it
pub fn estimate_payload_size(uri: &str) -> u64 {
    let Some((_, payload)) = uri.split_once(',') else { return 0 };
    let len = payload.len() as u64;
    let padding = payload.bytes().rev().take_while(|b| *b == b'=').count() as u64;
    (len * 3 / 4).saturating_sub(padding)
}

impl Attachment {
    pub fn from_bytes(id: u64, file_name: &str, media_type: &str, bytes: &[u8]) -> Self {
        Self {
            id,
            file_name: file_name.to_string(),
            size: bytes.len() as u64,
            media_type: if media_type.is_empty() { "application/octet-stream".to_string() } else { media_type.to_string() },
            data_uri: encode_data_uri(media_type, bytes),
        }
    }

    /// Attachment for a still frame from the camera
    pub fn from_capture(id: u64, data_uri: String, taken_at: NaiveDateTime) -> Self {
        let media_type = data_uri_media_type(&data_uri).unwrap_or("image/jpeg").to_string();
        let extension = match media_type.as_str() {
            "image/png" => "png",
            "image/webp" => "webp",
            _ => "jpg",
        };
        Self {
            id,
            file_name: format!("captura-{}.{}", taken_at.format("%Y%m%d-%H%M%S"), extension),
            size: estimate_payload_size(&data_uri),
            media_type,
            data_uri,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn meta(name: &str, size: u64) -> FileMeta {
        FileMeta { name: name.to_string(), size, media_type: "application/pdf".to_string() }
    }

    #[test]
    fn test_one_oversized_in_batch_of_three() {
        let files = vec![meta("a.pdf", 1024), meta("huge.mov", MAX_ATTACHMENT_BYTES + 1), meta("b.pdf", 2048)];
        let screened = screen_batch(files, MAX_ATTACHMENT_BYTES);

        assert_eq!(screened.accepted.len(), 2);
        assert_eq!(screened.rejected.len(), 1);
        assert!(matches!(&screened.rejected[0], AttachmentError::TooLarge { name, .. } if name == "huge.mov"));

        let mut names: Vec<String> = screened.accepted.iter().map(|f| f.name.clone()).collect();
        names.sort();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_limit_is_inclusive() {
        let screened = screen_batch(vec![meta("edge.bin", MAX_ATTACHMENT_BYTES)], MAX_ATTACHMENT_BYTES);
        assert_eq!(screened.accepted.len(), 1);
        assert!(screened.rejected.is_empty());
    }

    #[test]
    fn test_from_bytes_embeds_payload() {
        let att = Attachment::from_bytes(1, "hola.txt", "text/plain", b"hola");
        assert_eq!(att.size, 4);
        assert_eq!(att.data_uri, "data:text/plain;base64,aG9sYQ==");
        assert_eq!(estimate_payload_size(&att.data_uri), 4);
    }

    #[test]
    fn test_unknown_media_type() {
        let att = Attachment::from_bytes(1, "blob", "", &[1, 2, 3]);
        assert_eq!(att.media_type, "application/octet-stream");
        assert!(att.data_uri.starts_with("data:application/octet-stream;base64,"));
    }

    #[test]
    fn test_from_capture() {
        let taken_at = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap().and_hms_opt(9, 5, 30).unwrap();
        let uri = encode_data_uri("image/jpeg", &[0xFF, 0xD8, 0xFF, 0xE0, 0x00]);
        let att = Attachment::from_capture(5, uri.clone(), taken_at);

        assert_eq!(att.file_name, "captura-20240701-090530.jpg");
        assert_eq!(att.media_type, "image/jpeg");
        assert_eq!(att.size, 5);
        assert_eq!(att.data_uri, uri);
    }

    #[test]
    fn test_media_type_parsing() {
        assert_eq!(data_uri_media_type("data:image/png;base64,AAAA"), Some("image/png"));
        assert_eq!(data_uri_media_type("blob:http://x"), None);
        assert_eq!(data_uri_media_type("data:;base64,AAAA"), None);
    }
}
