//! Multipart payloads for admin create/update calls.
//!
//! Keys follow the bracket convention the API expects: nested objects as
//! `price[current]`, arrays as `features[0]`, arrays of records as
//! `colors[0][name]`. Files are appended under a plain key (usually `images`)
//! and may repeat.

use reqwest::multipart::{Form, Part};

use crate::error::ClientError;

/// An in-memory file handle selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    /// e.g. `"image/png"`.
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(FileUpload),
}

/// Ordered multipart field list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    parts: Vec<(String, FormValue)>,
}

impl FormPayload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.parts
            .push((key.into(), FormValue::Text(value.to_string())));
        self
    }

    pub fn file(&mut self, key: impl Into<String>, upload: FileUpload) -> &mut Self {
        self.parts.push((key.into(), FormValue::File(upload)));
        self
    }

    #[must_use]
    pub fn parts(&self) -> &[(String, FormValue)] {
        &self.parts
    }

    /// First text value stored under `key`.
    #[must_use]
    pub fn text_value(&self, key: &str) -> Option<&str> {
        self.parts.iter().find_map(|(k, v)| match v {
            FormValue::Text(text) if k == key => Some(text.as_str()),
            _ => None,
        })
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.parts.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|(_, v)| matches!(v, FormValue::File(_)))
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Converts into a `reqwest` multipart form.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if a file's MIME type is not a valid media type.
    pub fn into_multipart(self) -> Result<Form, ClientError> {
        let mut form = Form::new();
        for (key, value) in self.parts {
            form = match value {
                FormValue::Text(text) => form.text(key, text),
                FormValue::File(upload) => {
                    let part = Part::bytes(upload.bytes)
                        .file_name(upload.file_name)
                        .mime_str(&upload.mime)?;
                    form.part(key, part)
                }
            };
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order_and_repeats() {
        let mut payload = FormPayload::new();
        payload
            .text("name", "Rear Rack")
            .text("price[current]", 59.5)
            .text("features[0]", "Steel")
            .file(
                "images",
                FileUpload {
                    file_name: "rack.png".to_owned(),
                    mime: "image/png".to_owned(),
                    bytes: vec![1, 2, 3],
                },
            )
            .file(
                "images",
                FileUpload {
                    file_name: "rack2.png".to_owned(),
                    mime: "image/png".to_owned(),
                    bytes: vec![4],
                },
            );

        assert_eq!(
            payload.keys(),
            vec!["name", "price[current]", "features[0]", "images", "images"]
        );
        assert_eq!(payload.text_value("price[current]"), Some("59.5"));
        assert_eq!(payload.file_count(), 2);
    }

    #[test]
    fn into_multipart_rejects_invalid_mime() {
        let mut payload = FormPayload::new();
        payload.file(
            "images",
            FileUpload {
                file_name: "x".to_owned(),
                mime: "not a mime".to_owned(),
                bytes: vec![],
            },
        );
        assert!(payload.into_multipart().is_err());
    }
}
