//! Form field collection for the stage routes
//!
//! The page posts `FormData` (multipart); plain urlencoded bodies are
//! accepted too for the text-only routes. Both end up in [`FormFields`].

use actix_multipart::Multipart;
use actix_web::{web, Either};
use futures_util::StreamExt;
use screencode_common::{Result, ScreencodeError};
use screencode_llm::Credential;
use std::collections::HashMap;

/// Most parts read from one multipart body
pub const MAX_PARTS: usize = 32;

/// Body accepted by the text-only routes
pub type TextForm = Either<web::Form<HashMap<String, String>>, Multipart>;

/// Size caps applied while reading a form
#[derive(Debug, Clone, Copy)]
pub struct FormLimits {
    pub max_file_bytes: usize,
    pub max_text_bytes: usize,
}

impl FormLimits {
    /// Cap on all parts of one multipart body together
    pub fn max_total_bytes(&self) -> usize {
        self.max_file_bytes.saturating_add(self.max_text_bytes)
    }
}

/// Uploaded file part
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

/// Collected text fields and file parts of one request
#[derive(Debug, Default)]
pub struct FormFields {
    text: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormFields {
    /// Drain a multipart stream. Parts named in `file_fields`, or carrying a
    /// filename, are kept as bytes; all others must be UTF-8 text.
    pub async fn from_multipart(
        mut payload: Multipart,
        limits: FormLimits,
        file_fields: &[&str],
    ) -> Result<Self> {
        let mut fields = Self::default();
        let total_cap = limits.max_total_bytes();
        let mut total = 0usize;
        let mut parts = 0usize;

        while let Some(field) = payload.next().await {
            let mut field = field.map_err(malformed)?;

            parts += 1;
            if parts > MAX_PARTS {
                return Err(ScreencodeError::invalid_input(format!(
                    "Form data has more than {} parts",
                    MAX_PARTS
                )));
            }

            let disposition = field.content_disposition();
            let name = match disposition.get_name() {
                Some(name) => name.to_string(),
                None => continue,
            };
            let filename = disposition.get_filename().map(str::to_string);

            let is_file = filename.is_some() || file_fields.contains(&name.as_str());
            let cap = if is_file {
                limits.max_file_bytes
            } else {
                limits.max_text_bytes
            };

            let mut bytes = Vec::new();
            while let Some(chunk) = field.next().await {
                let chunk = chunk.map_err(malformed)?;
                if bytes.len() + chunk.len() > cap {
                    return Err(ScreencodeError::invalid_input(format!(
                        "Field '{}' exceeds the {} byte limit",
                        name, cap
                    )));
                }
                total += chunk.len();
                if total > total_cap {
                    return Err(ScreencodeError::invalid_input(format!(
                        "Form data exceeds the {} byte limit",
                        total_cap
                    )));
                }
                bytes.extend_from_slice(&chunk);
            }

            if is_file {
                fields.files.insert(name, UploadedFile { filename, bytes });
            } else {
                let value = String::from_utf8(bytes).map_err(|_| {
                    ScreencodeError::invalid_input(format!("Field '{}' is not valid UTF-8", name))
                })?;
                fields.text.insert(name, value);
            }
        }

        Ok(fields)
    }

    /// Read a text-only route body, whichever encoding it came in
    pub async fn from_text_form(form: TextForm, limits: FormLimits) -> Result<Self> {
        match form {
            Either::Left(form) => Ok(Self::from_map(form.into_inner())),
            Either::Right(multipart) => Self::from_multipart(multipart, limits, &[]).await,
        }
    }

    pub fn from_map(text: HashMap<String, String>) -> Self {
        Self {
            text,
            files: HashMap::new(),
        }
    }

    /// Non-empty text value of `name`
    pub fn text(&self, name: &str) -> Option<&str> {
        self.text
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Non-empty text value of `name`, or a validation error carrying `message`
    pub fn required_text(&self, name: &str, message: &str) -> Result<&str> {
        self.text(name)
            .ok_or_else(|| ScreencodeError::invalid_input(message))
    }

    /// The `api_key` field as a credential
    pub fn credential(&self) -> Result<Credential> {
        let raw = self.required_text("api_key", "API key is required")?;
        Credential::new(raw)
    }

    /// Remove and return a non-empty file part
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name).filter(|file| !file.bytes.is_empty())
    }

    /// Float field with falsy fallback: absent, empty, zero and non-finite
    /// values all come back as `None`
    pub fn optional_f64(&self, name: &str) -> Result<Option<f64>> {
        match self.number_text(name) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<f64>()
                .map(|value| (value != 0.0 && value.is_finite()).then_some(value))
                .map_err(|_| not_a_number(name, raw)),
        }
    }

    /// Integer field with falsy fallback: absent, empty and zero come back
    /// as `None`. A fractional value is truncated toward zero first, so
    /// `5.5` reads as 5 and `0.5` as unset.
    pub fn optional_i64(&self, name: &str) -> Result<Option<i64>> {
        let raw = match self.number_text(name) {
            None => return Ok(None),
            Some(raw) => raw,
        };
        let value = match raw.parse::<i64>() {
            Ok(value) => value,
            Err(_) => match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => value.trunc() as i64,
                _ => return Err(not_a_number(name, raw)),
            },
        };
        Ok((value != 0).then_some(value))
    }

    fn number_text(&self, name: &str) -> Option<&str> {
        self.text(name).map(str::trim).filter(|raw| !raw.is_empty())
    }
}

fn malformed(err: actix_multipart::MultipartError) -> ScreencodeError {
    ScreencodeError::invalid_input(format!("Malformed form data: {}", err))
}

fn not_a_number(name: &str, raw: &str) -> ScreencodeError {
    ScreencodeError::invalid_input(format!("Field '{}' is not a number: '{}'", name, raw))
}
