//! Multipart form parsing with upload admission.
//!
//! File parts are checked against the [`ImagePolicy`] as they stream in: the
//! file name and declared content type before any bytes are buffered, the
//! size after every chunk. A rejected upload therefore never reaches a domain
//! service and is never written to disk.

use std::collections::HashMap;

use actix_multipart::{Field, Multipart, MultipartError};
use futures_util::StreamExt;

use crate::domain::{Error, ImagePolicy, ImageUpload};

/// Upper bound for a single text field.
pub const TEXT_FIELD_LIMIT: usize = 64 * 1024;

/// Text fields and admitted images read from one multipart request.
#[derive(Debug, Default)]
pub struct ParsedForm {
    text: HashMap<String, String>,
    images: HashMap<String, ImageUpload>,
}

impl ParsedForm {
    /// Remove and return a text field, empty when absent.
    pub fn take_text(&mut self, name: &str) -> String {
        self.text.remove(name).unwrap_or_default()
    }

    /// Remove and return a text field, `None` when absent.
    pub fn take_optional_text(&mut self, name: &str) -> Option<String> {
        self.text.remove(name)
    }

    /// Remove and return an admitted image.
    pub fn take_image(&mut self, name: &str) -> Option<ImageUpload> {
        self.images.remove(name)
    }
}

fn malformed(err: &MultipartError) -> Error {
    Error::invalid_request(format!("malformed multipart body: {err}"))
}

/// Read every part of `payload`.
///
/// Parts named in `image_fields` are treated as optional image uploads: a
/// part without a file name (an empty file input) is skipped. Other parts
/// are read as UTF-8 text. When a name repeats, the first occurrence wins.
///
/// # Errors
/// - `415` when an image has a disallowed extension or content type.
/// - `413` when an image exceeds the policy limit.
/// - `400` for malformed bodies and oversized or non-UTF-8 text fields.
pub async fn read_form(
    mut payload: Multipart,
    policy: ImagePolicy,
    image_fields: &[&str],
) -> Result<ParsedForm, Error> {
    let mut form = ParsedForm::default();
    while let Some(field) = payload.next().await {
        let field = field.map_err(|err| malformed(&err))?;
        let Some(name) = field.name().map(str::to_owned) else {
            drain(field).await?;
            continue;
        };
        if image_fields.contains(&name.as_str()) {
            if let Some(image) = read_image(field, policy).await? {
                form.images.entry(name).or_insert(image);
            }
        } else {
            let value = read_text(field, &name).await?;
            form.text.entry(name).or_insert(value);
        }
    }
    Ok(form)
}

async fn read_image(mut field: Field, policy: ImagePolicy) -> Result<Option<ImageUpload>, Error> {
    let file_name = field
        .content_disposition()
        .and_then(|disposition| disposition.get_filename())
        .map(str::to_owned)
        .unwrap_or_default();
    if file_name.is_empty() {
        drain(field).await?;
        return Ok(None);
    }
    let content_type = field.content_type().map(ToString::to_string);
    let extension = policy.admit_type(&file_name, content_type.as_deref())?;

    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|err| malformed(&err))?;
        policy.admit_size(bytes.len() + chunk.len())?;
        bytes.extend_from_slice(&chunk);
    }
    Ok(Some(ImageUpload::new(extension, bytes)))
}

async fn read_text(mut field: Field, name: &str) -> Result<String, Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|err| malformed(&err))?;
        if bytes.len() + chunk.len() > TEXT_FIELD_LIMIT {
            return Err(Error::invalid_request(format!("field {name} is too long")));
        }
        bytes.extend_from_slice(&chunk);
    }
    String::from_utf8(bytes)
        .map_err(|_| Error::invalid_request(format!("field {name} is not valid UTF-8")))
}

async fn drain(mut field: Field) -> Result<(), Error> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(|err| malformed(&err))?;
    }
    Ok(())
}
