use std::collections::HashMap;

use axum::http::HeaderMap;
use bytes::Bytes;

use crate::error::AppError;

/// Text fields of a submitted form. Repeated names keep their first value.
#[derive(Debug, Default, Clone)]
pub struct FormData {
    fields: HashMap<String, String>,
}

impl FormData {
    fn insert(&mut self, name: String, value: String) {
        self.fields.entry(name).or_insert(value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Parse a form body according to its Content-Type.
pub async fn parse_form(headers: &HeaderMap, body: Bytes) -> Result<FormData, AppError> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    // MIME types compare case-insensitively; parameters follow the first `;`.
    let mime = content_type.split(';').next().unwrap_or("").trim();

    if mime.eq_ignore_ascii_case("multipart/form-data") {
        parse_multipart(content_type, body).await
    } else if mime.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
        parse_form_urlencoded(&body)
    } else if mime.is_empty() {
        Err(AppError::Form("missing content type".to_string()))
    } else {
        Err(AppError::Form(format!("unsupported content type: {content_type}")))
    }
}

fn parse_form_urlencoded(body: &[u8]) -> Result<FormData, AppError> {
    let body_str =
        std::str::from_utf8(body).map_err(|e| AppError::Form(format!("Invalid UTF-8: {e}")))?;

    let mut form = FormData::default();
    for (k, v) in form_urlencoded::parse(body_str.as_bytes()) {
        form.insert(k.into_owned(), v.into_owned());
    }
    Ok(form)
}

async fn parse_multipart(content_type: &str, body: Bytes) -> Result<FormData, AppError> {
    let boundary = multer::parse_boundary(content_type)
        .map_err(|_| AppError::Form("Missing multipart boundary".to_string()))?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut form = FormData::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Form(format!("Multipart error: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| AppError::Form(format!("Field read error: {e}")))?;
        form.insert(name, value);
    }

    Ok(form)
}
