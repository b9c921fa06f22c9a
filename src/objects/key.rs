use mime_guess::mime::{self, Mime};

/// Storage key for an upload: `files/<type>-<timestamp_ms>.<subtype>`.
///
/// Two uploads with the same media type in the same millisecond get the
/// same key, and the later write replaces the earlier object.
pub fn storage_key(content_type: &Mime, timestamp_ms: i64) -> String {
    format!(
        "files/{}-{}.{}",
        content_type.type_(),
        timestamp_ms,
        content_type.subtype()
    )
}

/// Media type of an uploaded part.
///
/// The declared content type wins; otherwise the type is guessed from the
/// file name, falling back to `application/octet-stream`.
pub fn resolve_content_type(declared: Option<&str>, file_name: Option<&str>) -> Mime {
    declared
        .and_then(|ct| ct.parse::<Mime>().ok())
        .or_else(|| file_name.and_then(|name| mime_guess::from_path(name).first()))
        .unwrap_or(mime::APPLICATION_OCTET_STREAM)
}
