//! Content type fallback for uploads that arrive without one.

/// MIME type used when nothing better is known.
pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Guess a MIME type from a filename extension.
pub fn guess_from_name(name: &str) -> &'static str {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return DEFAULT_MIME;
    };
    match ext.to_ascii_lowercase().as_str() {
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => DEFAULT_MIME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_extensions() {
        assert_eq!(guess_from_name("report.PDF"), "application/pdf");
        assert_eq!(guess_from_name("notes.txt"), "text/plain");
        assert_eq!(guess_from_name("archive.tar.gz"), "application/gzip");
        assert_eq!(guess_from_name("README"), DEFAULT_MIME);
        assert_eq!(guess_from_name("blob.xyz"), DEFAULT_MIME);
    }
}
