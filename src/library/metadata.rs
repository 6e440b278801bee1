use super::model::{TrackMetadata, UNKNOWN, UNKNOWN_ALBUM, UNKNOWN_ARTIST};

const ARTIST_TITLE_SEPARATOR: &str = " - ";

/// Remove a trailing `.{extension}` (case-insensitive). Names without it are returned as is.
pub fn strip_extension<'a>(file_name: &'a str, extension: &str) -> &'a str {
    let ext = extension.trim().trim_start_matches('.');
    if ext.is_empty() {
        return file_name;
    }
    let suffix_len = ext.len() + 1;
    if file_name.len() < suffix_len {
        return file_name;
    }
    let split = file_name.len() - suffix_len;
    if !file_name.is_char_boundary(split) {
        return file_name;
    }
    let (stem, suffix) = file_name.split_at(split);
    match suffix.strip_prefix('.') {
        Some(s) if s.eq_ignore_ascii_case(ext) => stem,
        _ => file_name,
    }
}

/// Derive best-effort metadata from a file name of the form `Artist - Title.ext`.
///
/// Anything after the first `" - "` is the title, further separators included.
/// Without a separator the whole stem is the title and the artist is
/// `"Unknown Artist"`.
pub fn derive_metadata(file_name: &str, extension: &str) -> TrackMetadata {
    let stem = strip_extension(file_name, extension);

    let (artist, title) = match stem.split_once(ARTIST_TITLE_SEPARATOR) {
        Some((artist, title)) => (artist.to_string(), title.to_string()),
        None => (UNKNOWN_ARTIST.to_string(), stem.to_string()),
    };

    TrackMetadata {
        artist,
        title,
        album: UNKNOWN_ALBUM.to_string(),
        year: UNKNOWN.to_string(),
        genre: UNKNOWN.to_string(),
        duration: UNKNOWN.to_string(),
        bitrate: UNKNOWN.to_string(),
        file_size: UNKNOWN.to_string(),
    }
}
