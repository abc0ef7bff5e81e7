//! Cache key and thumbnail URL generation.
//!
//! Keys follow the `thumb_{folder}_{number}_{width}x{height}` grammar. Folder
//! names are escaped so the `_` separator stays unambiguous, which keeps key
//! generation injective and makes keys parseable again for introspection.

/// Build the cache key for a thumbnail request.
///
/// Deterministic and collision-free: distinct inputs always yield distinct
/// keys because the folder component is escaped before joining.
pub fn image_key(number: u32, folder: &str, width: u32, height: u32) -> String {
    format!(
        "thumb_{}_{}_{}x{}",
        escape_folder(folder),
        number,
        width,
        height
    )
}

/// Build the backend download URL for a thumbnail.
///
/// Pure string construction, no network access. The backend is trusted to
/// serve a valid image for any syntactically valid parameter combination.
pub fn thumbnail_url(base_url: &str, number: u32, folder: &str, width: u32, height: u32) -> String {
    format!(
        "{}/folders/thumbnail/folder/download?number={}&folder={}&width={}&height={}",
        base_url.trim_end_matches('/'),
        number,
        encode_query_value(folder),
        width,
        height
    )
}

/// Escape a folder name for use inside a cache key.
///
/// `%` must be escaped first so unescaping stays unambiguous.
fn escape_folder(folder: &str) -> String {
    folder.replace('%', "%25").replace('_', "%5F")
}

/// Undo [`escape_folder`].
fn unescape_folder(escaped: &str) -> String {
    escaped.replace("%5F", "_").replace("%25", "%")
}

/// Percent-encode a query parameter value.
///
/// Plain folder names like `vacation` pass through unchanged; only characters
/// that would break the query string are escaped.
fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push_str("%20"),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Structured view of a cache key, recovered by parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub folder: String,
    pub number: u32,
    pub width: u32,
    pub height: u32,
}

impl ParsedKey {
    /// Parse a cache key back into its components.
    ///
    /// Returns `None` for keys that do not follow the thumbnail key grammar.
    pub fn parse(key: &str) -> Option<ParsedKey> {
        let rest = key.strip_prefix("thumb_")?;

        // Grammar: {folder}_{number}_{width}x{height}. The folder component
        // cannot contain a raw underscore (escaped during key generation), so
        // splitting on '_' is unambiguous.
        let mut parts = rest.rsplitn(3, '_');
        let dimensions = parts.next()?;
        let number: u32 = parts.next()?.parse().ok()?;
        let folder = parts.next()?;

        let (width, height) = dimensions.split_once('x')?;
        Some(ParsedKey {
            folder: unescape_folder(folder),
            number,
            width: width.parse().ok()?,
            height: height.parse().ok()?,
        })
    }
}
