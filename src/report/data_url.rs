//! `data:` URL decoding for embedded report images.

use base64::Engine as _;

/// Decode a `data:<mime>;base64,<payload>` URL into raw bytes.
///
/// Returns `None` for anything that is not a base64 data URL or whose payload
/// does not decode.
pub fn decode_data_url(data_url: &str) -> Option<Vec<u8>> {
    let rest = data_url.strip_prefix("data:")?;
    let (header, encoded) = rest.split_once(',')?;
    if !header.contains(";base64") {
        return None;
    }

    base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| tracing::debug!("Discarding data URL with invalid base64: {}", e))
        .ok()
}
