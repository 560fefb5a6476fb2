use base64::{engine::general_purpose, Engine as _};

use crate::error::SigError;

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Wrap PNG bytes in a data URL (for <img src="...">).
pub fn encode_png(bytes: &[u8]) -> String {
    let mut url = String::from(PNG_DATA_URL_PREFIX);
    general_purpose::STANDARD.encode_string(bytes, &mut url);
    url
}

/// Extract raw PNG bytes from a data URL.
pub fn decode_png(data_url: &str) -> Result<Vec<u8>, SigError> {
    let b64 = data_url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or(SigError::InvalidDataUrl)?;
    Ok(general_purpose::STANDARD.decode(b64)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test_log::test]
    fn encodes_with_png_prefix() {
        assert_eq!(encode_png(&PNG_MAGIC), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test_log::test]
    fn decode_recovers_bytes() {
        let bytes = decode_png("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(bytes, PNG_MAGIC.to_vec());
    }

    #[test_log::test]
    fn decode_rejects_other_media_types() {
        assert!(matches!(
            decode_png("data:image/jpeg;base64,AAAA"),
            Err(SigError::InvalidDataUrl)
        ));
    }

    #[test_log::test]
    fn decode_rejects_broken_base64() {
        assert!(matches!(
            decode_png("data:image/png;base64,@@@"),
            Err(SigError::Base64(_))
        ));
    }
}
