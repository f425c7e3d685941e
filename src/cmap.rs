use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use encoding_rs::UTF_16BE;
use tracing::{debug, warn};

/// Maps single-byte character codes to the text written into the SVG.
#[derive(Debug, Clone, Default)]
pub struct CharMap {
    map: Option<HashMap<u8, String>>,
}

impl CharMap {
    /// Every byte stands for the code point of the same value.
    pub fn identity() -> CharMap {
        CharMap { map: None }
    }

    /// Builds a map from the contents of a `/ToUnicode` CMap stream.
    ///
    /// An unparsable stream gives the identity map.
    pub fn from_to_unicode(contents: &[u8]) -> CharMap {
        // the parser panics on some malformed input
        let parsed = panic::catch_unwind(AssertUnwindSafe(|| {
            adobe_cmap_parser::get_unicode_map(contents)
        }));
        let cmap = match parsed {
            Ok(Ok(cmap)) => cmap,
            Ok(Err(e)) => {
                warn!("unparsable ToUnicode cmap ({}), falling back to identity", e);
                return CharMap::identity();
            }
            Err(_) => {
                warn!("ToUnicode cmap parser panicked, falling back to identity");
                return CharMap::identity();
            }
        };
        let mut map = HashMap::new();
        for (&code, v) in cmap.iter() {
            // only single-byte codes are addressable from a simple font string
            let Ok(code) = u8::try_from(code) else {
                continue;
            };
            match UTF_16BE.decode_without_bom_handling_and_without_replacement(v) {
                Some(s) => {
                    map.insert(code, s.into_owned());
                }
                None => debug!("skipping undecodable mapping for {}: {:02X?}", code, v),
            }
        }
        CharMap { map: Some(map) }
    }

    pub fn is_identity(&self) -> bool {
        self.map.is_none()
    }

    /// Decodes raw string bytes. Codes the map does not cover decode as
    /// identity.
    pub fn decode(&self, bytes: &[u8]) -> String {
        let mut out = String::with_capacity(bytes.len());
        for &b in bytes {
            match self.map.as_ref().and_then(|m| m.get(&b)) {
                Some(s) => out.push_str(s),
                None => out.push(char::from(b)),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TO_UNICODE: &[u8] = b"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<00> <FF>
endcodespacerange
2 beginbfchar
<01> <0041>
<02> <00660069>
endbfchar
endcmap
CMapName currentdict /CMap defineresource pop
end
end";

    #[test]
    fn identity_decodes_bytes_as_code_points() {
        let cm = CharMap::identity();
        assert!(cm.is_identity());
        assert_eq!(cm.decode(b"Hi!"), "Hi!");
        assert_eq!(cm.decode(&[0xe9]), "\u{e9}");
    }

    #[test]
    fn to_unicode_map_with_identity_fallback() {
        let cm = CharMap::from_to_unicode(TO_UNICODE);
        assert!(!cm.is_identity());
        assert_eq!(cm.decode(&[1, 2, b'z']), "Afiz");
    }

    #[test]
    fn malformed_cmap_gives_identity() {
        let cm = CharMap::from_to_unicode(b"beginbfchar <01> <0041> endbfchar");
        assert!(cm.is_identity());
        assert_eq!(cm.decode(b"AB"), "AB");
    }
}
