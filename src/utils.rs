use lopdf::{Dictionary, Document, Object, Stream};
use tracing::debug;

pub(crate) fn name_to_string(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}

/// Follows a reference. A dangling reference resolves to `None`.
pub(crate) fn maybe_deref<'a>(doc: &'a Document, o: &'a Object) -> Option<&'a Object> {
    match o {
        &Object::Reference(r) => match doc.get_object(r) {
            Ok(o) => Some(o),
            Err(e) => {
                debug!("dangling reference {:?}: {}", r, e);
                None
            }
        },
        _ => Some(o),
    }
}

pub(crate) fn maybe_get_obj<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    dict.get(key).ok().and_then(|o| maybe_deref(doc, o))
}

pub(crate) fn maybe_get_dict<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Dictionary> {
    maybe_get_obj(doc, dict, key).and_then(|o| o.as_dict().ok())
}

pub(crate) fn maybe_get_name<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a [u8]> {
    maybe_get_obj(doc, dict, key).and_then(|n| n.as_name().ok())
}

pub(crate) fn maybe_get_array<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Vec<Object>> {
    maybe_get_obj(doc, dict, key).and_then(|n| n.as_array().ok())
}

pub(crate) fn get_contents(contents: &Stream) -> Vec<u8> {
    if contents.filters().is_ok() {
        contents
            .decompressed_content()
            .unwrap_or_else(|_| contents.content.clone())
    } else {
        contents.content.clone()
    }
}

/// Looks a key up on a page dictionary, walking up `/Parent` links for
/// inheritable attributes such as `/Resources`.
pub(crate) fn get_inherited<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    if let Some(o) = maybe_get_obj(doc, dict, key) {
        Some(o)
    } else {
        let parent = dict
            .get(b"Parent")
            .and_then(|parent| parent.as_reference())
            .and_then(|id| doc.get_dictionary(id))
            .ok()?;
        get_inherited(doc, parent, key)
    }
}
