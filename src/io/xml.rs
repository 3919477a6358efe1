//! Shared quick-xml helpers for the registry's attribute-only exports.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::AppError;

/// Stream `path` and call `handler` for every start or empty element named
/// `tag`.
///
/// Registry exports carry all data in element attributes, so handlers only
/// ever see the opening tag. A file with no elements at all (zero-byte or
/// truncated) is rejected, matching the strict treatment of structural XML
/// failures.
pub fn for_each_element<F>(path: &Path, tag: &[u8], mut handler: F) -> Result<(), AppError>
where
    F: FnMut(&BytesStart) -> Result<(), AppError>,
{
    let mut reader = Reader::from_file(path)
        .map_err(|e| AppError::data(format!("Failed to open XML '{}': {e}", path.display())))?;
    reader.trim_text(true);

    let mut saw_element = false;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                saw_element = true;
                if e.name().as_ref() == tag {
                    handler(e)?;
                }
            }
            Ok(_) => {}
            Err(e) => {
                return Err(AppError::data(format!(
                    "Malformed XML in '{}': {e}",
                    path.display()
                )));
            }
        }
        buf.clear();
    }

    if !saw_element {
        return Err(AppError::data(format!(
            "'{}' contains no XML elements.",
            path.display()
        )));
    }
    Ok(())
}

/// Attribute value by name, unescaped; `None` when the attribute is absent.
pub fn attr(e: &BytesStart, key: &[u8]) -> Result<Option<String>, AppError> {
    for a in e.attributes() {
        let a = a.map_err(|e| AppError::data(format!("Malformed XML attribute: {e}")))?;
        if a.key.as_ref() == key {
            let value = a
                .unescape_value()
                .map_err(|e| AppError::data(format!("Malformed XML attribute value: {e}")))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
