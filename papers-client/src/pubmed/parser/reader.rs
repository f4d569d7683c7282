//! Reader-based XML helpers for the EFetch parser
//!
//! Thin wrappers around `quick_xml::Reader` patterns shared by the article,
//! author and date readers.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{PapersError, Result};

/// Create a configured `Reader` over raw XML bytes.
///
/// `expand_empty_elements(true)` turns `<tag/>` into `Start` + `End` events so
/// every element can be read with [`read_text_content`]. Text is not trimmed by
/// the reader; mixed content keeps its internal whitespace and callers trim the
/// collected result.
pub fn make_reader(xml: &[u8]) -> Reader<&[u8]> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().expand_empty_elements = true;
    reader
}

/// Read all text inside the current element, flattening child tags.
///
/// The reader must have just consumed `Event::Start` for `tag`. Events are read
/// until the matching `Event::End`, so `<ArticleTitle>CO<sub>2</sub> levels</ArticleTitle>`
/// yields `"CO2 levels"`. Reaching the end of input first is an error.
pub fn read_text_content(reader: &mut Reader<&[u8]>, tag: &[u8]) -> Result<String> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth: u32 = 1;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == tag => depth += 1,
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e)),
            Event::End(e) if e.name().as_ref() == tag => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => return Err(unexpected_eof(tag)),
            _ => {}
        }
        buf.clear();
    }

    Ok(text.trim().to_string())
}

pub fn unexpected_eof(tag: &[u8]) -> PapersError {
    PapersError::XmlError(format!(
        "unexpected end of document inside <{}>",
        String::from_utf8_lossy(tag)
    ))
}
