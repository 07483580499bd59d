use super::ExtractError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

const DOCUMENT_XML: &str = "word/document.xml";

/// Extracts the body paragraphs of a `.docx` document, joined by `\n`.
pub fn extract_text_from_docx(docx_data: &[u8]) -> Result<String, ExtractError> {
    let mut archive =
        ZipArchive::new(Cursor::new(docx_data)).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| ExtractError::Docx(format!("missing {DOCUMENT_XML}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;

    Ok(body_paragraphs(&xml)?.join("\n"))
}

/// Collects the text of each body `w:p` in document order.
///
/// Tables and text boxes are skipped entirely. Tabs and breaks only count
/// inside a run, so tab-stop definitions in paragraph properties add nothing.
fn body_paragraphs(xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut skip_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text_node = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.name();
                if is_skipped_subtree(name.as_ref()) {
                    skip_depth += 1;
                    continue;
                }
                if skip_depth > 0 {
                    continue;
                }
                match name.as_ref() {
                    b"w:p" => current = Some(String::new()),
                    b"w:r" => run_depth += 1,
                    b"w:t" if run_depth > 0 => in_text_node = true,
                    other if run_depth > 0 => push_run_char(&mut current, other),
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) if skip_depth == 0 => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                other if run_depth > 0 => push_run_char(&mut current, other),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text_node && skip_depth == 0 => {
                let text = e
                    .unescape()
                    .map_err(|err| ExtractError::Docx(err.to_string()))?;
                if let Some(paragraph) = current.as_mut() {
                    paragraph.push_str(&text);
                }
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                if is_skipped_subtree(name.as_ref()) {
                    skip_depth = skip_depth.saturating_sub(1);
                    continue;
                }
                if skip_depth > 0 {
                    continue;
                }
                match name.as_ref() {
                    b"w:p" => {
                        if let Some(paragraph) = current.take() {
                            paragraphs.push(paragraph);
                        }
                    }
                    b"w:r" => run_depth = run_depth.saturating_sub(1),
                    b"w:t" => in_text_node = false,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Docx(format!("malformed {DOCUMENT_XML}: {e}"))),
            _ => {}
        }
    }

    Ok(paragraphs)
}

// Table cells and text-box content are not body paragraphs.
fn is_skipped_subtree(name: &[u8]) -> bool {
    matches!(name, b"w:tbl" | b"w:txbxContent")
}

fn push_run_char(current: &mut Option<String>, name: &[u8]) {
    let c = match name {
        b"w:tab" => '\t',
        b"w:br" | b"w:cr" => '\n',
        _ => return,
    };
    if let Some(paragraph) = current.as_mut() {
        paragraph.push(c);
    }
}
