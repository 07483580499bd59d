use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use studymate::errors::PromptError;
use studymate::providers::ai::AiProvider;

// --- Mock AI Provider ---

/// An in-process completion provider that records every prompt it receives.
///
/// Responses are matched in the order they were added: the first key that is a
/// substring of the prompt wins. Clones share their responses and call log.
#[derive(Clone, Debug, Default)]
pub struct MockAiProvider {
    responses: Arc<Mutex<Vec<(String, String)>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-programs a response for any prompt containing `key`.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.push((key.to_string(), response.to_string()));
    }

    /// Retrieves the recorded prompts for assertion.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, PromptError> {
        self.calls.lock().unwrap().push(prompt.to_string());

        let responses = self.responses.lock().unwrap();
        responses
            .iter()
            .find(|(key, _)| prompt.contains(key.as_str()))
            .map(|(_, response)| response.trim().to_string())
            .ok_or_else(|| {
                PromptError::AiApi(format!(
                    "MockAiProvider: No response programmed for prompt. Got: '{prompt}'"
                ))
            })
    }
}

// --- Document Fixtures ---

pub mod helpers {
    use anyhow::Result;
    use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Generates a PDF with one page per entry of `pages`, each showing its text
    /// in Helvetica.
    pub fn generate_test_pdf(pages: &[&str]) -> Result<Vec<u8>> {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let font_id = Ref::new(3);
        let font_name = Name(b"F1");

        let page_ids: Vec<Ref> = (0..pages.len() as i32)
            .map(|i| Ref::new(4 + i * 2))
            .collect();

        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id)
            .kids(page_ids.iter().copied())
            .count(pages.len() as i32);
        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        for (text, page_id) in pages.iter().zip(&page_ids) {
            let content_id = Ref::new(page_id.get() + 1);

            let mut page = pdf.page(*page_id);
            page.media_box(Rect::new(0.0, 0.0, 595.0, 842.0));
            page.parent(page_tree_id);
            page.contents(content_id);
            page.resources().fonts().pair(font_name, font_id);
            page.finish();

            let mut content = Content::new();
            content.begin_text();
            content.set_font(font_name, 14.0);
            content.next_line(72.0, 760.0);
            content.show(Str(text.as_bytes()));
            content.end_text();
            pdf.stream(content_id, &content.finish());
        }

        Ok(pdf.finish())
    }

    /// Generates a minimal `.docx` whose body holds one paragraph per entry.
    pub fn generate_test_docx(paragraphs: &[&str]) -> Result<Vec<u8>> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", escape_xml(p)))
            .collect();
        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
        );

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.start_file("[Content_Types].xml", options)?;
        writer.write_all(CONTENT_TYPES_XML.as_bytes())?;
        writer.start_file("word/document.xml", options)?;
        writer.write_all(document.as_bytes())?;
        Ok(writer.finish()?.into_inner())
    }

    /// Space-separated words `w1 w2 ... wN`.
    pub fn numbered_words(count: usize) -> String {
        (1..=count)
            .map(|i| format!("w{i}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn escape_xml(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;
}
