use super::ExtractError;
use pdf::content::{Op, TextDrawAdjusted};
use pdf::file::FileOptions;

/// Extracts text from all pages of a PDF, in page order.
///
/// Every page's text is terminated with a newline.
pub fn extract_text_from_pdf(pdf_data: &[u8]) -> Result<String, ExtractError> {
    let file = FileOptions::cached()
        .load(pdf_data)
        .map_err(|e| ExtractError::PdfParse(e.to_string()))?;
    let resolver = file.resolver();
    let mut full_text = String::new();

    for page_num in 0..file.num_pages() {
        let page = file
            .get_page(page_num)
            .map_err(|e| ExtractError::PdfParse(e.to_string()))?;
        if let Some(content) = &page.contents {
            let operations = content
                .operations(&resolver)
                .map_err(|e| ExtractError::PdfParse(e.to_string()))?;
            for op in operations.iter() {
                match op {
                    Op::TextDraw { text } => full_text.push_str(&text.to_string_lossy()),
                    Op::TextDrawAdjusted { array } => {
                        for item in array {
                            if let TextDrawAdjusted::Text(text) = item {
                                full_text.push_str(&text.to_string_lossy());
                            }
                        }
                    }
                    Op::TextNewline => full_text.push('\n'),
                    _ => {}
                }
            }
        }
        full_text.push('\n');
    }

    Ok(full_text)
}
