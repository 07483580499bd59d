//! # Study Page
//!
//! Server-rendered HTML for the single StudyMate page, rendered with minijinja.
//! The template is registered under an `.html` name, so every value from
//! [`PageView`] is HTML-escaped on output.

use minijinja::Environment;
use serde::Serialize;
use studymate::presenter::Presentation;

const PAGE_TEMPLATE_NAME: &str = "study.html";
const PAGE_TEMPLATE: &str = include_str!("../templates/study.html");

/// Everything the page can show. The default is the empty form.
#[derive(Debug, Default, Serialize)]
pub struct PageView<'a> {
    /// Refills the text area after a submit.
    pub pasted_text: &'a str,
    pub notice: Option<&'a str>,
    pub error: Option<&'a str>,
    /// The truncation notice for long uploads.
    pub warning: Option<&'a str>,
    pub presentation: Option<&'a Presentation>,
    /// The log path shown in the success message.
    pub saved_to: Option<&'a str>,
}

fn build_env() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)?;
    Ok(env)
}

/// Renders the complete page for `view`.
pub fn render_page(view: &PageView<'_>) -> Result<String, minijinja::Error> {
    let env = build_env()?;
    env.get_template(PAGE_TEMPLATE_NAME)?.render(view)
}
