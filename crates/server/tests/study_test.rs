//! # Study Route Tests
//!
//! End-to-end tests for `/study`, `/api/study` and `/api/sessions` against a
//! mocked OpenAI-compatible completion server.

mod common;

use anyhow::Result;
use common::{TestApp, COMPLETIONS_PATH, QA_MARKER, SUMMARY_MARKER};
use httpmock::Method::POST;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use studymate_test_utils::helpers::{generate_test_docx, numbered_words};

const PASTED: &str = "Photosynthesis converts light into chemical energy.";

#[tokio::test]
async fn test_pasted_text_end_to_end() -> Result<()> {
    // --- 1. Arrange ---
    let app = TestApp::spawn().await?;
    let summary_mock = app
        .mock_completion(&[SUMMARY_MARKER, PASTED], "Plants turn light into sugar.")
        .await;
    let qa_mock = app
        .mock_completion(
            &[QA_MARKER, PASTED],
            "Q: What does photosynthesis convert?\nA: Light into chemical energy.",
        )
        .await;

    // --- 2. Act ---
    let response = app
        .client
        .post(app.url("/api/study"))
        .multipart(Form::new().text("text", PASTED))
        .send()
        .await?;

    // --- 3. Assert ---
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    let result = &body["result"];
    assert_eq!(result["session"]["input"], PASTED);
    assert_eq!(result["session"]["summary"], "Plants turn light into sugar.");
    assert!(result.get("warning").is_none());
    assert!(body.get("debug").is_none());
    assert_eq!(result["qa_lines"][0]["kind"], "question");
    assert_eq!(result["qa_lines"][1]["kind"], "other");

    // Exactly two completion calls, one per template, each carrying the text.
    summary_mock.assert_hits_async(1).await;
    qa_mock.assert_hits_async(1).await;

    let log = app.read_log()?;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0]["input"], PASTED);
    Ok(())
}

#[tokio::test]
async fn test_long_txt_upload_is_truncated() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.mock_completion(&[SUMMARY_MARKER], "Summary.").await;
    app.mock_completion(&[QA_MARKER], "Q: One?\nA: Yes.").await;

    let file = Part::bytes(numbered_words(1500).into_bytes())
        .file_name("chapter.txt")
        .mime_str("text/plain")?;
    let form = Form::new()
        .part("file", file)
        .text("text", "pasted text is ignored when a file is uploaded");

    let response = app
        .client
        .post(app.url("/study"))
        .multipart(form)
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await?;
    assert!(html.contains("This document is long. Only the first 1000 words are used for analysis."));
    assert!(html.contains("<strong>Q: One?</strong>"));
    assert!(html.contains("Done! Response saved to"));
    assert!(html.contains("session_log.json"));

    let log = app.read_log()?;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0]["input"], numbered_words(1000));
    Ok(())
}

#[tokio::test]
async fn test_docx_upload_without_declared_type() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.mock_completion(&[SUMMARY_MARKER, "Mitochondria make ATP."], "Summary.")
        .await;
    app.mock_completion(&[QA_MARKER, "Mitochondria make ATP."], "Q: Where?\nA: Cells.")
        .await;

    let docx = generate_test_docx(&["Mitochondria make ATP.", "Ribosomes make proteins."])?;
    let file = Part::bytes(docx)
        .file_name("biology.docx")
        .mime_str("application/octet-stream")?;

    let response = app
        .client
        .post(app.url("/api/study?debug=true"))
        .multipart(Form::new().part("file", file))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await?;
    assert_eq!(
        body["result"]["session"]["input"],
        "Mitochondria make ATP.\nRibosomes make proteins."
    );
    assert_eq!(body["debug"]["source"], "upload");
    assert_eq!(body["debug"]["truncated"], false);
    Ok(())
}

#[tokio::test]
async fn test_completion_failure_logs_nothing() -> Result<()> {
    let app = TestApp::spawn().await?;
    let failing = app
        .mock_server
        .mock_async(|when, then| {
            when.method(POST).path(COMPLETIONS_PATH);
            then.status(500).body("upstream exploded");
        })
        .await;

    let response = app
        .client
        .post(app.url("/api/study"))
        .multipart(Form::new().text("text", PASTED))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await?;
    assert!(body["error"].as_str().unwrap().contains("upstream exploded"));

    // The summary call fails, so the Q&A call is never made.
    failing.assert_hits_async(1).await;
    assert!(!app.log_path.exists());
    Ok(())
}

#[tokio::test]
async fn test_no_content_is_rejected_without_calls() -> Result<()> {
    let app = TestApp::spawn().await?;
    let any_call = app.mock_completion(&[], "unused").await;

    let api_response = app
        .client
        .post(app.url("/api/study"))
        .multipart(Form::new().text("text", ""))
        .send()
        .await?;
    assert_eq!(api_response.status(), StatusCode::BAD_REQUEST);

    let page_response = app
        .client
        .post(app.url("/study"))
        .multipart(Form::new().text("text", ""))
        .send()
        .await?;
    assert_eq!(page_response.status(), StatusCode::OK);
    assert!(page_response
        .text()
        .await?
        .contains("Upload a document or paste some text first."));

    any_call.assert_hits_async(0).await;
    assert!(!app.log_path.exists());
    Ok(())
}

#[tokio::test]
async fn test_unreadable_pdf_is_unprocessable() -> Result<()> {
    let app = TestApp::spawn().await?;
    let any_call = app.mock_completion(&[], "unused").await;

    let file = Part::bytes(b"definitely not a pdf".to_vec())
        .file_name("broken.pdf")
        .mime_str("application/pdf")?;
    let response = app
        .client
        .post(app.url("/api/study"))
        .multipart(Form::new().part("file", file))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "Could not read the PDF document.");
    any_call.assert_hits_async(0).await;
    Ok(())
}

#[tokio::test]
async fn test_sessions_endpoint_lists_log() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.mock_completion(&[SUMMARY_MARKER], "Summary.").await;
    app.mock_completion(&[QA_MARKER], "Q: Why?\nA: Because.").await;

    let empty: Value = app
        .client
        .get(app.url("/api/sessions"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(empty["result"], serde_json::json!([]));

    for text in ["first text", "second text"] {
        let response = app
            .client
            .post(app.url("/api/study"))
            .multipart(Form::new().text("text", text))
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let listed: Value = app
        .client
        .get(app.url("/api/sessions"))
        .send()
        .await?
        .json()
        .await?;
    let entries = listed["result"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["input"], "first text");
    assert_eq!(entries[1]["input"], "second text");
    Ok(())
}

#[tokio::test]
async fn test_root_and_health() -> Result<()> {
    let app = TestApp::spawn().await?;

    let page = app.client.get(app.url("/")).send().await?;
    assert_eq!(page.status(), StatusCode::OK);
    let html = page.text().await?;
    assert!(html.contains("accept=\".txt,.pdf,.docx\""));
    assert!(html.contains("Generate Summary &amp; Q&amp;A"));
    assert!(html.contains("Thinking..."));

    let health = app.client.get(app.url("/health")).send().await?;
    assert_eq!(health.text().await?, "OK");
    Ok(())
}
