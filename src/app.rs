//! Application orchestration for turning scanned pages into HTML notes.

use crate::ai::{mime, vision, GeminiNotesClient, NotesService, OcrService, VisionClient};
use crate::models::{Config, ImageContent};
use crate::{Error, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// Where the notes input comes from.
#[derive(Debug, Clone)]
pub enum Source {
    /// An image file that goes through text detection first.
    Image(PathBuf),
    /// A UTF-8 text file summarized directly.
    Text(PathBuf),
}

impl Source {
    pub fn path(&self) -> &Path {
        match self {
            Source::Image(path) | Source::Text(path) => path,
        }
    }
}

/// Text recognized in an image together with the notes generated from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanNotes {
    pub recognized_text: String,
    pub html: String,
}

/// Files written by [`App::run`].
#[derive(Debug, Clone)]
pub struct NotesOutput {
    pub html_path: PathBuf,
    pub text_path: Option<PathBuf>,
    pub html: String,
}

/// Coordinates text recognition and notes generation for one input.
pub struct App {
    ocr: Box<dyn OcrService>,
    notes: Box<dyn NotesService>,
    output_dir: PathBuf,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub ocr: Box<dyn OcrService>,
    pub notes: Box<dyn NotesService>,
}

impl App {
    /// Build an app from concrete service dependencies.
    pub fn with_services(services: AppServices, output_dir: PathBuf) -> Self {
        Self {
            ocr: services.ocr,
            notes: services.notes,
            output_dir,
        }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;

        let date = Local::now().format("%Y-%m-%d").to_string();
        let session_id = Uuid::new_v4();
        let output_dir = config
            .output_dir
            .join(format!("{}_{}", date, session_id));

        fs::create_dir_all(&output_dir)?;
        info!("Created output directory: {}", output_dir.display());

        // Reuse one HTTP connection pool across both service clients.
        let http_client = reqwest::Client::new();

        info!("OCR endpoint: {}", config.vision_endpoint);
        let ocr = VisionClient::new_with_client(
            config.vision_endpoint,
            config.vision_api_key,
            config.request_timeout,
            http_client.clone(),
        );

        info!("Notes endpoint: {}", config.gemini_endpoint);
        let notes = GeminiNotesClient::new_with_client(
            config.gemini_endpoint,
            config.gemini_api_key,
            config.request_timeout,
            http_client,
        );

        Ok(Self::with_services(
            AppServices {
                ocr: Box::new(ocr),
                notes: Box::new(notes),
            },
            output_dir,
        ))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Recognize the text in `image_bytes` and generate notes from it.
    pub async fn notes_from_image(&self, image_bytes: &[u8]) -> Result<ScanNotes> {
        match mime::sniff_image_mime(image_bytes) {
            Some(mime) => info!("Recognizing text in {} ({} bytes)", mime, image_bytes.len()),
            None => warn!(
                "Unrecognized image format (first 4 bytes: {:02X?}), sending anyway",
                &image_bytes[..image_bytes.len().min(4)]
            ),
        }

        let image = ImageContent::from_bytes(image_bytes)?;
        let response = self.ocr.recognize_text(&image).await?;

        if let Some(message) = vision::response_error(&response) {
            return Err(Error::Ocr(message));
        }

        let recognized_text = vision::extract_text(&response).ok_or(Error::NoTextDetected)?;
        info!("Recognized {} chars of text", recognized_text.len());

        let html = self.notes_from_text(&recognized_text).await?;

        Ok(ScanNotes {
            recognized_text,
            html,
        })
    }

    pub async fn notes_from_text(&self, text: &str) -> Result<String> {
        let html = self.notes.generate_notes(text).await?;
        info!("Generated {} chars of HTML notes", html.len());
        Ok(html)
    }

    /// Generate notes for `source` and write them into the output directory.
    pub async fn run(&self, source: &Source) -> Result<NotesOutput> {
        let path = source.path();
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .unwrap_or("notes");

        info!("Generating notes for {}", path.display());

        let (html, recognized_text) = match source {
            Source::Image(path) => {
                let bytes = fs::read(path)?;
                let scan = self.notes_from_image(&bytes).await?;
                (scan.html, Some(scan.recognized_text))
            }
            Source::Text(path) => {
                let text = fs::read_to_string(path)?;
                (self.notes_from_text(&text).await?, None)
            }
        };

        let text_path = match recognized_text {
            Some(text) => {
                let text_path = self.output_dir.join(format!("{}.txt", stem));
                fs::write(&text_path, text)?;
                info!("Saved recognized text at: {}", text_path.display());
                Some(text_path)
            }
            None => None,
        };

        let html_path = self.output_dir.join(format!("{}.html", stem));
        fs::write(&html_path, &html)?;
        info!("Saved notes at: {}", html_path.display());

        Ok(NotesOutput {
            html_path,
            text_path,
            html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockNotesClient, MockOcrClient};
    use tempfile::tempdir;

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn build_test_app(output_dir: &Path, ocr: MockOcrClient, notes: MockNotesClient) -> App {
        App::with_services(
            AppServices {
                ocr: Box::new(ocr),
                notes: Box::new(notes),
            },
            output_dir.to_path_buf(),
        )
    }

    #[tokio::test]
    async fn test_notes_from_image_passes_recognized_text_to_notes() {
        let dir = tempdir().unwrap();
        let app = build_test_app(
            dir.path(),
            MockOcrClient::new().with_text("Osmosis moves water.\n"),
            MockNotesClient::new().with_raw_response("## Osmosis\n- **water** moves".to_string()),
        );

        let scan = app.notes_from_image(&PNG_HEADER).await.unwrap();

        assert_eq!(scan.recognized_text, "Osmosis moves water.");
        assert_eq!(
            scan.html,
            "<h2>Osmosis</h2><br>\n<ul><li><strong>water</strong> moves</li></ul><br>"
        );
    }

    #[tokio::test]
    async fn test_notes_from_image_without_text_fails() {
        let dir = tempdir().unwrap();
        let app = build_test_app(
            dir.path(),
            MockOcrClient::new().with_response(serde_json::json!({ "responses": [{}] })),
            MockNotesClient::new(),
        );

        let err = app.notes_from_image(&PNG_HEADER).await.unwrap_err();
        assert!(matches!(err, Error::NoTextDetected));
    }

    #[tokio::test]
    async fn test_notes_from_image_surfaces_in_band_error() {
        let dir = tempdir().unwrap();
        let app = build_test_app(
            dir.path(),
            MockOcrClient::new().with_response(serde_json::json!({
                "responses": [{ "error": { "code": 3, "message": "Bad image data." } }]
            })),
            MockNotesClient::new(),
        );

        let err = app.notes_from_image(&PNG_HEADER).await.unwrap_err();
        assert!(matches!(err, Error::Ocr(ref msg) if msg.contains("Bad image data.")));
    }

    #[tokio::test]
    async fn test_notes_from_empty_image_is_rejected() {
        let dir = tempdir().unwrap();
        let ocr = MockOcrClient::new();
        let app = build_test_app(dir.path(), ocr, MockNotesClient::new());

        let err = app.notes_from_image(&[]).await.unwrap_err();
        assert!(matches!(err, Error::InvalidImage(_)));
    }

    #[tokio::test]
    async fn test_run_image_writes_html_and_text() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("lecture.png");
        fs::write(&input, PNG_HEADER).unwrap();
        let output_dir = dir.path().join("output");
        fs::create_dir_all(&output_dir).unwrap();

        let app = build_test_app(
            &output_dir,
            MockOcrClient::new().with_text("Lecture 4"),
            MockNotesClient::new().with_raw_response("# Lecture 4".to_string()),
        );

        let output = app.run(&Source::Image(input)).await.unwrap();

        assert_eq!(output.html_path, output_dir.join("lecture.html"));
        assert_eq!(
            fs::read_to_string(&output.html_path).unwrap(),
            "<h1>Lecture 4</h1><br>"
        );
        let text_path = output.text_path.unwrap();
        assert_eq!(fs::read_to_string(text_path).unwrap(), "Lecture 4");
    }

    #[tokio::test]
    async fn test_run_text_skips_ocr() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("summary.txt");
        fs::write(&input, "Plain notes").unwrap();

        let ocr = MockOcrClient::new();
        let app = build_test_app(dir.path(), ocr, MockNotesClient::new());

        let output = app.run(&Source::Text(input)).await.unwrap();

        assert!(output.text_path.is_none());
        assert_eq!(output.html, "<h1>Notes</h1><br><br>Plain notes");
        assert!(dir.path().join("summary.html").exists());
    }

    #[tokio::test]
    async fn test_run_missing_input_is_io_error() {
        let dir = tempdir().unwrap();
        let app = build_test_app(dir.path(), MockOcrClient::new(), MockNotesClient::new());

        let err = app
            .run(&Source::Image(dir.path().join("missing.png")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
