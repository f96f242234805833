use crate::constants::{
    TELEGRAPH_API_BASE, TELEGRAPH_FILE_BASE, TELEGRAPH_UPLOAD_URL, UPLOAD_TIMEOUT_SECS,
};
use crate::error::{Result, TranscodeError};
use crate::formats::MediaFormat;
use serde::Deserialize;
use serde_json::json;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TelegraphOptions {
    pub access_token: String,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
    /// SOCKS5 proxy address (`host:port`). Configured explicitly here
    /// instead of any process-wide state.
    pub proxy: Option<String>,
}

impl TelegraphOptions {
    pub fn new(
        access_token: String,
        author_name: Option<String>,
        author_url: Option<String>,
        proxy: Option<String>,
    ) -> Self {
        Self {
            access_token,
            author_name,
            author_url,
            proxy,
        }
    }
}

fn build_client(proxy: &Option<String>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(UPLOAD_TIMEOUT_SECS));

    if let Some(addr) = proxy {
        let proxy = reqwest::Proxy::all(format!("socks5h://{addr}"))
            .map_err(|e| TranscodeError::Upload(format!("Invalid proxy {addr}: {e}")))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| TranscodeError::Upload(format!("Failed to build HTTP client: {e}")))
}

#[derive(Debug, Deserialize)]
struct UploadedFile {
    src: String,
}

/// Uploads one media file to telegra.ph and returns its hosted URL.
///
/// The service answers `[{"src": "/file/..."}]` on success and
/// `{"error": "..."}` otherwise; both shapes are handled explicitly so a
/// failed upload is an error, never an empty placeholder.
pub async fn upload_file_async(file_path: &Path, options: &TelegraphOptions) -> Result<String> {
    if !file_path.exists() {
        return Err(TranscodeError::FileNotFound(file_path.to_path_buf()));
    }

    let format = MediaFormat::from_path(file_path).ok_or_else(|| {
        TranscodeError::UnsupportedFormat(
            file_path
                .extension()
                .and_then(|s| s.to_str())
                .unwrap_or("<none>")
                .to_string(),
        )
    })?;

    let file_size = std::fs::metadata(file_path)?.len();
    let file = File::open(file_path)?;
    let mut reader = BufReader::new(file);
    let mut data = Vec::with_capacity(file_size as usize);
    reader.read_to_end(&mut data)?;

    let part = reqwest::multipart::Part::bytes(data)
        .file_name("file")
        .mime_str(format.mime_type())
        .map_err(|e| TranscodeError::Upload(format!("Invalid mime type: {e}")))?;
    let form = reqwest::multipart::Form::new().part("file", part);

    let client = build_client(&options.proxy)?;
    let response = client
        .post(TELEGRAPH_UPLOAD_URL)
        .multipart(form)
        .send()
        .await
        .map_err(|e| TranscodeError::Upload(format!("Upload request failed: {e}")))?;

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| TranscodeError::Upload(format!("Invalid upload response: {e}")))?;

    match body {
        serde_json::Value::Array(entries) => {
            let first = entries
                .into_iter()
                .next()
                .ok_or_else(|| TranscodeError::Upload("Empty upload response".to_string()))?;
            let uploaded: UploadedFile = serde_json::from_value(first)
                .map_err(|e| TranscodeError::Upload(format!("Malformed upload entry: {e}")))?;
            Ok(format!("{}{}", TELEGRAPH_FILE_BASE, uploaded.src))
        }
        other => Err(TranscodeError::Upload(format!(
            "Unexpected upload response: {other}"
        ))),
    }
}

pub fn upload_file_sync(file_path: &Path, options: &TelegraphOptions) -> Result<String> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| TranscodeError::Upload(format!("Failed to create runtime: {e}")))?;

    runtime.block_on(upload_file_async(file_path, options))
}

/// Builds the createPage content nodes: an optional leading paragraph
/// followed by one img node per uploaded URL.
pub fn image_nodes(intro: Option<&str>, image_urls: &[String]) -> Vec<serde_json::Value> {
    let mut nodes = Vec::new();

    if let Some(text) = intro {
        if !text.is_empty() {
            nodes.push(json!({"tag": "p", "children": [text]}));
        }
    }
    for url in image_urls {
        nodes.push(json!({"tag": "img", "attrs": {"src": url}}));
    }

    nodes
}

#[derive(Debug, Deserialize)]
struct PageResponse {
    ok: bool,
    result: Option<PageResult>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageResult {
    url: String,
}

/// Creates a Telegraph page from content nodes and returns the page URL.
pub async fn create_page_async(
    title: &str,
    content: &[serde_json::Value],
    options: &TelegraphOptions,
) -> Result<String> {
    let payload = json!({
        "access_token": options.access_token,
        "title": title,
        "content": content,
        "author_name": options.author_name.clone().unwrap_or_default(),
        "author_url": options.author_url.clone().unwrap_or_default(),
    });

    let client = build_client(&options.proxy)?;
    let response = client
        .post(format!("{TELEGRAPH_API_BASE}/createPage"))
        .json(&payload)
        .send()
        .await
        .map_err(|e| TranscodeError::PageCreation(format!("createPage request failed: {e}")))?;

    let body: PageResponse = response
        .json()
        .await
        .map_err(|e| TranscodeError::PageCreation(format!("Invalid createPage response: {e}")))?;

    if body.ok {
        body.result
            .map(|r| r.url)
            .ok_or_else(|| TranscodeError::PageCreation("createPage returned no result".to_string()))
    } else {
        Err(TranscodeError::PageCreation(
            body.error.unwrap_or_else(|| "Unknown error".to_string()),
        ))
    }
}

pub fn create_page_sync(
    title: &str,
    content: &[serde_json::Value],
    options: &TelegraphOptions,
) -> Result<String> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| TranscodeError::PageCreation(format!("Failed to create runtime: {e}")))?;

    runtime.block_on(create_page_async(title, content, options))
}
