use crate::asset::ImageAsset;
use crate::constants::{UPLOAD_PAUSE_MS, UPLOAD_SIZE_THRESHOLD};
use crate::error::{Result, TranscodeError};
use crate::formats::MediaFormat;
use crate::resize::limit_dimensions;
use crate::telegraph::{create_page_sync, image_nodes, upload_file_sync, TelegraphOptions};
use crate::transcode::{transcode, TranscodeConfig};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use walkdir::WalkDir;

/// The raster images of a single directory, one level deep, in a stable
/// order. Video and unsupported extensions never make it into a gallery.
pub fn collect_directory_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_gallery_image = MediaFormat::from_path(&path)
            .map(|f| f.is_raster())
            .unwrap_or(false);
        if path.is_file() && is_gallery_image {
            images.push(path);
        }
    }

    images.sort();
    Ok(images)
}

/// Prepares and uploads a single image, returning its hosted URL.
///
/// Unsupported extensions are rejected here, before any decode is attempted.
/// Supported images get the caller-level dimension pass, then — only when
/// the measured size reaches the upload threshold — the transcode pipeline,
/// and finally the upload itself.
pub fn publish_image(
    path: &Path,
    config: &TranscodeConfig,
    telegraph: &TelegraphOptions,
) -> Result<String> {
    MediaFormat::from_path(path).ok_or_else(|| {
        TranscodeError::UnsupportedFormat(
            path.extension()
                .and_then(|s| s.to_str())
                .unwrap_or("<none>")
                .to_string(),
        )
    })?;

    let asset = ImageAsset::from_path(path)?;
    let asset = limit_dimensions(asset, config.max_dimension)?;
    let asset = if asset.byte_size >= UPLOAD_SIZE_THRESHOLD {
        transcode(asset, config)?
    } else {
        asset
    };

    crate::verbose!(
        "uploading {} ({} bytes)",
        asset.path.display(),
        asset.byte_size
    );
    upload_file_sync(&asset.path, telegraph)
}

/// The gallery markup persisted next to each published directory.
pub fn gallery_html(urls: &[String]) -> String {
    urls.iter()
        .map(|url| format!("<img src='{url}'/> "))
        .collect()
}

/// `/photos/trip` -> `/photos/trip.txt`.
pub fn gallery_file_path(dir: &Path) -> PathBuf {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    dir.with_file_name(format!("{name}.txt"))
}

/// Uploads every image of one directory and creates its Telegraph page.
///
/// Returns `Ok(None)` when the directory holds no gallery images. A failed
/// image is logged and skipped so its siblings still upload; the gallery
/// file and the page are built from whatever succeeded.
pub fn publish_directory(
    dir: &Path,
    intro: Option<&str>,
    config: &TranscodeConfig,
    telegraph: &TelegraphOptions,
) -> Result<Option<String>> {
    let images = collect_directory_images(dir)?;
    if images.is_empty() {
        return Ok(None);
    }

    let title = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());

    crate::info!("📤 Uploading folder: {}", dir.display());
    let progress = ProgressBar::new(images.len() as u64);
    progress.set_style(ProgressStyle::default_bar());

    let mut urls = Vec::new();
    let mut failed = 0usize;
    for image in &images {
        match publish_image(image, config, telegraph) {
            Ok(url) => {
                crate::info!("{}", url);
                urls.push(url);
            }
            Err(e) => {
                crate::error!("Failed to process {:?}: {}", image, e);
                failed += 1;
            }
        }
        progress.inc(1);
        thread::sleep(Duration::from_millis(UPLOAD_PAUSE_MS));
    }
    progress.finish_and_clear();

    if failed > 0 {
        crate::warn!("{} of {} images failed in {:?}", failed, images.len(), dir);
    }

    let gallery_file = gallery_file_path(dir);
    fs::write(&gallery_file, gallery_html(&urls))?;

    let nodes = image_nodes(intro, &urls);
    let url = create_page_sync(&title, &nodes, telegraph)?;
    Ok(Some(url))
}

/// Walks a root folder and publishes every directory that contains images.
///
/// Hidden directories are skipped. A directory that fails to publish does
/// not abort its siblings; the URLs of the pages that were created are
/// returned in walk order.
pub fn publish_tree(
    root: &Path,
    intro: Option<&str>,
    config: &TranscodeConfig,
    telegraph: &TelegraphOptions,
) -> Result<Vec<String>> {
    if !root.exists() {
        return Err(TranscodeError::FileNotFound(root.to_path_buf()));
    }

    let mut pages = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        match publish_directory(entry.path(), intro, config, telegraph) {
            Ok(Some(url)) => {
                crate::info!("✅ {}", url);
                pages.push(url);
            }
            Ok(None) => {}
            Err(e) => {
                crate::error!("Failed to publish {:?}: {}", entry.path(), e);
            }
        }
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_unsupported_extension_rejected_before_decode() {
        let config = TranscodeConfig::default();
        let telegraph = TelegraphOptions::new("token".to_string(), None, None, None);

        // The path does not even exist: the extension check must fire first.
        let result = publish_image(Path::new("notes.txt"), &config, &telegraph);
        assert!(matches!(
            result,
            Err(TranscodeError::UnsupportedFormat(ext)) if ext == "txt"
        ));
    }

    #[test]
    fn test_collect_directory_images_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["b.png", "a.jpg", "c.gif", "notes.txt", "clip.mp4"] {
            File::create(temp_dir.path().join(name))
                .unwrap()
                .write_all(b"data")
                .unwrap();
        }
        fs::create_dir(temp_dir.path().join("sub.png")).unwrap();

        let images = collect_directory_images(temp_dir.path()).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png", "c.gif"]);
    }

    #[test]
    fn test_gallery_html_layout() {
        let urls = vec![
            "https://telegra.ph/file/a.jpg".to_string(),
            "https://telegra.ph/file/b.png".to_string(),
        ];
        assert_eq!(
            gallery_html(&urls),
            "<img src='https://telegra.ph/file/a.jpg'/> <img src='https://telegra.ph/file/b.png'/> "
        );
        assert_eq!(gallery_html(&[]), "");
    }

    #[test]
    fn test_gallery_file_path_sits_next_to_directory() {
        assert_eq!(
            gallery_file_path(Path::new("/photos/trip")),
            PathBuf::from("/photos/trip.txt")
        );
    }

    #[test]
    fn test_publish_tree_missing_root() {
        let config = TranscodeConfig::default();
        let telegraph = TelegraphOptions::new("token".to_string(), None, None, None);
        let result = publish_tree(Path::new("/nonexistent/root"), None, &config, &telegraph);
        assert!(matches!(result, Err(TranscodeError::FileNotFound(_))));
    }
}
