use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::io::AsyncReadExt;
use tracing::debug;

use newsroom::newsletter::{InlineImage, Segment, render_plain, split};
use newsroom::ui::style;

/// Offline rendering of content read from `file`, or stdin.
pub async fn run(file: Option<PathBuf>, save_images: Option<PathBuf>) -> Result<ExitCode> {
    let content = match file {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read stdin")?;
            buf
        }
    };

    println!("{}", render_plain(&content));

    if let Some(dir) = save_images {
        let written = save_inline_images(&content, &dir).await?;
        eprintln!(
            "{}",
            style::dim(t!(
                "cli.saved_images",
                count = written.len(),
                dir = dir.display()
            ))
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Decode every inline image in `content` into `dir` as `image-<n>.<ext>`.
/// Remote references and undecodable payloads are skipped.
pub async fn save_inline_images(content: &str, dir: &Path) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut written = Vec::new();
    let references = split(content).filter_map(|segment| match segment {
        Segment::Image(reference) => Some(reference),
        Segment::Text(_) => None,
    });
    for reference in references {
        let Some(image) = InlineImage::parse(reference) else {
            continue;
        };
        let path = dir.join(format!("image-{}.{}", written.len() + 1, image.extension()));
        tokio::fs::write(&path, &image.data)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(path = %path.display(), bytes = image.data.len(), "render.image_saved");
        written.push(path);
    }
    Ok(written)
}
