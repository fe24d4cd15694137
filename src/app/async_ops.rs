//! Async operations for the TUI
//!
//! Uses channels to communicate between the sync TUI loop and async tasks.
//! The worker never sees the post store: it only imports and decodes
//! images and hands the results back to the UI thread.

use image::DynamicImage;
use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::images::loader;
use crate::media::MediaLibrary;
use crate::models::ImageRef;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum AsyncCommand {
    /// Copy a picked image into the media library
    ImportImage { ticket: u64, source: ImageRef },
    /// Decode a local image for preview
    LoadImage { key: String, path: PathBuf },
    /// Shutdown the worker
    Shutdown,
}

/// Results sent back from the async worker to the TUI
#[derive(Debug)]
pub enum AsyncResult {
    /// Image persisted and ready to attach
    ImageImported { ticket: u64, image: ImageRef },
    /// Import failed
    ImportFailed { ticket: u64, message: String },
    /// Image decoded
    ImageLoaded { key: String, image: DynamicImage },
    /// Image could not be decoded
    ImageFailed { key: String, error: String },
}

/// Channel handles for communicating with the async worker
pub struct AsyncHandle {
    /// Send commands to the worker
    pub cmd_tx: mpsc::Sender<AsyncCommand>,
    /// Receive results from the worker
    pub result_rx: mpsc::Receiver<AsyncResult>,
}

/// Spawn the async worker and return handles
pub fn spawn_worker(library: MediaLibrary) -> AsyncHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<AsyncCommand>(32);
    let (result_tx, result_rx) = mpsc::channel::<AsyncResult>(32);

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                AsyncCommand::Shutdown => {
                    tracing::debug!("Async worker shutting down");
                    break;
                }
                AsyncCommand::ImportImage { ticket, source } => {
                    handle_import(&result_tx, &library, ticket, source).await;
                }
                AsyncCommand::LoadImage { key, path } => {
                    handle_load(&result_tx, key, path).await;
                }
            }
        }
    });

    AsyncHandle { cmd_tx, result_rx }
}

async fn handle_import(
    result_tx: &mpsc::Sender<AsyncResult>,
    library: &MediaLibrary,
    ticket: u64,
    source: ImageRef,
) {
    let result = match library.import(source).await {
        Ok(image) => {
            tracing::info!("Imported image {image}");
            AsyncResult::ImageImported { ticket, image }
        }
        Err(e) => {
            tracing::warn!("Image import failed: {e}");
            AsyncResult::ImportFailed {
                ticket,
                message: e.to_string(),
            }
        }
    };
    let _ = result_tx.send(result).await;
}

async fn handle_load(result_tx: &mpsc::Sender<AsyncResult>, key: String, path: PathBuf) {
    let result = match loader::decode_local(path).await {
        Ok(image) => AsyncResult::ImageLoaded { key, image },
        Err(error) => AsyncResult::ImageFailed { key, error },
    };
    let _ = result_tx.send(result).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_worker_imports_and_reports() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("cat.png");
        DynamicImage::new_rgb8(2, 2).save(&source).unwrap();
        let mut handle = spawn_worker(MediaLibrary::new(dir.path().join("media")));

        handle
            .cmd_tx
            .send(AsyncCommand::ImportImage {
                ticket: 7,
                source: ImageRef::Local(source),
            })
            .await
            .unwrap();

        match handle.result_rx.recv().await.unwrap() {
            AsyncResult::ImageImported { ticket, image } => {
                assert_eq!(ticket, 7);
                assert!(image.local_path().unwrap().exists());
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let _ = handle.cmd_tx.send(AsyncCommand::Shutdown).await;
    }

    #[tokio::test]
    async fn test_worker_reports_failed_import() {
        let dir = tempdir().unwrap();
        let mut handle = spawn_worker(MediaLibrary::new(dir.path().join("media")));

        handle
            .cmd_tx
            .send(AsyncCommand::ImportImage {
                ticket: 1,
                source: ImageRef::Local(dir.path().join("missing.png")),
            })
            .await
            .unwrap();

        match handle.result_rx.recv().await.unwrap() {
            AsyncResult::ImportFailed { ticket, message } => {
                assert_eq!(ticket, 1);
                assert!(message.contains("not found"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
