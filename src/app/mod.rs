//! TUI Application module

mod async_ops;
mod events;
mod state;
mod ui;

pub use state::{AppState, Mode, Screen};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::demo;
use crate::images;
use crate::media::MediaLibrary;
use crate::store::PostStore;

use async_ops::{AsyncCommand, AsyncHandle, AsyncResult, spawn_worker};

/// Run the TUI application
///
/// With `seed` set (and `seed_posts` enabled in the config) the feed starts
/// with the starter posts, otherwise it starts empty.
pub fn run(seed: bool) -> Result<()> {
    // Create tokio runtime
    let rt = Runtime::new().context("Failed to start async runtime")?;

    // Load config
    let config = Config::load()?;

    let store = if seed && config.seed_posts {
        demo::starter_store()
    } else {
        PostStore::new()
    };
    let library = MediaLibrary::new(config.media_dir()?);
    tracing::info!(
        "Starting with {} posts, media in {}",
        store.len(),
        library.dir().display()
    );

    // Query terminal graphics support before raw mode
    if config.show_images {
        images::init_picker();
    }

    // Spawn async worker
    let async_handle = rt.block_on(async { spawn_worker(library) });

    // Restore the terminal if we get killed
    ctrlc::set_handler(|| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        std::process::exit(130);
    })
    .context("Failed to install signal handler")?;

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Create app state
    let mut state = AppState::new(config, store);

    // Main loop
    let result = run_app(&mut terminal, &mut state, async_handle);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Let the worker finish its current task
    rt.shutdown_timeout(Duration::from_millis(500));

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    mut async_handle: AsyncHandle,
) -> Result<()> {
    loop {
        // Process any async results
        while let Ok(result) = async_handle.result_rx.try_recv() {
            handle_async_result(state, result);
        }

        // Draw UI
        terminal.draw(|frame| ui::render(frame, state))?;

        // Handle events
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && let Some(cmd) = events::handle_key(state, key)
        {
            let _ = async_handle.cmd_tx.blocking_send(cmd);
        }

        // Queue image decoding for whatever is on screen
        let images_to_load = state.images_to_load();
        if !images_to_load.is_empty() {
            state.mark_images_loading(&images_to_load);
            for (key, path) in images_to_load {
                let _ = async_handle
                    .cmd_tx
                    .blocking_send(AsyncCommand::LoadImage { key, path });
            }
        }

        // Tick for animations
        state.tick();

        if state.should_quit {
            // Shutdown async worker
            let _ = async_handle.cmd_tx.blocking_send(AsyncCommand::Shutdown);
            break;
        }
    }

    // Save config on exit
    state.config.save()?;

    Ok(())
}

fn handle_async_result(state: &mut AppState, result: AsyncResult) {
    match result {
        AsyncResult::ImageImported { ticket, image } => {
            state.finish_import(ticket, Ok(image));
        }
        AsyncResult::ImportFailed { ticket, message } => {
            state.finish_import(ticket, Err(message));
        }
        AsyncResult::ImageLoaded { key, image } => {
            // No status message - images load quietly
            state.image_loaded(&key, image);
        }
        AsyncResult::ImageFailed { key, error } => {
            tracing::warn!("Failed to load image {}: {}", key, error);
            state.image_failed(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageRef;
    use image::DynamicImage;

    #[test]
    fn test_import_results_reach_the_draft() {
        let mut state = AppState::new(Config::default(), PostStore::new());
        state.open_add();
        state.draft.image_input = "/tmp/cat.png".to_string();
        let Some(AsyncCommand::ImportImage { ticket, .. }) = state.start_import() else {
            panic!("expected an import command");
        };

        let image = ImageRef::Local("/media/abc-cat.png".into());
        handle_async_result(
            &mut state,
            AsyncResult::ImageImported {
                ticket,
                image: image.clone(),
            },
        );

        assert_eq!(state.draft.image, Some(image));
    }

    #[test]
    fn test_decoded_images_are_cached() {
        let mut state = AppState::new(Config::default(), PostStore::new());
        state.loading_images.insert("/tmp/a.png".to_string());

        handle_async_result(
            &mut state,
            AsyncResult::ImageLoaded {
                key: "/tmp/a.png".to_string(),
                image: DynamicImage::new_rgb8(1, 1),
            },
        );
        handle_async_result(
            &mut state,
            AsyncResult::ImageFailed {
                key: "/tmp/b.png".to_string(),
                error: "bad header".to_string(),
            },
        );

        assert!(state.image_cache.contains("/tmp/a.png"));
        assert!(state.loading_images.is_empty());
        assert!(state.failed_images.contains("/tmp/b.png"));
    }
}
