//! Event handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::async_ops::AsyncCommand;
use super::state::{AppState, Mode, Screen};
use crate::theme::Theme;

/// Handle key events, returning an optional async command
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    // Handle mode-specific input first
    match state.mode {
        Mode::ThemePicker => {
            handle_theme_picker_key(state, key);
            return None;
        }
        Mode::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                state.mode = Mode::Normal;
            }
            return None;
        }
        Mode::About => {
            handle_about_key(state, key);
            return None;
        }
        Mode::Normal => {}
    }

    if state.screen.is_compose() {
        return handle_compose_key(state, key);
    }

    // Global shortcuts (list screen)
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => {
            state.should_quit = true;
            return None;
        }
        (_, KeyCode::Char('?') | KeyCode::F(1)) => {
            state.mode = Mode::Help;
            return None;
        }
        (_, KeyCode::Char('t')) => {
            state.theme_picker_index = Theme::all()
                .iter()
                .position(|t| *t == state.theme.inner())
                .unwrap_or(0);
            state.mode = Mode::ThemePicker;
            return None;
        }
        (_, KeyCode::Char('A')) => {
            state.mode = Mode::About;
            return None;
        }
        _ => {}
    }

    handle_list_key(state, key);
    None
}

fn handle_list_key(state: &mut AppState, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('j') | KeyCode::Down) => state.select_next_post(),
        (_, KeyCode::Char('k') | KeyCode::Up) => state.select_prev_post(),
        (_, KeyCode::Char('g') | KeyCode::Home) => state.select_first_post(),
        (_, KeyCode::Char('G') | KeyCode::End) => state.select_last_post(),

        // Scroll detail panel
        (_, KeyCode::Char('J')) | (KeyModifiers::CONTROL, KeyCode::Char('d')) => {
            state.detail_scroll = state.detail_scroll.saturating_add(3);
        }
        (_, KeyCode::Char('K')) | (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            state.detail_scroll = state.detail_scroll.saturating_sub(3);
        }

        // Actions
        (_, KeyCode::Char('n' | 'a')) => state.open_add(),
        (_, KeyCode::Char('e') | KeyCode::Enter) => state.open_edit(),
        (_, KeyCode::Char('d') | KeyCode::Delete) => state.delete_selected(),
        (_, KeyCode::Char('o')) => open_selected_image(state),

        (_, KeyCode::Esc) => state.clear_status(),
        _ => {}
    }
}

fn handle_compose_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            let cancelled = match state.screen {
                Screen::Edit { id } => format!("Edit of {id} cancelled"),
                _ => "Draft discarded".to_string(),
            };
            state.close_compose();
            state.set_status(cancelled);
            None
        }
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
            state.submit_draft();
            None
        }
        (KeyModifiers::CONTROL, KeyCode::Char('x')) => {
            if state.draft.image.is_some() {
                state.draft.remove_image();
                state.set_status("Image removed");
            }
            None
        }
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            state.should_quit = true;
            None
        }
        (_, KeyCode::Tab | KeyCode::BackTab) => {
            state.draft.toggle_focus();
            None
        }
        (_, KeyCode::Enter) => match state.draft.focus {
            crate::models::DraftField::Text => {
                state.draft.push_char('\n');
                None
            }
            crate::models::DraftField::Image => state.start_import(),
        },
        (_, KeyCode::Backspace) => {
            state.draft.backspace();
            None
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            state.draft.push_char(c);
            None
        }
        _ => None,
    }
}

fn open_selected_image(state: &mut AppState) {
    let Some(image) = state.selected_post().and_then(|p| p.image.clone()) else {
        state.set_status("⚠ Selected post has no image");
        return;
    };

    match open::that(image.open_target()) {
        Ok(()) => state.set_status(format!("✓ Opened {}", image.label())),
        Err(e) => {
            tracing::warn!("Failed to open {image}: {e}");
            state.set_status(format!("❌ Could not open image: {e}"));
        }
    }
}

fn handle_theme_picker_key(state: &mut AppState, key: KeyEvent) {
    let themes = Theme::all();
    let len = themes.len();

    match key.code {
        KeyCode::Esc => {
            // Cancel - restore configured theme
            state.theme = state.config.theme;
            state.mode = Mode::Normal;
        }
        KeyCode::Enter => {
            let selected_theme = Theme::from(themes[state.theme_picker_index]);
            state.theme = selected_theme;
            state.config.theme = selected_theme;

            state.mode = Mode::Normal;
            state.set_status(format!("✓ Theme set to {}", selected_theme.name()));
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.theme_picker_index = (state.theme_picker_index + 1) % len;
            // Preview theme
            state.theme = Theme::from(themes[state.theme_picker_index]);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.theme_picker_index = state.theme_picker_index.checked_sub(1).unwrap_or(len - 1);
            state.theme = Theme::from(themes[state.theme_picker_index]);
        }
        KeyCode::Home | KeyCode::Char('g') => {
            state.theme_picker_index = 0;
            state.theme = Theme::from(themes[state.theme_picker_index]);
        }
        KeyCode::End | KeyCode::Char('G') => {
            state.theme_picker_index = len - 1;
            state.theme = Theme::from(themes[state.theme_picker_index]);
        }
        _ => {}
    }
}

fn handle_about_key(state: &mut AppState, key: KeyEvent) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
        state.mode = Mode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::demo;
    use crate::models::{DraftField, PostId};

    fn state() -> AppState {
        AppState::new(Config::default(), demo::starter_store())
    }

    fn press(state: &mut AppState, code: KeyCode) -> Option<AsyncCommand> {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(state: &mut AppState, c: char) -> Option<AsyncCommand> {
        handle_key(state, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_compose_and_post() {
        let mut state = state();
        press(&mut state, KeyCode::Char('n'));
        assert_eq!(state.screen, Screen::Add);

        // 'q' is text here, not quit
        type_text(&mut state, "quick note");
        ctrl(&mut state, 's');

        assert!(!state.should_quit);
        assert_eq!(state.screen, Screen::List);
        assert_eq!(state.store.list()[0].text, "quick note");
        assert_eq!(state.store.list()[0].id, PostId(3));
    }

    #[test]
    fn test_escape_discards_draft() {
        let mut state = state();
        press(&mut state, KeyCode::Char('a'));
        type_text(&mut state, "never mind");
        press(&mut state, KeyCode::Esc);

        assert_eq!(state.screen, Screen::List);
        assert_eq!(state.store.len(), 2);
        assert!(state.draft.text.is_empty());
    }

    #[test]
    fn test_edit_selected_post() {
        let mut state = state();
        press(&mut state, KeyCode::Char('j'));
        press(&mut state, KeyCode::Char('e'));
        assert_eq!(state.screen, Screen::Edit { id: PostId(2) });

        for _ in 0..state.draft.text.chars().count() {
            press(&mut state, KeyCode::Backspace);
        }
        type_text(&mut state, "rewritten");
        ctrl(&mut state, 's');

        let ids: Vec<_> = state.store.list().iter().map(|p| p.id).collect();
        assert_eq!(ids, [PostId(1), PostId(2)]);
        assert_eq!(state.store.list()[1].text, "rewritten");
    }

    #[test]
    fn test_delete_from_list() {
        let mut state = state();
        press(&mut state, KeyCode::Char('d'));

        assert_eq!(state.store.len(), 1);
        assert_eq!(state.store.list()[0].id, PostId(2));
    }

    #[test]
    fn test_image_input_starts_import() {
        let mut state = state();
        press(&mut state, KeyCode::Char('n'));
        press(&mut state, KeyCode::Tab);
        assert_eq!(state.draft.focus, DraftField::Image);

        type_text(&mut state, "/tmp/cat.png");
        let cmd = press(&mut state, KeyCode::Enter);

        assert!(matches!(cmd, Some(AsyncCommand::ImportImage { .. })));
        assert!(state.draft.is_importing());
        assert!(state.draft.text.is_empty());
    }

    #[test]
    fn test_enter_in_text_adds_newline() {
        let mut state = state();
        press(&mut state, KeyCode::Char('n'));
        type_text(&mut state, "a");
        assert!(press(&mut state, KeyCode::Enter).is_none());
        type_text(&mut state, "b");

        assert_eq!(state.draft.text, "a\nb");
    }

    #[test]
    fn test_quit_and_help_from_list() {
        let mut state = state();
        press(&mut state, KeyCode::Char('?'));
        assert_eq!(state.mode, Mode::Help);
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.mode, Mode::Normal);

        press(&mut state, KeyCode::Char('q'));
        assert!(state.should_quit);
    }

    #[test]
    fn test_theme_picker_cancel_restores_theme() {
        let mut state = state();
        let original = state.theme;
        press(&mut state, KeyCode::Char('t'));
        press(&mut state, KeyCode::Down);
        assert_ne!(state.theme, original);

        press(&mut state, KeyCode::Esc);
        assert_eq!(state.theme, original);
        assert_eq!(state.mode, Mode::Normal);
    }
}
