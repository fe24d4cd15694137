//! UI rendering for the TUI

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use ratatui_image::StatefulImage;
use unicode_width::UnicodeWidthStr;

use super::state::{AppState, Mode, Screen};
use crate::models::{DraftField, ImageRef};
use crate::theme::{Theme, ThemeColors};

/// Postboard icon
const ICON: &str = "📝";

/// Rows reserved for an inline image preview
const IMAGE_ROWS: u16 = 12;

/// Main render function
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let colors = state.theme.colors();

    let area = frame.area();
    let bg_block = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, state, chunks[0]);
    render_list_screen(frame, state, chunks[1]);
    if state.screen.is_compose() {
        render_compose(frame, state, chunks[1]);
    }
    render_status_bar(frame, state, chunks[2]);

    match state.mode {
        Mode::Help => render_help_popup(frame, state),
        Mode::ThemePicker => render_theme_picker(frame, state),
        Mode::About => render_about_dialog(frame, state),
        Mode::Normal => {}
    }
}

fn render_header(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let crumb = match state.screen {
        Screen::List => "Feed".to_string(),
        Screen::Add => "Feed › New post".to_string(),
        Screen::Edit { id } => format!("Feed › Edit {id}"),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {crumb}"), colors.text_primary()),
        Span::styled(
            format!("   {} posts", state.store.len()),
            colors.text_muted(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(colors.block())
            .title(format!(" {ICON} Postboard "))
            .title_style(colors.logo_style_primary()),
    );

    frame.render_widget(header, area);
}

fn render_list_screen(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let colors = state.theme.colors();
    let list_focused = state.screen == Screen::List;

    // Layout: [Feed 50%] [Detail 50%]
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let feed_block = Block::default()
        .title(" 📰 Feed ")
        .title_style(colors.text_primary())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if list_focused {
            colors.block_focus()
        } else {
            colors.block()
        });

    let width = horizontal[0].width.saturating_sub(3) as usize;
    let post_items: Vec<ListItem> = if state.store.is_empty() {
        vec![
            ListItem::new(Line::from("")),
            ListItem::new(Line::from(vec![
                Span::styled("  ℹ ", colors.text_info()),
                Span::styled("No posts yet", colors.text_muted()),
            ])),
            ListItem::new(Line::from("")),
            ListItem::new(Line::from(vec![
                Span::styled("  Press ", colors.text_dim()),
                Span::styled("[n]", colors.key_hint()),
                Span::styled(" to write one", colors.text_dim()),
            ])),
        ]
    } else {
        state
            .store
            .list()
            .iter()
            .enumerate()
            .map(|(i, post)| {
                let is_selected = i == state.selected_post;
                let base_style = if is_selected {
                    colors.selected()
                } else {
                    Style::default()
                };

                let image_marker = match &post.image {
                    Some(ImageRef::Local(_)) => " 🖼",
                    Some(ImageRef::Remote(_)) => " 🌐",
                    None => "",
                };
                let title = format!(" {} · {}{}", post.id, post.relative_time(), image_marker);
                let spacer = format!("{:<width$}", "");

                let mut lines = vec![
                    Line::styled(format!("{title:<width$}"), base_style.patch(colors.text_primary())),
                    Line::styled(spacer.clone(), base_style),
                ];

                let content_width = width.saturating_sub(4).max(1);
                for chunk in textwrap::wrap(&post.text, content_width) {
                    let content = format!("   {chunk}");
                    lines.push(Line::styled(
                        format!("{content:<width$}"),
                        base_style.patch(colors.text()),
                    ));
                }

                lines.push(Line::styled(spacer, Style::default()));
                ListItem::new(lines)
            })
            .collect()
    };

    let feed = List::new(post_items)
        .block(feed_block)
        .highlight_style(colors.selected());

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_post));
    frame.render_stateful_widget(feed, horizontal[0], &mut list_state);

    render_detail(frame, state, &colors, horizontal[1]);
}

fn render_detail(frame: &mut Frame, state: &mut AppState, colors: &ThemeColors, area: Rect) {
    let detail_block = Block::default()
        .title(" 📝 Post ")
        .title_style(colors.text_primary())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(colors.block());

    let Some(post) = state.selected_post().cloned() else {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(""),
            Line::styled("  Select a post", colors.text_muted()),
        ])
        .block(detail_block);
        frame.render_widget(empty, area);
        return;
    };

    let mut content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("  Post {}", post.id),
                colors.text_primary().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  · {}", post.created_at.format("%Y-%m-%d %H:%M")),
                colors.text_muted(),
            ),
        ]),
        Line::from(""),
    ];

    for line in post.text.lines() {
        content.push(Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled(line.to_string(), colors.text()),
        ]));
    }

    if let Some(image) = &post.image {
        content.push(Line::from(""));
        content.push(image_label_line(state, colors, image));
    }

    let image_key = post
        .image
        .as_ref()
        .map(ImageRef::cache_key)
        .filter(|key| state.config.show_images && state.image_cache.contains(key));

    let (text_area, image_area) = split_for_image(area, image_key.is_some());

    let detail = Paragraph::new(content)
        .block(detail_block)
        .wrap(Wrap { trim: false })
        .scroll((state.detail_scroll, 0));
    frame.render_widget(detail, text_area);

    if let (Some(key), Some(img_area)) = (image_key, image_area) {
        render_image(frame, state, &key, img_area);
    }
}

fn image_label_line<'a>(state: &AppState, colors: &ThemeColors, image: &ImageRef) -> Line<'a> {
    let key = image.cache_key();
    let (icon, status) = match image {
        ImageRef::Remote(_) => ("🌐", " (remote)"),
        ImageRef::Local(_) if state.loading_images.contains(&key) => ("🖼", " ⏳"),
        ImageRef::Local(_) if state.failed_images.contains(&key) => ("🖼", " ⚠ unreadable"),
        ImageRef::Local(_) if state.image_cache.contains(&key) => ("🖼", " ✓"),
        ImageRef::Local(_) => ("🖼", ""),
    };

    Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled(format!("[{icon} {}{status}]", image.label()), colors.media()),
        Span::styled("  o", colors.key_hint()),
        Span::styled(" open", colors.text_dim()),
    ])
}

/// Split off the bottom rows for an image when one is ready
fn split_for_image(area: Rect, has_image: bool) -> (Rect, Option<Rect>) {
    if !has_image {
        return (area, None);
    }
    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(IMAGE_ROWS)])
        .split(area);
    (areas[0], Some(areas[1]))
}

fn render_image(frame: &mut Frame, state: &mut AppState, key: &str, area: Rect) {
    let inner_area = Rect {
        x: area.x + 2,
        y: area.y,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(1),
    };

    if let Some(protocol) = state.get_image_protocol(key) {
        frame.render_stateful_widget(StatefulImage::new(), inner_area, protocol);
    }
}

fn render_compose(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let colors = state.theme.colors();
    let draft = &state.draft;

    let popup_area = centered_rect(70, 90, area);
    let bg_block = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(Clear, popup_area);
    frame.render_widget(bg_block, popup_area);

    let title = match state.screen {
        Screen::Edit { id } => format!(" ✏️ Edit Post {id} "),
        _ => " 📝 New Post ".to_string(),
    };

    let submit_hint = if draft.is_postable() && !draft.is_importing() {
        colors.key_hint()
    } else {
        colors.text_muted()
    };

    let mut content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled("Ctrl+S", submit_hint),
            Span::styled(
                if matches!(state.screen, Screen::Edit { .. }) {
                    " save  "
                } else {
                    " post  "
                },
                colors.text_dim(),
            ),
            Span::styled("Tab", colors.key_hint()),
            Span::styled(" image  ", colors.text_dim()),
            Span::styled("Ctrl+X", colors.key_hint()),
            Span::styled(" remove image  ", colors.text_dim()),
            Span::styled("Esc", colors.key_hint()),
            Span::styled(" cancel", colors.text_dim()),
        ]),
        Line::from(""),
    ];

    // Image row and input
    let image_focused = draft.focus == DraftField::Image;
    let attached = match &draft.image {
        Some(image) => Span::styled(format!("{image}"), colors.media()),
        None => Span::styled("none", colors.text_dim()),
    };
    content.push(Line::from(vec![
        Span::styled("  🖼 Image: ", colors.text_dim()),
        attached,
    ]));
    let input_style = if image_focused {
        colors.selected()
    } else {
        colors.text_dim()
    };
    let input_text = if draft.is_importing() {
        format!("{} ⏳", draft.image_input)
    } else if draft.image_input.is_empty() && !image_focused {
        "path or URL (Tab to edit)".to_string()
    } else {
        draft.image_input.clone()
    };
    content.push(Line::from(vec![
        Span::styled("  ↳ ", colors.text_dim()),
        Span::styled(input_text, input_style),
    ]));
    content.push(Line::from(""));

    let text_top = content.len() as u16;
    if draft.text.is_empty() && !image_focused {
        content.push(Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled("What's on your mind?", colors.text_muted()),
        ]));
    } else {
        let text_style = if image_focused {
            colors.text_dim()
        } else {
            colors.text()
        };
        for line in draft.text.split('\n') {
            content.push(Line::from(vec![
                Span::styled("  ", Style::default()),
                Span::styled(line.to_string(), text_style),
            ]));
        }
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        format!("  {} chars", draft.char_count()),
        colors.text_dim(),
    )));

    let image_key = draft
        .image
        .as_ref()
        .map(ImageRef::cache_key)
        .filter(|key| state.config.show_images && state.image_cache.contains(key));

    let (text_area, image_area) = split_for_image(popup_area, image_key.is_some());

    let cursor = if image_focused {
        let prefix = UnicodeWidthStr::width("  ↳ ") as u16;
        let x = text_area.x + 1 + prefix + UnicodeWidthStr::width(draft.image_input.as_str()) as u16;
        (x, text_area.y + 1 + 4)
    } else {
        let lines: Vec<&str> = draft.text.split('\n').collect();
        let last = lines.last().map_or(0, |l| UnicodeWidthStr::width(*l));
        let x = text_area.x + 3 + last as u16;
        let y = text_area.y + 1 + text_top + lines.len().saturating_sub(1) as u16;
        (x, y)
    };

    let compose = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(colors.block_focus())
                .style(Style::default().bg(colors.bg))
                .title(title)
                .title_style(colors.text_primary()),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(compose, text_area);

    if cursor.0 < text_area.x + text_area.width.saturating_sub(1)
        && cursor.1 < text_area.y + text_area.height.saturating_sub(1)
    {
        frame.set_cursor_position(cursor);
    }

    if let (Some(key), Some(img_area)) = (image_key, image_area) {
        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
            .border_type(BorderType::Rounded)
            .border_style(colors.block_focus())
            .style(Style::default().bg(colors.bg));
        let inner = block.inner(img_area);
        frame.render_widget(block, img_area);
        render_image(frame, state, &key, inner);
    }
}

fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    // Spinner animation frames
    const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

    let busy = state.draft.is_importing() || !state.loading_images.is_empty();
    let loading_indicator = if busy {
        let frame_idx = (state.current_tick() / 2) as usize % SPINNER.len();
        format!("{} ", SPINNER[frame_idx])
    } else {
        String::new()
    };

    let content = if !state.status.is_empty() {
        vec![
            Span::styled(" ", Style::default()),
            Span::styled(loading_indicator, colors.text_secondary()),
            Span::styled(state.status.as_str(), colors.status(&state.status)),
        ]
    } else if state.screen.is_compose() {
        vec![
            Span::styled(" ", Style::default()),
            Span::styled(loading_indicator, colors.text_secondary()),
            Span::styled("Ctrl+S", colors.key_hint()),
            Span::styled(": submit  ", colors.text_muted()),
            Span::styled("Esc", colors.key_hint()),
            Span::styled(": back", colors.text_muted()),
        ]
    } else {
        vec![
            Span::styled(" ", Style::default()),
            Span::styled(loading_indicator, colors.text_secondary()),
            Span::styled("n", colors.key_hint()),
            Span::styled(": new  ", colors.text_muted()),
            Span::styled("e", colors.key_hint()),
            Span::styled(": edit  ", colors.text_muted()),
            Span::styled("d", colors.key_hint()),
            Span::styled(": delete  ", colors.text_muted()),
            Span::styled("?", colors.key_hint()),
            Span::styled(": help  ", colors.text_muted()),
            Span::styled("t", colors.key_hint()),
            Span::styled(": theme  ", colors.text_muted()),
            Span::styled("q", colors.key_hint()),
            Span::styled(": quit", colors.text_muted()),
        ]
    };

    let status =
        Paragraph::new(Line::from(content)).style(Style::default().bg(colors.bg_secondary));
    frame.render_widget(status, area);
}

fn help_section<'a>(colors: &ThemeColors, title: &'a str) -> Line<'a> {
    Line::from(vec![Span::styled(
        format!("  {title}"),
        colors.text_primary().add_modifier(Modifier::BOLD),
    )])
}

fn help_row<'a>(colors: &ThemeColors, keys: &'a str, what: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {keys:<17}"), colors.key_hint()),
        Span::styled(what, colors.text()),
    ])
}

fn render_help_popup(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let popup_area = centered_rect(50, 70, frame.area());

    let bg_block = Block::default().style(Style::default().bg(colors.bg_secondary));
    frame.render_widget(Clear, popup_area);
    frame.render_widget(bg_block, popup_area);

    let c = &colors;
    let help_content = vec![
        Line::from(""),
        help_section(c, "Feed"),
        help_row(c, "j/k or ↑/↓", "Move selection"),
        help_row(c, "g/G", "First/last post"),
        help_row(c, "J/K", "Scroll post"),
        help_row(c, "n or a", "Write a new post"),
        help_row(c, "e or Enter", "Edit selected post"),
        help_row(c, "d or Del", "Delete selected post"),
        help_row(c, "o", "Open image in viewer"),
        Line::from(""),
        help_section(c, "New / Edit"),
        help_row(c, "Tab", "Switch text / image input"),
        help_row(c, "Enter", "New line / import image"),
        help_row(c, "Ctrl+X", "Remove image"),
        help_row(c, "Ctrl+S", "Post or save"),
        help_row(c, "Esc", "Cancel"),
        Line::from(""),
        help_section(c, "General"),
        help_row(c, "t", "Open theme selector"),
        help_row(c, "A", "About Postboard"),
        help_row(c, "?", "Toggle this help"),
        help_row(c, "q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", colors.text_muted()),
            Span::styled("Esc", colors.key_hint()),
            Span::styled(" or ", colors.text_muted()),
            Span::styled("?", colors.key_hint()),
            Span::styled(" to close", colors.text_muted()),
        ]),
    ];

    let help = Paragraph::new(help_content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(colors.block_focus())
                .style(Style::default().bg(colors.bg_secondary))
                .title(" ⌨ Keyboard Shortcuts ")
                .title_style(colors.text_primary()),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help, popup_area);
}

fn render_theme_picker(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let popup_area = centered_rect(50, 70, frame.area());

    let bg_block = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(Clear, popup_area);
    frame.render_widget(bg_block, popup_area);

    let themes = Theme::all();
    let items: Vec<ListItem> = themes
        .iter()
        .enumerate()
        .map(|(i, theme_name)| {
            let palette = theme_name.palette();
            let selected = i == state.theme_picker_index;

            let preview = format!(
                "  {} {} ",
                if selected { "▸" } else { " " },
                theme_name.display_name()
            );

            let style = if selected {
                Style::default()
                    .fg(palette.accent)
                    .bg(palette.selection)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.fg).bg(colors.bg)
            };

            ListItem::new(Line::from(vec![
                Span::styled(preview, style),
                Span::styled("█", Style::default().fg(palette.accent).bg(colors.bg)),
                Span::styled("█", Style::default().fg(palette.secondary).bg(colors.bg)),
                Span::styled("█", Style::default().fg(palette.success).bg(colors.bg)),
                Span::styled("█", Style::default().fg(palette.warning).bg(colors.bg)),
            ]))
        })
        .collect();

    let theme_list = List::new(items)
        .style(Style::default().bg(colors.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.primary))
                .border_type(BorderType::Rounded)
                .style(Style::default().bg(colors.bg))
                .title(format!(
                    " 🎨 Select Theme ({}/{}) ",
                    state.theme_picker_index + 1,
                    themes.len()
                ))
                .title_bottom(Line::from(" ↑↓ navigate │ ↵ apply │ Esc cancel ").centered()),
        );

    let mut list_state = ListState::default();
    list_state.select(Some(state.theme_picker_index));
    frame.render_stateful_widget(theme_list, popup_area, &mut list_state);
}

fn render_about_dialog(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let popup_area = centered_rect(60, 50, frame.area());

    let bg_block = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(Clear, popup_area);
    frame.render_widget(bg_block, popup_area);

    let mut lines: Vec<Line> = crate::LOGO
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| Line::from(Span::styled(line, Style::default().fg(colors.primary))))
        .collect();
    lines.extend([
        Line::from(""),
        Line::from(Span::styled(
            format!("{ICON} A small feed for your terminal"),
            Style::default().fg(colors.fg).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Version: ", colors.text_muted()),
            Span::styled(
                crate::VERSION,
                Style::default()
                    .fg(colors.primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Posts: ", colors.text_muted()),
            Span::styled(state.store.len().to_string(), colors.text()),
            Span::styled(" (kept in memory only)", colors.text_dim()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Built with Rust 🦀 + Ratatui",
            colors.text_muted().add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(vec![Span::styled(" [Esc] ", colors.text_muted()), Span::raw("Close")]),
    ]);

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(colors.primary))
            .style(Style::default().bg(colors.bg))
            .title(format!(" {ICON} About Postboard "))
            .title_style(
                Style::default()
                    .fg(colors.primary)
                    .add_modifier(Modifier::BOLD),
            ),
    );

    frame.render_widget(paragraph, popup_area);
}

/// Helper function to create a centered rect
const fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_width = r.width * percent_x / 100;
    let popup_height = r.height * percent_y / 100;
    Rect {
        x: r.x + (r.width.saturating_sub(popup_width)) / 2,
        y: r.y + (r.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    }
}
