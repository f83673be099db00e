use std::io::stdout;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use termfolio_core::{Engine, InputEvent, SceneSnapshot};
use termfolio_protocol::{SectionId, ThemeToken};

/// Half-extent of the particle world mapped onto the terminal. The
/// sphere (radius 6) fills the middle; explosion scatter clips at the
/// edges, which reads as filling the screen.
const WORLD_EXTENT: f32 = 16.0;

/// Wheel delta per mouse scroll notch. Three notches cross the intent
/// threshold, mirroring the heavy scroll feel of the page.
const NOTCH_DELTA: f64 = 50.0;

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::AccentGreen => Color::Rgb(0x39, 0xFF, 0x14),
        ThemeToken::AccentWhite => Color::White,
        ThemeToken::Background => Color::Black,
        ThemeToken::Surface => Color::Rgb(10, 14, 10),
        ThemeToken::Border => Color::Rgb(0x1E, 0x5C, 0x12),
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::BootText => Color::Rgb(0x39, 0xFF, 0x14),
        ThemeToken::BootPrompt => Color::White,
        ThemeToken::HudActive => Color::Rgb(0x39, 0xFF, 0x14),
        ThemeToken::HudInactive => Color::DarkGray,
        ThemeToken::GlitchBright => Color::Rgb(0x1E, 0x5C, 0x12),
        ThemeToken::GlitchDim => Color::Rgb(0x0C, 0x26, 0x08),
        ThemeToken::CardTitle => Color::White,
        ThemeToken::CardMeta => Color::Gray,
        ThemeToken::OverlayBackground => Color::Black,
        ThemeToken::OverlayText => Color::White,
        ThemeToken::LightboxChrome => Color::Rgb(0x39, 0xFF, 0x14),
    }
}

/// Dim a card color by its opacity tier.
fn opacity_color(opacity: f32) -> Color {
    if opacity >= 1.0 {
        theme_to_color(ThemeToken::AccentGreen)
    } else if opacity >= 0.5 {
        Color::Gray
    } else {
        Color::DarkGray
    }
}

pub fn run(mut engine: Engine) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let started = Instant::now();
    let mut glitch_size = (0u16, 0u16);

    loop {
        let now = started.elapsed();
        let term_size = terminal.size()?;
        if glitch_size != (term_size.width, term_size.height) {
            glitch_size = (term_size.width, term_size.height);
            engine.resize_glitch(term_size.width as usize, term_size.height as usize);
        }

        for event in engine.tick(now) {
            tracing::debug!(?event, "nav event");
        }
        let snapshot = engine.snapshot(now);

        terminal.draw(|frame| {
            let area = frame.area();
            draw_glitch(frame.buffer_mut(), area, &engine);
            draw_particles(frame.buffer_mut(), area, &snapshot);

            if snapshot.booted {
                draw_header(frame, area, &snapshot, now.as_secs());
                draw_hud(frame, area, &snapshot);
                draw_section(frame, area, &snapshot);
                draw_overlay(frame, area, &snapshot);
            } else {
                draw_boot(frame, area, &snapshot);
            }
        })?;

        // Handle input
        if event::poll(std::time::Duration::from_millis(33))? {
            let now = started.elapsed();
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Enter => engine.handle(InputEvent::Enter, now),
                    KeyCode::Esc => engine.handle(InputEvent::Escape, now),
                    KeyCode::Down | KeyCode::Char('j') => {
                        engine.handle(InputEvent::Wheel { delta_y: 150.0 }, now);
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        engine.handle(InputEvent::Wheel { delta_y: -150.0 }, now);
                    }
                    KeyCode::Left => engine.handle(InputEvent::Prev, now),
                    KeyCode::Right => engine.handle(InputEvent::Next, now),
                    KeyCode::Char(c @ '1'..='4') => {
                        let index = c as usize - '1' as usize;
                        engine.handle(InputEvent::SelectSection { index }, now);
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => {
                        engine.handle(InputEvent::Wheel { delta_y: NOTCH_DELTA }, now);
                    }
                    MouseEventKind::ScrollUp => {
                        engine.handle(InputEvent::Wheel { delta_y: -NOTCH_DELTA }, now);
                    }
                    MouseEventKind::Moved => {
                        let (x, y) = cell_to_world(
                            mouse.column,
                            mouse.row,
                            glitch_size.0,
                            glitch_size.1,
                        );
                        engine.handle(InputEvent::PointerMove { x, y }, now);
                    }
                    _ => {}
                },
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    tracing::info!("teardown complete");

    Ok(())
}

fn cell_to_world(column: u16, row: u16, width: u16, height: u16) -> (f32, f32) {
    let x = (f32::from(column) / f32::from(width.max(1)) - 0.5) * WORLD_EXTENT * 2.0;
    let y = -(f32::from(row) / f32::from(height.max(1)) - 0.5) * WORLD_EXTENT * 2.0;
    (x, y)
}

fn draw_glitch(buf: &mut ratatui::buffer::Buffer, area: Rect, engine: &Engine) {
    let glitch = engine.glitch();
    let columns = glitch.columns();
    for (i, cell) in glitch.cells().iter().enumerate() {
        let x = (i % columns) as u16;
        let y = (i / columns) as u16;
        if x >= area.width || y >= area.height {
            continue;
        }
        // Glitch colors are kept far below the accent so the backdrop
        // never competes with content.
        let c = cell.color();
        let dimmed = Color::Rgb(c.r / 6, c.g / 6, c.b / 6);
        buf[(area.x + x, area.y + y)]
            .set_char(cell.ch)
            .set_fg(dimmed)
            .set_bg(Color::Black);
    }
}

fn draw_particles(buf: &mut ratatui::buffer::Buffer, area: Rect, snapshot: &SceneSnapshot) {
    let accent = theme_to_color(snapshot.accent);
    for p in &snapshot.particles {
        let col = ((p.x / (WORLD_EXTENT * 2.0) + 0.5) * f32::from(area.width)) as i32;
        let row = ((-p.y / (WORLD_EXTENT * 2.0) + 0.5) * f32::from(area.height)) as i32;
        if col < 0 || row < 0 || col >= i32::from(area.width) || row >= i32::from(area.height) {
            continue;
        }
        let ch = if p.z > 2.0 {
            '•'
        } else if p.z > -2.0 {
            '·'
        } else {
            '.'
        };
        buf[(area.x + col as u16, area.y + row as u16)]
            .set_char(ch)
            .set_fg(accent);
    }
}

fn draw_boot(frame: &mut ratatui::Frame<'_>, area: Rect, snapshot: &SceneSnapshot) {
    let mut lines: Vec<Line<'_>> = snapshot
        .boot_lines
        .iter()
        .map(|l| {
            Line::from(Span::styled(
                format!("> {l}"),
                Style::default().fg(theme_to_color(ThemeToken::BootText)),
            ))
        })
        .collect();
    if snapshot.boot_prompt {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[ PRESS ENTER ]",
            Style::default().fg(theme_to_color(ThemeToken::BootPrompt)),
        )));
    }

    let height = lines.len() as u16;
    let top = area.height.saturating_sub(height) / 2;
    let rect = Rect::new(area.x, area.y + top, area.width, height.min(area.height));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
}

fn draw_header(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    snapshot: &SceneSnapshot,
    elapsed_secs: u64,
) {
    let header_area = Rect::new(area.x, area.y, area.width, 1);
    let title = format!(
        " termfolio — {} | ↑↓ navigate | 1-4 jump | enter open | q quit | T+{:02}:{:02}:{:02} ",
        snapshot.section.label(),
        elapsed_secs / 3600,
        (elapsed_secs / 60) % 60,
        elapsed_secs % 60,
    );
    let header = Block::default()
        .title(title)
        .style(Style::default().fg(Color::White).bg(Color::Rgb(10, 30, 10)));
    frame.render_widget(header, header_area);
}

fn draw_hud(frame: &mut ratatui::Frame<'_>, area: Rect, snapshot: &SceneSnapshot) {
    let width = 12u16;
    if area.width <= width + 2 {
        return;
    }
    let x = area.x + area.width - width;
    for (i, section) in SectionId::ALL.iter().enumerate() {
        let y = area.y + 2 + i as u16 * 2;
        if y >= area.height {
            break;
        }
        let active = snapshot.section == *section;
        let (marker, token) = if active {
            ("▶", ThemeToken::HudActive)
        } else {
            (" ", ThemeToken::HudInactive)
        };
        let line = Line::from(Span::styled(
            format!("{marker} {:02} {}", i + 1, section.label()),
            Style::default().fg(theme_to_color(token)),
        ));
        frame.render_widget(
            Paragraph::new(line),
            Rect::new(x, y, width, 1),
        );
    }
}

fn draw_section(frame: &mut ratatui::Frame<'_>, area: Rect, snapshot: &SceneSnapshot) {
    // Mid-transition both sections stay hidden; the scattered particle
    // field carries the frame on its own.
    let Some(section) = snapshot.active_section else {
        return;
    };
    match section {
        SectionId::Hero => draw_hero(frame, area, snapshot),
        SectionId::About => draw_about(frame, area, snapshot),
        SectionId::Projects => draw_carousel(frame, area, snapshot),
        SectionId::Contact => draw_contact(frame, area),
    }
}

fn draw_hero(frame: &mut ratatui::Frame<'_>, area: Rect, snapshot: &SceneSnapshot) {
    let lines = vec![
        Line::from(Span::styled(
            snapshot.headline.clone(),
            Style::default().fg(theme_to_color(ThemeToken::AccentGreen)),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "scroll to explore",
            Style::default().fg(theme_to_color(ThemeToken::TextMuted)),
        )),
    ];
    let top = area.height / 3;
    let rect = Rect::new(area.x, area.y + top, area.width, 3u16.min(area.height));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
}

fn draw_about(frame: &mut ratatui::Frame<'_>, area: Rect, snapshot: &SceneSnapshot) {
    let text = vec![
        Line::from(Span::styled(
            "ABOUT",
            Style::default().fg(theme_to_color(ThemeToken::AccentWhite)),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Interactive design, 3D art, and playful systems.",
            Style::default().fg(theme_to_color(ThemeToken::TextSecondary)),
        )),
    ];
    let rect = Rect::new(area.x, area.y + area.height / 3, area.width, 3);
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), rect);

    // The self-rotating card stack, drawn as offset boxes front to back.
    let stack_w = 22u16;
    let stack_h = 5u16;
    let base_x = area.x + area.width / 2;
    let base_y = area.y + area.height / 2;
    for (depth, card) in snapshot.about_stack.iter().enumerate().rev() {
        let offset = depth as u16 * 2;
        let x = base_x.saturating_sub(stack_w / 2) + offset;
        let y = base_y + offset / 2;
        if x + stack_w > area.width || y + stack_h > area.height {
            continue;
        }
        let rect = Rect::new(x, y, stack_w, stack_h);
        let color = if depth == 0 {
            theme_to_color(ThemeToken::AccentGreen)
        } else {
            theme_to_color(ThemeToken::TextMuted)
        };
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" CARD {:02} ", card + 1))
                .style(Style::default().fg(color)),
            rect,
        );
    }
}

fn draw_carousel(frame: &mut ratatui::Frame<'_>, area: Rect, snapshot: &SceneSnapshot) {
    let card_w = 20u16;
    let card_h = 6u16;
    let gap = 2u16;
    let center_x = i32::from(area.width) / 2 - i32::from(card_w) / 2;
    let y = (area.y + area.height / 2).saturating_sub(card_h / 2);

    for (i, card) in snapshot.cards.iter().enumerate() {
        let offset = (i as i32 - snapshot.carousel_index as i32) * i32::from(card_w + gap);
        let x = center_x + offset;
        if x < 0 || x + i32::from(card_w) > i32::from(area.width) || y + card_h > area.height {
            continue;
        }
        let rect = Rect::new(area.x + x as u16, y, card_w, card_h);
        let color = opacity_color(card.visual.opacity);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(color)),
            rect,
        );
        let inner = Rect::new(rect.x + 1, rect.y + 1, rect.width - 2, rect.height - 2);
        let lines = vec![
            Line::from(Span::styled(card.title.clone(), Style::default().fg(color))),
            Line::from(Span::styled(
                card.year.clone(),
                Style::default().fg(theme_to_color(ThemeToken::CardMeta)),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }

    // Year label for the active card, bottom center.
    if let Some(year) = &snapshot.year_label {
        let rect = Rect::new(area.x, area.y + area.height.saturating_sub(2), area.width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("// {year}"),
                Style::default().fg(theme_to_color(ThemeToken::AccentGreen)),
            )))
            .alignment(Alignment::Center),
            rect,
        );
    }
}

fn draw_contact(frame: &mut ratatui::Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "CONTACT",
            Style::default().fg(theme_to_color(ThemeToken::AccentWhite)),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "say hello — the terminal is always listening",
            Style::default().fg(theme_to_color(ThemeToken::TextSecondary)),
        )),
    ];
    let rect = Rect::new(area.x, area.y + area.height / 3, area.width, 3);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
}

fn draw_overlay(frame: &mut ratatui::Frame<'_>, area: Rect, snapshot: &SceneSnapshot) {
    let Some(overlay) = &snapshot.overlay else {
        return;
    };
    let w = (area.width * 7 / 10).max(30).min(area.width);
    let h = (area.height * 7 / 10).max(10).min(area.height);
    let rect = Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    );
    frame.render_widget(Clear, rect);

    let chrome = if overlay.closing {
        theme_to_color(ThemeToken::TextMuted)
    } else {
        theme_to_color(ThemeToken::AccentGreen)
    };
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" 00{} — {} ", overlay.id, overlay.title))
            .style(Style::default().fg(chrome).bg(Color::Black)),
        rect,
    );

    let inner = Rect::new(rect.x + 2, rect.y + 1, rect.width.saturating_sub(4), rect.height.saturating_sub(2));
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{}  ·  {}", overlay.role, overlay.year),
            Style::default().fg(theme_to_color(ThemeToken::CardMeta)),
        )),
        Line::from(""),
        Line::from(Span::styled(
            overlay.description.clone(),
            Style::default().fg(theme_to_color(ThemeToken::OverlayText)),
        )),
        Line::from(""),
    ];
    if !overlay.tech.is_empty() {
        let tokens = overlay
            .tech
            .iter()
            .map(|t| format!("[{t}]"))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(Line::from(Span::styled(
            tokens,
            Style::default().fg(theme_to_color(ThemeToken::AccentGreen)),
        )));
    }
    lines.push(Line::from(Span::styled(
        format!("media: {}  |  ←→ projects  |  esc close", overlay.media.len()),
        Style::default().fg(theme_to_color(ThemeToken::TextMuted)),
    )));
    frame.render_widget(Paragraph::new(lines).wrap(ratatui::widgets::Wrap { trim: true }), inner);

    // Lightbox sits on top of the overlay.
    if let Some(index) = overlay.lightbox
        && let Some(item) = overlay.media.get(index)
    {
        let label = match item {
            termfolio_core::content::MediaItem::Image { path } => format!("IMG {path}"),
            termfolio_core::content::MediaItem::Video { path } => format!("VID {path}"),
            termfolio_core::content::MediaItem::Embed { url } => format!("EMBED {url}"),
        };
        let lw = (w * 8 / 10).max(20);
        let lh = 5u16;
        let lrect = Rect::new(
            area.x + (area.width - lw) / 2,
            area.y + (area.height - lh) / 2,
            lw,
            lh,
        );
        frame.render_widget(Clear, lrect);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {}/{} ", index + 1, overlay.media.len()))
                .style(Style::default().fg(theme_to_color(ThemeToken::LightboxChrome))),
            lrect,
        );
        let media_lines = vec![
            Line::from(Span::styled(
                label,
                Style::default().fg(theme_to_color(ThemeToken::OverlayText)),
            )),
            Line::from(Span::styled(
                "←→ media  |  esc back",
                Style::default().fg(theme_to_color(ThemeToken::TextMuted)),
            )),
        ];
        let media_inner = Rect::new(lrect.x + 2, lrect.y + 1, lrect.width.saturating_sub(4), 3);
        frame.render_widget(Paragraph::new(media_lines), media_inner);
    }
}
