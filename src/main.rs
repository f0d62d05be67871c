mod app;
mod config;
mod deck;
mod event;
mod input;
mod select;
mod session;
mod store;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction as LayoutDirection, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use app::{App, AppScreen};
use event::{AppEvent, EventHandler};
use input::direction_for_key;
use ui::components::card::Card;
use ui::components::stats_panel::StatsPanel;
use ui::layout::AppLayout;

/// Terminal cells are coarse compared to the unit space the gesture tracker
/// works in, so mouse coordinates are scaled up before they are fed in.
const UNITS_PER_CELL: i32 = 10;

#[derive(Parser)]
#[command(name = "wordr", version, about = "Terminal vocabulary flashcard trainer")]
struct Cli {
    #[arg(short, long, help = "Deck to open on start")]
    deck: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Selection policy (random, weighted, unseen)")]
    policy: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app = App::new();

    if let Some(policy) = cli.policy {
        app.config.policy = policy;
        app.config.normalize_policy();
        app.policy = select::policy_from_name(&app.config.policy);
    }
    if let Some(theme_name) = cli.theme {
        if let Some(theme) = ui::theme::Theme::load(&theme_name) {
            let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));
            app.theme = theme;
            app.menu.theme = theme;
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    if let Some(deck) = cli.deck {
        app.start_review(&deck);
    }

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
            AppEvent::Tick => app.tick(Instant::now()),
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Only process Press events; Repeat/Release would double up input
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Review => handle_review_key(app, key),
        AppScreen::Stats => handle_stats_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char(ch @ '1'..='9') => {
            let idx = ch as usize - '1' as usize;
            if let Some(name) = app.menu.items.get(idx).map(|i| i.label.clone()) {
                app.start_review(&name);
            }
        }
        KeyCode::Char('s') => app.go_to_stats(),
        KeyCode::Char('c') => app.go_to_settings(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => {
            if let Some(name) = app.menu.selected_label().map(|s| s.to_string()) {
                app.start_review(&name);
            }
        }
        _ => {}
    }
}

fn handle_review_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        code => {
            // Arrow keys are the keyboard input source; everything else no-ops
            if let Some(direction) = direction_for_key(code) {
                app.apply_direction(direction);
            }
        }
    }
}

fn handle_stats_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.leave_settings(),
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_selected = app.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.settings_selected = (app.settings_selected + 1).min(2);
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
            app.settings_cycle_forward();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.settings_cycle_backward();
        }
        _ => {}
    }
}

/// Pointer input source: press/drag/release on the review screen feed the
/// gesture tracker in unit space; a resolved gesture becomes a direction.
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.screen != AppScreen::Review {
        return;
    }

    let x = i32::from(mouse.column) * UNITS_PER_CELL;
    let y = i32::from(mouse.row) * UNITS_PER_CELL;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.gesture.press(x, y, Instant::now());
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            // Drags without a tracked press (capture started mid-gesture) are ignored
            if app.gesture.is_active() {
                app.gesture.drag_to(x, y);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(direction) = app.gesture.release(x, y, Instant::now()) {
                app.apply_direction(direction);
            }
        }
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Review => render_review(frame, app),
        AppScreen::Stats => render_stats(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let streak_text = if app.profile.streak_days > 0 {
        format!(" | {} day streak", app.profile.streak_days)
    } else {
        String::new()
    };
    let header_info = format!(
        " {} words learned | {} reviews{}",
        app.progress.words_learned(),
        app.profile.total_reviews,
        streak_text,
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " wordr ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            &*header_info,
            Style::default()
                .fg(colors.text_dim())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout[0]);

    let menu_area = ui::layout::centered_rect(50, 80, layout[1]);
    frame.render_widget(&app.menu, menu_area);

    let footer_text = match app.menu_error {
        Some(ref e) => format!(" {e} "),
        None => " [1-9/Enter] Review  [s] Stats  [c] Settings  [q] Quit ".to_string(),
    };
    let footer_style = if app.menu_error.is_some() {
        Style::default().fg(colors.fail())
    } else {
        Style::default().fg(colors.text_dim())
    };
    let footer = Paragraph::new(Line::from(Span::styled(footer_text, footer_style)));
    frame.render_widget(footer, layout[2]);
}

fn render_review(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let Some(ref deck) = app.deck else {
        return;
    };
    let Some(ref review) = app.review else {
        return;
    };

    let app_layout = AppLayout::new(area);

    let header_text = format!(" {} | {} words ", deck.name, deck.len());
    let header = Paragraph::new(Line::from(Span::styled(
        &*header_text,
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, app_layout.header);

    let card_area = ui::layout::centered_rect(80, 70, app_layout.main);
    let current = deck.word_at(review.cursor);
    let deck_done = review.cursor.is_none() && !deck.is_empty();
    if deck_done {
        // The unseen policy returns no index once the whole deck is learned
        let done = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Deck complete",
                Style::default()
                    .fg(colors.pass())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Every word here is marked known",
                Style::default().fg(colors.text_dim()),
            )),
        ])
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::bordered().border_style(Style::default().fg(colors.border())));
        frame.render_widget(done, card_area);
    } else {
        let card = Card::new(
            current,
            review.show_details,
            review.flash.status(),
            app.gesture.lean(),
            app.theme,
        );
        frame.render_widget(card, card_area);
    }

    if let Some(sidebar_area) = app_layout.sidebar {
        let decks = [(deck.name.clone(), deck.len())];
        let sidebar = StatsPanel::new(&decks, &app.progress, &app.profile, app.theme);
        frame.render_widget(sidebar, sidebar_area);
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        " [\u{2191}] Reveal  [\u{2193}] Hide  [\u{2192}/drag right] Known  [\u{2190}/drag left] Skip  [ESC] Menu ",
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(footer, app_layout.footer);
}

fn render_stats(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let centered = ui::layout::centered_rect(70, 80, area);
    let panel = StatsPanel::new(&app.deck_sizes, &app.progress, &app.profile, app.theme);
    frame.render_widget(panel, centered);
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(60, 70, area);

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields: Vec<(String, String)> = vec![
        ("Theme".to_string(), app.config.theme.clone()),
        ("Selection policy".to_string(), app.config.policy.clone()),
        ("Default deck".to_string(), app.config.deck.clone()),
    ];

    let layout = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "  Use arrows to navigate, Enter/Right to change, ESC to save & exit",
        Style::default().fg(colors.text_dim()),
    )));
    header.render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints(fields.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_text = format!("{indicator}{label}:");
        let value_text = format!("  < {value} >");

        let label_style = Style::default()
            .fg(if is_selected { colors.accent() } else { colors.fg() })
            .add_modifier(if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });

        let value_style = Style::default().fg(if is_selected {
            colors.fg()
        } else {
            colors.text_dim()
        });

        let lines = vec![
            Line::from(Span::styled(label_text, label_style)),
            Line::from(Span::styled(value_text, value_style)),
        ];
        Paragraph::new(lines).render(field_layout[i], frame.buffer_mut());
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        "  [ESC] Save & back  [Enter/arrows] Change value",
        Style::default().fg(colors.accent()),
    )));
    footer.render(layout[3], frame.buffer_mut());
}
