mod app;
mod audio;
mod config;
mod engine;
mod error;
mod event;
mod keyboard;
mod platform;
mod session;
mod store;
mod timer;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use app::{App, AppScreen, NotificationLevel, Services};
use config::Config;
use engine::lesson::LESSONS;
use event::{AppEvent, EventHandler, keyboard_enhancement_flags};
use keyboard::display::{is_modifier_event, key_event_name, key_press_name};
use store::json_store::JsonStore;
use ui::components::emoji_picker::EmojiPickerView;
use ui::components::keyboard_view::KeyboardView;
use ui::components::lesson_menu::LessonMenu;
use ui::components::output_area::OutputArea;
use ui::components::prediction_bar::PredictionBar;
use ui::components::quiz_panel::QuizPanel;
use ui::layout::pack_hint_lines;
use ui::line_input::InputResult;

const FOOTER_HINTS: &[&str] = &[
    "[F1] Help",
    "[F2] Theme",
    "[F3] Sound",
    "[F4] Predict",
    "[F5] Quiz",
    "[F6] Lessons",
    "[F7] Emoji",
    "[F8] Voice",
    "[F9] Copy",
    "[F10] Clear",
    "[Ctrl+Q] Quit",
];

const HELP_LINES: &[(&str, &str)] = &[
    ("Type / click", "Enter text with the keyboard or the mouse"),
    ("Alt+1..3", "Accept a word prediction"),
    ("F2", "Cycle theme"),
    ("F3", "Toggle key sounds"),
    ("F4", "Toggle word predictions"),
    ("F5", "Typing quiz"),
    ("F6", "Lessons"),
    ("F7", "Emoji picker"),
    ("F8", "Start or stop voice capture"),
    ("F9", "Copy text to the clipboard"),
    ("F10", "Clear text and lesson"),
    ("Ctrl+Q", "Quit"),
];

#[derive(Parser)]
#[command(name = "vkbd", version, about = "On-screen virtual keyboard for the terminal")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Start with key sounds off")]
    mute: bool,

    #[arg(long, help = "Start with word predictions off")]
    no_predictions: bool,

    #[arg(short, long, help = "Path to config.toml")]
    config: Option<PathBuf>,

    #[arg(long, help = "Write logs to this file")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.clone());

    let config = Config::load(cli.config.as_deref())?;
    let services = Services::system(&config);
    let mut settings = services
        .store
        .as_ref()
        .map(JsonStore::load_settings)
        .unwrap_or_default();
    if let Some(theme) = cli.theme {
        settings.theme = theme;
    }
    if cli.mute {
        settings.sound_enabled = false;
    }
    if cli.no_predictions {
        settings.predictions_enabled = false;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Release events un-highlight physical keys; bare modifier presses need
    // all keys reported as escape codes.
    let keyboard_enhanced = crossterm::terminal::supports_keyboard_enhancement()
        .unwrap_or(false)
        && execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(keyboard_enhancement_flags())
        )
        .is_ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let frame_size = Rect::new(0, 0, size.width, size.height);
    let mut app = App::new(config, settings, services, frame_size, pixel_width());

    let events = EventHandler::new(Duration::from_millis(100));
    let result = run_app(&mut terminal, &mut app, &events);

    if keyboard_enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        log::error!("{err:?}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn init_logging(path: Option<PathBuf>) {
    let Some(path) = path.or_else(|| dirs::data_dir().map(|d| d.join("vkbd").join("vkbd.log")))
    else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!("could not open log file {}: {e}", path.display()),
    }
}

/// Terminal width in pixels, or 0 when the terminal does not report it.
fn pixel_width() -> u16 {
    crossterm::terminal::window_size()
        .map(|size| size.width)
        .unwrap_or(0)
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
            AppEvent::Tick => app.on_tick(Instant::now()),
            AppEvent::Resize(columns, rows) => app.on_resize(columns, rows, pixel_width()),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        if let Some(name) = key_event_name(&key) {
            app.key_up(&name);
        }
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::F(1) => {
            app.open_help();
            return;
        }
        KeyCode::F(2) => {
            app.cycle_theme();
            return;
        }
        KeyCode::F(3) => {
            app.toggle_sound();
            return;
        }
        KeyCode::F(4) => {
            app.toggle_predictions();
            return;
        }
        KeyCode::F(5) => {
            app.open_quiz();
            return;
        }
        KeyCode::F(6) => {
            app.open_lessons();
            return;
        }
        KeyCode::F(7) => {
            app.open_emoji();
            return;
        }
        KeyCode::F(8) => {
            app.toggle_voice();
            return;
        }
        KeyCode::F(9) => {
            app.copy_to_clipboard();
            return;
        }
        KeyCode::F(10) => {
            app.clear();
            return;
        }
        _ => {}
    }

    if app.screen != AppScreen::Keyboard && is_modifier_event(&key) {
        return;
    }

    match app.screen {
        AppScreen::Keyboard => handle_keyboard_key(app, key),
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::Lessons => handle_lessons_key(app, key),
        AppScreen::Emoji => handle_emoji_key(app, key),
        AppScreen::Help => app.screen = AppScreen::Keyboard,
    }
}

fn handle_keyboard_key(app: &mut App, key: KeyEvent) {
    // Bare Shift/Ctrl/Alt carry their own modifier bit.
    if is_modifier_event(&key) {
        if let Some(name) = key_press_name(&key) {
            app.key_down(&name);
        }
        return;
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        if let KeyCode::Char(ch @ '1'..='3') = key.code {
            let index = ch as usize - '1' as usize;
            app.accept_prediction(index);
        }
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return;
    }
    if let Some(name) = key_press_name(&key) {
        app.key_down(&name);
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    let finished = app.quiz.as_ref().is_none_or(|q| q.is_finished());
    if finished {
        match key.code {
            KeyCode::Char('r') => app.restart_quiz(),
            KeyCode::Esc => app.close_quiz(),
            _ => {}
        }
        return;
    }
    // Input is frozen while the answer feedback is showing.
    if app.quiz_advance_pending() {
        if key.code == KeyCode::Esc {
            app.close_quiz();
        }
        return;
    }
    match app.quiz_input.handle(key) {
        InputResult::Submit => {
            app.submit_quiz_answer();
        }
        InputResult::Cancel => app.close_quiz(),
        InputResult::Continue => {}
    }
}

fn handle_lessons_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.screen = AppScreen::Keyboard,
        KeyCode::Up | KeyCode::Char('k') => app.lesson_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.lesson_next(),
        KeyCode::Enter => app.start_lesson(app.lesson_selected),
        KeyCode::Char(ch @ '1'..='9') => {
            let index = ch as usize - '1' as usize;
            if index < LESSONS.len() {
                app.start_lesson(index);
            }
        }
        _ => {}
    }
}

fn handle_emoji_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.screen = AppScreen::Keyboard,
        KeyCode::Left => app.emoji.prev(),
        KeyCode::Right => app.emoji.next(),
        KeyCode::Up => app.emoji.up(),
        KeyCode::Down => app.emoji.down(),
        KeyCode::Enter => app.insert_selected_emoji(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.click(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.mouse_up(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    render_keyboard_screen(frame, app);

    match app.screen {
        AppScreen::Keyboard => {}
        AppScreen::Quiz => render_quiz(frame, app),
        AppScreen::Lessons => {
            let menu = LessonMenu::new(LESSONS, app.lesson_selected, &app.theme);
            frame.render_widget(menu, app.popup_area());
        }
        AppScreen::Emoji => {
            let picker = EmojiPickerView::new(&app.emoji, &app.theme);
            frame.render_widget(picker, app.popup_area());
        }
        AppScreen::Help => render_help(frame, app),
    }
}

fn render_keyboard_screen(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = app.layout();
    let header_style = Style::default().fg(colors.header_fg()).bg(colors.header_bg());

    let mut status = vec![Span::styled(
        " vkbd ",
        header_style.add_modifier(Modifier::BOLD),
    )];
    let modifiers = app.keyboard.modifiers;
    if modifiers.caps_lock {
        status.push(Span::styled(" CAPS ", Style::default().fg(colors.bg()).bg(colors.accent())));
    }
    if modifiers.shift_active {
        status.push(Span::styled(" SHIFT ", Style::default().fg(colors.bg()).bg(colors.accent())));
    }
    if app.is_listening() {
        status.push(Span::styled(
            " \u{25cf} REC ",
            Style::default().fg(colors.error()).bg(colors.header_bg()),
        ));
    }
    let sound = if app.settings.sound_enabled { "on" } else { "off" };
    let mut info = format!(" | {} | sound {sound}", app.theme.name);
    if let Some(lesson) = app.current_lesson() {
        info.push_str(&format!(" | lesson: {}", lesson.title));
    }
    status.push(Span::styled(info, header_style));
    let header = Paragraph::new(Line::from(status)).style(header_style);
    frame.render_widget(header, layout.header);

    let output = OutputArea::new(&app.keyboard.buffer, " Output ", &app.theme);
    frame.render_widget(output, layout.output);

    let predictions = PredictionBar::new(
        app.keyboard.predictions(),
        app.keyboard.predictions_enabled(),
        &app.theme,
    );
    frame.render_widget(predictions, layout.predictions);

    let mut keyboard = KeyboardView::new(&app.keyboard.grid, modifiers, &app.theme);
    if let Some(lesson) = app.current_lesson() {
        keyboard = keyboard.focus(lesson.key_names());
    }
    frame.render_widget(keyboard, layout.keyboard);

    let footer = match app.notification() {
        Some(note) => {
            let color = match note.level {
                NotificationLevel::Info => colors.accent(),
                NotificationLevel::Success => colors.success(),
                NotificationLevel::Warning => colors.warning(),
                NotificationLevel::Error => colors.error(),
            };
            Line::from(Span::styled(
                format!(" {}", note.message),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        }
        None => {
            let hints = pack_hint_lines(FOOTER_HINTS, layout.footer.width as usize);
            Line::from(Span::styled(
                hints.into_iter().next().unwrap_or_default(),
                Style::default().fg(colors.placeholder()),
            ))
        }
    };
    frame.render_widget(Paragraph::new(footer), layout.footer);
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App) {
    if let Some(quiz) = &app.quiz {
        let panel = QuizPanel::new(quiz, &app.quiz_input, &app.theme);
        frame.render_widget(panel, app.popup_area());
    }
}

fn render_help(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let area = app.popup_area();
    frame.render_widget(Clear, area);

    let key_width = HELP_LINES.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(
                    format!(" {key:<key_width$}  "),
                    Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
                ),
                Span::styled(*what, Style::default().fg(colors.fg())),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(colors.placeholder()),
    )));

    let help = Paragraph::new(lines).alignment(Alignment::Left).block(
        Block::bordered()
            .title(" Help ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg())),
    );
    frame.render_widget(help, area);
}
