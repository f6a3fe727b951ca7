use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dishwasher_savings::{
    export::{self, CSV_FILENAME, JSON_FILENAME},
    info::{BENEFITS, CONTACT},
    AgeBracket, Error, Field, SavingsCalculator, Settings,
};
use log::{error, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Dishwasher energy savings calculator")]
struct Args {
    /// JSON settings file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Keep at most this many history entries
    #[arg(long = "history-limit")]
    history_limit: Option<usize>,

    /// Clear a field's warning as soon as it is edited
    #[arg(long = "clear-errors-on-edit")]
    clear_errors_on_edit: bool,

    /// Directory for exported history files
    #[arg(short = 'o', long = "export-dir")]
    export_dir: Option<PathBuf>,

    /// Write logs here (RUST_LOG sets the level)
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Popup {
    About,
    Contact,
}

#[derive(Debug, Clone, Copy)]
enum ExportFormat {
    Csv,
    Json,
}

struct App {
    calc: SavingsCalculator,
    focus: Field,
    history_state: ListState,
    popup: Option<Popup>,
    status: Option<String>,
    export_dir: PathBuf,
}

impl App {
    fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            calc: SavingsCalculator::from_settings(settings)?,
            focus: Field::AgeBracket,
            history_state: ListState::default(),
            popup: None,
            status: None,
            export_dir: settings.export_dir.clone(),
        })
    }

    fn submit(&mut self) {
        match self.calc.submit() {
            Ok(result) => {
                self.status = Some(format!(
                    "Saved ${} a year ({})",
                    result.yearly_savings_text(),
                    result.age()
                ));
                self.history_state.select(Some(0));
                self.focus = Field::AgeBracket;
            }
            Err(Error::InvalidInput { errors }) => {
                if let Some(first) = errors.fields().next() {
                    self.focus = first;
                }
                self.status = Some("Fix the highlighted fields".to_string());
            }
            Err(e) => {
                error!("calculation failed: {}", e);
                self.status = Some(format!("Error: {}", e));
            }
        }
    }

    fn remove_selected(&mut self) {
        let Some(index) = self.history_state.selected() else {
            return;
        };
        if self.calc.remove_entry(index).is_some() {
            self.status = Some("Entry removed".to_string());
        }
        let len = self.calc.history().len();
        if len == 0 {
            self.history_state.select(None);
        } else {
            self.history_state.select(Some(index.min(len - 1)));
        }
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.calc.history().len();
        if len == 0 {
            return;
        }
        let current = self.history_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1).min(len - 1)
        } else {
            current.saturating_sub(1)
        };
        self.history_state.select(Some(next));
    }

    fn export(&mut self, format: ExportFormat) {
        let (filename, outcome) = match format {
            ExportFormat::Csv => {
                let path = self.export_dir.join(CSV_FILENAME);
                (path.clone(), export::write_csv(&path, self.calc.history()))
            }
            ExportFormat::Json => {
                let path = self.export_dir.join(JSON_FILENAME);
                (path.clone(), export::write_json(&path, self.calc.history()))
            }
        };
        self.status = Some(match outcome {
            Ok(()) => format!("Exported to {}", filename.display()),
            Err(e) => {
                error!("export to {} failed: {}", filename.display(), e);
                format!("Error exporting: {}", e)
            }
        });
    }
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    if let Some(path) = path {
        let file = File::create(path)?;
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }
    Ok(())
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = Settings::load_or_default(args.config.as_deref())?;
    if let Some(limit) = args.history_limit {
        settings.history_limit = Some(limit);
    }
    if args.clear_errors_on_edit {
        settings.clear_errors_on_edit = true;
    }
    if let Some(dir) = &args.export_dir {
        settings.export_dir = dir.clone();
    }
    settings.check()?;
    Ok(settings)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    let settings = load_settings(&args)?;
    info!("starting with {:?}", settings);
    let app = App::new(&settings)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, &mut app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let quit = match app.popup {
                Some(_) => handle_popup_input(&mut app, key),
                None => handle_form_input(&mut app, key),
            };
            if quit {
                info!("exiting with {} history entries", app.calc.history().len());
                return Ok(());
            }
        }
    }
}

fn handle_popup_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.popup = None,
        KeyCode::Char('a') => app.popup = Some(Popup::About),
        KeyCode::Char('c') => app.popup = Some(Popup::Contact),
        _ => {}
    }
    false
}

fn handle_form_input(app: &mut App, key: KeyEvent) -> bool {
    let focus = app.focus;
    match key.code {
        KeyCode::Char(c) if focus.is_numeric() && (c.is_ascii_digit() || c == '.') => {
            app.calc.push_char(focus, c);
        }
        KeyCode::Backspace => {
            if focus.is_numeric() {
                app.calc.pop_char(focus);
            } else {
                app.calc.select_age(None);
            }
        }
        KeyCode::Left if focus == Field::AgeBracket => {
            let current = app.calc.fields().age_bracket;
            app.calc.select_age(Some(AgeBracket::cycle_previous(current)));
        }
        KeyCode::Right if focus == Field::AgeBracket => {
            let current = app.calc.fields().age_bracket;
            app.calc.select_age(Some(AgeBracket::cycle_next(current)));
        }
        KeyCode::Down | KeyCode::Tab => app.focus = focus.next(),
        KeyCode::Up | KeyCode::BackTab => app.focus = focus.previous(),
        KeyCode::Enter => app.submit(),
        KeyCode::Char(']') => app.move_selection(true),
        KeyCode::Char('[') => app.move_selection(false),
        KeyCode::Char('x') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Char('C') => {
            app.calc.clear_history();
            app.history_state.select(None);
            app.status = Some("History cleared".to_string());
        }
        KeyCode::Char('e') => app.export(ExportFormat::Csv),
        KeyCode::Char('J') => app.export(ExportFormat::Json),
        KeyCode::Char('a') => app.popup = Some(Popup::About),
        KeyCode::Char('c') => app.popup = Some(Popup::Contact),
        KeyCode::Esc | KeyCode::Char('q') => return true,
        _ => {}
    }
    false
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title = Paragraph::new("⚡ Energy Savings Calculator ⚡")
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(chunks[1]);

    render_form(f, app, body[0]);
    render_history(f, app, body[1]);

    let help = Paragraph::new(
        "↑/↓: field | ←/→: age | Enter: calculate | [/]: select | x: remove | C: clear | e/J: export CSV/JSON | a: about | c: contact | q: quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::TOP));
    f.render_widget(help, chunks[2]);

    match app.popup {
        Some(Popup::About) => render_about_popup(f),
        Some(Popup::Contact) => render_contact_popup(f),
        None => {}
    }
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let mut constraints = vec![Constraint::Length(3); Field::ALL.len()];
    constraints.push(Constraint::Min(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in Field::ALL.iter().enumerate() {
        let error = app.calc.errors().get(*field);
        let focused = app.focus == *field;
        let value = app.calc.fields().get(*field);

        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else if error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };

        let text = match (value.is_empty(), error) {
            (true, Some(message)) => Line::from(Span::styled(
                format!("⚠ {}", message),
                Style::default().fg(Color::Red),
            )),
            (false, Some(message)) => Line::from(vec![
                Span::styled(value.to_string(), Style::default().fg(Color::Yellow)),
                Span::styled(format!("  ⚠ {}", message), Style::default().fg(Color::Red)),
            ]),
            (true, None) if *field == Field::AgeBracket => Line::from(Span::styled(
                "Select age (←/→)",
                Style::default().fg(Color::DarkGray),
            )),
            _ if *field == Field::AgeBracket => Line::from(Span::styled(
                format!("◀ {} ▶", value),
                Style::default().fg(Color::Yellow),
            )),
            _ => Line::from(Span::styled(value.to_string(), Style::default().fg(Color::Yellow))),
        };

        let input = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(field.label()),
        );
        f.render_widget(input, rows[i]);
    }

    if let Some(status) = &app.status {
        let status = Paragraph::new(status.as_str())
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(status, rows[Field::ALL.len()]);
    }
}

fn render_history(f: &mut Frame, app: &mut App, area: Rect) {
    let history = app.calc.history();
    if !app.calc.history_visible() || history.is_empty() {
        let placeholder = Paragraph::new("Your calculation history will appear here")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = history
        .entries()
        .iter()
        .map(|entry| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    format!("Dishwasher Age: {}", entry.age()),
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(vec![
                    Span::raw("Old Cost: "),
                    Span::styled(
                        format!("${}", entry.old_yearly_cost_text()),
                        Style::default().fg(Color::Red),
                    ),
                ]),
                Line::from(vec![
                    Span::raw("New Cost: "),
                    Span::styled(
                        format!("${}", entry.new_yearly_cost_text()),
                        Style::default().fg(Color::Green),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("Savings: ${}", entry.yearly_savings_text()),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ])
        })
        .collect();

    let title = format!(
        "Calculation History ({}) - total ${:.2}/yr",
        history.len(),
        history.total_savings()
    );
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, &mut app.history_state);
}

fn render_about_popup(f: &mut Frame) {
    let mut text = Vec::new();
    for benefit in BENEFITS.iter() {
        text.push(Line::from(Span::styled(
            benefit.title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        text.push(Line::from(Span::styled(
            benefit.description,
            Style::default().fg(Color::Gray),
        )));
        text.push(Line::from(""));
    }
    render_popup(f, "Why Dishwashers?", text);
}

fn render_contact_popup(f: &mut Frame) {
    let mut text = Vec::new();
    for contact in CONTACT.iter() {
        text.push(Line::from(Span::styled(
            contact.heading,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        for line in contact.lines {
            text.push(Line::from(Span::styled(*line, Style::default().fg(Color::Gray))));
        }
        text.push(Line::from(""));
    }
    render_popup(f, "Contact Us", text);
}

fn render_popup(f: &mut Frame, title: &str, text: Vec<Line>) {
    let area = centered_rect(60, 60, f.size());
    f.render_widget(Clear, area);

    let popup = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(vertical[1])[1]
}
