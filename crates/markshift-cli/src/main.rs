mod input;
mod view;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use input::Action;
use markshift_config::Config;
use markshift_engine::{EditorSession, FileStore, HandleOutcome};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    env,
    fs::{self, File},
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
};

struct App {
    session: EditorSession<FileStore>,
    last_outcome: Option<HandleOutcome>,
    status: Option<String>,
}

impl App {
    fn new(config: &Config) -> Result<Self> {
        let store = FileStore::new(&config.storage_path);
        let session = EditorSession::open(store, config.session_options()?);
        Ok(Self {
            session,
            last_outcome: None,
            status: None,
        })
    }

    fn edit(&mut self, key: &markshift_engine::KeyEvent) {
        self.last_outcome = Some(self.session.handle_key(key));
        self.status = None;
    }

    fn save(&mut self) {
        self.status = Some(match self.session.save() {
            Ok(()) => "Saved".to_string(),
            Err(e) => {
                log::error!("Save failed: {e}");
                format!("Save failed: {e}")
            }
        });
    }
}

fn main() -> Result<()> {
    // Determine storage directory from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let mut config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", config_path.display());
            process::exit(1);
        }
    };

    match args.len() {
        1 => {}
        2 => config.storage_path = PathBuf::from(&args[1]),
        _ => {
            eprintln!("Usage: {} [storage-dir]", args[0]);
            process::exit(1);
        }
    }

    init_logging(&config.storage_path)?;
    log::info!(
        "markshift starting up, storing in {}",
        config.storage_path.display()
    );

    let mut app = App::new(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// The terminal belongs to the editor, so logs go to a file next to the documents
fn init_logging(storage_path: &Path) -> Result<()> {
    fs::create_dir_all(storage_path)?;
    let log_file = File::create(storage_path.join("markshift.log"))?;
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match input::action_for(&key) {
                Action::Quit => return Ok(()),
                Action::Save => app.save(),
                Action::Edit(key) => app.edit(&key),
                Action::Ignore => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let state = app.session.state();
    let editor = Paragraph::new(view::document_lines(state.content()))
        .block(Block::default().borders(Borders::ALL).title("markshift"));
    f.render_widget(editor, chunks[0]);

    // Inside the border
    let (column, row) = view::caret_position(state);
    f.set_cursor_position(Position::new(
        chunks[0].x.saturating_add(1).saturating_add(column),
        chunks[0].y.saturating_add(1).saturating_add(row),
    ));

    let save_state = match &app.status {
        Some(status) => status.clone(),
        None if app.session.is_autosave_suspended() => {
            "Stored copy unreadable, Ctrl-S to overwrite".to_string()
        }
        None if app.session.is_dirty() => "Ctrl-S: Save".to_string(),
        None => "Saved".to_string(),
    };
    let last_key = app.last_outcome.map_or("-", |outcome| outcome.as_str());
    let help = Line::from(vec![
        Span::styled(save_state, Style::default().fg(Color::Green)),
        Span::raw(format!(" | last key: {last_key}")),
        Span::raw(" | # * ** *** then space to format | Esc/Ctrl-Q: Quit"),
    ]);
    f.render_widget(Paragraph::new(help), chunks[1]);
}
