pub mod config;
pub mod layout;
pub mod passages;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod ui;

use crate::config::{Config, ConfigStore, FileConfigStore};
use crate::runtime::{decode_key, AppEvent, CrosstermEventSource, FixedTicker, Runner, Ticker};
use crate::session::{Session, Status};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// chaotic typing tui where the keyboard scrambles after every keystroke
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing speed test with a twist: the on-screen keyboard layout reshuffles after every keystroke, so you have to find each letter's new position before you can type it."
)]
pub struct Cli {
    /// passage index from the built-in bank (wraps around)
    #[clap(short = 'p', long)]
    passage: Option<usize>,

    /// custom text to type instead of a built-in passage
    #[clap(short = 't', long)]
    text: Option<String>,

    /// print the built-in passages and exit
    #[clap(long)]
    list_passages: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Typing,
    Results,
}

#[derive(Debug)]
pub struct App {
    pub cli: Option<Cli>,
    pub session: Session,
    pub state: AppState,
    pub passage: Option<usize>,
}

impl App {
    pub fn new(cli: Cli, cfg: &Config) -> Self {
        let (text, passage) = resolve_text(&cli, cfg);
        Self {
            session: Session::new(&text),
            cli: Some(cli),
            state: AppState::Typing,
            passage,
        }
    }

    /// Constructor for tests: a fixed text, no CLI, no config.
    pub fn with_text(text: &str) -> Self {
        Self {
            cli: None,
            session: Session::new(text),
            state: AppState::Typing,
            passage: None,
        }
    }

    /// Same text from Idle again.
    pub fn restart(&mut self) {
        self.session.reset();
        self.state = AppState::Typing;
    }

    /// Fresh random passage; a custom text is kept and just restarted.
    pub fn new_passage(&mut self) {
        let has_custom_text = self
            .cli
            .as_ref()
            .map(|cli| cli.text.is_some())
            .unwrap_or(false);

        if has_custom_text {
            self.session.reset();
        } else {
            let index = passages::random_index();
            self.session = Session::new(passages::by_index(index));
            self.passage = Some(index);
        }
        self.state = AppState::Typing;
    }
}

/// Target text resolution order: CLI text, CLI passage flag, remembered
/// passage from config, random draw.
fn resolve_text(cli: &Cli, cfg: &Config) -> (String, Option<usize>) {
    if let Some(text) = &cli.text {
        return (text.clone(), None);
    }
    let index = cli.passage.or(cfg.passage).unwrap_or_else(passages::random_index);
    let index = index % passages::PASSAGES.len();
    (passages::by_index(index).to_string(), Some(index))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.list_passages {
        for (index, passage) in passages::PASSAGES.iter().enumerate() {
            println!("{}: {}", index, passage);
        }
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let mut cfg = store.load();

    let mut app = App::new(cli, &cfg);
    if app.passage.is_some() {
        cfg.passage = app.passage;
        let _ = store.save(&cfg);
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    start_tui(&mut terminal, &mut app)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

#[derive(Debug)]
enum ExitType {
    Restart,
    New,
    Quit,
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    run_loop(terminal, app, &runner)
}

fn run_loop<B: Backend, E: runtime::AppEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        let mut exit_type = ExitType::Quit;
        terminal.draw(|f| ui(app, f))?;

        loop {
            match runner.step() {
                AppEvent::Tick => {
                    if app.session.status() == Status::Active {
                        app.session.on_tick();
                        terminal.draw(|f| ui(app, f))?;
                    }
                }
                AppEvent::Resize => {
                    terminal.draw(|f| ui(app, f))?;
                }
                AppEvent::Key(key) => {
                    if key.code == KeyCode::Esc {
                        break;
                    }
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }

                    match app.state {
                        AppState::Typing => {
                            app.session.handle(decode_key(&key));
                            if app.session.has_finished() {
                                app.state = AppState::Results;
                            }
                        }
                        AppState::Results => match key.code {
                            KeyCode::Char('r') => {
                                exit_type = ExitType::Restart;
                                break;
                            }
                            KeyCode::Char('n') => {
                                exit_type = ExitType::New;
                                break;
                            }
                            _ => {}
                        },
                    }
                    terminal.draw(|f| ui(app, f))?;
                }
            }
        }

        match exit_type {
            ExitType::Restart => {
                app.restart();
            }
            ExitType::New => {
                app.new_passage();
            }
            ExitType::Quit => {
                break;
            }
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}
