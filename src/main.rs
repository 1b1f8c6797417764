use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use keeblab::{
    app_dirs::AppDirs,
    celebration::ParticleField,
    config::{FilePreferencesStore, Theme, UiStyle},
    error::AppError,
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    App, Corpus, Session, SessionConfig,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, File},
    io::{self, stdin},
    sync::Mutex,
    time::Instant,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter; logging is off when unset
const LOG_ENV: &str = "KEEBLAB_LOG";

/// typing speed practice with live wpm, accuracy and streaks
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type paragraphs against the clock. Words per minute count whitespace separated words, accuracy compares your text to the paragraph character by character, and finishing a paragraph rolls straight into the next one."
)]
pub struct Cli {
    /// custom paragraph to practise; repeat to build your own corpus
    #[clap(short = 'p', long = "prompt")]
    prompts: Vec<String>,

    /// colour theme, saved for next time
    #[clap(short = 't', long, value_enum)]
    theme: Option<Theme>,

    /// ui style, saved for next time
    #[clap(long, value_enum)]
    style: Option<UiStyle>,

    /// seed for paragraph and particle selection
    #[clap(long)]
    seed: Option<u64>,
}

impl Cli {
    fn corpus(&self) -> Corpus {
        if self.prompts.is_empty() {
            Corpus::builtin()
        } else {
            Corpus::new(self.prompts.iter().cloned())
        }
    }

    fn build_app(&self) -> App {
        let corpus = self.corpus();
        let config = SessionConfig::default();
        let (session, particles) = match self.seed {
            Some(seed) => (
                Session::with_seed(corpus, config, seed),
                ParticleField::with_seed(seed),
            ),
            None => (Session::new(corpus, config), ParticleField::new()),
        };

        let mut app = App::new(session, particles, Box::new(FilePreferencesStore::new()));
        app.override_preferences(self.theme, self.style);
        app
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging()?;

    let mut app = cli.build_app();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let result = run_app(&mut terminal, &mut app, &mut runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    info!("bye");
    Ok(())
}

/// Log to a file in the state directory when `KEEBLAB_LOG` is set.
/// The terminal is in raw mode, so nothing may go to stdout or stderr.
fn init_logging() -> Result<(), AppError> {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return Ok(());
    };
    let Some(path) = AppDirs::log_path() else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    info!("logging to {}", path.display());
    Ok(())
}

fn run_app<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
) -> Result<(), AppError> {
    info!("practice started");
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while !app.should_quit() {
        match runner.step() {
            AppEvent::Tick => app.on_tick(Instant::now()),
            AppEvent::Resize => {}
            AppEvent::Key(key) => app.on_key(key, Instant::now()),
        }
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}
