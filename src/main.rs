use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use keyrush::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    cue::{self, CueNotifier},
    game::GameSessionController,
    input::{command_for, Command},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, GameEventSource, Runner, Ticker},
    sequence::RandomSequence,
    ui::{self, theme::Theme},
    KeyrushError,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};
use tracing::info;

/// reflex typing mini-game: type the letters before the clock runs out
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A reflex typing mini-game. A short random letter sequence appears; type it in order before the countdown ends. Every finished sequence scores a point, a wrong key ends the game."
)]
pub struct Cli {
    /// seconds on the clock for each game
    #[clap(short = 's', long)]
    secs: Option<u32>,

    /// letters per sequence
    #[clap(short = 'n', long)]
    length: Option<usize>,

    /// letters the sequences are drawn from, e.g. "asdfjkl"
    #[clap(short = 'a', long)]
    alphabet: Option<String>,

    /// classic rules: 10 seconds and only the letters A to D (--secs and --alphabet still apply)
    #[clap(long)]
    classic: bool,

    /// how the game is drawn
    #[clap(short = 't', long, value_enum)]
    theme: Option<Theme>,

    /// no terminal bell on hits and misses
    #[clap(long)]
    mute: bool,

    /// seed for a reproducible run of sequences
    #[clap(long)]
    seed: Option<u64>,

    /// store the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,

    /// write debug logs
    #[clap(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    /// Layer the command line over the stored config
    fn to_config(&self, base: Config) -> Config {
        let mut cfg = if self.classic {
            let classic = Config::classic();
            Config {
                budget_secs: classic.budget_secs,
                alphabet: classic.alphabet,
                ..base
            }
        } else {
            base
        };

        if let Some(secs) = self.secs {
            cfg.budget_secs = secs;
        }
        if let Some(length) = self.length {
            cfg.sequence_length = length;
        }
        if let Some(ref alphabet) = self.alphabet {
            cfg.alphabet = alphabet.clone();
        }
        if let Some(theme) = self.theme {
            cfg.theme = theme;
        }
        if self.mute {
            cfg.sound = false;
        }
        cfg
    }
}

#[derive(Debug)]
pub struct App {
    pub controller: GameSessionController<RandomSequence>,
    pub theme: Theme,
}

impl App {
    pub fn new(config: &Config, seed: Option<u64>) -> Result<Self, KeyrushError> {
        let settings = config.settings()?;
        let alphabet = config.alphabet()?;
        let source = match seed {
            Some(seed) => RandomSequence::seeded(alphabet, seed),
            None => RandomSequence::new(alphabet),
        };

        let mut controller = GameSessionController::new(settings, source);
        controller.subscribe(CueNotifier::new(cue::player_for(config.sound)));

        Ok(Self {
            controller,
            theme: config.theme,
        })
    }

    /// Apply a player command. Returns false once the player wants to leave.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Start => {
                self.controller.start();
            }
            Command::Letter(c) => {
                self.controller.handle_key(c);
            }
            Command::Quit => self.controller.quit(),
            Command::Exit => return false,
        }
        true
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    logging::init(AppDirs::log_path().as_deref(), cli.verbose)?;

    let store = FileConfigStore::new();
    let config = cli.to_config(store.load());
    let mut app = match App::new(&config, cli.seed) {
        Ok(app) => app,
        Err(err) => Cli::command()
            .error(ErrorKind::ValueValidation, err.to_string())
            .exit(),
    };

    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "saved config");
    }

    info!(
        budget = config.budget_secs,
        length = config.sequence_length,
        alphabet = %config.alphabet,
        theme = %config.theme,
        "starting keyrush"
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    // restore the terminal before reporting any loop error
    let outcome = start_tui(&mut terminal, &mut app, &mut runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(score = app.controller.snapshot().score(), "exiting");
    outcome
}

fn start_tui<B: Backend, E: GameEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app.controller.snapshot(), app.theme))?;
        runner.sync(app.controller.phase());

        match runner.step() {
            GameEvent::Tick => app.controller.tick(),
            GameEvent::Resize => {}
            GameEvent::Key(key) => {
                if let Some(command) = command_for(key, app.controller.phase()) {
                    if !app.apply(command) {
                        break;
                    }
                }
            }
            GameEvent::Closed => break,
        }
    }

    Ok(())
}
