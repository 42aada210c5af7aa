mod api;
mod app;
mod config;
mod country;
mod logging;
mod pagination;
mod ui;

use api::{CountrySource, FetchError, RestCountriesClient};
use app::{Action, App};
use clap::{ArgAction, Parser, Subcommand};
use config::{Overrides, Settings};
use country::{Country, CountryFilter};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use logging::LogTarget;
use ratatui::layout::Rect;
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::oneshot;

/// TUI explorer for the public country directory
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Settings file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Country list endpoint
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Countries per page
    #[arg(long, global = true)]
    page_size: Option<usize>,

    /// Log file used while the TUI is running
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "country_explorer=trace"
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the TUI explorer (default)
    Run,
    /// Print one page of the directory as text
    Print {
        /// Filter applied to the full list
        #[arg(short, long, value_enum)]
        filter: Option<CountryFilter>,
        /// Sort by name; repeat to alternate the direction
        #[arg(short, long, action = ArgAction::Count)]
        sort: u8,
        /// Page to print (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
}

type FetchResult = Result<Vec<Country>, FetchError>;
type AppResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = Overrides {
        endpoint: cli.endpoint,
        page_size: cli.page_size,
        log_level: cli.log_level,
    };
    let settings = match Settings::load(cli.config.as_deref(), overrides) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let client = RestCountriesClient::new(settings.endpoint.clone())?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Print { filter, sort, page } => {
            logging::init(LogTarget::Stderr, &settings.log_level);

            let mut app = App::new(settings.page_size);
            app.init(&client).await;
            if let Some(filter) = filter {
                app.filter(filter);
            }
            for _ in 0..sort {
                app.sort();
            }
            app.paginate(page);

            print_page(&app, &mut std::io::stdout().lock())?;
        }
        Commands::Run => {
            if let Some(path) = cli.log_file.or_else(config::default_log_path) {
                logging::init(LogTarget::File(&path), &settings.log_level);
            }

            let mut app = App::new(settings.page_size);

            // Fetch in the background so the first frame does not wait on the network
            let (tx, rx) = oneshot::channel();
            tokio::spawn(async move {
                let _ = tx.send(client.fetch_all().await);
            });

            let mut terminal = ratatui::init();
            let capture = crossterm::execute!(std::io::stdout(), EnableMouseCapture);

            let result = run_with_capture(capture, run_app(&mut terminal, &mut app, rx)).await;

            // Restore terminal
            let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
            ratatui::restore();

            if let Err(e) = result {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Run the UI only if mouse capture came up. Either way the caller gets a
/// result back and restores the terminal.
async fn run_with_capture(
    capture: std::io::Result<()>,
    run: impl std::future::Future<Output = AppResult>,
) -> AppResult {
    capture?;
    run.await
}

async fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    mut pending: oneshot::Receiver<FetchResult>,
) -> AppResult {
    let mut fetched = false;
    loop {
        if !fetched {
            match pending.try_recv() {
                Ok(result) => {
                    app.finish_fetch(result);
                    fetched = true;
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => {
                    tracing::error!("fetch task ended without a result");
                    app.loading = false;
                    app.status_msg.clear();
                    fetched = true;
                }
            }
        }

        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        app.update_viewport(ui::card_viewport(app, area));

        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 250ms timeout
        if event::poll(std::time::Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key);
                }
                Event::Mouse(mouse) => handle_mouse(app, mouse, area),
                // Resize is picked up by the relayout at the top of the loop
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Help toggle (global)
    if key.code == KeyCode::Char('?') {
        app.show_help = !app.show_help;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('s') => {
            app.dispatch(Action::Sort);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.next_page();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.prev_page();
        }
        KeyCode::Char('g') => {
            app.first_page();
        }
        KeyCode::Char('G') => {
            app.last_page();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_down();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_up();
        }
        KeyCode::PageDown => {
            app.scroll_page_down();
        }
        KeyCode::PageUp => {
            app.scroll_page_up();
        }
        KeyCode::Char(c) => {
            if let Some(filter) = CountryFilter::from_key(c) {
                app.dispatch(Action::Filter(filter));
            }
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent, area: Rect) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.show_help {
                app.show_help = false;
            } else if let Some(action) = ui::hit_test(app, area, mouse.column, mouse.row) {
                app.dispatch(action);
            }
        }
        MouseEventKind::ScrollDown => app.scroll_down(),
        MouseEventKind::ScrollUp => app.scroll_up(),
        _ => {}
    }
}

/// Write the current page as plain-text cards.
fn print_page(app: &App, out: &mut impl Write) -> std::io::Result<()> {
    for country in app.page_window() {
        writeln!(out, "Country Name: {}", country.name)?;
        writeln!(out, "Region: {}", country.region)?;
        writeln!(out, "Area Size: {}", country.area_label())?;
        writeln!(out)?;
    }
    Ok(())
}
