mod app;
mod catalog;
mod config;
mod constants;
mod feed;
mod input;
mod player;
mod theme;
mod ui;
mod upload;

use anyhow::Result;
use clap::Parser;
use directories::ProjectDirs;
use ratatui::{
  DefaultTerminal,
  crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
  },
};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use constants::constants;

// --- CLI ---

#[derive(Parser, Debug)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
struct Args {
  /// Number of mock videos in the initial feed (default from constants.ron)
  #[arg(short = 'n', long)]
  count: Option<usize>,

  /// Browse without spawning mpv (feed state still runs normally)
  #[arg(long)]
  no_playback: bool,
}

// --- Logging ---

/// Log to a file under the platform data dir — stderr belongs to the TUI.
/// Returns the guard keeping the non-blocking writer alive.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
  let proj_dirs = ProjectDirs::from("", "", "reel")?;
  let log_dir = proj_dirs.data_dir();
  std::fs::create_dir_all(log_dir).ok()?;

  let appender = tracing_appender::rolling::never(log_dir, "reel.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(writer)
    .with_ansi(false)
    .init();
  Some(guard)
}

// --- Main ---

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let _log_guard = init_logging();

  let default_hook = std::panic::take_hook();
  std::panic::set_hook(Box::new(move |info| {
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    default_hook(info);
  }));

  let mut terminal = ratatui::init();
  execute!(std::io::stdout(), EnableMouseCapture)?;
  let result = run(&mut terminal, args).await;
  let _ = execute!(std::io::stdout(), DisableMouseCapture);
  ratatui::restore();
  result
}

async fn run(terminal: &mut DefaultTerminal, args: Args) -> Result<()> {
  let count = args.count.unwrap_or(constants().feed_initial_size);
  let mut app = App::new(catalog::mock_feed(count), !args.no_playback);
  info!(count, playback = !args.no_playback, "reel started");

  loop {
    app.tick();

    // Header, status, and footer take one row each; the rest of the screen is
    // a single feed item, which is the scroll extent the resolver works in.
    let size = terminal.size()?;
    app.set_viewport_extent(size.height.saturating_sub(3) as u32).await;

    terminal.draw(|frame| ui::ui(frame, &mut app))?;

    if event::poll(Duration::from_millis(100))? {
      match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
          input::handle_key_event(&mut app, key).await?;
        }
        Event::Mouse(mouse) => {
          input::handle_mouse_event(&mut app, mouse).await;
        }
        _ => {}
      }
    }

    if app.should_quit {
      break;
    }
  }

  app.player.stop().await?;
  Ok(())
}
