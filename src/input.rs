use anyhow::{Context, Result};
use ratatui::crossterm::event::{self, KeyCode, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, AppMode};
use crate::constants::constants;

// --- Helpers ---

/// Convert a char index to a byte offset within the string.
pub fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
  s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

// --- Event Handling ---

pub async fn handle_key_event(app: &mut App, key: event::KeyEvent) -> Result<()> {
  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
    app.should_quit = true;
    return Ok(());
  }

  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('t') {
    app.next_theme();
    return Ok(());
  }

  match app.mode {
    AppMode::Feed => handle_feed_key(app, key).await.context("Failed to handle feed key event")?,
    AppMode::Upload => handle_upload_key(app, key),
  }
  Ok(())
}

/// Wheel scrolling moves the virtual offset a few rows at a time; the
/// controller decides when the active item actually flips.
pub async fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
  if app.mode != AppMode::Feed {
    return;
  }
  let step = constants().wheel_step_rows as i64;
  match mouse.kind {
    MouseEventKind::ScrollDown => app.scroll_by(step).await,
    MouseEventKind::ScrollUp => app.scroll_by(-step).await,
    _ => {}
  }
}

async fn handle_feed_key(app: &mut App, key: event::KeyEvent) -> Result<()> {
  match key.code {
    KeyCode::Down | KeyCode::Char('j') => {
      app.snap_step(true).await;
    }
    KeyCode::Up | KeyCode::Char('k') => {
      app.snap_step(false).await;
    }
    KeyCode::Char('l') => {
      app.toggle_like_active();
    }
    KeyCode::Char('m') => {
      app.toggle_mute_active().await;
    }
    KeyCode::Char('u') => {
      app.open_upload();
    }
    KeyCode::Char('q') | KeyCode::Esc => {
      app.should_quit = true;
    }
    _ => {}
  }
  Ok(())
}

fn handle_upload_key(app: &mut App, key: event::KeyEvent) {
  match key.code {
    KeyCode::Enter => {
      app.submit_upload();
    }
    KeyCode::Char(c) => {
      let byte_idx = char_to_byte_index(&app.upload_input, app.upload_cursor);
      app.upload_input.insert(byte_idx, c);
      app.upload_cursor += 1;
    }
    KeyCode::Backspace => {
      if app.upload_cursor > 0 {
        app.upload_cursor -= 1;
        let byte_idx = char_to_byte_index(&app.upload_input, app.upload_cursor);
        app.upload_input.remove(byte_idx);
      }
    }
    KeyCode::Delete => {
      if app.upload_cursor < app.upload_input.chars().count() {
        let byte_idx = char_to_byte_index(&app.upload_input, app.upload_cursor);
        app.upload_input.remove(byte_idx);
      }
    }
    KeyCode::Left => {
      app.upload_cursor = app.upload_cursor.saturating_sub(1);
    }
    KeyCode::Right => {
      if app.upload_cursor < app.upload_input.chars().count() {
        app.upload_cursor += 1;
      }
    }
    KeyCode::Home => {
      app.upload_cursor = 0;
    }
    KeyCode::End => {
      app.upload_cursor = app.upload_input.chars().count();
    }
    KeyCode::Esc => {
      app.close_upload();
    }
    _ => {}
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // --- char_to_byte_index ---

  #[test]
  fn char_to_byte_ascii() {
    assert_eq!(char_to_byte_index("hello", 0), 0);
    assert_eq!(char_to_byte_index("hello", 3), 3);
    assert_eq!(char_to_byte_index("hello", 5), 5); // past end
  }

  #[test]
  fn char_to_byte_multibyte() {
    let s = "aé日"; // a=1 byte, é=2 bytes, 日=3 bytes
    assert_eq!(char_to_byte_index(s, 0), 0); // 'a'
    assert_eq!(char_to_byte_index(s, 1), 1); // 'é' starts at byte 1
    assert_eq!(char_to_byte_index(s, 2), 3); // '日' starts at byte 3
    assert_eq!(char_to_byte_index(s, 3), 6); // past end
  }

  #[test]
  fn char_to_byte_empty() {
    assert_eq!(char_to_byte_index("", 0), 0);
    assert_eq!(char_to_byte_index("", 5), 0);
  }

  // --- Upload prompt editing ---

  use ratatui::crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};

  fn press(code: KeyCode) -> KeyEvent {
    KeyEvent { code, modifiers: KeyModifiers::NONE, kind: KeyEventKind::Press, state: KeyEventState::NONE }
  }

  fn upload_app() -> App {
    let mut app = App::new(Vec::new(), false);
    app.open_upload();
    app
  }

  #[test]
  fn upload_prompt_inserts_at_cursor() {
    let mut app = upload_app();
    for c in "a.mp4".chars() {
      handle_upload_key(&mut app, press(KeyCode::Char(c)));
    }
    assert_eq!(app.upload_input, "a.mp4");
    handle_upload_key(&mut app, press(KeyCode::Home));
    handle_upload_key(&mut app, press(KeyCode::Char('x')));
    assert_eq!(app.upload_input, "xa.mp4");
    assert_eq!(app.upload_cursor, 1);
  }

  #[test]
  fn upload_prompt_backspace_and_escape() {
    let mut app = upload_app();
    handle_upload_key(&mut app, press(KeyCode::Char('a')));
    handle_upload_key(&mut app, press(KeyCode::Backspace));
    assert_eq!(app.upload_input, "");
    handle_upload_key(&mut app, press(KeyCode::Esc));
    assert_eq!(app.mode, AppMode::Feed);
  }
}
