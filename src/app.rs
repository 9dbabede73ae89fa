use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::config::Config;
use crate::constants::constants;
use crate::feed::{ActiveChange, Feed, MediaRef, VideoItem};
use crate::player::Player;
use crate::theme::{THEMES, Theme};
use crate::upload::{build_upload, looks_like_video};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
  /// Scrolling the feed.
  Feed,
  /// Typing a media path into the upload prompt.
  Upload,
}

pub struct App {
  pub feed: Feed,
  /// Virtual scroll position in rows. One item occupies `item_extent` rows, so
  /// the strip is `item_extent * feed.len()` rows tall.
  pub scroll_offset: u32,
  /// Rows per feed item — the viewport height, reported by the render pass.
  /// Zero until the first draw; scroll events before that are no-ops.
  pub item_extent: u32,
  pub mode: AppMode,
  pub theme_index: usize,
  pub player: Player,
  pub last_error: Option<String>,
  pub status_message: Option<String>,
  pub should_quit: bool,
  pub upload_input: String,
  pub upload_cursor: usize,
  pub upload_scroll: usize,
  /// When the last error was set — used for auto-dismiss.
  error_time: Option<Instant>,
}

impl App {
  pub fn new(mut items: Vec<VideoItem>, playback_enabled: bool) -> Self {
    let config = Config::load();
    let theme_index =
      if let Some(ref name) = config.theme_name { THEMES.iter().position(|t| t.name == name).unwrap_or(0) } else { 0 };
    if config.start_muted == Some(false) {
      // The content source hands the feed over unmuted when the user has
      // persisted that preference; per-item toggles still work as usual.
      for item in &mut items {
        item.muted = false;
      }
    }

    Self {
      feed: Feed::new(items),
      scroll_offset: 0,
      item_extent: 0,
      mode: AppMode::Feed,
      theme_index,
      player: Player::new(playback_enabled),
      last_error: None,
      status_message: None,
      should_quit: false,
      upload_input: String::new(),
      upload_cursor: 0,
      upload_scroll: 0,
      error_time: None,
    }
  }

  pub fn theme(&self) -> &'static Theme {
    &THEMES[self.theme_index % THEMES.len()]
  }

  pub fn next_theme(&mut self) {
    self.theme_index = (self.theme_index + 1) % THEMES.len();
    self.save_config();
  }

  fn save_config(&self) {
    let start_muted = self.feed.active_item().map(|i| i.muted);
    let config = Config { theme_name: Some(self.theme().name.to_string()), start_muted };
    config.save();
  }

  // --- Status bar messages ---

  /// Set an error message with auto-dismiss tracking.
  pub fn set_error(&mut self, msg: String) {
    warn!(msg = %msg, "surface error");
    self.last_error = Some(msg);
    self.error_time = Some(Instant::now());
  }

  pub fn clear_error(&mut self) {
    self.last_error = None;
    self.error_time = None;
  }

  /// Clear stale error messages after the configured dismiss delay.
  pub fn expire_error(&mut self) {
    if let Some(t) = self.error_time
      && t.elapsed() >= Duration::from_secs(constants().error_dismiss_secs)
    {
      self.last_error = None;
      self.error_time = None;
    }
  }

  /// Per-tick upkeep: drain mpv status lines, expire old errors.
  pub fn tick(&mut self) {
    self.player.check_status();
    self.expire_error();
  }

  // --- Scrolling ---

  /// The render pass reports the viewport height here before handling events.
  pub async fn set_viewport_extent(&mut self, rows: u32) {
    if rows == self.item_extent || rows == 0 {
      return;
    }
    // Keep the same item under the viewport across a resize by re-deriving
    // the offset from the active index at the new extent.
    if let Some(active) = self.feed.active_index() {
      self.scroll_offset = rows * active as u32;
    }
    self.item_extent = rows;
    self.sync_playback().await;
  }

  /// Upper bound for the scroll offset: the last item's boundary.
  fn max_offset(&self) -> u32 {
    self.item_extent * self.feed.len().saturating_sub(1) as u32
  }

  /// Move the virtual scroll position by `delta` rows (wheel scrolling).
  pub async fn scroll_by(&mut self, delta: i64) {
    if self.item_extent == 0 {
      return;
    }
    let target = (self.scroll_offset as i64 + delta).clamp(0, self.max_offset() as i64) as u32;
    self.scroll_offset = target;
    self.sync_playback().await;
  }

  /// Snap to the item before/after the active one (j/k navigation).
  pub async fn snap_step(&mut self, forward: bool) {
    if self.item_extent == 0 || self.feed.is_empty() {
      return;
    }
    let current = self.feed.active_index().unwrap_or(0);
    let target = if forward { (current + 1).min(self.feed.len() - 1) } else { current.saturating_sub(1) };
    self.scroll_offset = self.item_extent * target as u32;
    self.sync_playback().await;
  }

  /// Feed the current offset through the controller and forward whatever
  /// transition it reports to the playback surface.
  async fn sync_playback(&mut self) {
    if self.item_extent == 0 {
      return;
    }
    let Some(change) = self.feed.on_scroll(self.scroll_offset, self.item_extent) else {
      return; // settled on the already-active item
    };
    self.apply_change(change).await;
  }

  async fn apply_change(&mut self, change: ActiveChange) {
    info!(stopped = ?change.stopped, started = ?change.started, "active item changed");
    self.status_message = None;
    if change.started.is_some() {
      let Some(item) = self.feed.active_item() else { return };
      let (id, media, muted) = (item.id, item.media.clone(), item.muted);
      if let Err(e) = self.player.start(id, &media, muted).await {
        self.set_error(format!("Playback error: {:#}", e));
        let _ = self.player.stop().await;
      }
    } else if change.stopped.is_some()
      && let Err(e) = self.player.stop().await
    {
      self.set_error(format!("Failed to stop playback: {:#}", e));
    }
  }

  // --- Item interactions ---

  /// Like/unlike the active item.
  pub fn toggle_like_active(&mut self) {
    if let Some(index) = self.feed.active_index() {
      self.feed.toggle_like_at(index);
    }
  }

  /// Flip the active item's mute preference, applying it to live playback
  /// immediately when the controller says so.
  pub async fn toggle_mute_active(&mut self) {
    let Some(index) = self.feed.active_index() else { return };
    if let Some(muted) = self.feed.toggle_mute_at(index)
      && let Err(e) = self.player.set_muted(muted).await
    {
      self.set_error(format!("Mute failed: {:#}", e));
    }
    self.save_config();
  }

  // --- Upload prompt ---

  pub fn open_upload(&mut self) {
    self.mode = AppMode::Upload;
    self.clear_error();
    self.status_message = None;
    self.upload_input.clear();
    self.upload_cursor = 0;
    self.upload_scroll = 0;
  }

  pub fn close_upload(&mut self) {
    self.mode = AppMode::Feed;
    self.upload_input.clear();
    self.upload_cursor = 0;
    self.upload_scroll = 0;
  }

  /// Validate the typed path and prepend the upload to the feed. The active
  /// item keeps playing in place — no play/pause fires on insert.
  pub fn submit_upload(&mut self) {
    let path = self.upload_input.trim().to_string();
    if path.is_empty() {
      self.set_error("Enter a path to a video file.".to_string());
      return;
    }
    if !looks_like_video(&path) {
      self.set_error(format!("Not a video file: {}", path));
      return;
    }

    let item = build_upload(MediaRef::new(path));
    info!(id = item.id, media = item.media.as_str(), "upload added to feed");
    self.feed.insert_at_front(item);
    // Every index shifted down one slot, so the same visual position is now
    // one extent further into the strip. Shift the offset to match — without
    // this the next scroll event would re-resolve to the wrong item.
    if self.feed.active_index().is_some() {
      self.scroll_offset += self.item_extent;
    }
    self.status_message = Some("Video added — scroll up to watch it.".to_string());
    self.close_upload();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::mock_feed;
  use pretty_assertions::assert_eq;

  fn app(n: usize) -> App {
    // Playback disabled: the player tracks ids without spawning mpv.
    let mut app = App::new(mock_feed(n), false);
    app.item_extent = 40;
    app
  }

  #[tokio::test]
  async fn wheel_scrolling_tracks_the_active_item() {
    let mut app = app(5);
    app.scroll_by(0).await; // settle on the first item
    assert_eq!(app.feed.active_index(), Some(0));
    assert_eq!(app.player.current_id(), app.feed.active_item().map(|i| i.id));

    // 25 rows is past half of a 40-row item: index 1 takes over.
    app.scroll_by(25).await;
    assert_eq!(app.feed.active_index(), Some(1));
    assert_eq!(app.player.current_id(), app.feed.active_item().map(|i| i.id));
  }

  #[tokio::test]
  async fn scroll_clamps_at_both_ends() {
    let mut app = app(3);
    app.scroll_by(-500).await;
    assert_eq!(app.scroll_offset, 0);
    app.scroll_by(100_000).await;
    assert_eq!(app.scroll_offset, 40 * 2);
    assert_eq!(app.feed.active_index(), Some(2));
  }

  #[tokio::test]
  async fn snap_steps_one_item_at_a_time() {
    let mut app = app(3);
    app.scroll_by(0).await;
    app.snap_step(true).await;
    assert_eq!(app.feed.active_index(), Some(1));
    app.snap_step(true).await;
    app.snap_step(true).await; // clamped at the end
    assert_eq!(app.feed.active_index(), Some(2));
    app.snap_step(false).await;
    assert_eq!(app.feed.active_index(), Some(1));
  }

  #[tokio::test]
  async fn upload_keeps_the_active_item_under_the_viewport() {
    let mut app = app(3);
    app.scroll_by(45).await; // item 1 active
    let active_id = app.feed.active_item().unwrap().id;

    app.open_upload();
    app.upload_input = "clips/mine.mp4".to_string();
    app.submit_upload();

    assert_eq!(app.mode, AppMode::Feed);
    assert_eq!(app.feed.len(), 4);
    assert_eq!(app.feed.active_item().unwrap().id, active_id);
    // The shifted offset still resolves to the same item.
    app.scroll_by(0).await;
    assert_eq!(app.feed.active_item().unwrap().id, active_id);
  }

  #[test]
  fn upload_rejects_non_video_paths() {
    let mut app = app(2);
    app.open_upload();
    app.upload_input = "notes.txt".to_string();
    app.submit_upload();
    assert!(app.last_error.is_some());
    assert_eq!(app.mode, AppMode::Upload);
    assert_eq!(app.feed.len(), 2);
  }

  #[test]
  fn upload_rejects_empty_input() {
    let mut app = app(2);
    app.open_upload();
    app.submit_upload();
    assert!(app.last_error.is_some());
    assert_eq!(app.feed.len(), 2);
  }

  #[tokio::test]
  async fn resize_keeps_the_active_item() {
    let mut app = app(4);
    app.scroll_by(85).await; // item 2 active at extent 40
    assert_eq!(app.feed.active_index(), Some(2));
    app.set_viewport_extent(25).await;
    assert_eq!(app.feed.active_index(), Some(2));
    assert_eq!(app.scroll_offset, 50);
  }

  #[tokio::test]
  async fn like_toggle_targets_the_active_item() {
    let mut app = app(3);
    app.scroll_by(0).await;
    let before = app.feed.get(0).unwrap().like_count;
    app.toggle_like_active();
    assert_eq!(app.feed.get(0).unwrap().like_count, before + 1);
    assert!(app.feed.get(0).unwrap().liked);
    app.toggle_like_active();
    assert_eq!(app.feed.get(0).unwrap().like_count, before);
  }
}
