//! Application constants loaded from `constants.ron` at compile time.
//!
//! The RON file is embedded via `include_str!` so it's always available —
//! no runtime file I/O. Parsed once on first access via `LazyLock`.

use serde::Deserialize;
use std::sync::LazyLock;

/// All tuneable application constants.
#[derive(Debug, Deserialize)]
pub struct Constants {
  // Mock catalog
  pub feed_initial_size: usize,
  pub like_count_range: (u64, u64),
  pub comment_count_range: (u64, u64),
  pub share_count_range: (u64, u64),
  pub media_dir: String,
  pub username_prefixes: Vec<String>,
  pub username_suffixes: Vec<String>,
  pub description_templates: Vec<String>,
  pub emojis: Vec<String>,
  pub song_titles: Vec<String>,

  // Uploads
  pub upload_author: String,
  pub upload_description: String,
  pub upload_song: String,
  pub video_extensions: Vec<String>,

  // Scrolling
  pub wheel_step_rows: u32,

  // Status bar
  pub error_dismiss_secs: u64,
}

static CONSTANTS: LazyLock<Constants> = LazyLock::new(|| {
  // Safety: the RON file is embedded at compile time; if it's malformed this is a build-time error.
  ron::from_str(include_str!("../constants.ron")).expect("constants.ron must be valid RON (embedded at compile time)")
});

/// Returns a reference to the parsed application constants.
pub fn constants() -> &'static Constants {
  &CONSTANTS
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn embedded_constants_parse() {
    let c = constants();
    assert!(c.feed_initial_size > 0);
    assert!(c.like_count_range.0 <= c.like_count_range.1);
    assert!(!c.username_prefixes.is_empty());
    assert!(!c.song_titles.is_empty());
    assert!(c.wheel_step_rows > 0);
  }
}
