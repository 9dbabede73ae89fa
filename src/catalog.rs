//! Mock content source: generates the initial feed the viewer scrolls through.
//!
//! Usernames, descriptions, and engagement counts are randomized from the
//! template tables in `constants.ron`; song titles rotate so every title shows
//! up. Media refs point into the local media dir and are opaque to the rest of
//! the app — nothing here checks that the files exist.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::constants::constants;
use crate::feed::{MediaRef, VideoId, VideoItem};

fn pick<'a>(rng: &mut impl Rng, pool: &'a [String]) -> &'a str {
  pool.choose(rng).map(String::as_str).unwrap_or("")
}

/// A handle like `@funky_legend42`.
pub fn generate_username(rng: &mut impl Rng) -> String {
  let c = constants();
  let prefix = pick(rng, &c.username_prefixes);
  let suffix = pick(rng, &c.username_suffixes);
  format!("@{}_{}{}", prefix, suffix, rng.gen_range(1..=999))
}

/// A caption from the template table with its `{emoji}` slot filled in.
pub fn generate_description(rng: &mut impl Rng) -> String {
  let c = constants();
  let template = pick(rng, &c.description_templates);
  template.replace("{emoji}", pick(rng, &c.emojis))
}

fn generate_item(rng: &mut impl Rng, index: usize) -> VideoItem {
  let c = constants();
  let id = index as VideoId + 1;
  let media = MediaRef::new(format!("{}/video{}.mp4", c.media_dir, index + 1));
  let song = c.song_titles[index % c.song_titles.len()].as_str();
  VideoItem::new(id, generate_username(rng), generate_description(rng), song, media).with_counts(
    rng.gen_range(c.like_count_range.0..=c.like_count_range.1),
    rng.gen_range(c.comment_count_range.0..=c.comment_count_range.1),
    rng.gen_range(c.share_count_range.0..=c.share_count_range.1),
  )
}

/// Build a mock feed of `count` items with sequential ids starting at 1.
pub fn mock_feed(count: usize) -> Vec<VideoItem> {
  let mut rng = rand::thread_rng();
  (0..count).map(|i| generate_item(&mut rng, i)).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn usernames_have_handle_shape() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
      let name = generate_username(&mut rng);
      assert!(name.starts_with('@'), "{name}");
      assert!(name.contains('_'), "{name}");
    }
  }

  #[test]
  fn descriptions_fill_the_emoji_slot() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
      assert!(!generate_description(&mut rng).contains("{emoji}"));
    }
  }

  #[test]
  fn mock_feed_has_sequential_ids_and_bounded_counts() {
    let c = constants();
    let items = mock_feed(10);
    assert_eq!(items.len(), 10);
    for (i, item) in items.iter().enumerate() {
      assert_eq!(item.id, i as VideoId + 1);
      assert!(item.like_count >= c.like_count_range.0 && item.like_count <= c.like_count_range.1);
      assert!(item.comment_count >= c.comment_count_range.0 && item.comment_count <= c.comment_count_range.1);
      assert!(item.share_count >= c.share_count_range.0 && item.share_count <= c.share_count_range.1);
      assert!(item.muted);
      assert!(!item.is_playing());
    }
  }

  #[test]
  fn song_titles_rotate() {
    let c = constants();
    let items = mock_feed(c.song_titles.len() + 1);
    assert_eq!(items[0].song, items[c.song_titles.len()].song);
    assert_ne!(items[0].song, items[1].song);
  }

  #[test]
  fn empty_feed_is_fine() {
    assert!(mock_feed(0).is_empty());
  }
}
