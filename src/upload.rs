//! Upload integration: turn a locally supplied media handle into a feed item.
//!
//! Pure construction only — prepending to the feed is `Feed::insert_at_front`,
//! and the handle's validity and lifetime belong to whoever typed the path.

use chrono::Utc;
use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::constants::constants;
use crate::feed::{MediaRef, VideoId, VideoItem};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Millisecond-timestamp id with a monotonic bump, so two uploads landing in
/// the same millisecond still get distinct ids.
fn allocate_upload_id() -> VideoId {
  let now = Utc::now().timestamp_millis();
  let mut issued = now;
  let _ = LAST_ID.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
    issued = now.max(last + 1);
    Some(issued)
  });
  issued
}

/// Build the feed item for an uploaded media handle: placeholder author,
/// description, and song, zero engagement, muted, not playing.
pub fn build_upload(media: MediaRef) -> VideoItem {
  let c = constants();
  VideoItem::new(allocate_upload_id(), c.upload_author.as_str(), c.upload_description.as_str(), c.upload_song.as_str(), media)
}

/// Extension screen applied by the upload prompt before anything reaches the
/// feed, mirroring a picker that only accepts video files.
pub fn looks_like_video(path: &str) -> bool {
  Path::new(path)
    .extension()
    .and_then(|e| e.to_str())
    .is_some_and(|ext| {
      let ext = ext.to_lowercase();
      constants().video_extensions.iter().any(|v| *v == ext)
    })
}
