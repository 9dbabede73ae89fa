//! The feed playback controller.
//!
//! Owns the ordered stack of videos and the single-active-item rule: at most
//! one item is in the Playing phase, and if one is, it is the item under the
//! current scroll position. Everything here is synchronous and side-effect
//! free — starting and stopping actual playback is the caller's job, driven by
//! the [`ActiveChange`] values this module reports.

pub type VideoId = i64;

/// Opaque handle to playable media. The controller stores and forwards it but
/// never opens, validates, or frees it — its lifetime belongs to whoever
/// supplied it (the mock catalog or the upload prompt).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef(String);

impl MediaRef {
  pub fn new(handle: impl Into<String>) -> Self {
    Self(handle.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

/// Per-item playback phase. Idle means "never activated" and only matters for
/// initial-render bookkeeping; behaviorally it equals Paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Idle,
  Playing,
  Paused,
}

// --- VideoItem ---

#[derive(Debug, Clone)]
pub struct VideoItem {
  pub id: VideoId,
  pub author: String,
  pub description: String,
  pub song: String,
  pub like_count: u64,
  pub comment_count: u64,
  pub share_count: u64,
  pub media: MediaRef,
  pub liked: bool,
  pub muted: bool,
  phase: Phase,
}

impl VideoItem {
  /// A fresh item: zero engagement, not liked, muted, never activated.
  pub fn new(
    id: VideoId,
    author: impl Into<String>,
    description: impl Into<String>,
    song: impl Into<String>,
    media: MediaRef,
  ) -> Self {
    Self {
      id,
      author: author.into(),
      description: description.into(),
      song: song.into(),
      like_count: 0,
      comment_count: 0,
      share_count: 0,
      media,
      liked: false,
      muted: true,
      phase: Phase::Idle,
    }
  }

  pub fn with_counts(mut self, likes: u64, comments: u64, shares: u64) -> Self {
    self.like_count = likes;
    self.comment_count = comments;
    self.share_count = shares;
    self
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  pub fn is_playing(&self) -> bool {
    self.phase == Phase::Playing
  }

  // Phase transitions are private: only `Feed` may move an item in or out of
  // Playing. This is what keeps two items from ever playing at once.
  fn activate(&mut self) {
    self.phase = Phase::Playing;
  }

  fn deactivate(&mut self) {
    if self.phase == Phase::Playing {
      self.phase = Phase::Paused;
    }
  }

  /// Flip `liked` and adjust the visible count. Toggling twice restores the
  /// original count exactly.
  pub fn toggle_like(&mut self) {
    self.liked = !self.liked;
    if self.liked {
      self.like_count += 1;
    } else {
      self.like_count = self.like_count.saturating_sub(1);
    }
  }

  /// Flip the mute preference. Safe in any phase — while paused it merely
  /// records the preference for the next activation.
  pub fn toggle_mute(&mut self) {
    self.muted = !self.muted;
  }
}

// --- Active index resolution ---

/// Map a scroll offset (in rows) to the feed index under it.
///
/// Round-half-up: an item becomes active once more than half its extent has
/// scrolled past, and an exact half-way offset ties toward the larger index.
/// Returns `None` for an empty feed (and for a zero extent, rather than
/// dividing by zero — positive extent is the caller's precondition).
pub fn resolve_active_index(offset: u32, extent: u32, count: usize) -> Option<usize> {
  if count == 0 || extent == 0 {
    return None;
  }
  let idx = ((offset as u64 + extent as u64 / 2) / extent as u64) as usize;
  Some(idx.min(count - 1))
}

// --- Feed ---

/// What a scroll transition did, so the playback surface can follow along.
/// `stopped` is the item that left the Playing phase, `started` the one that
/// entered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveChange {
  pub stopped: Option<VideoId>,
  pub started: Option<VideoId>,
}

pub struct Feed {
  items: Vec<VideoItem>,
  active: Option<usize>,
}

impl Feed {
  pub fn new(items: Vec<VideoItem>) -> Self {
    Self { items, active: None }
  }

  pub fn items(&self) -> &[VideoItem] {
    &self.items
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn get(&self, index: usize) -> Option<&VideoItem> {
    self.items.get(index)
  }

  pub fn active_index(&self) -> Option<usize> {
    self.active
  }

  pub fn active_item(&self) -> Option<&VideoItem> {
    self.active.and_then(|i| self.items.get(i))
  }

  /// Apply a scroll position. Resolves the index under `offset`, pauses the
  /// previously active item and starts the new one when they differ.
  ///
  /// Returns `None` when the scroll settles on the already-active item — no
  /// phase changed and the playback surface has nothing to do. Repeated calls
  /// with the same offset are therefore free of redundant play/pause flicker.
  pub fn on_scroll(&mut self, offset: u32, extent: u32) -> Option<ActiveChange> {
    let new = resolve_active_index(offset, extent, self.items.len());
    if new == self.active {
      return None;
    }

    let mut change = ActiveChange { stopped: None, started: None };
    if let Some(old) = self.active
      && let Some(item) = self.items.get_mut(old)
    {
      item.deactivate();
      change.stopped = Some(item.id);
    }
    if let Some(idx) = new
      && let Some(item) = self.items.get_mut(idx)
    {
      item.activate();
      change.started = Some(item.id);
    }
    self.active = new;
    Some(change)
  }

  /// Prepend a freshly built item (an upload). The previously active item
  /// shifts down one slot and stays active — no play/pause fires here. The new
  /// item starts out not playing; only a later scroll activates it.
  pub fn insert_at_front(&mut self, mut item: VideoItem) {
    item.phase = Phase::Idle;
    self.items.insert(0, item);
    if let Some(active) = self.active.as_mut() {
      *active += 1;
    }
  }

  /// Toggle the like on `items[index]`. Out-of-range indices (stale UI
  /// references) are a silent no-op.
  pub fn toggle_like_at(&mut self, index: usize) {
    if let Some(item) = self.items.get_mut(index) {
      item.toggle_like();
    }
  }

  /// Toggle the mute preference on `items[index]`. When that item is the live
  /// playing one, returns the new flag so the caller can apply it to playback
  /// immediately instead of waiting for the next activation. Out-of-range
  /// indices are a silent no-op.
  pub fn toggle_mute_at(&mut self, index: usize) -> Option<bool> {
    let is_active = self.active == Some(index);
    let item = self.items.get_mut(index)?;
    item.toggle_mute();
    (is_active && item.is_playing()).then_some(item.muted)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn item(id: VideoId) -> VideoItem {
    VideoItem::new(id, format!("@creator{id}"), "desc", "♪ song", MediaRef::new(format!("videos/{id}.mp4")))
      .with_counts(100, 10, 5)
  }

  fn feed(n: usize) -> Feed {
    Feed::new((0..n as VideoId).map(item).collect())
  }

  fn playing_count(feed: &Feed) -> usize {
    feed.items().iter().filter(|i| i.is_playing()).count()
  }

  // --- resolve_active_index ---

  #[test]
  fn resolve_zero_offset_is_first_item() {
    assert_eq!(resolve_active_index(0, 800, 10), Some(0));
  }

  #[test]
  fn resolve_exact_multiples() {
    for k in 0..5 {
      assert_eq!(resolve_active_index(800 * k, 800, 10), Some(k as usize));
    }
  }

  #[test]
  fn resolve_clamps_past_the_end() {
    assert_eq!(resolve_active_index(800 * 50, 800, 10), Some(9));
  }

  #[test]
  fn resolve_empty_feed_is_sentinel() {
    assert_eq!(resolve_active_index(0, 800, 0), None);
    assert_eq!(resolve_active_index(4000, 800, 0), None);
  }

  #[test]
  fn resolve_zero_extent_is_sentinel() {
    assert_eq!(resolve_active_index(100, 0, 10), None);
  }

  #[test]
  fn resolve_rounds_to_nearest() {
    assert_eq!(resolve_active_index(399, 800, 10), Some(0));
    assert_eq!(resolve_active_index(401, 800, 10), Some(1));
    assert_eq!(resolve_active_index(850, 800, 10), Some(1));
    assert_eq!(resolve_active_index(1250, 800, 10), Some(2));
  }

  #[test]
  fn resolve_half_way_ties_toward_larger_index() {
    assert_eq!(resolve_active_index(400, 800, 10), Some(1));
    assert_eq!(resolve_active_index(1200, 800, 10), Some(2));
  }

  #[test]
  fn resolve_odd_extent() {
    assert_eq!(resolve_active_index(1, 3, 10), Some(0));
    assert_eq!(resolve_active_index(2, 3, 10), Some(1));
  }

  // --- VideoItem ---

  #[test]
  fn new_item_starts_idle_and_muted() {
    let v = item(1);
    assert_eq!(v.phase(), Phase::Idle);
    assert!(!v.is_playing());
    assert!(v.muted);
    assert!(!v.liked);
  }

  #[test]
  fn like_round_trip_restores_count() {
    let mut v = item(1);
    let before = v.like_count;
    v.toggle_like();
    assert!(v.liked);
    assert_eq!(v.like_count, before + 1);
    v.toggle_like();
    assert!(!v.liked);
    assert_eq!(v.like_count, before);
  }

  #[test]
  fn like_on_zero_count_upload() {
    let mut v = VideoItem::new(1, "@you", "d", "s", MediaRef::new("x"));
    v.toggle_like();
    assert_eq!(v.like_count, 1);
    v.toggle_like();
    assert_eq!(v.like_count, 0);
  }

  #[test]
  fn mute_toggle_is_safe_in_any_phase() {
    let mut v = item(1);
    v.toggle_mute();
    assert!(!v.muted);
    v.toggle_mute();
    assert!(v.muted);
  }

  // --- Feed scrolling ---

  #[test]
  fn first_scroll_activates_without_a_stop() {
    let mut f = feed(3);
    let change = f.on_scroll(0, 800).expect("first scroll must activate");
    assert_eq!(change, ActiveChange { stopped: None, started: Some(0) });
    assert_eq!(f.active_index(), Some(0));
    assert!(f.get(0).unwrap().is_playing());
  }

  #[test]
  fn scroll_hands_playback_to_the_next_item() {
    let mut f = feed(3);
    f.on_scroll(0, 800);
    let change = f.on_scroll(850, 800).expect("index changed");
    assert_eq!(change, ActiveChange { stopped: Some(0), started: Some(1) });
    assert_eq!(f.get(0).unwrap().phase(), Phase::Paused);
    assert!(f.get(1).unwrap().is_playing());
  }

  #[test]
  fn scroll_is_idempotent_once_settled() {
    let mut f = feed(3);
    assert!(f.on_scroll(850, 800).is_some());
    assert_eq!(f.on_scroll(850, 800), None);
    assert_eq!(f.on_scroll(860, 800), None); // still resolves to index 1
    assert_eq!(f.active_index(), Some(1));
  }

  #[test]
  fn at_most_one_item_plays_under_any_scroll_sequence() {
    let mut f = feed(6);
    for offset in [0u32, 120, 400, 799, 800, 2400, 2000, 0, 5000, 4999, 10_000] {
      f.on_scroll(offset, 800);
      assert!(playing_count(&f) <= 1, "offset {offset} broke the invariant");
      if let Some(active) = f.active_index() {
        assert!(f.get(active).unwrap().is_playing());
      }
    }
  }

  #[test]
  fn empty_feed_scroll_is_a_quiet_no_op() {
    let mut f = feed(0);
    assert_eq!(f.on_scroll(0, 800), None);
    assert_eq!(f.active_index(), None);
    assert!(f.active_item().is_none());
  }

  // --- Insertion ---

  #[test]
  fn insert_preserves_active_identity() {
    let mut f = feed(3);
    f.on_scroll(850, 800); // item 1 active at index 1
    let active_id = f.active_item().unwrap().id;

    f.insert_at_front(item(99));

    assert_eq!(f.len(), 4);
    assert_eq!(f.active_index(), Some(2));
    assert_eq!(f.active_item().unwrap().id, active_id);
    assert!(f.active_item().unwrap().is_playing());
    assert!(!f.get(0).unwrap().is_playing());
    assert_eq!(playing_count(&f), 1);
  }

  #[test]
  fn insert_into_empty_feed_leaves_nothing_active() {
    let mut f = feed(0);
    f.insert_at_front(item(7));
    assert_eq!(f.len(), 1);
    assert_eq!(f.active_index(), None);
    assert!(!f.get(0).unwrap().is_playing());
  }

  #[test]
  fn insert_does_not_auto_activate_until_scrolled() {
    let mut f = feed(2);
    f.on_scroll(0, 800);
    f.insert_at_front(item(42));
    assert!(!f.get(0).unwrap().is_playing());

    // Scrolling back to the top hands playback to the inserted item.
    let change = f.on_scroll(0, 800).expect("active index moved");
    assert_eq!(change.started, Some(42));
    assert!(f.get(0).unwrap().is_playing());
    assert_eq!(playing_count(&f), 1);
  }

  // --- Toggles through the controller ---

  #[test]
  fn toggle_like_at_round_trips() {
    let mut f = feed(3);
    let before = f.get(1).unwrap().like_count;
    f.toggle_like_at(1);
    assert_eq!(f.get(1).unwrap().like_count, before + 1);
    f.toggle_like_at(1);
    assert_eq!(f.get(1).unwrap().like_count, before);
    assert!(!f.get(1).unwrap().liked);
  }

  #[test]
  fn toggle_mute_on_live_item_reports_the_new_flag() {
    let mut f = feed(3);
    f.on_scroll(0, 800);
    assert_eq!(f.toggle_mute_at(0), Some(false));
    assert_eq!(f.toggle_mute_at(0), Some(true));
  }

  #[test]
  fn toggle_mute_on_background_item_only_records_preference() {
    let mut f = feed(3);
    f.on_scroll(0, 800);
    assert_eq!(f.toggle_mute_at(2), None);
    assert!(!f.get(2).unwrap().muted);
  }

  #[test]
  fn out_of_range_toggles_are_silent_no_ops() {
    let mut f = feed(2);
    f.toggle_like_at(17);
    assert_eq!(f.toggle_mute_at(17), None);
    assert_eq!(f.len(), 2);
  }

  // --- End-to-end scenario ---

  #[test]
  fn feed_scenario_scroll_insert_mute() {
    // Feed [A, B, C], extent 800, nothing active.
    let (a, b, c, d) = (1, 2, 3, 4);
    let mut f = Feed::new(vec![item(a), item(b), item(c)]);
    assert_eq!(f.active_index(), None);

    // Scroll to the top: A plays at index 0.
    assert_eq!(f.on_scroll(0, 800), Some(ActiveChange { stopped: None, started: Some(a) }));
    assert_eq!(f.active_index(), Some(0));

    // Scroll past half of A: A pauses, B plays at index 1.
    assert_eq!(f.on_scroll(850, 800), Some(ActiveChange { stopped: Some(a), started: Some(b) }));
    assert_eq!(f.active_index(), Some(1));
    assert_eq!(f.get(0).unwrap().phase(), Phase::Paused);

    // Upload D: it lands at index 0, B keeps playing, now at index 2.
    f.insert_at_front(item(d));
    assert_eq!(f.get(0).unwrap().id, d);
    assert_eq!(f.active_index(), Some(2));
    assert_eq!(f.active_item().unwrap().id, b);
    assert!(f.active_item().unwrap().is_playing());
    assert!(!f.get(0).unwrap().is_playing());

    // Mute the live item: flips and applies immediately.
    assert_eq!(f.toggle_mute_at(2), Some(false));
    assert!(!f.get(2).unwrap().muted);
  }
}
