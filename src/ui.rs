use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Layout, Rect},
  style::{Modifier, Style, Stylize},
  text::{Line, Span},
  widgets::{Block, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, AppMode};
use crate::feed::{Phase, VideoItem};
use crate::theme::Theme;

// --- Helpers ---

/// Compute the display width of the first `n` chars (accounting for double-width CJK).
pub fn display_width(s: &str, n: usize) -> usize {
  use unicode_width::UnicodeWidthChar;
  s.chars().take(n).map(|c| c.width().unwrap_or(0)).sum()
}

/// Truncate a string to `max_width` characters, appending "…" if truncated.
fn truncate_str(s: &str, max_width: usize) -> String {
  if s.chars().count() <= max_width {
    s.to_string()
  } else {
    let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    format!("{}…", truncated)
  }
}

/// Compact engagement counts: 999 → "999", 12400 → "12.4K", 1200000 → "1.2M".
fn format_count(n: u64) -> String {
  if n >= 1_000_000 {
    format!("{:.1}M", n as f64 / 1_000_000.0)
  } else if n >= 1_000 {
    format!("{:.1}K", n as f64 / 1_000.0)
  } else {
    n.to_string()
  }
}

// --- UI Rendering ---

pub fn ui(frame: &mut Frame, app: &mut App) {
  let theme = app.theme();

  frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), frame.area());

  let [header_area, main_area, status_area, footer_area] =
    Layout::vertical([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
      .areas(frame.area());

  render_header(frame, app, header_area);
  render_main(frame, app, main_area);
  render_status(frame, app, status_area);
  render_footer(frame, app, footer_area);

  if app.mode == AppMode::Upload {
    render_upload_prompt(frame, app, main_area);
  }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let left = Line::from(Span::styled(" ▶ reel ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)));
  frame.render_widget(left, area);

  let position = match app.feed.active_index() {
    Some(i) => format!("{}/{}  v{} ", i + 1, app.feed.len(), env!("CARGO_PKG_VERSION")),
    None => format!("v{} ", env!("CARGO_PKG_VERSION")),
  };
  let right = Line::from(Span::styled(&position, Style::default().fg(theme.muted)));
  let right_area =
    Rect { x: area.x + area.width.saturating_sub(position.len() as u16), width: position.len() as u16, ..area };
  frame.render_widget(right, right_area);
}

fn render_main(frame: &mut Frame, app: &mut App, area: Rect) {
  if app.feed.is_empty() {
    render_empty_feed(frame, app.theme(), area);
    return;
  }

  let [card_area, rail_area] = Layout::horizontal([Constraint::Percentage(68), Constraint::Percentage(32)]).areas(area);
  render_active_card(frame, app, card_area);
  render_feed_rail(frame, app, rail_area);
}

fn render_empty_feed(frame: &mut Frame, theme: &Theme, area: Rect) {
  let text = vec![
    Line::from(""),
    Line::from(Span::styled("▶  Your feed is empty", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))),
    Line::from(""),
    Line::from(Span::styled("Press u to add a video from a local file.", Style::default().fg(theme.fg))),
  ];
  let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
    Block::bordered()
      .border_type(ratatui::widgets::BorderType::Rounded)
      .border_style(Style::default().fg(theme.border)),
  );
  frame.render_widget(paragraph, area);
}

fn phase_icon(item: &VideoItem) -> &'static str {
  match item.phase() {
    Phase::Playing => "▶",
    Phase::Paused => "⏸",
    Phase::Idle => "·",
  }
}

fn render_active_card(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let title = match app.feed.active_item() {
    Some(item) if item.is_playing() => " ▶ Playing ",
    Some(_) => " ⏸ Paused ",
    None => " Feed ",
  };
  let block = Block::bordered()
    .title(Span::styled(title, Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)))
    .border_type(ratatui::widgets::BorderType::Rounded)
    .border_style(Style::default().fg(theme.border))
    .padding(Padding::horizontal(1));

  let Some(item) = app.feed.active_item() else {
    let hint = Paragraph::new(Line::from(Span::styled("Scroll to start watching.", Style::default().fg(theme.muted))))
      .block(block);
    frame.render_widget(hint, area);
    return;
  };

  let inner_w = area.width.saturating_sub(4) as usize;
  let heart_style = if item.liked {
    Style::default().fg(theme.like).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(theme.fg)
  };
  let heart = if item.liked { "♥" } else { "♡" };

  let mut lines = vec![
    Line::from(""),
    Line::from(Span::styled(item.author.clone(), Style::default().fg(theme.fg).add_modifier(Modifier::BOLD))),
    Line::from(""),
    Line::from(Span::styled(item.description.clone(), Style::default().fg(theme.fg))),
    Line::from(""),
    Line::from(Span::styled(truncate_str(&item.song, inner_w), Style::default().fg(theme.accent))),
    Line::from(""),
    Line::from(vec![
      Span::styled(format!("{} {}", heart, format_count(item.like_count)), heart_style),
      Span::raw("   "),
      Span::styled(format!("🗨 {}", format_count(item.comment_count)), Style::default().fg(theme.fg)),
      Span::raw("   "),
      Span::styled(format!("↗ {}", format_count(item.share_count)), Style::default().fg(theme.fg)),
    ]),
    Line::from(""),
  ];
  let sound = if item.muted {
    Span::styled("🔇 muted — press m for sound", Style::default().fg(theme.muted))
  } else {
    Span::styled("🔊 sound on", Style::default().fg(theme.status))
  };
  lines.push(Line::from(sound));
  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    truncate_str(item.media.as_str(), inner_w),
    Style::default().fg(theme.muted).add_modifier(Modifier::UNDERLINED),
  )));

  let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
  frame.render_widget(paragraph, area);
}

fn render_feed_rail(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let inner_w = area.width.saturating_sub(4) as usize;

  let items: Vec<ListItem> = app
    .feed
    .items()
    .iter()
    .enumerate()
    .map(|(i, item)| {
      let is_active = Some(i) == app.feed.active_index();
      let fg = if is_active { theme.highlight_fg } else { theme.fg };
      let bg = if is_active {
        theme.highlight_bg
      } else if i % 2 == 1 {
        theme.stripe_bg
      } else {
        theme.bg
      };

      let marker = phase_icon(item);
      let liked = if item.liked { " ♥" } else { "" };
      let label = truncate_str(&format!("{} {}{}", marker, item.author, liked), inner_w);
      ListItem::new(Line::from(Span::styled(label, Style::default().fg(fg)))).bg(bg)
    })
    .collect();

  let title = format!(" Feed — {} videos ", app.feed.len());
  let list = List::new(items)
    .block(
      Block::bordered()
        .title(title)
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(Style::default().fg(theme.border)),
    )
    .highlight_symbol("▶ ")
    .highlight_style(Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD));

  let mut state = ListState::default();
  state.select(app.feed.active_index());
  frame.render_stateful_widget(list, area, &mut state);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let (text, style) = if let Some(err) = &app.last_error {
    (format!(" ⚠  {}", err), Style::default().fg(theme.error))
  } else if let Some(msg) = &app.status_message {
    (format!(" ✓ {}", msg), Style::default().fg(theme.status))
  } else {
    match app.player.last_status() {
      Some(status) => (format!(" ♪ {}", status), Style::default().fg(theme.status)),
      None => (" Ready".to_string(), Style::default().fg(theme.muted)),
    }
  };
  frame.render_widget(Paragraph::new(text).style(style), area);
}

/// Centered overlay box for typing an upload path, with horizontal scrolling
/// so long paths stay visible around the cursor.
fn render_upload_prompt(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let width = area.width.saturating_sub(8).clamp(20, 70);
  let prompt_area = Rect {
    x: area.x + (area.width.saturating_sub(width)) / 2,
    y: area.y + area.height / 2,
    width,
    height: 3,
  };
  frame.render_widget(ratatui::widgets::Clear, prompt_area);

  let block = Block::bordered()
    .title(" Add video — path to a local file ")
    .title_style(Style::default().fg(theme.accent))
    .border_type(ratatui::widgets::BorderType::Rounded)
    .border_style(Style::default().fg(theme.accent))
    .padding(Padding::horizontal(1));

  let inner_w = prompt_area.width.saturating_sub(4) as usize;
  let cursor_col = display_width(&app.upload_input, app.upload_cursor);

  if cursor_col < app.upload_scroll {
    app.upload_scroll = cursor_col;
  } else if cursor_col >= app.upload_scroll + inner_w {
    app.upload_scroll = cursor_col.saturating_sub(inner_w) + 1;
  }

  let visible: String = app
    .upload_input
    .chars()
    .scan(0usize, |col, c| {
      let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
      let start = *col;
      *col += w;
      Some((start, *col, c))
    })
    .skip_while(|(_, end, _)| *end <= app.upload_scroll)
    .take_while(|(start, _, _)| *start < app.upload_scroll + inner_w)
    .map(|(_, _, c)| c)
    .collect();

  let paragraph = Paragraph::new(visible).style(Style::default().fg(theme.fg).bg(theme.bg)).block(block);
  frame.render_widget(paragraph, prompt_area);

  let cursor_x = prompt_area.x + 2 + (cursor_col - app.upload_scroll) as u16;
  frame.set_cursor_position((cursor_x, prompt_area.y + 1));
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let keys: Vec<(&str, &str)> = match app.mode {
    AppMode::Feed => {
      let mut k = vec![("j/k", "Next/Prev"), ("wheel", "Scroll")];
      if let Some(item) = app.feed.active_item() {
        k.push(("l", if item.liked { "Unlike" } else { "Like" }));
        k.push(("m", if item.muted { "Unmute" } else { "Mute" }));
      }
      k.push(("u", "Upload"));
      k.push(("^t", "Theme"));
      k.push(("q", "Quit"));
      k
    }
    AppMode::Upload => vec![("Enter", "Add to feed"), ("Esc", "Cancel")],
  };

  let spans: Vec<Span> = keys
    .iter()
    .enumerate()
    .flat_map(|(i, (key, action))| {
      let mut s = vec![
        Span::styled(format!(" {} ", key), Style::default().fg(theme.key_fg).bg(theme.key_bg)),
        Span::styled(format!(" {} ", action), Style::default().fg(theme.muted)),
      ];
      if i < keys.len() - 1 {
        s.push(Span::raw("  "));
      }
      s
    })
    .collect();

  frame.render_widget(Line::from(spans), area);

  let theme_label = format!("{} ", theme.name);
  let right = Line::from(Span::styled(&theme_label, Style::default().fg(theme.muted)));
  let right_area =
    Rect { x: area.x + area.width.saturating_sub(theme_label.len() as u16), width: theme_label.len() as u16, ..area };
  frame.render_widget(right, right_area);
}
