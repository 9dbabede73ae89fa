use ratatui::style::Color;

/// A named color palette, cycled at runtime with Ctrl+T.
pub struct Theme {
  pub name: &'static str,
  pub bg: Color,
  pub fg: Color,
  pub accent: Color,
  pub muted: Color,
  pub border: Color,
  pub status: Color,
  pub error: Color,
  pub like: Color,
  pub highlight_fg: Color,
  pub highlight_bg: Color,
  pub stripe_bg: Color,
  pub key_fg: Color,
  pub key_bg: Color,
}

pub const THEMES: [Theme; 3] = [
  Theme {
    name: "dusk",
    bg: Color::Rgb(24, 24, 32),
    fg: Color::Rgb(220, 218, 230),
    accent: Color::Rgb(244, 114, 182),
    muted: Color::Rgb(120, 118, 140),
    border: Color::Rgb(70, 68, 90),
    status: Color::Rgb(134, 198, 255),
    error: Color::Rgb(248, 113, 113),
    like: Color::Rgb(239, 68, 68),
    highlight_fg: Color::Rgb(24, 24, 32),
    highlight_bg: Color::Rgb(244, 114, 182),
    stripe_bg: Color::Rgb(30, 30, 40),
    key_fg: Color::Rgb(24, 24, 32),
    key_bg: Color::Rgb(134, 198, 255),
  },
  Theme {
    name: "paper",
    bg: Color::Rgb(250, 247, 240),
    fg: Color::Rgb(60, 56, 54),
    accent: Color::Rgb(177, 98, 134),
    muted: Color::Rgb(146, 131, 116),
    border: Color::Rgb(213, 196, 161),
    status: Color::Rgb(69, 133, 136),
    error: Color::Rgb(204, 36, 29),
    like: Color::Rgb(204, 36, 29),
    highlight_fg: Color::Rgb(250, 247, 240),
    highlight_bg: Color::Rgb(177, 98, 134),
    stripe_bg: Color::Rgb(242, 237, 226),
    key_fg: Color::Rgb(250, 247, 240),
    key_bg: Color::Rgb(69, 133, 136),
  },
  Theme {
    name: "neon",
    bg: Color::Rgb(10, 12, 18),
    fg: Color::Rgb(200, 255, 240),
    accent: Color::Rgb(0, 255, 170),
    muted: Color::Rgb(90, 110, 120),
    border: Color::Rgb(40, 70, 80),
    status: Color::Rgb(0, 200, 255),
    error: Color::Rgb(255, 80, 120),
    like: Color::Rgb(255, 60, 110),
    highlight_fg: Color::Rgb(10, 12, 18),
    highlight_bg: Color::Rgb(0, 255, 170),
    stripe_bg: Color::Rgb(16, 20, 28),
    key_fg: Color::Rgb(10, 12, 18),
    key_bg: Color::Rgb(0, 200, 255),
  },
];
