use console::Style;

/// Colour scheme of the dashboard. Cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn title(self) -> Style {
        match self {
            Theme::Light => Style::new().green().bold(),
            Theme::Dark => Style::new().color256(120).bold(),
        }
    }

    pub fn heading(self) -> Style {
        match self {
            Theme::Light => Style::new().blue().bold(),
            Theme::Dark => Style::new().color256(253).bold(),
        }
    }

    pub fn body(self) -> Style {
        match self {
            Theme::Light => Style::new(),
            Theme::Dark => Style::new().color256(252),
        }
    }

    pub fn success(self) -> Style {
        match self {
            Theme::Light => Style::new().green(),
            Theme::Dark => Style::new().color256(114),
        }
    }

    pub fn error(self) -> Style {
        match self {
            Theme::Light => Style::new().red(),
            Theme::Dark => Style::new().color256(203),
        }
    }

    pub fn muted(self) -> Style {
        match self {
            Theme::Light => Style::new().dim(),
            Theme::Dark => Style::new().color256(244),
        }
    }

    /// Colour of the `index`-th food series in a chart.
    pub fn series(self, index: usize) -> Style {
        const LIGHT: [u8; 6] = [27, 166, 28, 161, 93, 130];
        const DARK: [u8; 6] = [75, 215, 120, 211, 141, 180];
        let palette = if self.is_dark() { &DARK } else { &LIGHT };
        Style::new().color256(palette[index % palette.len()])
    }
}
