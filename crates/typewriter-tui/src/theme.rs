use ratatui::style::Color;

/// Colours for the list, the status bar and each group of typewriter sprites
///
/// Values come from the Gruvbox Material dark palette.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub selection: Color,
    pub highlight: Color,

    pub status_bg: Color,
    pub status_fg: Color,
    pub hint: Color,

    pub body: Color,
    pub body_bg: Color,
    pub keyboard: Color,
    pub keyboard_bg: Color,
    pub carriage: Color,
    pub paper: Color,
    pub paper_edge: Color,
    pub paper_back: Color,
    pub ink: Color,
    pub key: Color,
    pub key_bg: Color,
    pub key_pressed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        let bg0 = Color::Rgb(0x28, 0x28, 0x28);
        let bg1 = Color::Rgb(0x32, 0x30, 0x2f);
        let bg2 = Color::Rgb(0x45, 0x40, 0x3d);
        let bg3 = Color::Rgb(0x50, 0x49, 0x45);
        let fg0 = Color::Rgb(0xd4, 0xbe, 0x98);
        let grey1 = Color::Rgb(0x92, 0x83, 0x74);
        let grey2 = Color::Rgb(0xa8, 0x99, 0x84);

        Self {
            background: bg0,
            text: fg0,
            selection: bg2,
            highlight: Color::Rgb(0xd8, 0xa6, 0x57),
            status_bg: bg2,
            status_fg: fg0,
            hint: grey2,
            body: grey2,
            body_bg: bg2,
            keyboard: grey1,
            keyboard_bg: bg1,
            carriage: Color::Rgb(0xdd, 0xc7, 0xa1),
            paper: Color::Rgb(0xeb, 0xdb, 0xb2),
            paper_edge: Color::Rgb(0x7c, 0x6f, 0x64),
            paper_back: bg3,
            ink: Color::Rgb(0x3c, 0x38, 0x36),
            key: fg0,
            key_bg: bg3,
            key_pressed: Color::Rgb(0x89, 0xb4, 0x82),
        }
    }
}
