use ratatui::style::Color;

pub struct NordTheme {
    // Polar Night
    pub nord0: Color, // #2E3440 background
    pub nord1: Color, // #3B4252 highlighted row
    pub nord2: Color, // #4C566A borders
    pub nord3: Color, // #616E88 placeholder, hints

    // Snow Storm
    pub nord4: Color, // #D8DEE9 text
    pub nord5: Color, // #E5E9F0 bright text

    // Frost
    pub nord8: Color, // #88C0D0 focused border, active row marker
    pub nord9: Color, // #81A1C1 clear button

    // Aurora
    pub nord13: Color, // #EBCB8B key hints
    pub nord14: Color, // #A3BE8C committed selection
}

impl Default for NordTheme {
    fn default() -> Self {
        Self {
            nord0: Color::Rgb(46, 52, 64),
            nord1: Color::Rgb(59, 66, 82),
            nord2: Color::Rgb(76, 86, 106),
            nord3: Color::Rgb(97, 110, 136),
            nord4: Color::Rgb(216, 222, 233),
            nord5: Color::Rgb(229, 233, 240),
            nord8: Color::Rgb(136, 192, 208),
            nord9: Color::Rgb(129, 161, 193),
            nord13: Color::Rgb(235, 203, 139),
            nord14: Color::Rgb(163, 190, 140),
        }
    }
}

impl NordTheme {
    pub fn bg(&self) -> Color {
        self.nord0
    }
    pub fn bg_secondary(&self) -> Color {
        self.nord1
    }
    pub fn border(&self) -> Color {
        self.nord2
    }
    pub fn muted(&self) -> Color {
        self.nord3
    }
    pub fn fg(&self) -> Color {
        self.nord4
    }
    pub fn fg_bright(&self) -> Color {
        self.nord5
    }
    pub fn frost_ice(&self) -> Color {
        self.nord8
    }
    pub fn frost_blue(&self) -> Color {
        self.nord9
    }
    pub fn yellow(&self) -> Color {
        self.nord13
    }
    pub fn green(&self) -> Color {
        self.nord14
    }
}
