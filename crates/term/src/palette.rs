//! Colour flavors.
//!
//! Piece colours are indexed by settled cell value (1..=7 for O, I, S, Z, T,
//! L, J). The flavor is passed to [`crate::GameView`] explicitly.

use crate::fb::Rgb;
use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flavor {
    Latte,
    Frappe,
    Macchiato,
    #[default]
    Mocha,
}

impl Flavor {
    pub const ALL: [Flavor; 4] = [Flavor::Latte, Flavor::Frappe, Flavor::Macchiato, Flavor::Mocha];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "latte" => Some(Flavor::Latte),
            "frappe" => Some(Flavor::Frappe),
            "macchiato" => Some(Flavor::Macchiato),
            "mocha" => Some(Flavor::Mocha),
            _ => None,
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Flavor::Latte => LATTE,
            Flavor::Frappe => FRAPPE,
            Flavor::Macchiato => MACCHIATO,
            Flavor::Mocha => MOCHA,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// O, I, S, Z, T, L, J
    pub pieces: [Rgb; 7],
    pub board_bg: Rgb,
    pub preview_bg: Rgb,
    /// Empty-cell dots and the border
    pub grid: Rgb,
    pub text: Rgb,
    /// Row-clear sweep
    pub sweep: Rgb,
}

impl Palette {
    pub fn piece(&self, kind: PieceKind) -> Rgb {
        self.pieces[kind.index()]
    }

    /// Colour of a settled cell value, `None` for empty or unknown values
    pub fn cell(&self, value: u8) -> Option<Rgb> {
        PieceKind::from_cell_value(value).map(|kind| self.piece(kind))
    }
}

#[rustfmt::skip]
const LATTE: Palette = Palette {
    pieces: [
        Rgb::hex(0xdf8e1d), // yellow
        Rgb::hex(0x04a5e5), // sky
        Rgb::hex(0x40a02b), // green
        Rgb::hex(0xd20f39), // red
        Rgb::hex(0x8839ef), // mauve
        Rgb::hex(0xfe640b), // peach
        Rgb::hex(0x1e66f5), // blue
    ],
    board_bg:   Rgb::hex(0xeff1f5),
    preview_bg: Rgb::hex(0xe6e9ef),
    grid:       Rgb::hex(0x9ca0b0),
    text:       Rgb::hex(0x4c4f69),
    sweep:      Rgb::hex(0xccd0da),
};

#[rustfmt::skip]
const FRAPPE: Palette = Palette {
    pieces: [
        Rgb::hex(0xe5c890),
        Rgb::hex(0x99d1db),
        Rgb::hex(0xa6d189),
        Rgb::hex(0xe78284),
        Rgb::hex(0xca9ee6),
        Rgb::hex(0xef9f76),
        Rgb::hex(0x8caaee),
    ],
    board_bg:   Rgb::hex(0x303446),
    preview_bg: Rgb::hex(0x292c3c),
    grid:       Rgb::hex(0x737994),
    text:       Rgb::hex(0xc6d0f5),
    sweep:      Rgb::hex(0x414559),
};

#[rustfmt::skip]
const MACCHIATO: Palette = Palette {
    pieces: [
        Rgb::hex(0xeed49f),
        Rgb::hex(0x91d7e3),
        Rgb::hex(0xa6da95),
        Rgb::hex(0xed8796),
        Rgb::hex(0xc6a0f6),
        Rgb::hex(0xf5a97f),
        Rgb::hex(0x8aadf4),
    ],
    board_bg:   Rgb::hex(0x24273a),
    preview_bg: Rgb::hex(0x1e2030),
    grid:       Rgb::hex(0x6e738d),
    text:       Rgb::hex(0xcad3f5),
    sweep:      Rgb::hex(0x363a4f),
};

#[rustfmt::skip]
const MOCHA: Palette = Palette {
    pieces: [
        Rgb::hex(0xf9e2af),
        Rgb::hex(0x89dceb),
        Rgb::hex(0xa6e3a1),
        Rgb::hex(0xf38ba8),
        Rgb::hex(0xcba6f7),
        Rgb::hex(0xfab387),
        Rgb::hex(0x89b4fa),
    ],
    board_bg:   Rgb::hex(0x1e1e2e),
    preview_bg: Rgb::hex(0x181825),
    grid:       Rgb::hex(0x6c7086),
    text:       Rgb::hex(0xcdd6f4),
    sweep:      Rgb::hex(0x313244),
};
