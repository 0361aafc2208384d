//! LED colours and their command letters
//!
//! Each of the five indicator LEDs stands for one command letter, A to E.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Indicator LED colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LedColor {
    /// Letter A
    White,
    /// Letter B
    Yellow,
    /// Letter C
    Green,
    /// Letter D
    Red,
    /// Letter E
    Blue,
}

impl LedColor {
    /// All colours in letter order
    pub const ALL: [LedColor; 5] = [
        LedColor::White,
        LedColor::Yellow,
        LedColor::Green,
        LedColor::Red,
        LedColor::Blue,
    ];

    /// Command letter for this colour
    pub const fn letter(self) -> char {
        match self {
            LedColor::White => 'A',
            LedColor::Yellow => 'B',
            LedColor::Green => 'C',
            LedColor::Red => 'D',
            LedColor::Blue => 'E',
        }
    }

    /// Look up a colour by command letter (case-insensitive)
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(LedColor::White),
            'B' => Some(LedColor::Yellow),
            'C' => Some(LedColor::Green),
            'D' => Some(LedColor::Red),
            'E' => Some(LedColor::Blue),
            _ => None,
        }
    }

    /// Lowercase colour name, as used for `[leds]` keys in device.toml
    pub const fn name(self) -> &'static str {
        match self {
            LedColor::White => "white",
            LedColor::Yellow => "yellow",
            LedColor::Green => "green",
            LedColor::Red => "red",
            LedColor::Blue => "blue",
        }
    }

    /// Look up a colour by its lowercase name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl core::fmt::Display for LedColor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_in_order() {
        let letters: [char; 5] = LedColor::ALL.map(LedColor::letter);
        assert_eq!(letters, ['A', 'B', 'C', 'D', 'E']);
    }

    #[test]
    fn test_from_letter() {
        for color in LedColor::ALL {
            assert_eq!(LedColor::from_letter(color.letter()), Some(color));
            assert_eq!(
                LedColor::from_letter(color.letter().to_ascii_lowercase()),
                Some(color)
            );
        }
        assert_eq!(LedColor::from_letter('F'), None);
        assert_eq!(LedColor::from_letter('1'), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(LedColor::from_name("red"), Some(LedColor::Red));
        assert_eq!(LedColor::from_name("Red"), None);
        assert_eq!(LedColor::from_name("purple"), None);
        assert_eq!(LedColor::Blue.name(), "blue");
    }
}
