use serde::{Deserialize, Serialize};

/// Who is looking at the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    /// Only what the player is allowed to see
    #[default]
    Player,
    /// Also shows mines that are still covered
    Debug,
}

/// What a single cell shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    /// Flag left on a cell that turned out to be safe
    WrongFlag,
    Flag,
    /// Opened mine
    Mine,
    /// Opened safe cell with mined neighbours
    Hint(u8),
    /// Covered mine, only under [`Visibility::Debug`]
    HiddenMine,
    Blank,
}

impl Label {
    /// Picks the label for a cell. The checks run in order and the first match wins.
    pub fn pick(opened: bool, flagged: bool, hot: bool, hint: u8, visibility: Visibility) -> Self {
        if flagged && opened && !hot {
            return Self::WrongFlag;
        }
        if flagged && !opened {
            return Self::Flag;
        }
        if opened && hot {
            return Self::Mine;
        }
        if opened {
            return if hint == 0 {
                Self::Blank
            } else {
                Self::Hint(hint)
            };
        }
        if visibility == Visibility::Debug && hot {
            return Self::HiddenMine;
        }
        Self::Blank
    }

    pub const fn glyph(self) -> char {
        match self {
            Self::WrongFlag => 'X',
            Self::Flag => 'F',
            Self::Mine => '*',
            Self::Hint(hint) => match char::from_digit(hint as u32, 10) {
                Some(digit) => digit,
                None => '#',
            },
            Self::HiddenMine => 'm',
            Self::Blank => ' ',
        }
    }
}

impl core::fmt::Display for Label {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Everything a renderer needs to draw one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellInfo {
    pub row: usize,
    pub column: usize,
    pub opened: bool,
    pub flagged: bool,
    pub hot: bool,
    pub hint: u8,
    pub label: Label,
}

#[cfg(test)]
mod tests {
    use super::*;
    use Visibility::*;

    #[test]
    fn wrong_flag_beats_everything() {
        assert_eq!(Label::pick(true, true, false, 3, Debug), Label::WrongFlag);
    }

    #[test]
    fn covered_flag_hides_mine_even_in_debug() {
        assert_eq!(Label::pick(false, true, true, 0, Debug), Label::Flag);
        assert_eq!(Label::pick(false, true, false, 2, Player), Label::Flag);
    }

    #[test]
    fn flagged_opened_mine_shows_mine() {
        assert_eq!(Label::pick(true, true, true, 1, Player), Label::Mine);
        assert_eq!(Label::pick(true, false, true, 1, Player), Label::Mine);
    }

    #[test]
    fn opened_safe_cells_show_hint_or_blank() {
        assert_eq!(Label::pick(true, false, false, 4, Player), Label::Hint(4));
        assert_eq!(Label::pick(true, false, false, 0, Debug), Label::Blank);
    }

    #[test]
    fn covered_mine_only_visible_in_debug() {
        assert_eq!(Label::pick(false, false, true, 0, Debug), Label::HiddenMine);
        assert_eq!(Label::pick(false, false, true, 0, Player), Label::Blank);
        assert_eq!(Label::pick(false, false, false, 5, Debug), Label::Blank);
    }

    #[test]
    fn glyphs() {
        assert_eq!(Label::Hint(8).glyph(), '8');
        assert_eq!(Label::Blank.to_string(), " ");
    }

    #[test]
    fn out_of_range_hints_have_a_glyph() {
        assert_eq!(Label::Hint(10).glyph(), '#');
        assert_eq!(Label::Hint(u8::MAX).to_string(), "#");
    }
}
