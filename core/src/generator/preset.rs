use super::*;

/// Replays a known mine layout, used to reproduce recorded games and in tests.
///
/// Only built against the settings it will be played with, so shape and mine count always agree
/// with the board.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetMinefield {
    settings: GameSettings,
    mines: Grid<bool>,
}

impl PresetMinefield {
    pub fn for_settings(settings: GameSettings, mines: Grid<bool>) -> Result<Self> {
        let settings = GameSettings::new(settings.rows, settings.columns, settings.bombs);
        let expected = (settings.rows, settings.columns);
        if mines.shape() != expected {
            return Err(GameError::LayoutShape {
                expected,
                found: mines.shape(),
            });
        }

        let found = mines.count(|&mine| mine);
        if found != settings.bombs {
            return Err(GameError::MineCount {
                expected: settings.bombs,
                found,
            });
        }

        Ok(Self { settings, mines })
    }

    pub fn from_mine_positions(settings: GameSettings, mines: &[Position]) -> Result<Self> {
        let mut mask = Grid::initial(settings.rows, settings.columns)?.map(|_, _| false);
        for &pos in mines {
            if !mask.contains(pos) {
                return Err(GameError::InvalidCoords);
            }
            mask.replace(pos, true);
        }
        Self::for_settings(settings, mask)
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn mines(&self) -> &Grid<bool> {
        &self.mines
    }
}

impl MinefieldGenerator for PresetMinefield {
    fn generate(self, settings: GameSettings, exclude: Position) -> Grid<bool> {
        (&self).generate(settings, exclude)
    }
}

impl MinefieldGenerator for &PresetMinefield {
    fn generate(self, settings: GameSettings, exclude: Position) -> Grid<bool> {
        if settings != self.settings {
            log::warn!(
                "Preset layout built for {:?} played on {:?}",
                self.settings,
                settings
            );
        }
        if self.mines[exclude] {
            log::warn!("Preset layout has a mine on the first opened cell {}", exclude);
        }
        self.mines.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_must_match_bomb_count() {
        let settings = GameSettings::new(1, 4, 2);

        assert_eq!(
            PresetMinefield::from_mine_positions(settings, &[Position::new(0, 3)]),
            Err(GameError::MineCount {
                expected: 2,
                found: 1
            })
        );
        assert!(
            PresetMinefield::from_mine_positions(
                settings,
                &[Position::new(0, 2), Position::new(0, 3)]
            )
            .is_ok()
        );
    }

    #[test]
    fn layout_must_match_board_shape() {
        let mines = Grid::from_elem(2, 2, false);

        assert_eq!(
            PresetMinefield::for_settings(GameSettings::new(3, 3, 0), mines),
            Err(GameError::LayoutShape {
                expected: (3, 3),
                found: (2, 2)
            })
        );
    }

    #[test]
    fn positions_outside_board_are_rejected() {
        assert_eq!(
            PresetMinefield::from_mine_positions(GameSettings::new(2, 2, 1), &[Position::new(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn counts_against_clamped_settings() {
        let preset = PresetMinefield::from_mine_positions(
            GameSettings::new_unchecked(1, 2, 5),
            &[Position::new(0, 1)],
        )
        .unwrap();

        assert_eq!(preset.settings(), GameSettings::new_unchecked(1, 2, 1));
        assert_eq!(preset.mines().count(|&mine| mine), 1);
    }
}
