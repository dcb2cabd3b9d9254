use core::fmt;
use core::time::Duration;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Valid transitions:
/// - Initial -> Running
/// - Initial -> Won
/// - Running -> Won
/// - Running -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Nothing opened yet, mines not placed
    Initial,
    Running,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::Initial)
    }

    /// Indicates the game has ended and no moves can change it anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Initial
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Open,
    Flag,
}

/// One effective move, as recorded in [`Game::history`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameAction {
    pub kind: ActionKind,
    pub position: Position,
}

impl GameAction {
    pub const fn open(position: Position) -> Self {
        Self {
            kind: ActionKind::Open,
            position,
        }
    }

    pub const fn flag(position: Position) -> Self {
        Self {
            kind: ActionKind::Flag,
            position,
        }
    }
}

/// Start and end instants, as read from the [`Clock`] passed to the transitions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTime {
    pub start: Option<Duration>,
    pub end: Option<Duration>,
}

/// Immutable snapshot of a game.
///
/// Transitions ([`Game::open`], [`Game::flag`]) never touch the receiver, they return the next
/// snapshot. A move that changes nothing returns a copy equal to the receiver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    settings: GameSettings,
    hot: Grid<bool>,
    hint: Grid<u8>,
    opened: Grid<bool>,
    flagged: Grid<bool>,
    history: Vec<GameAction>,
    time: GameTime,
}

impl Game {
    /// New game with clamped settings, see [`GameSettings::new`].
    pub fn create(rows: usize, columns: usize, bombs: usize) -> Self {
        Self::new(GameSettings::new(rows, columns, bombs))
    }

    pub fn new(settings: GameSettings) -> Self {
        let settings = GameSettings::new(settings.rows, settings.columns, settings.bombs);
        let blank = Grid::initial(settings.rows, settings.columns)
            .expect("settings always describe at least one cell");
        Self {
            settings,
            hot: blank.map(|_, _| false),
            hint: blank.map(|_, _| 0),
            opened: blank.map(|_, _| false),
            flagged: blank.map(|_, _| false),
            history: Vec::new(),
            time: Default::default(),
        }
    }

    /// Rebuilds a game by applying `history` on top of a known mine layout.
    ///
    /// Fails when the layout does not fit `settings` in shape or mine count.
    pub fn replay<C: Clock + ?Sized>(
        settings: GameSettings,
        mines: Grid<bool>,
        history: &[GameAction],
        clock: &C,
    ) -> Result<Self> {
        let layout = PresetMinefield::for_settings(settings, mines)?;
        Ok(history
            .iter()
            .fold(Self::new(settings), |game, action| match action.kind {
                ActionKind::Open => game.open_with(action.position, &layout, clock),
                ActionKind::Flag => game.flag(action.position),
            }))
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn rows(&self) -> usize {
        self.settings.rows
    }

    pub fn columns(&self) -> usize {
        self.settings.columns
    }

    pub fn all_positions(&self) -> impl Iterator<Item = Position> + use<> {
        self.opened.all_positions()
    }

    pub fn neighbours(&self, pos: Position) -> SmallVec<[Position; 8]> {
        self.opened.neighbours(pos)
    }

    pub fn history(&self) -> &[GameAction] {
        &self.history
    }

    pub fn time(&self) -> GameTime {
        self.time
    }

    /// Mine layout, all clear until the first cell is opened.
    pub fn hot_cells(&self) -> &Grid<bool> {
        &self.hot
    }

    pub fn status(&self) -> GameStatus {
        match self.time {
            GameTime { start: None, .. } => GameStatus::Initial,
            GameTime { end: None, .. } => GameStatus::Running,
            _ => match self.history.last() {
                Some(action) if self.hot[action.position] => GameStatus::Lost,
                _ => GameStatus::Won,
            },
        }
    }

    pub fn cell_info(&self, pos: Position) -> CellInfo {
        self.cell_info_with(pos, Visibility::Player)
    }

    pub fn cell_info_with(&self, pos: Position, visibility: Visibility) -> CellInfo {
        let opened = self.opened[pos];
        let flagged = self.flagged[pos];
        let hot = self.hot[pos];
        let hint = self.hint[pos];
        CellInfo {
            row: pos.row,
            column: pos.column,
            opened,
            flagged,
            hot,
            hint,
            label: Label::pick(opened, flagged, hot, hint, visibility),
        }
    }

    pub fn opened_count(&self) -> usize {
        self.opened.count(|&opened| opened)
    }

    pub fn flag_count(&self) -> usize {
        self.flagged.count(|&flagged| flagged)
    }

    /// How many safe cells the player still has to open to win
    pub fn still_to_open(&self) -> usize {
        (self.settings.total_cells() - self.opened_count()).saturating_sub(self.settings.bombs)
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> isize {
        (self.settings.bombs as isize) - (self.flag_count() as isize)
    }

    /// Time played: zero before the first open, up to `clock` while running, frozen once ended.
    pub fn game_time<C: Clock + ?Sized>(&self, clock: &C) -> Duration {
        match self.time {
            GameTime { start: None, .. } => Duration::ZERO,
            GameTime {
                start: Some(start),
                end: None,
            } => clock.now().saturating_sub(start),
            GameTime {
                start: Some(start),
                end: Some(end),
            } => end.saturating_sub(start),
        }
    }

    /// Opens a cell, placing mines at random from `rng` if this is the first open.
    pub fn open<R, C>(&self, pos: Position, rng: &mut R, clock: &C) -> Self
    where
        R: Rng + ?Sized,
        C: Clock + ?Sized,
    {
        self.open_with(pos, RandomMinefieldGenerator::new(rng), clock)
    }

    /// Opens a cell, asking `generator` for the mine layout if this is the first open.
    ///
    /// Opened and flagged cells are left alone. A mine ends the game as lost; otherwise the cell
    /// is revealed together with the blank region around it, and the game is won once only mines
    /// remain covered.
    pub fn open_with<G, C>(&self, pos: Position, generator: G, clock: &C) -> Self
    where
        G: MinefieldGenerator,
        C: Clock + ?Sized,
    {
        if self.opened[pos] || self.flagged[pos] {
            log::trace!("Ignoring open at {}", pos);
            return self.clone();
        }

        if self.hot[pos] {
            log::debug!("Opened mine at {}", pos);
            return self.end_game(pos, clock);
        }

        let mut next = self.clone();
        if self.opened_count() == 0 {
            next.lay_mines(pos, generator, clock);
        }

        let opened = next.flood_open(pos);
        next.flagged = next.flagged.map(|&flagged, cell| flagged && !opened[cell]);
        next.opened = opened;

        if next.opened.count(|&opened| !opened) == next.settings.bombs {
            return next.end_game(pos, clock);
        }

        next.history.push(GameAction::open(pos));
        next
    }

    /// Toggles the flag on a covered cell, opened cells are left alone.
    pub fn flag(&self, pos: Position) -> Self {
        if self.opened[pos] {
            return self.clone();
        }

        let mut next = self.clone();
        next.flagged = self.flagged.set(pos, !self.flagged[pos]);
        next.history.push(GameAction::flag(pos));
        next
    }

    /// First open: place mines away from `first`, drop any flags and start the clock.
    fn lay_mines<G: MinefieldGenerator, C: Clock + ?Sized>(
        &mut self,
        first: Position,
        generator: G,
        clock: &C,
    ) {
        let mut hot = generator.generate(self.settings, first);
        assert!(
            hot.same_shape(&self.hot),
            "generated layout does not match the board"
        );
        if hot.replace(first, false) {
            log::warn!("Generator mined the first opened cell {}, clearing it", first);
        }
        let bombs = hot.count(|&mine| mine);
        if bombs != self.settings.bombs {
            log::warn!(
                "Generator laid {} mines instead of {}, playing with {}",
                bombs,
                self.settings.bombs,
                bombs
            );
            self.settings.bombs = bombs;
        }
        self.hot = hot;
        self.hint = hints(&self.hot);
        self.flagged = self.flagged.map(|_, _| false);

        let now = clock.now();
        log::debug!("started at {:?}", now);
        self.time.start = Some(now);
    }

    /// Opened grid after revealing `from`: the blank region connected to it, then the border of
    /// every blank cell opened along the way.
    fn flood_open(&self, from: Position) -> Grid<bool> {
        let mut opened = self.opened.clone();
        opened.replace(from, true);

        let mut blanks = Vec::new();
        let mut to_visit = Vec::new();
        if self.is_blank(from) {
            to_visit.push(from);
        }

        while let Some(cell) = to_visit.pop() {
            blanks.push(cell);
            for neighbor in self.hint.iter_neighbors(cell) {
                if !opened[neighbor] && self.is_blank(neighbor) {
                    opened.replace(neighbor, true);
                    to_visit.push(neighbor);
                }
            }
        }
        log::trace!("Flood from {} reached {} blank cells", from, blanks.len());

        for &cell in &blanks {
            for neighbor in self.hint.iter_neighbors(cell) {
                opened.replace(neighbor, true);
            }
        }

        opened
    }

    fn is_blank(&self, pos: Position) -> bool {
        self.hint[pos] == 0 && !self.hot[pos]
    }

    /// Records the final open, stops the clock and uncovers the whole board. Flags stay.
    fn end_game<C: Clock + ?Sized>(&self, last: Position, clock: &C) -> Self {
        let now = clock.now();
        let mut next = self.clone();
        next.history.push(GameAction::open(last));
        next.time.start.get_or_insert(now);
        next.time.end = Some(now);
        next.opened = self.opened.map(|_, _| true);
        log::debug!("ended at {:?}, {:?}", now, next.status());
        next
    }
}

/// Board dump for debugging: covered cells as `.`, everything else as its debug label.
impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.opened.row_indices() {
            for column in self.opened.column_indices() {
                let info = self.cell_info_with(Position::new(row, column), Visibility::Debug);
                let glyph = match info.label {
                    Label::Blank if !info.opened => '.',
                    label => label.glyph(),
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
