use rand::Rng;

use super::*;

/// Uniform placement over every cell but the excluded one, driven by an injected random source.
#[derive(Debug)]
pub struct RandomMinefieldGenerator<'r, R: ?Sized> {
    rng: &'r mut R,
}

impl<'r, R: Rng + ?Sized> RandomMinefieldGenerator<'r, R> {
    pub fn new(rng: &'r mut R) -> Self {
        Self { rng }
    }

    fn random_position(&mut self, (rows, columns): (usize, usize)) -> Position {
        Position::new(
            self.rng.random_range(0..rows),
            self.rng.random_range(0..columns),
        )
    }
}

impl<R: Rng + ?Sized> MinefieldGenerator for RandomMinefieldGenerator<'_, R> {
    fn generate(mut self, settings: GameSettings, exclude: Position) -> Grid<bool> {
        let shape = (settings.rows, settings.columns);
        let candidates = settings.total_cells() - 1;
        let target = settings.bombs.min(candidates);

        // past half density it is cheaper to sample the safe cells than the mines
        let dense = target * 2 > candidates;
        log::debug!(
            "Generating {} mines on {}x{} excluding {}, {}",
            target,
            shape.0,
            shape.1,
            exclude,
            if dense { "removing from full board" } else { "adding to empty board" }
        );

        let mut mines = Grid::from_elem(shape.0, shape.1, dense);
        mines.replace(exclude, false);
        let mut placed = if dense { candidates } else { 0 };

        while placed != target {
            let pos = self.random_position(shape);
            if pos == exclude || mines[pos] != dense {
                continue;
            }
            mines.replace(pos, !dense);
            if dense {
                placed -= 1;
            } else {
                placed += 1;
            }
        }

        mines
    }
}
