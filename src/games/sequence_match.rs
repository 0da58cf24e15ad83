//! SequenceMatch - trace a colour sequence across a hex grid
//!
//! The grid uses offset coordinates with odd rows shifted right. Cells are
//! addressed by `row * cols + col`. A generated grid is only accepted when
//! the target colours match exactly one directed path, so the answer can be
//! found from the board alone.

use serde::{Deserialize, Serialize};

use super::difficulty::capped;
use super::{GameId, PuzzleGenerator, Response};
use crate::consts::MAX_GENERATION_ATTEMPTS;
use crate::rng::GameRng;

/// Palette size
pub const COLOURS: usize = 6;

const EVEN_ROW_NEIGHBOURS: [(isize, isize); 6] =
    [(0, -1), (0, 1), (-1, -1), (-1, 0), (1, -1), (1, 0)];
const ODD_ROW_NEIGHBOURS: [(isize, isize); 6] = [(0, -1), (0, 1), (-1, 0), (-1, 1), (1, 0), (1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceMatchParams {
    pub level: u32,
    pub size: usize,
    pub path_len: usize,
}

pub fn params(signal: u32) -> SequenceMatchParams {
    let level = (signal / 2).min(10);
    SequenceMatchParams {
        level,
        size: capped(3, level / 3, 5) as usize,
        path_len: capped(2, level / 2, 4) as usize,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceMatchPuzzle {
    pub rows: usize,
    pub cols: usize,
    /// Colour per cell, row-major
    pub colours: Vec<usize>,
    /// Colour sequence to trace
    pub target: Vec<usize>,
    /// The one path that spells `target`
    pub path: Vec<usize>,
}

/// Hex neighbours of `cell`
pub fn neighbours(rows: usize, cols: usize, cell: usize) -> Vec<usize> {
    let (r, c) = ((cell / cols) as isize, (cell % cols) as isize);
    let deltas = if r % 2 == 0 {
        &EVEN_ROW_NEIGHBOURS
    } else {
        &ODD_ROW_NEIGHBOURS
    };
    deltas
        .iter()
        .map(|(dr, dc)| (r + dr, c + dc))
        .filter(|&(nr, nc)| nr >= 0 && nc >= 0 && (nr as usize) < rows && (nc as usize) < cols)
        .map(|(nr, nc)| nr as usize * cols + nc as usize)
        .collect()
}

/// Randomized depth-first extension of `path` to `len` cells
fn extend_path(rows: usize, cols: usize, path: &mut Vec<usize>, len: usize, rng: &mut GameRng) -> bool {
    if path.len() >= len {
        return true;
    }
    let Some(&last) = path.last() else {
        return false;
    };
    let options = rng.shuffled(&neighbours(rows, cols, last));
    for next in options {
        if path.contains(&next) {
            continue;
        }
        path.push(next);
        if extend_path(rows, cols, path, len, rng) {
            return true;
        }
        path.pop();
    }
    false
}

impl SequenceMatchPuzzle {
    /// Number of directed simple paths spelling `target`, counting up to `limit`
    pub fn count_matching_paths(&self, limit: usize) -> usize {
        let mut count = 0;
        let mut path = Vec::with_capacity(self.target.len());
        for start in 0..self.colours.len() {
            if self.target.first() == Some(&self.colours[start]) {
                path.push(start);
                self.count_from(&mut path, limit, &mut count);
                path.pop();
            }
            if count >= limit {
                break;
            }
        }
        count
    }

    fn count_from(&self, path: &mut Vec<usize>, limit: usize, count: &mut usize) {
        if *count >= limit {
            return;
        }
        if path.len() == self.target.len() {
            *count += 1;
            return;
        }
        let Some(&last) = path.last() else {
            return;
        };
        let want = self.target[path.len()];
        for next in neighbours(self.rows, self.cols, last) {
            if self.colours[next] == want && !path.contains(&next) {
                path.push(next);
                self.count_from(path, limit, count);
                path.pop();
            }
        }
    }

    /// True if consecutive cells of `cells` are hex neighbours
    pub fn is_connected(&self, cells: &[usize]) -> bool {
        cells
            .windows(2)
            .all(|w| neighbours(self.rows, self.cols, w[0]).contains(&w[1]))
    }

    fn fallback(rows: usize, cols: usize, path: Vec<usize>, rng: &mut GameRng) -> Self {
        log::warn!("SequenceMatch: no unique colouring found, using distinct path colours");
        let len = path.len();
        let mut colours: Vec<usize> = (0..rows * cols).map(|_| rng.int(len, COLOURS - 1)).collect();
        for (colour, &cell) in path.iter().enumerate() {
            colours[cell] = colour;
        }
        Self {
            rows,
            cols,
            colours,
            target: (0..len).collect(),
            path,
        }
    }
}

impl PuzzleGenerator for SequenceMatchPuzzle {
    const GAME: GameId = GameId::SequenceMatch;

    fn generate(difficulty: u32, rng: &mut GameRng) -> Self {
        let p = params(difficulty);
        let (rows, cols) = (p.size, p.size);

        let mut path = vec![rng.index(rows * cols)];
        if !extend_path(rows, cols, &mut path, p.path_len, rng) {
            // Every grid here is at least 3x3, so this only trims the length
            log::warn!("SequenceMatch: path stuck at {} cells", path.len());
        }

        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let colours: Vec<usize> = (0..rows * cols).map(|_| rng.index(COLOURS)).collect();
            let target = path.iter().map(|&cell| colours[cell]).collect();
            let candidate = Self {
                rows,
                cols,
                colours,
                target,
                path: path.clone(),
            };
            if candidate.count_matching_paths(2) == 1 {
                return candidate;
            }
        }
        Self::fallback(rows, cols, path, rng)
    }

    fn check(&self, response: &Response) -> bool {
        matches!(response, Response::Sequence(cells) if *cells == self.path)
    }

    fn solution(&self) -> Response {
        Response::Sequence(self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_neighbours_offset_rows() {
        // 3x3: even row 0, odd row 1
        let mut n = neighbours(3, 3, 4);
        n.sort_unstable();
        assert_eq!(n, vec![1, 2, 3, 5, 7, 8]);
        let mut n = neighbours(3, 3, 0);
        n.sort_unstable();
        assert_eq!(n, vec![1, 3]);
    }

    #[test]
    fn test_neighbours_symmetric() {
        for cell in 0..25 {
            for other in neighbours(5, 5, cell) {
                assert!(neighbours(5, 5, other).contains(&cell), "{cell} {other}");
            }
        }
    }

    #[test]
    fn test_fallback_is_unique() {
        let mut rng = GameRng::new(6);
        let puzzle = SequenceMatchPuzzle::fallback(3, 3, vec![0, 1, 4, 5], &mut rng);
        assert_eq!(puzzle.count_matching_paths(2), 1);
        assert!(puzzle.check(&Response::Sequence(vec![0, 1, 4, 5])));
    }

    #[test]
    fn test_reversed_path_rejected() {
        let mut rng = GameRng::new(12);
        let puzzle = SequenceMatchPuzzle::generate(4, &mut rng);
        let mut reversed = puzzle.path.clone();
        reversed.reverse();
        assert!(!puzzle.check(&Response::Sequence(reversed)));
    }

    proptest! {
        #[test]
        fn prop_params_monotone(signal in 0u32..500) {
            let (a, b) = (params(signal), params(signal + 1));
            prop_assert!(b.level >= a.level);
            prop_assert!(b.size >= a.size);
            prop_assert!(b.path_len >= a.path_len);
        }

        #[test]
        fn prop_single_directed_path(seed in any::<u64>(), signal in 0u32..30) {
            let mut rng = GameRng::new(seed);
            let p = params(signal);
            let puzzle = SequenceMatchPuzzle::generate(signal, &mut rng);
            prop_assert_eq!(puzzle.path.len(), p.path_len);
            prop_assert!(puzzle.is_connected(&puzzle.path));
            prop_assert_eq!(puzzle.count_matching_paths(2), 1);
            let spelled: Vec<usize> = puzzle.path.iter().map(|&c| puzzle.colours[c]).collect();
            prop_assert_eq!(&spelled, &puzzle.target);
            prop_assert!(puzzle.check(&puzzle.solution()));
        }
    }
}
