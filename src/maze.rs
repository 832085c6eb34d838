//! Perfect maze generation with randomized Prim's algorithm.
//!
//! Every cell starts with all four walls standing. Generation grows a single
//! region from (0, 0) by repeatedly knocking down a uniformly chosen frontier
//! wall whose far side is not yet part of the maze, so the result is a
//! spanning tree over the grid: connected, acyclic, exactly one route between
//! any two cells.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dir {
    North,
    South,
    East,
    West,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::North, Dir::South, Dir::East, Dir::West];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::North => (0, -1),
            Dir::South => (0, 1),
            Dir::East => (1, 0),
            Dir::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::North => Dir::South,
            Dir::South => Dir::North,
            Dir::East => Dir::West,
            Dir::West => Dir::East,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Dir::North => 'N',
            Dir::South => 'S',
            Dir::East => 'E',
            Dir::West => 'W',
        }
    }

    fn index(self) -> usize {
        match self {
            Dir::North => 0,
            Dir::South => 1,
            Dir::East => 2,
            Dir::West => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// One grid cell. `true` in a slot means the wall on that side is standing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    walls: [bool; 4],
}

impl Cell {
    fn closed() -> Self {
        Self { walls: [true; 4] }
    }

    pub fn has_wall(&self, dir: Dir) -> bool {
        self.walls[dir.index()]
    }

    fn knock_down(&mut self, dir: Dir) {
        self.walls[dir.index()] = false;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Width or height was zero.
    InvalidDimensions { width: usize, height: usize },
    /// Two in-bounds cells have no route between them. Only a generator bug
    /// can produce this.
    Disconnected { from: Pos, to: Pos },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidDimensions { width, height } => {
                write!(f, "invalid maze dimensions {}x{}", width, height)
            }
            MazeError::Disconnected { from, to } => write!(
                f,
                "maze is disconnected: no path from ({}, {}) to ({}, {})",
                from.x, from.y, to.x, to.y
            ),
        }
    }
}

impl std::error::Error for MazeError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Maze {
    pub fn generate(width: usize, height: usize, rng: &mut impl Rng) -> Result<Maze, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }

        let mut maze = Maze {
            width,
            height,
            cells: vec![Cell::closed(); width * height],
        };
        let mut in_maze = vec![false; width * height];
        let mut frontier: Vec<(Pos, Dir)> = Vec::new();

        let start = Pos::new(0, 0);
        in_maze[0] = true;
        add_frontier(&maze, start, &in_maze, &mut frontier);

        while !frontier.is_empty() {
            let idx = rng.gen_range(0..frontier.len());
            let (pos, dir) = frontier.swap_remove(idx);
            let Some(next) = maze.neighbor(pos, dir) else {
                continue;
            };
            let next_idx = maze.index(next);
            if in_maze[next_idx] {
                continue;
            }

            maze.carve(pos, dir, next);
            in_maze[next_idx] = true;
            add_frontier(&maze, next, &in_maze, &mut frontier);
        }

        Ok(maze)
    }

    /// Deterministic generation: the same seed always yields the same maze.
    pub fn generate_seeded(width: usize, height: usize, seed: u64) -> Result<Maze, MazeError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::generate(width, height, &mut rng)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Panics if `pos` is outside the grid.
    pub fn cell(&self, pos: Pos) -> &Cell {
        &self.cells[self.index(pos)]
    }

    pub fn has_wall(&self, pos: Pos, dir: Dir) -> bool {
        self.cell(pos).has_wall(dir)
    }

    pub fn neighbor(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let nx = pos.x as isize + dx;
        let ny = pos.y as isize + dy;
        if nx < 0 || ny < 0 {
            return None;
        }
        let next = Pos::new(nx as usize, ny as usize);
        self.in_bounds(next).then_some(next)
    }

    /// Neighbors reachable through a knocked-down wall.
    pub fn open_neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        Dir::ALL.into_iter().filter_map(move |dir| {
            if self.has_wall(pos, dir) {
                None
            } else {
                self.neighbor(pos, dir)
            }
        })
    }

    /// Number of open passages between adjacent cells. A perfect maze has
    /// exactly `width * height - 1`.
    pub fn passage_count(&self) -> usize {
        let mut count = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Pos::new(x, y);
                if x + 1 < self.width && !self.has_wall(pos, Dir::East) {
                    count += 1;
                }
                if y + 1 < self.height && !self.has_wall(pos, Dir::South) {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn cells(&self) -> impl Iterator<Item = (Pos, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Pos::new(i % self.width, i / self.width), cell))
    }

    fn index(&self, pos: Pos) -> usize {
        pos.y * self.width + pos.x
    }

    fn carve(&mut self, pos: Pos, dir: Dir, next: Pos) {
        let a = self.index(pos);
        let b = self.index(next);
        self.cells[a].knock_down(dir);
        self.cells[b].knock_down(dir.opposite());
    }
}

fn add_frontier(maze: &Maze, pos: Pos, in_maze: &[bool], frontier: &mut Vec<(Pos, Dir)>) {
    for dir in Dir::ALL {
        if let Some(next) = maze.neighbor(pos, dir) {
            if !in_maze[maze.index(next)] {
                frontier.push((pos, dir));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Maze::generate_seeded(0, 5, 1),
            Err(MazeError::InvalidDimensions { width: 0, height: 5 })
        );
        assert!(Maze::generate_seeded(5, 0, 1).is_err());
    }

    #[test]
    fn single_cell_maze_keeps_all_walls() {
        let maze = Maze::generate_seeded(1, 1, 7).unwrap();
        let cell = maze.cell(Pos::new(0, 0));
        assert!(Dir::ALL.iter().all(|d| cell.has_wall(*d)));
        assert_eq!(maze.passage_count(), 0);
    }

    #[test]
    fn passages_form_a_spanning_tree() {
        for seed in 0..20 {
            let maze = Maze::generate_seeded(12, 9, seed).unwrap();
            assert_eq!(maze.passage_count(), 12 * 9 - 1);
        }
    }

    #[test]
    fn adjacent_flags_agree() {
        let maze = Maze::generate_seeded(15, 15, 99).unwrap();
        for (pos, _) in maze.cells() {
            for dir in Dir::ALL {
                if let Some(next) = maze.neighbor(pos, dir) {
                    assert_eq!(maze.has_wall(pos, dir), maze.has_wall(next, dir.opposite()));
                }
            }
        }
    }

    #[test]
    fn border_walls_stay_standing() {
        let maze = Maze::generate_seeded(8, 6, 3).unwrap();
        for x in 0..8 {
            assert!(maze.has_wall(Pos::new(x, 0), Dir::North));
            assert!(maze.has_wall(Pos::new(x, 5), Dir::South));
        }
        for y in 0..6 {
            assert!(maze.has_wall(Pos::new(0, y), Dir::West));
            assert!(maze.has_wall(Pos::new(7, y), Dir::East));
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let a = Maze::generate_seeded(20, 20, 42).unwrap();
        let b = Maze::generate_seeded(20, 20, 42).unwrap();
        assert_eq!(a, b);
        let c = Maze::generate_seeded(20, 20, 43).unwrap();
        assert_ne!(a, c);
    }
}
