//! Wall geometry derived from a generated maze.
//!
//! Every standing side of every cell becomes its own segment, so the wall
//! between two closed neighbors appears twice (once per cell, each with its
//! own id and strip inside that cell).

use crate::maze::{Dir, Maze, Pos};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WallId {
    pub x: usize,
    pub y: usize,
    pub side: Dir,
}

impl WallId {
    pub fn new(pos: Pos, side: Dir) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            side,
        }
    }

    pub fn cell(&self) -> Pos {
        Pos::new(self.x, self.y)
    }
}

impl fmt::Display for WallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.x, self.y, self.side.letter())
    }
}

/// Axis-aligned rectangle in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn centered(cx: f32, cy: f32, size: f32) -> Self {
        Self::new(cx - size / 2.0, cy - size / 2.0, size, size)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WallSegment {
    pub id: WallId,
    pub start: (f32, f32),
    pub end: (f32, f32),
    pub rect: Rect,
}

pub fn build_walls(maze: &Maze, cell_size: f32, thickness: f32) -> Vec<WallSegment> {
    let mut walls = Vec::new();
    for (pos, cell) in maze.cells() {
        let cx = pos.x as f32 * cell_size;
        let cy = pos.y as f32 * cell_size;
        for side in [Dir::North, Dir::West, Dir::East, Dir::South] {
            if !cell.has_wall(side) {
                continue;
            }
            let (start, end, rect) = match side {
                Dir::North => (
                    (cx, cy),
                    (cx + cell_size, cy),
                    Rect::new(cx, cy, cell_size, thickness),
                ),
                Dir::West => (
                    (cx, cy),
                    (cx, cy + cell_size),
                    Rect::new(cx, cy, thickness, cell_size),
                ),
                Dir::East => (
                    (cx + cell_size, cy),
                    (cx + cell_size, cy + cell_size),
                    Rect::new(cx + cell_size - thickness, cy, thickness, cell_size),
                ),
                Dir::South => (
                    (cx, cy + cell_size),
                    (cx + cell_size, cy + cell_size),
                    Rect::new(cx, cy + cell_size - thickness, cell_size, thickness),
                ),
            };
            walls.push(WallSegment {
                id: WallId::new(pos, side),
                start,
                end,
                rect,
            });
        }
    }
    walls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_id_formats_like_cell_and_side() {
        let id = WallId::new(Pos::new(3, 14), Dir::East);
        assert_eq!(id.to_string(), "3_14_E");
    }

    #[test]
    fn one_segment_per_standing_side() {
        let maze = Maze::generate_seeded(7, 5, 11).unwrap();
        let walls = build_walls(&maze, 20.0, 3.0);
        let standing = maze
            .cells()
            .map(|(_, c)| Dir::ALL.iter().filter(|d| c.has_wall(**d)).count())
            .sum::<usize>();
        assert_eq!(walls.len(), standing);
        // 4 per cell minus both sides of every passage.
        assert_eq!(standing, 4 * 35 - 2 * maze.passage_count());
    }

    #[test]
    fn single_cell_geometry() {
        let maze = Maze::generate_seeded(1, 1, 0).unwrap();
        let walls = build_walls(&maze, 50.0, 3.0);
        assert_eq!(walls.len(), 4);
        let east = walls.iter().find(|w| w.id.side == Dir::East).unwrap();
        assert_eq!(east.start, (50.0, 0.0));
        assert_eq!(east.end, (50.0, 50.0));
        assert_eq!(east.rect, Rect::new(47.0, 0.0, 3.0, 50.0));
        let south = walls.iter().find(|w| w.id.side == Dir::South).unwrap();
        assert_eq!(south.rect, Rect::new(0.0, 47.0, 50.0, 3.0));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(a.intersects(&Rect::new(9.5, 9.5, 5.0, 5.0)));
        assert!(a.intersects(&a));
    }
}
