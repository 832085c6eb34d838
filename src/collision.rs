use crate::maze::Pos;
use crate::walls::{Rect, WallSegment};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerState {
    /// Center of the player square.
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
}

impl PlayerState {
    pub fn new(x: f32, y: f32, size: f32, speed: f32) -> Self {
        Self { x, y, size, speed }
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.x, self.y, self.size)
    }

    pub fn cell(&self, cell_size: f32) -> Pos {
        cell_of(self.x, self.y, cell_size)
    }
}

pub fn collides(rect: &Rect, solids: &[Rect]) -> bool {
    solids.iter().any(|solid| rect.intersects(solid))
}

/// Applies `dx` then `dy`, each only if the moved rectangle stays clear of
/// every solid. The vertical check uses the rectangle after the horizontal
/// step. Returns the new top-left corner.
pub fn resolve_move(player: Rect, dx: f32, dy: f32, solids: &[Rect]) -> (f32, f32) {
    let mut rect = player;
    if dx != 0.0 {
        let moved = rect.translate(dx, 0.0);
        if !collides(&moved, solids) {
            rect = moved;
        }
    }
    if dy != 0.0 {
        let moved = rect.translate(0.0, dy);
        if !collides(&moved, solids) {
            rect = moved;
        }
    }
    (rect.x, rect.y)
}

pub fn cell_of(x: f32, y: f32, cell_size: f32) -> Pos {
    let cx = (x / cell_size).floor().max(0.0) as usize;
    let cy = (y / cell_size).floor().max(0.0) as usize;
    Pos::new(cx, cy)
}

/// Wall rectangles bucketed by cell. A query returns the walls of every cell
/// a rectangle touches plus a one-cell margin, which is a superset of the
/// walls it can overlap as long as the rectangle moves less than a cell per
/// step.
pub struct WallIndex {
    width: usize,
    height: usize,
    cell_size: f32,
    buckets: Vec<Vec<Rect>>,
}

impl WallIndex {
    pub fn new(walls: &[WallSegment], width: usize, height: usize, cell_size: f32) -> Self {
        let mut buckets = vec![Vec::new(); width * height];
        for wall in walls {
            let pos = wall.id.cell();
            if pos.x < width && pos.y < height {
                buckets[pos.y * width + pos.x].push(wall.rect);
            }
        }
        Self {
            width,
            height,
            cell_size,
            buckets,
        }
    }

    pub fn near(&self, rect: &Rect) -> Vec<Rect> {
        let lo = cell_of(rect.x, rect.y, self.cell_size);
        let hi = cell_of(rect.right(), rect.bottom(), self.cell_size);
        let x0 = lo.x.saturating_sub(1);
        let y0 = lo.y.saturating_sub(1);
        let x1 = (hi.x + 1).min(self.width.saturating_sub(1));
        let y1 = (hi.y + 1).min(self.height.saturating_sub(1));

        let mut out = Vec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                out.extend_from_slice(&self.buckets[y * self.width + x]);
            }
        }
        out
    }

    /// `resolve_move` against the walls near the player's swept area.
    pub fn resolve(&self, player: Rect, dx: f32, dy: f32) -> (f32, f32) {
        let swept = Rect::new(
            player.x + dx.min(0.0),
            player.y + dy.min(0.0),
            player.w + dx.abs(),
            player.h + dy.abs(),
        );
        resolve_move(player, dx, dy, &self.near(&swept))
    }
}
