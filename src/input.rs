//! Device-independent input: discrete events plus a held-direction snapshot.

use crate::maze::Dir;
use std::time::{Duration, Instant};

/// How long a direction stays "held" after its last key event. Terminals
/// report presses and repeats but no releases.
pub const INPUT_HOLD_MS: u64 = 160;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    F(u8),
}

impl Key {
    /// Movement keys: arrows and WASD.
    pub fn direction(self) -> Option<Dir> {
        match self {
            Key::Up | Key::Char('w') | Key::Char('W') => Some(Dir::North),
            Key::Down | Key::Char('s') | Key::Char('S') => Some(Dir::South),
            Key::Left | Key::Char('a') | Key::Char('A') => Some(Dir::West),
            Key::Right | Key::Char('d') | Key::Char('D') => Some(Dir::East),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    /// Pointer press in screen-layout coordinates.
    Click { x: u16, y: u16 },
    Key(Key),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Held {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Held {
    pub fn with(mut self, dir: Dir) -> Self {
        match dir {
            Dir::North => self.up = true,
            Dir::South => self.down = true,
            Dir::West => self.left = true,
            Dir::East => self.right = true,
        }
        self
    }

    /// Per-tick movement; opposite keys cancel out.
    pub fn delta(&self, speed: f32) -> (f32, f32) {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if self.left {
            dx -= speed;
        }
        if self.right {
            dx += speed;
        }
        if self.up {
            dy -= speed;
        }
        if self.down {
            dy += speed;
        }
        (dx, dy)
    }
}

pub struct HeldKeys {
    last_seen: [Option<Instant>; 4],
    hold: Duration,
}

impl Default for HeldKeys {
    fn default() -> Self {
        Self::new(Duration::from_millis(INPUT_HOLD_MS))
    }
}

impl HeldKeys {
    pub fn new(hold: Duration) -> Self {
        Self {
            last_seen: [None; 4],
            hold,
        }
    }

    pub fn press(&mut self, dir: Dir, now: Instant) {
        self.last_seen[idx_for_dir(dir)] = Some(now);
    }

    pub fn clear(&mut self) {
        self.last_seen = [None; 4];
    }

    pub fn snapshot(&self, now: Instant) -> Held {
        let mut held = Held::default();
        for dir in Dir::ALL {
            if let Some(t) = self.last_seen[idx_for_dir(dir)] {
                if now.saturating_duration_since(t) <= self.hold {
                    held = held.with(dir);
                }
            }
        }
        held
    }
}

fn idx_for_dir(dir: Dir) -> usize {
    match dir {
        Dir::North => 0,
        Dir::South => 1,
        Dir::West => 2,
        Dir::East => 3,
    }
}
