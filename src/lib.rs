//! Shadow Maze: a terminal maze game where walls flicker out of sight but
//! never stop being solid.
//!
//! The engine is split the way data flows through a session: [`maze`]
//! generates a perfect maze, [`walls`] derives wall geometry from it,
//! [`visibility`] flickers those walls on a background thread, [`collision`]
//! moves the player against them, [`path`] finds the guidance route, and
//! [`session`] sequences menus, play, pause and game over around a
//! [`clock::SessionClock`]. [`render`] draws the resulting frames with
//! crossterm.

pub mod clock;
pub mod collision;
pub mod config;
pub mod input;
pub mod maze;
pub mod path;
pub mod render;
pub mod screen;
pub mod session;
pub mod visibility;
pub mod walls;

pub use maze::{Dir, Maze, MazeError, Pos};
pub use session::{Frame, Game, Outcome, Session, SessionError};
