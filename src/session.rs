//! Session aggregate and the game state machine.
//!
//! A [`Session`] bundles everything that belongs to one play-through. It is
//! created on Start, carried through Pause, and dropped on Restart, Main Menu
//! or game over. Dropping it stops its flicker thread.

use crate::clock::SessionClock;
use crate::collision::{PlayerState, WallIndex};
use crate::config::{
    Difficulty, Options, TimeLimit, PLAYER_SCALE, PLAYER_SPEED, WALL_THICKNESS, WORLD_SIZE,
};
use crate::input::{Held, InputEvent, Key};
use crate::maze::{Maze, MazeError, Pos};
use crate::path::shortest_path;
use crate::screen::{self, Action, Button, Screen};
use crate::visibility::{Flicker, FlickerConfig, FlickerHandle, VisibilityMap};
use crate::walls::{build_walls, Rect, WallSegment};
use std::fmt;
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

#[derive(Debug)]
pub enum SessionError {
    Maze(MazeError),
    Flicker(io::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Maze(e) => write!(f, "{}", e),
            SessionError::Flicker(e) => write!(f, "failed to start wall flicker: {}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Maze(e) => Some(e),
            SessionError::Flicker(e) => Some(e),
        }
    }
}

impl From<MazeError> for SessionError {
    fn from(e: MazeError) -> Self {
        SessionError::Maze(e)
    }
}

impl From<SessionError> for io::Error {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Flicker(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    TimeOver,
    Victory { elapsed: Duration },
}

impl Outcome {
    pub fn message(&self) -> String {
        match self {
            Outcome::TimeOver => "Time Over!".to_string(),
            Outcome::Victory { elapsed } => {
                format!("Victory! Time: {:.2} seconds", elapsed.as_secs_f64())
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct Session {
    maze: Maze,
    walls: Vec<WallSegment>,
    index: WallIndex,
    player: PlayerState,
    clock: SessionClock,
    finish: Pos,
    cell_size: f32,
    seed: u64,
    guidance: bool,
    flicker: Option<FlickerHandle>,
}

impl Session {
    /// Builds a fresh maze, its walls, player and clock, and resets `map` to
    /// the new walls. With `flicker` set, the wall flicker thread starts too.
    pub fn start(
        difficulty: Difficulty,
        time_limit: TimeLimit,
        seed: u64,
        map: &VisibilityMap,
        flicker: Option<FlickerConfig>,
        now: Instant,
    ) -> Result<Session, SessionError> {
        let (width, height) = difficulty.dimensions();
        let maze = Maze::generate_seeded(width, height, seed)?;
        let cell_size = (WORLD_SIZE / width as f32).floor();
        let walls = build_walls(&maze, cell_size, WALL_THICKNESS);
        let index = WallIndex::new(&walls, width, height, cell_size);
        let start = cell_size / 2.0;
        let player = PlayerState::new(
            start,
            start,
            (cell_size * PLAYER_SCALE).floor(),
            PLAYER_SPEED,
        );

        let ids = walls.iter().map(|w| w.id).collect::<Vec<_>>();
        let handle = match flicker {
            Some(config) => {
                let core = Flicker::new(map.clone(), ids, config, now);
                Some(FlickerHandle::spawn(core, seed).map_err(SessionError::Flicker)?)
            }
            None => {
                map.reset(ids);
                None
            }
        };

        info!(
            difficulty = difficulty.name(),
            time_limit = time_limit.name(),
            seed,
            walls = walls.len(),
            "session started"
        );

        Ok(Session {
            maze,
            walls,
            index,
            player,
            clock: SessionClock::start(now, time_limit.duration()),
            finish: Pos::new(width - 1, height - 1),
            cell_size,
            seed,
            guidance: false,
            flicker: handle,
        })
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn walls(&self) -> &[WallSegment] {
        &self.walls
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn finish(&self) -> Pos {
        self.finish
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn guidance(&self) -> bool {
        self.guidance
    }

    pub fn flicker_running(&self) -> bool {
        self.flicker.as_ref().is_some_and(FlickerHandle::is_running)
    }

    pub fn player_cell(&self) -> Pos {
        self.player.cell(self.cell_size)
    }

    /// Moves the player by `dx, dy` against the full wall set, hidden walls
    /// included.
    pub fn move_player(&mut self, dx: f32, dy: f32) {
        let half = self.player.size / 2.0;
        let (x, y) = self.index.resolve(self.player.rect(), dx, dy);
        self.player.x = x + half;
        self.player.y = y + half;
    }

    /// Puts the player's center in `cell`.
    pub fn place_player(&mut self, cell: Pos) {
        self.player.x = cell.x as f32 * self.cell_size + self.cell_size / 2.0;
        self.player.y = cell.y as f32 * self.cell_size + self.cell_size / 2.0;
    }

    /// One simulation step. Time expiry is checked before movement, so an
    /// expiry and a finish in the same tick report the expiry.
    pub fn tick(&mut self, now: Instant, held: Held) -> Option<Outcome> {
        if self.clock.is_expired(now) {
            return Some(Outcome::TimeOver);
        }

        let (dx, dy) = held.delta(self.player.speed);
        if dx != 0.0 || dy != 0.0 {
            self.move_player(dx, dy);
        }

        if self.player_cell() == self.finish {
            return Some(Outcome::Victory {
                elapsed: self.clock.elapsed(now),
            });
        }
        None
    }

    /// Route from the player's cell to the finish while guidance is on. A
    /// missing route on a generated maze means connectivity is broken.
    pub fn guidance_path(&self) -> Result<Option<Vec<Pos>>, SessionError> {
        if !self.guidance {
            return Ok(None);
        }
        let from = self.player_cell();
        match shortest_path(&self.maze, from, self.finish) {
            Some(path) => Ok(Some(path)),
            None => {
                error!(?from, to = ?self.finish, "no path to finish");
                Err(MazeError::Disconnected {
                    from,
                    to: self.finish,
                }
                .into())
            }
        }
    }

    fn cell_center(&self, pos: Pos) -> (f32, f32) {
        (
            pos.x as f32 * self.cell_size + self.cell_size / 2.0,
            pos.y as f32 * self.cell_size + self.cell_size / 2.0,
        )
    }

    fn finish_rect(&self) -> Rect {
        let quarter = (self.cell_size / 4.0).floor();
        Rect::new(
            self.finish.x as f32 * self.cell_size + quarter,
            self.finish.y as f32 * self.cell_size + quarter,
            (self.cell_size / 2.0).floor(),
            (self.cell_size / 2.0).floor(),
        )
    }

    pub fn view(&self, map: &VisibilityMap, now: Instant) -> Result<PlayView, SessionError> {
        let walls = map
            .visible_walls(&self.walls)
            .into_iter()
            .map(|w| (w.start, w.end))
            .collect();
        let guidance = self
            .guidance_path()?
            .filter(|path| path.len() > 1)
            .map(|path| path.into_iter().map(|p| self.cell_center(p)).collect());
        Ok(PlayView {
            maze_width: self.maze.width(),
            maze_height: self.maze.height(),
            cell_size: self.cell_size,
            walls,
            player: self.player.rect(),
            finish: self.finish_rect(),
            guidance,
            remaining: self.clock.remaining(now),
        })
    }
}

/// What the renderer needs to draw one frame of play.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayView {
    pub maze_width: usize,
    pub maze_height: usize,
    pub cell_size: f32,
    /// Visible wall segments as line endpoints.
    pub walls: Vec<((f32, f32), (f32, f32))>,
    pub player: Rect,
    pub finish: Rect,
    /// Cell-center points from the player to the finish.
    pub guidance: Option<Vec<(f32, f32)>>,
    pub remaining: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    Menu {
        screen: Screen,
        title: String,
        buttons: Vec<Button>,
    },
    Play {
        view: PlayView,
        buttons: Vec<Button>,
    },
}

enum State {
    MainMenu,
    Settings,
    Playing(Session),
    Paused(Session),
    GameOver(Outcome),
}

impl State {
    fn screen(&self) -> Screen {
        match self {
            State::MainMenu => Screen::MainMenu,
            State::Settings => Screen::Settings,
            State::Playing(_) => Screen::Playing,
            State::Paused(_) => Screen::Paused,
            State::GameOver(_) => Screen::GameOver,
        }
    }
}

pub struct Game {
    state: State,
    difficulty: Difficulty,
    time_limit: TimeLimit,
    visibility: VisibilityMap,
    options: Options,
    flicker: Option<FlickerConfig>,
}

impl Game {
    pub fn new(options: Options) -> Self {
        Self::with_flicker(options, Some(FlickerConfig::default()))
    }

    /// `None` disables the background flicker entirely.
    pub fn with_flicker(options: Options, flicker: Option<FlickerConfig>) -> Self {
        Self {
            state: State::MainMenu,
            difficulty: Difficulty::default(),
            time_limit: TimeLimit::default(),
            visibility: VisibilityMap::new(),
            options,
            flicker,
        }
    }

    pub fn screen(&self) -> Screen {
        self.state.screen()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn time_limit(&self) -> TimeLimit {
        self.time_limit
    }

    pub fn visibility(&self) -> &VisibilityMap {
        &self.visibility
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match &self.state {
            State::GameOver(outcome) => Some(*outcome),
            _ => None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            State::Playing(s) | State::Paused(s) => Some(s),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        match &mut self.state {
            State::Playing(s) | State::Paused(s) => Some(s),
            _ => None,
        }
    }

    pub fn buttons(&self) -> Vec<Button> {
        screen::layout(self.screen(), self.difficulty, self.time_limit)
    }

    /// Replaces the current state. Leaving a session for a screen without
    /// one drops it (joining its flicker thread) and clears the visibility
    /// map.
    fn set_state(&mut self, next: State) {
        let leaving_session = matches!(self.state, State::Playing(_) | State::Paused(_));
        self.state = State::MainMenu;
        if leaving_session && !matches!(next, State::Playing(_) | State::Paused(_)) {
            self.visibility.clear();
        }
        self.state = next;
    }

    fn start_session(&mut self, now: Instant) -> Result<(), SessionError> {
        self.set_state(State::Settings);
        let seed = self.options.seed.unwrap_or_else(rand::random);
        let session = Session::start(
            self.difficulty,
            self.time_limit,
            seed,
            &self.visibility,
            self.flicker,
            now,
        )?;
        self.set_state(State::Playing(session));
        Ok(())
    }

    pub fn apply(&mut self, action: Action, now: Instant) -> Result<Control, SessionError> {
        let from = self.screen();
        let state = std::mem::replace(&mut self.state, State::MainMenu);
        match (state, action) {
            (State::MainMenu, Action::Play) => self.set_state(State::Settings),
            (State::MainMenu, Action::Exit) => return Ok(Control::Quit),
            (State::Settings, Action::SetDifficulty(d)) => {
                self.difficulty = d;
                self.state = State::Settings;
            }
            (State::Settings, Action::SetTimeLimit(t)) => {
                self.time_limit = t;
                self.state = State::Settings;
            }
            (State::Settings, Action::Start) => self.start_session(now)?,
            (State::Playing(mut session), Action::Pause) => {
                session.clock.pause(now);
                self.set_state(State::Paused(session));
            }
            (State::Playing(mut session), Action::ToggleGuidance) => {
                if self.options.dev_mode {
                    session.guidance = !session.guidance;
                    info!(guidance = session.guidance, "guidance toggled");
                }
                self.state = State::Playing(session);
            }
            (State::Paused(mut session), Action::Resume) => {
                session.clock.resume(now);
                self.set_state(State::Playing(session));
            }
            (State::Paused(session), Action::Restart) => {
                self.state = State::Paused(session);
                self.start_session(now)?;
            }
            (State::GameOver(_), Action::Restart) => self.start_session(now)?,
            (State::Paused(session), Action::MainMenu) => {
                self.state = State::Paused(session);
                self.set_state(State::MainMenu);
            }
            (State::GameOver(_), Action::MainMenu) => self.set_state(State::MainMenu),
            (state, action) => {
                debug!(?action, screen = ?state.screen(), "ignoring action");
                self.state = state;
            }
        }
        let to = self.screen();
        if from != to {
            info!(?from, ?to, ?action, "state change");
        }
        Ok(Control::Continue)
    }

    pub fn handle_event(&mut self, event: InputEvent, now: Instant) -> Result<Control, SessionError> {
        let action = match event {
            InputEvent::Quit => return Ok(Control::Quit),
            InputEvent::Click { x, y } => screen::hit(&self.buttons(), x, y),
            InputEvent::Key(key) => self.key_action(key),
        };
        match action {
            Some(action) => self.apply(action, now),
            None => Ok(Control::Continue),
        }
    }

    fn key_action(&self, key: Key) -> Option<Action> {
        match (self.screen(), key) {
            (Screen::Playing, Key::Esc) | (Screen::Playing, Key::Char('p')) => Some(Action::Pause),
            (Screen::Playing, Key::F(5)) => Some(Action::ToggleGuidance),
            (Screen::Playing, _) => None,
            (Screen::Paused, Key::Esc) => Some(Action::Resume),
            (Screen::MainMenu, Key::Enter) => Some(Action::Play),
            (Screen::Settings, Key::Enter) => Some(Action::Start),
            (_, Key::Char(c)) => screen::hotkey(&self.buttons(), c),
            _ => None,
        }
    }

    /// Advances play by one tick. Returns the outcome when this tick ended
    /// the session.
    pub fn tick(&mut self, now: Instant, held: Held) -> Option<Outcome> {
        let State::Playing(session) = &mut self.state else {
            return None;
        };
        let outcome = session.tick(now, held)?;
        match outcome {
            Outcome::Victory { elapsed } => {
                info!(seconds = elapsed.as_secs_f64(), "game won")
            }
            Outcome::TimeOver => info!("time over"),
        }
        self.set_state(State::GameOver(outcome));
        Some(outcome)
    }

    pub fn frame(&self, now: Instant) -> Result<Frame, SessionError> {
        let buttons = self.buttons();
        let title = match &self.state {
            State::Playing(session) => {
                return Ok(Frame::Play {
                    view: session.view(&self.visibility, now)?,
                    buttons,
                })
            }
            State::MainMenu => "Shadow Maze".to_string(),
            State::Settings => "Settings".to_string(),
            State::Paused(_) => "Paused".to_string(),
            State::GameOver(outcome) => outcome.message(),
        };
        Ok(Frame::Menu {
            screen: self.screen(),
            title,
            buttons,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Dir;

    fn quiet_flicker() -> Option<FlickerConfig> {
        Some(FlickerConfig {
            interval: Duration::from_secs(3600),
            ..FlickerConfig::default()
        })
    }

    fn game() -> Game {
        let options = Options {
            seed: Some(42),
            dev_mode: true,
            ..Options::default()
        };
        Game::with_flicker(options, quiet_flicker())
    }

    fn playing(game: &mut Game, now: Instant) {
        game.apply(Action::Play, now).unwrap();
        game.apply(Action::SetDifficulty(Difficulty::Easy), now).unwrap();
        game.apply(Action::Start, now).unwrap();
        assert_eq!(game.screen(), Screen::Playing);
    }

    #[test]
    fn menu_to_playing() {
        let t0 = Instant::now();
        let mut g = game();
        assert_eq!(g.screen(), Screen::MainMenu);
        g.apply(Action::Play, t0).unwrap();
        assert_eq!(g.screen(), Screen::Settings);
        g.apply(Action::SetTimeLimit(TimeLimit::Min5), t0).unwrap();
        g.apply(Action::Start, t0).unwrap();
        let session = g.session().unwrap();
        assert_eq!(session.maze().width(), 50);
        assert_eq!(session.finish(), Pos::new(49, 49));
        assert_eq!(session.clock().limit(), Some(Duration::from_secs(300)));
        assert!(session.flicker_running());
        assert_eq!(g.visibility().len(), session.walls().len());
        assert_eq!(g.visibility().hidden_count(), 0);
    }

    #[test]
    fn exit_quits_from_main_menu_only() {
        let t0 = Instant::now();
        let mut g = game();
        assert_eq!(g.apply(Action::Exit, t0).unwrap(), Control::Quit);
        g.apply(Action::Play, t0).unwrap();
        assert_eq!(g.apply(Action::Exit, t0).unwrap(), Control::Continue);
        assert_eq!(g.screen(), Screen::Settings);
    }

    #[test]
    fn player_starts_centered_in_first_cell() {
        let t0 = Instant::now();
        let mut g = game();
        playing(&mut g, t0);
        let s = g.session().unwrap();
        assert_eq!(s.cell_size(), 50.0);
        assert_eq!(s.player().x, 25.0);
        assert_eq!(s.player().size, 25.0);
        assert_eq!(s.player_cell(), Pos::new(0, 0));
    }

    #[test]
    fn pause_resume_keeps_session_and_subtracts_pause() {
        let t0 = Instant::now();
        let mut g = game();
        playing(&mut g, t0);
        let seed = g.session().unwrap().seed();

        g.apply(Action::Pause, t0 + Duration::from_secs(10)).unwrap();
        assert_eq!(g.screen(), Screen::Paused);
        assert!(g.tick(t0 + Duration::from_secs(20), Held::default()).is_none());
        g.apply(Action::Resume, t0 + Duration::from_secs(30)).unwrap();
        assert_eq!(g.screen(), Screen::Playing);

        let s = g.session().unwrap();
        assert_eq!(s.seed(), seed);
        assert_eq!(s.clock().elapsed(t0 + Duration::from_secs(40)), Duration::from_secs(20));
    }

    #[test]
    fn main_menu_from_pause_discards_session() {
        let t0 = Instant::now();
        let mut g = game();
        playing(&mut g, t0);
        g.apply(Action::Pause, t0).unwrap();
        g.apply(Action::MainMenu, t0).unwrap();
        assert_eq!(g.screen(), Screen::MainMenu);
        assert!(g.session().is_none());
        assert!(g.visibility().is_empty());
    }

    #[test]
    fn restart_builds_a_fresh_session() {
        let t0 = Instant::now();
        let mut g = game();
        playing(&mut g, t0);
        let epoch = g.visibility().epoch();
        g.session_mut().unwrap().move_player(0.0, 2.0);
        g.apply(Action::Pause, t0).unwrap();
        g.apply(Action::Restart, t0 + Duration::from_secs(5)).unwrap();
        assert_eq!(g.screen(), Screen::Playing);
        assert!(g.visibility().epoch() > epoch);
        let s = g.session().unwrap();
        assert_eq!(s.player().y, 25.0);
        assert!(!s.clock().is_paused());
    }

    #[test]
    fn reaching_finish_wins() {
        let t0 = Instant::now();
        let mut g = game();
        playing(&mut g, t0);
        let session = g.session_mut().unwrap();
        let finish = session.finish();
        session.place_player(finish);

        let outcome = g.tick(t0 + Duration::from_millis(12_340), Held::default());
        assert_eq!(
            outcome,
            Some(Outcome::Victory {
                elapsed: Duration::from_millis(12_340)
            })
        );
        assert_eq!(g.screen(), Screen::GameOver);
        assert_eq!(
            g.outcome().map(|o| o.message()),
            Some("Victory! Time: 12.34 seconds".to_string())
        );
        assert!(g.visibility().is_empty());
    }

    #[test]
    fn expiry_beats_finish_in_same_tick() {
        let t0 = Instant::now();
        let mut g = game();
        g.apply(Action::Play, t0).unwrap();
        g.apply(Action::SetTimeLimit(TimeLimit::Min5), t0).unwrap();
        g.apply(Action::Start, t0).unwrap();
        let session = g.session_mut().unwrap();
        let finish = session.finish();
        session.place_player(finish);

        let outcome = g.tick(t0 + Duration::from_secs_f64(300.01), Held::default());
        assert_eq!(outcome, Some(Outcome::TimeOver));
        assert_eq!(g.outcome().map(|o| o.message()), Some("Time Over!".to_string()));
    }

    #[test]
    fn game_over_restart_and_menu() {
        let t0 = Instant::now();
        let mut g = game();
        playing(&mut g, t0);
        let finish = g.session().unwrap().finish();
        g.session_mut().unwrap().place_player(finish);
        g.tick(t0, Held::default());
        assert_eq!(g.screen(), Screen::GameOver);

        g.apply(Action::Restart, t0).unwrap();
        assert_eq!(g.screen(), Screen::Playing);
        let finish = g.session().unwrap().finish();
        g.session_mut().unwrap().place_player(finish);
        g.tick(t0, Held::default());
        g.apply(Action::MainMenu, t0).unwrap();
        assert_eq!(g.screen(), Screen::MainMenu);
    }

    #[test]
    fn movement_stops_at_walls() {
        let t0 = Instant::now();
        let mut g = game();
        playing(&mut g, t0);
        let s = g.session().unwrap();
        // The west border always stands.
        assert!(s.maze().has_wall(Pos::new(0, 0), Dir::West));
        let held = Held::default().with(Dir::West);
        for i in 0..50 {
            g.tick(t0 + Duration::from_millis(i), held);
        }
        let s = g.session().unwrap();
        assert_eq!(s.player().rect().x, 4.5);
        assert_eq!(s.player().y, 25.0);
    }

    #[test]
    fn guidance_requires_dev_mode() {
        let t0 = Instant::now();
        let mut g = Game::with_flicker(Options::default(), quiet_flicker());
        playing(&mut g, t0);
        g.handle_event(InputEvent::Key(Key::F(5)), t0).unwrap();
        assert!(!g.session().unwrap().guidance());

        let mut g = game();
        playing(&mut g, t0);
        g.handle_event(InputEvent::Key(Key::F(5)), t0).unwrap();
        assert!(g.session().unwrap().guidance());
        let Frame::Play { view, .. } = g.frame(t0).unwrap() else {
            panic!("expected play frame");
        };
        let path = view.guidance.unwrap();
        assert_eq!(path.first(), Some(&(25.0, 25.0)));
        assert_eq!(path.last(), Some(&(975.0, 975.0)));
    }

    #[test]
    fn keys_and_clicks_drive_menus() {
        let t0 = Instant::now();
        let mut g = game();
        g.handle_event(InputEvent::Key(Key::Enter), t0).unwrap();
        assert_eq!(g.screen(), Screen::Settings);
        g.handle_event(InputEvent::Key(Key::Char('1')), t0).unwrap();
        assert_eq!(g.difficulty(), Difficulty::Easy);
        g.handle_event(InputEvent::Key(Key::Char('b')), t0).unwrap();
        assert_eq!(g.time_limit(), TimeLimit::Min5);
        g.handle_event(InputEvent::Key(Key::Char('s')), t0).unwrap();
        assert_eq!(g.screen(), Screen::Playing);

        // Movement letters never trigger buttons while playing.
        g.handle_event(InputEvent::Key(Key::Char('s')), t0).unwrap();
        assert_eq!(g.screen(), Screen::Playing);

        g.handle_event(InputEvent::Click { x: 1, y: 0 }, t0).unwrap();
        assert_eq!(g.screen(), Screen::Paused);
        g.handle_event(InputEvent::Key(Key::Esc), t0).unwrap();
        assert_eq!(g.screen(), Screen::Playing);
        assert_eq!(g.handle_event(InputEvent::Quit, t0).unwrap(), Control::Quit);
    }

    #[test]
    fn frames_follow_state() {
        let t0 = Instant::now();
        let mut g = game();
        match g.frame(t0).unwrap() {
            Frame::Menu { title, screen, .. } => {
                assert_eq!(title, "Shadow Maze");
                assert_eq!(screen, Screen::MainMenu);
            }
            other => panic!("unexpected {:?}", other),
        }
        playing(&mut g, t0);
        let Frame::Play { view, buttons } = g.frame(t0).unwrap() else {
            panic!("expected play frame");
        };
        assert_eq!(view.walls.len(), g.session().unwrap().walls().len());
        assert_eq!(view.remaining, None);
        assert_eq!(view.finish, Rect::new(962.0, 962.0, 25.0, 25.0));
        assert!(view.guidance.is_none());
        assert_eq!(buttons[0].action, Action::Pause);
    }

    #[test]
    fn sessions_without_flicker_still_reset_the_map() {
        let t0 = Instant::now();
        let mut g = Game::with_flicker(Options::default(), None);
        playing(&mut g, t0);
        let s = g.session().unwrap();
        assert!(!s.flicker_running());
        assert_eq!(g.visibility().len(), s.walls().len());
    }
}
