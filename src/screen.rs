//! Declarative button layouts per screen.
//!
//! Regions are in character cells relative to the screen's origin; the
//! renderer decides where that origin sits on the terminal and translates
//! clicks back before hit-testing.

use crate::config::{Difficulty, TimeLimit};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Settings,
    Playing,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Play,
    Exit,
    SetDifficulty(Difficulty),
    SetTimeLimit(TimeLimit),
    Start,
    Pause,
    Resume,
    Restart,
    MainMenu,
    ToggleGuidance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Region {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub region: Region,
    pub label: String,
    pub hotkey: Option<char>,
    pub action: Action,
    pub active: bool,
}

impl Button {
    fn new(region: Region, label: impl Into<String>, hotkey: char, action: Action) -> Self {
        Self {
            region,
            label: label.into(),
            hotkey: Some(hotkey),
            action,
            active: false,
        }
    }

    fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

const BUTTON_W: u16 = 24;
const WIDE_BUTTON_W: u16 = 28;
const SETTINGS_RIGHT_X: u16 = 30;
const DIFFICULTY_KEYS: [char; 3] = ['1', '2', '3'];
const TIME_LIMIT_KEYS: [char; 6] = ['a', 'b', 'c', 'd', 'e', 'f'];

pub fn layout(screen: Screen, difficulty: Difficulty, time_limit: TimeLimit) -> Vec<Button> {
    match screen {
        Screen::MainMenu => vec![
            Button::new(Region::new(18, 4, BUTTON_W, 3), "Play", 'p', Action::Play),
            Button::new(Region::new(18, 8, BUTTON_W, 3), "Exit Game", 'x', Action::Exit),
        ],
        Screen::Settings => {
            let mut buttons = Vec::new();
            for (i, d) in Difficulty::ALL.into_iter().enumerate() {
                let region = Region::new(0, 3 + i as u16 * 3, BUTTON_W, 3);
                let label = format!("Difficulty: {}", d.name());
                buttons.push(
                    Button::new(region, label, DIFFICULTY_KEYS[i], Action::SetDifficulty(d))
                        .active(d == difficulty),
                );
            }
            for (i, t) in TimeLimit::ALL.into_iter().enumerate() {
                let region = Region::new(SETTINGS_RIGHT_X, 3 + i as u16 * 3, WIDE_BUTTON_W, 3);
                let label = format!("Time Limit: {}", t.name());
                buttons.push(
                    Button::new(region, label, TIME_LIMIT_KEYS[i], Action::SetTimeLimit(t))
                        .active(t == time_limit),
                );
            }
            buttons.push(Button::new(
                Region::new(18, 22, BUTTON_W, 3),
                "Start Game",
                's',
                Action::Start,
            ));
            buttons
        }
        Screen::Playing => vec![Button::new(Region::new(0, 0, 9, 1), "Pause", 'p', Action::Pause)],
        Screen::Paused => vec![
            Button::new(Region::new(18, 4, BUTTON_W, 3), "Resume", 'r', Action::Resume),
            Button::new(Region::new(18, 8, BUTTON_W, 3), "Restart", 'n', Action::Restart),
            Button::new(Region::new(18, 12, BUTTON_W, 3), "Main Menu", 'm', Action::MainMenu),
        ],
        Screen::GameOver => vec![
            Button::new(Region::new(18, 6, BUTTON_W, 3), "Restart", 'r', Action::Restart),
            Button::new(Region::new(18, 10, BUTTON_W, 3), "Main Menu", 'm', Action::MainMenu),
        ],
    }
}

pub fn hit(buttons: &[Button], x: u16, y: u16) -> Option<Action> {
    buttons
        .iter()
        .find(|b| b.region.contains(x, y))
        .map(|b| b.action)
}

pub fn hotkey(buttons: &[Button], c: char) -> Option<Action> {
    let c = c.to_ascii_lowercase();
    buttons
        .iter()
        .find(|b| b.hotkey == Some(c))
        .map(|b| b.action)
}
