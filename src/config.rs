use std::path::PathBuf;
use std::time::Duration;

pub const WORLD_SIZE: f32 = 1000.0;
pub const WALL_THICKNESS: f32 = 3.0;
pub const PLAYER_SPEED: f32 = 2.0;
/// Player side length as a fraction of a cell.
pub const PLAYER_SCALE: f32 = 0.5;

pub const DEFAULT_TICK_MS: u64 = 16;
pub const DEFAULT_RENDER_FPS: u64 = 60;
pub const DEFAULT_LOG_FILE: &str = "shadowmaze.log";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn dimensions(self) -> (usize, usize) {
        match self {
            Difficulty::Easy => (20, 20),
            Difficulty::Medium => (34, 34),
            Difficulty::Hard => (50, 50),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TimeLimit {
    #[default]
    Unlimited,
    Min5,
    Min10,
    Min15,
    Min20,
    Hour1,
}

impl TimeLimit {
    pub const ALL: [TimeLimit; 6] = [
        TimeLimit::Unlimited,
        TimeLimit::Min5,
        TimeLimit::Min10,
        TimeLimit::Min15,
        TimeLimit::Min20,
        TimeLimit::Hour1,
    ];

    pub fn seconds(self) -> Option<u64> {
        match self {
            TimeLimit::Unlimited => None,
            TimeLimit::Min5 => Some(300),
            TimeLimit::Min10 => Some(600),
            TimeLimit::Min15 => Some(900),
            TimeLimit::Min20 => Some(1200),
            TimeLimit::Hour1 => Some(3600),
        }
    }

    pub fn duration(self) -> Option<Duration> {
        self.seconds().map(Duration::from_secs)
    }

    pub fn name(self) -> &'static str {
        match self {
            TimeLimit::Unlimited => "None",
            TimeLimit::Min5 => "5 Minutes",
            TimeLimit::Min10 => "10 Minutes",
            TimeLimit::Min15 => "15 Minutes",
            TimeLimit::Min20 => "20 Minutes",
            TimeLimit::Hour1 => "1 Hour",
        }
    }
}

/// Runtime options, read from `SHADOWMAZE_*` environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub tick_ms: u64,
    pub render_fps: u64,
    pub dev_mode: bool,
    pub seed: Option<u64>,
    pub log_file: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            render_fps: DEFAULT_RENDER_FPS,
            dev_mode: false,
            seed: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Options {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset, unparsable or zero values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let positive = |key: &str, default: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(default)
        };
        let dev_mode = lookup("SHADOWMAZE_DEV")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);
        let seed = lookup("SHADOWMAZE_SEED").and_then(|v| v.trim().parse::<u64>().ok());
        let log_file = lookup("SHADOWMAZE_LOG")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Self {
            tick_ms: positive("SHADOWMAZE_TICK_MS", DEFAULT_TICK_MS),
            render_fps: positive("SHADOWMAZE_FPS", DEFAULT_RENDER_FPS),
            dev_mode,
            seed,
            log_file,
        }
    }
}
