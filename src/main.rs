use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEventKind,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use shadow_maze::config::Options;
use shadow_maze::input::{HeldKeys, InputEvent, Key};
use shadow_maze::render::Renderer;
use shadow_maze::session::{Control, Game};
use std::fs::File;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    let options = Options::from_env();
    init_logging(&options);

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, options);

    stdout.execute(Show)?;
    stdout.execute(DisableMouseCapture)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    if let Err(e) = &result {
        error!(error = %e, "exiting with error");
    }
    result
}

/// The terminal belongs to the game, so logs go to a file. Without a
/// writable log file the game runs without logging.
fn init_logging(options: &Options) {
    let default = if options.dev_mode { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    if let Ok(file) = File::create(&options.log_file) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init();
    }
}

fn run(stdout: &mut Stdout, options: Options) -> io::Result<()> {
    let tick = Duration::from_millis(options.tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / options.render_fps.max(1));
    info!(
        tick_ms = options.tick_ms,
        fps = options.render_fps,
        dev_mode = options.dev_mode,
        "shadow maze started"
    );

    let mut game = Game::new(options);
    let mut held = HeldKeys::default();
    let mut renderer = Renderer::new(true);
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            let now = Instant::now();
            let input = match event::read()? {
                Event::Key(key) => key_input(key, &mut held, now),
                Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => renderer
                    .to_layout(mouse.column, mouse.row)
                    .map(|(x, y)| InputEvent::Click { x, y }),
                Event::Resize(_, _) => {
                    renderer.invalidate();
                    None
                }
                _ => None,
            };
            if let Some(input) = input {
                let before = game.screen();
                if game.handle_event(input, now)? == Control::Quit {
                    info!("quit");
                    return Ok(());
                }
                if game.screen() != before {
                    held.clear();
                }
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            game.tick(last_tick, held.snapshot(last_tick));
        }
        renderer.draw(stdout, &game.frame(Instant::now())?)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn key_input(key: KeyEvent, held: &mut HeldKeys, now: Instant) -> Option<InputEvent> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputEvent::Quit);
    }
    let key = match key.code {
        KeyCode::Char('q') => return Some(InputEvent::Quit),
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };
    if let Some(dir) = key.direction() {
        held.press(dir, now);
    }
    Some(InputEvent::Key(key))
}
