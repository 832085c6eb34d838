//! Terminal presentation of [`Frame`]s.
//!
//! The play view is a tile grid of `(2W+1) x (2H+1)` where odd coordinates
//! are cell interiors and even ones are wall lines and corners. Only tiles
//! that changed since the last frame are redrawn.

use crate::collision::cell_of;
use crate::screen::{Button, Screen};
use crate::session::{Frame, PlayView};
use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

const CELL_W: usize = 2;
/// Light radius around the player in world units.
const SHADOW_RADIUS: f32 = 40.0;
const MIN_SHADOW_TILES: f32 = 3.0;
const MENU_W: u16 = 58;
const MENU_H: u16 = 26;

const COLOR_WALL: Color = Color::Rgb { r: 110, g: 110, b: 110 };
const COLOR_PLAYER: Color = Color::Rgb { r: 255, g: 100, b: 100 };
const COLOR_FINISH: Color = Color::Rgb { r: 100, g: 255, b: 100 };
const COLOR_GUIDE: Color = Color::Rgb { r: 255, g: 165, b: 0 };
const COLOR_HIGHLIGHT: Color = Color::Rgb { r: 255, g: 215, b: 0 };

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    Wall,
    Player,
    Finish,
    Guide,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Glyph>,
}

impl TileGrid {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Glyph::Empty; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Glyph {
        self.tiles[y * self.width + x]
    }

    fn set(&mut self, x: usize, y: usize, glyph: Glyph) {
        if x < self.width && y < self.height {
            self.tiles[y * self.width + x] = glyph;
        }
    }

    fn line(&mut self, from: (usize, usize), to: (usize, usize), glyph: Glyph) {
        let (x0, x1) = (from.0.min(to.0), from.0.max(to.0));
        let (y0, y1) = (from.1.min(to.1), from.1.max(to.1));
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.set(x, y, glyph);
            }
        }
    }
}

fn corner_tile(point: (f32, f32), cell_size: f32) -> (usize, usize) {
    let tx = (point.0 / cell_size * 2.0).round().max(0.0) as usize;
    let ty = (point.1 / cell_size * 2.0).round().max(0.0) as usize;
    (tx, ty)
}

fn center_tile(point: (f32, f32), cell_size: f32) -> (usize, usize) {
    let cell = cell_of(point.0, point.1, cell_size);
    (cell.x * 2 + 1, cell.y * 2 + 1)
}

/// Lays a play view onto the tile grid. With `shadow`, walls farther than
/// the light radius from the player are left dark.
pub fn rasterize(view: &PlayView, shadow: bool) -> TileGrid {
    let mut grid = TileGrid::new(view.maze_width * 2 + 1, view.maze_height * 2 + 1);
    let cs = view.cell_size;
    let player = center_tile(view.player.center(), cs);
    let radius = (SHADOW_RADIUS / (cs / 2.0)).max(MIN_SHADOW_TILES);

    for (start, end) in &view.walls {
        grid.line(corner_tile(*start, cs), corner_tile(*end, cs), Glyph::Wall);
    }
    if shadow {
        for y in 0..grid.height {
            for x in 0..grid.width {
                let dx = x as f32 - player.0 as f32;
                let dy = y as f32 - player.1 as f32;
                if (dx * dx + dy * dy).sqrt() > radius {
                    grid.set(x, y, Glyph::Empty);
                }
            }
        }
    }
    if let Some(points) = &view.guidance {
        let tiles: Vec<(usize, usize)> = points.iter().map(|p| center_tile(*p, cs)).collect();
        for pair in tiles.windows(2) {
            grid.line(pair[0], pair[1], Glyph::Guide);
        }
    }
    let finish = center_tile(view.finish.center(), cs);
    grid.set(finish.0, finish.1, Glyph::Finish);
    grid.set(player.0, player.1, Glyph::Player);
    grid
}

pub fn format_remaining(remaining: Option<f64>) -> Option<String> {
    remaining.map(|r| {
        let total = r.max(0.0) as u64;
        format!("Time Left: {:02}:{:02}", total / 60, total % 60)
    })
}

pub struct Renderer {
    last: Vec<Glyph>,
    last_hud: String,
    last_menu: Option<(Screen, String, Vec<Button>)>,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
    layout_origin: (u16, u16),
    shadow: bool,
}

impl Renderer {
    pub fn new(shadow: bool) -> Self {
        Self {
            last: Vec::new(),
            last_hud: String::new(),
            last_menu: None,
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
            layout_origin: (0, 0),
            shadow,
        }
    }

    /// Translates a terminal position into the current screen's layout
    /// coordinates.
    pub fn to_layout(&self, col: u16, row: u16) -> Option<(u16, u16)> {
        Some((
            col.checked_sub(self.layout_origin.0)?,
            row.checked_sub(self.layout_origin.1)?,
        ))
    }

    pub fn invalidate(&mut self) {
        self.needs_full = true;
        self.last_menu = None;
    }

    pub fn draw(&mut self, out: &mut impl Write, frame: &Frame) -> io::Result<()> {
        match frame {
            Frame::Play { view, buttons } => {
                if self.last_menu.take().is_some() {
                    self.needs_full = true;
                }
                self.draw_play(out, view, buttons)
            }
            Frame::Menu {
                screen,
                title,
                buttons,
            } => self.draw_menu(out, *screen, title, buttons),
        }
    }

    fn draw_play(&mut self, out: &mut impl Write, view: &PlayView, buttons: &[Button]) -> io::Result<()> {
        let grid = rasterize(view, self.shadow);
        let needed_h = (grid.height + 2) as u16;
        let needed_w = (grid.width * CELL_W) as u16;

        out.queue(MoveTo(0, 0))?;
        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            out.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            out.queue(Print(msg))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y || self.last.len() != grid.tiles.len() {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
            self.last = vec![Glyph::Empty; grid.tiles.len()];
        }
        self.layout_origin = (self.origin_x, self.origin_y - 1);

        let mut hud = String::new();
        for b in buttons {
            hud.push_str(&button_text(b));
            hud.push_str("  ");
        }
        if let Some(time) = format_remaining(view.remaining) {
            hud.push_str(&time);
            hud.push_str("  ");
        }
        hud.push_str("(q to quit)");
        if self.needs_full || hud != self.last_hud {
            out.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(SetForegroundColor(Color::White))?;
            out.queue(Print(&hud))?;
            out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for y in 0..grid.height {
            for x in 0..grid.width {
                let idx = y * grid.width + x;
                let glyph = grid.tiles[idx];
                if self.needs_full || glyph != self.last[idx] {
                    self.last[idx] = glyph;
                    self.draw_tile(out, x, y, glyph)?;
                }
            }
        }
        self.needs_full = false;

        out.flush()?;
        Ok(())
    }

    fn draw_tile(&self, out: &mut impl Write, x: usize, y: usize, glyph: Glyph) -> io::Result<()> {
        let (text, color) = match glyph {
            Glyph::Empty => ("  ", Color::Reset),
            Glyph::Wall => ("██", COLOR_WALL),
            Glyph::Player => ("██", COLOR_PLAYER),
            Glyph::Finish => ("▓▓", COLOR_FINISH),
            Glyph::Guide => ("•", COLOR_GUIDE),
        };
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        out.queue(MoveTo(x_pos, y_pos))?;
        out.queue(SetForegroundColor(color))?;
        out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                out.queue(Print(' '))?;
            }
        }
        out.queue(ResetColor)?;
        Ok(())
    }

    fn draw_menu(&mut self, out: &mut impl Write, screen: Screen, title: &str, buttons: &[Button]) -> io::Result<()> {
        let (term_w, term_h) = terminal::size()?;
        let origin_x = term_w.saturating_sub(MENU_W) / 2;
        let origin_y = term_h.saturating_sub(MENU_H) / 2;
        let key = (screen, title.to_string(), buttons.to_vec());
        if self.last_menu.as_ref() == Some(&key) && self.layout_origin == (origin_x, origin_y) {
            return Ok(());
        }
        self.layout_origin = (origin_x, origin_y);
        self.last_menu = Some(key);
        self.needs_full = true;

        out.queue(Clear(ClearType::All))?;
        let title_x = origin_x + MENU_W.saturating_sub(title.width() as u16) / 2;
        out.queue(MoveTo(title_x, origin_y))?;
        out.queue(SetForegroundColor(Color::White))?;
        out.queue(Print(title))?;
        out.queue(ResetColor)?;

        for b in buttons {
            draw_button(out, origin_x, origin_y, b)?;
        }
        out.queue(MoveTo(origin_x, origin_y + MENU_H))?;
        out.queue(Print("(q to quit)"))?;
        out.flush()?;
        Ok(())
    }
}

fn button_text(b: &Button) -> String {
    match b.hotkey {
        Some(k) => format!("[{}] {}", k, b.label),
        None => b.label.clone(),
    }
}

fn draw_button(out: &mut impl Write, ox: u16, oy: u16, b: &Button) -> io::Result<()> {
    let r = b.region;
    let color = if b.active { COLOR_HIGHLIGHT } else { Color::Grey };
    let inner = r.w.saturating_sub(2) as usize;
    let text = button_text(b);
    let pad = inner.saturating_sub(text.width());
    let middle = format!("│{}{}{}│", " ".repeat(pad / 2), text, " ".repeat(pad - pad / 2));
    let edge = "─".repeat(inner);

    out.queue(SetForegroundColor(color))?;
    out.queue(MoveTo(ox + r.x, oy + r.y))?;
    out.queue(Print(format!("┌{}┐", edge)))?;
    out.queue(MoveTo(ox + r.x, oy + r.y + 1))?;
    out.queue(Print(middle))?;
    out.queue(MoveTo(ox + r.x, oy + r.y + 2))?;
    out.queue(Print(format!("└{}┘", edge)))?;
    out.queue(ResetColor)?;
    Ok(())
}
