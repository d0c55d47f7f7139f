//! TerminalRenderer: presents game frames on a real terminal.
//!
//! A frame is only rebuilt when something the player can see changed: the
//! snapshot revision, the sweep progress or the terminal size. Rebuilt frames
//! are diffed against the last one and only changed spans are written.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::clear_animation::ClearAnimation;
use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::game_view::{GameView, Viewport};

/// Unchanged cells between two changed spans that are reprinted rather than
/// skipped with a cursor move; a move costs about as many bytes.
const BRIDGE_GAP: usize = 4;

/// Everything a presented frame depends on besides the view's fixed palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameKey {
    revision: u32,
    sweep_frames: Option<u32>,
    viewport: Viewport,
}

impl FrameKey {
    pub fn new(snap: &GameSnapshot, clearing: Option<&ClearAnimation>, viewport: Viewport) -> Self {
        Self {
            revision: snap.revision,
            sweep_frames: clearing.map(ClearAnimation::frames),
            viewport,
        }
    }
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame written, diffed against the next one
    last: Option<FrameBuffer>,
    last_key: Option<FrameKey>,
    buf: Vec<u8>,
    /// Keyboard enhancement pushed on enter, popped on exit
    enhanced_keys: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            last_key: None,
            buf: Vec::with_capacity(64 * 1024),
            enhanced_keys: false,
        }
    }

    /// Raw mode and alternate screen. Asks for key-release events where the
    /// terminal supports them so soft drop ends on the real release.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);

        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        if self.enhanced_keys {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.enhanced_keys {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget the screen contents; the next present repaints everything.
    pub fn invalidate(&mut self) {
        self.last = None;
        self.last_key = None;
    }

    /// Render and flush one game frame into `fb`, unless nothing visible
    /// changed since the last one. Returns whether anything was written.
    pub fn present(
        &mut self,
        view: &GameView,
        snap: &GameSnapshot,
        clearing: Option<&ClearAnimation>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) -> Result<bool> {
        let key = FrameKey::new(snap, clearing, viewport);
        if self.last_key == Some(key) {
            return Ok(false);
        }
        view.render_into_with_clear(snap, clearing, viewport, fb);
        self.draw_swap(fb)?;
        self.last_key = Some(key);
        Ok(true)
    }

    /// Flush `fb` and keep it as the diff base, handing the previous buffer
    /// back through `fb` for reuse.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Clear the screen and write every cell of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut w = AnsiWriter::new(out);
    for y in 0..fb.height() {
        w.move_to(0, y)?;
        for &cell in fb.row(y) {
            w.put(cell)?;
        }
    }
    w.finish()
}

/// Write the spans of `next` that differ from `prev` into `out`. Writes
/// nothing at all when the frames are equal.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut w = AnsiWriter::new(out);
    for y in 0..next.height() {
        let (old, new) = (prev.row(y), next.row(y));
        if old == new {
            continue;
        }
        for_each_span(old, new, |start, end| {
            w.move_to(start as u16, y)?;
            for &cell in &new[start..end] {
                w.put(cell)?;
            }
            Ok(())
        })?;
    }
    w.finish()
}

/// Call `f(start, end)` for each run of changed cells in a row. Runs closer
/// than [`BRIDGE_GAP`] are merged into one.
fn for_each_span(
    old: &[Cell],
    new: &[Cell],
    mut f: impl FnMut(usize, usize) -> Result<()>,
) -> Result<()> {
    let mut span: Option<(usize, usize)> = None;
    for (x, (a, b)) in old.iter().zip(new).enumerate() {
        if a == b {
            continue;
        }
        span = match span {
            Some((start, end)) if x - end <= BRIDGE_GAP => Some((start, x + 1)),
            Some((start, end)) => {
                f(start, end)?;
                Some((x, x + 1))
            }
            None => Some((x, x + 1)),
        };
    }
    match span {
        Some((start, end)) => f(start, end),
        None => Ok(()),
    }
}

/// Queues cells while tracking cursor and SGR state, so moves and colour
/// changes are only emitted when they differ from what the terminal has.
struct AnsiWriter<'a> {
    out: &'a mut Vec<u8>,
    cursor: Option<(u16, u16)>,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    weight: Option<(bool, bool)>,
    wrote: bool,
}

impl<'a> AnsiWriter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            cursor: None,
            fg: None,
            bg: None,
            weight: None,
            wrote: false,
        }
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        if self.cursor != Some((x, y)) {
            self.out.queue(cursor::MoveTo(x, y))?;
            self.cursor = Some((x, y));
        }
        Ok(())
    }

    fn style(&mut self, style: CellStyle) -> Result<()> {
        if self.weight != Some((style.bold, style.dim)) {
            self.out.queue(SetAttribute(Attribute::NormalIntensity))?;
            if style.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.weight = Some((style.bold, style.dim));
        }
        if self.fg != Some(style.fg) {
            self.out.queue(SetForegroundColor(truecolor(style.fg)))?;
            self.fg = Some(style.fg);
        }
        if self.bg != Some(style.bg) {
            self.out.queue(SetBackgroundColor(truecolor(style.bg)))?;
            self.bg = Some(style.bg);
        }
        Ok(())
    }

    fn put(&mut self, cell: Cell) -> Result<()> {
        self.style(cell.style)?;
        self.out.queue(Print(cell.ch))?;
        self.cursor = self.cursor.map(|(x, y)| (x.saturating_add(1), y));
        self.wrote = true;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        if self.wrote {
            self.out.queue(ResetColor)?;
            self.out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn truecolor(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
