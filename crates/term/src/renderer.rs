//! TerminalRenderer: flushes rendered lines to a real terminal.
//!
//! Only rows that changed since the previous frame are rewritten.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::view::{Line, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Vec<Line>>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(8 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a frame, rewriting only rows that differ from the last one.
    pub fn draw(&mut self, lines: Vec<Line>) -> Result<()> {
        self.buf.clear();
        match &self.last {
            Some(prev) => encode_diff_into(prev, &lines, &mut self.buf)?,
            None => encode_full_into(&lines, &mut self.buf)?,
        }
        if !self.buf.is_empty() {
            self.flush_buf()?;
        }
        self.last = Some(lines);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(lines: &[Line], out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    for (y, line) in lines.iter().enumerate() {
        encode_row_into(y, line, out)?;
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the rows that changed between `prev` and `next`.
///
/// Leaves `out` untouched when nothing changed.
pub fn encode_diff_into(prev: &[Line], next: &[Line], out: &mut Vec<u8>) -> Result<()> {
    let rows = prev.len().max(next.len());
    let mut dirty = false;

    for y in 0..rows {
        match (prev.get(y), next.get(y)) {
            (Some(a), Some(b)) if a == b => continue,
            (_, Some(line)) => encode_row_into(y, line, out)?,
            (_, None) => encode_row_into(y, &Line::blank(), out)?,
        }
        dirty = true;
    }

    if dirty {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

fn encode_row_into(y: usize, line: &Line, out: &mut Vec<u8>) -> Result<()> {
    let row = u16::try_from(y).unwrap_or(u16::MAX);
    out.queue(cursor::MoveTo(0, row))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    apply_style_into(out, line.style)?;
    out.queue(Print(&line.text))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(style_color(style)))?;
    match style {
        Style::Title => {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        Style::Dim => {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        _ => {}
    }
    Ok(())
}

fn style_color(style: Style) -> Color {
    match style {
        Style::Plain | Style::Dim => Color::Reset,
        Style::Title => Color::Rgb {
            r: 72,
            g: 187,
            b: 120,
        },
        Style::Info => Color::Rgb {
            r: 99,
            g: 179,
            b: 237,
        },
        Style::Success => Color::Rgb {
            r: 104,
            g: 211,
            b: 145,
        },
        Style::Error => Color::Rgb {
            r: 245,
            g: 101,
            b: 101,
        },
        Style::Warning => Color::Rgb {
            r: 246,
            g: 173,
            b: 85,
        },
    }
}
