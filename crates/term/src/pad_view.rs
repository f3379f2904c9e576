//! PadView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). The pad layout it draws is also the one used
//! to hit-test mouse clicks, so what the player sees is what they click.

use arrayvec::ArrayVec;

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rect, Rgb};
use crate::types::{GameState, Symbol, MAX_PAD_COUNT};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Pad colours, in symbol order.
pub const PALETTE: [Rgb; MAX_PAD_COUNT as usize] = [
    Rgb::new(0, 200, 0),     // green
    Rgb::new(255, 0, 0),     // red
    Rgb::new(255, 255, 0),   // yellow
    Rgb::new(0, 128, 255),   // blue
    Rgb::new(200, 0, 200),   // magenta
    Rgb::new(0, 200, 200),   // cyan
    Rgb::new(255, 140, 0),   // orange
    Rgb::new(220, 220, 220), // white
    Rgb::new(128, 64, 255),  // purple
];

const PANEL_WIDTH: u16 = 18;
const MIN_WIDTH_FOR_PANEL: u16 = 40;

/// Where each pad (and the status panel) lands for a given viewport.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PadLayout {
    pub pads: ArrayVec<Rect, { MAX_PAD_COUNT as usize }>,
    pub board: Rect,
    pub panel: Option<Rect>,
}

impl PadLayout {
    /// The pad under a terminal cell, if any.
    pub fn pad_at(&self, x: u16, y: u16) -> Option<Symbol> {
        self.pads
            .iter()
            .position(|r| r.contains(x, y))
            .map(|i| Symbol::new(i as u8))
    }
}

/// Renders the pad grid and status panel.
pub struct PadView {
    columns: u16,
    gap: u16,
}

impl Default for PadView {
    fn default() -> Self {
        // Two columns, like the classic 2x2 board.
        Self { columns: 2, gap: 1 }
    }
}

impl PadView {
    pub fn new(columns: u16, gap: u16) -> Self {
        Self {
            columns: columns.max(1),
            gap,
        }
    }

    pub fn layout(&self, pad_count: u8, viewport: Viewport) -> PadLayout {
        let pad_count = pad_count.min(MAX_PAD_COUNT) as u16;

        let panel = (viewport.width >= MIN_WIDTH_FOR_PANEL).then(|| {
            Rect::new(
                viewport.width - PANEL_WIDTH,
                0,
                PANEL_WIDTH,
                viewport.height,
            )
        });
        let board_w = viewport.width - panel.map(|p| p.w).unwrap_or(0);
        let board = Rect::new(0, 0, board_w, viewport.height);

        let columns = self.columns.min(pad_count.max(1));
        let rows = pad_count.div_ceil(columns).max(1);
        let pad_w = board_w.saturating_sub(self.gap * (columns + 1)) / columns;
        let pad_h = viewport.height.saturating_sub(self.gap * (rows + 1)) / rows;

        let mut pads = ArrayVec::new();
        for i in 0..pad_count {
            let col = i % columns;
            let row = i / columns;
            pads.push(Rect::new(
                self.gap + col * (pad_w + self.gap),
                self.gap + row * (pad_h + self.gap),
                pad_w,
                pad_h,
            ));
        }

        PadLayout { pads, board, panel }
    }

    /// Render into an existing framebuffer (reused across frames).
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(snap.pad_count, viewport);

        for (i, rect) in layout.pads.iter().enumerate() {
            let symbol = Symbol::new(i as u8);
            self.draw_pad(fb, *rect, symbol, snap.is_active(symbol), snap.input_enabled);
        }

        if let Some(panel) = layout.panel {
            self.draw_panel(fb, snap, panel);
        } else {
            let y = viewport.height.saturating_sub(1);
            self.draw_centered(fb, layout.board, y, phase_text(snap.state), label_style());
        }

        if snap.game_over() {
            let mid = layout.board.h / 2;
            self.draw_centered(fb, layout.board, mid, phase_text(snap.state), overlay_style());
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_pad(&self, fb: &mut FrameBuffer, rect: Rect, symbol: Symbol, lit: bool, enabled: bool) {
        if rect.is_empty() {
            return;
        }
        let base = PALETTE[symbol.index() as usize];
        let bg = if lit { base } else { base.darker() };
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg,
            bold: lit,
            dim: !enabled && !lit,
        };
        fb.fill_rect(rect, ' ', style);
        fb.put_char(rect.x + rect.w / 2, rect.y + rect.h / 2, symbol.label(), style);
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, panel: Rect) {
        let label = label_style();
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            ..CellStyle::default()
        };
        let x = panel.x + 1;
        let mut y = panel.y + 1;

        fb.put_str(x, y, "SIMON", label);
        y += 2;
        fb.put_str(x, y, phase_text(snap.state), value);
        y += 2;

        fb.put_str(x, y, "ROUND", label);
        fb.put_u32(x + 8, y, snap.round, value);
        y += 1;
        fb.put_str(x, y, "LENGTH", label);
        fb.put_u32(x + 8, y, snap.sequence_len as u32, value);
        y += 1;
        if let Some(run) = snap.longest_run {
            fb.put_str(x, y, "LONGEST", label);
            fb.put_u32(x + 8, y, run as u32, value);
            y += 1;
        }
        if snap.best_run > 0 {
            fb.put_str(x, y, "BEST", label);
            fb.put_u32(x + 8, y, snap.best_run as u32, value);
            y += 1;
        }

        y += 1;
        let dim = CellStyle { dim: true, ..value };
        fb.put_str(x, y, "1-", dim);
        fb.put_u32(x + 2, y, snap.pad_count as u32, dim);
        fb.put_str(x + 4, y, "press pad", dim);
        y += 1;
        fb.put_str(x, y, "q   quit", dim);
    }

    fn draw_centered(&self, fb: &mut FrameBuffer, area: Rect, y: u16, text: &str, style: CellStyle) {
        let text_w = text.chars().count() as u16;
        let x = area.x + area.w.saturating_sub(text_w) / 2;
        fb.put_str(x, y, text, style);
    }
}

fn label_style() -> CellStyle {
    CellStyle {
        bold: true,
        ..CellStyle::default()
    }
}

fn overlay_style() -> CellStyle {
    CellStyle {
        fg: Rgb::new(255, 255, 255),
        bg: Rgb::new(0, 0, 0),
        bold: true,
        dim: false,
    }
}

fn phase_text(state: GameState) -> &'static str {
    match state {
        GameState::SimonPlaying => "SIMON",
        GameState::AwaitingPlayer => "YOUR TURN",
        GameState::Resetting => "GET READY",
        GameState::Terminating => "WRONG!",
        GameState::GameOver => "GAME OVER",
    }
}
