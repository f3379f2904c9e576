use std::sync::{Arc, RwLock};

use anyhow::Result;

use crate::core::GameSnapshot;
use crate::term::{FrameBuffer, PadLayout, PadView, TerminalRenderer, Viewport};

/// Consumer of per-frame game state.
pub trait RenderSink {
    fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()>;

    /// The output surface changed under us (e.g. a resize).
    fn invalidate(&mut self) {}
}

/// Draws the pad board to the terminal and publishes its layout for mouse
/// hit-testing by the input reader.
pub struct TerminalSink<'a> {
    renderer: &'a mut TerminalRenderer,
    view: PadView,
    fb: FrameBuffer,
    layout: Arc<RwLock<PadLayout>>,
    viewport: Option<Viewport>,
}

impl<'a> TerminalSink<'a> {
    pub fn new(renderer: &'a mut TerminalRenderer, layout: Arc<RwLock<PadLayout>>) -> Self {
        Self {
            renderer,
            view: PadView::default(),
            fb: FrameBuffer::new(0, 0),
            layout,
            viewport: None,
        }
    }
}

impl RenderSink for TerminalSink<'_> {
    fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);

        if self.viewport != Some(viewport) {
            let layout = self.view.layout(snapshot.pad_count, viewport);
            if let Ok(mut shared) = self.layout.write() {
                *shared = layout;
            }
            self.viewport = Some(viewport);
        }

        self.view.render_into(snapshot, viewport, &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }

    fn invalidate(&mut self) {
        self.viewport = None;
        self.renderer.invalidate();
    }
}
