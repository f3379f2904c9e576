use simon::core::{GameConfig, GameSnapshot, TurnController};
use simon::input::{handle_event, DeviceInput};
use simon::term::{CellStyle, PadView, Rgb, Viewport, PALETTE};
use simon::types::{GameState, Symbol};

use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

fn snapshot(state: GameState, active: Option<Symbol>) -> GameSnapshot {
    GameSnapshot {
        state,
        active,
        input_enabled: state.input_enabled(),
        pad_count: 4,
        round: 3,
        sequence_len: 3,
        longest_run: None,
        best_run: 0,
    }
}

fn center_style(view: &PadView, snap: &GameSnapshot, vp: Viewport, pad: usize) -> CellStyle {
    let fb = view.render(snap, vp);
    let rect = view.layout(snap.pad_count, vp).pads[pad];
    fb.get(rect.x + 1, rect.y + 1).unwrap().style
}

#[test]
fn active_pad_is_lit_others_darkened() {
    let view = PadView::default();
    let vp = Viewport::new(30, 21);
    let snap = snapshot(GameState::SimonPlaying, Some(Symbol::new(2)));

    let lit = center_style(&view, &snap, vp, 2);
    assert_eq!(lit.bg, PALETTE[2]);
    assert!(lit.bold);

    let dark = center_style(&view, &snap, vp, 0);
    assert_eq!(dark.bg, PALETTE[0].darker());
    assert!(dark.dim, "input disabled during playback");
}

#[test]
fn pads_are_not_dimmed_on_player_turn() {
    let view = PadView::default();
    let vp = Viewport::new(30, 21);
    let snap = snapshot(GameState::AwaitingPlayer, None);

    for pad in 0..4 {
        let style = center_style(&view, &snap, vp, pad);
        assert!(!style.dim);
        assert_eq!(style.bg, PALETTE[pad].darker());
    }
}

#[test]
fn palette_opens_with_classic_colours() {
    assert_eq!(PALETTE[0], Rgb::new(0, 200, 0));
    assert_eq!(PALETTE[1], Rgb::new(255, 0, 0));
    assert_eq!(PALETTE[2], Rgb::new(255, 255, 0));
    assert_eq!(PALETTE[3], Rgb::new(0, 128, 255));
}

#[test]
fn pads_carry_one_based_labels() {
    let view = PadView::default();
    let vp = Viewport::new(30, 21);
    let snap = snapshot(GameState::AwaitingPlayer, None);
    let fb = view.render(&snap, vp);

    for (i, rect) in view.layout(4, vp).pads.iter().enumerate() {
        let ch = fb.get(rect.x + rect.w / 2, rect.y + rect.h / 2).unwrap().ch;
        assert_eq!(ch, char::from(b'1' + i as u8));
    }
}

#[test]
fn status_panel_shows_phase_and_round() {
    let view = PadView::default();
    let vp = Viewport::new(80, 24);

    let text = view
        .render(&snapshot(GameState::AwaitingPlayer, None), vp)
        .text();
    assert!(text.contains("YOUR TURN"));
    assert!(text.contains("ROUND"));
    assert!(!text.contains("LONGEST"));

    let mut over = snapshot(GameState::GameOver, None);
    over.longest_run = Some(7);
    over.best_run = 7;
    let text = view.render(&over, vp).text();
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("LONGEST 7"));
}

#[test]
fn narrow_terminal_still_shows_phase() {
    let view = PadView::default();
    let fb = view.render(&snapshot(GameState::Resetting, None), Viewport::new(30, 21));
    assert!(fb.row_text(20).contains("GET READY"));
}

#[test]
fn render_matches_live_controller() {
    let mut controller = TurnController::new(GameConfig::default(), 5);
    controller.start();
    let snap = controller.snapshot();
    let active = snap.active.unwrap();

    let view = PadView::default();
    let vp = Viewport::new(40, 20);
    let style = center_style(&view, &snap, vp, active.index() as usize);
    assert_eq!(style.bg, PALETTE[active.index() as usize]);
}

#[test]
fn mouse_clicks_hit_the_pad_drawn_there() {
    let view = PadView::default();
    let vp = Viewport::new(80, 24);
    let layout = view.layout(4, vp);
    let hit = |x: u16, y: u16| layout.pad_at(x, y);

    for (i, rect) in layout.pads.iter().enumerate() {
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: rect.x + rect.w - 1,
            row: rect.y,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            handle_event(&click, 4, &hit),
            Some(DeviceInput::PointerPress(Symbol::new(i as u8)))
        );
    }

    // Clicking the status panel selects nothing.
    let panel = layout.panel.unwrap();
    let miss = Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: panel.x + 2,
        row: 2,
        modifiers: KeyModifiers::NONE,
    });
    assert_eq!(handle_event(&miss, 4, &hit), None);
}

#[test]
fn nine_pads_fit_in_five_rows() {
    let view = PadView::default();
    let layout = view.layout(9, Viewport::new(80, 40));
    assert_eq!(layout.pads.len(), 9);
    for (i, a) in layout.pads.iter().enumerate() {
        assert!(!a.is_empty());
        for b in layout.pads.iter().skip(i + 1) {
            let overlap = a.x < b.x + b.w && b.x < a.x + a.w && a.y < b.y + b.h && b.y < a.y + a.h;
            assert!(!overlap, "{:?} overlaps {:?}", a, b);
        }
    }
}
