use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use simon::core::{Directive, GameConfig, GameEvent, TurnController};
use simon::input::{DeviceInput, SelectionLatch};
use simon::term::{encode_diff_into, FrameBuffer, PadView, Viewport};
use simon::types::{InputEvent, Symbol, Timer};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

/// Play one round by hand: playback ticks, then repeat every symbol.
fn play_round(c: &mut TurnController) {
    loop {
        let out = c.handle(GameEvent::Timer(Timer::PlaybackTick));
        let more = out.iter().any(|d| {
            matches!(
                d,
                Directive::Schedule {
                    timer: Timer::PlaybackTick,
                    ..
                }
            )
        });
        if !more {
            break;
        }
    }
    for i in 0..c.sequence().len() {
        let symbol = c.sequence().as_slice()[i];
        c.handle(GameEvent::Input(InputEvent::SymbolSelected(symbol)));
        c.handle(GameEvent::Input(InputEvent::SymbolCleared));
    }
    c.handle(GameEvent::Timer(Timer::NextRound));
}

#[test]
fn controller_rounds_do_not_allocate() {
    let mut c = TurnController::new(GameConfig::default(), 4242);
    c.start();
    // Warm-up: first growth of the sequence and first hit of every log callsite.
    play_round(&mut c);

    let allocs = with_alloc_counting(|| {
        for _ in 0..5 {
            play_round(&mut c);
        }
        let _ = c.snapshot();
    });

    assert_eq!(c.round(), 7);
    assert!(allocs == 0);
}

#[test]
fn pad_view_render_into_does_not_allocate() {
    let mut c = TurnController::new(GameConfig::default(), 1);
    c.start();

    let view = PadView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    view.render_into(&c.snapshot(), viewport, &mut fb);

    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            let snap = c.snapshot();
            view.render_into(&snap, viewport, &mut fb);
        }
    });

    assert!(allocs == 0);
}

#[test]
fn selection_latch_does_not_allocate() {
    let mut latch = SelectionLatch::new();

    let allocs = with_alloc_counting(|| {
        for i in 0..200u32 {
            let symbol = Symbol::new((i % 4) as u8);
            latch.offer(DeviceInput::PointerPress(symbol));
            latch.offer(DeviceInput::PointerRelease);
            latch.offer(DeviceInput::KeyPress(symbol));
            let _ = latch.resolve();
        }
    });

    assert!(allocs == 0);
}

#[test]
fn diff_encoding_does_not_allocate() {
    let mut c = TurnController::new(GameConfig::default(), 9);
    c.start();

    let view = PadView::default();
    let viewport = Viewport::new(80, 24);
    let mut lit = FrameBuffer::new(viewport.width, viewport.height);
    let mut idle = FrameBuffer::new(viewport.width, viewport.height);
    view.render_into(&c.snapshot(), viewport, &mut lit);
    let mut snap = c.snapshot();
    snap.active = None;
    view.render_into(&snap, viewport, &mut idle);

    let mut out = Vec::with_capacity(256 * 1024);
    encode_diff_into(&idle, &lit, &mut out).unwrap();
    assert!(!out.is_empty());

    let allocs = with_alloc_counting(|| {
        for i in 0..200 {
            out.clear();
            let (prev, next) = if i % 2 == 0 { (&idle, &lit) } else { (&lit, &idle) };
            encode_diff_into(prev, next, &mut out).unwrap();
        }
    });

    assert!(allocs == 0);
}
