// What you SEE:
// • Left: a phone whose screen shows a scrolling stripe/checker/sine pattern
//   behind a frosted "glass" card.
// • Right: every parameter's current value, plus the key reference.
// • Keys change parameters (see HUD). With auto-scroll off, drag or use the
//   wheel on the screen to move the pattern. ESC quits.

use std::time::{Duration, Instant};

use glass_preview::config::{ControlLimits, PreviewConfig};
use glass_preview::controls::{self, action_for_key};
use glass_preview::draw::{Drawer, clip_rounded_corners, fill_rect, fill_rounded_rect};
use glass_preview::hud::{HudInfo, draw_hud, hud_lines};
use glass_preview::input::PointerTracker;
use glass_preview::{Error, FrameBuffer, FrameLoop, GlassStore, PreviewMount, ViewportSignal, layout};

const WINDOW_BG: u32 = 0x0003_0712; // behind everything
const PANE_BG: u32 = 0x0011_1827;   // preview pane
const BEZEL: u32 = 0x0011_1827;     // phone body, same tone as the pane's frame

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    /* --- Config + window ---
       Visual: a resizable window opens at the configured size. */
    let cfg = PreviewConfig::default();
    let limits = ControlLimits::for_phone(&cfg.phone);
    let mut drawer = Drawer::new(&cfg.title, cfg.window_width, cfg.window_height, cfg.target_fps)?;
    log::info!("window {}x{} @ {} fps", cfg.window_width, cfg.window_height, cfg.target_fps);

    /* --- Reusable screen buffer ---
       Visual: this is the image you actually see each frame. */
    let mut screen = FrameBuffer::new(cfg.window_width, cfg.window_height);

    /* --- State, signals, frame loop ---
       Visual: nothing yet; the preview draws once the screen has a size. */
    let mut store = GlassStore::new();
    let mut viewport = ViewportSignal::new();
    let frames = FrameLoop::new();
    let start = Instant::now();
    let preview = PreviewMount::mount(&mut store, &mut viewport, frames.clone());
    let mut pointer = PointerTracker::new(cfg.wheel_pixels_per_notch);

    /* --- FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut fps: f32 = 0.0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Layout from the current window size; the screen rect is the
              pattern's container, pushed as the viewport signal. */
        let (w, h) = drawer.size();
        if w == 0 || h == 0 {
            // Minimized: keep pumping events, draw nothing.
            drawer.pump();
            continue;
        }
        screen.resize(w, h);
        let layout = layout::compute(w, h, &cfg);
        viewport.push(layout.screen.size());

        /* 2) Controls: each key press → one clamped store mutation. */
        let shift = drawer.shift_down();
        for key in drawer.keys_pressed() {
            if let Some(action) = action_for_key(key, shift) {
                controls::apply(&mut store, &limits, action);
            }
        }

        /* 3) Pointer: drag / wheel on the phone screen. */
        for event in pointer.update(drawer.pointer_sample(), layout.screen) {
            preview.handle_pointer(event);
        }

        /* 4) Animation frames requested by the auto-scroll loop. */
        frames.advance_to(now.duration_since(start).as_secs_f64() * 1000.0);
        preview.run_frames();

        /* 5) Paint: background, phone body, screen contents, rounded display, HUD. */
        screen.fill(WINDOW_BG);
        fill_rect(&mut screen, layout.preview_pane, PANE_BG);
        fill_rounded_rect(&mut screen, layout.phone, cfg.phone.body_radius, BEZEL);
        preview.compose(&mut screen, layout.screen)?;
        clip_rounded_corners(&mut screen, layout.screen, cfg.phone.screen_radius, BEZEL);

        let state = store.state();
        let info = HudInfo { state: &state, scroll: preview.scroll_state(), offset: preview.scroll_offset(), fps };
        draw_hud(&mut screen, layout.hud_pane, &hud_lines(&info));

        /* 6) Present to the window (this is when the on-screen image updates). */
        drawer.present(&screen)?;

        /* 7) FPS counter (HUD + debug log once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            fps = frames_this_second as f32 / secs;
            log::debug!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    preview.unmount(&mut store, &mut viewport);
    log::info!("window closed");
    Ok(())
}
