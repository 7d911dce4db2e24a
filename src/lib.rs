// Glassmorphism preview: a simulated phone screen with a scrolling tiled
// pattern behind a configurable frosted-glass panel.
//
// The core (`store`, `pattern`, `scroll`, `scheduler`, `viewport`) has no
// window dependency and is driven entirely through explicit inputs; `draw`
// and the binary wire it to a `minifb` window.

pub mod config;
pub mod controls;
pub mod draw;
pub mod error;
pub mod gamma;
pub mod glass;
pub mod hud;
pub mod input;
pub mod layout;
pub mod pattern;
pub mod preview;
pub mod scheduler;
pub mod scroll;
pub mod signal;
pub mod store;
pub mod types;
pub mod viewport;

pub use error::Error;
pub use pattern::{PatternRenderer, render_pattern, scroll_shift};
pub use preview::PreviewMount;
pub use scheduler::{FrameHandle, FrameLoop, FrameScheduler};
pub use scroll::{PointerEvent, ScrollController, ScrollState};
pub use store::{BackgroundParams, GlassState, GlassStore, OverlayParams, PatternKind};
pub use types::{FrameBuffer, Rect, ViewportSize};
pub use viewport::ViewportSignal;
