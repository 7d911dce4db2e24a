// Window geometry, phone frame dimensions and control-surface ranges.

/// Simulated phone: 393x852 points scaled to 85%, minus a 14 px bezel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhoneFrame {
    pub screen_width: u32,
    pub screen_height: u32,
    pub bezel: u32,
    pub screen_radius: f32,
    pub body_radius: f32,
}

impl Default for PhoneFrame {
    fn default() -> Self {
        Self {
            screen_width: 306,
            screen_height: 696,
            bezel: 14,
            screen_radius: 32.0,
            body_radius: 48.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewConfig {
    pub title: String,
    pub window_width: usize,
    pub window_height: usize,
    pub target_fps: usize,
    /// Share of the window width given to the preview pane; the rest is the HUD.
    pub preview_share: f32,
    pub phone: PhoneFrame,
    /// Pixels per wheel notch, matching a browser's `deltaY` for one notch.
    pub wheel_pixels_per_notch: f64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            title: "Glass Preview".to_string(),
            window_width: 960,
            window_height: 800,
            target_fps: 60,
            preview_share: 0.7,
            phone: PhoneFrame::default(),
            wheel_pixels_per_notch: 100.0,
        }
    }
}

/// Inclusive range plus the step one key press moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }

    /// One step up (`dir > 0`) or down, clamped.
    pub fn stepped(&self, v: f64, dir: f64) -> f64 {
        self.clamp(v + self.step * dir.signum())
    }
}

/// UI-level min/max for every slider-like control. The store itself never clamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlLimits {
    pub spatial_frequency: Range,
    pub scroll_speed: Range,
    pub blur_strength: Range,
    pub opacity: Range,
    pub border_opacity: Range,
    pub width: Range,
    pub height: Range,
    pub border_radius: Range,
    pub position: Range,
}

impl ControlLimits {
    /// Overlay size is bounded by the simulated screen.
    pub fn for_phone(phone: &PhoneFrame) -> Self {
        Self {
            spatial_frequency: Range::new(10.0, 200.0, 5.0),
            scroll_speed: Range::new(0.0, 30.0, 0.5),
            blur_strength: Range::new(0.0, 50.0, 2.0),
            opacity: Range::new(0.0, 1.0, 0.05),
            border_opacity: Range::new(0.0, 1.0, 0.05),
            width: Range::new(0.0, phone.screen_width as f64, 10.0),
            height: Range::new(0.0, phone.screen_height as f64, 10.0),
            border_radius: Range::new(0.0, 50.0, 2.0),
            position: Range::new(0.0, 100.0, 2.0),
        }
    }
}

impl Default for ControlLimits {
    fn default() -> Self {
        Self::for_phone(&PhoneFrame::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_clamps_at_both_ends() {
        let r = Range::new(10.0, 200.0, 5.0);
        assert_eq!(r.stepped(198.0, 1.0), 200.0);
        assert_eq!(r.stepped(12.0, -1.0), 10.0);
        assert_eq!(r.stepped(50.0, 1.0), 55.0);
    }

    #[test]
    fn overlay_size_limits_follow_screen() {
        let limits = ControlLimits::default();
        assert_eq!(limits.width.max, 306.0);
        assert_eq!(limits.height.max, 696.0);
    }
}
