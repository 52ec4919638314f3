use std::time::{Duration, Instant};

/// Frame cadence bookkeeping. Reports the frame rate to the log twice a
/// second instead of a window title.
pub struct FrameTiming {
    last_frame_time: Option<Instant>,
    last_fps_time: Instant,
    frame_count: u32,
    pub frame_dt: f32,
    fps: f32,
    label: String,
}

impl FrameTiming {
    pub fn new(label: String) -> Self {
        Self::starting_at(label, Instant::now())
    }

    pub fn starting_at(label: String, now: Instant) -> Self {
        Self {
            last_frame_time: None,
            last_fps_time: now,
            frame_count: 0,
            frame_dt: 1.0 / 60.0,
            fps: 0.0,
            label,
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn update(&mut self, now: Instant) {
        let dt_duration = if let Some(last) = self.last_frame_time {
            now.saturating_duration_since(last)
        } else {
            Duration::from_millis(16)
        };
        self.last_frame_time = Some(now);
        self.frame_dt = dt_duration.as_secs_f32().max(0.0);

        self.frame_count = self.frame_count.saturating_add(1);
        let elapsed = now.saturating_duration_since(self.last_fps_time);
        if elapsed.as_secs_f32() >= 0.5 {
            self.fps = self.frame_count as f32 / elapsed.as_secs_f32();
            log::trace!(
                "{} - {:.1} fps (cadence {:.2} ms)",
                self.label,
                self.fps,
                self.frame_dt * 1000.0
            );
            self.frame_count = 0;
            self.last_fps_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_assumes_sixty_hertz_then_measures() {
        let start = Instant::now();
        let mut timing = FrameTiming::starting_at("test".to_string(), start);

        timing.update(start);
        assert!((timing.frame_dt - 0.016).abs() < 1e-6);

        timing.update(start + Duration::from_millis(40));
        assert!((timing.frame_dt - 0.04).abs() < 1e-4);
    }

    #[test]
    fn fps_is_reported_after_half_a_second() {
        let start = Instant::now();
        let mut timing = FrameTiming::starting_at("test".to_string(), start);
        for frame in 1..=30 {
            timing.update(start + Duration::from_millis(20 * frame));
        }
        assert!((timing.fps() - 50.0).abs() < 1.0);
    }
}
