use crate::core::params::ParameterSet;
use crate::core::playback::{DEFAULT_TICK_S, Phase, PlaybackController, TickOutcome};

/// Catch-up cap per frame in real-time mode; time beyond it is dropped.
const MAX_STEPS_PER_FRAME: u32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickPolicy {
    /// Exactly one fixed step per rendered frame, whatever the frame time.
    PerFrame,
    /// Accumulate frame time and run as many fixed steps as it covers.
    RealTime,
}

/// Turns host frames into `tick` calls on a controller. Holds no timers of its
/// own; the host stops driving it by not calling `on_frame`.
#[derive(Clone, Debug)]
pub struct FrameScheduler {
    step_s: f64,
    policy: TickPolicy,
    pending_s: f64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_S, TickPolicy::PerFrame)
    }
}

impl FrameScheduler {
    pub fn new(step_s: f64, policy: TickPolicy) -> Self {
        let step_s = if step_s.is_finite() && step_s > 0.0 {
            step_s
        } else {
            DEFAULT_TICK_S
        };
        Self {
            step_s,
            policy,
            pending_s: 0.0,
        }
    }

    pub fn step_s(&self) -> f64 {
        self.step_s
    }

    pub fn policy(&self) -> TickPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: TickPolicy) {
        self.policy = policy;
        self.cancel();
    }

    /// Drops any accumulated frame time. Call on pause, reset and teardown.
    pub fn cancel(&mut self) {
        self.pending_s = 0.0;
    }

    /// Number of fixed steps owed for a frame that took `frame_dt` seconds.
    pub fn steps_for_frame(&mut self, frame_dt: f64) -> u32 {
        match self.policy {
            TickPolicy::PerFrame => 1,
            TickPolicy::RealTime => {
                if frame_dt.is_finite() && frame_dt > 0.0 {
                    self.pending_s += frame_dt;
                }
                let owed = (self.pending_s / self.step_s).floor();
                let steps = (owed as u32).min(MAX_STEPS_PER_FRAME);
                if owed as u32 > MAX_STEPS_PER_FRAME {
                    self.pending_s = 0.0;
                } else {
                    self.pending_s -= f64::from(steps) * self.step_s;
                }
                steps
            }
        }
    }

    /// Drives `controller` for one frame and returns how many ticks advanced
    /// the flight. Frames outside `Running` cost nothing and bank no time.
    pub fn on_frame(
        &mut self,
        controller: &mut PlaybackController,
        params: &ParameterSet,
        frame_dt: f64,
    ) -> u32 {
        if controller.phase() != Phase::Running {
            self.cancel();
            return 0;
        }

        let mut advanced = 0;
        for _ in 0..self.steps_for_frame(frame_dt) {
            match controller.tick(self.step_s, params) {
                TickOutcome::Advanced => advanced += 1,
                TickOutcome::Landed => {
                    advanced += 1;
                    self.cancel();
                    break;
                }
                TickOutcome::Ignored => break,
            }
        }
        advanced
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameScheduler, TickPolicy};
    use crate::core::mapper::DisplayConfig;
    use crate::core::model::PhysicsModel;
    use crate::core::params::ParameterSet;
    use crate::core::playback::{Phase, PlaybackController};

    fn controller() -> PlaybackController {
        PlaybackController::new(PhysicsModel::Analytic, DisplayConfig::default()).unwrap()
    }

    #[test]
    fn per_frame_runs_one_step_regardless_of_frame_time() {
        let mut scheduler = FrameScheduler::default();
        assert_eq!(scheduler.steps_for_frame(0.001), 1);
        assert_eq!(scheduler.steps_for_frame(0.5), 1);
    }

    #[test]
    fn real_time_accumulates_fractional_frames() {
        let mut scheduler = FrameScheduler::new(0.05, TickPolicy::RealTime);
        assert_eq!(scheduler.steps_for_frame(0.03), 0);
        assert_eq!(scheduler.steps_for_frame(0.03), 1);
        assert_eq!(scheduler.steps_for_frame(0.095), 2);
    }

    #[test]
    fn long_stalls_are_capped_and_dropped() {
        let mut scheduler = FrameScheduler::new(0.05, TickPolicy::RealTime);
        assert_eq!(scheduler.steps_for_frame(10.0), 8);
        assert_eq!(scheduler.steps_for_frame(0.0), 0);
    }

    #[test]
    fn paused_frames_do_not_bank_time() {
        let params = ParameterSet::default();
        let mut c = controller();
        let mut scheduler = FrameScheduler::new(0.05, TickPolicy::RealTime);
        c.fire(&params);
        c.pause();
        for _ in 0..20 {
            assert_eq!(scheduler.on_frame(&mut c, &params, 0.1), 0);
        }
        c.resume();
        assert_eq!(scheduler.on_frame(&mut c, &params, 0.06), 1);
        assert_eq!(c.phase(), Phase::Running);
    }

    #[test]
    fn drives_a_flight_to_landing() {
        let params = ParameterSet::default();
        let mut c = controller();
        let mut scheduler = FrameScheduler::default();
        c.fire(&params);
        let mut frames = 0;
        while c.phase() == Phase::Running && frames < 1_000 {
            scheduler.on_frame(&mut c, &params, 1.0 / 60.0);
            frames += 1;
        }
        assert_eq!(c.phase(), Phase::Landed);
        assert_eq!(frames, c.trajectory().len());
    }
}
