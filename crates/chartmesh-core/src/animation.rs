// File: crates/chartmesh-core/src/animation.rs
// Summary: Per-series animation state machine (grow-in and data-update transitions).
// Notes:
// - Progress only moves in `advance`, called from `Chart::update`. Drawing reads
//   the state and never mutates it, so repeated draws are identical.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Cubic ease-out.
    EaseOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationKind {
    /// First appearance: geometry grows in.
    Growth,
    /// Values transition from a previous snapshot.
    Update,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationState {
    Idle,
    Animating { kind: AnimationKind, elapsed: f32, duration: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SeriesAnimation {
    pub enabled: bool,
    pub easing: Easing,
    pub state: AnimationState,
    /// Plotted values before the current update transition, by data index.
    pub from_values: Vec<f64>,
    started: bool,
}

impl Default for SeriesAnimation {
    fn default() -> Self {
        Self { enabled: true, easing: Easing::EaseOut, state: AnimationState::Idle, from_values: Vec::new(), started: false }
    }
}

impl SeriesAnimation {
    pub fn disabled() -> Self {
        Self { enabled: false, started: true, ..Self::default() }
    }

    /// Begin the grow-in animation once, on the first update that sees the series.
    pub fn start_growth(&mut self, duration: f32) {
        if self.started {
            return;
        }
        self.started = true;
        if self.enabled && duration > 0.0 {
            self.state = AnimationState::Animating { kind: AnimationKind::Growth, elapsed: 0.0, duration };
        }
    }

    /// Begin a value transition from `previous` plotted values.
    pub fn start_update(&mut self, previous: Vec<f64>, duration: f32) {
        self.started = true;
        if !self.enabled || duration <= 0.0 {
            self.state = AnimationState::Idle;
            return;
        }
        // A running grow-in keeps its clock; the new values simply appear under it.
        if let AnimationState::Animating { kind: AnimationKind::Growth, .. } = self.state {
            return;
        }
        self.from_values = previous;
        self.state = AnimationState::Animating { kind: AnimationKind::Update, elapsed: 0.0, duration };
    }

    /// Advance by `dt` seconds. Returns true while the series needs redrawing.
    pub fn advance(&mut self, dt: f32) -> bool {
        match &mut self.state {
            AnimationState::Idle => false,
            AnimationState::Animating { kind, elapsed, duration } => {
                *elapsed += dt.max(0.0);
                if *elapsed >= *duration {
                    log::trace!("{:?} animation finished after {:.3}s", kind, *elapsed);
                    self.state = AnimationState::Idle;
                    self.from_values.clear();
                }
                true
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, AnimationState::Idle)
    }

    fn eased(&self, want: AnimationKind) -> f32 {
        match self.state {
            AnimationState::Animating { kind, elapsed, duration } if kind == want => {
                self.easing.apply(elapsed / duration.max(f32::EPSILON))
            }
            _ => 1.0,
        }
    }

    /// Grow-in progress in `0.0..=1.0`; 1 when not growing.
    pub fn growth_progress(&self) -> f32 {
        self.eased(AnimationKind::Growth)
    }

    /// Value shown for data index `i` whose target is `target`.
    pub fn value_at(&self, i: usize, target: f64) -> f64 {
        let t = self.eased(AnimationKind::Update);
        if t >= 1.0 {
            return target;
        }
        match self.from_values.get(i) {
            Some(from) if from.is_finite() && target.is_finite() => from + (target - from) * t as f64,
            _ => target,
        }
    }

    /// True while an update transition has not reached its target.
    pub fn is_updating(&self) -> bool {
        matches!(self.state, AnimationState::Animating { kind: AnimationKind::Update, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_runs_to_idle() {
        let mut a = SeriesAnimation::default();
        a.start_growth(1.0);
        assert_eq!(a.growth_progress(), 0.0);
        assert!(a.advance(0.5));
        let mid = a.growth_progress();
        assert!(mid > 0.5 && mid < 1.0);
        assert!(a.advance(0.6));
        assert!(a.is_finished());
        assert_eq!(a.growth_progress(), 1.0);
        // Growth starts only once.
        a.start_growth(1.0);
        assert!(a.is_finished());
    }

    #[test]
    fn update_interpolates_values() {
        let mut a = SeriesAnimation::disabled();
        a.enabled = true;
        a.easing = Easing::Linear;
        a.start_update(vec![0.0, 10.0], 1.0);
        a.advance(0.25);
        assert_eq!(a.value_at(0, 4.0), 1.0);
        assert_eq!(a.value_at(5, 4.0), 4.0);
        a.advance(1.0);
        assert_eq!(a.value_at(1, 20.0), 20.0);
    }
}
