use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Up,
}

/// Position of the sweep line: pixels below the frame top, and where it is
/// heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepState {
    pub offset: i32,
    pub direction: Direction,
}

impl Default for SweepState {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl SweepState {
    pub const INITIAL: Self = Self {
        offset: 0,
        direction: Direction::Down,
    };

    /// One bounce step over `[0, bound]`.
    ///
    /// A step that would overshoot lands on the bound. The tick after that
    /// holds the offset at the bound and reverses; the bound is never
    /// checked ahead of stepping.
    pub fn advance(self, bound: i32, step: i32) -> Self {
        let bound = bound.max(0);
        match self.direction {
            Direction::Down if self.offset < bound => Self {
                offset: bound.min(self.offset.saturating_add(step)),
                direction: Direction::Down,
            },
            Direction::Down => Self {
                offset: bound,
                direction: Direction::Up,
            },
            // A shrunken frame pulls the line back inside before it steps.
            Direction::Up if self.offset > 0 => Self {
                offset: 0.max(self.offset.min(bound).saturating_sub(step)),
                direction: Direction::Up,
            },
            Direction::Up => Self {
                offset: 0,
                direction: Direction::Down,
            },
        }
    }
}

/// Bounded ping-pong oscillator driving the sweep line.
///
/// The bound is passed on every tick rather than stored, so a resized frame
/// narrows or widens the range from the next tick on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepAnimator {
    state: SweepState,
    step: i32,
}

impl SweepAnimator {
    /// Steps below one pixel are raised to one.
    pub fn new(step: i32) -> Self {
        Self {
            state: SweepState::INITIAL,
            step: step.max(1),
        }
    }

    pub fn state(&self) -> SweepState {
        self.state
    }

    pub fn offset(&self) -> i32 {
        self.state.offset
    }

    pub fn tick(&mut self, bound: i32) -> SweepState {
        self.state = self.state.advance(bound, self.step);
        self.state
    }

    pub fn reset(&mut self) {
        self.state = SweepState::INITIAL;
    }

    /// The offsets this animator would produce from its current state for a
    /// fixed `bound`. The animator itself is not advanced.
    pub fn offsets(&self, bound: i32) -> Sweep {
        Sweep {
            state: self.state,
            bound,
            step: self.step,
        }
    }
}

/// Infinite iterator of sweep offsets for a fixed bound.
///
/// Cloning restarts from the clone point.
#[derive(Debug, Clone)]
pub struct Sweep {
    state: SweepState,
    bound: i32,
    step: i32,
}

impl Iterator for Sweep {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        self.state = self.state.advance(self.bound, self.step);
        Some(self.state.offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounces_between_bounds() {
        let offsets: Vec<i32> = SweepAnimator::new(5).offsets(20).take(12).collect();
        assert_eq!(offsets, vec![5, 10, 15, 20, 20, 15, 10, 5, 0, 0, 5, 10]);
    }

    #[test]
    fn direction_flips_only_at_bounds() {
        let mut animator = SweepAnimator::new(5);
        let directions: Vec<Direction> = (0..10).map(|_| animator.tick(20).direction).collect();
        use Direction::*;
        assert_eq!(
            directions,
            vec![Down, Down, Down, Down, Up, Up, Up, Up, Up, Down]
        );
    }

    #[test]
    fn overshooting_step_is_clamped() {
        let offsets: Vec<i32> = SweepAnimator::new(7).offsets(20).take(8).collect();
        assert_eq!(offsets, vec![7, 14, 20, 20, 13, 6, 0, 0]);
    }

    #[test]
    fn offset_never_leaves_range() {
        for bound in [0, 1, 4, 5, 6, 23, 240] {
            for step in [1, 3, 5, 50] {
                let sweep = SweepAnimator::new(step).offsets(bound);
                for offset in sweep.take(500) {
                    assert!((0..=bound).contains(&offset), "bound={bound} step={step}");
                }
            }
        }
    }

    #[test]
    fn zero_bound_alternates_direction_in_place() {
        let mut animator = SweepAnimator::new(5);
        assert_eq!(animator.tick(0), SweepState { offset: 0, direction: Direction::Up });
        assert_eq!(animator.tick(0), SweepState::INITIAL);
    }

    #[test]
    fn shrinking_bound_clamps_without_jumping() {
        let mut animator = SweepAnimator::new(5);
        for _ in 0..8 {
            animator.tick(100);
        }
        assert_eq!(animator.offset(), 40);

        // Frame shrank below the current offset: hold at the new bound, turn.
        let state = animator.tick(30);
        assert_eq!(state, SweepState { offset: 30, direction: Direction::Up });
        assert_eq!(animator.tick(30).offset, 25);
    }

    #[test]
    fn shrinking_bound_while_rising_stays_inside() {
        let mut animator = SweepAnimator::new(5);
        for _ in 0..21 {
            animator.tick(100);
        }
        assert_eq!(animator.state(), SweepState { offset: 100, direction: Direction::Up });

        // Bound drops under the rising line: clamp to it, then keep stepping.
        assert_eq!(animator.tick(40), SweepState { offset: 35, direction: Direction::Up });
        assert_eq!(animator.tick(40).offset, 30);
    }

    #[test]
    fn non_positive_step_is_raised_to_one() {
        for step in [0, -5, i32::MIN] {
            let offsets: Vec<i32> = SweepAnimator::new(step).offsets(3).take(8).collect();
            assert_eq!(offsets, vec![1, 2, 3, 3, 2, 1, 0, 0], "step={step}");
        }
    }

    #[test]
    fn reset_returns_to_initial() {
        let mut animator = SweepAnimator::new(5);
        for _ in 0..6 {
            animator.tick(20);
        }
        assert_ne!(animator.state(), SweepState::INITIAL);
        animator.reset();
        assert_eq!(animator.state(), SweepState::INITIAL);
    }

    #[test]
    fn sweep_clone_restarts_from_same_point() {
        let mut sweep = SweepAnimator::new(5).offsets(20);
        sweep.nth(2);
        let replay = sweep.clone();
        let a: Vec<i32> = sweep.take(6).collect();
        let b: Vec<i32> = replay.take(6).collect();
        assert_eq!(a, b);
    }
}
