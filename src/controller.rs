use tracing::{debug, info};
use crate::animator::Animator;
use crate::error::{HeroError, Result};
use crate::state::CarouselState;
use crate::transition::{Direction, Timing, Transition};

/// Owns the current slide index and the transition lock.
#[derive(Debug)]
pub struct CarouselController {
    slide_count: usize,
    current_index: usize,
    state: CarouselState,
    timing: Timing,
}

impl CarouselController {
    pub fn new(slide_count: usize, timing: Timing) -> Result<Self> {
        if slide_count == 0 {
            return Err(HeroError::InvalidConfig("carousel needs at least one slide".into()));
        }
        Ok(Self {
            slide_count,
            current_index: 0,
            state: CarouselState::Idle,
            timing,
        })
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[cfg(test)]
    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    /// Starts a transition to `target` (wrapped into range). Returns false and
    /// changes nothing while another transition is playing.
    pub fn go_to<A: Animator>(&mut self, target: isize, direction: Direction, animator: &mut A) -> bool {
        if self.state.is_animating() {
            debug!(requested = target, ?direction, "transition in flight, input dropped");
            return false;
        }

        let to = wrap(target, self.slide_count);
        let transition = Transition {
            from: self.current_index,
            to,
            direction,
            timing: self.timing,
        };

        self.state = CarouselState::Transitioning;
        info!(from = transition.from, to, ?direction, "starting transition");
        animator.play_transition(transition);

        // The index moves when the transition is accepted, not when it ends
        self.current_index = to;
        true
    }

    pub fn advance<A: Animator>(&mut self, animator: &mut A) -> bool {
        self.go_to(self.current_index as isize + 1, Direction::Forward, animator)
    }

    pub fn retreat<A: Animator>(&mut self, animator: &mut A) -> bool {
        self.go_to(self.current_index as isize - 1, Direction::Backward, animator)
    }

    /// Completion callback of the playing transition.
    pub fn finish_transition(&mut self) {
        if self.state.is_animating() {
            debug!(index = self.current_index, "transition complete");
        }
        self.state = CarouselState::Idle;
    }
}

pub fn wrap(index: isize, len: usize) -> usize {
    index.rem_euclid(len as isize) as usize
}
