use crate::transition::Transition;

/// Plays a transition bundle. Completion is reported back by whoever drives
/// the animator, through `CarouselController::finish_transition`.
pub trait Animator {
    fn play_transition(&mut self, transition: Transition);
}

#[cfg(test)]
pub mod fake {
    use super::*;

    /// Records every transition it is asked to play and nothing else.
    #[derive(Default)]
    pub struct RecordingAnimator {
        pub played: Vec<Transition>,
    }

    impl Animator for RecordingAnimator {
        fn play_transition(&mut self, transition: Transition) {
            self.played.push(transition);
        }
    }
}
