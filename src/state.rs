#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum CarouselState {
    #[default]
    Idle,          // Waiting for input, the current slide is settled
    Transitioning, // A transition is playing, input is dropped
}

impl CarouselState {
    pub fn is_animating(self) -> bool {
        self == CarouselState::Transitioning
    }
}
