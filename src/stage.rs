use tracing::debug;
use crate::animator::Animator;
use crate::scene::Scene;
use crate::timeline::{Timeline, TimelineEvent};
use crate::transition::Transition;

/// The on-screen animator: stages the scene for each transition and plays
/// its timeline frame by frame.
pub struct Stage {
    scene: Scene,
    active: Option<(Transition, Timeline)>,
}

impl Stage {
    pub fn new(slide_count: usize) -> Self {
        Self {
            scene: Scene::new(slide_count),
            active: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Advances the active timeline. Returns true on the frame it completes.
    pub fn update(&mut self, dt: f32) -> bool {
        let Some((transition, timeline)) = self.active.as_mut() else {
            return false;
        };

        let mut finished = false;
        for event in timeline.advance(dt, &mut self.scene) {
            match event {
                TimelineEvent::Counter(value) => {
                    debug!(value, "counter updated");
                    self.scene.counter = value;
                }
                TimelineEvent::Complete => finished = true,
            }
        }

        if finished {
            self.scene.settle(transition.to);
            self.active = None;
        }
        finished
    }
}

impl Animator for Stage {
    fn play_transition(&mut self, transition: Transition) {
        self.scene.stage(transition.from, transition.to);
        let mut timeline = Timeline::for_transition(&transition, &self.scene);
        timeline.seed(&mut self.scene);
        self.active = Some((transition, timeline));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::{Direction, Timing};

    #[test]
    fn plays_until_complete_then_settles() {
        let mut stage = Stage::new(4);
        stage.play_transition(Transition {
            from: 0,
            to: 1,
            direction: Direction::Forward,
            timing: Timing::default(),
        });
        assert_eq!(stage.scene().counter, 1);

        assert!(!stage.update(0.5));
        assert_eq!(stage.scene().counter, 2);

        assert!(stage.update(1.0));
        assert_eq!(stage.scene().top_slide(), Some(1));
        assert!(!stage.update(0.1));
    }
}
