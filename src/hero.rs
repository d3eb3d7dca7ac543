use tracing::info;
use crate::config::AnimationConfig;
use crate::error::Result;
use crate::controller::CarouselController;
use crate::input::{GestureAdapter, GestureObserver, InputBus, InputEvent, KeyboardAdapter, Step, Subscription};
use crate::scene::Scene;
use crate::stage::Stage;

/// The mounted carousel: its input subscriptions live exactly as long as it does.
pub struct Hero {
    controller: CarouselController,
    stage: Stage,
    bus: InputBus,
    subscriptions: Vec<Subscription>,
}

impl Hero {
    pub fn mount(slide_count: usize, animation: &AnimationConfig, bus: &InputBus) -> Result<Self> {
        let controller = CarouselController::new(slide_count, animation.timing())?;
        let observer = GestureObserver::new(animation.tolerance, animation.wheel_speed);
        let subscriptions = vec![
            bus.subscribe(GestureAdapter::new(observer)),
            bus.subscribe(KeyboardAdapter),
        ];
        info!(slide_count, listeners = bus.listener_count(), "hero mounted");

        Ok(Self {
            controller,
            stage: Stage::new(slide_count),
            bus: bus.clone(),
            subscriptions,
        })
    }

    #[cfg(test)]
    pub fn controller(&self) -> &CarouselController {
        &self.controller
    }

    pub fn scene(&self) -> &Scene {
        self.stage.scene()
    }

    /// Routes one raw event through the subscribed adapters.
    pub fn dispatch(&mut self, event: &InputEvent) {
        for step in self.bus.dispatch(event, self.controller.is_animating()) {
            self.step(step);
        }
    }

    pub fn step(&mut self, step: Step) -> bool {
        match step {
            Step::Advance => self.controller.advance(&mut self.stage),
            Step::Retreat => self.controller.retreat(&mut self.stage),
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.stage.update(dt) {
            self.controller.finish_transition();
        }
    }

    pub fn unmount(self) {
        info!(listeners = self.subscriptions.len(), "hero unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::state::CarouselState;

    fn mount(bus: &InputBus) -> Hero {
        Hero::mount(4, &AnimationConfig::default(), bus).unwrap()
    }

    #[test]
    fn advancing_updates_counter_at_cue() {
        let bus = InputBus::new();
        let mut hero = mount(&bus);
        assert_eq!(hero.scene().counter, 1);

        hero.dispatch(&InputEvent::Key(Key::ArrowDown));
        assert_eq!(hero.controller().current_index(), 1);
        assert_eq!(hero.scene().counter, 1);

        hero.update(0.45);
        assert_eq!(hero.scene().counter, 2);
        assert!(hero.controller().is_animating());

        hero.update(1.0);
        assert_eq!(hero.controller().state(), CarouselState::Idle);
        assert_eq!(hero.scene().top_slide(), Some(1));
    }

    #[test]
    fn rapid_double_advance_moves_once() {
        let bus = InputBus::new();
        let mut hero = mount(&bus);

        hero.dispatch(&InputEvent::Wheel { delta_y: 100.0 });
        hero.dispatch(&InputEvent::Wheel { delta_y: 100.0 });
        hero.dispatch(&InputEvent::Key(Key::Space));
        assert_eq!(hero.controller().current_index(), 1);
    }

    #[test]
    fn retreat_wraps_to_last_slide() {
        let bus = InputBus::new();
        let mut hero = mount(&bus);

        hero.dispatch(&InputEvent::Key(Key::ArrowLeft));
        hero.update(2.0);
        assert_eq!(hero.controller().current_index(), 3);
        assert_eq!(hero.scene().counter, 4);
        assert_eq!(hero.scene().top_slide(), Some(3));
    }

    #[test]
    fn full_cycle_returns_to_first_slide() {
        let bus = InputBus::new();
        let mut hero = mount(&bus);

        for _ in 0..4 {
            assert!(hero.step(Step::Advance));
            hero.update(2.0);
        }
        assert_eq!(hero.controller().current_index(), 0);
        assert_eq!(hero.scene().counter, 1);
    }

    #[test]
    fn mounting_without_slides_fails_before_subscribing() {
        let bus = InputBus::new();
        assert!(Hero::mount(0, &AnimationConfig::default(), &bus).is_err());
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn announced_slide_follows_the_transition() {
        let bus = InputBus::new();
        let mut hero = mount(&bus);
        assert_eq!(hero.scene().accessible_slide(), Some(0));

        hero.dispatch(&InputEvent::Key(Key::ArrowLeft));
        assert_eq!(hero.scene().accessible_slide(), Some(3));
        hero.update(2.0);
        assert_eq!(hero.scene().accessible_slide(), Some(3));
    }

    #[test]
    fn remounting_does_not_duplicate_listeners() {
        let bus = InputBus::new();
        let hero = mount(&bus);
        assert_eq!(bus.listener_count(), 2);
        hero.unmount();
        assert_eq!(bus.listener_count(), 0);

        let mut hero = mount(&bus);
        assert_eq!(bus.listener_count(), 2);
        hero.dispatch(&InputEvent::Key(Key::Enter));
        hero.update(2.0);
        assert_eq!(hero.controller().current_index(), 1);
    }
}
