use std::cell::RefCell;
use std::rc::{Rc, Weak};
use raylib::prelude::*;
use tracing::debug;
use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Other,
}

/// Raw input, with vertical deltas in screen pixels (positive = downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Wheel { delta_y: f32 },
    PointerDown,
    PointerMove { delta_y: f32 },
    PointerUp,
    Key(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Advance,
    Retreat,
}

/// Accumulates wheel and drag movement and reports a gesture once the
/// movement leaves the tolerance dead-zone.
#[derive(Debug, Clone)]
pub struct GestureObserver {
    tolerance: f32,
    wheel_speed: f32,
    accumulated: f32,
    dragging: bool,
}

impl GestureObserver {
    pub fn new(tolerance: f32, wheel_speed: f32) -> Self {
        Self {
            tolerance,
            wheel_speed,
            accumulated: 0.0,
            dragging: false,
        }
    }

    pub fn observe(&mut self, event: &InputEvent) -> Option<Gesture> {
        match *event {
            InputEvent::Wheel { delta_y } => self.accumulate(delta_y * self.wheel_speed),
            InputEvent::PointerDown => {
                self.dragging = true;
                self.accumulated = 0.0;
                None
            }
            InputEvent::PointerMove { delta_y } if self.dragging => self.accumulate(delta_y),
            InputEvent::PointerUp => {
                self.dragging = false;
                self.accumulated = 0.0;
                None
            }
            _ => None,
        }
    }

    fn accumulate(&mut self, delta_y: f32) -> Option<Gesture> {
        self.accumulated += delta_y;
        let gesture = if self.accumulated <= -self.tolerance {
            Gesture::Up
        } else if self.accumulated >= self.tolerance {
            Gesture::Down
        } else {
            return None;
        };
        self.accumulated = 0.0;
        Some(gesture)
    }
}

impl Default for GestureObserver {
    fn default() -> Self {
        Self::new(GESTURE_TOLERANCE, WHEEL_SPEED)
    }
}

pub trait InputListener {
    /// Translates one event into a carousel step. `animating` tells whether a
    /// transition is currently playing.
    fn handle(&mut self, event: &InputEvent, animating: bool) -> Option<Step>;
}

/// Wheel, touch and pointer drags: "up" advances, "down" retreats.
pub struct GestureAdapter {
    observer: GestureObserver,
}

impl GestureAdapter {
    pub fn new(observer: GestureObserver) -> Self {
        Self { observer }
    }
}

impl InputListener for GestureAdapter {
    fn handle(&mut self, event: &InputEvent, _animating: bool) -> Option<Step> {
        self.observer.observe(event).map(|gesture| match gesture {
            Gesture::Up => Step::Advance,
            Gesture::Down => Step::Retreat,
        })
    }
}

pub struct KeyboardAdapter;

impl InputListener for KeyboardAdapter {
    fn handle(&mut self, event: &InputEvent, animating: bool) -> Option<Step> {
        let InputEvent::Key(key) = event else {
            return None;
        };
        if animating {
            return None;
        }
        match key {
            Key::ArrowUp | Key::ArrowLeft => Some(Step::Retreat),
            Key::ArrowDown | Key::ArrowRight | Key::Space | Key::Enter => Some(Step::Advance),
            Key::Other => None,
        }
    }
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Box<dyn InputListener>)>,
}

/// Routes input events to the listeners currently subscribed.
#[derive(Clone, Default)]
pub struct InputBus {
    listeners: Rc<RefCell<Listeners>>,
}

impl InputBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` until the returned guard is dropped.
    #[must_use = "the listener is removed as soon as the subscription is dropped"]
    pub fn subscribe(&self, listener: impl InputListener + 'static) -> Subscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Box::new(listener)));
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    pub fn dispatch(&self, event: &InputEvent, animating: bool) -> Vec<Step> {
        self.listeners
            .borrow_mut()
            .entries
            .iter_mut()
            .filter_map(|(_, listener)| listener.handle(event, animating))
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().entries.retain(|(id, _)| *id != self.id);
            debug!(id = self.id, "input listener removed");
        }
    }
}

/// Pointer events for one frame of button state. On the press frame the
/// cursor jumps from the previous touch point to the new one, so that delta
/// is not a drag.
pub fn pointer_events(pressed: bool, down: bool, released: bool, delta_y: f32) -> Vec<InputEvent> {
    let mut events = Vec::new();
    if pressed {
        events.push(InputEvent::PointerDown);
    } else if down && delta_y != 0.0 {
        events.push(InputEvent::PointerMove { delta_y });
    }
    if released {
        events.push(InputEvent::PointerUp);
    }
    events
}

// --- Raylib polling: turn this frame's device state into events ---
pub fn poll_events(rl: &mut RaylibHandle) -> Vec<InputEvent> {
    let mut events = Vec::new();

    // raylib reports wheel notches with "away from the user" positive
    let wheel = rl.get_mouse_wheel_move();
    if wheel != 0.0 {
        events.push(InputEvent::Wheel { delta_y: -wheel * WHEEL_STEP_PIXELS });
    }

    // Touch input is mirrored onto the left mouse button
    let button = MouseButton::MOUSE_BUTTON_LEFT;
    events.extend(pointer_events(
        rl.is_mouse_button_pressed(button),
        rl.is_mouse_button_down(button),
        rl.is_mouse_button_released(button),
        rl.get_mouse_delta().y,
    ));

    while let Some(key) = rl.get_key_pressed() {
        let key = match key {
            KeyboardKey::KEY_UP => Key::ArrowUp,
            KeyboardKey::KEY_DOWN => Key::ArrowDown,
            KeyboardKey::KEY_LEFT => Key::ArrowLeft,
            KeyboardKey::KEY_RIGHT => Key::ArrowRight,
            KeyboardKey::KEY_SPACE => Key::Space,
            KeyboardKey::KEY_ENTER | KeyboardKey::KEY_KP_ENTER => Key::Enter,
            _ => Key::Other,
        };
        events.push(InputEvent::Key(key));
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_down_registers_as_up_gesture() {
        let mut observer = GestureObserver::default();
        assert_eq!(observer.observe(&InputEvent::Wheel { delta_y: 100.0 }), Some(Gesture::Up));
        assert_eq!(observer.observe(&InputEvent::Wheel { delta_y: -100.0 }), Some(Gesture::Down));
    }

    #[test]
    fn small_movements_stay_in_the_dead_zone() {
        let mut observer = GestureObserver::default();
        assert_eq!(observer.observe(&InputEvent::Wheel { delta_y: 4.0 }), None);
        assert_eq!(observer.observe(&InputEvent::Wheel { delta_y: 4.0 }), None);
        assert_eq!(observer.observe(&InputEvent::Wheel { delta_y: 4.0 }), Some(Gesture::Up));
        // Accumulator resets once a gesture fires
        assert_eq!(observer.observe(&InputEvent::Wheel { delta_y: 4.0 }), None);
    }

    #[test]
    fn drags_only_count_while_pressed() {
        let mut observer = GestureObserver::default();
        assert_eq!(observer.observe(&InputEvent::PointerMove { delta_y: -50.0 }), None);

        observer.observe(&InputEvent::PointerDown);
        assert_eq!(observer.observe(&InputEvent::PointerMove { delta_y: -6.0 }), None);
        assert_eq!(observer.observe(&InputEvent::PointerMove { delta_y: -6.0 }), Some(Gesture::Up));

        observer.observe(&InputEvent::PointerMove { delta_y: 8.0 });
        observer.observe(&InputEvent::PointerUp);
        observer.observe(&InputEvent::PointerDown);
        assert_eq!(observer.observe(&InputEvent::PointerMove { delta_y: 8.0 }), None);
        assert_eq!(observer.observe(&InputEvent::PointerMove { delta_y: 3.0 }), Some(Gesture::Down));
    }

    #[test]
    fn tap_far_from_last_touch_is_not_a_swipe() {
        let mut gestures = GestureAdapter::new(GestureObserver::default());

        // Cursor jumps 600px up to the new touch point on the press frame
        let press = pointer_events(true, true, false, -600.0);
        assert_eq!(press, vec![InputEvent::PointerDown]);

        let release = pointer_events(false, false, true, 0.0);
        let steps: Vec<Step> = press
            .iter()
            .chain(release.iter())
            .filter_map(|event| gestures.handle(event, false))
            .collect();
        assert!(steps.is_empty());
    }

    #[test]
    fn drag_after_press_still_advances() {
        let mut gestures = GestureAdapter::new(GestureObserver::default());
        let frames = [
            pointer_events(true, true, false, -600.0),
            pointer_events(false, true, false, -6.0),
            pointer_events(false, true, false, -6.0),
        ];

        let steps: Vec<Step> = frames
            .iter()
            .flatten()
            .filter_map(|event| gestures.handle(event, false))
            .collect();
        assert_eq!(steps, vec![Step::Advance]);
    }

    #[test]
    fn keyboard_mapping() {
        let mut keys = KeyboardAdapter;
        let step = |keys: &mut KeyboardAdapter, key| keys.handle(&InputEvent::Key(key), false);

        assert_eq!(step(&mut keys, Key::ArrowUp), Some(Step::Retreat));
        assert_eq!(step(&mut keys, Key::ArrowLeft), Some(Step::Retreat));
        for key in [Key::ArrowDown, Key::ArrowRight, Key::Space, Key::Enter] {
            assert_eq!(step(&mut keys, key), Some(Step::Advance));
        }
        assert_eq!(step(&mut keys, Key::Other), None);
        assert_eq!(keys.handle(&InputEvent::Wheel { delta_y: 100.0 }, false), None);
    }

    #[test]
    fn keyboard_ignores_keys_while_animating() {
        assert_eq!(KeyboardAdapter.handle(&InputEvent::Key(Key::Enter), true), None);
    }

    #[test]
    fn enter_space_and_up_gesture_all_advance() {
        let mut gestures = GestureAdapter::new(GestureObserver::default());
        let mut keys = KeyboardAdapter;

        let from_gesture = gestures.handle(&InputEvent::Wheel { delta_y: 100.0 }, false);
        assert_eq!(from_gesture, Some(Step::Advance));
        assert_eq!(keys.handle(&InputEvent::Key(Key::Enter), false), from_gesture);
        assert_eq!(keys.handle(&InputEvent::Key(Key::Space), false), from_gesture);
    }

    #[test]
    fn dropping_a_subscription_removes_its_listener() {
        let bus = InputBus::new();
        let keys = bus.subscribe(KeyboardAdapter);
        let gestures = bus.subscribe(GestureAdapter::new(GestureObserver::default()));
        assert_eq!(bus.listener_count(), 2);

        drop(keys);
        assert_eq!(bus.listener_count(), 1);
        assert!(bus.dispatch(&InputEvent::Key(Key::Enter), false).is_empty());

        drop(gestures);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_bus_is_harmless() {
        let bus = InputBus::new();
        let subscription = bus.subscribe(KeyboardAdapter);
        drop(bus);
        drop(subscription);
    }
}
