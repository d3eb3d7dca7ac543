use raylib::prelude::*;
use crate::scene::Scene;
use crate::transition::{Channel, Transition};

struct Track {
    channel: Channel,
    end: f32,
    tween: ease::Tween,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineEvent {
    Counter(usize),
    Complete,
}

struct Cue {
    at: f32,
    event: TimelineEvent,
    fired: bool,
}

/// A set of parallel tweens plus timed cues, all driven by one clock.
pub struct Timeline {
    tracks: Vec<Track>,
    cues: Vec<Cue>,
    elapsed: f32,
    duration: f32,
    time_scale: f32,
    completed: bool,
}

impl Timeline {
    /// Builds the timeline of `transition`. Tweens without a start value begin
    /// from what `scene` shows right now.
    pub fn for_transition(transition: &Transition, scene: &Scene) -> Self {
        let timing = transition.timing;

        let tracks = transition
            .tweens()
            .into_iter()
            .map(|spec| {
                let start = spec.from.or_else(|| scene.value(spec.channel)).unwrap_or(spec.to);
                Track {
                    channel: spec.channel,
                    end: spec.to,
                    tween: ease::Tween::new(ease::expo_in_out, start, spec.to, timing.duration),
                }
            })
            .collect();

        let cues = vec![Cue {
            at: timing.counter_at,
            event: TimelineEvent::Counter(transition.counter()),
            fired: false,
        }];

        // A cue placed after the last tween stretches the timeline to reach it
        let duration = cues.iter().map(|c| c.at).fold(timing.duration, f32::max);

        Self {
            tracks,
            cues,
            elapsed: 0.0,
            duration,
            time_scale: timing.time_scale,
            completed: false,
        }
    }

    #[cfg(test)]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Writes the starting value of every track into `scene` so the first
    /// frame already shows the entry positions.
    pub fn seed(&mut self, scene: &mut Scene) {
        for track in self.tracks.iter_mut() {
            scene.set(track.channel, track.tween.apply(0.0));
        }
    }

    /// Advances by `dt` wall-clock seconds and returns the cues that fired,
    /// followed by `Complete` on the frame the timeline ends.
    pub fn advance(&mut self, dt: f32, scene: &mut Scene) -> Vec<TimelineEvent> {
        let mut events = Vec::new();
        if self.completed {
            return events;
        }

        let step = dt * self.time_scale;
        self.elapsed += step;

        for track in self.tracks.iter_mut() {
            let value = track.tween.apply(step);
            scene.set(track.channel, value);
        }

        for cue in self.cues.iter_mut() {
            if !cue.fired && self.elapsed >= cue.at {
                cue.fired = true;
                events.push(cue.event);
            }
        }

        if self.elapsed >= self.duration {
            for track in self.tracks.iter() {
                scene.set(track.channel, track.end);
            }
            self.completed = true;
            events.push(TimelineEvent::Complete);
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::{Direction, Timing};

    fn transition() -> Transition {
        Transition { from: 0, to: 1, direction: Direction::Forward, timing: Timing::default() }
    }

    #[test]
    fn seeding_places_incoming_slide_off_screen() {
        let mut scene = Scene::new(4);
        let mut timeline = Timeline::for_transition(&transition(), &scene);
        timeline.seed(&mut scene);

        assert_eq!(scene.slides[1].outer_x, 100.0);
        assert_eq!(scene.slides[1].image_scale, 2.0);
        assert_eq!(scene.overlays[1].scale_x, 1.5);
        // Outgoing heading starts where it already was
        assert_eq!(scene.slides[0].heading_width, 200.0);
    }

    #[test]
    fn counter_cue_fires_at_scaled_offset() {
        let mut scene = Scene::new(4);
        let mut timeline = Timeline::for_transition(&transition(), &scene);

        // 0.32 timeline seconds at 0.8 speed is 0.4 wall-clock seconds
        assert!(timeline.advance(0.39, &mut scene).is_empty());
        assert_eq!(timeline.advance(0.02, &mut scene), vec![TimelineEvent::Counter(2)]);
        assert!(timeline.advance(0.1, &mut scene).is_empty());
    }

    #[test]
    fn completes_after_wall_duration_with_end_values() {
        let mut scene = Scene::new(4);
        let mut timeline = Timeline::for_transition(&transition(), &scene);

        timeline.advance(1.2, &mut scene);
        assert!(!timeline.is_complete());

        let events = timeline.advance(0.1, &mut scene);
        assert_eq!(events.last(), Some(&TimelineEvent::Complete));
        assert!(timeline.is_complete());

        assert_eq!(scene.slides[1].outer_x, 0.0);
        assert_eq!(scene.slides[1].inner_x, 0.0);
        assert_eq!(scene.slides[0].heading_width, 800.0);
        assert_eq!(scene.slides[0].heading_x, 30.0);
        assert_eq!(scene.overlays[0].x, -125.0);
        assert_eq!(scene.overlays[1].scale_y, 1.0);

        assert!(timeline.advance(1.0, &mut scene).is_empty());
    }

    #[test]
    fn late_cue_fires_before_completion() {
        let mut scene = Scene::new(4);
        let timing = Timing { duration: 1.0, time_scale: 1.0, counter_at: 2.0 };
        let late = Transition { timing, ..transition() };
        let mut timeline = Timeline::for_transition(&late, &scene);

        let mut events = Vec::new();
        for _ in 0..200 {
            events.extend(timeline.advance(0.016, &mut scene));
        }
        assert_eq!(events, vec![TimelineEvent::Counter(2), TimelineEvent::Complete]);
        // Tweens still land on their end values after one second
        assert_eq!(scene.slides[1].outer_x, 0.0);
    }

    #[test]
    fn long_frame_fires_cue_and_completion_together() {
        let mut scene = Scene::new(4);
        let mut timeline = Timeline::for_transition(&transition(), &scene);
        assert_eq!(
            timeline.advance(5.0, &mut scene),
            vec![TimelineEvent::Counter(2), TimelineEvent::Complete]
        );
    }
}
