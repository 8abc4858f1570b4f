pub mod camera;
pub mod collision;
pub mod effects;
pub mod enemies;
pub mod environment;
pub mod interactions;
pub mod player;
pub mod projectiles;

use crate::api::events::{AudioSink, SimEvent, SoundCue};

/// Per-tick output channel shared by every system.
///
/// Systems never touch the camera or the hit-stop counter directly; they
/// request a shake or a freeze here and the simulation applies the requests
/// once the tick is over.
pub struct Frame<'a> {
    events: &'a mut Vec<SimEvent>,
    audio: &'a mut dyn AudioSink,
    shake: Option<f32>,
    freeze: u32,
}

impl<'a> Frame<'a> {
    pub fn new(events: &'a mut Vec<SimEvent>, audio: &'a mut dyn AudioSink) -> Self {
        Self { events, audio, shake: None, freeze: 0 }
    }

    pub fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub fn play(&mut self, cue: SoundCue) {
        self.audio.play(cue);
    }

    /// Last request in a tick wins.
    pub fn shake(&mut self, magnitude: f32) {
        self.shake = Some(magnitude);
    }

    pub fn freeze(&mut self, frames: u32) {
        self.freeze = self.freeze.max(frames);
    }

    pub fn events(&self) -> &[SimEvent] {
        self.events
    }

    /// Hand back the pending (shake, freeze) requests.
    pub fn finish(self) -> (Option<f32>, u32) {
        (self.shake, self.freeze)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_shake_replaces_earlier() {
        let mut events = Vec::new();
        let mut sink: Vec<SoundCue> = Vec::new();
        let mut frame = Frame::new(&mut events, &mut sink);
        frame.shake(10.0);
        frame.shake(2.0);
        frame.freeze(4);
        frame.freeze(2);
        frame.play(SoundCue::Kill);
        frame.emit(SimEvent::LevelComplete);
        assert_eq!(frame.events().len(), 1);
        assert_eq!(frame.finish(), (Some(2.0), 4));
        assert_eq!(sink, vec![SoundCue::Kill]);
    }
}
