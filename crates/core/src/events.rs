//! Engine events and the collaborators they are routed to
//!
//! The engine never calls out directly. It records [`Event`]s; the host drains
//! them once per frame and hands them to an [`EventRouter`], which turns them
//! into sound effects and the final high-score submission. Collaborator
//! failures stop at the router.

use tracing::debug;

use crate::types::SOUND_CATEGORY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// A rotation was committed
    Rotated,
    /// The active piece was merged into the grid
    Locked,
    /// Rows removed by the last lock (never zero)
    LinesCleared(u32),
    /// New level reached
    LevelUp(u32),
    /// Terminal transition, recorded exactly once per game
    GameOver { score: u32 },
}

pub const ROTATE_EFFECT: &str = "rotate.wav";
pub const LOCK_EFFECT: &str = "place.wav";
pub const LINE_CLEAR_EFFECT: &str = "line_clear.wav";

/// Fire-and-forget audio collaborator
pub trait SoundSink {
    fn play_effect(&mut self, category: &str, name: &str) -> anyhow::Result<()>;
}

/// High-score collaborator
pub trait ScoreSink {
    fn submit(&mut self, score: u32) -> anyhow::Result<()>;
}

/// Sound sink that plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSound;

impl SoundSink for NullSound {
    fn play_effect(&mut self, _category: &str, _name: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Score sink that keeps nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScores;

impl ScoreSink for NullScores {
    fn submit(&mut self, _score: u32) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Dispatches engine events to the sound and score collaborators
pub struct EventRouter<A, H> {
    sound: A,
    scores: H,
}

impl<A: SoundSink, H: ScoreSink> EventRouter<A, H> {
    pub fn new(sound: A, scores: H) -> Self {
        Self { sound, scores }
    }

    pub fn sound(&self) -> &A {
        &self.sound
    }

    pub fn scores(&self) -> &H {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut H {
        &mut self.scores
    }

    /// Route the sound effects of one event.
    ///
    /// `GameOver` is not submitted here; solo hosts call [`Self::route`],
    /// versus hosts submit the match result themselves.
    pub fn play(&mut self, event: &Event) {
        match *event {
            Event::Rotated => self.effect(ROTATE_EFFECT),
            Event::Locked => self.effect(LOCK_EFFECT),
            Event::LinesCleared(n) => {
                for _ in 0..n {
                    self.effect(LINE_CLEAR_EFFECT);
                }
            }
            Event::LevelUp(_) | Event::GameOver { .. } => {}
        }
    }

    /// Route one solo event, including the high-score submission
    pub fn route(&mut self, event: &Event) {
        self.play(event);
        if let Event::GameOver { score } = *event {
            self.submit_score(score);
        }
    }

    pub fn route_all<'a>(&mut self, events: impl IntoIterator<Item = &'a Event>) {
        for event in events {
            self.route(event);
        }
    }

    pub fn submit_score(&mut self, score: u32) {
        if let Err(err) = self.scores.submit(score) {
            debug!(score, error = %err, "high score submission failed");
        }
    }

    fn effect(&mut self, name: &str) {
        if let Err(err) = self.sound.play_effect(SOUND_CATEGORY, name) {
            debug!(effect = name, error = %err, "sound effect failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        effects: Vec<String>,
        fail: bool,
    }

    impl SoundSink for Recorder {
        fn play_effect(&mut self, category: &str, name: &str) -> anyhow::Result<()> {
            self.effects.push(format!("{}/{}", category, name));
            if self.fail {
                anyhow::bail!("no audio device");
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct Scores(Vec<u32>);

    impl ScoreSink for Scores {
        fn submit(&mut self, score: u32) -> anyhow::Result<()> {
            self.0.push(score);
            Ok(())
        }
    }

    #[test]
    fn test_effects_per_event() {
        let mut router = EventRouter::new(Recorder::default(), Scores::default());
        router.route_all(&[Event::Rotated, Event::Locked, Event::LinesCleared(2)]);
        assert_eq!(
            router.sound().effects,
            vec![
                "tetris/rotate.wav",
                "tetris/place.wav",
                "tetris/line_clear.wav",
                "tetris/line_clear.wav",
            ]
        );
        assert!(router.scores().0.is_empty());
    }

    #[test]
    fn test_game_over_submits_score() {
        let mut router = EventRouter::new(NullSound, Scores::default());
        router.route(&Event::GameOver { score: 900 });
        assert_eq!(router.scores().0, vec![900]);
    }

    #[test]
    fn test_sound_failures_are_swallowed() {
        let sound = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut router = EventRouter::new(sound, Scores::default());
        router.route(&Event::LinesCleared(3));
        router.route(&Event::GameOver { score: 100 });
        assert_eq!(router.sound().effects.len(), 3);
        assert_eq!(router.scores().0, vec![100]);
    }
}
