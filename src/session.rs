//! Host-side session: one solo game or one versus match plus its input handlers.
//!
//! The frame loop in the binary owns a [`Session`] and calls, in order:
//! key handlers for every terminal event, [`Session::tick`] once per fixed tick,
//! then [`Session::render_into`]. Events drained from the engines are routed
//! through the [`EventRouter`] inside `tick`.

use clap::ValueEnum;
use crossterm::event::KeyCode;
use tracing::debug;

use crate::core::{
    EventRouter, FrameInput, GameState, ScoreSink, ShapeSource, SoundSink, SpeedConfig,
    UniformShapes, Versus,
};
use crate::input::{InputHandler, KeySet};
use crate::term::{FrameBuffer, GameView, Viewport};
use crate::types::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    #[default]
    Solo,
    Versus,
}

/// Sound collaborator for the terminal host: records the effect in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSound;

impl SoundSink for LogSound {
    fn play_effect(&mut self, category: &str, name: &str) -> anyhow::Result<()> {
        debug!(category, name, "play effect");
        Ok(())
    }
}

pub enum Session<S = UniformShapes> {
    Solo {
        game: GameState<S>,
        input: InputHandler,
    },
    Versus {
        game: Versus<S>,
        one: InputHandler,
        two: InputHandler,
    },
}

impl Session<UniformShapes> {
    /// Seeded session for `mode`
    pub fn start(mode: Mode, config: SpeedConfig, seed: u32) -> Self {
        match mode {
            Mode::Solo => Self::solo(GameState::new(config, UniformShapes::new(seed))),
            Mode::Versus => Self::versus(Versus::seeded(config, seed)),
        }
    }
}

impl<S: ShapeSource + Clone> Session<S> {
    pub fn solo(game: GameState<S>) -> Self {
        Self::Solo {
            game,
            input: InputHandler::new(KeySet::Solo),
        }
    }

    pub fn versus(game: Versus<S>) -> Self {
        Self::Versus {
            game,
            one: InputHandler::new(KeySet::Arrows),
            two: InputHandler::new(KeySet::Wasd),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Self::Solo { .. } => Mode::Solo,
            Self::Versus { .. } => Mode::Versus,
        }
    }

    /// Game over, or both sides over in a match
    pub fn finished(&self) -> bool {
        match self {
            Self::Solo { game, .. } => game.game_over(),
            Self::Versus { game, .. } => game.is_over(),
        }
    }

    pub fn handle_key_press(&mut self, code: KeyCode) {
        match self {
            Self::Solo { input, .. } => {
                input.handle_key_press(code);
            }
            Self::Versus { one, two, .. } => {
                if !one.handle_key_press(code) {
                    two.handle_key_press(code);
                }
            }
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match self {
            Self::Solo { input, .. } => input.handle_key_release(code),
            Self::Versus { one, two, .. } => {
                one.handle_key_release(code);
                two.handle_key_release(code);
            }
        }
    }

    pub fn toggle_pause(&mut self) {
        match self {
            Self::Solo { game, .. } => game.toggle_pause(),
            Self::Versus { game, .. } => game.toggle_pause(),
        }
    }

    /// Replace the game with a fresh one, keeping mode and configuration
    pub fn restart(&mut self) {
        match self {
            Self::Solo { game, input } => {
                *game = game.new_game();
                input.reset();
            }
            Self::Versus { game, one, two } => {
                *game = game.new_game();
                one.reset();
                two.reset();
            }
        }
    }

    /// Apply queued intents, advance the engines by one tick and route events.
    pub fn tick<A: SoundSink, H: ScoreSink>(
        &mut self,
        elapsed_ms: u32,
        router: &mut EventRouter<A, H>,
    ) {
        match self {
            Self::Solo { game, input } => {
                for intent in input.drain() {
                    game.apply(intent);
                }
                input.update(elapsed_ms);
                game.update(elapsed_ms, input.soft_drop_held());
                router.route_all(&game.take_events());
            }
            Self::Versus { game, one, two } => {
                for intent in one.drain() {
                    game.apply(Side::One, intent);
                }
                for intent in two.drain() {
                    game.apply(Side::Two, intent);
                }
                one.update(elapsed_ms);
                two.update(elapsed_ms);
                game.update(
                    elapsed_ms,
                    FrameInput {
                        one: one.soft_drop_held(),
                        two: two.soft_drop_held(),
                    },
                );
                for side in Side::BOTH {
                    for event in game.take_events(side) {
                        router.play(&event);
                    }
                }
                if let Some(best) = game.take_match_score() {
                    router.submit_score(best);
                }
            }
        }
    }

    /// Draw the current frame; `high_scores` is shown once the session is finished.
    pub fn render_into(
        &self,
        view: &GameView,
        viewport: Viewport,
        fb: &mut FrameBuffer,
        high_scores: &[u32],
    ) {
        match self {
            Self::Solo { game, .. } => view.render_solo_into(&game.snapshot(), viewport, fb),
            Self::Versus { game, .. } => view.render_versus_into(
                &game.snapshot(Side::One),
                &game.snapshot(Side::Two),
                game.outcome(),
                viewport,
                fb,
            ),
        }
        if self.finished() {
            view.draw_high_scores(fb, viewport, high_scores);
        }
    }
}
