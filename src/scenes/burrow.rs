use crate::assets;
use crate::burrow::{Board, Burrow, BurrowState};
use crate::files::Payload;
use crate::key::Key;
use crate::progress::{did_flag, won_flag, CHALLENGE_EXITED, CHALLENGE_LOSS, CHALLENGE_WIN};
use crate::scene::{Flow, GameState, Scene};
use crate::style::{style, Style};

use super::{without_session, SEEDOS_BURROW, SEEDOS_CONSOLE};

/// Plays the board inside a `.sprout` file.
pub struct BurrowScene {
    burrow: Option<Burrow>,
    name: Option<String>,
}

impl BurrowScene {
    pub fn new() -> Self {
        BurrowScene {
            burrow: None,
            name: None,
        }
    }
}

impl Default for BurrowScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for BurrowScene {
    fn open(&mut self, state: &mut GameState) {
        self.burrow = None;
        self.name = None;
        let Some(system) = state.seed_system.as_mut() else {
            return;
        };
        let file = system.active_file.clone();
        let drivers = system.aphid.drivers.clone();
        self.name = file.as_ref().map(|f| f.name.clone());
        self.burrow = match file.as_ref().map(|f| &f.payload) {
            Some(Payload::Board {
                board_src,
                player_spawn,
                ..
            }) => match assets::board(board_src) {
                Some(text) => Some(Burrow::new(
                    Board::load(text),
                    *player_spawn,
                    &drivers,
                    &mut state.rng,
                )),
                None => {
                    log::warn!("missing board asset {}", board_src);
                    None
                }
            },
            _ => None,
        };
        if let (Some(name), Some(_)) = (&self.name, &self.burrow) {
            system.send_messages([format!("Running: {}", name), style("Done!", &[Style::Green])]);
        }
    }

    fn update(&mut self, state: &mut GameState, key: Option<Key>) -> Flow {
        let Some(system) = state.seed_system.as_mut() else {
            return without_session(SEEDOS_BURROW);
        };
        let Some(burrow) = self.burrow.as_mut() else {
            system.send_messages([
                style("File Corrupted", &[Style::BackgroundRed, Style::RapidBlink]),
                style("|An error occurred|", &[Style::Red]),
                String::new(),
            ]);
            return Flow::goto(SEEDOS_CONSOLE);
        };
        if let Some(key) = key {
            burrow.press(key, &mut state.rng);
            if burrow.is_over() {
                log::info!("burrow finished: {:?}", burrow.state);
                return Flow::goto(SEEDOS_CONSOLE);
            }
        }
        state.screen.clear();
        burrow.draw(&mut state.screen);
        Flow::Wait
    }

    fn exit(&mut self, state: &mut GameState) {
        let outcome = self.burrow.take().map(|b| b.state);
        let Some(name) = self.name.take() else {
            return;
        };
        match outcome {
            Some(BurrowState::Won) => {
                state.progress.add(CHALLENGE_WIN);
                state.progress.add(won_flag(&name));
            }
            Some(BurrowState::Dead) => state.progress.add(CHALLENGE_LOSS),
            _ => state.progress.add(CHALLENGE_EXITED),
        }
        state.progress.add(did_flag(&name));
    }
}
