use crate::command::send_command;
use crate::console;
use crate::key::Key;
use crate::progress::{handle_progress, Handled};
use crate::scene::{Flow, GameState, Scene};
use crate::widgets::{any_line, Prompt};

use super::{without_session, SEEDOS_CONSOLE};

/// The seedOS shell: type commands, read their output, launch programs.
pub struct ConsoleScene {
    prompt: Prompt,
    pending: Handled,
}

impl ConsoleScene {
    pub fn new() -> Self {
        ConsoleScene {
            prompt: console::prompt((100, 35), any_line),
            pending: Handled::default(),
        }
    }

    fn draw(&mut self, state: &mut GameState) {
        let size = state.screen.size();
        let (width, _) = console::layout(size).input;
        self.prompt.input_mut().move_to(
            3,
            size.1.saturating_sub(1),
            width.saturating_sub(4) as usize,
        );
        if let Some(system) = state.seed_system.as_ref() {
            console::draw(&mut state.screen, &system.message_history, &self.prompt);
        }
    }

    /// Leave for the pending redirect, dropping the session first if the
    /// aphid died.
    fn redirect(&mut self, state: &mut GameState) -> Option<Flow> {
        let target = self.pending.redirect.take()?;
        if self.pending.died {
            state.reset_session();
        }
        self.pending = Handled::default();
        Some(Flow::Goto(target))
    }
}

impl Default for ConsoleScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for ConsoleScene {
    fn open(&mut self, state: &mut GameState) {
        let loss = state.config.stability_loss;
        if let Some(system) = state.seed_system.as_mut() {
            self.pending = handle_progress(system, &mut state.progress, loss);
            system.clear_active();
            if self.pending.pause {
                console::press_any_key(&mut system.message_history);
            }
        }
        self.prompt = console::prompt(state.screen.size(), any_line);
    }

    fn update(&mut self, state: &mut GameState, key: Option<Key>) -> Flow {
        if state.seed_system.is_none() {
            return without_session(SEEDOS_CONSOLE);
        }
        match key {
            None if !self.pending.pause => {
                if let Some(flow) = self.redirect(state) {
                    return flow;
                }
            }
            None => {}
            Some(_) if self.pending.pause => {
                self.pending.pause = false;
                if let Some(flow) = self.redirect(state) {
                    return flow;
                }
            }
            Some(key) => {
                let Some(system) = state.seed_system.as_mut() else {
                    return without_session(SEEDOS_CONSOLE);
                };
                if let Some(line) = self.prompt.update(key, &mut system.message_history) {
                    let status = send_command(system, &line);
                    if status.is_success() {
                        if let Some(program) = system.active_program.clone() {
                            log::info!("running {}", program);
                            return Flow::Goto(program);
                        }
                    }
                }
            }
        }
        self.draw(state);
        Flow::Wait
    }
}
