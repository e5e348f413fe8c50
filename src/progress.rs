//! Story progress flags and what happens when the console sees them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::files::Payload;
use crate::scenes::MAIN_MENU;
use crate::session::SeedSystem;
use crate::style::{style, Style};

pub const JUST_LOADED: &str = "just_loaded";
pub const NEW_USER: &str = "new_user";
pub const CHALLENGE_WIN: &str = "challenge_win";
pub const CHALLENGE_LOSS: &str = "challenge_loss";
pub const CHALLENGE_EXITED: &str = "challenge_exited_unexpectedly";

pub fn read_flag(name: &str) -> String {
    format!("read_{}", name)
}

pub fn did_flag(name: &str) -> String {
    format!("did_{}", name)
}

pub fn won_flag(name: &str) -> String {
    format!("won_{}", name)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    flags: BTreeSet<String>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, flag: impl Into<String>) {
        self.flags.insert(flag.into());
    }

    pub fn remove(&mut self, flag: &str) -> bool {
        self.flags.remove(flag)
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    pub fn clear(&mut self) {
        self.flags.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// What the console has to do after progress was handled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Handled {
    /// Wait for a key press before accepting commands.
    pub pause: bool,
    /// Scene to leave for once the pause is over.
    pub redirect: Option<String>,
    /// The aphid ran out of stability; the session must be discarded.
    pub died: bool,
}

pub fn unlock_privilege(system: &mut SeedSystem, level: u32) {
    let level = system.aphid.unlock_privilege(level);
    log::info!("{} unlocked privilege {}", system.aphid.name, level);
    system.send_messages([
        String::new(),
        style("Unlocking access...", &[Style::Yellow]),
        "...".to_string(),
        style(
            &format!("APHID has unlocked privilege level {}!", level),
            &[Style::Black, Style::BackgroundYellow],
        ),
    ]);
}

fn command_hint(name: &str) -> String {
    style(name, &[Style::Bold, Style::Magenta])
}

pub fn handle_progress(system: &mut SeedSystem, progress: &mut Progress, stability_loss: f64) -> Handled {
    let mut handled = Handled::default();

    if progress.remove(JUST_LOADED) {
        system.message_history.clear();
        system.send_message(&format!(
            "Welcome, {}",
            style(&system.aphid.name, &[Style::Green])
        ));
        if progress.contains(NEW_USER) {
            system.send_messages([
                format!("Hello {}", style("beta tester!", &[Style::Bold, Style::Yellow])),
                "Welcome to SeedOS.".to_string(),
                "To get setup with your new operating system,".to_string(),
                format!("enter '{}' for information about commands.", command_hint("help")),
                format!(
                    "When you're ready, take a '{}' inside Welcome.txt",
                    style("look", &[Style::Bold, Style::Yellow])
                ),
                "for important information.".to_string(),
            ]);
        }
    }

    if progress.contains(NEW_USER) && progress.contains(&read_flag("Welcome")) {
        progress.remove(NEW_USER);
        unlock_privilege(system, 1);
        system.send_messages([
            "You now have access to changing directories!".to_string(),
            format!("Use '{} cd' for more information", command_hint("help")),
            "When you're ready, head over to applications/tutorial to unlock more commands."
                .to_string(),
        ]);
        handled.pause = true;
    }

    if progress.contains(&read_flag("aphid_README")) && system.aphid.privilege == 1 {
        unlock_privilege(system, 2);
        system.send_messages([
            "You now have access to running commands with 'do'!".to_string(),
            format!("Use '{} do' for more information", command_hint("help")),
            "When you're ready, 'do aphid_tutorial.sprout' to try it out!".to_string(),
        ]);
        handled.pause = true;
    }

    if progress.remove(CHALLENGE_WIN) {
        let difficulty = match system.active_file.as_ref().map(|f| &f.payload) {
            Some(Payload::Board { difficulty, .. }) => *difficulty,
            _ => {
                log::warn!("challenge won without an active board");
                0
            }
        };
        let gained = difficulty * 10;
        system.aphid.memory += gained;
        system.send_messages([
            style("You beat the challenge!", &[Style::Green]),
            format!("+{}kB of memory!", gained),
        ]);
    }

    if progress.remove(CHALLENGE_EXITED) {
        system.send_message(&style("Burrow exited early.", &[Style::Yellow]));
    }

    if progress.remove(CHALLENGE_LOSS) {
        let stability = system.aphid.stability - stability_loss;
        // Keep repeated subtraction from drifting just above zero.
        system.aphid.stability = (stability * 1e6).round() / 1e6;
        system.send_messages([
            style("APHID corrupted...", &[Style::Red]),
            style(
                &format!("Stability lost: {:.0}%", stability_loss * 100.0),
                &[Style::Red],
            ),
            style(
                &format!("APHID stability: {:.0}%", system.aphid.stability.max(0.0) * 100.0),
                &[Style::Red],
            ),
        ]);
        if system.aphid.stability <= 0.0 {
            log::info!("{} ran out of stability", system.aphid.name);
            system.message_history.clear_view();
            system.send_messages([
                style("APHID stability: 0%", &[Style::Red]),
                style("APHID corrupted...", &[Style::Red]),
                style("Shutting down...", &[Style::Red]),
            ]);
            handled.pause = true;
            handled.died = true;
            handled.redirect = Some(MAIN_MENU.into());
        }
    }

    handled
}
