//! Command tree dispatch for the seedOS console.

use std::collections::BTreeMap;
use std::fmt;

use crate::session::SeedSystem;
use crate::style::{style, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    SystemError,
    SyntaxError,
    ArgumentError,
    PrivilegeError,
}

impl Status {
    pub fn styles(self) -> &'static [Style] {
        match self {
            Status::Success => &[Style::Green, Style::Dim],
            Status::SystemError => &[Style::BackgroundRed, Style::Black, Style::RapidBlink],
            Status::SyntaxError | Status::ArgumentError => &[Style::Red, Style::Bold],
            Status::PrivilegeError => &[Style::Yellow, Style::Bold],
        }
    }

    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Success => "success",
            Status::SystemError => "system_error",
            Status::SyntaxError => "syntax_error",
            Status::ArgumentError => "argument_error",
            Status::PrivilegeError => "privilege_error",
        };
        write!(f, "{}", name)
    }
}

pub type Outcome = (Status, String);

/// A leaf command body. Receives the tokens left after the command name.
pub type Action = fn(&mut SeedSystem, &[&str]) -> Outcome;

#[derive(Debug, Clone)]
pub enum CommandKind {
    Leaf(Action),
    Group(BTreeMap<String, CommandNode>),
}

#[derive(Debug, Clone)]
pub struct CommandNode {
    pub name: String,
    pub privilege_required: u32,
    pub kind: CommandKind,
}

impl CommandNode {
    pub fn leaf(name: &str, privilege_required: u32, action: Action) -> Self {
        CommandNode {
            name: name.into(),
            privilege_required,
            kind: CommandKind::Leaf(action),
        }
    }

    pub fn group(name: &str, privilege_required: u32, children: Vec<CommandNode>) -> Self {
        CommandNode {
            name: name.into(),
            privilege_required,
            kind: CommandKind::Group(children.into_iter().map(|c| (c.name.clone(), c)).collect()),
        }
    }

    pub fn subcommand(&self, name: &str) -> Option<&CommandNode> {
        match &self.kind {
            CommandKind::Group(children) => children.get(name),
            CommandKind::Leaf(_) => None,
        }
    }

    pub fn has_subcommand(&self, name: &str) -> bool {
        self.subcommand(name).is_some()
    }
}

pub fn privilege_error(have: u32, need: u32) -> Outcome {
    (
        Status::PrivilegeError,
        format!("|Privilege too low|\n{} < {}", have, need),
    )
}

/// Walk `node` with `tokens`. Privilege is checked before anything else and
/// every level prefixes its name onto the returned message.
pub fn run(system: &mut SeedSystem, node: &CommandNode, tokens: &[&str]) -> Outcome {
    let (status, message) = if system.aphid.privilege < node.privilege_required {
        privilege_error(system.aphid.privilege, node.privilege_required)
    } else {
        match &node.kind {
            CommandKind::Group(children) => match tokens.split_first() {
                None => (
                    Status::ArgumentError,
                    "|Expected a command|\nReceived nothing".to_string(),
                ),
                Some((first, rest)) => match children.get(*first) {
                    None => (
                        Status::SyntaxError,
                        format!("|Could not find command|\n{}", first),
                    ),
                    Some(child) => run(system, child, rest),
                },
            },
            CommandKind::Leaf(action) => action(system, tokens),
        }
    };
    (status, format!("{} -> {}", node.name, message))
}

pub fn status_report(status: Status, message: &str) -> String {
    style(message, status.styles())
}

/// Echo `line`, run it from the command root and append the styled result.
pub fn send_command(system: &mut SeedSystem, line: &str) -> Status {
    system.send_message(&format!("> {}", line));
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let root = system.command_root.clone();
    let (status, message) = run(system, &root, &tokens);
    for line in message.split('\n') {
        system.send_message(&status_report(status, line));
    }
    system.send_message("");
    log::debug!("command {:?} -> {}", line, status);
    status
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo(system: &mut SeedSystem, tokens: &[&str]) -> Outcome {
        system.send_message(&tokens.join(" "));
        (Status::Success, "|Echoed|".into())
    }

    fn test_root() -> CommandNode {
        CommandNode::group(
            "command_root",
            0,
            vec![
                CommandNode::leaf("say", 1, echo),
                CommandNode::group("tools", 2, vec![CommandNode::leaf("echo", 0, echo)]),
            ],
        )
    }

    #[test]
    fn test_run_prefixes_each_level() {
        let mut system = SeedSystem::new("Clippy", 100);
        system.aphid.privilege = 2;
        let (status, message) = run(&mut system, &test_root(), &["tools", "echo", "hi"]);
        assert_eq!(status, Status::Success);
        assert_eq!(message, "command_root -> tools -> echo -> |Echoed|");
        assert_eq!(system.message_history.last(), Some("hi"));
    }

    #[test]
    fn test_privilege_checked_before_arguments() {
        let mut system = SeedSystem::new("Clippy", 100);
        system.aphid.privilege = 1;
        for tokens in [vec!["tools"], vec!["tools", "nope"], vec!["tools", "echo", "x"]] {
            let (status, message) = run(&mut system, &test_root(), &tokens);
            assert_eq!(status, Status::PrivilegeError);
            assert!(message.ends_with("|Privilege too low|\n1 < 2"));
        }
    }

    #[test]
    fn test_group_without_tokens() {
        let mut system = SeedSystem::new("Clippy", 100);
        let (status, _) = run(&mut system, &test_root(), &[]);
        assert_eq!(status, Status::ArgumentError);
    }

    #[test]
    fn test_unknown_command() {
        let mut system = SeedSystem::new("Clippy", 100);
        let (status, message) = run(&mut system, &test_root(), &["dance"]);
        assert_eq!(status, Status::SyntaxError);
        assert_eq!(message, "command_root -> |Could not find command|\ndance");
    }

    #[test]
    fn test_status_report_styles() {
        assert_eq!(
            status_report(Status::Success, "The process succeeded"),
            "\x1b[32m\x1b[2mThe process succeeded\x1b[0m"
        );
        assert_eq!(
            status_report(Status::SyntaxError, "nope"),
            "\x1b[31m\x1b[1mnope\x1b[0m"
        );
    }
}
