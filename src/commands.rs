//! Built-in seedOS commands.

use crate::assets::{self, HelpDoc};
use crate::command::{privilege_error, CommandNode, Outcome, Status};
use crate::files::{FileNode, Payload, ROOT};
use crate::path::resolve;
use crate::scenes::{SEEDOS_BURROW, SEEDOS_LOOK, SEEDOS_SHUTDOWN, SEEDOS_UNLOCK};
use crate::session::SeedSystem;
use crate::style::{style, Style};

pub fn command_root() -> CommandNode {
    CommandNode::group(
        "command_root",
        0,
        vec![
            CommandNode::leaf("help", 0, run_help),
            CommandNode::leaf("shutdown", 0, run_shutdown),
            CommandNode::leaf("clear", 0, run_clear),
            CommandNode::leaf("ls", 0, run_ls),
            CommandNode::leaf("cd", 0, run_cd),
            CommandNode::leaf("look", 0, run_look),
            CommandNode::leaf("do", 2, run_do),
            CommandNode::group("aphid", 0, vec![CommandNode::leaf("status", 0, run_aphid_status)]),
        ],
    )
}

fn no_arguments(command: &str, tokens: &[&str]) -> Option<Outcome> {
    if tokens.is_empty() {
        None
    } else {
        Some((
            Status::ArgumentError,
            format!("|'{}' expects no arguments|\n{} > 0", command, tokens.len()),
        ))
    }
}

fn underlined(path: &str) -> String {
    style(path, &[Style::Underline])
}

fn run_help(system: &mut SeedSystem, tokens: &[&str]) -> Outcome {
    help_with(system, tokens, assets::HELP_JSON)
}

fn help_with(system: &mut SeedSystem, tokens: &[&str], json: &str) -> Outcome {
    let docs = match assets::parse_help(json) {
        Ok(docs) => docs,
        Err(e) => {
            log::warn!("help.json: {}", e);
            return (
                Status::SystemError,
                format!("|File corrupted|\nhelp.json decode error: {}", e),
            );
        }
    };
    let docs: Vec<HelpDoc> = docs
        .into_iter()
        .filter(|d| system.command_root.has_subcommand(&d.name))
        .collect();
    match tokens {
        [] => {
            for doc in &docs {
                system.send_message(&short_description(doc));
            }
            (Status::Success, "|Listed available commands|".into())
        }
        [name] => match docs.iter().find(|d| d.name == *name) {
            Some(doc) => {
                system.send_message(&long_description(doc));
                (
                    Status::Success,
                    format!("|Showed help documentation|\n{}", name),
                )
            }
            None => (
                Status::SyntaxError,
                format!("|Could not find help document|\n{}", name),
            ),
        },
        _ => (
            Status::ArgumentError,
            format!("|'help' expects at most, 1 argument|\n{} > 1", tokens.len()),
        ),
    }
}

pub fn short_description(doc: &HelpDoc) -> String {
    format!(
        "{} {} - {}",
        style(&doc.name, &[Style::Bold]),
        doc.options.join(" "),
        doc.short_description
    )
}

pub fn long_description(doc: &HelpDoc) -> String {
    let title = style(
        &format!("{} {}", style(&doc.name, &[Style::Bold]), doc.options.join(" ")),
        &[Style::Underline],
    );
    let mut lines = vec![title, doc.short_description.clone()];
    lines.extend(doc.long_description.iter().cloned());
    lines.join("\n")
}

fn run_shutdown(system: &mut SeedSystem, tokens: &[&str]) -> Outcome {
    if let Some(err) = no_arguments("shutdown", tokens) {
        return err;
    }
    system.active_program = Some(SEEDOS_SHUTDOWN.into());
    (Status::Success, "|Shutting down system|".into())
}

fn run_clear(system: &mut SeedSystem, tokens: &[&str]) -> Outcome {
    if let Some(err) = no_arguments("clear", tokens) {
        return err;
    }
    system.message_history.clear_view();
    (Status::Success, "|Cleared the screen|".into())
}

fn run_ls(system: &mut SeedSystem, tokens: &[&str]) -> Outcome {
    if let Some(err) = no_arguments("ls", tokens) {
        return err;
    }
    let folder = system.aphid.current_folder.clone();
    let contents = match system.file_tree.folder_contents(&folder, false) {
        Ok(contents) => contents,
        Err(e) => return (Status::SystemError, format!("|Folder corrupted|\n{}", e)),
    };
    system.send_message(&style(&format!("{}/", folder), &[Style::Underline, Style::Yellow]));
    system.send_messages(contents);
    (
        Status::Success,
        format!("|Displayed directory contents|\n{}", folder),
    )
}

fn run_cd(system: &mut SeedSystem, tokens: &[&str]) -> Outcome {
    let target = match tokens {
        [] => {
            system.aphid.current_folder = ROOT.into();
            return (
                Status::Success,
                format!("|Changed folder to root|\n{}", underlined(ROOT)),
            );
        }
        [target] => resolve(&system.aphid.current_folder, target),
        _ => {
            return (
                Status::ArgumentError,
                format!("|'cd' expects at most 1 argument: [path]|\n{} > 1", tokens.len()),
            )
        }
    };
    let node = match system.file_tree.get(&target) {
        None => {
            return (
                Status::ArgumentError,
                format!("|Invalid path|\n{}", underlined(&target)),
            )
        }
        Some(node) => node,
    };
    if !node.is_folder() {
        return (
            Status::ArgumentError,
            format!("|Path must be a folder|\n{}", underlined(&target)),
        );
    }
    if node.privilege_required > system.aphid.privilege {
        return privilege_error(system.aphid.privilege, node.privilege_required);
    }
    system.aphid.current_folder = target.clone();
    (
        Status::Success,
        format!("|Changed folder to path|\n{}", underlined(&target)),
    )
}

/// Shared checks for commands that open a single file by extension.
fn open_file(
    system: &SeedSystem,
    command: &str,
    verb: &str,
    tokens: &[&str],
    extension: &str,
) -> Result<(String, FileNode), Outcome> {
    let target = match tokens {
        [target] => resolve(&system.aphid.current_folder, target),
        _ => {
            return Err((
                Status::ArgumentError,
                format!(
                    "|'{}' expects exactly 1 argument: [path]|\n{} != 1",
                    command,
                    tokens.len()
                ),
            ))
        }
    };
    let node = system.file_tree.get(&target).ok_or_else(|| {
        (
            Status::ArgumentError,
            format!("|Invalid path|\n{}", underlined(&target)),
        )
    })?;
    if node.extension() != Some(extension) {
        return Err((
            Status::ArgumentError,
            format!("|Can't {} this file|\n{}", verb, underlined(&target)),
        ));
    }
    if node.privilege_required > system.aphid.privilege {
        return Err(privilege_error(system.aphid.privilege, node.privilege_required));
    }
    Ok((target, node.clone()))
}

fn run_look(system: &mut SeedSystem, tokens: &[&str]) -> Outcome {
    match open_file(system, "look", "read", tokens, "txt") {
        Err(outcome) => outcome,
        Ok((target, node)) => {
            system.active_program = Some(SEEDOS_LOOK.into());
            system.active_file = Some(node);
            (
                Status::Success,
                format!("|Opened the file|\n{}", underlined(&target)),
            )
        }
    }
}

fn run_do(system: &mut SeedSystem, tokens: &[&str]) -> Outcome {
    match open_file(system, "do", "run", tokens, "sprout") {
        Err(outcome) => outcome,
        Ok((target, node)) => {
            let program = match node.payload {
                Payload::Board { .. } => SEEDOS_BURROW,
                _ => SEEDOS_UNLOCK,
            };
            system.active_program = Some(program.into());
            system.active_file = Some(node);
            (
                Status::Success,
                format!("|Ran the file|\n{}", underlined(&target)),
            )
        }
    }
}

fn run_aphid_status(system: &mut SeedSystem, tokens: &[&str]) -> Outcome {
    if let Some(err) = no_arguments("aphid status", tokens) {
        return err;
    }
    let aphid = &system.aphid;
    let stability_style = if aphid.stability > 0.5 {
        Style::Green
    } else {
        Style::Red
    };
    let mut lines = vec![
        format!("Aphid: {}", style(&aphid.name, &[Style::Green])),
        format!("Privilege: {}", style(&aphid.privilege.to_string(), &[Style::Yellow])),
        format!("Memory: {}kB", style(&aphid.memory.to_string(), &[Style::Yellow])),
        format!(
            "Stability: {}%",
            style(&format!("{:.0}", aphid.stability * 100.0), &[stability_style])
        ),
        "Drivers:".to_string(),
    ];
    lines.extend(
        aphid
            .drivers
            .iter()
            .map(|d| style(&format!("    {}", d.to_string().to_uppercase()), &[Style::Blue])),
    );
    system.send_messages(lines);
    (Status::Success, "|Showed APHID information|".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{run, send_command};
    use crate::files::FileTree;
    use crate::style::strip_ansi;

    fn system() -> SeedSystem {
        SeedSystem::new("Clippy", 1000)
    }

    fn exec(system: &mut SeedSystem, line: &str) -> Outcome {
        let root = system.command_root.clone();
        let tokens: Vec<&str> = line.split_whitespace().collect();
        run(system, &root, &tokens)
    }

    #[test]
    fn test_cd_privilege_too_low() {
        let mut system = system();
        let (status, message) = exec(&mut system, "cd documents");
        assert_eq!(status, Status::PrivilegeError);
        assert_eq!(message, "command_root -> cd -> |Privilege too low|\n0 < 1");
        assert_eq!(system.aphid.current_folder, "seed");
    }

    #[test]
    fn test_cd_rejection_order() {
        let mut system = system();
        let (status, message) = exec(&mut system, "cd nowhere");
        assert_eq!(status, Status::ArgumentError);
        assert!(strip_ansi(&message).contains("|Invalid path|\nseed/nowhere"));
        let (status, message) = exec(&mut system, "cd Welcome.txt");
        assert_eq!(status, Status::ArgumentError);
        assert!(message.contains("|Path must be a folder|"));
    }

    #[test]
    fn test_cd_and_back() {
        let mut system = system();
        system.aphid.privilege = 1;
        assert_eq!(exec(&mut system, "cd applications/tutorial").0, Status::Success);
        assert_eq!(system.aphid.current_folder, "seed/applications/tutorial");
        assert_eq!(exec(&mut system, "cd ..").0, Status::Success);
        assert_eq!(system.aphid.current_folder, "seed/applications");
        assert_eq!(exec(&mut system, "cd").0, Status::Success);
        assert_eq!(system.aphid.current_folder, "seed");
        assert_eq!(exec(&mut system, "cd a b").0, Status::ArgumentError);
    }

    #[test]
    fn test_ls_lists_in_insertion_order() {
        let mut system = system();
        let mut tree = FileTree::new();
        tree.insert("seed", FileNode::folder("seed", 0)).unwrap();
        tree.insert("seed/a.txt", FileNode::file("a", "txt", 0, Payload::None))
            .unwrap();
        tree.insert("seed/b", FileNode::folder("b", 0)).unwrap();
        system.file_tree = tree;
        let (status, _) = exec(&mut system, "ls");
        assert_eq!(status, Status::Success);
        let lines: Vec<String> = system.message_history.all().map(strip_ansi).collect();
        assert_eq!(lines, vec!["seed/", "a.txt", "b"]);
    }

    #[test]
    fn test_ls_is_idempotent() {
        let mut system = system();
        let first = exec(&mut system, "ls");
        let second = exec(&mut system, "ls");
        assert_eq!(first, second);
        assert_eq!(exec(&mut system, "ls -a").0, Status::ArgumentError);
    }

    #[test]
    fn test_do_missing_file() {
        let mut system = system();
        system.aphid.privilege = 2;
        let (status, _) = exec(&mut system, "do aphid_tutorial.sprout");
        assert_eq!(status, Status::ArgumentError);
        assert!(system.active_program.is_none());
    }

    #[test]
    fn test_do_needs_privilege_first() {
        let mut system = system();
        system.aphid.privilege = 1;
        let (status, _) = exec(&mut system, "do");
        assert_eq!(status, Status::PrivilegeError);
    }

    #[test]
    fn test_do_picks_program_from_payload() {
        let mut system = system();
        system.aphid.privilege = 3;
        let (status, _) = exec(&mut system, "do applications/tutorial/aphid_tutorial.sprout");
        assert_eq!(status, Status::Success);
        assert_eq!(system.active_program.as_deref(), Some(SEEDOS_BURROW));
        assert_eq!(system.active_file.as_ref().unwrap().name, "aphid_tutorial");

        system.clear_active();
        let (status, _) = exec(&mut system, "do seedOS/clearance.sprout");
        assert_eq!(status, Status::Success);
        assert_eq!(system.active_program.as_deref(), Some(SEEDOS_UNLOCK));
    }

    #[test]
    fn test_do_rejects_text_files() {
        let mut system = system();
        system.aphid.privilege = 2;
        let (status, message) = exec(&mut system, "do Welcome.txt");
        assert_eq!(status, Status::ArgumentError);
        assert!(message.contains("|Can't run this file|"));
    }

    #[test]
    fn test_look_sets_program() {
        let mut system = system();
        let (status, _) = exec(&mut system, "look Welcome.txt");
        assert_eq!(status, Status::Success);
        assert_eq!(system.active_program.as_deref(), Some(SEEDOS_LOOK));
        let (status, _) = exec(&mut system, "look documents/notes.txt");
        assert_eq!(status, Status::PrivilegeError);
    }

    #[test]
    fn test_shutdown_sets_program() {
        let mut system = system();
        assert_eq!(exec(&mut system, "shutdown now").0, Status::ArgumentError);
        assert!(system.active_program.is_none());
        assert_eq!(exec(&mut system, "shutdown").0, Status::Success);
        assert_eq!(system.active_program.as_deref(), Some(SEEDOS_SHUTDOWN));
    }

    #[test]
    fn test_help_lists_commands() {
        let mut system = system();
        let (status, _) = exec(&mut system, "help");
        assert_eq!(status, Status::Success);
        let first = strip_ansi(system.message_history.all().next().unwrap());
        assert!(first.starts_with("help [command] - "));
        assert_eq!(exec(&mut system, "help cd").0, Status::Success);
        assert_eq!(exec(&mut system, "help dance").0, Status::SyntaxError);
        assert_eq!(exec(&mut system, "help cd ls").0, Status::ArgumentError);
    }

    #[test]
    fn test_help_corrupted_document() {
        let mut system = system();
        let (status, message) = help_with(&mut system, &[], "{not json");
        assert_eq!(status, Status::SystemError);
        assert!(message.starts_with("|File corrupted|"));
    }

    #[test]
    fn test_clear_hides_history() {
        let mut system = system();
        send_command(&mut system, "ls");
        send_command(&mut system, "clear");
        let visible: Vec<String> = system.message_history.visible().map(strip_ansi).collect();
        assert_eq!(
            visible,
            vec!["command_root -> clear -> |Cleared the screen|", ""]
        );
        assert!(system.message_history.len() > visible.len());
    }

    #[test]
    fn test_aphid_status() {
        let mut system = system();
        let (status, message) = exec(&mut system, "aphid status");
        assert_eq!(status, Status::Success);
        assert_eq!(message, "command_root -> aphid -> status -> |Showed APHID information|");
        let lines: Vec<String> = system.message_history.all().map(strip_ansi).collect();
        assert!(lines.contains(&"Stability: 100%".to_string()));
        assert!(lines.contains(&"    ATTACK".to_string()));
        assert_eq!(exec(&mut system, "aphid").0, Status::ArgumentError);
    }

    #[test]
    fn test_send_command_echoes_and_returns_status() {
        let mut system = system();
        let status = send_command(&mut system, "cd documents");
        assert_eq!(status, Status::PrivilegeError);
        let lines: Vec<String> = system.message_history.all().map(strip_ansi).collect();
        assert_eq!(
            lines,
            vec![
                "> cd documents",
                "command_root -> cd -> |Privilege too low|",
                "0 < 1",
                ""
            ]
        );
    }
}
