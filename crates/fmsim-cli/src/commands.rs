//! Command parsing and execution for the shell.
//!
//! A line is split into a command word and its arguments. `write` keeps
//! everything after the file name as content, inner spacing included.

use chrono::{DateTime, Utc};
use fmsim_vfs::{Console, FileStat, FsError, PermSet, UserId};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
 login <user_id>
 create_user <username>
 create <filename> <permissions>
 open <filename>
 write <filename> <content>
 read <filename>
 close <filename>
 delete <filename>
 delete_permanent <filename>
 restore <filename>
 trash
 search <keyword>
 grant <filename> <user_id> <permissions>
 chmod <filename> <permissions>
 stat <filename>
 whoami
 help
 exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login(UserId),
    CreateUser(String),
    Create { name: String, perms: PermSet },
    Open(String),
    Write { name: String, content: String },
    Read(String),
    Close(String),
    Delete(String),
    DeletePermanent(String),
    Restore(String),
    Trash,
    Search(String),
    Grant {
        name: String,
        user_id: UserId,
        perms: PermSet,
    },
    Chmod { name: String, perms: PermSet },
    Stat(String),
    Whoami,
    Help,
    Exit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command '{0}'. Type 'help' for options.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid user ID '{0}'.")]
    InvalidUserId(String),

    #[error("{0}")]
    Invalid(#[from] FsError),
}

pub enum Outcome {
    Message(String),
    Exit,
}

fn arg<'a>(args: &[&'a str], index: usize, usage: &'static str) -> Result<&'a str, ParseError> {
    args.get(index).copied().ok_or(ParseError::Usage(usage))
}

fn parse_user_id(s: &str) -> Result<UserId, ParseError> {
    s.parse()
        .map_err(|_| ParseError::InvalidUserId(s.to_string()))
}

impl Command {
    /// Parse a non-empty input line.
    pub fn parse(line: &str) -> Result<Command, ParseError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_start()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match word {
            "login" => Command::Login(parse_user_id(arg(&args, 0, "login <user_id>")?)?),
            "create_user" => {
                Command::CreateUser(arg(&args, 0, "create_user <username>")?.to_string())
            }
            "create" => {
                const USAGE: &str = "create <filename> <permissions>";
                Command::Create {
                    name: arg(&args, 0, USAGE)?.to_string(),
                    perms: arg(&args, 1, USAGE)?.parse()?,
                }
            }
            "open" => Command::Open(arg(&args, 0, "open <filename>")?.to_string()),
            "write" => {
                let (name, content) = match rest.split_once(char::is_whitespace) {
                    Some((name, content)) => (name, content.trim_start()),
                    None => (rest, ""),
                };
                if name.is_empty() {
                    return Err(ParseError::Usage("write <filename> <content>"));
                }
                Command::Write {
                    name: name.to_string(),
                    content: content.to_string(),
                }
            }
            "read" => Command::Read(arg(&args, 0, "read <filename>")?.to_string()),
            "close" => Command::Close(arg(&args, 0, "close <filename>")?.to_string()),
            "delete" => Command::Delete(arg(&args, 0, "delete <filename>")?.to_string()),
            "delete_permanent" => Command::DeletePermanent(
                arg(&args, 0, "delete_permanent <filename>")?.to_string(),
            ),
            "restore" => Command::Restore(arg(&args, 0, "restore <filename>")?.to_string()),
            "trash" => Command::Trash,
            "search" => Command::Search(arg(&args, 0, "search <keyword>")?.to_string()),
            "grant" => {
                const USAGE: &str = "grant <filename> <user_id> <permissions>";
                Command::Grant {
                    name: arg(&args, 0, USAGE)?.to_string(),
                    user_id: parse_user_id(arg(&args, 1, USAGE)?)?,
                    perms: arg(&args, 2, USAGE)?.parse()?,
                }
            }
            "chmod" => {
                const USAGE: &str = "chmod <filename> <permissions>";
                Command::Chmod {
                    name: arg(&args, 0, USAGE)?.to_string(),
                    perms: arg(&args, 1, USAGE)?.parse()?,
                }
            }
            "stat" => Command::Stat(arg(&args, 0, "stat <filename>")?.to_string()),
            "whoami" => Command::Whoami,
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn format_time(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

fn format_stat(stat: &FileStat) -> String {
    let acl = if stat.acl.is_empty() {
        String::from("(none)")
    } else {
        stat.acl
            .iter()
            .map(|(user, perms)| format!("{user}:{perms}"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "File '{}' (id {})\n  Owner: {}  Permissions: {}\n  ACL: {}\n  Size: {} bytes  Open: {}\n  Created: {}\n  Modified: {}",
        stat.name,
        stat.id,
        stat.owner_id,
        stat.owner_permissions,
        acl,
        stat.size,
        if stat.is_open { "yes" } else { "no" },
        format_time(stat.created_at),
        format_time(stat.modified_at),
    )
}

/// Run a parsed command against the console and render the result.
pub fn execute(console: &mut Console, command: Command) -> Outcome {
    let result: Result<String, FsError> = match command {
        Command::Login(id) => console
            .login(id)
            .map(|user| format!("Logged in as {}", user.name)),
        Command::CreateUser(name) => console
            .register_user(&name)
            .map(|id| format!("User '{name}' created with user_id {id}")),
        Command::Create { name, perms } => console
            .create_file(&name, perms)
            .map(|_| format!("File '{name}' created by {}", console.whoami().name)),
        Command::Open(name) => console
            .open_file(&name)
            .map(|_| format!("File '{name}' opened.")),
        Command::Write { name, content } => {
            console.write_file(&name, &content).map(|outcome| {
                if outcome.truncated {
                    format!(
                        "Content written to '{name}' (truncated to {} bytes).",
                        outcome.stored
                    )
                } else {
                    format!("Content written to '{name}'.")
                }
            })
        }
        Command::Read(name) => console
            .read_file(&name)
            .map(|content| format!("Content of '{name}':\n{content}")),
        Command::Close(name) => console
            .close_file(&name)
            .map(|_| format!("File '{name}' closed.")),
        Command::Delete(name) => console.delete_file(&name).map(|_| {
            format!("File '{name}' moved to trash. Use 'restore' or 'delete_permanent'.")
        }),
        Command::DeletePermanent(name) => console
            .purge_file(&name)
            .map(|_| format!("File '{name}' permanently deleted.")),
        Command::Restore(name) => console
            .restore_file(&name)
            .map(|_| format!("File '{name}' restored.")),
        Command::Trash => {
            let names = console.list_trash();
            if names.is_empty() {
                Ok(String::from("Trash is empty."))
            } else {
                let lines: Vec<String> = names.iter().map(|n| format!("- {n}")).collect();
                Ok(format!("Trash:\n{}", lines.join("\n")))
            }
        }
        Command::Search(keyword) => {
            let mut out = format!("Searching for files with keyword '{keyword}':");
            for file in console.search_files(&keyword) {
                out.push_str(&format!(
                    "\n- {} (Owner: {}, Permissions: {})",
                    file.name, file.owner_id, file.owner_permissions
                ));
            }
            Ok(out)
        }
        Command::Grant {
            name,
            user_id,
            perms,
        } => console
            .grant_access(&name, user_id, perms)
            .map(|_| format!("Granted {perms} access to user {user_id} on '{name}'")),
        Command::Chmod { name, perms } => console
            .chmod_file(&name, perms)
            .map(|_| format!("Permissions for '{name}' changed to '{perms}'")),
        Command::Stat(name) => console.stat_file(&name).map(|stat| format_stat(&stat)),
        Command::Whoami => {
            let user = console.whoami();
            Ok(format!("{} (user_id {})", user.name, user.id))
        }
        Command::Help => Ok(String::from(HELP)),
        Command::Exit => return Outcome::Exit,
    };

    match result {
        Ok(msg) => Outcome::Message(msg),
        Err(err) => Outcome::Message(err.to_string()),
    }
}

/// Parse and run one input line.
pub fn handle_line(console: &mut Console, line: &str) -> Outcome {
    match Command::parse(line) {
        Ok(command) => execute(console, command),
        Err(err) => Outcome::Message(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmsim_vfs::{FmsConfig, ManualClock};

    fn make_console() -> Console {
        Console::with_clock(&FmsConfig::default(), ManualClock::default()).unwrap()
    }

    fn run(console: &mut Console, line: &str) -> String {
        match handle_line(console, line) {
            Outcome::Message(msg) => msg,
            Outcome::Exit => String::from("<exit>"),
        }
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("login 2"), Ok(Command::Login(2)));
        assert_eq!(Command::parse("open  f1 "), Ok(Command::Open(String::from("f1"))));
        assert_eq!(Command::parse("trash"), Ok(Command::Trash));
        assert_eq!(Command::parse("quit"), Ok(Command::Exit));
    }

    #[test]
    fn test_parse_distinguishes_prefixes() {
        assert_eq!(
            Command::parse("create_user carol"),
            Ok(Command::CreateUser(String::from("carol")))
        );
        assert_eq!(
            Command::parse("delete_permanent f"),
            Ok(Command::DeletePermanent(String::from("f")))
        );
        assert_eq!(Command::parse("delete f"), Ok(Command::Delete(String::from("f"))));
    }

    #[test]
    fn test_parse_write_keeps_rest_of_line() {
        assert_eq!(
            Command::parse("write notes hello   big world"),
            Ok(Command::Write {
                name: String::from("notes"),
                content: String::from("hello   big world"),
            })
        );
        assert_eq!(
            Command::parse("write notes"),
            Ok(Command::Write {
                name: String::from("notes"),
                content: String::new(),
            })
        );
        assert!(matches!(Command::parse("write"), Err(ParseError::Usage(_))));
    }

    #[test]
    fn test_parse_grant() {
        assert_eq!(
            Command::parse("grant f1 1 r"),
            Ok(Command::Grant {
                name: String::from("f1"),
                user_id: 1,
                perms: PermSet::read_only(),
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("frobnicate"),
            Err(ParseError::Unknown(String::from("frobnicate")))
        );
        assert!(matches!(Command::parse("create f1"), Err(ParseError::Usage(_))));
        assert_eq!(
            Command::parse("login -1"),
            Err(ParseError::InvalidUserId(String::from("-1")))
        );
        assert!(matches!(
            Command::parse("chmod f1 rwq"),
            Err(ParseError::Invalid(FsError::InvalidPermissions(_)))
        ));
    }

    #[test]
    fn test_session_transcript() {
        let mut console = make_console();
        assert_eq!(run(&mut console, "create f1 rw"), "File 'f1' created by admin");
        assert_eq!(run(&mut console, "open f1"), "File 'f1' opened.");
        assert_eq!(run(&mut console, "write f1 hello"), "Content written to 'f1'.");
        assert_eq!(run(&mut console, "login 1"), "Logged in as alice");
        assert_eq!(run(&mut console, "open f1"), "Permission denied.");
        assert_eq!(run(&mut console, "login 0"), "Logged in as admin");
        assert_eq!(
            run(&mut console, "grant f1 1 r"),
            "Granted r access to user 1 on 'f1'"
        );
        run(&mut console, "login 1");
        assert_eq!(run(&mut console, "open f1"), "File 'f1' opened.");
        assert_eq!(run(&mut console, "write f1 x"), "Cannot write to file.");
        assert_eq!(run(&mut console, "read f1"), "Content of 'f1':\nhello");
    }

    #[test]
    fn test_trash_transcript() {
        let mut console = make_console();
        run(&mut console, "create doc rw");
        assert_eq!(run(&mut console, "trash"), "Trash is empty.");
        assert_eq!(
            run(&mut console, "delete doc"),
            "File 'doc' moved to trash. Use 'restore' or 'delete_permanent'."
        );
        assert_eq!(run(&mut console, "trash"), "Trash:\n- doc");
        assert_eq!(run(&mut console, "restore doc"), "File 'doc' restored.");
        assert_eq!(
            run(&mut console, "delete_permanent doc"),
            "File 'doc' permanently deleted."
        );
        assert_eq!(
            run(&mut console, "restore doc"),
            "File not found or not in trash."
        );
    }

    #[test]
    fn test_search_output() {
        let mut console = make_console();
        run(&mut console, "create alpha rw");
        run(&mut console, "login 2");
        run(&mut console, "create alpine r");
        assert_eq!(
            run(&mut console, "search alp"),
            "Searching for files with keyword 'alp':\n\
             - alpha (Owner: 0, Permissions: rw)\n\
             - alpine (Owner: 2, Permissions: r)"
        );
    }

    #[test]
    fn test_stat_output() {
        let mut console = make_console();
        run(&mut console, "create f rw");
        run(&mut console, "grant f 2 rx");
        let out = run(&mut console, "stat f");
        assert!(out.starts_with("File 'f' (id 1)"));
        assert!(out.contains("ACL: 2:rx"));
        assert!(out.contains("Size: 0 bytes  Open: no"));
    }

    #[test]
    fn test_exit_and_help() {
        let mut console = make_console();
        assert_eq!(run(&mut console, "exit"), "<exit>");
        assert_eq!(run(&mut console, "help"), HELP);
        assert_eq!(run(&mut console, "whoami"), "admin (user_id 0)");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "1970-01-01 00:00:00 UTC");
    }
}
