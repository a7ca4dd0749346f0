use anyhow::Result;
use fmsim_vfs::Console;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, warn};

use crate::commands::{handle_line, Outcome};

const WELCOME: &str = "Welcome to FMSim File System! Type 'help' for commands.";

pub struct Repl {
    console: Console,
}

impl Repl {
    pub fn new(console: Console) -> Self {
        Self { console }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;
        println!("{WELCOME}");

        loop {
            let line = match rl.readline("> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            };

            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if let Err(err) = rl.add_history_entry(input) {
                warn!(error = %err, "failed to record history");
            }
            debug!(actor = self.console.whoami().id, input, "command");

            match handle_line(&mut self.console, input) {
                Outcome::Message(msg) => println!("{msg}"),
                Outcome::Exit => break,
            }
        }

        println!("Exiting FMSim.");
        Ok(())
    }
}
