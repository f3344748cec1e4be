pub mod inspect;
pub mod load;
pub mod play;

use std::io::{self, BufRead, Write};

use colored::Colorize;
use infoprox_fiction::FictionSession;
use infoprox_fiction::narrator::banner;

/// Print the banner and opening, then read commands until `quit` or end of input.
fn run_session(mut session: FictionSession, loaded: bool) -> Result<(), String> {
    println!("{}", banner(&session.state().world, loaded).bold());
    println!("{}\n", session.opening());

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        match session.process(line.trim()) {
            Ok(output) => println!("{output}\n"),
            Err(e) => println!("{}\n", e.to_string().yellow()),
        }
        if session.is_finished() {
            break;
        }
    }

    Ok(())
}
