//! seash - small interactive command interpreter
//!
//! Usage:
//!   seash                  Interactive shell (or reads stdin when piped)
//!   seash -c "command"     Execute single command line
//!   seash script           Execute commands from a file

use std::env;
use std::fs;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use seash::{interrupt, Session};

fn main() -> ExitCode {
    interrupt::install();

    let args: Vec<String> = env::args().collect();

    let code = if args.len() > 1 {
        match args[1].as_str() {
            "-c" => {
                if args.len() < 3 {
                    eprintln!("seash: -c requires an argument");
                    return ExitCode::from(2);
                }
                run_command(&args[2..].join(" "))
            }
            "-h" | "--help" => {
                print_help();
                0
            }
            "-v" | "--version" => {
                println!("seash v{}", env!("CARGO_PKG_VERSION"));
                0
            }
            path if !path.starts_with('-') => run_script(path),
            _ => {
                eprintln!("seash: unknown option: {}", args[1]);
                2
            }
        }
    } else if io::stdin().is_terminal() {
        match run_repl() {
            Ok(code) => code,
            Err(e) => {
                eprintln!("{}: {}", "error".red(), e);
                1
            }
        }
    } else {
        run_reader(io::stdin().lock())
    };

    ExitCode::from((code & 0xff) as u8)
}

fn print_help() {
    println!("{}", "seash - small command interpreter".bold());
    println!();
    println!("Usage:");
    println!("  seash                  Start interactive shell");
    println!("  seash -c \"command\"     Execute single command line");
    println!("  seash script           Execute commands from a file");
    println!("  seash -h, --help       Show this help");
    println!("  seash -v, --version    Show version");
    println!();
    println!("Type 'help' in the shell for built-in commands.");
}

/// Apply the termination rules and persist history: non-interactive input
/// with a non-zero status exits with that status; an explicit `exit N`
/// wins next; otherwise the last command's status is returned.
fn finish(session: &Session) -> i32 {
    if let Err(e) = session.history.save() {
        eprintln!("seash: cannot save history: {}", e);
    }
    if !session.interactive && session.last_status != 0 {
        return session.last_status;
    }
    if session.should_exit {
        return session.exit_code.unwrap_or(session.last_status);
    }
    session.last_status
}

fn run_command(cmd: &str) -> i32 {
    let mut session = Session::new(false);
    session.execute_line(cmd);
    finish(&session)
}

fn run_script(path: &str) -> i32 {
    let file = match fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("seash: 0: can't open {}: {}", path, e);
            return 127;
        }
    };
    run_reader(BufReader::new(file))
}

/// Non-interactive dispatch loop: one line at a time until end of input or
/// an explicit exit request.
fn run_reader<R: BufRead>(reader: R) -> i32 {
    let mut session = Session::new(false);
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("seash: input error: {}", e);
                break;
            }
        };
        session.execute_line(&line);
        if session.should_exit {
            break;
        }
    }
    finish(&session)
}

/// Interactive dispatch loop. Ctrl+C aborts the current line, Ctrl+D ends
/// the session.
fn run_repl() -> Result<i32> {
    let mut session = Session::new(true);
    let mut rl = DefaultEditor::new()?;
    for entry in session.history.entries() {
        let _ = rl.add_history_entry(entry);
    }

    loop {
        match rl.readline(&session.prompt()) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                session.execute_line(&line);
                if interrupt::take() {
                    // A child was interrupted; match common shell behavior.
                    session.last_status = 130;
                    println!("^C");
                }
                if session.should_exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Abort the partially-typed line; status is untouched.
                println!("^C");
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("seash: input error: {}", e);
                break;
            }
        }
    }

    Ok(finish(&session))
}
