//! Built-in commands
//!
//! Builtins run in the shell process itself and may mutate the session
//! (environment, aliases, explicit exit code). Lookup is by exact,
//! case-sensitive name; a name in this table never reaches the PATH search.

use colored::Colorize;

use super::Session;

/// The closed set of builtin commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Cd,
    Env,
    Help,
    History,
    Setenv,
    Unsetenv,
    Alias,
}

/// What a builtin asks of the dispatch loop.
#[derive(Debug, PartialEq, Eq)]
pub enum BuiltinOutcome {
    /// Ran to completion: 0 means success, non-zero means error; the
    /// session continues either way.
    Status(i32),
    /// Terminate the shell. The exit code, when explicit, has been stored
    /// in `Session::exit_code`.
    Exit,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Builtin> {
        match name {
            "exit" => Some(Builtin::Exit),
            "cd" => Some(Builtin::Cd),
            "env" => Some(Builtin::Env),
            "help" => Some(Builtin::Help),
            "history" => Some(Builtin::History),
            "setenv" => Some(Builtin::Setenv),
            "unsetenv" => Some(Builtin::Unsetenv),
            "alias" => Some(Builtin::Alias),
            _ => None,
        }
    }
}

/// Dispatch one builtin invocation.
pub fn run(builtin: Builtin, session: &mut Session, argv: &[String]) -> BuiltinOutcome {
    match builtin {
        Builtin::Exit => builtin_exit(session, argv),
        Builtin::Cd => BuiltinOutcome::Status(builtin_cd(session, argv)),
        Builtin::Env => BuiltinOutcome::Status(builtin_env(session)),
        Builtin::Help => BuiltinOutcome::Status(builtin_help()),
        Builtin::History => BuiltinOutcome::Status(builtin_history(session)),
        Builtin::Setenv => BuiltinOutcome::Status(builtin_setenv(session, argv)),
        Builtin::Unsetenv => BuiltinOutcome::Status(builtin_unsetenv(session, argv)),
        Builtin::Alias => BuiltinOutcome::Status(builtin_alias(session, argv)),
    }
}

fn builtin_exit(session: &mut Session, argv: &[String]) -> BuiltinOutcome {
    match argv.get(1) {
        None => BuiltinOutcome::Exit,
        Some(arg) => match arg.parse::<i32>() {
            Ok(code) => {
                session.exit_code = Some(code);
                BuiltinOutcome::Exit
            }
            Err(_) => {
                session.report("exit", &format!("Illegal number: {}", arg));
                BuiltinOutcome::Status(2)
            }
        },
    }
}

fn builtin_cd(session: &mut Session, argv: &[String]) -> i32 {
    let target = match argv.get(1).map(String::as_str) {
        None => match session.env.get("HOME") {
            Some(home) => home.to_string(),
            None => {
                session.report("cd", "HOME not set");
                return 1;
            }
        },
        Some("-") => match session.env.get("OLDPWD") {
            Some(prev) => {
                println!("{}", prev);
                prev.to_string()
            }
            None => {
                session.report("cd", "OLDPWD not set");
                return 1;
            }
        },
        Some(dir) => dir.to_string(),
    };

    let previous = std::env::current_dir().ok();
    if std::env::set_current_dir(&target).is_err() {
        session.report("cd", &format!("can't cd to {}", target));
        return 1;
    }
    if let Some(prev) = previous {
        session.env.set("OLDPWD", &prev.to_string_lossy());
    }
    if let Ok(now) = std::env::current_dir() {
        session.env.set("PWD", &now.to_string_lossy());
    }
    0
}

fn builtin_env(session: &Session) -> i32 {
    for (name, value) in session.env.iter() {
        println!("{}={}", name, value);
    }
    0
}

fn builtin_help() -> i32 {
    println!("{}", "seash - small command interpreter".bold());
    println!();
    println!("Builtin commands:");
    println!("  exit [n]            leave the shell, optionally with status n");
    println!("  cd [dir | -]        change directory (default $HOME, - for $OLDPWD)");
    println!("  env                 print the environment");
    println!("  setenv NAME VALUE   set an environment variable");
    println!("  unsetenv NAME...    remove environment variables");
    println!("  alias [name[=val]]  list, show or define aliases");
    println!("  history             list this session's command history");
    println!("  help                this text");
    println!();
    println!("Commands chain with ';', '&&' and '||'.");
    0
}

fn builtin_history(session: &Session) -> i32 {
    for (index, entry) in session.history.entries().iter().enumerate() {
        println!("{:5}  {}", index, entry);
    }
    0
}

fn builtin_setenv(session: &mut Session, argv: &[String]) -> i32 {
    if argv.len() != 3 {
        session.report("setenv", "expected NAME VALUE");
        return 1;
    }
    session.env.set(&argv[1], &argv[2]);
    0
}

fn builtin_unsetenv(session: &mut Session, argv: &[String]) -> i32 {
    if argv.len() < 2 {
        session.report("unsetenv", "expected at least one NAME");
        return 1;
    }
    for name in &argv[1..] {
        session.env.unset(name);
    }
    0
}

fn builtin_alias(session: &mut Session, argv: &[String]) -> i32 {
    if argv.len() == 1 {
        // HashMap order is arbitrary; list sorted for stable output.
        let mut names: Vec<&String> = session.aliases.keys().collect();
        names.sort();
        for name in names {
            println!("{}='{}'", name, session.aliases[name]);
        }
        return 0;
    }

    let mut code = 0;
    for arg in &argv[1..] {
        match arg.split_once('=') {
            Some((name, value)) => {
                session.aliases.insert(name.to_string(), value.to_string());
            }
            None => match session.aliases.get(arg) {
                Some(value) => println!("{}='{}'", arg, value),
                None => {
                    session.report("alias", &format!("{} not found", arg));
                    code = 1;
                }
            },
        }
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::environ::Environ;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    fn session() -> Session {
        let mut session = Session::new(false);
        session.env = Environ::empty();
        session
    }

    #[test]
    fn test_lookup_is_exact_and_case_sensitive() {
        assert_eq!(Builtin::lookup("cd"), Some(Builtin::Cd));
        assert_eq!(Builtin::lookup("CD"), None);
        assert_eq!(Builtin::lookup("cdd"), None);
    }

    #[test]
    fn test_exit_no_argument() {
        let mut s = session();
        assert_eq!(
            run(Builtin::Exit, &mut s, &argv(&["exit"])),
            BuiltinOutcome::Exit
        );
        assert_eq!(s.exit_code, None);
    }

    #[test]
    fn test_exit_with_code() {
        let mut s = session();
        assert_eq!(
            run(Builtin::Exit, &mut s, &argv(&["exit", "42"])),
            BuiltinOutcome::Exit
        );
        assert_eq!(s.exit_code, Some(42));
    }

    #[test]
    fn test_exit_illegal_number_continues() {
        let mut s = session();
        assert_eq!(
            run(Builtin::Exit, &mut s, &argv(&["exit", "banana"])),
            BuiltinOutcome::Status(2)
        );
        assert_eq!(s.exit_code, None);
    }

    #[test]
    fn test_setenv_and_unsetenv() {
        let mut s = session();
        assert_eq!(
            run(Builtin::Setenv, &mut s, &argv(&["setenv", "FOO", "bar"])),
            BuiltinOutcome::Status(0)
        );
        assert_eq!(s.env.get("FOO"), Some("bar"));

        assert_eq!(
            run(Builtin::Unsetenv, &mut s, &argv(&["unsetenv", "FOO"])),
            BuiltinOutcome::Status(0)
        );
        assert_eq!(s.env.get("FOO"), None);
    }

    #[test]
    fn test_setenv_usage_error() {
        let mut s = session();
        assert_eq!(
            run(Builtin::Setenv, &mut s, &argv(&["setenv", "FOO"])),
            BuiltinOutcome::Status(1)
        );
    }

    #[test]
    fn test_alias_define_and_report_missing() {
        let mut s = session();
        assert_eq!(
            run(Builtin::Alias, &mut s, &argv(&["alias", "ll=ls -l"])),
            BuiltinOutcome::Status(0)
        );
        assert_eq!(s.aliases.get("ll").map(String::as_str), Some("ls -l"));

        assert_eq!(
            run(Builtin::Alias, &mut s, &argv(&["alias", "nope"])),
            BuiltinOutcome::Status(1)
        );
    }

    #[test]
    fn test_cd_failure() {
        let mut s = session();
        assert_eq!(
            run(Builtin::Cd, &mut s, &argv(&["cd", "/definitely/not/a/dir"])),
            BuiltinOutcome::Status(1)
        );
    }

    #[test]
    fn test_cd_without_home() {
        let mut s = session();
        assert_eq!(
            run(Builtin::Cd, &mut s, &argv(&["cd"])),
            BuiltinOutcome::Status(1)
        );
    }
}
