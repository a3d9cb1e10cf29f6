//! Shell core module

pub mod builtin;
pub mod chain;
pub mod environ;
pub mod error;
pub mod exec;
pub mod expand;
pub mod history;
pub mod resolve;

use std::collections::HashMap;
use std::env;

use colored::Colorize;

use builtin::BuiltinOutcome;
use chain::ChainOp;
use environ::Environ;
use history::History;
use resolve::Resolution;

/// One shell invocation's mutable state.
///
/// Status, aliases, environment and history persist across input lines; the
/// argv and resolved path of a sub-command live only for that sub-command.
pub struct Session {
    /// Program name for diagnostics (argv[0] of the shell itself).
    pub program: String,
    /// Last command exit status (for $?).
    pub last_status: i32,
    /// Explicit code from the `exit` builtin, if one was given.
    pub exit_code: Option<i32>,
    /// Set when a builtin requested termination.
    pub should_exit: bool,
    /// Current input line number, for diagnostics.
    pub line_number: u64,
    /// Whether input comes from a terminal.
    pub interactive: bool,
    /// Command aliases.
    pub aliases: HashMap<String, String>,
    /// Session-owned environment snapshot.
    pub env: Environ,
    /// Command history.
    pub history: History,
}

impl Session {
    pub fn new(interactive: bool) -> Self {
        Self {
            program: env::args().next().unwrap_or_else(|| "seash".to_string()),
            last_status: 0,
            exit_code: None,
            should_exit: false,
            line_number: 0,
            interactive,
            aliases: HashMap::new(),
            env: Environ::from_process(),
            history: History::load(),
        }
    }

    /// Execute one input line: split it into chain links and run each,
    /// honoring `&&`/`||` short-circuiting against the previous link's
    /// status. A whitespace-only line executes nothing and leaves the
    /// status untouched.
    pub fn execute_line(&mut self, line: &str) {
        self.line_number += 1;

        let links = chain::split_chain(line);
        if links.is_empty() {
            return;
        }
        self.history.append(line.trim());

        for link in links {
            match link.op {
                ChainOp::And if self.last_status != 0 => continue,
                ChainOp::Or if self.last_status == 0 => continue,
                _ => {}
            }
            self.run_link(&link.text);
            if self.should_exit {
                return;
            }
        }
    }

    /// Substitute, resolve and execute one sub-command. The argv is owned
    /// here and dropped when the link finishes.
    fn run_link(&mut self, raw: &str) {
        let expanded = expand::expand(raw, &self.aliases, &self.env, self.last_status);
        let argv = expand::split_words(&expanded);
        let Some(argv0) = argv.first().cloned() else {
            // Substitution can leave nothing behind (comment-only link).
            return;
        };

        match resolve::resolve(&argv0, self) {
            Resolution::Builtin(b) => match builtin::run(b, self, &argv) {
                BuiltinOutcome::Status(code) => self.last_status = code,
                BuiltinOutcome::Exit => self.should_exit = true,
            },
            Resolution::Executable(path) => match exec::run_external(&path, &argv, &self.env) {
                Ok(code) => {
                    self.last_status = code;
                    if code == 126 {
                        self.report(&argv0, "Permission denied");
                    }
                }
                Err(err) => {
                    self.last_status = err.status();
                    self.report(&argv0, &err.to_string());
                }
            },
            Resolution::PermissionDenied(_) => {
                self.last_status = 126;
                self.report(&argv0, "Permission denied");
            }
            Resolution::NotFound => {
                self.last_status = 127;
                self.report(&argv0, "not found");
            }
        }
    }

    /// One-line diagnostic on stderr: `program: line: command: message`.
    pub fn report(&self, command: &str, message: &str) {
        eprintln!(
            "{}: {}: {}: {}",
            self.program, self.line_number, command, message
        );
    }

    /// Interactive prompt string.
    pub fn prompt(&self) -> String {
        let cwd = env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        format!("{} {}$ ", "seash".bright_cyan().bold(), cwd.white())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_session() -> Session {
        let mut session = Session::new(false);
        session.history = History::load_from(None);
        session
    }

    #[test]
    fn test_whitespace_line_leaves_status_unchanged() {
        let mut s = quiet_session();
        s.last_status = 7;
        s.execute_line("   \t ");
        assert_eq!(s.last_status, 7);
        assert!(s.history.entries().is_empty());
    }

    #[test]
    fn test_semicolon_runs_both_regardless_of_status() {
        let mut s = quiet_session();
        s.execute_line("false ; true");
        assert_eq!(s.last_status, 0);
        s.execute_line("true ; false");
        assert_eq!(s.last_status, 1);
    }

    #[test]
    fn test_and_short_circuits_on_failure() {
        let mut s = quiet_session();
        // `true` after `&&` must not run, so the status stays 1.
        s.execute_line("false && true");
        assert_eq!(s.last_status, 1);
    }

    #[test]
    fn test_or_runs_only_on_failure() {
        let mut s = quiet_session();
        s.execute_line("false || true");
        assert_eq!(s.last_status, 0);
        s.execute_line("true || false");
        assert_eq!(s.last_status, 0);
    }

    #[test]
    fn test_chain_scenario() {
        // true ; false && (skipped) || true → final status 0
        let mut s = quiet_session();
        s.execute_line("true ; false && false || true");
        assert_eq!(s.last_status, 0);
    }

    #[test]
    fn test_not_found_yields_127_and_session_continues() {
        let mut s = quiet_session();
        s.execute_line("definitely-not-a-command-zzz");
        assert_eq!(s.last_status, 127);
        s.execute_line("true");
        assert_eq!(s.last_status, 0);
    }

    #[test]
    fn test_status_expansion_across_links() {
        // After `false`, $? is 1 within the same line.
        let mut s = quiet_session();
        s.execute_line("false ; test 1 -eq $?");
        assert_eq!(s.last_status, 0);
    }

    #[test]
    fn test_alias_applies_to_command() {
        let mut s = quiet_session();
        s.execute_line("alias ok=true");
        s.execute_line("false ; ok");
        assert_eq!(s.last_status, 0);
    }

    #[test]
    fn test_exit_stops_the_line() {
        let mut s = quiet_session();
        s.execute_line("exit 5 ; true");
        assert!(s.should_exit);
        assert_eq!(s.exit_code, Some(5));
        // `true` after exit must not have run.
        assert_eq!(s.last_status, 0);
    }

    #[test]
    fn test_comment_only_link_is_noop() {
        let mut s = quiet_session();
        s.last_status = 3;
        s.execute_line("# just a note");
        assert_eq!(s.last_status, 3);
    }

    #[test]
    fn test_setenv_visible_to_children() {
        let mut s = quiet_session();
        s.execute_line("setenv SEASH_MARK yes");
        s.execute_line("printenv SEASH_MARK");
        assert_eq!(s.last_status, 0);
        s.execute_line("unsetenv SEASH_MARK");
        s.execute_line("printenv SEASH_MARK");
        assert_ne!(s.last_status, 0);
    }

    #[test]
    fn test_variable_expansion_uses_session_env() {
        let mut s = quiet_session();
        s.execute_line("setenv SEASH_WORD hello");
        s.execute_line("test $SEASH_WORD = hello");
        assert_eq!(s.last_status, 0);
    }
}
