//! Substitution engine - alias and variable expansion
//!
//! Runs on one chain link before it is split into an argv. The order is
//! fixed: alias substitution first, then `$` expansion, then comment
//! stripping. Aliases expand at most once per link so an alias whose
//! replacement names itself cannot recurse.

use std::collections::HashMap;
use std::process;

use super::environ::Environ;

/// Expand one chain link into a string ready for argv splitting.
pub fn expand(
    raw: &str,
    aliases: &HashMap<String, String>,
    env: &Environ,
    last_status: i32,
) -> String {
    let aliased = substitute_alias(raw, aliases);
    let substituted = substitute_vars(&aliased, env, last_status);
    strip_comment(&substituted)
}

/// Split an expanded link into argv words on whitespace.
///
/// Quotes are not special here; this mirrors the chain splitter's
/// quote-blind behavior.
pub fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(String::from).collect()
}

/// Replace the first token with its alias replacement, if any. Applied once:
/// the replacement text is not re-scanned for aliases.
fn substitute_alias(raw: &str, aliases: &HashMap<String, String>) -> String {
    let trimmed_start = raw.len() - raw.trim_start().len();
    let rest = &raw[trimmed_start..];
    let token_end = rest
        .find(char::is_whitespace)
        .unwrap_or(rest.len());
    let token = &rest[..token_end];

    match aliases.get(token) {
        Some(replacement) => format!(
            "{}{}{}",
            &raw[..trimmed_start],
            replacement,
            &rest[token_end..]
        ),
        None => raw.to_string(),
    }
}

/// Expand `$NAME`, `$$` (process id) and `$?` (last status). An unset
/// variable expands to the empty string, never an error. A `$` not followed
/// by a name character stays literal.
fn substitute_vars(text: &str, env: &Environ, last_status: i32) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0usize;

    while i < chars.len() {
        if chars[i] == '$' && i + 1 < chars.len() {
            match chars[i + 1] {
                '$' => {
                    out.push_str(&process::id().to_string());
                    i += 2;
                    continue;
                }
                '?' => {
                    out.push_str(&last_status.to_string());
                    i += 2;
                    continue;
                }
                c if c == '_' || c.is_ascii_alphanumeric() => {
                    let start = i + 1;
                    let mut end = start;
                    while end < chars.len()
                        && (chars[end] == '_' || chars[end].is_ascii_alphanumeric())
                    {
                        end += 1;
                    }
                    let name: String = chars[start..end].iter().collect();
                    if let Some(value) = env.get(&name) {
                        out.push_str(value);
                    }
                    i = end;
                    continue;
                }
                _ => {}
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

/// Truncate at a `#` that starts a token (preceded by whitespace or line
/// start). A `#` inside a token is left alone.
fn strip_comment(text: &str) -> String {
    let mut prev_is_space = true;
    for (idx, c) in text.char_indices() {
        if c == '#' && prev_is_space {
            return text[..idx].to_string();
        }
        prev_is_space = c.is_whitespace();
    }
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_alias_replaces_first_token() {
        let a = aliases(&[("ll", "ls -l")]);
        let env = Environ::empty();
        assert_eq!(expand("ll /tmp", &a, &env, 0), "ls -l /tmp");
    }

    #[test]
    fn test_alias_not_applied_to_later_tokens() {
        let a = aliases(&[("ll", "ls -l")]);
        let env = Environ::empty();
        assert_eq!(expand("echo ll", &a, &env, 0), "echo ll");
    }

    #[test]
    fn test_self_referential_alias_expands_once() {
        let a = aliases(&[("ls", "ls --color")]);
        let env = Environ::empty();
        assert_eq!(expand("ls /tmp", &a, &env, 0), "ls --color /tmp");
    }

    #[test]
    fn test_variable_expansion() {
        let mut env = Environ::empty();
        env.set("HOME", "/root");
        assert_eq!(
            expand("echo $HOME", &HashMap::new(), &env, 0),
            "echo /root"
        );
    }

    #[test]
    fn test_unset_variable_is_empty() {
        let env = Environ::empty();
        assert_eq!(expand("echo $NOPE!", &HashMap::new(), &env, 0), "echo !");
    }

    #[test]
    fn test_last_status_expansion() {
        let env = Environ::empty();
        assert_eq!(expand("echo $?", &HashMap::new(), &env, 127), "echo 127");
    }

    #[test]
    fn test_pid_expansion() {
        let env = Environ::empty();
        let expanded = expand("echo $$", &HashMap::new(), &env, 0);
        assert_eq!(expanded, format!("echo {}", process::id()));
    }

    #[test]
    fn test_lone_dollar_is_literal() {
        let env = Environ::empty();
        assert_eq!(expand("echo $", &HashMap::new(), &env, 0), "echo $");
        assert_eq!(expand("echo a$-b", &HashMap::new(), &env, 0), "echo a$-b");
    }

    #[test]
    fn test_comment_at_token_start_truncates() {
        let env = Environ::empty();
        assert_eq!(expand("echo hi # comment", &HashMap::new(), &env, 0), "echo hi ");
        assert_eq!(expand("# whole line", &HashMap::new(), &env, 0), "");
    }

    #[test]
    fn test_hash_inside_token_is_kept() {
        let env = Environ::empty();
        assert_eq!(expand("echo a#b", &HashMap::new(), &env, 0), "echo a#b");
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("  ls  -l\t/tmp "), vec!["ls", "-l", "/tmp"]);
        assert!(split_words("   ").is_empty());
    }
}
