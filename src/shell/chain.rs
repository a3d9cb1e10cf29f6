//! Chain splitter - cuts an input line into sub-commands
//!
//! A line like `a ; b && c || d` becomes four links, each tagged with the
//! operator that preceded it. Short-circuit decisions happen in the dispatch
//! loop; this module only splits and tags.
//!
//! The scan is deliberately quote-blind: a `;` or `&&` inside quotes still
//! splits. Single `&` and `|` are ordinary characters.

/// Operator joining a link to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOp {
    /// First link on a line, or preceded by `;`: always runs.
    Normal,
    /// Preceded by `&&`: runs only if the previous status was 0.
    And,
    /// Preceded by `||`: runs only if the previous status was non-zero.
    Or,
}

/// One sub-command of an input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLink {
    pub text: String,
    pub op: ChainOp,
}

/// Split a raw line into chain links. Empty links (trailing `;`, blank
/// lines, consecutive operators) are dropped silently.
pub fn split_chain(line: &str) -> Vec<ChainLink> {
    let mut links = Vec::new();
    let mut buf = String::new();
    let mut op = ChainOp::Normal;

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0usize;

    while i < chars.len() {
        match chars[i] {
            ';' => {
                flush(&mut links, &mut buf, op);
                op = ChainOp::Normal;
            }
            '&' if chars.get(i + 1) == Some(&'&') => {
                flush(&mut links, &mut buf, op);
                op = ChainOp::And;
                i += 1;
            }
            '|' if chars.get(i + 1) == Some(&'|') => {
                flush(&mut links, &mut buf, op);
                op = ChainOp::Or;
                i += 1;
            }
            c => buf.push(c),
        }
        i += 1;
    }
    flush(&mut links, &mut buf, op);

    links
}

fn flush(links: &mut Vec<ChainLink>, buf: &mut String, op: ChainOp) {
    let text = buf.trim();
    if !text.is_empty() {
        links.push(ChainLink {
            text: text.to_string(),
            op,
        });
    }
    buf.clear();
}
