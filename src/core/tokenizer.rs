//! Tokenizer for console input.
//!
//! Splits raw input into a command name plus parameter tokens, honoring
//! double-quoted substrings, and reconciles surplus tokens against a
//! command's declared parameter count. No external dependencies.

/// Tokenize raw input into a command name followed by parameter tokens.
///
/// Never fails; the worst case is a single-element vector. The first token is
/// the command name, taken verbatim (quotes are not interpreted there). For
/// the remaining tokens, a leading `"` starts aggregation of a multi-word
/// parameter which ends at the next token with a trailing `"` (or at the end
/// of input), with the quotes stripped. A single token wrapped in quotes is
/// unwrapped directly.
///
/// # Examples
///
/// ```
/// use bevy_devconsole::core::tokenize;
///
/// assert_eq!(tokenize("print hello"), vec!["print", "hello"]);
/// assert_eq!(tokenize(r#"print "hello world""#), vec!["print", "hello world"]);
/// assert_eq!(
///     tokenize(r#"bind f1 "toggle cheats" now"#),
///     vec!["bind", "f1", "toggle cheats", "now"],
/// );
/// ```
pub fn tokenize(raw: &str) -> Vec<String> {
    let split: Vec<&str> = raw.split(' ').collect();
    if split.len() <= 1 {
        return split.into_iter().map(str::to_string).collect();
    }

    let mut tokens: Vec<String> = vec![split[0].to_string()];
    let mut building = false;
    let mut param = String::new();

    for (i, piece) in split.iter().enumerate().skip(1) {
        let last = i == split.len() - 1;

        if !building {
            if piece.starts_with('"') && !last {
                if piece.ends_with('"') {
                    // Single-token quoted parameter, unwrap directly.
                    tokens.push(piece.trim_matches('"').to_string());
                } else {
                    building = true;
                    param = piece.trim_start_matches('"').to_string();
                }
            } else {
                // A final token that merely starts with a quote passes
                // through unmodified.
                tokens.push(piece.to_string());
            }
        } else if piece.ends_with('"') || last {
            building = false;
            param.push(' ');
            param.push_str(piece.trim_end_matches('"'));
            tokens.push(std::mem::take(&mut param));
        } else {
            param.push(' ');
            param.push_str(piece);
        }
    }

    tokens
}

/// Reconcile tokenized input against a command's declared parameter count.
///
/// When more parameter tokens were supplied than the command declares, the
/// last declared parameter acts as a greedy rest-of-line capture: the command
/// name and the first `expected - 1` parameters are kept verbatim and all
/// remaining tokens are joined (space-separated) into the final slot. This
/// lets a one-parameter command accept `print hello world` without quoting.
///
/// Zero-parameter commands discard surplus tokens entirely.
pub fn reconcile(tokens: Vec<String>, expected: usize) -> Vec<String> {
    if tokens.len().saturating_sub(1) <= expected {
        return tokens;
    }

    let mut out = Vec::with_capacity(expected + 1);
    let mut iter = tokens.into_iter();
    out.push(iter.next().unwrap_or_default());

    if expected == 0 {
        return out;
    }

    for _ in 0..expected - 1 {
        if let Some(tok) = iter.next() {
            out.push(tok);
        }
    }

    let tail: Vec<String> = iter.collect();
    out.push(tail.join(" "));
    out
}
