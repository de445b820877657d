//! Handling of the free-form tokens given on the command line.

use crate::framework::Framework;

/// Accepted for compatibility; carries no behaviour of its own.
pub const INIT_FLAG: &str = "--init";

/// Pins the installed framework to `*` after installation.
pub const UNICORN_FLAG: &str = "--unicorn";

const CONTROL_FLAGS: [&str; 2] = [INIT_FLAG, UNICORN_FLAG];

pub fn is_control_flag(token: &str) -> bool {
    CONTROL_FLAGS.contains(&token)
}

/// Tokens that end up in the generated test script, in their original order.
pub fn forwarded_args(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|token| !is_control_flag(token))
        .cloned()
        .collect()
}

pub fn wants_wildcard_pin(tokens: &[String]) -> bool {
    tokens.iter().any(|token| token == UNICORN_FLAG)
}

/// Builds `<framework> [args...]`.
pub fn build_command(framework: &Framework, args: &[String]) -> String {
    if args.is_empty() {
        framework.command.clone()
    } else {
        format!("{} {}", framework.command, args.join(" "))
    }
}
