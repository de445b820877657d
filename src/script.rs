//! Rewriting of the `test` script.
//!
//! Pure string transforms live here so they can be tested without touching
//! the filesystem. Word boundaries follow the usual regex `\b` rule with
//! ASCII letters, digits and `_` counting as word characters.

use crate::error::Result;
use crate::framework::Framework;
use crate::manifest::Manifest;
use std::ops::Range;

const MANUAL_RUNNER_PREFIX: &str = "node ";
const MANUAL_RUNNER_DIR: &str = "test/";
const MANUAL_RUNNER_FILE: &str = "test.js";

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn word_boundary_before(haystack: &str, idx: usize) -> bool {
    haystack[..idx]
        .chars()
        .next_back()
        .is_none_or(|c| !is_word_char(c))
}

fn word_boundary_after(haystack: &str, idx: usize) -> bool {
    haystack[idx..]
        .chars()
        .next()
        .is_none_or(|c| !is_word_char(c))
}

/// Whether `word` occurs in `haystack` delimited by word boundaries.
pub fn contains_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    haystack.match_indices(word).any(|(idx, _)| {
        word_boundary_before(haystack, idx) && word_boundary_after(haystack, idx + word.len())
    })
}

/// Locate the first `node test.js` or `node test/test.js` invocation.
pub fn find_manual_runner(script: &str) -> Option<Range<usize>> {
    script
        .match_indices(MANUAL_RUNNER_PREFIX)
        .find_map(|(start, _)| {
            if !word_boundary_before(script, start) {
                return None;
            }
            let mut end = start + MANUAL_RUNNER_PREFIX.len();
            if script[end..].starts_with(MANUAL_RUNNER_DIR) {
                end += MANUAL_RUNNER_DIR.len();
            }
            if !script[end..].starts_with(MANUAL_RUNNER_FILE) {
                return None;
            }
            end += MANUAL_RUNNER_FILE.len();
            word_boundary_after(script, end).then_some(start..end)
        })
}

/// Swap a hand-rolled `node test.js` invocation for `command`.
pub fn replace_manual_runner(script: &str, command: &str) -> String {
    match find_manual_runner(script) {
        Some(range) => {
            let mut rewritten = String::with_capacity(script.len() + command.len());
            rewritten.push_str(&script[..range.start]);
            rewritten.push_str(command);
            rewritten.push_str(&script[range.end..]);
            rewritten
        }
        None => script.to_string(),
    }
}

/// Compute the new test script from the current one.
///
/// A missing, empty or placeholder script is replaced outright. Anything
/// else keeps its existing commands: a manual `node test.js` runner is
/// swapped for `command`, and `command` is chained with `&&` unless the
/// framework is already invoked.
pub fn rewrite_test_script(existing: Option<&str>, command: &str, framework: &Framework) -> String {
    let current = match existing {
        Some(script) if !script.is_empty() && script != framework.default_placeholder => script,
        _ => return command.to_string(),
    };

    let mut script = replace_manual_runner(current, command);
    if !contains_word(&script, &framework.command) {
        script.push_str(" && ");
        script.push_str(command);
    }
    script
}

/// Rewrite `scripts.test` of `manifest` in memory and return the new value.
pub fn apply_test_script(
    manifest: &mut Manifest,
    framework: &Framework,
    command: &str,
) -> Result<String> {
    let script = rewrite_test_script(manifest.test_script()?, command, framework);
    manifest.set_test_script(script.clone())?;
    tracing::debug!(script = %script, "Rewrote test script");
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::DEFAULT_TEST_SCRIPT;
    use std::path::Path;

    fn rewrite(existing: Option<&str>, command: &str) -> String {
        rewrite_test_script(existing, command, &Framework::ava())
    }

    #[test]
    fn test_missing_script() {
        assert_eq!(rewrite(None, "ava"), "ava");
        assert_eq!(rewrite(Some(""), "ava"), "ava");
    }

    #[test]
    fn test_default_placeholder_is_replaced() {
        assert_eq!(rewrite(Some(DEFAULT_TEST_SCRIPT), "ava"), "ava");
        assert_eq!(rewrite(Some(DEFAULT_TEST_SCRIPT), "ava --foo"), "ava --foo");
    }

    #[test]
    fn test_existing_ava_is_kept() {
        assert_eq!(rewrite(Some("ava"), "ava"), "ava");
        assert_eq!(rewrite(Some("xo && ava --verbose"), "ava"), "xo && ava --verbose");
    }

    #[test]
    fn test_other_script_is_chained() {
        assert_eq!(rewrite(Some("foo"), "ava"), "foo && ava");
        assert_eq!(
            rewrite(Some("foo"), "ava --foo --bar"),
            "foo && ava --foo --bar"
        );
    }

    #[test]
    fn test_manual_runner_is_replaced() {
        assert_eq!(rewrite(Some("node test.js"), "ava"), "ava");
        assert_eq!(rewrite(Some("node test/test.js"), "ava"), "ava");
        assert_eq!(rewrite(Some("xo && node test.js"), "ava"), "xo && ava");
        assert_eq!(
            rewrite(Some("node test.js && echo done"), "ava --serial"),
            "ava --serial && echo done"
        );
    }

    #[test]
    fn test_only_first_manual_runner_is_replaced() {
        assert_eq!(
            rewrite(Some("node test.js && node test.js"), "ava"),
            "ava && node test.js"
        );
    }

    #[test]
    fn test_manual_runner_needs_word_boundaries() {
        assert_eq!(find_manual_runner("xnode test.js"), None);
        assert_eq!(find_manual_runner("node test.jsx"), None);
        assert_eq!(find_manual_runner("node other/test.js"), None);
        assert_eq!(find_manual_runner("node test.js"), Some(0..12));
        assert_eq!(find_manual_runner("(node test/test.js)"), Some(1..18));
        assert_eq!(find_manual_runner("xnode test.js; node test.js"), Some(15..27));
    }

    #[test]
    fn test_contains_word() {
        assert!(contains_word("ava", "ava"));
        assert!(contains_word("xo && ava --verbose", "ava"));
        assert!(contains_word("ava-cli", "ava"));
        assert!(!contains_word("java -jar x", "ava"));
        assert!(!contains_word("avalanche", "ava"));
        assert!(!contains_word("nyc_ava", "ava"));
        assert!(!contains_word("ava", ""));
    }

    #[test]
    fn test_word_inside_other_token_still_counts() {
        // `-` and `/` are not word characters, so these already invoke the framework.
        assert_eq!(rewrite(Some("nyc ava"), "ava"), "nyc ava");
        assert_eq!(rewrite(Some("./node_modules/.bin/ava"), "ava"), "./node_modules/.bin/ava");
        assert_eq!(rewrite(Some("javac Foo"), "ava"), "javac Foo && ava");
    }

    #[test]
    fn test_custom_placeholder() {
        let framework = Framework::ava().with_default_placeholder("exit 1");
        assert_eq!(rewrite_test_script(Some("exit 1"), "ava", &framework), "ava");
        assert_eq!(
            rewrite_test_script(Some(DEFAULT_TEST_SCRIPT), "ava", &framework),
            format!("{DEFAULT_TEST_SCRIPT} && ava")
        );
    }

    #[test]
    fn test_non_ascii_script() {
        assert_eq!(rewrite(Some("écho ✓"), "ava"), "écho ✓ && ava");
        assert_eq!(rewrite(Some("✓node test.js"), "ava"), "✓ava");
    }

    #[test]
    fn test_apply_test_script() {
        let mut manifest =
            Manifest::parse(Path::new("package.json"), r#"{"scripts": {"test": "foo"}}"#).unwrap();
        let script = apply_test_script(&mut manifest, &Framework::ava(), "ava --foo").unwrap();
        assert_eq!(script, "foo && ava --foo");
        assert_eq!(manifest.test_script().unwrap(), Some("foo && ava --foo"));
    }
}
