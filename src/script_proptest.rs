//! Property-based tests for the test script rewriter

#[cfg(test)]
mod tests {
    use crate::args::{build_command, forwarded_args, INIT_FLAG, UNICORN_FLAG};
    use crate::framework::Framework;
    use crate::script::{contains_word, find_manual_runner, rewrite_test_script};
    use proptest::prelude::*;

    // Strategy for CLI tokens, control flags mixed in
    fn cli_tokens() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(
            prop_oneof![
                Just(INIT_FLAG.to_string()),
                Just(UNICORN_FLAG.to_string()),
                "--[a-z][a-z-]{0,10}",
                "[a-z/*.]{1,12}",
            ],
            0..6,
        )
    }

    // Strategy for existing scripts, shell-ish characters included
    fn existing_script() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z &|;./_-]{0,40}",
            Just("node test.js".to_string()),
            Just("xo && node test/test.js".to_string()),
            Just("ava --verbose".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn test_result_invokes_framework(
            existing in existing_script(),
            tokens in cli_tokens(),
        ) {
            let framework = Framework::ava();
            let command = build_command(&framework, &forwarded_args(&tokens));
            let result = rewrite_test_script(Some(&existing), &command, &framework);

            prop_assert!(!result.is_empty());
            prop_assert!(contains_word(&result, "ava"), "no ava in {:?}", result);
        }

        #[test]
        fn test_control_flags_never_forwarded(tokens in cli_tokens()) {
            let command = build_command(&Framework::ava(), &forwarded_args(&tokens));

            for word in command.split_whitespace() {
                prop_assert_ne!(word, INIT_FLAG);
                prop_assert_ne!(word, UNICORN_FLAG);
            }
        }

        #[test]
        fn test_rewrite_is_stable(
            existing in existing_script(),
            tokens in cli_tokens(),
        ) {
            let framework = Framework::ava();
            let command = build_command(&framework, &forwarded_args(&tokens));
            let once = rewrite_test_script(Some(&existing), &command, &framework);
            prop_assume!(find_manual_runner(&once).is_none());

            let twice = rewrite_test_script(Some(&once), &command, &framework);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_existing_commands_are_kept(existing in "[a-z &|;_-]{1,40}") {
            let framework = Framework::ava();
            prop_assume!(!contains_word(&existing, "ava"));
            prop_assume!(find_manual_runner(&existing).is_none());

            let result = rewrite_test_script(Some(&existing), "ava", &framework);
            prop_assert_eq!(result, format!("{existing} && ava"));
        }
    }
}
