//! Status aggregation rules for commands and tests

use crate::{Command, Status};

/// Status of a single command: only an exit code of exactly `"0"` passes
pub fn command_status(return_value: &str) -> Status {
    if return_value == "0" {
        Status::Pass
    } else {
        Status::Fail
    }
}

/// Overall status of a test.
///
/// With no commands the `fallback` (taken from the summary element) is
/// returned unchanged. Otherwise all passing is `Pass`, none passing is
/// `Fail`, and anything in between is `Partial`.
pub fn aggregate(commands: &[Command], fallback: Status) -> Status {
    if commands.is_empty() {
        return fallback;
    }
    let total = commands.len();
    let passed = commands.iter().filter(|c| c.status == Status::Pass).count();
    if passed == total {
        Status::Pass
    } else if passed == 0 {
        Status::Fail
    } else {
        Status::Partial
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn build(outcomes: &[bool]) -> Vec<Command> {
        outcomes
            .iter()
            .enumerate()
            .map(|(i, pass)| {
                let rv = if *pass { "0" } else { "1" };
                Command {
                    number: i + 1,
                    text: format!("c{}", i),
                    return_value: rv.to_string(),
                    status: command_status(rv),
                    occurrence: 0,
                }
            })
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn status_matches_pass_count(outcomes in prop::collection::vec(any::<bool>(), 1..30)) {
            let commands = build(&outcomes);
            let passed = outcomes.iter().filter(|p| **p).count();
            let expected = if passed == outcomes.len() {
                Status::Pass
            } else if passed == 0 {
                Status::Fail
            } else {
                Status::Partial
            };
            prop_assert_eq!(aggregate(&commands, Status::Unknown), expected);
        }

        #[test]
        fn adding_failure_to_passing_test_is_partial(passing in 1usize..20) {
            let mut outcomes = vec![true; passing];
            prop_assert_eq!(aggregate(&build(&outcomes), Status::Unknown), Status::Pass);
            outcomes.push(false);
            prop_assert_eq!(aggregate(&build(&outcomes), Status::Unknown), Status::Partial);
        }
    }
}
