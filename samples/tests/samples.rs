//! Runs each sample program with and without the common options.

use cliutils_test::{CliRunner, Expected, RunOptions};

const SAMPLE1: &str = env!("CARGO_BIN_EXE_sample1-simple");
const SAMPLE2: &str = env!("CARGO_BIN_EXE_sample2-arg-opt");
const SAMPLE3: &str = env!("CARGO_BIN_EXE_sample3-subs");
const SAMPLE4: &str = env!("CARGO_BIN_EXE_sample4-async");
const SAMPLE5: &str = env!("CARGO_BIN_EXE_sample5");

fn check(bin: &str, args: &str, expected: &Expected) {
    CliRunner::new().test_command([bin], &RunOptions::new().args(args), expected);
}

mod sample1 {
    use super::*;

    #[test]
    fn plain() {
        check(SAMPLE1, "", &Expected::new().stdout("Hello, world!").exit_code(0));
    }

    #[test]
    fn help() {
        for flag in ["--help", "-h"] {
            check(
                SAMPLE1,
                flag,
                &Expected::new().stdout(["Usage: sample1-simple", "Options"]).exit_code(0),
            );
        }
    }

    #[test]
    fn version() {
        for flag in ["--version", "-V"] {
            check(SAMPLE1, flag, &Expected::new().stdout("sample1-simple 0.0.1").exit_code(0));
        }
    }

    #[test]
    fn debug() {
        for flag in ["--debug", "-d"] {
            check(
                SAMPLE1,
                flag,
                &Expected::new()
                    .stdout(["[DEBUG] ", "command.name", "sample1-simple", "Hello, world!"])
                    .exit_code(0),
            );
        }
    }
}

mod sample2 {
    use super::*;

    #[test]
    fn args_and_option() {
        check(
            SAMPLE2,
            "arg1 arg2 -o opt1",
            &Expected::new()
                .stdout([r#"arg1 = '["arg1", "arg2"]'"#, "opt1 = 'opt1'"])
                .exit_code(0),
        );
    }

    #[test]
    fn no_option() {
        check(SAMPLE2, "", &Expected::new().stdout(["arg1 = '[]'", "opt1 = 'None'"]).exit_code(0));
    }

    #[test]
    fn help_and_version() {
        check(
            SAMPLE2,
            "--help",
            &Expected::new()
                .stdout(["Usage: sample2-arg-opt", "Options:", "--opt1"])
                .exit_code(0),
        );
        check(SAMPLE2, "--version", &Expected::new().stdout("sample2-arg-opt 0.0.2").exit_code(0));
    }

    #[test]
    fn debug() {
        check(
            SAMPLE2,
            "arg1 -o x --debug",
            &Expected::new().stdout(["arg1 =", "opt1 =", "[DEBUG] "]).exit_code(0),
        );
    }
}

mod sample3 {
    use super::*;

    #[test]
    fn group_without_subcommand_prints_usage() {
        check(
            SAMPLE3,
            "",
            &Expected::new()
                .stderr(["Usage: sample3-subs", "Options:", "Commands:", "sub"])
                .exit_code(2),
        );
    }

    #[test]
    fn group_with_only_debug_is_missing_command() {
        check(SAMPLE3, "-d", &Expected::new().stderr("Usage: sample3-subs ").exit_code(2));
    }

    #[test]
    fn nested_group_without_subcommand() {
        check(
            SAMPLE3,
            "sub",
            &Expected::new()
                .stderr(["Usage: sample3-subs sub", "Commands:", "subsub"])
                .exit_code(2),
        );
    }

    #[test]
    fn each_level_has_its_version() {
        check(SAMPLE3, "-V", &Expected::new().stdout(["sample3-subs", "1.1.1"]).exit_code(0));
        check(SAMPLE3, "sub -V", &Expected::new().stdout("2.2.2").exit_code(0));
        check(SAMPLE3, "sub subsub -V", &Expected::new().stdout("3.3.3").exit_code(0));
    }

    #[test]
    fn leaf() {
        check(SAMPLE3, "sub subsub", &Expected::new().stdout("Hello, world").exit_code(0));
    }

    #[test]
    fn debug_at_every_level() {
        check(
            SAMPLE3,
            "-d sub -d subsub -d",
            &Expected::new()
                .stdout([
                    "'sample3-subs'",
                    "=   'sub'",
                    "=     'subsub'",
                    "Hello, world",
                ])
                .exit_code(0),
        );
    }
}

mod sample4 {
    use super::*;

    #[test]
    fn runs_tasks_concurrently() {
        check(
            SAMPLE4,
            "",
            &Expected::new()
                .stdout([
                    "call async",
                    "func1 start",
                    "func2 start",
                    "func3 start",
                    "func1 done",
                    "func2 done",
                    "func3 done",
                    "main> result from async_main(): done",
                ])
                .exit_code(0),
        );
    }

    #[test]
    fn finish_order_follows_durations() {
        let result = CliRunner::new().run_command([SAMPLE4], &RunOptions::new()).unwrap();
        let pos = |s: &str| result.stdout.find(s).unwrap();
        assert!(pos("func2 done") < pos("func3 done"));
        assert!(pos("func3 done") < pos("func1 done"));
    }

    #[test]
    fn help_and_debug() {
        check(SAMPLE4, "-h", &Expected::new().stdout(["Usage: ", "Options:"]).exit_code(0));
        check(SAMPLE4, "-d", &Expected::new().stdout(["[DEBUG] ", "done"]).exit_code(0));
    }
}

#[test]
fn sample5_fetches() {
    check(SAMPLE5, "", &Expected::new().stdout("data fetched").exit_code(0));
}
