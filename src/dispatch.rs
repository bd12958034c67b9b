//! Command-line dispatch: one argument in, at most one demo run.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use colored::Colorize;
use tracing::debug;

use crate::registry::{Demo, Registry};

const DEFAULT_PROGRAM: &str = "tour";
const PREFERRED_EXAMPLES: [&str; 2] = ["Pointers", "JWTAuth"];

/// What the first argument asks for.
#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    Help,
    Run { name: &'a str, demo: Demo },
    Unknown(&'a str),
}

/// How a dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Help,
    Ran,
    Unknown,
}

impl Outcome {
    pub fn code(self) -> u8 {
        match self {
            Outcome::Help | Outcome::Ran => 0,
            Outcome::Unknown => 2,
        }
    }

    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Maps the arguments after the program path to an [`Action`].
/// Only the first argument is considered.
pub fn resolve<'a, S: AsRef<str>>(registry: &Registry, args: &'a [S]) -> Action<'a> {
    let Some(name) = args.first().map(AsRef::as_ref) else {
        return Action::Help;
    };
    match registry.lookup(name) {
        Some(demo) => Action::Run { name, demo },
        None => Action::Unknown(name),
    }
}

/// Display name for the program, taken from `argv[0]`.
pub fn program_name(argv0: Option<&str>) -> String {
    argv0
        .and_then(|arg| Path::new(arg).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_PROGRAM)
        .to_string()
}

pub fn usage(program: &str, registry: &Registry) -> String {
    let mut text = format!("{} {program} <demo-name>\n\n", "usage:".bold());
    text.push_str("Available demos:\n");
    for name in registry.names() {
        text.push_str(&format!("  {name}\n"));
    }

    let examples = example_names(registry);
    if !examples.is_empty() {
        text.push_str("\nExamples:\n");
        for name in examples {
            text.push_str(&format!("  {program} {name}\n"));
        }
    }
    text
}

pub fn unknown_message(name: &str, registry: &Registry) -> String {
    let known: Vec<_> = registry.names().collect();
    format!(
        "{} unknown demo \"{name}\"\nknown demos: {}\n",
        "error:".red().bold(),
        known.join(", ")
    )
}

fn example_names(registry: &Registry) -> Vec<&'static str> {
    let preferred: Vec<_> = registry
        .names()
        .filter(|name| PREFERRED_EXAMPLES.contains(name))
        .collect();
    if preferred.is_empty() {
        registry.names().take(1).collect()
    } else {
        preferred
    }
}

/// Runs one dispatch for `argv` (program path first).
///
/// Usage goes to `out`, the unknown-demo error to `err`. The demo itself
/// prints straight to the process stdout. Panics inside the demo are not
/// caught.
pub fn run<I, O, E>(registry: &Registry, argv: I, out: &mut O, err: &mut E) -> io::Result<Outcome>
where
    I: IntoIterator<Item = String>,
    O: Write,
    E: Write,
{
    let mut argv = argv.into_iter();
    let program = program_name(argv.next().as_deref());
    let args: Vec<String> = argv.collect();

    if args.len() > 1 {
        debug!(ignored = ?&args[1..], "ignoring extra arguments");
    }

    match resolve(registry, &args) {
        Action::Help => {
            out.write_all(usage(&program, registry).as_bytes())?;
            out.flush()?;
            Ok(Outcome::Help)
        }
        Action::Run { name, demo } => {
            debug!(demo = name, "dispatching");
            demo();
            out.flush()?;
            Ok(Outcome::Ran)
        }
        Action::Unknown(name) => {
            debug!(demo = name, "unknown demo requested");
            err.write_all(unknown_message(name, registry).as_bytes())?;
            err.flush()?;
            Ok(Outcome::Unknown)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Each sentinel gets its own counter so tests running in parallel do
    // not interfere with each other.
    static POINTERS_CALLS: AtomicUsize = AtomicUsize::new(0);
    static GOROUTINE_CALLS: AtomicUsize = AtomicUsize::new(0);
    static JWT_CALLS: AtomicUsize = AtomicUsize::new(0);
    static UNTOUCHED_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn pointers_sentinel() {
        POINTERS_CALLS.fetch_add(1, Ordering::SeqCst);
    }
    fn goroutine_sentinel() {
        GOROUTINE_CALLS.fetch_add(1, Ordering::SeqCst);
    }
    fn jwt_sentinel() {
        JWT_CALLS.fetch_add(1, Ordering::SeqCst);
    }
    fn untouched_sentinel() {
        UNTOUCHED_CALLS.fetch_add(1, Ordering::SeqCst);
    }

    fn sentinel_registry() -> Registry {
        Registry::from_table(&[
            ("Pointers", pointers_sentinel),
            ("Goroutine", goroutine_sentinel),
            ("JWTAuth", jwt_sentinel),
            ("Untouched", untouched_sentinel),
        ])
    }

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("tour")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    fn dispatch(args: &[&str]) -> (Outcome, String, String) {
        let registry = sentinel_registry();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = run(&registry, argv(args), &mut out, &mut err).unwrap();
        (
            outcome,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_no_arguments_prints_usage() {
        let (outcome, out, err) = dispatch(&[]);

        assert_eq!(outcome, Outcome::Help);
        assert_eq!(outcome.code(), 0);
        assert!(out.to_lowercase().contains("usage"));
        assert!(out.contains("Pointers"));
        assert!(out.contains("tour Pointers"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_usage_lists_every_name() {
        let registry = sentinel_registry();
        let text = usage("tour", &registry);
        for name in registry.names() {
            assert!(text.contains(name), "{name} not listed");
        }
    }

    #[test]
    fn test_help_is_idempotent() {
        let (_, first, _) = dispatch(&[]);
        let (_, second, _) = dispatch(&[]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_known_demo_runs_once() {
        let before = POINTERS_CALLS.load(Ordering::SeqCst);
        let (outcome, out, err) = dispatch(&["Pointers"]);

        assert_eq!(outcome, Outcome::Ran);
        assert_eq!(POINTERS_CALLS.load(Ordering::SeqCst), before + 1);
        assert!(!out.contains("usage"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_goroutine_invoked_exactly_once() {
        let before = GOROUTINE_CALLS.load(Ordering::SeqCst);
        let (outcome, _, _) = dispatch(&["Goroutine"]);

        assert_eq!(outcome, Outcome::Ran);
        assert_eq!(GOROUTINE_CALLS.load(Ordering::SeqCst), before + 1);
    }

    #[test]
    fn test_extra_arguments_are_ignored() {
        let before = JWT_CALLS.load(Ordering::SeqCst);
        let (outcome, _, err) = dispatch(&["JWTAuth", "extra-arg", "another"]);

        assert_eq!(outcome, Outcome::Ran);
        assert_eq!(JWT_CALLS.load(Ordering::SeqCst), before + 1);
        assert!(err.is_empty());
    }

    #[test]
    fn test_unknown_demo_reports_name() {
        let (outcome, out, err) = dispatch(&["NoSuchDemo"]);

        assert_eq!(outcome, Outcome::Unknown);
        assert_ne!(outcome.code(), 0);
        assert!(err.contains("NoSuchDemo"));
        assert!(err.contains("Pointers"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_unknown_demo_is_stable() {
        let first = dispatch(&["NoSuchDemo"]);
        let second = dispatch(&["NoSuchDemo"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let before = POINTERS_CALLS.load(Ordering::SeqCst);
        let (outcome, _, err) = dispatch(&["pointers"]);

        assert_eq!(outcome, Outcome::Unknown);
        assert!(err.contains("pointers"));
        assert_eq!(POINTERS_CALLS.load(Ordering::SeqCst), before);
    }

    #[test]
    fn test_single_call_discipline() {
        let before = UNTOUCHED_CALLS.load(Ordering::SeqCst);
        dispatch(&[]);
        dispatch(&["NoSuchDemo"]);
        dispatch(&["Pointers", "Untouched"]);
        assert_eq!(UNTOUCHED_CALLS.load(Ordering::SeqCst), before);
    }

    #[test]
    fn test_resolve_only_reads_first_argument() {
        let registry = sentinel_registry();
        assert!(matches!(resolve::<String>(&registry, &[]), Action::Help));
        assert!(matches!(
            resolve(&registry, &["Goroutine", "Pointers"]),
            Action::Run { name: "Goroutine", .. }
        ));
        assert!(matches!(
            resolve(&registry, &["Nope", "Pointers"]),
            Action::Unknown("Nope")
        ));
    }

    #[test]
    fn test_program_name_from_argv0() {
        assert_eq!(program_name(Some("/usr/local/bin/tour")), "tour");
        assert_eq!(program_name(Some("target/debug/my-demos")), "my-demos");
        assert_eq!(program_name(None), "tour");
        assert_eq!(program_name(Some("")), "tour");
    }

    #[test]
    fn test_examples_fall_back_to_first_name() {
        fn noop() {}
        let registry = Registry::from_table(&[("Zebra", noop), ("Aardvark", noop)]);
        let text = usage("tour", &registry);
        assert!(text.contains("tour Aardvark"));
    }
}
