//! Terminal detection and capability utilities

use is_terminal::IsTerminal;
use std::env;
use std::io::{stderr, stdout};

/// Check if stdout is connected to an interactive terminal
pub fn is_interactive() -> bool {
    if !stdout().is_terminal() {
        return false;
    }

    // CI runners may allocate a TTY but nobody is watching it
    if is_ci_environment() {
        return false;
    }

    if env::var("DEBIAN_FRONTEND").unwrap_or_default() == "noninteractive" {
        return false;
    }

    true
}

/// Check if the terminal supports ANSI escape codes for colors and spinners
pub fn supports_ansi() -> bool {
    if !is_interactive() {
        return false;
    }

    term_supports_ansi(&env::var("TERM").unwrap_or_default())
}

fn term_supports_ansi(term: &str) -> bool {
    if cfg!(windows) {
        term != "dumb"
    } else {
        !term.is_empty() && term != "dumb"
    }
}

/// Check if stderr is connected to a terminal (for progress display)
pub fn stderr_is_terminal() -> bool {
    stderr().is_terminal()
}

/// Detect if running in a CI environment
fn is_ci_environment() -> bool {
    ci_detected(|var| env::var_os(var).is_some())
}

/// Whether any CI marker variable is set according to `is_set`
fn ci_detected(is_set: impl Fn(&str) -> bool) -> bool {
    const CI_VARS: [&str; 11] = [
        "CI",
        "CONTINUOUS_INTEGRATION",
        "JENKINS_URL",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "TRAVIS",
        "CIRCLECI",
        "BUILDKITE",
        "DRONE",
        "TEAMCITY_VERSION",
        "TF_BUILD", // Azure DevOps
    ];

    CI_VARS.iter().any(|var| is_set(var))
}

/// Determine if the discovery spinner should be shown by default
pub fn should_show_progress_by_default() -> bool {
    // The spinner draws on stderr and needs ANSI support
    is_interactive() && stderr_is_terminal() && supports_ansi()
}

/// Determine if output should be colored
///
/// Honors the `NO_COLOR` convention on top of the configured switch.
pub fn should_use_color(color_enabled: bool) -> bool {
    color_enabled && env::var_os("NO_COLOR").is_none() && supports_ansi()
}
