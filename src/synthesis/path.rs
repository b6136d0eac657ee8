//! Path translation
//!
//! Turns an operation target such as `/employee/{employeeId}/*` into
//!
//! - a regular-expression match pattern under the API base path, where every
//!   `{param}` segment becomes a `(.*)` capture group, and
//! - a rewrite expression for the upstream, where every `{param}` segment
//!   becomes a positional backreference `\1`, `\2`, ... in order of appearance.
//!
//! A trailing `/*` wildcard becomes one more capture group in the match
//! pattern. In the rewrite expression it becomes `///N`, N being the next
//! parameter index.
// TODO: `///N` looks like a mistyped `\N`; switch to a real backreference once
// existing consumers of generated routes are confirmed to accept it.

use regex::{NoExpand, Regex};
use std::sync::OnceLock;

use crate::domain::MATCH_ALL_TARGET;

const ROOT_TARGET: &str = "/";
const CAPTURE_ALL: &str = "(.*)";
const WILDCARD_SUFFIX: &str = "/*";
const WILDCARD_REWRITE_PREFIX: &str = "///";

/// Brace-delimited path parameter (singleton)
fn param_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{.*\}").expect("path parameter regex compilation failed"))
}

/// Non-empty, trimmed path segments
fn segments(target: &str) -> impl Iterator<Item = &str> {
    target.split('/').map(str::trim).filter(|segment| !segment.is_empty())
}

/// Regular-expression match pattern for a target under `base_path`
pub fn build_match(target: &str, base_path: &str) -> String {
    match target {
        MATCH_ALL_TARGET => return format!("{}{}", base_path, CAPTURE_ALL),
        ROOT_TARGET => return format!("{}{}", base_path, ROOT_TARGET),
        _ => {}
    }

    let mut generated = String::new();
    for segment in segments(target) {
        generated.push('/');
        generated.push_str(&param_pattern().replace_all(segment, NoExpand(CAPTURE_ALL)));
    }

    if let Some(head) = generated.strip_suffix(WILDCARD_SUFFIX) {
        generated = format!("{}{}", head, CAPTURE_ALL);
    }

    format!("{}{}", base_path, generated.trim())
}

/// Upstream rewrite expression for a target.
///
/// Service-entry endpoints get the expression whitespace-trimmed; others get
/// it exactly as built.
pub fn build_rewrite(target: &str, service_entry: bool) -> String {
    let mut param_index = 1usize;

    let mut generated = match target {
        MATCH_ALL_TARGET => "\\1".to_string(),
        ROOT_TARGET => ROOT_TARGET.to_string(),
        _ => {
            let mut generated = String::new();
            for segment in segments(target) {
                generated.push('/');
                if param_pattern().is_match(segment) {
                    let backreference = format!("\\{}", param_index);
                    generated
                        .push_str(&param_pattern().replace_all(segment, NoExpand(&backreference)));
                    param_index += 1;
                } else {
                    generated.push_str(segment);
                }
            }
            generated
        }
    };

    if let Some(head) = generated.strip_suffix(WILDCARD_SUFFIX) {
        generated = format!("{}{}{}", head, WILDCARD_REWRITE_PREFIX, param_index);
    }

    if service_entry {
        generated.trim().to_string()
    } else {
        generated
    }
}
