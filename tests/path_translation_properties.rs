//! Property tests for path translation

use proptest::prelude::*;
use routeplane::synthesis::{build_match, build_rewrite};

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Param(String),
}

fn segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        "[a-z][a-z0-9-]{0,8}".prop_map(Segment::Literal),
        "[a-zA-Z][a-zA-Z0-9]{0,8}".prop_map(Segment::Param),
    ]
}

fn target(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| match s {
            Segment::Literal(name) => format!("/{}", name),
            Segment::Param(name) => format!("/{{{}}}", name),
        })
        .collect()
}

proptest! {
    #[test]
    fn rewrite_numbers_parameters_in_order(segments in prop::collection::vec(segment(), 1..8)) {
        let target = target(&segments);
        let rewrite = build_rewrite(&target, false);

        let mut index = 0;
        let expected: String = segments
            .iter()
            .map(|s| match s {
                Segment::Literal(name) => format!("/{}", name),
                Segment::Param(_) => {
                    index += 1;
                    format!("/\\{}", index)
                }
            })
            .collect();

        prop_assert_eq!(rewrite, expected);
    }

    #[test]
    fn match_replaces_every_parameter_with_a_capture(
        segments in prop::collection::vec(segment(), 1..8),
        base in "(/[a-z]{1,6}){0,2}",
    ) {
        let target = target(&segments);
        let pattern = build_match(&target, &base);
        let params = segments.iter().filter(|s| matches!(s, Segment::Param(_))).count();

        prop_assert!(pattern.starts_with(&base));
        prop_assert_eq!(pattern.matches("(.*)").count(), params);
        prop_assert!(!pattern.contains('{'), "pattern contains '{{': {}", pattern);
    }

    #[test]
    fn match_compiles_as_regex(segments in prop::collection::vec(segment(), 1..8)) {
        let pattern = build_match(&format!("{}/*", target(&segments)), "/api");
        prop_assert!(regex::Regex::new(&pattern).is_ok());
        prop_assert!(pattern.ends_with("(.*)"));
    }
}

#[test]
fn match_all_and_root_targets() {
    assert_eq!(build_match("/*", "/employees-info"), "/employees-info(.*)");
    assert_eq!(build_rewrite("/*", false), "\\1");
    assert_eq!(build_match("/", "/employees-info"), "/employees-info/");
}
