//! Installs the global tracing subscriber, so it lives in its own test binary
//! (process) to avoid clashing with `#[traced_test]` unit tests.

use routeplane::config::ObservabilityConfig;
use routeplane::observability::init_logging;

#[test]
fn test_init_logging_twice() {
    let config = ObservabilityConfig::default();
    init_logging(&config);
    assert!(!init_logging(&config));
}
