//! Reporter Port - test runner integration
//!
//! Register a test, then report it passed or failed.

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait TestReporter: Send + Sync {
    fn register(&self, name: &str);

    fn pass(&self, name: &str);

    fn fail(&self, name: &str, error: &str);
}
