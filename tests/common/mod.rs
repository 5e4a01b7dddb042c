#![allow(unused_imports)]

pub use ipmon_launcher_test_utils::builders;
pub use ipmon_launcher_test_utils::fake_backend::FakeBackend;
pub use ipmon_launcher_test_utils::{init_tracing, with_timeout};
