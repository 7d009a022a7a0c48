//! Test utilities: fixtures and mock collaborators.
//!
//! Available to unit tests and, behind the `testing` feature, to the
//! integration tests under `tests/`.

pub mod fixtures;
pub mod mock;

pub use fixtures::{auth_success_body, bearer_token, blood_request_record, identity};
pub use mock::{MockTransport, RecordingNavigator};
