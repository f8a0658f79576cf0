#[cfg(test)]
pub mod mocks;

#[cfg(test)]
pub use mocks::{test_helpers, FailingStore, MockClassificationClient};
