//! End-to-end harvest tests against a mock listing site

mod harvest_tests;
