//! Environment-driven knobs shared by CI test jobs.

pub mod property_test_profile;
