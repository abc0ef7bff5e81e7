//! Unit tests for GTC library modules

#[path = "unit/config_test.rs"]
mod config_test;

#[path = "unit/keys_test.rs"]
mod keys_test;

#[path = "unit/store_test.rs"]
mod store_test;
