//! Integration test harness for mqstrip.

mod helpers;

mod config_test;
mod select_test;
