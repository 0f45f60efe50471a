//! End-to-end pipeline tests against fake `cmake`/`ctest` scripts.

#![cfg(unix)]

mod pipeline_tests;
