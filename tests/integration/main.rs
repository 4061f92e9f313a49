//! Integration tests for urlpoll
//!
//! `polling_tests` drives the full loop with a recording probe under paused
//! time; `http_tests` runs the reqwest prober against wiremock servers.

mod http_tests;
mod polling_tests;
