//! Test Helper Utilities
//!
//! Shared utilities for testing sentiment-service

#![allow(dead_code)]

pub mod fake_classifier;
pub mod stub_server;

pub use fake_classifier::FakeClassifier;
pub use stub_server::{spawn_stub, StubReply, StubServer};

/// Build a semicolon-delimited CSV with the required columns
pub fn csv_of(messages: &[&str]) -> String {
    let mut csv = String::from("username;message\n");
    for (i, message) in messages.iter().enumerate() {
        csv.push_str(&format!("user{};{}\n", i, message));
    }
    csv
}
