//! Integration tests over the in-memory document store

mod common;
mod http;
mod workflows;
