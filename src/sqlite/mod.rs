// SQLite module - the rusqlite-backed execution layer
//
// - params: conversion between `DbValue` and rusqlite values, named binding
// - query: statement execution and result-set materialization
// - connection: blocking and async connection handles

pub mod connection;
pub mod params;
pub mod query;

pub use connection::{AsyncSqliteConnection, SqliteConnection};
pub use params::NamedParams;
pub use query::build_result_set;
