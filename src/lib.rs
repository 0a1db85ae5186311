// src/lib.rs

//! collegedesk library: records, filters and summaries behind the college
//! administration dashboard.

pub mod engine;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod session;
pub mod storage;
pub mod utils;
