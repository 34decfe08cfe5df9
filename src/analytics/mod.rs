//! Run analytics: a JSONL log of every tidy run and the reporter behind
//! `titidy stats`.

pub mod logger;
pub mod reporter;
