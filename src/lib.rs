// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

pub mod graph;
pub mod meta;
