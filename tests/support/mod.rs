#![allow(dead_code)]

pub mod snapshot;
