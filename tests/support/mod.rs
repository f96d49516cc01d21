#![allow(dead_code)]

pub mod artifacts;
pub mod churnpal_env;
