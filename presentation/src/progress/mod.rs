//! Progress reporting for council execution

pub mod reporter;
