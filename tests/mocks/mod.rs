#![allow(dead_code)]

pub mod registry_mock;
pub mod store_mock;
