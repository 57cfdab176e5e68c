//! 유스케이스 모듈 묶음.

pub mod inspect_config;
pub mod notify;
