//! Application layer
//! 유스케이스 오케스트레이션과 포트 정의를 담당한다.

pub mod ports;
pub mod usecases;
