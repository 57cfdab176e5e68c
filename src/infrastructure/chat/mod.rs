//! 채팅 API 연동 모듈.

mod slack;

pub use slack::SlackClient;
