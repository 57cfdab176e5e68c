//! Infrastructure layer
//! 외부 시스템(설정 파일, GitHub API, Slack API, 콘솔) 연동 구현을 담당한다.

pub mod adapters;
pub mod chat;
pub mod config;
pub mod vcs;
