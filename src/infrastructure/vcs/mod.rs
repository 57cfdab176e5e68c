//! 코드 호스팅 API 연동 모듈.

mod github;

pub use github::GitHubClient;
