//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::blocks::MessageBlock;
use crate::domain::identity::MentionMap;
use crate::domain::pull_request::PullRequest;
use crate::domain::repo::RepoTarget;
use crate::infrastructure::config::{ChatConfig, Config, HostConfig};

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// URL 입력값을 도메인 대상 식별자로 변환하는 포트.
pub trait TargetResolver: Send + Sync {
    fn parse(&self, input: &str) -> Result<RepoTarget>;
}

/// 코드 호스팅(GitHub) 연동 추상화 포트.
#[async_trait]
pub trait HostingGateway: Send + Sync {
    /// 열린 PR 목록 한 페이지를 가져온다(page는 1부터).
    async fn list_open_pulls(&self, page: u32, per_page: u32) -> Result<Vec<PullRequest>>;
    /// PR의 현재 요청된 리뷰어 로그인 목록을 가져온다(개인 리뷰어만).
    async fn fetch_requested_reviewers(&self, number: u64) -> Result<Vec<String>>;
    /// 사용자 프로필의 공개 이메일을 가져온다. 없으면 `None`.
    async fn fetch_user_email(&self, login: &str) -> Result<Option<String>>;
}

/// 대상/호스트 설정에 맞는 호스팅 게이트웨이를 생성하는 팩토리 포트.
pub trait HostingFactory: Send + Sync {
    fn build(
        &self,
        target: &RepoTarget,
        host_cfg: Option<&HostConfig>,
        token: Option<String>,
    ) -> Box<dyn HostingGateway>;
}

/// 채팅(Slack) 연동 추상화 포트.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// 구조화 블록과 plain text 폴백을 대상 하나에 게시한다.
    async fn post_message(
        &self,
        destination: &str,
        fallback: &str,
        blocks: &[MessageBlock],
    ) -> Result<()>;
}

/// 채팅 설정에 맞는 게이트웨이를 생성하는 팩토리 포트.
pub trait ChatFactory: Send + Sync {
    fn build(&self, chat_cfg: &ChatConfig, token: String) -> Box<dyn ChatGateway>;
}

/// login→채팅 ID 매핑 파일 로딩 포트.
/// 파일이 없거나 깨져 있으면 빈 매핑으로 강등한다(치명 아님).
pub trait MentionMapSource: Send + Sync {
    fn load(&self, path: &str) -> MentionMap;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn raw(&self, line: &str);
}
