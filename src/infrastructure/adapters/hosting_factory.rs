//! 호스팅 게이트웨이 팩토리 포트 구현 어댑터.

use crate::application::ports::{HostingFactory, HostingGateway};
use crate::domain::repo::RepoTarget;
use crate::infrastructure::config::HostConfig;
use crate::infrastructure::vcs::GitHubClient;

/// 대상 호스트 설정에 맞는 GitHub 클라이언트를 생성한다.
pub struct HostingFactoryAdapter;

impl HostingFactory for HostingFactoryAdapter {
    fn build(
        &self,
        target: &RepoTarget,
        host_cfg: Option<&HostConfig>,
        token: Option<String>,
    ) -> Box<dyn HostingGateway> {
        Box::new(GitHubClient::new(
            target.host.clone(),
            target.owner.clone(),
            target.repo.clone(),
            token,
            host_cfg.and_then(|cfg| cfg.api_base.clone()),
        ))
    }
}
