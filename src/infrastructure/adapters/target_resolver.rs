//! URL 해석 포트 구현 어댑터.

use anyhow::Result;

use crate::application::ports::TargetResolver;
use crate::domain::repo::RepoTarget;

/// 리포 URL 문자열을 도메인 대상으로 변환하는 어댑터.
pub struct UrlTargetResolver;

impl TargetResolver for UrlTargetResolver {
    fn parse(&self, input: &str) -> Result<RepoTarget> {
        RepoTarget::parse(input)
    }
}
