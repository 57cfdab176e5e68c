//! 리뷰어 팬아웃 단계(PR→멘션, 리뷰어→PR 연관 구성).

use std::collections::HashMap;

use anyhow::Result;
use tracing::warn;

use crate::application::ports::HostingGateway;
use crate::application::usecases::notify::NotifyUseCase;
use crate::domain::aggregate::{UserDigest, register_user_pr};
use crate::domain::identity::{MentionMap, direct_identity};
use crate::domain::pull_request::{PrEntry, PullRequest};

/// 채널 모드: 목록 페이로드에 실려 온 요청 리뷰어를 그 자리에서 멘션으로 해석한다.
pub(super) fn channel_entries(prs: &[PullRequest], map: &MentionMap) -> Vec<PrEntry> {
    prs.iter()
        .map(|pr| PrEntry {
            number: pr.number,
            title: pr.title.clone(),
            url: pr.url.clone(),
            labels: pr.labels.clone(),
            mentions: pr
                .requested_reviewers
                .iter()
                .map(|login| map.resolve(login))
                .collect(),
            requested_count: pr.requested_reviewers.len(),
        })
        .collect()
}

/// DM 모드: PR마다 전용 호출로 리뷰어를 조회하고, 해석된 이메일 키로
/// 사용자 대상을 만들어 PR을 등록한다. 이메일이 없는 리뷰어는 경고 후 제외.
/// 프로필 이메일 캐시는 이 함수가 소유하며 실행이 끝나면 버려진다.
pub(super) async fn direct_digests(
    use_case: &NotifyUseCase<'_>,
    hosting: &dyn HostingGateway,
    prs: &[PullRequest],
) -> Result<Vec<UserDigest>> {
    use_case.reporter.section("Fan-out");

    let mut email_cache: HashMap<String, Option<String>> = HashMap::new();
    let mut digests: Vec<UserDigest> = Vec::new();

    // 번호 오름차순으로 순차 조회한다. 네트워크 호출은 겹치지 않는다.
    let mut ordered: Vec<&PullRequest> = prs.iter().collect();
    ordered.sort_by_key(|pr| pr.number);

    for pr in ordered {
        let reviewers = hosting.fetch_requested_reviewers(pr.number).await?;
        for login in &reviewers {
            let email = match email_cache.get(login) {
                Some(cached) => cached.clone(),
                None => {
                    let fetched = hosting.fetch_user_email(login).await?;
                    email_cache.insert(login.clone(), fetched.clone());
                    fetched
                }
            };

            let Some(identity) = direct_identity(email.as_deref()) else {
                warn!(%login, "no public email for reviewer; skipping direct message");
                continue;
            };

            register_user_pr(&mut digests, identity, direct_entry(pr, reviewers.len()));
        }
    }

    use_case.reporter.kv("Recipients", &digests.len().to_string());
    Ok(digests)
}

fn direct_entry(pr: &PullRequest, reviewer_count: usize) -> PrEntry {
    PrEntry {
        number: pr.number,
        title: pr.title.clone(),
        url: pr.url.clone(),
        labels: pr.labels.clone(),
        // DM 본문은 수신자 본인에게 가므로 멘션을 싣지 않는다.
        mentions: Vec::new(),
        requested_count: reviewer_count,
    }
}
