//! 열린 PR 수집 단계(페이지 순회 + draft 필터).

use anyhow::Result;

use crate::application::ports::HostingGateway;
use crate::application::usecases::notify::NotifyUseCase;
use crate::domain::pull_request::PullRequest;

/// 목록 페이지가 꽉 차 있는 동안 다음 페이지를 요청하고,
/// 짧은(또는 빈) 페이지를 만나면 멈춘다. 호출은 순차적이며 겹치지 않는다.
/// 조회 실패는 즉시 전체 실행을 중단시킨다.
pub(super) async fn fetch_open_pulls(
    use_case: &NotifyUseCase<'_>,
    hosting: &dyn HostingGateway,
    per_page: u32,
    skip_draft: bool,
) -> Result<Vec<PullRequest>> {
    use_case.reporter.section("Fetch");

    let mut prs = Vec::new();
    let mut page = 1u32;
    loop {
        let batch = hosting.list_open_pulls(page, per_page).await?;
        let short_page = (batch.len() as u32) < per_page;
        prs.extend(batch);
        if short_page {
            break;
        }
        page += 1;
    }
    use_case.reporter.kv("Pages", &page.to_string());

    if skip_draft {
        let before = prs.len();
        prs.retain(|pr| !pr.draft);
        let skipped = before - prs.len();
        if skipped > 0 {
            use_case.reporter.kv("Drafts Skipped", &skipped.to_string());
        }
    }

    use_case.reporter.kv("Open PRs", &prs.len().to_string());
    Ok(prs)
}
