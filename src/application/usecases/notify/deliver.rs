//! 렌더링된 블록을 대상별로 발송하는 단계.

use anyhow::{Context, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::error;

use crate::application::ports::ChatGateway;
use crate::application::usecases::notify::NotifyUseCase;
use crate::domain::aggregate::{ChannelDigest, UserDigest, dedup_mentions, mention_line};
use crate::domain::blocks::{MessageBlock, render_channel, render_user};
use crate::domain::pull_request::RunOptions;
use crate::domain::repo::RepoTarget;
use crate::domain::tone::{pick_greeting, pick_header};
use crate::infrastructure::config::Config;

/// 채널 브로드캐스트 한 건을 렌더링해 발송한다. 발송 실패는 치명적이다.
pub(super) async fn deliver_channel(
    use_case: &NotifyUseCase<'_>,
    options: &RunOptions,
    config: &Config,
    target: &RepoTarget,
    chat: Option<&dyn ChatGateway>,
    destination: &str,
    digest: ChannelDigest,
) -> Result<()> {
    let mentions = mention_line(&dedup_mentions(digest.all_entries()));
    let greeting = pick_greeting(use_case.dice);
    let (header_text, variant) = pick_header(&mentions, &target.full_name(), use_case.dice);
    use_case.reporter.kv("Header Variant", variant.key());

    let header = format!("{greeting} {header_text}");
    let blocks = render_channel(&digest, &header, config.urgent_label());

    if options.dry_run {
        use_case.reporter.section("Dry Run: Channel Message");
        use_case.reporter.raw(&serde_json::to_string_pretty(&blocks)?);
        return Ok(());
    }

    let chat = chat.context("internal error: chat gateway missing for non-dry-run")?;
    use_case.reporter.section("Deliver");
    chat.post_message(destination, &header, &blocks).await?;
    use_case.reporter.status(
        "Chat",
        &format!("channel message sent to {destination} ({} PRs)", digest.total()),
    );
    Ok(())
}

/// 수신자별 DM을 동시 발송한다. 한 대상의 실패는 다른 대상 발송을 막지 않고,
/// 모든 발송이 끝난 뒤 대상별로 보고된다.
pub(super) async fn deliver_direct(
    use_case: &NotifyUseCase<'_>,
    options: &RunOptions,
    config: &Config,
    target: &RepoTarget,
    chat: Option<&dyn ChatGateway>,
    digests: Vec<UserDigest>,
) -> Result<()> {
    if digests.is_empty() {
        use_case
            .reporter
            .status("Chat", "no reachable reviewers with pending PRs");
        return Ok(());
    }

    // 문구 선택과 렌더링은 순차, 발송만 동시 진행한다.
    let mut prepared: Vec<(String, String, Vec<MessageBlock>, usize)> = Vec::new();
    for digest in &digests {
        let greeting = pick_greeting(use_case.dice);
        let (header_text, _) = pick_header("", &target.full_name(), use_case.dice);
        let header = format!("{greeting} {header_text}");
        let blocks = render_user(digest, &header, config.urgent_label());
        let destination = format!("@{}", digest.identity.handle);
        prepared.push((destination, header, blocks, digest.prs.len()));
    }

    if options.dry_run {
        use_case.reporter.section("Dry Run: Direct Messages");
        for (destination, _, blocks, _) in &prepared {
            use_case.reporter.raw(&format!("--- {destination} ---"));
            use_case.reporter.raw(&serde_json::to_string_pretty(blocks)?);
        }
        return Ok(());
    }

    let chat = chat.context("internal error: chat gateway missing for non-dry-run")?;
    use_case.reporter.section("Deliver");

    let mut posts = FuturesUnordered::new();
    for (destination, header, blocks, count) in &prepared {
        posts.push(async move {
            let result = chat.post_message(destination, header, blocks).await;
            (destination.as_str(), *count, result)
        });
    }

    let mut delivered = 0usize;
    let mut failed = 0usize;
    while let Some((destination, count, result)) = posts.next().await {
        match result {
            Ok(()) => {
                delivered += 1;
                use_case
                    .reporter
                    .status(destination, &format!("sent ({count} PRs)"));
            }
            Err(err) => {
                failed += 1;
                error!(destination, "direct message delivery failed: {err:#}");
                use_case
                    .reporter
                    .status(destination, &format!("delivery failed: {err:#}"));
            }
        }
    }

    use_case.reporter.status(
        "Chat",
        &format!("direct messages: {delivered} sent, {failed} failed"),
    );
    Ok(())
}
