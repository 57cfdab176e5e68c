//! 리뷰 알림 실행의 전체 오케스트레이션 유스케이스.

mod deliver;
mod fanout;
mod fetch;

use anyhow::{Context, Result};

use crate::application::ports::{
    ChatFactory, ChatGateway, ConfigRepository, HostingFactory, MentionMapSource, Reporter,
    TargetResolver,
};
use crate::domain::aggregate::ChannelDigest;
use crate::domain::pull_request::{RunOptions, Topology};
use crate::domain::tone::ToneDice;
use crate::infrastructure::config::HostConfig;

/// 전달 계획. 토폴로지별 필수 입력은 네트워크 호출 전에 확정한다.
enum DeliveryPlan {
    Channel { destination: String },
    Direct,
}

/// 설정 로딩부터 PR 수집, 집계, 렌더링, 발송까지 전체 흐름을 조율한다.
pub struct NotifyUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub target_resolver: &'a dyn TargetResolver,
    pub hosting_factory: &'a dyn HostingFactory,
    pub chat_factory: &'a dyn ChatFactory,
    pub mention_map_source: &'a dyn MentionMapSource,
    pub dice: &'a dyn ToneDice,
    pub reporter: &'a dyn Reporter,
}

impl NotifyUseCase<'_> {
    /// 알림 실행 진입점.
    /// 채널 모드 실패는 전체를 중단시키고, DM 모드 발송 실패는 대상별로 격리된다.
    pub async fn execute(&self, options: RunOptions) -> Result<()> {
        self.reporter.section("Session");
        self.reporter.kv("Target", &options.url);
        self.reporter.kv(
            "Topology",
            match options.topology {
                Topology::Channel => "channel",
                Topology::DirectMessage => "dm",
            },
        );
        self.reporter.kv(
            "Mode",
            if options.dry_run {
                "dry-run"
            } else {
                "post-message"
            },
        );

        let config = self.config_repo.load()?;
        let target = self.target_resolver.parse(&options.url)?;

        let plan = match options.topology {
            Topology::Channel => DeliveryPlan::Channel {
                destination: options
                    .channel
                    .clone()
                    .or_else(|| config.channel().map(ToString::to_string))
                    .context(
                        "no destination channel: set defaults.channel in config or pass --channel",
                    )?,
            },
            Topology::DirectMessage => DeliveryPlan::Direct,
        };

        let chat: Option<Box<dyn ChatGateway>> = if options.dry_run {
            None
        } else {
            let token = config
                .chat
                .resolve_token()
                .context("chat token is not configured (set chat.token or the token env var)")?;
            Some(self.chat_factory.build(&config.chat, token))
        };

        let host_cfg = config.host_config(&target.host);
        let host_token = host_cfg.and_then(HostConfig::resolve_token);
        let hosting = self.hosting_factory.build(&target, host_cfg, host_token);

        let skip_draft = config.skip_draft() && !options.include_drafts;
        let prs =
            fetch::fetch_open_pulls(self, hosting.as_ref(), config.page_size(), skip_draft).await?;

        match plan {
            DeliveryPlan::Channel { destination } => {
                let map = self.mention_map_source.load(config.mention_map_path());
                self.reporter.kv("Mention Map", &map.len().to_string());

                let digest = ChannelDigest::build(fanout::channel_entries(&prs, &map));
                deliver::deliver_channel(
                    self,
                    &options,
                    &config,
                    &target,
                    chat.as_deref(),
                    &destination,
                    digest,
                )
                .await
            }
            DeliveryPlan::Direct => {
                let digests = fanout::direct_digests(self, hosting.as_ref(), &prs).await?;
                deliver::deliver_direct(self, &options, &config, &target, chat.as_deref(), digests)
                    .await
            }
        }
    }
}
