//! 유스케이스 전체 흐름을 가짜 게이트웨이로 검증하는 통합 테스트.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use prnudge::application::ports::{
    ChatFactory, ChatGateway, ConfigRepository, HostingFactory, HostingGateway, MentionMapSource,
    Reporter,
};
use prnudge::application::usecases::notify::NotifyUseCase;
use prnudge::domain::blocks::MessageBlock;
use prnudge::domain::identity::MentionMap;
use prnudge::domain::pull_request::{PullRequest, RunOptions, Topology};
use prnudge::domain::repo::RepoTarget;
use prnudge::domain::tone::ToneDice;
use prnudge::infrastructure::adapters::UrlTargetResolver;
use prnudge::infrastructure::config::Config;

const REPO_URL: &str = "https://github.com/acme/widgets";

// ---- 가짜 포트 구현 ----

struct FakeConfigRepo(Config);

impl ConfigRepository for FakeConfigRepo {
    fn load(&self) -> Result<Config> {
        Ok(self.0.clone())
    }

    fn inspect_pretty_json(&self) -> Result<String> {
        Ok("{}".to_string())
    }
}

#[derive(Default)]
struct HostingState {
    pages: Vec<Vec<PullRequest>>,
    reviewers: HashMap<u64, Vec<String>>,
    emails: HashMap<String, Option<String>>,
    fail_list: bool,
    fail_reviewers: bool,
    list_calls: Mutex<u32>,
}

struct FakeHosting(Arc<HostingState>);

#[async_trait]
impl HostingGateway for FakeHosting {
    async fn list_open_pulls(&self, page: u32, _per_page: u32) -> Result<Vec<PullRequest>> {
        *self.0.list_calls.lock().unwrap() += 1;
        if self.0.fail_list {
            anyhow::bail!("simulated hosting error: failed to list open PRs");
        }
        Ok(self
            .0
            .pages
            .get((page - 1) as usize)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_requested_reviewers(&self, number: u64) -> Result<Vec<String>> {
        if self.0.fail_reviewers {
            anyhow::bail!("simulated hosting error: failed to fetch reviewers of #{number}");
        }
        Ok(self.0.reviewers.get(&number).cloned().unwrap_or_default())
    }

    async fn fetch_user_email(&self, login: &str) -> Result<Option<String>> {
        Ok(self.0.emails.get(login).cloned().unwrap_or(None))
    }
}

struct FakeHostingFactory(Arc<HostingState>);

impl HostingFactory for FakeHostingFactory {
    fn build(
        &self,
        _target: &RepoTarget,
        _host_cfg: Option<&prnudge::infrastructure::config::HostConfig>,
        _token: Option<String>,
    ) -> Box<dyn HostingGateway> {
        Box::new(FakeHosting(self.0.clone()))
    }
}

#[derive(Default)]
struct ChatState {
    fail_destinations: Vec<String>,
    attempts: Mutex<Vec<String>>,
    posts: Mutex<Vec<(String, String, Vec<MessageBlock>)>>,
}

struct FakeChat(Arc<ChatState>);

#[async_trait]
impl ChatGateway for FakeChat {
    async fn post_message(
        &self,
        destination: &str,
        fallback: &str,
        blocks: &[MessageBlock],
    ) -> Result<()> {
        self.0.attempts.lock().unwrap().push(destination.to_string());
        if self.0.fail_destinations.iter().any(|d| d == destination) {
            anyhow::bail!("simulated delivery failure (destination={destination})");
        }
        self.0.posts.lock().unwrap().push((
            destination.to_string(),
            fallback.to_string(),
            blocks.to_vec(),
        ));
        Ok(())
    }
}

struct FakeChatFactory(Arc<ChatState>);

impl ChatFactory for FakeChatFactory {
    fn build(
        &self,
        _chat_cfg: &prnudge::infrastructure::config::ChatConfig,
        _token: String,
    ) -> Box<dyn ChatGateway> {
        Box::new(FakeChat(self.0.clone()))
    }
}

struct FakeMapSource(MentionMap);

impl MentionMapSource for FakeMapSource {
    fn load(&self, _path: &str) -> MentionMap {
        self.0.clone()
    }
}

/// 항상 같은 인덱스를 돌려주는 고정 주사위.
struct FixedDice(usize);

impl ToneDice for FixedDice {
    fn roll(&self, upper: usize) -> usize {
        self.0 % upper
    }
}

struct SilentReporter;

impl Reporter for SilentReporter {
    fn section(&self, _name: &str) {}
    fn kv(&self, _key: &str, _value: &str) {}
    fn status(&self, _scope: &str, _message: &str) {}
    fn raw(&self, _line: &str) {}
}

// ---- 헬퍼 ----

fn pr(number: u64, title: &str, labels: &[&str], reviewers: &[&str]) -> PullRequest {
    PullRequest {
        number,
        title: title.to_string(),
        url: format!("https://github.com/acme/widgets/pull/{number}"),
        draft: false,
        labels: labels.iter().map(ToString::to_string).collect(),
        requested_reviewers: reviewers.iter().map(ToString::to_string).collect(),
    }
}

fn base_config() -> Config {
    let mut config = Config::default();
    config.chat.token = Some("xoxb-test".to_string());
    config.defaults.channel = Some("#code-review".to_string());
    config
}

fn channel_options() -> RunOptions {
    RunOptions {
        url: REPO_URL.to_string(),
        topology: Topology::Channel,
        channel: None,
        include_drafts: false,
        dry_run: false,
    }
}

fn dm_options() -> RunOptions {
    RunOptions {
        topology: Topology::DirectMessage,
        ..channel_options()
    }
}

fn mention_map(pairs: &[(&str, &str)]) -> MentionMap {
    MentionMap::new(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
    )
}

fn section_text(block: &MessageBlock) -> &str {
    match block {
        MessageBlock::Section { text } => &text.text,
        other => panic!("expected section, got {other:?}"),
    }
}

async fn run(
    config: Config,
    hosting: Arc<HostingState>,
    chat: Arc<ChatState>,
    map: MentionMap,
    options: RunOptions,
) -> Result<()> {
    let config_repo = FakeConfigRepo(config);
    let target_resolver = UrlTargetResolver;
    let hosting_factory = FakeHostingFactory(hosting);
    let chat_factory = FakeChatFactory(chat);
    let mention_map_source = FakeMapSource(map);
    let dice = FixedDice(0);
    let reporter = SilentReporter;

    let use_case = NotifyUseCase {
        config_repo: &config_repo,
        target_resolver: &target_resolver,
        hosting_factory: &hosting_factory,
        chat_factory: &chat_factory,
        mention_map_source: &mention_map_source,
        dice: &dice,
        reporter: &reporter,
    };
    use_case.execute(options).await
}

// ---- 테스트 ----

#[tokio::test]
async fn channel_broadcast_end_to_end() {
    let hosting = Arc::new(HostingState {
        pages: vec![vec![
            pr(7, "Add feature", &[], &["bob"]),
            pr(3, "Fix <bug>", &["D-0"], &["alice"]),
        ]],
        ..Default::default()
    });
    let chat = Arc::new(ChatState::default());

    run(
        base_config(),
        hosting,
        chat.clone(),
        mention_map(&[("alice", "U111")]),
        channel_options(),
    )
    .await
    .unwrap();

    let posts = chat.posts.lock().unwrap();
    assert_eq!(posts.len(), 1);
    let (destination, fallback, blocks) = &posts[0];
    assert_eq!(destination, "#code-review");

    // 헤더 폴백: 고정 주사위(0) → 인사말 첫 번째 + 변형 A, 멘션은 최초 등장 순서.
    assert!(fallback.starts_with("좋은 아침이다. 정신 차려라."));
    assert!(fallback.contains("<@U111> <@bob>"));
    assert!(fallback.contains("acme/widgets"));

    // 헤더, #3 섹션, #3 라벨 버튼, #7 섹션, 말미 경고.
    assert_eq!(blocks.len(), 5);

    let pr3 = section_text(&blocks[1]);
    assert!(pr3.contains("<@U111>"));
    assert!(pr3.contains("Fix &lt;bug&gt;"));
    assert!(pr3.contains("🚨"));

    let MessageBlock::Actions { elements } = &blocks[2] else {
        panic!("expected actions block for #3");
    };
    assert_eq!(elements[0].text.text, "D-0");
    assert_eq!(elements[0].style, Some("danger"));

    let pr7 = section_text(&blocks[3]);
    assert!(pr7.contains("<@bob>"));
    assert!(!pr7.contains("🚨"));

    assert!(matches!(&blocks[4], MessageBlock::Context { .. }));
}

#[tokio::test]
async fn pagination_stops_on_the_first_short_page() {
    let full: Vec<PullRequest> = (1..=2).map(|n| pr(n, "t", &[], &[])).collect();
    let hosting = Arc::new(HostingState {
        pages: vec![full.clone(), full, vec![pr(5, "t", &[], &[])]],
        ..Default::default()
    });
    let chat = Arc::new(ChatState::default());

    let mut config = base_config();
    config.defaults.page_size = Some(2);

    run(
        config,
        hosting.clone(),
        chat.clone(),
        MentionMap::default(),
        channel_options(),
    )
    .await
    .unwrap();

    // 2개짜리 두 페이지 + 1개짜리 마지막 페이지 = 정확히 3번 호출.
    assert_eq!(*hosting.list_calls.lock().unwrap(), 3);

    let posts = chat.posts.lock().unwrap();
    let blocks = &posts[0].2;
    // 헤더 + 리뷰어 없는 PR 구분선 + PR 5개 + 말미 경고.
    assert_eq!(blocks.len(), 8);
}

#[tokio::test]
async fn draft_prs_are_dropped_before_aggregation() {
    let mut draft = pr(4, "WIP", &[], &["alice"]);
    draft.draft = true;
    let hosting = Arc::new(HostingState {
        pages: vec![vec![draft, pr(6, "Ready", &[], &["bob"])]],
        ..Default::default()
    });
    let chat = Arc::new(ChatState::default());

    let mut config = base_config();
    config.defaults.skip_draft = Some(true);

    run(
        config,
        hosting,
        chat.clone(),
        MentionMap::default(),
        channel_options(),
    )
    .await
    .unwrap();

    let posts = chat.posts.lock().unwrap();
    let blocks = &posts[0].2;
    assert_eq!(blocks.len(), 3);
    assert!(section_text(&blocks[1]).contains("/pull/6"));
}

#[tokio::test]
async fn empty_pr_set_sends_a_single_nothing_pending_block() {
    let hosting = Arc::new(HostingState::default());
    let chat = Arc::new(ChatState::default());

    run(
        base_config(),
        hosting,
        chat.clone(),
        MentionMap::default(),
        channel_options(),
    )
    .await
    .unwrap();

    let posts = chat.posts.lock().unwrap();
    assert_eq!(posts.len(), 1);
    let blocks = &posts[0].2;
    assert_eq!(blocks.len(), 1);
    assert!(section_text(&blocks[0]).contains("리뷰할 PR이 없다"));
}

#[tokio::test]
async fn missing_channel_fails_before_any_network_call() {
    let hosting = Arc::new(HostingState::default());
    let chat = Arc::new(ChatState::default());

    let mut config = base_config();
    config.defaults.channel = None;

    let err = run(
        config,
        hosting.clone(),
        chat,
        MentionMap::default(),
        channel_options(),
    )
    .await
    .unwrap_err();

    assert!(format!("{err:#}").contains("no destination channel"));
    assert_eq!(*hosting.list_calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn hosting_fetch_failure_aborts_the_whole_run() {
    let hosting = Arc::new(HostingState {
        fail_list: true,
        ..Default::default()
    });
    let chat = Arc::new(ChatState::default());

    let err = run(
        base_config(),
        hosting,
        chat.clone(),
        MentionMap::default(),
        channel_options(),
    )
    .await
    .unwrap_err();

    assert!(format!("{err:#}").contains("failed to list open PRs"));
    // 조회가 실패하면 발송 시도조차 없어야 한다.
    assert!(chat.attempts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn reviewer_fetch_failure_aborts_dm_run_before_any_delivery() {
    let hosting = Arc::new(HostingState {
        pages: vec![vec![pr(3, "Fix", &[], &["alice"])]],
        emails: HashMap::from([(
            "alice".to_string(),
            Some("alice@corp.example".to_string()),
        )]),
        fail_reviewers: true,
        ..Default::default()
    });
    let chat = Arc::new(ChatState::default());

    let err = run(
        base_config(),
        hosting,
        chat.clone(),
        MentionMap::default(),
        dm_options(),
    )
    .await
    .unwrap_err();

    assert!(format!("{err:#}").contains("failed to fetch reviewers of #3"));
    assert!(chat.attempts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn dm_targets_are_deduped_and_unreachable_reviewers_skipped() {
    let hosting = Arc::new(HostingState {
        pages: vec![vec![
            pr(3, "Fix", &[], &["alice", "carol"]),
            pr(7, "Add", &[], &["alice"]),
        ]],
        reviewers: HashMap::from([
            (3, vec!["alice".to_string(), "carol".to_string()]),
            (7, vec!["alice".to_string()]),
        ]),
        emails: HashMap::from([
            ("alice".to_string(), Some("alice@corp.example".to_string())),
            ("carol".to_string(), None),
        ]),
        ..Default::default()
    });
    let chat = Arc::new(ChatState::default());

    run(
        base_config(),
        hosting,
        chat.clone(),
        MentionMap::default(),
        dm_options(),
    )
    .await
    .unwrap();

    let posts = chat.posts.lock().unwrap();
    // carol은 이메일이 없어 제외, alice는 한 번만 받는다.
    assert_eq!(posts.len(), 1);
    let (destination, _, blocks) = &posts[0];
    assert_eq!(destination, "@alice");

    let pr_lines: Vec<&str> = blocks
        .iter()
        .filter_map(|b| match b {
            MessageBlock::Section { text } if text.text.starts_with("• ") => {
                Some(text.text.as_str())
            }
            _ => None,
        })
        .collect();
    assert_eq!(pr_lines.len(), 2);
    assert!(pr_lines[0].contains("/pull/3"));
    assert!(pr_lines[1].contains("/pull/7"));
}

#[tokio::test]
async fn dm_delivery_failure_does_not_block_other_targets() {
    let hosting = Arc::new(HostingState {
        pages: vec![vec![pr(3, "Fix", &[], &["alice"]), pr(7, "Add", &[], &["bob"])]],
        reviewers: HashMap::from([
            (3, vec!["alice".to_string()]),
            (7, vec!["bob".to_string()]),
        ]),
        emails: HashMap::from([
            ("alice".to_string(), Some("alice@corp.example".to_string())),
            ("bob".to_string(), Some("bob@corp.example".to_string())),
        ]),
        ..Default::default()
    });
    let chat = Arc::new(ChatState {
        fail_destinations: vec!["@alice".to_string()],
        ..Default::default()
    });

    // 한 대상의 실패가 전체 실행을 실패시키지 않는다.
    run(
        base_config(),
        hosting,
        chat.clone(),
        MentionMap::default(),
        dm_options(),
    )
    .await
    .unwrap();

    assert_eq!(chat.attempts.lock().unwrap().len(), 2);
    let posts = chat.posts.lock().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].0, "@bob");
}
