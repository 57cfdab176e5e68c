//! Slack Block Kit 형태의 메시지 블록 모델과 렌더러.

use serde::Serialize;

use crate::domain::aggregate::{ChannelDigest, UserDigest, mention_line};
use crate::domain::pull_request::PrEntry;

const EMPTY_STATE_TEXT: &str = "✅ 지금은 리뷰할 PR이 없다. 방심하지 마라. 곧 또 생길 거다.";
const URGENT_MARKER: &str = " 🚨 *긴급 PR이다. 지금 처리해라.*";
const REVIEWERLESS_DIVIDER: &str = "리뷰어가 지정되지 않은 PR이다. 담당자를 정해서 움직여라.";
const TRAILING_ADVISORY: &str =
    "⚠️ 리뷰를 미루면 머지와 릴리스가 늦어진다. 쓸데없는 변명 말고, 당장 피드백해라.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageBlock {
    Section { text: MrkdwnText },
    Actions { elements: Vec<LabelButton> },
    Context { elements: Vec<MrkdwnText> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MrkdwnText {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

impl MrkdwnText {
    fn new(text: impl Into<String>) -> Self {
        Self {
            kind: "mrkdwn",
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelButton {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: PlainText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlainText {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
    pub emoji: bool,
}

/// 제목을 마크업에 끼워 넣기 전에 `<`/`>`를 이스케이프한다.
/// PR 제목이 링크/마크업을 깨뜨리지 못하게 막는다.
pub fn escape_text(raw: &str) -> String {
    raw.replace('<', "&lt;").replace('>', "&gt;")
}

/// 채널 브로드캐스트 블록 시퀀스.
/// 비어 있으면 "리뷰할 PR 없음" 블록 하나만 낸다.
pub fn render_channel(digest: &ChannelDigest, header: &str, urgent_label: &str) -> Vec<MessageBlock> {
    render_listing(header, &digest.pending, &digest.remaining, urgent_label)
}

/// 개인 DM 블록 시퀀스. 해당 사용자 담당 PR만 나열한다.
pub fn render_user(digest: &UserDigest, header: &str, urgent_label: &str) -> Vec<MessageBlock> {
    render_listing(header, &digest.prs, &[], urgent_label)
}

fn render_listing(
    header: &str,
    pending: &[PrEntry],
    reviewerless: &[PrEntry],
    urgent_label: &str,
) -> Vec<MessageBlock> {
    if pending.is_empty() && reviewerless.is_empty() {
        return vec![MessageBlock::Section {
            text: MrkdwnText::new(EMPTY_STATE_TEXT),
        }];
    }

    let mut blocks = vec![MessageBlock::Section {
        text: MrkdwnText::new(header),
    }];

    for entry in pending {
        push_pr_blocks(&mut blocks, entry, urgent_label);
    }

    if !reviewerless.is_empty() {
        blocks.push(MessageBlock::Section {
            text: MrkdwnText::new(REVIEWERLESS_DIVIDER),
        });
        for entry in reviewerless {
            push_pr_blocks(&mut blocks, entry, urgent_label);
        }
    }

    blocks.push(MessageBlock::Context {
        elements: vec![MrkdwnText::new(TRAILING_ADVISORY)],
    });

    blocks
}

fn push_pr_blocks(blocks: &mut Vec<MessageBlock>, entry: &PrEntry, urgent_label: &str) {
    let mut line = String::from("• ");
    let mentions = mention_line(&entry.mentions);
    if !mentions.is_empty() {
        line.push_str(&mentions);
        line.push(' ');
    }
    line.push_str(&format!("<{}|{}>", entry.url, escape_text(&entry.title)));
    if entry.is_urgent(urgent_label) {
        line.push_str(URGENT_MARKER);
    }

    blocks.push(MessageBlock::Section {
        text: MrkdwnText::new(line),
    });

    if !entry.labels.is_empty() {
        let elements = entry
            .labels
            .iter()
            .map(|name| LabelButton {
                kind: "button",
                text: PlainText {
                    kind: "plain_text",
                    text: name.clone(),
                    emoji: true,
                },
                style: (name == urgent_label).then_some("danger"),
            })
            .collect();
        blocks.push(MessageBlock::Actions { elements });
    }
}
