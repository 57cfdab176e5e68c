//! 전달 대상별 집계 규칙(멘션 중복 제거, pending/remaining 분할).

use crate::domain::identity::{DirectIdentity, MentionToken};
use crate::domain::pull_request::PrEntry;

/// 채널 토폴로지 집계. 리뷰어 대기 여부로 PR을 두 묶음으로 나눈다.
#[derive(Debug, Clone, Default)]
pub struct ChannelDigest {
    /// 요청된 리뷰어가 한 명 이상 남은 PR.
    pub pending: Vec<PrEntry>,
    /// 리뷰어가 지정되지 않은 나머지 PR.
    pub remaining: Vec<PrEntry>,
}

impl ChannelDigest {
    /// PR 번호 오름차순으로 정렬한 뒤 분할한다.
    /// 두 묶음은 서로 겹치지 않고 전체를 빠짐없이 덮는다.
    pub fn build(mut entries: Vec<PrEntry>) -> Self {
        entries.sort_by_key(|entry| entry.number);
        let (pending, remaining) = entries
            .into_iter()
            .partition(|entry| entry.requested_count > 0);
        Self { pending, remaining }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.remaining.is_empty()
    }

    pub fn total(&self) -> usize {
        self.pending.len() + self.remaining.len()
    }

    /// 멘션 집계용으로 두 묶음을 합쳐 순회한다.
    pub fn all_entries(&self) -> impl Iterator<Item = &PrEntry> {
        self.pending.iter().chain(self.remaining.iter())
    }
}

/// DM 토폴로지 집계. 해석된 이메일 키로 사용자 한 명을 식별한다.
#[derive(Debug, Clone)]
pub struct UserDigest {
    pub identity: DirectIdentity,
    pub prs: Vec<PrEntry>,
}

/// PR을 사용자 대상에 등록한다. 같은 키의 대상은 최초 한 번만 생성되고,
/// 같은 PR이 같은 사용자에게 두 번 들어가지 않는다. 대상 순서는 최초 등장 순서다.
pub fn register_user_pr(digests: &mut Vec<UserDigest>, identity: DirectIdentity, entry: PrEntry) {
    if let Some(digest) = digests.iter_mut().find(|d| d.identity.key == identity.key) {
        if !digest.prs.iter().any(|pr| pr.number == entry.number) {
            digest.prs.push(entry);
        }
        return;
    }
    digests.push(UserDigest {
        identity,
        prs: vec![entry],
    });
}

/// 항목들의 멘션을 최초 등장 순서를 보존하며 중복 제거한다.
pub fn dedup_mentions<'a>(entries: impl Iterator<Item = &'a PrEntry>) -> Vec<MentionToken> {
    let mut out: Vec<MentionToken> = Vec::new();
    for entry in entries {
        for mention in &entry.mentions {
            if !out.contains(mention) {
                out.push(mention.clone());
            }
        }
    }
    out
}

/// 멘션 토큰들을 공백으로 이어 붙인 헤더용 문자열.
pub fn mention_line(mentions: &[MentionToken]) -> String {
    mentions
        .iter()
        .map(MentionToken::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
