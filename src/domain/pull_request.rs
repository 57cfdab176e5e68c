//! 알림 도메인 엔티티/값 객체.

use crate::domain::identity::MentionToken;

/// 알림 전달 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// 공유 채널 한 곳에 전체 목록을 브로드캐스트한다.
    Channel,
    /// 리뷰어마다 본인 담당 PR만 담은 DM을 보낸다.
    DirectMessage,
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub url: String,
    pub topology: Topology,
    pub channel: Option<String>,
    pub include_drafts: bool,
    pub dry_run: bool,
}

/// 호스팅 API에서 가져온 열린 PR. 한 번의 실행 안에서는 불변이다.
#[derive(Debug, Clone)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub draft: bool,
    pub labels: Vec<String>,
    pub requested_reviewers: Vec<String>,
}

/// 멘션 해석까지 끝난, 렌더링 직전 단계의 PR 항목.
#[derive(Debug, Clone)]
pub struct PrEntry {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub labels: Vec<String>,
    pub mentions: Vec<MentionToken>,
    pub requested_count: usize,
}

impl PrEntry {
    /// 지정된 긴급 라벨을 달고 있는지 판정한다(대소문자 구분, 정확 일치).
    pub fn is_urgent(&self, urgent_label: &str) -> bool {
        self.labels.iter().any(|name| name == urgent_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_with_labels(labels: &[&str]) -> PrEntry {
        PrEntry {
            number: 1,
            title: "t".to_string(),
            url: "https://github.com/acme/widgets/pull/1".to_string(),
            labels: labels.iter().map(ToString::to_string).collect(),
            mentions: Vec::new(),
            requested_count: 0,
        }
    }

    #[test]
    fn urgent_requires_exact_label_match() {
        assert!(entry_with_labels(&["D-0"]).is_urgent("D-0"));
        assert!(!entry_with_labels(&["d-0"]).is_urgent("D-0"));
        assert!(!entry_with_labels(&["D-1", "bug"]).is_urgent("D-0"));
        assert!(!entry_with_labels(&[]).is_urgent("D-0"));
    }
}
