//! 리뷰어 로그인을 전달 가능한 멘션/DM 식별자로 해석하는 모듈.

use std::collections::BTreeMap;

/// 채팅 시스템 멘션 마크업 조각(`<@U111>` 또는 `<@login>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MentionToken(String);

impl MentionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MentionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// login → 채팅 사용자 ID 매핑 테이블.
/// 실행 시작 시 한 번 로딩되어 실행이 끝날 때까지만 산다.
#[derive(Debug, Clone, Default)]
pub struct MentionMap {
    entries: BTreeMap<String, String>,
}

impl MentionMap {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 매핑이 있으면 채팅 ID, 없으면 로그인 그대로 멘션으로 감싼다.
    /// 미등록 로그인도 항상 토큰을 얻는다. 해석은 실패하지 않는다.
    pub fn resolve(&self, login: &str) -> MentionToken {
        match self.entries.get(login) {
            Some(chat_id) => MentionToken(format!("<@{chat_id}>")),
            None => MentionToken(format!("<@{login}>")),
        }
    }
}

/// DM 토폴로지에서 한 리뷰어를 식별하는 값.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectIdentity {
    /// 대상 중복 제거 키(이메일 전체).
    pub key: String,
    /// DM 발송 핸들(이메일 로컬 파트).
    pub handle: String,
}

/// 프로필 이메일에서 DM 식별자를 만든다.
/// 이메일이 없으면 해당 리뷰어는 도달 불가로 보고, 호출 측이 건너뛰고 경고를 남긴다.
pub fn direct_identity(email: Option<&str>) -> Option<DirectIdentity> {
    let email = email?.trim();
    if email.is_empty() {
        return None;
    }
    let local = email.split('@').next()?;
    if local.is_empty() {
        return None;
    }
    Some(DirectIdentity {
        key: email.to_string(),
        handle: local.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> MentionMap {
        MentionMap::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn mapped_login_uses_chat_id() {
        let map = map(&[("alice", "U111")]);
        assert_eq!(map.resolve("alice").as_str(), "<@U111>");
    }

    #[test]
    fn unmapped_login_falls_back_to_raw_login() {
        let map = map(&[("alice", "U111")]);
        assert_eq!(map.resolve("bob").as_str(), "<@bob>");
    }

    #[test]
    fn empty_map_still_resolves() {
        assert_eq!(MentionMap::default().resolve("carol").as_str(), "<@carol>");
    }

    #[test]
    fn direct_identity_takes_email_local_part() {
        let identity = direct_identity(Some("alice@corp.example")).unwrap();
        assert_eq!(identity.key, "alice@corp.example");
        assert_eq!(identity.handle, "alice");
    }

    #[test]
    fn missing_or_blank_email_is_unreachable() {
        assert_eq!(direct_identity(None), None);
        assert_eq!(direct_identity(Some("")), None);
        assert_eq!(direct_identity(Some("   ")), None);
    }
}
