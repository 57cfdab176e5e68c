//! 설정 스키마와 병합/해석 규칙.

use std::collections::HashMap;
use std::env;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const DEFAULT_URGENT_LABEL: &str = "D-0";
pub const DEFAULT_MENTION_MAP_PATH: &str = ".github/slack-map.json";
pub const DEFAULT_CHAT_TOKEN_ENV: &str = "SLACK_BOT_TOKEN";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// VCS 호스트별 인증/엔드포인트 설정
    #[serde(default)]
    pub hosts: HashMap<String, HostConfig>,
    /// 채팅(Slack) API 설정
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 브로드캐스트 대상 채널 ID(또는 `#channel-name`)
    pub channel: Option<String>,
    /// login→채팅 ID 매핑 JSON 파일 경로
    pub mention_map_path: Option<String>,
    /// 긴급 PR로 분류하는 라벨 이름
    pub urgent_label: Option<String>,
    /// draft PR 제외 여부
    pub skip_draft: Option<bool>,
    /// 목록 조회 페이지 크기
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct HostConfig {
    pub token: Option<String>,
    pub token_env: Option<String>,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ChatConfig {
    pub token: Option<String>,
    pub token_env: Option<String>,
    pub api_base: Option<String>,
}

impl Config {
    pub fn channel(&self) -> Option<&str> {
        self.defaults.channel.as_deref()
    }

    pub fn mention_map_path(&self) -> &str {
        self.defaults
            .mention_map_path
            .as_deref()
            .unwrap_or(DEFAULT_MENTION_MAP_PATH)
    }

    pub fn urgent_label(&self) -> &str {
        self.defaults
            .urgent_label
            .as_deref()
            .unwrap_or(DEFAULT_URGENT_LABEL)
    }

    pub fn skip_draft(&self) -> bool {
        self.defaults.skip_draft.unwrap_or(false)
    }

    pub fn page_size(&self) -> u32 {
        self.defaults.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn host_config(&self, host: &str) -> Option<&HostConfig> {
        self.hosts.get(host)
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub(crate) fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);

        for (host, incoming) in other.hosts {
            if let Some(existing) = self.hosts.get_mut(&host) {
                existing.merge_from(incoming);
            } else {
                self.hosts.insert(host, incoming);
            }
        }

        self.chat.merge_from(other.chat);
    }
}

impl DefaultsConfig {
    pub(crate) fn merge_from(&mut self, other: DefaultsConfig) {
        if other.channel.is_some() {
            self.channel = other.channel;
        }
        if other.mention_map_path.is_some() {
            self.mention_map_path = other.mention_map_path;
        }
        if other.urgent_label.is_some() {
            self.urgent_label = other.urgent_label;
        }
        if other.skip_draft.is_some() {
            self.skip_draft = other.skip_draft;
        }
        if other.page_size.is_some() {
            self.page_size = other.page_size;
        }
    }
}

impl HostConfig {
    /// host 토큰은 `token` 우선, 없으면 `token_env`를 조회한다.
    pub fn resolve_token(&self) -> Option<String> {
        if let Some(token) = &self.token {
            return Some(token.clone());
        }
        let env_name = self.token_env.as_ref()?;
        env::var(env_name).ok().filter(|v| !v.trim().is_empty())
    }

    pub(crate) fn merge_from(&mut self, other: HostConfig) {
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.token_env.is_some() {
            self.token_env = other.token_env;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
    }

    pub(crate) fn token_source_label(&self) -> Option<String> {
        token_source_label(self.token.as_deref(), self.token_env.as_deref())
    }
}

impl ChatConfig {
    /// 채팅 토큰은 `token` 우선, 다음 `token_env`, 마지막으로 기본 환경변수.
    pub fn resolve_token(&self) -> Option<String> {
        if let Some(token) = &self.token {
            return Some(token.clone());
        }
        let env_name = self.token_env.as_deref().unwrap_or(DEFAULT_CHAT_TOKEN_ENV);
        env::var(env_name).ok().filter(|v| !v.trim().is_empty())
    }

    pub(crate) fn merge_from(&mut self, other: ChatConfig) {
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.token_env.is_some() {
            self.token_env = other.token_env;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
    }

    pub(crate) fn token_source_label(&self) -> Option<String> {
        token_source_label(
            self.token.as_deref(),
            Some(self.token_env.as_deref().unwrap_or(DEFAULT_CHAT_TOKEN_ENV)),
        )
    }
}

fn token_source_label(token: Option<&str>, token_env: Option<&str>) -> Option<String> {
    if token.is_some() {
        return Some("inline".to_string());
    }
    let env_name = token_env?;
    if env::var(env_name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .is_some()
    {
        Some(format!("env:{env_name}"))
    } else {
        Some(format!("env:{env_name} (missing)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_values_override_earlier_ones() {
        let mut base: Config = serde_json::from_str(
            r##"{ "defaults": { "channel": "#old", "skip_draft": true } }"##,
        )
        .unwrap();
        let overlay: Config =
            serde_json::from_str(r##"{ "defaults": { "channel": "#new" } }"##).unwrap();

        base.merge_from(overlay);
        assert_eq!(base.channel(), Some("#new"));
        assert!(base.skip_draft());
    }

    #[test]
    fn accessors_fall_back_to_defaults() {
        let config = Config::default();
        assert_eq!(config.channel(), None);
        assert_eq!(config.mention_map_path(), DEFAULT_MENTION_MAP_PATH);
        assert_eq!(config.urgent_label(), DEFAULT_URGENT_LABEL);
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
        assert!(!config.skip_draft());
    }

    #[test]
    fn host_sections_merge_per_host() {
        let mut base: Config = serde_json::from_str(
            r#"{ "hosts": { "github.com": { "token_env": "GITHUB_TOKEN" } } }"#,
        )
        .unwrap();
        let overlay: Config = serde_json::from_str(
            r#"{ "hosts": { "github.com": { "api_base": "https://ghe.example/api/v3" } } }"#,
        )
        .unwrap();

        base.merge_from(overlay);
        let host = base.host_config("github.com").unwrap();
        assert_eq!(host.token_env.as_deref(), Some("GITHUB_TOKEN"));
        assert_eq!(host.api_base.as_deref(), Some("https://ghe.example/api/v3"));
    }
}
