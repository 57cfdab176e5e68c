//! 적용 설정 진단(inspection) 뷰 모델.

use std::collections::BTreeMap;

use serde::Serialize;

use super::loader::LoadedConfig;
use crate::infrastructure::config::{ChatConfig, DefaultsConfig, HostConfig};

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective_defaults: EffectiveDefaults,
    pub hosts: BTreeMap<String, HostInspection>,
    pub chat: ChatInspection,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub channel: Option<String>,
    pub mention_map_path: String,
    pub urgent_label: String,
    pub skip_draft: bool,
    pub page_size: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct HostInspection {
    pub token_source: Option<String>,
    pub token_resolved: bool,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatInspection {
    pub token_source: Option<String>,
    pub token_resolved: bool,
    pub api_base: Option<String>,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let mut hosts = BTreeMap::new();
        for (host, cfg) in &loaded.config.hosts {
            hosts.insert(host.clone(), host_inspection(cfg));
        }

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: loaded.config.defaults.clone(),
            effective_defaults: EffectiveDefaults {
                channel: loaded.config.channel().map(ToString::to_string),
                mention_map_path: loaded.config.mention_map_path().to_string(),
                urgent_label: loaded.config.urgent_label().to_string(),
                skip_draft: loaded.config.skip_draft(),
                page_size: loaded.config.page_size(),
            },
            hosts,
            chat: chat_inspection(&loaded.config.chat),
        }
    }
}

fn host_inspection(cfg: &HostConfig) -> HostInspection {
    HostInspection {
        token_source: cfg.token_source_label(),
        token_resolved: cfg.resolve_token().is_some(),
        api_base: cfg.api_base.clone(),
    }
}

fn chat_inspection(cfg: &ChatConfig) -> ChatInspection {
    ChatInspection {
        token_source: cfg.token_source_label(),
        token_resolved: cfg.resolve_token().is_some(),
        api_base: cfg.api_base.clone(),
    }
}
