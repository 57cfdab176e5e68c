//! 멘션 매핑 파일 로딩 포트 구현 어댑터.

use std::collections::BTreeMap;
use std::fs;

use tracing::warn;

use crate::application::ports::MentionMapSource;
use crate::domain::identity::MentionMap;

/// JSON 파일(`{ "login": "U111", ... }`)에서 매핑을 읽는 어댑터.
/// 파일이 없거나 깨져 있으면 빈 매핑으로 강등하고 경고만 남긴다.
pub struct FileMentionMapSource;

impl MentionMapSource for FileMentionMapSource {
    fn load(&self, path: &str) -> MentionMap {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(path, "mention map not found, using empty mapping: {err}");
                return MentionMap::default();
            }
        };

        match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
            Ok(entries) => MentionMap::new(entries),
            Err(err) => {
                warn!(path, "mention map is invalid JSON, using empty mapping: {err}");
                MentionMap::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_degrades_to_empty_map() {
        let map = FileMentionMapSource.load("/nonexistent/slack-map.json");
        assert!(map.is_empty());
        assert_eq!(map.resolve("alice").as_str(), "<@alice>");
    }

    #[test]
    fn malformed_file_degrades_to_empty_map() {
        let path = std::env::temp_dir().join("prnudge-broken-slack-map.json");
        fs::write(&path, "{ this is not json").unwrap();

        let map = FileMentionMapSource.load(&path.to_string_lossy());
        assert!(map.is_empty());
        assert_eq!(map.resolve("alice").as_str(), "<@alice>");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn valid_file_is_loaded() {
        let path = std::env::temp_dir().join("prnudge-valid-slack-map.json");
        fs::write(&path, r#"{ "alice": "U111" }"#).unwrap();

        let map = FileMentionMapSource.load(&path.to_string_lossy());
        assert_eq!(map.len(), 1);
        assert_eq!(map.resolve("alice").as_str(), "<@U111>");

        let _ = fs::remove_file(&path);
    }
}
