//! 채팅 게이트웨이 팩토리 포트 구현 어댑터.

use crate::application::ports::{ChatFactory, ChatGateway};
use crate::infrastructure::chat::SlackClient;
use crate::infrastructure::config::ChatConfig;

/// 채팅 설정에 맞는 Slack 클라이언트를 생성한다.
pub struct ChatFactoryAdapter;

impl ChatFactory for ChatFactoryAdapter {
    fn build(&self, chat_cfg: &ChatConfig, token: String) -> Box<dyn ChatGateway> {
        Box::new(SlackClient::new(token, chat_cfg.api_base.clone()))
    }
}
