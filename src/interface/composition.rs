//! 애플리케이션 조립(composition root) 모듈.

use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::notify::NotifyUseCase;
use crate::infrastructure::adapters::{
    ChatFactoryAdapter, ConsoleReporter, FileMentionMapSource, HostingFactoryAdapter,
    JsonConfigRepository, ThreadRngDice, UrlTargetResolver,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    target_resolver: UrlTargetResolver,
    hosting_factory: HostingFactoryAdapter,
    chat_factory: ChatFactoryAdapter,
    mention_map_source: FileMentionMapSource,
    dice: ThreadRngDice,
    reporter: ConsoleReporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self {
            config_repo: JsonConfigRepository,
            target_resolver: UrlTargetResolver,
            hosting_factory: HostingFactoryAdapter,
            chat_factory: ChatFactoryAdapter,
            mention_map_source: FileMentionMapSource,
            dice: ThreadRngDice,
            reporter: ConsoleReporter,
        }
    }
}

impl AppComposition {
    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 알림 실행 유스케이스를 생성한다.
    pub fn notify_usecase(&self) -> NotifyUseCase<'_> {
        NotifyUseCase {
            config_repo: &self.config_repo,
            target_resolver: &self.target_resolver,
            hosting_factory: &self.hosting_factory,
            chat_factory: &self.chat_factory,
            mention_map_source: &self.mention_map_source,
            dice: &self.dice,
            reporter: &self.reporter,
        }
    }
}
