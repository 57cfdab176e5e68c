//! 포트 구현 어댑터 모음.

mod chat_factory;
mod config_repository;
mod dice;
mod hosting_factory;
mod mention_map;
mod reporter;
mod target_resolver;

pub use chat_factory::ChatFactoryAdapter;
pub use config_repository::JsonConfigRepository;
pub use dice::ThreadRngDice;
pub use hosting_factory::HostingFactoryAdapter;
pub use mention_map::FileMentionMapSource;
pub use reporter::ConsoleReporter;
pub use target_resolver::UrlTargetResolver;
