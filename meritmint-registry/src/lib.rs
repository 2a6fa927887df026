pub mod catalog;
pub mod error;
pub mod helpers;
pub mod mint;
pub mod query;
pub mod state;
pub mod storage;

pub use catalog::{generate, StyleCatalog};
pub use error::RegistryError;
pub use mint::{fallback_cid, MetadataPublisher, Minter, PublishFailure};
pub use state::{
    AchievementDraft, AchievementRecord, AchievementType, Attribute, DescriptionStyle,
    MintConfig, NftMetadata,
};
pub use storage::{AchievementStore, JsonFileStore, MemoryStore};
