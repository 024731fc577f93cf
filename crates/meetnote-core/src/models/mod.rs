mod asset;
mod chat;
mod media;

pub use asset::{AssetHandle, AssetState};
pub use chat::ChatTurn;
pub use media::{MediaKind, UploadedMedia};
