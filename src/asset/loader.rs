use crate::{AssetManager, AssetPath, LoadError};

/// Takes the contents of a file, and converts them into an asset.
/// The manager is available for loading files the asset depends on.
pub trait AssetLoader: Send + Sync + 'static {
    type AssetType;
    type Error: From<LoadError>;
    fn load(&self, bytes: &[u8], path: &AssetPath, manager: &AssetManager) -> Result<Self::AssetType, Self::Error>;
    fn extensions(&self) -> &[&str];
}
