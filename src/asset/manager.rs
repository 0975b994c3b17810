use std::sync::Arc;
use derive_more::*;
use crate::{AssetLoader, AssetPath, HashMap, Protocol};

/// Responsible for locating asset files and handing their bytes to loaders.
pub struct AssetManager {
    path_prefix: Option<String>,
    protocols: HashMap<String, Arc<dyn Protocol>>,
    default_protocol: Option<String>,
}

impl AssetManager {

    pub fn new() -> Self {
        Self {
            path_prefix: None,
            protocols: HashMap::default(),
            default_protocol: None,
        }
    }

    pub fn builder() -> AssetManagerBuilder {
        AssetManagerBuilder(Self::new())
    }

    pub fn set_path_prefix<S: Into<String>>(&mut self, prefix: Option<S>) {
        self.path_prefix = prefix.map(|s| s.into());
    }

    /// Adds a protocol for use in loading bytes for asset loaders.
    pub fn add_protocol(&mut self, protocol: impl Protocol, is_default: bool) {
        let name = String::from(protocol.name());
        self.protocols.insert(name.clone(), Arc::new(protocol));
        if is_default {
            self.default_protocol = Some(name);
        }
    }

    /// Parses a path, filling in the default protocol and path prefix.
    pub fn parse_path(&self, path: &str) -> Result<AssetPath, LoadError> {
        let mut path = AssetPath::parse(path, self.default_protocol.as_deref())?;
        path.prefix = self.path_prefix.clone();
        Ok(path)
    }

    /// Reads the raw bytes of a file using the protocol of its path.
    pub fn read(&self, path: &AssetPath) -> Result<Vec<u8>, LoadError> {
        let protocol = match self.protocols.get(&path.protocol) {
            Some(protocol) => protocol,
            None => return Err(LoadError::NoSuchProtocol { protocol: path.protocol.clone() }),
        };
        protocol.read(path).map_err(|cause| LoadError::ReadFailed {
            path: path.to_string(),
            cause,
        })
    }

    /// Loads an asset with the loader specified.
    /// Fails if the loader does not support the extension of the path.
    pub fn load<L: AssetLoader>(&self, loader: &L, path: impl AsRef<str>) -> Result<L::AssetType, L::Error> {
        let path = self.parse_path(path.as_ref())?;
        let supported = loader
            .extensions()
            .iter()
            .any(|extension| extension.eq_ignore_ascii_case(&path.extension));
        if !supported {
            return Err(LoadError::NoSuchLoader { extension: path.extension.clone() }.into());
        }
        let bytes = self.read(&path)?;
        log::debug!("Loading {path}");
        loader.load(&bytes, &path, self)
    }
}

impl Default for AssetManager {
    fn default() -> Self {
        Self::new()
    }
}

pub struct AssetManagerBuilder(AssetManager);
impl AssetManagerBuilder {

    pub fn default_protocol(mut self, protocol: impl Protocol) -> Self {
        self.0.add_protocol(protocol, true);
        self
    }

    pub fn protocol(mut self, protocol: impl Protocol) -> Self {
        self.0.add_protocol(protocol, false);
        self
    }

    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.0.set_path_prefix(Some(prefix));
        self
    }

    pub fn build(self) -> AssetManager {
        self.0
    }
}

#[derive(Error, Debug, Display)]
pub enum LoadError {
    #[display(fmt="No default protocol")]
    NoDefaultProtocol,
    #[display(fmt="No such protocol '{protocol}'")]
    NoSuchProtocol { protocol: String },
    #[display(fmt="No loader matching extension '{extension}'")]
    NoSuchLoader { extension: String },
    #[display(fmt="Path '{path}' missing extension")]
    PathMissingExtension { path: String },
    #[display(fmt="Failed to read '{path}': {cause}")]
    ReadFailed { path: String, cause: anyhow::Error },
}

#[cfg(test)]
mod test {
    use crate::{AssetLoader, AssetManager, AssetPath, LoadError, MemoryProtocol};

    struct TextLoader;
    impl AssetLoader for TextLoader {
        type AssetType = String;
        type Error = LoadError;
        fn load(&self, bytes: &[u8], _path: &AssetPath, _manager: &AssetManager) -> Result<String, LoadError> {
            Ok(String::from_utf8_lossy(bytes).into_owned())
        }
        fn extensions(&self) -> &[&str] {
            &["txt"]
        }
    }

    fn manager() -> AssetManager {
        AssetManager::builder()
            .default_protocol(MemoryProtocol::new().with_file("assets/notes/a.txt", "hello"))
            .path_prefix("assets")
            .build()
    }

    #[test]
    fn load_through_prefix() {
        let text = manager().load(&TextLoader, "notes/a.txt").unwrap();
        assert_eq!("hello", text);
    }

    #[test]
    fn load_errors() {
        let manager = manager();
        assert!(matches!(manager.load(&TextLoader, "notes/a.png"), Err(LoadError::NoSuchLoader { .. })));
        assert!(matches!(manager.load(&TextLoader, "notes/b.txt"), Err(LoadError::ReadFailed { .. })));
        assert!(matches!(manager.load(&TextLoader, "http://notes/a.txt"), Err(LoadError::NoSuchProtocol { .. })));
    }
}
