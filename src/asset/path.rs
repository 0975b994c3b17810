use std::fmt;
use crate::LoadError;

/**
 * Deconstructed path to a file.
 */
#[derive(Clone, Eq, PartialEq, Default, Debug, Hash)]
pub struct AssetPath {
    pub protocol: String,
    pub prefix: Option<String>,
    pub body: String,
    pub extension: String,
}

impl AssetPath {

    pub fn parse(path: &str, default_protocol: Option<&str>) -> Result<Self, LoadError> {
        let protocol: Option<&str>;
        let mut remainder = path;

        // Reads protocol
        match remainder.split_once("://") {
            Some((left, right)) => {
                protocol = Some(left);
                remainder = right;
            },
            None => protocol = None,
        };
        let Some(protocol) = protocol.or(default_protocol) else {
            return Err(LoadError::NoDefaultProtocol)
        };

        // Reads body and extension, which follows the last dot of the file name
        let remainder = normalize(remainder);
        let file_start = remainder.rfind('/').map(|idx| idx + 1).unwrap_or(0);
        let (body, extension) = match remainder[file_start..].rfind('.') {
            Some(dot) if dot > 0 => {
                let dot = file_start + dot;
                (&remainder[..dot], &remainder[dot+1..])
            },
            _ => return Err(LoadError::PathMissingExtension { path: path.into() }),
        };
        if extension.is_empty() {
            return Err(LoadError::PathMissingExtension { path: path.into() });
        }

        Ok(Self {
            protocol: protocol.into(),
            prefix: None,
            body: body.into(),
            extension: extension.into()
        })
    }

    /// Body and extension. No protocol.
    /// The prefix is ignored for absolute paths.
    pub fn without_protocol(&self) -> String {
        match self.prefix.as_deref() {
            Some(prefix) if !self.body.starts_with('/') => format!("{}/{}.{}", prefix, self.body, self.extension),
            _ => format!("{}.{}", self.body, self.extension),
        }
    }

    /// Parent directory of this file.
    /// None if it's at the root.
    pub fn parent(&self) -> Option<String> {
        let parts: Vec<&str> = self.body.split('/').collect();
        if parts.len() == 1 { return None }
        let parent_parts = &parts[..parts.len() - 1];
        let parent = parent_parts.join("/");
        Some(parent)
    }

    /// Name of the file without its directory or extension.
    pub fn file_stem(&self) -> &str {
        match self.body.rsplit_once('/') {
            Some((_, stem)) => stem,
            None => &self.body,
        }
    }

    /// Resolves a path found inside this file, which is relative to this file's directory.
    /// The result keeps this file's protocol.
    pub fn resolve(&self, relative: &str) -> String {
        if relative.contains("://") {
            return String::from(relative);
        }
        if relative.starts_with('/') {
            return format!("{}://{}", self.protocol, relative);
        }
        match self.parent() {
            Some(parent) => format!("{}://{}/{}", self.protocol, parent, relative),
            None => format!("{}://{}", self.protocol, relative),
        }
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.protocol, self.without_protocol())
    }
}

/// Collapses "." and ".." segments.
/// Leading ".." segments of relative paths are kept.
fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {},
            ".." => match parts.last() {
                Some(last) if *last != ".." => { parts.pop(); },
                _ if absolute => {},
                _ => parts.push(".."),
            },
            _ => parts.push(part),
        }
    }
    let joined = parts.join("/");
    if absolute { format!("/{joined}") } else { joined }
}
