use std::io::Read;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::read::{GzDecoder, ZlibDecoder};
use roxmltree::Node;
use crate::map::{Gid, TmxError};

/// Decodes the contents of a tile layer's <data> element.
/// Returns None when tiles are stored in chunks.
pub(crate) fn parse_data(data_node: Node) -> Result<Option<Vec<Gid>>, TmxError> {
    if data_node.children().any(|child| child.has_tag_name("chunk")) {
        return Ok(None);
    }
    let encoding = data_node.attribute("encoding");
    let compression = data_node.attribute("compression");
    let text = data_node.text().unwrap_or("");
    let gids = match (encoding, compression) {
        (None, None) => decode_xml(data_node)?,
        (Some("csv"), None) => decode_csv(text)?,
        (Some("base64"), None) => to_gids(&decode_base64(text)?)?,
        (Some("base64"), Some("zlib")) => {
            let compressed = decode_base64(text)?;
            to_gids(&decompress(ZlibDecoder::new(compressed.as_slice()))?)?
        },
        (Some("base64"), Some("gzip")) => {
            let compressed = decode_base64(text)?;
            to_gids(&decompress(GzDecoder::new(compressed.as_slice()))?)?
        },
        (Some(encoding), Some(compression)) => {
            return Err(TmxError::unsupported(format!("{encoding} data with {compression} compression")))
        },
        (Some(encoding), None) => return Err(TmxError::unsupported(format!("{encoding} data encoding"))),
        (None, Some(compression)) => return Err(TmxError::unsupported(format!("{compression} compression without encoding"))),
    };
    Ok(Some(gids))
}

/// Legacy format where each tile is a <tile gid="..."/> element.
fn decode_xml(data_node: Node) -> Result<Vec<Gid>, TmxError> {
    data_node
        .children()
        .filter(|child| child.has_tag_name("tile"))
        .map(|tile| -> Result<Gid, TmxError> {
            match tile.attribute("gid") {
                Some(gid) => Ok(Gid(gid.parse()?)),
                None => Ok(Gid::EMPTY),
            }
        })
        .collect()
}

fn decode_csv(text: &str) -> Result<Vec<Gid>, TmxError> {
    text.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| -> Result<Gid, TmxError> { Ok(Gid(value.parse()?)) })
        .collect()
}

fn decode_base64(text: &str) -> Result<Vec<u8>, TmxError> {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(STANDARD.decode(cleaned)?)
}

fn decompress(mut decoder: impl Read) -> Result<Vec<u8>, TmxError> {
    let mut bytes = Vec::new();
    decoder.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Converts little-endian bytes into gids.
fn to_gids(bytes: &[u8]) -> Result<Vec<Gid>, TmxError> {
    if bytes.len() % 4 != 0 {
        return Err(TmxError::invalid_data(format!("{} bytes is not a whole number of tiles", bytes.len())));
    }
    let gids = bytes
        .chunks_exact(4)
        .map(|chunk| Gid(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])))
        .collect();
    Ok(gids)
}
