use roxmltree::Node;
use crate::AssetPath;
use crate::map::{DrawOrder, GroupLayer, Image, ImageLayer, Layer, LayerKind, Object, ObjectLayer, Properties, TileLayer, TmxError};
use super::{parse_bool, parse_color};
use super::data::parse_data;

impl Layer {

    /// Parses any of the layer elements.
    /// Returns None if the node given is not a layer.
    pub fn parse(layer_node: Node, path: Option<&AssetPath>) -> Result<Option<Layer>, TmxError> {
        let kind = match layer_node.tag_name().name() {
            "layer" => LayerKind::TileLayer(TileLayer::parse(layer_node)?),
            "objectgroup" => LayerKind::ObjectLayer(ObjectLayer::parse(layer_node, path)?),
            "imagelayer" => LayerKind::ImageLayer(ImageLayer::parse(layer_node, path)?),
            "group" => LayerKind::GroupLayer(GroupLayer::parse(layer_node, path)?),
            _ => return Ok(None),
        };
        let mut layer = Layer::new(kind);

        // Attributes common to every layer
        for attribute in layer_node.attributes() {
            let name = attribute.name();
            let value = attribute.value();
            match name {
                "id" => layer.id = value.parse()?,
                "name" => layer.name = String::from(value),
                "class" => layer.class = String::from(value),
                "opacity" => layer.opacity = value.parse()?,
                "visible" => layer.visible = parse_bool(value)?,
                "offsetx" => layer.offset.x = value.parse()?,
                "offsety" => layer.offset.y = value.parse()?,
                "parallaxx" => layer.parallax.x = value.parse()?,
                "parallaxy" => layer.parallax.y = value.parse()?,
                "tintcolor" => layer.tint_color = Some(parse_color(value)?),
                _ => {}
            }
        }
        if let Some(properties_node) = layer_node.children().find(|child| child.has_tag_name("properties")) {
            layer.properties = Properties::parse(properties_node, path)?;
        }
        Ok(Some(layer))
    }
}

impl TileLayer {
    fn parse(layer_node: Node) -> Result<Self, TmxError> {
        let mut layer = TileLayer::default();
        for attribute in layer_node.attributes() {
            match attribute.name() {
                "width" => layer.width = attribute.value().parse()?,
                "height" => layer.height = attribute.value().parse()?,
                _ => {}
            }
        }
        if let Some(data_node) = layer_node.children().find(|child| child.has_tag_name("data")) {
            layer.data = parse_data(data_node)?;
        }
        if let Some(data) = &layer.data {
            let expected = layer.width as usize * layer.height as usize;
            if data.len() != expected {
                return Err(TmxError::invalid_data(format!(
                    "{} tile(s) in a {}x{} layer",
                    data.len(), layer.width, layer.height
                )));
            }
        }
        Ok(layer)
    }
}

impl ObjectLayer {

    /// Parses an <objectgroup> element.
    /// Tiles store their collision shapes in the same element.
    pub fn parse(group_node: Node, path: Option<&AssetPath>) -> Result<Self, TmxError> {
        let mut layer = ObjectLayer::default();
        for attribute in group_node.attributes() {
            let value = attribute.value();
            match attribute.name() {
                "color" => layer.color = Some(parse_color(value)?),
                "draworder" => layer.draw_order = match value {
                    "topdown" => DrawOrder::TopDown,
                    "index" => DrawOrder::Index,
                    _ => return Err(TmxError::invalid_value(value)),
                },
                _ => {}
            }
        }
        for child in group_node.children() {
            if child.has_tag_name("object") {
                layer.objects.push(Object::parse(child, path)?);
            }
        }
        Ok(layer)
    }
}

impl ImageLayer {
    fn parse(layer_node: Node, path: Option<&AssetPath>) -> Result<Self, TmxError> {
        let mut layer = ImageLayer::default();
        for attribute in layer_node.attributes() {
            let value = attribute.value();
            match attribute.name() {
                "repeatx" => layer.repeat_x = parse_bool(value)?,
                "repeaty" => layer.repeat_y = parse_bool(value)?,
                _ => {}
            }
        }
        if let Some(image_node) = layer_node.children().find(|child| child.has_tag_name("image")) {
            layer.image = Some(Image::parse(image_node, path)?);
        }
        Ok(layer)
    }
}

impl GroupLayer {
    fn parse(group_node: Node, path: Option<&AssetPath>) -> Result<Self, TmxError> {
        let mut layers = Vec::new();
        for child in group_node.children() {
            if let Some(layer) = Layer::parse(child, path)? {
                layers.push(layer);
            }
        }
        Ok(GroupLayer(layers))
    }
}
