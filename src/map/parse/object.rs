use glam::Vec2;
use roxmltree::Node;
use crate::AssetPath;
use crate::map::{Gid, Object, ObjectShape, Properties, TmxError};
use super::parse_bool;

impl Object {

    /// Parses an <object> element.
    pub fn parse(object_node: Node, path: Option<&AssetPath>) -> Result<Self, TmxError> {
        let mut object = Object::default();
        for attribute in object_node.attributes() {
            let name = attribute.name();
            let value = attribute.value();
            match name {
                "id" => object.id = value.parse()?,
                "name" => object.name = String::from(value),
                "type" | "class" => object.class = String::from(value),
                "x" => object.position.x = value.parse()?,
                "y" => object.position.y = value.parse()?,
                "width" => object.size.x = value.parse()?,
                "height" => object.size.y = value.parse()?,
                "rotation" => object.rotation = value.parse()?,
                "gid" => object.gid = Some(Gid(value.parse()?)),
                "visible" => object.visible = parse_bool(value)?,
                _ => {}
            }
        }

        for child in object_node.children() {
            match child.tag_name().name() {
                "properties" => object.properties = Properties::parse(child, path)?,
                "ellipse" => object.shape = ObjectShape::Ellipse,
                "point" => object.shape = ObjectShape::Point,
                "polygon" => object.shape = ObjectShape::Polygon(parse_points(child)?),
                "polyline" => object.shape = ObjectShape::Polyline(parse_points(child)?),
                "text" => object.shape = ObjectShape::Text(String::from(child.text().unwrap_or(""))),
                _ => {}
            }
        }
        Ok(object)
    }
}

/// Parses the "points" attribute of a polygon or polyline: "x,y x,y ...".
fn parse_points(shape_node: Node) -> Result<Vec<Vec2>, TmxError> {
    let points = shape_node.attribute("points").unwrap_or("");
    points
        .split_whitespace()
        .map(|pair| -> Result<Vec2, TmxError> {
            let (x, y) = pair.split_once(',').ok_or_else(|| TmxError::invalid_value(pair))?;
            Ok(Vec2::new(x.parse()?, y.parse()?))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use glam::Vec2;
    use roxmltree::Document;
    use crate::map::{Gid, Object, ObjectShape, TmxError};

    fn parse(xml: &str) -> Result<Object, TmxError> {
        let doc = Document::parse(xml).unwrap();
        Object::parse(doc.root_element(), None)
    }

    #[test]
    fn rectangle() {
        let object = parse(r#"<object id="3" name="door" type="Door" x="16" y="32.5" width="16" height="8" rotation="90"/>"#).unwrap();
        assert_eq!(3, object.id);
        assert_eq!("door", object.name);
        assert_eq!("Door", object.class);
        assert_eq!(Vec2::new(16.0, 32.5), object.position);
        assert_eq!(Vec2::new(16.0, 8.0), object.size);
        assert_eq!(90.0, object.rotation);
        assert_eq!(ObjectShape::Rectangle, object.shape);
        assert!(object.visible);
        assert!(!object.is_tile());
    }

    #[test]
    fn tile_object() {
        let object = parse(r#"<object id="1" gid="2147483653" x="0" y="16" width="16" height="16" visible="0"/>"#).unwrap();
        assert_eq!(Some(Gid(0x80000005)), object.gid);
        assert!(object.is_tile());
        assert!(!object.visible);
    }

    #[test]
    fn shapes() {
        let polygon = parse(r#"<object id="1" x="0" y="0"><polygon points="0,0 16,0 8,-12.5"/></object>"#).unwrap();
        assert_eq!(
            ObjectShape::Polygon(vec![Vec2::new(0.0, 0.0), Vec2::new(16.0, 0.0), Vec2::new(8.0, -12.5)]),
            polygon.shape
        );
        let ellipse = parse(r#"<object id="1" x="0" y="0" width="4" height="4"><ellipse/></object>"#).unwrap();
        assert_eq!(ObjectShape::Ellipse, ellipse.shape);
        let text = parse(r#"<object id="1" x="0" y="0"><text wrap="1">Hello</text></object>"#).unwrap();
        assert_eq!(ObjectShape::Text(String::from("Hello")), text.shape);
    }

    #[test]
    fn malformed_points() {
        let result = parse(r#"<object id="1" x="0" y="0"><polyline points="0,0 16"/></object>"#);
        assert!(matches!(result, Err(TmxError::InvalidAttributeValue { .. })));
    }
}
