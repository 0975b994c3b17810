use roxmltree::Node;
use crate::AssetPath;
use crate::map::{Properties, PropertyValue, TmxError};
use super::{parse_bool, parse_color, resolve_source};

impl Properties {

    /// Parses a <properties> element.
    pub fn parse(properties_node: Node, path: Option<&AssetPath>) -> Result<Self, TmxError> {
        let mut properties = Properties::default();
        for child in properties_node.children() {
            if !child.has_tag_name("property") {
                continue;
            }
            let name = child.attribute("name").ok_or_else(|| TmxError::MissingAttribute {
                tag_name: String::from("property"),
                attribute: String::from("name"),
            })?;
            let value = PropertyValue::parse(child, path)?;
            properties.insert(name, value);
        }
        Ok(properties)
    }
}

impl PropertyValue {

    fn parse(property_node: Node, path: Option<&AssetPath>) -> Result<Self, TmxError> {
        let kind = property_node.attribute("type").unwrap_or("string");

        // Multi-line strings are stored as text rather than as an attribute
        let value = property_node
            .attribute("value")
            .or_else(|| property_node.text())
            .unwrap_or("");
        let value = match kind {
            "string" => Self::String(String::from(value)),
            "int" => Self::Int(value.parse()?),
            "float" => Self::Float(value.parse()?),
            "bool" => Self::Bool(parse_bool(value)?),
            "color" if value.is_empty() => Self::Color(crate::Color::TRANSPARENT),
            "color" => Self::Color(parse_color(value)?),
            "file" if value.is_empty() => Self::File(String::new()),
            "file" => Self::File(resolve_source(path, value)),
            "object" => Self::Object(value.parse()?),
            "class" => {
                let property_type = property_node.attribute("propertytype").unwrap_or("");
                let properties = match property_node.children().find(|child| child.has_tag_name("properties")) {
                    Some(members) => Properties::parse(members, path)?,
                    None => Properties::default(),
                };
                Self::Class { property_type: String::from(property_type), properties }
            },
            _ => return Err(TmxError::invalid_value(kind)),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod test {
    use roxmltree::Document;
    use crate::{AssetPath, Color};
    use crate::map::{Properties, PropertyValue, TmxError};

    #[test]
    fn parse_all_types() {
        let xml = r##"<properties>
  <property name="title" value="Cave"/>
  <property name="notes">line one
line two</property>
  <property name="depth" type="int" value="-3"/>
  <property name="speed" type="float" value="1.5"/>
  <property name="dark" type="bool" value="true"/>
  <property name="tint" type="color" value="#ff102030"/>
  <property name="music" type="file" value="../audio/cave.ogg"/>
  <property name="target" type="object" value="12"/>
  <property name="spawn" type="class" propertytype="Spawn">
   <properties>
    <property name="count" type="int" value="4"/>
   </properties>
  </property>
</properties>"##;
        let doc = Document::parse(xml).unwrap();
        let path = AssetPath::parse("mem://maps/cave.tmx", None).unwrap();
        let properties = Properties::parse(doc.root_element(), Some(&path)).unwrap();

        assert_eq!(Some(&PropertyValue::String(String::from("Cave"))), properties.get("title"));
        assert_eq!(Some(&PropertyValue::String(String::from("line one\nline two"))), properties.get("notes"));
        assert_eq!(Some(&PropertyValue::Int(-3)), properties.get("depth"));
        assert_eq!(Some(&PropertyValue::Float(1.5)), properties.get("speed"));
        assert_eq!(Some(&PropertyValue::Bool(true)), properties.get("dark"));
        assert_eq!(Some(&PropertyValue::Color(Color::from_hex("#ff102030").unwrap())), properties.get("tint"));
        assert_eq!(Some(&PropertyValue::File(String::from("mem://maps/../audio/cave.ogg"))), properties.get("music"));
        assert_eq!(Some(&PropertyValue::Object(12)), properties.get("target"));

        let Some(PropertyValue::Class { property_type, properties: members }) = properties.get("spawn") else {
            panic!("Expected class property");
        };
        assert_eq!("Spawn", property_type);
        assert_eq!(Some(&PropertyValue::Int(4)), members.get("count"));
    }

    #[test]
    fn invalid_values() {
        let doc = Document::parse(r#"<properties><property name="a" type="bool" value="yes"/></properties>"#).unwrap();
        assert!(matches!(Properties::parse(doc.root_element(), None), Err(TmxError::InvalidAttributeValue { .. })));

        let doc = Document::parse(r#"<properties><property value="1"/></properties>"#).unwrap();
        assert!(matches!(Properties::parse(doc.root_element(), None), Err(TmxError::MissingAttribute { .. })));
    }
}
