//! Named style roles and the style table.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Error, Result};

/// Semantic role a style is registered under.
///
/// Presentation nodes reference styles by role; the host resolves the
/// role against the [`StyleTable`] of the render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    /// Generic block container
    Block,
    /// Block quote container
    BlockQuote,
    /// Level 1 heading text
    H1,
    /// Level 2 heading text
    H2,
    /// Level 3 heading text
    H3,
    /// Level 4 heading text
    H4,
    /// Level 5 heading text
    H5,
    /// Level 6 heading text
    H6,
    /// Thematic break
    Hr,
    /// Base style of every text leaf
    Text,
    /// Strong emphasis
    Strong,
    /// Emphasis
    Em,
    /// Strikethrough
    Del,
    /// Underline
    U,
    /// Pressable link wrapper
    LinkWrapper,
    /// Link label text
    Link,
    /// List container
    List,
    /// List item row
    ListItem,
    /// List item body
    ListItemContent,
    /// List item body collapsed to text
    ListItemTextContent,
    /// Unordered list bullet
    ListItemBullet,
    /// Ordered list number
    ListItemNumber,
    /// Container around media
    ImageWrapper,
    /// Media element
    Image,
    /// Inline code and code blocks
    Code,
}

impl Role {
    /// Every role, in table order.
    pub const ALL: [Role; 25] = [
        Role::Block,
        Role::BlockQuote,
        Role::H1,
        Role::H2,
        Role::H3,
        Role::H4,
        Role::H5,
        Role::H6,
        Role::Hr,
        Role::Text,
        Role::Strong,
        Role::Em,
        Role::Del,
        Role::U,
        Role::LinkWrapper,
        Role::Link,
        Role::List,
        Role::ListItem,
        Role::ListItemContent,
        Role::ListItemTextContent,
        Role::ListItemBullet,
        Role::ListItemNumber,
        Role::ImageWrapper,
        Role::Image,
        Role::Code,
    ];

    /// Heading role for a level, clamped to 1-6.
    pub fn heading(level: u8) -> Self {
        match level {
            0 | 1 => Role::H1,
            2 => Role::H2,
            3 => Role::H3,
            4 => Role::H4,
            5 => Role::H5,
            _ => Role::H6,
        }
    }

    /// The role name used in style override files.
    pub fn name(self) -> &'static str {
        match self {
            Role::Block => "block",
            Role::BlockQuote => "blockQuote",
            Role::H1 => "h1",
            Role::H2 => "h2",
            Role::H3 => "h3",
            Role::H4 => "h4",
            Role::H5 => "h5",
            Role::H6 => "h6",
            Role::Hr => "hr",
            Role::Text => "text",
            Role::Strong => "strong",
            Role::Em => "em",
            Role::Del => "del",
            Role::U => "u",
            Role::LinkWrapper => "linkWrapper",
            Role::Link => "link",
            Role::List => "list",
            Role::ListItem => "listItem",
            Role::ListItemContent => "listItemContent",
            Role::ListItemTextContent => "listItemTextContent",
            Role::ListItemBullet => "listItemBullet",
            Role::ListItemNumber => "listItemNumber",
            Role::ImageWrapper => "imageWrapper",
            Role::Image => "image",
            Role::Code => "code",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A style value: an open map of visual properties.
///
/// The renderer never interprets the properties; they are handed to the
/// host untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(pub BTreeMap<String, Value>);

impl Style {
    /// Create an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property.
    pub fn with(mut self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(property.into(), value.into());
        self
    }

    /// Get a property.
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.0.get(property)
    }

    /// Check if the style sets no properties.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Style(map.into_iter().collect()),
            _ => Style::default(),
        }
    }
}

/// Mapping from role to style.
///
/// Used both for caller overrides and for the resolved table of a render
/// pass. A resolved table is never mutated during the pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleTable {
    styles: BTreeMap<Role, Style>,
}

impl StyleTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in default table.
    pub fn defaults() -> Self {
        let entries = [
            (
                Role::Block,
                json!({"marginBottom": 10, "flexWrap": "wrap", "flexDirection": "row"}),
            ),
            (
                Role::BlockQuote,
                json!({
                    "borderLeftWidth": 5,
                    "borderLeftColor": "#aaaaaa",
                    "backgroundColor": "#cccccc",
                    "paddingLeft": 10
                }),
            ),
            (
                Role::H1,
                json!({"fontSize": 30, "marginTop": 20, "marginBottom": 8}),
            ),
            (
                Role::H2,
                json!({"fontSize": 20, "marginTop": 16, "marginBottom": 8}),
            ),
            (
                Role::H3,
                json!({"fontSize": 20, "marginTop": 16, "marginBottom": 8}),
            ),
            (
                Role::H4,
                json!({"fontSize": 20, "marginTop": 16, "marginBottom": 8}),
            ),
            (
                Role::H5,
                json!({"fontSize": 20, "marginTop": 12, "marginBottom": 6}),
            ),
            (
                Role::H6,
                json!({"fontSize": 20, "marginTop": 12, "marginBottom": 6}),
            ),
            (
                Role::Hr,
                json!({
                    "alignSelf": "stretch",
                    "height": 1,
                    "backgroundColor": "#333333",
                    "marginVertical": 8
                }),
            ),
            (Role::Text, json!({"alignSelf": "flex-start"})),
            (Role::Strong, json!({"fontWeight": "bold"})),
            (Role::Em, json!({"fontStyle": "italic"})),
            (Role::Del, json!({"textDecorationLine": "line-through"})),
            (Role::U, json!({"textDecorationLine": "underline"})),
            (Role::LinkWrapper, json!({"alignSelf": "flex-start"})),
            (
                Role::Link,
                json!({"textDecorationLine": "underline", "alignSelf": "flex-start"}),
            ),
            (Role::List, json!({"marginBottom": 20})),
            (
                Role::ListItem,
                json!({
                    "flexDirection": "row",
                    "justifyContent": "flex-start",
                    "alignItems": "center",
                    "marginVertical": 5
                }),
            ),
            (
                Role::ListItemContent,
                json!({
                    "flexDirection": "row",
                    "justifyContent": "flex-start",
                    "alignItems": "flex-start"
                }),
            ),
            (Role::ListItemTextContent, json!({})),
            (
                Role::ListItemBullet,
                json!({
                    "width": 4,
                    "height": 4,
                    "backgroundColor": "black",
                    "borderRadius": 2,
                    "marginRight": 10
                }),
            ),
            (Role::ListItemNumber, json!({"marginRight": 10})),
            (
                Role::ImageWrapper,
                json!({"flex": 1, "flexDirection": "row", "justifyContent": "flex-start"}),
            ),
            (
                Role::Image,
                json!({"flex": 1, "minWidth": 200, "height": 200}),
            ),
            (Role::Code, json!({"backgroundColor": "#cccccc"})),
        ];

        Self {
            styles: entries
                .into_iter()
                .map(|(role, value)| (role, Style::from_value(value)))
                .collect(),
        }
    }

    /// Merge a base table with overrides.
    ///
    /// An override replaces the base style for its role entirely;
    /// properties are not merged.
    pub fn resolve(base: &StyleTable, overrides: &StyleTable) -> StyleTable {
        let mut styles = base.styles.clone();
        for (role, style) in &overrides.styles {
            styles.insert(*role, style.clone());
        }
        StyleTable { styles }
    }

    /// Resolve overrides against the defaults, or alone when defaults are
    /// disabled.
    pub fn resolve_with_defaults(use_defaults: bool, overrides: &StyleTable) -> StyleTable {
        if use_defaults {
            Self::resolve(&Self::defaults(), overrides)
        } else {
            overrides.clone()
        }
    }

    /// Load a table from JSON keyed by role name.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(map) = value else {
            return Err(Error::InvalidStyles(
                "expected a JSON object keyed by role name".to_string(),
            ));
        };

        let mut table = StyleTable::new();
        for (name, style) in map {
            let role: Role = serde_json::from_value(Value::String(name.clone()))
                .map_err(|_| Error::InvalidStyles(format!("unknown role '{}'", name)))?;
            if !style.is_object() {
                return Err(Error::InvalidStyles(format!(
                    "style for '{}' must be an object",
                    name
                )));
            }
            table.set(role, Style::from_value(style));
        }
        Ok(table)
    }

    /// Load a table from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize the table to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set the style for a role.
    pub fn set(&mut self, role: Role, style: Style) {
        self.styles.insert(role, style);
    }

    /// Builder form of [`StyleTable::set`].
    pub fn with(mut self, role: Role, style: Style) -> Self {
        self.set(role, style);
        self
    }

    /// Get the style for a role.
    pub fn get(&self, role: Role) -> Option<&Style> {
        self.styles.get(&role)
    }

    /// Number of roles with a style.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Iterate over role/style pairs in role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &Style)> {
        self.styles.iter().map(|(role, style)| (*role, style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_role() {
        let defaults = StyleTable::defaults();
        for role in Role::ALL {
            assert!(defaults.get(role).is_some(), "missing default for {}", role);
        }
        assert_eq!(
            defaults.get(Role::H1).unwrap().get("fontSize"),
            Some(&json!(30))
        );
    }

    #[test]
    fn test_override_replaces_whole_style() {
        let overrides =
            StyleTable::new().with(Role::H1, Style::new().with("color", "red"));
        let resolved = StyleTable::resolve(&StyleTable::defaults(), &overrides);

        let h1 = resolved.get(Role::H1).unwrap();
        assert_eq!(h1.get("color"), Some(&json!("red")));
        assert!(h1.get("fontSize").is_none());
        assert_eq!(resolved.get(Role::H2), StyleTable::defaults().get(Role::H2));
    }

    #[test]
    fn test_resolve_without_defaults() {
        let overrides = StyleTable::new().with(Role::Link, Style::new().with("color", "blue"));
        let resolved = StyleTable::resolve_with_defaults(false, &overrides);
        assert_eq!(resolved, overrides);

        let empty = StyleTable::resolve_with_defaults(true, &StyleTable::new());
        assert_eq!(empty, StyleTable::defaults());
    }

    #[test]
    fn test_from_json() {
        let table =
            StyleTable::from_json(r#"{"blockQuote": {"paddingLeft": 4}, "h2": {}}"#).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get(Role::BlockQuote).unwrap().get("paddingLeft"),
            Some(&json!(4))
        );
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            StyleTable::from_json(r#"{"heading": {}}"#),
            Err(Error::InvalidStyles(_))
        ));
        assert!(matches!(
            StyleTable::from_json(r#"{"h1": 3}"#),
            Err(Error::InvalidStyles(_))
        ));
        assert!(matches!(
            StyleTable::from_json("[]"),
            Err(Error::InvalidStyles(_))
        ));
    }

    #[test]
    fn test_role_names_match_serde() {
        for role in Role::ALL {
            let json = serde_json::to_value(role).unwrap();
            assert_eq!(json, Value::String(role.name().to_string()));
        }
    }
}
