//! Parsed `uiautomator dump` output
//!
//! The dump is a flat stream of `<node .../>` and `<node ...>...</node>`
//! elements. Nodes are kept in document order with a parent index so that
//! scoped lookups ("the `3` key inside the keypad") can walk ancestry without
//! building an owned tree.

use super::geometry::Rect;
use super::selector::Selector;
use crate::adb::{AdbError, AdbResult};
use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<node\b((?:[^>"]|"[^"]*")*?)(/?)>|</node\s*>"#).expect("valid tag regex")
});
static ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([\w:-]+)="([^"]*)""#).expect("valid attribute regex"));

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiNode {
    pub resource_id: String,
    pub text: String,
    pub class: String,
    pub package: String,
    pub content_desc: String,
    pub clickable: bool,
    pub visible_to_user: bool,
    pub bounds: Rect,
    pub parent: Option<usize>,
}

impl UiNode {
    pub fn with_id(resource_id: &str, bounds: Rect) -> Self {
        Self {
            resource_id: resource_id.to_string(),
            visible_to_user: true,
            bounds,
            ..Self::default()
        }
    }

    pub fn with_text(text: &str, bounds: Rect) -> Self {
        Self {
            text: text.to_string(),
            visible_to_user: true,
            bounds,
            ..Self::default()
        }
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible_to_user = visible;
        self
    }

    pub fn child_of(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiHierarchy {
    nodes: Vec<UiNode>,
}

impl UiHierarchy {
    pub fn from_nodes(nodes: Vec<UiNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[UiNode] {
        &self.nodes
    }

    pub fn parse(dump: &str) -> AdbResult<Self> {
        let start = dump
            .find("<hierarchy")
            .ok_or_else(|| parse_error("missing <hierarchy> root"))?;
        let body = &dump[start..];

        let mut nodes = Vec::new();
        let mut open: Vec<usize> = Vec::new();
        for caps in TAG_RE.captures_iter(body) {
            let Some(attrs) = caps.get(1) else {
                // closing tag
                open.pop().ok_or_else(|| parse_error("unbalanced </node>"))?;
                continue;
            };
            let mut node = Self::parse_node(attrs.as_str());
            node.parent = open.last().copied();
            nodes.push(node);
            let self_closing = caps.get(2).is_some_and(|m| m.as_str() == "/");
            if !self_closing {
                open.push(nodes.len() - 1);
            }
        }
        if !open.is_empty() {
            return Err(parse_error("dump ended inside an open <node>"));
        }
        Ok(Self { nodes })
    }

    fn parse_node(attrs: &str) -> UiNode {
        let mut node = UiNode {
            // older dumpers omit the attribute and only emit visible nodes
            visible_to_user: true,
            ..UiNode::default()
        };
        for caps in ATTR_RE.captures_iter(attrs) {
            let value = unescape_xml(&caps[2]);
            match &caps[1] {
                "resource-id" => node.resource_id = value,
                "text" => node.text = value,
                "class" => node.class = value,
                "package" => node.package = value,
                "content-desc" => node.content_desc = value,
                "clickable" => node.clickable = value == "true",
                "visible-to-user" => node.visible_to_user = value == "true",
                "bounds" => node.bounds = Rect::parse_bounds(&value).unwrap_or_default(),
                _ => {}
            }
        }
        node
    }

    pub fn find(&self, selector: &Selector) -> Option<&UiNode> {
        self.nodes.iter().find(|n| selector.matches(n))
    }

    pub fn exists(&self, selector: &Selector) -> bool {
        self.find(selector).is_some()
    }

    /// First node matching `target` that sits anywhere below a node matching
    /// `ancestor`.
    pub fn find_within(&self, ancestor: &Selector, target: &Selector) -> Option<&UiNode> {
        let roots: Vec<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| ancestor.matches(n))
            .map(|(i, _)| i)
            .collect();
        if roots.is_empty() {
            return None;
        }
        self.nodes
            .iter()
            .enumerate()
            .find(|(i, n)| target.matches(n) && roots.iter().any(|&r| self.is_descendant(*i, r)))
            .map(|(_, n)| n)
    }

    fn is_descendant(&self, mut index: usize, ancestor: usize) -> bool {
        while let Some(parent) = self.nodes.get(index).and_then(|n| n.parent) {
            if parent == ancestor {
                return true;
            }
            index = parent;
        }
        false
    }
}

fn parse_error(description: &str) -> AdbError {
    AdbError::HierarchyParseFailed {
        description: description.to_string(),
    }
}

fn unescape_xml(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let Some(semi) = tail.find(';') else {
            out.push_str(tail);
            return out;
        };
        let entity = &tail[1..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                .and_then(char::from_u32),
        };
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYGUARD_DUMP: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?><hierarchy rotation="0"><node index="0" text="" resource-id="com.android.systemui:id/keyguard_bouncer_container" class="android.widget.FrameLayout" package="com.android.systemui" content-desc="" clickable="false" bounds="[0,0][1080,2340]"><node index="0" text="" resource-id="com.android.systemui:id/pinEntry" class="android.widget.EditText" package="com.android.systemui" content-desc="PIN area" clickable="true" bounds="[150,800][930,950]" /><node index="1" text="" resource-id="com.android.systemui:id/container" class="android.widget.LinearLayout" package="com.android.systemui" content-desc="" clickable="false" bounds="[150,1000][930,1900]"><node index="0" text="1" resource-id="com.android.systemui:id/key1" class="android.view.ViewGroup" package="com.android.systemui" content-desc="" clickable="true" bounds="[150,1000][410,1200]" /><node index="1" text="Tom &amp; &quot;Jerry&quot;" resource-id="" class="android.widget.TextView" package="com.android.systemui" content-desc="" clickable="false" visible-to-user="false" bounds="[410,1000][670,1200]" /></node></node></hierarchy>UI hierchary dumped to: /dev/tty"#;

    #[test]
    fn test_parse_nodes_and_parents() {
        let hierarchy = UiHierarchy::parse(KEYGUARD_DUMP).unwrap();
        let nodes = hierarchy.nodes();
        assert_eq!(nodes.len(), 5);
        assert_eq!(nodes[0].parent, None);
        assert_eq!(nodes[1].parent, Some(0));
        assert_eq!(nodes[2].parent, Some(0));
        assert_eq!(nodes[3].parent, Some(2));
        assert_eq!(nodes[3].resource_id, "com.android.systemui:id/key1");
        assert_eq!(nodes[3].bounds, Rect::new(150, 1000, 410, 1200));
        assert!(nodes[3].clickable);
    }

    #[test]
    fn test_parse_unescapes_and_visibility() {
        let hierarchy = UiHierarchy::parse(KEYGUARD_DUMP).unwrap();
        let label = &hierarchy.nodes()[4];
        assert_eq!(label.text, "Tom & \"Jerry\"");
        assert!(!label.visible_to_user);
        // attribute missing -> visible
        assert!(hierarchy.nodes()[1].visible_to_user);
    }

    #[test]
    fn test_find_within_scopes_to_ancestor() {
        let hierarchy = UiHierarchy::parse(KEYGUARD_DUMP).unwrap();
        let container = Selector::id("com.android.systemui:id/container");
        let pin = Selector::id("com.android.systemui:id/pinEntry");
        let key = Selector::text("1");

        assert!(hierarchy.find_within(&container, &key).is_some());
        assert!(hierarchy.find_within(&pin, &key).is_none());
        assert!(hierarchy.find_within(&Selector::id("missing"), &key).is_none());
    }

    #[test]
    fn test_parse_rejects_non_dump() {
        assert!(UiHierarchy::parse("ERROR: could not get idle state.").is_err());
        assert!(UiHierarchy::parse("<hierarchy><node text=\"a\">").is_err());
    }

    #[test]
    fn test_unescape_numeric_entities() {
        assert_eq!(unescape_xml("&#x91CD;&#35797;"), "重试");
        assert_eq!(unescape_xml("a & b"), "a & b");
        assert_eq!(unescape_xml("&bogus;"), "&bogus;");
    }
}
