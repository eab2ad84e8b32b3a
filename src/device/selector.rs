//! Element selectors for accessibility-tree lookups

use super::hierarchy::UiNode;

#[derive(Debug, Clone, PartialEq)]
pub enum TextMatch {
    Exact(String),
    Contains(String),
}

/// Conjunction of optional filters; an empty selector matches every node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selector {
    pub resource_id: Option<String>,
    pub text: Option<TextMatch>,
    pub visible_to_user: Option<bool>,
    pub clickable: Option<bool>,
}

impl Selector {
    pub fn id(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: Some(resource_id.into()),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(TextMatch::Exact(text.into())),
            ..Self::default()
        }
    }

    pub fn text_contains(mut self, fragment: impl Into<String>) -> Self {
        self.text = Some(TextMatch::Contains(fragment.into()));
        self
    }

    pub fn visible_to_user(mut self, visible: bool) -> Self {
        self.visible_to_user = Some(visible);
        self
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = Some(clickable);
        self
    }

    pub fn matches(&self, node: &UiNode) -> bool {
        if let Some(id) = &self.resource_id
            && node.resource_id != *id
        {
            return false;
        }
        match &self.text {
            Some(TextMatch::Exact(text)) if node.text != *text => return false,
            Some(TextMatch::Contains(fragment)) if !node.text.contains(fragment.as_str()) => {
                return false;
            }
            _ => {}
        }
        if let Some(visible) = self.visible_to_user
            && node.visible_to_user != visible
        {
            return false;
        }
        if let Some(clickable) = self.clickable
            && node.clickable != clickable
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::geometry::Rect;

    #[test]
    fn test_id_and_visibility_filters() {
        let node = UiNode::with_id("com.android.systemui:id/backgroundDimmed", Rect::default())
            .visible(false);
        let by_id = Selector::id("com.android.systemui:id/backgroundDimmed");
        assert!(by_id.matches(&node));
        assert!(!by_id.clone().visible_to_user(true).matches(&node));
        assert!(by_id.visible_to_user(false).matches(&node));
    }

    #[test]
    fn test_text_filters() {
        let mut node = UiNode::with_id("android:id/message", Rect::default());
        node.text = "密码错误，请在30秒后重试".to_string();

        assert!(Selector::id("android:id/message").text_contains("重试").matches(&node));
        assert!(!Selector::text("重试").matches(&node));
        assert!(Selector::text("密码错误，请在30秒后重试").matches(&node));
    }

    #[test]
    fn test_clickable_filter() {
        let node = UiNode::with_id("com.android.systemui:id/scrim_notifications", Rect::default());
        assert!(
            Selector::id("com.android.systemui:id/scrim_notifications")
                .clickable(false)
                .matches(&node)
        );
        assert!(!Selector::default().clickable(true).matches(&node));
    }
}
