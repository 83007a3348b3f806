use crate::domain::Version;

/// Placeholder substituted with the tag name in message templates
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Default annotation template, rendered as e.g. "Release v1.2.3"
pub const DEFAULT_MESSAGE_TEMPLATE: &str = "Release {version}";

/// An annotated tag about to be published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub message: String,
}

impl Tag {
    /// Build the tag for a version
    ///
    /// An explicit, non-blank `message` is used verbatim; otherwise the
    /// template is rendered with the tag name.
    pub fn for_version(version: &Version, message: Option<&str>, template: &str) -> Self {
        let name = version.tag_name();
        let message = match message.map(str::trim).filter(|m| !m.is_empty()) {
            Some(explicit) => explicit.to_string(),
            None => render_message(template, &name),
        };

        Tag { name, message }
    }
}

/// Render a message template (e.g. "Release {version}" -> "Release v1.2.3")
pub fn render_message(template: &str, tag_name: &str) -> String {
    template.replace(VERSION_PLACEHOLDER, tag_name)
}
