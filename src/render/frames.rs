//! # Frame State
//!
//! Group and container sections open visual frames that stay open across
//! the sections that follow them. The renderer threads a [`FrameState`]
//! through the section sequence instead of mutating hidden flags.
//!
//! Two slots, independent of each other: at most one group and at most one
//! container are open at a time. A container opened while a group is open
//! nests inside it, so whenever both must close the container goes first.

use std::fmt::Write as FmtWrite;

use crate::model::{Chrome, ContainerStyle, DividerStyle};

/// Which frames are currently open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameState {
    pub group_open: bool,
    /// The style of the open container, if any. The closing tag depends on it.
    pub container: Option<ContainerStyle>,
}

impl FrameState {
    pub fn container_open(&self) -> bool {
        self.container.is_some()
    }

    /// Close the container, if one is open.
    pub fn close_container(self, out: &mut String) -> Self {
        match self.container {
            Some(style) => {
                out.push_str(container_close_tag(style));
                Self {
                    container: None,
                    ..self
                }
            }
            None => self,
        }
    }

    /// Close the group, if one is open, emitting the theme's group divider.
    /// A container nested in the group is closed first.
    pub fn close_group(self, chrome: &Chrome, out: &mut String) -> Self {
        if !self.group_open {
            return self;
        }
        let state = self.close_container(out);
        // Frame body, then frame.
        out.push_str("</div></div>");
        if chrome.group_divider {
            push_rule(out, chrome.group_divider_style, &chrome.group_divider_color);
        }
        Self {
            group_open: false,
            ..state
        }
    }

    /// Close everything still open at the end of a document.
    pub fn close_all(self, chrome: &Chrome, out: &mut String) -> Self {
        if self.group_open || self.container_open() {
            log::warn!(
                "closing unterminated frames at end of document (group: {}, container: {})",
                self.group_open,
                self.container_open()
            );
        }
        self.close_group(chrome, out).close_container(out)
    }
}

fn container_close_tag(style: ContainerStyle) -> &'static str {
    match style {
        ContainerStyle::Quote => "</blockquote>",
        ContainerStyle::Callout | ContainerStyle::Box | ContainerStyle::Panel => "</div>",
    }
}

/// A horizontal rule, dashed or fading out at both ends.
pub fn push_rule(out: &mut String, style: DividerStyle, color: &str) {
    let _ = match style {
        DividerStyle::Dashed => write!(out, r#"<hr style="border:1px dashed {};margin:30px 0;">"#, color),
        DividerStyle::Gradient => write!(
            out,
            r#"<hr style="border:none;height:2px;background:linear-gradient(90deg,transparent,{},transparent);margin:30px 0;">"#,
            color
        ),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closing_nothing_is_a_no_op() {
        let mut out = String::new();
        let state = FrameState::default().close_all(&Chrome::default(), &mut out);
        assert!(out.is_empty());
        assert_eq!(state, FrameState::default());
    }

    #[test]
    fn test_group_close_emits_divider() {
        let chrome = Chrome {
            group_divider_style: DividerStyle::Dashed,
            ..Chrome::default()
        };
        let mut out = String::new();
        let state = FrameState {
            group_open: true,
            container: None,
        }
        .close_group(&chrome, &mut out);
        assert!(!state.group_open);
        assert!(out.starts_with("</div></div><hr"));
        assert!(out.contains("1px dashed #FF9A00"));
    }

    #[test]
    fn test_group_close_without_divider() {
        let chrome = Chrome {
            group_divider: false,
            ..Chrome::default()
        };
        let mut out = String::new();
        FrameState {
            group_open: true,
            container: None,
        }
        .close_group(&chrome, &mut out);
        assert_eq!(out, "</div></div>");
    }

    #[test]
    fn test_nested_container_closes_first() {
        let chrome = Chrome {
            group_divider: false,
            ..Chrome::default()
        };
        let mut out = String::new();
        let state = FrameState {
            group_open: true,
            container: Some(ContainerStyle::Quote),
        }
        .close_all(&chrome, &mut out);
        assert_eq!(out, "</blockquote></div></div>");
        assert_eq!(state, FrameState::default());
    }

    #[test]
    fn test_top_level_container_survives_close_group() {
        let mut out = String::new();
        let state = FrameState {
            group_open: false,
            container: Some(ContainerStyle::Box),
        }
        .close_group(&Chrome::default(), &mut out);
        assert!(out.is_empty());
        assert!(state.container_open());
    }
}
