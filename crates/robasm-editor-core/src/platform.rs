//! Platform classification and the rendering quirks it implies.
//!
//! Detection parses navigator strings once at startup; the browser crate
//! supplies the strings and caches the result. Everything here is pure so
//! the quirk table can be tested natively.

/// The parts of the browser/OS classification the quirk table depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Platform {
    /// iPhone, iPad (including iPadOS posing as a Mac) or iPod.
    pub ios: bool,
    /// Internet Explorer's Trident engine.
    pub trident: bool,
    /// Pre-Chromium Edge.
    pub edge_html: bool,
}

impl Platform {
    /// Classify from `navigator.userAgent`, `navigator.platform` and
    /// `navigator.maxTouchPoints`.
    pub fn from_navigator(user_agent: &str, platform: &str, max_touch_points: i32) -> Self {
        let user_agent = user_agent.to_lowercase();
        let platform_str = platform.to_lowercase();

        // iPadOS reports a Mac platform but has touch
        let ios = user_agent.contains("iphone")
            || user_agent.contains("ipad")
            || user_agent.contains("ipod")
            || (platform_str.contains("mac") && max_touch_points > 0);

        Platform {
            ios,
            trident: user_agent.contains("trident/") || user_agent.contains("msie "),
            edge_html: user_agent.contains("edge/"),
        }
    }
}

/// Extra horizontal padding iOS puts inside a textarea.
pub const IOS_TEXTAREA_INSET_PX: f64 = 3.0;

/// Rendering adjustments resolved once per page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quirks {
    /// Follow each space with `<wbr>` so the backdrop wraps like the input.
    pub space_break_hint: bool,
    /// Added to both the left and right padding of every backdrop.
    pub horizontal_padding_px: f64,
}

impl Quirks {
    pub fn for_platform(platform: &Platform) -> Self {
        Self {
            space_break_hint: platform.trident || platform.edge_html,
            horizontal_padding_px: if platform.ios {
                IOS_TEXTAREA_INSET_PX
            } else {
                0.0
            },
        }
    }

    pub fn is_noop(&self) -> bool {
        !self.space_break_hint && self.horizontal_padding_px == 0.0
    }
}

/// Parse a computed CSS pixel length such as `"12px"` or `"4.5px"`.
pub fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    if number.is_empty() {
        return None;
    }
    number.parse().ok()
}

/// Format a pixel length for a style property.
pub fn format_px(value: f64) -> String {
    format!("{}px", value)
}
