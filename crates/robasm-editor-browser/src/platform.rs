//! Cached platform detection.
//!
//! Classification lives in core; this module only reads the navigator once.

use std::sync::OnceLock;

use robasm_editor_core::{Platform, Quirks};

static PLATFORM: OnceLock<Platform> = OnceLock::new();

/// Get cached platform info. Detection runs once on first call.
pub fn platform() -> &'static Platform {
    PLATFORM.get_or_init(detect_platform)
}

/// Quirks implied by the detected platform.
pub fn quirks() -> Quirks {
    Quirks::for_platform(platform())
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
fn detect_platform() -> Platform {
    let Some(window) = web_sys::window() else {
        return Platform::default();
    };

    let navigator = window.navigator();
    let user_agent = navigator.user_agent().unwrap_or_default();
    let platform_str = navigator.platform().unwrap_or_default();
    let detected = Platform::from_navigator(&user_agent, &platform_str, navigator.max_touch_points());

    tracing::debug!(?detected, "platform detected");
    detected
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
fn detect_platform() -> Platform {
    Platform::default()
}
