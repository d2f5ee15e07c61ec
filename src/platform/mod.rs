#[cfg(windows)]
pub mod win32;

/// Overrides the platform's reduced-motion preference when set.
pub const REDUCED_MOTION_ENV: &str = "NEKO_REDUCED_MOTION";

/// Whether the user asked for reduced motion. Checked once at startup.
pub fn prefers_reduced_motion() -> bool {
    let forced = std::env::var(REDUCED_MOTION_ENV).ok();
    match parse_flag(forced.as_deref()) {
        Some(flag) => flag,
        None => system_prefers_reduced_motion(),
    }
}

#[cfg(windows)]
fn system_prefers_reduced_motion() -> bool {
    win32::prefers_reduced_motion()
}

#[cfg(not(windows))]
fn system_prefers_reduced_motion() -> bool {
    false
}

fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            log::warn!("Ignoring {REDUCED_MOTION_ENV}={other:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_override_values() {
        assert_eq!(parse_flag(Some("1")), Some(true));
        assert_eq!(parse_flag(Some(" TRUE ")), Some(true));
        assert_eq!(parse_flag(Some("off")), Some(false));
        assert_eq!(parse_flag(Some("maybe")), None);
        assert_eq!(parse_flag(None), None);
    }
}
