// User agent classification for session naming and device labels

use crate::models::DeviceType;

/// Classification result for a raw user-agent string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub browser_name: &'static str,
    pub os_name: &'static str,
    pub device_type: DeviceType,
}

/// Browser tokens in priority order; first match wins.
///
/// The order is a correctness-relevant tie-break: Edge user agents also
/// contain Chrome-like tokens, so `edg` must be checked before `chrome`,
/// and Chrome user agents contain `safari`.
const BROWSER_TOKENS: &[(&str, &str)] = &[
    ("edg", "Edge"),
    ("firefox", "Firefox"),
    ("msie", "Internet Explorer"),
    ("chrome", "Chrome"),
    ("safari", "Safari"),
    ("trident", "Internet Explorer"),
];

/// OS tokens in priority order; first match wins.
///
/// `android` precedes `linux` because Android user agents also contain
/// "Linux"; likewise `iphone`/`ipad` precede `mac`.
const OS_TOKENS: &[(&str, &str, DeviceType)] = &[
    ("android", "Android", DeviceType::Mobile),
    ("iphone", "iOS", DeviceType::Mobile),
    ("ipad", "iOS", DeviceType::Mobile),
    ("linux", "Linux", DeviceType::Desktop),
    ("windows", "Windows", DeviceType::Desktop),
    ("mac", "Mac", DeviceType::Desktop),
];

/// Classify a user-agent string into browser, OS, and device-type labels.
///
/// Matching is case-insensitive substring search against the ordered token
/// tables above. Pure and total: arbitrary (or empty) input falls back to
/// `"Unknown"` / `"Unknown"` / `other`, never an error.
#[must_use]
pub fn classify_user_agent(user_agent: &str) -> DeviceInfo {
    let ua_lower = user_agent.to_lowercase();

    let browser_name = BROWSER_TOKENS
        .iter()
        .find(|(token, _)| ua_lower.contains(token))
        .map_or("Unknown", |(_, label)| *label);

    let (os_name, device_type) = OS_TOKENS
        .iter()
        .find(|(token, _, _)| ua_lower.contains(token))
        .map_or(("Unknown", DeviceType::Other), |(_, label, device)| {
            (*label, *device)
        });

    DeviceInfo {
        browser_name,
        os_name,
        device_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_wins_over_chrome() {
        // Edge UAs carry both "Edg" and "Chrome" tokens; the table order
        // must report Edge.
        let info = classify_user_agent(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0",
        );
        assert_eq!(info.browser_name, "Edge");
        assert_eq!(info.os_name, "Windows");
        assert_eq!(info.device_type, DeviceType::Desktop);
    }

    #[test]
    fn test_android_wins_over_linux() {
        // Android UAs also contain "Linux"; the table order must report
        // Android / mobile.
        let info = classify_user_agent(
            "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36",
        );
        assert_eq!(info.browser_name, "Chrome");
        assert_eq!(info.os_name, "Android");
        assert_eq!(info.device_type, DeviceType::Mobile);
    }

    #[test]
    fn test_common_browsers() {
        let firefox = classify_user_agent(
            "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
        );
        assert_eq!(firefox.browser_name, "Firefox");
        assert_eq!(firefox.os_name, "Linux");
        assert_eq!(firefox.device_type, DeviceType::Desktop);

        let safari = classify_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 \
             (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1",
        );
        assert_eq!(safari.browser_name, "Safari");
        assert_eq!(safari.os_name, "iOS");
        assert_eq!(safari.device_type, DeviceType::Mobile);

        let ie = classify_user_agent("Mozilla/5.0 (Windows NT 10.0; Trident/7.0; rv:11.0) like Gecko");
        assert_eq!(ie.browser_name, "Internet Explorer");

        let ipad = classify_user_agent("Mozilla/5.0 (iPad; CPU OS 16_6 like Mac OS X) Safari/604.1");
        assert_eq!(ipad.os_name, "iOS");
        assert_eq!(ipad.device_type, DeviceType::Mobile);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let info = classify_user_agent("FIREFOX on WINDOWS");
        assert_eq!(info.browser_name, "Firefox");
        assert_eq!(info.os_name, "Windows");
    }

    #[test]
    fn test_unknown_fallback() {
        let curl = classify_user_agent("curl/8.4.0");
        assert_eq!(curl.browser_name, "Unknown");
        assert_eq!(curl.os_name, "Unknown");
        assert_eq!(curl.device_type, DeviceType::Other);

        let empty = classify_user_agent("");
        assert_eq!(empty.browser_name, "Unknown");
        assert_eq!(empty.os_name, "Unknown");
        assert_eq!(empty.device_type, DeviceType::Other);
    }
}
