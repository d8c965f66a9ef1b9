//! Record-level signal extractors
//!
//! Phone prefixes, website domains and great-circle distance. Every
//! extractor is total: malformed input yields `None`, never an error.
//! The name-based detectors (known chains, franchise indicators) depend on
//! configurable tables and live in [`crate::patterns`].

use chainscope_domain::Coordinates;
use url::Url;

/// Mean Earth radius used by the Haversine formula, in miles
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Leading digits of a phone number (area code + exchange)
///
/// Non-digits are stripped first. Numbers with fewer than `len` digits
/// yield `None` rather than a shorter prefix, so that short or garbage
/// strings never match each other. Fixtures that expect a truncated prefix
/// from a short number will not match here.
///
/// # Examples
///
/// ```
/// use chainscope_resolver::signals::phone_prefix;
///
/// assert_eq!(phone_prefix("(212) 555-0001", 7).as_deref(), Some("2125550"));
/// assert_eq!(phone_prefix("call us", 7), None);
/// ```
pub fn phone_prefix(phone: &str, len: usize) -> Option<String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if len == 0 || digits.len() < len {
        return None;
    }
    Some(digits[..len].to_string())
}

/// Host name of a website, without a leading `www.`
///
/// Inputs without a scheme are read as `https://`.
///
/// # Examples
///
/// ```
/// use chainscope_resolver::signals::extract_domain;
///
/// assert_eq!(extract_domain("https://www.acme.com/store1").as_deref(), Some("acme.com"));
/// assert_eq!(extract_domain("acme.com").as_deref(), Some("acme.com"));
/// assert_eq!(extract_domain("not a url"), None);
/// ```
pub fn extract_domain(website: &str) -> Option<String> {
    let trimmed = website.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&candidate).ok()?;
    let host = url.host_str()?.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

/// Great-circle distance between two points, in miles
pub fn haversine_miles(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1]
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_prefix_formats() {
        assert_eq!(phone_prefix("212-555-0001", 7).as_deref(), Some("2125550"));
        assert_eq!(phone_prefix("212.555.0099", 7).as_deref(), Some("2125550"));
        assert_eq!(phone_prefix("2125550099", 3).as_deref(), Some("212"));
    }

    #[test]
    fn test_phone_prefix_too_short() {
        assert_eq!(phone_prefix("555-01", 7), None);
        assert_eq!(phone_prefix("", 7), None);
        assert_eq!(phone_prefix("n/a", 7), None);
        assert_eq!(phone_prefix("2125550099", 0), None);
    }

    #[test]
    fn test_extract_domain_variants() {
        assert_eq!(extract_domain("https://www.acme.com/store1").as_deref(), Some("acme.com"));
        assert_eq!(extract_domain("acme.com").as_deref(), Some("acme.com"));
        assert_eq!(extract_domain("http://WWW.Acme.COM").as_deref(), Some("acme.com"));
        assert_eq!(extract_domain("www.shop.acme.com/x?y=1").as_deref(), Some("shop.acme.com"));
    }

    #[test]
    fn test_extract_domain_malformed() {
        assert_eq!(extract_domain(""), None);
        assert_eq!(extract_domain("   "), None);
        assert_eq!(extract_domain("http://"), None);
        assert_eq!(extract_domain("not a url"), None);
    }

    #[test]
    fn test_haversine_zero_distance() {
        let p = Coordinates::new(40.7128, -74.0060);
        assert!(haversine_miles(p, p).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_known_distance() {
        // New York to Philadelphia is roughly 80 miles
        let nyc = Coordinates::new(40.7128, -74.0060);
        let philly = Coordinates::new(39.9526, -75.1652);
        let d = haversine_miles(nyc, philly);
        assert!((75.0..90.0).contains(&d), "got {}", d);
    }

    #[test]
    fn test_haversine_antipodal() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 180.0);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_MILES;
        assert!((haversine_miles(a, b) - half_circumference).abs() < 1e-6);
    }
}
