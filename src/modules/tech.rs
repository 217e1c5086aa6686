//! Technology fingerprinting.
//!
//! One fetch of the target body, then a pass over response headers, cookies,
//! and body content against a small static fingerprint table. This is a
//! deliberately lightweight detector, not a full Wappalyzer-style ruleset.

use anyhow::{Context, Result};
use log::{debug, info};
use regex::Regex;
use serde::Serialize;

/// Where a fingerprint pattern is matched against.
enum Probe {
    /// A response header, by lowercase name.
    Header(&'static str),
    /// A Set-Cookie name prefix.
    Cookie(&'static str),
    /// The response body.
    Body(&'static str),
}

/// (technology name, probe) fingerprint table.
const FINGERPRINTS: &[(&str, Probe)] = &[
    ("PHP", Probe::Cookie("PHPSESSID")),
    ("PHP", Probe::Header("x-powered-by")),
    ("ASP.NET", Probe::Cookie("ASP.NET_SessionId")),
    ("Laravel", Probe::Cookie("laravel_session")),
    ("Django", Probe::Cookie("csrftoken")),
    ("Express", Probe::Cookie("connect.sid")),
    ("WordPress", Probe::Body(r"wp-content|wp-includes")),
    ("Drupal", Probe::Body(r"Drupal\.settings|/sites/default/files")),
    ("Joomla", Probe::Body(r"/media/jui/|Joomla!")),
    ("React", Probe::Body(r"data-reactroot|__NEXT_DATA__")),
    ("Vue.js", Probe::Body(r"data-v-[0-9a-f]{8}|__vue__")),
    ("jQuery", Probe::Body(r"jquery[.-][0-9.]+(\.min)?\.js")),
    ("Bootstrap", Probe::Body(r"bootstrap(\.min)?\.(css|js)")),
    ("Google Analytics", Probe::Body(r"google-analytics\.com/analytics\.js|gtag\(")),
    ("Cloudflare", Probe::Header("cf-ray")),
    ("Varnish", Probe::Header("x-varnish")),
];

/// Technologies detected for the target.
#[derive(Debug, Clone, Serialize)]
pub struct TechReport {
    /// Web server reported by the Server header, if any.
    pub server: Option<String>,
    /// X-Powered-By value, if any.
    pub powered_by: Option<String>,
    /// Detected technology names, sorted and de-duplicated.
    pub technologies: Vec<String>,
}

/// Fetches the target and matches the fingerprint table against the
/// response.
pub async fn detect_technologies(client: &reqwest::Client, target_url: &str) -> Result<TechReport> {
    debug!("fetching {target_url} for technology detection");
    let response = client
        .get(target_url)
        .send()
        .await
        .with_context(|| format!("request to {target_url} failed"))?;

    let header_value = |name: &str| {
        response
            .headers()
            .get(name)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
    };
    let server = header_value("server");
    let powered_by = header_value("x-powered-by");
    let cookies: Vec<String> = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .collect();
    let header_names: Vec<String> = response
        .headers()
        .keys()
        .map(|k| k.as_str().to_lowercase())
        .collect();

    let body = response.text().await.unwrap_or_default();

    let mut technologies = detect_from_parts(&header_names, &cookies, &body);
    if let Some(server_value) = &server {
        // The Server header itself names a technology ("nginx/1.25.3")
        if let Some(product) = server_value.split('/').next() {
            if !product.is_empty() {
                technologies.push(product.to_string());
            }
        }
    }
    technologies.sort_unstable();
    technologies.dedup();

    info!("technology detection found {} item(s)", technologies.len());

    Ok(TechReport {
        server,
        powered_by,
        technologies,
    })
}

/// Matches the fingerprint table against pre-extracted response parts.
fn detect_from_parts(header_names: &[String], cookies: &[String], body: &str) -> Vec<String> {
    let mut found = Vec::new();
    for (tech, probe) in FINGERPRINTS {
        let hit = match probe {
            Probe::Header(name) => header_names.iter().any(|h| h == name),
            Probe::Cookie(prefix) => cookies.iter().any(|c| c.starts_with(prefix)),
            Probe::Body(pattern) => match Regex::new(&format!("(?i){pattern}")) {
                Ok(re) => re.is_match(body),
                Err(e) => {
                    log::warn!("bad fingerprint pattern for {tech}: {e}");
                    false
                }
            },
        };
        if hit {
            found.push((*tech).to_string());
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_wordpress_from_body() {
        let body = r#"<link rel="stylesheet" href="/wp-content/themes/x/style.css">"#;
        let found = detect_from_parts(&[], &[], body);
        assert!(found.contains(&"WordPress".to_string()));
    }

    #[test]
    fn detects_php_from_cookie() {
        let cookies = vec!["PHPSESSID=abc123; path=/".to_string()];
        let found = detect_from_parts(&[], &cookies, "");
        assert!(found.contains(&"PHP".to_string()));
    }

    #[test]
    fn detects_cloudflare_from_header() {
        let headers = vec!["cf-ray".to_string()];
        let found = detect_from_parts(&headers, &[], "");
        assert!(found.contains(&"Cloudflare".to_string()));
    }

    #[test]
    fn clean_response_detects_nothing() {
        assert!(detect_from_parts(&[], &[], "<html><body>hi</body></html>").is_empty());
    }

    #[test]
    fn all_body_patterns_compile() {
        for (tech, probe) in FINGERPRINTS {
            if let Probe::Body(pattern) = probe {
                assert!(
                    Regex::new(&format!("(?i){pattern}")).is_ok(),
                    "pattern for {tech} does not compile"
                );
            }
        }
    }
}
