//! robots.txt fetch and parse module.

use crate::error::ToolboxResult;
use crate::types::{RobotsDirective, RobotsEntry, RobotsReport, RobotsRule};

use super::page_fetch;

/// Parse robots.txt text into rule groups and sitemap URLs.
///
/// Line-oriented: `#` comments and blank lines are ignored; a `User-agent:`
/// line starts a new rule group (flushing the previous group if it gathered
/// entries); `Allow:`/`Disallow:` lines append to the current group; an
/// empty `Disallow:` value normalizes to `/`. `Sitemap:` lines collect
/// independent of grouping, so any line ordering is tolerated.
#[must_use]
pub fn parse_robots_txt(text: &str) -> RobotsReport {
    let mut report = RobotsReport::default();
    let mut current_agent: Option<String> = None;
    let mut current_entries: Vec<RobotsEntry> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match key.trim().to_lowercase().as_str() {
            "user-agent" => {
                if let Some(agent) = current_agent.take() {
                    if !current_entries.is_empty() {
                        report.rules.push(RobotsRule {
                            user_agent: agent,
                            entries: std::mem::take(&mut current_entries),
                        });
                    }
                }
                current_entries.clear();
                current_agent = Some(value.to_string());
            }
            "disallow" => {
                if current_agent.is_some() {
                    let path = if value.is_empty() { "/" } else { value };
                    current_entries.push(RobotsEntry {
                        directive: RobotsDirective::Disallow,
                        path: path.to_string(),
                    });
                }
            }
            "allow" => {
                if current_agent.is_some() && !value.is_empty() {
                    current_entries.push(RobotsEntry {
                        directive: RobotsDirective::Allow,
                        path: value.to_string(),
                    });
                }
            }
            "sitemap" => {
                if !value.is_empty() {
                    report.sitemaps.push(value.to_string());
                }
            }
            _ => {}
        }
    }

    if let Some(agent) = current_agent {
        if !current_entries.is_empty() {
            report.rules.push(RobotsRule {
                user_agent: agent,
                entries: current_entries,
            });
        }
    }

    report
}

/// Fetch and parse `https://{domain}/robots.txt`.
///
/// Returns `Ok(None)` when the site has no robots.txt (404) or the relay
/// handed back something that is not a plain-text resource — a no-data
/// outcome, distinct from a network failure.
pub async fn robots_check(domain: &str) -> ToolboxResult<Option<RobotsReport>> {
    let url = format!("https://{domain}/robots.txt");
    let page = page_fetch::fetch_page(&url).await?;

    if page.status.http_code == 404 {
        return Ok(None);
    }
    if !page_fetch::is_valid_text_resource(&page.contents) {
        log::warn!("robots.txt fetch for {domain} returned a non-text resource");
        return Ok(None);
    }

    Ok(Some(parse_robots_txt(&page.contents)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== parse_robots_txt tests ====================

    #[test]
    fn test_parse_basic() {
        let report =
            parse_robots_txt("User-agent: *\nDisallow: /admin\nSitemap: https://x.com/sitemap.xml");
        assert_eq!(report.rules.len(), 1);
        assert_eq!(report.rules[0].user_agent, "*");
        assert_eq!(report.rules[0].entries.len(), 1);
        assert_eq!(report.rules[0].entries[0].directive, RobotsDirective::Disallow);
        assert_eq!(report.rules[0].entries[0].path, "/admin");
        assert_eq!(report.sitemaps, vec!["https://x.com/sitemap.xml"]);
    }

    #[test]
    fn test_parse_empty_disallow_normalizes_to_root() {
        let report = parse_robots_txt("User-agent: *\nDisallow:");
        assert_eq!(report.rules[0].entries[0].path, "/");
    }

    #[test]
    fn test_parse_multiple_groups() {
        let text = "User-agent: *\nDisallow: /private\n\nUser-agent: Googlebot\nAllow: /public\nDisallow: /tmp";
        let report = parse_robots_txt(text);
        assert_eq!(report.rules.len(), 2);
        assert_eq!(report.rules[0].user_agent, "*");
        assert_eq!(report.rules[1].user_agent, "Googlebot");
        assert_eq!(report.rules[1].entries.len(), 2);
        assert_eq!(report.rules[1].entries[0].directive, RobotsDirective::Allow);
    }

    #[test]
    fn test_parse_comments_and_blank_lines_ignored() {
        let text = "# welcome robots\n\nUser-agent: *\n# private stuff\nDisallow: /admin\n";
        let report = parse_robots_txt(text);
        assert_eq!(report.rules.len(), 1);
        assert_eq!(report.rules[0].entries.len(), 1);
    }

    #[test]
    fn test_parse_sitemap_before_any_group() {
        let text = "Sitemap: https://x.com/a.xml\nUser-agent: *\nDisallow: /x\nSitemap: https://x.com/b.xml";
        let report = parse_robots_txt(text);
        assert_eq!(report.sitemaps.len(), 2);
        assert_eq!(report.rules.len(), 1);
    }

    #[test]
    fn test_parse_directive_without_group_ignored() {
        let report = parse_robots_txt("Disallow: /admin");
        assert!(report.rules.is_empty());
    }

    #[test]
    fn test_parse_group_without_entries_dropped() {
        let report = parse_robots_txt("User-agent: Bingbot\nUser-agent: *\nDisallow: /a");
        assert_eq!(report.rules.len(), 1);
        assert_eq!(report.rules[0].user_agent, "*");
    }

    #[test]
    fn test_parse_case_insensitive_keys() {
        let report = parse_robots_txt("USER-AGENT: *\nDISALLOW: /a\nsitemap: https://x.com/s.xml");
        assert_eq!(report.rules.len(), 1);
        assert_eq!(report.sitemaps.len(), 1);
    }

    #[test]
    fn test_parse_empty_input() {
        let report = parse_robots_txt("");
        assert!(report.rules.is_empty());
        assert!(report.sitemaps.is_empty());
    }

    #[test]
    fn test_parse_sitemap_url_keeps_scheme_colon() {
        // split_once(':') must only split on the first colon
        let report = parse_robots_txt("Sitemap: https://x.com:8443/sitemap.xml");
        assert_eq!(report.sitemaps, vec!["https://x.com:8443/sitemap.xml"]);
    }
}
