//! Email deliverability check module.
//!
//! Probes MX, SPF, DMARC, and DKIM over DNS-over-HTTPS and folds the
//! findings into a weighted score.

use futures::future::join_all;

use crate::error::ToolboxResult;
use crate::types::{DeliverabilityScore, DnsRecordType, EmailAuthReport};

use super::doh;

/// DKIM selectors probed under `_domainkey`.
const DKIM_SELECTORS: &[&str] = &["default", "google", "k1", "selector1", "selector2"];

/// Scoring weights.
const MX_WEIGHT: u32 = 30;
const SPF_WEIGHT: u32 = 25;
const DMARC_WEIGHT: u32 = 25;
const DKIM_WEIGHT: u32 = 20;

/// Weighted deliverability score from the four signals.
#[must_use]
pub fn score_deliverability(
    has_mx: bool,
    has_spf: bool,
    has_dmarc: bool,
    has_dkim: bool,
) -> DeliverabilityScore {
    let mut score = 0;
    if has_mx {
        score += MX_WEIGHT;
    }
    if has_spf {
        score += SPF_WEIGHT;
    }
    if has_dmarc {
        score += DMARC_WEIGHT;
    }
    if has_dkim {
        score += DKIM_WEIGHT;
    }

    let grade = match score {
        90..=100 => "A+",
        80..=89 => "A",
        70..=79 => "B",
        55..=69 => "C",
        30..=54 => "D",
        _ => "F",
    };

    DeliverabilityScore {
        score,
        grade: grade.to_string(),
    }
}

/// Run the full email authentication check for a domain.
pub async fn email_check(domain: &str) -> ToolboxResult<EmailAuthReport> {
    let dmarc_name = format!("_dmarc.{domain}");

    let (mx, txt, dmarc) = tokio::join!(
        doh::lookup(domain, DnsRecordType::Mx),
        doh::lookup(domain, DnsRecordType::Txt),
        doh::lookup(&dmarc_name, DnsRecordType::Txt),
    );

    let mx_hosts: Vec<String> = mx
        .map(|group| {
            group
                .records
                .into_iter()
                .map(|r| {
                    // "10 mail.example.com" -> exchange host only
                    r.value
                        .split_whitespace()
                        .last()
                        .unwrap_or(&r.value)
                        .to_string()
                })
                .collect()
        })
        .unwrap_or_default();

    let spf_record = txt.and_then(|group| {
        group
            .records
            .into_iter()
            .map(|r| r.value)
            .find(|v| v.to_lowercase().starts_with("v=spf1"))
    });

    let dmarc_record = dmarc.and_then(|group| {
        group
            .records
            .into_iter()
            .map(|r| r.value)
            .find(|v| v.to_lowercase().starts_with("v=dmarc1"))
    });

    let has_dkim = probe_dkim(domain).await;

    let has_mx = !mx_hosts.is_empty();
    let has_spf = spf_record.is_some();
    let has_dmarc = dmarc_record.is_some();

    Ok(EmailAuthReport {
        domain: domain.to_string(),
        has_mx,
        has_spf,
        has_dmarc,
        has_dkim,
        mx_hosts,
        spf_record,
        dmarc_record,
        deliverability: score_deliverability(has_mx, has_spf, has_dmarc, has_dkim),
    })
}

/// Probe the common DKIM selectors concurrently; any hit counts.
async fn probe_dkim(domain: &str) -> bool {
    let futures: Vec<_> = DKIM_SELECTORS
        .iter()
        .map(|selector| {
            let name = format!("{selector}._domainkey.{domain}");
            async move { doh::lookup(&name, DnsRecordType::Txt).await }
        })
        .collect();

    join_all(futures).await.into_iter().any(|g| g.is_some())
}
