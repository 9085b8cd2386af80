//! Detail report returned by the posture API
//!
//! Every field is optional. The report is read-only once loaded and is
//! replaced as a whole on reload.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// A single detail row, passed through to the table untouched
pub type Row = Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    #[serde(default)]
    pub vulnscan_result: Option<VulnScanResult>,
    #[serde(default)]
    pub dnstwist_result: Option<DnsTwistResult>,
    #[serde(default)]
    pub mxtoolbox_result: Option<MxToolboxResult>,
    /// When the upstream scan produced this report
    #[serde(default)]
    pub generated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VulnScanResult {
    /// Exploitable services across the organization and all sub-domains
    #[serde(default, deserialize_with = "count_lenient")]
    pub count: Option<i64>,
    #[serde(default)]
    pub org_domain: Option<OrgDomainResult>,
    #[serde(default, deserialize_with = "rows_from_list_or_map")]
    pub sub_domain: Option<Vec<Row>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrgDomainResult {
    #[serde(default, deserialize_with = "count_lenient")]
    pub count: Option<i64>,
    #[serde(default, deserialize_with = "rows_from_list_or_map")]
    pub ports: Option<Vec<Row>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DnsTwistResult {
    #[serde(default, deserialize_with = "count_lenient")]
    pub count: Option<i64>,
    #[serde(default, deserialize_with = "rows_from_list_or_map")]
    pub dnstwist_items: Option<Vec<Row>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MxToolboxResult {
    #[serde(default, deserialize_with = "count_lenient")]
    pub count: Option<i64>,
    #[serde(default, deserialize_with = "rows_from_list_or_map")]
    pub mxtoolbox_category: Option<Vec<Row>>,
}

impl ReportData {
    pub fn total_vuln_count(&self) -> Option<i64> {
        self.vulnscan_result.as_ref().and_then(|v| v.count)
    }

    pub fn org_domain(&self) -> Option<&OrgDomainResult> {
        self.vulnscan_result.as_ref().and_then(|v| v.org_domain.as_ref())
    }

    pub fn org_domain_count(&self) -> Option<i64> {
        self.org_domain().and_then(|o| o.count)
    }

    pub fn org_domain_ports(&self) -> Option<&[Row]> {
        self.org_domain().and_then(|o| o.ports.as_deref())
    }

    pub fn sub_domains(&self) -> Option<&[Row]> {
        self.vulnscan_result
            .as_ref()
            .and_then(|v| v.sub_domain.as_deref())
    }

    pub fn dnstwist_count(&self) -> Option<i64> {
        self.dnstwist_result.as_ref().and_then(|d| d.count)
    }

    pub fn dnstwist_items(&self) -> Option<&[Row]> {
        self.dnstwist_result
            .as_ref()
            .and_then(|d| d.dnstwist_items.as_deref())
    }

    pub fn mxtoolbox_count(&self) -> Option<i64> {
        self.mxtoolbox_result.as_ref().and_then(|m| m.count)
    }

    pub fn mxtoolbox_categories(&self) -> Option<&[Row]> {
        self.mxtoolbox_result
            .as_ref()
            .and_then(|m| m.mxtoolbox_category.as_deref())
    }
}

/// Accept rows as a JSON array, or as an object whose values are the rows.
/// `null` is treated as absent.
fn rows_from_list_or_map<'de, D>(deserializer: D) -> Result<Option<Vec<Row>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(items),
        Some(Value::Object(map)) => Some(map.into_iter().map(|(_, v)| v).collect()),
        Some(other) => Some(vec![other]),
    })
}

/// Accept a count as an integer, an integral float or a numeric string.
/// Anything else is dropped with a warning instead of failing the report.
fn count_lenient<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let count = match &value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        Some(_) => None,
    };
    if count.is_none() {
        warn!(value = ?value, "Ignoring report count that is not a whole number");
    }
    Ok(count)
}

fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_full_report() {
        let report: ReportData = serde_json::from_value(json!({
            "vulnscan_result": {
                "count": 9,
                "org_domain": { "count": 4, "ports": [{ "port": 22 }, { "port": 443 }] },
                "sub_domain": [{ "subdomain": "api.example.com" }]
            },
            "dnstwist_result": { "count": 2, "dnstwist_items": [{ "domain": "examp1e.com" }] },
            "mxtoolbox_result": { "count": 1, "mxtoolbox_category": [{ "name": "DMARC" }] },
            "generated_at": "2026-10-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(report.total_vuln_count(), Some(9));
        assert_eq!(report.org_domain_count(), Some(4));
        assert_eq!(report.org_domain_ports().map(|p| p.len()), Some(2));
        assert_eq!(report.sub_domains().map(|s| s.len()), Some(1));
        assert_eq!(report.dnstwist_count(), Some(2));
        assert_eq!(report.mxtoolbox_count(), Some(1));
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let report: ReportData = serde_json::from_value(json!({
            "vulnscan_result": { "org_domain": null }
        }))
        .unwrap();

        assert_eq!(report.total_vuln_count(), None);
        assert_eq!(report.org_domain_count(), None);
        assert!(report.dnstwist_items().is_none());
        assert!(report.mxtoolbox_categories().is_none());
    }

    #[test]
    fn test_rows_accept_object_form() {
        let report: ReportData = serde_json::from_value(json!({
            "mxtoolbox_result": {
                "count": 2,
                "mxtoolbox_category": {
                    "dmarc": { "status": "missing" },
                    "spf": { "status": "ok" }
                }
            }
        }))
        .unwrap();

        let rows = report.mxtoolbox_categories().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], json!({ "status": "missing" }));
    }

    #[test]
    fn test_counts_tolerate_floats_and_strings() {
        let report: ReportData = serde_json::from_value(json!({
            "vulnscan_result": {
                "count": 12.0,
                "org_domain": { "count": "5", "ports": [] }
            },
            "dnstwist_result": { "count": 2.5 },
            "mxtoolbox_result": { "count": { "total": 3 } }
        }))
        .unwrap();

        assert_eq!(report.total_vuln_count(), Some(12));
        assert_eq!(report.org_domain_count(), Some(5));
        assert_eq!(report.dnstwist_count(), None);
        assert_eq!(report.mxtoolbox_count(), None);
    }
}
