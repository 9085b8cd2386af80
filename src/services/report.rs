//! Detail report loading

use crate::model::report::ReportData;
use std::fs;
use std::path::Path;
use tracing::info;

/// Load and parse the detail report JSON
pub fn load_report<P: AsRef<Path>>(path: P) -> Result<ReportData, String> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read report {}: {}", path.display(), e))?;

    let report: ReportData = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse report {}: {}", path.display(), e))?;

    info!(path = %path.display(), "Loaded detail report");
    Ok(report)
}

/// Pull candidate domain names out of the sub-domain rows
pub fn domains_from_report(report: &ReportData) -> Vec<String> {
    let mut domains: Vec<String> = report
        .sub_domains()
        .unwrap_or_default()
        .iter()
        .filter_map(|row| {
            row.get("subdomain")
                .or_else(|| row.get("domain"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        })
        .collect();
    domains.sort();
    domains.dedup();
    domains
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_report_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        fs::write(
            &path,
            json!({ "dnstwist_result": { "count": 3 } }).to_string(),
        )
        .unwrap();

        let report = load_report(&path).unwrap();
        assert_eq!(report.dnstwist_count(), Some(3));
    }

    #[test]
    fn test_load_report_errors_mention_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = load_report(&path).unwrap_err();
        assert!(err.contains("missing.json"));

        fs::write(&path, "[1, 2").unwrap();
        let err = load_report(&path).unwrap_err();
        assert!(err.starts_with("Failed to parse report"));
    }

    #[test]
    fn test_domains_from_sub_domain_rows() {
        let report: ReportData = serde_json::from_value(json!({
            "vulnscan_result": {
                "sub_domain": [
                    { "subdomain": "b.example.com", "ports": [] },
                    { "domain": "a.example.com" },
                    { "subdomain": "b.example.com" },
                    { "ip": "10.0.0.1" }
                ]
            }
        }))
        .unwrap();

        assert_eq!(
            domains_from_report(&report),
            vec!["a.example.com", "b.example.com"]
        );
    }
}
