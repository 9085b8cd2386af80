//! Tab descriptors derived from the detail report

use super::category::Category;
use super::report::{ReportData, Row};
use super::route::{route_target, RouteTarget};
use tracing::{debug, warn};

/// Presentation-agnostic summary of one report category
#[derive(Debug, Clone)]
pub struct TabDescriptor {
    pub category: Category,
    pub title: &'static str,
    /// `None` when the report does not carry the count
    pub count: Option<i64>,
    pub rows: Vec<Row>,
    pub route_target: RouteTarget,
}

impl TabDescriptor {
    /// Count as shown on the tab; blank when unknown
    pub fn count_label(&self) -> String {
        self.count.map(|c| c.to_string()).unwrap_or_default()
    }
}

/// Sub-domain count is the overall total minus the organization's own.
///
/// Not clamped: inconsistent upstream data shows up as a negative count.
/// Saturates at the `i64` bounds.
pub fn sub_domain_count(total: Option<i64>, org_domain: Option<i64>) -> i64 {
    total.unwrap_or(0).saturating_sub(org_domain.unwrap_or(0))
}

/// Build the four tab descriptors, in category order, from a report that
/// may not have arrived yet.
pub fn build_tabs(report: Option<&ReportData>) -> Vec<TabDescriptor> {
    let inputs = TabInputs::from_report(report);
    build_from_inputs(&inputs)
}

fn build_from_inputs(inputs: &TabInputs) -> Vec<TabDescriptor> {
    Category::all()
        .into_iter()
        .map(|category| {
            let (count, rows) = match category {
                Category::CompanyExposedPorts => {
                    (inputs.org_domain_count, inputs.org_domain_ports.clone())
                }
                Category::SubDomainExploitableServices => {
                    let count = sub_domain_count(inputs.total_vuln_count, inputs.org_domain_count);
                    if count < 0 {
                        warn!(
                            total = ?inputs.total_vuln_count,
                            org_domain = ?inputs.org_domain_count,
                            "Report has more org-domain services than in total"
                        );
                    }
                    (Some(count), inputs.sub_domains.clone())
                }
                Category::DomainNameVariations => {
                    (inputs.dnstwist_count, inputs.dnstwist_items.clone())
                }
                Category::EmailWeaknesses => {
                    (inputs.mxtoolbox_count, inputs.mxtoolbox_categories.clone())
                }
            };
            TabDescriptor {
                category,
                title: category.title(),
                count,
                rows,
                route_target: route_target(category),
            }
        })
        .collect()
}

/// The report fields the tab list depends on, and nothing else
#[derive(Debug, Clone, Default, PartialEq)]
struct TabInputs {
    total_vuln_count: Option<i64>,
    org_domain_count: Option<i64>,
    org_domain_ports: Vec<Row>,
    sub_domains: Vec<Row>,
    dnstwist_count: Option<i64>,
    dnstwist_items: Vec<Row>,
    mxtoolbox_count: Option<i64>,
    mxtoolbox_categories: Vec<Row>,
}

impl TabInputs {
    fn from_report(report: Option<&ReportData>) -> Self {
        let Some(report) = report else {
            return Self::default();
        };
        let rows = |r: Option<&[Row]>| r.map(|r| r.to_vec()).unwrap_or_default();
        Self {
            total_vuln_count: report.total_vuln_count(),
            org_domain_count: report.org_domain_count(),
            org_domain_ports: rows(report.org_domain_ports()),
            sub_domains: rows(report.sub_domains()),
            dnstwist_count: report.dnstwist_count(),
            dnstwist_items: rows(report.dnstwist_items()),
            mxtoolbox_count: report.mxtoolbox_count(),
            mxtoolbox_categories: rows(report.mxtoolbox_categories()),
        }
    }
}

/// Cached tab list, rebuilt only when the consumed report fields change
pub struct TabModel {
    inputs: TabInputs,
    tabs: Vec<TabDescriptor>,
    rebuilds: usize,
}

impl Default for TabModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TabModel {
    pub fn new() -> Self {
        Self {
            inputs: TabInputs::default(),
            tabs: build_tabs(None),
            rebuilds: 0,
        }
    }

    /// Apply a newly loaded report. Returns true if the tabs were rebuilt.
    pub fn report_updated(&mut self, report: Option<&ReportData>) -> bool {
        let inputs = TabInputs::from_report(report);
        if inputs == self.inputs {
            debug!("Report reloaded without tab-relevant changes");
            return false;
        }
        self.tabs = build_from_inputs(&inputs);
        self.inputs = inputs;
        self.rebuilds += 1;
        debug!(rebuilds = self.rebuilds, "Tabs rebuilt");
        true
    }

    pub fn tabs(&self) -> &[TabDescriptor] {
        &self.tabs
    }

    pub fn get(&self, category: Category) -> &TabDescriptor {
        &self.tabs[category.index()]
    }

    /// Number of rebuilds since creation
    #[cfg(test)]
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(value: serde_json::Value) -> ReportData {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_four_tabs_in_order_without_report() {
        let tabs = build_tabs(None);
        let keys: Vec<&str> = tabs.iter().map(|t| t.category.key()).collect();
        assert_eq!(
            keys,
            vec![
                "company_exposed_ports",
                "sub_domain_exploitable_services",
                "domain_name_variations",
                "email_weaknesses",
            ]
        );
        assert!(tabs.iter().all(|t| t.rows.is_empty()));
        assert_eq!(tabs[0].count, None);
        assert_eq!(tabs[1].count, Some(0));
    }

    #[test]
    fn test_sub_domain_count_is_total_minus_org_domain() {
        let r = report(json!({
            "vulnscan_result": { "count": 12, "org_domain": { "count": 5 } }
        }));
        let tabs = build_tabs(Some(&r));
        assert_eq!(tabs[0].count, Some(5));
        assert_eq!(tabs[1].count, Some(7));
    }

    #[test]
    fn test_sub_domain_count_defaults_missing_inputs_to_zero() {
        assert_eq!(sub_domain_count(None, None), 0);
        assert_eq!(sub_domain_count(Some(8), None), 8);
        assert_eq!(sub_domain_count(None, Some(3)), -3);
        for n in 0..6 {
            for k in 0..=n {
                assert_eq!(sub_domain_count(Some(n), Some(k)), n - k);
            }
        }
    }

    #[test]
    fn test_inconsistent_counts_are_not_clamped() {
        let r = report(json!({
            "vulnscan_result": { "count": 2, "org_domain": { "count": 5 } }
        }));
        assert_eq!(build_tabs(Some(&r))[1].count, Some(-3));
    }

    #[test]
    fn test_extreme_counts_saturate() {
        let r = report(json!({
            "vulnscan_result": { "count": -9223372036854775807i64, "org_domain": { "count": 2 } }
        }));
        assert_eq!(build_tabs(Some(&r))[1].count, Some(i64::MIN));
        assert_eq!(sub_domain_count(Some(i64::MAX), Some(-1)), i64::MAX);
        assert_eq!(sub_domain_count(None, Some(i64::MIN)), i64::MAX);
    }

    #[test]
    fn test_rows_pass_through() {
        let r = report(json!({
            "vulnscan_result": { "org_domain": { "ports": [{ "port": 22, "service": "ssh" }] } },
            "dnstwist_result": { "count": 1, "dnstwist_items": [{ "domain": "examp1e.com" }] }
        }));
        let tabs = build_tabs(Some(&r));
        assert_eq!(tabs[0].rows, vec![json!({ "port": 22, "service": "ssh" })]);
        assert_eq!(tabs[2].rows, vec![json!({ "domain": "examp1e.com" })]);
        assert!(tabs[3].rows.is_empty());
        assert_eq!(tabs[3].count_label(), "");
    }

    #[test]
    fn test_model_skips_rebuild_for_unrelated_changes() {
        let mut model = TabModel::new();
        let mut r = report(json!({
            "vulnscan_result": { "count": 3, "org_domain": { "count": 1 } },
            "generated_at": "2026-10-01T00:00:00Z"
        }));

        assert!(model.report_updated(Some(&r)));
        assert_eq!(model.rebuilds(), 1);

        r.generated_at = Some("2026-10-02T00:00:00Z".to_string());
        assert!(!model.report_updated(Some(&r)));
        assert_eq!(model.rebuilds(), 1);

        r.dnstwist_result = Some(crate::model::report::DnsTwistResult {
            count: Some(4),
            dnstwist_items: None,
        });
        assert!(model.report_updated(Some(&r)));
        assert_eq!(model.get(Category::DomainNameVariations).count, Some(4));
    }

    #[test]
    fn test_model_returns_to_empty_when_report_disappears() {
        let mut model = TabModel::new();
        let r = report(json!({ "mxtoolbox_result": { "count": 2 } }));
        model.report_updated(Some(&r));
        assert!(model.report_updated(None));
        assert_eq!(model.get(Category::EmailWeaknesses).count, None);
        assert_eq!(model.tabs().len(), 4);
    }
}
