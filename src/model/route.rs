//! "See all" detail routes for each report category

use super::category::Category;

/// Identifier passed to parametrized routes when the caller supplies none
pub const DEFAULT_ROUTE_TARGET: &str = "company-exposed-ports";

/// Root of the current-risk section of the dashboard
pub const CURRENT_RISK: &str = "/current-risk";

/// Destination for a category's detail view.
///
/// Either a fixed path or a builder that takes a target identifier.
#[derive(Clone, Copy)]
pub enum RouteTarget {
    Literal(&'static str),
    Builder(fn(&str) -> String),
}

impl RouteTarget {
    pub fn resolve(&self, target_id: Option<&str>) -> String {
        match self {
            RouteTarget::Literal(path) => (*path).to_string(),
            RouteTarget::Builder(build) => build(target_id.unwrap_or(DEFAULT_ROUTE_TARGET)),
        }
    }
}

impl std::fmt::Debug for RouteTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteTarget::Literal(path) => f.debug_tuple("Literal").field(path).finish(),
            RouteTarget::Builder(_) => f.write_str("Builder(..)"),
        }
    }
}

fn current_risk_page(id: &str) -> String {
    format!("{}/{}", CURRENT_RISK, id)
}

/// Route table entry for a category
pub fn route_target(category: Category) -> RouteTarget {
    match category {
        Category::CompanyExposedPorts => RouteTarget::Builder(current_risk_page),
        Category::SubDomainExploitableServices => {
            RouteTarget::Literal("/current-risk/sub-domain-exploitable-services")
        }
        Category::DomainNameVariations => {
            RouteTarget::Literal("/current-risk/domain-name-variations")
        }
        Category::EmailWeaknesses => RouteTarget::Literal("/current-risk/email-weaknesses"),
    }
}

/// Join a route path onto the dashboard base URL
pub fn absolute_url(dashboard_url: &str, path: &str) -> String {
    format!("{}{}", dashboard_url.trim_end_matches('/'), path)
}
