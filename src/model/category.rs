//! Report categories shown as tabs on the attack-surface panel

use std::fmt;

/// One of the four attack-surface report categories.
///
/// The order of [`Category::all`] is the tab order and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    CompanyExposedPorts,
    SubDomainExploitableServices,
    DomainNameVariations,
    EmailWeaknesses,
}

impl Category {
    pub fn all() -> [Category; 4] {
        [
            Category::CompanyExposedPorts,
            Category::SubDomainExploitableServices,
            Category::DomainNameVariations,
            Category::EmailWeaknesses,
        ]
    }

    /// Stable key used by routes and persisted state
    pub fn key(&self) -> &'static str {
        match self {
            Category::CompanyExposedPorts => "company_exposed_ports",
            Category::SubDomainExploitableServices => "sub_domain_exploitable_services",
            Category::DomainNameVariations => "domain_name_variations",
            Category::EmailWeaknesses => "email_weaknesses",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::CompanyExposedPorts => "Company Exploitable Services",
            Category::SubDomainExploitableServices => "Sub-domain Exploitable Services",
            Category::DomainNameVariations => "Domain Name Variations",
            Category::EmailWeaknesses => "Email Weaknesses",
        }
    }

    /// Short label for the tab bar
    pub fn short_title(&self) -> &'static str {
        match self {
            Category::CompanyExposedPorts => "Company",
            Category::SubDomainExploitableServices => "Sub-domains",
            Category::DomainNameVariations => "Variations",
            Category::EmailWeaknesses => "Email",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Category::CompanyExposedPorts => 0,
            Category::SubDomainExploitableServices => 1,
            Category::DomainNameVariations => 2,
            Category::EmailWeaknesses => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Category> {
        Self::all().get(index).copied()
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Self::all().into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
