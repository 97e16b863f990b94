use serde::{Deserialize, Serialize};

/// One axis of comparison among cloud providers. The set is closed and the
/// declaration order is the canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    CoreInfrastructureOfferings,
    SecurityParameters,
    PerformanceLatencyThroughput,
    ServiceCategoryCoverage,
    SuitabilityForOrganization,
    ReliabilityUptime,
    EnterpriseIntegration,
    AiMlDataCapabilities,
    PricingFlexibility,
    RangeOfServices,
    QualityOfServices,
    ComplianceCertifications,
    DeveloperExperience,
    ModernArchitectureSupport,
    RegionalStrength,
    HybridMulticloudSupport,
    BrandTrustFamiliarity,
    VendorLockInRisk,
    EcosystemMarketplace,
    InnovationVelocity,
    MarketingPerception,
    FreeTierTrial,
    NicheServices,
}

impl Criterion {
    pub const COUNT: usize = 23;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::CoreInfrastructureOfferings,
            Self::SecurityParameters,
            Self::PerformanceLatencyThroughput,
            Self::ServiceCategoryCoverage,
            Self::SuitabilityForOrganization,
            Self::ReliabilityUptime,
            Self::EnterpriseIntegration,
            Self::AiMlDataCapabilities,
            Self::PricingFlexibility,
            Self::RangeOfServices,
            Self::QualityOfServices,
            Self::ComplianceCertifications,
            Self::DeveloperExperience,
            Self::ModernArchitectureSupport,
            Self::RegionalStrength,
            Self::HybridMulticloudSupport,
            Self::BrandTrustFamiliarity,
            Self::VendorLockInRisk,
            Self::EcosystemMarketplace,
            Self::InnovationVelocity,
            Self::MarketingPerception,
            Self::FreeTierTrial,
            Self::NicheServices,
        ]
    }

    /// Display label, also the JSON key expected in model responses.
    pub const fn label(self) -> &'static str {
        match self {
            Self::CoreInfrastructureOfferings => "Core Infrastructure Offerings",
            Self::SecurityParameters => "Security Parameters",
            Self::PerformanceLatencyThroughput => "Performance (Latency/Throughput)",
            Self::ServiceCategoryCoverage => "Service Category Coverage",
            Self::SuitabilityForOrganization => "Suitability for Organization",
            Self::ReliabilityUptime => "Reliability / Uptime",
            Self::EnterpriseIntegration => "Enterprise Integration",
            Self::AiMlDataCapabilities => "AI / ML / Data Capabilities",
            Self::PricingFlexibility => "Pricing & Flexibility",
            Self::RangeOfServices => "Range of Services",
            Self::QualityOfServices => "Quality of Services",
            Self::ComplianceCertifications => "Compliance Certifications",
            Self::DeveloperExperience => "Developer Experience",
            Self::ModernArchitectureSupport => "Modern Architecture Support",
            Self::RegionalStrength => "Regional Strength",
            Self::HybridMulticloudSupport => "Hybrid/Multicloud Support",
            Self::BrandTrustFamiliarity => "Brand Trust / Familiarity",
            Self::VendorLockInRisk => "Vendor Lock-in Risk",
            Self::EcosystemMarketplace => "Ecosystem / Marketplace",
            Self::InnovationVelocity => "Innovation Velocity",
            Self::MarketingPerception => "Marketing/Perception",
            Self::FreeTierTrial => "Free Tier / Trial",
            Self::NicheServices => "Niche Services",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|criterion| criterion.label() == value)
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// One cloud vendor being compared. Declaration order is the canonical
/// column order wherever providers are displayed or iterated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Aws,
    Azure,
    Gcp,
    Oracle,
    Ibm,
    Alibaba,
    DigitalOcean,
    Linode,
    Vultr,
    Hetzner,
    TSystems,
}

impl Provider {
    pub const COUNT: usize = 11;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::Aws,
            Self::Azure,
            Self::Gcp,
            Self::Oracle,
            Self::Ibm,
            Self::Alibaba,
            Self::DigitalOcean,
            Self::Linode,
            Self::Vultr,
            Self::Hetzner,
            Self::TSystems,
        ]
    }

    /// Display label, also the JSON key expected in model responses.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aws => "AWS",
            Self::Azure => "Azure",
            Self::Gcp => "GCP",
            Self::Oracle => "Oracle",
            Self::Ibm => "IBM",
            Self::Alibaba => "Alibaba",
            Self::DigitalOcean => "DigitalOcean",
            Self::Linode => "Linode",
            Self::Vultr => "Vultr",
            Self::Hetzner => "Hetzner",
            Self::TSystems => "T-Systems",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|provider| provider.label() == value)
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}
