/// A named pricing bucket. `unit_amount` is in minor currency units; `None` means custom pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingTier {
    pub name: &'static str,
    pub unit_amount: Option<u64>,
}

impl PricingTier {
    pub fn is_payable(&self) -> bool {
        matches!(self.unit_amount, Some(amount) if amount > 0)
    }
}

pub const TIERS: &[PricingTier] = &[
    PricingTier {
        name: "Basic",
        unit_amount: Some(12_000),
    },
    PricingTier {
        name: "Pro",
        unit_amount: Some(12_000),
    },
    // Quoted manually, never sold through checkout
    PricingTier {
        name: "Enterprise",
        unit_amount: None,
    },
];

pub fn find_tier(name: &str) -> Option<&'static PricingTier> {
    TIERS.iter().find(|tier| tier.name == name)
}
