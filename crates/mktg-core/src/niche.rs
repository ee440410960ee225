//! Niche / ICP profile loaded from `niche/niche_icp.json`.

use serde::{Deserialize, Serialize};

/// Structured description of the target customer segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NicheProfile {
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub customer_pain_points: Vec<PainPoint>,
    #[serde(default)]
    pub customer_needs: Vec<CustomerNeed>,
}

/// A customer challenge and the causes behind it.
///
/// Profile files in the wild hold either the full object or a bare string;
/// both deserialize into this shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PainPointRepr")]
pub struct PainPoint {
    pub challenge: String,
    pub why: Vec<PainPointCause>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PainPointCause {
    #[serde(default)]
    pub cause: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub indicators: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CustomerNeedRepr")]
pub struct CustomerNeed {
    pub need: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PainPointRepr {
    Full {
        #[serde(default)]
        challenge: String,
        #[serde(default)]
        why: Vec<PainPointCause>,
    },
    Bare(String),
}

impl From<PainPointRepr> for PainPoint {
    fn from(repr: PainPointRepr) -> Self {
        match repr {
            PainPointRepr::Full { challenge, why } => Self { challenge, why },
            PainPointRepr::Bare(challenge) => Self {
                challenge,
                why: Vec::new(),
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CustomerNeedRepr {
    Full {
        #[serde(default)]
        need: String,
    },
    Bare(String),
}

impl From<CustomerNeedRepr> for CustomerNeed {
    fn from(repr: CustomerNeedRepr) -> Self {
        match repr {
            CustomerNeedRepr::Full { need } | CustomerNeedRepr::Bare(need) => Self { need },
        }
    }
}

impl NicheProfile {
    /// Challenge strings in profile order.
    pub fn challenges(&self) -> impl Iterator<Item = &str> {
        self.customer_pain_points
            .iter()
            .map(|p| p.challenge.as_str())
    }

    /// Need strings in profile order.
    pub fn needs(&self) -> impl Iterator<Item = &str> {
        self.customer_needs.iter().map(|n| n.need.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_profile() {
        let json = r#"{
            "industry": "SaaS",
            "customer_pain_points": [
                {
                    "challenge": "churn",
                    "why": [
                        {
                            "cause": "weak onboarding",
                            "explanation": "users never reach value",
                            "indicators": ["low activation", "support tickets"]
                        }
                    ]
                }
            ],
            "customer_needs": [{ "need": "retention tooling" }]
        }"#;
        let niche: NicheProfile = serde_json::from_str(json).unwrap();
        assert_eq!(niche.industry, "SaaS");
        assert_eq!(niche.customer_pain_points[0].challenge, "churn");
        assert_eq!(niche.customer_pain_points[0].why[0].indicators.len(), 2);
        assert_eq!(niche.customer_needs[0].need, "retention tooling");
    }

    #[test]
    fn accepts_bare_string_pain_points_and_needs() {
        let json = r#"{
            "industry": "Fintech",
            "customer_pain_points": ["fraud", { "challenge": "compliance" }],
            "customer_needs": ["faster payouts"]
        }"#;
        let niche: NicheProfile = serde_json::from_str(json).unwrap();
        let challenges: Vec<&str> = niche.challenges().collect();
        assert_eq!(challenges, vec!["fraud", "compliance"]);
        assert!(niche.customer_pain_points[0].why.is_empty());
        assert_eq!(niche.needs().collect::<Vec<_>>(), vec!["faster payouts"]);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let niche: NicheProfile = serde_json::from_str(r#"{"industry":"SaaS"}"#).unwrap();
        assert!(niche.customer_pain_points.is_empty());
        assert!(niche.customer_needs.is_empty());
    }
}
