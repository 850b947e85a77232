use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// How a ZK flavor widens its round univariates to make room for the masking
/// polynomial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZkLengthPolicy {
    /// Adds one to the non-ZK length regardless of the relations.
    UniformIncrement,
    /// Adds the largest witness degree, so that every witness factor can carry
    /// its own masking term.
    #[default]
    WitnessDegree,
}

impl ZkLengthPolicy {
    /// The maximum partial relation length of a ZK flavor under this policy.
    pub const fn zk_length(&self, non_zk_length: usize, max_witness_degree: usize) -> usize {
        match self {
            Self::UniformIncrement => non_zk_length + 1,
            Self::WitnessDegree => non_zk_length + max_witness_degree,
        }
    }
}

impl Display for ZkLengthPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UniformIncrement => write!(f, "uniform-increment"),
            Self::WitnessDegree => write!(f, "witness-degree"),
        }
    }
}

/// The degree constants of a flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeBounds {
    /// `max (partial_degree + 1)` over the relations, ignoring masking.
    pub non_zk_max_partial_relation_length: usize,
    /// Largest total degree in witness entities over the relations.
    pub max_witness_degree: usize,
    /// Equal to the non-ZK length unless the flavor is ZK.
    pub max_partial_relation_length: usize,
    /// Evaluations per round univariate, including the pow factor.
    pub batched_relation_partial_length: usize,
    pub has_zk: bool,
    pub zk_length_policy: ZkLengthPolicy,
}

impl DegreeBounds {
    pub const fn new(
        non_zk_max_partial_relation_length: usize,
        max_witness_degree: usize,
        has_zk: bool,
        zk_length_policy: ZkLengthPolicy,
    ) -> Self {
        let max_partial_relation_length = if has_zk {
            zk_length_policy.zk_length(non_zk_max_partial_relation_length, max_witness_degree)
        } else {
            non_zk_max_partial_relation_length
        };

        Self {
            non_zk_max_partial_relation_length,
            max_witness_degree,
            max_partial_relation_length,
            batched_relation_partial_length: max_partial_relation_length + 1,
            has_zk,
            zk_length_policy,
        }
    }
}

impl Display for DegreeBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Max partial relation length: {} (non-ZK {}), max witness degree: {}",
            self.max_partial_relation_length,
            self.non_zk_max_partial_relation_length,
            self.max_witness_degree,
        )?;
        if self.has_zk {
            writeln!(
                f,
                "ZK enabled ({}), {} evaluations per round",
                self.zk_length_policy, self.batched_relation_partial_length
            )
        } else {
            writeln!(
                f,
                "ZK disabled, {} evaluations per round",
                self.batched_relation_partial_length
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zk_length_policy() {
        assert_eq!(ZkLengthPolicy::UniformIncrement.zk_length(4, 2), 5);
        assert_eq!(ZkLengthPolicy::WitnessDegree.zk_length(4, 2), 6);
        assert_eq!(ZkLengthPolicy::default(), ZkLengthPolicy::WitnessDegree);
    }

    #[test]
    fn test_degree_bounds_non_zk_ignores_policy() {
        let bounds = DegreeBounds::new(4, 2, false, ZkLengthPolicy::WitnessDegree);
        assert_eq!(bounds.max_partial_relation_length, 4);
        assert_eq!(bounds.batched_relation_partial_length, 5);
    }

    #[test]
    fn test_degree_bounds_linear_relation() {
        // A single linear relation: partial length 3, witness degree 1.
        let non_zk = DegreeBounds::new(3, 1, false, ZkLengthPolicy::WitnessDegree);
        let zk = DegreeBounds::new(3, 1, true, ZkLengthPolicy::WitnessDegree);
        assert_eq!(non_zk.batched_relation_partial_length, 4);
        assert_eq!(zk.batched_relation_partial_length, 5);
        assert_eq!(
            zk.batched_relation_partial_length,
            non_zk.batched_relation_partial_length + 1
        );
    }

    #[test]
    fn test_degree_bounds_display() {
        let bounds = DegreeBounds::new(4, 2, true, ZkLengthPolicy::UniformIncrement);
        let text = bounds.to_string();
        assert!(text.contains("uniform-increment"));
        assert!(text.contains("6 evaluations per round"));
    }

    #[test]
    fn test_degree_bounds_serde() {
        let bounds = DegreeBounds::new(3, 1, true, ZkLengthPolicy::WitnessDegree);
        let json = serde_json::to_string(&bounds).unwrap();
        let back: DegreeBounds = serde_json::from_str(&json).unwrap();
        assert_eq!(bounds, back);
    }
}
