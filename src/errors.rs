use thiserror::Error;

/// Reasons a proof could not be read or replayed against a verification key.
///
/// These never indicate a bug in the verifier: attacker-controlled proofs are
/// expected input, so every variant ends in `verify_proof` returning `false`.
#[derive(Debug, Error)]
pub enum ProofError {
    #[error("proof ended while reading `{label}`")]
    Truncated { label: String },

    #[error("transcript rejected `{label}`")]
    Transcript {
        label: String,
        #[source]
        source: nimue::ProofError,
    },

    #[error("could not decode `{label}` from the proof")]
    InvalidEncoding { label: String },

    #[error("{0} bytes left unread after the opening proof")]
    TrailingBytes(usize),

    #[error("proof is for a circuit of size {got}, key expects {expected}")]
    CircuitSizeMismatch { expected: u64, got: u64 },

    #[error("proof carries {got} public inputs, key expects {expected}")]
    PublicInputCountMismatch { expected: u64, got: u64 },

    #[error("challenge `{0}` is degenerate")]
    DegenerateChallenge(&'static str),

    #[error("key has {got} masking commitments for {expected} witnesses")]
    MaskingCommitmentCount { expected: usize, got: usize },

    #[error("verification key is malformed: {0}")]
    InvalidKey(&'static str),
}

pub type ProofResult<T> = Result<T, ProofError>;

/// Configuration problems reported by [`crate::flavor::check_configuration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlavorError {
    #[error("relation {relation} reads {entity}, which the flavor does not carry")]
    MissingEntity {
        relation: &'static str,
        entity: &'static str,
    },

    #[error("round univariate holds {got} evaluations, bound requires {expected}")]
    RoundUnivariateLength { expected: usize, got: usize },

    #[error("relation {relation} has partial length {length} above the flavor bound {bound}")]
    RelationTooLong {
        relation: &'static str,
        length: usize,
        bound: usize,
    },

    #[error("ZK bound {batched} leaves no room for masking over non-ZK length {non_zk}")]
    ZkBoundTooSmall { batched: usize, non_zk: usize },

    #[error("flavor declares no relations")]
    NoRelations,
}
