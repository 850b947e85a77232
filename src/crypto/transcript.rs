//! Fiat-Shamir transcripts over a nimue duplex sponge.
//!
//! The message schedule of a proof is fixed upfront as an [`IOPattern`]; the
//! sponge refuses any absorb or squeeze that departs from it. The wrappers
//! here add the label manifest and the byte ranges of every prover message.

use std::ops::Range;

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use nimue::{
    hash::legacy::DigestBridge,
    plugins::ark::{FieldChallenges, FieldReader, FieldWriter, GroupReader, GroupWriter},
    Arthur, ByteReader, ByteWriter, DuplexHash, IOPattern, Merlin,
};
use serde::{Deserialize, Serialize};

use crate::errors::{ProofError, ProofResult};

/// Sponge a flavor runs its transcript on.
pub trait TranscriptHasher: Clone + Send + Sync + 'static {
    const NAME: &'static str;

    type Sponge: DuplexHash<u8>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3Hasher;

impl TranscriptHasher for Blake3Hasher {
    const NAME: &'static str = "blake3";

    type Sponge = DigestBridge<blake3::Hasher>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct KeccakHasher;

impl TranscriptHasher for KeccakHasher {
    const NAME: &'static str = "keccak256";

    type Sponge = DigestBridge<sha3::Keccak256>;
}

/// Message schedule for transcripts hashed with `H`.
pub type TranscriptIOPattern<H> = IOPattern<<H as TranscriptHasher>::Sponge>;

/// Serialized proof: the compressed encodings of all prover messages in
/// transcript order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HonkProof(pub Vec<u8>);

impl HonkProof {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum Interaction {
    /// A prover message and where its bytes sit in the proof.
    ProverMessage { label: String, bytes: Range<usize> },
    VerifierMessage { label: String },
}

impl Interaction {
    pub fn label(&self) -> &str {
        match self {
            Self::ProverMessage { label, .. } | Self::VerifierMessage { label } => label,
        }
    }
}

fn transcript_error(label: &str) -> impl FnOnce(nimue::ProofError) -> ProofError + '_ {
    move |source| ProofError::Transcript {
        label: label.to_owned(),
        source,
    }
}

/// Prover side: writes messages into the proof and squeezes challenges.
pub struct ProverTranscript<H: TranscriptHasher> {
    merlin: Merlin<H::Sponge>,
    manifest: Vec<Interaction>,
}

impl<H: TranscriptHasher> ProverTranscript<H> {
    pub fn new(io_pattern: &TranscriptIOPattern<H>) -> Self {
        Self {
            merlin: io_pattern.to_merlin(),
            manifest: Vec::new(),
        }
    }

    fn send(
        &mut self,
        label: &str,
        write: impl FnOnce(&mut Merlin<H::Sponge>) -> nimue::ProofResult<()>,
    ) -> ProofResult<()> {
        let start = self.merlin.transcript().len();
        write(&mut self.merlin).map_err(transcript_error(label))?;
        self.manifest.push(Interaction::ProverMessage {
            label: label.to_owned(),
            bytes: start..self.merlin.transcript().len(),
        });
        Ok(())
    }

    /// Sends a size as 8 little-endian bytes.
    pub fn send_size(&mut self, label: &str, value: u64) -> ProofResult<()> {
        self.send(label, |merlin| Ok(merlin.add_bytes(&value.to_le_bytes())?))
    }

    pub fn send_scalars<F: PrimeField>(&mut self, label: &str, values: &[F]) -> ProofResult<()> {
        self.send(label, |merlin| merlin.add_scalars(values))
    }

    pub fn send_points<G: AffineRepr>(&mut self, label: &str, points: &[G]) -> ProofResult<()> {
        let points: Vec<G::Group> = points.iter().map(|point| point.into_group()).collect();
        self.send(label, |merlin| merlin.add_points(&points))
    }

    pub fn get_challenge<F: PrimeField>(&mut self, label: &str) -> ProofResult<F> {
        let [challenge]: [F; 1] = self
            .merlin
            .challenge_scalars()
            .map_err(transcript_error(label))?;
        self.manifest.push(Interaction::VerifierMessage {
            label: label.to_owned(),
        });
        Ok(challenge)
    }

    pub fn manifest(&self) -> &[Interaction] {
        &self.manifest
    }

    pub fn proof(&self) -> HonkProof {
        HonkProof(self.merlin.transcript().to_vec())
    }
}

/// Verifier side: reads prover messages back from a proof.
///
/// Reads that run past the end of the proof are reported as
/// [`ProofError::Truncated`] before the sponge sees them.
pub struct VerifierTranscript<'a, H: TranscriptHasher> {
    arthur: Arthur<'a, H::Sponge>,
    proof_len: usize,
    num_bytes_read: usize,
    manifest: Vec<Interaction>,
}

impl<'a, H: TranscriptHasher> VerifierTranscript<'a, H> {
    pub fn new(io_pattern: &TranscriptIOPattern<H>, proof: &'a HonkProof) -> Self {
        Self {
            arthur: io_pattern.to_arthur(&proof.0),
            proof_len: proof.len(),
            num_bytes_read: 0,
            manifest: Vec::new(),
        }
    }

    fn receive<T>(
        &mut self,
        label: &str,
        num_bytes: usize,
        read: impl FnOnce(&mut Arthur<'a, H::Sponge>) -> nimue::ProofResult<T>,
    ) -> ProofResult<T> {
        let start = self.num_bytes_read;
        let end = start + num_bytes;
        if end > self.proof_len {
            return Err(ProofError::Truncated {
                label: label.to_owned(),
            });
        }
        let value = read(&mut self.arthur).map_err(transcript_error(label))?;
        self.num_bytes_read = end;
        self.manifest.push(Interaction::ProverMessage {
            label: label.to_owned(),
            bytes: start..end,
        });
        Ok(value)
    }

    pub fn receive_size(&mut self, label: &str) -> ProofResult<u64> {
        let bytes: [u8; 8] = self.receive(label, 8, |arthur| Ok(arthur.next_bytes()?))?;
        Ok(u64::from_le_bytes(bytes))
    }

    pub fn receive_scalars<F: PrimeField>(
        &mut self,
        label: &str,
        count: usize,
    ) -> ProofResult<Vec<F>> {
        let size = F::ZERO.compressed_size();
        self.receive(label, count * size, |arthur| {
            let mut values = vec![F::ZERO; count];
            arthur.fill_next_scalars(&mut values)?;
            Ok(values)
        })
    }

    pub fn receive_scalar<F: PrimeField>(&mut self, label: &str) -> ProofResult<F> {
        let [value]: [F; 1] = self
            .receive_scalars(label, 1)?
            .try_into()
            .map_err(|_| ProofError::Truncated {
                label: label.to_owned(),
            })?;
        Ok(value)
    }

    pub fn receive_points<G: AffineRepr>(
        &mut self,
        label: &str,
        count: usize,
    ) -> ProofResult<Vec<G>> {
        let size = G::zero().compressed_size();
        let points = self.receive(label, count * size, |arthur| {
            let mut points = vec![G::zero().into_group(); count];
            arthur.fill_next_points(&mut points)?;
            Ok(points)
        })?;
        Ok(G::Group::normalize_batch(&points))
    }

    pub fn receive_point<G: AffineRepr>(&mut self, label: &str) -> ProofResult<G> {
        let [point]: [G; 1] = self
            .receive_points(label, 1)?
            .try_into()
            .map_err(|_| ProofError::Truncated {
                label: label.to_owned(),
            })?;
        Ok(point)
    }

    pub fn get_challenge<F: PrimeField>(&mut self, label: &str) -> ProofResult<F> {
        let [challenge]: [F; 1] = self
            .arthur
            .challenge_scalars()
            .map_err(transcript_error(label))?;
        self.manifest.push(Interaction::VerifierMessage {
            label: label.to_owned(),
        });
        Ok(challenge)
    }

    pub fn remaining_bytes(&self) -> usize {
        self.proof_len - self.num_bytes_read
    }

    pub fn manifest(&self) -> &[Interaction] {
        &self.manifest
    }

    pub fn into_manifest(self) -> Vec<Interaction> {
        self.manifest
    }
}
