use tracing::{debug, instrument};

use super::{
    iopattern::honk_io_pattern,
    oink::{OinkProver, OinkProverOutput},
    proving_key::ProvingKey,
};
use crate::{
    crypto::transcript::{HonkProof, Interaction, ProverTranscript, TranscriptIOPattern},
    errors::{ProofError, ProofResult},
    flavor::{Flavor, FF},
    pcs::zeromorph::ZeroMorphProver,
    poly_utils::EvaluationsList,
    relations::AllEntities,
    sumcheck::SumcheckProver,
};

/// Honest prover for flavor `F`: Oink, Sumcheck, then ZeroMorph over KZG.
pub struct UltraProver<'a, F: Flavor> {
    proving_key: &'a ProvingKey<F>,
    io_pattern: TranscriptIOPattern<F::Hasher>,
    transcript: ProverTranscript<F::Hasher>,
}

impl<'a, F: Flavor> UltraProver<'a, F> {
    pub fn new(proving_key: &'a ProvingKey<F>) -> Self {
        let () = F::CONFIGURATION_CHECK;
        let io_pattern = honk_io_pattern::<F>(
            proving_key.log_circuit_size,
            proving_key.public_inputs.len(),
        );
        let transcript = ProverTranscript::new(&io_pattern);
        Self {
            proving_key,
            io_pattern,
            transcript,
        }
    }

    /// Builds a fresh proof. The transcript of the previous call is dropped.
    #[instrument(skip_all, fields(flavor = F::NAME, log_circuit_size = self.proving_key.log_circuit_size))]
    pub fn construct_proof(&mut self) -> ProofResult<HonkProof> {
        let key = self.proving_key;
        self.transcript = ProverTranscript::new(&self.io_pattern);

        let OinkProverOutput {
            relation_parameters,
            witness,
            alphas,
        } = OinkProver::new(key).prove(&mut self.transcript)?;

        let shift_sources = F::ENTITIES
            .shift_sources()
            .ok_or(ProofError::InvalidKey("shifted entity without a source"))?;
        let mut values: Vec<EvaluationsList<FF<F>>> =
            key.precomputed.iter().cloned().chain(witness).collect();
        let shifted: Vec<_> = shift_sources.iter().map(|&i| values[i].shifted()).collect();
        values.extend(shifted);
        let tables = AllEntities::from_values(F::ENTITIES, values).ok_or(ProofError::InvalidKey(
            "proving key does not match the flavor layout",
        ))?;

        let sumcheck = SumcheckProver::<F>::prove(
            &tables,
            &relation_parameters,
            &alphas,
            &key.eval_masking_scalars,
            &mut self.transcript,
        )?;

        // Open the masked witnesses: at the challenge each is its plain table
        // plus the constant `challenge_factor · ρ_k`. Shifts open from the
        // plain tables, since the mask does not commute with the shift.
        let masked_witness: Vec<EvaluationsList<FF<F>>> = if F::HAS_ZK {
            tables
                .witness()
                .iter()
                .zip(&key.eval_masking_scalars)
                .map(|(table, &rho)| {
                    let mut masked = table.clone();
                    masked.add_scaled(
                        sumcheck.challenge_factor,
                        &EvaluationsList::constant(rho, key.log_circuit_size),
                    );
                    masked
                })
                .collect()
        } else {
            tables.witness().to_vec()
        };
        let unshifted: Vec<&EvaluationsList<FF<F>>> =
            tables.precomputed().iter().chain(&masked_witness).collect();
        let to_be_shifted: Vec<&EvaluationsList<FF<F>>> = shift_sources
            .iter()
            .map(|&i| &tables.values()[i])
            .collect();

        ZeroMorphProver::prove(
            &key.commitment_key,
            &unshifted,
            &to_be_shifted,
            &sumcheck.challenge,
            &mut self.transcript,
        )?;

        let proof = self.transcript.proof();
        debug!(proof_bytes = proof.len(), "proof constructed");
        Ok(proof)
    }

    /// Labels and byte ranges of the last proof.
    pub fn manifest(&self) -> &[Interaction] {
        self.transcript.manifest()
    }
}
