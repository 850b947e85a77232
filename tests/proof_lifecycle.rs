use std::{ops::Range, sync::Arc};

use ark_bn254::{Bn254, Fr, G1Affine};
use ark_ec::AffineRepr;
use ark_ff::Field;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::test_rng;

use honk::{
    crypto::transcript::{HonkProof, Interaction},
    flavor::{
        Flavor, LinearFlavor, LinearZkFlavor, MegaFlavor, PlonkishFlavor, PlonkishZkFlavor,
        UltraFlavor, UltraKeccakFlavor, UltraZkFlavor,
    },
    honk::{honk_io_pattern, ProvingKey, UltraProver, UltraVerifier},
    pcs::{kzg::KzgSetup, PairingCounter},
    verification_key::VerificationKey,
};

/// Compressed size of a scalar and of a G1 point on BN254.
const ELEMENT_SIZE: usize = 32;

/// Build a random satisfied circuit of `2^log_circuit_size` rows for flavor
/// `F`, together with its shared verification key.
fn setup<F: Flavor<Curve = Bn254>>(
    log_circuit_size: usize,
    num_public_inputs: usize,
) -> (ProvingKey<F>, Arc<VerificationKey<Bn254>>) {
    let mut rng = test_rng();
    let (commitment_key, pcs_verification_key) =
        KzgSetup::unsafe_setup::<Bn254>(1 << log_circuit_size, &mut rng);
    let proving_key = ProvingKey::<F>::random(
        log_circuit_size,
        num_public_inputs,
        commitment_key,
        pcs_verification_key,
        &mut rng,
    );
    let key = Arc::new(VerificationKey::from_proving_key(&proving_key));
    (proving_key, key)
}

/// Run the honest prover and return the proof with its manifest.
fn prove<F: Flavor<Curve = Bn254>>(proving_key: &ProvingKey<F>) -> (HonkProof, Vec<Interaction>) {
    let mut prover = UltraProver::new(proving_key);
    let proof = prover.construct_proof().unwrap();
    (proof, prover.manifest().to_vec())
}

fn verify<F: Flavor<Curve = Bn254>>(key: &Arc<VerificationKey<Bn254>>, proof: &HonkProof) -> bool {
    UltraVerifier::<F>::new(Arc::clone(key)).verify_proof(proof)
}

/// Byte range of the prover message sent under `label`.
fn byte_range(manifest: &[Interaction], label: &str) -> Range<usize> {
    manifest
        .iter()
        .find_map(|interaction| match interaction {
            Interaction::ProverMessage { label: l, bytes } if l == label => Some(bytes.clone()),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no prover message labelled {label}"))
}

/// Add one to the scalar encoded at `offset`.
fn bump_scalar(proof: &HonkProof, offset: usize) -> HonkProof {
    let mut bytes = proof.0.clone();
    let slot = &mut bytes[offset..offset + ELEMENT_SIZE];
    let value = Fr::deserialize_compressed(&slot[..]).unwrap() + Fr::ONE;
    value.serialize_compressed(&mut slot[..]).unwrap();
    HonkProof(bytes)
}

/// Replace the point encoded at `offset` with the group generator.
fn replace_point(proof: &HonkProof, offset: usize) -> HonkProof {
    let mut bytes = proof.0.clone();
    G1Affine::generator()
        .serialize_compressed(&mut bytes[offset..offset + ELEMENT_SIZE])
        .unwrap();
    HonkProof(bytes)
}

fn assert_complete<F: Flavor<Curve = Bn254>>(log_circuit_size: usize) {
    let (proving_key, key) = setup::<F>(log_circuit_size, 2);
    let (proof, _) = prove(&proving_key);

    PairingCounter::reset();
    assert!(
        verify::<F>(&key, &proof),
        "{} rejects an honest proof with d = {log_circuit_size}",
        F::NAME
    );
    assert_eq!(PairingCounter::get(), 1);
}

#[test]
fn test_honest_proofs_verify() {
    for d in [2, 5] {
        assert_complete::<UltraFlavor>(d);
        assert_complete::<UltraKeccakFlavor>(d);
        assert_complete::<UltraZkFlavor>(d);
        assert_complete::<MegaFlavor>(d);
        assert_complete::<PlonkishFlavor>(d);
        assert_complete::<PlonkishZkFlavor>(d);
        assert_complete::<LinearFlavor>(d);
        assert_complete::<LinearZkFlavor>(d);
    }
}

#[test]
fn test_tampered_round_univariate_skips_pairing() {
    let (proving_key, key) = setup::<UltraFlavor>(4, 1);
    let (proof, manifest) = prove(&proving_key);
    let range = byte_range(&manifest, "Sumcheck:univariate_0");
    let tampered = bump_scalar(&proof, range.start);

    PairingCounter::reset();
    assert!(!verify::<UltraFlavor>(&key, &tampered));
    assert_eq!(PairingCounter::get(), 0);
}

fn assert_zk_round_tamper_skips_pairing<F: Flavor<Curve = Bn254>>() {
    let (proving_key, key) = setup::<F>(4, 1);
    let (proof, manifest) = prove(&proving_key);
    // The last round is the only one the masking touches.
    let range = byte_range(&manifest, "Sumcheck:univariate_3");
    let tampered = bump_scalar(&proof, range.start + ELEMENT_SIZE);

    PairingCounter::reset();
    assert!(!verify::<F>(&key, &tampered), "{}", F::NAME);
    assert_eq!(PairingCounter::get(), 0, "{}", F::NAME);
}

#[test]
fn test_tampered_zk_round_univariate_skips_pairing() {
    assert_zk_round_tamper_skips_pairing::<PlonkishZkFlavor>();
    assert_zk_round_tamper_skips_pairing::<UltraZkFlavor>();
}

#[test]
fn test_zk_shifted_opening_is_bound() {
    let (proving_key, key) = setup::<UltraZkFlavor>(3, 1);
    let (proof, manifest) = prove(&proving_key);

    // The shifted accumulator is the last claimed evaluation.
    let range = byte_range(&manifest, "Sumcheck:evaluations");
    let tampered = bump_scalar(&proof, range.end - ELEMENT_SIZE);
    assert!(!verify::<UltraZkFlavor>(&key, &tampered));

    for label in ["W_ACC", "KZG:W"] {
        let tampered = replace_point(&proof, byte_range(&manifest, label).start);
        assert!(!verify::<UltraZkFlavor>(&key, &tampered), "{label}");
    }

    let mut wrong_mask = (*key).clone();
    let last = wrong_mask.eval_masking_commitments.len() - 1;
    wrong_mask.eval_masking_commitments[last] = G1Affine::generator();
    assert!(!verify::<UltraZkFlavor>(&Arc::new(wrong_mask), &proof));

    assert!(verify::<UltraZkFlavor>(&key, &proof));
}

#[test]
fn test_tampered_evaluations_rejected() {
    let (proving_key, key) = setup::<MegaFlavor>(3, 0);
    let (proof, manifest) = prove(&proving_key);
    let range = byte_range(&manifest, "Sumcheck:evaluations");
    for offset in range.step_by(ELEMENT_SIZE) {
        assert!(!verify::<MegaFlavor>(&key, &bump_scalar(&proof, offset)));
    }
}

#[test]
fn test_tampered_opening_fails_pairing() {
    let (proving_key, key) = setup::<UltraFlavor>(3, 1);
    let (proof, manifest) = prove(&proving_key);

    for label in ["KZG:W", "ZM:C_q", "ZM:C_q_1"] {
        let tampered = replace_point(&proof, byte_range(&manifest, label).start);
        PairingCounter::reset();
        assert!(!verify::<UltraFlavor>(&key, &tampered), "{label}");
        assert_eq!(PairingCounter::get(), 1, "{label}");
    }
}

#[test]
fn test_malformed_proofs_rejected() {
    let (proving_key, key) = setup::<PlonkishFlavor>(3, 1);
    let (proof, _) = prove(&proving_key);

    let mut truncated = proof.clone();
    truncated.0.pop();
    assert!(!verify::<PlonkishFlavor>(&key, &truncated));

    let mut trailing = proof.clone();
    trailing.0.push(0);
    assert!(!verify::<PlonkishFlavor>(&key, &trailing));

    assert!(!verify::<PlonkishFlavor>(&key, &HonkProof::default()));
    assert!(verify::<PlonkishFlavor>(&key, &proof));
}

#[test]
fn test_key_mismatch_rejected() {
    let (proving_key, key) = setup::<PlonkishZkFlavor>(3, 1);
    let (proof, _) = prove(&proving_key);

    let mut wrong_inputs = (*key).clone();
    wrong_inputs.num_public_inputs += 1;
    assert!(!verify::<PlonkishZkFlavor>(&Arc::new(wrong_inputs), &proof));

    let mut wrong_mask = (*key).clone();
    wrong_mask.eval_masking_commitments[0] = G1Affine::generator();
    assert!(!verify::<PlonkishZkFlavor>(&Arc::new(wrong_mask), &proof));

    let mut missing_mask = (*key).clone();
    missing_mask.eval_masking_commitments.pop();
    assert!(!verify::<PlonkishZkFlavor>(&Arc::new(missing_mask), &proof));

    // Same key material read as the non-ZK flavor.
    assert!(!verify::<PlonkishFlavor>(&key, &proof));
}

#[test]
fn test_transcript_hash_must_match() {
    let (proving_key, key) = setup::<UltraKeccakFlavor>(3, 1);
    let (proof, _) = prove(&proving_key);

    assert!(verify::<UltraKeccakFlavor>(&key, &proof));
    assert!(!verify::<UltraFlavor>(&key, &proof));
}

#[test]
fn test_linear_round_sizes() {
    let (plain_key, plain_vk) = setup::<LinearFlavor>(3, 0);
    let (zk_key, zk_vk) = setup::<LinearZkFlavor>(3, 0);
    let (plain_proof, plain_manifest) = prove(&plain_key);
    let (zk_proof, zk_manifest) = prove(&zk_key);

    for round in 0..3 {
        let label = format!("Sumcheck:univariate_{round}");
        assert_eq!(byte_range(&plain_manifest, &label).len(), 4 * ELEMENT_SIZE);
        assert_eq!(byte_range(&zk_manifest, &label).len(), 5 * ELEMENT_SIZE);
    }
    assert!(verify::<LinearFlavor>(&plain_vk, &plain_proof));
    assert!(verify::<LinearZkFlavor>(&zk_vk, &zk_proof));

    assert!(!verify::<LinearFlavor>(&plain_vk, &zk_proof));
    assert!(!verify::<LinearZkFlavor>(&zk_vk, &plain_proof));

    // Each round 1 evaluation plus one, for both flavors.
    let cases = [
        (&plain_proof, &plain_manifest, false),
        (&zk_proof, &zk_manifest, true),
    ];
    for (proof, manifest, zk) in cases {
        let range = byte_range(manifest, "Sumcheck:univariate_1");
        for offset in range.step_by(ELEMENT_SIZE) {
            let tampered = bump_scalar(proof, offset);
            PairingCounter::reset();
            let accepted = if zk {
                verify::<LinearZkFlavor>(&zk_vk, &tampered)
            } else {
                verify::<LinearFlavor>(&plain_vk, &tampered)
            };
            assert!(!accepted, "offset {offset}");
            assert_eq!(PairingCounter::get(), 0, "offset {offset}");
        }
    }
}

#[test]
fn test_concurrent_verification_shares_key() {
    let (proving_key, key) = setup::<MegaFlavor>(4, 3);
    let (proof, _) = prove(&proving_key);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let key = Arc::clone(&key);
                let proof = &proof;
                scope.spawn(move || {
                    let mut verifier = UltraVerifier::<MegaFlavor>::new(key);
                    (0..2).all(|_| verifier.verify_proof(proof))
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    });
}

#[test]
fn test_verifier_reuse_starts_fresh_transcripts() {
    let (proving_key, key) = setup::<UltraFlavor>(3, 1);
    let (proof, manifest) = prove(&proving_key);

    let io_pattern = honk_io_pattern::<UltraFlavor>(3, 1);
    let mut verifier = UltraVerifier::<UltraFlavor>::with_transcript(io_pattern, Arc::clone(&key));

    assert!(verifier.verify_proof(&proof));
    assert_eq!(verifier.manifest(), &manifest[..]);

    let tampered = replace_point(&proof, byte_range(&manifest, "KZG:W").start);
    assert!(!verifier.verify_proof(&tampered));
    assert!(verifier.verify_proof(&proof));
    assert!(verifier.verify_proof(&proof));
    assert_eq!(verifier.manifest(), &manifest[..]);
}

#[test]
fn test_verifier_schedule_must_match_proof() {
    let (proving_key, key) = setup::<UltraFlavor>(3, 1);
    let (proof, _) = prove(&proving_key);

    // Schedules for another public input count or another flavor name.
    let two_inputs = honk_io_pattern::<UltraFlavor>(3, 2);
    let mut verifier = UltraVerifier::<UltraFlavor>::with_transcript(two_inputs, Arc::clone(&key));
    assert!(!verifier.verify_proof(&proof));

    let renamed = honk_io_pattern::<UltraZkFlavor>(3, 1);
    let mut verifier = UltraVerifier::<UltraFlavor>::with_transcript(renamed, Arc::clone(&key));
    PairingCounter::reset();
    assert!(!verifier.verify_proof(&proof));
    assert_eq!(PairingCounter::get(), 0);
}
