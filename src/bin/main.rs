use std::{
    process::ExitCode,
    sync::Arc,
    time::{Duration, Instant},
};

use ark_bn254::Bn254;
use clap::Parser;
use honk::{
    cmdline_utils::AvailableFlavors,
    crypto::{fields::FieldWithSize, transcript::TranscriptHasher},
    flavor::{
        check_configuration, Flavor, LinearFlavor, LinearZkFlavor, MegaFlavor, PlonkishFlavor,
        PlonkishZkFlavor, UltraFlavor, UltraKeccakFlavor, UltraZkFlavor, FF,
    },
    honk::{ProvingKey, UltraProver, UltraVerifier},
    parameters::DegreeBounds,
    pcs::{kzg::KzgSetup, PairingCounter},
    verification_key::VerificationKey,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short = 'f', long, default_value = "ultra")]
    flavor: AvailableFlavors,

    #[arg(short = 'd', long, default_value = "10")]
    num_variables: usize,

    #[arg(long = "public-inputs", default_value = "1")]
    num_public_inputs: usize,

    #[arg(long = "reps", default_value = "10")]
    verifier_repetitions: usize,

    #[arg(long, default_value = "0")]
    seed: u64,
}

#[derive(Debug, Serialize)]
struct RunOutput {
    flavor: AvailableFlavors,
    hasher: &'static str,
    scalar_bits: usize,
    num_variables: usize,
    num_public_inputs: usize,
    repetitions: usize,
    bounds: DegreeBounds,

    proof_size: usize,
    prover_time: Duration,
    verifier_time: Duration,
    pairings_per_verification: usize,
    accepted: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Type reflection on flavor
    let output = match args.flavor {
        AvailableFlavors::Ultra => run::<UltraFlavor>(&args),
        AvailableFlavors::UltraKeccak => run::<UltraKeccakFlavor>(&args),
        AvailableFlavors::UltraZk => run::<UltraZkFlavor>(&args),
        AvailableFlavors::Mega => run::<MegaFlavor>(&args),
        AvailableFlavors::Plonkish => run::<PlonkishFlavor>(&args),
        AvailableFlavors::PlonkishZk => run::<PlonkishZkFlavor>(&args),
        AvailableFlavors::Linear => run::<LinearFlavor>(&args),
        AvailableFlavors::LinearZk => run::<LinearZkFlavor>(&args),
    };

    match output {
        Ok(output) => {
            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{json}"),
                Err(err) => eprintln!("could not serialize report: {err}"),
            }
            if output.accepted {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run<F: Flavor<Curve = Bn254>>(args: &Args) -> Result<RunOutput, String> {
    let bounds = check_configuration::<F>().map_err(|err| err.to_string())?;
    let num_variables = args.num_variables;
    let reps = args.verifier_repetitions.max(1);
    let mut rng = ChaCha20Rng::seed_from_u64(args.seed);

    println!("=========================================");
    println!("Honk ({})", F::NAME);
    println!("Transcript: {}", <F::Hasher as TranscriptHasher>::NAME);
    println!("{bounds}");

    let (commitment_key, pcs_verification_key) =
        KzgSetup::unsafe_setup::<Bn254>(1 << num_variables, &mut rng);
    let proving_key = ProvingKey::<F>::random(
        num_variables,
        args.num_public_inputs,
        commitment_key,
        pcs_verification_key,
        &mut rng,
    );
    let verification_key = Arc::new(VerificationKey::from_proving_key(&proving_key));

    let prover_time = Instant::now();
    let proof = UltraProver::new(&proving_key)
        .construct_proof()
        .map_err(|err| err.to_string())?;
    let prover_time = prover_time.elapsed();
    println!("Prover time: {prover_time:.1?}");
    println!("Proof size: {:.1} KiB", proof.len() as f64 / 1024.0);

    let mut verifier = UltraVerifier::<F>::new(verification_key);
    PairingCounter::reset();
    let verifier_time = Instant::now();
    let mut accepted = true;
    for _ in 0..reps {
        accepted &= verifier.verify_proof(&proof);
    }
    let verifier_time = verifier_time.elapsed() / reps as u32;
    println!("Verifier time: {verifier_time:.1?}");

    Ok(RunOutput {
        flavor: args.flavor,
        hasher: <F::Hasher as TranscriptHasher>::NAME,
        scalar_bits: FF::<F>::field_size_in_bits(),
        num_variables,
        num_public_inputs: args.num_public_inputs,
        repetitions: reps,
        bounds,

        proof_size: proof.len(),
        prover_time,
        verifier_time,
        pairings_per_verification: PairingCounter::get() / reps,
        accepted,
    })
}
