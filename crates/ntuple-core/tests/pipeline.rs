//! End-to-end tests for the train -> export -> verify pipeline.

use ntuple_core::error::NTupleError;
use ntuple_core::eval::NTupleNetwork;
use ntuple_core::model;
use ntuple_core::pattern::PATTERNS;
use ntuple_core::trainer::{TdLambdaTrainer, TrainerConfig};

fn weight_bits(network: &NTupleNetwork) -> Vec<u32> {
    network
        .weights()
        .iter()
        .flat_map(|table| table.iter().map(|w| w.to_bits()))
        .collect()
}

#[test]
fn identical_seeds_produce_identical_weights() {
    let config = TrainerConfig {
        alpha: 0.05,
        lambda: 0.7,
        epsilon: 0.2,
        seed: 20240817,
    };

    let mut a = TdLambdaTrainer::new(NTupleNetwork::new(), config).unwrap();
    let mut b = TdLambdaTrainer::new(NTupleNetwork::new(), config).unwrap();
    a.train(2).unwrap();
    b.train(2).unwrap();

    assert_eq!(weight_bits(a.network()), weight_bits(b.network()));
}

#[test]
fn different_seeds_diverge() {
    let base = TrainerConfig {
        epsilon: 1.0,
        ..Default::default()
    };

    let mut a = TdLambdaTrainer::new(
        NTupleNetwork::new(),
        TrainerConfig { seed: 1, ..base },
    )
    .unwrap();
    let mut b = TdLambdaTrainer::new(
        NTupleNetwork::new(),
        TrainerConfig { seed: 2, ..base },
    )
    .unwrap();
    a.train(1).unwrap();
    b.train(1).unwrap();

    // Fully random play from two different seeds follows different games.
    assert_ne!(weight_bits(a.network()), weight_bits(b.network()));
}

#[test]
fn train_zero_games_exports_a_verifiable_zero_model() {
    let mut trainer =
        TdLambdaTrainer::new(NTupleNetwork::new(), TrainerConfig::default()).unwrap();
    trainer.train(0).unwrap();

    let network = trainer.into_network();
    for table in network.weights() {
        assert!(table.iter().all(|&w| w == 0.0));
    }

    let payload = model::export(&network).unwrap();
    model::verify(&payload, &PATTERNS).unwrap();
}

#[test]
fn trained_model_round_trips_through_the_codec() {
    let config = TrainerConfig {
        seed: 7,
        ..Default::default()
    };
    let mut trainer = TdLambdaTrainer::new(NTupleNetwork::new(), config).unwrap();
    trainer.train(3).unwrap();

    let payload = model::export(trainer.network()).unwrap();
    model::verify(&payload, &PATTERNS).unwrap();

    // Exporting the same network twice is byte-identical.
    assert_eq!(payload, model::export(trainer.network()).unwrap());
}

#[test]
fn corrupted_export_is_rejected_with_a_crc_error() {
    let payload = model::export(&NTupleNetwork::new()).unwrap();

    for offset in [
        model::HEADER_SIZE,
        model::HEADER_SIZE + 100,
        payload.len() - 1,
    ] {
        let mut tampered = payload.clone();
        tampered[offset] ^= 0xFF;
        match model::verify(&tampered, &PATTERNS) {
            Err(NTupleError::Format(msg)) => {
                assert!(msg.contains("CRC32 mismatch"), "unexpected message: {msg}")
            }
            other => panic!("expected CRC failure, got {other:?}"),
        }
    }
}
