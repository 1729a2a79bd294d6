//! End-to-end tests driving a scripted `cardano-cli` through real processes.

#![cfg(unix)]

use std::time::{Duration, Instant};

use cardano_cli_facade::blockchain::ArtifactStage;
use cardano_cli_facade::{OrchestratorError, TransactionArtifact, TransactionOrchestrator};

mod common;

use common::{well_behaved_body, FakeCli, UTXO_TABLE};

const TESTNET_MAGIC: u32 = 1097911063;

#[tokio::test]
async fn test_query_and_balance_through_process() {
    let cli = FakeCli::new(&well_behaved_body(UTXO_TABLE));
    let orchestrator = cli.orchestrator(Some(TESTNET_MAGIC));

    let utxos = orchestrator.query_unspent_outputs("addr_test1sender").await.unwrap();
    assert_eq!(utxos.len(), 2);
    assert_eq!(utxos[0].output_index, "0");
    assert_eq!(utxos[1].amount, 2_500_000);

    let balance = orchestrator.compute_total_balance("addr_test1sender").await.unwrap();
    assert_eq!(balance, 5_500_000);

    let calls = cli.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0],
        "query utxo --address addr_test1sender --testnet-magic=1097911063"
    );
}

#[tokio::test]
async fn test_empty_address_never_spawns() {
    let cli = FakeCli::new(&well_behaved_body(UTXO_TABLE));
    let orchestrator = cli.orchestrator(Some(TESTNET_MAGIC));

    assert!(orchestrator.query_unspent_outputs("").await.unwrap().is_empty());
    assert!(cli.calls().is_empty());
}

#[tokio::test]
async fn test_transfer_writes_both_files() {
    let cli = FakeCli::new(&well_behaved_body(UTXO_TABLE));
    let orchestrator = cli.orchestrator(None);

    let receipt = orchestrator
        .transfer("addr1sender", "addr1receiver", 1_000_000, "payment.skey")
        .await
        .unwrap();

    assert_eq!(receipt.artifact.stage, ArtifactStage::Signed);
    assert_eq!(receipt.total_input, 5_500_000);

    let id = receipt.artifact.id.as_str();
    assert!(cli.tx_dir().join(format!("unsigned_{id}.tx")).exists());
    assert!(cli.tx_dir().join(format!("signed_{id}.tx")).exists());

    let calls = cli.calls();
    assert_eq!(calls.len(), 4);
    assert!(calls.iter().all(|c| c.contains("--mainnet")));
    assert!(calls.iter().all(|c| !c.contains("--testnet-magic")));
    assert!(calls[1]
        .starts_with("transaction build --alonzo-era --mainnet --change-address addr1sender"));
    assert!(calls[1].contains("--tx-out addr1receiver 1000000 lovelace"));
    assert!(calls[2].contains("payment.skey"));
    assert!(calls[3].starts_with("transaction submit --mainnet --tx-file"));
}

#[tokio::test]
async fn test_nonzero_exit_surfaces_raw_stderr() {
    let cli = FakeCli::new(
        concat!(
            "printf 'Command failed: %s %s\\nError: Error while reading key file\\n' ",
            "\"$1\" \"$2\" >&2\nexit 1",
        ),
    );
    let orchestrator = cli.orchestrator(Some(TESTNET_MAGIC));

    let err = orchestrator
        .sign_transaction(&TransactionArtifact::unsigned("abc").unwrap(), "missing.skey")
        .await
        .unwrap_err();
    assert_eq!(
        err.tool_stderr(),
        Some("Command failed: transaction sign\nError: Error while reading key file\n")
    );

    let err = orchestrator
        .submit_transaction(&TransactionArtifact::signed("abc").unwrap())
        .await
        .unwrap_err();
    match err {
        OrchestratorError::ExternalTool { subcommand, status, stderr } => {
            assert_eq!(subcommand, "transaction submit");
            assert_eq!(status, Some(1));
            assert_eq!(
                stderr,
                "Command failed: transaction submit\nError: Error while reading key file\n"
            );
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = orchestrator.query_unspent_outputs("addr_test1x").await.unwrap_err();
    assert!(err.tool_stderr().unwrap().starts_with("Command failed: query utxo"));
}

#[tokio::test]
async fn test_hung_process_times_out() {
    let cli = FakeCli::new("sleep 30");
    let mut config = cli.config(Some(TESTNET_MAGIC));
    config.cli.timeout_secs = 1;
    let orchestrator = TransactionOrchestrator::new(config).unwrap();

    let start = Instant::now();
    let err = orchestrator.query_unspent_outputs("addr_test1x").await.unwrap_err();

    assert!(matches!(
        err,
        OrchestratorError::Timeout { subcommand: "query utxo", secs: 1 }
    ));
    assert!(start.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_missing_executable_is_spawn_error() {
    let cli = FakeCli::new("exit 0");
    let mut config = cli.config(None);
    config.cli.executable = cli.dir.path().join("not-installed").display().to_string();
    let orchestrator = TransactionOrchestrator::new(config).unwrap();

    let err = orchestrator
        .submit_transaction(&TransactionArtifact::signed("abc").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, OrchestratorError::Spawn { .. }));
}
