//! Transaction orchestration: query, build, sign, submit.
//!
//! # Responsibilities
//! - Query and parse unspent outputs for an address
//! - Build unsigned transaction files from chosen inputs
//! - Sign and submit them, tracking the stage of each artifact
//! - Run the whole pipeline in one call ([`TransactionOrchestrator::transfer`])
//!
//! # Known Limitation
//! Nothing stops two concurrent transfers from spending the same UTXOs.
//! The second submission is rejected by the node, not by this code.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::blockchain::artifact::{ArtifactStage, TransactionArtifact};
use crate::blockchain::client::CliClient;
use crate::blockchain::command::{validate_address, validate_key_name, CommandBuilder};
use crate::blockchain::runner::{ProcessRunner, TokioProcessRunner};
use crate::blockchain::types::{
    NetworkTarget, OrchestratorError, OrchestratorResult, TransferReceipt, UnspentOutput,
};
use crate::blockchain::utxo::{parse_utxo_table, total_amount};
use crate::config::schema::OrchestratorConfig;
use crate::config::validation::validate_config;

/// Facade over the external tool.
///
/// Holds only immutable configuration and a shared runner, so clones are
/// cheap and may be used from several tasks at once.
#[derive(Clone, Debug)]
pub struct TransactionOrchestrator {
    client: CliClient,
    commands: CommandBuilder,
    tx_base_path: PathBuf,
    key_base_path: PathBuf,
    amount_unit: String,
}

impl TransactionOrchestrator {
    /// Create an orchestrator that spawns real processes.
    pub fn new(config: OrchestratorConfig) -> OrchestratorResult<Self> {
        Self::with_runner(config, Arc::new(TokioProcessRunner))
    }

    /// Create an orchestrator with a custom process runner.
    pub fn with_runner(
        config: OrchestratorConfig,
        runner: Arc<dyn ProcessRunner>,
    ) -> OrchestratorResult<Self> {
        validate_config(&config).map_err(|errors| {
            OrchestratorError::InvalidConfig(
                errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
            )
        })?;
        let network = config
            .network
            .target()
            .map_err(|e| OrchestratorError::InvalidConfig(e.to_string()))?;

        tracing::info!(
            network = %network,
            era = %config.era,
            executable = %config.cli.executable,
            tx_base_path = %config.paths.tx_base_path.display(),
            "Transaction orchestrator initialized"
        );

        Ok(Self {
            client: CliClient::new(runner, Duration::from_secs(config.cli.timeout_secs)),
            commands: CommandBuilder::new(
                config.cli.executable,
                network,
                config.era,
                config.cli.amount_unit.clone(),
            ),
            tx_base_path: config.paths.tx_base_path,
            key_base_path: config.paths.key_base_path,
            amount_unit: config.cli.amount_unit,
        })
    }

    /// Unspent outputs at `address`, in the order the tool printed them.
    ///
    /// An empty address yields an empty list without running anything.
    pub async fn query_unspent_outputs(
        &self,
        address: &str,
    ) -> OrchestratorResult<Vec<UnspentOutput>> {
        if address.trim().is_empty() {
            return Ok(Vec::new());
        }

        let invocation = self.commands.query_utxo(address)?;
        let stdout = self.client.execute(&invocation).await?;
        let utxos = parse_utxo_table(&stdout)?;

        tracing::debug!(address = %address, utxo_count = utxos.len(), "UTXOs queried");
        Ok(utxos)
    }

    /// Sum of all unspent output amounts at `address`.
    pub async fn compute_total_balance(&self, address: &str) -> OrchestratorResult<u64> {
        let utxos = self.query_unspent_outputs(address).await?;
        total_amount(&utxos)
    }

    /// Build an unsigned transaction spending `inputs`, sending `amount` to
    /// `receiver` and the change back to `sender`.
    pub async fn build_transaction(
        &self,
        sender: &str,
        inputs: &[UnspentOutput],
        receiver: &str,
        amount: u64,
    ) -> OrchestratorResult<TransactionArtifact> {
        if inputs.is_empty() {
            return Err(OrchestratorError::Precondition(
                "At least one UTXO is required.".to_string(),
            ));
        }

        let artifact = TransactionArtifact::fresh();
        let out_file = artifact.path_for(&self.tx_base_path, ArtifactStage::Unsigned);
        let invocation = self
            .commands
            .transaction_build(sender, inputs, receiver, amount, &out_file)?;

        let stdout = self.client.execute(&invocation).await?;
        tracing::debug!(artifact_id = %artifact.id, output = %stdout.trim(), "Build output");
        tracing::info!(
            artifact_id = %artifact.id,
            inputs = inputs.len(),
            amount = amount,
            unit = %self.amount_unit,
            "Transaction built"
        );
        Ok(artifact)
    }

    /// Sign an unsigned artifact with a key from the key directory.
    ///
    /// The returned artifact has the same id at the signed stage.
    pub async fn sign_transaction(
        &self,
        artifact: &TransactionArtifact,
        signing_key_file: &str,
    ) -> OrchestratorResult<TransactionArtifact> {
        artifact.require_stage(ArtifactStage::Unsigned)?;
        validate_key_name(signing_key_file)?;

        let invocation = self.commands.transaction_sign(
            &artifact.path_for(&self.tx_base_path, ArtifactStage::Unsigned),
            &self.key_base_path.join(signing_key_file),
            &artifact.path_for(&self.tx_base_path, ArtifactStage::Signed),
        );
        self.client.execute(&invocation).await?;

        tracing::info!(artifact_id = %artifact.id, key = %signing_key_file, "Transaction signed");
        Ok(artifact.clone().into_signed())
    }

    /// Submit a signed artifact to the network.
    pub async fn submit_transaction(
        &self,
        artifact: &TransactionArtifact,
    ) -> OrchestratorResult<()> {
        artifact.require_stage(ArtifactStage::Signed)?;

        let invocation = self
            .commands
            .transaction_submit(&artifact.path_for(&self.tx_base_path, ArtifactStage::Signed));
        let stdout = self.client.execute(&invocation).await?;

        tracing::info!(
            artifact_id = %artifact.id,
            output = %stdout.trim(),
            "Transaction submitted"
        );
        Ok(())
    }

    /// Query, build, sign, and submit in one go, spending every UTXO at
    /// `sender`.
    ///
    /// Addresses and the key name are checked before the first process runs.
    pub async fn transfer(
        &self,
        sender: &str,
        receiver: &str,
        amount: u64,
        signing_key_file: &str,
    ) -> OrchestratorResult<TransferReceipt> {
        validate_address("sender address", sender)?;
        validate_address("receiver address", receiver)?;
        validate_key_name(signing_key_file)?;

        let inputs = self.query_unspent_outputs(sender).await?;
        if inputs.is_empty() {
            return Err(OrchestratorError::Precondition(format!(
                "No unspent outputs at {}",
                sender
            )));
        }

        let total_input = total_amount(&inputs)?;
        if total_input < amount {
            return Err(OrchestratorError::Precondition(format!(
                "Insufficient funds: {} {} available, {} requested",
                total_input, self.amount_unit, amount
            )));
        }

        let unsigned = self.build_transaction(sender, &inputs, receiver, amount).await?;
        let signed = self.sign_transaction(&unsigned, signing_key_file).await?;
        self.submit_transaction(&signed).await?;

        Ok(TransferReceipt {
            artifact: signed,
            inputs,
            total_input,
        })
    }

    /// On-disk location of the artifact at its current stage.
    pub fn artifact_path(&self, artifact: &TransactionArtifact) -> PathBuf {
        artifact.path_for(&self.tx_base_path, artifact.stage)
    }

    pub fn network(&self) -> NetworkTarget {
        self.commands.network()
    }
}
