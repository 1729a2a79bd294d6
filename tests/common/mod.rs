//! Shared utilities for integration testing against a fake `cardano-cli`.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

use cardano_cli_facade::config::{NetworkKind, OrchestratorConfig};
use cardano_cli_facade::TransactionOrchestrator;

/// Query output with two rows, as the real tool prints it.
pub const UTXO_TABLE: &str = "                           TxHash                                 TxIx        Amount
--------------------------------------------------------------------------------------
b64ae44e1195b04663ab863b62337e626c65b0c9855a9fbb9ef4458f81a6f5ee     0        3000000 lovelace + TxOutDatumNone
f9a1ca3f33d9c1e3cf1ba0ba3e5a1f1bb3a1e1c1d6b08c83f3d0e1ae44aa2a5c     1        2500000 lovelace + TxOutDatumNone
";

/// A shell script standing in for `cardano-cli`, inside its own temp dir.
///
/// Every run appends its argv to `log` before executing `body`.
pub struct FakeCli {
    pub dir: TempDir,
    pub program: PathBuf,
    pub log: PathBuf,
}

impl FakeCli {
    pub fn new(body: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let program = dir.path().join("cardano-cli");
        let log = dir.path().join("calls.log");
        fs::create_dir_all(dir.path().join("tx")).unwrap();
        fs::create_dir_all(dir.path().join("keys")).unwrap();

        let script = format!(
            "#!/bin/sh\necho \"$@\" >> \"{}\"\n{}\n",
            log.display(),
            body
        );
        fs::write(&program, script).unwrap();
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();

        Self { dir, program, log }
    }

    pub fn tx_dir(&self) -> PathBuf {
        self.dir.path().join("tx")
    }

    /// One entry per invocation, argv joined by spaces.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn config(&self, magic: Option<u32>) -> OrchestratorConfig {
        let mut config = OrchestratorConfig::default();
        if magic.is_some() {
            config.network.kind = NetworkKind::Testnet;
            config.network.magic = magic;
        }
        config.cli.executable = self.program.display().to_string();
        config.cli.timeout_secs = 10;
        config.paths.tx_base_path = self.tx_dir();
        config.paths.key_base_path = self.dir.path().join("keys");
        config
    }

    pub fn orchestrator(&self, magic: Option<u32>) -> TransactionOrchestrator {
        TransactionOrchestrator::new(self.config(magic)).unwrap()
    }
}

/// Script body that answers `query utxo` with `table` and, for every other
/// subcommand, creates the file named by the final argument (`--out-file`).
pub fn well_behaved_body(table: &str) -> String {
    format!(
        "case \"$1 $2\" in\n  \"query utxo\") cat <<'ROWS'\n{}ROWS\n  ;;\n  \"transaction submit\") echo 'Transaction successfully submitted.' ;;\n  *) for last; do :; done; touch \"$last\" ;;\nesac",
        table
    )
}
