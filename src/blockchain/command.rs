//! Argument construction for the external tool.
//!
//! Every value becomes its own argv token and is handed straight to the
//! process spawner; nothing is ever interpolated through a shell. Values
//! that could still be misread by the tool (a leading `-`, embedded
//! whitespace inside a multi-part token) are rejected up front.

use std::fmt;
use std::path::{Component, Path};

use crate::blockchain::types::{
    Era, NetworkTarget, OrchestratorError, OrchestratorResult, UnspentOutput,
};

/// The four subcommands this crate drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subcommand {
    QueryUtxo,
    TransactionBuild,
    TransactionSign,
    TransactionSubmit,
}

impl Subcommand {
    /// The leading argv tokens, e.g. `["query", "utxo"]`.
    pub fn tokens(&self) -> [&'static str; 2] {
        match self {
            Self::QueryUtxo => ["query", "utxo"],
            Self::TransactionBuild => ["transaction", "build"],
            Self::TransactionSign => ["transaction", "sign"],
            Self::TransactionSubmit => ["transaction", "submit"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QueryUtxo => "query utxo",
            Self::TransactionBuild => "transaction build",
            Self::TransactionSign => "transaction sign",
            Self::TransactionSubmit => "transaction submit",
        }
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built command: program, subcommand, and flag tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub subcommand: Subcommand,
    /// Tokens after the subcommand.
    pub args: Vec<String>,
}

impl Invocation {
    /// Complete argument vector (subcommand tokens included, program excluded).
    pub fn argv(&self) -> Vec<String> {
        self.subcommand
            .tokens()
            .iter()
            .map(|t| t.to_string())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Value following `flag`, if present.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Every value following occurrences of `flag`.
    pub fn flag_values(&self, flag: &str) -> Vec<&str> {
        self.args
            .windows(2)
            .filter(|pair| pair[0] == flag)
            .map(|pair| pair[1].as_str())
            .collect()
    }

    pub fn has_arg(&self, token: &str) -> bool {
        self.args.iter().any(|a| a == token)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program, self.argv().join(" "))
    }
}

/// Builds [`Invocation`]s for one network/era/unit combination.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: String,
    network: NetworkTarget,
    era: Era,
    amount_unit: String,
}

impl CommandBuilder {
    pub fn new(
        program: impl Into<String>,
        network: NetworkTarget,
        era: Era,
        amount_unit: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            network,
            era,
            amount_unit: amount_unit.into(),
        }
    }

    pub fn network(&self) -> NetworkTarget {
        self.network
    }

    fn invocation(&self, subcommand: Subcommand, args: Vec<String>) -> Invocation {
        Invocation {
            program: self.program.clone(),
            subcommand,
            args,
        }
    }

    /// `query utxo --address <address> <network>`
    pub fn query_utxo(&self, address: &str) -> OrchestratorResult<Invocation> {
        validate_address("address", address)?;
        Ok(self.invocation(
            Subcommand::QueryUtxo,
            vec!["--address".to_string(), address.to_string(), self.network.flag()],
        ))
    }

    /// `transaction build --<era> <network> --change-address ... --tx-in ...
    /// --tx-out ... --out-file ...`
    pub fn transaction_build(
        &self,
        change_address: &str,
        inputs: &[UnspentOutput],
        receiver: &str,
        amount: u64,
        out_file: &Path,
    ) -> OrchestratorResult<Invocation> {
        validate_address("sender address", change_address)?;
        validate_address("receiver address", receiver)?;

        let mut args = vec![
            self.era.flag(),
            self.network.flag(),
            "--change-address".to_string(),
            change_address.to_string(),
        ];
        for input in inputs {
            validate_token("tx-in hash", &input.tx_hash)?;
            validate_token("tx-in index", &input.output_index)?;
            args.push("--tx-in".to_string());
            args.push(input.input_ref());
        }
        args.push("--tx-out".to_string());
        args.push(format!("{} {} {}", receiver, amount, self.amount_unit));
        args.push("--out-file".to_string());
        args.push(path_token(out_file));

        Ok(self.invocation(Subcommand::TransactionBuild, args))
    }

    /// `transaction sign <network> --tx-body-file ... --signing-key-file ... --out-file ...`
    pub fn transaction_sign(
        &self,
        body_file: &Path,
        signing_key_file: &Path,
        out_file: &Path,
    ) -> Invocation {
        self.invocation(
            Subcommand::TransactionSign,
            vec![
                self.network.flag(),
                "--tx-body-file".to_string(),
                path_token(body_file),
                "--signing-key-file".to_string(),
                path_token(signing_key_file),
                "--out-file".to_string(),
                path_token(out_file),
            ],
        )
    }

    /// `transaction submit <network> --tx-file ...`
    pub fn transaction_submit(&self, tx_file: &Path) -> Invocation {
        self.invocation(
            Subcommand::TransactionSubmit,
            vec![self.network.flag(), "--tx-file".to_string(), path_token(tx_file)],
        )
    }
}

fn path_token(path: &Path) -> String {
    path.display().to_string()
}

/// A bare token: non-empty, no leading `-`, no whitespace or control characters.
fn validate_token(name: &'static str, value: &str) -> OrchestratorResult<()> {
    if value.is_empty() {
        return Err(OrchestratorError::InvalidArgument {
            name,
            reason: "must not be empty".to_string(),
        });
    }
    if value.starts_with('-') {
        return Err(OrchestratorError::InvalidArgument {
            name,
            reason: format!("{:?} would be read as a flag", value),
        });
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(OrchestratorError::InvalidArgument {
            name,
            reason: format!("{:?} contains whitespace or control characters", value),
        });
    }
    Ok(())
}

/// Addresses are bare tokens; the receiver is also embedded in `--tx-out`.
pub fn validate_address(name: &'static str, address: &str) -> OrchestratorResult<()> {
    validate_token(name, address)
}

/// Signing key names must stay inside the key directory.
pub fn validate_key_name(key_file: &str) -> OrchestratorResult<()> {
    validate_token("signing key file", key_file)?;
    let path = Path::new(key_file);
    let escapes = path.components().any(|c| {
        matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_))
    });
    if escapes {
        return Err(OrchestratorError::InvalidArgument {
            name: "signing key file",
            reason: format!("{:?} must be a relative path inside the key directory", key_file),
        });
    }
    Ok(())
}
