//! Transaction artifacts: named files the external tool writes and reads.
//!
//! The orchestrator never holds transaction content. An artifact is an id
//! plus the pipeline stage it is at; the stage decides which file name the
//! id refers to (`unsigned_<id>.tx` or `signed_<id>.tx`).

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::blockchain::types::{OrchestratorError, OrchestratorResult};

/// Opaque artifact identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// A fresh identifier (UUIDv4, 32 lowercase hex characters).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Accept an identifier printed by an earlier run.
    ///
    /// Only ASCII alphanumerics, `-` and `_` are allowed so the id can never
    /// escape the transaction directory.
    pub fn parse(raw: &str) -> OrchestratorResult<Self> {
        if raw.is_empty() {
            return Err(OrchestratorError::InvalidArgument {
                name: "artifact id",
                reason: "must not be empty".to_string(),
            });
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(OrchestratorError::InvalidArgument {
                name: "artifact id",
                reason: format!("unexpected character {:?}", bad),
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where an artifact is in the build → sign → submit pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStage {
    Unsigned,
    Signed,
}

impl ArtifactStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unsigned => "unsigned",
            Self::Signed => "signed",
        }
    }
}

impl fmt::Display for ArtifactStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction file handle tagged with its stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionArtifact {
    pub id: ArtifactId,
    pub stage: ArtifactStage,
}

impl TransactionArtifact {
    /// An unsigned artifact with a freshly generated id.
    pub fn fresh() -> Self {
        Self {
            id: ArtifactId::generate(),
            stage: ArtifactStage::Unsigned,
        }
    }

    /// Rebuild an unsigned handle from a previously printed id.
    pub fn unsigned(id: &str) -> OrchestratorResult<Self> {
        Ok(Self {
            id: ArtifactId::parse(id)?,
            stage: ArtifactStage::Unsigned,
        })
    }

    /// Rebuild a signed handle from a previously printed id.
    pub fn signed(id: &str) -> OrchestratorResult<Self> {
        Ok(Self {
            id: ArtifactId::parse(id)?,
            stage: ArtifactStage::Signed,
        })
    }

    /// Fail with [`OrchestratorError::StageMismatch`] unless at `expected`.
    pub fn require_stage(&self, expected: ArtifactStage) -> OrchestratorResult<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(OrchestratorError::StageMismatch {
                expected,
                actual: self.stage,
            })
        }
    }

    /// The same id, now naming the signed file.
    pub fn into_signed(self) -> Self {
        Self {
            id: self.id,
            stage: ArtifactStage::Signed,
        }
    }

    /// File name for a given stage of this artifact's id.
    pub fn file_name_for(&self, stage: ArtifactStage) -> String {
        format!("{}_{}.tx", stage.as_str(), self.id)
    }

    /// File name for the artifact's current stage.
    pub fn file_name(&self) -> String {
        self.file_name_for(self.stage)
    }

    /// Location of the stage's file under `tx_base_path`.
    pub fn path_for(&self, tx_base_path: &Path, stage: ArtifactStage) -> PathBuf {
        tx_base_path.join(self.file_name_for(stage))
    }
}
