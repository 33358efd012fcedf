pub mod matcher;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

pub use matcher::suggest;

const BUNDLED_DEX: &str = include_str!("../../data/pokemon_master.json");

static GLOBAL_DEX: OnceCell<Dex> = OnceCell::new();

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceEntity {
    #[serde(rename = "名前", default)]
    pub name: String,
    #[serde(rename = "図鑑番号", default)]
    pub national_dex: u16,
    #[serde(rename = "タイプ", default)]
    pub types: Vec<String>,
}

/// Read-only table of every creature the matcher can suggest, in file order.
#[derive(Debug, Clone, Default)]
pub struct Dex {
    entries: Vec<ReferenceEntity>,
}

impl Dex {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<ReferenceEntity> =
            serde_json::from_str(json).context("Failed to parse reference dataset")?;
        let dex = Self { entries };
        if dex.is_empty() {
            anyhow::bail!("Reference dataset is empty");
        }
        Ok(dex)
    }

    /// The bundled dataset, parsed on first use and shared for the rest of the process.
    pub fn global() -> Result<&'static Dex> {
        GLOBAL_DEX.get_or_try_init(|| {
            let dex = Self::from_json_str(BUNDLED_DEX)?;
            tracing::debug!(entries = dex.len(), "Loaded reference dataset");
            Ok(dex)
        })
    }

    pub fn entries(&self) -> &[ReferenceEntity] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find_exact(&self, name: &str) -> Option<&ReferenceEntity> {
        self.entries.iter().find(|e| e.name == name)
    }
}
