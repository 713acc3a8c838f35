use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Result};
use ethers::{abi::Abi, types::Bytes};
use serde::{de::DeserializeOwned, Deserialize};

const HARDHAT_ARTIFACT_FORMAT: &str = "hh-sol-artifact-1";

/// Marks a library address the linker has not filled in yet, e.g. `__$53aea8...$__`
const LINK_PLACEHOLDER_PREFIX: &str = "__$";

/// Compiled contract as written by `hardhat compile`.
#[derive(Clone, Debug)]
pub struct ContractArtifact {
    pub contract_name: String,
    pub source_name: String,
    pub abi: Abi,
    /// creation code, constructor arguments get appended to this
    pub bytecode: Bytes,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardhatArtifact {
    #[serde(rename = "_format")]
    format: Option<String>,
    contract_name: String,
    source_name: String,
    abi: Abi,
    bytecode: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebugFile {
    build_info: PathBuf,
}

/// only the field we need, the compiler input and output are skipped
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildInfo {
    solc_version: String,
}

impl ContractArtifact {
    /// hardhat lays artifacts out as `<artifacts>/contracts/<Name>.sol/<Name>.json`
    pub fn path(artifacts_dir: &Path, contract_name: &str) -> PathBuf {
        artifacts_dir
            .join("contracts")
            .join(format!("{contract_name}.sol"))
            .join(format!("{contract_name}.json"))
    }

    pub fn dbg_path(artifacts_dir: &Path, contract_name: &str) -> PathBuf {
        Self::path(artifacts_dir, contract_name).with_extension("dbg.json")
    }

    /// Loads the artifact and checks it was built by `solidity_version`.
    pub fn load(
        artifacts_dir: &Path,
        contract_name: &str,
        solidity_version: &str,
    ) -> Result<Self> {
        let path = Self::path(artifacts_dir, contract_name);
        tracing::debug!(path = %path.display(), "reading contract artifact");

        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "could not read artifact for {contract_name} at {}, has the project been compiled?",
                path.display()
            )
        })?;

        let artifact = Self::from_json(&json)
            .with_context(|| format!("invalid artifact {}", path.display()))?;

        if artifact.contract_name != contract_name {
            bail!(
                "artifact {} holds contract {}, expected {contract_name}",
                path.display(),
                artifact.contract_name
            );
        }

        let solc_version = compiler_version(artifacts_dir, contract_name)?;
        if solc_version != solidity_version {
            bail!(
                "{contract_name} was compiled with solc {solc_version} but the project uses \
                 {solidity_version}, recompile the contracts"
            );
        }

        Ok(artifact)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HardhatArtifact = serde_json::from_str(json)?;

        if let Some(format) = &raw.format {
            if format != HARDHAT_ARTIFACT_FORMAT {
                bail!("unsupported artifact format {format}");
            }
        }

        let bytecode = decode_bytecode(&raw.contract_name, &raw.bytecode)?;

        Ok(Self {
            contract_name: raw.contract_name,
            source_name: raw.source_name,
            abi: raw.abi,
            bytecode,
        })
    }
}

/// Follows `<Name>.dbg.json` to the build info hardhat compiled the
/// contract in and reads the solc version from it.
fn compiler_version(artifacts_dir: &Path, contract_name: &str) -> Result<String> {
    let dbg_path = ContractArtifact::dbg_path(artifacts_dir, contract_name);
    let dbg: DebugFile = read_json(&dbg_path).with_context(|| {
        format!("{contract_name} has no usable debug file, recompile the contracts")
    })?;

    let dbg_dir = dbg_path.parent().unwrap_or(artifacts_dir);
    let build_info: BuildInfo = read_json(&dbg_dir.join(&dbg.build_info)).with_context(|| {
        format!("build info of {contract_name} is missing, recompile the contracts")
    })?;

    Ok(build_info.solc_version)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("invalid json in {}", path.display()))
}

fn decode_bytecode(contract_name: &str, bytecode: &str) -> Result<Bytes> {
    let hex_str = bytecode.trim_start_matches("0x");

    if hex_str.is_empty() {
        bail!("{contract_name} has no creation bytecode, it is abstract or an interface");
    }
    if hex_str.contains(LINK_PLACEHOLDER_PREFIX) {
        bail!("{contract_name} bytecode references libraries that have not been linked");
    }

    let bytes = hex::decode(hex_str)
        .map_err(|e| anyhow!("{contract_name} bytecode is not valid hex: {e}"))?;
    Ok(bytes.into())
}
