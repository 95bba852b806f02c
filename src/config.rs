/// Environment-driven configuration for xrpl-notary.
///
/// All settings come from environment variables; the binary loads a `.env`
/// file before construction. The wallet secret stays inside this struct and
/// the gateway's sign-and-submit request bodies — it is never logged.
use crate::error::{NotaryError, Result};

/// Public testnet JSON-RPC endpoint.
pub const DEFAULT_RPC_URL: &str = "https://s.altnet.rippletest.net:51234";

/// Testnet explorer used for human-readable transaction links.
pub const DEFAULT_EXPLORER_BASE: &str = "https://testnet.xrpl.org";

/// Runtime configuration for the notary service.
#[derive(Debug, Clone)]
pub struct NotaryConfig {
    /// XRPL JSON-RPC endpoint.
    pub rpc_url: String,
    /// Classic address of the proving account.
    pub account: String,
    /// Wallet seed for sign-and-submit. Testnet or trusted rippled only.
    pub secret: String,
    /// Explorer base URL, without trailing slash.
    pub explorer_base: String,
}

impl NotaryConfig {
    /// Build the configuration from environment variables.
    ///
    /// `XRPL_ACCOUNT` and `XRPL_SECRET` are required; `XRPL_RPC_URL` and
    /// `XRPL_EXPLORER_BASE` fall back to the public testnet.
    pub fn from_env() -> Result<Self> {
        let account = std::env::var("XRPL_ACCOUNT")
            .map_err(|_| NotaryError::InvalidInput("XRPL_ACCOUNT not set".into()))?;
        let secret = std::env::var("XRPL_SECRET")
            .map_err(|_| NotaryError::InvalidInput("XRPL_SECRET not set".into()))?;
        let rpc_url =
            std::env::var("XRPL_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());
        let explorer_base = std::env::var("XRPL_EXPLORER_BASE")
            .unwrap_or_else(|_| DEFAULT_EXPLORER_BASE.to_string());

        Ok(Self {
            rpc_url,
            account,
            secret,
            explorer_base,
        })
    }
}
