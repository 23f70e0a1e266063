//! Wallet connection state. The connector runtime itself lives outside the
//! app; this module only tracks what it reported.

use std::fmt;

use leptos::logging::log;

use crate::config::AppConfig;
use crate::error::ReviewError;
use crate::models::address::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainInfo {
    pub id: u64,
    pub name: &'static str,
}

pub const SEPOLIA: ChainInfo = ChainInfo {
    id: 11_155_111,
    name: "Sepolia",
};
pub const MAINNET: ChainInfo = ChainInfo {
    id: 1,
    name: "Ethereum",
};
pub const SUPPORTED_CHAINS: [ChainInfo; 2] = [SEPOLIA, MAINNET];

pub fn supported_chain(chain_id: u64) -> Option<ChainInfo> {
    SUPPORTED_CHAINS.iter().copied().find(|c| c.id == chain_id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connector {
    Injected,
    WalletConnect { project_id: String },
}

impl Connector {
    pub fn name(&self) -> &'static str {
        match self {
            Connector::Injected => "Browser Wallet",
            Connector::WalletConnect { .. } => "WalletConnect",
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Connectors offered to the user. WalletConnect needs a project id.
pub fn available_connectors(config: &AppConfig) -> Vec<Connector> {
    let mut connectors = vec![Connector::Injected];
    if let Some(project_id) = &config.walletconnect_project_id {
        connectors.push(Connector::WalletConnect {
            project_id: project_id.clone(),
        });
    }
    connectors
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WalletSession {
    #[default]
    Disconnected,
    Connecting {
        connector: Connector,
    },
    Connected {
        address: Address,
        chain: ChainInfo,
        connector: Connector,
    },
}

impl WalletSession {
    pub fn address(&self) -> Option<Address> {
        match self {
            WalletSession::Connected { address, .. } => Some(*address),
            _ => None,
        }
    }

    pub fn require_address(&self) -> Result<Address, ReviewError> {
        self.address().ok_or(ReviewError::WalletNotConnected)
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, WalletSession::Connected { .. })
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, WalletSession::Connecting { .. })
    }

    pub fn begin_connect(&mut self, connector: Connector) -> Result<(), ReviewError> {
        if !matches!(self, WalletSession::Disconnected) {
            return Err(ReviewError::InvalidTransition {
                from: self.label(),
                to: "Connecting",
            });
        }
        log!("[WALLET] Connecting with {}", connector);
        *self = WalletSession::Connecting { connector };
        Ok(())
    }

    /// Records the account the connector returned. An unsupported chain drops
    /// the session back to `Disconnected`.
    pub fn complete_connect(&mut self, address: Address, chain_id: u64) -> Result<(), ReviewError> {
        let connector = match self {
            WalletSession::Connecting { connector } => connector.clone(),
            other => {
                return Err(ReviewError::InvalidTransition {
                    from: other.label(),
                    to: "Connected",
                })
            }
        };
        let Some(chain) = supported_chain(chain_id) else {
            *self = WalletSession::Disconnected;
            return Err(ReviewError::Config(format!("unsupported chain id {chain_id}")));
        };
        log!("[WALLET] Connected {} on {}", address, chain.name);
        *self = WalletSession::Connected {
            address,
            chain,
            connector,
        };
        Ok(())
    }

    pub fn abort_connect(&mut self) {
        if self.is_connecting() {
            log!("[WALLET] Connection aborted");
            *self = WalletSession::Disconnected;
        }
    }

    pub fn disconnect(&mut self) {
        if let Some(address) = self.address() {
            log!("[WALLET] Disconnected {}", address);
        }
        *self = WalletSession::Disconnected;
    }

    pub fn label(&self) -> &'static str {
        match self {
            WalletSession::Disconnected => "Disconnected",
            WalletSession::Connecting { .. } => "Connecting",
            WalletSession::Connected { .. } => "Connected",
        }
    }
}
