/*
[INPUT]:  Embedded production address JSON
[OUTPUT]: Chain -> currency -> token address lookups and enum coverage gaps
[POS]:    Registry layer - static deployment data
[UPDATE]: When Derive lists a new chain or currency
*/

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::http::{DeriveError, Result};
use crate::types::{ChainId, Currency};

const PROD_ADDRESSES_JSON: &str = include_str!("../../data/prod_derive_addresses.json");

static PROD_ADDRESSES: OnceLock<std::result::Result<DeriveAddresses, String>> = OnceLock::new();

/// Token addresses keyed by raw chain id and currency symbol
///
/// Keys stay untyped so the registry can list chains and currencies this
/// crate does not model yet; `missing_enum_members` reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeriveAddresses {
    pub chains: BTreeMap<u64, BTreeMap<String, String>>,
}

/// Registry entries not covered by `ChainId` / `Currency`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryGaps {
    pub chains: BTreeSet<u64>,
    pub currencies: BTreeSet<String>,
}

impl RegistryGaps {
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty() && self.currencies.is_empty()
    }
}

impl DeriveAddresses {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| DeriveError::Config(format!("invalid address registry: {e}")))
    }

    /// Token address of `currency` on `chain`, if listed
    pub fn address(&self, chain: ChainId, currency: Currency) -> Option<&str> {
        self.chains
            .get(&chain.id())?
            .get(currency.symbol())
            .map(String::as_str)
    }

    /// Currencies listed on `chain` that the enum knows about
    pub fn currencies_on(&self, chain: ChainId) -> Vec<Currency> {
        self.chains
            .get(&chain.id())
            .map(|tokens| tokens.keys().filter_map(|s| s.parse().ok()).collect())
            .unwrap_or_default()
    }

    pub fn missing_enum_members(&self) -> RegistryGaps {
        let chains = self
            .chains
            .keys()
            .copied()
            .filter(|id| ChainId::try_from(*id).is_err())
            .collect();
        let currencies = self
            .chains
            .values()
            .flat_map(|tokens| tokens.keys())
            .filter(|symbol| symbol.parse::<Currency>().is_err())
            .cloned()
            .collect();
        RegistryGaps { chains, currencies }
    }
}

/// Production registry, parsed once per process
pub fn get_prod_derive_addresses() -> Result<&'static DeriveAddresses> {
    PROD_ADDRESSES
        .get_or_init(|| DeriveAddresses::from_json(PROD_ADDRESSES_JSON).map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|e| DeriveError::Config(e.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_entries_are_reported() {
        let registry = DeriveAddresses::from_json(
            r#"{"chains": {"1": {"USDC": "0x01", "FOO": "0x02"}, "999": {"USDC": "0x03"}}}"#,
        )
        .unwrap();
        let gaps = registry.missing_enum_members();
        assert_eq!(gaps.chains, BTreeSet::from([999]));
        assert_eq!(gaps.currencies, BTreeSet::from(["FOO".to_string()]));
        assert!(!gaps.is_empty());
    }

    #[test]
    fn test_typed_lookup() {
        let registry =
            DeriveAddresses::from_json(r#"{"chains": {"957": {"DRV": "0xabc"}}}"#).unwrap();
        assert_eq!(registry.address(ChainId::Derive, Currency::Drv), Some("0xabc"));
        assert_eq!(registry.address(ChainId::Eth, Currency::Drv), None);
        assert_eq!(registry.currencies_on(ChainId::Derive), vec![Currency::Drv]);
    }

    #[test]
    fn test_malformed_registry_is_config_error() {
        let err = DeriveAddresses::from_json(r#"{"chains": []}"#).unwrap_err();
        assert!(matches!(err, DeriveError::Config(_)));
    }
}
