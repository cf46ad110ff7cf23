/*
[INPUT]:  Embedded deployment data
[OUTPUT]: Production address registry
[POS]:    Registry layer - chain and currency reference data
[UPDATE]: When registry data files change
*/

pub mod addresses;

pub use addresses::{DeriveAddresses, RegistryGaps, get_prod_derive_addresses};
