//! Serde adapters for account-keyed maps.
//!
//! Text formats such as JSON only accept string map keys, so maps keyed by
//! [`Address`] are written with `0x`-prefixed hex keys.
//!
//! ```rust,ignore
//! #[derive(Serialize, Deserialize)]
//! struct Ledger {
//!     #[serde(with = "shared_types::serde_helpers::address_map")]
//!     balances: HashMap<Address, u128>,
//! }
//! ```

pub mod address_map {
    use crate::entities::{format_address, parse_address, Address};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;

    pub fn serialize<S, V>(map: &HashMap<Address, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        serializer.collect_map(
            map.iter()
                .map(|(account, value)| (format_address(account), value)),
        )
    }

    pub fn deserialize<'de, D, V>(deserializer: D) -> Result<HashMap<Address, V>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        HashMap::<String, V>::deserialize(deserializer)?
            .into_iter()
            .map(|(key, value)| {
                parse_address(&key)
                    .map(|account| (account, value))
                    .ok_or_else(|| D::Error::custom(format!("invalid address key: {key}")))
            })
            .collect()
    }
}
