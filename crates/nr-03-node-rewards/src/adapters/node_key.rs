//! Identity registry adapter over the node key service

use crate::ports::outbound::{IdentityError, IdentityRegistry};
use nr_01_node_key::NodeKeyApi;
use shared_types::{Address, NodeKeyId};
use std::sync::Arc;
use tracing::debug;

pub struct NodeKeyIdentityAdapter<K: NodeKeyApi> {
    keys: Arc<K>,
}

impl<K: NodeKeyApi> NodeKeyIdentityAdapter<K> {
    pub fn new(keys: Arc<K>) -> Self {
        Self { keys }
    }
}

impl<K: NodeKeyApi> IdentityRegistry for NodeKeyIdentityAdapter<K> {
    fn owner_of(&self, node_key: NodeKeyId) -> Result<Address, IdentityError> {
        self.keys.owner_of(node_key).map_err(|err| {
            debug!(%node_key, error = %err, "Node key lookup failed");
            // owner_of only fails for keys that were never minted
            IdentityError::UnknownIdentity { node_key }
        })
    }
}
