//! Read access to ancestor headers

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use vesta_primitives::H256;
use vesta_types::Header;

/// Header lookup used for `BLOCKHASH` walks and uncle checks
pub trait ChainReader {
    /// Header with hash `hash`, if known
    fn header_by_hash(&self, hash: &H256) -> Option<Header>;
}

impl<T: ChainReader + ?Sized> ChainReader for &T {
    fn header_by_hash(&self, hash: &H256) -> Option<Header> {
        (**self).header_by_hash(hash)
    }
}

impl<T: ChainReader + ?Sized> ChainReader for Arc<T> {
    fn header_by_hash(&self, hash: &H256) -> Option<Header> {
        (**self).header_by_hash(hash)
    }
}

/// In-memory header store keyed by hash
#[derive(Debug, Default)]
pub struct MemoryChain {
    headers: RwLock<HashMap<H256, Header>>,
}

impl MemoryChain {
    /// Empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `header`, returning its hash
    pub fn insert(&self, header: Header) -> H256 {
        let hash = header.hash();
        self.headers.write().insert(hash, header);
        hash
    }

    /// Whether a header with `hash` is stored
    pub fn contains(&self, hash: &H256) -> bool {
        self.headers.read().contains_key(hash)
    }

    /// Number of stored headers
    pub fn len(&self) -> usize {
        self.headers.read().len()
    }

    /// Whether no header is stored
    pub fn is_empty(&self) -> bool {
        self.headers.read().is_empty()
    }
}

impl ChainReader for MemoryChain {
    fn header_by_hash(&self, hash: &H256) -> Option<Header> {
        self.headers.read().get(hash).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let chain = MemoryChain::new();
        assert!(chain.is_empty());

        let header = Header {
            number: 7,
            ..Default::default()
        };
        let hash = chain.insert(header.clone());
        assert_eq!(hash, header.hash());
        assert!(chain.contains(&hash));
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.header_by_hash(&hash), Some(header));
        assert_eq!(chain.header_by_hash(&H256::ZERO), None);
    }

    #[test]
    fn test_shared_reader() {
        let chain = Arc::new(MemoryChain::new());
        let hash = chain.insert(Header::default());
        let reader: &dyn ChainReader = &chain;
        assert!(reader.header_by_hash(&hash).is_some());
    }
}
