// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Memoized resolution keyed by declaration identity.
//!
//! Resolution runs outside the lock. Two threads missing on the same
//! declaration may both resolve it; the first insertion wins and both get
//! the stored function.

use crate::abi::error::AbiResult;
use crate::contract::declaration::MethodDeclaration;
use crate::contract::function::ContractFunction;
use crate::contract::resolver::resolve;
use log::{debug, trace};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Thread-safe cache of resolved functions
#[derive(Debug, Default)]
pub struct FunctionCache {
    functions: RwLock<HashMap<MethodDeclaration, Arc<ContractFunction>>>,
}

impl FunctionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached function for `declaration`, resolving it on a miss
    pub fn get_or_resolve(
        &self,
        declaration: &MethodDeclaration,
    ) -> AbiResult<Arc<ContractFunction>> {
        if let Some(function) = self.functions.read().get(declaration) {
            trace!("Function cache hit for {}", function.signature());
            return Ok(Arc::clone(function));
        }

        let resolved = Arc::new(resolve(declaration)?);
        let mut functions = self.functions.write();
        let function = functions
            .entry(declaration.clone())
            .or_insert_with(|| {
                debug!("Function cache stored {}", resolved.signature());
                Arc::clone(&resolved)
            });
        Ok(Arc::clone(function))
    }

    pub fn get(&self, declaration: &MethodDeclaration) -> Option<Arc<ContractFunction>> {
        self.functions.read().get(declaration).cloned()
    }

    pub fn len(&self) -> usize {
        self.functions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.read().is_empty()
    }

    pub fn clear(&self) {
        self.functions.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::descriptor::TypeDescriptor;
    use crate::contract::declaration::ReturnType;
    use std::thread;

    fn name_declaration(interface: &str) -> MethodDeclaration {
        MethodDeclaration::new(interface, "name")
            .view()
            .returns(ReturnType::Value(TypeDescriptor::string()))
    }

    #[test]
    fn test_memoizes_by_declaration() {
        let cache = FunctionCache::new();
        assert!(cache.is_empty());

        let first = cache.get_or_resolve(&name_declaration("A")).unwrap();
        let second = cache.get_or_resolve(&name_declaration("A")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        cache.get_or_resolve(&name_declaration("B")).unwrap();
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.get(&name_declaration("A")).is_none());
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = FunctionCache::new();
        let unresolvable = MethodDeclaration::new("A", "name");
        assert!(cache.get_or_resolve(&unresolvable).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_resolution_shares_one_entry() {
        let cache = Arc::new(FunctionCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get_or_resolve(&name_declaration("A")).unwrap())
            })
            .collect();
        let functions: Vec<Arc<ContractFunction>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(cache.len(), 1);
        let stored = cache.get(&name_declaration("A")).unwrap();
        assert!(functions.iter().all(|f| Arc::ptr_eq(f, &stored)));
    }
}
