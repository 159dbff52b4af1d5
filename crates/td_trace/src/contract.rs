//! The contract cache: which runtime types are known to serialize structurally.

use core::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use td_reflect::ops::TraceRef;
use td_reflect::{Trace, TypeDesc};
use td_utils::TypeIdMap;

// -----------------------------------------------------------------------------
// StructuralPlan

/// How a type is serialized structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralPlan {
    /// Through the value's serde contract.
    Serde,
    /// Element by element, each through its own plan.
    Sequence,
    /// Entry by entry, scalar keys in a `Key` attribute.
    Dictionary,
    Primitive,
    Text,
}

impl StructuralPlan {
    /// Derives the plan for the runtime type of `value`, if it has one.
    ///
    /// Enums, exceptions and database errors have dedicated renderings and
    /// never get a plan.
    pub fn of(value: &dyn Trace) -> Option<Self> {
        match value.trace_ref() {
            TraceRef::Primitive(_) => Some(Self::Primitive),
            TraceRef::Text(_) => Some(Self::Text),
            TraceRef::Sequence(_) => Some(Self::Sequence),
            TraceRef::Dictionary(_) => Some(Self::Dictionary),
            TraceRef::Opaque => value.as_serialize().map(|_| Self::Serde),
            TraceRef::Null
            | TraceRef::Enum(_)
            | TraceRef::Exception(_)
            | TraceRef::DatabaseError(_) => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Contract

/// A structural serializer capability confirmed for one type.
#[derive(Clone, Copy)]
pub struct Contract {
    pub desc: &'static TypeDesc,
    pub plan: StructuralPlan,
}

impl fmt::Debug for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contract")
            .field("type", &self.desc.display_name())
            .field("plan", &self.plan)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ContractCache

/// A concurrency-safe map from runtime type to [`Contract`].
///
/// One mutex covers lookups, inserts and evictions; serialization itself
/// always happens outside of it. Two callers missing on the same type may
/// both build and insert a contract, the last insert wins.
///
/// # Examples
///
/// ```
/// use td_reflect::Described;
/// use td_trace::{Contract, ContractCache, StructuralPlan};
///
/// let cache = ContractCache::new();
/// let desc = <u8>::type_desc();
/// assert!(cache.insert(Contract { desc, plan: StructuralPlan::Primitive }));
/// assert!(cache.contains(desc));
/// assert!(cache.evict(desc));
/// assert!(cache.get(desc).is_none());
/// ```
#[derive(Default)]
pub struct ContractCache {
    contracts: Mutex<TypeIdMap<Contract>>,
}

impl ContractCache {
    /// Creates an empty cache.
    #[inline]
    pub const fn new() -> Self {
        Self {
            contracts: Mutex::new(TypeIdMap::new()),
        }
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, TypeIdMap<Contract>> {
        self.contracts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the contract of the type, if one is known.
    pub fn get(&self, desc: &TypeDesc) -> Option<Contract> {
        self.lock().get(&desc.type_id()).copied()
    }

    /// Returns the contract of `value`'s runtime type, deriving a fresh one
    /// when none is cached.
    ///
    /// A derived contract is not inserted; it has to prove itself first.
    pub fn get_or_derive(&self, value: &dyn Trace) -> Option<(Contract, bool)> {
        let desc = value.trace_desc();
        if let Some(contract) = self.get(desc) {
            return Some((contract, true));
        }
        let plan = StructuralPlan::of(value)?;
        Some((Contract { desc, plan }, false))
    }

    /// Inserts or replaces a contract. Returns `true` if the type was not cached.
    pub fn insert(&self, contract: Contract) -> bool {
        let previous = self.lock().insert(contract.desc.type_id(), contract);
        if previous.is_none() {
            log::debug!("contract cached for `{}`", contract.desc.display_name());
        }
        previous.is_none()
    }

    /// Removes the contract of the type. Returns `true` if one was cached.
    pub fn evict(&self, desc: &TypeDesc) -> bool {
        let removed = self.lock().remove(&desc.type_id()).is_some();
        if removed {
            log::debug!("contract evicted for `{}`", desc.display_name());
        }
        removed
    }

    /// Caches a contract for every distinct, not yet cached runtime type
    /// among `values`. Returns the number of new contracts.
    pub fn prime<'a>(&self, values: impl IntoIterator<Item = &'a dyn Trace>) -> usize {
        let mut primed = 0;
        for value in values {
            if value.is_null() {
                continue;
            }
            let desc = value.trace_desc();
            if self.contains(desc) {
                continue;
            }
            if let Some(plan) = StructuralPlan::of(value)
                && self.lock().try_insert(desc.type_id(), || Contract { desc, plan })
            {
                log::debug!("contract primed for `{}`", desc.display_name());
                primed += 1;
            }
        }
        primed
    }

    /// Returns `true` if the type has a cached contract.
    #[inline]
    pub fn contains(&self, desc: &TypeDesc) -> bool {
        self.lock().contains(&desc.type_id())
    }

    /// Returns the number of cached contracts.
    #[inline]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl fmt::Debug for ContractCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractCache").field("len", &self.len()).finish()
    }
}
