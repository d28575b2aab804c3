use crate::concepts::route::RoutingEntry;
use crate::framework::{RoutingSystem, Tick};
use educe::Educe;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_with::serde_as;
use std::collections::btree_map::{Iter, Values, ValuesMut};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Destination, Route. Ordered so that advertisements and dumps are stable.
#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()), PartialEq(bound()))]
#[cfg_attr(feature = "serde", serde_as, derive(Serialize, Deserialize), serde(bound = ""))]
pub struct RoutingTable<T: RoutingSystem + ?Sized> {
    /// the node owning this table
    pub address: T::NodeAddress,
    #[cfg_attr(feature = "serde", serde(with = "::serde_with::As::<Vec<(::serde_with::Same, ::serde_with::Same)>>"))]
    routes: BTreeMap<T::NodeAddress, RoutingEntry<T>>,
}

impl<T: RoutingSystem + ?Sized> RoutingTable<T> {
    /// An empty table, without the self route
    pub fn new(address: T::NodeAddress) -> Self {
        Self {
            address,
            routes: BTreeMap::new(),
        }
    }

    /// drops every route and puts the self route back
    pub fn reset(&mut self, now: Tick) {
        self.routes.clear();
        self.routes.insert(
            self.address.clone(),
            RoutingEntry::local(self.address.clone(), now),
        );
    }

    pub fn get(&self, dest: &T::NodeAddress) -> Option<&RoutingEntry<T>> {
        self.routes.get(dest)
    }

    pub fn get_mut(&mut self, dest: &T::NodeAddress) -> Option<&mut RoutingEntry<T>> {
        self.routes.get_mut(dest)
    }

    pub fn insert(&mut self, entry: RoutingEntry<T>) {
        self.routes.insert(entry.destination.clone(), entry);
    }

    pub fn retain(&mut self, f: impl FnMut(&T::NodeAddress, &mut RoutingEntry<T>) -> bool) {
        self.routes.retain(f)
    }

    pub fn iter(&self) -> Values<'_, T::NodeAddress, RoutingEntry<T>> {
        self.routes.values()
    }

    /// (key, route) pairs, in destination order
    pub fn entries(&self) -> Iter<'_, T::NodeAddress, RoutingEntry<T>> {
        self.routes.iter()
    }

    pub fn iter_mut(&mut self) -> ValuesMut<'_, T::NodeAddress, RoutingEntry<T>> {
        self.routes.values_mut()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn contains(&self, dest: &T::NodeAddress) -> bool {
        self.routes.contains_key(dest)
    }

    /// whether the table holds an intact route to its owner
    pub fn has_self_route(&self) -> bool {
        self.routes
            .get(&self.address)
            .is_some_and(|x| x.is_local() && x.metric == 0)
    }
}

impl<T: RoutingSystem + ?Sized> Display for RoutingTable<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Router {}", self.address)?;
        for route in self.routes.values() {
            writeln!(f, "{}", route)?;
        }
        Ok(())
    }
}
