use crate::framework::{RouterContext, RoutingSystem, Tick};
use educe::Educe;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// State of one local interface, as reported by the link layer
#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(bound = ""))]
pub struct Interface<T: RoutingSystem + ?Sized> {
    pub id: T::InterfaceId,
    pub up: bool,
    /// cost of crossing this interface. Lower is better.
    pub weight: u16,
}

impl<T: RoutingSystem + ?Sized> Interface<T> {
    pub fn new(id: T::InterfaceId, weight: u16) -> Self {
        Self {
            id,
            up: true,
            weight,
        }
    }
}

/// A plain [`RouterContext`]: the node's identity, its clock and its interfaces.
///
/// Interfaces that were never added are reported as down.
#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(bound = ""))]
pub struct LocalNode<T: RoutingSystem + ?Sized> {
    pub address: T::NodeAddress,
    pub now: Tick,
    pub interfaces: HashMap<T::InterfaceId, Interface<T>>,
}

impl<T: RoutingSystem + ?Sized> LocalNode<T> {
    pub fn new(address: T::NodeAddress) -> Self {
        Self {
            address,
            now: 0,
            interfaces: HashMap::new(),
        }
    }

    pub fn add_interface(&mut self, id: T::InterfaceId, weight: u16) {
        self.interfaces.insert(id.clone(), Interface::new(id, weight));
    }

    pub fn set_up(&mut self, id: &T::InterfaceId, up: bool) {
        if let Some(itf) = self.interfaces.get_mut(id) {
            itf.up = up;
        }
    }

    pub fn set_weight(&mut self, id: &T::InterfaceId, weight: u16) {
        if let Some(itf) = self.interfaces.get_mut(id) {
            itf.weight = weight;
        }
    }
}

impl<T: RoutingSystem + ?Sized> RouterContext<T> for LocalNode<T> {
    fn address(&self) -> T::NodeAddress {
        self.address.clone()
    }

    fn now(&self) -> Tick {
        self.now
    }

    fn is_up(&self, itf: &T::InterfaceId) -> bool {
        self.interfaces.get(itf).map_or(false, |x| x.up)
    }

    fn weight(&self, itf: &T::InterfaceId) -> u16 {
        self.interfaces.get(itf).map_or(u16::MAX, |x| x.weight)
    }
}
