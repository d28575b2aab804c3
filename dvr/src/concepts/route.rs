use crate::framework::{RoutingSystem, Tick};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use educe::Educe;

/// Legacy encoding of [`NextHop::Local`]
pub const LOCAL: i64 = -1;
/// Legacy encoding of [`NextHop::Unknown`]
pub const UNKNOWN: i64 = -2;

/// One row of the routing table
#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()), PartialEq(bound()))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(bound = ""))]
pub struct RoutingEntry<T: RoutingSystem + ?Sized> {
    /// the node this route leads to
    pub destination: T::NodeAddress,
    /// the outgoing interface, None for the route to the local node
    pub itf: Option<T::InterfaceId>,
    /// the cost to reach the destination, or infinity for an unreachable route
    pub metric: u16,
    /// the tick at which the metric or the interface was last changed or refreshed
    pub last_updated: Tick,
}

impl<T: RoutingSystem + ?Sized> RoutingEntry<T> {
    pub fn new(destination: T::NodeAddress, itf: T::InterfaceId, metric: u16, now: Tick) -> Self {
        Self {
            destination,
            itf: Some(itf),
            metric,
            last_updated: now,
        }
    }

    /// The route to the node itself, it never expires
    pub fn local(address: T::NodeAddress, now: Tick) -> Self {
        Self {
            destination: address,
            itf: None,
            metric: 0,
            last_updated: now,
        }
    }

    pub fn is_local(&self) -> bool {
        self.itf.is_none()
    }

    /// whether the route was learnt over `itf`
    pub fn is_via(&self, itf: &T::InterfaceId) -> bool {
        self.itf.as_ref() == Some(itf)
    }
}

impl<T: RoutingSystem + ?Sized> Display for RoutingEntry<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.itf {
            Some(itf) => write!(f, "d {} i {} m {}", self.destination, itf, self.metric),
            None => write!(f, "d {} i {} m {}", self.destination, LOCAL, self.metric),
        }
    }
}

/// Answer to a forwarding lookup
#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()), PartialEq(bound()), Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(bound = ""))]
pub enum NextHop<T: RoutingSystem + ?Sized> {
    /// the destination is this node
    Local,
    /// no usable route, the packet should be dropped
    Unknown,
    Interface(T::InterfaceId),
}

impl<T: RoutingSystem + ?Sized> NextHop<T> {
    pub fn interface(&self) -> Option<&T::InterfaceId> {
        match self {
            NextHop::Interface(itf) => Some(itf),
            _ => None,
        }
    }

    /// The integer encoding used by simulators that number their interfaces
    pub fn code(&self) -> i64
    where
        T::InterfaceId: Into<i64>,
    {
        match self {
            NextHop::Local => LOCAL,
            NextHop::Unknown => UNKNOWN,
            NextHop::Interface(itf) => itf.clone().into(),
        }
    }
}

impl<T: RoutingSystem + ?Sized> Display for NextHop<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NextHop::Local => write!(f, "local"),
            NextHop::Unknown => write!(f, "unknown"),
            NextHop::Interface(itf) => write!(f, "{}", itf),
        }
    }
}
