use std::fmt::{Debug, Display};
use std::hash::Hash;

use cfg_if::cfg_if;
#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::feedback::RoutingError;

/// Simulated time, in ticks
pub type Tick = u64;

/// Default metric used as "unreachable". Keeping this small bounds count-to-infinity.
pub const INF: u16 = 60;
/// Advertisement intervals without a refresh before a route is marked unreachable
pub const TIMEOUT_TICKS: Tick = 6;
/// Advertisement intervals an unreachable route is kept before it is removed
pub const TTL_TICKS: Tick = 4;

pub trait RoutingSystem {
    /// Address of the node on the routing network, MUST be globally unique
    type NodeAddress: Ord + RouteKey + RouteData + Display;
    /// Identifier of one of the node's local interfaces
    type InterfaceId: RouteKey + RouteData + Display;
    fn config() -> ProtocolParams {
        Default::default()
    }
}

cfg_if! {
    if #[cfg(feature = "serde")] {
        pub trait RouteData: Clone + Debug + Serialize + DeserializeOwned + Sized {}
        impl<T: Clone + Debug + Serialize + DeserializeOwned + Sized> RouteData for T {}
    } else {
        pub trait RouteData: Clone + Debug + Sized {}
        impl<T: Clone + Debug + Sized> RouteData for T {}
    }
}
pub trait RouteKey: Eq + PartialEq + Hash {}
impl<T: Eq + PartialEq + Hash> RouteKey for T {}

/// The view a router has of the node it runs on.
///
/// The engine owns its context, so there is never a pointer back into the
/// router; the scheduler reaches the link state through `Router::context_mut`.
pub trait RouterContext<T: RoutingSystem + ?Sized> {
    /// Address of the local node
    fn address(&self) -> T::NodeAddress;
    /// Current simulated time, must never decrease
    fn now(&self) -> Tick;
    /// Whether the link layer currently reports the interface as up
    fn is_up(&self, itf: &T::InterfaceId) -> bool;
    /// Cost of crossing the interface, expected to be in `1..infinity`
    fn weight(&self, itf: &T::InterfaceId) -> u16;
}

/// Which update to trust when the current next hop reports a worse metric
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RelaxationPolicy {
    /// Always adopt whatever the current next hop advertises
    #[default]
    Standard,
    /// A worse metric from the current next hop retracts the route to infinity
    RetractOnWorse,
}

/// Protocol Parameters
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ProtocolParams {
    /// ticks between two periodic advertisements
    pub update_interval: Tick,
    pub allow_poison_reverse: bool,
    pub allow_expire: bool,
    /// metric that means "unreachable", every metric is clamped to it
    pub infinity: u16,
    pub timeout_ticks: Tick,
    pub ttl_ticks: Tick,
    pub relaxation: RelaxationPolicy,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            update_interval: 1,
            allow_poison_reverse: false,
            allow_expire: false,
            infinity: INF,
            timeout_ticks: TIMEOUT_TICKS,
            ttl_ticks: TTL_TICKS,
            relaxation: RelaxationPolicy::Standard,
        }
    }
}

impl ProtocolParams {
    pub fn validate<T: RoutingSystem + ?Sized>(&self) -> Result<(), RoutingError<T>> {
        if self.update_interval == 0 {
            return Err(RoutingError::ZeroUpdateInterval);
        }
        if self.infinity == 0 {
            return Err(RoutingError::ZeroInfinity);
        }
        Ok(())
    }

    /// Ticks a reachable route may go without a refresh
    pub fn timeout(&self) -> Tick {
        self.timeout_ticks.saturating_mul(self.update_interval)
    }

    /// Ticks an unreachable route is kept around
    pub fn ttl(&self) -> Tick {
        self.ttl_ticks.saturating_mul(self.update_interval)
    }
}
