use crate::framework::RoutingSystem;
use educe::Educe;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()), PartialEq(bound()))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(bound = ""))]
pub enum Packet<T: RoutingSystem + ?Sized> {
    /// a full-table update, sent periodically on every interface that is up
    BatchRouteUpdate { routes: Vec<RouteUpdate<T>> },
}

impl<T: RoutingSystem + ?Sized> Packet<T> {
    pub fn routes(&self) -> &[RouteUpdate<T>] {
        match self {
            Packet::BatchRouteUpdate { routes } => routes,
        }
    }
}

/// A copy of one table row, as seen by the neighbour receiving it
#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()), PartialEq(bound()))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(bound = ""))]
pub struct RouteUpdate<T: RoutingSystem + ?Sized> {
    pub destination: T::NodeAddress,
    pub metric: u16,
}

#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()), PartialEq(bound()))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(bound = ""))]
pub enum Destination<T: RoutingSystem + ?Sized> {
    /// every node on the other end of the interface
    Broadcast,
    Node(T::NodeAddress),
}

#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()), PartialEq(bound()))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(bound = ""))]
pub struct OutboundPacket<T: RoutingSystem + ?Sized> {
    /// send via this interface
    pub itf: T::InterfaceId,
    /// the node that built the packet
    pub source: T::NodeAddress,
    /// to this destination
    pub dest: Destination<T>,
    pub packet: Packet<T>,
}
