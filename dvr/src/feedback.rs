use educe::Educe;
use thiserror::Error;
use crate::framework::RoutingSystem;

/// Errors raised while setting up a router. The protocol itself never fails, unreachable routes are data.
#[derive(Error)]
#[derive(Educe)]
#[educe(Debug(bound()))]
pub enum RoutingError<T: RoutingSystem + ?Sized> {
    #[error("The update interval must be at least one tick")]
    ZeroUpdateInterval,
    #[error("The infinity metric must be greater than zero")]
    ZeroInfinity,
    /// A restored table must contain the route to the node itself
    #[error("Routing table has no self route for {address}")]
    MissingSelfRoute {
        address: T::NodeAddress
    },
    #[error("Routing table belongs to {found}, expected {expected}")]
    ForeignTable {
        expected: T::NodeAddress,
        found: T::NodeAddress
    },
    #[error("Route stored under {key} leads to {destination}")]
    MismatchedKey {
        key: T::NodeAddress,
        destination: T::NodeAddress
    },
    /// Only the route to the node itself may have no interface
    #[error("Route to {destination} has no interface")]
    LocalForeignRoute {
        destination: T::NodeAddress
    },
    #[error("Route to {destination} has metric {metric}, above infinity {infinity}")]
    MetricAboveInfinity {
        destination: T::NodeAddress,
        metric: u16,
        infinity: u16
    }
}

/// Although this is an error enum, these should be treated as warnings.
#[derive(Error)]
#[derive(Educe)]
#[educe(Debug(bound()))]
pub enum RoutingWarning<T: RoutingSystem + ?Sized> {
    /// The weight of a link should never be zero (this may result in routing loops!)
    /// If this warning is triggered, the weight is treated as 1.
    #[error("Interface {itf} reported a weight of zero, using 1")]
    WeightIsZero {
        itf: T::InterfaceId
    },
    /// Every route learnt over this interface will be unreachable.
    #[error("Interface {itf} reported weight {weight}, which saturates to infinity")]
    WeightSaturates {
        itf: T::InterfaceId,
        weight: u16
    }
}
