use crate::concepts::packet::{Destination, OutboundPacket, Packet, RouteUpdate};
use crate::concepts::route::{NextHop, RoutingEntry};
use crate::concepts::table::RoutingTable;
use crate::feedback::{RoutingError, RoutingWarning};
use crate::framework::{ProtocolParams, RelaxationPolicy, RouterContext, RoutingSystem, Tick};
use crate::util::{elapsed, sum_inf};
use log::{debug, info, trace, warn};

pub use crate::framework::INF;

/// Distance-vector engine for a single node
pub struct Router<T: RoutingSystem + ?Sized, C: RouterContext<T>> {
    params: ProtocolParams,
    address: T::NodeAddress,
    context: C,
    table: RoutingTable<T>,
}

impl<T: RoutingSystem + ?Sized, C: RouterContext<T>> Router<T, C> {
    /// Creates a router with the system's default parameters. Call [`Router::init`] before the first tick.
    pub fn new(context: C) -> Result<Self, RoutingError<T>> {
        Self::with_params(context, T::config())
    }

    pub fn with_params(context: C, params: ProtocolParams) -> Result<Self, RoutingError<T>> {
        params.validate::<T>()?;
        let address = context.address();
        let table = RoutingTable::new(address.clone());
        Ok(Self {
            params,
            address,
            context,
            table,
        })
    }

    /// Replaces the protocol parameters, the table is kept as it is
    pub fn set_params(&mut self, params: ProtocolParams) -> Result<(), RoutingError<T>> {
        params.validate::<T>()?;
        self.params = params;
        Ok(())
    }

    /// Resumes a router from a table snapshot, no need to call [`Router::init`]
    pub fn restore(
        context: C,
        params: ProtocolParams,
        table: RoutingTable<T>,
    ) -> Result<Self, RoutingError<T>> {
        params.validate::<T>()?;
        let address = context.address();
        if table.address != address {
            return Err(RoutingError::ForeignTable {
                expected: address,
                found: table.address,
            });
        }
        if !table.has_self_route() {
            return Err(RoutingError::MissingSelfRoute { address });
        }
        for (key, route) in table.entries() {
            if *key != route.destination {
                return Err(RoutingError::MismatchedKey {
                    key: key.clone(),
                    destination: route.destination.clone(),
                });
            }
            if route.is_local() && route.destination != address {
                return Err(RoutingError::LocalForeignRoute {
                    destination: route.destination.clone(),
                });
            }
            if route.metric > params.infinity {
                return Err(RoutingError::MetricAboveInfinity {
                    destination: route.destination.clone(),
                    metric: route.metric,
                    infinity: params.infinity,
                });
            }
        }
        Ok(Self {
            params,
            address,
            context,
            table,
        })
    }

    /// only call once, after the node's identity is known
    pub fn init(&mut self) {
        self.address = self.context.address();
        self.table = RoutingTable::new(self.address.clone());
        self.table.reset(self.context.now());
    }

    // region Accessors
    pub fn address(&self) -> &T::NodeAddress {
        &self.address
    }

    pub fn params(&self) -> &ProtocolParams {
        &self.params
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn table(&self) -> &RoutingTable<T> {
        &self.table
    }

    pub fn route(&self, dest: &T::NodeAddress) -> Option<&RoutingEntry<T>> {
        self.table.get(dest)
    }

    pub fn metric_to(&self, dest: &T::NodeAddress) -> Option<u16> {
        self.table.get(dest).map(|x| x.metric)
    }

    /// Given a destination, returns the outgoing interface for it
    pub fn next_hop(&self, dest: &T::NodeAddress) -> NextHop<T> {
        if *dest == self.address {
            return NextHop::Local;
        }
        match self.table.get(dest) {
            Some(route) if route.metric < self.params.infinity => match &route.itf {
                Some(itf) => NextHop::Interface(itf.clone()),
                None => NextHop::Local,
            },
            _ => NextHop::Unknown,
        }
    }

    /// Logs the routing table
    pub fn show_routes(&self) {
        info!("Router {}", self.address);
        for route in self.table.iter() {
            info!("{}", route);
        }
    }
    // endregion

    // region Table Maintenance

    /// Periodic clean-up of the table, must run before any packet of the tick is handled
    pub fn tidy(&mut self) {
        let now = self.context.now();
        let inf = self.params.infinity;

        // retract routes over links that have just gone down
        for route in self.table.iter_mut() {
            if let Some(itf) = &route.itf {
                if route.metric != inf && !self.context.is_up(itf) {
                    debug!(
                        "{}: interface {} is down, retracting route to {}",
                        self.address, itf, route.destination
                    );
                    route.metric = inf;
                    route.last_updated = now;
                }
            }
        }

        if self.params.allow_expire {
            self.expire_routes(now);
        }
    }

    fn expire_routes(&mut self, now: Tick) {
        let inf = self.params.infinity;
        let timeout = self.params.timeout();
        let ttl = self.params.ttl();
        let address = &self.address;

        self.table.retain(|dest, route| {
            if route.is_local() {
                return true;
            }
            if route.metric != inf {
                if elapsed(route.last_updated, timeout, now) {
                    debug!("{address}: route to {dest} timed out");
                    route.metric = inf;
                    route.last_updated = now;
                }
                true
            } else if elapsed(route.last_updated, ttl, now) {
                debug!("{address}: removing unreachable route to {dest}");
                false
            } else {
                true
            }
        });
    }
    // endregion

    // region Advertisement

    /// Builds the periodic advertisement for one interface, if one is due
    pub fn generate_advertisement(&self, itf: &T::InterfaceId) -> Option<OutboundPacket<T>> {
        let now = self.context.now();
        if now % self.params.update_interval != 0 {
            return None;
        }
        if !self.context.is_up(itf) {
            trace!("{}: not advertising over {}, link is down", self.address, itf);
            return None;
        }

        let routes = self
            .table
            .iter()
            .map(|route| RouteUpdate {
                destination: route.destination.clone(),
                metric: if self.params.allow_poison_reverse && route.is_via(itf) {
                    self.params.infinity
                } else {
                    route.metric
                },
            })
            .collect();

        Some(OutboundPacket {
            itf: itf.clone(),
            source: self.address.clone(),
            dest: Destination::Broadcast,
            packet: Packet::BatchRouteUpdate { routes },
        })
    }

    /// Relaxes the table against an advertisement received over `itf`
    pub fn process_advertisement(&mut self, packet: &Packet<T>, itf: &T::InterfaceId) {
        if !self.context.is_up(itf) {
            trace!("{}: dropping advertisement received over {}, link is down", self.address, itf);
            return;
        }
        let weight = self.link_weight(itf);
        let now = self.context.now();
        for update in packet.routes() {
            self.handle_route_update(update, itf, weight, now);
        }
    }

    fn link_weight(&self, itf: &T::InterfaceId) -> u16 {
        let weight = self.context.weight(itf);
        if weight == 0 {
            warn!("{}", RoutingWarning::<T>::WeightIsZero { itf: itf.clone() });
            return 1;
        }
        if weight >= self.params.infinity {
            warn!(
                "{}",
                RoutingWarning::<T>::WeightSaturates {
                    itf: itf.clone(),
                    weight
                }
            );
        }
        weight
    }

    fn handle_route_update(
        &mut self,
        update: &RouteUpdate<T>,
        itf: &T::InterfaceId,
        weight: u16,
        now: Tick,
    ) {
        let inf = self.params.infinity;
        let metric = sum_inf(update.metric, weight, inf);

        let Some(route) = self.table.get_mut(&update.destination) else {
            // never learn a destination that is already unreachable
            if metric != inf {
                debug!(
                    "{}: new route to {} via {} with metric {}",
                    self.address, update.destination, itf, metric
                );
                self.table.insert(RoutingEntry::new(
                    update.destination.clone(),
                    itf.clone(),
                    metric,
                    now,
                ));
            }
            return;
        };

        if route.is_local() {
            return;
        }

        if route.is_via(itf) {
            // the current next hop is always trusted
            let metric = match self.params.relaxation {
                RelaxationPolicy::RetractOnWorse if metric > route.metric => inf,
                _ => metric,
            };
            if metric == inf && route.metric != inf {
                debug!("{}: route to {} retracted by {}", self.address, route.destination, itf);
            }
            // re-announcing an unreachable route must not restart its ttl
            if !(route.metric == inf && metric == inf) {
                route.last_updated = now;
            }
            route.metric = metric;
        } else if metric < route.metric {
            debug!(
                "{}: switching route to {} to {} with metric {}",
                self.address, route.destination, itf, metric
            );
            route.itf = Some(itf.clone());
            route.metric = metric;
            route.last_updated = now;
        }
    }
    // endregion
}
