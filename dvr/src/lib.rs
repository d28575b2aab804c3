//! An I/O free distance-vector routing core.
//!
//! A [`router::Router`] keeps the routing table of one simulated node. The
//! scheduler drives it once per tick: [`router::Router::tidy`], then
//! [`router::Router::process_advertisement`] for every packet received, then
//! [`router::Router::generate_advertisement`] for every interface.

pub mod concepts;
pub mod feedback;
pub mod framework;
pub mod router;
pub mod util;
