use std::collections::BTreeMap;
use std::env;
use std::fs;

use anyhow::{anyhow, Context};
use dvr::concepts::interface::LocalNode;
use dvr::concepts::packet::Packet;
use dvr::concepts::route::NextHop;
use dvr::framework::{ProtocolParams, RoutingSystem, Tick};
use dvr::router::Router;
use log::{info, warn, LevelFilter};
use serde::Deserialize;
use simplelog::*;

struct SimSystem {} // node addresses and interface ids are plain integers
impl RoutingSystem for SimSystem {
    type NodeAddress = u32;
    type InterfaceId = i32;
}

type SimRouter = Router<SimSystem, LocalNode<SimSystem>>;

#[derive(Deserialize)]
struct Failure {
    link: i32,
    at: Tick,
    /// bring the link back up at this tick
    #[serde(default)]
    until: Option<Tick>,
}

#[derive(Deserialize)]
struct Topology {
    #[serde(default)]
    params: ProtocolParams,
    nodes: Vec<u32>,
    /// link id, node a, node b, weight
    links: Vec<(i32, u32, u32, u16)>,
    ticks: Tick,
    #[serde(default)]
    failures: Vec<Failure>,
}

impl Default for Topology {
    /// A - B - C, the link between B and C goes down at tick 5
    fn default() -> Self {
        Self {
            params: ProtocolParams::default(),
            nodes: vec![1, 2, 3],
            links: vec![(0, 1, 2, 1), (1, 2, 3, 1)],
            ticks: 10,
            failures: vec![Failure { link: 1, at: 5, until: None }],
        }
    }
}

fn across(links: &[(i32, u32, u32, u16)], node: u32, link: i32) -> Option<u32> {
    links
        .iter()
        .find(|(id, ..)| *id == link)
        .map(|(_, a, b, _)| if *a == node { *b } else { *a })
}

fn trace_route(routers: &[SimRouter], links: &[(i32, u32, u32, u16)], from: u32, to: u32) -> Option<Vec<u32>> {
    let mut path = vec![from];
    let mut cur = from;
    while path.len() <= routers.len() {
        let router = routers.iter().find(|r| *r.address() == cur)?;
        match router.next_hop(&to) {
            NextHop::Local => return Some(path),
            NextHop::Unknown => return None,
            NextHop::Interface(link) => {
                cur = across(links, cur, link)?;
                path.push(cur);
            }
        }
    }
    None
}

fn main() -> anyhow::Result<()> {
    CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])?;

    let topology = match env::args().nth(1) {
        Some(path) => {
            let data = fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))?;
            serde_json::from_str(&data).with_context(|| format!("Invalid topology in {path}"))?
        }
        None => Topology::default(),
    };

    let mut routers = Vec::new();
    for id in &topology.nodes {
        let mut node = LocalNode::<SimSystem>::new(*id);
        for (lid, a, b, weight) in &topology.links {
            if a == id || b == id {
                node.add_interface(*lid, *weight);
            }
        }
        let mut router = SimRouter::with_params(node, topology.params.clone())
            .map_err(|e| anyhow!("Failed to create router {id}: {e}"))?;
        router.init();
        routers.push(router);
    }

    // node, Vec<(packet, link it arrives on)>
    let mut packets: BTreeMap<u32, Vec<(Packet<SimSystem>, i32)>> = BTreeMap::new();

    for now in 0..topology.ticks {
        for failure in &topology.failures {
            let up = if now == failure.at {
                false
            } else if failure.until == Some(now) {
                true
            } else {
                continue;
            };
            info!("[tick {now}] link {} is now {}", failure.link, if up { "up" } else { "down" });
            for router in &mut routers {
                router.context_mut().set_up(&failure.link, up);
            }
        }

        for router in &mut routers {
            router.context_mut().now = now;
            router.tidy();
        }

        for (node, inbound) in std::mem::take(&mut packets) {
            if let Some(router) = routers.iter_mut().find(|r| *r.address() == node) {
                for (packet, link) in inbound {
                    router.process_advertisement(&packet, &link);
                }
            }
        }

        for router in &routers {
            let mut itfs: Vec<i32> = router.context().interfaces.keys().copied().collect();
            itfs.sort();
            for itf in itfs {
                if let Some(out) = router.generate_advertisement(&itf) {
                    match across(&topology.links, out.source, out.itf) {
                        Some(dest) => packets.entry(dest).or_default().push((out.packet, out.itf)),
                        None => warn!("Advertisement from {} over unknown link {}", out.source, out.itf),
                    }
                }
            }
        }
    }

    for router in &routers {
        router.show_routes();
    }
    for from in &topology.nodes {
        for to in &topology.nodes {
            match trace_route(&routers, &topology.links, *from, *to) {
                Some(path) => info!("{from} -> {to}: {path:?}"),
                None => info!("{from} -> {to}: unreachable"),
            }
        }
    }
    Ok(())
}
