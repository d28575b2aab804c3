use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use dvr::concepts::interface::LocalNode;
use dvr::concepts::packet::Packet;
use dvr::concepts::route::NextHop;
use dvr::concepts::table::RoutingTable;
use dvr::framework::{ProtocolParams, RouterContext, RoutingSystem, Tick};
use dvr::router::Router;

pub type VirtualRouter = Router<VirtualSystem, LocalNode<VirtualSystem>>;

pub struct VirtualSystem {
    pub routers: Vec<VirtualRouter>,
    /// (link id, node a, node b), the link id is the interface id on both ends
    pub links: Vec<(i32, u32, u32)>,
    /// packets waiting to be delivered: node, Vec<(packet, link it arrives on)>
    pub packets: BTreeMap<u32, Vec<(Packet<VirtualSystem>, i32)>>,
    pub time: Tick,
}

/// Everything needed to resume a simulation
#[derive(Serialize, Deserialize)]
pub struct Snapshot {
    pub params: ProtocolParams,
    pub nodes: Vec<(LocalNode<VirtualSystem>, RoutingTable<VirtualSystem>)>,
    pub links: Vec<(i32, u32, u32)>,
    pub packets: BTreeMap<u32, Vec<(Packet<VirtualSystem>, i32)>>,
    pub time: Tick,
}

impl VirtualSystem {
    pub fn create(nodes: &[u32], links: &[(i32, u32, u32, u16)], params: ProtocolParams) -> VirtualSystem {
        let routers = nodes.iter().map(|id| {
            let mut node = LocalNode::<VirtualSystem>::new(*id);
            for (lid, a, b, weight) in links {
                if a == id || b == id {
                    node.add_interface(*lid, *weight);
                }
            }
            let mut router = VirtualRouter::with_params(node, params.clone()).unwrap();
            router.init();
            router
        }).collect();
        VirtualSystem {
            routers,
            links: links.iter().map(|(lid, a, b, _)| (*lid, *a, *b)).collect(),
            packets: Default::default(),
            time: 0,
        }
    }

    pub fn update_edge(&mut self, edge_id: i32, weight: u16) {
        for router in &mut self.routers {
            router.context_mut().set_weight(&edge_id, weight);
        }
    }

    pub fn set_edge_up(&mut self, edge_id: i32, up: bool) {
        for router in &mut self.routers {
            router.context_mut().set_up(&edge_id, up);
        }
    }

    pub fn get_node(&self, node: u32) -> &VirtualRouter {
        self.routers.iter().find(|r| *r.address() == node).unwrap_or_else(|| panic!("No node {node} found"))
    }

    pub fn get_node_mut(&mut self, node: u32) -> &mut VirtualRouter {
        self.routers.iter_mut().find(|r| *r.address() == node).unwrap_or_else(|| panic!("No node {node} found"))
    }

    /// the node on the other end of `link`, seen from `node`
    pub fn across(&self, node: u32, link: i32) -> u32 {
        let (_, a, b) = self.links.iter().find(|(lid, _, _)| *lid == link).unwrap_or_else(|| panic!("No link {link} found"));
        if *a == node { *b } else { *a }
    }

    pub fn get_next_hop(&self, cur: u32, dest: u32) -> NextHop<VirtualSystem> {
        self.get_node(cur).next_hop(&dest)
    }

    /// the neighbour `cur` forwards to when sending to `dest`
    pub fn get_next_node(&self, cur: u32, dest: u32) -> Option<u32> {
        self.get_next_hop(cur, dest).interface().map(|link| self.across(cur, *link))
    }

    pub fn get_metric_to(&self, cur: u32, dest: u32) -> u16 {
        self.get_node(cur).metric_to(&dest).unwrap_or_else(|| panic!("No route found to {dest}"))
    }

    /// Follows the forwarding tables hop by hop, None if the packet would be dropped or loop
    pub fn trace_route(&self, from: u32, to: u32) -> Option<Vec<u32>> {
        let mut path = vec![from];
        let mut cur = from;
        while path.len() <= self.routers.len() {
            match self.get_next_hop(cur, to) {
                NextHop::Local => return Some(path),
                NextHop::Unknown => return None,
                NextHop::Interface(link) => {
                    if !self.get_node(cur).context().is_up(&link) {
                        return None;
                    }
                    cur = self.across(cur, link);
                    path.push(cur);
                }
            }
        }
        None
    }

    pub fn tick(&mut self) {
        for router in &mut self.routers {
            router.context_mut().now = self.time;
            router.tidy();
        }

        for (node, packets) in std::mem::take(&mut self.packets) {
            if let Some(router) = self.routers.iter_mut().find(|x| *x.address() == node) {
                for (packet, link) in packets {
                    router.process_advertisement(&packet, &link);
                }
            }
        }

        for router in &self.routers {
            let mut itfs: Vec<i32> = router.context().interfaces.keys().copied().collect();
            itfs.sort();
            for itf in itfs {
                if let Some(out) = router.generate_advertisement(&itf) {
                    let (_, a, b) = self.links.iter().find(|(lid, _, _)| *lid == out.itf).unwrap();
                    let dest = if *a == out.source { *b } else { *a };
                    self.packets.entry(dest).or_default().push((out.packet, out.itf));
                }
            }
        }
        self.time += 1;
    }

    pub fn tick_n(&mut self, times: i32) {
        for _ in 0..times {
            self.tick();
        }
    }

    pub fn freeze(&self) -> String {
        let snapshot = Snapshot {
            params: self.routers[0].params().clone(),
            nodes: self.routers.iter().map(|r| (r.context().clone(), r.table().clone())).collect(),
            links: self.links.clone(),
            packets: self.packets.clone(),
            time: self.time,
        };
        serde_json::to_string(&snapshot).unwrap()
    }

    pub fn restore(state: &str) -> VirtualSystem {
        let snapshot: Snapshot = serde_json::from_str(state).unwrap();
        let routers = snapshot.nodes.into_iter().map(|(node, table)| {
            VirtualRouter::restore(node, snapshot.params.clone(), table).unwrap()
        }).collect();
        VirtualSystem {
            routers,
            links: snapshot.links,
            packets: snapshot.packets,
            time: snapshot.time,
        }
    }
}

impl RoutingSystem for VirtualSystem {
    type NodeAddress = u32;
    type InterfaceId = i32;
}
