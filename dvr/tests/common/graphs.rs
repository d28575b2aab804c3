use dvr::framework::ProtocolParams;
use crate::common::virtual_network::VirtualSystem;

pub const A: u32 = 1;
pub const B: u32 = 2;
pub const C: u32 = 3;

/// A -(0)- B -(1)- C, every link has weight 1
pub fn vnet_line(params: ProtocolParams) -> VirtualSystem {
    VirtualSystem::create(
        &[A, B, C],
        &[
            (0, A, B, 1),
            (1, B, C, 1),
        ],
        params,
    )
}

pub fn vnet_simple_weighted(params: ProtocolParams) -> VirtualSystem {
    VirtualSystem::create(
        &[1, 2, 3, 4, 5],
        &[
            (0, 1, 2, 2),
            (1, 1, 3, 1),
            (2, 2, 3, 4),
            (3, 2, 4, 5),
            (4, 3, 4, 100),
            (5, 3, 5, 8),
            (6, 4, 5, 1),
        ],
        params,
    )
}

/// a ring of six nodes with a single chord
pub fn vnet_ring(params: ProtocolParams) -> VirtualSystem {
    VirtualSystem::create(
        &[1, 2, 3, 4, 5, 6],
        &[
            (0, 1, 2, 1),
            (1, 2, 3, 1),
            (2, 3, 4, 1),
            (3, 4, 5, 1),
            (4, 5, 6, 1),
            (5, 6, 1, 1),
            (6, 1, 4, 5),
        ],
        params,
    )
}

pub fn poison_reverse() -> ProtocolParams {
    ProtocolParams {
        allow_poison_reverse: true,
        ..Default::default()
    }
}
