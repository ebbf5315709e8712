//! Derives the neighbor graph from cell coordinates.
//!
//! Each cell discovers its own neighbors by coordinate arithmetic, so the
//! graph comes out symmetric without a repair step. Blocked cells are linked
//! like any other; walkability is left to path search.
//!
//! With corner cutting enabled the four diagonal neighbors are linked too,
//! without looking at the two orthogonal cells flanking each diagonal.

use tracing::debug;

use super::cell::{Cell, CellId};
use super::grid::Layout;

const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Links every cell to its in-bounds neighbors. Returns the number of directed links.
pub(crate) fn link_neighbors(layout: &Layout, cells: &mut [Cell], allow_corner_cutting: bool) -> usize {
    let mut offsets = ORTHOGONAL.to_vec();
    if allow_corner_cutting {
        offsets.extend_from_slice(&DIAGONAL);
    }

    let mut links = 0;
    for cell in cells.iter_mut() {
        let coords = cell.coords();
        for &(dx, dy) in &offsets {
            if let Some(index) = layout
                .offset(coords, dx, dy)
                .and_then(|p| layout.index_of(p))
            {
                cell.add_neighbor(CellId(index as u32));
                links += 1;
            }
        }
    }

    debug!(links, allow_corner_cutting, "Linked neighbor graph");
    links
}
