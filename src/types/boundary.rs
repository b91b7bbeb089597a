//! Boundary vocabulary: edges of a rectangular block and the condition
//! applied on each of them.
//!
//! Provides a strongly-typed per-edge container, eliminating the need to
//! remember array index conventions like `[left, right, bottom, top]`.

use std::fmt;

/// One of the four edges of a rectangular grid block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryEdge {
    /// West edge (x = x_min)
    Left,
    /// East edge (x = x_max)
    Right,
    /// South edge (y = y_min)
    Bottom,
    /// North edge (y = y_max)
    Top,
}

impl BoundaryEdge {
    /// All edges in conventional order: Left, Right, Bottom, Top.
    pub const ALL: [BoundaryEdge; 4] = [
        BoundaryEdge::Left,
        BoundaryEdge::Right,
        BoundaryEdge::Bottom,
        BoundaryEdge::Top,
    ];
}

impl fmt::Display for BoundaryEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoundaryEdge::Left => "left",
            BoundaryEdge::Right => "right",
            BoundaryEdge::Bottom => "bottom",
            BoundaryEdge::Top => "top",
        };
        write!(f, "{}", name)
    }
}

/// Boundary condition applied on one edge of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryType {
    /// Reflecting wall: height and tangential momentum are mirrored into
    /// the ghost layer, normal momentum is negated. Zero mass flux.
    Wall,
    /// Transparent boundary: the full interior state is mirrored, letting
    /// waves leave the domain.
    Outflow,
    /// Ghost values are managed by the embedding driver (e.g. a
    /// multi-block exchange layer); the block itself never writes them.
    Passive,
}

impl fmt::Display for BoundaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoundaryType::Wall => "wall",
            BoundaryType::Outflow => "outflow",
            BoundaryType::Passive => "passive",
        };
        write!(f, "{}", name)
    }
}

/// Per-edge storage with named fields.
///
/// # Example
///
/// ```
/// use fv_rs::types::{BoundaryEdge, BoundaryType, EdgeData};
///
/// let mut bcs = EdgeData::uniform(BoundaryType::Wall);
/// bcs.set(BoundaryEdge::Right, BoundaryType::Outflow);
///
/// assert_eq!(*bcs.get(BoundaryEdge::Left), BoundaryType::Wall);
/// assert_eq!(*bcs.get(BoundaryEdge::Right), BoundaryType::Outflow);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeData<T> {
    /// Value on the left edge (x = x_min)
    pub left: T,
    /// Value on the right edge (x = x_max)
    pub right: T,
    /// Value on the bottom edge (y = y_min)
    pub bottom: T,
    /// Value on the top edge (y = y_max)
    pub top: T,
}

impl<T> EdgeData<T> {
    /// Create with explicit named values.
    pub fn new(left: T, right: T, bottom: T, top: T) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Create with the same value on all edges.
    pub fn uniform(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            left: value.clone(),
            right: value.clone(),
            bottom: value.clone(),
            top: value,
        }
    }

    /// Get a reference to the value on an edge.
    pub fn get(&self, edge: BoundaryEdge) -> &T {
        match edge {
            BoundaryEdge::Left => &self.left,
            BoundaryEdge::Right => &self.right,
            BoundaryEdge::Bottom => &self.bottom,
            BoundaryEdge::Top => &self.top,
        }
    }

    /// Set the value on an edge.
    pub fn set(&mut self, edge: BoundaryEdge, value: T) {
        match edge {
            BoundaryEdge::Left => self.left = value,
            BoundaryEdge::Right => self.right = value,
            BoundaryEdge::Bottom => self.bottom = value,
            BoundaryEdge::Top => self.top = value,
        }
    }

    /// Map a function over all edges.
    pub fn map<U, F>(self, mut f: F) -> EdgeData<U>
    where
        F: FnMut(T) -> U,
    {
        EdgeData {
            left: f(self.left),
            right: f(self.right),
            bottom: f(self.bottom),
            top: f(self.top),
        }
    }

    /// Convert to array `[left, right, bottom, top]`.
    pub fn to_array(self) -> [T; 4] {
        [self.left, self.right, self.bottom, self.top]
    }

    /// Iterate over `(edge, value)` pairs in conventional order.
    pub fn iter(&self) -> impl Iterator<Item = (BoundaryEdge, &T)> {
        BoundaryEdge::ALL.into_iter().zip([
            &self.left,
            &self.right,
            &self.bottom,
            &self.top,
        ])
    }
}

impl<T: Default> Default for EdgeData<T> {
    fn default() -> Self {
        Self {
            left: T::default(),
            right: T::default(),
            bottom: T::default(),
            top: T::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_data_named_access() {
        let data = EdgeData::new(1, 2, 3, 4);
        assert_eq!(*data.get(BoundaryEdge::Left), 1);
        assert_eq!(*data.get(BoundaryEdge::Right), 2);
        assert_eq!(*data.get(BoundaryEdge::Bottom), 3);
        assert_eq!(*data.get(BoundaryEdge::Top), 4);
    }

    #[test]
    fn test_edge_data_uniform() {
        let data = EdgeData::uniform(BoundaryType::Outflow);
        for edge in BoundaryEdge::ALL {
            assert_eq!(*data.get(edge), BoundaryType::Outflow);
        }
    }

    #[test]
    fn test_edge_data_set() {
        let mut data = EdgeData::uniform(0);
        data.set(BoundaryEdge::Top, 7);
        assert_eq!(*data.get(BoundaryEdge::Top), 7);
        assert_eq!(*data.get(BoundaryEdge::Bottom), 0);
    }

    #[test]
    fn test_edge_data_map() {
        let data = EdgeData::new(1, 2, 3, 4).map(|v| v * 10);
        assert_eq!(data.to_array(), [10, 20, 30, 40]);
    }

    #[test]
    fn test_edge_data_iter_order() {
        let data = EdgeData::new("l", "r", "b", "t");
        let edges: Vec<_> = data.iter().map(|(e, _)| e).collect();
        assert_eq!(edges, BoundaryEdge::ALL.to_vec());
    }
}
