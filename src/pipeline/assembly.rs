use crate::core::geometry::PrimitiveTopology;

/// Iterator over the index triples of an index buffer.
///
/// Trailing indices that do not complete a triangle are ignored.
pub struct Triangles<'a> {
    indices: &'a [u32],
    topology: PrimitiveTopology,
    next: usize,
    remaining: usize,
}

/// Walks `indices` according to `topology`.
///
/// For strips, every odd triangle swaps its last two indices so all
/// triangles of the strip keep the same winding.
pub fn assemble_triangles(indices: &[u32], topology: PrimitiveTopology) -> Triangles<'_> {
    Triangles {
        indices,
        topology,
        next: 0,
        remaining: triangle_count(indices.len(), topology),
    }
}

/// Number of triangles `index_count` indices form under `topology`.
pub fn triangle_count(index_count: usize, topology: PrimitiveTopology) -> usize {
    match topology {
        PrimitiveTopology::TriangleList => index_count / 3,
        PrimitiveTopology::TriangleStrip => index_count.saturating_sub(2),
    }
}

impl Iterator for Triangles<'_> {
    type Item = [u32; 3];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let i = self.next;
        let triangle = match self.topology {
            PrimitiveTopology::TriangleList => {
                self.next += 3;
                [self.indices[i], self.indices[i + 1], self.indices[i + 2]]
            }
            PrimitiveTopology::TriangleStrip => {
                self.next += 1;
                if i % 2 == 0 {
                    [self.indices[i], self.indices[i + 1], self.indices[i + 2]]
                } else {
                    [self.indices[i], self.indices[i + 2], self.indices[i + 1]]
                }
            }
        };
        Some(triangle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Triangles<'_> {}
