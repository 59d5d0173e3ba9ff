use super::{ColorVertex, Mesh, TexturedVertex};

pub const CUBE_VERTEX_COUNT: usize = 8;
pub const CUBE_INDEX_COUNT: usize = 36;

/// Corner positions: front face (z = +0.5) first, then the back face.
const CORNERS: [[f32; 3]; CUBE_VERTEX_COUNT] = [
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
];

const CORNER_COLORS: [[f32; 3]; CUBE_VERTEX_COUNT] = [
    [1.0, 0.0, 0.0], // red
    [0.0, 1.0, 0.0], // green
    [0.0, 0.0, 1.0], // blue
    [1.0, 1.0, 0.0], // yellow
    [1.0, 0.0, 1.0], // magenta
    [0.0, 1.0, 1.0], // cyan
    [0.5, 0.5, 0.5], // grey
    [0.8, 0.2, 0.5], // pink
];

// Front and back faces share the same square mapping.
const CORNER_UVS: [[f32; 2]; CUBE_VERTEX_COUNT] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
];

/// Two triangles per face: front, back, left, right, top, bottom.
pub const CUBE_INDICES: [u32; CUBE_INDEX_COUNT] = [
    0, 1, 2, 2, 3, 0, // front
    4, 5, 6, 6, 7, 4, // back
    0, 3, 7, 7, 4, 0, // left
    1, 2, 6, 6, 5, 1, // right
    3, 2, 6, 6, 7, 3, // top
    0, 1, 5, 5, 4, 0, // bottom
];

/// Cube with one color per corner.
pub fn color_cube() -> Mesh<ColorVertex> {
    let vertices = CORNERS
        .iter()
        .zip(CORNER_COLORS)
        .map(|(&p, c)| ColorVertex::new(p, c))
        .collect();
    Mesh::new(vertices, CUBE_INDICES.to_vec())
}

/// Same geometry as [`color_cube`], carrying texture coordinates instead of colors.
pub fn textured_cube() -> Mesh<TexturedVertex> {
    let vertices = CORNERS
        .iter()
        .zip(CORNER_UVS)
        .map(|(&p, uv)| TexturedVertex::new(p, uv))
        .collect();
    Mesh::new(vertices, CUBE_INDICES.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_cube_counts() {
        let mesh = color_cube();
        assert_eq!(mesh.vertices().len(), 8);
        assert_eq!(mesh.indices().len(), 36);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn textured_cube_counts() {
        let mesh = textured_cube();
        assert_eq!(mesh.vertices().len(), 8);
        assert_eq!(mesh.index_count(), 36);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn indices_reference_existing_vertices() {
        assert!(CUBE_INDICES.iter().all(|&i| (i as usize) < CUBE_VERTEX_COUNT));
        assert!(color_cube().validate().is_ok());
        assert!(textured_cube().validate().is_ok());
    }

    #[test]
    fn variants_share_positions() {
        let colored = color_cube();
        let textured = textured_cube();
        for (a, b) in colored.vertices().iter().zip(textured.vertices()) {
            assert_eq!(a.position, b.position);
        }
    }

    #[test]
    fn corners_lie_on_unit_cube() {
        for v in color_cube().vertices() {
            assert!(v.position.iter().all(|c| c.abs() == 0.5));
        }
    }

    #[test]
    fn vertex_strides() {
        assert_eq!(std::mem::size_of::<ColorVertex>(), 6 * 4);
        assert_eq!(std::mem::size_of::<TexturedVertex>(), 5 * 4);
    }
}
