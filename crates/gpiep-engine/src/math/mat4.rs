use bytemuck::{Pod, Zeroable};

/// 4×4 `f32` matrix stored column-major.
///
/// `cols[c][r]` is row `r` of column `c`, which is the memory layout WGSL
/// expects for a `mat4x4<f32>` uniform, so the value can be uploaded with
/// `bytemuck::bytes_of` without transposing.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4::from_cols([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    #[inline]
    pub const fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        Self { cols }
    }

    /// Rotation of `angle` radians about the +Y axis.
    ///
    /// Columns are `[cos, 0, -sin, 0]`, `[0, 1, 0, 0]`, `[sin, 0, cos, 0]`,
    /// `[0, 0, 0, 1]`. No translation, scale or projection is composed in.
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Element at `row`, `col`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.cols[col][row]
    }

    #[inline]
    pub fn column(&self, col: usize) -> [f32; 4] {
        self.cols[col]
    }

    pub fn transpose(&self) -> Self {
        let mut out = [[0.0f32; 4]; 4];
        for (c, col) in out.iter_mut().enumerate() {
            for (r, v) in col.iter_mut().enumerate() {
                *v = self.cols[r][c];
            }
        }
        Self::from_cols(out)
    }

    /// Matrix product `self * rhs`.
    pub fn mul(&self, rhs: &Mat4) -> Self {
        let mut out = [[0.0f32; 4]; 4];
        for (c, col) in out.iter_mut().enumerate() {
            for (r, v) in col.iter_mut().enumerate() {
                *v = (0..4).map(|k| self.get(r, k) * rhs.get(k, c)).sum();
            }
        }
        Self::from_cols(out)
    }

    /// Transforms a homogeneous point.
    pub fn transform(&self, p: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        for (r, v) in out.iter_mut().enumerate() {
            *v = (0..4).map(|k| self.get(r, k) * p[k]).sum();
        }
        out
    }

    /// Determinant via cofactor expansion along the first row.
    pub fn determinant(&self) -> f32 {
        (0..4)
            .map(|c| {
                let sign = if c % 2 == 0 { 1.0 } else { -1.0 };
                sign * self.get(0, c) * self.minor(0, c)
            })
            .sum()
    }

    fn minor(&self, skip_row: usize, skip_col: usize) -> f32 {
        let mut m = [[0.0f32; 3]; 3];
        let rows = (0..4).filter(|&r| r != skip_row);
        for (i, r) in rows.enumerate() {
            let cols = (0..4).filter(|&c| c != skip_col);
            for (j, c) in cols.enumerate() {
                m[i][j] = self.get(r, c);
            }
        }
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// `true` when every element differs from `other` by at most `eps`.
    pub fn approx_eq(&self, other: &Mat4, eps: f32) -> bool {
        self.cols
            .iter()
            .flatten()
            .zip(other.cols.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= eps)
    }

    /// Proper rotation check: `Mᵀ·M = I` and `det(M) = 1`, within `eps`.
    pub fn is_rotation(&self, eps: f32) -> bool {
        self.transpose().mul(self).approx_eq(&Mat4::IDENTITY, eps)
            && (self.determinant() - 1.0).abs() <= eps
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-5;

    #[test]
    fn identity_is_rotation() {
        assert!(Mat4::IDENTITY.is_rotation(EPS));
        assert_eq!(Mat4::rotation_y(0.0), Mat4::IDENTITY);
    }

    #[test]
    fn rotation_y_column_layout() {
        let a = 0.3f32;
        let m = Mat4::rotation_y(a);
        assert_eq!(m.column(0), [a.cos(), 0.0, -a.sin(), 0.0]);
        assert_eq!(m.column(1), [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(m.column(2), [a.sin(), 0.0, a.cos(), 0.0]);
        assert_eq!(m.column(3), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn rotation_y_bytes_are_column_major() {
        let m = Mat4::rotation_y(FRAC_PI_2);
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&m));
        assert_eq!(floats.len(), 16);
        // First column, third row holds -sin.
        assert!((floats[2] + 1.0).abs() < EPS);
        // Third column, first row holds +sin.
        assert!((floats[8] - 1.0).abs() < EPS);
    }

    #[test]
    fn quarter_turn_maps_x_to_negative_z() {
        let p = Mat4::rotation_y(FRAC_PI_2).transform([1.0, 0.0, 0.0, 1.0]);
        assert!(p[0].abs() < EPS);
        assert!((p[2] + 1.0).abs() < EPS);
        assert_eq!(p[3], 1.0);
    }

    #[test]
    fn rotation_y_is_rotation_for_many_angles() {
        for i in 0..=720 {
            let angle = i as f32 * 0.05 - 4.0 * PI;
            let m = Mat4::rotation_y(angle);
            assert!(m.is_rotation(EPS), "not a rotation at angle {angle}");
        }
    }

    #[test]
    fn determinant_of_scale() {
        let m = Mat4::from_cols([
            [2.0, 0.0, 0.0, 0.0],
            [0.0, 3.0, 0.0, 0.0],
            [0.0, 0.0, 4.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert!((m.determinant() - 24.0).abs() < EPS);
        assert!(!m.is_rotation(EPS));
    }

    #[test]
    fn composed_rotations_add_angles() {
        let a = Mat4::rotation_y(0.4).mul(&Mat4::rotation_y(0.5));
        assert!(a.approx_eq(&Mat4::rotation_y(0.9), EPS));
    }
}
