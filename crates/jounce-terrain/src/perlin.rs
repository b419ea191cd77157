//! Improved Perlin gradient noise.
//!
//! The permutation table is fixed at construction and never mutated,
//! so a `PerlinTerrain` can be shared across worker threads freely.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::sampler::TerrainSampler;

/// Reference permutation from the improved-noise paper.
const REFERENCE: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// 3D gradient noise with output in roughly `[-1, 1]`.
#[derive(Debug, Clone)]
pub struct PerlinTerrain {
    perm: [u8; 512],
    /// Spatial frequency applied to every coordinate before sampling.
    pub frequency: f64,
}

impl PerlinTerrain {
    /// Noise over the reference permutation.
    pub fn new() -> Self {
        Self::from_table(REFERENCE)
    }

    /// Noise over a permutation shuffled from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        let mut table = REFERENCE;
        table.shuffle(&mut StdRng::seed_from_u64(seed));
        Self::from_table(table)
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    fn from_table(table: [u8; 256]) -> Self {
        let mut perm = [0u8; 512];
        for (i, p) in perm.iter_mut().enumerate() {
            *p = table[i & 255];
        }
        Self {
            perm,
            frequency: 1.0,
        }
    }

    #[inline]
    fn hash(&self, i: usize) -> usize {
        self.perm[i] as usize
    }

    fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        let (xf, yf, zf) = (x.floor(), y.floor(), z.floor());
        let xi = (xf as i64 & 255) as usize;
        let yi = (yf as i64 & 255) as usize;
        let zi = (zf as i64 & 255) as usize;
        let (x, y, z) = (x - xf, y - yf, z - zf);
        let (u, v, w) = (fade(x), fade(y), fade(z));

        let a = self.hash(xi) + yi;
        let aa = self.hash(a) + zi;
        let ab = self.hash(a + 1) + zi;
        let b = self.hash(xi + 1) + yi;
        let ba = self.hash(b) + zi;
        let bb = self.hash(b + 1) + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(self.hash(aa), x, y, z), grad(self.hash(ba), x - 1.0, y, z)),
                lerp(
                    u,
                    grad(self.hash(ab), x, y - 1.0, z),
                    grad(self.hash(bb), x - 1.0, y - 1.0, z),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(self.hash(aa + 1), x, y, z - 1.0),
                    grad(self.hash(ba + 1), x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad(self.hash(ab + 1), x, y - 1.0, z - 1.0),
                    grad(self.hash(bb + 1), x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }
}

impl Default for PerlinTerrain {
    fn default() -> Self {
        Self::new()
    }
}

impl TerrainSampler for PerlinTerrain {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let f = self.frequency;
        self.noise(x * f, y * f, z * f)
    }
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}
