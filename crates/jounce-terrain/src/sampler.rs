//! The sampler trait and trivial implementations.

/// A deterministic scalar field over 3D space.
///
/// Implementations must be pure (same input, same output) and safe to
/// call from several worker threads at once. Samplers that need internal
/// mutable state must synchronize it themselves.
pub trait TerrainSampler: Send + Sync {
    /// Samples the field. Typical output lies roughly in `[-1, 1]`.
    fn sample(&self, x: f64, y: f64, z: f64) -> f64;
}

/// A constant field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatTerrain {
    pub value: f64,
}

impl FlatTerrain {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl TerrainSampler for FlatTerrain {
    #[inline]
    fn sample(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        self.value
    }
}

/// Adapts a closure into a sampler.
#[derive(Clone)]
pub struct FnTerrain<F>(pub F);

impl<F> TerrainSampler for FnTerrain<F>
where
    F: Fn(f64, f64, f64) -> f64 + Send + Sync,
{
    #[inline]
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        (self.0)(x, y, z)
    }
}

impl<T: TerrainSampler + ?Sized> TerrainSampler for &T {
    #[inline]
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).sample(x, y, z)
    }
}

impl<T: TerrainSampler + ?Sized> TerrainSampler for Box<T> {
    #[inline]
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).sample(x, y, z)
    }
}
