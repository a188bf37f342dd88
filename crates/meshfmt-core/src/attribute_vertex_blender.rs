//! Collapses per-face-corner attribute values into one value per vertex.
//!
//! Every corner incident to a vertex contributes its value with a weight;
//! the blended result is the weighted mean. With the default weight of one
//! this is the plain arithmetic mean over incident corners.

use num_traits::Float;

/// Values that can be accumulated and averaged.
pub trait BlendValue: Copy {
    /// Returns `self + value * weight`.
    fn add_weighted(self, value: Self, weight: f64) -> Self;

    /// Returns `self / weight`.
    fn divide(self, weight: f64) -> Self;
}

impl<T: Float, const N: usize> BlendValue for [T; N] {
    fn add_weighted(self, value: Self, weight: f64) -> Self {
        let w = T::from(weight).unwrap_or_else(T::one);
        let mut out = self;
        for (o, v) in out.iter_mut().zip(value) {
            *o = *o + v * w;
        }
        out
    }

    fn divide(self, weight: f64) -> Self {
        let w = T::from(weight).unwrap_or_else(T::one);
        self.map(|c| c / w)
    }
}

#[derive(Debug, Clone, Copy)]
struct CombinedValue<T> {
    value: T,
    weight_sum: f64,
}

#[derive(Debug, Clone, Default)]
pub struct AttributeVertexBlender<T: BlendValue> {
    vertex_values: Vec<CombinedValue<T>>,
    initial_value: T,
}

impl<T: BlendValue> AttributeVertexBlender<T> {
    /// Creates a blender with one accumulator per vertex, each starting at
    /// `initial_value` with zero weight.
    pub fn new(num_vertices: usize, initial_value: T) -> Self {
        let mut blender = Self {
            vertex_values: Vec::new(),
            initial_value,
        };
        blender.initialize(num_vertices, initial_value);
        blender
    }

    pub fn initialize(&mut self, num_vertices: usize, initial_value: T) {
        self.initial_value = initial_value;
        self.vertex_values.clear();
        self.vertex_values.resize(
            num_vertices,
            CombinedValue {
                value: initial_value,
                weight_sum: 0.0,
            },
        );
    }

    pub fn num_vertices(&self) -> usize {
        self.vertex_values.len()
    }

    /// Adds a contribution of weight one.
    pub fn accumulate_value(&mut self, vertex_index: usize, value: T) {
        self.accumulate_weighted_value(vertex_index, value, 1.0);
    }

    /// Adds `value * weight` to the vertex accumulator. Out-of-range vertex
    /// indices are ignored.
    pub fn accumulate_weighted_value(&mut self, vertex_index: usize, value: T, weight: f64) {
        if let Some(c) = self.vertex_values.get_mut(vertex_index) {
            c.value = c.value.add_weighted(value, weight);
            c.weight_sum += weight;
        }
    }

    /// Returns the weighted mean for the vertex, or the untouched initial
    /// value if nothing was accumulated for it. Out-of-range vertex indices
    /// also read as the initial value.
    pub fn get_vertex_value(&self, vertex_index: usize) -> T {
        let Some(c) = self.vertex_values.get(vertex_index) else {
            return self.initial_value;
        };
        if c.weight_sum > 0.0 {
            c.value.divide(c.weight_sum)
        } else {
            c.value
        }
    }

    /// Blended values for all vertices, in vertex order.
    pub fn vertex_values(&self) -> Vec<T> {
        (0..self.vertex_values.len())
            .map(|vid| self.get_vertex_value(vid))
            .collect()
    }
}
