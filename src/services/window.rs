//! Fixed-capacity series window.

use serde::{Serialize, Serializer};
use std::collections::VecDeque;

/// Ordered series that keeps at most `capacity` points, dropping the oldest
/// on append.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesWindow<T> {
    points: VecDeque<T>,
    capacity: usize,
}

impl<T> SeriesWindow<T> {
    /// Create an empty window. A zero capacity is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a window from an ordered sequence, keeping the newest points.
    pub fn from_points(points: Vec<T>, capacity: usize) -> Self {
        let mut window = Self::new(capacity);
        for point in points {
            window.push(point);
        }
        window
    }

    /// Append a point and trim from the front.
    pub fn push(&mut self, point: T) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Most recent point.
    pub fn last(&self) -> Option<&T> {
        self.points.back()
    }

    /// Mutable access to the most recent point.
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.points.back_mut()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.points.iter()
    }

    /// The newest `n` points, oldest first.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &T> {
        let start = self.points.len().saturating_sub(n);
        self.points.iter().skip(start)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.points.get(index)
    }
}

impl<T: Clone> SeriesWindow<T> {
    /// Copy the points out in order.
    pub fn to_vec(&self) -> Vec<T> {
        self.points.iter().cloned().collect()
    }
}

/// Serializes as a plain array, the shape chart consumers expect.
impl<T: Serialize> Serialize for SeriesWindow<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.points.iter())
    }
}
