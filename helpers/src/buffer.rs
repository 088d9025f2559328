/// RingBuffer keeps the most recent values up to a user-defined capacity. Once the capacity is
/// reached, every pushed value replaces the oldest one.
#[derive(Debug)]
pub struct RingBuffer<T> {
    vals: Vec<T>,
    capacity: usize,
    oldest_idx: usize,
}

impl<T: Into<f64> + Copy> RingBuffer<T> {
    pub fn new(capacity: usize) -> RingBuffer<T> {
        RingBuffer {
            vals: Vec::with_capacity(capacity),
            capacity,
            oldest_idx: 0,
        }
    }
    pub fn push(&mut self, val: T) {
        if self.capacity == 0 {
            return;
        }
        if !self.is_full() {
            self.vals.push(val);
        } else {
            self.vals[self.oldest_idx] = val;
            self.oldest_idx = (self.oldest_idx + 1) % self.capacity;
        }
    }
    pub fn len(&self) -> usize {
        self.vals.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }
    pub fn is_full(&self) -> bool {
        self.vals.len() >= self.capacity
    }
    /// get_avg returns the mean of the stored values, or None if nothing was pushed yet.
    pub fn get_avg(&self) -> Option<f64> {
        if self.vals.is_empty() {
            return None;
        }
        let sum: f64 = self.vals.iter().map(|&val| val.into()).sum();
        Some(sum / self.vals.len() as f64)
    }
}
