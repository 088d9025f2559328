pub mod buffer;
pub mod general;
pub mod geometry;

#[cfg(test)]
mod buffer_tests {
    use crate::buffer::RingBuffer;
    use approx::assert_ulps_eq;

    #[test]
    fn test_ringbuffer_empty() {
        let x: RingBuffer<u32> = RingBuffer::new(5);
        assert!(x.get_avg().is_none());
        assert!(x.is_empty());
    }
    #[test]
    fn test_ringbuffer_partially_filled() {
        let mut x: RingBuffer<u32> = RingBuffer::new(5);
        x.push(3);
        x.push(4);
        assert_eq!(x.len(), 2);
        assert!(!x.is_full());
        assert_ulps_eq!(x.get_avg().unwrap(), 3.5);
    }
    #[test]
    fn test_ringbuffer_overwrites_oldest() {
        let mut x: RingBuffer<u32> = RingBuffer::new(5);
        for val in [3, 4, 2, 1, 5, 10, 12].iter() {
            x.push(*val);
        }
        // 3 and 4 were replaced by 10 and 12
        assert_eq!(x.len(), 5);
        assert_ulps_eq!(x.get_avg().unwrap(), 6.0);
    }
    #[test]
    fn test_ringbuffer_zero_capacity() {
        let mut x: RingBuffer<u32> = RingBuffer::new(0);
        x.push(7);
        assert!(x.get_avg().is_none());
    }
}

#[cfg(test)]
mod general_tests {
    use crate::general::{max, min};
    use approx::assert_ulps_eq;

    #[test]
    fn test_max_ints() {
        let x: Vec<i32> = vec![3, -1, 5, 8, -2];
        assert_eq!(max(&x), Some(8));
    }
    #[test]
    fn test_max_floats() {
        let x: Vec<f64> = vec![3.0, -1.0, 5.0, 8.0, -2.0];
        assert_ulps_eq!(max(&x).unwrap(), 8.0);
    }
    #[test]
    fn test_min_floats() {
        let x: Vec<f64> = vec![3.0, -1.0, 5.0, 8.0, -2.0];
        assert_ulps_eq!(min(&x).unwrap(), -2.0);
    }
    #[test]
    fn test_min_max_empty() {
        let x: Vec<f64> = vec![];
        assert!(max(&x).is_none());
        assert!(min(&x).is_none());
    }
}
