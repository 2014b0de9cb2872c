/// Largest quantized value representable with `bits` bits (`2^bits - 1`).
pub fn max_quantized_value(bits: u8) -> u32 {
    ((1u64 << bits) - 1) as u32
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Quantizer {
    inverse_delta: f32,
}

impl Quantizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self, range: f32, max_quantized_value: u32) {
        if range > 0.0 {
            self.inverse_delta = max_quantized_value as f32 / range;
        } else {
            self.inverse_delta = 0.0;
        }
    }

    /// Rounds `val * inverse_delta` to the nearest integer.
    pub fn quantize_float(&self, val: f32) -> i32 {
        let val = val * self.inverse_delta;
        (val + 0.5).floor() as i32
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Dequantizer {
    delta: f32,
}

impl Dequantizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init(&mut self, range: f32, max_quantized_value: u32) -> bool {
        if max_quantized_value > 0 {
            self.delta = range / max_quantized_value as f32;
            true
        } else {
            false
        }
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn dequantize_float(&self, val: i32) -> f32 {
        val as f32 * self.delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_quantized_value() {
        assert_eq!(max_quantized_value(1), 1);
        assert_eq!(max_quantized_value(11), 2047);
        assert_eq!(max_quantized_value(30), (1 << 30) - 1);
    }

    #[test]
    fn test_quantize_rounds_to_nearest() {
        let mut q = Quantizer::new();
        q.init(10.0, 10);
        assert_eq!(q.quantize_float(0.0), 0);
        assert_eq!(q.quantize_float(2.4), 2);
        assert_eq!(q.quantize_float(2.6), 3);
        assert_eq!(q.quantize_float(10.0), 10);
    }

    #[test]
    fn test_zero_range() {
        let mut q = Quantizer::new();
        q.init(0.0, 255);
        assert_eq!(q.quantize_float(5.0), 0);
    }

    #[test]
    fn test_dequantize() {
        let mut d = Dequantizer::new();
        assert!(!d.init(1.0, 0));
        assert!(d.init(4.0, 8));
        assert_eq!(d.delta(), 0.5);
        assert_eq!(d.dequantize_float(3), 1.5);
    }
}
