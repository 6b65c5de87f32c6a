/// Cumulative moving average of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingAverage {
	value: f64,
	count: u32,
}

impl Default for MovingAverage {
	fn default() -> Self {
		Self { value: 0.0, count: 1 }
	}
}

impl MovingAverage {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, sample: f64) {
		self.value += (sample - self.value) / f64::from(self.count);
		self.count = self.count.saturating_add(1);
	}

	pub fn value(&self) -> f64 {
		self.value
	}

	/// Samples pushed so far.
	pub fn samples(&self) -> u32 {
		self.count - 1
	}
}
