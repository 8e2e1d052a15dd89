//! Frame-rate meter.

use std::collections::VecDeque;

const SAMPLE_WINDOW: usize = 120;
const REFRESH_MS: f64 = 500.0;

#[derive(Clone, Debug, Default)]
pub struct FrameStats {
	last_frame: Option<f64>,
	frame_ms: VecDeque<f64>,
	last_refresh: f64,
	text: String,
}

impl FrameStats {
	/// Records a frame rendered at `now_ms`. Returns the refreshed summary
	/// text when it is due for a redraw.
	pub fn update(&mut self, now_ms: f64) -> Option<&str> {
		let Some(last) = self.last_frame.replace(now_ms) else {
			self.last_refresh = now_ms;
			return None;
		};
		let dt = now_ms - last;
		if dt <= f64::EPSILON {
			return None;
		}
		self.frame_ms.push_back(dt);
		while self.frame_ms.len() > SAMPLE_WINDOW {
			self.frame_ms.pop_front();
		}

		if now_ms - self.last_refresh < REFRESH_MS {
			return None;
		}
		self.last_refresh = now_ms;
		self.text = self.summary()?;
		Some(&self.text)
	}

	fn summary(&self) -> Option<String> {
		let count = self.frame_ms.len();
		if count == 0 {
			return None;
		}
		let avg_ms = self.frame_ms.iter().sum::<f64>() / count as f64;
		let slowest = self.frame_ms.iter().copied().fold(0.0, f64::max);
		let fastest = self.frame_ms.iter().copied().fold(f64::INFINITY, f64::min);
		Some(format!(
			"FPS {:.0} ({:.0}-{:.0}) - {:.1} ms",
			1000.0 / avg_ms,
			1000.0 / slowest,
			1000.0 / fastest,
			avg_ms
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reports_after_refresh_interval() {
		let mut stats = FrameStats::default();
		let mut reports = Vec::new();
		for frame in 0..=60 {
			if let Some(text) = stats.update(frame as f64 * 20.0) {
				reports.push(text.to_owned());
			}
		}
		assert_eq!(reports.len(), 2);
		assert_eq!(reports[0], "FPS 50 (50-50) - 20.0 ms");
	}

	#[test]
	fn first_frame_only_primes() {
		let mut stats = FrameStats::default();
		assert!(stats.update(1000.0).is_none());
		assert!(stats.update(1000.0).is_none());
	}
}
