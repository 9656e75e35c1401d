//! The per-sample generator trait.

/// A generator that yields one floating point sample per call.
///
/// Tone voices and noise sources implement [`next_sample`](Signal::next_sample);
/// [`process`](Signal::process) and [`take_samples`](Signal::take_samples) are
/// provided on top of it.
pub trait Signal {
    /// Produces the next sample and advances the signal by one step.
    ///
    /// Values are nominally within [-1, 1]. Tone voices may exceed that
    /// range and rely on post-processing to bring them back.
    fn next_sample(&mut self) -> f64;

    /// Fills `buffer` with consecutive samples.
    fn process(&mut self, buffer: &mut [f64]) {
        buffer
            .iter_mut()
            .for_each(|slot| *slot = self.next_sample());
    }

    /// Collects the next `count` samples into a new vector.
    fn take_samples(&mut self, count: usize) -> Vec<f64> {
        let mut buffer = vec![0.0; count];
        self.process(&mut buffer);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(f64);

    impl Signal for Counter {
        fn next_sample(&mut self) -> f64 {
            self.0 += 1.0;
            self.0
        }
    }

    #[test]
    fn test_default_process_calls_next_sample() {
        let mut counter = Counter(0.0);
        let mut buffer = vec![0.0; 4];
        counter.process(&mut buffer);
        assert_eq!(buffer, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_take_samples_continues_stream() {
        let mut counter = Counter(0.0);
        assert_eq!(counter.take_samples(2), vec![1.0, 2.0]);
        assert_eq!(counter.take_samples(2), vec![3.0, 4.0]);
    }

    #[test]
    fn test_take_zero_samples() {
        let mut counter = Counter(0.0);
        assert!(counter.take_samples(0).is_empty());
        assert_eq!(counter.next_sample(), 1.0);
    }
}
