use log::info;

/// Depth tracks how deep the sentinel edges of an [`Rbt`] sit below
/// the root. One sample is taken for every leaf edge, so a tree with
/// `n` entries yields `n + 1` samples.
///
/// [`Rbt`]: crate::Rbt
#[derive(Clone, Debug)]
pub struct Depth {
    samples: usize,
    min: Option<usize>,
    max: usize,
    total: usize,
    histogram: [u64; 128],
}

impl Depth {
    pub(crate) fn new() -> Depth {
        Default::default()
    }

    pub(crate) fn sample(&mut self, depth: usize) {
        self.samples += 1;
        self.total += depth;
        self.min = Some(self.min.map_or(depth, |min| min.min(depth)));
        self.max = self.max.max(depth);
        // a balanced tree of any addressable size stays far below this.
        self.histogram[depth.min(self.histogram.len() - 1)] += 1;
    }

    /// Number of leaf edges sampled.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Depth of the shallowest leaf edge.
    pub fn min(&self) -> usize {
        self.min.unwrap_or(0)
    }

    /// Depth of the deepest leaf edge.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Average leaf depth, rounded down.
    pub fn mean(&self) -> usize {
        match self.samples {
            0 => 0,
            n => self.total / n,
        }
    }

    /// Return depth percentiles as (percentile, depth) tuples, from the
    /// 90th percentile upwards.
    pub fn percentiles(&self) -> Vec<(u8, usize)> {
        let mut percentiles = vec![];
        if self.samples == 0 {
            return percentiles;
        }
        let (mut acc, mut prev_perc) = (0_u64, 90_u8);
        let iter = self.histogram.iter().enumerate().filter(|(_, &n)| n > 0);
        for (depth, n) in iter {
            acc += *n;
            let perc = ((acc as f64 / self.samples as f64) * 100_f64) as u8;
            if perc >= prev_perc {
                percentiles.push((perc, depth));
                prev_perc = perc;
            }
        }
        percentiles
    }

    /// Log depth statistics at info level, each line prefixed.
    pub fn log(&self, prefix: &str) {
        info!(
            "{}depth (min, mean, max): {:?}",
            prefix,
            (self.min(), self.mean(), self.max)
        );
        for (perc, depth) in self.percentiles().into_iter() {
            info!("{}  {} percentile = {}", prefix, perc, depth);
        }
    }
}

impl Default for Depth {
    fn default() -> Self {
        Depth {
            samples: 0,
            min: None,
            max: 0,
            total: 0,
            histogram: [0; 128],
        }
    }
}
