use extrema_core::{IntensityImage, Point};
use log::{debug, trace};
use rayon::prelude::*;

use crate::candidate::{begin_pass, examine_candidates, ExtremumVerifier};
use crate::config::NonMaxConfig;
use crate::error::NonMaxResult;
use crate::search::{search_for, WindowSearch};
use crate::types::{ExtremumKind, SearchData};

/// Data-parallel verifier.
///
/// Candidates are cut into contiguous blocks. Block `i` is scanned by worker
/// slot `i`, which owns its own search instance and accumulator, so the scan
/// needs no locking. Accumulators are concatenated in slot order afterwards,
/// which makes the output identical to [`crate::NonMaxCandidate`] for any
/// number of threads.
pub struct NonMaxCandidateParallel {
    cfg: NonMaxConfig,
    prototype: Box<dyn WindowSearch>,
    workers: Vec<SearchData>,
}

impl NonMaxCandidateParallel {
    pub fn new(cfg: NonMaxConfig) -> NonMaxResult<Self> {
        let search = search_for(cfg.strict);
        Self::with_search(cfg, search)
    }

    pub fn with_search(cfg: NonMaxConfig, prototype: Box<dyn WindowSearch>) -> NonMaxResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            prototype,
            workers: Vec::new(),
        })
    }

    /// Number of pooled worker states kept between calls
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Contiguous block length used for `n` candidates on the current pool
    pub fn block_size(&self, n: usize) -> usize {
        let threads = rayon::current_num_threads().max(1);
        n.div_ceil(threads).max(self.cfg.min_block_size)
    }

    fn ensure_workers(&mut self, n_blocks: usize) {
        while self.workers.len() < n_blocks {
            self.workers.push(SearchData::new(self.prototype.new_instance()));
        }
        trace!("worker pool holds {} search states", self.workers.len());
    }

    fn examine(
        &mut self,
        image: &IntensityImage,
        candidates: &[Point],
        kind: ExtremumKind,
        found: &mut Vec<Point>,
    ) -> NonMaxResult<()> {
        begin_pass(image, found)?;
        if candidates.is_empty() {
            return Ok(());
        }

        let block_size = self.block_size(candidates.len());
        let n_blocks = candidates.len().div_ceil(block_size);
        self.ensure_workers(n_blocks);

        let cfg = &self.cfg;
        self.workers[..n_blocks]
            .par_iter_mut()
            .enumerate()
            .for_each(|(slot, worker)| {
                worker.reset();
                let start = slot * block_size;
                let end = (start + block_size).min(candidates.len());
                examine_candidates(
                    cfg,
                    image,
                    &candidates[start..end],
                    kind,
                    worker.search.as_mut(),
                    &mut worker.corners,
                );
            });

        // Merge in slot order, never completion order
        let total = self.workers[..n_blocks].iter().map(|w| w.corners.len()).sum();
        found.reserve(total);
        for worker in &self.workers[..n_blocks] {
            found.extend_from_slice(&worker.corners);
        }

        debug!(
            "{:?} pass: {} of {} candidates confirmed over {} blocks of {}",
            kind,
            found.len(),
            candidates.len(),
            n_blocks,
            block_size
        );
        Ok(())
    }
}

impl ExtremumVerifier for NonMaxCandidateParallel {
    fn examine_minimum(
        &mut self,
        image: &IntensityImage,
        candidates: &[Point],
        found: &mut Vec<Point>,
    ) -> NonMaxResult<()> {
        self.examine(image, candidates, ExtremumKind::Minimum, found)
    }

    fn examine_maximum(
        &mut self,
        image: &IntensityImage,
        candidates: &[Point],
        found: &mut Vec<Point>,
    ) -> NonMaxResult<()> {
        self.examine(image, candidates, ExtremumKind::Maximum, found)
    }

    fn config(&self) -> &NonMaxConfig {
        &self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::NonMaxCandidate;
    use crate::error::NonMaxError;
    use proptest::prelude::*;

    fn pool(threads: usize) -> rayon::ThreadPool {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
    }

    /// Deterministic pseudo-random image with plenty of ties
    fn textured_image(width: usize, height: usize, seed: u32) -> IntensityImage {
        let mut data = Vec::with_capacity(width * height);
        let mut state = seed.wrapping_mul(2654435761).wrapping_add(1);
        for _ in 0..width * height {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            data.push((state % 11) as f32 - 5.0);
        }
        IntensityImage::from_vec(width, height, data).unwrap()
    }

    fn every_pixel(img: &IntensityImage) -> Vec<Point> {
        (0..img.height() as i32)
            .flat_map(|y| (0..img.width() as i32).map(move |x| Point::new(x, y)))
            .collect()
    }

    fn small_blocks(radius: i32) -> NonMaxConfig {
        NonMaxConfig {
            min_block_size: 1,
            ..NonMaxConfig::new(radius).with_border(1)
        }
    }

    #[test]
    fn test_matches_sequential_for_any_thread_count() {
        let img = textured_image(40, 30, 7);
        let candidates = every_pixel(&img);

        let mut sequential = NonMaxCandidate::new(small_blocks(2)).unwrap();
        let mut expected_max = Vec::new();
        let mut expected_min = Vec::new();
        sequential.examine_maximum(&img, &candidates, &mut expected_max).unwrap();
        sequential.examine_minimum(&img, &candidates, &mut expected_min).unwrap();
        assert!(!expected_max.is_empty());
        assert!(!expected_min.is_empty());

        for threads in [1, 2, 3, 8] {
            let mut parallel = NonMaxCandidateParallel::new(small_blocks(2)).unwrap();
            let mut found = Vec::new();
            pool(threads).install(|| {
                parallel.examine_maximum(&img, &candidates, &mut found).unwrap();
                assert_eq!(found, expected_max, "maximum, {} threads", threads);
                parallel.examine_minimum(&img, &candidates, &mut found).unwrap();
                assert_eq!(found, expected_min, "minimum, {} threads", threads);
            });
        }
    }

    #[test]
    fn test_worker_states_are_reused_and_reset() {
        let img = textured_image(32, 32, 3);
        let candidates = every_pixel(&img);
        let mut parallel = NonMaxCandidateParallel::new(small_blocks(1)).unwrap();
        let mut found = Vec::new();

        pool(4).install(|| {
            parallel.examine_maximum(&img, &candidates, &mut found).unwrap();
        });
        let workers = parallel.worker_count();
        let first = found.clone();
        assert!(workers >= 1);

        // A second, smaller call must not leak points from the first one
        pool(4).install(|| {
            parallel.examine_maximum(&img, &candidates[..10], &mut found).unwrap();
        });
        assert_eq!(parallel.worker_count(), workers);
        assert!(found.iter().all(|p| candidates[..10].contains(p)));

        pool(4).install(|| {
            parallel.examine_maximum(&img, &candidates, &mut found).unwrap();
        });
        assert_eq!(found, first);
    }

    #[test]
    fn test_block_size_respects_minimum() {
        let parallel = NonMaxCandidateParallel::new(NonMaxConfig::default()).unwrap();
        pool(4).install(move || {
            assert_eq!(parallel.block_size(10), 64);
            assert_eq!(parallel.block_size(1000), 250);
        });
    }

    #[test]
    fn test_empty_candidates() {
        let img = textured_image(8, 8, 1);
        let mut parallel = NonMaxCandidateParallel::new(NonMaxConfig::default()).unwrap();
        let mut found = vec![Point::new(1, 1)];
        parallel.examine_minimum(&img, &[], &mut found).unwrap();
        assert!(found.is_empty());
        assert_eq!(parallel.worker_count(), 0);
    }

    #[test]
    fn test_empty_image_is_an_error() {
        let img = IntensityImage::new(4, 0);
        let mut parallel = NonMaxCandidateParallel::new(NonMaxConfig::default()).unwrap();
        let mut found = Vec::new();
        let result = parallel.examine_maximum(&img, &[Point::new(0, 0)], &mut found);
        assert!(matches!(result, Err(NonMaxError::EmptyImage { width: 4, height: 0 })));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_parallel_equals_sequential(
            seed in any::<u32>(),
            radius in 0i32..4,
            strict in any::<bool>(),
            threads in 1usize..6,
            raw in prop::collection::vec((-3i32..28, -3i32..24), 0..300),
        ) {
            let img = textured_image(25, 21, seed);
            let candidates: Vec<Point> = raw.into_iter().map(Point::from).collect();
            let cfg = NonMaxConfig { strict, ..small_blocks(radius) };

            let mut sequential = NonMaxCandidate::new(cfg.clone()).unwrap();
            let mut expected = Vec::new();
            sequential.examine_maximum(&img, &candidates, &mut expected).unwrap();

            let mut parallel = NonMaxCandidateParallel::new(cfg).unwrap();
            let mut found = Vec::new();
            pool(threads).install(|| parallel.examine_maximum(&img, &candidates, &mut found)).unwrap();

            prop_assert_eq!(found, expected);
        }
    }
}
