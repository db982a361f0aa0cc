use std::collections::HashSet;
use std::path::{Path, PathBuf};

use cvkit_image::Image;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::capability::{Identity, LoadSample, Preprocess, RgbImageLoader};
use crate::error::DatasetError;
use crate::manifest::{read_manifest, Label, ManifestEntry};

/// An indexable, shuffleable collection of labelled samples.
///
/// The collection is built from the manifest `<base_path>/<mode>.txt`, a
/// whitespace separated table of `path label` rows. Samples are loaded lazily
/// by [`SampleCollection::get`] through the injected [`LoadSample`]
/// capability and passed through the [`Preprocess`] capability; nothing is
/// cached between calls.
///
/// Each manifest row is kept as a single [`ManifestEntry`], so shuffling
/// moves paths and labels together.
///
/// `get` borrows the collection immutably and the shuffles borrow it
/// mutably, so a collection shared across threads for loading cannot be
/// reordered until every borrow has ended.
///
/// # Example
///
/// ```no_run
/// use cvkit_dataset::SampleCollection;
///
/// let mut dataset = SampleCollection::open("/data/flowers", "train").unwrap();
/// dataset.shuffle_seeded(42);
///
/// for item in dataset.iter() {
///     let (image, label) = item.unwrap();
///     println!("{}x{} -> {label}", image.width(), image.height());
/// }
/// ```
pub struct SampleCollection<S = Image<u8, 3>, O = S> {
    base_path: PathBuf,
    entries: Vec<ManifestEntry>,
    num_classes: usize,
    loader: Box<dyn LoadSample<S>>,
    preprocess: Box<dyn Preprocess<S, O>>,
}

impl SampleCollection {
    /// Open the `mode` split under `base_path`, decoding samples as RGB images.
    pub fn open(base_path: impl AsRef<Path>, mode: &str) -> Result<Self, DatasetError> {
        Self::with_loader(base_path, mode, RgbImageLoader)
    }
}

impl<S> SampleCollection<S, S> {
    /// Open the `mode` split under `base_path` with a custom loader and no
    /// preprocessing.
    pub fn with_loader(
        base_path: impl AsRef<Path>,
        mode: &str,
        loader: impl LoadSample<S> + 'static,
    ) -> Result<Self, DatasetError> {
        Self::new(base_path, mode, loader, Identity)
    }
}

impl<S, O> SampleCollection<S, O> {
    /// Open the `mode` split under `base_path` with the given capabilities.
    ///
    /// Reads and validates the whole manifest. The capabilities are stored
    /// and only invoked by [`SampleCollection::get`].
    pub fn new(
        base_path: impl AsRef<Path>,
        mode: &str,
        loader: impl LoadSample<S> + 'static,
        preprocess: impl Preprocess<S, O> + 'static,
    ) -> Result<Self, DatasetError> {
        let base_path = base_path.as_ref().to_path_buf();
        let entries = read_manifest(&base_path, mode)?;
        let num_classes = entries
            .iter()
            .map(|entry| entry.label)
            .collect::<HashSet<_>>()
            .len();

        log::debug!(
            "opened {} split of {}: {} samples, {} classes",
            mode,
            base_path.display(),
            entries.len(),
            num_classes
        );

        Ok(Self {
            base_path,
            entries,
            num_classes,
            loader: Box::new(loader),
            preprocess: Box::new(preprocess),
        })
    }

    /// Replace the preprocessing step, possibly changing the output type.
    pub fn with_preprocess<P>(
        self,
        preprocess: impl Preprocess<S, P> + 'static,
    ) -> SampleCollection<S, P> {
        SampleCollection {
            base_path: self.base_path,
            entries: self.entries,
            num_classes: self.num_classes,
            loader: self.loader,
            preprocess: Box::new(preprocess),
        }
    }

    /// Load and preprocess the sample at `index`.
    ///
    /// # Errors
    ///
    /// * [`DatasetError::IndexOutOfRange`] if `index >= len()`; nothing is loaded.
    /// * [`DatasetError::SampleLoad`] if the loader fails.
    /// * [`DatasetError::Preprocess`] if the preprocessing step fails.
    pub fn get(&self, index: usize) -> Result<(O, Label), DatasetError> {
        let entry = self.entry(index)?;

        let sample = self
            .loader
            .load(&entry.path)
            .map_err(|source| DatasetError::SampleLoad {
                path: entry.path.clone(),
                source,
            })?;

        self.preprocess
            .apply(sample, entry.label)
            .map_err(|source| DatasetError::Preprocess {
                path: entry.path.clone(),
                source,
            })
    }

    /// The manifest entry at `index`, without loading it.
    pub fn entry(&self, index: usize) -> Result<&ManifestEntry, DatasetError> {
        self.entries
            .get(index)
            .ok_or(DatasetError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    /// Iterate over all samples in index order, loading each lazily.
    pub fn iter(&self) -> impl Iterator<Item = Result<(O, Label), DatasetError>> + '_ {
        (0..self.len()).map(move |index| self.get(index))
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection has no samples. Never true once constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct labels in the manifest.
    #[inline]
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Directory the manifest paths are relative to.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// All manifest entries in the current order.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Randomly permute the samples using the thread local generator.
    pub fn shuffle(&mut self) {
        self.shuffle_with_rng(&mut rand::rng());
    }

    /// Randomly permute the samples with a generator seeded from `seed`.
    ///
    /// The same seed on the same manifest always gives the same order.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        self.shuffle_with_rng(&mut StdRng::seed_from_u64(seed));
    }

    /// Randomly permute the samples using `rng`.
    pub fn shuffle_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.entries.shuffle(rng);
        log::debug!(
            "shuffled {} samples of {}",
            self.entries.len(),
            self.base_path.display()
        );
    }
}

impl<S, O> std::fmt::Debug for SampleCollection<S, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleCollection")
            .field("base_path", &self.base_path)
            .field("len", &self.entries.len())
            .field("num_classes", &self.num_classes)
            .finish_non_exhaustive()
    }
}
