use argh::FromArgs;
use std::collections::BTreeMap;
use std::path::PathBuf;

use cvkit::dataset::{load_class_names, DatasetConfig, SampleCollection};
use cvkit::serialize::load_yaml;

#[derive(FromArgs)]
/// Open a dataset split, optionally shuffle it and report per class counts
struct Args {
    /// dataset folder containing <mode>.txt
    #[argh(option, short = 'r')]
    root: Option<PathBuf>,

    /// split to open
    #[argh(option, short = 'm', default = "String::from(\"train\")")]
    mode: String,

    /// yaml file with a dataset config, overrides root and mode
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// shuffle with this seed
    #[argh(option, short = 's')]
    seed: Option<u64>,

    /// decode the first n samples
    #[argh(option, short = 'n', default = "0")]
    decode: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = match (&args.config, &args.root) {
        (Some(path), _) => load_yaml::<DatasetConfig>(path)?,
        (None, Some(root)) => DatasetConfig {
            root: root.clone(),
            mode: args.mode.clone(),
            shuffle: args.seed.is_some(),
            seed: args.seed,
        },
        (None, None) => return Err("either --root or --config is required".into()),
    };

    let dataset: SampleCollection = config.open()?;
    println!(
        "{} split of {}: {} samples, {} classes",
        config.mode,
        dataset.base_path().display(),
        dataset.len(),
        dataset.num_classes()
    );

    let names = load_class_names(&config.root).unwrap_or_else(|e| {
        log::warn!("no class names: {e}");
        Vec::new()
    });

    let mut counts = BTreeMap::new();
    for entry in dataset.entries() {
        *counts.entry(entry.label).or_insert(0usize) += 1;
    }
    for (label, count) in counts.iter() {
        let name = usize::try_from(*label)
            .ok()
            .and_then(|i| names.get(i))
            .map_or("?", |s| s.as_str());
        println!("  {label:>4} {name:<20} {count}");
    }

    for (i, item) in dataset.iter().take(args.decode).enumerate() {
        match item {
            Ok((image, label)) => println!(
                "  [{i}] {} {}x{} label {label}",
                dataset.entries()[i].path.display(),
                image.width(),
                image.height()
            ),
            Err(e) => log::error!("[{i}] {e}"),
        }
    }

    Ok(())
}
