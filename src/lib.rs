//! vcf-corrmap: sample-by-sample genotype correlation heatmaps from VCF files.
//!
//! One-shot pipeline: read a gzip-compressed VCF, encode genotype calls as
//! ordinal codes, compute pairwise Pearson correlations between samples, and
//! render the matrix as an annotated heatmap PNG.

pub mod corr;
pub mod encode;
pub mod plot;
pub mod vcf;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use plot::HeatmapStyle;

/// Run the full pipeline and write `<basename>.corrmap.png` into `output_dir`.
/// Returns the path of the written image.
///
/// Every failure propagates immediately; nothing is retried and no partial
/// output is kept.
pub fn run_corrmap(vcf_path: &Path, output_dir: &Path) -> Result<PathBuf> {
    let table = vcf::read_vcf_table(vcf_path)?;
    eprintln!(
        "Loaded {} sites x {} samples from {}",
        table.n_sites(),
        table.n_samples(),
        vcf_path.display()
    );

    let encoded = encode::encode_samples(&table);
    let corr = corr::pearson_correlation(&encoded);
    eprintln!(
        "Computed {0} x {0} sample correlation matrix",
        corr.sample_ids.len()
    );

    let out_path = output_dir.join(plot::output_basename(vcf_path));
    plot::render_heatmap(&corr, &out_path, &HeatmapStyle::default())
        .with_context(|| format!("rendering heatmap for {}", vcf_path.display()))?;
    eprintln!("Wrote {}", out_path.display());

    Ok(out_path)
}
