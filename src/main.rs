use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Plot a sample-by-sample genotype correlation heatmap from a VCF file.
#[derive(Parser)]
#[command(
    name = "vcf-corrmap",
    version,
    about = "Pairwise sample correlation heatmaps from gzip-compressed VCF genotype files"
)]
struct Cli {
    /// Gzip-compressed VCF file
    vcf_file: PathBuf,

    /// Existing directory to write <basename>.corrmap.png into
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    vcf_corrmap::run_corrmap(&cli.vcf_file, &cli.output_dir)?;
    Ok(())
}
