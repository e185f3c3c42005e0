//! Reading gzip-compressed VCF files into a tabular structure.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use flate2::read::MultiGzDecoder;

/// Number of fixed VCF metadata columns (CHROM..FORMAT) before the per-sample fields.
pub const FIXED_COLUMNS: usize = 9;

/// A parsed VCF table: column names from the header line plus raw string rows.
#[derive(Clone, Debug)]
pub struct VcfTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl VcfTable {
    /// Sample identifiers: every header field after the fixed metadata columns.
    pub fn sample_ids(&self) -> &[String] {
        &self.columns[FIXED_COLUMNS..]
    }

    pub fn n_sites(&self) -> usize {
        self.rows.len()
    }

    pub fn n_samples(&self) -> usize {
        self.columns.len() - FIXED_COLUMNS
    }
}

fn vcf_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let name = path.to_string_lossy().to_ascii_lowercase();
    if name.ends_with(".gz") || name.ends_with(".bgz") {
        let decoder = MultiGzDecoder::new(file);
        Ok(Box::new(BufReader::with_capacity(64 * 1024, decoder)))
    } else {
        Ok(Box::new(BufReader::with_capacity(64 * 1024, file)))
    }
}

/// Read a (possibly gzip-compressed) VCF into a table of tab-separated fields.
///
/// Lines containing `##` are metadata and are skipped wherever the marker
/// appears; the first remaining line is the column header and every line after
/// it is one data row per variant site. Rows whose field count differs from
/// the header's are an error.
pub fn read_vcf_table(path: &Path) -> Result<VcfTable> {
    let reader = vcf_reader(path)?;

    let mut columns: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();

    for line in reader.lines() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        if line.contains("##") {
            continue;
        }
        let fields: Vec<String> = line.split('\t').map(str::to_string).collect();
        match &columns {
            None => {
                if fields.len() < FIXED_COLUMNS + 1 {
                    bail!(
                        "header has {} columns; expected at least {} ({} fixed VCF columns plus one sample)",
                        fields.len(),
                        FIXED_COLUMNS + 1,
                        FIXED_COLUMNS
                    );
                }
                columns = Some(fields);
            }
            Some(cols) => {
                if fields.len() != cols.len() {
                    bail!(
                        "data row {} has {} fields but the header has {} columns",
                        rows.len() + 1,
                        fields.len(),
                        cols.len()
                    );
                }
                rows.push(fields);
            }
        }
    }

    let columns = columns
        .ok_or_else(|| anyhow!("{}: no header line found in input", path.display()))?;
    Ok(VcfTable { columns, rows })
}
