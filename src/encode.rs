//! Ordinal encoding of genotype calls.

use ndarray::Array2;

use crate::vcf::{VcfTable, FIXED_COLUMNS};

/// Genotype codes for all sample columns: sites × samples, missing entries as NaN.
#[derive(Clone, Debug)]
pub struct EncodedMatrix {
    pub sample_ids: Vec<String>,
    pub codes: Array2<f64>,
}

/// Map a raw genotype call token to its ordinal code.
///
/// Missing (`./.`) and homozygous-reference (`0/0`) calls both encode as 0.
/// Any token outside the four recognized strings returns `None` and is later
/// treated as missing data, never as zero.
pub fn encode_genotype(token: &str) -> Option<u8> {
    match token {
        "./." | "0/0" => Some(0),
        "1/0" => Some(1),
        "0/1" => Some(2),
        "1/1" => Some(3),
        _ => None,
    }
}

/// Encode every sample column of the table into a sites × samples code matrix.
/// Metadata columns are left untouched; the table itself is not modified.
pub fn encode_samples(table: &VcfTable) -> EncodedMatrix {
    let mut codes = Array2::<f64>::from_elem((table.n_sites(), table.n_samples()), f64::NAN);
    for (i, row) in table.rows.iter().enumerate() {
        for (j, cell) in row[FIXED_COLUMNS..].iter().enumerate() {
            if let Some(code) = encode_genotype(cell) {
                codes[(i, j)] = code as f64;
            }
        }
    }
    EncodedMatrix {
        sample_ids: table.sample_ids().to_vec(),
        codes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_tokens_map_exactly() {
        assert_eq!(encode_genotype("./."), Some(0));
        assert_eq!(encode_genotype("0/0"), Some(0));
        assert_eq!(encode_genotype("1/0"), Some(1));
        assert_eq!(encode_genotype("0/1"), Some(2));
        assert_eq!(encode_genotype("1/1"), Some(3));
    }

    #[test]
    fn unrecognized_tokens_are_missing_not_zero() {
        for token in ["", ".", "0|1", "1|1", "2/2", "./1", "0/0:35", " 0/0"] {
            assert_eq!(encode_genotype(token), None, "token {:?}", token);
        }
    }

    #[test]
    fn encodes_sample_columns_with_nan_for_unknown() {
        let table = VcfTable {
            columns: vec![
                "#CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER", "INFO", "FORMAT", "S1",
                "S2",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            rows: vec![
                vec!["1", "100", ".", "A", "T", ".", "PASS", ".", "GT", "0/0", "1/1"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                vec!["1", "200", ".", "C", "G", ".", "PASS", ".", "GT", "2/2", "0/1"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ],
        };
        let encoded = encode_samples(&table);
        assert_eq!(encoded.sample_ids, vec!["S1".to_string(), "S2".to_string()]);
        assert_eq!(encoded.codes.dim(), (2, 2));
        assert_eq!(encoded.codes[(0, 0)], 0.0);
        assert_eq!(encoded.codes[(0, 1)], 3.0);
        assert!(encoded.codes[(1, 0)].is_nan());
        assert_eq!(encoded.codes[(1, 1)], 2.0);
    }
}
