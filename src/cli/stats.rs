use std::io::Write;

use prefixcode::{ALL_CODERS, CodingSchema, FrequencyTable, Strategy};
use serde::Serialize;

use crate::cli::{CompareArgs, OutputFormat, Result, StatsArgs, build_schema};

/// Length accounting of one schema against a fixed-width code.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub strategy: Strategy,
    pub distinct_symbols: usize,
    pub total_symbols: u64,
    pub total_bits: u64,
    pub average_bits: f64,
    pub compression_factor: f64,
    pub entropy: f64,
    pub efficiency: f64,
}

impl Report {
    pub fn new(strategy: Strategy, schema: &CodingSchema<char>, entropy: f64, fixed_width: u32) -> Self {
        Report {
            strategy,
            distinct_symbols: schema.len(),
            total_symbols: schema.total_count(),
            total_bits: schema.total_bits(),
            average_bits: schema.average_codeword_length(),
            compression_factor: schema.compression_factor(fixed_width),
            entropy,
            efficiency: schema.efficiency(entropy),
        }
    }
}

pub fn stats<W: Write>(args: StatsArgs, out: &mut W) -> Result<()> {
    let text = args.input.read()?;
    let schema = build_schema(&text, args.strategy, args.single_symbol)?;
    let entropy = FrequencyTable::from_symbols(text.chars()).entropy();
    let report = Report::new(args.strategy, &schema, entropy, args.fixed_width);

    writeln!(out, "Strategy: {}", report.strategy)?;
    writeln!(out, "Symbols: {} distinct, {} total", report.distinct_symbols, report.total_symbols)?;
    writeln!(out, "Entropy: {:.4} bits/symbol", report.entropy)?;
    writeln!(out, "Average bits needed: {:.4}", report.average_bits)?;
    writeln!(out, "Compression factor: {:.4}", report.compression_factor)?;
    writeln!(out, "Efficiency: {:.2}%", report.efficiency * 100.0)?;
    Ok(())
}

pub fn compare<W: Write>(args: CompareArgs, out: &mut W) -> Result<()> {
    let text = args.input.read()?;
    let entropy = FrequencyTable::from_symbols(text.chars()).entropy();

    let mut reports = Vec::with_capacity(ALL_CODERS.len());
    for coder in ALL_CODERS {
        let schema = build_schema(&text, coder.strategy, args.single_symbol)?;
        reports.push(Report::new(coder.strategy, &schema, entropy, args.fixed_width));
    }

    match args.format {
        OutputFormat::Text => {
            writeln!(out, "{:<14} {:>10} {:>10} {:>10}", "strategy", "avg bits", "factor", "efficiency")?;
            for report in &reports {
                writeln!(
                    out,
                    "{:<14} {:>10.4} {:>10.4} {:>9.2}%",
                    report.strategy.to_string(),
                    report.average_bits,
                    report.compression_factor,
                    report.efficiency * 100.0
                )?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &reports)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{InputArgs, SingleSymbolPolicy};

    fn input(text: &str) -> InputArgs {
        InputArgs {
            text: Some(text.to_string()),
            from_file: None,
        }
    }

    #[test]
    fn prints_average_and_compression_factor() {
        let mut out = Vec::new();
        let args = StatsArgs {
            input: input("hello"),
            strategy: Strategy::Huffman,
            fixed_width: 8,
            single_symbol: SingleSymbolPolicy::OneBit,
        };
        stats(args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Symbols: 4 distinct, 5 total\n"));
        assert!(text.contains("Average bits needed: 2.0000\n"));
        assert!(text.contains("Compression factor: 4.0000\n"));
    }

    #[test]
    fn compares_every_strategy() {
        let mut out = Vec::new();
        let args = CompareArgs {
            input: input("abracadabra"),
            fixed_width: 8,
            format: OutputFormat::Json,
            single_symbol: SingleSymbolPolicy::OneBit,
        };
        compare(args, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let reports = value.as_array().unwrap();
        assert_eq!(reports.len(), ALL_CODERS.len());
        assert_eq!(reports[0]["strategy"], "huffman");
        assert_eq!(reports[1]["strategy"], "shannon_fano");
        assert_eq!(reports[0]["total_symbols"], 11);
    }

    #[test]
    fn reject_policy_fails_on_single_symbol() {
        let mut out = Vec::new();
        let args = CompareArgs {
            input: input("zzz"),
            fixed_width: 8,
            format: OutputFormat::Text,
            single_symbol: SingleSymbolPolicy::Reject,
        };
        assert!(compare(args, &mut out).is_err());
    }
}
