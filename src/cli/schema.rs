use std::io::Write;

use prefixcode::CodingSchema;

use crate::cli::{OutputFormat, Result, SchemaArgs, build_schema};

pub fn schema<W: Write>(args: SchemaArgs, out: &mut W) -> Result<()> {
    let text = args.input.read()?;
    let mut schema = build_schema(&text, args.strategy, args.single_symbol)?;
    schema.sort_by_code();

    match args.format {
        OutputFormat::Text => write_table(&schema, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &schema)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn write_table<W: Write>(schema: &CodingSchema<char>, out: &mut W) -> Result<()> {
    writeln!(out, "{:<8} {:>8}  codeword", "symbol", "count")?;
    for entry in schema {
        writeln!(out, "{:<8} {:>8}  {}", format!("{:?}", entry.symbol), entry.count, entry.codeword)?;
    }
    Ok(())
}
