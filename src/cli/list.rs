use std::io::Write;

use prefixcode::ALL_CODERS;

use crate::cli::Result;

pub fn list_coders<W: Write>(detailed: bool, out: &mut W) -> Result<()> {
    for coder in ALL_CODERS {
        if detailed && let Some(desc) = coder.short_description {
            writeln!(out, "Name: {}\nAliases: {}\nDescription: {}\n", coder.name, coder.aliases.join(", "), desc)?;
        } else {
            writeln!(out, "{}", coder.name)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_names() {
        let mut out = Vec::new();
        list_coders(false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "huffman\nshannon_fano\n");
    }

    #[test]
    fn detailed_listing_has_descriptions() {
        let mut out = Vec::new();
        list_coders(true, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Name: shannon_fano\nAliases: shannon-fano, sf, fano\nDescription: Shannon-Fano coding."));
    }
}
