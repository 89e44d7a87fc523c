//! Human-readable output.

use std::io::{self, Write};
use varsig::{encoding::Encoding, hash, FieldValue, Inspection, Registry};

/// Print an inspection as an aligned table.
pub(crate) fn inspection(out: &mut impl Write, inspection: &Inspection) -> io::Result<()> {
    let encoding = match Encoding::from_code(inspection.encoding.value) {
        Some(Encoding::Identity) => Some("identity"),
        None => None,
    };

    writeln!(out, "{:<18}{}", "algorithm", inspection.algorithm)?;
    tag(out, "prefix", &inspection.prefix, None)?;
    tag(out, "signature header", &inspection.signature_header, None)?;
    tag(
        out,
        "hash algorithm",
        &inspection.hash_algorithm,
        hash::name(inspection.hash_algorithm.value),
    )?;
    writeln!(
        out,
        "{:<18}{:<8}({})",
        "signature length",
        inspection.signature_length.value,
        hex::encode(&inspection.signature_length.raw)
    )?;
    tag(out, "encoding", &inspection.encoding, encoding)?;
    writeln!(out, "{:<18}{}", "signature", hex::encode(&inspection.signature))?;
    writeln!(out, "{:<18}{}", "total length", inspection.total_length)?;

    if !inspection.is_exact() {
        writeln!(out, "{:<18}{} bytes ignored", "trailing", inspection.trailing())?;
    }
    Ok(())
}

/// List registered algorithms with their tags.
pub(crate) fn algorithms(out: &mut impl Write, registry: &Registry) -> io::Result<()> {
    for entry in registry.entries() {
        let hash = hash::name(entry.hash_algorithm()).unwrap_or("unknown hash");
        writeln!(
            out,
            "{:<12}{:<10}{:#x} ({hash})",
            entry.name(),
            format!("{:#x}", entry.signature_header()),
            entry.hash_algorithm(),
        )?;
    }
    Ok(())
}

fn tag(
    out: &mut impl Write,
    label: &str,
    field: &FieldValue,
    name: Option<&str>,
) -> io::Result<()> {
    let value = format!("{:#x}", field.value);
    write!(out, "{label:<18}{value:<8}({})", hex::encode(&field.raw))?;
    match name {
        Some(name) => writeln!(out, " {name}"),
        None => writeln!(out),
    }
}
