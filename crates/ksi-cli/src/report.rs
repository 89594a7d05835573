//! Human-readable task results

use chrono::{DateTime, Utc};
use ksi::publications::PublicationsFile;
use ksi::types::{PublicationRecord, Signature};
use ksi::verify::VerificationResult;
use ksi::VerifyOutcome;
use std::io::{self, Write};

/// What to include in a verify report
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFlags {
    pub identity: bool,
    pub references: bool,
    pub details: bool,
}

/// Format a Unix time as `(secs) YYYY-MM-DD HH:MM:SS UTC`
pub fn format_time(secs: u64) -> String {
    let utc = i64::try_from(secs)
        .ok()
        .and_then(|s| DateTime::<Utc>::from_timestamp(s, 0));
    match utc {
        Some(t) => format!("({}) {}", secs, t.format("%Y-%m-%d %H:%M:%S UTC")),
        None => format!("({})", secs),
    }
}

fn write_record(out: &mut impl Write, record: &PublicationRecord) -> io::Result<()> {
    writeln!(
        out,
        "  Publication time:   {}",
        format_time(record.publication_time())
    )?;
    writeln!(out, "  Publication string: {}", record.published_data)?;
    for reference in &record.references {
        writeln!(out, "  Reference:          {}", reference)?;
    }
    for uri in &record.repository_uris {
        writeln!(out, "  Repository:         {}", uri)?;
    }
    Ok(())
}

fn write_details(out: &mut impl Write, result: &VerificationResult) -> io::Result<()> {
    writeln!(out, "Verification policy: {}", result.policy)?;
    writeln!(out, "Signing time: {}", format_time(result.signing_time))?;
    for step in &result.steps {
        writeln!(out, "  - {}", step)?;
    }
    Ok(())
}

fn write_signature(
    out: &mut impl Write,
    signature: &Signature,
    flags: ReportFlags,
) -> io::Result<()> {
    if flags.identity {
        writeln!(
            out,
            "Signer identity: {}",
            signature.signer_identity().unwrap_or("-")
        )?;
    }
    if flags.references {
        match signature.publication_record() {
            Some(record) => {
                writeln!(out, "Publication:")?;
                write_record(out, record)?;
            }
            None => writeln!(out, "Publication: signature is not extended")?,
        }
    }
    Ok(())
}

/// Report a successful verification
pub fn write_verify(
    out: &mut impl Write,
    outcome: &VerifyOutcome,
    flags: ReportFlags,
) -> io::Result<()> {
    write_signature(out, outcome.effective(), flags)?;
    if flags.details {
        if let Some(anchor) = &outcome.anchor {
            writeln!(out, "Trust anchor: {}", anchor.source())?;
        }
        write_details(out, &outcome.result)?;
    }
    Ok(())
}

/// Report a successful extension
pub fn write_extend(
    out: &mut impl Write,
    extended: &Signature,
    original: &VerificationResult,
    details: bool,
) -> io::Result<()> {
    match extended.publication_record() {
        Some(record) => {
            writeln!(out, "Extended to publication:")?;
            write_record(out, record)?;
        }
        None => {
            if let Some(chain) = extended.calendar_chain() {
                writeln!(
                    out,
                    "Extended to {} (no publication record)",
                    format_time(chain.publication_time)
                )?;
            }
        }
    }
    if details {
        writeln!(out, "Old signature:")?;
        write_details(out, original)?;
    }
    Ok(())
}

/// Report an authenticated publications file
pub fn write_pubfile(
    out: &mut impl Write,
    file: &PublicationsFile,
    details: bool,
) -> io::Result<()> {
    if let Some(created) = &file.created {
        writeln!(out, "Created: {}", created.format("%Y-%m-%d %H:%M:%S UTC"))?;
    }
    writeln!(out, "Publications: {}", file.publications.len())?;
    match file.latest() {
        Some(latest) => {
            writeln!(out, "Latest publication:")?;
            write_record(out, latest)?;
        }
        None => writeln!(out, "Latest publication: none")?,
    }
    if details {
        for record in &file.publications {
            writeln!(out)?;
            write_record(out, record)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ksi::types::{DataHash, HashAlgorithm, PublicationData};

    fn record() -> PublicationRecord {
        PublicationRecord::new(PublicationData::new(
            1_400_000_000,
            DataHash::new(HashAlgorithm::Sha2256, vec![5; 32]).unwrap(),
        ))
        .with_reference("Test Gazette")
    }

    #[test]
    fn test_format_time() {
        assert_eq!(
            format_time(1_400_000_000),
            "(1400000000) 2014-05-13 16:53:20 UTC"
        );
        assert_eq!(format_time(u64::MAX), format!("({})", u64::MAX));
    }

    #[test]
    fn test_pubfile_report() {
        let file = PublicationsFile::new(vec![record()]);
        let mut out = Vec::new();
        write_pubfile(&mut out, &file, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Publications: 1"));
        assert!(text.contains("Reference:          Test Gazette"));
        assert!(text.contains(&record().published_data.to_base32()));
    }
}
