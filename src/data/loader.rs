use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read every record of a CSV file as raw text, header included.
///
/// Records are returned as-is; checking that each has two fields is the
/// session's job so that a bad file never half-replaces the current table.
pub fn load_file(path: &Path) -> Result<Vec<Vec<String>>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "txt" | "" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            read_records(file)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Write records to a CSV file, replacing it.
pub fn save_file(path: &Path, records: &[[String; 2]]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_records(file, records)
}

// ---------------------------------------------------------------------------
// CSV codec
// ---------------------------------------------------------------------------

/// CSV layout: first record is the two encoded axis headers, every further
/// record one `(x, y)` pair of cell text. Standard quoting applies.
pub fn read_records<R: Read>(input: R) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    reader
        .records()
        .enumerate()
        .map(|(row_no, result)| -> Result<Vec<String>> {
            let record = result.with_context(|| format!("CSV record {row_no}"))?;
            Ok(record.iter().map(str::to_string).collect())
        })
        .collect()
}

pub fn write_records<W: Write>(output: W, records: &[[String; 2]]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    for (row_no, record) in records.iter().enumerate() {
        writer
            .write_record(record)
            .with_context(|| format!("writing CSV record {row_no}"))?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(a: &str, b: &str) -> [String; 2] {
        [a.to_string(), b.to_string()]
    }

    #[test]
    fn quotes_fields_with_delimiters() {
        let mut out = Vec::new();
        write_records(
            &mut out,
            &[rec("Force, net (F) [N]", "say \"hi\""), rec("1", "2")],
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "\"Force, net (F) [N]\",\"say \"\"hi\"\"\"\n1,2\n"
        );
    }

    #[test]
    fn reads_back_what_it_writes() {
        let records = vec![rec("t [s]", "Distance (d) [m]"), rec("0", "0.5"), rec("", "abc")];
        let mut out = Vec::new();
        write_records(&mut out, &records).unwrap();

        let read = read_records(out.as_slice()).unwrap();
        let expected: Vec<Vec<String>> = records.iter().map(|r| r.to_vec()).collect();
        assert_eq!(read, expected);
    }

    #[test]
    fn ragged_records_are_passed_through() {
        let read = read_records("a,b\n1,2,3\n4\n".as_bytes()).unwrap();
        assert_eq!(read[1].len(), 3);
        assert_eq!(read[2], vec!["4".to_string()]);
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_file(Path::new("data.parquet")).unwrap_err();
        assert!(err.to_string().contains(".parquet"));
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join(format!("simple-plot-{}.csv", std::process::id()));
        let records = vec![rec("x", "y"), rec("1", "2")];
        save_file(&path, &records).unwrap();
        let read = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(read, vec![vec!["x".to_string(), "y".to_string()], vec!["1".to_string(), "2".to_string()]]);
    }
}
