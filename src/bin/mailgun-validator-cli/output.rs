use anyhow::{Context, Result, bail};
use mailgun_validator::{ParseResult, ValidationResult};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationRow {
    pub input: String,
    #[serde(flatten)]
    pub result: ValidationResult,
}

impl ValidationRow {
    pub fn is_clean(&self) -> bool {
        self.result.is_valid && self.result.message.is_none()
    }
}

pub enum Report {
    Validation(Vec<ValidationRow>),
    Parse(ParseResult),
}

impl Report {
    /// `false` when the exit code should signal invalid/unparseable input.
    pub fn is_clean(&self) -> bool {
        match self {
            Report::Validation(rows) => rows.iter().all(ValidationRow::is_clean),
            Report::Parse(result) => result.all_parsed(),
        }
    }
}

pub fn emit(report: &Report, format: &str, out: Option<&str>) -> Result<()> {
    match format {
        "human" => {
            if out.is_some() {
                bail!("--out is only supported with json|ndjson|csv");
            }
            let rendered = render_human(report);
            if !rendered.is_empty() {
                println!("{rendered}");
            }
        }
        "json" => {
            let s = match report {
                Report::Validation(rows) => serde_json::to_string_pretty(rows)?,
                Report::Parse(result) => serde_json::to_string_pretty(result)?,
            };
            write_or_print(out, s)?;
        }
        "ndjson" => {
            let mut buf = String::new();
            match report {
                Report::Validation(rows) => {
                    for r in rows {
                        buf.push_str(&serde_json::to_string(r)?);
                        buf.push('\n');
                    }
                }
                Report::Parse(result) => {
                    buf.push_str(&serde_json::to_string(result)?);
                    buf.push('\n');
                }
            }
            if let Some(path) = out {
                write_all_atomically(path, buf.as_bytes())?;
            } else {
                print!("{buf}");
            }
        }
        "csv" => {
            #[cfg(feature = "with-csv")]
            {
                let data = render_csv(report)?;
                if let Some(path) = out {
                    write_all_atomically(path, &data)?;
                } else {
                    print!("{}", String::from_utf8_lossy(&data));
                }
            }
            #[cfg(not(feature = "with-csv"))]
            {
                bail!("format=csv requires the 'with-csv' feature");
            }
        }
        other => bail!("unknown --format '{other}', use: human|json|ndjson|csv"),
    }
    Ok(())
}

fn write_or_print(out: Option<&str>, s: String) -> Result<()> {
    if let Some(path) = out {
        write_all_atomically(path, s.as_bytes())
    } else {
        println!("{s}");
        Ok(())
    }
}

pub fn render_human(report: &Report) -> String {
    let mut lines = Vec::new();
    match report {
        Report::Validation(rows) => {
            for row in rows {
                lines.push(human_validation_line(row));
            }
        }
        Report::Parse(result) => {
            if let Some(message) = &result.message {
                lines.push(format!("[ERROR]       {message}"));
            }
            for address in &result.parsed {
                lines.push(format!("[PARSED]      {address}"));
            }
            for address in &result.unparseable {
                lines.push(format!("[UNPARSEABLE] {address}"));
            }
        }
    }
    lines.join("\n")
}

fn human_validation_line(row: &ValidationRow) -> String {
    let result = &row.result;
    if let Some(message) = &result.message {
        return format!("[ERROR]   {} :: {}", row.input, message);
    }
    let mut line = if result.is_valid {
        format!("[OK]      {}", row.input)
    } else {
        format!("[INVALID] {}", row.input)
    };
    if let Some(hint) = result.suggestion() {
        line.push_str(&format!(" (did you mean {hint}?)"));
    }
    line
}

#[cfg(feature = "with-csv")]
fn render_csv(report: &Report) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    match report {
        Report::Validation(rows) => {
            wtr.write_record([
                "input",
                "address",
                "is_valid",
                "local_part",
                "domain",
                "display_name",
                "did_you_mean",
                "message",
            ])?;
            for row in rows {
                let r = &row.result;
                wtr.write_record([
                    row.input.as_str(),
                    r.address.as_str(),
                    if r.is_valid { "true" } else { "false" },
                    r.parts.local_part.as_deref().unwrap_or(""),
                    r.parts.domain.as_deref().unwrap_or(""),
                    r.parts.display_name.as_deref().unwrap_or(""),
                    r.did_you_mean.as_deref().unwrap_or(""),
                    r.message.as_deref().unwrap_or(""),
                ])?;
            }
        }
        Report::Parse(result) => {
            wtr.write_record(["status", "address"])?;
            for address in &result.parsed {
                wtr.write_record(["parsed", address.as_str()])?;
            }
            for address in &result.unparseable {
                wtr.write_record(["unparseable", address.as_str()])?;
            }
        }
    }
    wtr.into_inner().context("flush csv writer")
}

fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;
    let tmp = format!("{}.tmp", path);
    {
        let mut f = std::fs::File::create(&tmp).with_context(|| format!("create {tmp}"))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}
