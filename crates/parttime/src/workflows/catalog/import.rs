use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{JobId, JobPosting, SeekerId, SeekerProfile};
use crate::identity::UserId;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: u64, reason: String },
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog seed: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogImportError::InvalidRow { line, reason } => {
                write!(f, "catalog row on line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Jobs and seeker profiles loaded from a seed file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub jobs: Vec<JobPosting>,
    pub seekers: Vec<SeekerProfile>,
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    kind: String,
    id: String,
    user_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    skills: Option<String>,
    #[serde(default)]
    education_background: Option<String>,
}

pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CatalogSnapshot, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<CatalogSnapshot, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut snapshot = CatalogSnapshot::default();
        for result in csv_reader.records() {
            let record = result?;
            let line = record
                .position()
                .map(|position| position.line())
                .unwrap_or_default();
            let row: CatalogRow = record.deserialize(Some(&headers))?;
            match row.kind.to_ascii_lowercase().as_str() {
                "job" => snapshot.jobs.push(job_from_row(row, line)?),
                "seeker" => snapshot.seekers.push(seeker_from_row(row, line)?),
                other => {
                    return Err(CatalogImportError::InvalidRow {
                        line,
                        reason: format!("unknown kind '{other}'"),
                    })
                }
            }
        }

        Ok(snapshot)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

fn required(value: Option<String>, field: &str, line: u64) -> Result<String, CatalogImportError> {
    present(value).ok_or_else(|| CatalogImportError::InvalidRow {
        line,
        reason: format!("missing {field}"),
    })
}

fn job_from_row(row: CatalogRow, line: u64) -> Result<JobPosting, CatalogImportError> {
    Ok(JobPosting {
        id: JobId(row.id),
        employer: UserId(row.user_id),
        company_name: present(row.name).unwrap_or_default(),
        title: required(row.title, "title", line)?,
        description: required(row.description, "description", line)?,
        category: present(row.category).unwrap_or_else(|| "General".to_string()),
        location: present(row.location).unwrap_or_default(),
        salary_range: None,
        working_hours: None,
    })
}

fn seeker_from_row(row: CatalogRow, line: u64) -> Result<SeekerProfile, CatalogImportError> {
    Ok(SeekerProfile {
        id: SeekerId(row.id),
        user: UserId(row.user_id),
        full_name: required(row.name, "name", line)?,
        skills: present(row.skills),
        education_background: present(row.education_background),
    })
}
