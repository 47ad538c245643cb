use serde::Deserialize;

/// One line of `docker ps --format '{{json .}}'`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerRecord {
    #[serde(rename = "ID")]
    pub id: String,
    pub image: String,
    /// Comma-separated when a container has several names.
    pub names: String,
    pub state: String,
    pub status: String,
    pub ports: String,
}

impl ContainerRecord {
    pub fn has_name(&self, name: &str) -> bool {
        self.names.split(',').any(|n| n.trim() == name)
    }
}

/// A `docker ps` line: parsed when it is valid JSON, kept verbatim otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PsLine {
    Record(ContainerRecord),
    Raw(String),
}

impl PsLine {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            PsLine::Record(record) => record.has_name(name),
            PsLine::Raw(line) => line.contains(&format!("\"Names\":\"{name}\"")),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            PsLine::Record(record) if !record.id.is_empty() => Some(&record.id),
            _ => None,
        }
    }
}

/// Split `docker ps` output into one entry per non-blank line.
pub fn parse_ps_output(stdout: &str) -> Vec<PsLine> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match serde_json::from_str::<ContainerRecord>(line) {
            Ok(record) => PsLine::Record(record),
            Err(_) => PsLine::Raw(line.to_string()),
        })
        .collect()
}
