use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use time::{OffsetDateTime, format_description};

use crate::infra::protocol::StatusResponse;

#[derive(Serialize)]
struct ReplayEntry<'a> {
    turn: u32,
    status: &'a StatusResponse,
}

/// Appends every status snapshot as one JSON line.
pub struct ReplayFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl ReplayFile {
    pub fn create(replays_folder: &Path, robot_id: u64) -> io::Result<Self> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let format = format_description::parse("[year][month][day]-[hour][minute][second]")
            .map_err(io::Error::other)?;
        let date_time_str = now.format(&format).map_err(io::Error::other)?;

        let path = replays_folder.join(format!("{} - {}.jsonl", robot_id, date_time_str));
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, turn: u32, status: &StatusResponse) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, &ReplayEntry { turn, status })?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_appends_one_line_per_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("replays");
        let mut replay = ReplayFile::create(&folder, 42).unwrap();
        let status = fixtures::reference_status();

        replay.append(1, &status).unwrap();
        replay.append(2, &status).unwrap();

        let name = replay.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("42 - "));
        assert!(name.ends_with(".jsonl"));

        let contents = std::fs::read_to_string(replay.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let entry: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(entry["turn"], 2);
        let decoded: StatusResponse = serde_json::from_value(entry["status"].clone()).unwrap();
        assert_eq!(decoded, status);
    }
}
