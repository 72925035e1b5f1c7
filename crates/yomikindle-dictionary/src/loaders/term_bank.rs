use std::cmp::Ordering;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use yomikindle_core::dictionary::DictionaryEntry;

use crate::types::{LoadError, TermBankRow};

const TERM_BANK_PREFIX: &str = "term_bank";

pub struct TermBankLoader;

impl TermBankLoader {
    /// Load every `term_bank*` file of an unpacked dictionary, in natural filename order
    pub fn load_from_dir(dir: &Path) -> Result<Vec<DictionaryEntry>, LoadError> {
        if !dir.is_dir() {
            return Err(LoadError::FileNotFound(dir.display().to_string()));
        }

        let mut files: Vec<PathBuf> = Vec::new();
        for dir_entry in fs::read_dir(dir)? {
            let path = dir_entry?.path();
            let is_term_bank = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(TERM_BANK_PREFIX));
            if is_term_bank {
                files.push(path);
            } else {
                tracing::debug!("Skipping {}", path.display());
            }
        }
        files.sort_by(|a, b| natural_cmp(&file_name(a), &file_name(b)));

        tracing::info!("Loading {} term banks from {}", files.len(), dir.display());
        let mut entries = Vec::new();
        for file in &files {
            entries.extend(Self::load_from_file(file)?);
        }
        tracing::info!("Loaded {} dictionary entries", entries.len());
        Ok(entries)
    }

    /// Load a single term-bank JSON file
    pub fn load_from_file(path: &Path) -> Result<Vec<DictionaryEntry>, LoadError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json).map_err(|e| match e {
            LoadError::ParseError(msg) => LoadError::ParseError(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    pub fn from_json(json: &str) -> Result<Vec<DictionaryEntry>, LoadError> {
        let rows: Vec<TermBankRow> =
            serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;
        Ok(rows.into_iter().map(DictionaryEntry::from).collect())
    }

    /// Write entries as one term-bank file, rejecting entries with unknown inflection tags
    pub fn save_to_file(path: &Path, entries: &[DictionaryEntry]) -> Result<(), LoadError> {
        let rows = entries
            .iter()
            .map(TermBankRow::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, &rows).map_err(|e| LoadError::ParseError(e.to_string()))?;
        writer.flush()?;
        tracing::info!("Wrote {} entries to {}", rows.len(), path.display());
        Ok(())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Case-insensitive comparison treating digit runs as numbers
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_num = take_number(&mut left);
                let r_num = take_number(&mut right);
                match l_num.cmp(&r_num) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
            (Some(l), Some(r)) => {
                match l.to_lowercase().cmp(r.to_lowercase()) {
                    Ordering::Equal => {}
                    other => return other,
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> u64 {
    let mut value: u64 = 0;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        value = value.saturating_mul(10).saturating_add(u64::from(digit));
        chars.next();
    }
    value
}
