use crate::libs::error::MashError;
use std::io::BufRead;
use std::path::Path;

/// A `mash dist -t` table.
///
/// ```text
/// #query    /data/g1.faa    /data/g2.faa
/// /data/g1.faa    0    0.0222766
/// /data/g2.faa    0.0222766    0
/// ```
///
/// Rows are queries, columns are references. Names are kept as mash prints
/// them, usually full paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistTable {
    pub queries: Vec<String>,
    pub references: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl DistTable {
    pub fn read<R: BufRead>(reader: R) -> Result<Self, MashError> {
        let mut table = DistTable::default();
        let mut has_header = false;

        // paths in the table may not be UTF-8; labels use the same lossy form
        for (i, line) in reader.split(b'\n').enumerate() {
            let line = line?;
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();

            if !has_header {
                if !fields[0].starts_with('#') {
                    return Err(MashError::MalformedTable {
                        line: i + 1,
                        message: "expected a header starting with '#'".to_string(),
                    });
                }
                table.references = fields[1..].iter().map(|s| s.to_string()).collect();
                has_header = true;
                continue;
            }

            if fields.len() != table.references.len() + 1 {
                return Err(MashError::MalformedTable {
                    line: i + 1,
                    message: format!(
                        "expected {} fields, found {}",
                        table.references.len() + 1,
                        fields.len()
                    ),
                });
            }

            let mut row = Vec::with_capacity(table.references.len());
            for field in &fields[1..] {
                let value = field.trim().parse::<f64>().map_err(|_| MashError::MalformedTable {
                    line: i + 1,
                    message: format!("invalid distance \"{}\"", field),
                })?;
                row.push(value);
            }
            table.queries.push(fields[0].to_string());
            table.values.push(row);
        }

        Ok(table)
    }

    /// Reads `Dist.tab` from disk. A file without rows is an error of its own,
    /// separate from a malformed one.
    pub fn from_path(path: &Path) -> Result<Self, MashError> {
        let reader = crate::reader(&path.to_string_lossy())?;
        let table = Self::read(reader)?;
        if table.queries.is_empty() || table.references.is_empty() {
            return Err(MashError::EmptyTable(path.to_path_buf()));
        }
        Ok(table)
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
