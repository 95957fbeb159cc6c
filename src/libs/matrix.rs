use crate::libs::error::MashError;
use crate::libs::input::basename;
use crate::libs::table::DistTable;
use indexmap::IndexSet;
use itertools::Itertools;
use std::io::Write;
use std::path::Path;

/// One row of the long form
#[derive(Debug, Clone, PartialEq)]
pub struct DistPair {
    pub source: String,
    pub target: String,
    pub dist: f64,
}

/// Square distance matrix labelled by genome basename.
#[derive(Debug, Clone, PartialEq)]
pub struct DistMatrix {
    names: IndexSet<String>,
    values: Vec<f64>,
}

impl DistMatrix {
    /// An all-zero matrix over `names`
    pub fn new(names: Vec<String>) -> Result<Self, MashError> {
        let size = names.len();
        let mut set = IndexSet::with_capacity(size);
        for name in names {
            if !set.insert(name.clone()) {
                return Err(MashError::DuplicateLabel(name));
            }
        }

        Ok(DistMatrix {
            names: set,
            values: vec![0.0; size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size() + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let size = self.size();
        self.values[i * size + j] = value;
    }

    pub fn get_by_name(&self, a: &str, b: &str) -> Option<f64> {
        Some(self.get(self.index_of(a)?, self.index_of(b)?))
    }

    pub fn row(&self, i: usize) -> &[f64] {
        let size = self.size();
        &self.values[i * size..(i + 1) * size]
    }

    pub fn is_symmetric(&self, epsilon: f64) -> bool {
        let size = self.size();
        (0..size).all(|i| (i + 1..size).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= epsilon))
    }

    /// Pivots a mash table into a matrix.
    ///
    /// Labels are basenames of the table's names. With `order`, rows and
    /// columns follow it and it must name exactly the genomes in the table;
    /// otherwise the table's column order is used.
    pub fn from_table(table: &DistTable, order: Option<&[String]>) -> Result<Self, MashError> {
        let queries: Vec<String> = table.queries.iter().map(|q| basename(Path::new(q))).collect();
        let references: Vec<String> = table
            .references
            .iter()
            .map(|r| basename(Path::new(r)))
            .collect();

        let names = match order {
            Some(order) => order.to_vec(),
            None => references.clone(),
        };
        let mut matrix = DistMatrix::new(names)?;

        if queries.len() != matrix.size() || references.len() != matrix.size() {
            return Err(MashError::LabelMismatch(format!(
                "{} genomes expected, table has {} rows and {} columns",
                matrix.size(),
                queries.len(),
                references.len()
            )));
        }

        let lookup = |label: &String| {
            matrix
                .index_of(label)
                .ok_or_else(|| MashError::LabelMismatch(format!("unexpected genome \"{}\"", label)))
        };
        let rows = queries.iter().map(lookup).collect::<Result<Vec<_>, _>>()?;
        let cols = references.iter().map(lookup).collect::<Result<Vec<_>, _>>()?;
        if rows.iter().unique().count() != rows.len() || cols.iter().unique().count() != cols.len() {
            return Err(MashError::LabelMismatch("repeated genome in table".to_string()));
        }

        for (r, row) in table.values.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                matrix.set(rows[r], cols[c], *value);
            }
        }

        Ok(matrix)
    }

    /// Melts the matrix: `size()²` rows, self distances included.
    pub fn to_pairs(&self) -> Vec<DistPair> {
        let mut pairs = Vec::with_capacity(self.values.len());
        for (i, source) in self.names.iter().enumerate() {
            for (j, target) in self.names.iter().enumerate() {
                pairs.push(DistPair {
                    source: source.clone(),
                    target: target.clone(),
                    dist: self.get(i, j),
                });
            }
        }
        pairs
    }

    /// Relaxed PHYLIP: the count on the first line, then one named row per genome.
    pub fn write_phylip<W: Write + ?Sized>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "{}", self.size())?;
        for (i, name) in self.names.iter().enumerate() {
            writeln!(writer, "{}\t{}", name, self.row(i).iter().join("\t"))?;
        }
        Ok(())
    }
}

/// Writes the long form as TSV, with a `Source  Target  Dist` header if asked.
pub fn write_pairs<W: Write + ?Sized>(
    pairs: &[DistPair],
    writer: &mut W,
    header: bool,
) -> std::io::Result<()> {
    if header {
        writeln!(writer, "Source\tTarget\tDist")?;
    }
    for pair in pairs {
        writeln!(writer, "{}\t{}\t{}", pair.source, pair.target, pair.dist)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn table() -> DistTable {
        // rows in a different order than columns
        let text = "#query\t/d/g1.fna\t/d/g2.fna\t/d/g3.fna\n\
                    /d/g3.fna\t0.3\t0.2\t0\n\
                    /d/g1.fna\t0\t0.1\t0.3\n\
                    /d/g2.fna\t0.1\t0\t0.2\n";
        DistTable::read(Cursor::new(text)).unwrap()
    }

    #[test]
    fn test_from_table() {
        let matrix = DistMatrix::from_table(&table(), None).unwrap();

        assert_eq!(matrix.size(), 3);
        assert_eq!(
            matrix.names().collect::<Vec<_>>(),
            vec!["g1.fna", "g2.fna", "g3.fna"]
        );
        assert!(matrix.is_symmetric(1e-9));
        for i in 0..3 {
            assert_eq!(matrix.get(i, i), 0.0);
        }
        assert_eq!(matrix.get_by_name("g1.fna", "g3.fna"), Some(0.3));
        assert_eq!(matrix.get_by_name("g3.fna", "g2.fna"), Some(0.2));
    }

    #[test]
    fn test_from_table_ordered() {
        let order = vec!["g3.fna".to_string(), "g1.fna".to_string(), "g2.fna".to_string()];
        let matrix = DistMatrix::from_table(&table(), Some(&order)).unwrap();

        assert_eq!(matrix.names().collect::<Vec<_>>(), order);
        assert_eq!(matrix.row(0), &[0.0, 0.3, 0.2]);

        let order = vec!["g1.fna".to_string(), "g2.fna".to_string(), "g4.fna".to_string()];
        assert!(matches!(
            DistMatrix::from_table(&table(), Some(&order)),
            Err(MashError::LabelMismatch(_))
        ));

        let order = vec!["g1.fna".to_string(), "g2.fna".to_string()];
        assert!(matches!(
            DistMatrix::from_table(&table(), Some(&order)),
            Err(MashError::LabelMismatch(_))
        ));
    }

    #[test]
    fn test_to_pairs() {
        let matrix = DistMatrix::from_table(&table(), None).unwrap();
        let pairs = matrix.to_pairs();

        assert_eq!(pairs.len(), 9);
        for p in &pairs {
            let back = pairs
                .iter()
                .find(|q| q.source == p.target && q.target == p.source)
                .unwrap();
            assert_eq!(back.dist, p.dist);
            assert_eq!(matrix.get_by_name(&p.source, &p.target), Some(p.dist));
        }
        assert_eq!(
            pairs[1],
            DistPair {
                source: "g1.fna".to_string(),
                target: "g2.fna".to_string(),
                dist: 0.1
            }
        );
    }

    #[test]
    fn test_writers() {
        let matrix = DistMatrix::from_table(&table(), None).unwrap();

        let mut buf = vec![];
        matrix.write_phylip(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "3\ng1.fna\t0\t0.1\t0.3\ng2.fna\t0.1\t0\t0.2\ng3.fna\t0.3\t0.2\t0\n"
        );

        let mut buf = vec![];
        write_pairs(&matrix.to_pairs()[..2], &mut buf, true).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Source\tTarget\tDist\ng1.fna\tg1.fna\t0\ng1.fna\tg2.fna\t0.1\n"
        );
    }

    #[test]
    fn test_duplicate_names() {
        assert!(matches!(
            DistMatrix::new(vec!["a".to_string(), "a".to_string()]),
            Err(MashError::DuplicateLabel(_))
        ));
    }
}
